//! Minimal script push encoding.
//!
//! Only the pushes the genesis coinbase needs are implemented: number pushes
//! (minimal little-endian, sign-magnitude) and raw data pushes with the
//! standard direct / OP_PUSHDATA1 / OP_PUSHDATA2 length prefixes.

pub const OP_PUSHDATA1: u8 = 0x4c;
pub const OP_PUSHDATA2: u8 = 0x4d;

/// Incremental script builder.
#[derive(Debug, Default)]
pub struct ScriptBuilder {
    bytes: Vec<u8>,
}

impl ScriptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an integer encoded as a minimal little-endian magnitude with a
    /// sign bit in the top byte. Zero encodes as an empty push.
    pub fn push_num(mut self, n: i64) -> Self {
        self.bytes.extend_from_slice(&encode_push(&scriptnum_bytes(n)));
        self
    }

    /// Push arbitrary bytes with the appropriate length prefix.
    pub fn push_data(mut self, data: &[u8]) -> Self {
        self.bytes.extend_from_slice(&encode_push(data));
        self
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

fn encode_push(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() + 3);
    let len = data.len();
    if len < OP_PUSHDATA1 as usize {
        out.push(len as u8);
    } else if len <= 0xff {
        out.push(OP_PUSHDATA1);
        out.push(len as u8);
    } else {
        // Scripts larger than u16 never occur here.
        out.push(OP_PUSHDATA2);
        out.extend_from_slice(&(len as u16).to_le_bytes());
    }
    out.extend_from_slice(data);
    out
}

fn scriptnum_bytes(n: i64) -> Vec<u8> {
    if n == 0 {
        return Vec::new();
    }
    let negative = n < 0;
    let mut abs = n.unsigned_abs();
    let mut out = Vec::new();
    while abs > 0 {
        out.push((abs & 0xff) as u8);
        abs >>= 8;
    }
    // If the top magnitude bit is set, an extra byte carries the sign.
    if out.last().is_some_and(|b| b & 0x80 != 0) {
        out.push(if negative { 0x80 } else { 0x00 });
    } else if negative {
        let last = out.last_mut().expect("non-zero magnitude");
        *last |= 0x80;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_zero_is_empty_push() {
        assert_eq!(ScriptBuilder::new().push_num(0).into_bytes(), vec![0x00]);
    }

    #[test]
    fn test_push_small_number() {
        assert_eq!(ScriptBuilder::new().push_num(42).into_bytes(), vec![0x01, 0x2a]);
    }

    #[test]
    fn test_push_number_with_high_bit() {
        // 0x80 needs a padding byte so it is not read as -0
        assert_eq!(ScriptBuilder::new().push_num(0x80).into_bytes(), vec![0x02, 0x80, 0x00]);
        assert_eq!(ScriptBuilder::new().push_num(-42).into_bytes(), vec![0x01, 0xaa]);
    }

    #[test]
    fn test_direct_push_limit() {
        let data = vec![0xaa; 75];
        let script = ScriptBuilder::new().push_data(&data).into_bytes();
        assert_eq!(script[0], 75);
        assert_eq!(script.len(), 76);
    }

    #[test]
    fn test_pushdata1() {
        let data = vec![0xbb; 104];
        let script = ScriptBuilder::new().push_data(&data).into_bytes();
        assert_eq!(&script[..2], &[OP_PUSHDATA1, 104]);
        assert_eq!(script.len(), 106);
    }

    #[test]
    fn test_pushdata2() {
        let data = vec![0xcc; 300];
        let script = ScriptBuilder::new().push_data(&data).into_bytes();
        assert_eq!(&script[..3], &[OP_PUSHDATA2, 0x2c, 0x01]);
        assert_eq!(script.len(), 303);
    }
}
