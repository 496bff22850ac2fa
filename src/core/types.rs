use serde::{Deserialize, Serialize};
use std::fmt;

use crate::crypto::{double_sha256, scrypt_block_hash};

/// A 32-byte hash used throughout the system, in digest (little-endian) order.
pub type Hash256 = [u8; 32];

/// Null hash (all zeros) used for the genesis block's prev_hash
pub const NULL_HASH: Hash256 = [0u8; 32];

/// Render a hash the way explorers print it: byte-reversed hex.
pub fn display_hex(hash: &Hash256) -> String {
    let mut rev = *hash;
    rev.reverse();
    hex::encode(rev)
}

/// CompactSize length prefix used by the wire encoding.
pub fn write_varint(buf: &mut Vec<u8>, n: u64) {
    match n {
        0..=0xfc => buf.push(n as u8),
        0xfd..=0xffff => {
            buf.push(0xfd);
            buf.extend_from_slice(&(n as u16).to_le_bytes());
        }
        0x10000..=0xffff_ffff => {
            buf.push(0xfe);
            buf.extend_from_slice(&(n as u32).to_le_bytes());
        }
        _ => {
            buf.push(0xff);
            buf.extend_from_slice(&n.to_le_bytes());
        }
    }
}

// ─── Transaction Types ───────────────────────────────────────────────

/// Represents a reference to a previous transaction output
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct OutPoint {
    pub txid: Hash256,
    pub vout: u32,
}

impl OutPoint {
    /// The null outpoint spent by coinbase inputs.
    pub const NULL: OutPoint = OutPoint { txid: NULL_HASH, vout: 0xffff_ffff };
}

/// Transaction input - spends a previous output
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TxInput {
    pub previous_output: OutPoint,
    pub script_sig: Vec<u8>,
    pub sequence: u32,
}

/// Transaction output - creates a new spendable output
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TxOutput {
    pub value: i64,
    pub script_pubkey: Vec<u8>,
}

impl TxOutput {
    /// The empty output carried by the genesis coinbase: zero value, no script.
    pub fn empty() -> Self {
        TxOutput { value: 0, script_pubkey: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.value == 0 && self.script_pubkey.is_empty()
    }
}

/// A complete transaction.
///
/// Carries an explicit `time` field after the version, as every descendant of
/// the original proof-of-stake codebase does. Dropping it would change every
/// txid on the network.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    pub version: u32,
    pub time: u32,
    pub inputs: Vec<TxInput>,
    pub outputs: Vec<TxOutput>,
    pub lock_time: u32,
}

impl Transaction {
    /// Wire encoding. Explicit and stable: these bytes feed the txid hash, so
    /// the layout is consensus-fixed.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(128);
        buf.extend_from_slice(&self.version.to_le_bytes());
        buf.extend_from_slice(&self.time.to_le_bytes());

        write_varint(&mut buf, self.inputs.len() as u64);
        for input in &self.inputs {
            buf.extend_from_slice(&input.previous_output.txid);
            buf.extend_from_slice(&input.previous_output.vout.to_le_bytes());
            write_varint(&mut buf, input.script_sig.len() as u64);
            buf.extend_from_slice(&input.script_sig);
            buf.extend_from_slice(&input.sequence.to_le_bytes());
        }

        write_varint(&mut buf, self.outputs.len() as u64);
        for output in &self.outputs {
            buf.extend_from_slice(&output.value.to_le_bytes());
            write_varint(&mut buf, output.script_pubkey.len() as u64);
            buf.extend_from_slice(&output.script_pubkey);
        }

        buf.extend_from_slice(&self.lock_time.to_le_bytes());
        buf
    }

    /// Compute the transaction hash (double SHA-256 of the wire encoding)
    pub fn hash(&self) -> Hash256 {
        double_sha256(&self.encode())
    }

    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].previous_output == OutPoint::NULL
    }
}

// ─── Block Types ─────────────────────────────────────────────────────

/// Block header. `bits` is the compact encoding of the difficulty target.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockHeader {
    pub version: i32,
    pub prev_hash: Hash256,
    pub merkle_root: Hash256,
    pub time: u32,
    pub bits: u32,
    pub nonce: u32,
}

impl BlockHeader {
    /// The fixed 80-byte wire encoding the block hash is computed over.
    pub fn encode(&self) -> [u8; 80] {
        let mut buf = [0u8; 80];
        buf[0..4].copy_from_slice(&self.version.to_le_bytes());
        buf[4..36].copy_from_slice(&self.prev_hash);
        buf[36..68].copy_from_slice(&self.merkle_root);
        buf[68..72].copy_from_slice(&self.time.to_le_bytes());
        buf[72..76].copy_from_slice(&self.bits.to_le_bytes());
        buf[76..80].copy_from_slice(&self.nonce.to_le_bytes());
        buf
    }

    /// Compute the block hash (scrypt over the 80-byte header).
    pub fn hash(&self) -> Hash256 {
        scrypt_block_hash(&self.encode())
    }
}

/// A complete block
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Block {
    pub header: BlockHeader,
    pub transactions: Vec<Transaction>,
}

impl Block {
    /// Compute the merkle root from the block's transactions.
    /// Odd levels duplicate their last entry, as the original tree builder did.
    pub fn compute_merkle_root(&self) -> Hash256 {
        if self.transactions.is_empty() {
            return NULL_HASH;
        }

        let mut hashes: Vec<Hash256> = self.transactions.iter().map(|tx| tx.hash()).collect();

        while hashes.len() > 1 {
            if hashes.len() % 2 != 0 {
                let last = *hashes.last().expect("non-empty level");
                hashes.push(last);
            }

            let mut next_level = Vec::with_capacity(hashes.len() / 2);
            for chunk in hashes.chunks(2) {
                let mut combined = [0u8; 64];
                combined[..32].copy_from_slice(&chunk[0]);
                combined[32..].copy_from_slice(&chunk[1]);
                next_level.push(double_sha256(&combined));
            }
            hashes = next_level;
        }

        hashes[0]
    }

    pub fn validate_merkle_root(&self) -> bool {
        self.header.merkle_root == self.compute_merkle_root()
    }
}

impl fmt::Display for BlockHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Block [{}] bits={:#010x} ts={}",
            display_hex(&self.hash()),
            self.bits,
            self.time,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy_tx() -> Transaction {
        Transaction {
            version: 1,
            time: 1_499_806_800,
            inputs: vec![TxInput {
                previous_output: OutPoint::NULL,
                script_sig: vec![0x00],
                sequence: 0xffff_ffff,
            }],
            outputs: vec![TxOutput::empty()],
            lock_time: 0,
        }
    }

    #[test]
    fn test_varint_boundaries() {
        let mut buf = Vec::new();
        write_varint(&mut buf, 0xfc);
        assert_eq!(buf, [0xfc]);
        buf.clear();
        write_varint(&mut buf, 0xfd);
        assert_eq!(buf, [0xfd, 0xfd, 0x00]);
        buf.clear();
        write_varint(&mut buf, 0x10000);
        assert_eq!(buf, [0xfe, 0x00, 0x00, 0x01, 0x00]);
    }

    #[test]
    fn test_tx_encode_layout() {
        let tx = dummy_tx();
        let bytes = tx.encode();
        // version | time | vin count | null outpoint | script | sequence |
        // vout count | empty output | lock time
        assert_eq!(&bytes[0..4], &1u32.to_le_bytes());
        assert_eq!(&bytes[4..8], &1_499_806_800u32.to_le_bytes());
        assert_eq!(bytes[8], 1);
        assert_eq!(&bytes[9..41], &NULL_HASH);
        assert_eq!(&bytes[41..45], &[0xff; 4]);
        assert_eq!(bytes.len(), 4 + 4 + 1 + 36 + 2 + 4 + 1 + 9 + 4);
    }

    #[test]
    fn test_tx_hash_deterministic() {
        let tx = dummy_tx();
        assert_eq!(tx.hash(), tx.hash());
        assert_ne!(tx.hash(), NULL_HASH);
        assert!(tx.is_coinbase());
    }

    #[test]
    fn test_header_encode_is_80_bytes() {
        let header = BlockHeader {
            version: 1,
            prev_hash: NULL_HASH,
            merkle_root: [7u8; 32],
            time: 1,
            bits: 0x1e0fffff,
            nonce: 42,
        };
        let bytes = header.encode();
        assert_eq!(&bytes[36..68], &[7u8; 32]);
        assert_eq!(&bytes[72..76], &0x1e0fffffu32.to_le_bytes());
    }

    #[test]
    fn test_merkle_root_single_tx() {
        let tx = dummy_tx();
        let block = Block {
            header: BlockHeader {
                version: 1,
                prev_hash: NULL_HASH,
                merkle_root: NULL_HASH,
                time: 0,
                bits: 0,
                nonce: 0,
            },
            transactions: vec![tx.clone()],
        };
        assert_eq!(block.compute_merkle_root(), tx.hash());
    }

    #[test]
    fn test_merkle_root_odd_count_duplicates_last() {
        let mut tx2 = dummy_tx();
        tx2.lock_time = 1;
        let mut tx3 = dummy_tx();
        tx3.lock_time = 2;
        let block = Block {
            header: BlockHeader {
                version: 1,
                prev_hash: NULL_HASH,
                merkle_root: NULL_HASH,
                time: 0,
                bits: 0,
                nonce: 0,
            },
            transactions: vec![dummy_tx(), tx2, tx3.clone()],
        };
        // Third leaf pairs with itself on the first level.
        let a = block.transactions[0].hash();
        let b = block.transactions[1].hash();
        let c = tx3.hash();
        let mut buf = [0u8; 64];
        buf[..32].copy_from_slice(&a);
        buf[32..].copy_from_slice(&b);
        let ab = crate::crypto::double_sha256(&buf);
        buf[..32].copy_from_slice(&c);
        buf[32..].copy_from_slice(&c);
        let cc = crate::crypto::double_sha256(&buf);
        buf[..32].copy_from_slice(&ab);
        buf[32..].copy_from_slice(&cc);
        assert_eq!(block.compute_merkle_root(), crate::crypto::double_sha256(&buf));
    }

    #[test]
    fn test_display_hex_reverses() {
        let mut h = [0u8; 32];
        h[31] = 0xab;
        assert!(display_hex(&h).starts_with("ab"));
    }
}
