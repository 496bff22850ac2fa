//! Proof-of-work difficulty targets and their compact ("bits") encoding.
//!
//! A target is a 256-bit integer; a block hash interpreted as a little-endian
//! integer must not exceed it. Headers store targets in the 4-byte compact
//! form: one size byte followed by a 3-byte mantissa, with the mantissa
//! shifted down one byte whenever its top bit would read as a sign.

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};

/// The easiest permitted target for a network: all ones shifted right by
/// `shift` bits, i.e. `2^(256-shift) - 1`. Larger shift means a stricter bound.
pub fn pow_limit(shift: u32) -> BigUint {
    (BigUint::one() << (256 - shift)) - BigUint::one()
}

/// Compact encoding of a target.
pub fn compact_from_target(target: &BigUint) -> u32 {
    if target.is_zero() {
        return 0;
    }
    let mut size = ((target.bits() + 7) / 8) as u32;
    let mut mantissa: u32 = if size <= 3 {
        (target << (8 * (3 - size))).to_u32().expect("fits in 24 bits")
    } else {
        (target >> (8 * (size - 3))).to_u32().expect("fits in 24 bits")
    };
    // A set top bit would flip the sign under the original encoding.
    if mantissa & 0x0080_0000 != 0 {
        mantissa >>= 8;
        size += 1;
    }
    mantissa | (size << 24)
}

/// Expand compact bits back into a target. Lossy inverse of
/// [`compact_from_target`]: the mantissa only keeps the top three bytes.
pub fn target_from_compact(bits: u32) -> BigUint {
    let size = bits >> 24;
    let mantissa = BigUint::from(bits & 0x007f_ffff);
    if size <= 3 {
        mantissa >> (8 * (3 - size))
    } else {
        mantissa << (8 * (size - 3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_compact_encodings() {
        // ~uint256 >> 20 / 16 / 1, as the three network pow limits use
        assert_eq!(compact_from_target(&pow_limit(20)), 0x1e0fffff);
        assert_eq!(compact_from_target(&pow_limit(16)), 0x1f00ffff);
        assert_eq!(compact_from_target(&pow_limit(1)), 0x207fffff);
    }

    #[test]
    fn test_limit_ordering() {
        assert!(pow_limit(20) < pow_limit(16));
        assert!(pow_limit(16) < pow_limit(1));
    }

    #[test]
    fn test_compact_round_trip() {
        for bits in [0x1e0fffffu32, 0x1f00ffff, 0x207fffff, 0x1d00ffff] {
            assert_eq!(compact_from_target(&target_from_compact(bits)), bits);
        }
    }

    #[test]
    fn test_small_targets() {
        assert_eq!(compact_from_target(&BigUint::zero()), 0);
        assert_eq!(compact_from_target(&BigUint::from(0x12u32)), 0x01120000);
        assert_eq!(target_from_compact(0x01120000), BigUint::from(0x12u32));
        // Single byte with the high bit set gains a size byte
        assert_eq!(compact_from_target(&BigUint::from(0x80u32)), 0x02008000);
    }
}
