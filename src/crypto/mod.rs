//! Hashing primitives for Ultrax.
//!
//! Transaction ids and merkle nodes use double SHA-256. Block hashes use
//! scrypt (N=1024, r=1, p=1) over the 80-byte header, with the header doubling
//! as its own salt. The hard-coded genesis constants were generated under
//! these exact rules, so they must not change.

use sha2::{Digest, Sha256};

use crate::core::types::Hash256;

pub fn double_sha256(data: &[u8]) -> Hash256 {
    let first = Sha256::digest(data);
    let second = Sha256::digest(first);
    let mut out = [0u8; 32];
    out.copy_from_slice(&second);
    out
}

/// Scrypt proof-of-work hash over a serialized block header.
pub fn scrypt_block_hash(header: &[u8]) -> Hash256 {
    // log2(1024) = 10
    let params = scrypt::Params::new(10, 1, 1, 32).expect("static scrypt parameters");
    let mut out = [0u8; 32];
    scrypt::scrypt(header, header, &params, &mut out).expect("32-byte output");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_sha256_vector() {
        assert_eq!(
            hex::encode(double_sha256(b"hello")),
            "9595c9df90075148eb06860365df33584b75bff782a510c6cd4883a419833d50"
        );
    }

    #[test]
    fn test_scrypt_block_hash_vector() {
        assert_eq!(
            hex::encode(scrypt_block_hash(b"header bytes")),
            "a2ff8d28d98df2e0532c7a1e3384a60f2d8a1c45ae24cd21faed63ec39501ca3"
        );
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(scrypt_block_hash(b"x"), scrypt_block_hash(b"x"));
        assert_ne!(scrypt_block_hash(b"x"), scrypt_block_hash(b"y"));
    }
}
