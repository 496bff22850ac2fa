//! Genesis block construction and verification.
//!
//! The nonce and timestamp for each network were mined offline; nothing here
//! searches for a solution. Construction only replays the fixed inputs and
//! checks that the resulting merkle root and block hash still match the
//! constants the rest of the chain is anchored to. A mismatch means the
//! binary's embedded network definition is internally broken, and startup
//! must not continue.

use crate::core::script::ScriptBuilder;
use crate::core::types::{
    display_hex, Block, BlockHeader, Hash256, OutPoint, Transaction, TxInput, TxOutput, NULL_HASH,
};
use crate::params::ParamsError;
use crate::pow::{compact_from_target, pow_limit};

/// Headline embedded in the genesis coinbase in lieu of a signature script.
pub const GENESIS_COINBASE_TEXT: &str = "Ransomware is a “Rather Small” Phenomenon, AV-TEST Security Report Says | JP Buntinx | July 11, 2017";

/// Genesis creation time shared by all three networks (2017-07-11 21:00 UTC).
pub const GENESIS_TIME: u32 = 1_499_806_800;

/// The fixed inputs and expected outputs of one network's genesis block.
#[derive(Debug, Clone, Copy)]
pub struct GenesisSpec {
    pub coinbase_text: &'static str,
    pub time: u32,
    /// Right-shift defining the network pow limit; the header's compact bits
    /// are derived from it.
    pub pow_limit_shift: u32,
    pub nonce: u32,
    pub expected_hash: Hash256,
    pub expected_merkle_root: Hash256,
}

// Expected hashes in digest order. Explorer-style hex reads them reversed;
// see the tests for the canonical strings.

pub const MAIN_GENESIS_HASH: Hash256 = [
    0x90, 0xe2, 0xfe, 0x66, 0x33, 0x3b, 0x4f, 0xe2, 0x30, 0x84, 0x12, 0xae, 0xd9, 0x2e, 0x5c,
    0x32, 0xcf, 0x9d, 0x10, 0x52, 0x76, 0x7d, 0x79, 0xed, 0x35, 0x56, 0x15, 0x61, 0x47, 0x04,
    0x00, 0x00,
];

pub const TESTNET_GENESIS_HASH: Hash256 = [
    0x4e, 0x85, 0xf4, 0x21, 0xd3, 0x12, 0xee, 0x8b, 0x76, 0x62, 0x8e, 0xd0, 0xcd, 0x06, 0xd4,
    0x87, 0xbb, 0xbf, 0x4b, 0xed, 0x02, 0xc7, 0x3b, 0xe9, 0xda, 0xc6, 0x14, 0x7b, 0xfc, 0xb6,
    0x00, 0x00,
];

pub const REGTEST_GENESIS_HASH: Hash256 = [
    0x56, 0xe0, 0x53, 0x13, 0x71, 0x51, 0x9e, 0x0a, 0x4a, 0x89, 0xf0, 0x5e, 0xfb, 0xec, 0x8e,
    0xbd, 0x74, 0xc5, 0xce, 0x93, 0x74, 0x15, 0xdd, 0xa4, 0xe3, 0x48, 0x55, 0x23, 0xd3, 0x2d,
    0xdb, 0xbc,
];

/// All three networks share the coinbase transaction, so the merkle root is
/// common as well.
pub const GENESIS_MERKLE_ROOT: Hash256 = [
    0xab, 0x4c, 0xe3, 0x50, 0x88, 0x5c, 0xe3, 0x3d, 0xde, 0x89, 0x10, 0x17, 0xe5, 0x66, 0x47,
    0xc8, 0xd9, 0x3e, 0xb1, 0x58, 0x8b, 0xa5, 0xbf, 0x5a, 0x95, 0x65, 0x49, 0x47, 0x06, 0x51,
    0x55, 0x9e,
];

pub const MAIN_GENESIS: GenesisSpec = GenesisSpec {
    coinbase_text: GENESIS_COINBASE_TEXT,
    time: GENESIS_TIME,
    pow_limit_shift: 20,
    nonce: 2_120_726,
    expected_hash: MAIN_GENESIS_HASH,
    expected_merkle_root: GENESIS_MERKLE_ROOT,
};

pub const TESTNET_GENESIS: GenesisSpec = GenesisSpec {
    pow_limit_shift: 16,
    nonce: 306_946,
    expected_hash: TESTNET_GENESIS_HASH,
    ..MAIN_GENESIS
};

pub const REGTEST_GENESIS: GenesisSpec = GenesisSpec {
    pow_limit_shift: 1,
    nonce: 2,
    expected_hash: REGTEST_GENESIS_HASH,
    ..MAIN_GENESIS
};

impl GenesisSpec {
    /// Deterministically construct the genesis block: one coinbase-style
    /// transaction with the headline text in its input script and a single
    /// empty output, under a header with no predecessor.
    pub fn build(&self) -> Block {
        let script_sig = ScriptBuilder::new()
            .push_num(0)
            .push_num(42)
            .push_data(self.coinbase_text.as_bytes())
            .into_bytes();

        let coinbase = Transaction {
            version: 1,
            time: self.time,
            inputs: vec![TxInput {
                previous_output: OutPoint::NULL,
                script_sig,
                sequence: 0xffff_ffff,
            }],
            outputs: vec![TxOutput::empty()],
            lock_time: 0,
        };

        let mut block = Block {
            header: BlockHeader {
                version: 1,
                prev_hash: NULL_HASH,
                merkle_root: NULL_HASH,
                time: self.time,
                bits: compact_from_target(&pow_limit(self.pow_limit_shift)),
                nonce: self.nonce,
            },
            transactions: vec![coinbase],
        };
        block.header.merkle_root = block.compute_merkle_root();
        block
    }

    /// Build and verify against the hard-coded constants, returning the block
    /// and its hash. Any mismatch is a fatal configuration error.
    pub fn build_verified(&self) -> Result<(Block, Hash256), ParamsError> {
        let block = self.build();
        if block.header.merkle_root != self.expected_merkle_root {
            return Err(ParamsError::BadGenesis {
                field: "merkle root",
                got: display_hex(&block.header.merkle_root),
                want: display_hex(&self.expected_merkle_root),
            });
        }
        let hash = block.header.hash();
        if hash != self.expected_hash {
            return Err(ParamsError::BadGenesis {
                field: "block hash",
                got: display_hex(&hash),
                want: display_hex(&self.expected_hash),
            });
        }
        Ok((block, hash))
    }
}
