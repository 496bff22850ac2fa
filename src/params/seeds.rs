//! Fixed seed nodes.
//!
//! Each network carries a compact table of (IPv6 address, port) entries baked
//! into the binary. A node only needs these to reach one or two peers; after
//! that it learns fresher addresses over the wire. To keep every new node from
//! courting the same entry first, each materialized record gets a synthetic
//! last-seen time spread uniformly over the week starting two weeks ago.

use std::net::Ipv6Addr;

use rand::Rng;
use serde::{Deserialize, Serialize};

pub const ONE_WEEK: u64 = 7 * 24 * 60 * 60;

/// One hard-coded seed entry: raw IPv6 bytes plus port.
#[derive(Debug, Clone, Copy)]
pub struct SeedSpec6 {
    pub addr: [u8; 16],
    pub port: u16,
}

/// IPv4-mapped IPv6 entry (::ffff:a.b.c.d).
const fn seed_v4(a: u8, b: u8, c: u8, d: u8, port: u16) -> SeedSpec6 {
    SeedSpec6 { addr: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xff, 0xff, a, b, c, d], port }
}

pub const MAIN_SEEDS: &[SeedSpec6] = &[
    seed_v4(104, 238, 145, 26, 48890),
    seed_v4(45, 76, 139, 213, 48890),
    seed_v4(149, 28, 170, 11, 48890),
    seed_v4(207, 148, 75, 102, 48890),
];

pub const TESTNET_SEEDS: &[SeedSpec6] = &[
    seed_v4(45, 32, 171, 89, 48892),
    seed_v4(140, 82, 54, 163, 48892),
];

/// Regtest is fully local and bootstraps from nothing.
pub const REGTEST_SEEDS: &[SeedSpec6] = &[];

/// A usable peer address produced from a seed entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeedAddress {
    pub addr: Ipv6Addr,
    pub port: u16,
    /// Synthetic last-seen unix time in [now - 2 weeks, now - 1 week).
    pub last_seen: u64,
}

/// Expand a fixed seed table into peer-address records. An empty table yields
/// an empty list. No I/O; the only effect is the records returned.
pub fn materialize_seeds(table: &[SeedSpec6], now: u64) -> Vec<SeedAddress> {
    let mut rng = rand::thread_rng();
    table
        .iter()
        .map(|seed| SeedAddress {
            addr: Ipv6Addr::from(seed.addr),
            port: seed.port,
            last_seen: now - 2 * ONE_WEEK + rng.gen_range(0..ONE_WEEK),
        })
        .collect()
}
