//! Ultrax network definitions.
//!
//! Everything that distinguishes one Ultrax network from another lives here:
//! magic bytes, ports, address prefixes, proof-of-work bounds, the genesis
//! block, and the seed lists used for initial bootstrap. The rest of the node
//! reads these through [`params::active_params`] after the network has been
//! selected at startup.

pub mod core;
pub mod crypto;
pub mod params;
pub mod pow;
