//! Per-network chain parameters and the process-wide network selection.
//!
//! Three parameter sets exist: the production network, a public testnet, and
//! a local regression-test network. Main is defined from first principles;
//! Testnet copies Main and overrides a subset of fields; Regtest copies
//! Testnet likewise. Every set is a flat, fully-materialized value. Nothing
//! here is mutated after [`Registry::build`] returns.

pub mod genesis;
pub mod seeds;

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use num_bigint::BigUint;
use serde::Serialize;

use crate::core::types::{Block, Hash256};
use crate::params::seeds::SeedAddress;
use crate::pow::pow_limit;

/// The three independent Ultrax networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Main = 0,
    Testnet = 1,
    Regtest = 2,
}

impl Network {
    pub const ALL: [Network; 3] = [Network::Main, Network::Testnet, Network::Regtest];

    fn from_u8(v: u8) -> Network {
        match v {
            1 => Network::Testnet,
            2 => Network::Regtest,
            _ => Network::Main,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Main => write!(f, "main"),
            Network::Testnet => write!(f, "testnet"),
            Network::Regtest => write!(f, "regtest"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamsError {
    /// A constructed genesis block does not match its hard-coded constants.
    /// The embedded network definition is internally broken; startup must not
    /// continue.
    BadGenesis { field: &'static str, got: String, want: String },
    /// Testnet and regtest were both requested.
    ConflictingNetworks,
}

impl fmt::Display for ParamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamsError::BadGenesis { field, got, want } => {
                write!(f, "genesis {field} mismatch: got {got}, want {want}")
            }
            ParamsError::ConflictingNetworks => {
                write!(f, "testnet and regtest cannot both be selected")
            }
        }
    }
}

impl std::error::Error for ParamsError {}

/// Version-byte roles used when encoding addresses and keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AddressPrefix {
    PubkeyHash,
    ScriptHash,
    SecretKey,
    ExtPublicKey,
    ExtSecretKey,
}

/// Network-specific version bytes for address/key encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressPrefixes {
    pub pubkey_hash: Vec<u8>,
    pub script_hash: Vec<u8>,
    pub secret_key: Vec<u8>,
    pub ext_public_key: Vec<u8>,
    pub ext_secret_key: Vec<u8>,
}

impl AddressPrefixes {
    pub fn get(&self, kind: AddressPrefix) -> &[u8] {
        match kind {
            AddressPrefix::PubkeyHash => &self.pubkey_hash,
            AddressPrefix::ScriptHash => &self.script_hash,
            AddressPrefix::SecretKey => &self.secret_key,
            AddressPrefix::ExtPublicKey => &self.ext_public_key,
            AddressPrefix::ExtSecretKey => &self.ext_secret_key,
        }
    }
}

/// One DNS bootstrap entry, kept verbatim as operator-provided configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DnsSeed {
    pub name: &'static str,
    pub host: &'static str,
}

/// Everything that distinguishes one network from another. Immutable once
/// built; consumers hold shared references for the process lifetime.
#[derive(Debug, Clone)]
pub struct ChainParams {
    pub network: Network,
    /// First four bytes of every wire message; rarely-used upper ASCII so it
    /// never occurs in normal data and never parses as UTF-8.
    pub magic: [u8; 4],
    pub default_port: u16,
    pub rpc_port: u16,
    /// Easiest difficulty target a block may carry on this network.
    pub pow_limit: BigUint,
    /// Key authorized to sign network alert messages.
    pub alert_pubkey: Vec<u8>,
    pub address_prefixes: AddressPrefixes,
    pub genesis: Block,
    pub genesis_hash: Hash256,
    pub dns_seeds: Vec<DnsSeed>,
    pub fixed_seeds: Vec<SeedAddress>,
    /// Height after which the network leaves proof-of-work consensus.
    pub last_pow_block: u32,
    pub require_rpc_password: bool,
    /// Subdirectory tag under the node data directory; empty for main.
    pub data_dir: &'static str,
}

const MAIN_ALERT_PUBKEY: &str = "04b8d49de838594c2289037043e5330f12f4cb98f0a2f0cda90a2a957c3358c95480bb6db13fd5a50368c1f24096495eb473be801e5c919b0668a2f7acf74ed291";
const TESTNET_ALERT_PUBKEY: &str = "0471dc165db490094d35cde15b1f5d755fa6ad6f2b5ed0f340e3f17f57389c3c2af113a8cbcc885bde73305a553b5640c83021128008ddf882e856336269080496";

/// All three parameter sets, built exactly once per process.
#[derive(Debug)]
pub struct Registry {
    main: ChainParams,
    testnet: ChainParams,
    regtest: ChainParams,
}

impl Registry {
    /// Build Main from first principles, Testnet by copy-then-override of
    /// Main, Regtest by copy-then-override of Testnet. Fails if any network's
    /// genesis block no longer reproduces its hard-coded hashes.
    pub fn build() -> Result<Self, ParamsError> {
        let now = unix_time();

        let (genesis_block, genesis_hash) = genesis::MAIN_GENESIS.build_verified()?;
        let main = ChainParams {
            network: Network::Main,
            magic: [0xaa, 0xb2, 0xc3, 0xd1],
            default_port: 48890,
            rpc_port: 48891,
            pow_limit: pow_limit(20),
            alert_pubkey: hex::decode(MAIN_ALERT_PUBKEY).expect("valid alert key hex"),
            address_prefixes: AddressPrefixes {
                pubkey_hash: vec![68],
                script_hash: vec![75],
                secret_key: vec![28],
                ext_public_key: vec![0x04, 0x88, 0xb2, 0x1e],
                ext_secret_key: vec![0x04, 0x88, 0xad, 0xe4],
            },
            genesis: genesis_block,
            genesis_hash,
            dns_seeds: vec![
                DnsSeed { name: "ultraxcoin.thecryptochat.net", host: " " },
                DnsSeed { name: "seed", host: "NULL" },
            ],
            fixed_seeds: seeds::materialize_seeds(seeds::MAIN_SEEDS, now),
            last_pow_block: 10_000,
            require_rpc_password: true,
            data_dir: "",
        };
        tracing::debug!(network = %main.network, "chain parameters built");

        let (genesis_block, genesis_hash) = genesis::TESTNET_GENESIS.build_verified()?;
        let testnet = ChainParams {
            network: Network::Testnet,
            magic: [0xa4, 0xb5, 0xc6, 0xd7],
            default_port: 48892,
            rpc_port: 48889,
            pow_limit: pow_limit(16),
            alert_pubkey: hex::decode(TESTNET_ALERT_PUBKEY).expect("valid alert key hex"),
            address_prefixes: AddressPrefixes {
                pubkey_hash: vec![67],
                script_hash: vec![74],
                secret_key: vec![27],
                ext_public_key: vec![0x04, 0x35, 0x87, 0xcf],
                ext_secret_key: vec![0x04, 0x35, 0x83, 0x94],
            },
            genesis: genesis_block,
            genesis_hash,
            dns_seeds: Vec::new(),
            fixed_seeds: seeds::materialize_seeds(seeds::TESTNET_SEEDS, now),
            last_pow_block: 0x7fff_ffff,
            data_dir: "testnet",
            ..main.clone()
        };
        tracing::debug!(network = %testnet.network, "chain parameters built");

        let (genesis_block, genesis_hash) = genesis::REGTEST_GENESIS.build_verified()?;
        let regtest = ChainParams {
            network: Network::Regtest,
            magic: [0xa4, 0xb1, 0xc2, 0xd3],
            default_port: 48893,
            pow_limit: pow_limit(1),
            address_prefixes: AddressPrefixes {
                pubkey_hash: vec![66],
                script_hash: vec![73],
                secret_key: vec![26],
                ext_public_key: vec![0x04, 0x35, 0x87, 0xd0],
                ext_secret_key: vec![0x04, 0x35, 0x83, 0x95],
            },
            genesis: genesis_block,
            genesis_hash,
            // Regtest has no DNS seeds and an empty fixed-seed table.
            dns_seeds: Vec::new(),
            fixed_seeds: seeds::materialize_seeds(seeds::REGTEST_SEEDS, now),
            require_rpc_password: false,
            data_dir: "regtest",
            ..testnet.clone()
        };
        tracing::debug!(network = %regtest.network, "chain parameters built");

        Ok(Registry { main, testnet, regtest })
    }

    pub fn get(&self, network: Network) -> &ChainParams {
        match network {
            Network::Main => &self.main,
            Network::Testnet => &self.testnet,
            Network::Regtest => &self.regtest,
        }
    }
}

fn unix_time() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).expect("clock before unix epoch").as_secs()
}

// ─── Network Selection ───────────────────────────────────────────────

/// The active-network handle.
///
/// Selection is expected to happen at most once, from the startup thread,
/// before anything else reads the active set; that write-once discipline is a
/// contract, not something enforced here. The store is a single-word atomic so
/// readers always observe a complete selection, and re-selecting the same
/// network is a no-op in effect.
pub struct NetworkSelector {
    active: AtomicU8,
}

impl NetworkSelector {
    pub const fn new() -> Self {
        NetworkSelector { active: AtomicU8::new(Network::Main as u8) }
    }

    pub fn select(&self, network: Network) {
        self.active.store(network as u8, Ordering::Release);
    }

    pub fn network(&self) -> Network {
        Network::from_u8(self.active.load(Ordering::Acquire))
    }

    /// Derive and select the network from the two command-line intents.
    /// Requesting both testnet and regtest is contradictory configuration:
    /// the resolution fails and the current selection is left untouched.
    pub fn resolve_from_intent(
        &self,
        want_testnet: bool,
        want_regtest: bool,
    ) -> Result<Network, ParamsError> {
        let network = match (want_testnet, want_regtest) {
            (true, true) => return Err(ParamsError::ConflictingNetworks),
            (true, false) => Network::Testnet,
            (false, true) => Network::Regtest,
            (false, false) => Network::Main,
        };
        self.select(network);
        Ok(network)
    }
}

impl Default for NetworkSelector {
    fn default() -> Self {
        Self::new()
    }
}

static REGISTRY: OnceLock<Registry> = OnceLock::new();
static SELECTOR: NetworkSelector = NetworkSelector::new();

/// The process-wide registry, built on first access. An inconsistent embedded
/// network definition is unrecoverable at this level; embedders that need to
/// observe the error use [`Registry::build`] directly.
pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(|| {
        Registry::build().unwrap_or_else(|e| {
            tracing::error!("embedded chain parameters are inconsistent: {e}");
            std::process::exit(1);
        })
    })
}

/// Point the process at one network. See [`NetworkSelector::select`].
pub fn select_network(network: Network) {
    SELECTOR.select(network);
}

/// Resolve the process network from command-line intents and select it.
pub fn resolve_network(want_testnet: bool, want_regtest: bool) -> Result<Network, ParamsError> {
    SELECTOR.resolve_from_intent(want_testnet, want_regtest)
}

pub fn active_network() -> Network {
    SELECTOR.network()
}

/// Parameters of the currently selected network (Main until selected).
pub fn active_params() -> &'static ChainParams {
    registry().get(SELECTOR.network())
}
