use clap::{Parser, Subcommand};

use ultrax::core::types::display_hex;
use ultrax::params;
use ultrax::pow::compact_from_target;

#[derive(Parser)]
#[command(name = "ultrax", version = "0.1.0")]
#[command(about = "Ultrax network parameters")]
struct Cli {
    /// Run on testnet (separate chain, port 48892)
    #[arg(long, global = true)]
    testnet: bool,
    /// Run on the local regression-test network
    #[arg(long, global = true)]
    regtest: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the active network's parameters
    Info,
    /// Print the genesis block as JSON
    Genesis,
    /// List the materialized fixed seeds
    Seeds,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ultrax=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    // Pick the network before anything reads the active parameters
    let network = match params::resolve_network(cli.testnet, cli.regtest) {
        Ok(network) => network,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    };
    tracing::info!(%network, "network selected");

    let p = params::active_params();
    match cli.command {
        Commands::Info => {
            println!("Network:        {}", p.network);
            println!("Magic:          {}", hex::encode(p.magic));
            println!("P2P port:       {}", p.default_port);
            println!("RPC port:       {}", p.rpc_port);
            println!("PoW limit bits: {:#010x}", compact_from_target(&p.pow_limit));
            println!("Genesis:        {}", display_hex(&p.genesis_hash));
            println!("Merkle root:    {}", display_hex(&p.genesis.header.merkle_root));
            println!("DNS seeds:      {}", p.dns_seeds.len());
            println!("Fixed seeds:    {}", p.fixed_seeds.len());
            println!("Last PoW block: {}", p.last_pow_block);
            println!("RPC password:   {}", if p.require_rpc_password { "required" } else { "optional" });
        }

        Commands::Genesis => {
            println!(
                "{}",
                serde_json::to_string_pretty(&p.genesis).expect("genesis serializes")
            );
        }

        Commands::Seeds => {
            for seed in &p.fixed_seeds {
                println!("{} port={} last_seen={}", seed.addr, seed.port, seed.last_seen);
            }
        }
    }
}
