use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use txpeek::config;
use txpeek::modules::batch::{self, BatchSettings};

#[derive(Debug, Parser)]
#[command(
    name = "txpeek",
    version,
    about = "Batch-decode Ethereum transaction input data against a known contract ABI"
)]
struct Args {
    /// Target contract address (0x-prefixed)
    #[arg(long)]
    address: Option<String>,

    /// Path to the newline-separated input-data list
    #[arg(long)]
    datalist: Option<PathBuf>,

    /// Path to the ABI array or deployments JSON
    #[arg(long)]
    abi: Option<PathBuf>,

    /// Path the output JSON array is written to
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = config::load();

    let settings = BatchSettings {
        address: require_string(
            args.address,
            "TXPEEK_ADDRESS",
            config.contract_address,
            "contract address",
        )?,
        datalist_path: require_path(
            args.datalist,
            "TXPEEK_DATALIST",
            config.datalist_path,
            "datalist path",
        )?,
        abi_path: require_path(args.abi, "TXPEEK_ABI", config.abi_path, "ABI path")?,
        output_path: require_path(
            args.output,
            "TXPEEK_OUTPUT",
            config.output_path,
            "output path",
        )?,
    };

    batch::run(&settings)
}

/// Resolve one setting: command line first, then environment, then the
/// config file.
fn require_string(
    cli: Option<String>,
    env_key: &str,
    file: Option<String>,
    what: &str,
) -> Result<String> {
    if let Some(value) = cli {
        return Ok(value);
    }
    if let Some(value) = env_value(env_key) {
        return Ok(value);
    }
    if let Some(value) = file {
        return Ok(value);
    }
    bail!("missing {what}: pass a flag, set {env_key}, or add it to the config file");
}

fn require_path(
    cli: Option<PathBuf>,
    env_key: &str,
    file: Option<PathBuf>,
    what: &str,
) -> Result<PathBuf> {
    if let Some(value) = cli {
        return Ok(value);
    }
    if let Some(value) = env_value(env_key) {
        return Ok(PathBuf::from(value));
    }
    if let Some(value) = file {
        return Ok(value);
    }
    bail!("missing {what}: pass a flag, set {env_key}, or add it to the config file");
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}
