//! claritycodec CLI.
//!
//! # Commands
//! ```text
//! claritycodec decode       <HEX> | --file <path> [--repr] [--max-depth N] [--exact]
//! claritycodec decode-batch --file <path> [--mode skip|collect|throw]
//! claritycodec encode-uint  <N>
//! claritycodec encode-int   <N>
//! claritycodec address      --version <V> --hash <HEX> | --decode <ADDR>
//! claritycodec stackers     [--cycles 90 91 ...] [--config <path>] [--output <path>]
//! claritycodec info
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use claritycodec_address::{c32_address, c32_address_decode};
use claritycodec_core::{ClarityValue, ErrorMode, DEFAULT_MAX_DEPTH};
use claritycodec_observability::{init_tracing, LogConfig};

mod cmd_decode;
mod cmd_stackers;

#[derive(Parser)]
#[command(
    name = "claritycodec",
    about = "Decode and encode Stacks Clarity values",
    long_about = "
claritycodec: decode Clarity wire values, build call arguments, convert
c32check addresses and export the PoX reward set as CSV.

ENVIRONMENT VARIABLES:
  STACKS_API_URL   Stacks node / Hiro API base URL (default https://api.mainnet.hiro.so)
  STACKS_API_KEY   Sent as X-API-KEY on read-only calls
  RUST_LOG         Log filter, overrides the config file
",
    version
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode one serialized value
    Decode {
        /// Hex payload, optionally 0x-prefixed
        #[arg(required_unless_present = "file", conflicts_with = "file")]
        hex: Option<String>,
        /// Read raw bytes from this file instead
        #[arg(long)]
        file: Option<PathBuf>,
        /// Print Clarity syntax instead of JSON
        #[arg(long)]
        repr: bool,
        /// Maximum nesting depth
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,
        /// Reject bytes after the value
        #[arg(long)]
        exact: bool,
    },

    /// Decode a file of hex payloads, one per line, in parallel
    #[command(name = "decode-batch")]
    DecodeBatch {
        #[arg(long)]
        file: PathBuf,
        #[arg(long, value_enum, default_value_t = BatchMode::Skip)]
        mode: BatchMode,
    },

    /// Serialize an unsigned integer argument
    #[command(name = "encode-uint")]
    EncodeUint { value: u128 },

    /// Serialize a signed integer argument
    #[command(name = "encode-int")]
    EncodeInt {
        #[arg(allow_hyphen_values = true)]
        value: i128,
    },

    /// Convert between c32check addresses and version + hash160
    Address {
        /// Address version byte (22 = mainnet single-sig, 26 = testnet single-sig)
        #[arg(long, requires = "hash", conflicts_with = "decode")]
        version: Option<u8>,
        /// 20-byte hash160, hex
        #[arg(long, requires = "version")]
        hash: Option<String>,
        /// Address to decode
        #[arg(long)]
        decode: Option<String>,
    },

    /// Export the PoX reward set for the given cycles as CSV
    Stackers {
        /// Reward cycles (default from config: 90..94)
        #[arg(long, num_args = 1..)]
        cycles: Vec<u64>,
        /// JSON config file
        #[arg(long)]
        config: Option<PathBuf>,
        /// CSV output path
        #[arg(long)]
        output: Option<PathBuf>,
        /// API base URL
        #[arg(long)]
        api_url: Option<String>,
        /// API key, sent as X-API-KEY
        #[arg(long)]
        api_key: Option<String>,
    },

    /// Show build and capability info
    Info,
}

#[derive(Clone, Copy, ValueEnum)]
enum BatchMode {
    Skip,
    Collect,
    Throw,
}

impl From<BatchMode> for ErrorMode {
    fn from(mode: BatchMode) -> Self {
        match mode {
            BatchMode::Skip => ErrorMode::Skip,
            BatchMode::Collect => ErrorMode::Collect,
            BatchMode::Throw => ErrorMode::Throw,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // `stackers` takes its log settings from its config file.
    if !matches!(cli.command, Commands::Stackers { .. }) {
        init_tracing(&log_config(cli.verbose)).context("failed to initialise logging")?;
    }

    match cli.command {
        Commands::Decode { hex, file, repr, max_depth, exact } => {
            let input = match (hex, file) {
                (Some(hex), _) => cmd_decode::Input::Hex(hex),
                (None, Some(path)) => cmd_decode::Input::File(path),
                (None, None) => bail!("either a hex payload or --file is required"),
            };
            cmd_decode::run(input, max_depth, exact, repr)
        }

        Commands::DecodeBatch { file, mode } => cmd_decode::run_batch(&file, mode.into()),

        Commands::EncodeUint { value } => print_hex(&ClarityValue::UInt(value)),

        Commands::EncodeInt { value } => print_hex(&ClarityValue::Int(value)),

        Commands::Address { version, hash, decode } => {
            cmd_address(version, hash.as_deref(), decode.as_deref())
        }

        Commands::Stackers { cycles, config, output, api_url, api_key } => {
            let overrides = cmd_stackers::Overrides { cycles, output, api_url, api_key };
            cmd_stackers::run(config.as_deref(), overrides, cli.verbose).await
        }

        Commands::Info => cmd_info(),
    }
}

fn log_config(verbose: bool) -> LogConfig {
    LogConfig {
        level: if verbose { "debug" } else { "warn" }.into(),
        ..LogConfig::default()
    }
}

// ─── Command implementations ─────────────────────────────────────────────────

fn print_hex(value: &ClarityValue) -> Result<()> {
    println!("{}", value.to_hex()?);
    Ok(())
}

fn cmd_address(version: Option<u8>, hash: Option<&str>, decode: Option<&str>) -> Result<()> {
    match (version, hash, decode) {
        (_, _, Some(address)) => {
            let (version, hash160) = c32_address_decode(address)
                .with_context(|| format!("invalid address '{address}'"))?;
            let out = serde_json::json!({
                "version": version,
                "hash160": format!("0x{}", hex::encode(hash160)),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        (Some(version), Some(hash), None) => {
            let bytes = hex::decode(hash.strip_prefix("0x").unwrap_or(hash))
                .context("invalid hash hex")?;
            let hash160: [u8; 20] = bytes
                .as_slice()
                .try_into()
                .with_context(|| format!("hash160 must be 20 bytes, got {}", bytes.len()))?;
            println!("{}", c32_address(version, &hash160)?);
        }
        _ => bail!("use --version with --hash, or --decode"),
    }
    Ok(())
}

fn cmd_info() -> Result<()> {
    println!("claritycodec v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Capabilities:");
    println!("  ✓ Clarity value decoding    (15 type tags, depth limit {DEFAULT_MAX_DEPTH})");
    println!("  ✓ Clarity value encoding    (call-read arguments)");
    println!("  ✓ Parallel batch decode     (Rayon)");
    println!("  ✓ c32check addresses        (SP/SM/ST/SN)");
    println!("  ✓ Read-only contract calls  (retry + rate limiting)");
    println!("  ✓ PoX reward set export     (CSV)");
    Ok(())
}
