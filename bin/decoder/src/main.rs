//! CLI driver: reads a file of raw batcher blobs, runs the decode pipeline
//! and prints the span batch record as JSON.

use anyhow::{anyhow, Context, Result};
use blobspan_decode::prelude::*;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::{info, Level};

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "blobspan", version, about)]
struct Cli {
    /// Path to a file holding the concatenated raw blobs of one batcher
    /// transaction.
    blob_file: PathBuf,
    /// Expected channel id, 32 hex characters. When unset, the first channel
    /// seen is decoded.
    #[arg(long)]
    channel_id: Option<String>,
    /// Handling of frames for channels other than the expected one.
    #[arg(long, value_enum, default_value_t = PolicyArg::Track)]
    channel_policy: PolicyArg,
    /// Hard ceiling on the decompressed channel size in bytes.
    #[arg(long, default_value_t = blobspan_decode::params::MAX_DECOMPRESSED_BYTES)]
    max_decompressed_bytes: usize,
    /// Verbosity level (0 = errors only, 4 = trace).
    #[arg(short, long, default_value_t = 2)]
    verbosity: u8,
}

/// CLI-facing mirror of [ChannelIdPolicy].
#[derive(ValueEnum, Debug, Clone, Copy)]
enum PolicyArg {
    /// Accumulate foreign channels independently.
    Track,
    /// Drop frames for foreign channels.
    Ignore,
    /// Fail on the first foreign frame.
    Reject,
}

impl From<PolicyArg> for ChannelIdPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Track => Self::Track,
            PolicyArg::Ignore => Self::Ignore,
            PolicyArg::Reject => Self::Reject,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing_subscriber(cli.verbosity)?;

    let data = std::fs::read(&cli.blob_file)
        .with_context(|| format!("failed to read {}", cli.blob_file.display()))?;
    info!(target: "blobspan", len = data.len(), "read blob file");

    let cfg = DecoderConfig {
        max_decompressed_bytes: cli.max_decompressed_bytes,
        expected_channel_id: cli.channel_id.as_deref().map(parse_channel_id).transpose()?,
        channel_id_policy: cli.channel_policy.into(),
    };

    let decoded =
        BatchDecoder::new(cfg).decode(&data).map_err(|e| anyhow!("decode failed: {e}"))?;
    info!(
        target: "blobspan",
        channel = %alloy_primitives::hex::encode(decoded.channel_id),
        blocks = decoded.batch.payload.block_count,
        txs = decoded.batch.payload.total_tx_count(),
        decompressed = decoded.decompressed.len(),
        unparsed = decoded.unparsed.len(),
        "decoded span batch"
    );

    println!("{}", serde_json::to_string_pretty(&decoded.batch)?);
    Ok(())
}

/// Parses a 32-hex-character channel id.
fn parse_channel_id(s: &str) -> Result<ChannelId> {
    let bytes =
        alloy_primitives::hex::decode(s).map_err(|e| anyhow!("invalid channel id hex: {e}"))?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| anyhow!("channel id must be 16 bytes, got {}", bytes.len()))
}

fn init_tracing_subscriber(verbosity: u8) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(match verbosity {
            0 => Level::ERROR,
            1 => Level::WARN,
            2 => Level::INFO,
            3 => Level::DEBUG,
            _ => Level::TRACE,
        })
        .finish();
    tracing::subscriber::set_global_default(subscriber).map_err(|e| anyhow!(e))
}
