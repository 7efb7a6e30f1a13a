use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use scr_crypto::HashAlgorithm;
use scr_types::WithdrawalStatus;

use crate::config::OutputFormat;

#[derive(Parser)]
#[command(
    name = "scr",
    about = "Decode, identify and build enveloped sidechain records",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (overrides the config file)
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,

    /// Hash algorithm for identities: sha256d or blake3
    #[arg(long, global = true)]
    pub hasher: Option<HashAlgorithm>,

    /// Path to a TOML config file (default: ./scr.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Decode a record and print it
    Decode(BlobArgs),
    /// Print the identity of a record
    Identity(BlobArgs),
    /// Strip the envelope and print the payload
    Unpack(HexArgs),
    /// Wrap a payload in the envelope
    Pack(HexArgs),
    /// Build a withdrawal and print its encoding
    Withdrawal(WithdrawalArgs),
    /// Print the unspent withdrawals among the given blobs, highest fee first
    SortFees(SortFeesArgs),
}

#[derive(Args)]
pub struct BlobArgs {
    /// Hex-encoded blob
    pub hex: String,
    /// Input is a bare payload without the envelope
    #[arg(long)]
    pub raw: bool,
}

#[derive(Args)]
pub struct HexArgs {
    pub hex: String,
}

#[derive(Args)]
pub struct WithdrawalArgs {
    #[arg(long, default_value = "0")]
    pub sidechain: u8,
    #[arg(long)]
    pub destination: String,
    #[arg(long)]
    pub amount: i64,
    #[arg(long)]
    pub fee: i64,
    #[arg(long, default_value = "unspent")]
    pub status: WithdrawalStatus,
    /// Blind hash in display hex
    #[arg(long)]
    pub blind_hash: Option<String>,
    /// Print the bare payload instead of the enveloped blob
    #[arg(long)]
    pub raw: bool,
}

#[derive(Args)]
pub struct SortFeesArgs {
    pub blobs: Vec<String>,
    #[arg(long)]
    pub raw: bool,
}
