use anyhow::{bail, Context};
use colored::Colorize;
use scr_codec::{decode, encode, identity_with, Record, Withdrawal};
use scr_envelope::{open, pack, seal, unpack};
use scr_select::{filter_unspent, sort_by_fee_desc};
use scr_types::{format_money, Hash256};
use tracing::debug;

use crate::cli::*;
use crate::config::{CliConfig, OutputFormat};

pub fn run_command(command: Command, config: &CliConfig) -> anyhow::Result<()> {
    match command {
        Command::Decode(args) => cmd_decode(args, config),
        Command::Identity(args) => cmd_identity(args, config),
        Command::Unpack(args) => cmd_unpack(args),
        Command::Pack(args) => cmd_pack(args),
        Command::Withdrawal(args) => cmd_withdrawal(args),
        Command::SortFees(args) => cmd_sort_fees(args, config),
    }
}

fn parse_hex(input: &str) -> anyhow::Result<Vec<u8>> {
    let trimmed = input.trim();
    let trimmed = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    hex::decode(trimmed).with_context(|| format!("invalid hex input: {input}"))
}

/// Decode a hex blob, enveloped unless `raw`.
fn load_record(input: &str, raw: bool) -> anyhow::Result<Record> {
    let bytes = parse_hex(input)?;
    debug!(len = bytes.len(), raw, "loading record");
    let record = if raw {
        decode(&bytes).context("decoding record payload")?
    } else {
        open(&bytes).context("opening enveloped record")?
    };
    Ok(record)
}

fn record_identity(record: &Record, config: &CliConfig) -> Hash256 {
    identity_with(record, config.hasher.provider())
}

fn cmd_decode(args: BlobArgs, config: &CliConfig) -> anyhow::Result<()> {
    let record = load_record(&args.hex, args.raw)?;
    let id = record_identity(&record, config);
    match config.format {
        OutputFormat::Json => {
            let out = serde_json::json!({
                "identity": id.to_hex(),
                "hasher": config.hasher.to_string(),
                "record": record,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            print!("{record}");
            println!("identity={} ({})", id.to_hex().yellow(), config.hasher);
        }
    }
    Ok(())
}

fn cmd_identity(args: BlobArgs, config: &CliConfig) -> anyhow::Result<()> {
    let record = load_record(&args.hex, args.raw)?;
    let id = record_identity(&record, config);
    match config.format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({ "identity": id.to_hex(), "kind": record.kind() })
        ),
        OutputFormat::Text => println!("{}", id.to_hex()),
    }
    Ok(())
}

fn cmd_unpack(args: HexArgs) -> anyhow::Result<()> {
    let blob = parse_hex(&args.hex)?;
    let payload = unpack(&blob).context("unpacking envelope")?;
    println!("{}", hex::encode(payload));
    Ok(())
}

fn cmd_pack(args: HexArgs) -> anyhow::Result<()> {
    let payload = parse_hex(&args.hex)?;
    println!("{}", hex::encode(pack(&payload)));
    Ok(())
}

fn build_withdrawal(args: &WithdrawalArgs) -> anyhow::Result<Withdrawal> {
    let mut w = Withdrawal::new(args.sidechain, args.destination.clone(), args.amount, args.fee)
        .with_status(args.status);
    if let Some(hex) = &args.blind_hash {
        w = w.with_blind_hash(Hash256::from_hex(hex).context("invalid --blind-hash")?);
    }
    Ok(w)
}

fn cmd_withdrawal(args: WithdrawalArgs) -> anyhow::Result<()> {
    let record = Record::from(build_withdrawal(&args)?);
    let bytes = if args.raw {
        encode(&record)
    } else {
        seal(&record)
    };
    println!("{}", hex::encode(bytes));
    Ok(())
}

/// Decode withdrawal blobs and return the unspent ones, highest fee first.
fn select_by_fee(blobs: &[String], raw: bool) -> anyhow::Result<Vec<Withdrawal>> {
    let mut withdrawals = Vec::with_capacity(blobs.len());
    for (i, blob) in blobs.iter().enumerate() {
        match load_record(blob, raw).with_context(|| format!("blob #{i}"))? {
            Record::Withdrawal(w) => withdrawals.push(w),
            other => bail!("blob #{i} is a {}, not a withdrawal", other.kind()),
        }
    }
    Ok(sort_by_fee_desc(&filter_unspent(&withdrawals)))
}

fn cmd_sort_fees(args: SortFeesArgs, config: &CliConfig) -> anyhow::Result<()> {
    let selected = select_by_fee(&args.blobs, args.raw)?;
    match config.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&selected)?),
        OutputFormat::Text => {
            if selected.is_empty() {
                println!("No unspent withdrawals.");
            }
            for w in &selected {
                let id = record_identity(&Record::from(w.clone()), config);
                println!(
                    "{}  fee {}  amount {}  → {}",
                    id.short_hex().yellow(),
                    format_money(w.mainchain_fee).green(),
                    format_money(w.amount),
                    w.destination.bold()
                );
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use scr_codec::WithdrawalBundle;
    use scr_types::WithdrawalStatus;

    use super::*;

    fn sealed(dest: &str, fee: i64, status: WithdrawalStatus) -> String {
        let w = Withdrawal::new(0, dest, 1_000, fee).with_status(status);
        hex::encode(seal(&Record::from(w)))
    }

    #[test]
    fn parse_hex_accepts_prefix_and_whitespace() {
        assert_eq!(parse_hex(" 0x0a0b ").unwrap(), vec![0x0a, 0x0b]);
        assert!(parse_hex("xyz").is_err());
    }

    #[test]
    fn load_record_enveloped_and_raw() {
        let record = Record::from(Withdrawal::new(0, "addr1", 100_000, 500));
        let enveloped = hex::encode(seal(&record));
        let raw = hex::encode(encode(&record));
        assert_eq!(load_record(&enveloped, false).unwrap(), record);
        assert_eq!(load_record(&raw, true).unwrap(), record);
        assert!(load_record(&raw, false).is_err());
    }

    #[test]
    fn build_withdrawal_from_args() {
        let args = WithdrawalArgs {
            sidechain: 3,
            destination: "addr9".into(),
            amount: 42,
            fee: 7,
            status: WithdrawalStatus::InBundle,
            blind_hash: Some("11".repeat(32)),
            raw: false,
        };
        let w = build_withdrawal(&args).unwrap();
        assert_eq!(w.sidechain_index, 3);
        assert_eq!(w.status, WithdrawalStatus::InBundle);
        assert_eq!(w.blind_hash, Hash256::from_bytes([0x11; 32]));
    }

    #[test]
    fn bad_blind_hash_is_error() {
        let args = WithdrawalArgs {
            sidechain: 0,
            destination: "a".into(),
            amount: 1,
            fee: 1,
            status: WithdrawalStatus::Unspent,
            blind_hash: Some("abcd".into()),
            raw: true,
        };
        assert!(build_withdrawal(&args).is_err());
    }

    #[test]
    fn select_by_fee_filters_and_orders() {
        let blobs = vec![
            sealed("a", 300, WithdrawalStatus::Unspent),
            sealed("b", 900, WithdrawalStatus::Unspent),
            sealed("c", 700, WithdrawalStatus::Spent),
            sealed("d", 500, WithdrawalStatus::Unspent),
        ];
        let fees: Vec<i64> = select_by_fee(&blobs, false)
            .unwrap()
            .iter()
            .map(|w| w.mainchain_fee)
            .collect();
        assert_eq!(fees, vec![900, 500, 300]);
    }

    #[test]
    fn select_by_fee_rejects_other_kinds() {
        let bundle = WithdrawalBundle::new(0, Default::default(), 5);
        let blobs = vec![hex::encode(seal(&Record::from(bundle)))];
        assert!(select_by_fee(&blobs, false).is_err());
    }
}
