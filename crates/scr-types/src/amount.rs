/// Signed amount in the smallest currency unit.
pub type Amount = i64;

/// Units per whole coin.
pub const COIN: Amount = 100_000_000;

/// Render an amount as a decimal coin value with eight fractional digits.
///
/// Diagnostic only; the wire format always carries the raw integer.
pub fn format_money(amount: Amount) -> String {
    let abs = amount.unsigned_abs();
    let coin = COIN as u64;
    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}{}.{:08}", abs / coin, abs % coin)
}
