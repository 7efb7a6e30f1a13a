//! Record variants and their wire layouts.
//!
//! Every variant writes its kind tag as its own first field, so a payload
//! is self-describing from byte 0:
//!
//! ```text
//! Withdrawal        [1][sidechain u8][destination str][amount i64][fee i64][status u8][blind_hash 32]
//! WithdrawalBundle  [2][sidechain u8][bundle_tx var][height i32][status u8]
//! Deposit           [3][sidechain u8][key_id 20][payout i64][deposit_tx var][n u32]
//! ```

use std::fmt;

use scr_types::{
    format_money, Amount, BundleStatus, Hash256, KeyId, SidechainIndex, WithdrawalStatus,
};
use serde::{Deserialize, Serialize};

use crate::error::{DecodeError, DecodeResult};
use crate::tx::Transaction;
use crate::wire::{Decodable, Encodable, WireReader, WireWriter};

/// Discriminant identifying a record variant on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    Withdrawal,
    WithdrawalBundle,
    Deposit,
}

impl RecordKind {
    pub const ALL: [RecordKind; 3] = [Self::Withdrawal, Self::WithdrawalBundle, Self::Deposit];

    /// Leading payload byte for this kind.
    pub fn tag(self) -> u8 {
        match self {
            Self::Withdrawal => 1,
            Self::WithdrawalBundle => 2,
            Self::Deposit => 3,
        }
    }

    /// Parse a leading payload byte. The set is closed: anything else is
    /// `None`.
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(Self::Withdrawal),
            2 => Some(Self::WithdrawalBundle),
            3 => Some(Self::Deposit),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Withdrawal => "withdrawal",
            Self::WithdrawalBundle => "withdrawal_bundle",
            Self::Deposit => "deposit",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn expect_tag(r: &mut WireReader<'_>, kind: RecordKind) -> DecodeResult<()> {
    let tag = r.read_u8("kind")?;
    if tag == kind.tag() {
        return Ok(());
    }
    match RecordKind::from_tag(tag) {
        Some(other) => Err(DecodeError::malformed(
            "kind",
            format!("expected {kind} tag, found {other}"),
        )),
        None => Err(DecodeError::UnknownKind(tag)),
    }
}

fn read_embedded_tx(r: &mut WireReader<'_>, field: &'static str) -> DecodeResult<Transaction> {
    let blob = r.read_var_bytes(field)?;
    Transaction::from_embedded(field, blob)
}

// ---------------------------------------------------------------------------
// Withdrawal
// ---------------------------------------------------------------------------

/// Request to move value out of the sidechain to a main-chain address.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Withdrawal {
    pub sidechain_index: SidechainIndex,
    pub destination: String,
    pub amount: Amount,
    pub mainchain_fee: Amount,
    pub status: WithdrawalStatus,
    /// Links the request to the blinded bundle transaction that pays it.
    pub blind_hash: Hash256,
}

impl Withdrawal {
    /// A new `Unspent` withdrawal with a zero blind hash.
    pub fn new(
        sidechain_index: SidechainIndex,
        destination: impl Into<String>,
        amount: Amount,
        mainchain_fee: Amount,
    ) -> Self {
        Self {
            sidechain_index,
            destination: destination.into(),
            amount,
            mainchain_fee,
            status: WithdrawalStatus::Unspent,
            blind_hash: Hash256::zero(),
        }
    }

    pub fn with_status(mut self, status: WithdrawalStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_blind_hash(mut self, blind_hash: Hash256) -> Self {
        self.blind_hash = blind_hash;
        self
    }

    /// Overwrite the status without checking the transition table.
    ///
    /// The record's identity changes with it.
    pub fn set_status(&mut self, status: WithdrawalStatus) {
        self.status = status;
    }

    pub fn is_unspent(&self) -> bool {
        self.status == WithdrawalStatus::Unspent
    }
}

impl Encodable for Withdrawal {
    fn encode_to(&self, w: &mut WireWriter) {
        w.write_u8(RecordKind::Withdrawal.tag());
        w.write_u8(self.sidechain_index);
        w.write_str(&self.destination);
        w.write_i64(self.amount);
        w.write_i64(self.mainchain_fee);
        w.write_u8(self.status.to_byte());
        w.write_hash(&self.blind_hash);
    }
}

impl Decodable for Withdrawal {
    fn decode_from(r: &mut WireReader<'_>) -> DecodeResult<Self> {
        expect_tag(r, RecordKind::Withdrawal)?;
        let sidechain_index = r.read_u8("sidechain_index")?;
        let destination = r.read_string("destination")?;
        let amount = r.read_i64("amount")?;
        let mainchain_fee = r.read_i64("mainchain_fee")?;
        let status = WithdrawalStatus::from_byte(r.read_u8("status")?)
            .map_err(|e| DecodeError::malformed("status", e.to_string()))?;
        let blind_hash = r.read_hash("blind_hash")?;
        Ok(Self {
            sidechain_index,
            destination,
            amount,
            mainchain_fee,
            status,
            blind_hash,
        })
    }
}

impl fmt::Display for Withdrawal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "kind={}", RecordKind::Withdrawal)?;
        writeln!(f, "sidechain={}", self.sidechain_index)?;
        writeln!(f, "destination={}", self.destination)?;
        writeln!(f, "amount={}", format_money(self.amount))?;
        writeln!(f, "mainchain_fee={}", format_money(self.mainchain_fee))?;
        writeln!(f, "status={}", self.status)?;
        writeln!(f, "blind_hash={}", self.blind_hash)
    }
}

// ---------------------------------------------------------------------------
// WithdrawalBundle
// ---------------------------------------------------------------------------

/// A batch of withdrawals paid out by one main-chain transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalBundle {
    pub sidechain_index: SidechainIndex,
    pub bundle_tx: Transaction,
    pub height: i32,
    pub status: BundleStatus,
}

impl WithdrawalBundle {
    /// A new bundle in the `Created` state.
    pub fn new(sidechain_index: SidechainIndex, bundle_tx: Transaction, height: i32) -> Self {
        Self {
            sidechain_index,
            bundle_tx,
            height,
            status: BundleStatus::Created,
        }
    }

    pub fn with_status(mut self, status: BundleStatus) -> Self {
        self.status = status;
        self
    }

    /// Overwrite the status without checking the transition table.
    pub fn set_status(&mut self, status: BundleStatus) {
        self.status = status;
    }
}

impl Encodable for WithdrawalBundle {
    fn encode_to(&self, w: &mut WireWriter) {
        w.write_u8(RecordKind::WithdrawalBundle.tag());
        w.write_u8(self.sidechain_index);
        w.write_var_bytes(&self.bundle_tx.to_bytes());
        w.write_i32(self.height);
        w.write_u8(self.status.to_byte());
    }
}

impl Decodable for WithdrawalBundle {
    fn decode_from(r: &mut WireReader<'_>) -> DecodeResult<Self> {
        expect_tag(r, RecordKind::WithdrawalBundle)?;
        let sidechain_index = r.read_u8("sidechain_index")?;
        let bundle_tx = read_embedded_tx(r, "bundle_tx")?;
        let height = r.read_i32("height")?;
        let status = BundleStatus::from_byte(r.read_u8("status")?)
            .map_err(|e| DecodeError::malformed("status", e.to_string()))?;
        Ok(Self {
            sidechain_index,
            bundle_tx,
            height,
            status,
        })
    }
}

impl fmt::Display for WithdrawalBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "kind={}", RecordKind::WithdrawalBundle)?;
        writeln!(f, "sidechain={}", self.sidechain_index)?;
        writeln!(f, "bundle_tx={}", self.bundle_tx)?;
        writeln!(f, "height={}", self.height)?;
        writeln!(f, "status={}", self.status)
    }
}

// ---------------------------------------------------------------------------
// Deposit
// ---------------------------------------------------------------------------

/// An observed inbound transfer. Deposits are final and carry no status.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposit {
    pub sidechain_index: SidechainIndex,
    pub key_id: KeyId,
    pub user_payout: Amount,
    pub deposit_tx: Transaction,
    /// Output index of the deposit within `deposit_tx`.
    pub n: u32,
}

impl Deposit {
    pub fn new(
        sidechain_index: SidechainIndex,
        key_id: KeyId,
        user_payout: Amount,
        deposit_tx: Transaction,
        n: u32,
    ) -> Self {
        Self {
            sidechain_index,
            key_id,
            user_payout,
            deposit_tx,
            n,
        }
    }
}

impl Encodable for Deposit {
    fn encode_to(&self, w: &mut WireWriter) {
        w.write_u8(RecordKind::Deposit.tag());
        w.write_u8(self.sidechain_index);
        w.write_key_id(&self.key_id);
        w.write_i64(self.user_payout);
        w.write_var_bytes(&self.deposit_tx.to_bytes());
        w.write_u32(self.n);
    }
}

impl Decodable for Deposit {
    fn decode_from(r: &mut WireReader<'_>) -> DecodeResult<Self> {
        expect_tag(r, RecordKind::Deposit)?;
        Ok(Self {
            sidechain_index: r.read_u8("sidechain_index")?,
            key_id: r.read_key_id("key_id")?,
            user_payout: r.read_i64("user_payout")?,
            deposit_tx: read_embedded_tx(r, "deposit_tx")?,
            n: r.read_u32("n")?,
        })
    }
}

impl fmt::Display for Deposit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "kind={}", RecordKind::Deposit)?;
        writeln!(f, "sidechain={}", self.sidechain_index)?;
        writeln!(f, "key_id={}", self.key_id)?;
        writeln!(f, "payout={}", format_money(self.user_payout))?;
        writeln!(f, "mainchain_txid={}", self.deposit_tx.txid())?;
        writeln!(f, "n={}", self.n)?;
        writeln!(f, "inputs:")?;
        for input in &self.deposit_tx.inputs {
            writeln!(f, "{}", input.prevout)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// Any sidechain record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Record {
    Withdrawal(Withdrawal),
    WithdrawalBundle(WithdrawalBundle),
    Deposit(Deposit),
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::Withdrawal(_) => RecordKind::Withdrawal,
            Self::WithdrawalBundle(_) => RecordKind::WithdrawalBundle,
            Self::Deposit(_) => RecordKind::Deposit,
        }
    }

    pub fn sidechain_index(&self) -> SidechainIndex {
        match self {
            Self::Withdrawal(w) => w.sidechain_index,
            Self::WithdrawalBundle(b) => b.sidechain_index,
            Self::Deposit(d) => d.sidechain_index,
        }
    }

    pub fn as_withdrawal(&self) -> Option<&Withdrawal> {
        match self {
            Self::Withdrawal(w) => Some(w),
            _ => None,
        }
    }

    pub fn as_bundle(&self) -> Option<&WithdrawalBundle> {
        match self {
            Self::WithdrawalBundle(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_deposit(&self) -> Option<&Deposit> {
        match self {
            Self::Deposit(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_withdrawal_mut(&mut self) -> Option<&mut Withdrawal> {
        match self {
            Self::Withdrawal(w) => Some(w),
            _ => None,
        }
    }

    pub fn as_bundle_mut(&mut self) -> Option<&mut WithdrawalBundle> {
        match self {
            Self::WithdrawalBundle(b) => Some(b),
            _ => None,
        }
    }
}

impl Encodable for Record {
    fn encode_to(&self, w: &mut WireWriter) {
        match self {
            Self::Withdrawal(v) => v.encode_to(w),
            Self::WithdrawalBundle(v) => v.encode_to(w),
            Self::Deposit(v) => v.encode_to(w),
        }
    }
}

impl Decodable for Record {
    /// Peek the tag and hand the untouched stream to the matching variant,
    /// which consumes the tag itself.
    fn decode_from(r: &mut WireReader<'_>) -> DecodeResult<Self> {
        let tag = r.peek_u8().ok_or(DecodeError::EmptyInput)?;
        let kind = RecordKind::from_tag(tag).ok_or(DecodeError::UnknownKind(tag))?;
        Ok(match kind {
            RecordKind::Withdrawal => Self::Withdrawal(Withdrawal::decode_from(r)?),
            RecordKind::WithdrawalBundle => Self::WithdrawalBundle(WithdrawalBundle::decode_from(r)?),
            RecordKind::Deposit => Self::Deposit(Deposit::decode_from(r)?),
        })
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Withdrawal(v) => fmt::Display::fmt(v, f),
            Self::WithdrawalBundle(v) => fmt::Display::fmt(v, f),
            Self::Deposit(v) => fmt::Display::fmt(v, f),
        }
    }
}

impl From<Withdrawal> for Record {
    fn from(w: Withdrawal) -> Self {
        Self::Withdrawal(w)
    }
}

impl From<WithdrawalBundle> for Record {
    fn from(b: WithdrawalBundle) -> Self {
        Self::WithdrawalBundle(b)
    }
}

impl From<Deposit> for Record {
    fn from(d: Deposit) -> Self {
        Self::Deposit(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{sample_bundle, sample_deposit, sample_withdrawal};

    #[test]
    fn tags_roundtrip_and_are_unique() {
        let mut tags: Vec<u8> = RecordKind::ALL.iter().map(|k| k.tag()).collect();
        for kind in RecordKind::ALL {
            assert_eq!(RecordKind::from_tag(kind.tag()), Some(kind));
        }
        tags.dedup();
        assert_eq!(tags, vec![1, 2, 3]);
    }

    #[test]
    fn from_tag_unknown() {
        assert!(RecordKind::from_tag(0).is_none());
        assert!(RecordKind::from_tag(4).is_none());
        assert!(RecordKind::from_tag(255).is_none());
    }

    #[test]
    fn withdrawal_layout() {
        let w = Withdrawal::new(0, "addr1", 100_000, 500);
        let bytes = w.to_bytes();
        assert_eq!(bytes[0], 1);
        assert_eq!(bytes[1], 0);
        assert_eq!(&bytes[2..8], b"\x05addr1");
        assert_eq!(&bytes[8..16], &100_000i64.to_le_bytes());
        assert_eq!(&bytes[16..24], &500i64.to_le_bytes());
        assert_eq!(bytes[24], WithdrawalStatus::Unspent.to_byte());
        assert_eq!(&bytes[25..], &[0u8; 32]);
        assert_eq!(bytes.len(), 57);
    }

    #[test]
    fn variant_decoder_checks_its_own_tag() {
        let bytes = sample_bundle().to_bytes();
        let err = Withdrawal::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, DecodeError::Malformed { field: "kind", .. }));

        let mut bytes = sample_withdrawal().to_bytes();
        bytes[0] = 9;
        assert_eq!(
            Withdrawal::from_bytes(&bytes).unwrap_err(),
            DecodeError::UnknownKind(9)
        );
    }

    #[test]
    fn unknown_status_byte_is_malformed() {
        let mut bytes = sample_withdrawal().to_bytes();
        let status_pos = bytes.len() - 33;
        bytes[status_pos] = 7;
        assert!(matches!(
            Withdrawal::from_bytes(&bytes),
            Err(DecodeError::Malformed { field: "status", .. })
        ));
    }

    #[test]
    fn kind_matches_variant() {
        assert_eq!(Record::from(sample_withdrawal()).kind(), RecordKind::Withdrawal);
        assert_eq!(Record::from(sample_bundle()).kind(), RecordKind::WithdrawalBundle);
        assert_eq!(Record::from(sample_deposit()).kind(), RecordKind::Deposit);
    }

    #[test]
    fn accessors() {
        let mut r = Record::from(sample_withdrawal());
        assert!(r.as_withdrawal().is_some());
        assert!(r.as_bundle().is_none());
        assert!(r.as_deposit().is_none());
        r.as_withdrawal_mut()
            .unwrap()
            .set_status(WithdrawalStatus::InBundle);
        assert_eq!(r.as_withdrawal().unwrap().status, WithdrawalStatus::InBundle);
        assert_eq!(r.sidechain_index(), sample_withdrawal().sidechain_index);
    }

    #[test]
    fn construction_accepts_degenerate_values() {
        let w = Withdrawal::new(0, "", 0, 0);
        assert_eq!(Withdrawal::from_bytes(&w.to_bytes()).unwrap(), w);
    }

    #[test]
    fn withdrawal_dump_uses_words() {
        let w = Withdrawal::new(2, "addr1", 100_000, 500).with_status(WithdrawalStatus::InBundle);
        let dump = w.to_string();
        assert!(dump.contains("kind=withdrawal\n"));
        assert!(dump.contains("sidechain=2\n"));
        assert!(dump.contains("destination=addr1\n"));
        assert!(dump.contains("amount=0.00100000\n"));
        assert!(dump.contains("mainchain_fee=0.00000500\n"));
        assert!(dump.contains("status=InBundle\n"));
    }

    #[test]
    fn bundle_dump() {
        let b = sample_bundle().with_status(BundleStatus::Failed);
        let dump = Record::from(b.clone()).to_string();
        assert!(dump.contains("kind=withdrawal_bundle\n"));
        assert!(dump.contains(&format!("txid={}", b.bundle_tx.txid())));
        assert!(dump.contains("status=Failed\n"));
    }

    #[test]
    fn deposit_dump_lists_inputs() {
        let d = sample_deposit();
        let dump = d.to_string();
        assert!(dump.contains(&format!("mainchain_txid={}\n", d.deposit_tx.txid())));
        assert!(dump.contains(&format!("n={}\n", d.n)));
        for input in &d.deposit_tx.inputs {
            assert!(dump.contains(&format!("{}\n", input.prevout)));
        }
        assert!(!dump.contains("status="));
    }

    #[test]
    fn serde_tags_kind() {
        let r = Record::from(sample_withdrawal());
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["kind"], "withdrawal");
        let back: Record = serde_json::from_value(json).unwrap();
        assert_eq!(back, r);
    }
}
