use std::collections::HashMap;
use std::sync::RwLock;

use scr_codec::{identity_with, Deposit, Record, RecordKind, Withdrawal, WithdrawalBundle};
use scr_crypto::HashAlgorithm;
use scr_types::{BundleStatus, Hash256, WithdrawalStatus};
use tracing::trace;

use crate::error::{RegistryError, RegistryResult};
use crate::selection::{filter_unspent, sort_by_fee_desc};

/// In-memory set of records keyed by identity.
///
/// Status updates go through the registry so the record is re-keyed under
/// its new identity in the same step. Reads return clones; the map sits
/// behind a `RwLock`.
pub struct RecordRegistry {
    hasher: HashAlgorithm,
    records: RwLock<HashMap<Hash256, Record>>,
}

impl RecordRegistry {
    /// Empty registry using the default hash algorithm.
    pub fn new() -> Self {
        Self::with_hasher(HashAlgorithm::default())
    }

    pub fn with_hasher(hasher: HashAlgorithm) -> Self {
        Self {
            hasher,
            records: RwLock::new(HashMap::new()),
        }
    }

    pub fn hasher(&self) -> HashAlgorithm {
        self.hasher
    }

    /// Identity of a record under this registry's hash algorithm.
    pub fn identity_of(&self, record: &Record) -> Hash256 {
        identity_with(record, self.hasher.provider())
    }

    pub fn len(&self) -> usize {
        self.records.read().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().expect("lock poisoned").is_empty()
    }

    /// Add a record and return its identity. Idempotent.
    pub fn insert(&self, record: Record) -> Hash256 {
        let id = self.identity_of(&record);
        let mut map = self.records.write().expect("lock poisoned");
        map.entry(id).or_insert(record);
        id
    }

    pub fn get(&self, id: &Hash256) -> Option<Record> {
        self.records.read().expect("lock poisoned").get(id).cloned()
    }

    pub fn contains(&self, id: &Hash256) -> bool {
        self.records.read().expect("lock poisoned").contains_key(id)
    }

    pub fn remove(&self, id: &Hash256) -> Option<Record> {
        self.records.write().expect("lock poisoned").remove(id)
    }

    /// All identities, sorted.
    pub fn all_ids(&self) -> Vec<Hash256> {
        let map = self.records.read().expect("lock poisoned");
        let mut ids: Vec<Hash256> = map.keys().copied().collect();
        ids.sort();
        ids
    }

    fn snapshot<T>(&self, pick: impl Fn(&Record) -> Option<&T>) -> Vec<(Hash256, T)>
    where
        T: Clone,
    {
        let map = self.records.read().expect("lock poisoned");
        let mut out: Vec<(Hash256, T)> = map
            .iter()
            .filter_map(|(id, r)| pick(r).map(|v| (*id, v.clone())))
            .collect();
        out.sort_by_key(|(id, _)| *id);
        out
    }

    /// Stored withdrawals, ordered by identity.
    pub fn withdrawals(&self) -> Vec<(Hash256, Withdrawal)> {
        self.snapshot(Record::as_withdrawal)
    }

    /// Stored bundles, ordered by identity.
    pub fn bundles(&self) -> Vec<(Hash256, WithdrawalBundle)> {
        self.snapshot(Record::as_bundle)
    }

    /// Stored deposits, ordered by identity.
    pub fn deposits(&self) -> Vec<(Hash256, Deposit)> {
        self.snapshot(Record::as_deposit)
    }

    /// Unspent withdrawals, highest fee first.
    ///
    /// Equal fees fall back to identity order, so the result does not depend
    /// on insertion order.
    pub fn unspent_by_fee(&self) -> Vec<Withdrawal> {
        let all: Vec<Withdrawal> = self.withdrawals().into_iter().map(|(_, w)| w).collect();
        sort_by_fee_desc(&filter_unspent(&all))
    }

    /// Move a withdrawal along its lifecycle and return its new identity.
    pub fn set_withdrawal_status(
        &self,
        id: &Hash256,
        status: WithdrawalStatus,
    ) -> RegistryResult<Hash256> {
        self.update(id, RecordKind::Withdrawal, |record| {
            if let Some(w) = record.as_withdrawal_mut() {
                w.status = w.status.transition(status)?;
            }
            Ok(())
        })
    }

    /// Move a bundle along its lifecycle and return its new identity.
    pub fn set_bundle_status(&self, id: &Hash256, status: BundleStatus) -> RegistryResult<Hash256> {
        self.update(id, RecordKind::WithdrawalBundle, |record| {
            if let Some(b) = record.as_bundle_mut() {
                b.status = b.status.transition(status)?;
            }
            Ok(())
        })
    }

    fn update(
        &self,
        id: &Hash256,
        expected: RecordKind,
        apply: impl FnOnce(&mut Record) -> RegistryResult<()>,
    ) -> RegistryResult<Hash256> {
        let mut map = self.records.write().expect("lock poisoned");
        let mut updated = map.get(id).cloned().ok_or(RegistryError::NotFound(*id))?;
        if updated.kind() != expected {
            return Err(RegistryError::WrongKind {
                id: *id,
                expected,
                actual: updated.kind(),
            });
        }
        apply(&mut updated)?;

        let new_id = self.identity_of(&updated);
        map.remove(id);
        map.insert(new_id, updated);
        trace!(old = %id.short_hex(), new = %new_id.short_hex(), "re-keyed record after status change");
        Ok(new_id)
    }
}

impl Default for RecordRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RecordRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordRegistry")
            .field("hasher", &self.hasher)
            .field("record_count", &self.len())
            .finish()
    }
}
