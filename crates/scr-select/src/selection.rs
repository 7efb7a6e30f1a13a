//! Ordering and filtering of record collections.
//!
//! All sorts are stable: elements with equal keys keep their input order.
//! Callers may rely on this tie-break.

use std::cmp::Reverse;

use scr_codec::{Withdrawal, WithdrawalBundle};

/// Copy of `withdrawals` ordered by `mainchain_fee`, highest first.
pub fn sort_by_fee_desc(withdrawals: &[Withdrawal]) -> Vec<Withdrawal> {
    let mut out = withdrawals.to_vec();
    sort_by_fee_desc_in_place(&mut out);
    out
}

/// In-place form of [`sort_by_fee_desc`].
pub fn sort_by_fee_desc_in_place(withdrawals: &mut [Withdrawal]) {
    withdrawals.sort_by_key(|w| Reverse(w.mainchain_fee));
}

/// Copy of `bundles` ordered by `height`, highest first.
pub fn sort_by_height_desc(bundles: &[WithdrawalBundle]) -> Vec<WithdrawalBundle> {
    let mut out = bundles.to_vec();
    sort_by_height_desc_in_place(&mut out);
    out
}

/// In-place form of [`sort_by_height_desc`].
pub fn sort_by_height_desc_in_place(bundles: &mut [WithdrawalBundle]) {
    bundles.sort_by_key(|b| Reverse(b.height));
}

/// The `Unspent` withdrawals, in input order. Statuses are not touched.
pub fn filter_unspent(withdrawals: &[Withdrawal]) -> Vec<Withdrawal> {
    withdrawals.iter().filter(|w| w.is_unspent()).cloned().collect()
}

/// Drop every withdrawal that is not `Unspent`, keeping order.
pub fn retain_unspent(withdrawals: &mut Vec<Withdrawal>) {
    withdrawals.retain(Withdrawal::is_unspent);
}
