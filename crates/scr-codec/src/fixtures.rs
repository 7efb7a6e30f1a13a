//! Sample records and proptest strategies shared by the unit tests.

use proptest::collection::vec;
use proptest::prelude::*;
use scr_types::{BundleStatus, Hash256, KeyId, WithdrawalStatus};

use crate::record::{Deposit, Record, Withdrawal, WithdrawalBundle};
use crate::tx::{OutPoint, Transaction, TxIn, TxOut};

pub fn sample_tx(seed: u8) -> Transaction {
    Transaction {
        version: 2,
        inputs: vec![
            TxIn {
                prevout: OutPoint::new(Hash256::from_bytes([seed; 32]), 0),
                script_sig: vec![0x00, seed],
                sequence: 0xFFFF_FFFE,
            },
            TxIn {
                prevout: OutPoint::new(Hash256::from_bytes([seed.wrapping_add(1); 32]), 4),
                script_sig: vec![],
                sequence: u32::MAX,
            },
        ],
        outputs: vec![TxOut {
            value: 250_000,
            script_pubkey: vec![0x6a, 0x04, 0xAC, 0xDC, 0xF6, 0x6F],
        }],
        lock_time: 0,
    }
}

pub fn sample_withdrawal() -> Withdrawal {
    Withdrawal::new(0, "addr1", 100_000, 500).with_blind_hash(Hash256::from_bytes([0xB1; 32]))
}

pub fn sample_bundle() -> WithdrawalBundle {
    WithdrawalBundle::new(0, sample_tx(7), 1_200)
}

pub fn sample_deposit() -> Deposit {
    Deposit::new(1, KeyId::from_bytes([0x42; 20]), 75_000, sample_tx(9), 1)
}

fn arb_hash() -> impl Strategy<Value = Hash256> {
    any::<[u8; 32]>().prop_map(Hash256::from_bytes)
}

fn arb_tx() -> impl Strategy<Value = Transaction> {
    let input = (arb_hash(), any::<u32>(), vec(any::<u8>(), 0..40), any::<u32>()).prop_map(
        |(txid, vout, script_sig, sequence)| TxIn {
            prevout: OutPoint::new(txid, vout),
            script_sig,
            sequence,
        },
    );
    let output = (any::<i64>(), vec(any::<u8>(), 0..40))
        .prop_map(|(value, script_pubkey)| TxOut { value, script_pubkey });
    (any::<i32>(), vec(input, 0..4), vec(output, 0..4), any::<u32>()).prop_map(
        |(version, inputs, outputs, lock_time)| Transaction {
            version,
            inputs,
            outputs,
            lock_time,
        },
    )
}

pub fn arb_withdrawal_status() -> impl Strategy<Value = WithdrawalStatus> {
    prop_oneof![
        Just(WithdrawalStatus::Unspent),
        Just(WithdrawalStatus::InBundle),
        Just(WithdrawalStatus::Spent),
    ]
}

fn arb_bundle_status() -> impl Strategy<Value = BundleStatus> {
    prop_oneof![
        Just(BundleStatus::Created),
        Just(BundleStatus::Failed),
        Just(BundleStatus::Spent),
    ]
}

pub fn arb_withdrawal() -> impl Strategy<Value = Withdrawal> {
    (
        any::<u8>(),
        ".{0,300}",
        any::<i64>(),
        any::<i64>(),
        arb_withdrawal_status(),
        arb_hash(),
    )
        .prop_map(
            |(sidechain_index, destination, amount, mainchain_fee, status, blind_hash)| {
                Withdrawal {
                    sidechain_index,
                    destination,
                    amount,
                    mainchain_fee,
                    status,
                    blind_hash,
                }
            },
        )
}

pub fn arb_bundle() -> impl Strategy<Value = WithdrawalBundle> {
    (any::<u8>(), arb_tx(), any::<i32>(), arb_bundle_status()).prop_map(
        |(sidechain_index, bundle_tx, height, status)| WithdrawalBundle {
            sidechain_index,
            bundle_tx,
            height,
            status,
        },
    )
}

pub fn arb_deposit() -> impl Strategy<Value = Deposit> {
    (
        any::<u8>(),
        any::<[u8; 20]>(),
        any::<i64>(),
        arb_tx(),
        any::<u32>(),
    )
        .prop_map(|(sidechain_index, key, user_payout, deposit_tx, n)| Deposit {
            sidechain_index,
            key_id: KeyId::from_bytes(key),
            user_payout,
            deposit_tx,
            n,
        })
}

pub fn arb_record() -> impl Strategy<Value = Record> {
    prop_oneof![
        arb_withdrawal().prop_map(Record::from),
        arb_bundle().prop_map(Record::from),
        arb_deposit().prop_map(Record::from),
    ]
}
