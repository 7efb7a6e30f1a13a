//! Record-level encode/decode entry points.
//!
//! `decode` never guesses: the first byte must be one of the three record
//! tags, the variant must consume the input exactly, and every length
//! prefix must agree with the bytes actually present.

use tracing::debug;

use crate::error::{DecodeError, DecodeResult};
use crate::record::{Record, RecordKind};
use crate::wire::{Decodable, Encodable, WireReader};

/// Encode a record. Byte 0 of the result is always the kind tag.
pub fn encode(record: &Record) -> Vec<u8> {
    record.to_bytes()
}

/// Decode a record from a bare payload (no envelope).
pub fn decode(data: &[u8]) -> DecodeResult<Record> {
    let Some(&tag) = data.first() else {
        debug!("rejecting empty record payload");
        return Err(DecodeError::EmptyInput);
    };
    let Some(kind) = RecordKind::from_tag(tag) else {
        debug!(tag, "rejecting payload with unknown record kind");
        return Err(DecodeError::UnknownKind(tag));
    };
    debug!(%kind, len = data.len(), "decoding record");

    let mut reader = WireReader::new(data);
    let record = Record::decode_from(&mut reader)?;
    reader.finish()?;
    Ok(record)
}

/// Peek the kind of an encoded payload without decoding it.
pub fn peek_kind(data: &[u8]) -> DecodeResult<RecordKind> {
    let &tag = data.first().ok_or(DecodeError::EmptyInput)?;
    RecordKind::from_tag(tag).ok_or(DecodeError::UnknownKind(tag))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::fixtures::{arb_record, sample_bundle, sample_deposit, sample_withdrawal};
    use crate::record::Withdrawal;
    use scr_types::WithdrawalStatus;

    #[test]
    fn concrete_withdrawal_scenario() {
        let w = Withdrawal::new(0, "addr1", 100_000, 500);
        let bytes = encode(&Record::from(w.clone()));
        assert_eq!(bytes[0], 1);

        let decoded = decode(&bytes).unwrap();
        let got = decoded.as_withdrawal().unwrap();
        assert_eq!(got.sidechain_index, 0);
        assert_eq!(got.destination, "addr1");
        assert_eq!(got.amount, 100_000);
        assert_eq!(got.mainchain_fee, 500);
        assert_eq!(got.status, WithdrawalStatus::Unspent);
        assert_eq!(got, &w);
    }

    #[test]
    fn concrete_withdrawal_golden_bytes() {
        let bytes = encode(&Record::from(Withdrawal::new(0, "addr1", 100_000, 500)));
        let expected = format!(
            "0100056164647231a086010000000000f40100000000000000{}",
            "00".repeat(32)
        );
        assert_eq!(hex::encode(&bytes), expected);
    }

    #[test]
    fn oversized_destination_roundtrips() {
        let record = Record::from(Withdrawal::new(0, "a".repeat(0x0200_0001), 1, 1));
        assert_eq!(decode(&encode(&record)), Ok(record));
    }

    #[test]
    fn each_variant_roundtrips() {
        for record in [
            Record::from(sample_withdrawal()),
            Record::from(sample_bundle()),
            Record::from(sample_deposit()),
        ] {
            let bytes = encode(&record);
            assert_eq!(bytes[0], record.kind().tag());
            assert_eq!(decode(&bytes).unwrap(), record);
        }
    }

    #[test]
    fn empty_input() {
        assert_eq!(decode(&[]), Err(DecodeError::EmptyInput));
        assert_eq!(peek_kind(&[]), Err(DecodeError::EmptyInput));
    }

    #[test]
    fn unknown_kind() {
        for tag in [0u8, 4, 0x77, 0xFF] {
            assert_eq!(decode(&[tag, 0, 0, 0]), Err(DecodeError::UnknownKind(tag)));
        }
    }

    #[test]
    fn tag_only_is_truncated() {
        assert!(matches!(
            decode(&[1]),
            Err(DecodeError::Truncated {
                field: "sidechain_index",
                ..
            })
        ));
    }

    #[test]
    fn every_withdrawal_prefix_fails_cleanly() {
        let bytes = encode(&Record::from(sample_withdrawal()));
        for cut in 1..bytes.len() {
            let err = decode(&bytes[..cut]).unwrap_err();
            assert!(
                matches!(
                    err,
                    DecodeError::Truncated { .. } | DecodeError::Malformed { .. }
                ),
                "cut at {cut}: {err:?}"
            );
        }
    }

    #[test]
    fn truncated_fixed_field() {
        let bytes = encode(&Record::from(sample_withdrawal()));
        // Cut inside the trailing 32-byte blind hash.
        let err = decode(&bytes[..bytes.len() - 5]).unwrap_err();
        assert_eq!(
            err,
            DecodeError::Truncated {
                field: "blind_hash",
                needed: 32,
                remaining: 27
            }
        );
    }

    #[test]
    fn oversized_embedded_tx_is_malformed() {
        let mut bytes = encode(&Record::from(sample_bundle()));
        // Byte 2 is the CompactSize length of bundle_tx.
        bytes[2] = 0xFC;
        assert!(matches!(
            decode(&bytes),
            Err(DecodeError::Malformed {
                field: "bundle_tx",
                ..
            })
        ));
    }

    #[test]
    fn trailing_bytes_rejected() {
        let mut bytes = encode(&Record::from(sample_deposit()));
        bytes.push(0);
        assert!(matches!(decode(&bytes), Err(DecodeError::Malformed { .. })));
    }

    #[test]
    fn peek_kind_matches_decode() {
        let bytes = encode(&Record::from(sample_bundle()));
        assert_eq!(peek_kind(&bytes), Ok(RecordKind::WithdrawalBundle));
        assert_eq!(peek_kind(&[9]), Err(DecodeError::UnknownKind(9)));
    }

    proptest! {
        #[test]
        fn roundtrip_law(record in arb_record()) {
            let bytes = encode(&record);
            let decoded = decode(&bytes).unwrap();
            prop_assert_eq!(&decoded, &record);
            prop_assert_eq!(encode(&decoded), bytes);
        }

        #[test]
        fn foreign_tags_never_decode(tag in 4u8.., tail in proptest::collection::vec(any::<u8>(), 0..64)) {
            let mut data = vec![tag];
            data.extend(tail);
            prop_assert_eq!(decode(&data), Err(DecodeError::UnknownKind(tag)));
        }

        #[test]
        fn arbitrary_bytes_never_panic(data in proptest::collection::vec(any::<u8>(), 0..200)) {
            if let Ok(record) = decode(&data) {
                prop_assert_eq!(encode(&record), data);
            }
        }
    }
}
