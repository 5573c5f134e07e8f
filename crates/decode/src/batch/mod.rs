//! Contains the span batch types and the batch envelope decoder.
//!
//! ## Batch format
//!
//! ```text
//! rlp_encode(batch)
//! batch = [SPAN_BATCH_TYPE] ++ prefix ++ payload ++ unparsed
//! prefix = rel_timestamp ++ l1_origin_num ++ parent_check ++ l1_origin_check
//! payload = block_count ++ origin_bits ++ block_tx_counts ++ contract_creation_bits
//! ```
//!
//! Varints are unsigned LEB128: 7 value bits per byte, least-significant
//! group first, high bit as continuation flag. `unparsed` holds the later
//! span batch fields (transaction payloads, signatures) that are out of
//! scope here and returned to the caller untouched.

mod errors;
pub use errors::{BatchEnvelopeError, SpanBatchError, SpanBatchField};

mod bits;
pub use bits::SpanBatchBits;

mod prefix;
pub use prefix::SpanBatchPrefix;

mod payload;
pub use payload::SpanBatchPayload;

mod raw;
pub use raw::RawSpanBatch;

use alloy_primitives::Bytes;
use alloy_rlp::Decodable;

/// Decodes the RLP envelope around a batch: a single top-level byte string
/// with nothing trailing it.
pub fn decode_batch_envelope(decompressed: &[u8]) -> Result<Bytes, BatchEnvelopeError> {
    let mut buf = decompressed;
    let bytes = Bytes::decode(&mut buf).map_err(BatchEnvelopeError::InvalidEncoding)?;
    if !buf.is_empty() {
        return Err(BatchEnvelopeError::TrailingBytes { count: buf.len() });
    }
    Ok(bytes)
}

/// Reads an unsigned LEB128 varint from a reader, advancing it past the
/// consumed bytes.
pub(crate) fn read_varint(r: &mut &[u8], field: SpanBatchField) -> Result<u64, SpanBatchError> {
    match unsigned_varint::decode::u64(r) {
        Ok((value, rest)) => {
            *r = rest;
            Ok(value)
        }
        Err(unsigned_varint::decode::Error::Insufficient) => {
            Err(SpanBatchError::TruncatedVarint(field))
        }
        Err(_) => Err(SpanBatchError::InvalidVarint(field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::{prelude::any, proptest};

    #[test]
    fn test_decode_batch_envelope() {
        let inner = Bytes::from_static(&[0x01, 0x02, 0x03]);
        let encoded = alloy_rlp::encode(&inner);
        assert_eq!(decode_batch_envelope(&encoded).unwrap(), inner);
    }

    #[test]
    fn test_decode_batch_envelope_trailing_bytes() {
        let mut encoded = alloy_rlp::encode(&Bytes::from_static(&[0x01]));
        encoded.push(0xFF);
        assert_eq!(
            decode_batch_envelope(&encoded),
            Err(BatchEnvelopeError::TrailingBytes { count: 1 })
        );
    }

    #[test]
    fn test_decode_batch_envelope_list_rejected() {
        // An RLP list header is not a byte string.
        let encoded = [0xC1, 0x01];
        assert!(matches!(
            decode_batch_envelope(&encoded),
            Err(BatchEnvelopeError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn test_decode_batch_envelope_truncated() {
        // String header declares 5 payload bytes, only 2 present.
        let encoded = [0x85, 0x01, 0x02];
        assert!(matches!(
            decode_batch_envelope(&encoded),
            Err(BatchEnvelopeError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn test_read_varint_rejects_superfluous_zero_byte() {
        // 0x80 0x00 encodes 0 with a redundant continuation group.
        let mut r: &[u8] = &[0x80, 0x00];
        assert_eq!(
            read_varint(&mut r, SpanBatchField::BlockCount),
            Err(SpanBatchError::InvalidVarint(SpanBatchField::BlockCount))
        );
    }

    #[test]
    fn test_read_varint_multi_byte() {
        // 300 = 0b1_0010_1100 -> 0xAC 0x02.
        let mut r: &[u8] = &[0xAC, 0x02, 0x99];
        assert_eq!(read_varint(&mut r, SpanBatchField::BlockCount), Ok(300));
        assert_eq!(r, &[0x99]);
    }

    proptest! {
        #[test]
        fn test_varint_roundtrip(value in any::<u64>()) {
            let mut buf = [0u8; 10];
            let encoded = unsigned_varint::encode::u64(value, &mut buf);
            // Minimal encoding: the final byte is never a bare continuation
            // leftover.
            assert_ne!(*encoded.last().unwrap() & 0x80, 0x80);
            if encoded.len() > 1 {
                assert_ne!(*encoded.last().unwrap(), 0x00);
            }

            let mut r = encoded;
            assert_eq!(read_varint(&mut r, SpanBatchField::RelTimestamp), Ok(value));
            assert!(r.is_empty());
        }
    }
}
