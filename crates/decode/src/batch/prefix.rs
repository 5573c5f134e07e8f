//! Span batch prefix.

use crate::{
    batch::{read_varint, SpanBatchError, SpanBatchField},
    params::CHECKPOINT_HASH_LEN,
};
use alloy_primitives::FixedBytes;

/// The span batch prefix: timing and origin references for the span.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpanBatchPrefix {
    /// The span's starting timestamp, in seconds since the L2 genesis.
    pub rel_timestamp: u64,
    /// The L1 block number of the last block's origin.
    pub l1_origin_num: u64,
    /// The first 20 bytes of the first block's parent hash.
    pub parent_check: FixedBytes<CHECKPOINT_HASH_LEN>,
    /// The first 20 bytes of the last block's L1 origin hash.
    pub l1_origin_check: FixedBytes<CHECKPOINT_HASH_LEN>,
}

impl SpanBatchPrefix {
    /// Decodes a [SpanBatchPrefix] from a reader.
    pub fn decode(r: &mut &[u8]) -> Result<Self, SpanBatchError> {
        let rel_timestamp = read_varint(r, SpanBatchField::RelTimestamp)?;
        let l1_origin_num = read_varint(r, SpanBatchField::L1OriginNumber)?;
        let parent_check = Self::read_check(r, SpanBatchField::ParentCheck)?;
        let l1_origin_check = Self::read_check(r, SpanBatchField::L1OriginCheck)?;
        Ok(Self { rel_timestamp, l1_origin_num, parent_check, l1_origin_check })
    }

    /// Reads a truncated 20-byte hash check from a reader.
    fn read_check(
        r: &mut &[u8],
        field: SpanBatchField,
    ) -> Result<FixedBytes<CHECKPOINT_HASH_LEN>, SpanBatchError> {
        if r.len() < CHECKPOINT_HASH_LEN {
            return Err(SpanBatchError::BufferUnderrun {
                field,
                needed: CHECKPOINT_HASH_LEN,
                remaining: r.len(),
            });
        }
        let check = FixedBytes::from_slice(&r[..CHECKPOINT_HASH_LEN]);
        *r = &r[CHECKPOINT_HASH_LEN..];
        Ok(check)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::fixed_bytes;

    #[test]
    fn test_decode_prefix() {
        let mut buf = Vec::new();
        let mut varint_buf = [0u8; 10];
        buf.extend_from_slice(unsigned_varint::encode::u64(1_000_000, &mut varint_buf));
        buf.extend_from_slice(unsigned_varint::encode::u64(19_538_908, &mut varint_buf));
        buf.extend_from_slice(&[0x11; 20]);
        buf.extend_from_slice(&[0x22; 20]);

        let mut r = buf.as_slice();
        let prefix = SpanBatchPrefix::decode(&mut r).unwrap();
        assert!(r.is_empty());
        assert_eq!(
            prefix,
            SpanBatchPrefix {
                rel_timestamp: 1_000_000,
                l1_origin_num: 19_538_908,
                parent_check: fixed_bytes!("1111111111111111111111111111111111111111"),
                l1_origin_check: fixed_bytes!("2222222222222222222222222222222222222222"),
            }
        );
    }

    #[test]
    fn test_decode_prefix_truncated_varint() {
        // High continuation bit with no following byte.
        let mut r: &[u8] = &[0x80];
        assert_eq!(
            SpanBatchPrefix::decode(&mut r),
            Err(SpanBatchError::TruncatedVarint(SpanBatchField::RelTimestamp))
        );
    }

    #[test]
    fn test_decode_prefix_short_parent_check() {
        let mut buf = vec![0x00, 0x00];
        buf.extend_from_slice(&[0x11; 10]);
        let mut r = buf.as_slice();
        assert_eq!(
            SpanBatchPrefix::decode(&mut r),
            Err(SpanBatchError::BufferUnderrun {
                field: SpanBatchField::ParentCheck,
                needed: 20,
                remaining: 10,
            })
        );
    }
}
