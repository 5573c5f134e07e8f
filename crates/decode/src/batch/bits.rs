//! Module for working with span batch bitlists.

use crate::batch::{SpanBatchError, SpanBatchField};
use alloc::vec::Vec;

/// A packed boolean sequence read from a span batch.
///
/// Bit `i` of the logical list is bit `7 - i % 8` of byte `i / 8`, i.e. bits
/// are packed most-significant-first within each byte. The wire encoding
/// always occupies exactly `ceil(bit_len / 8)` bytes; trailing pad bits in
/// the final byte carry no meaning.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpanBatchBits {
    bytes: Vec<u8>,
    bit_len: usize,
}

impl SpanBatchBits {
    /// Decodes a bitlist of `bit_len` bits from a reader, consuming exactly
    /// `ceil(bit_len / 8)` bytes.
    pub fn decode(
        r: &mut &[u8],
        bit_len: usize,
        field: SpanBatchField,
    ) -> Result<Self, SpanBatchError> {
        // Round up without overflowing near usize::MAX.
        let byte_len = bit_len / 8 + usize::from(bit_len % 8 != 0);
        if r.len() < byte_len {
            return Err(SpanBatchError::BufferUnderrun {
                field,
                needed: byte_len,
                remaining: r.len(),
            });
        }

        let bytes = r[..byte_len].to_vec();
        *r = &r[byte_len..];
        Ok(Self { bytes, bit_len })
    }

    /// Builds a bitlist from a slice of booleans.
    pub fn from_bits(bits: &[bool]) -> Self {
        let mut bytes = alloc::vec![0u8; bits.len() / 8 + usize::from(bits.len() % 8 != 0)];
        for (i, &bit) in bits.iter().enumerate() {
            if bit {
                bytes[i / 8] |= 1 << (7 - i % 8);
            }
        }
        Self { bytes, bit_len: bits.len() }
    }

    /// Appends the wire encoding of the bitlist to a writer.
    pub fn encode(&self, w: &mut Vec<u8>) {
        w.extend_from_slice(&self.bytes);
    }

    /// Returns bit `index` of the bitlist, or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.bit_len {
            return None;
        }
        Some(self.bytes[index / 8] & (1 << (7 - index % 8)) != 0)
    }

    /// The number of logical bits in the list.
    pub const fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// The raw packed bytes backing the list.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Iterates over the logical bits of the list.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.bit_len).map(|i| self.get(i).unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::{collection::vec as prop_vec, prelude::any, proptest};

    #[test]
    fn test_bits_are_msb_first() {
        let mut r: &[u8] = &[0b1010_0000, 0b0100_0000];
        let bits = SpanBatchBits::decode(&mut r, 10, SpanBatchField::OriginBits).unwrap();
        assert!(r.is_empty());
        assert_eq!(
            bits.iter().collect::<Vec<_>>(),
            vec![true, false, true, false, false, false, false, false, false, true]
        );
    }

    #[test]
    fn test_decode_zero_bits_consumes_nothing() {
        let mut r: &[u8] = &[0xFF];
        let bits = SpanBatchBits::decode(&mut r, 0, SpanBatchField::OriginBits).unwrap();
        assert_eq!(r.len(), 1);
        assert_eq!(bits.bit_len(), 0);
        assert_eq!(bits.get(0), None);
    }

    #[test]
    fn test_decode_underrun() {
        let mut r: &[u8] = &[0xFF];
        assert_eq!(
            SpanBatchBits::decode(&mut r, 9, SpanBatchField::ContractCreationBits),
            Err(SpanBatchError::BufferUnderrun {
                field: SpanBatchField::ContractCreationBits,
                needed: 2,
                remaining: 1,
            })
        );
    }

    #[test]
    fn test_cursor_advances_by_whole_bytes() {
        let mut r: &[u8] = &[0b1100_0000, 0xEE];
        let bits = SpanBatchBits::decode(&mut r, 2, SpanBatchField::OriginBits).unwrap();
        // 2 bits still consume a full byte.
        assert_eq!(r, &[0xEE]);
        assert_eq!(bits.iter().collect::<Vec<_>>(), vec![true, true]);
    }

    proptest! {
        #[test]
        fn test_bitlist_roundtrip(bools in prop_vec(any::<bool>(), 0..256usize)) {
            let bits = SpanBatchBits::from_bits(&bools);
            let mut encoded = Vec::new();
            bits.encode(&mut encoded);
            assert_eq!(encoded.len(), bools.len() / 8 + usize::from(bools.len() % 8 != 0));

            let mut r = encoded.as_slice();
            let decoded =
                SpanBatchBits::decode(&mut r, bools.len(), SpanBatchField::OriginBits).unwrap();
            assert!(r.is_empty());
            assert_eq!(decoded.iter().collect::<Vec<_>>(), bools);
        }
    }
}
