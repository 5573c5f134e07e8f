//! Span batch payload.

use crate::batch::{read_varint, SpanBatchBits, SpanBatchError, SpanBatchField};
use alloc::vec::Vec;

/// The span batch payload: per-block and per-transaction metadata.
///
/// Fields past the contract-creation bitlist (transaction signatures and
/// payloads) are not parsed by this crate; the caller receives the rest of
/// the buffer untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpanBatchPayload {
    /// Number of L2 blocks in the span.
    pub block_count: u64,
    /// Bitlist of `block_count` bits. Each bit indicates if the L1 origin
    /// changed at the corresponding L2 block.
    pub origin_bits: SpanBatchBits,
    /// Transaction count for each L2 block.
    pub block_tx_counts: Vec<u64>,
    /// Bitlist with one bit per transaction across the span, set when the
    /// transaction is a contract creation.
    pub contract_creation_bits: SpanBatchBits,
}

impl SpanBatchPayload {
    /// Decodes a [SpanBatchPayload] from a reader.
    pub fn decode(r: &mut &[u8]) -> Result<Self, SpanBatchError> {
        let block_count = read_varint(r, SpanBatchField::BlockCount)?;
        let origin_bits = SpanBatchBits::decode(r, block_count as usize, SpanBatchField::OriginBits)?;

        // Pre-size to reduce re-allocations; every count takes at least one
        // byte, so the remaining buffer bounds the claimed block count.
        let mut block_tx_counts = Vec::with_capacity(core::cmp::min(block_count as usize, r.len()));
        for _ in 0..block_count {
            block_tx_counts.push(read_varint(r, SpanBatchField::BlockTxCounts)?);
        }

        let total_tx_count = block_tx_counts
            .iter()
            .try_fold(0u64, |acc, count| acc.checked_add(*count))
            .ok_or(SpanBatchError::TxCountOverflow)?;
        let contract_creation_bits = SpanBatchBits::decode(
            r,
            total_tx_count as usize,
            SpanBatchField::ContractCreationBits,
        )?;

        Ok(Self { block_count, origin_bits, block_tx_counts, contract_creation_bits })
    }

    /// The total number of transactions across all blocks of the span.
    pub fn total_tx_count(&self) -> u64 {
        self.block_tx_counts.iter().sum()
    }
}
