//! Span batch error types.

use alloy_rlp::Error as RlpError;
use core::fmt;
use thiserror::Error;

/// The span batch fields, named for error context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanBatchField {
    /// The batch type tag.
    BatchType,
    /// The relative timestamp varint.
    RelTimestamp,
    /// The L1 origin number varint.
    L1OriginNumber,
    /// The truncated parent block hash.
    ParentCheck,
    /// The truncated L1 origin block hash.
    L1OriginCheck,
    /// The block count varint.
    BlockCount,
    /// The per-block origin-changed bitlist.
    OriginBits,
    /// The per-block transaction count varints.
    BlockTxCounts,
    /// The per-transaction contract-creation bitlist.
    ContractCreationBits,
}

impl fmt::Display for SpanBatchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BatchType => "batch type",
            Self::RelTimestamp => "relative timestamp",
            Self::L1OriginNumber => "l1 origin number",
            Self::ParentCheck => "parent check",
            Self::L1OriginCheck => "l1 origin check",
            Self::BlockCount => "block count",
            Self::OriginBits => "origin bits",
            Self::BlockTxCounts => "block tx counts",
            Self::ContractCreationBits => "contract creation bits",
        };
        f.write_str(name)
    }
}

/// An error decoding the RLP envelope around a batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BatchEnvelopeError {
    /// The bytes do not parse as a single RLP byte string.
    #[error("invalid rlp encoding: {0}")]
    InvalidEncoding(RlpError),
    /// Unconsumed bytes remain after the top-level RLP item.
    #[error("{count} trailing bytes after the rlp batch payload")]
    TrailingBytes {
        /// The number of unconsumed bytes.
        count: usize,
    },
}

/// An error decoding a span batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpanBatchError {
    /// The leading batch type byte is not the span batch type.
    #[error("unsupported batch type: {0}")]
    UnsupportedBatchType(u8),
    /// The buffer ended in the middle of a varint.
    #[error("truncated varint while decoding {0}")]
    TruncatedVarint(SpanBatchField),
    /// A varint overflows a u64 or carries a superfluous zero group.
    #[error("invalid varint while decoding {0}")]
    InvalidVarint(SpanBatchField),
    /// A fixed-size read ran past the end of the buffer.
    #[error("buffer underrun reading {field}: {needed} bytes needed, {remaining} remaining")]
    BufferUnderrun {
        /// The field being read.
        field: SpanBatchField,
        /// The number of bytes the read required.
        needed: usize,
        /// The number of bytes remaining in the buffer.
        remaining: usize,
    },
    /// The per-block transaction counts overflow a u64 when summed.
    #[error("total transaction count overflows a u64")]
    TxCountOverflow,
}
