//! The raw, on-wire span batch record.

use crate::{
    batch::{SpanBatchError, SpanBatchField, SpanBatchPayload, SpanBatchPrefix},
    params::SPAN_BATCH_TYPE,
};

/// A span batch as read off the wire: type-checked prefix and payload.
///
/// Decoding stops after the contract-creation bitlist; the reader slice is
/// left pointing at the first unparsed byte so callers can continue with the
/// later span batch fields this crate does not cover.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawSpanBatch {
    /// The span batch prefix.
    pub prefix: SpanBatchPrefix,
    /// The span batch payload.
    pub payload: SpanBatchPayload,
}

impl RawSpanBatch {
    /// Decodes a [RawSpanBatch] from a reader, advancing it past the parsed
    /// fields.
    pub fn decode(r: &mut &[u8]) -> Result<Self, SpanBatchError> {
        let Some(&batch_type) = r.first() else {
            return Err(SpanBatchError::BufferUnderrun {
                field: SpanBatchField::BatchType,
                needed: 1,
                remaining: 0,
            });
        };
        if batch_type != SPAN_BATCH_TYPE {
            return Err(SpanBatchError::UnsupportedBatchType(batch_type));
        }
        *r = &r[1..];

        let prefix = SpanBatchPrefix::decode(r)?;
        let payload = SpanBatchPayload::decode(r)?;
        Ok(Self { prefix, payload })
    }
}
