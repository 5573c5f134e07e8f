//! Top-level error type for the decode pipeline.

use crate::{
    batch::{BatchEnvelopeError, SpanBatchError},
    blob::BlobDecodingError,
    channel::ChannelError,
    compression::DecompressionError,
    frame::FrameParseError,
};
use thiserror::Error;

/// Any failure of the decode pipeline. The first failing stage aborts the
/// whole decode; no partial record is ever produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Stage 1: blob field decoding failed.
    #[error("blob decoding failed: {0}")]
    Blob(#[from] BlobDecodingError),
    /// Stage 2: frame parsing failed.
    #[error("frame parsing failed: {0}")]
    Frame(#[from] FrameParseError),
    /// Stage 2: channel reassembly failed.
    #[error("channel reassembly failed: {0}")]
    Channel(#[from] ChannelError),
    /// Stage 3: channel decompression failed.
    #[error("channel decompression failed: {0}")]
    Decompression(#[from] DecompressionError),
    /// Stage 4: batch envelope decoding failed.
    #[error("batch envelope decoding failed: {0}")]
    Envelope(#[from] BatchEnvelopeError),
    /// Stage 5: span batch parsing failed.
    #[error("span batch decoding failed: {0}")]
    SpanBatch(#[from] SpanBatchError),
    /// An internal invariant was violated. Unreachable on any input.
    #[error("internal invariant violated: {0}")]
    Internal(&'static str),
}
