//! The decode pipeline: blob bytes in, span batch record out.

use crate::{
    batch::{decode_batch_envelope, RawSpanBatch},
    blob::decode_blobs,
    channel::{ChannelAssembler, ChannelIdPolicy},
    compression::decompress_channel,
    errors::DecodeError,
    frame::Frame,
    params::{ChannelId, MAX_DECOMPRESSED_BYTES},
};
use alloy_primitives::Bytes;
use tracing::debug;

/// Configuration for a [BatchDecoder].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Hard ceiling on the decompressed channel size in bytes.
    pub max_decompressed_bytes: usize,
    /// The channel id the batcher transaction is expected to carry. When
    /// unset, the first channel seen is decoded.
    pub expected_channel_id: Option<ChannelId>,
    /// Handling of frames for channels other than the expected one.
    pub channel_id_policy: ChannelIdPolicy,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_decompressed_bytes: MAX_DECOMPRESSED_BYTES,
            expected_channel_id: None,
            channel_id_policy: ChannelIdPolicy::default(),
        }
    }
}

/// The output of a successful decode: the parsed record plus the buffers a
/// caller needs for diagnostics and forward-compatible parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecodedBatch {
    /// The parsed span batch record.
    pub batch: RawSpanBatch,
    /// The id of the channel the batch was read from.
    pub channel_id: ChannelId,
    /// The decompressed channel payload, before the RLP envelope is removed.
    pub decompressed: Bytes,
    /// The tail of the batch buffer past the fields this crate parses.
    pub unparsed: Bytes,
}

/// Decodes span batches out of raw batcher blob bytes.
///
/// The decoder is stateless: every [BatchDecoder::decode] call is independent
/// and the decoder may be shared freely across threads.
#[derive(Debug, Clone, Default)]
pub struct BatchDecoder {
    cfg: DecoderConfig,
}

impl BatchDecoder {
    /// Creates a new decoder with the given configuration.
    pub const fn new(cfg: DecoderConfig) -> Self {
        Self { cfg }
    }

    /// Runs the full decode pipeline over one or more concatenated blobs.
    ///
    /// The stages run strictly in sequence; the first failure aborts the
    /// decode and is returned as a [DecodeError] naming the stage.
    pub fn decode(&self, data: &[u8]) -> Result<DecodedBatch, DecodeError> {
        let payloads = decode_blobs(data)?;
        debug!(target: "batch-decoder", blobs = payloads.len(), "decoded blob payloads");

        let mut assembler =
            ChannelAssembler::new(self.cfg.expected_channel_id, self.cfg.channel_id_policy);
        for payload in &payloads {
            for frame in Frame::parse_frames(payload)? {
                assembler.ingest_frame(frame)?;
            }
        }
        debug!(target: "batch-decoder", channels = assembler.channel_ids().len(), "reassembled channels");

        let (channel_id, channel) = assembler.into_expected_channel()?;
        let decompressed = decompress_channel(&channel, self.cfg.max_decompressed_bytes)?;
        debug!(
            target: "batch-decoder",
            channel = ?channel_id,
            compressed = channel.len(),
            decompressed = decompressed.len(),
            "decompressed channel"
        );

        let batch_data = decode_batch_envelope(&decompressed)?;

        let mut reader = batch_data.as_ref();
        let batch = RawSpanBatch::decode(&mut reader)?;
        let consumed = batch_data
            .len()
            .checked_sub(reader.len())
            .ok_or(DecodeError::Internal("span batch reader grew while decoding"))?;
        debug!(
            target: "batch-decoder",
            blocks = batch.payload.block_count,
            txs = batch.payload.total_tx_count(),
            unparsed = batch_data.len() - consumed,
            "decoded span batch"
        );

        Ok(DecodedBatch {
            batch,
            channel_id,
            decompressed: Bytes::from(decompressed),
            unparsed: batch_data.slice(consumed..),
        })
    }
}
