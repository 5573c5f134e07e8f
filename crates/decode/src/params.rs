//! This module contains the protocol parameters and identifying types for the
//! blob decoding pipeline.

/// The size of a single EIP-4844 blob in bytes.
pub const BYTES_PER_BLOB: usize = 131072;

/// The size of a single field element in bytes.
pub const BYTES_PER_FIELD_ELEMENT: usize = 32;

/// The size of a chunk of four field elements in bytes.
pub const BYTES_PER_CHUNK: usize = 4 * BYTES_PER_FIELD_ELEMENT;

/// The number of four-field-element chunks in a blob.
pub const CHUNKS_PER_BLOB: usize = BYTES_PER_BLOB / BYTES_PER_CHUNK;

/// The number of payload bytes recovered from a single chunk: 31 tail bytes
/// per field element plus the 3 bytes reassembled from the four head bytes.
pub const CHUNK_DATA_SIZE: usize = 4 * 31 + 3;

/// The number of payload bytes recovered from a full blob, before the
/// declared-length slice is applied.
pub const BLOB_DATA_SIZE: usize = CHUNKS_PER_BLOB * CHUNK_DATA_SIZE;

/// The blob encoding version tag carried at byte 1 of every blob.
pub const BLOB_ENCODING_VERSION: u8 = 0;

/// The version byte prefixing the frame stream of every blob payload.
pub const DERIVATION_VERSION_0: u8 = 0;

/// [CHANNEL_ID_LENGTH] is the length of the channel ID.
pub const CHANNEL_ID_LENGTH: usize = 16;

/// [ChannelId] is an opaque identifier for a channel.
pub type ChannelId = [u8; CHANNEL_ID_LENGTH];

/// The length of a frame header: channel id, frame number and frame data
/// length.
pub const FRAME_HEADER_LEN: usize = CHANNEL_ID_LENGTH + 2 + 4;

/// The minimum encoded size of a frame: header plus the trailing `is_last`
/// byte.
pub const MIN_FRAME_LEN: usize = FRAME_HEADER_LEN + 1;

/// The span batch type tag.
pub const SPAN_BATCH_TYPE: u8 = 0x01;

/// The length of the truncated parent / L1 origin hash checks in a span batch
/// prefix.
pub const CHECKPOINT_HASH_LEN: usize = 20;

/// [MAX_DECOMPRESSED_BYTES] is the default hard ceiling on the decompressed
/// size of a channel. A batch cannot be larger than its channel, so this also
/// bounds every span batch field read. Guards against decompression bombs.
pub const MAX_DECOMPRESSED_BYTES: usize = 10_000_000;
