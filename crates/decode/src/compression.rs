//! Channel payload decompression.
//!
//! Channel payloads are deflate streams, usually wrapped in a zlib envelope.
//! The compression method is detected from the first payload byte: a low
//! nibble of 8 (deflate) or 15 (reserved) marks a zlib header, anything else
//! is treated as a bare deflate stream. Output is capped by a hard ceiling to
//! guard against decompression bombs.

use alloc::vec::Vec;
use miniz_oxide::inflate::{
    decompress_to_vec_with_limit, decompress_to_vec_zlib_with_limit, TINFLStatus,
};
use thiserror::Error;

/// ZLIB deflate compression method nibble.
const ZLIB_DEFLATE_COMPRESSION_METHOD: u8 = 8;

/// ZLIB reserved compression method nibble.
const ZLIB_RESERVED_COMPRESSION_METHOD: u8 = 15;

/// An error decompressing a channel payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecompressionError {
    /// The channel payload is empty.
    #[error("empty channel payload")]
    EmptyChannel,
    /// The deflate stream is malformed.
    #[error("invalid deflate stream")]
    InvalidStream,
    /// The decompressed output exceeds the configured ceiling.
    #[error("decompressed size exceeds the {limit} byte limit")]
    LimitExceeded {
        /// The configured output ceiling in bytes.
        limit: usize,
    },
}

/// Decompresses a channel payload, producing at most `limit` bytes.
pub fn decompress_channel(data: &[u8], limit: usize) -> Result<Vec<u8>, DecompressionError> {
    let Some(&first) = data.first() else {
        return Err(DecompressionError::EmptyChannel);
    };

    let method = first & 0x0F;
    let result = if method == ZLIB_DEFLATE_COMPRESSION_METHOD
        || method == ZLIB_RESERVED_COMPRESSION_METHOD
    {
        decompress_to_vec_zlib_with_limit(data, limit)
    } else {
        decompress_to_vec_with_limit(data, limit)
    };

    result.map_err(|e| match e.status {
        TINFLStatus::HasMoreOutput => DecompressionError::LimitExceeded { limit },
        _ => DecompressionError::InvalidStream,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use miniz_oxide::deflate::{compress_to_vec, compress_to_vec_zlib};

    #[test]
    fn test_decompress_zlib_roundtrip() {
        let payload = b"span batch payload bytes".repeat(16);
        let compressed = compress_to_vec_zlib(&payload, 9);
        assert_eq!(compressed[0] & 0x0F, ZLIB_DEFLATE_COMPRESSION_METHOD);
        let decompressed = decompress_channel(&compressed, 10_000).unwrap();
        assert_eq!(decompressed, payload);
    }

    #[test]
    fn test_decompress_raw_deflate_roundtrip() {
        // Raw deflate output has no zlib header byte. The first byte of a
        // fixed-huffman deflate block has its low nibble != 8 and != 15 for
        // this payload, exercising the bare-deflate path.
        let payload = b"raw deflate data".to_vec();
        let compressed = compress_to_vec(&payload, 9);
        let decompressed = decompress_channel(&compressed, 10_000).unwrap();
        assert_eq!(decompressed, payload);
    }

    #[test]
    fn test_decompress_empty_payload() {
        assert_eq!(decompress_channel(&[], 10_000), Err(DecompressionError::EmptyChannel));
    }

    #[test]
    fn test_decompress_malformed_stream() {
        let garbage = [0x78, 0x9C, 0xFF, 0xFF, 0xFF, 0xFF];
        assert_eq!(
            decompress_channel(&garbage, 10_000),
            Err(DecompressionError::InvalidStream)
        );
    }

    #[test]
    fn test_decompress_limit_exceeded() {
        let payload = vec![0u8; 4096];
        let compressed = compress_to_vec_zlib(&payload, 9);
        assert_eq!(
            decompress_channel(&compressed, 1024),
            Err(DecompressionError::LimitExceeded { limit: 1024 })
        );
    }
}
