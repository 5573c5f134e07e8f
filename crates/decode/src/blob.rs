//! EIP-4844 blob field-element decoding.
//!
//! Each blob is 1024 chunks of four 32-byte field elements. A field element
//! carries 31 raw tail bytes plus 6 usable bits in its head byte; the four
//! head bytes of a chunk are reassembled into 3 payload bytes, so one chunk
//! yields 127 bytes of payload.

use crate::params::{
    BLOB_DATA_SIZE, BLOB_ENCODING_VERSION, BYTES_PER_BLOB, BYTES_PER_CHUNK,
    BYTES_PER_FIELD_ELEMENT, CHUNK_DATA_SIZE,
};
use alloc::vec::Vec;
use alloy_primitives::Bytes;
use thiserror::Error;

/// A blob decoding error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlobDecodingError {
    /// The input length is not a positive multiple of the blob size.
    #[error("input length {len} is not a positive multiple of {BYTES_PER_BLOB}")]
    MalformedInput {
        /// The length of the offending input.
        len: usize,
    },
    /// The blob encoding version tag is not supported.
    #[error("invalid blob encoding version: {0}")]
    InvalidBlobVersion(u8),
    /// A field element has one of its two reserved top bits set.
    #[error("invalid field element in blob {blob}, chunk {chunk}")]
    InvalidFieldElement {
        /// The index of the blob within the input.
        blob: usize,
        /// The index of the chunk within the blob.
        chunk: usize,
    },
    /// The declared payload length exceeds the decoded blob data.
    #[error("declared length {declared} exceeds the {available} available payload bytes")]
    TruncatedBlob {
        /// The declared payload length.
        declared: usize,
        /// The number of payload bytes actually available.
        available: usize,
    },
}

/// Decodes a sequence of concatenated EIP-4844 blobs into one payload per
/// blob, in input order.
///
/// The input length must be a positive multiple of [BYTES_PER_BLOB].
pub fn decode_blobs(data: &[u8]) -> Result<Vec<Bytes>, BlobDecodingError> {
    if data.is_empty() || data.len() % BYTES_PER_BLOB != 0 {
        return Err(BlobDecodingError::MalformedInput { len: data.len() });
    }

    data.chunks_exact(BYTES_PER_BLOB)
        .enumerate()
        .map(|(index, blob)| decode_blob(index, blob))
        .collect()
}

/// Decodes a single blob into its payload bytes.
///
/// Byte 1 of the blob is the encoding version and bytes `[2..5]` hold the
/// big-endian declared payload length. Both live inside the first field
/// element's tail, so they reappear as the leading bytes of the decoded
/// stream and are sliced off together with the length field.
fn decode_blob(blob_index: usize, blob: &[u8]) -> Result<Bytes, BlobDecodingError> {
    if blob[1] != BLOB_ENCODING_VERSION {
        return Err(BlobDecodingError::InvalidBlobVersion(blob[1]));
    }

    // Decode the 3 byte big-endian length value into a 4 byte integer.
    let declared = u32::from_be_bytes([0, blob[2], blob[3], blob[4]]) as usize;

    let mut decoded = Vec::with_capacity(BLOB_DATA_SIZE);
    for (chunk_index, chunk) in blob.chunks_exact(BYTES_PER_CHUNK).enumerate() {
        decode_chunk(chunk, &mut decoded).map_err(|_| BlobDecodingError::InvalidFieldElement {
            blob: blob_index,
            chunk: chunk_index,
        })?;
    }
    debug_assert_eq!(decoded.len(), BLOB_DATA_SIZE);

    // The first 4 decoded bytes are the version tag and the length field
    // itself; the declared length counts payload bytes after them.
    let end = 4 + declared;
    if end > decoded.len() {
        return Err(BlobDecodingError::TruncatedBlob {
            declared,
            available: decoded.len() - 4,
        });
    }

    Ok(Bytes::from(decoded).slice(4..end))
}

/// Decodes one 128-byte chunk of four field elements into 127 payload bytes,
/// appended to `out`.
///
/// The two high-order bits of each field element's head byte must be zero;
/// the remaining 6-bit groups of the four head bytes are redistributed into
/// the three reconstructed bytes `x`, `y` and `z`.
fn decode_chunk(chunk: &[u8], out: &mut Vec<u8>) -> Result<(), ()> {
    let start = out.len();
    let a = chunk[0];
    let b = chunk[BYTES_PER_FIELD_ELEMENT];
    let c = chunk[2 * BYTES_PER_FIELD_ELEMENT];
    let d = chunk[3 * BYTES_PER_FIELD_ELEMENT];

    if (a | b | c | d) & 0b1100_0000 != 0 {
        return Err(());
    }

    let x = (a & 0b0011_1111) | ((b & 0b0011_0000) << 2);
    let y = (b & 0b0000_1111) | ((d & 0b0000_1111) << 4);
    let z = (c & 0b0011_1111) | ((d & 0b0011_0000) << 2);

    out.extend_from_slice(&chunk[1..32]);
    out.push(x);
    out.extend_from_slice(&chunk[33..64]);
    out.push(y);
    out.extend_from_slice(&chunk[65..96]);
    out.push(z);
    out.extend_from_slice(&chunk[97..128]);
    debug_assert_eq!(out.len() - start, CHUNK_DATA_SIZE);
    Ok(())
}

/// Packs a payload stream into a single blob. The inverse of [decode_blob],
/// used to build test vectors; the version tag and length field are the
/// caller's responsibility and simply occupy the first 4 stream bytes.
#[cfg(test)]
pub(crate) fn encode_blob(stream: &[u8]) -> Vec<u8> {
    assert!(stream.len() <= BLOB_DATA_SIZE, "stream does not fit in one blob");

    let mut padded = vec![0u8; BLOB_DATA_SIZE];
    padded[..stream.len()].copy_from_slice(stream);

    let mut blob = vec![0u8; BYTES_PER_BLOB];
    for (group, chunk) in padded.chunks_exact(CHUNK_DATA_SIZE).zip(blob.chunks_exact_mut(BYTES_PER_CHUNK)) {
        let x = group[31];
        let y = group[63];
        let z = group[95];

        chunk[0] = x & 0b0011_1111;
        chunk[32] = ((x >> 2) & 0b0011_0000) | (y & 0b0000_1111);
        chunk[64] = z & 0b0011_1111;
        chunk[96] = ((z >> 2) & 0b0011_0000) | ((y >> 4) & 0b0000_1111);

        chunk[1..32].copy_from_slice(&group[..31]);
        chunk[33..64].copy_from_slice(&group[32..63]);
        chunk[65..96].copy_from_slice(&group[64..95]);
        chunk[97..128].copy_from_slice(&group[96..127]);
    }
    blob
}

/// Builds a valid blob carrying the given payload bytes.
#[cfg(test)]
pub(crate) fn blob_with_payload(payload: &[u8]) -> Vec<u8> {
    let mut stream = Vec::with_capacity(4 + payload.len());
    stream.push(BLOB_ENCODING_VERSION);
    stream.extend_from_slice(&(payload.len() as u32).to_be_bytes()[1..]);
    stream.extend_from_slice(payload);
    encode_blob(&stream)
}
