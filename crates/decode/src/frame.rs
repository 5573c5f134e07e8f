//! This module contains the [Frame] type and the frame stream parser.

use crate::params::{ChannelId, CHANNEL_ID_LENGTH, DERIVATION_VERSION_0, FRAME_HEADER_LEN, MIN_FRAME_LEN};
use alloc::vec::Vec;
use thiserror::Error;

/// An error parsing a frame stream.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameParseError {
    /// The blob payload is empty, so no derivation version byte exists.
    #[error("empty derivation payload")]
    EmptyPayload,
    /// The derivation format version is not supported.
    #[error("invalid derivation version: {0}")]
    InvalidDerivationVersion(u8),
    /// Fewer bytes remain than the minimum frame envelope.
    #[error("truncated frame: {remaining} bytes remaining, {MIN_FRAME_LEN} required")]
    TruncatedFrame {
        /// The number of bytes remaining in the stream.
        remaining: usize,
    },
    /// The frame data length points past the end of the stream.
    #[error("frame end {frame_end} exceeds the {remaining} remaining bytes")]
    FrameLengthOverflow {
        /// The computed end offset of the frame.
        frame_end: usize,
        /// The number of bytes remaining in the stream.
        remaining: usize,
    },
}

/// A channel frame is a segment of a channel's data.
///
/// *Encoding*
/// frame = `channel_id ++ frame_number ++ frame_data_length ++ frame_data ++ is_last`
/// * channel_id        = bytes16
/// * frame_number      = uint16
/// * frame_data_length = uint32
/// * frame_data        = bytes
/// * is_last           = bool
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    /// The channel the frame belongs to.
    pub id: ChannelId,
    /// The sequence number of the frame within its channel.
    pub number: u16,
    /// The data within the frame.
    pub data: Vec<u8>,
    /// Whether or not the frame is the last in the sequence.
    pub is_last: bool,
}

impl Frame {
    /// Encode the frame into a byte vector.
    pub fn encode(&self) -> Vec<u8> {
        let mut encoded = Vec::with_capacity(MIN_FRAME_LEN + self.data.len());
        encoded.extend_from_slice(&self.id);
        encoded.extend_from_slice(&self.number.to_be_bytes());
        encoded.extend_from_slice(&(self.data.len() as u32).to_be_bytes());
        encoded.extend_from_slice(&self.data);
        encoded.push(self.is_last as u8);
        encoded
    }

    /// Decode a single frame from the front of a byte stream, returning the
    /// number of bytes consumed alongside the frame.
    pub fn decode(encoded: &[u8]) -> Result<(usize, Self), FrameParseError> {
        if encoded.len() < MIN_FRAME_LEN {
            return Err(FrameParseError::TruncatedFrame { remaining: encoded.len() });
        }

        let mut id = [0u8; CHANNEL_ID_LENGTH];
        id.copy_from_slice(&encoded[..CHANNEL_ID_LENGTH]);
        let number = u16::from_be_bytes([encoded[16], encoded[17]]);
        let data_len =
            u32::from_be_bytes([encoded[18], encoded[19], encoded[20], encoded[21]]) as usize;

        let frame_end = FRAME_HEADER_LEN + data_len + 1;
        if frame_end > encoded.len() {
            return Err(FrameParseError::FrameLengthOverflow {
                frame_end,
                remaining: encoded.len(),
            });
        }

        let data = encoded[FRAME_HEADER_LEN..FRAME_HEADER_LEN + data_len].to_vec();
        let is_last = encoded[FRAME_HEADER_LEN + data_len] == 1;
        Ok((frame_end, Self { id, number, data, is_last }))
    }

    /// Parses the serialization of frame(s) carried by a single blob payload.
    /// Only version 0 of the serialization format is supported. All frames
    /// must be parsed without error and there must not be any left over data.
    ///
    /// Frames are stored with the following format:
    /// * `data = DerivationVersion0 ++ Frame(s)` where zero or more frames
    ///   are concatenated together.
    pub fn parse_frames(payload: &[u8]) -> Result<Vec<Self>, FrameParseError> {
        if payload.is_empty() {
            return Err(FrameParseError::EmptyPayload);
        }
        if payload[0] != DERIVATION_VERSION_0 {
            return Err(FrameParseError::InvalidDerivationVersion(payload[0]));
        }

        let data = &payload[1..];
        let mut frames = Vec::new();
        let mut offset = 0;
        while offset < data.len() {
            let (consumed, frame) = Self::decode(&data[offset..])?;
            frames.push(frame);
            offset += consumed;
        }

        Ok(frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_frame_roundtrip() {
        let frame = Frame { id: [0xFF; 16], number: 0xEE, data: vec![0xDD; 50], is_last: true };

        let (consumed, frame_decoded) = Frame::decode(&frame.encode()).unwrap();
        assert_eq!(consumed, MIN_FRAME_LEN + 50);
        assert_eq!(frame, frame_decoded);
    }

    #[test]
    fn test_decode_many() {
        let frame = Frame { id: [0xFF; 16], number: 0xEE, data: vec![0xDD; 50], is_last: true };
        let mut bytes = Vec::new();
        bytes.push(DERIVATION_VERSION_0);
        (0..5).for_each(|_| {
            bytes.extend_from_slice(&frame.encode());
        });

        let frames = Frame::parse_frames(bytes.as_slice()).unwrap();
        assert_eq!(frames.len(), 5);
        (0..5).for_each(|i| {
            assert_eq!(frames[i], frame);
        });
    }

    #[test]
    fn test_parse_frames_empty_payload() {
        assert_eq!(Frame::parse_frames(&[]), Err(FrameParseError::EmptyPayload));
    }

    #[test]
    fn test_parse_frames_invalid_version() {
        assert_eq!(
            Frame::parse_frames(&[0x02]),
            Err(FrameParseError::InvalidDerivationVersion(0x02))
        );
    }

    #[test]
    fn test_parse_frames_version_only() {
        assert_eq!(Frame::parse_frames(&[DERIVATION_VERSION_0]), Ok(vec![]));
    }

    #[test]
    fn test_decode_truncated_envelope() {
        let bytes = [0u8; MIN_FRAME_LEN - 1];
        assert_eq!(
            Frame::decode(&bytes),
            Err(FrameParseError::TruncatedFrame { remaining: MIN_FRAME_LEN - 1 })
        );
    }

    #[test]
    fn test_decode_data_length_overflow() {
        let frame = Frame { id: [0xAA; 16], number: 1, data: vec![0xBB; 8], is_last: false };
        let mut encoded = frame.encode();
        // Claim one more data byte than the buffer holds.
        encoded[18..22].copy_from_slice(&9u32.to_be_bytes());
        assert_eq!(
            Frame::decode(&encoded),
            Err(FrameParseError::FrameLengthOverflow {
                frame_end: FRAME_HEADER_LEN + 9 + 1,
                remaining: encoded.len(),
            })
        );
    }

    #[test]
    fn test_parse_frames_trailing_garbage_is_truncated_frame() {
        let frame = Frame { id: [0x01; 16], number: 0, data: vec![], is_last: true };
        let mut bytes = vec![DERIVATION_VERSION_0];
        bytes.extend_from_slice(&frame.encode());
        bytes.extend_from_slice(&[0x00; 3]);
        assert_eq!(
            Frame::parse_frames(&bytes),
            Err(FrameParseError::TruncatedFrame { remaining: 3 })
        );
    }
}
