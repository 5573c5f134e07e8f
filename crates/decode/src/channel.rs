//! Channel reassembly: accumulates frame data per channel id.
//!
//! Frames for a channel are concatenated in the order they were encountered
//! across all blobs. Channels are keyed by id so that frames from an
//! unexpected channel can never silently corrupt another channel's payload.

use crate::{frame::Frame, params::ChannelId};
use alloc::vec::Vec;
use alloy_primitives::Bytes;
use hashbrown::HashMap;
use thiserror::Error;
use tracing::debug;

/// An error reassembling channels from frames.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChannelError {
    /// A frame arrived for a channel other than the expected one while the
    /// [ChannelIdPolicy::Reject] policy is active.
    #[error("unexpected channel id {actual:x?}, expected {expected:x?}")]
    UnexpectedChannelId {
        /// The expected channel id.
        expected: ChannelId,
        /// The channel id carried by the offending frame.
        actual: ChannelId,
    },
    /// No frame was observed across all blob payloads.
    #[error("no channel data found in the provided blobs")]
    NoChannel,
}

/// Policy applied to frames whose channel id differs from the expected id.
///
/// The expected id is the configured one, or the first id seen when none is
/// configured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChannelIdPolicy {
    /// Accumulate foreign channels independently, in first-seen order.
    #[default]
    Track,
    /// Drop frames for foreign channels.
    Ignore,
    /// Fail the decode on the first foreign frame.
    Reject,
}

/// Accumulates the payloads of one or more channels from an ordered frame
/// stream.
#[derive(Debug, Clone, Default)]
pub struct ChannelAssembler {
    /// Accumulated frame data per channel.
    channels: HashMap<ChannelId, Vec<u8>>,
    /// Channel ids in first-seen order.
    order: Vec<ChannelId>,
    /// The channel id the caller expects, if any.
    expected: Option<ChannelId>,
    /// Handling of frames for channels other than the expected one.
    policy: ChannelIdPolicy,
}

impl ChannelAssembler {
    /// Creates a new assembler with the given expected channel id and policy.
    pub fn new(expected: Option<ChannelId>, policy: ChannelIdPolicy) -> Self {
        Self { channels: HashMap::new(), order: Vec::new(), expected, policy }
    }

    /// Ingests a single frame, appending its data to the payload of the
    /// channel it belongs to.
    pub fn ingest_frame(&mut self, frame: Frame) -> Result<(), ChannelError> {
        let expected = *self.expected.get_or_insert(frame.id);
        if frame.id != expected {
            match self.policy {
                ChannelIdPolicy::Track => {}
                ChannelIdPolicy::Ignore => {
                    debug!(
                        target: "channel-assembler",
                        id = ?frame.id,
                        number = frame.number,
                        "ignoring frame for foreign channel"
                    );
                    return Ok(());
                }
                ChannelIdPolicy::Reject => {
                    return Err(ChannelError::UnexpectedChannelId {
                        expected,
                        actual: frame.id,
                    });
                }
            }
        }

        let order = &mut self.order;
        let payload = self.channels.entry(frame.id).or_insert_with(|| {
            order.push(frame.id);
            Vec::new()
        });
        payload.extend_from_slice(&frame.data);
        Ok(())
    }

    /// Returns the ids of all tracked channels in first-seen order.
    pub fn channel_ids(&self) -> &[ChannelId] {
        &self.order
    }

    /// Consumes the assembler, returning the expected channel's payload. The
    /// expected channel is the configured one, or the first channel seen.
    pub fn into_expected_channel(mut self) -> Result<(ChannelId, Bytes), ChannelError> {
        let id = self
            .expected
            .filter(|id| self.channels.contains_key(id))
            .or_else(|| self.order.first().copied())
            .ok_or(ChannelError::NoChannel)?;
        let payload = self.channels.remove(&id).ok_or(ChannelError::NoChannel)?;
        Ok((id, Bytes::from(payload)))
    }
}
