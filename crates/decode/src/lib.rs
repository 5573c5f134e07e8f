#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), no_std)]

extern crate alloc;

/// Re-export commonly used types and traits.
pub mod prelude {
    pub use crate::{
        batch::{RawSpanBatch, SpanBatchBits, SpanBatchPayload, SpanBatchPrefix},
        channel::ChannelIdPolicy,
        errors::DecodeError,
        params::ChannelId,
        pipeline::{BatchDecoder, DecodedBatch, DecoderConfig},
    };
}

pub mod batch;
pub mod blob;
pub mod channel;
pub mod compression;
pub mod errors;
pub mod frame;
pub mod params;
pub mod pipeline;
