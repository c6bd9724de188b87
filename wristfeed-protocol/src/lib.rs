//! Wristfeed companion link protocol
//!
//! This crate defines everything that crosses the link between the wearable
//! client and its companion process. The companion does the heavy lifting
//! (fetching feeds, dithering images) and streams results to the device in
//! small dictionary messages.
//!
//! # Protocol Overview
//!
//! Every message is a key/value dictionary wrapped in a binary frame:
//! ```text
//! ┌───────┬──────────┬──────┬──────────────┬──────────┐
//! │ START │ LENGTH   │ TYPE │ PAYLOAD      │ CHECKSUM │
//! │ 1B    │ 2B (LE)  │ 1B   │ 0–1024B      │ 1B       │
//! └───────┴──────────┴──────┴──────────────┴──────────┘
//! ```
//!
//! The payload of a `MSG_DICT` frame is a dictionary of typed tuples keyed by
//! numeric slots. The device sends exactly one tuple per message (a command);
//! the companion multiplexes several logical channels into one dictionary
//! using disjoint key ranges.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod dict;
pub mod frame;
pub mod messages;

pub use dict::{DictError, DictReader, DictWriter, Tuple, TupleValue};
pub use frame::{Frame, FrameError, FrameParser, FRAME_START, MAX_PAYLOAD_SIZE, MSG_DICT};
pub use messages::{
    decode, Command, DecodeError, ImageHeader, InboundEvent, InboundEvents, LayoutBundle,
    ListEntry, TransferChunk,
};
