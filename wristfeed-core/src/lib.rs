//! Board-agnostic client logic for the Wristfeed RSS reader
//!
//! This crate contains everything between the wire format and the screen
//! that does not depend on a specific board:
//!
//! - Fixed-capacity title tables, receive counters and the shared
//!   transfer buffer
//! - Command dispatcher with single-flight retry
//! - Reassembly engine for multiplexed inbound packets
//! - Level-based navigation state machine
//! - Collaborator traits for the link, retry timer and view
//! - Configuration types
//!
//! All state lives in one [`Session`] that the host passes its
//! collaborators into on every event.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod config;
pub mod dispatch;
pub mod model;
pub mod nav;
mod reassembly;
pub mod session;
pub mod traits;

#[cfg(test)]
mod mock;

pub use dispatch::{Dispatcher, PendingRetry, SendStatus};
pub use nav::{Level, ListKind, NavEvent, Transition};
pub use session::Session;
