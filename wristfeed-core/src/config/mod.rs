//! Configuration types
//!
//! Capacity limits are compile-time constants; retry behaviour is a
//! runtime `SessionConfig` that hosts may load however they like.

pub mod types;

pub use types::*;
