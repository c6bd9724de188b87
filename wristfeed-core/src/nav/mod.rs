//! Navigation state machine
//!
//! Four ordered levels (feeds, items, message, image) form a stack that
//! grows and shrinks one level at a time. Every transition issues the
//! protocol command the new level needs.

pub mod events;
pub mod level;
mod machine;
pub mod stack;

pub use events::{NavEvent, Transition};
pub use level::{Level, ListKind};
pub use stack::LevelStack;
