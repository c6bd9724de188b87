//! Collaborator traits
//!
//! These traits define the interface between the session logic and the
//! platform: the outbound link, the retry timer and the view layer.

pub mod link;
pub mod view;

pub use link::{Link, LinkError, PowerMode, RetryTimer};
pub use view::View;

/// Everything a session needs from its platform
pub trait Host: Link + RetryTimer + View {}

// Blanket implementation for all complete platforms
impl<T: Link + RetryTimer + View + ?Sized> Host for T {}
