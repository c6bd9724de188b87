//! View trait
//!
//! The view owns windows, list widgets and rendering. The session only
//! tells it what changed; it reads content back through the session's
//! accessors.

use wristfeed_protocol::ImageHeader;

use crate::config::FontKey;
use crate::nav::{Level, ListKind};

/// Trait for the rendering layer
pub trait View {
    /// Open the window for `level` on top of the window stack
    fn push_window(&mut self, level: Level);

    /// Close the window for `level`
    fn pop_window(&mut self, level: Level);

    /// Row count or titles of a list changed
    fn reload_list(&mut self, list: ListKind);

    /// Redraw the window for `level`
    fn mark_dirty(&mut self, level: Level);

    /// Show or hide the "refreshing" overlay on the feed list
    fn set_refresh_overlay(&mut self, visible: bool);

    /// Render `level` with `font`
    fn apply_font(&mut self, level: Level, font: FontKey);

    /// Set the list row height in pixels
    fn set_row_height(&mut self, height: u8);

    /// Replace the scrollable message content and scroll to the top
    fn set_scrollable_content(&mut self, text: &str);

    /// Unhide the content of `level`
    fn reveal(&mut self, level: Level);

    /// Create or replace the image surface bound to the transfer buffer
    fn replace_image_surface(&mut self, header: &ImageHeader);
}
