//! Platform collaborators for the session
//!
//! Commands go to the link transmitter through a bounded channel; the
//! retry timer is a deadline the controller waits on; rendering requests
//! are logged over RTT together with the list cursors and scroll state
//! the button mapping needs.

use defmt::*;
use embassy_time::{Duration, Instant};

use wristfeed_core::config::{FontKey, MESSAGE_CONTENT_PADDING};
use wristfeed_core::model::Scroll;
use wristfeed_core::traits::{Link, LinkError, PowerMode, RetryTimer, View};
use wristfeed_core::{Level, ListKind};
use wristfeed_protocol::{Command, ImageHeader};

use crate::channels::{COMMAND_CHANNEL, POWER_MODE};
use crate::config::SCREEN_WIDTH;

/// Pixels scrolled per button press in the message view
const SCROLL_STEP: u16 = 24;

/// Session host backed by embassy channels
pub struct FirmwareHost {
    retry_deadline: Option<Instant>,
    /// Highlighted row of the feed and item lists
    cursors: [u8; 2],
    message_font: FontKey,
    scroll: Scroll,
}

impl FirmwareHost {
    pub const fn new() -> Self {
        Self {
            retry_deadline: None,
            cursors: [0; 2],
            message_font: FontKey::Default,
            scroll: Scroll::new(),
        }
    }

    /// Deadline of the armed retry timer
    pub fn retry_deadline(&self) -> Option<Instant> {
        self.retry_deadline
    }

    /// The retry deadline passed
    pub fn expire_retry(&mut self) {
        self.retry_deadline = None;
    }

    /// Highlighted row of a list
    pub fn cursor(&self, list: ListKind) -> u8 {
        self.cursors[list_index(list)]
    }

    /// Move the highlight of a list by one row, staying within `rows`
    pub fn move_cursor(&mut self, list: ListKind, down: bool, rows: u8) {
        let cursor = &mut self.cursors[list_index(list)];
        *cursor = if down {
            cursor.saturating_add(1).min(rows.saturating_sub(1))
        } else {
            cursor.saturating_sub(1)
        };
    }

    /// Scroll the message view by one step
    pub fn scroll(&mut self, down: bool) {
        self.scroll.step(down, SCROLL_STEP);
        debug!(
            "message scrolled to {}/{}",
            self.scroll.offset(),
            self.scroll.content_height()
        );
    }
}

impl Default for FirmwareHost {
    fn default() -> Self {
        Self::new()
    }
}

fn list_index(list: ListKind) -> usize {
    match list {
        ListKind::Feeds => 0,
        ListKind::Items => 1,
    }
}

/// Estimated rendered height of `text` in `font`, padding included
fn content_height(text: &str, font: FontKey) -> u16 {
    let line_height = match font.height() {
        0 => 18,
        h => u16::from(h),
    };
    // Average glyph is about half as wide as it is tall
    let chars_per_line = (SCREEN_WIDTH / (line_height / 2).max(1)).max(1) as usize;
    let lines: usize = text
        .split('\n')
        .map(|line| line.chars().count().div_ceil(chars_per_line).max(1))
        .sum();
    let lines = u16::try_from(lines).unwrap_or(u16::MAX);
    lines
        .saturating_mul(line_height)
        .saturating_add(MESSAGE_CONTENT_PADDING)
}

impl Link for FirmwareHost {
    fn try_send(&mut self, command: Command) -> Result<(), LinkError> {
        COMMAND_CHANNEL.try_send(command).map_err(|_| LinkError::Busy)
    }

    fn set_power_mode(&mut self, mode: PowerMode) {
        POWER_MODE.signal(mode);
    }
}

impl RetryTimer for FirmwareHost {
    fn arm(&mut self, delay_ms: u32) {
        self.retry_deadline = Some(Instant::now() + Duration::from_millis(u64::from(delay_ms)));
    }

    fn cancel(&mut self) {
        self.retry_deadline = None;
    }
}

impl View for FirmwareHost {
    fn push_window(&mut self, level: Level) {
        info!("open {}", level);
        if let Some(list) = level.list() {
            self.cursors[list_index(list)] = 0;
        }
        if level == Level::Message {
            self.scroll.reset(0);
        }
    }

    fn pop_window(&mut self, level: Level) {
        info!("close {}", level);
    }

    fn reload_list(&mut self, list: ListKind) {
        debug!("reload {} list", list);
    }

    fn mark_dirty(&mut self, level: Level) {
        trace!("redraw {}", level);
    }

    fn set_refresh_overlay(&mut self, visible: bool) {
        debug!("refresh overlay {}", if visible { "shown" } else { "hidden" });
    }

    fn apply_font(&mut self, level: Level, font: FontKey) {
        debug!("{} font {}", level, font);
        if level == Level::Message {
            self.message_font = font;
        }
    }

    fn set_row_height(&mut self, height: u8) {
        debug!("row height {}", height);
    }

    fn set_scrollable_content(&mut self, text: &str) {
        self.scroll.reset(content_height(text, self.message_font));
        info!("message ({} px): {=str}", self.scroll.content_height(), text);
    }

    fn reveal(&mut self, level: Level) {
        debug!("reveal {}", level);
    }

    fn replace_image_surface(&mut self, header: &ImageHeader) {
        info!(
            "image surface {}x{} ({} bytes/row)",
            header.width, header.height, header.bytes_per_row
        );
    }
}
