//! Recording host for unit tests

use wristfeed_protocol::messages::*;
use wristfeed_protocol::DictWriter;

use crate::config::FontKey;
use crate::nav::{Level, ListKind};
use crate::traits::{Link, LinkError, PowerMode, RetryTimer, View};

/// One recorded view call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCall {
    Push(Level),
    Pop(Level),
    Reload(ListKind),
    Dirty(Level),
    Overlay(bool),
    Font(Level, FontKey),
    RowHeight(u8),
    Content(String),
    Reveal(Level),
    Surface(ImageHeader),
}

#[derive(Debug, Default)]
pub struct MockHost {
    /// Commands accepted by the link
    pub sent: Vec<Command>,
    /// Power mode changes in order
    pub power: Vec<PowerMode>,
    /// Armed retry delay
    pub timer: Option<u32>,
    /// Number of `arm` calls
    pub arms: usize,
    /// Number of upcoming sends refused as busy
    pub busy_for: usize,
    /// Refuse every send as closed
    pub closed: bool,
    pub calls: Vec<ViewCall>,
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything recorded so far
    pub fn clear(&mut self) {
        self.sent.clear();
        self.power.clear();
        self.calls.clear();
    }

    pub fn count(&self, call: &ViewCall) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }

    pub fn throttles(&self) -> usize {
        self.power.iter().filter(|m| **m == PowerMode::Normal).count()
    }

    pub fn acks(&self) -> usize {
        self.sent.iter().filter(|c| **c == Command::Ack).count()
    }
}

impl Link for MockHost {
    fn try_send(&mut self, command: Command) -> Result<(), LinkError> {
        if self.closed {
            return Err(LinkError::Closed);
        }
        if self.busy_for > 0 {
            self.busy_for -= 1;
            return Err(LinkError::Busy);
        }
        self.sent.push(command);
        Ok(())
    }

    fn set_power_mode(&mut self, mode: PowerMode) {
        self.power.push(mode);
    }
}

impl RetryTimer for MockHost {
    fn arm(&mut self, delay_ms: u32) {
        self.timer = Some(delay_ms);
        self.arms += 1;
    }

    fn cancel(&mut self) {
        self.timer = None;
    }
}

impl View for MockHost {
    fn push_window(&mut self, level: Level) {
        self.calls.push(ViewCall::Push(level));
    }

    fn pop_window(&mut self, level: Level) {
        self.calls.push(ViewCall::Pop(level));
    }

    fn reload_list(&mut self, list: ListKind) {
        self.calls.push(ViewCall::Reload(list));
    }

    fn mark_dirty(&mut self, level: Level) {
        self.calls.push(ViewCall::Dirty(level));
    }

    fn set_refresh_overlay(&mut self, visible: bool) {
        self.calls.push(ViewCall::Overlay(visible));
    }

    fn apply_font(&mut self, level: Level, font: FontKey) {
        self.calls.push(ViewCall::Font(level, font));
    }

    fn set_row_height(&mut self, height: u8) {
        self.calls.push(ViewCall::RowHeight(height));
    }

    fn set_scrollable_content(&mut self, text: &str) {
        self.calls.push(ViewCall::Content(text.to_string()));
    }

    fn reveal(&mut self, level: Level) {
        self.calls.push(ViewCall::Reveal(level));
    }

    fn replace_image_surface(&mut self, header: &ImageHeader) {
        self.calls.push(ViewCall::Surface(*header));
    }
}

/// Build a dictionary packet
pub fn packet(f: impl FnOnce(&mut DictWriter<'_>)) -> Vec<u8> {
    let mut buf = vec![0u8; 1200];
    let mut writer = DictWriter::new(&mut buf).unwrap();
    f(&mut writer);
    let len = writer.finish();
    buf.truncate(len);
    buf
}

pub fn feed_packet(offset: u8, total: u8, title: &str) -> Vec<u8> {
    packet(|w| {
        w.write_cstr(KEY_FEED_TITLE, title).unwrap();
        w.write_u8(KEY_FEED_TOTAL, total).unwrap();
        w.write_u8(KEY_FEED_OFFSET, offset).unwrap();
    })
}

pub fn item_packet(offset: u8, total: u8, title: &str) -> Vec<u8> {
    packet(|w| {
        w.write_cstr(KEY_ITEM_TITLE, title).unwrap();
        w.write_u8(KEY_ITEM_TOTAL, total).unwrap();
        w.write_u8(KEY_ITEM_OFFSET, offset).unwrap();
    })
}

pub fn chunk_packet(offset: u16, total: u8, data: &[u8]) -> Vec<u8> {
    packet(|w| {
        w.write_u8(KEY_CHUNK_TOTAL, total).unwrap();
        w.write_u16(KEY_CHUNK_LENGTH, data.len() as u16).unwrap();
        w.write_u16(KEY_CHUNK_OFFSET, offset).unwrap();
        w.write_bytes(KEY_CHUNK_DATA, data).unwrap();
    })
}

pub fn image_header_packet(width: u16, height: u16, bytes_per_row: u8) -> Vec<u8> {
    packet(|w| {
        w.write_u16(KEY_IMAGE_WIDTH, width).unwrap();
        w.write_u16(KEY_IMAGE_HEIGHT, height).unwrap();
        w.write_u8(KEY_IMAGE_ROW_BYTES, bytes_per_row).unwrap();
    })
}

pub fn thumbnail_packet(flag: bool) -> Vec<u8> {
    packet(|w| w.write_u8(KEY_THUMBNAIL, u8::from(flag)).unwrap())
}

pub fn layout_packet(feed: u8, item: u8, message: u8, row_height: u8) -> Vec<u8> {
    packet(|w| {
        w.write_u8(KEY_FONT_FEED, feed).unwrap();
        w.write_u8(KEY_FONT_ITEM, item).unwrap();
        w.write_u8(KEY_FONT_MESSAGE, message).unwrap();
        w.write_u8(KEY_ROW_HEIGHT, row_height).unwrap();
    })
}

pub fn refresh_packet() -> Vec<u8> {
    packet(|w| w.write_u8(KEY_REFRESH, 1).unwrap())
}
