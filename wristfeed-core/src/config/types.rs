//! Configuration type definitions

use wristfeed_protocol::LayoutBundle;

use crate::nav::Level;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum feeds in the feed list
pub const MAX_FEEDS: usize = 16;

/// Maximum items in the item list
pub const MAX_ITEMS: usize = 128;

/// Maximum title length in bytes
pub const TITLE_LEN: usize = 96;

/// Size of the shared message/image buffer
pub const TRANSFER_BUFFER_SIZE: usize = 3024;

/// Number of navigation levels
pub const MAX_LEVEL_DEPTH: usize = 4;

/// Extra height added below scrollable message content
pub const MESSAGE_CONTENT_PADDING: u16 = 4;

/// Default delay before a busy command is retried
pub const DEFAULT_RETRY_DELAY_MS: u32 = 250;

/// Retry behaviour for commands refused by a busy link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RetryPolicy {
    /// Fixed delay between attempts (no backoff growth)
    pub delay_ms: u32,
    /// Failed attempts after which a command is abandoned.
    /// `None` retries until the send succeeds.
    pub max_attempts: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_RETRY_DELAY_MS,
            max_attempts: None,
        }
    }
}

impl RetryPolicy {
    /// Check if a command that has failed `attempts` times should be dropped
    pub fn is_exhausted(&self, attempts: u32) -> bool {
        matches!(self.max_attempts, Some(max) if attempts >= max)
    }
}

/// Runtime session configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SessionConfig {
    /// Command retry policy
    pub retry: RetryPolicy,
}

/// System font addressed by a layout font id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FontKey {
    /// Host default, used for unknown ids
    #[default]
    Default,
    Gothic14,
    Gothic14Bold,
    Gothic18,
    Gothic18Bold,
    Gothic24,
    Gothic24Bold,
    Gothic28,
    Gothic28Bold,
    Bitham30Black,
    Bitham42Bold,
    Bitham42Light,
    RobotoCondensed21,
    DroidSerif28Bold,
}

impl FontKey {
    /// Resolve a font id from the companion
    pub fn from_id(id: u8) -> Self {
        match id {
            0 => FontKey::Gothic14,
            1 => FontKey::Gothic14Bold,
            2 => FontKey::Gothic18,
            3 => FontKey::Gothic18Bold,
            4 => FontKey::Gothic24,
            5 => FontKey::Gothic24Bold,
            6 => FontKey::Gothic28,
            7 => FontKey::Gothic28Bold,
            8 => FontKey::Bitham30Black,
            9 => FontKey::Bitham42Bold,
            10 => FontKey::Bitham42Light,
            11 => FontKey::RobotoCondensed21,
            12 => FontKey::DroidSerif28Bold,
            _ => FontKey::Default,
        }
    }

    /// Nominal glyph height in pixels, 0 for the host default
    pub fn height(&self) -> u8 {
        match self {
            FontKey::Default => 0,
            FontKey::Gothic14 | FontKey::Gothic14Bold => 14,
            FontKey::Gothic18 | FontKey::Gothic18Bold => 18,
            FontKey::RobotoCondensed21 => 21,
            FontKey::Gothic24 | FontKey::Gothic24Bold => 24,
            FontKey::Gothic28 | FontKey::Gothic28Bold | FontKey::DroidSerif28Bold => 28,
            FontKey::Bitham30Black => 30,
            FontKey::Bitham42Bold | FontKey::Bitham42Light => 42,
        }
    }
}

/// Fonts and list row height, as last configured by the companion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Layout {
    pub feed_font: FontKey,
    pub item_font: FontKey,
    pub message_font: FontKey,
    /// List row height in pixels
    pub row_height: u8,
}

impl Layout {
    /// Font used to render a level; the image view has none
    pub fn font_for(&self, level: Level) -> Option<FontKey> {
        match level {
            Level::Feeds => Some(self.feed_font),
            Level::Items => Some(self.item_font),
            Level::Message => Some(self.message_font),
            Level::Image => None,
        }
    }
}

impl From<&LayoutBundle> for Layout {
    fn from(bundle: &LayoutBundle) -> Self {
        Self {
            feed_font: FontKey::from_id(bundle.feed_font),
            item_font: FontKey::from_id(bundle.item_font),
            message_font: FontKey::from_id(bundle.message_font),
            row_height: bundle.row_height,
        }
    }
}
