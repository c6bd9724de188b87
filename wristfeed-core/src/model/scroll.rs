//! Message view scroll position

/// Vertical scroll offset within laid-out content, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Scroll {
    offset: u16,
    content_height: u16,
}

impl Scroll {
    pub const fn new() -> Self {
        Self {
            offset: 0,
            content_height: 0,
        }
    }

    /// New content; scroll back to the top
    pub fn reset(&mut self, content_height: u16) {
        self.content_height = content_height;
        self.offset = 0;
    }

    /// Move by `step` pixels, staying within the content
    pub fn step(&mut self, down: bool, step: u16) -> u16 {
        self.offset = if down {
            self.offset.saturating_add(step).min(self.content_height)
        } else {
            self.offset.saturating_sub(step)
        };
        self.offset
    }

    pub fn offset(&self) -> u16 {
        self.offset
    }

    pub fn content_height(&self) -> u16 {
        self.content_height
    }
}
