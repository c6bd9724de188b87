//! Level stack

use heapless::Vec;

use super::level::Level;
use crate::config::MAX_LEVEL_DEPTH;

/// Stack of open levels, rooted at the feed list
///
/// Push goes exactly one level deeper and pop exactly one level back, so
/// the stack always holds a contiguous prefix of the levels.
#[derive(Debug, Clone)]
pub struct LevelStack {
    levels: Vec<Level, MAX_LEVEL_DEPTH>,
}

impl LevelStack {
    /// Create a stack holding only the feed list
    pub fn new() -> Self {
        let mut levels = Vec::new();
        // Capacity is at least one
        let _ = levels.push(Level::Feeds);
        Self { levels }
    }

    /// Topmost level
    pub fn current(&self) -> Level {
        self.levels.last().copied().unwrap_or(Level::Feeds)
    }

    /// Number of open levels
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// Check if `level` is open
    pub fn contains(&self, level: Level) -> bool {
        self.levels.contains(&level)
    }

    /// Open `level` if it is directly below the current one
    pub fn push(&mut self, level: Level) -> bool {
        if self.current().deeper() != Some(level) {
            return false;
        }
        self.levels.push(level).is_ok()
    }

    /// Close the current level, never the root
    pub fn pop(&mut self) -> Option<Level> {
        if self.levels.len() <= 1 {
            return None;
        }
        self.levels.pop()
    }
}

impl Default for LevelStack {
    fn default() -> Self {
        Self::new()
    }
}
