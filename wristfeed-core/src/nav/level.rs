//! Navigation levels

use crate::config::{MAX_FEEDS, MAX_ITEMS};

/// Navigation levels, shallowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Level {
    /// Feed list
    Feeds = 0,
    /// Item list of the selected feed
    Items = 1,
    /// Text of the selected item
    Message = 2,
    /// Image of the selected item
    Image = 3,
}

impl Level {
    /// Next level down, if any
    pub fn deeper(self) -> Option<Self> {
        match self {
            Level::Feeds => Some(Level::Items),
            Level::Items => Some(Level::Message),
            Level::Message => Some(Level::Image),
            Level::Image => None,
        }
    }

    /// Next level up, if any
    pub fn shallower(self) -> Option<Self> {
        match self {
            Level::Feeds => None,
            Level::Items => Some(Level::Feeds),
            Level::Message => Some(Level::Items),
            Level::Image => Some(Level::Message),
        }
    }

    /// Stack position of this level
    pub fn index(self) -> usize {
        self as usize
    }

    /// The list shown at this level, if it is a list level
    pub fn list(self) -> Option<ListKind> {
        match self {
            Level::Feeds => Some(ListKind::Feeds),
            Level::Items => Some(ListKind::Items),
            _ => None,
        }
    }
}

/// The two paginated lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ListKind {
    Feeds,
    Items,
}

impl ListKind {
    /// Level that displays this list
    pub fn level(self) -> Level {
        match self {
            ListKind::Feeds => Level::Feeds,
            ListKind::Items => Level::Items,
        }
    }

    /// Maximum number of rows
    pub fn capacity(self) -> usize {
        match self {
            ListKind::Feeds => MAX_FEEDS,
            ListKind::Items => MAX_ITEMS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_ordered() {
        assert!(Level::Feeds < Level::Items);
        assert!(Level::Message < Level::Image);
        assert_eq!(Level::Image.index(), 3);
    }

    #[test]
    fn test_deeper_and_shallower_are_inverse() {
        let mut level = Level::Feeds;
        while let Some(next) = level.deeper() {
            assert_eq!(next.shallower(), Some(level));
            level = next;
        }
        assert_eq!(level, Level::Image);
        assert_eq!(Level::Feeds.shallower(), None);
    }

    #[test]
    fn test_list_levels() {
        assert_eq!(Level::Items.list(), Some(ListKind::Items));
        assert_eq!(Level::Message.list(), None);
        assert_eq!(ListKind::Feeds.level(), Level::Feeds);
        assert_eq!(ListKind::Items.capacity(), 128);
    }
}
