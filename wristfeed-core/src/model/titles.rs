//! Title tables for the feed and item lists

use heapless::String;

use crate::config::TITLE_LEN;

/// One list title
pub type Title = String<TITLE_LEN>;

/// Fixed array of list titles indexed by row
#[derive(Debug, Clone)]
pub struct TitleTable<const N: usize> {
    titles: [Title; N],
}

impl<const N: usize> TitleTable<N> {
    /// Create a table of empty titles
    pub fn new() -> Self {
        Self {
            titles: core::array::from_fn(|_| Title::new()),
        }
    }

    /// Number of rows the table can hold
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Store the title for `index`
    ///
    /// Text stops at the first NUL and is cut to `TITLE_LEN` bytes on a
    /// character boundary. Returns `false` if `index` is out of range.
    pub fn write(&mut self, index: usize, bytes: &[u8]) -> bool {
        let Some(title) = self.titles.get_mut(index) else {
            return false;
        };
        title.clear();
        // Never longer than TITLE_LEN
        let _ = title.push_str(title_text(bytes));
        true
    }

    /// Title at `index`, empty if never written
    pub fn get(&self, index: usize) -> Option<&str> {
        self.titles.get(index).map(|t| t.as_str())
    }

    /// Empty every title
    pub fn clear(&mut self) {
        self.titles.iter_mut().for_each(|t| t.clear());
    }
}

impl<const N: usize> Default for TitleTable<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Longest valid UTF-8 prefix that fits a title
fn title_text(bytes: &[u8]) -> &str {
    let end = bytes
        .iter()
        .position(|&b| b == 0)
        .unwrap_or(bytes.len())
        .min(TITLE_LEN);
    let bytes = &bytes[..end];
    match core::str::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => core::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_and_get() {
        let mut table = TitleTable::<4>::new();
        assert!(table.write(2, b"Ars Technica"));
        assert_eq!(table.get(2), Some("Ars Technica"));
        assert_eq!(table.get(0), Some(""));
        assert_eq!(table.get(4), None);
    }

    #[test]
    fn test_out_of_range_write_is_ignored() {
        let mut table = TitleTable::<2>::new();
        assert!(!table.write(2, b"nope"));
    }

    #[test]
    fn test_stops_at_nul() {
        let mut table = TitleTable::<1>::new();
        table.write(0, b"short\0garbage");
        assert_eq!(table.get(0), Some("short"));
    }

    #[test]
    fn test_long_title_cut_on_char_boundary() {
        // 95 ASCII bytes followed by a two-byte character straddling the limit
        let mut bytes = [b'a'; 97];
        bytes[95] = 0xC3;
        bytes[96] = 0xA9;
        let mut table = TitleTable::<1>::new();
        table.write(0, &bytes);
        assert_eq!(table.get(0).map(str::len), Some(95));
    }

    #[test]
    fn test_overwrite_replaces_previous_title() {
        let mut table = TitleTable::<1>::new();
        table.write(0, b"first title");
        table.write(0, b"second");
        assert_eq!(table.get(0), Some("second"));
    }

    #[test]
    fn test_clear() {
        let mut table = TitleTable::<3>::new();
        table.write(1, b"x");
        table.clear();
        assert_eq!(table.get(1), Some(""));
    }
}
