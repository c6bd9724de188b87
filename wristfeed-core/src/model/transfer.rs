//! Shared buffer for message text and image pixels
//!
//! Message text and image pixels arrive through the same chunk channel
//! into the same storage. The buffer records which of the two it holds so
//! readers can never interpret pixels as text or the other way round.

use wristfeed_protocol::ImageHeader;

use crate::config::TRANSFER_BUFFER_SIZE;

/// What the buffer currently holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Payload {
    /// Nothing received since power-on
    #[default]
    Empty,
    /// NUL-terminated message text
    Text,
    /// Packed 1-bit image rows
    Image(ImageHeader),
}

/// Borrowed view of a received image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageView<'a> {
    pub width: u16,
    pub height: u16,
    pub bytes_per_row: u8,
    pub pixels: &'a [u8],
}

/// The single transfer target
#[derive(Debug, Clone)]
pub struct TransferBuffer {
    data: [u8; TRANSFER_BUFFER_SIZE],
    payload: Payload,
    /// Header announced for the next transfer
    armed: Option<ImageHeader>,
}

impl TransferBuffer {
    /// Create an empty, zeroed buffer
    pub const fn new() -> Self {
        Self {
            data: [0; TRANSFER_BUFFER_SIZE],
            payload: Payload::Empty,
            armed: None,
        }
    }

    /// Declare the next transfer to be an image with `header`
    pub fn arm_image(&mut self, header: ImageHeader) {
        self.armed = Some(header);
    }

    /// Start a transfer: zero the storage and fix the payload kind
    pub fn begin(&mut self) {
        self.data.fill(0);
        self.payload = match self.armed.take() {
            Some(header) => Payload::Image(header),
            None => Payload::Text,
        };
    }

    /// Copy `bytes` to `offset`, clipped to the buffer
    ///
    /// Returns the number of bytes copied.
    pub fn write(&mut self, offset: usize, bytes: &[u8]) -> usize {
        let Some(dest) = self.data.get_mut(offset..) else {
            return 0;
        };
        let len = bytes.len().min(dest.len());
        dest[..len].copy_from_slice(&bytes[..len]);
        len
    }

    /// Kind of the current contents
    pub fn payload(&self) -> Payload {
        self.payload
    }

    /// Raw storage
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Message text, empty unless the buffer holds text
    ///
    /// Stops at the first NUL; a trailing partial character is dropped.
    pub fn text(&self) -> &str {
        if self.payload != Payload::Text {
            return "";
        }
        let end = self
            .data
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(self.data.len());
        let bytes = &self.data[..end];
        match core::str::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => core::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or_default(),
        }
    }

    /// Image view, if the buffer holds an image
    pub fn image(&self) -> Option<ImageView<'_>> {
        match self.payload {
            Payload::Image(header) => {
                let len = header.pixel_bytes().min(self.data.len());
                Some(ImageView {
                    width: header.width,
                    height: header.height,
                    bytes_per_row: header.bytes_per_row,
                    pixels: &self.data[..len],
                })
            }
            _ => None,
        }
    }
}

impl Default for TransferBuffer {
    fn default() -> Self {
        Self::new()
    }
}
