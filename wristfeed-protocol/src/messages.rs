//! Message types for the companion link
//!
//! Messages are divided into two categories:
//! - Device → Companion: one `Command` per message (slot + one byte)
//! - Companion → Device: dictionaries multiplexing up to seven logical
//!   channels, decoded once into `InboundEvent`s

use crate::dict::{DictError, DictReader, DictWriter, TupleValue};
use heapless::Vec;

// Slots: Device → Companion
pub const SLOT_CONTROL: u32 = 1090;
pub const SLOT_LIST_ITEMS: u32 = 1091;
pub const SLOT_FETCH_MESSAGE: u32 = 1092;
pub const SLOT_PREPARE_THUMBNAIL: u32 = 1093;
pub const SLOT_FETCH_IMAGE: u32 = 1094;

// Control slot values
pub const CONTROL_HELLO: u8 = 0;
pub const CONTROL_ACK: u8 = 1;
pub const CONTROL_CONTINUE_FEEDS: u8 = 2;
pub const CONTROL_CONTINUE_ITEMS: u8 = 3;

// Keys: Companion → Device
pub const KEY_FEED_TITLE: u32 = 1001;
pub const KEY_ITEM_TITLE: u32 = 1002;
pub const KEY_FEED_TOTAL: u32 = 1011;
pub const KEY_FEED_OFFSET: u32 = 1012;
pub const KEY_FONT_FEED: u32 = 1013;
pub const KEY_FONT_ITEM: u32 = 1014;
pub const KEY_FONT_MESSAGE: u32 = 1015;
pub const KEY_ROW_HEIGHT: u32 = 1016;
pub const KEY_REFRESH: u32 = 1017;
pub const KEY_IMAGE_WIDTH: u32 = 1018;
pub const KEY_IMAGE_HEIGHT: u32 = 1019;
pub const KEY_IMAGE_ROW_BYTES: u32 = 1020;
pub const KEY_ITEM_TOTAL: u32 = 1021;
pub const KEY_ITEM_OFFSET: u32 = 1022;
pub const KEY_THUMBNAIL: u32 = 1023;
pub const KEY_CHUNK_TOTAL: u32 = 9996;
pub const KEY_CHUNK_LENGTH: u32 = 9997;
pub const KEY_CHUNK_OFFSET: u32 = 9998;
pub const KEY_CHUNK_DATA: u32 = 9999;

/// Upper bound of logical channels in one inbound dictionary
pub const MAX_EVENTS_PER_PACKET: usize = 7;

/// Encoded size of a single command dictionary (COUNT + header + 1 byte)
pub const COMMAND_DICT_LEN: usize = 1 + crate::dict::TUPLE_HEADER_LEN + 1;

/// Commands sent from the device to the companion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Session start; the companion answers with layout and the feed list
    Hello,
    /// Acknowledge an image header, thumbnail flag or chunk
    Ack,
    /// Send the next feed title
    ContinueFeeds,
    /// Send the next item title
    ContinueItems,
    /// List the items of feed N
    ListItems(u8),
    /// Fetch the message text of item N
    FetchMessage(u8),
    /// Check thumbnail availability for item N
    PrepareThumbnail(u8),
    /// Fetch the image of item N
    FetchImage(u8),
}

impl Command {
    /// Slot the command is keyed under
    pub fn slot(&self) -> u32 {
        match self {
            Command::Hello | Command::Ack | Command::ContinueFeeds | Command::ContinueItems => {
                SLOT_CONTROL
            }
            Command::ListItems(_) => SLOT_LIST_ITEMS,
            Command::FetchMessage(_) => SLOT_FETCH_MESSAGE,
            Command::PrepareThumbnail(_) => SLOT_PREPARE_THUMBNAIL,
            Command::FetchImage(_) => SLOT_FETCH_IMAGE,
        }
    }

    /// One-byte argument carried in the slot
    pub fn value(&self) -> u8 {
        match *self {
            Command::Hello => CONTROL_HELLO,
            Command::Ack => CONTROL_ACK,
            Command::ContinueFeeds => CONTROL_CONTINUE_FEEDS,
            Command::ContinueItems => CONTROL_CONTINUE_ITEMS,
            Command::ListItems(n)
            | Command::FetchMessage(n)
            | Command::PrepareThumbnail(n)
            | Command::FetchImage(n) => n,
        }
    }

    /// Rebuild a command from its slot and value
    pub fn from_slot(slot: u32, value: u8) -> Option<Self> {
        match (slot, value) {
            (SLOT_CONTROL, CONTROL_HELLO) => Some(Command::Hello),
            (SLOT_CONTROL, CONTROL_ACK) => Some(Command::Ack),
            (SLOT_CONTROL, CONTROL_CONTINUE_FEEDS) => Some(Command::ContinueFeeds),
            (SLOT_CONTROL, CONTROL_CONTINUE_ITEMS) => Some(Command::ContinueItems),
            (SLOT_LIST_ITEMS, n) => Some(Command::ListItems(n)),
            (SLOT_FETCH_MESSAGE, n) => Some(Command::FetchMessage(n)),
            (SLOT_PREPARE_THUMBNAIL, n) => Some(Command::PrepareThumbnail(n)),
            (SLOT_FETCH_IMAGE, n) => Some(Command::FetchImage(n)),
            _ => None,
        }
    }

    /// Parse the first command found in a dictionary
    pub fn from_dict(dict: &DictReader<'_>) -> Option<Self> {
        dict.iter().find_map(|tuple| {
            let value = u8::try_from(tuple.value.as_uint()?).ok()?;
            Self::from_slot(tuple.key, value)
        })
    }

    /// Append this command to a dictionary
    pub fn write_to(&self, writer: &mut DictWriter<'_>) -> Result<(), DictError> {
        writer.write_u8(self.slot(), self.value())
    }

    /// Encode this command as a complete single-tuple dictionary
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, DictError> {
        let mut writer = DictWriter::new(buffer)?;
        self.write_to(&mut writer)?;
        Ok(writer.finish())
    }
}

/// One feed or item title of a paginated list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ListEntry<'a> {
    /// Row the title belongs to
    pub offset: u8,
    /// Declared number of rows in the list
    pub total: u8,
    /// Title bytes, without terminator
    pub title: &'a [u8],
}

/// Font and row-height configuration, applied atomically
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LayoutBundle {
    pub feed_font: u8,
    pub item_font: u8,
    pub message_font: u8,
    pub row_height: u8,
}

/// Geometry of an image about to be transferred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ImageHeader {
    pub width: u16,
    pub height: u16,
    pub bytes_per_row: u8,
}

impl ImageHeader {
    /// Bytes needed for the full pixel data
    pub fn pixel_bytes(&self) -> usize {
        usize::from(self.height) * usize::from(self.bytes_per_row)
    }
}

/// One packet of a multi-packet transfer into the shared buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransferChunk<'a> {
    /// Destination offset in the shared buffer
    pub offset: u16,
    /// Declared payload length
    pub length: u16,
    /// Declared number of chunks in the transfer
    pub total: u8,
    /// Raw data tuple
    pub data: &'a [u8],
}

impl<'a> TransferChunk<'a> {
    /// Bytes to copy: the declared length, bounded by the data present
    pub fn payload(&self) -> &'a [u8] {
        let len = usize::from(self.length).min(self.data.len());
        &self.data[..len]
    }
}

/// One logical channel of an inbound dictionary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InboundEvent<'a> {
    FeedTitle(ListEntry<'a>),
    ItemTitle(ListEntry<'a>),
    Layout(LayoutBundle),
    RefreshNotice,
    ImageHeader(ImageHeader),
    Chunk(TransferChunk<'a>),
    ThumbnailFlag(bool),
}

/// All channels present in one inbound dictionary, in channel order
pub type InboundEvents<'a> = Vec<InboundEvent<'a>, MAX_EVENTS_PER_PACKET>;

/// Errors that can occur while decoding an inbound dictionary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Dictionary itself is malformed
    Dict(DictError),
    /// A channel is present but one of its companion keys is absent
    MissingField(u32),
    /// A key holds a value of the wrong type or range
    BadField(u32),
}

impl From<DictError> for DecodeError {
    fn from(e: DictError) -> Self {
        DecodeError::Dict(e)
    }
}

/// Decode every channel present in `dict`
///
/// A channel with missing or mistyped companion keys rejects the whole
/// dictionary. Unknown keys are ignored.
pub fn decode<'a>(dict: &DictReader<'a>) -> Result<InboundEvents<'a>, DecodeError> {
    let mut events = InboundEvents::new();
    // At most one event per channel, so pushes cannot overflow
    let mut emit = |event| {
        let _ = events.push(event);
    };

    if let Some(title) = dict.find(KEY_FEED_TITLE) {
        emit(InboundEvent::FeedTitle(list_entry(
            dict,
            KEY_FEED_TITLE,
            title,
            KEY_FEED_TOTAL,
            KEY_FEED_OFFSET,
        )?));
    }

    if let Some(title) = dict.find(KEY_ITEM_TITLE) {
        emit(InboundEvent::ItemTitle(list_entry(
            dict,
            KEY_ITEM_TITLE,
            title,
            KEY_ITEM_TOTAL,
            KEY_ITEM_OFFSET,
        )?));
    }

    if dict.contains(KEY_FONT_FEED) {
        emit(InboundEvent::Layout(LayoutBundle {
            feed_font: field(dict, KEY_FONT_FEED)?,
            item_font: field(dict, KEY_FONT_ITEM)?,
            message_font: field(dict, KEY_FONT_MESSAGE)?,
            row_height: field(dict, KEY_ROW_HEIGHT)?,
        }));
    }

    if dict.contains(KEY_REFRESH) {
        emit(InboundEvent::RefreshNotice);
    }

    if dict.contains(KEY_IMAGE_WIDTH) {
        emit(InboundEvent::ImageHeader(ImageHeader {
            width: field(dict, KEY_IMAGE_WIDTH)?,
            height: field(dict, KEY_IMAGE_HEIGHT)?,
            bytes_per_row: field(dict, KEY_IMAGE_ROW_BYTES)?,
        }));
    }

    if let Some(data) = dict.find(KEY_CHUNK_DATA) {
        emit(InboundEvent::Chunk(TransferChunk {
            offset: field(dict, KEY_CHUNK_OFFSET)?,
            length: field(dict, KEY_CHUNK_LENGTH)?,
            total: field(dict, KEY_CHUNK_TOTAL)?,
            data: data.as_bytes().ok_or(DecodeError::BadField(KEY_CHUNK_DATA))?,
        }));
    }

    if dict.contains(KEY_THUMBNAIL) {
        let flag: u32 = field(dict, KEY_THUMBNAIL)?;
        emit(InboundEvent::ThumbnailFlag(flag != 0));
    }

    Ok(events)
}

/// Validate `data` as a dictionary and decode it
pub fn decode_bytes(data: &[u8]) -> Result<InboundEvents<'_>, DecodeError> {
    let dict = DictReader::new(data)?;
    decode(&dict)
}

fn list_entry<'a>(
    dict: &DictReader<'a>,
    title_key: u32,
    title: TupleValue<'a>,
    total_key: u32,
    offset_key: u32,
) -> Result<ListEntry<'a>, DecodeError> {
    Ok(ListEntry {
        offset: field(dict, offset_key)?,
        total: field(dict, total_key)?,
        title: title
            .as_text_bytes()
            .ok_or(DecodeError::BadField(title_key))?,
    })
}

/// Read an integer field and narrow it to `T`
fn field<T: TryFrom<u32>>(dict: &DictReader<'_>, key: u32) -> Result<T, DecodeError> {
    let value = dict.find(key).ok_or(DecodeError::MissingField(key))?;
    value
        .as_uint()
        .and_then(|v| T::try_from(v).ok())
        .ok_or(DecodeError::BadField(key))
}
