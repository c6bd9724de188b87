//! Key/value dictionary codec.
//!
//! Dictionary format:
//! - COUNT (1 byte): number of tuples
//! - per tuple:
//!   - KEY (4 bytes, little-endian): slot number
//!   - TYPE (1 byte): 0 = byte array, 1 = C string, 2 = unsigned int, 3 = signed int
//!   - LENGTH (2 bytes, little-endian): value length in bytes
//!   - VALUE (LENGTH bytes): integers are 1, 2 or 4 bytes little-endian;
//!     C strings include their NUL terminator
//!
//! The reader validates the whole dictionary once, then hands out
//! zero-copy views into the received payload.

/// Size of a tuple header (KEY + TYPE + LENGTH)
pub const TUPLE_HEADER_LEN: usize = 4 + 1 + 2;

const TYPE_BYTE_ARRAY: u8 = 0;
const TYPE_CSTRING: u8 = 1;
const TYPE_UINT: u8 = 2;
const TYPE_INT: u8 = 3;

/// Errors that can occur while reading or writing a dictionary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DictError {
    /// Data ended in the middle of a tuple
    Truncated,
    /// Tuple type byte is not one of the known types
    UnknownType(u8),
    /// Integer tuple with a width other than 1, 2 or 4 bytes
    BadIntWidth(u16),
    /// Output buffer is full
    Overflow,
    /// More than 255 tuples
    TooManyTuples,
}

/// A typed tuple value borrowed from the dictionary payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TupleValue<'a> {
    /// Raw byte array
    Bytes(&'a [u8]),
    /// C string bytes, terminator included
    CStr(&'a [u8]),
    /// Unsigned integer (zero-extended)
    UInt(u32),
    /// Signed integer (sign-extended)
    Int(i32),
}

impl<'a> TupleValue<'a> {
    /// Integer value, if this tuple holds a non-negative integer
    pub fn as_uint(&self) -> Option<u32> {
        match *self {
            TupleValue::UInt(v) => Some(v),
            TupleValue::Int(v) => u32::try_from(v).ok(),
            _ => None,
        }
    }

    /// Raw value bytes of a byte-array or string tuple
    pub fn as_bytes(&self) -> Option<&'a [u8]> {
        match *self {
            TupleValue::Bytes(b) | TupleValue::CStr(b) => Some(b),
            _ => None,
        }
    }

    /// Text bytes of a byte-array or string tuple, cut at the first NUL
    pub fn as_text_bytes(&self) -> Option<&'a [u8]> {
        self.as_bytes().map(|b| {
            let end = b.iter().position(|&c| c == 0).unwrap_or(b.len());
            &b[..end]
        })
    }
}

/// One key/value pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tuple<'a> {
    /// Slot number
    pub key: u32,
    /// Typed value
    pub value: TupleValue<'a>,
}

/// Validated, zero-copy view over a received dictionary
#[derive(Debug, Clone, Copy)]
pub struct DictReader<'a> {
    tuples: &'a [u8],
    count: u8,
}

impl<'a> DictReader<'a> {
    /// Validate `data` as a dictionary
    ///
    /// Trailing bytes after the last tuple are ignored.
    pub fn new(data: &'a [u8]) -> Result<Self, DictError> {
        let (&count, tuples) = data.split_first().ok_or(DictError::Truncated)?;

        let mut rest = tuples;
        for _ in 0..count {
            let (_, next) = parse_tuple(rest)?;
            rest = next;
        }

        Ok(Self { tuples, count })
    }

    /// Number of tuples
    pub fn len(&self) -> usize {
        usize::from(self.count)
    }

    /// Check if the dictionary has no tuples
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterate over all tuples in wire order
    pub fn iter(&self) -> TupleIter<'a> {
        TupleIter {
            rest: self.tuples,
            remaining: self.count,
        }
    }

    /// Look up the value stored under `key`
    pub fn find(&self, key: u32) -> Option<TupleValue<'a>> {
        self.iter().find(|t| t.key == key).map(|t| t.value)
    }

    /// Check if `key` is present
    pub fn contains(&self, key: u32) -> bool {
        self.find(key).is_some()
    }
}

/// Iterator over the tuples of a validated dictionary
#[derive(Debug, Clone)]
pub struct TupleIter<'a> {
    rest: &'a [u8],
    remaining: u8,
}

impl<'a> Iterator for TupleIter<'a> {
    type Item = Tuple<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        // Already validated by DictReader::new
        let (tuple, rest) = parse_tuple(self.rest).ok()?;
        self.rest = rest;
        self.remaining -= 1;
        Some(tuple)
    }
}

/// Parse one tuple, returning it together with the remaining bytes
fn parse_tuple(data: &[u8]) -> Result<(Tuple<'_>, &[u8]), DictError> {
    if data.len() < TUPLE_HEADER_LEN {
        return Err(DictError::Truncated);
    }

    let key = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
    let ty = data[4];
    let length = u16::from_le_bytes([data[5], data[6]]);

    let end = TUPLE_HEADER_LEN + usize::from(length);
    if data.len() < end {
        return Err(DictError::Truncated);
    }
    let raw = &data[TUPLE_HEADER_LEN..end];

    let value = match ty {
        TYPE_BYTE_ARRAY => TupleValue::Bytes(raw),
        TYPE_CSTRING => TupleValue::CStr(raw),
        TYPE_UINT => TupleValue::UInt(read_uint(raw)?),
        TYPE_INT => TupleValue::Int(read_int(raw)?),
        other => return Err(DictError::UnknownType(other)),
    };

    Ok((Tuple { key, value }, &data[end..]))
}

fn read_uint(raw: &[u8]) -> Result<u32, DictError> {
    match *raw {
        [a] => Ok(u32::from(a)),
        [a, b] => Ok(u32::from(u16::from_le_bytes([a, b]))),
        [a, b, c, d] => Ok(u32::from_le_bytes([a, b, c, d])),
        _ => Err(DictError::BadIntWidth(raw.len() as u16)),
    }
}

fn read_int(raw: &[u8]) -> Result<i32, DictError> {
    match *raw {
        [a] => Ok(i32::from(a as i8)),
        [a, b] => Ok(i32::from(i16::from_le_bytes([a, b]))),
        [a, b, c, d] => Ok(i32::from_le_bytes([a, b, c, d])),
        _ => Err(DictError::BadIntWidth(raw.len() as u16)),
    }
}

/// Builds a dictionary into a caller-supplied buffer
#[derive(Debug)]
pub struct DictWriter<'b> {
    buf: &'b mut [u8],
    len: usize,
    count: u8,
}

impl<'b> DictWriter<'b> {
    /// Start an empty dictionary in `buf`
    pub fn new(buf: &'b mut [u8]) -> Result<Self, DictError> {
        let first = buf.first_mut().ok_or(DictError::Overflow)?;
        *first = 0;
        Ok(Self {
            buf,
            len: 1,
            count: 0,
        })
    }

    /// Append an unsigned 8-bit integer
    pub fn write_u8(&mut self, key: u32, value: u8) -> Result<(), DictError> {
        self.push(key, TYPE_UINT, &[&[value]])
    }

    /// Append an unsigned 16-bit integer
    pub fn write_u16(&mut self, key: u32, value: u16) -> Result<(), DictError> {
        self.push(key, TYPE_UINT, &[&value.to_le_bytes()])
    }

    /// Append an unsigned 32-bit integer
    pub fn write_u32(&mut self, key: u32, value: u32) -> Result<(), DictError> {
        self.push(key, TYPE_UINT, &[&value.to_le_bytes()])
    }

    /// Append a signed 32-bit integer
    pub fn write_i32(&mut self, key: u32, value: i32) -> Result<(), DictError> {
        self.push(key, TYPE_INT, &[&value.to_le_bytes()])
    }

    /// Append a raw byte array
    pub fn write_bytes(&mut self, key: u32, value: &[u8]) -> Result<(), DictError> {
        self.push(key, TYPE_BYTE_ARRAY, &[value])
    }

    /// Append a NUL-terminated string
    pub fn write_cstr(&mut self, key: u32, value: &str) -> Result<(), DictError> {
        self.push(key, TYPE_CSTRING, &[value.as_bytes(), &[0]])
    }

    /// Encoded dictionary bytes so far
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Finish the dictionary, returning its encoded length
    pub fn finish(self) -> usize {
        self.len
    }

    fn push(&mut self, key: u32, ty: u8, parts: &[&[u8]]) -> Result<(), DictError> {
        if self.count == u8::MAX {
            return Err(DictError::TooManyTuples);
        }

        let value_len: usize = parts.iter().map(|p| p.len()).sum();
        let length = u16::try_from(value_len).map_err(|_| DictError::Overflow)?;
        let end = self.len + TUPLE_HEADER_LEN + value_len;
        if end > self.buf.len() {
            return Err(DictError::Overflow);
        }

        let header = &mut self.buf[self.len..self.len + TUPLE_HEADER_LEN];
        header[..4].copy_from_slice(&key.to_le_bytes());
        header[4] = ty;
        header[5..].copy_from_slice(&length.to_le_bytes());

        let mut at = self.len + TUPLE_HEADER_LEN;
        for part in parts {
            self.buf[at..at + part.len()].copy_from_slice(part);
            at += part.len();
        }

        self.len = end;
        self.count += 1;
        self.buf[0] = self.count;
        Ok(())
    }
}
