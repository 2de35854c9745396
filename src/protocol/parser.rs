//! Response parser
//!
//! Decodes exactly one top-level response from the front of a buffer and
//! reports how many bytes it consumed. The parser borrows the buffer for the
//! duration of the call and performs no I/O; the caller owns the window and
//! trims it by the consumed count.
//!
//! ## Framing
//! ```text
//! *1\n                       metaframe
//! <tsymbol><size>\n          element header
//! <size bytes>\n             payload (strings, integers, codes)
//! ```
//!
//! Arrays (`&`) carry `<count>` in place of `<size>` and nest elements.
//! Typed arrays (`@+`, `@?`) carry `<count>` and then bare
//! `<size>\n<bytes>\n` members.
//!
//! ## Restarting
//! A [`ParseError::NotEnough`] result leaves nothing behind: feed more bytes
//! and call [`parse`] again over the whole window from its first byte.

use super::element::{Element, FlatArray};
use super::respcode::ResponseCode;
use super::response::Response;
use super::symbols::{TSymbol, BINARY_STRING, HEADER, LINEFEED, STRING};

/// Parse outcomes other than success
///
/// Only [`ParseError::NotEnough`] is retryable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ParseError {
    /// The buffer is a valid prefix of a larger packet
    #[error("not enough data")]
    NotEnough,

    /// A framing byte did not match the grammar
    #[error("unexpected byte")]
    UnexpectedByte,

    /// Well-framed but invalid packet, such as a zero datagroup count
    #[error("bad packet")]
    BadPacket,

    /// A size or integer field held non-digits or overflowed
    #[error("failed to parse data type")]
    DataTypeParseError,

    /// A type symbol outside the grammar
    #[error("unknown data type")]
    UnknownDataType,

    /// No bytes to parse
    #[error("empty buffer")]
    Empty,

    /// Multi-datagroup (pipelined) responses are not decoded
    #[error("unsupported: response with {0} datagroups")]
    Unsupported(usize),

    /// Recursive arrays nest deeper than [`MAX_DEPTH`]
    #[error("nesting too deep: more than {0} levels")]
    TooDeep(usize),
}

impl ParseError {
    /// Returns true if more bytes may complete the packet
    #[inline]
    pub fn is_not_enough(&self) -> bool {
        matches!(self, ParseError::NotEnough)
    }

    /// Returns true if the buffered bytes should be kept after this error
    ///
    /// Framing failures poison the window; type failures leave its framing
    /// intact up to the bad field.
    #[inline]
    pub fn retains_buffer(&self) -> bool {
        matches!(
            self,
            ParseError::NotEnough | ParseError::DataTypeParseError | ParseError::UnknownDataType
        )
    }
}

type ParseResult<T> = std::result::Result<T, ParseError>;

/// Maximum nesting depth of recursive arrays in one response
///
/// The root element sits at depth 0.
pub const MAX_DEPTH: usize = 128;

/// Parse one response from the start of `buffer`
///
/// Returns the response and the number of bytes consumed.
#[inline]
pub fn parse(buffer: &[u8]) -> ParseResult<(Response, usize)> {
    Parser::new(buffer).parse()
}

/// Cursor over a borrowed buffer
#[derive(Debug)]
pub struct Parser<'a> {
    buffer: &'a [u8],
    cursor: usize,
}

impl<'a> Parser<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, cursor: 0 }
    }

    /// Decode one response
    pub fn parse(mut self) -> ParseResult<(Response, usize)> {
        match self.parse_metaframe_get_datagroup_count()? {
            0 => Err(ParseError::BadPacket),
            1 => {
                let element = self.parse_next_element(0)?;
                // Either the window ends here or the next packet begins
                match self.peek() {
                    None | Some(HEADER) => Ok((Response::new(element), self.cursor)),
                    Some(_) => Err(ParseError::UnexpectedByte),
                }
            }
            count => Err(ParseError::Unsupported(count)),
        }
    }

    // =========================================================================
    // Cursor primitives
    // =========================================================================

    fn remaining(&self) -> usize {
        self.buffer.len() - self.cursor
    }

    fn peek(&self) -> Option<u8> {
        self.buffer.get(self.cursor).copied()
    }

    fn next_byte(&mut self) -> ParseResult<u8> {
        let byte = self.peek().ok_or(ParseError::NotEnough)?;
        self.cursor += 1;
        Ok(byte)
    }

    /// Read up to the next linefeed, returning the line without it
    fn read_line(&mut self) -> ParseResult<&'a [u8]> {
        let rest = &self.buffer[self.cursor..];
        let end = memchr::memchr(LINEFEED, rest).ok_or(ParseError::NotEnough)?;
        self.cursor += end + 1;
        Ok(&rest[..end])
    }

    fn read_exact(&mut self, len: usize) -> ParseResult<&'a [u8]> {
        if self.remaining() < len {
            return Err(ParseError::NotEnough);
        }
        let chunk = &self.buffer[self.cursor..self.cursor + len];
        self.cursor += len;
        Ok(chunk)
    }

    fn expect_linefeed(&mut self) -> ParseResult<()> {
        match self.next_byte()? {
            LINEFEED => Ok(()),
            _ => Err(ParseError::UnexpectedByte),
        }
    }

    /// `<size>\n`
    fn read_size_line(&mut self) -> ParseResult<usize> {
        let line = self.read_line()?;
        parse_size(line)
    }

    /// `<size>\n<size bytes>\n`
    fn read_sized_chunk(&mut self) -> ParseResult<&'a [u8]> {
        let size = self.read_size_line()?;
        let chunk = self.read_exact(size)?;
        self.expect_linefeed()?;
        Ok(chunk)
    }

    /// Capacity hint that untrusted counts cannot blow up
    fn capacity_for(&self, count: usize) -> usize {
        count.min(self.remaining())
    }

    // =========================================================================
    // Frames
    // =========================================================================

    /// `*<n>\n`, returning the datagroup count
    fn parse_metaframe_get_datagroup_count(&mut self) -> ParseResult<usize> {
        match self.peek() {
            None => return Err(ParseError::Empty),
            Some(HEADER) => {}
            Some(_) => return Err(ParseError::UnexpectedByte),
        }
        let line = self.read_line()?;
        parse_size(&line[1..])
    }

    fn parse_next_element(&mut self, depth: usize) -> ParseResult<Element> {
        let tsymbol = self.next_byte()?;
        match TSymbol::from_byte(tsymbol) {
            Some(TSymbol::String) => self.parse_next_string().map(Element::String),
            Some(TSymbol::UnsignedInt) => self.parse_next_u64().map(Element::UnsignedInt),
            Some(TSymbol::Array) => self.parse_next_array(depth).map(Element::Array),
            Some(TSymbol::RespCode) => self.parse_next_respcode().map(Element::RespCode),
            Some(TSymbol::BinaryString) => {
                self.parse_next_binary_string().map(Element::BinaryString)
            }
            Some(TSymbol::TypedArray) => self.parse_next_typed_array().map(Element::FlatArray),
            Some(TSymbol::Dataframe) => self
                .parse_next_legacy_flat_array()
                .map(|items| Element::FlatArray(FlatArray::Str(items))),
            // A metaframe cannot start inside a datagroup
            Some(TSymbol::Header) => Err(ParseError::UnexpectedByte),
            None => Err(ParseError::UnknownDataType),
        }
    }

    fn parse_next_string(&mut self) -> ParseResult<String> {
        let chunk = self.read_sized_chunk()?;
        to_utf8(chunk)
    }

    fn parse_next_binary_string(&mut self) -> ParseResult<Vec<u8>> {
        self.read_sized_chunk().map(<[u8]>::to_vec)
    }

    /// `:<len>\n<digits>\n`
    fn parse_next_u64(&mut self) -> ParseResult<u64> {
        let chunk = self.read_sized_chunk()?;
        parse_u64(chunk)
    }

    fn parse_next_respcode(&mut self) -> ParseResult<ResponseCode> {
        let chunk = self.read_sized_chunk()?;
        let text = std::str::from_utf8(chunk).map_err(|_| ParseError::DataTypeParseError)?;
        Ok(ResponseCode::classify(text))
    }

    /// `&<count>\n` followed by `count` elements of any type
    fn parse_next_array(&mut self, depth: usize) -> ParseResult<Vec<Element>> {
        if depth >= MAX_DEPTH {
            return Err(ParseError::TooDeep(MAX_DEPTH));
        }
        let count = self.read_size_line()?;
        let mut elements = Vec::with_capacity(self.capacity_for(count));
        for _ in 0..count {
            elements.push(self.parse_next_element(depth + 1)?);
        }
        Ok(elements)
    }

    /// `@<tsymbol><count>\n` followed by `count` bare members
    fn parse_next_typed_array(&mut self) -> ParseResult<FlatArray> {
        match self.next_byte()? {
            STRING => {
                let count = self.read_size_line()?;
                let mut items = Vec::with_capacity(self.capacity_for(count));
                for _ in 0..count {
                    let chunk = self.read_sized_chunk()?;
                    items.push(to_utf8(chunk)?);
                }
                Ok(FlatArray::Str(items))
            }
            BINARY_STRING => {
                let count = self.read_size_line()?;
                let mut items = Vec::with_capacity(self.capacity_for(count));
                for _ in 0..count {
                    items.push(self.read_sized_chunk()?.to_vec());
                }
                Ok(FlatArray::Binary(items))
            }
            _ => Err(ParseError::UnknownDataType),
        }
    }

    /// `~<count>\n` (or `_`) followed by `count` members that each carry `+`
    fn parse_next_legacy_flat_array(&mut self) -> ParseResult<Vec<String>> {
        let count = self.read_size_line()?;
        let mut items = Vec::with_capacity(self.capacity_for(count));
        for _ in 0..count {
            if self.next_byte()? != STRING {
                return Err(ParseError::UnknownDataType);
            }
            items.push(self.parse_next_string()?);
        }
        Ok(items)
    }
}

fn to_utf8(chunk: &[u8]) -> ParseResult<String> {
    String::from_utf8(chunk.to_vec()).map_err(|_| ParseError::DataTypeParseError)
}

/// Parse a size field
///
/// Sizes are bounded by `u32`; an empty field, a non-digit or an overflow
/// is a [`ParseError::DataTypeParseError`].
pub(crate) fn parse_size(bytes: &[u8]) -> ParseResult<usize> {
    if bytes.is_empty() {
        return Err(ParseError::DataTypeParseError);
    }
    let mut size: u32 = 0;
    for &digit in bytes {
        if !digit.is_ascii_digit() {
            return Err(ParseError::DataTypeParseError);
        }
        size = size
            .checked_mul(10)
            .and_then(|s| s.checked_add(u32::from(digit - b'0')))
            .ok_or(ParseError::DataTypeParseError)?;
    }
    usize::try_from(size).map_err(|_| ParseError::DataTypeParseError)
}

/// Parse the digits of an unsigned 64-bit integer payload
pub(crate) fn parse_u64(bytes: &[u8]) -> ParseResult<u64> {
    if bytes.is_empty() {
        return Err(ParseError::DataTypeParseError);
    }
    let mut value: u64 = 0;
    for &digit in bytes {
        if !digit.is_ascii_digit() {
            return Err(ParseError::DataTypeParseError);
        }
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(digit - b'0')))
            .ok_or(ParseError::DataTypeParseError)?;
    }
    Ok(value)
}
