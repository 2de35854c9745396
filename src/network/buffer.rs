//! Response window
//!
//! Sliding buffer shared by both connection drivers. Bytes read from the
//! transport are appended; each parse attempt starts from the front; a
//! successful parse trims the consumed prefix.

use bytes::{Buf, BytesMut};

use crate::error::Result;
use crate::protocol::{parse, ParseError, Response};

/// What happens to the window after a parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferAction {
    /// Read more bytes and parse again from the start
    Retry,
    /// Keep the bytes; the framing was sound up to the bad field
    Retain,
    /// Drop everything buffered
    Clear,
}

impl BufferAction {
    pub fn for_error(error: &ParseError) -> Self {
        match error {
            ParseError::NotEnough => BufferAction::Retry,
            ParseError::DataTypeParseError | ParseError::UnknownDataType => BufferAction::Retain,
            ParseError::UnexpectedByte
            | ParseError::BadPacket
            | ParseError::Empty
            | ParseError::Unsupported(_)
            | ParseError::TooDeep(_) => BufferAction::Clear,
        }
    }
}

/// Caller-owned buffer of unparsed response bytes
#[derive(Debug, Default)]
pub struct ResponseWindow {
    buffer: BytesMut,
}

impl ResponseWindow {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(capacity),
        }
    }

    /// Append freshly read bytes
    pub fn extend(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Try to take one complete response from the front of the window
    ///
    /// `Ok(None)` means more bytes are needed. Terminal errors apply the
    /// buffer policy for their kind before being returned.
    pub fn try_take_response(&mut self) -> Result<Option<Response>> {
        match parse(&self.buffer) {
            Ok((response, consumed)) => {
                self.buffer.advance(consumed);
                tracing::trace!(consumed, remaining = self.buffer.len(), "Parsed response");
                Ok(Some(response))
            }
            Err(error) => match BufferAction::for_error(&error) {
                BufferAction::Retry => {
                    tracing::debug!(buffered = self.buffer.len(), "Incomplete response, awaiting more bytes");
                    Ok(None)
                }
                BufferAction::Retain => {
                    tracing::warn!(buffered = self.buffer.len(), "Parse error ({}), retaining buffer", error);
                    Err(error.into())
                }
                BufferAction::Clear => {
                    tracing::warn!(buffered = self.buffer.len(), "Parse error ({}), clearing buffer", error);
                    self.buffer.clear();
                    Err(error.into())
                }
            },
        }
    }
}
