//! Blocking connection
//!
//! Drives one request/response exchange at a time over any `Read + Write`
//! stream.

use std::io::{ErrorKind, Read, Write};
use std::net::TcpStream;

use crate::config::ConnectionConfig;
use crate::error::{Result, SkyError};
use crate::protocol::{Pipeline, Query, QueryWriter, Response};

use super::buffer::ResponseWindow;

/// A blocking Skyhash connection
pub struct Connection<S = TcpStream> {
    /// Underlying byte stream
    stream: S,

    /// Unparsed response bytes
    window: ResponseWindow,

    /// Scratch space for each transport read
    read_chunk: Vec<u8>,

    /// Peer label for logging
    peer_addr: String,
}

impl Connection<TcpStream> {
    /// Open a TCP connection using the configured endpoint and socket options
    pub fn connect(config: &ConnectionConfig) -> Result<Self> {
        config.validate()?;

        let stream = TcpStream::connect(config.addr())?;
        stream.set_nodelay(config.nodelay)?;
        stream.set_read_timeout(config.read_timeout())?;
        stream.set_write_timeout(config.write_timeout())?;

        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| config.addr());
        tracing::debug!("Connected to {}", peer_addr);

        let mut conn = Self::new(stream, config);
        conn.peer_addr = peer_addr;
        Ok(conn)
    }
}

impl<S: Read + Write> Connection<S> {
    /// Wrap an already-open stream
    pub fn new(stream: S, config: &ConnectionConfig) -> Self {
        Self {
            stream,
            window: ResponseWindow::with_capacity(config.buffer_capacity),
            read_chunk: vec![0u8; config.read_chunk_size.max(1)],
            peer_addr: config.addr(),
        }
    }

    /// Send a query and wait for its response
    ///
    /// After a `DataTypeParseError` or `UnknownDataType` the bad packet stays
    /// buffered; call [`Connection::discard_buffered`] before the next query.
    pub fn run_query(&mut self, query: &Query) -> Result<Response> {
        self.send(query)?;
        self.read_response()
    }

    /// Send a pipeline
    ///
    /// Multi-datagroup responses are not decoded; a following
    /// [`Connection::read_response`] reports `ParseError::Unsupported`.
    pub fn write_pipeline(&mut self, pipeline: &Pipeline) -> Result<()> {
        self.send(pipeline)
    }

    /// Read until one complete response is buffered
    ///
    /// A zero-byte read is escalated as [`SkyError::ConnectionReset`].
    pub fn read_response(&mut self) -> Result<Response> {
        // A previous read may already hold the next response
        if !self.window.is_empty() {
            if let Some(response) = self.window.try_take_response()? {
                return Ok(response);
            }
        }

        loop {
            let read = match self.stream.read(&mut self.read_chunk) {
                Ok(n) => n,
                Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    tracing::warn!("Error reading from {}: {}", self.peer_addr, e);
                    return Err(e.into());
                }
            };

            if read == 0 {
                tracing::debug!("Connection reset by {}", self.peer_addr);
                return Err(SkyError::ConnectionReset);
            }

            self.window.extend(&self.read_chunk[..read]);
            tracing::trace!(
                read,
                buffered = self.window.len(),
                "Read from {}",
                self.peer_addr
            );

            if let Some(response) = self.window.try_take_response()? {
                return Ok(response);
            }
        }
    }

    fn send<Q: QueryWriter>(&mut self, packet: &Q) -> Result<()> {
        packet.write_to(&mut self.stream)?;
        tracing::trace!(bytes = packet.encoded_len(), "Wrote to {}", self.peer_addr);
        Ok(())
    }

    /// Bytes buffered but not yet consumed by a response
    pub fn buffered(&self) -> usize {
        self.window.len()
    }

    /// Drop every buffered byte
    ///
    /// Type errors (`DataTypeParseError`, `UnknownDataType`) keep the bad
    /// packet at the front of the window, so every later read fails the same
    /// way until the caller discards it.
    pub fn discard_buffered(&mut self) {
        tracing::debug!(
            discarded = self.window.len(),
            "Discarding buffered bytes from {}",
            self.peer_addr
        );
        self.window.clear();
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }

    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    /// Unwrap the underlying stream, discarding buffered bytes
    pub fn into_inner(self) -> S {
        self.stream
    }
}
