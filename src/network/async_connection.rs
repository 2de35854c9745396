//! Async connection
//!
//! The tokio twin of [`Connection`](super::Connection): same window, same
//! parse-and-retry loop, with reads and writes awaited.

use std::future::Future;
use std::io::{self, ErrorKind};
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};
use tokio::net::TcpStream;

use crate::config::ConnectionConfig;
use crate::error::{Result, SkyError};
use crate::protocol::{write_to_async, Pipeline, Query, QueryWriter, Response};

use super::buffer::ResponseWindow;

/// Run `op` under an optional deadline
async fn with_timeout<T, F>(limit: Option<Duration>, op: F) -> io::Result<T>
where
    F: Future<Output = io::Result<T>>,
{
    match limit {
        Some(limit) => tokio::time::timeout(limit, op)
            .await
            .map_err(|_| io::Error::new(ErrorKind::TimedOut, "operation timed out"))?,
        None => op.await,
    }
}

/// An asynchronous Skyhash connection
pub struct AsyncConnection<S = TcpStream> {
    stream: S,
    window: ResponseWindow,
    read_chunk: Vec<u8>,
    read_timeout: Option<Duration>,
    write_timeout: Option<Duration>,
    peer_addr: String,
}

impl AsyncConnection<TcpStream> {
    /// Open a TCP connection using the configured endpoint and socket options
    pub async fn connect(config: &ConnectionConfig) -> Result<Self> {
        config.validate()?;

        let stream = TcpStream::connect(config.addr()).await?;
        stream.set_nodelay(config.nodelay)?;

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

impl<S: AsyncRead + AsyncWrite + Unpin> AsyncConnection<S> {
    /// Wrap an already-open stream
    pub fn new(stream: S, config: &ConnectionConfig) -> Self {
        Self {
            stream,
            window: ResponseWindow::with_capacity(config.buffer_capacity),
            read_chunk: vec![0u8; config.read_chunk_size.max(1)],
            read_timeout: config.read_timeout(),
            write_timeout: config.write_timeout(),
            peer_addr: config.addr(),
        }
    }

    /// Send a query and wait for its response
    ///
    /// After a `DataTypeParseError` or `UnknownDataType` the bad packet stays
    /// buffered; call [`AsyncConnection::discard_buffered`] before the next query.
    pub async fn run_query(&mut self, query: &Query) -> Result<Response> {
        self.send(query).await?;
        self.read_response().await
    }

    /// Send a pipeline; see [`Connection::write_pipeline`](super::Connection::write_pipeline)
    pub async fn write_pipeline(&mut self, pipeline: &Pipeline) -> Result<()> {
        self.send(pipeline).await
    }

    /// Read until one complete response is buffered
    pub async fn read_response(&mut self) -> Result<Response> {
        // A previous read may already hold the next response
        if !self.window.is_empty() {
            if let Some(response) = self.window.try_take_response()? {
                return Ok(response);
            }
        }

        loop {
            let read = match with_timeout(
                self.read_timeout,
                self.stream.read(&mut self.read_chunk),
            )
            .await
            {
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

    async fn send<Q: QueryWriter>(&mut self, packet: &Q) -> Result<()> {
        with_timeout(self.write_timeout, write_to_async(packet, &mut self.stream)).await?;
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
