//! Query and pipeline encoding
//!
//! ## Single query
//! ```text
//! *1\n              metaframe: one datagroup
//! ~<N>\n            dataframe: N arguments follow
//! <len>\n<arg>\n    each argument, length in bytes
//! ```
//!
//! ## Pipeline
//! ```text
//! *<Q>\n            metaframe: Q datagroups
//! ~<N>\n...         Q dataframes back to back, no per-query metaframe
//! ```

use std::fmt::Write as _;
use std::io::{self, Write};

use bytes::{BufMut, Bytes, BytesMut};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use super::symbols::{DATAFRAME, HEADER, LINEFEED};
use crate::value::ValueCodec;

/// Anything that can be serialized as one Skyhash packet
pub trait QueryWriter {
    /// Append the complete packet to `buf`
    fn encode_into(&self, buf: &mut BytesMut);

    /// Exact packet size in bytes
    fn encoded_len(&self) -> usize;

    /// The complete packet
    fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        self.encode_into(&mut buf);
        buf.freeze()
    }

    /// Write the packet with a single `write_all`
    fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.to_bytes())?;
        writer.flush()
    }
}

/// Write a packet to an async sink with a single `write_all`
///
/// Produces exactly the bytes of [`QueryWriter::write_to`].
pub async fn write_to_async<Q, W>(packet: &Q, writer: &mut W) -> io::Result<()>
where
    Q: QueryWriter + ?Sized,
    W: AsyncWrite + Unpin + ?Sized,
{
    let bytes = packet.to_bytes();
    writer.write_all(&bytes).await?;
    writer.flush().await
}

/// Number of bytes in the decimal form of `n`
fn decimal_len(mut n: usize) -> usize {
    let mut len = 1;
    while n >= 10 {
        n /= 10;
        len += 1;
    }
    len
}

fn put_decimal_line(buf: &mut BytesMut, n: usize) {
    // Writing into BytesMut grows it as needed and cannot fail
    let _ = write!(buf, "{}", n);
    buf.put_u8(LINEFEED);
}

// =============================================================================
// Query
// =============================================================================

/// A single query: an ordered list of arguments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    argument_count: usize,
    /// Length-prefixed arguments, already framed
    holding_buffer: BytesMut,
}

impl Query {
    /// Create an empty query
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a query from a list of arguments
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        args.into_iter().collect()
    }

    /// Append a text argument
    pub fn push(&mut self, argument: impl AsRef<str>) {
        self.push_bytes(argument.as_ref().as_bytes());
    }

    /// Append a raw argument; no validation on content
    pub fn push_bytes(&mut self, argument: &[u8]) {
        self.holding_buffer
            .reserve(decimal_len(argument.len()) + argument.len() + 2);
        put_decimal_line(&mut self.holding_buffer, argument.len());
        self.holding_buffer.put_slice(argument);
        self.holding_buffer.put_u8(LINEFEED);
        self.argument_count += 1;
    }

    /// Builder form of [`Query::push`]
    pub fn arg(mut self, argument: impl AsRef<str>) -> Self {
        self.push(argument);
        self
    }

    /// Append an application value through a codec
    pub fn push_value<T, C>(&mut self, codec: &C, value: &T) -> crate::Result<()>
    where
        C: ValueCodec<T> + ?Sized,
    {
        let encoded = codec.encode(value)?;
        self.push_bytes(&encoded);
        Ok(())
    }

    pub fn argument_count(&self) -> usize {
        self.argument_count
    }

    pub fn is_empty(&self) -> bool {
        self.argument_count == 0
    }

    /// Size of the dataframe (`~<N>\n` plus arguments)
    fn dataframe_len(&self) -> usize {
        1 + decimal_len(self.argument_count) + 1 + self.holding_buffer.len()
    }

    /// Append the dataframe without a metaframe
    fn encode_dataframe_into(&self, buf: &mut BytesMut) {
        buf.put_u8(DATAFRAME);
        put_decimal_line(buf, self.argument_count);
        buf.put_slice(&self.holding_buffer);
    }

    /// Write the query to a stream asynchronously
    pub async fn write_to_async<W>(&self, writer: &mut W) -> io::Result<()>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        write_to_async(self, writer).await
    }
}

impl QueryWriter for Query {
    fn encode_into(&self, buf: &mut BytesMut) {
        buf.reserve(self.encoded_len());
        buf.put_slice(&[HEADER, b'1', LINEFEED]);
        self.encode_dataframe_into(buf);
    }

    fn encoded_len(&self) -> usize {
        3 + self.dataframe_len()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Query {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut query = Query::new();
        for argument in iter {
            query.push(argument);
        }
        query
    }
}

impl<S: AsRef<str>> Extend<S> for Query {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for argument in iter {
            self.push(argument);
        }
    }
}

// =============================================================================
// Pipeline
// =============================================================================

/// Several queries sent in one round trip
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pipeline {
    query_count: usize,
    /// Concatenated dataframes
    chain: BytesMut,
}

impl Pipeline {
    /// Create an empty pipeline
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a query (builder pattern)
    pub fn add(mut self, query: &Query) -> Self {
        self.push(query);
        self
    }

    /// Append a query
    pub fn push(&mut self, query: &Query) {
        self.chain.reserve(query.dataframe_len());
        query.encode_dataframe_into(&mut self.chain);
        self.query_count += 1;
    }

    /// Number of queries in the pipeline
    pub fn len(&self) -> usize {
        self.query_count
    }

    pub fn is_empty(&self) -> bool {
        self.query_count == 0
    }

    /// Write the pipeline to a stream asynchronously
    pub async fn write_to_async<W>(&self, writer: &mut W) -> io::Result<()>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        write_to_async(self, writer).await
    }
}

impl QueryWriter for Pipeline {
    fn encode_into(&self, buf: &mut BytesMut) {
        buf.reserve(self.encoded_len());
        buf.put_u8(HEADER);
        put_decimal_line(buf, self.query_count);
        buf.put_slice(&self.chain);
    }

    fn encoded_len(&self) -> usize {
        1 + decimal_len(self.query_count) + 1 + self.chain.len()
    }
}
