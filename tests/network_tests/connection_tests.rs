//! Connection Tests
//!
//! Tests for the blocking driver over a scripted in-memory stream.

use std::collections::VecDeque;
use std::io::{self, Read, Write};

use skyhash::protocol::{Element, ParseError, Pipeline, Query, QueryWriter};
use skyhash::{Connection, ConnectionConfig, SkyError};

/// Stream that hands out pre-split reads and records every write
struct ScriptedStream {
    reads: VecDeque<Vec<u8>>,
    written: Vec<u8>,
}

impl ScriptedStream {
    fn new<I, C>(chunks: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: AsRef<[u8]>,
    {
        Self {
            reads: chunks.into_iter().map(|c| c.as_ref().to_vec()).collect(),
            written: Vec::new(),
        }
    }
}

impl Read for ScriptedStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let Some(mut chunk) = self.reads.pop_front() else {
            return Ok(0);
        };
        let n = chunk.len().min(buf.len());
        buf[..n].copy_from_slice(&chunk[..n]);
        if n < chunk.len() {
            self.reads.push_front(chunk.split_off(n));
        }
        Ok(n)
    }
}

impl Write for ScriptedStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn connection<I, C>(chunks: I) -> Connection<ScriptedStream>
where
    I: IntoIterator<Item = C>,
    C: AsRef<[u8]>,
{
    Connection::new(ScriptedStream::new(chunks), &ConnectionConfig::default())
}

// =============================================================================
// Exchange Tests
// =============================================================================

#[test]
fn test_run_query_writes_packet_and_reads_response() {
    let query = Query::from_args(["GET", "TestKey"]);
    let mut conn = connection([b"*1\n+5\nhello\n"]);

    let response = conn.run_query(&query).unwrap();
    assert_eq!(response.element(), &Element::String("hello".to_string()));
    assert_eq!(conn.get_ref().written, query.to_bytes().to_vec());
    assert_eq!(conn.buffered(), 0);
}

#[test]
fn test_response_split_across_reads() {
    let response = b"*1\n&2\n+5\nhello\n:3\n100\n";
    let chunks: Vec<&[u8]> = response.chunks(3).collect();
    let mut conn = connection(chunks);

    let parsed = conn.run_query(&Query::from_args(["MGET"])).unwrap();
    assert_eq!(
        parsed.into_element(),
        Element::Array(vec![
            Element::String("hello".to_string()),
            Element::UnsignedInt(100),
        ])
    );
}

#[test]
fn test_small_read_chunk() {
    let config = ConnectionConfig::builder().read_chunk_size(1).build();
    let stream = ScriptedStream::new([b"*1\n!4\nOkay\n"]);
    let mut conn = Connection::new(stream, &config);

    assert!(conn.run_query(&Query::from_args(["SET", "k", "v"])).unwrap().is_okay());
}

#[test]
fn test_leftover_bytes_stay_buffered() {
    let mut conn = connection([b"*1\n+1\na\n*1\n:1\n2\n"]);

    let first = conn.run_query(&Query::from_args(["GET", "a"])).unwrap();
    assert_eq!(first.element(), &Element::String("a".to_string()));
    assert_eq!(conn.buffered(), 8);

    // Served from the window without touching the exhausted stream
    let second = conn.read_response().unwrap();
    assert_eq!(second.element(), &Element::UnsignedInt(2));
    assert_eq!(conn.buffered(), 0);
}

#[test]
fn test_buffered_prefix_completed_by_next_read() {
    let mut conn = connection([&b"*1\n+1\na\n*1\n+3\nx"[..], &b"yz\n"[..]]);

    conn.run_query(&Query::from_args(["GET", "a"])).unwrap();
    assert_eq!(conn.buffered(), 7);

    let second = conn.read_response().unwrap();
    assert_eq!(second.element(), &Element::String("xyz".to_string()));
}

// =============================================================================
// Failure Tests
// =============================================================================

#[test]
fn test_zero_byte_read_is_connection_reset() {
    let mut conn = connection(Vec::<Vec<u8>>::new());
    let err = conn.run_query(&Query::from_args(["GET", "x"])).unwrap_err();
    assert!(matches!(err, SkyError::ConnectionReset));
}

#[test]
fn test_truncated_response_is_connection_reset() {
    let mut conn = connection([b"*1\n+5\nhel"]);
    let err = conn.read_response().unwrap_err();
    assert!(matches!(err, SkyError::ConnectionReset));
    assert_eq!(conn.buffered(), 9);
}

#[test]
fn test_framing_error_clears_buffer() {
    let mut conn = connection([b"#1\n+1\na\n"]);
    let err = conn.read_response().unwrap_err();
    assert_eq!(err.parse_error(), Some(&ParseError::UnexpectedByte));
    assert_eq!(conn.buffered(), 0);
}

#[test]
fn test_type_error_retains_buffer() {
    let mut conn = connection([b"*1\n:2\nab\n"]);
    let err = conn.read_response().unwrap_err();
    assert_eq!(err.parse_error(), Some(&ParseError::DataTypeParseError));
    assert_eq!(conn.buffered(), 9);
}

#[test]
fn test_type_error_repeats_until_discarded() {
    let mut conn = connection([&b"*1\n:2\nab\n"[..], &b"*1\n+2\nhi\n"[..]]);

    let err = conn.run_query(&Query::from_args(["GET", "n"])).unwrap_err();
    assert_eq!(err.parse_error(), Some(&ParseError::DataTypeParseError));

    // The bad packet still sits at the front; nothing new is read
    let err = conn.run_query(&Query::from_args(["GET", "s"])).unwrap_err();
    assert_eq!(err.parse_error(), Some(&ParseError::DataTypeParseError));
    assert_eq!(conn.buffered(), 9);

    conn.discard_buffered();
    assert_eq!(conn.buffered(), 0);

    let response = conn.read_response().unwrap();
    assert_eq!(response.element(), &Element::String("hi".to_string()));
}

#[test]
fn test_too_deep_response_clears_buffer() {
    let mut response = b"*1\n".to_vec();
    for _ in 0..10_000 {
        response.extend_from_slice(b"&1\n");
    }
    let mut conn = connection([response]);

    let err = conn.read_response().unwrap_err();
    assert!(matches!(err.parse_error(), Some(ParseError::TooDeep(_))));
    assert_eq!(conn.buffered(), 0);
}

#[test]
fn test_pipeline_response_is_unsupported() {
    let pipeline = Pipeline::new()
        .add(&Query::from_args(["SET", "a", "1"]))
        .add(&Query::from_args(["GET", "a"]));
    let mut conn = connection([b"*2\n!4\nOkay\n+1\n1\n"]);

    conn.write_pipeline(&pipeline).unwrap();
    assert_eq!(conn.get_ref().written, pipeline.to_bytes().to_vec());

    let err = conn.read_response().unwrap_err();
    assert_eq!(err.parse_error(), Some(&ParseError::Unsupported(2)));
    assert_eq!(conn.buffered(), 0);
}

#[test]
fn test_into_inner_returns_stream() {
    let mut conn = connection([b"*1\n:1\n0\n"]);
    conn.run_query(&Query::from_args(["DBSIZE"])).unwrap();
    let stream = conn.into_inner();
    assert!(stream.reads.is_empty());
    assert!(stream.written.starts_with(b"*1\n~1\n"));
}
