//! # Skyhash
//!
//! Client-side implementation of the Skyhash wire protocol:
//! - Query and pipeline encoding
//! - Incremental, cursor-based response parsing
//! - Blocking and async connection drivers that retry on partial data
//! - Pluggable user value codecs (JSON, bincode)
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Connection / AsyncConnection                 │
//! │            (read loop, zero-byte read = reset)               │
//! └──────────────┬──────────────────────────────┬───────────────┘
//!                │ write                        │ bytes
//!                ▼                              ▼
//!   ┌────────────────────────┐      ┌────────────────────────┐
//!   │    Query / Pipeline    │      │     ResponseWindow     │
//!   │       (encoder)        │      │   (sliding buffer)     │
//!   └────────────────────────┘      └───────────┬────────────┘
//!                                               │ parse(&[u8])
//!                                               ▼
//!                                   ┌────────────────────────┐
//!                                   │   Parser -> Response   │
//!                                   │   (Element tree)       │
//!                                   └────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use skyhash::protocol::{parse, Element, Query, QueryWriter};
//!
//! let query = Query::from_args(["GET", "TestKey"]);
//! assert_eq!(&query.to_bytes()[..], b"*1\n~2\n3\nGET\n7\nTestKey\n");
//!
//! let (response, consumed) = parse(b"*1\n+5\nhello\n").unwrap();
//! assert_eq!(response.element(), &Element::String("hello".into()));
//! assert_eq!(consumed, 12);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;

pub mod network;
pub mod protocol;
pub mod value;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use config::ConnectionConfig;
pub use error::{Result, SkyError};
pub use network::{AsyncConnection, Connection};
pub use protocol::{Element, ParseError, Pipeline, Query, QueryWriter, Response};
pub use value::{BincodeCodec, JsonCodec, ValueCodec};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
