//! Network Module
//!
//! Connection drivers around the codec.
//!
//! ## Exchange
//! - Write the whole packet in one write
//! - Serve a response already sitting in the window
//! - Read a chunk, append it to the response window
//! - Parse the window from its start; on "not enough" read again
//! - A zero-byte read is a connection reset
//!
//! Terminal parse errors either clear or retain the window depending on
//! their kind (see [`BufferAction`]). A retained packet fails every later
//! read until the caller discards it.

mod async_connection;
mod buffer;
mod connection;

pub use async_connection::AsyncConnection;
pub use buffer::{BufferAction, ResponseWindow};
pub use connection::Connection;
