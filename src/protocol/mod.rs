//! Protocol Module
//!
//! The Skyhash codec: query encoding and incremental response parsing.
//!
//! ## Query Format
//! ```text
//! ┌──────────┬──────────┬──────────────────────────────────┐
//! │ *1\n     │ ~<N>\n   │ <len>\n<arg>\n  (repeated N times) │
//! └──────────┴──────────┴──────────────────────────────────┘
//! ```
//!
//! ## Response Format
//! ```text
//! ┌──────────┬──────────────────────────────────────────────┐
//! │ *1\n     │ <tsymbol><size>\n<payload>\n                 │
//! └──────────┴──────────────────────────────────────────────┘
//! ```
//!
//! ### Type Symbols
//! - `+`: string            - `?`: binary string
//! - `:`: unsigned integer  - `!`: response code
//! - `&`: recursive array   - `@`: typed array (`@+`, `@?`)
//! - `~` / `_`: flat array count prefix
//!
//! Only single-datagroup responses are decoded.

mod element;
mod parser;
mod query;
mod respcode;
mod response;
pub mod symbols;

pub use element::{ArrayType, Element, ElementType, FlatArray};
pub use parser::{parse, ParseError, Parser, MAX_DEPTH};
pub use query::{write_to_async, Pipeline, Query, QueryWriter};
pub use respcode::{RespCode, ResponseCode};
pub use response::Response;
