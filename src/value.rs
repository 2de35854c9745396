//! User value codecs
//!
//! Maps application types to query arguments and back from decoded
//! elements. Only `String` and `BinaryString` elements carry user values.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, SkyError};
use crate::protocol::{Element, Response};

/// Converts between an application type and its stored form
pub trait ValueCodec<T> {
    /// Encode `value` as a query argument
    fn encode(&self, value: &T) -> Result<Vec<u8>>;

    /// Decode `value` from a response element
    fn decode(&self, element: &Element) -> Result<T>;
}

/// Raw payload of a value-carrying element
fn payload(element: &Element) -> Result<&[u8]> {
    match element {
        Element::String(s) => Ok(s.as_bytes()),
        Element::BinaryString(bytes) => Ok(bytes),
        other => Err(SkyError::UnexpectedElement {
            expected: "String or BinaryString",
            found: other.element_type(),
        }),
    }
}

/// JSON text via serde_json
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl<T: Serialize + DeserializeOwned> ValueCodec<T> for JsonCodec {
    fn encode(&self, value: &T) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(value)?)
    }

    fn decode(&self, element: &Element) -> Result<T> {
        Ok(serde_json::from_slice(payload(element)?)?)
    }
}

/// Compact binary form via bincode
#[derive(Debug, Clone, Copy, Default)]
pub struct BincodeCodec;

impl<T: Serialize + DeserializeOwned> ValueCodec<T> for BincodeCodec {
    fn encode(&self, value: &T) -> Result<Vec<u8>> {
        Ok(bincode::serialize(value)?)
    }

    fn decode(&self, element: &Element) -> Result<T> {
        Ok(bincode::deserialize(payload(element)?)?)
    }
}

impl Element {
    /// Decode this element through a codec
    pub fn decode<T, C>(&self, codec: &C) -> Result<T>
    where
        C: ValueCodec<T> + ?Sized,
    {
        codec.decode(self)
    }
}

impl Response {
    /// Decode the root element through a codec
    pub fn decode<T, C>(&self, codec: &C) -> Result<T>
    where
        C: ValueCodec<T> + ?Sized,
    {
        codec.decode(self.element())
    }
}
