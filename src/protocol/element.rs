//! Element definitions
//!
//! A decoded value node of a response tree.

use std::fmt;

use super::respcode::ResponseCode;

/// Wire type of an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// Unicode string, `+`
    String,
    /// Unsigned 64-bit integer, `:`
    UnsignedInt,
    /// Recursive array, `&`
    Array,
    /// Response code, `!`
    RespCode,
    /// Non-recursive array, `@+`, `@?` or legacy `_`
    FlatArray,
    /// Binary string, `?`
    BinaryString,
}

impl ElementType {
    pub fn name(self) -> &'static str {
        match self {
            ElementType::String => "String",
            ElementType::UnsignedInt => "UnsignedInt",
            ElementType::Array => "Array",
            ElementType::RespCode => "RespCode",
            ElementType::FlatArray => "FlatArray",
            ElementType::BinaryString => "BinaryString",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Array flavours the protocol can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrayType {
    /// Members are any element, `&`
    Recursive,
    /// Members are unicode strings without their own symbol, `@+` (or legacy `_`)
    String,
    /// Members are binary strings without their own symbol, `@?`
    BinaryString,
}

/// Homogeneous, non-recursive array
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlatArray {
    Str(Vec<String>),
    Binary(Vec<Vec<u8>>),
}

impl FlatArray {
    pub fn len(&self) -> usize {
        match self {
            FlatArray::Str(items) => items.len(),
            FlatArray::Binary(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn array_type(&self) -> ArrayType {
        match self {
            FlatArray::Str(_) => ArrayType::String,
            FlatArray::Binary(_) => ArrayType::BinaryString,
        }
    }
}

/// One decoded value
///
/// Arrays own their children outright; trees never share nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    String(String),
    UnsignedInt(u64),
    Array(Vec<Element>),
    FlatArray(FlatArray),
    BinaryString(Vec<u8>),
    RespCode(ResponseCode),
}

impl Element {
    /// Get the element type
    pub fn element_type(&self) -> ElementType {
        match self {
            Element::String(_) => ElementType::String,
            Element::UnsignedInt(_) => ElementType::UnsignedInt,
            Element::Array(_) => ElementType::Array,
            Element::FlatArray(_) => ElementType::FlatArray,
            Element::BinaryString(_) => ElementType::BinaryString,
            Element::RespCode(_) => ElementType::RespCode,
        }
    }

    /// Array flavour, `None` for scalars
    pub fn array_type(&self) -> Option<ArrayType> {
        match self {
            Element::Array(_) => Some(ArrayType::Recursive),
            Element::FlatArray(flat) => Some(flat.array_type()),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Element::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Element::UnsignedInt(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Element]> {
        match self {
            Element::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_flat_array(&self) -> Option<&FlatArray> {
        match self {
            Element::FlatArray(flat) => Some(flat),
            _ => None,
        }
    }

    pub fn as_binary(&self) -> Option<&[u8]> {
        match self {
            Element::BinaryString(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn as_resp_code(&self) -> Option<&ResponseCode> {
        match self {
            Element::RespCode(code) => Some(code),
            _ => None,
        }
    }
}

fn join<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

/// Formats as `Type(Item)`, e.g. `String(hello)` or `BinaryString(1, 2, 3)`
impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.element_type())?;
        match self {
            Element::String(s) => f.write_str(s)?,
            Element::UnsignedInt(n) => write!(f, "{}", n)?,
            Element::Array(items) => join(f, items)?,
            Element::FlatArray(FlatArray::Str(items)) => join(f, items)?,
            Element::FlatArray(FlatArray::Binary(items)) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str("[")?;
                    join(f, item)?;
                    f.write_str("]")?;
                }
            }
            Element::BinaryString(bytes) => join(f, bytes)?,
            Element::RespCode(code) => write!(f, "{}", code)?,
        }
        f.write_str(")")
    }
}

impl From<String> for Element {
    fn from(s: String) -> Self {
        Element::String(s)
    }
}

impl From<&str> for Element {
    fn from(s: &str) -> Self {
        Element::String(s.to_string())
    }
}

impl From<u64> for Element {
    fn from(n: u64) -> Self {
        Element::UnsignedInt(n)
    }
}

impl From<Vec<u8>> for Element {
    fn from(bytes: Vec<u8>) -> Self {
        Element::BinaryString(bytes)
    }
}

impl From<ResponseCode> for Element {
    fn from(code: ResponseCode) -> Self {
        Element::RespCode(code)
    }
}
