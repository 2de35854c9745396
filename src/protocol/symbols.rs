//! Skyhash type symbols
//!
//! Every frame starts with one of these bytes. The table here is the single
//! source of truth for the grammar; the encoder and the parser both use it.

/// Metaframe: `*<datagroup count>\n`
pub const HEADER: u8 = b'*';

/// Line terminator for every size line and payload
pub const LINEFEED: u8 = b'\n';

/// Dataframe count prefix: `~<count>\n`
pub const DATAFRAME: u8 = b'~';

/// Legacy dataframe count prefix, accepted when parsing
pub const LEGACY_DATAFRAME: u8 = b'_';

/// UTF-8 string
pub const STRING: u8 = b'+';

/// Unsigned 64-bit integer
pub const U64: u8 = b':';

/// Recursive array of elements
pub const ARRAY: u8 = b'&';

/// Response code
pub const RESPCODE: u8 = b'!';

/// Binary string
pub const BINARY_STRING: u8 = b'?';

/// Typed array, followed by the member type symbol
pub const TYPED_ARRAY: u8 = b'@';

/// A classified type symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TSymbol {
    Header,
    Dataframe,
    String,
    UnsignedInt,
    Array,
    RespCode,
    BinaryString,
    TypedArray,
}

impl TSymbol {
    /// Classify a byte; `None` for anything outside the grammar
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            HEADER => Some(TSymbol::Header),
            DATAFRAME | LEGACY_DATAFRAME => Some(TSymbol::Dataframe),
            STRING => Some(TSymbol::String),
            U64 => Some(TSymbol::UnsignedInt),
            ARRAY => Some(TSymbol::Array),
            RESPCODE => Some(TSymbol::RespCode),
            BINARY_STRING => Some(TSymbol::BinaryString),
            TYPED_ARRAY => Some(TSymbol::TypedArray),
            _ => None,
        }
    }

    /// The byte written for this symbol (`~` for dataframes)
    pub fn as_byte(self) -> u8 {
        match self {
            TSymbol::Header => HEADER,
            TSymbol::Dataframe => DATAFRAME,
            TSymbol::String => STRING,
            TSymbol::UnsignedInt => U64,
            TSymbol::Array => ARRAY,
            TSymbol::RespCode => RESPCODE,
            TSymbol::BinaryString => BINARY_STRING,
            TSymbol::TypedArray => TYPED_ARRAY,
        }
    }
}
