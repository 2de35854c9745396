//! Response code definitions
//!
//! The server answers many actions with a bare status code. Known codes map
//! onto [`RespCode`]; anything else is kept verbatim as an error message.

use std::fmt;

/// Fixed response codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RespCode {
    /// The action succeeded and carries no data
    Okay = 0,
    /// No value exists for the key
    NotFound = 1,
    /// The key already exists
    OverwriteError = 2,
    /// The action did not expect these arguments
    ActionError = 3,
    /// The packet contained invalid data
    PacketError = 4,
    /// The server failed internally
    ServerError = 5,
    /// Some other error; the server usually sends its description instead
    OtherError = 6,
    /// The value has the wrong type for this action
    WrongType = 7,
}

impl RespCode {
    const ALL: [RespCode; 8] = [
        RespCode::Okay,
        RespCode::NotFound,
        RespCode::OverwriteError,
        RespCode::ActionError,
        RespCode::PacketError,
        RespCode::ServerError,
        RespCode::OtherError,
        RespCode::WrongType,
    ];

    /// Look up a code by its wire value
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }

    /// Look up a code by its exact (case-sensitive) name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|code| code.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            RespCode::Okay => "Okay",
            RespCode::NotFound => "NotFound",
            RespCode::OverwriteError => "OverwriteError",
            RespCode::ActionError => "ActionError",
            RespCode::PacketError => "PacketError",
            RespCode::ServerError => "ServerError",
            RespCode::OtherError => "OtherError",
            RespCode::WrongType => "WrongType",
        }
    }
}

impl fmt::Display for RespCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A decoded response code element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseCode {
    /// One of the fixed codes
    Code(RespCode),

    /// Free-text error from the server, kept verbatim
    OtherError(String),
}

impl ResponseCode {
    /// Classify the payload of a `!` frame
    ///
    /// Matches a code name (`Okay`) or its decimal value (`0`); anything else
    /// becomes [`ResponseCode::OtherError`].
    pub fn classify(text: &str) -> Self {
        let known = RespCode::from_name(text).or_else(|| {
            if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
                text.parse::<u8>().ok().and_then(RespCode::from_u8)
            } else {
                None
            }
        });

        match known {
            Some(code) => ResponseCode::Code(code),
            None => ResponseCode::OtherError(text.to_string()),
        }
    }

    /// The fixed code; free-text errors report [`RespCode::OtherError`]
    pub fn code(&self) -> RespCode {
        match self {
            ResponseCode::Code(code) => *code,
            ResponseCode::OtherError(_) => RespCode::OtherError,
        }
    }

    /// Server message for free-text errors
    pub fn error_message(&self) -> Option<&str> {
        match self {
            ResponseCode::Code(_) => None,
            ResponseCode::OtherError(message) => Some(message),
        }
    }

    pub fn is_okay(&self) -> bool {
        matches!(self, ResponseCode::Code(RespCode::Okay))
    }
}

impl From<RespCode> for ResponseCode {
    fn from(code: RespCode) -> Self {
        ResponseCode::Code(code)
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseCode::Code(code) => write!(f, "{}", code),
            ResponseCode::OtherError(message) => {
                write!(f, "{}({})", RespCode::OtherError, message)
            }
        }
    }
}
