//! Response definitions
//!
//! A complete server answer: exactly one root element.

use std::fmt;

use super::element::Element;
use super::respcode::ResponseCode;

/// A decoded server response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    element: Element,
}

impl Response {
    pub fn new(element: Element) -> Self {
        Self { element }
    }

    /// The root element
    pub fn element(&self) -> &Element {
        &self.element
    }

    pub fn into_element(self) -> Element {
        self.element
    }

    /// The response code, when the server answered with one
    pub fn resp_code(&self) -> Option<&ResponseCode> {
        self.element.as_resp_code()
    }

    /// True when the server answered with `Okay`
    pub fn is_okay(&self) -> bool {
        self.resp_code().is_some_and(ResponseCode::is_okay)
    }
}

impl From<Element> for Response {
    fn from(element: Element) -> Self {
        Self::new(element)
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Response(Element={})", self.element)
    }
}
