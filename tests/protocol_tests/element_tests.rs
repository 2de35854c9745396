//! Element Tests
//!
//! Tests for the decoded value model and its display forms.

use skyhash::protocol::{
    ArrayType, Element, ElementType, FlatArray, RespCode, Response, ResponseCode,
};

// =============================================================================
// Display Tests
// =============================================================================

#[test]
fn test_display_scalars() {
    assert_eq!(Element::from("hello").to_string(), "String(hello)");
    assert_eq!(Element::from(100u64).to_string(), "UnsignedInt(100)");
    assert_eq!(
        Element::from(vec![1u8, 2, 3]).to_string(),
        "BinaryString(1, 2, 3)"
    );
}

#[test]
fn test_display_resp_codes() {
    assert_eq!(
        Element::from(ResponseCode::from(RespCode::Okay)).to_string(),
        "RespCode(Okay)"
    );
    assert_eq!(
        Element::RespCode(ResponseCode::OtherError("bad key".to_string())).to_string(),
        "RespCode(OtherError(bad key))"
    );
}

#[test]
fn test_display_arrays() {
    let nested = Element::Array(vec![
        Element::from("a"),
        Element::Array(vec![Element::from(1u64)]),
    ]);
    assert_eq!(nested.to_string(), "Array(String(a), Array(UnsignedInt(1)))");

    let strings = Element::FlatArray(FlatArray::Str(vec!["x".into(), "y".into()]));
    assert_eq!(strings.to_string(), "FlatArray(x, y)");

    let binary = Element::FlatArray(FlatArray::Binary(vec![vec![1, 2], vec![3]]));
    assert_eq!(binary.to_string(), "FlatArray([1, 2], [3])");

    assert_eq!(Element::Array(vec![]).to_string(), "Array()");
}

#[test]
fn test_display_response() {
    let response = Response::from(Element::from("hello"));
    assert_eq!(response.to_string(), "Response(Element=String(hello))");
}

// =============================================================================
// Accessor Tests
// =============================================================================

#[test]
fn test_accessors_match_variant() {
    let string = Element::from("v");
    assert_eq!(string.as_str(), Some("v"));
    assert_eq!(string.as_u64(), None);
    assert_eq!(string.element_type(), ElementType::String);
    assert_eq!(string.array_type(), None);

    let number = Element::from(7u64);
    assert_eq!(number.as_u64(), Some(7));
    assert_eq!(number.as_binary(), None);

    let binary = Element::from(vec![0u8, 255]);
    assert_eq!(binary.as_binary(), Some(&[0u8, 255][..]));
    assert_eq!(binary.as_str(), None);

    let code = Element::from(ResponseCode::from(RespCode::NotFound));
    assert_eq!(code.as_resp_code().map(ResponseCode::code), Some(RespCode::NotFound));
    assert_eq!(code.element_type(), ElementType::RespCode);
}

#[test]
fn test_array_types() {
    let recursive = Element::Array(vec![Element::from("a")]);
    assert_eq!(recursive.array_type(), Some(ArrayType::Recursive));
    assert_eq!(recursive.as_array().map(<[Element]>::len), Some(1));

    let strings = FlatArray::Str(vec!["a".into()]);
    assert_eq!(strings.array_type(), ArrayType::String);
    assert_eq!(strings.len(), 1);

    let binary = FlatArray::Binary(vec![]);
    assert_eq!(binary.array_type(), ArrayType::BinaryString);
    assert!(binary.is_empty());

    let element = Element::FlatArray(binary);
    assert_eq!(element.array_type(), Some(ArrayType::BinaryString));
    assert_eq!(element.element_type(), ElementType::FlatArray);
    assert!(element.as_flat_array().is_some());
}

#[test]
fn test_element_type_names() {
    assert_eq!(ElementType::UnsignedInt.to_string(), "UnsignedInt");
    assert_eq!(ElementType::BinaryString.name(), "BinaryString");
}

// =============================================================================
// Response Code Tests
// =============================================================================

#[test]
fn test_classify_names_and_values() {
    for value in 0u8..=7 {
        let code = RespCode::from_u8(value).unwrap();
        assert_eq!(code as u8, value);
        assert_eq!(ResponseCode::classify(code.name()), ResponseCode::Code(code));
        assert_eq!(
            ResponseCode::classify(&value.to_string()),
            ResponseCode::Code(code)
        );
    }
    assert_eq!(RespCode::from_u8(8), None);
}

#[test]
fn test_classify_falls_back_to_other_error() {
    for text in ["", "8", "256", "+1", "OKAY", "Server Error"] {
        assert_eq!(
            ResponseCode::classify(text),
            ResponseCode::OtherError(text.to_string()),
            "text {:?}",
            text
        );
    }
}

#[test]
fn test_other_error_reports_code() {
    let code = ResponseCode::OtherError("err-unknown".to_string());
    assert_eq!(code.code(), RespCode::OtherError);
    assert_eq!(code.error_message(), Some("err-unknown"));
    assert!(!code.is_okay());

    let fixed = ResponseCode::from(RespCode::ServerError);
    assert_eq!(fixed.error_message(), None);
}

#[test]
fn test_response_is_okay() {
    let okay = Response::new(Element::from(ResponseCode::from(RespCode::Okay)));
    assert!(okay.is_okay());
    assert!(okay.resp_code().is_some());

    let value = Response::new(Element::from("Okay"));
    assert!(!value.is_okay());
    assert!(value.resp_code().is_none());
    assert_eq!(value.into_element(), Element::from("Okay"));
}
