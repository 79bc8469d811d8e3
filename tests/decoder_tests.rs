//! Decoder Tests
//!
//! Tests for the typed reply entry points.

use bytes::Bytes;
use proptest::prelude::*;
use redwire::protocol::{
    decode_array, decode_bulk_string, decode_integer, decode_reply, decode_simple_string,
    ReplyKind, TaggedValue,
};
use redwire::RedwireError;

fn bulk(data: &'static [u8]) -> TaggedValue {
    TaggedValue::BulkString(Some(Bytes::from_static(data)))
}

// =============================================================================
// Integer Tests
// =============================================================================

#[test]
fn test_decode_integer() {
    assert_eq!(decode_integer(b":14\r\n").unwrap(), 14);
}

#[test]
fn test_decode_negative_integer() {
    assert_eq!(decode_integer(b":-1000\r\n").unwrap(), -1000);
}

#[test]
fn test_decode_integer_not_a_number() {
    match decode_integer(b":abc\r\n") {
        Err(RedwireError::Format(text)) => assert_eq!(text, "abc"),
        other => panic!("Expected format error, got {:?}", other),
    }
}

#[test]
fn test_decode_integer_unknown_tag() {
    assert!(matches!(
        decode_integer(b"@14\r\n"),
        Err(RedwireError::UnknownType(b'@'))
    ));
}

#[test]
fn test_decode_integer_missing_terminator() {
    assert!(matches!(
        decode_integer(b":14"),
        Err(RedwireError::IncompleteFrame(_))
    ));
}

#[test]
fn test_decode_empty_frame() {
    assert!(matches!(
        decode_integer(b""),
        Err(RedwireError::IncompleteFrame(_))
    ));
}

// =============================================================================
// Simple String Tests
// =============================================================================

#[test]
fn test_decode_simple_string() {
    assert_eq!(
        decode_simple_string(b"+hello world\r\n").unwrap(),
        "hello world"
    );
}

#[test]
fn test_decode_empty_simple_string() {
    assert_eq!(decode_simple_string(b"+\r\n").unwrap(), "");
}

#[test]
fn test_decode_simple_string_type_mismatch() {
    match decode_simple_string(b":1\r\n") {
        Err(RedwireError::TypeMismatch { expected, actual }) => {
            assert_eq!(expected, ReplyKind::SimpleString);
            assert_eq!(actual, ReplyKind::Integer);
        }
        other => panic!("Expected type mismatch, got {:?}", other),
    }
}

// =============================================================================
// Bulk String Tests
// =============================================================================

#[test]
fn test_decode_bulk_string() {
    let data = decode_bulk_string(b"$6\r\nfoobar\r\n").unwrap();
    assert_eq!(data.as_deref(), Some(&b"foobar"[..]));
}

#[test]
fn test_decode_null_bulk_string() {
    assert_eq!(decode_bulk_string(b"$-1\r\n").unwrap(), None);
}

#[test]
fn test_decode_empty_bulk_string() {
    let data = decode_bulk_string(b"$0\r\n\r\n").unwrap();
    assert_eq!(data.as_deref(), Some(&b""[..]));
}

#[test]
fn test_decode_bulk_string_is_binary_safe() {
    let data = decode_bulk_string(b"$8\r\na\r\nb\x00\xff\rc\r\n").unwrap();
    assert_eq!(data.as_deref(), Some(&b"a\r\nb\x00\xff\rc"[..]));
}

#[test]
fn test_decode_bulk_string_bad_length() {
    match decode_bulk_string(b"$six\r\nfoobar\r\n") {
        Err(RedwireError::SizeRead { source }) => {
            assert!(matches!(*source, RedwireError::Format(_)));
        }
        other => panic!("Expected size read error, got {:?}", other),
    }
}

#[test]
fn test_decode_bulk_string_missing_length_line() {
    assert!(matches!(
        decode_bulk_string(b"$6"),
        Err(RedwireError::SizeRead { .. })
    ));
}

#[test]
fn test_decode_bulk_string_illegal_negative_length() {
    assert!(matches!(
        decode_bulk_string(b"$-2\r\n"),
        Err(RedwireError::InvalidLength {
            kind: ReplyKind::BulkString,
            length: -2
        })
    ));
}

#[test]
fn test_decode_bulk_string_short_content() {
    assert!(matches!(
        decode_bulk_string(b"$10\r\nfoo\r\n"),
        Err(RedwireError::IncompleteFrame(_))
    ));
}

// =============================================================================
// Server Error Tests
// =============================================================================

#[test]
fn test_server_error_surfaces_from_every_entry_point() {
    let frame = b"-ERR something went wrong\r\n";

    let errors = [
        decode_integer(frame).unwrap_err(),
        decode_simple_string(frame).unwrap_err(),
        decode_bulk_string(frame).unwrap_err(),
        decode_array(frame).unwrap_err(),
        decode_reply(frame).unwrap_err(),
    ];
    for err in errors {
        match err {
            RedwireError::Server(message) => assert_eq!(message, "ERR something went wrong"),
            other => panic!("Expected server error, got {:?}", other),
        }
    }
}

#[test]
fn test_server_error_without_terminator() {
    assert!(matches!(
        decode_integer(b"-ERR truncated"),
        Err(RedwireError::IncompleteFrame(_))
    ));
}

// =============================================================================
// Array Tests
// =============================================================================

#[test]
fn test_decode_integer_array() {
    let items = decode_array(b"*3\r\n:1\r\n:2\r\n:3\r\n").unwrap();
    assert_eq!(
        items,
        vec![
            TaggedValue::Integer(1),
            TaggedValue::Integer(2),
            TaggedValue::Integer(3)
        ]
    );
    assert!(items.iter().all(|item| item.kind() == ReplyKind::Integer));
}

#[test]
fn test_decode_mixed_array() {
    let items = decode_array(b"*5\r\n:7\r\n+OK\r\n$3\r\nfoo\r\n$-1\r\n$0\r\n\r\n").unwrap();
    assert_eq!(
        items,
        vec![
            TaggedValue::Integer(7),
            TaggedValue::SimpleString("OK".to_string()),
            bulk(b"foo"),
            TaggedValue::BulkString(None),
            bulk(b""),
        ]
    );
}

#[test]
fn test_decode_array_of_binary_bulk_strings() {
    let items = decode_array(b"*2\r\n$4\r\n\r\n\r\n\r\n$1\r\n*\r\n").unwrap();
    assert_eq!(items, vec![bulk(b"\r\n\r\n"), bulk(b"*")]);
}

#[test]
fn test_decode_empty_array() {
    assert!(decode_array(b"*0\r\n").unwrap().is_empty());
}

#[test]
fn test_decode_array_stops_early_when_frame_is_exhausted() {
    // Declared three elements, only two present: truncation, not a failure.
    let items = decode_array(b"*3\r\n:1\r\n:2\r\n").unwrap();
    assert_eq!(items, vec![TaggedValue::Integer(1), TaggedValue::Integer(2)]);
}

#[test]
fn test_decode_array_with_no_elements_present() {
    assert!(decode_array(b"*4\r\n").unwrap().is_empty());
}

#[test]
fn test_decode_array_ignores_trailing_elements() {
    let items = decode_array(b"*1\r\n:1\r\n:2\r\n").unwrap();
    assert_eq!(items, vec![TaggedValue::Integer(1)]);
}

#[test]
fn test_decode_array_bad_element_fails_whole_array() {
    assert!(matches!(
        decode_array(b"*2\r\n:1\r\n:x\r\n"),
        Err(RedwireError::Format(_))
    ));
}

#[test]
fn test_decode_array_bad_count() {
    assert!(matches!(
        decode_array(b"*x\r\n:1\r\n"),
        Err(RedwireError::Format(_))
    ));
    assert!(matches!(
        decode_array(b"*-1\r\n"),
        Err(RedwireError::InvalidLength {
            kind: ReplyKind::Array,
            length: -1
        })
    ));
}

#[test]
fn test_decode_array_type_mismatch() {
    assert!(matches!(
        decode_array(b"$3\r\nfoo\r\n"),
        Err(RedwireError::TypeMismatch {
            expected: ReplyKind::Array,
            actual: ReplyKind::BulkString
        })
    ));
}

#[test]
fn test_decode_array_huge_declared_count() {
    let items = decode_array(b"*9223372036854775807\r\n:1\r\n").unwrap();
    assert_eq!(items, vec![TaggedValue::Integer(1)]);
}

// Known limitation: only scalar elements are supported. Nested arrays and
// error replies inside an array are rejected rather than decoded.

#[test]
fn test_decode_array_rejects_nested_array() {
    assert!(matches!(
        decode_array(b"*2\r\n:1\r\n*1\r\n:2\r\n"),
        Err(RedwireError::UnsupportedElementType(ReplyKind::Array))
    ));
}

#[test]
fn test_decode_array_rejects_error_element() {
    assert!(matches!(
        decode_array(b"*2\r\n-ERR nope\r\n:2\r\n"),
        Err(RedwireError::UnsupportedElementType(ReplyKind::Error))
    ));
}

#[test]
fn test_decode_array_rejects_unknown_element() {
    assert!(matches!(
        decode_array(b"*1\r\n@1\r\n"),
        Err(RedwireError::UnsupportedElementType(ReplyKind::Unknown))
    ));
}

// =============================================================================
// Generic Entry Point Tests
// =============================================================================

#[test]
fn test_decode_reply_dispatches_on_tag() {
    assert_eq!(decode_reply(b":5\r\n").unwrap(), TaggedValue::Integer(5));
    assert_eq!(
        decode_reply(b"+PONG\r\n").unwrap(),
        TaggedValue::SimpleString("PONG".to_string())
    );
    assert_eq!(decode_reply(b"$2\r\nhi\r\n").unwrap(), bulk(b"hi"));
    assert_eq!(
        decode_reply(b"*1\r\n:1\r\n").unwrap(),
        TaggedValue::Array(vec![TaggedValue::Integer(1)])
    );
    assert!(matches!(
        decode_reply(b"?\r\n"),
        Err(RedwireError::UnknownType(b'?'))
    ));
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn test_decoding_twice_yields_equal_independent_values() {
    let frame = b"*2\r\n$3\r\nfoo\r\n:9\r\n".to_vec();
    let first = decode_array(&frame).unwrap();
    let mut second = decode_array(&frame).unwrap();
    assert_eq!(first, second);

    second.push(TaggedValue::Integer(0));
    assert_eq!(first.len(), 2);
    assert_eq!(decode_array(&frame).unwrap(), first);
}

#[test]
fn test_concurrent_decoding() {
    let handles: Vec<_> = (0..8i64)
        .map(|n| {
            std::thread::spawn(move || {
                let frame = format!(":{}\r\n", n);
                decode_integer(frame.as_bytes()).unwrap()
            })
        })
        .collect();

    for (n, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), n as i64);
    }
}

proptest! {
    #[test]
    fn prop_integer_round_trip(n in any::<i64>()) {
        let frame = format!(":{}\r\n", n);
        prop_assert_eq!(decode_integer(frame.as_bytes()).unwrap(), n);
    }

    #[test]
    fn prop_bulk_string_round_trip(data in proptest::collection::vec(any::<u8>(), 0..256)) {
        let mut frame = format!("${}\r\n", data.len()).into_bytes();
        frame.extend_from_slice(&data);
        frame.extend_from_slice(b"\r\n");
        let decoded = decode_bulk_string(&frame).unwrap();
        prop_assert_eq!(decoded.as_deref(), Some(&data[..]));
    }

    #[test]
    fn prop_decoder_never_panics(frame in proptest::collection::vec(any::<u8>(), 0..64)) {
        let _ = decode_reply(&frame);
        let _ = decode_array(&frame);
    }
}
