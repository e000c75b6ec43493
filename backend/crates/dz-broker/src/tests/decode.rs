use crate::{BrokerError, decode_record};

use googletest::assert_that;
use googletest::prelude::{anything, err, ok};
use serde_json::json;

#[test]
fn given_json_object_when_decoded_then_value_returned() {
    let value = decode_record(br#"{"demozone":"alpha","eventname":"tick","payload":{"x":1}}"#)
        .unwrap();

    assert_eq!(value["payload"], json!({ "x": 1 }));
}

#[test]
fn given_json_scalar_when_decoded_then_ok() {
    assert_that!(decode_record(b"42"), ok(anything()));
}

#[test]
fn given_empty_record_when_decoded_then_empty_record_error() {
    assert!(matches!(
        decode_record(b""),
        Err(BrokerError::EmptyRecord { .. })
    ));
    assert!(matches!(
        decode_record(b"  \n"),
        Err(BrokerError::EmptyRecord { .. })
    ));
}

#[test]
fn given_truncated_json_when_decoded_then_decode_error() {
    assert!(matches!(
        decode_record(br#"{"demozone":"#),
        Err(BrokerError::Decode { .. })
    ));
}

#[test]
fn given_invalid_utf8_when_decoded_then_error() {
    assert_that!(decode_record(&[0x22, 0xff, 0xfe, 0x22]), err(anything()));
}
