#![no_main]

use hookwire_core::channel::{decode, decode_value, encode};
use libfuzzer_sys::fuzz_target;
use serde_json::{Map, Value};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(value) = decode_value(Some(text)) else {
        // Typed decoding must reject the same input without panicking.
        assert!(decode::<Map<String, Value>>("fuzz", Some(text)).is_err());
        return;
    };
    let again = decode_value(Some(&encode(&value)));
    assert!(again.is_ok(), "re-encoded payload failed to decode: {text:?}");
    let _ = decode::<Vec<Map<String, Value>>>("fuzz", Some(text));
});
