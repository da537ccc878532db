#![no_main]

use libfuzzer_sys::fuzz_target;

use chatshield::sanitize_message;
use serde_json::{json, Value};

fuzz_target!(|data: &str| {
    // Any input, serialized or as object fields, must yield an escaped payload.
    for input in [Value::String(data.to_string()), json!({"name": data, "text": data})] {
        let out = sanitize_message(&input);
        let payload: Value = serde_json::from_str(&out).expect("payload is always JSON");

        for field in ["name", "caption"] {
            let text = payload[field].as_str().expect("field is a string");
            assert!(!text.contains(['<', '>', '"', '\'']), "{field} not escaped: {text}");
            assert!(!text.to_lowercase().contains("javascript:"), "{field}: {text}");
        }
    }
});
