#![no_main]

use libfuzzer_sys::fuzz_target;

use chatshield::strip_dangerous;

fuzz_target!(|data: &str| {
    let cleaned = strip_dangerous(data);
    assert!(!cleaned.to_lowercase().contains("javascript:"));

    // Stripping reaches a fixed point: a second pass changes nothing.
    assert_eq!(strip_dangerous(&cleaned), cleaned);
});
