//! Standalone field validators.

use super::patterns::{PHONE_EXTRA_CHARS, PHONE_MAX_LEN, PHONE_MIN_LEN};

/// Check that `value` looks like a phone number: 6 to 20 characters, each an
/// ASCII digit or one of `+`, space, `-`, `.`, `(`, `)`.
///
/// This is a shape check only; it does not validate country codes or length
/// per numbering plan.
pub fn is_valid_phone_number(value: &str) -> bool {
    let len = value.chars().count();
    (PHONE_MIN_LEN..=PHONE_MAX_LEN).contains(&len)
        && value
            .chars()
            .all(|c| c.is_ascii_digit() || PHONE_EXTRA_CHARS.contains(&c))
}
