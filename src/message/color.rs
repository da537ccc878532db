//! Color field validation.

use super::patterns::{COLOR_NAMES, DEFAULT_COLOR};

/// Restrict a user-supplied color to a safe token.
///
/// Accepts `#RGB` / `#RRGGBB` hex triplets (any case, returned as given) and
/// the basic CSS names in [`COLOR_NAMES`] (any case, returned lowercase).
/// Surrounding whitespace is ignored. Everything else, including `None`,
/// maps to [`DEFAULT_COLOR`].
///
/// # Examples
///
/// ```
/// use chatshield::message::sanitize_color;
///
/// assert_eq!(sanitize_color("#FFaa00"), "#FFaa00");
/// assert_eq!(sanitize_color("Navy"), "navy");
/// assert_eq!(sanitize_color("url(javascript:x)"), "#000000");
/// assert_eq!(sanitize_color(None), "#000000");
/// ```
pub fn sanitize_color<'a>(value: impl Into<Option<&'a str>>) -> String {
    let Some(raw) = value.into() else {
        return DEFAULT_COLOR.to_string();
    };
    let candidate = raw.trim();

    if is_hex_color(candidate) {
        return candidate.to_string();
    }

    COLOR_NAMES
        .iter()
        .find(|name| name.eq_ignore_ascii_case(candidate))
        .map(|name| (*name).to_string())
        .unwrap_or_else(|| DEFAULT_COLOR.to_string())
}

/// `#` followed by exactly 3 or 6 ASCII hex digits.
fn is_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}
