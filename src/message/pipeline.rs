//! Pipeline entry point: envelope in, display-safe payload out.

use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, error};

use super::color::sanitize_color;
use super::envelope::Envelope;
use super::media::{classify_text, remove_all, MediaRef};
use super::patterns::{ANONYMOUS_NAME, DEFAULT_COLOR};
use super::sanitize::{escape_display, try_strip_dangerous};
use super::SanitizeError;

/// A sanitized chat message ready for display.
///
/// Serializes as `{"name", "color", "caption"}` with the media fields
/// (`kind`, `src`, `provider`, `embedUrl`) flattened in when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SanitizedPayload {
    /// Escaped, script-free display name.
    pub name: String,
    /// Whitelisted color token.
    pub color: String,
    /// Escaped message text, minus the media URL if one was classified.
    pub caption: String,
    #[serde(flatten)]
    pub media: Option<MediaRef>,
}

impl SanitizedPayload {
    /// The payload used when the pipeline faults: anonymous, default color,
    /// and the raw input escaped as text.
    pub fn fallback(input: &Value) -> Self {
        Self {
            name: ANONYMOUS_NAME.to_string(),
            color: DEFAULT_COLOR.to_string(),
            caption: escape_display(raw_text(input).as_str()),
            media: None,
        }
    }
}

/// Sanitize an untrusted message and return the payload as JSON.
///
/// `input` may be a JSON-encoded string, an object, or any scalar. This
/// never fails: internal faults are logged and produce
/// [`SanitizedPayload::fallback`].
///
/// # Examples
///
/// ```
/// use chatshield::message::sanitize_message;
/// use serde_json::json;
///
/// let out = sanitize_message(&json!("vean https://youtu.be/dQw4w9WgXcQ porfa"));
/// assert_eq!(
///     out,
///     r##"{"name":"Anonymous","color":"#000000","caption":"vean  porfa","kind":"video","provider":"youtube","embedUrl":"https://www.youtube.com/embed/dQw4w9WgXcQ"}"##
/// );
/// ```
pub fn sanitize_message(input: &Value) -> String {
    let serialized = try_sanitize(input)
        .and_then(|payload| serde_json::to_string(&payload).map_err(SanitizeError::from));
    match serialized {
        Ok(json) => json,
        Err(err) => {
            log_fault(&err, input);
            fallback_json(input)
        }
    }
}

/// Like [`sanitize_message`], but returns the typed payload.
pub fn sanitize_payload(input: &Value) -> SanitizedPayload {
    try_sanitize(input).unwrap_or_else(|err| {
        log_fault(&err, input);
        SanitizedPayload::fallback(input)
    })
}

fn try_sanitize(input: &Value) -> Result<SanitizedPayload, SanitizeError> {
    let envelope = Envelope::parse(input);
    debug!(envelope = envelope.kind(), "decoded message envelope");
    let message = envelope.into_message();

    let name = try_strip_dangerous(message.name.as_deref().unwrap_or(ANONYMOUS_NAME))?;
    let color = sanitize_color(message.color.as_deref());

    let text = try_strip_dangerous(message.text.as_deref().unwrap_or_default())?;
    let classified = classify_text(&text)?;
    let caption = match &classified.removed_url {
        Some(url) => settle_caption(classified.text, url)?,
        None => classified.text,
    };

    Ok(SanitizedPayload {
        name: escape_display(name.as_str()),
        color,
        caption: escape_display(caption.as_str()),
        media: classified.media,
    })
}

/// Cutting the URL out can join the surrounding text into new markup
/// (`onclick` + URL + ` =x`), and stripping that can rebuild the URL.
/// Alternate both until neither changes anything.
fn settle_caption(mut caption: String, url: &str) -> Result<String, SanitizeError> {
    loop {
        let next = remove_all(&try_strip_dangerous(&caption)?, url)
            .trim()
            .to_string();
        if next == caption {
            return Ok(caption);
        }
        caption = next;
    }
}

fn log_fault(err: &SanitizeError, input: &Value) {
    error!(
        error = %err,
        input_len = raw_text(input).len(),
        "message sanitization failed; using fallback payload"
    );
}

/// The raw input as a string: strings verbatim, anything else as JSON text.
fn raw_text(input: &Value) -> String {
    match input {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Serialize the fallback payload without going through a fallible path.
fn fallback_json(input: &Value) -> String {
    let payload = SanitizedPayload::fallback(input);
    json!({
        "name": payload.name,
        "color": payload.color,
        "caption": payload.caption,
    })
    .to_string()
}
