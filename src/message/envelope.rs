//! Tolerant decoding of the incoming message envelope.
//!
//! Callers hand over whatever they received: a serialized JSON object, an
//! already-decoded object, or a bare scalar. Decoding never fails; anything
//! that is not an object becomes the message text.

use serde_json::{Map, Value};

/// The `{name, color, text}` fields of a message, before sanitization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageEnvelope {
    pub name: Option<String>,
    pub color: Option<String>,
    pub text: Option<String>,
}

/// Result of decoding an untrusted input value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Envelope {
    /// An object carrying `name`, `color`, and `text` as strings.
    Structured(MessageEnvelope),
    /// An object with some fields missing, null, or of another type.
    Partial(MessageEnvelope),
    /// Input that is not an object; the whole thing is the text.
    PlainText(String),
}

const FIELDS: [&str; 3] = ["name", "color", "text"];

impl Envelope {
    /// Decode `input` into an envelope.
    ///
    /// Strings are tried as serialized JSON first; if that fails or yields
    /// something other than an object, the original string is the text.
    /// `null` decodes to empty text, other scalars and arrays to their JSON
    /// text.
    pub fn parse(input: &Value) -> Self {
        match input {
            Value::String(raw) => match serde_json::from_str::<Value>(raw) {
                Ok(Value::Object(map)) => Self::from_object(&map),
                _ => Self::PlainText(raw.clone()),
            },
            Value::Object(map) => Self::from_object(map),
            Value::Null => Self::PlainText(String::new()),
            other => Self::PlainText(other.to_string()),
        }
    }

    fn from_object(map: &Map<String, Value>) -> Self {
        let message = MessageEnvelope {
            name: coerce_field(map.get("name")),
            color: coerce_field(map.get("color")),
            text: coerce_field(map.get("text")),
        };
        let complete = FIELDS
            .iter()
            .all(|field| map.get(*field).is_some_and(Value::is_string));
        if complete {
            Self::Structured(message)
        } else {
            Self::Partial(message)
        }
    }

    /// Short label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Structured(_) => "structured",
            Self::Partial(_) => "partial",
            Self::PlainText(_) => "plain_text",
        }
    }

    /// Flatten into the field record consumed by the pipeline.
    pub fn into_message(self) -> MessageEnvelope {
        match self {
            Self::Structured(message) | Self::Partial(message) => message,
            Self::PlainText(text) => MessageEnvelope {
                text: Some(text),
                ..MessageEnvelope::default()
            },
        }
    }
}

/// Strings are taken verbatim; `null` is absent; numbers, booleans, arrays,
/// and objects are coerced to their JSON text.
fn coerce_field(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full(name: &str, color: &str, text: &str) -> MessageEnvelope {
        MessageEnvelope {
            name: Some(name.to_string()),
            color: Some(color.to_string()),
            text: Some(text.to_string()),
        }
    }

    // ==================== Serialized Input ====================

    #[test]
    fn test_serialized_object() {
        let input = json!(r##"{"name":"Ana","color":"#fff","text":"hola"}"##);
        assert_eq!(
            Envelope::parse(&input),
            Envelope::Structured(full("Ana", "#fff", "hola"))
        );
    }

    #[test]
    fn test_serialized_object_with_whitespace() {
        let input = json!("  {\"text\": \"hola\"}\n");
        let envelope = Envelope::parse(&input);
        assert_eq!(envelope.kind(), "partial");
        assert_eq!(envelope.into_message().text.as_deref(), Some("hola"));
    }

    #[test]
    fn test_undecodable_string_is_text() {
        let input = json!("{not json");
        assert_eq!(
            Envelope::parse(&input),
            Envelope::PlainText("{not json".to_string())
        );
    }

    #[test]
    fn test_serialized_non_object_is_original_text() {
        assert_eq!(
            Envelope::parse(&json!("42")),
            Envelope::PlainText("42".to_string())
        );
        assert_eq!(
            Envelope::parse(&json!("\"quoted\"")),
            Envelope::PlainText("\"quoted\"".to_string())
        );
    }

    // ==================== Native Objects ====================

    #[test]
    fn test_native_object_not_mutated() {
        let input = json!({"name": "Ana", "color": "red", "text": "hi", "extra": true});
        let before = input.clone();
        let envelope = Envelope::parse(&input);
        assert_eq!(envelope, Envelope::Structured(full("Ana", "red", "hi")));
        assert_eq!(input, before);
    }

    #[test]
    fn test_missing_and_null_fields_are_partial() {
        let envelope = Envelope::parse(&json!({"name": null, "text": "hi"}));
        assert_eq!(
            envelope,
            Envelope::Partial(MessageEnvelope {
                name: None,
                color: None,
                text: Some("hi".to_string()),
            })
        );
    }

    #[test]
    fn test_non_string_fields_coerced() {
        let message = Envelope::parse(&json!({"name": 7, "color": false, "text": ["a", 1]}))
            .into_message();
        assert_eq!(message.name.as_deref(), Some("7"));
        assert_eq!(message.color.as_deref(), Some("false"));
        assert_eq!(message.text.as_deref(), Some(r#"["a",1]"#));
    }

    // ==================== Scalars ====================

    #[test]
    fn test_scalars_become_text() {
        assert_eq!(Envelope::parse(&json!(3.5)), Envelope::PlainText("3.5".to_string()));
        assert_eq!(Envelope::parse(&json!(true)), Envelope::PlainText("true".to_string()));
        assert_eq!(Envelope::parse(&json!([1, 2])), Envelope::PlainText("[1,2]".to_string()));
    }

    #[test]
    fn test_null_is_empty_text() {
        let message = Envelope::parse(&Value::Null).into_message();
        assert_eq!(message.text.as_deref(), Some(""));
        assert!(message.name.is_none());
        assert!(message.color.is_none());
    }
}
