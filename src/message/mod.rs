//! Chat message sanitization pipeline
//!
//! Turns an untrusted message envelope (`{name, color, text}`) into a payload
//! that is safe to display as text, with any embeddable media link lifted out
//! of the caption:
//!
//! - **envelope**: tolerant decoding of serialized, structured, or scalar input
//! - **sanitize**: script/handler/`javascript:` removal and display escaping
//! - **color**: whitelist validation of the color field
//! - **media**: first-URL extraction and image/video classification
//! - **pipeline**: assembles the stages behind [`sanitize_message`]
//!
//! # Example
//!
//! ```
//! use chatshield::message::sanitize_message;
//! use serde_json::json;
//!
//! let out = sanitize_message(&json!({
//!     "name": "Ana",
//!     "color": "Teal",
//!     "text": "look https://example.com/cat.png",
//! }));
//! let payload: serde_json::Value = serde_json::from_str(&out).unwrap();
//! assert_eq!(payload["kind"], "image");
//! assert_eq!(payload["color"], "teal");
//! assert_eq!(payload["caption"], "look");
//! ```

use thiserror::Error;

pub mod color;
pub mod envelope;
pub mod media;
pub mod patterns;
pub mod pipeline;
pub mod sanitize;
pub mod validate;

pub use color::sanitize_color;
pub use envelope::{Envelope, MessageEnvelope};
pub use media::{classify_url, detect_video_provider, is_image_url, is_video_file_url, MediaRef, VideoProvider};
pub use pipeline::{sanitize_message, sanitize_payload, SanitizedPayload};
pub use sanitize::{escape_display, strip_dangerous};
pub use validate::is_valid_phone_number;

/// Internal faults of the pipeline.
///
/// None of these reach callers of the public entry points; they are turned
/// into a conservative default at the boundary and logged.
#[derive(Debug, Error)]
pub enum SanitizeError {
    #[error("pattern compilation failed: {0}")]
    Pattern(#[from] regex::Error),

    #[error("payload serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}
