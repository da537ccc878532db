//! chatshield library
//!
//! Sanitizes untrusted chat messages (display name, color, free text) so they
//! can be shown as plain text, and lifts the first embeddable image or video
//! link out of the message into structured media metadata.
//!
//! The pipeline itself lives in [`message`]; [`config`], [`logging`], and
//! [`cli`] carry the `chatshield` binary.

pub mod cli;
pub mod config;
pub mod logging;
pub mod message;

pub use message::{
    detect_video_provider, escape_display, is_image_url, is_valid_phone_number, is_video_file_url,
    sanitize_color, sanitize_message, sanitize_payload, strip_dangerous, MediaRef, SanitizedPayload,
    VideoProvider,
};
