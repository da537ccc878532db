//! Embedded media detection.
//!
//! Finds the first http(s) URL in a message, decides whether it points at an
//! image, a hosted video (YouTube, Vimeo), or a raw video file, and lifts it
//! out of the caption when it does.

use serde::Serialize;
use tracing::{debug, error};
use url::Url;

use super::patterns::{patterns, Patterns, VIMEO_PLAYER_BASE, YOUTUBE_EMBED_BASE};
use super::SanitizeError;

/// Host of an embeddable video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoProvider {
    Youtube,
    Vimeo,
    /// A direct link to a video file.
    File,
}

/// Media referenced by a message, serialized with a `kind` tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MediaRef {
    Image {
        src: String,
    },
    Video {
        provider: VideoProvider,
        /// Player URL for hosted providers.
        #[serde(rename = "embedUrl", skip_serializing_if = "Option::is_none")]
        embed_url: Option<String>,
        /// Direct URL for [`VideoProvider::File`].
        #[serde(skip_serializing_if = "Option::is_none")]
        src: Option<String>,
    },
}

impl MediaRef {
    fn kind(&self) -> &'static str {
        match self {
            Self::Image { .. } => "image",
            Self::Video { .. } => "video",
        }
    }
}

/// Caption text and media after classification, still unescaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ClassifiedText {
    pub text: String,
    pub media: Option<MediaRef>,
    /// The URL that was cut out of `text`, when media was found.
    pub removed_url: Option<String>,
}

/// Parse `candidate` strictly and keep it only if the scheme is http(s).
fn parse_web_url(candidate: &str) -> Option<Url> {
    let parsed = Url::parse(candidate).ok()?;
    matches!(parsed.scheme(), "http" | "https").then_some(parsed)
}

// ---------------------------------------------------------------------------
// Public matchers
// ---------------------------------------------------------------------------

/// Whether `url` is an http(s) URL whose path ends in an image extension.
///
/// The check runs on `url` as written. A query string may follow the
/// extension; a fragment may not.
///
/// # Examples
///
/// ```
/// use chatshield::message::is_image_url;
///
/// assert!(is_image_url("https://example.com/cat.PNG?size=large"));
/// assert!(!is_image_url("javascript:alert(1)"));
/// assert!(!is_image_url("data:image/png;base64,AAAA"));
/// ```
pub fn is_image_url(url: &str) -> bool {
    or_log(try_is_image_url(url), false)
}

/// Whether `url` is an http(s) URL whose path ends in a video file extension.
pub fn is_video_file_url(url: &str) -> bool {
    or_log(try_is_video_file_url(url), false)
}

/// Match `url` against the hosted video providers, then video file
/// extensions.
///
/// # Examples
///
/// ```
/// use chatshield::message::{detect_video_provider, MediaRef, VideoProvider};
///
/// let media = detect_video_provider("https://www.youtube.com/watch?v=dQw4w9WgXcQ");
/// assert_eq!(
///     media,
///     Some(MediaRef::Video {
///         provider: VideoProvider::Youtube,
///         embed_url: Some("https://www.youtube.com/embed/dQw4w9WgXcQ".to_string()),
///         src: None,
///     })
/// );
/// ```
pub fn detect_video_provider(url: &str) -> Option<MediaRef> {
    or_log(try_detect_video_provider(url), None)
}

/// Full classification of a single URL: image first, then video.
pub fn classify_url(url: &str) -> Option<MediaRef> {
    or_log(try_classify_url(url), None)
}

fn or_log<T>(result: Result<T, SanitizeError>, fallback: T) -> T {
    result.unwrap_or_else(|err| {
        error!(error = %err, "media classifier unavailable");
        fallback
    })
}

// ---------------------------------------------------------------------------
// Fallible internals
// ---------------------------------------------------------------------------

fn try_is_image_url(url: &str) -> Result<bool, SanitizeError> {
    if parse_web_url(url).is_none() {
        return Ok(false);
    }
    Ok(patterns()?.image_url.is_match(url))
}

fn try_is_video_file_url(url: &str) -> Result<bool, SanitizeError> {
    if parse_web_url(url).is_none() {
        return Ok(false);
    }
    Ok(patterns()?.video_file_url.is_match(url))
}

fn try_detect_video_provider(url: &str) -> Result<Option<MediaRef>, SanitizeError> {
    if parse_web_url(url).is_none() {
        return Ok(None);
    }
    let p = patterns()?;

    if let Some(id) = youtube_id(p, url) {
        return Ok(Some(MediaRef::Video {
            provider: VideoProvider::Youtube,
            embed_url: Some(format!("{YOUTUBE_EMBED_BASE}{id}")),
            src: None,
        }));
    }

    if let Some(caps) = p.vimeo.captures(url) {
        return Ok(Some(MediaRef::Video {
            provider: VideoProvider::Vimeo,
            embed_url: Some(format!("{VIMEO_PLAYER_BASE}{}", &caps[1])),
            src: None,
        }));
    }

    if p.video_file_url.is_match(url) {
        return Ok(Some(MediaRef::Video {
            provider: VideoProvider::File,
            embed_url: None,
            src: Some(url.to_string()),
        }));
    }

    Ok(None)
}

fn youtube_id<'u>(p: &Patterns, url: &'u str) -> Option<&'u str> {
    p.youtube_watch
        .captures(url)
        .or_else(|| p.youtube_short.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn try_classify_url(url: &str) -> Result<Option<MediaRef>, SanitizeError> {
    if try_is_image_url(url)? {
        return Ok(Some(MediaRef::Image {
            src: url.to_string(),
        }));
    }
    try_detect_video_provider(url)
}

/// Classify the first URL in `text` and, if it is media, remove it.
///
/// Only the leftmost candidate is considered. A candidate that does not parse
/// as an http(s) URL, or that is not media, leaves the text untouched.
pub(crate) fn classify_text(text: &str) -> Result<ClassifiedText, SanitizeError> {
    let unchanged = || ClassifiedText {
        text: text.to_string(),
        media: None,
        removed_url: None,
    };

    let Some(candidate) = patterns()?.url_candidate.find(text) else {
        return Ok(unchanged());
    };
    let url = candidate.as_str();

    if parse_web_url(url).is_none() {
        debug!(url_len = url.len(), "first URL candidate failed to parse");
        return Ok(unchanged());
    }

    let Some(media) = try_classify_url(url)? else {
        debug!("first URL is not embeddable media");
        return Ok(unchanged());
    };
    debug!(kind = media.kind(), "classified embedded media");

    Ok(ClassifiedText {
        text: remove_all(text, url).trim().to_string(),
        media: Some(media),
        removed_url: Some(url.to_string()),
    })
}

/// Remove every occurrence of `needle`, repeating until none is left.
pub(crate) fn remove_all(text: &str, needle: &str) -> String {
    let mut rest = text.replace(needle, "");
    while rest.contains(needle) {
        rest = rest.replace(needle, "");
    }
    rest
}
