//! Pattern and constant tables shared by the pipeline stages.
//!
//! Extension lists, provider URL shapes, and the color palette live here as
//! data so they can be inspected and tested on their own. Regexes are compiled
//! once per process on first use.

use std::sync::LazyLock;

use regex::Regex;

use super::SanitizeError;

/// Display name used when the envelope carries none.
pub const ANONYMOUS_NAME: &str = "Anonymous";

/// Color used when the envelope color is absent or not whitelisted.
pub const DEFAULT_COLOR: &str = "#000000";

/// Path extensions (lowercase, no dot) that classify a URL as an image.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "avif", "svg"];

/// Path extensions (lowercase, no dot) that classify a URL as a video file.
pub const VIDEO_FILE_EXTENSIONS: &[&str] = &["mp4", "webm", "ogg", "ogv", "mov", "m4v"];

/// Basic CSS color names accepted by the color validator.
pub const COLOR_NAMES: &[&str] = &[
    "black", "white", "red", "green", "blue", "yellow", "purple", "orange", "gray", "grey",
    "silver", "maroon", "olive", "lime", "aqua", "teal", "navy", "fuchsia", "cyan", "magenta",
];

/// Characters allowed in a phone number besides ASCII digits.
pub const PHONE_EXTRA_CHARS: &[char] = &['+', ' ', '-', '.', '(', ')'];

/// Inclusive length bounds (in characters) of a phone number.
pub const PHONE_MIN_LEN: usize = 6;
pub const PHONE_MAX_LEN: usize = 20;

pub const YOUTUBE_EMBED_BASE: &str = "https://www.youtube.com/embed/";
pub const VIMEO_PLAYER_BASE: &str = "https://player.vimeo.com/video/";

// ---------------------------------------------------------------------------
// Regex sources
// ---------------------------------------------------------------------------

/// `<script ...>...</script>` including the enclosed content, across lines.
const SCRIPT_BLOCK: &str = r"(?is)<script\b[^>]*>.*?</script\s*>";

/// `on<word>=` assignments with a double-quoted, single-quoted, or bare value.
const EVENT_HANDLER: &str = r#"(?i)on\w+\s*=\s*(?:"[^"]*"|'[^']*'|[^\s>]*)"#;

const JAVASCRIPT_SCHEME: &str = r"(?i)javascript:";

/// http(s) scheme followed by anything but whitespace, angle brackets, quotes.
const URL_CANDIDATE: &str = r#"https?://[^\s<>"']+"#;

/// Provider ids must end at the URL end or at a path, query, or fragment
/// delimiter, so an over-long id is rejected rather than truncated.
const YOUTUBE_WATCH: &str =
    r"^https?://(?:www\.)?youtube\.com/watch\?v=([A-Za-z0-9_-]{11})(?:$|[/?&#])";
const YOUTUBE_SHORT: &str = r"^https?://(?:www\.)?youtu\.be/([A-Za-z0-9_-]{11})(?:$|[/?#])";
const VIMEO: &str = r"^https?://(?:www\.)?vimeo\.com/([0-9]{6,12})(?:$|[/?#])";

/// Build a case-insensitive matcher for a URL, as written, whose path ends
/// in one of these extensions. Only a query string may follow; a fragment or
/// a backslash before the extension rejects it.
fn extension_pattern(extensions: &[&str]) -> String {
    format!(r"(?i)^[^?#\\]*\.(?:{})(?:\?[^#]*)?$", extensions.join("|"))
}

// ---------------------------------------------------------------------------
// Compiled set
// ---------------------------------------------------------------------------

pub(crate) struct Patterns {
    pub script_block: Regex,
    pub event_handler: Regex,
    pub javascript_scheme: Regex,
    pub url_candidate: Regex,
    pub image_url: Regex,
    pub video_file_url: Regex,
    pub youtube_watch: Regex,
    pub youtube_short: Regex,
    pub vimeo: Regex,
}

impl Patterns {
    fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            script_block: Regex::new(SCRIPT_BLOCK)?,
            event_handler: Regex::new(EVENT_HANDLER)?,
            javascript_scheme: Regex::new(JAVASCRIPT_SCHEME)?,
            url_candidate: Regex::new(URL_CANDIDATE)?,
            image_url: Regex::new(&extension_pattern(IMAGE_EXTENSIONS))?,
            video_file_url: Regex::new(&extension_pattern(VIDEO_FILE_EXTENSIONS))?,
            youtube_watch: Regex::new(YOUTUBE_WATCH)?,
            youtube_short: Regex::new(YOUTUBE_SHORT)?,
            vimeo: Regex::new(VIMEO)?,
        })
    }
}

static PATTERNS: LazyLock<Result<Patterns, regex::Error>> = LazyLock::new(Patterns::compile);

/// The process-wide compiled pattern set.
pub(crate) fn patterns() -> Result<&'static Patterns, SanitizeError> {
    PATTERNS
        .as_ref()
        .map_err(|e| SanitizeError::Pattern(e.clone()))
}
