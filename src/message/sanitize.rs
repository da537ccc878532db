//! Markup neutralization and display escaping.

use tracing::error;

use super::patterns::{patterns, Patterns};
use super::SanitizeError;

/// Remove script blocks, inline event-handler assignments, and the
/// `javascript:` scheme from `text`.
///
/// Script blocks go first so their content is dropped whole instead of being
/// picked apart by the attribute pass. The passes repeat until the text is
/// stable, so a removal can never splice a new dangerous token together
/// (e.g. `javajavascript:script:`).
///
/// If the pattern set is unavailable the text is dropped entirely and the
/// fault is logged.
///
/// # Examples
///
/// ```
/// use chatshield::message::strip_dangerous;
///
/// let cleaned = strip_dangerous("<script>alert(1)</script><b onclick=\"x()\">hi</b>");
/// assert_eq!(cleaned, "<b >hi</b>");
/// ```
pub fn strip_dangerous(text: &str) -> String {
    match try_strip_dangerous(text) {
        Ok(cleaned) => cleaned,
        Err(err) => {
            error!(error = %err, input_len = text.len(), "dangerous-markup filter unavailable; dropping text");
            String::new()
        }
    }
}

pub(crate) fn try_strip_dangerous(text: &str) -> Result<String, SanitizeError> {
    let p = patterns()?;
    let mut current = strip_once(p, text);
    loop {
        let next = strip_once(p, &current);
        if next == current {
            return Ok(current);
        }
        current = next;
    }
}

fn strip_once(p: &Patterns, text: &str) -> String {
    let without_scripts = p.script_block.replace_all(text, "");
    let without_handlers = p.event_handler.replace_all(&without_scripts, "");
    p.javascript_scheme
        .replace_all(&without_handlers, "")
        .into_owned()
}

/// Escape HTML special characters so the text renders literally.
///
/// Ampersands are replaced first so the entities introduced by the later
/// replacements are not escaped again. `None` escapes to the empty string.
///
/// # Examples
///
/// ```
/// use chatshield::message::escape_display;
///
/// assert_eq!(escape_display("<i>Tom & \"Jerry\"</i>"), "&lt;i&gt;Tom &amp; &quot;Jerry&quot;&lt;/i&gt;");
/// assert_eq!(escape_display(None), "");
/// ```
pub fn escape_display<'a>(text: impl Into<Option<&'a str>>) -> String {
    let Some(text) = text.into() else {
        return String::new();
    };
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Script Blocks ====================

    #[test]
    fn test_script_block_removed_with_content() {
        assert_eq!(strip_dangerous("a<script>alert(1)</script>b"), "ab");
    }

    #[test]
    fn test_script_block_case_insensitive_multiline() {
        let text = "before<SCRIPT type=\"text/javascript\">\nvar x = 1;\nsteal(x);\n</ScRiPt >after";
        assert_eq!(strip_dangerous(text), "beforeafter");
    }

    #[test]
    fn test_script_blocks_are_not_greedy() {
        let text = "<script>a()</script>keep<script>b()</script>";
        assert_eq!(strip_dangerous(text), "keep");
    }

    #[test]
    fn test_handler_inside_script_removed_wholesale() {
        let text = "<script>document.body.onload = 'x'</script>ok";
        assert_eq!(strip_dangerous(text), "ok");
    }

    // ==================== Event Handlers ====================

    #[test]
    fn test_double_quoted_handler() {
        assert_eq!(strip_dangerous(r#"<b onclick="steal()">x</b>"#), "<b >x</b>");
    }

    #[test]
    fn test_single_quoted_handler() {
        assert_eq!(strip_dangerous("<b onmouseover='steal()'>x</b>"), "<b >x</b>");
    }

    #[test]
    fn test_unquoted_handler() {
        assert_eq!(strip_dangerous("<img src=x onerror=alert(1)>"), "<img src=x >");
    }

    #[test]
    fn test_handler_case_insensitive() {
        let cleaned = strip_dangerous("<img OnError=alert(1)>");
        assert!(!cleaned.to_lowercase().contains("onerror"));
    }

    #[test]
    fn test_empty_handler_value_removed() {
        assert_eq!(strip_dangerous("<a onclick=>x</a>"), "<a >x</a>");
    }

    // ==================== javascript: ====================

    #[test]
    fn test_javascript_scheme_removed() {
        assert_eq!(
            strip_dangerous("<a href=\"JavaScript:alert(1)\">x</a>"),
            "<a href=\"alert(1)\">x</a>"
        );
    }

    #[test]
    fn test_spliced_tokens_do_not_survive() {
        let cleaned = strip_dangerous("javajavascript:script:alert(1)");
        assert!(!cleaned.to_lowercase().contains("javascript:"));

        let cleaned = strip_dangerous("oonx=\"a\"nerror=alert(1)");
        assert!(!cleaned.to_lowercase().contains("onerror"));
    }

    #[test]
    fn test_plain_text_untouched() {
        let text = "hola, ¿cómo estás? 2 > 1 & 1 < 2";
        assert_eq!(strip_dangerous(text), text);
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(strip_dangerous(""), "");
    }

    // ==================== Escaping ====================

    #[test]
    fn test_escape_all_specials() {
        insta::assert_snapshot!(
            escape_display(r#"<a href="x">'&'</a>"#),
            @"&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_none_is_empty() {
        assert_eq!(escape_display(None), "");
    }

    #[test]
    fn test_escape_existing_entity_is_escaped_once() {
        assert_eq!(escape_display("&lt;"), "&amp;lt;");
    }

    #[test]
    fn test_second_escape_leaves_no_raw_specials() {
        let once = escape_display("<script>'\"&</script>");
        let twice = escape_display(once.as_str());
        assert!(!twice.contains(['<', '>', '"', '\'']));
        // Every ampersand left must start an entity.
        for (idx, _) in twice.match_indices('&') {
            let rest = &twice[idx..];
            assert!(
                ["&amp;", "&lt;", "&gt;", "&quot;", "&#39;"]
                    .iter()
                    .any(|e| rest.starts_with(e)),
                "bare ampersand at {idx} in {twice}"
            );
        }
    }
}
