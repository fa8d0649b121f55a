//! Best-effort input sanitization.
//!
//! Strips a fixed set of known-dangerous markup patterns from free text.
//! This is NOT a safe HTML sanitizer; rich HTML that must be rendered should
//! go through a real one.

use once_cell::sync::Lazy;
use regex::Regex;

static SCRIPT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").expect("valid script regex"));

static IFRAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<iframe\b[^>]*>.*?</iframe\s*>").expect("valid iframe regex"));

static JS_PROTOCOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)javascript:").expect("valid protocol regex"));

static EVENT_HANDLER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bon\w+\s*=").expect("valid handler regex"));

/// Sanitize free-text input: trim, then strip `<script>` blocks,
/// `javascript:` URIs, and inline event-handler attributes.
#[must_use]
pub fn sanitize_input(input: &str) -> String {
    let out = SCRIPT_RE.replace_all(input.trim(), "");
    let out = JS_PROTOCOL_RE.replace_all(&out, "");
    let out = EVENT_HANDLER_RE.replace_all(&out, "");
    out.into_owned()
}

/// Sanitize HTML-ish input: everything [`sanitize_input`] strips, plus
/// `<iframe>` blocks.
#[must_use]
pub fn sanitize_html(html: &str) -> String {
    let out = SCRIPT_RE.replace_all(html, "");
    let out = IFRAME_RE.replace_all(&out, "");
    let out = JS_PROTOCOL_RE.replace_all(&out, "");
    let out = EVENT_HANDLER_RE.replace_all(&out, "");
    out.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_script_tags() {
        assert_eq!(sanitize_input("<script>alert(1)</script>Hi"), "Hi");
        assert_eq!(
            sanitize_input("before<script type=\"text/javascript\">x()</script>after"),
            "beforeafter"
        );
    }

    #[test]
    fn test_strips_script_across_lines() {
        let input = "keep<script>\nalert(1)\n</script>this";
        assert_eq!(sanitize_input(input), "keepthis");
    }

    #[test]
    fn test_strips_javascript_protocol() {
        assert_eq!(
            sanitize_input("<a href=\"javascript:alert(1)\">x</a>"),
            "<a href=\"alert(1)\">x</a>"
        );
    }

    #[test]
    fn test_strips_event_handlers() {
        assert_eq!(
            sanitize_input("<img src=x onerror=alert(1)>"),
            "<img src=x alert(1)>"
        );
        assert_eq!(
            sanitize_input("<div onclick = \"evil()\">hi</div>"),
            "<div \"evil()\">hi</div>"
        );
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(sanitize_input("  plain text  "), "plain text");
    }

    #[test]
    fn test_plain_text_untouched() {
        let text = "What is the best way to learn Rust in 2025?";
        assert_eq!(sanitize_input(text), text);
    }

    #[test]
    fn test_sanitize_html_strips_iframes() {
        assert_eq!(
            sanitize_html("a<iframe src=\"https://evil.example\"></iframe>b"),
            "ab"
        );
        // sanitize_input leaves iframes alone
        assert!(sanitize_input("a<iframe>x</iframe>b").contains("<iframe>"));
    }
}
