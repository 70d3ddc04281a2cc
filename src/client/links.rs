//! Pure helpers for recognizing and displaying links.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Longest `host + path` shown before truncation.
pub const MAX_DISPLAY_LENGTH: usize = 50;

static SHORT_LINK_PATTERNS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r"(?i)t\.co/\w+").unwrap(),
        Regex::new(r"(?i)bit\.ly/\w+").unwrap(),
    ]
});

/// Returns `true` if `url` contains a known short-link pattern.
pub fn is_short_url(url: &str) -> bool {
    SHORT_LINK_PATTERNS.iter().any(|re| re.is_match(url))
}

/// Shortens a URL for link text: `host + path`, cut at
/// [`MAX_DISPLAY_LENGTH`] characters with `...` appended.
///
/// Input that does not parse as a URL is truncated as-is.
pub fn format_for_display(url: &str) -> String {
    let display = match Url::parse(url) {
        Ok(parsed) => {
            let host = parsed.host_str().unwrap_or_default();
            match parsed.port() {
                Some(port) => format!("{host}:{port}{}", parsed.path()),
                None => format!("{host}{}", parsed.path()),
            }
        }
        Err(_) => url.to_string(),
    };
    truncate(&display)
}

/// Replaces the short link visible in `text` with the display form of
/// `expanded`.
///
/// Text consisting only of the short link (with or without scheme) is
/// replaced entirely. Text without a short link is returned unchanged.
pub fn rewrite_text(text: &str, expanded: &str) -> String {
    let Some(found) = SHORT_LINK_PATTERNS.iter().find_map(|re| re.find(text)) else {
        return text.to_string();
    };

    let short = found.as_str();
    let display = format_for_display(expanded);
    let trimmed = text.trim();

    if trimmed == short
        || trimmed.strip_prefix("https://") == Some(short)
        || trimmed.strip_prefix("http://") == Some(short)
    {
        display
    } else {
        text.replacen(short, &display, 1)
    }
}

fn truncate(value: &str) -> String {
    match value.char_indices().nth(MAX_DISPLAY_LENGTH) {
        Some((cut, _)) => format!("{}...", &value[..cut]),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_url_detection() {
        assert!(is_short_url("https://t.co/AbC123"));
        assert!(is_short_url("HTTPS://BIT.LY/xyz"));
        assert!(is_short_url("t.co/abc"));
        assert!(!is_short_url("https://example.com/t.co"));
        assert!(!is_short_url("https://youtube.com/redirect?q=x"));
    }

    #[test]
    fn test_format_short_url_kept() {
        assert_eq!(
            format_for_display("https://example.com/path?query=1#frag"),
            "example.com/path"
        );
        assert_eq!(format_for_display("http://localhost:8080/a"), "localhost:8080/a");
    }

    #[test]
    fn test_format_long_url_truncated() {
        let url = format!("https://example.com/{}", "a".repeat(80));
        let display = format_for_display(&url);
        assert!(display.ends_with("..."));
        assert_eq!(display.chars().count(), MAX_DISPLAY_LENGTH + 3);
        assert!(display.starts_with("example.com/aaa"));
    }

    #[test]
    fn test_format_unparsable_truncated_as_is() {
        assert_eq!(format_for_display("not a url"), "not a url");

        let junk = "x".repeat(60);
        assert_eq!(format_for_display(&junk), format!("{}...", "x".repeat(50)));
    }

    #[test]
    fn test_rewrite_text_only_link() {
        let expanded = "https://example.com/article";
        assert_eq!(rewrite_text("t.co/abc", expanded), "example.com/article");
        assert_eq!(rewrite_text(" https://t.co/abc ", expanded), "example.com/article");
        assert_eq!(rewrite_text("http://bit.ly/xyz", expanded), "example.com/article");
    }

    #[test]
    fn test_rewrite_text_inline_link() {
        assert_eq!(
            rewrite_text("read this: t.co/abc now", "https://example.com/a"),
            "read this: example.com/a now"
        );
    }

    #[test]
    fn test_rewrite_text_without_short_link() {
        assert_eq!(rewrite_text("plain text", "https://example.com"), "plain text");
    }
}
