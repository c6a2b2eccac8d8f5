//! Plain text extraction for console previews of a report.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_IMAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[[^\]]*\]\([^)]*\)").unwrap());
static RE_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]*)\]\([^)]*\)").unwrap());
static RE_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[ \t]*#{1,6}[ \t]+").unwrap());
static RE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]*)`").unwrap());

/// Convert markdown to plain narrative text.
///
/// Image markers are removed, links keep their text, heading hashes and
/// inline code backticks are dropped, and every non-ASCII character is
/// stripped. Bold markers are left alone.
pub fn to_text(markdown: &str) -> String {
    let text = RE_IMAGE.replace_all(markdown, "");
    let text = RE_LINK.replace_all(&text, "$1");
    let text = RE_HEADING.replace_all(&text, "");
    let text = RE_CODE.replace_all(&text, "$1");
    text.chars().filter(char::is_ascii).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_text_strips_markup() {
        let markdown = "# Sprint 12\n## Metrics\n![Burndown](burndown.png)\nSee [board](https://trello.com/b/x) and `make report`.";
        assert_eq!(to_text(markdown), "Sprint 12\nMetrics\n\nSee board and make report.");
    }

    #[test]
    fn test_to_text_strips_non_ascii() {
        assert_eq!(to_text("✅ Done — café"), " Done  caf");
    }

    #[test]
    fn test_to_text_keeps_bold_and_bullets() {
        assert_eq!(to_text("- **Owner**: Ana"), "- **Owner**: Ana");
    }

    #[test]
    fn test_to_text_malformed_markdown() {
        assert_eq!(to_text("![broken](x.png"), "![broken](x.png");
        assert_eq!(to_text("[[nested]](a) ***x** `open"), "[[nested]](a) ***x** `open");
        assert_eq!(to_text("[a](b) [c](d)"), "a c");
        assert_eq!(to_text(""), "");
    }
}
