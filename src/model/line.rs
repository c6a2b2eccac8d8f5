//! Line classification for the supported markdown subset.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Image marker anywhere in a line: `![alt](target)`.
pub(crate) static IMAGE_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").unwrap());

static FULL_LINE_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^!\[([^\]]*)\]\(([^)]+)\)$").unwrap());

/// What a single source line is, decided once before layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineKind {
    /// Empty or whitespace-only line
    Blank,
    /// `#`..`######` heading
    Heading {
        /// Heading level (1-6)
        level: u8,
        /// Heading text without markers
        text: String,
    },
    /// A line that is exactly one image marker
    ImageMarker {
        /// Bracketed label
        alt: String,
        /// Path inside the parentheses (title stripped)
        path: String,
    },
    /// Three or more hyphens
    Rule,
    /// Whole line wrapped in emphasis markers
    Emphasis {
        /// Text between the markers
        text: String,
        /// `**text**` is bold, `*text*` and `_text_` are italic
        bold: bool,
    },
    /// `- item` or `* item`
    Bullet {
        /// Item text without the marker
        text: String,
    },
    /// Anything else
    Paragraph {
        /// Trimmed line text
        text: String,
    },
}

impl LineKind {
    /// Heading level, if this is a heading.
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            LineKind::Heading { level, .. } => Some(*level),
            _ => None,
        }
    }

    /// Text of a level-2 heading, the unit images are grouped by.
    pub fn section_name(&self) -> Option<&str> {
        match self {
            LineKind::Heading { level: 2, text } => Some(text),
            _ => None,
        }
    }

    /// Check if this is a bullet line.
    pub fn is_bullet(&self) -> bool {
        matches!(self, LineKind::Bullet { .. })
    }
}

/// Classify one line of markdown.
pub fn classify_line(line: &str) -> LineKind {
    let trimmed = line.trim();

    if trimmed.is_empty() {
        return LineKind::Blank;
    }

    if let Some(heading) = parse_heading(trimmed) {
        return heading;
    }

    if let Some(caps) = FULL_LINE_MARKER.captures(trimmed) {
        return LineKind::ImageMarker {
            alt: caps[1].to_string(),
            path: marker_target(&caps[2]).to_string(),
        };
    }

    if trimmed.len() >= 3 && trimmed.chars().all(|c| c == '-') {
        return LineKind::Rule;
    }

    if let Some((text, bold)) = emphasis_body(trimmed) {
        return LineKind::Emphasis {
            text: text.to_string(),
            bold,
        };
    }

    if let Some(rest) = trimmed
        .strip_prefix("- ")
        .or_else(|| trimmed.strip_prefix("* "))
    {
        return LineKind::Bullet {
            text: rest.trim().to_string(),
        };
    }

    LineKind::Paragraph {
        text: trimmed.to_string(),
    }
}

fn parse_heading(trimmed: &str) -> Option<LineKind> {
    let level = trimmed.bytes().take_while(|&b| b == b'#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let rest = &trimmed[level..];
    if !rest.starts_with(' ') {
        return None;
    }
    let text = rest.trim().trim_end_matches('#').trim();
    if text.is_empty() {
        return None;
    }
    Some(LineKind::Heading {
        level: level as u8,
        text: text.to_string(),
    })
}

/// Body of a line wrapped entirely in emphasis markers.
///
/// Returns the inner text and whether the emphasis is bold.
pub(crate) fn emphasis_body(trimmed: &str) -> Option<(&str, bool)> {
    if let Some(inner) = trimmed
        .strip_prefix("**")
        .and_then(|s| s.strip_suffix("**"))
    {
        if !inner.trim().is_empty() && !inner.contains("**") {
            return Some((inner.trim(), true));
        }
        return None;
    }
    if trimmed.starts_with("* ") {
        return None;
    }
    for marker in ['*', '_'] {
        if let Some(inner) = trimmed
            .strip_prefix(marker)
            .and_then(|s| s.strip_suffix(marker))
        {
            if !inner.trim().is_empty() && !inner.contains(marker) {
                return Some((inner.trim(), false));
            }
        }
    }
    None
}

/// Italic caption text if the line is a single-emphasis line.
pub(crate) fn caption_text(line: &str) -> Option<&str> {
    match emphasis_body(line.trim()) {
        Some((text, false)) => Some(text),
        _ => None,
    }
}

/// Strip an optional `"title"` from a marker target.
pub(crate) fn marker_target(raw: &str) -> &str {
    let raw = raw.trim();
    match raw.find(char::is_whitespace) {
        Some(pos) if raw[pos..].trim_start().starts_with('"') => &raw[..pos],
        _ => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_headings() {
        assert_eq!(
            classify_line("# Sprint Report"),
            LineKind::Heading {
                level: 1,
                text: "Sprint Report".into()
            }
        );
        assert_eq!(
            classify_line("  ## Key Metrics ##"),
            LineKind::Heading {
                level: 2,
                text: "Key Metrics".into()
            }
        );
        assert_eq!(classify_line("#### Burndown Analysis").heading_level(), Some(4));
        assert!(matches!(classify_line("#hashtag"), LineKind::Paragraph { .. }));
        assert!(matches!(classify_line("##"), LineKind::Paragraph { .. }));
        assert!(matches!(classify_line("####### seven"), LineKind::Paragraph { .. }));
    }

    #[test]
    fn test_classify_image_marker() {
        assert_eq!(
            classify_line("![Burndown](burndown_chart.png)"),
            LineKind::ImageMarker {
                alt: "Burndown".into(),
                path: "burndown_chart.png".into()
            }
        );
        assert_eq!(
            classify_line("![Gantt](gantt.png \"Timeline\")"),
            LineKind::ImageMarker {
                alt: "Gantt".into(),
                path: "gantt.png".into()
            }
        );
        assert!(matches!(
            classify_line("See ![chart](c.png) above"),
            LineKind::Paragraph { .. }
        ));
    }

    #[test]
    fn test_classify_rule_and_bullets() {
        assert_eq!(classify_line("---"), LineKind::Rule);
        assert_eq!(classify_line("-----"), LineKind::Rule);
        assert!(matches!(classify_line("--"), LineKind::Paragraph { .. }));
        assert_eq!(
            classify_line("- Task A"),
            LineKind::Bullet {
                text: "Task A".into()
            }
        );
        assert_eq!(
            classify_line("* Task B"),
            LineKind::Bullet {
                text: "Task B".into()
            }
        );
        assert!(matches!(classify_line("-dash"), LineKind::Paragraph { .. }));
    }

    #[test]
    fn test_classify_emphasis() {
        assert_eq!(
            classify_line("**IMMEDIATE ACTION REQUIRED**"),
            LineKind::Emphasis {
                text: "IMMEDIATE ACTION REQUIRED".into(),
                bold: true
            }
        );
        assert_eq!(
            classify_line("*Shows burn rate.*"),
            LineKind::Emphasis {
                text: "Shows burn rate.".into(),
                bold: false
            }
        );
        assert!(matches!(
            classify_line("**Sprint**: 12"),
            LineKind::Paragraph { .. }
        ));
        assert!(matches!(
            classify_line("**a** and **b**"),
            LineKind::Paragraph { .. }
        ));
    }

    #[test]
    fn test_caption_text() {
        assert_eq!(caption_text("*A caption*"), Some("A caption"));
        assert_eq!(caption_text("_Another_"), Some("Another"));
        assert_eq!(caption_text("**Bold label**"), None);
        assert_eq!(caption_text("* bullet*"), None);
        assert_eq!(caption_text("plain"), None);
    }

    #[test]
    fn test_section_name() {
        assert_eq!(classify_line("## Velocity Trend").section_name(), Some("Velocity Trend"));
        assert_eq!(classify_line("### Velocity Trend").section_name(), None);
    }
}
