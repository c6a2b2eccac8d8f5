//! Key section extraction for terminal summaries.

use crate::model::{classify_line, LineKind};
use serde::{Deserialize, Serialize};

/// Sections of a sprint report worth printing on their own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySections {
    /// Body of `## Risk Analysis`
    pub risk_analysis: Option<String>,
    /// Body of `### Overdue Tasks`
    pub overdue_tasks: Option<String>,
    /// Body of `## Goals Until Next Sprint Meeting`
    pub goals: Option<String>,
}

impl KeySections {
    /// Check if none of the sections were found.
    pub fn is_empty(&self) -> bool {
        self.risk_analysis.is_none() && self.overdue_tasks.is_none() && self.goals.is_none()
    }
}

/// Extract the risk, overdue and goals sections of a report.
pub fn extract_key_sections(markdown: &str) -> KeySections {
    KeySections {
        risk_analysis: extract_section(markdown, 2, "Risk Analysis"),
        overdue_tasks: extract_section(markdown, 3, "Overdue Tasks"),
        goals: extract_section(markdown, 2, "Goals Until Next Sprint Meeting"),
    }
}

/// Body of the first heading at `level` whose title is `title`.
///
/// Leading symbols such as emoji are ignored when comparing titles. The
/// body runs until the next heading of the same or a higher level and is
/// returned trimmed; an empty body yields `None`.
pub fn extract_section(markdown: &str, level: u8, title: &str) -> Option<String> {
    let mut body: Option<Vec<&str>> = None;

    for line in markdown.lines() {
        let kind = classify_line(line);
        if let Some(lines) = body.as_mut() {
            if matches!(kind.heading_level(), Some(l) if l <= level) {
                break;
            }
            lines.push(line);
        } else if let LineKind::Heading { level: l, text } = &kind {
            if *l == level && title_matches(text, title) {
                body = Some(Vec::new());
            }
        }
    }

    let text = body?.join("\n");
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn title_matches(heading: &str, title: &str) -> bool {
    heading
        .trim_start_matches(|c: char| !c.is_alphanumeric())
        .eq_ignore_ascii_case(title)
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = "# Sprint Report\n\
## Risk Analysis\n\
- Scope creep\n\
### Overdue Tasks\n\
- Fix login\n\
- Update docs\n\
### Blocked\n\
- API keys\n\
## 🎯 Goals Until Next Sprint Meeting\n\
1. Ship v2\n\
## Appendix\n";

    #[test]
    fn test_extract_key_sections() {
        let sections = extract_key_sections(REPORT);
        let risk = sections.risk_analysis.unwrap();
        assert!(risk.starts_with("- Scope creep"));
        assert!(risk.contains("### Overdue Tasks"));
        assert!(risk.contains("- API keys"));

        assert_eq!(
            sections.overdue_tasks.as_deref(),
            Some("- Fix login\n- Update docs")
        );
        assert_eq!(sections.goals.as_deref(), Some("1. Ship v2"));
    }

    #[test]
    fn test_missing_sections() {
        let sections = extract_key_sections("# Nothing here\ntext");
        assert!(sections.is_empty());
    }

    #[test]
    fn test_empty_body_is_none() {
        assert_eq!(extract_section("## Risk Analysis\n\n## Next", 2, "Risk Analysis"), None);
    }

    #[test]
    fn test_level_must_match() {
        assert_eq!(extract_section("### Risk Analysis\nbody", 2, "Risk Analysis"), None);
    }
}
