//! Narrative formatting
//!
//! Shapes free-form provider text into headings, bullet lists and
//! paragraphs. Any input is accepted, including an empty string.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// A short label ending in a colon, e.g. `Biodiversity Hazard:`
static LABEL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z\s]+:").expect("label regex must compile"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "content", rename_all = "camelCase")]
pub enum NarrativeBlock {
    Heading(String),
    Bullets(Vec<String>),
    Paragraph(String),
}

impl NarrativeBlock {
    fn classify(block: &str) -> Option<Self> {
        if block.is_empty() {
            return None;
        }
        if block.starts_with("**") || LABEL_PATTERN.is_match(block) {
            let heading = block.replace("**", "").trim().to_string();
            return (!heading.is_empty()).then_some(Self::Heading(heading));
        }
        if block.starts_with('-') || block.starts_with('*') {
            let items: Vec<String> = block
                .lines()
                .map(|line| {
                    let line = line.strip_prefix('-').unwrap_or(line);
                    line.replace('*', "").trim().to_string()
                })
                .filter(|item| !item.is_empty())
                .collect();
            return (!items.is_empty()).then_some(Self::Bullets(items));
        }
        Some(Self::Paragraph(block.to_string()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Narrative {
    pub blocks: Vec<NarrativeBlock>,
}

impl Narrative {
    pub fn parse(raw: &str) -> Self {
        // Providers sometimes return escaped newlines as literal text.
        let cleaned = raw.replace("\\n", "");
        let blocks = cleaned
            .trim()
            .split("\n\n")
            .map(str::trim)
            .filter_map(NarrativeBlock::classify)
            .collect();
        Self { blocks }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// `<h3>`, `<ul><li>` and `<p>` markup with text escaped
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for block in &self.blocks {
            match block {
                NarrativeBlock::Heading(text) => {
                    html.push_str("<h3>");
                    html.push_str(&escape(text));
                    html.push_str("</h3>");
                }
                NarrativeBlock::Bullets(items) => {
                    html.push_str("<ul>");
                    for item in items {
                        html.push_str("<li>");
                        html.push_str(&escape(item));
                        html.push_str("</li>");
                    }
                    html.push_str("</ul>");
                }
                NarrativeBlock::Paragraph(text) => {
                    html.push_str("<p>");
                    html.push_str(&escape(text));
                    html.push_str("</p>");
                }
            }
        }
        html
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_pattern_compiles() {
        assert!(LABEL_PATTERN.is_match("Heat Island Effect: warmer pits"));
        assert!(!LABEL_PATTERN.is_match("CO2: 12 tons"));
    }

    #[test]
    fn test_blocks_are_classified() {
        let raw = "**Electricity Emissions:**\n\n\
                   - Biodiversity Hazard: habitat loss\n- Heat Island Effect: warmer pits\n\n\
                   Weather Impact: more variable rainfall\n\n\
                   Emissions stayed flat over the week.";
        let narrative = Narrative::parse(raw);
        assert_eq!(
            narrative.blocks,
            vec![
                NarrativeBlock::Heading("Electricity Emissions:".to_string()),
                NarrativeBlock::Bullets(vec![
                    "Biodiversity Hazard: habitat loss".to_string(),
                    "Heat Island Effect: warmer pits".to_string(),
                ]),
                NarrativeBlock::Heading("Weather Impact: more variable rainfall".to_string()),
                NarrativeBlock::Paragraph("Emissions stayed flat over the week.".to_string()),
            ]
        );
    }

    #[test]
    fn test_star_bullets_and_literal_newlines() {
        let narrative = Narrative::parse("* first\\n\n* **second**\n*\n\n");
        assert_eq!(
            narrative.blocks,
            vec![NarrativeBlock::Bullets(vec![
                "first".to_string(),
                "second".to_string()
            ])]
        );
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert!(Narrative::parse("").is_empty());
        assert!(Narrative::parse("  \n\n \n\n").is_empty());
        assert_eq!(Narrative::parse("").to_html(), "");
    }

    #[test]
    fn test_html_rendering() {
        let narrative = Narrative::parse("Summary:\n\n- a < b\n\nplain & simple");
        assert_eq!(
            narrative.to_html(),
            "<h3>Summary:</h3><ul><li>a &lt; b</li></ul><p>plain &amp; simple</p>"
        );
    }
}
