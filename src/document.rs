//! The structured resume model that feeds the layout pipeline.
//!
//! Every field is optional and defaults to empty; a section backed by an
//! empty field is omitted from the rendered output entirely. The model is an
//! immutable snapshot from the pipeline's point of view — edits produce a new
//! `Resume` that is handed back to the engine.

use serde::{Deserialize, Serialize};

/// One work-experience entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub company: String,
    pub title: String,
    pub period: String,
    pub location: String,
    /// Free text; each newline- or bullet-delimited line becomes a list item.
    pub description: String,
}

/// One education entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub school: String,
    pub degree: String,
    pub period: String,
    pub location: String,
    pub description: String,
}

/// The resume being edited.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resume {
    pub full_name: String,
    pub job_title: String,
    pub location: String,
    pub email: String,
    pub portfolio: String,
    pub linkedin: String,
    /// Free text; paragraph-split on newlines.
    pub summary: String,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: String,
    pub tools: String,
    pub languages: String,
}

impl Resume {
    /// Parse a resume from a JSON snapshot (persisted data or an external
    /// OCR parser's output).
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Contact fields joined with `" | "`, absent fields skipped.
    pub fn contact_line(&self) -> String {
        [&self.location, &self.email, &self.portfolio, &self.linkedin]
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(" | ")
    }

    /// True when no field carries content.
    pub fn is_empty(&self) -> bool {
        self.full_name.is_empty()
            && self.job_title.is_empty()
            && self.location.is_empty()
            && self.email.is_empty()
            && self.portfolio.is_empty()
            && self.linkedin.is_empty()
            && self.summary.is_empty()
            && self.experience.is_empty()
            && self.education.is_empty()
            && self.skills.is_empty()
            && self.tools.is_empty()
            && self.languages.is_empty()
    }
}

/// Split a description into list items: one item per line, where lines are
/// delimited by newlines or bullet glyphs. Items are trimmed and empty lines
/// discarded.
pub fn split_description(description: &str) -> Vec<String> {
    description
        .split(['\n', '\u{2022}'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_on_newlines_and_bullets() {
        let items = split_description("Built X\nShipped Y • Fixed Z\n\n");
        assert_eq!(items, vec!["Built X", "Shipped Y", "Fixed Z"]);
    }

    #[test]
    fn split_empty_description() {
        assert!(split_description("").is_empty());
        assert!(split_description(" \n • ").is_empty());
    }

    #[test]
    fn contact_line_skips_absent_fields() {
        let resume = Resume {
            email: "ada@example.com".to_string(),
            linkedin: "linkedin.com/in/ada".to_string(),
            ..Resume::default()
        };
        assert_eq!(resume.contact_line(), "ada@example.com | linkedin.com/in/ada");
        assert_eq!(Resume::default().contact_line(), "");
    }

    #[test]
    fn json_round_trip_with_missing_fields() {
        let resume = Resume::from_json(r#"{"full_name":"Ada Lovelace"}"#).unwrap();
        assert_eq!(resume.full_name, "Ada Lovelace");
        assert!(resume.experience.is_empty());
        let back = Resume::from_json(&resume.to_json()).unwrap();
        assert_eq!(back, resume);
    }
}
