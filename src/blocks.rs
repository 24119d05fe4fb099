//! Block flattener – converts a [`Resume`] into an ordered sequence of
//! atomic renderable blocks.
//!
//! Section order is fixed: header, summary, experience, education, skills,
//! tools, languages. A section whose backing field is empty produces no
//! blocks at all — never an empty heading. The header block is always
//! emitted, with placeholder text for missing name/title.

use crate::document::{split_description, Resume};

/// Placeholder shown when the name field is empty.
pub const PLACEHOLDER_NAME: &str = "Full Name";
/// Placeholder shown when the job-title field is empty.
pub const PLACEHOLDER_TITLE: &str = "Job Title";

/// Classification of a renderable block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Header,
    SectionHeading,
    Paragraph,
    ListItem,
}

/// Visual role of a paragraph line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphRole {
    /// Regular body text (summary lines, skills/tools/languages strings).
    Body,
    /// Bold entry title line, e.g. `"Acme — Engineer"`.
    EntryTitle,
    /// Italic period/location line under an entry title.
    EntryMeta,
}

/// Renderable payload of a block.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockContent {
    Header {
        name: String,
        title: String,
        contact: String,
    },
    Heading(String),
    Paragraph {
        text: String,
        role: ParagraphRole,
    },
    ListItem(String),
}

/// An atomic renderable unit derived from the document. Blocks are produced
/// fresh on every document change and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub content: BlockContent,
    /// Deterministic identity derived from source field + index; stable
    /// across re-renders of the same document.
    pub key: String,
}

impl Block {
    fn new(key: impl Into<String>, content: BlockContent) -> Self {
        Self {
            content,
            key: key.into(),
        }
    }

    pub fn kind(&self) -> BlockKind {
        match self.content {
            BlockContent::Header { .. } => BlockKind::Header,
            BlockContent::Heading(_) => BlockKind::SectionHeading,
            BlockContent::Paragraph { .. } => BlockKind::Paragraph,
            BlockContent::ListItem(_) => BlockKind::ListItem,
        }
    }

    pub fn is_list_item(&self) -> bool {
        self.kind() == BlockKind::ListItem
    }
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

/// `"{period}, {location}"` with absent parts skipped; `None` when both are
/// empty (the meta line is omitted entirely).
fn meta_line(period: &str, location: &str) -> Option<String> {
    let parts: Vec<&str> = [period, location]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

/// Flatten a resume into the ordered block stream.
pub fn flatten(resume: &Resume) -> Vec<Block> {
    let mut blocks = Vec::new();

    // Header is always present.
    blocks.push(Block::new(
        "header",
        BlockContent::Header {
            name: or_placeholder(&resume.full_name, PLACEHOLDER_NAME),
            title: or_placeholder(&resume.job_title, PLACEHOLDER_TITLE),
            contact: resume.contact_line(),
        },
    ));

    // Summary: one paragraph block per newline-delimited line.
    if !resume.summary.is_empty() {
        blocks.push(Block::new(
            "summary-heading",
            BlockContent::Heading("Summary".to_string()),
        ));
        for (i, line) in resume
            .summary
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .enumerate()
        {
            blocks.push(Block::new(
                format!("summary-para-{i}"),
                BlockContent::Paragraph {
                    text: line.to_string(),
                    role: ParagraphRole::Body,
                },
            ));
        }
    }

    // Work experience.
    if !resume.experience.is_empty() {
        blocks.push(Block::new(
            "experience-heading",
            BlockContent::Heading("Work Experience".to_string()),
        ));
        for (i, exp) in resume.experience.iter().enumerate() {
            blocks.push(Block::new(
                format!("exp-{i}-title"),
                BlockContent::Paragraph {
                    text: format!(
                        "{} \u{2014} {}",
                        or_placeholder(&exp.company, "Company"),
                        or_placeholder(&exp.title, "Job title"),
                    ),
                    role: ParagraphRole::EntryTitle,
                },
            ));
            if let Some(meta) = meta_line(&exp.period, &exp.location) {
                blocks.push(Block::new(
                    format!("exp-{i}-meta"),
                    BlockContent::Paragraph {
                        text: meta,
                        role: ParagraphRole::EntryMeta,
                    },
                ));
            }
            for (j, item) in split_description(&exp.description).into_iter().enumerate() {
                blocks.push(Block::new(
                    format!("exp-{i}-item-{j}"),
                    BlockContent::ListItem(item),
                ));
            }
        }
    }

    // Education.
    if !resume.education.is_empty() {
        blocks.push(Block::new(
            "education-heading",
            BlockContent::Heading("Education".to_string()),
        ));
        for (i, edu) in resume.education.iter().enumerate() {
            blocks.push(Block::new(
                format!("edu-{i}-title"),
                BlockContent::Paragraph {
                    text: format!(
                        "{} \u{2014} {}",
                        or_placeholder(&edu.school, "School"),
                        or_placeholder(&edu.degree, "Degree"),
                    ),
                    role: ParagraphRole::EntryTitle,
                },
            ));
            if let Some(meta) = meta_line(&edu.period, &edu.location) {
                blocks.push(Block::new(
                    format!("edu-{i}-meta"),
                    BlockContent::Paragraph {
                        text: meta,
                        role: ParagraphRole::EntryMeta,
                    },
                ));
            }
            for (j, item) in split_description(&edu.description).into_iter().enumerate() {
                blocks.push(Block::new(
                    format!("edu-{i}-item-{j}"),
                    BlockContent::ListItem(item),
                ));
            }
        }
    }

    // Skills / tools / languages: single paragraph with the raw string.
    for (field, label, key) in [
        (&resume.skills, "Skills", "skills"),
        (&resume.tools, "Tools", "tools"),
        (&resume.languages, "Languages", "languages"),
    ] {
        if !field.is_empty() {
            blocks.push(Block::new(
                format!("{key}-heading"),
                BlockContent::Heading(label.to_string()),
            ));
            blocks.push(Block::new(
                format!("{key}-body"),
                BlockContent::Paragraph {
                    text: field.clone(),
                    role: ParagraphRole::Body,
                },
            ));
        }
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ExperienceEntry;

    #[test]
    fn empty_resume_yields_header_only() {
        let blocks = flatten(&Resume::default());
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind(), BlockKind::Header);
        match &blocks[0].content {
            BlockContent::Header { name, title, contact } => {
                assert_eq!(name, PLACEHOLDER_NAME);
                assert_eq!(title, PLACEHOLDER_TITLE);
                assert!(contact.is_empty());
            }
            other => panic!("expected header, got {other:?}"),
        }
    }

    #[test]
    fn empty_summary_emits_no_summary_blocks() {
        let resume = Resume {
            summary: String::new(),
            skills: "Rust".to_string(),
            ..Resume::default()
        };
        let blocks = flatten(&resume);
        assert!(blocks.iter().all(|b| !b.key.starts_with("summary")));
    }

    #[test]
    fn experience_entry_expands_to_title_meta_and_items() {
        let resume = Resume {
            experience: vec![ExperienceEntry {
                company: "Acme".to_string(),
                title: "Engineer".to_string(),
                period: "2020-2022".to_string(),
                description: "Built X\nShipped Y\nFixed Z".to_string(),
                ..ExperienceEntry::default()
            }],
            ..Resume::default()
        };
        let blocks = flatten(&resume);
        let kinds: Vec<BlockKind> = blocks.iter().map(Block::kind).collect();
        assert_eq!(
            kinds,
            vec![
                BlockKind::Header,
                BlockKind::SectionHeading,
                BlockKind::Paragraph, // "Acme — Engineer"
                BlockKind::Paragraph, // period line
                BlockKind::ListItem,
                BlockKind::ListItem,
                BlockKind::ListItem,
            ]
        );
        match &blocks[2].content {
            BlockContent::Paragraph { text, role } => {
                assert_eq!(text, "Acme \u{2014} Engineer");
                assert_eq!(*role, ParagraphRole::EntryTitle);
            }
            other => panic!("expected entry title, got {other:?}"),
        }
        match &blocks[4].content {
            BlockContent::ListItem(item) => assert_eq!(item, "Built X"),
            other => panic!("expected list item, got {other:?}"),
        }
    }

    #[test]
    fn entry_with_empty_fields_uses_placeholders() {
        let resume = Resume {
            experience: vec![ExperienceEntry::default()],
            ..Resume::default()
        };
        let blocks = flatten(&resume);
        match &blocks[2].content {
            BlockContent::Paragraph { text, .. } => {
                assert_eq!(text, "Company \u{2014} Job title");
            }
            other => panic!("expected entry title, got {other:?}"),
        }
        // No meta line when both period and location are empty.
        assert!(blocks.iter().all(|b| !b.key.ends_with("meta")));
    }

    #[test]
    fn section_order_is_fixed() {
        let resume = Resume {
            summary: "A line".to_string(),
            experience: vec![ExperienceEntry::default()],
            skills: "Rust".to_string(),
            tools: "Git".to_string(),
            languages: "English".to_string(),
            ..Resume::default()
        };
        let blocks = flatten(&resume);
        let headings: Vec<&str> = blocks
            .iter()
            .filter_map(|b| match &b.content {
                BlockContent::Heading(h) => Some(h.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            headings,
            vec!["Summary", "Work Experience", "Skills", "Tools", "Languages"]
        );
    }

    #[test]
    fn flatten_is_deterministic() {
        let resume = Resume {
            summary: "One\nTwo".to_string(),
            ..Resume::default()
        };
        assert_eq!(flatten(&resume), flatten(&resume));
    }
}
