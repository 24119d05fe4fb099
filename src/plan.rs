//! Layout plan – the frozen, serializable representation of what goes on
//! each page. Produced by the preview renderer and the export slicer,
//! consumed by the PDF renderer or by an on-screen preview via JSON.

use serde::{Deserialize, Serialize};

use crate::metrics::PageMetrics;
use crate::typeset::{BoxContent, TypesetBox};

/// A complete paginated layout ready for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutPlan {
    /// Document title embedded in the PDF metadata.
    #[serde(default = "LayoutPlan::default_title")]
    pub title: String,
    /// Width of each page in PDF points (1 pt = 1/72 inch).
    pub page_width_pt: f32,
    /// Height of each page in PDF points.
    pub page_height_pt: f32,
    /// Ordered list of pages.
    pub pages: Vec<PagePlan>,
}

/// One page of content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagePlan {
    pub page_index: usize,
    pub boxes: Vec<PlanBox>,
}

/// A positioned rectangle with optional content, page-absolute coordinates
/// (origin = top-left of the physical page).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub text: Option<PlanText>,
    /// Hairline rule (section-heading underline).
    #[serde(default)]
    pub rule: bool,
    pub children: Vec<PlanBox>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanText {
    /// Pre-wrapped lines of text.
    pub lines: Vec<PlanLine>,
    pub font_size: f32,
    pub bold: bool,
    pub italic: bool,
    pub line_height: f32,
    /// Bullet marker drawn in the left gutter (e.g. `"• "`).
    pub marker: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanLine {
    pub text: String,
    /// X offset within the box (for centered lines).
    pub x_offset: f32,
    /// Y offset from the top of the box.
    pub y_offset: f32,
}

impl LayoutPlan {
    pub fn new(title: impl Into<String>, metrics: &PageMetrics) -> Self {
        Self {
            title: title.into(),
            page_width_pt: metrics.page_width,
            page_height_pt: metrics.page_height,
            pages: Vec::new(),
        }
    }

    fn default_title() -> String {
        "resume".to_string()
    }

    /// Serialise to JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Deserialise from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl PlanBox {
    /// Convert a document-space box tree into a page-absolute plan box by
    /// translating every coordinate by `(dx, dy)`.
    pub fn from_typeset(tbox: &TypesetBox, dx: f32, dy: f32) -> Self {
        let (text, rule) = match &tbox.content {
            BoxContent::None => (None, false),
            BoxContent::Rule => (None, true),
            BoxContent::Text(span) => (
                Some(PlanText {
                    lines: span
                        .lines
                        .iter()
                        .map(|l| PlanLine {
                            text: l.text.clone(),
                            x_offset: l.x_offset,
                            y_offset: l.y_offset,
                        })
                        .collect(),
                    font_size: span.font_size,
                    bold: span.bold,
                    italic: span.italic,
                    line_height: span.line_height,
                    marker: span.marker.clone(),
                }),
                false,
            ),
        };

        Self {
            x: tbox.x + dx,
            y: tbox.y + dy,
            width: tbox.width,
            height: tbox.height,
            text,
            rule,
            children: tbox
                .children
                .iter()
                .map(|c| Self::from_typeset(c, dx, dy))
                .collect(),
        }
    }
}
