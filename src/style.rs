//! Resume stylesheet – the resolved text styles for each block role, with a
//! preview and an export variant.
//!
//! Export mode widens section-heading spacing (the print styling), which
//! changes rendered heights — switching modes therefore always forces a
//! re-measurement pass before the heights may be packed again.

use crate::fonts::FontVariant;

/// Which styling variant the off-screen render uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    #[default]
    Preview,
    Export,
}

/// Resolved style for one text role.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font_size: f32,
    pub variant: FontVariant,
    /// Multiple of font size.
    pub line_height: f32,
    pub space_before: f32,
    pub space_after: f32,
}

impl TextStyle {
    const fn new(font_size: f32, variant: FontVariant) -> Self {
        Self {
            font_size,
            variant,
            line_height: 1.4,
            space_before: 0.0,
            space_after: 0.0,
        }
    }

    pub fn line_height_pt(&self) -> f32 {
        self.font_size * self.line_height
    }
}

/// The full set of styles the typesetter consults.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSheet {
    pub mode: RenderMode,
    pub header_name: TextStyle,
    pub header_title: TextStyle,
    pub header_contact: TextStyle,
    pub heading: TextStyle,
    /// Gap between the heading's hairline rule and the section body.
    pub rule_gap: f32,
    pub body: TextStyle,
    pub entry_title: TextStyle,
    pub entry_meta: TextStyle,
    pub list_item: TextStyle,
    /// Left gutter reserved for list bullet markers.
    pub list_indent: f32,
}

impl StyleSheet {
    pub fn preview() -> Self {
        Self {
            mode: RenderMode::Preview,
            header_name: TextStyle {
                space_after: 4.0,
                ..TextStyle::new(24.0, FontVariant::BOLD)
            },
            header_title: TextStyle {
                space_after: 4.0,
                ..TextStyle::new(13.0, FontVariant::BOLD)
            },
            header_contact: TextStyle {
                space_after: 10.0,
                ..TextStyle::new(9.0, FontVariant::REGULAR)
            },
            heading: TextStyle {
                space_before: 10.0,
                // Preview heading keeps spacing tight.
                space_after: 6.0,
                ..TextStyle::new(11.0, FontVariant::BOLD)
            },
            rule_gap: 6.0,
            body: TextStyle {
                space_after: 2.0,
                ..TextStyle::new(10.0, FontVariant::REGULAR)
            },
            entry_title: TextStyle {
                space_before: 4.0,
                ..TextStyle::new(10.0, FontVariant::BOLD)
            },
            entry_meta: TextStyle {
                space_after: 2.0,
                ..TextStyle::new(10.0, FontVariant::ITALIC)
            },
            list_item: TextStyle {
                space_after: 1.0,
                ..TextStyle::new(10.0, FontVariant::REGULAR)
            },
            list_indent: 16.0,
        }
    }

    pub fn export() -> Self {
        Self {
            mode: RenderMode::Export,
            heading: TextStyle {
                space_before: 10.0,
                // Print styling spreads headings out, so export heights
                // differ from preview heights for the same document.
                space_after: 18.0,
                ..TextStyle::new(11.0, FontVariant::BOLD)
            },
            ..Self::preview()
        }
    }

    pub fn for_mode(mode: RenderMode) -> Self {
        match mode {
            RenderMode::Preview => Self::preview(),
            RenderMode::Export => Self::export(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_headings_take_more_space() {
        let preview = StyleSheet::preview();
        let export = StyleSheet::export();
        assert!(export.heading.space_after > preview.heading.space_after);
        // Everything else matches.
        assert_eq!(preview.body, export.body);
        assert_eq!(preview.list_item, export.list_item);
    }

    #[test]
    fn for_mode_selects_variant() {
        assert_eq!(StyleSheet::for_mode(RenderMode::Preview).mode, RenderMode::Preview);
        assert_eq!(StyleSheet::for_mode(RenderMode::Export).mode, RenderMode::Export);
    }
}
