//! Typesetter – the off-screen render pass.
//!
//! Builds a Taffy flex-column tree for a group sequence (text leaves sized
//! from wrapped lines × line height), runs a real layout pass, then extracts
//! positioned boxes in document coordinates. The two-phase split —
//! [`TypesetPass::schedule`] then [`TypesetPass::complete`] — is deliberate:
//! geometry is only valid after the layout pass has run, and a pass that
//! cannot complete reports [`LayoutError::MeasureFailed`] instead of
//! producing garbage.

use std::collections::HashMap;

use taffy::prelude::*;

use crate::blocks::{BlockContent, ParagraphRole};
use crate::error::LayoutError;
use crate::fonts::{wrap_text, FontManager};
use crate::group::Group;
use crate::style::{StyleSheet, TextStyle};

/// Horizontal alignment of text lines within a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// One wrapped line with its offset inside the enclosing box.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub x_offset: f32,
    pub y_offset: f32,
}

/// Text payload of a positioned box.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpan {
    pub lines: Vec<TextLine>,
    pub font_size: f32,
    pub bold: bool,
    pub italic: bool,
    pub line_height: f32,
    pub align: TextAlign,
    /// Bullet marker drawn in the left gutter, e.g. `"• "`.
    pub marker: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BoxContent {
    None,
    Text(TextSpan),
    /// Full-width hairline rule under a section heading.
    Rule,
}

/// A positioned box in document coordinates (before any page splitting).
#[derive(Debug, Clone, PartialEq)]
pub struct TypesetBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub content: BoxContent,
    /// True for list containers: the export slicer may break this box across
    /// pages child-by-child instead of moving it wholesale.
    pub split_inside: bool,
    pub children: Vec<TypesetBox>,
}

struct TextSlot {
    lines: Vec<String>,
    style: TextStyle,
    align: TextAlign,
    marker: Option<String>,
}

enum Slot {
    Text(TextSlot),
    Rule,
}

/// A scheduled off-screen render: the tree is built but no geometry is valid
/// until [`complete`](Self::complete) has run the layout pass.
pub struct TypesetPass<'a> {
    taffy: TaffyTree<()>,
    fonts: &'a FontManager,
    content_width: f32,
    root: NodeId,
    group_nodes: Vec<NodeId>,
    slots: HashMap<NodeId, Slot>,
    list_groups: Vec<bool>,
}

impl<'a> TypesetPass<'a> {
    /// Build the off-screen tree for `groups` at `content_width`.
    ///
    /// Fails fast on a non-positive or non-finite width — the degenerate
    /// environment in which a layout pass could never produce usable
    /// heights.
    pub fn schedule(
        groups: &[Group],
        sheet: &StyleSheet,
        fonts: &'a FontManager,
        content_width: f32,
    ) -> Result<Self, LayoutError> {
        if !content_width.is_finite() || content_width <= 0.0 {
            return Err(LayoutError::MeasureFailed(format!(
                "content width {content_width} leaves nothing to lay out"
            )));
        }

        let mut taffy = TaffyTree::new();
        let root_style = Style {
            display: taffy::Display::Flex,
            flex_direction: taffy::FlexDirection::Column,
            size: Size {
                width: taffy::Dimension::Length(content_width),
                height: taffy::Dimension::Auto,
            },
            ..Default::default()
        };
        let root = taffy
            .new_with_children(root_style, &[])
            .map_err(|e| LayoutError::MeasureFailed(e.to_string()))?;

        let mut pass = Self {
            taffy,
            fonts,
            content_width,
            root,
            group_nodes: Vec::with_capacity(groups.len()),
            slots: HashMap::new(),
            list_groups: groups.iter().map(|g| g.is_list).collect(),
        };

        for group in groups {
            let node = pass.build_group(group, sheet)?;
            pass.group_nodes.push(node);
        }
        let nodes = pass.group_nodes.clone();
        pass.taffy
            .set_children(pass.root, &nodes)
            .map_err(|e| LayoutError::MeasureFailed(e.to_string()))?;

        Ok(pass)
    }

    /// Run the layout pass and read back one document-space box per group.
    pub fn complete(mut self) -> Result<Vec<TypesetBox>, LayoutError> {
        self.taffy
            .compute_layout(
                self.root,
                Size {
                    width: AvailableSpace::Definite(self.content_width),
                    height: AvailableSpace::MaxContent,
                },
            )
            .map_err(|e| LayoutError::MeasureFailed(e.to_string()))?;

        let mut boxes = Vec::with_capacity(self.group_nodes.len());
        for (i, &node) in self.group_nodes.iter().enumerate() {
            let b = self.extract(node, 0.0, 0.0, self.list_groups[i])?;
            if !b.height.is_finite() || !b.y.is_finite() {
                return Err(LayoutError::MeasureFailed(format!(
                    "group {i} produced non-finite geometry"
                )));
            }
            boxes.push(b);
        }
        Ok(boxes)
    }

    // ── tree construction ────────────────────────────────────────────────

    fn build_group(&mut self, group: &Group, sheet: &StyleSheet) -> Result<NodeId, LayoutError> {
        let mut children = Vec::new();

        for block in &group.blocks {
            match &block.content {
                BlockContent::Header {
                    name,
                    title,
                    contact,
                } => {
                    children.push(self.text_leaf(name, sheet.header_name, TextAlign::Center, None)?);
                    children.push(self.text_leaf(
                        title,
                        sheet.header_title,
                        TextAlign::Center,
                        None,
                    )?);
                    if !contact.is_empty() {
                        children.push(self.text_leaf(
                            contact,
                            sheet.header_contact,
                            TextAlign::Center,
                            None,
                        )?);
                    }
                }
                BlockContent::Heading(text) => {
                    children.push(self.text_leaf(
                        &text.to_uppercase(),
                        sheet.heading,
                        TextAlign::Left,
                        None,
                    )?);
                    children.push(self.rule_leaf(sheet.rule_gap)?);
                }
                BlockContent::Paragraph { text, role } => {
                    let style = match role {
                        ParagraphRole::Body => sheet.body,
                        ParagraphRole::EntryTitle => sheet.entry_title,
                        ParagraphRole::EntryMeta => sheet.entry_meta,
                    };
                    children.push(self.text_leaf(text, style, TextAlign::Left, None)?);
                }
                BlockContent::ListItem(text) => {
                    children.push(self.list_item_leaf(text, sheet)?);
                }
            }
        }

        let container = Style {
            display: taffy::Display::Flex,
            flex_direction: taffy::FlexDirection::Column,
            size: Size {
                width: taffy::Dimension::Percent(1.0),
                height: taffy::Dimension::Auto,
            },
            ..Default::default()
        };
        self.taffy
            .new_with_children(container, &children)
            .map_err(|e| LayoutError::MeasureFailed(e.to_string()))
    }

    fn text_leaf(
        &mut self,
        text: &str,
        style: TextStyle,
        align: TextAlign,
        marker: Option<String>,
    ) -> Result<NodeId, LayoutError> {
        self.sized_text_leaf(text, style, align, marker, self.content_width, 0.0)
    }

    fn list_item_leaf(&mut self, text: &str, sheet: &StyleSheet) -> Result<NodeId, LayoutError> {
        self.sized_text_leaf(
            text,
            sheet.list_item,
            TextAlign::Left,
            Some("\u{2022} ".to_string()),
            self.content_width - sheet.list_indent,
            sheet.list_indent,
        )
    }

    fn sized_text_leaf(
        &mut self,
        text: &str,
        style: TextStyle,
        align: TextAlign,
        marker: Option<String>,
        max_width: f32,
        indent: f32,
    ) -> Result<NodeId, LayoutError> {
        let lines = wrap_text(text, style.font_size, style.variant, max_width, self.fonts);
        let height = lines.len() as f32 * style.line_height_pt();

        let taffy_style = Style {
            size: Size {
                width: taffy::Dimension::Length(max_width),
                height: taffy::Dimension::Length(height),
            },
            margin: Rect {
                top: LengthPercentageAuto::Length(style.space_before),
                right: LengthPercentageAuto::Length(0.0),
                bottom: LengthPercentageAuto::Length(style.space_after),
                left: LengthPercentageAuto::Length(indent),
            },
            ..Default::default()
        };
        let node = self
            .taffy
            .new_leaf(taffy_style)
            .map_err(|e| LayoutError::MeasureFailed(e.to_string()))?;
        self.slots.insert(
            node,
            Slot::Text(TextSlot {
                lines,
                style,
                align,
                marker,
            }),
        );
        Ok(node)
    }

    fn rule_leaf(&mut self, gap_after: f32) -> Result<NodeId, LayoutError> {
        let taffy_style = Style {
            size: Size {
                width: taffy::Dimension::Percent(1.0),
                height: taffy::Dimension::Length(1.0),
            },
            margin: Rect {
                top: LengthPercentageAuto::Length(0.0),
                right: LengthPercentageAuto::Length(0.0),
                bottom: LengthPercentageAuto::Length(gap_after),
                left: LengthPercentageAuto::Length(0.0),
            },
            ..Default::default()
        };
        let node = self
            .taffy
            .new_leaf(taffy_style)
            .map_err(|e| LayoutError::MeasureFailed(e.to_string()))?;
        self.slots.insert(node, Slot::Rule);
        Ok(node)
    }

    // ── extraction ───────────────────────────────────────────────────────

    fn extract(
        &self,
        node: NodeId,
        offset_x: f32,
        offset_y: f32,
        split_inside: bool,
    ) -> Result<TypesetBox, LayoutError> {
        let layout = self
            .taffy
            .layout(node)
            .map_err(|e| LayoutError::MeasureFailed(e.to_string()))?;

        let x = offset_x + layout.location.x;
        let y = offset_y + layout.location.y;
        let width = layout.size.width;

        let content = match self.slots.get(&node) {
            Some(Slot::Rule) => BoxContent::Rule,
            Some(Slot::Text(slot)) => {
                let line_height = slot.style.line_height_pt();
                let lines = slot
                    .lines
                    .iter()
                    .enumerate()
                    .map(|(i, line)| {
                        let x_offset = match slot.align {
                            TextAlign::Left => 0.0,
                            TextAlign::Center => {
                                let w = self.fonts.measure_text_width(
                                    line,
                                    slot.style.font_size,
                                    slot.style.variant,
                                );
                                ((width - w) / 2.0).max(0.0)
                            }
                        };
                        TextLine {
                            text: line.clone(),
                            x_offset,
                            y_offset: i as f32 * line_height,
                        }
                    })
                    .collect();
                BoxContent::Text(TextSpan {
                    lines,
                    font_size: slot.style.font_size,
                    bold: slot.style.variant.bold,
                    italic: slot.style.variant.italic,
                    line_height,
                    align: slot.align,
                    marker: slot.marker.clone(),
                })
            }
            None => BoxContent::None,
        };

        let child_ids = self.taffy.children(node).unwrap_or_default();
        let mut children = Vec::with_capacity(child_ids.len());
        for child in child_ids {
            children.push(self.extract(child, x, y, false)?);
        }

        Ok(TypesetBox {
            x,
            y,
            width,
            height: layout.size.height,
            content,
            split_inside,
            children,
        })
    }
}

/// Convenience: schedule and complete a pass in one call.
pub fn typeset_groups(
    groups: &[Group],
    sheet: &StyleSheet,
    fonts: &FontManager,
    content_width: f32,
) -> Result<Vec<TypesetBox>, LayoutError> {
    TypesetPass::schedule(groups, sheet, fonts, content_width)?.complete()
}
