//! Height measurer – one off-screen typeset pass over the group sequence.
//!
//! The output keeps the groups and their heights together: a heights array is
//! meaningless without the exact group sequence that produced it, so the two
//! only travel as one [`Measured`] value (never through shared mutable
//! state). Each result is stamped with the document generation it was
//! computed against so superseded passes can be discarded.

use crate::error::LayoutError;
use crate::fonts::FontManager;
use crate::group::Group;
use crate::metrics::PageMetrics;
use crate::style::StyleSheet;
use crate::typeset::{typeset_groups, TypesetBox};

/// The result of a measurement pass.
#[derive(Debug, Clone)]
pub struct Measured {
    pub groups: Vec<Group>,
    /// Index-aligned to `groups`; equal length by construction.
    pub heights: Vec<f32>,
    /// Document-space boxes from the same pass (reused by the export
    /// slicer so it paginates exactly what was measured).
    pub boxes: Vec<TypesetBox>,
    /// Document generation this pass was computed against.
    pub generation: u64,
}

impl Measured {
    /// Total content height of the unpaginated flow.
    pub fn flow_height(&self) -> f32 {
        self.boxes
            .last()
            .map(|b| b.y + b.height)
            .unwrap_or(0.0)
    }
}

/// Measure every group's rendered height at the page content width.
///
/// Invalidated by any document edit, render-mode switch, or width change —
/// callers re-run the whole pass rather than patching heights.
pub fn measure(
    groups: Vec<Group>,
    sheet: &StyleSheet,
    fonts: &FontManager,
    metrics: &PageMetrics,
    generation: u64,
) -> Result<Measured, LayoutError> {
    let boxes = typeset_groups(&groups, sheet, fonts, metrics.content_width())?;
    let heights: Vec<f32> = boxes.iter().map(|b| b.height).collect();
    debug_assert_eq!(heights.len(), groups.len());
    log::debug!(
        "measured {} groups (generation {generation}, mode {:?})",
        groups.len(),
        sheet.mode,
    );
    Ok(Measured {
        groups,
        heights,
        boxes,
        generation,
    })
}
