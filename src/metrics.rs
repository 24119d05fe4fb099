//! Shared page geometry.
//!
//! Both pagination passes — the preview packer and the export slicer — read
//! their page height and content width from here, so the two can only ever
//! disagree if this module does. Single source of truth, no duplicated
//! literals.

use serde::{Deserialize, Serialize};

/// Default page margin in points.
pub const PAGE_MARGIN_PT: f32 = 40.0;

/// Physical page geometry in PDF points (1 pt = 1/72 inch).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageMetrics {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
}

impl PageMetrics {
    /// A4: 210mm × 297mm.
    pub const A4: Self = Self {
        page_width: 595.28,
        page_height: 841.89,
        margin: PAGE_MARGIN_PT,
    };

    /// Width available to content after horizontal margins.
    pub fn content_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    /// Page capacity: the content height budget a single page may hold
    /// before overflow starts a new page.
    pub fn capacity(&self) -> f32 {
        self.page_height - 2.0 * self.margin
    }
}

impl Default for PageMetrics {
    fn default() -> Self {
        Self::A4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a4_capacity() {
        let m = PageMetrics::A4;
        assert!((m.content_width() - 515.28).abs() < 0.01);
        assert!((m.capacity() - 761.89).abs() < 0.01);
    }
}
