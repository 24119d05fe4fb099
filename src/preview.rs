//! Preview renderer – turns packed pages into a fixed-page [`LayoutPlan`].
//!
//! Each page is re-typeset at its own origin and framed in a fixed-size
//! page; content that exceeds capacity (the oversized-atomic-group case, or
//! per-item estimation error) is left overflowing for the consumer to clip —
//! it is never reflowed here.

use crate::error::LayoutError;
use crate::fonts::FontManager;
use crate::metrics::PageMetrics;
use crate::packer::Page;
use crate::plan::{LayoutPlan, PagePlan, PlanBox};
use crate::style::StyleSheet;
use crate::typeset::typeset_groups;

/// Render packed pages as a fixed-page preview plan.
pub fn render_preview(
    pages: &[Page],
    sheet: &StyleSheet,
    fonts: &FontManager,
    metrics: &PageMetrics,
    title: &str,
) -> Result<LayoutPlan, LayoutError> {
    let mut plan = LayoutPlan::new(title, metrics);

    for page in pages {
        let boxes = typeset_groups(&page.groups, sheet, fonts, metrics.content_width())?;
        plan.pages.push(PagePlan {
            page_index: page.index,
            boxes: boxes
                .iter()
                .map(|b| PlanBox::from_typeset(b, metrics.margin, metrics.margin))
                .collect(),
        });
    }

    // An empty document still shows one (empty) page.
    if plan.pages.is_empty() {
        plan.pages.push(PagePlan {
            page_index: 0,
            boxes: Vec::new(),
        });
    }

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::flatten;
    use crate::document::Resume;
    use crate::group::group_blocks;
    use crate::measure::measure;
    use crate::packer::pack_measured;

    #[test]
    fn one_plan_page_per_packed_page() {
        let fonts = FontManager::default();
        let sheet = StyleSheet::preview();
        let metrics = PageMetrics::A4;
        let resume = Resume {
            summary: "A summary line".to_string(),
            ..Resume::default()
        };
        let measured = measure(
            group_blocks(flatten(&resume)),
            &sheet,
            &fonts,
            &metrics,
            0,
        )
        .unwrap();
        let pages = pack_measured(&measured, metrics.capacity()).unwrap();
        let plan = render_preview(&pages, &sheet, &fonts, &metrics, "cv").unwrap();
        assert_eq!(plan.pages.len(), pages.len());
        assert_eq!(plan.page_height_pt, metrics.page_height);
        // Boxes start inside the margins.
        let first = &plan.pages[0].boxes[0];
        assert!(first.x >= metrics.margin - 0.01);
        assert!(first.y >= metrics.margin - 0.01);
    }

    #[test]
    fn groups_restart_at_page_top() {
        let fonts = FontManager::default();
        let sheet = StyleSheet::preview();
        let metrics = PageMetrics::A4;
        // Two pages of synthetic groups.
        let resume = Resume {
            summary: "x".to_string(),
            skills: "y".to_string(),
            ..Resume::default()
        };
        let measured = measure(
            group_blocks(flatten(&resume)),
            &sheet,
            &fonts,
            &metrics,
            0,
        )
        .unwrap();
        // Force a page break between every group with a tiny capacity.
        let pages = pack_measured(&measured, 1.0).unwrap();
        assert!(pages.len() > 1);
        let plan = render_preview(&pages, &sheet, &fonts, &metrics, "cv").unwrap();
        for page in &plan.pages {
            // Each page's first box is anchored near the top margin, modulo
            // the group's own leading space.
            let first = &page.boxes[0];
            assert!(first.y < metrics.margin + 40.0);
        }
    }
}
