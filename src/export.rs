//! Export pagination – slices the *unpaginated* document flow into pages.
//!
//! This is deliberately a second, independent pagination pass: the preview
//! packer works from measured group heights, while export re-slices the
//! document-space box flow at physical page boundaries, honoring each box's
//! split-inside hint. The two passes agree only because both read their page
//! height and content width from the same [`PageMetrics`].

use crate::metrics::PageMetrics;
use crate::plan::{LayoutPlan, PagePlan, PlanBox};
use crate::typeset::TypesetBox;

/// Convert the document-space box flow into a paginated layout plan.
pub fn paginate_flow(boxes: &[TypesetBox], metrics: &PageMetrics, title: &str) -> LayoutPlan {
    let mut plan = LayoutPlan::new(title, metrics);
    let capacity = metrics.capacity();

    let mut current = PagePlan {
        page_index: 0,
        boxes: Vec::new(),
    };
    // Document-space y at which the current page begins; `b.y -
    // page_start_doc_y` is any box's y-on-page.
    let mut page_start_doc_y = 0.0f32;

    for tbox in boxes {
        let y_on_page = (tbox.y - page_start_doc_y).max(0.0);
        let box_bottom = y_on_page + tbox.height;

        if box_bottom > capacity && !current.boxes.is_empty() {
            if tbox.split_inside && tbox.children.len() > 1 {
                split_list_box(
                    tbox,
                    &mut plan,
                    &mut current,
                    &mut page_start_doc_y,
                    capacity,
                    metrics,
                );
                continue;
            }
            plan.pages.push(current);
            current = PagePlan {
                page_index: plan.pages.len(),
                boxes: Vec::new(),
            };
            page_start_doc_y = tbox.y;
        }

        current
            .boxes
            .push(page_box(tbox, metrics, page_start_doc_y));
    }

    if !current.boxes.is_empty() {
        plan.pages.push(current);
    }
    if plan.pages.is_empty() {
        plan.pages.push(PagePlan {
            page_index: 0,
            boxes: Vec::new(),
        });
    }
    plan
}

/// Walk a splittable list container child by child, breaking to a new page
/// whenever the next item would cross the page bottom.
fn split_list_box(
    tbox: &TypesetBox,
    plan: &mut LayoutPlan,
    current: &mut PagePlan,
    page_start_doc_y: &mut f32,
    capacity: f32,
    metrics: &PageMetrics,
) {
    for child in &tbox.children {
        let y_on_page = (child.y - *page_start_doc_y).max(0.0);
        if y_on_page + child.height > capacity && !current.boxes.is_empty() {
            plan.pages.push(std::mem::replace(
                current,
                PagePlan {
                    page_index: 0,
                    boxes: Vec::new(),
                },
            ));
            current.page_index = plan.pages.len();
            *page_start_doc_y = child.y;
        }
        current
            .boxes
            .push(page_box(child, metrics, *page_start_doc_y));
    }
}

/// Translate a document-space box to page-absolute coordinates.
fn page_box(tbox: &TypesetBox, metrics: &PageMetrics, page_start_doc_y: f32) -> PlanBox {
    PlanBox::from_typeset(tbox, metrics.margin, metrics.margin - page_start_doc_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::flatten;
    use crate::document::{ExperienceEntry, Resume};
    use crate::fonts::FontManager;
    use crate::group::group_blocks;
    use crate::style::StyleSheet;
    use crate::typeset::typeset_groups;

    fn flow_for(resume: &Resume, metrics: &PageMetrics) -> Vec<TypesetBox> {
        let fonts = FontManager::default();
        typeset_groups(
            &group_blocks(flatten(resume)),
            &StyleSheet::export(),
            &fonts,
            metrics.content_width(),
        )
        .unwrap()
    }

    #[test]
    fn short_flow_is_one_page() {
        let metrics = PageMetrics::A4;
        let resume = Resume {
            summary: "Short".to_string(),
            ..Resume::default()
        };
        let plan = paginate_flow(&flow_for(&resume, &metrics), &metrics, "cv");
        assert_eq!(plan.pages.len(), 1);
    }

    #[test]
    fn long_list_spills_onto_multiple_pages() {
        let metrics = PageMetrics::A4;
        let description: String = (0..120)
            .map(|i| format!("Achievement number {i}\n"))
            .collect();
        let resume = Resume {
            experience: vec![ExperienceEntry {
                company: "Acme".to_string(),
                title: "Engineer".to_string(),
                description,
                ..ExperienceEntry::default()
            }],
            ..Resume::default()
        };
        let plan = paginate_flow(&flow_for(&resume, &metrics), &metrics, "cv");
        assert!(
            plan.pages.len() > 1,
            "expected multiple pages, got {}",
            plan.pages.len()
        );
        // Every box on every page stays within the page's vertical bounds
        // modulo the margin frame.
        for page in &plan.pages {
            for b in &page.boxes {
                assert!(b.y >= metrics.margin - 0.01);
            }
        }
    }

    #[test]
    fn empty_flow_yields_one_empty_page() {
        let metrics = PageMetrics::A4;
        let plan = paginate_flow(&[], &metrics, "cv");
        assert_eq!(plan.pages.len(), 1);
        assert!(plan.pages[0].boxes.is_empty());
    }
}
