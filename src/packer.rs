//! Page packer – greedily assigns measured groups to fixed-capacity pages,
//! splitting oversized list groups across page boundaries.
//!
//! The split estimates per-item height as `group_height / item_count` — a
//! uniform approximation, kept deliberately: measuring each item alone would
//! be more accurate but costs another layout pass per list. The contract is
//! that no page exceeds capacity by more than the estimation error, and that
//! a single non-list group taller than a whole page is placed alone and
//! allowed to overflow.

use crate::blocks::Block;
use crate::error::LayoutError;
use crate::group::Group;
use crate::measure::Measured;

/// One packed page: an ordered sequence of groups (or split sub-lists).
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub index: usize,
    pub groups: Vec<Group>,
}

impl Page {
    fn empty(index: usize) -> Self {
        Self {
            index,
            groups: Vec::new(),
        }
    }
}

/// Pack groups into pages of `capacity` using their measured heights.
///
/// `heights` must be index-aligned to `groups`; a length mismatch means the
/// measurement is stale and packing refuses to proceed. An empty group
/// sequence yields exactly one empty page.
pub fn pack(groups: &[Group], heights: &[f32], capacity: f32) -> Result<Vec<Page>, LayoutError> {
    if groups.len() != heights.len() {
        return Err(LayoutError::StaleMeasurement {
            groups: groups.len(),
            heights: heights.len(),
        });
    }

    let mut pages: Vec<Page> = Vec::new();
    let mut current = Page::empty(0);
    let mut current_height = 0.0f32;

    for (group, &h) in groups.iter().zip(heights) {
        // A group that exactly fills the remaining capacity stays put, and
        // an empty page accepts any group so oversized content is never
        // dropped.
        if current_height + h <= capacity || current.groups.is_empty() {
            current.groups.push(group.clone());
            current_height += h;
            continue;
        }

        if group.is_list && group.item_count() > 1 {
            let per_item = h / group.item_count() as f32;
            let mut sub: Vec<Block> = Vec::new();
            for item in &group.blocks {
                let sub_height = sub.len() as f32 * per_item;
                if !sub.is_empty() && current_height + sub_height + per_item > capacity {
                    current.groups.push(Group::list(std::mem::take(&mut sub)));
                    pages.push(current);
                    current = Page::empty(pages.len());
                    current_height = 0.0;
                }
                sub.push(item.clone());
            }
            if !sub.is_empty() {
                current_height += sub.len() as f32 * per_item;
                current.groups.push(Group::list(sub));
            }
        } else {
            pages.push(current);
            current = Page::empty(pages.len());
            current.groups.push(group.clone());
            current_height = h;
        }
    }

    pages.push(current);
    Ok(pages)
}

/// Pack a [`Measured`] result, the only way heights should reach the packer.
pub fn pack_measured(measured: &Measured, capacity: f32) -> Result<Vec<Page>, LayoutError> {
    pack(&measured.groups, &measured.heights, capacity)
}
