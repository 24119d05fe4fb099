//! Block grouper – coalesces consecutive list-item blocks into list groups.
//!
//! A group is the unit the page packer operates on: either a single non-list
//! block, or a run of consecutive list items collapsed into one list
//! container. Grouping is a pure function of the block sequence.

use crate::blocks::Block;

/// A packing unit: one non-list block, or a run of consecutive list items.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub blocks: Vec<Block>,
    pub is_list: bool,
}

impl Group {
    pub fn single(block: Block) -> Self {
        Self {
            blocks: vec![block],
            is_list: false,
        }
    }

    pub fn list(items: Vec<Block>) -> Self {
        debug_assert!(!items.is_empty(), "list group must have at least one item");
        Self {
            blocks: items,
            is_list: true,
        }
    }

    /// Number of splittable items: the run length for list groups, 1 for
    /// everything else.
    pub fn item_count(&self) -> usize {
        if self.is_list {
            self.blocks.len()
        } else {
            1
        }
    }
}

/// Scan the block sequence in order, buffering consecutive list items and
/// flushing the buffer as one list group whenever a non-list block (or the
/// end of input) is reached.
pub fn group_blocks(blocks: Vec<Block>) -> Vec<Group> {
    let mut groups = Vec::new();
    let mut run: Vec<Block> = Vec::new();

    for block in blocks {
        if block.is_list_item() {
            run.push(block);
        } else {
            if !run.is_empty() {
                groups.push(Group::list(std::mem::take(&mut run)));
            }
            groups.push(Group::single(block));
        }
    }
    if !run.is_empty() {
        groups.push(Group::list(run));
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::{flatten, BlockKind};
    use crate::document::{ExperienceEntry, Resume};

    fn sample_resume() -> Resume {
        Resume {
            experience: vec![ExperienceEntry {
                company: "Acme".to_string(),
                title: "Engineer".to_string(),
                period: "2020-2022".to_string(),
                description: "Built X\nShipped Y\nFixed Z".to_string(),
                ..ExperienceEntry::default()
            }],
            ..Resume::default()
        }
    }

    #[test]
    fn consecutive_items_merge_into_one_group() {
        let groups = group_blocks(flatten(&sample_resume()));
        // header, heading, title, meta, list(3)
        assert_eq!(groups.len(), 5);
        let list = &groups[4];
        assert!(list.is_list);
        assert_eq!(list.item_count(), 3);
        assert!(groups[..4].iter().all(|g| !g.is_list && g.item_count() == 1));
    }

    #[test]
    fn single_item_between_non_list_blocks_is_still_a_list_group() {
        let resume = Resume {
            experience: vec![
                ExperienceEntry {
                    description: "Only item".to_string(),
                    ..ExperienceEntry::default()
                },
                ExperienceEntry::default(),
            ],
            ..Resume::default()
        };
        let groups = group_blocks(flatten(&resume));
        let lists: Vec<&Group> = groups.iter().filter(|g| g.is_list).collect();
        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].item_count(), 1);
    }

    #[test]
    fn trailing_run_is_flushed() {
        let blocks = flatten(&sample_resume());
        assert_eq!(blocks.last().unwrap().kind(), BlockKind::ListItem);
        let groups = group_blocks(blocks);
        assert!(groups.last().unwrap().is_list);
    }

    #[test]
    fn grouping_is_deterministic() {
        let blocks = flatten(&sample_resume());
        assert_eq!(group_blocks(blocks.clone()), group_blocks(blocks));
    }
}
