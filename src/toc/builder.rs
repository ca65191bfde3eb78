use log::debug;

use crate::toc::levels::RequestedLevels;
use crate::toc::types::{HeadingDescriptor, ListEntry, ListItem, ListNode};
use crate::utils::error::TocError;

/// Build the nested table of contents from headings in document order.
///
/// The root tier sits at the first requested level and the first heading is
/// compared against that baseline, even when its own level differs. A jump
/// down by several levels opens one tier per level, so skipped levels show
/// up as tiers without items of their own. Dropping below the root tier is
/// reported as [`TocError::StructureUnderflow`].
pub fn build_toc(headings: &[HeadingDescriptor], levels: &RequestedLevels) -> Result<ListNode, TocError> {
    let baseline = levels.first();
    let mut open: Vec<ListNode> = vec![ListNode::new(baseline)];
    let mut last_level = baseline;

    for heading in headings {
        let level = heading.level;

        if level > last_level {
            // More indentation, one new tier per level
            for _ in 0..(level - last_level) {
                let tier = current(&open).level + 1;
                debug!("Opening list lvl-{} for '{}'", tier, heading.id);
                open.push(ListNode::new(tier));
            }
        } else if level < last_level {
            // Less indentation, back out one tier per level
            for _ in 0..(last_level - level) {
                if !close_tier(&mut open) {
                    return Err(TocError::StructureUnderflow {
                        heading_id: heading.id.clone(),
                        level,
                        open_depth: open.len() - 1,
                    });
                }
            }
        }

        if let Some(list) = open.last_mut() {
            list.children.push(ListEntry::Item(ListItem::from(heading)));
        }
        last_level = level;
    }

    // Back to the root regardless of where the last heading left us
    while close_tier(&mut open) {}

    Ok(open.pop().unwrap_or_else(|| ListNode::new(baseline)))
}

fn current(open: &[ListNode]) -> &ListNode {
    // The root is never popped while building
    &open[open.len() - 1]
}

/// Move the innermost tier into its parent. Returns false at the root.
fn close_tier(open: &mut Vec<ListNode>) -> bool {
    if open.len() < 2 {
        return false;
    }

    if let Some(tier) = open.pop() {
        if let Some(parent) = open.last_mut() {
            parent.children.push(ListEntry::List(tier));
        }
    }
    true
}
