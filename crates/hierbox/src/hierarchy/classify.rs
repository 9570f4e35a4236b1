//! Compact-mode stagger decision
//!
//! Both passes ask this module, and only this module, whether a sibling
//! group is drawn in an offset lane. Siblings share their depth and sibling
//! count, so the decision is made once per group.

use super::Hierarchy;
use crate::core::LayoutConfig;

/// Whether a node at `depth` with `sibling_count` siblings is staggered
///
/// True when compact mode is on, `depth` is not `ct - 1`, and the node is
/// either deeper than `ct` or has more than one sibling.
pub fn should_stagger(depth: usize, sibling_count: usize, ct: usize, compact: bool) -> bool {
    compact && depth + 1 != ct && (depth > ct || sibling_count > 1)
}

/// Stagger decision for the entries of `group` laid out at `depth`
pub fn group_staggers(group: &Hierarchy, depth: usize, config: &LayoutConfig) -> bool {
    !group.is_empty()
        && should_stagger(
            depth,
            group.len().saturating_sub(1),
            config.ct,
            config.compact,
        )
}

/// Lane tier of a child group
///
/// A staggered group below a staggered parent moves one tier further out; a
/// staggered group below a side-by-side parent starts at tier 1.
pub fn child_lane(parent_staggered: bool, child_staggered: bool, lane: usize) -> usize {
    match (parent_staggered, child_staggered) {
        (_, false) => 0,
        (true, true) => lane + 1,
        (false, true) => 1,
    }
}
