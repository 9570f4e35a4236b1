//! Hierarchy diagrams
//!
//! A two-pass layout. [`SizeAggregator`] walks the tree bottom-up and
//! computes how much room every subtree needs; [`plan_canvas`] turns the
//! root's size into a surface size; [`LayoutDriver`] then walks the tree
//! top-down and paints boxes, connectors and labels at absolute positions.
//! In compact mode deep or bushy sibling groups are stacked in offset lanes
//! instead of side by side, which bounds width growth by depth rather than
//! by leaf count.

mod classify;
mod dimension;
mod layout;
mod renderer;
mod sizing;
mod tree;

pub use classify::*;
pub use dimension::*;
pub use layout::*;
pub use renderer::*;
pub use sizing::*;
pub use tree::*;
