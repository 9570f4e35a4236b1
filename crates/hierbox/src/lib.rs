//! Hierbox - lay out nested label hierarchies as diagrams of connected boxes
//!
//! A hierarchy is a tree of labels written as nested JSON objects. Hierbox
//! sizes every subtree bottom-up, derives a canvas size, then places each
//! box, connector and label top-down onto a rendering backend.
//!
//! # Quick Start
//!
//! ```rust
//! use hierbox::render_svg;
//!
//! let svg = render_svg(r#"{"root": {"left": {}, "right": {}}}"#).unwrap();
//! assert!(svg.starts_with("<svg"));
//! assert!(svg.contains("left"));
//! ```
//!
//! # Advanced Usage
//!
//! ```rust
//! use hierbox::prelude::*;
//!
//! let tree = Hierarchy::new().with_child(
//!     "root",
//!     Hierarchy::new().with_leaf("a").with_leaf("b").with_leaf("c"),
//! );
//! let config = LayoutConfig::builder().compact(true).ct(1).build().unwrap();
//! let renderer = HierarchyRenderer::new(config);
//!
//! // Record draw calls instead of producing a document
//! let mut list = DrawList::new();
//! let summary = renderer.layout_and_draw(&tree, &mut list).unwrap();
//! assert_eq!(summary.node_count, 4);
//! assert_eq!(list.labels(), vec!["root", "a", "b", "c"]);
//! ```

pub mod core;
pub mod hierarchy;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use crate::core::*;
pub use crate::hierarchy::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        Backend, CanvasSize, CharacterSet, ColorScheme, ConfigOverrides, DrawList, LayoutConfig,
        MonospaceMetrics, Palette, Placement, SvgBackend, TextMetrics,
    };
    pub use crate::hierarchy::{Hierarchy, HierarchyRenderer, LayoutSummary};
}

/// Render a JSON hierarchy to an SVG document with the default config
///
/// # Example
/// ```rust
/// use hierbox::render_svg;
///
/// let svg = render_svg(r#"{"R&D": {}}"#).unwrap();
/// assert!(svg.contains("R&amp;D"));
/// ```
pub fn render_svg(input: &str) -> anyhow::Result<String> {
    render_svg_with_config(input, &LayoutConfig::default())
}

/// Render a JSON hierarchy to an SVG document
pub fn render_svg_with_config(input: &str, config: &LayoutConfig) -> anyhow::Result<String> {
    let tree = Hierarchy::from_json(input)?;
    let renderer = HierarchyRenderer::new(config.clone());
    Ok(renderer.render_svg(&tree)?)
}

/// Render a JSON hierarchy as a character grid preview
///
/// # Example
/// ```rust
/// use hierbox::{render_ascii, CharacterSet};
///
/// let ascii = render_ascii(r#"{"root": {"leaf": {}}}"#, CharacterSet::Ascii).unwrap();
/// assert!(ascii.contains("root"));
/// assert!(ascii.contains("leaf"));
/// ```
pub fn render_ascii(input: &str, style: CharacterSet) -> anyhow::Result<String> {
    let tree = Hierarchy::from_json(input)?;
    Ok(HierarchyRenderer::default().render_ascii(&tree, style)?)
}

/// Parse a JSON hierarchy without laying it out
///
/// # Example
/// ```rust
/// use hierbox::parse;
///
/// let tree = parse(r#"{"root": {"a": {}, "b": {"c": {}}}}"#).unwrap();
/// assert_eq!(tree.node_count(), 4);
/// assert_eq!(tree.depth(), 3);
/// ```
pub fn parse(input: &str) -> anyhow::Result<Hierarchy> {
    Ok(Hierarchy::from_json(input)?)
}
