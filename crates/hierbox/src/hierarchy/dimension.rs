//! Drawing-surface size
//!
//! Computed from the sizing pass before anything is drawn, since a backend
//! needs its surface up front.

use serde::Serialize;
use tracing::debug;

use super::{Hierarchy, SizeAggregator, SizeResult, SizedGroup};
use crate::core::{CanvasSize, LayoutConfig, Result, TextMetrics};

/// Everything the host needs before drawing
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CanvasPlan {
    pub canvas: CanvasSize,
    /// Sizing result of the top-level group
    pub size: SizeResult,
    /// Leaf columns of the top-level group
    pub leaf_count: usize,
}

/// Size the hierarchy and derive the surface dimensions
pub fn plan_canvas<M: TextMetrics + ?Sized>(
    root: &Hierarchy,
    config: &LayoutConfig,
    metrics: &M,
) -> Result<CanvasPlan> {
    Ok(plan_layout(root, config, metrics)?.0)
}

/// [`plan_canvas`] plus the per-entry sizes the layout driver places from
pub fn plan_layout<M: TextMetrics + ?Sized>(
    root: &Hierarchy,
    config: &LayoutConfig,
    metrics: &M,
) -> Result<(CanvasPlan, SizedGroup)> {
    let sized = SizeAggregator::new(config, metrics).size_tree(root, 1, 0, 0.0)?;
    let size = sized.result;
    let leaf_count = root.leaf_count(1, config.ct, config.compact);
    let canvas = surface_for(&size, leaf_count, config);
    debug!(%canvas, leaf_count, width = size.width, "Planned canvas");
    let plan = CanvasPlan {
        canvas,
        size,
        leaf_count,
    };
    Ok((plan, sized))
}

/// Surface dimensions for a hierarchy
pub fn canvas_size<M: TextMetrics + ?Sized>(
    root: &Hierarchy,
    config: &LayoutConfig,
    metrics: &M,
) -> Result<CanvasSize> {
    Ok(plan_canvas(root, config, metrics)?.canvas)
}

/// Width adds a frame per leaf column, spacing around every column and the
/// canvas padding; height adds the padding and one stroke width
pub fn surface_for(size: &SizeResult, leaf_count: usize, config: &LayoutConfig) -> CanvasSize {
    let columns = leaf_count as f64;
    let width = size.width
        + columns * config.column_frame()
        + config.box_spacing * (columns + 1.0)
        + 2.0 * config.canvas_padding;
    let height = size.max_height + 2.0 * config.canvas_padding + config.stroke_width;
    CanvasSize::new(width, height)
}
