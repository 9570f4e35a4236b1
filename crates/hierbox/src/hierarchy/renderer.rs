//! Host entry point: size, allocate, draw

use serde::Serialize;
use tracing::{debug, info, span, warn, Level};

use super::{plan_canvas, plan_layout, Hierarchy, LayoutDriver, SizeResult};
use crate::core::{
    AsciiBackend, Backend, CanvasSize, CharacterSet, DrawList, HierarchyError, LayoutConfig,
    MonospaceMetrics, Result, SvgBackend, TextMetrics,
};

/// What a layout call produced
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutSummary {
    pub canvas: CanvasSize,
    pub size: SizeResult,
    pub leaf_count: usize,
    pub node_count: usize,
    pub depth: usize,
}

/// Lays out hierarchies with one config and metrics provider
///
/// Holds no state between calls; every call sizes and draws from scratch.
#[derive(Debug, Clone)]
pub struct HierarchyRenderer<M: TextMetrics = MonospaceMetrics> {
    config: LayoutConfig,
    metrics: M,
}

impl HierarchyRenderer<MonospaceMetrics> {
    pub fn new(config: LayoutConfig) -> Self {
        Self::with_metrics(config, MonospaceMetrics::new())
    }
}

impl Default for HierarchyRenderer<MonospaceMetrics> {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl<M: TextMetrics> HierarchyRenderer<M> {
    pub fn with_metrics(config: LayoutConfig, metrics: M) -> Self {
        Self { config, metrics }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn metrics(&self) -> &M {
        &self.metrics
    }

    /// Surface size `layout_and_draw` would allocate
    pub fn canvas_size(&self, tree: &Hierarchy) -> Result<CanvasSize> {
        Ok(plan_canvas(tree, &self.config, &self.metrics)?.canvas)
    }

    /// Size the hierarchy, allocate the backend's surface and draw every node
    pub fn layout_and_draw<B: Backend + ?Sized>(
        &self,
        tree: &Hierarchy,
        backend: &mut B,
    ) -> Result<LayoutSummary> {
        let span = span!(
            Level::INFO,
            "layout_hierarchy",
            nodes = tree.node_count(),
            compact = self.config.compact,
            format = backend.format()
        );
        let _enter = span.enter();

        self.config.validate()?;
        if tree.len() > 1 {
            warn!(roots = tree.len(), "Hierarchy has several roots, laying them out side by side");
        }

        let (plan, sized) = plan_layout(tree, &self.config, &self.metrics)?;
        backend.begin(plan.canvas, &self.config.canvas_background)?;

        let end =
            LayoutDriver::new(&self.config, &self.metrics, backend).place_sized(tree, &sized)?;
        let origin_y = self.config.canvas_padding + self.config.stroke_width / 2.0;
        debug!(
            sized = plan.size.max_height,
            placed = end.y - origin_y,
            "Compared sizing and placement extents"
        );

        backend.finish()?;
        info!(canvas = %plan.canvas, leaves = plan.leaf_count, "Layout completed");

        Ok(LayoutSummary {
            canvas: plan.canvas,
            size: plan.size,
            leaf_count: plan.leaf_count,
            node_count: tree.node_count(),
            depth: tree.depth(),
        })
    }

    /// Lay out into a standalone SVG document
    pub fn render_svg(&self, tree: &Hierarchy) -> Result<String> {
        let mut svg = SvgBackend::new();
        self.layout_and_draw(tree, &mut svg)?;
        Ok(svg.into_string())
    }

    /// Lay out into a character grid preview
    ///
    /// One cell is one column of label text wide and half a text line tall.
    pub fn render_ascii(&self, tree: &Hierarchy, style: CharacterSet) -> Result<String> {
        let font = &self.config.font;
        let extent = self.metrics.measure(" ", font)?;
        if extent.width <= 0.0 || extent.line_height() <= 0.0 {
            return Err(HierarchyError::render_error(format!(
                "metrics give no usable cell size for {font}"
            )));
        }
        let mut ascii =
            AsciiBackend::new(extent.width, extent.line_height() / 2.0)?.with_style(style);
        self.layout_and_draw(tree, &mut ascii)?;
        Ok(ascii.into_string())
    }

    /// Lay out into a recorded list of draw calls
    pub fn draw_list(&self, tree: &Hierarchy) -> Result<DrawList> {
        let mut list = DrawList::new();
        self.layout_and_draw(tree, &mut list)?;
        Ok(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_hierarchy_draws_nothing() {
        let renderer = HierarchyRenderer::default();
        let list = renderer.draw_list(&Hierarchy::new()).unwrap();
        assert_eq!(list.canvas(), Some(CanvasSize::new(55.0, 43.0)));
        assert_eq!(list.boxes().count(), 0);
    }

    #[test]
    fn test_invalid_config_is_rejected_before_drawing() {
        let mut config = LayoutConfig::default();
        config.ct = 0;
        let renderer = HierarchyRenderer::new(config);
        let mut list = DrawList::new();
        let err = renderer
            .layout_and_draw(&Hierarchy::new().with_leaf("a"), &mut list)
            .unwrap_err();
        assert!(matches!(err, HierarchyError::ConfigError { .. }));
        assert!(list.commands.is_empty());
    }

    #[test]
    fn test_summary_counts() {
        let tree = Hierarchy::new().with_child(
            "root",
            Hierarchy::new().with_leaf("a").with_leaf("b"),
        );
        let mut list = DrawList::new();
        let summary = HierarchyRenderer::default()
            .layout_and_draw(&tree, &mut list)
            .unwrap();
        assert_eq!(summary.node_count, 3);
        assert_eq!(summary.depth, 2);
        assert_eq!(summary.leaf_count, 2);
        assert_eq!(list.canvas(), Some(summary.canvas));
    }

    #[test]
    fn test_ascii_preview_contains_labels() {
        let tree = Hierarchy::new().with_child(
            "root",
            Hierarchy::new().with_leaf("left").with_leaf("right"),
        );
        let ascii = HierarchyRenderer::default()
            .render_ascii(&tree, CharacterSet::Ascii)
            .unwrap();
        assert!(ascii.contains("root"));
        assert!(ascii.contains("left"));
        assert!(ascii.contains("right"));
        assert!(ascii.contains('+'));
    }
}
