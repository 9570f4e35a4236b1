//! Bottom-up sizing pass
//!
//! Widths here are content widths: the clamped label widths plus lane
//! offsets. Box padding, stroke and spacing are added per leaf column by the
//! canvas dimensioner and the layout driver, which keeps the sums additive
//! across side-by-side siblings.
//!
//! Heights are absolute in whatever frame `prev_height` is given in, so the
//! layout driver can ask for the extent of an entry at its drawing position.

use serde::{Deserialize, Serialize};
use tracing::{span, trace, Level};

use super::{child_lane, group_staggers, Hierarchy};
use crate::core::{text_width, wrap_label, LayoutConfig, Result, TextMetrics};

/// Aggregate size of a sibling group
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SizeResult {
    /// Content width the group occupies
    pub width: f64,
    /// Widest lane extent seen in a staggered group; 0 for side-by-side groups
    pub lane_max: f64,
    /// Bottom of the lowest box in the group's subtrees
    pub max_height: f64,
    /// Vertical cursor after the group
    pub prev_height: f64,
}

/// Resolved box of one label
#[derive(Debug, Clone, PartialEq)]
pub struct LabelBox {
    /// Clamped width the label wraps at
    pub content_width: f64,
    /// `content_width` plus padding on both sides
    pub width: f64,
    pub height: f64,
    pub line_height: f64,
    pub lines: Vec<String>,
}

/// Measure, clamp and wrap a label
pub fn measure_label<M: TextMetrics + ?Sized>(
    label: &str,
    config: &LayoutConfig,
    metrics: &M,
) -> Result<LabelBox> {
    let font = &config.font;
    let content_width = text_width(label, metrics, font)?
        .min(config.max_width)
        .max(config.min_width);
    let wrapped = wrap_label(label, content_width, metrics, font)?;
    let line_height = metrics.measure(label, font)?.line_height();
    let pad = 2.0 * config.box_padding;

    Ok(LabelBox {
        content_width,
        width: content_width + pad,
        height: line_height * wrapped.line_count as f64 + pad,
        line_height,
        lines: wrapped.lines,
    })
}

/// Where an entry sits while its group is sized
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntrySlot {
    pub depth: usize,
    pub lane: usize,
    /// Stagger decision of the entry's group
    pub stagger: bool,
    /// Top of the entry's box
    pub top: f64,
    /// Running lane maximum of the group so far
    pub lane_max: f64,
}

/// Size of one entry and its subtree
#[derive(Debug, Clone, PartialEq)]
pub struct EntrySize {
    /// Horizontal content extent from the left edge of the entry's slot
    pub extent: f64,
    /// Top of the entry's box
    pub top: f64,
    /// Bottom of the lowest box in the entry's subtree
    pub bottom: f64,
    /// Running lane maximum including this entry
    pub lane_max: f64,
    pub label_box: LabelBox,
    /// Sizes of the entry's children, in insertion order
    pub children: Vec<EntrySize>,
}

impl EntrySize {
    /// Height from the top of the entry's box to the bottom of its subtree
    pub fn subtree_height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// Aggregate size of a group together with the size of every entry in it
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SizedGroup {
    pub result: SizeResult,
    pub entries: Vec<EntrySize>,
}

/// Computes subtree sizes without side effects
pub struct SizeAggregator<'a, M: TextMetrics + ?Sized> {
    config: &'a LayoutConfig,
    metrics: &'a M,
}

impl<'a, M: TextMetrics + ?Sized> SizeAggregator<'a, M> {
    pub fn new(config: &'a LayoutConfig, metrics: &'a M) -> Self {
        Self { config, metrics }
    }

    pub fn config(&self) -> &'a LayoutConfig {
        self.config
    }

    pub fn measure(&self, label: &str) -> Result<LabelBox> {
        measure_label(label, self.config, self.metrics)
    }

    /// Size the group `children` laid out at `depth` in lane `lane`,
    /// starting at vertical offset `prev_height`
    pub fn size(
        &self,
        children: &Hierarchy,
        depth: usize,
        lane: usize,
        prev_height: f64,
    ) -> Result<SizeResult> {
        Ok(self.size_tree(children, depth, lane, prev_height)?.result)
    }

    /// Like [`size`](Self::size), keeping the per-entry sizes for placement
    pub fn size_tree(
        &self,
        children: &Hierarchy,
        depth: usize,
        lane: usize,
        prev_height: f64,
    ) -> Result<SizedGroup> {
        let span = span!(Level::TRACE, "size", depth, lane, entries = children.len());
        let _enter = span.enter();

        let stagger = group_staggers(children, depth, self.config);
        let mut result = SizeResult {
            prev_height,
            ..SizeResult::default()
        };
        let mut entries = Vec::with_capacity(children.len());

        for (label, node) in children.entries() {
            let slot = EntrySlot {
                depth,
                lane,
                stagger,
                top: result.prev_height,
                lane_max: result.lane_max,
            };
            let entry = self.size_entry(label, node, slot)?;
            result.max_height = result.max_height.max(entry.bottom);

            if stagger {
                result.lane_max = entry.lane_max;
                result.width = result.width.max(entry.extent).max(entry.lane_max);
                result.prev_height = entry.bottom + self.config.yt;
            } else {
                result.width += entry.extent;
            }
            entries.push(entry);
        }

        trace!(
            width = result.width,
            max_height = result.max_height,
            stagger,
            "Sized group"
        );
        Ok(SizedGroup { result, entries })
    }

    /// Size one entry and its subtree
    pub fn size_entry(
        &self,
        label: &str,
        node: &Hierarchy,
        slot: EntrySlot,
    ) -> Result<EntrySize> {
        let EntrySlot {
            depth,
            lane,
            stagger,
            top,
            lane_max,
        } = slot;
        let label_box = self.measure(label)?;
        let offset = if stagger {
            lane as f64 * self.config.xt
        } else {
            0.0
        };
        let own = offset + label_box.content_width;

        let mut entry = EntrySize {
            extent: own,
            top,
            bottom: top + label_box.height,
            lane_max: if stagger { lane_max.max(own) } else { 0.0 },
            label_box,
            children: Vec::new(),
        };
        if node.is_leaf() {
            return Ok(entry);
        }

        let child_depth = depth + 1;
        let child_stagger = group_staggers(node, child_depth, self.config);
        let below = top + entry.label_box.height + self.config.yt;
        let child = self.size_tree(
            node,
            child_depth,
            child_lane(stagger, child_stagger, lane),
            below,
        )?;

        entry.extent = if child_stagger {
            own.max(child.result.width)
        } else {
            own.max(offset + child.result.width)
        };
        entry.bottom = entry.bottom.max(child.result.max_height);
        if child_stagger {
            entry.lane_max = entry.lane_max.max(child.result.lane_max);
        }
        entry.children = child.entries;
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FontSpec, HierarchyError, MonospaceMetrics};

    /// 4px per column at 16px, line height 16
    fn narrow() -> MonospaceMetrics {
        MonospaceMetrics::with_ratios(0.25, 0.75, 0.25)
    }

    #[test]
    fn test_label_box_is_clamped() {
        let config = LayoutConfig::default();
        let metrics = MonospaceMetrics::with_ratios(0.5, 0.75, 0.25);

        let short = measure_label("ab", &config, &metrics).unwrap();
        assert_eq!(short.content_width, 50.0);
        assert_eq!(short.width, 58.0);
        assert_eq!(short.height, 24.0);

        // 26 columns * 8px = 208, clamped to 100 and wrapped
        let long = measure_label("Lorem ipsum dolor sit amet", &config, &metrics).unwrap();
        assert_eq!(long.content_width, 100.0);
        assert_eq!(long.lines, vec!["Lorem ipsum ", "dolor sit ", "amet "]);
        assert_eq!(long.height, 3.0 * 16.0 + 8.0);
    }

    #[test]
    fn test_leaf_group_width_adds_up() {
        let config = LayoutConfig::default();
        let metrics = narrow();
        let group = Hierarchy::new().with_leaf("a").with_leaf("b").with_leaf("c");
        let size = SizeAggregator::new(&config, &metrics)
            .size(&group, 2, 0, 0.0)
            .unwrap();
        assert_eq!(size.width, 150.0);
        assert_eq!(size.max_height, 24.0);
        assert_eq!(size.lane_max, 0.0);
        assert_eq!(size.prev_height, 0.0);
    }

    #[test]
    fn test_parent_wider_than_children() {
        let config = LayoutConfig::default();
        // 8px per column: the parent label measures 80px
        let metrics = MonospaceMetrics::with_ratios(0.5, 0.75, 0.25);
        let tree = Hierarchy::new().with_child("wide_label", Hierarchy::new().with_leaf("x"));
        let size = SizeAggregator::new(&config, &metrics)
            .size(&tree, 1, 0, 0.0)
            .unwrap();
        assert_eq!(size.width, 80.0);
        assert_eq!(size.max_height, 24.0 + 30.0 + 24.0);
    }

    #[test]
    fn test_two_words_wrap_at_their_own_width() {
        let config = LayoutConfig::default();
        let metrics = MonospaceMetrics::with_ratios(0.5, 0.75, 0.25);
        // "wide label" is 80px, but the line is measured with its trailing space
        let label_box = measure_label("wide label", &config, &metrics).unwrap();
        assert_eq!(label_box.content_width, 80.0);
        assert_eq!(label_box.lines, vec!["wide ", "label "]);
        assert_eq!(label_box.height, 2.0 * 16.0 + 8.0);
    }

    #[test]
    fn test_single_word_fits_its_box_with_default_metrics() {
        let config = LayoutConfig::default();
        let metrics = MonospaceMetrics::new();
        for label in ["Company", "child2b", "Networking", "Mobile"] {
            let label_box = measure_label(label, &config, &metrics).unwrap();
            assert_eq!(label_box.lines, vec![format!("{label} ")], "{label}");
            assert_eq!(label_box.height, 16.0 + 8.0);
        }
    }

    #[test]
    fn test_size_tree_mirrors_hierarchy() {
        let config = LayoutConfig::default();
        let metrics = narrow();
        let tree = Hierarchy::new().with_child(
            "root",
            Hierarchy::new()
                .with_leaf("a")
                .with_child("b", Hierarchy::new().with_leaf("c").with_leaf("d")),
        );
        let aggregator = SizeAggregator::new(&config, &metrics);
        let sized = aggregator.size_tree(&tree, 1, 0, 0.0).unwrap();
        assert_eq!(sized.result, aggregator.size(&tree, 1, 0, 0.0).unwrap());

        let root = &sized.entries[0];
        assert_eq!(root.children.len(), 2);
        assert!(root.children[0].children.is_empty());
        assert_eq!(root.children[1].children.len(), 2);
        assert_eq!(root.top, 0.0);
        assert_eq!(root.subtree_height(), sized.result.max_height);
        // b's children start one box and one gap below b
        assert_eq!(root.children[1].children[0].top, root.children[1].top + 24.0 + 30.0);
    }

    #[test]
    fn test_staggered_lane_stacks_vertically() {
        let config = LayoutConfig::builder().compact(true).ct(1).build().unwrap();
        let metrics = narrow();
        let lane = Hierarchy::new().with_leaf("a").with_leaf("b").with_leaf("c");
        let size = SizeAggregator::new(&config, &metrics)
            .size(&lane, 2, 1, 100.0)
            .unwrap();
        assert_eq!(size.width, 80.0);
        assert_eq!(size.lane_max, 80.0);
        assert_eq!(size.max_height, 100.0 + 3.0 * 24.0 + 2.0 * 30.0);
        assert_eq!(size.prev_height, size.max_height + 30.0);
    }

    #[test]
    fn test_sizes_are_translation_invariant() {
        let config = LayoutConfig::builder().compact(true).ct(1).build().unwrap();
        let metrics = narrow();
        let tree = Hierarchy::new().with_child(
            "root",
            Hierarchy::new()
                .with_leaf("a")
                .with_child("b", Hierarchy::new().with_leaf("c").with_leaf("d")),
        );
        let aggregator = SizeAggregator::new(&config, &metrics);
        let at_zero = aggregator.size(&tree, 1, 0, 0.0).unwrap();
        let shifted = aggregator.size(&tree, 1, 0, 40.0).unwrap();
        assert_eq!(at_zero.width, shifted.width);
        assert_eq!(at_zero.max_height + 40.0, shifted.max_height);
    }

    struct Failing;

    impl TextMetrics for Failing {
        fn measure(&self, text: &str, _font: &FontSpec) -> Result<crate::core::TextExtent> {
            Err(HierarchyError::metrics_error(text, "no font".to_string()))
        }
    }

    #[test]
    fn test_metrics_failure_propagates() {
        let config = LayoutConfig::default();
        let tree = Hierarchy::new().with_leaf("root");
        let err = SizeAggregator::new(&config, &Failing)
            .size(&tree, 1, 0, 0.0)
            .unwrap_err();
        assert!(matches!(err, HierarchyError::MetricsError { .. }));
    }
}
