//! Top-down placement pass
//!
//! Walks the hierarchy in insertion order and paints every node onto a
//! [`Backend`]: its box, the connector from its parent (below the root
//! level), then its label. Extents come from the [`SizedGroup`] the canvas
//! was dimensioned with, so positions always agree with the surface size and
//! no subtree is measured twice.

use tracing::{debug, span, trace, Level};

use super::{
    child_lane, entry_leaf_count, group_staggers, EntrySize, Hierarchy, SizeAggregator, SizedGroup,
};
use crate::core::{
    Backend, Connector, ConnectorMode, DrawStyles, HierarchyError, LayoutConfig, Placement, Point,
    Result, TextMetrics,
};

/// Position threaded through the placement pass
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cursor {
    pub x: f64,
    pub y: f64,
}

impl Cursor {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Route a connector between a parent box and one of its children
///
/// Staggered children hang off a vertical rail half a lane step inside the
/// parent's left edge. Side-by-side children get a centred elbow through
/// the middle of the vertical gap.
pub fn connector_path(
    parent: &Placement,
    child: &Placement,
    mode: ConnectorMode,
    config: &LayoutConfig,
) -> Connector {
    let half_stroke = config.stroke_width / 2.0;
    let points = match mode {
        ConnectorMode::Staggered => {
            let rail = parent.x + config.xt / 2.0;
            vec![
                Point::new(rail, parent.bottom() + half_stroke),
                Point::new(rail, child.mid_y()),
                Point::new(child.x - half_stroke, child.mid_y()),
            ]
        }
        ConnectorMode::Elbow => {
            let tier = parent.bottom() + config.yt / 2.0;
            vec![
                Point::new(parent.center_x(), parent.bottom() + half_stroke),
                Point::new(parent.center_x(), tier),
                Point::new(child.center_x(), tier),
                Point::new(child.center_x(), child.y - half_stroke),
            ]
        }
    };
    Connector {
        from: *parent,
        to: *child,
        mode,
        points,
    }
}

/// Depth and lane of a sibling group being placed
///
/// `lane_left` is the left edge lane offsets are measured from; it only
/// matters for a staggered group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupSlot {
    pub depth: usize,
    pub lane: usize,
    pub lane_left: f64,
}

/// Paints a hierarchy onto a backend
pub struct LayoutDriver<'a, M: TextMetrics + ?Sized, B: Backend + ?Sized> {
    aggregator: SizeAggregator<'a, M>,
    styles: DrawStyles,
    backend: &'a mut B,
    drawn: usize,
}

impl<'a, M: TextMetrics + ?Sized, B: Backend + ?Sized> LayoutDriver<'a, M, B> {
    pub fn new(config: &'a LayoutConfig, metrics: &'a M, backend: &'a mut B) -> Self {
        Self {
            aggregator: SizeAggregator::new(config, metrics),
            styles: DrawStyles::from_config(config),
            backend,
            drawn: 0,
        }
    }

    /// Number of boxes drawn so far
    pub fn drawn(&self) -> usize {
        self.drawn
    }

    /// Size the hierarchy, then place it with [`place_sized`](Self::place_sized)
    pub fn place_root(&mut self, root: &Hierarchy) -> Result<Cursor> {
        let sized = self.aggregator.size_tree(root, 1, 0, 0.0)?;
        self.place_sized(root, &sized)
    }

    /// Place the top-level group at the canvas origin from its sizing pass
    ///
    /// Returns the cursor after the group: x past its last slot, y at the
    /// bottom of its lowest box.
    pub fn place_sized(&mut self, root: &Hierarchy, sized: &SizedGroup) -> Result<Cursor> {
        let config = self.aggregator.config();
        let origin = Cursor::new(
            config.canvas_padding + config.box_spacing,
            config.canvas_padding + config.stroke_width / 2.0,
        );
        let span = span!(Level::DEBUG, "place", entries = root.len());
        let _enter = span.enter();

        let group = GroupSlot {
            depth: 1,
            lane: 0,
            lane_left: origin.x,
        };
        let end = self.place_group(root, &sized.entries, group, origin, None)?;
        debug!(boxes = self.drawn, end_x = end.x, end_y = end.y, "Placed hierarchy");
        Ok(end)
    }

    /// Place the group `children` starting at `cursor`
    ///
    /// `sizes` holds one entry per child, as produced by the sizing pass.
    pub fn place_group(
        &mut self,
        children: &Hierarchy,
        sizes: &[EntrySize],
        group: GroupSlot,
        cursor: Cursor,
        parent: Option<&Placement>,
    ) -> Result<Cursor> {
        let GroupSlot {
            depth,
            lane,
            lane_left,
        } = group;
        let config = self.aggregator.config();
        if sizes.len() != children.len() {
            return Err(HierarchyError::render_error(format!(
                "sized {} entries for a group of {} at depth {depth}",
                sizes.len(),
                children.len()
            )));
        }
        let stagger = group_staggers(children, depth, config);
        let (xt, yt) = (config.xt, config.yt);
        let half_stroke = config.stroke_width / 2.0;
        let (pitch, frame) = (config.column_pitch(), config.column_frame());
        let (ct, compact) = (config.ct, config.compact);

        let mut x = cursor.x;
        let mut y = cursor.y;
        let mut bottom = cursor.y;

        for ((label, node), entry) in children.entries().zip(sizes) {
            let label_box = &entry.label_box;
            let entry_bottom = y + entry.subtree_height();
            let child_stagger = !node.is_leaf() && group_staggers(node, depth + 1, config);

            let (bx, slot_left, slot_width) = if stagger {
                let slot_left = lane_left + lane as f64 * xt;
                (slot_left + half_stroke, slot_left, 0.0)
            } else {
                let columns = entry_leaf_count(node, depth, ct, compact) as f64;
                let bx = if child_stagger {
                    x + half_stroke
                } else {
                    x + (entry.extent + columns * frame - label_box.width) / 2.0
                };
                (bx, x, entry.extent + columns * pitch)
            };

            let placement = Placement::new(bx, y, label_box.width, label_box.height);
            trace!(label = %label, depth, lane, x = bx, y, "Placing box");
            self.backend.draw_box(&placement, &self.styles.boxes)?;
            if let Some(parent) = parent {
                let mode = if stagger {
                    ConnectorMode::Staggered
                } else {
                    ConnectorMode::Elbow
                };
                let connector = connector_path(parent, &placement, mode, config);
                self.backend.draw_connector(&connector, &self.styles.lines)?;
            }
            self.backend.draw_text(
                &label_box.lines,
                Point::new(bx + config.box_padding, y + config.box_padding),
                label_box.line_height,
                &self.styles.text,
            )?;
            self.drawn += 1;

            if !node.is_leaf() {
                let child_left = if stagger && child_stagger {
                    lane_left
                } else {
                    slot_left
                };
                let below = Cursor::new(child_left, y + label_box.height + yt);
                let child_group = GroupSlot {
                    depth: depth + 1,
                    lane: child_lane(stagger, child_stagger, lane),
                    lane_left: child_left,
                };
                self.place_group(node, &entry.children, child_group, below, Some(&placement))?;
            }

            bottom = bottom.max(entry_bottom);
            if stagger {
                y = entry_bottom + yt;
            } else {
                x += slot_width;
            }
        }

        Ok(Cursor::new(x, bottom))
    }
}
