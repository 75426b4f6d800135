//! Host-owned layout state: the last computed layout plus manual overrides.
//!
//! The computed layout is derived data and is rebuilt from scratch on every
//! [`LayoutState::relayout`]. Overrides survive relayouts; an override is
//! dropped only when cleared explicitly or when its node leaves the filtered
//! set. Final positions are produced by merging the two, overrides winning.

use std::collections::{HashMap, HashSet};

use crate::error::Result;
use crate::graph::{Adjacency, NodeId};
use crate::layout::{compute_layout, Canvas, Layout, LayoutConfig, Point};

/// Sparse map of user-chosen positions.
pub type OverrideMap = HashMap<NodeId, Point>;

/// Overlay `overrides` on `layout`.
///
/// Total over the laid-out nodes: each gets its override when one exists and
/// its relaxed position otherwise. Overrides for nodes that were not laid out
/// are ignored.
pub fn merge_positions(layout: &Layout, overrides: &OverrideMap) -> HashMap<NodeId, Point> {
    layout
        .iter()
        .map(|(id, computed)| (id, overrides.get(&id).copied().unwrap_or(computed)))
        .collect()
}

/// Layout plus overrides, threaded through every pipeline run.
#[derive(Debug, Clone)]
pub struct LayoutState {
    config: LayoutConfig,
    layout: Layout,
    overrides: OverrideMap,
}

impl LayoutState {
    /// Create an empty state after validating `config`.
    pub fn new(config: LayoutConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            layout: Layout::empty(Canvas::default()),
            overrides: OverrideMap::new(),
        })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Recompute the layout for a new filter, edge set or canvas.
    ///
    /// Overrides whose node is no longer in `filtered` are dropped; the rest
    /// are kept and keep winning over the fresh layout.
    pub fn relayout(
        &mut self,
        filtered: &[NodeId],
        adjacency: &Adjacency,
        canvas: Canvas,
    ) -> &Layout {
        let visible: HashSet<NodeId> = filtered.iter().copied().collect();
        let before = self.overrides.len();
        self.overrides.retain(|id, _| visible.contains(id));
        if self.overrides.len() != before {
            tracing::debug!(
                dropped = before - self.overrides.len(),
                "dropped overrides for filtered-out nodes"
            );
        }

        self.layout = compute_layout(filtered, adjacency, canvas, &self.config);
        &self.layout
    }

    /// The last computed (relaxed, pre-merge) layout.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn canvas(&self) -> Canvas {
        self.layout.canvas()
    }

    pub fn overrides(&self) -> &OverrideMap {
        &self.overrides
    }

    /// Pin `id` to `position` until cleared.
    pub fn set_override(&mut self, id: NodeId, position: Point) {
        self.overrides.insert(id, position);
    }

    /// Remove the override for `id`, returning it if present.
    pub fn clear_override(&mut self, id: NodeId) -> Option<Point> {
        self.overrides.remove(&id)
    }

    /// Drop every override ("reset layout").
    pub fn clear_overrides(&mut self) {
        self.overrides.clear();
    }

    /// Final position of `id`: its override if set, else its relaxed position.
    /// `None` for nodes that were not laid out.
    pub fn final_position(&self, id: NodeId) -> Option<Point> {
        let computed = self.layout.position(id)?;
        Some(self.overrides.get(&id).copied().unwrap_or(computed))
    }

    /// Final positions in layout order.
    pub fn final_positions(&self) -> impl Iterator<Item = (NodeId, Point)> + '_ {
        self.layout
            .iter()
            .map(|(id, computed)| (id, self.overrides.get(&id).copied().unwrap_or(computed)))
    }

    /// Final positions keyed by node.
    pub fn merged(&self) -> HashMap<NodeId, Point> {
        merge_positions(&self.layout, &self.overrides)
    }
}

impl Default for LayoutState {
    fn default() -> Self {
        Self {
            config: LayoutConfig::default(),
            layout: Layout::empty(Canvas::default()),
            overrides: OverrideMap::new(),
        }
    }
}
