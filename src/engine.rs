//! NetworkMap - the stateful engine behind the JavaScript facade.
//!
//! Owns the host's node and edge lists, the filtered set, the canvas and the
//! [`LayoutState`]. Any change to the filter, edges or canvas triggers a full
//! relayout; pointer input only edits overrides and re-reads merged
//! positions. The hit-test index mirrors final positions and is patched
//! incrementally during a drag.

use std::collections::{HashMap, HashSet};

use crate::error::Result;
use crate::graph::{visible_edges, Adjacency, Edge, Node, NodeId, BASE_DIAMETER};
use crate::interaction::{Effect, Highlight, InteractionController, PointerEvent};
use crate::layout::{Canvas, Layout, LayoutConfig, Point};
use crate::spatial::SpatialIndex;
use crate::state::LayoutState;
use crate::traversal::{self, ChainEntry, Connection, NetworkStats};

/// Network map engine.
pub struct NetworkMap {
    /// Every known node, in host order.
    nodes: Vec<Node>,
    /// Node lookup by id, for sizing.
    by_id: HashMap<NodeId, Node>,
    edges: Vec<Edge>,
    adjacency: Adjacency,
    /// Nodes to lay out, in host order, without duplicates.
    filtered: Vec<NodeId>,
    canvas: Canvas,
    state: LayoutState,
    interaction: InteractionController,
    /// Hit-test index over final positions.
    spatial: SpatialIndex,
}

impl NetworkMap {
    /// Create an empty map with the default config.
    pub fn new() -> Self {
        Self::from_state(LayoutState::default())
    }

    /// Create an empty map after validating `config`.
    pub fn with_config(config: LayoutConfig) -> Result<Self> {
        Ok(Self::from_state(LayoutState::new(config)?))
    }

    fn from_state(state: LayoutState) -> Self {
        Self {
            nodes: Vec::new(),
            by_id: HashMap::new(),
            edges: Vec::new(),
            adjacency: Adjacency::default(),
            filtered: Vec::new(),
            canvas: Canvas::default(),
            state,
            interaction: InteractionController::new(),
            spatial: SpatialIndex::new(),
        }
    }

    // =========================================================================
    // Inputs
    // =========================================================================

    /// Replace the graph. The filter resets to every node.
    ///
    /// Later duplicates of a node id are ignored.
    pub fn set_graph(&mut self, nodes: Vec<Node>, edges: Vec<Edge>) {
        self.by_id.clear();
        self.nodes = nodes
            .into_iter()
            .filter(|node| self.by_id.insert(node.id, *node).is_none())
            .collect();
        self.filtered = self.nodes.iter().map(|n| n.id).collect();
        self.adjacency = Adjacency::build(&edges);
        self.edges = edges;
        self.relayout();
    }

    /// Narrow the laid-out set to `ids`, keeping their order.
    ///
    /// Ids not declared by [`NetworkMap::set_graph`] are ignored.
    pub fn set_filter(&mut self, ids: &[NodeId]) {
        let mut seen = HashSet::with_capacity(ids.len());
        self.filtered = ids
            .iter()
            .copied()
            .filter(|id| self.by_id.contains_key(id) && seen.insert(*id))
            .collect();
        self.relayout();
    }

    /// Lay out every known node again.
    pub fn clear_filter(&mut self) {
        self.filtered = self.nodes.iter().map(|n| n.id).collect();
        self.relayout();
    }

    pub fn resize(&mut self, canvas: Canvas) {
        self.canvas = canvas;
        self.relayout();
    }

    fn relayout(&mut self) {
        self.state.relayout(&self.filtered, &self.adjacency, self.canvas);
        self.interaction.retain_visible(&self.state);
        self.rebuild_spatial_index();
    }

    fn rebuild_spatial_index(&mut self) {
        let by_id = &self.by_id;
        self.spatial.rebuild(
            self.state
                .final_positions()
                .map(|(id, p)| (id, p, display_radius(by_id, id))),
        );
    }

    // =========================================================================
    // Outputs
    // =========================================================================

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn filtered(&self) -> &[NodeId] {
        &self.filtered
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn layout(&self) -> &Layout {
        self.state.layout()
    }

    pub fn state(&self) -> &LayoutState {
        &self.state
    }

    pub fn interaction(&self) -> &InteractionController {
        &self.interaction
    }

    /// Final position of `id`, override first.
    pub fn position(&self, id: NodeId) -> Option<Point> {
        self.state.final_position(id)
    }

    /// Final positions as `[x0, y0, x1, y1, ...]` in filter order.
    ///
    /// Empty when nothing was laid out (empty filter or degenerate canvas).
    pub fn positions(&self) -> Vec<f32> {
        if self.state.layout().is_empty() {
            return Vec::new();
        }
        self.filtered
            .iter()
            .filter_map(|id| self.state.final_position(*id))
            .flat_map(|p| [p.x, p.y])
            .collect()
    }

    pub fn cluster_count(&self) -> usize {
        self.state.layout().clusters().len()
    }

    /// Edges with both endpoints laid out.
    pub fn visible_edges(&self) -> Vec<&Edge> {
        let visible: HashSet<NodeId> = self.filtered.iter().copied().collect();
        visible_edges(&self.edges, &visible)
    }

    // =========================================================================
    // Pointer Input
    // =========================================================================

    /// Feed a pointer event, keeping the hit-test index in step with drags.
    pub fn pointer(&mut self, event: PointerEvent) -> Effect {
        let effect = self.interaction.handle(event, &mut self.state);
        if let Effect::Moved { id, position } = effect {
            self.spatial.relocate(id, position);
        }
        effect
    }

    /// Start a drag on whichever node is drawn under `(x, y)`.
    pub fn pointer_down_at(&mut self, x: f32, y: f32) -> Option<NodeId> {
        let id = self.spatial.hit_test(x, y)?;
        match self.pointer(PointerEvent::Down(id)) {
            Effect::DragStarted(id) => Some(id),
            _ => None,
        }
    }

    pub fn hit_test(&self, x: f32, y: f32) -> Option<NodeId> {
        self.spatial.hit_test(x, y)
    }

    pub fn select(&mut self, id: Option<NodeId>) -> Effect {
        self.interaction.select(id)
    }

    pub fn highlight(&self) -> Highlight {
        self.interaction.highlight(&self.adjacency, &self.edges)
    }

    // =========================================================================
    // Overrides
    // =========================================================================

    /// Pin `id` to `position`. The override is kept even for a node that is
    /// not laid out yet, until a relayout filters it away.
    ///
    /// Non-finite positions are ignored and return false.
    pub fn set_override(&mut self, id: NodeId, position: Point) -> bool {
        if !position.is_finite() {
            return false;
        }
        self.state.set_override(id, position);
        self.spatial.relocate(id, position);
        true
    }

    /// Drop the override for `id`; it falls back to its computed position.
    pub fn clear_override(&mut self, id: NodeId) -> bool {
        if self.state.clear_override(id).is_none() {
            return false;
        }
        if let Some(computed) = self.state.layout().position(id) {
            self.spatial.relocate(id, computed);
        }
        true
    }

    /// Drop every override.
    pub fn reset_layout(&mut self) {
        self.state.clear_overrides();
        self.rebuild_spatial_index();
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn connections_of(&self, id: NodeId) -> Vec<Connection> {
        traversal::connections_of(id, &self.edges)
    }

    pub fn referral_chain(&self, id: NodeId) -> Vec<ChainEntry> {
        let known: HashSet<NodeId> = self.by_id.keys().copied().collect();
        traversal::referral_chain(id, &self.edges, &known)
    }

    pub fn stats(&self) -> NetworkStats {
        traversal::network_stats(&self.nodes, &self.edges, self.state.layout())
    }
}

impl Default for NetworkMap {
    fn default() -> Self {
        Self::new()
    }
}

/// Hit radius for `id`; ids the host never declared get the base size.
fn display_radius(by_id: &HashMap<NodeId, Node>, id: NodeId) -> f32 {
    by_id
        .get(&id)
        .map_or(BASE_DIAMETER / 2.0, Node::display_radius)
}
