//! Pointer interaction: dragging nodes and neighbor highlighting.
//!
//! [`InteractionController`] is a two-state machine driven by
//! [`PointerEvent`]s:
//!
//! - **Idle**: hovering a node records it for highlighting; pointer-down on a
//!   laid-out node starts a drag.
//! - **Dragging**: pointer moves write the dragged node's override directly,
//!   clamped to the canvas; pointer-up returns to idle.
//!
//! A drag never recomputes the layout. It touches exactly one override, and
//! callers re-read merged positions from [`LayoutState`].

use std::collections::HashSet;

use crate::graph::{Adjacency, Edge, EdgeId, NodeId};
use crate::layout::Point;
use crate::state::LayoutState;

/// Input to the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// The pointer entered a node, or left all nodes (`None`).
    Hover(Option<NodeId>),
    /// Pointer pressed on a node.
    Down(NodeId),
    /// Pointer moved to canvas coordinates.
    Move { x: f32, y: f32 },
    /// Pointer released.
    Up,
}

/// Drag phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(NodeId),
}

/// What handling an event changed, so the host knows what to redraw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// Nothing changed.
    None,
    /// The hovered or selected node changed.
    HighlightChanged,
    DragStarted(NodeId),
    /// The dragged node's override moved to `position`.
    Moved { id: NodeId, position: Point },
    DragEnded(NodeId),
}

/// Rendering emphasis for a node or edge under the current highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    /// Nothing is hovered or selected.
    Normal,
    Highlighted,
    Dimmed,
}

/// Nodes and edges drawn at full opacity around the active node.
///
/// The node set is the active node plus its neighbors. An edge is
/// highlighted when both of its endpoints are.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Highlight {
    active: Option<NodeId>,
    nodes: HashSet<NodeId>,
    edges: HashSet<EdgeId>,
}

impl Highlight {
    /// Derive the highlight for `active`. Pure read of `adjacency`/`edges`.
    pub fn compute(active: Option<NodeId>, adjacency: &Adjacency, edges: &[Edge]) -> Self {
        let Some(center) = active else {
            return Self::default();
        };

        let mut nodes: HashSet<NodeId> = adjacency.neighbors(center).collect();
        nodes.insert(center);
        let edges = edges
            .iter()
            .filter(|e| nodes.contains(&e.from) && nodes.contains(&e.to))
            .map(|e| e.id)
            .collect();

        Self {
            active,
            nodes,
            edges,
        }
    }

    /// The hovered-or-selected node this highlight is centered on.
    pub fn active(&self) -> Option<NodeId> {
        self.active
    }

    pub fn nodes(&self) -> &HashSet<NodeId> {
        &self.nodes
    }

    pub fn edges(&self) -> &HashSet<EdgeId> {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_none()
    }

    pub fn node_emphasis(&self, id: NodeId) -> Emphasis {
        if self.is_empty() {
            Emphasis::Normal
        } else if self.nodes.contains(&id) {
            Emphasis::Highlighted
        } else {
            Emphasis::Dimmed
        }
    }

    pub fn edge_emphasis(&self, id: EdgeId) -> Emphasis {
        if self.is_empty() {
            Emphasis::Normal
        } else if self.edges.contains(&id) {
            Emphasis::Highlighted
        } else {
            Emphasis::Dimmed
        }
    }
}

/// Pointer state machine plus hover/selection tracking.
#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    drag: DragState,
    hovered: Option<NodeId>,
    selected: Option<NodeId>,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging(_))
    }

    pub fn hovered(&self) -> Option<NodeId> {
        self.hovered
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    /// Hovered node, falling back to the selected one.
    pub fn active_node(&self) -> Option<NodeId> {
        self.hovered.or(self.selected)
    }

    /// Feed one pointer event.
    pub fn handle(&mut self, event: PointerEvent, state: &mut LayoutState) -> Effect {
        match (self.drag, event) {
            (_, PointerEvent::Hover(id)) => {
                if self.hovered == id {
                    Effect::None
                } else {
                    self.hovered = id;
                    Effect::HighlightChanged
                }
            }
            (_, PointerEvent::Down(id)) => {
                if !state.layout().contains(id) {
                    return Effect::None;
                }
                tracing::debug!(%id, "drag started");
                self.drag = DragState::Dragging(id);
                Effect::DragStarted(id)
            }
            (DragState::Dragging(id), PointerEvent::Move { x, y }) => {
                let canvas = state.canvas();
                if canvas.is_degenerate() || !(x.is_finite() && y.is_finite()) {
                    return Effect::None;
                }
                let position = canvas.clamp(Point::new(x, y), state.config().drag_margin);
                state.set_override(id, position);
                Effect::Moved { id, position }
            }
            (DragState::Dragging(id), PointerEvent::Up) => {
                tracing::debug!(%id, "drag ended");
                self.drag = DragState::Idle;
                Effect::DragEnded(id)
            }
            (DragState::Idle, PointerEvent::Move { .. } | PointerEvent::Up) => Effect::None,
        }
    }

    /// Select a node (click), or clear the selection. Ignored mid-drag.
    pub fn select(&mut self, id: Option<NodeId>) -> Effect {
        if self.is_dragging() || self.selected == id {
            return Effect::None;
        }
        self.selected = id;
        Effect::HighlightChanged
    }

    /// Forget hover/selection/drag for nodes that are no longer laid out.
    pub fn retain_visible(&mut self, state: &LayoutState) {
        let layout = state.layout();
        if self.hovered.is_some_and(|id| !layout.contains(id)) {
            self.hovered = None;
        }
        if self.selected.is_some_and(|id| !layout.contains(id)) {
            self.selected = None;
        }
        if let DragState::Dragging(id) = self.drag {
            if !layout.contains(id) {
                self.drag = DragState::Idle;
            }
        }
    }

    /// Highlight around [`InteractionController::active_node`].
    pub fn highlight(&self, adjacency: &Adjacency, edges: &[Edge]) -> Highlight {
        Highlight::compute(self.active_node(), adjacency, edges)
    }
}
