//! Network Map - WASM Module
//!
//! Cluster-aware layout for relationship maps: connected components are
//! detected, arranged on rings, relaxed apart, and overlaid with positions
//! the user dragged by hand. Compiled to WebAssembly and exposed to
//! JavaScript via wasm-bindgen.
//!
//! # Architecture
//!
//! - `graph`: Node/edge value types and the undirected adjacency (petgraph)
//! - `layout`: Cluster detection, ring planning and overlap relaxation
//! - `state`: Computed layout plus manual overrides, and their merge
//! - `interaction`: Drag state machine, hover/selection and highlighting
//! - `spatial`: R-tree spatial indexing for O(log n) hit testing
//! - `traversal`: Connection listing, referral chains and stats
//! - `engine`: `NetworkMap`, the stateful engine wrapped by the facade

use js_sys::Float32Array;
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

pub mod engine;
pub mod error;
pub mod graph;
pub mod interaction;
pub mod layout;
pub mod spatial;
pub mod state;
pub mod traversal;

use engine::NetworkMap;
use error::Error;
use graph::{Edge, Node, NodeId};
use interaction::{Effect, PointerEvent};
use layout::{Canvas, LayoutConfig, Point};

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn decode<T: DeserializeOwned>(what: &'static str, value: JsValue) -> error::Result<T> {
    serde_wasm_bindgen::from_value(value).map_err(|e| Error::Decode {
        what,
        message: e.to_string(),
    })
}

fn encode<T: Serialize>(what: &'static str, value: &T) -> error::Result<JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| Error::Encode {
        what,
        message: e.to_string(),
    })
}

/// Highlight as handed to JavaScript: sorted id lists.
#[derive(Serialize)]
struct HighlightView {
    active: Option<u32>,
    nodes: Vec<u32>,
    edges: Vec<u32>,
}

/// One merged position keyed by node.
#[derive(Serialize)]
struct PositionEntry {
    id: u32,
    x: f32,
    y: f32,
}

/// Main entry point for the network map.
///
/// This struct wraps the internal NetworkMap and provides the public API
/// exposed to JavaScript.
#[wasm_bindgen]
pub struct NetworkMapWasm {
    map: NetworkMap,
}

#[wasm_bindgen]
impl NetworkMapWasm {
    /// Create an empty map with the default layout constants.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            map: NetworkMap::new(),
        }
    }

    /// Create an empty map from a partial `LayoutConfig` object.
    ///
    /// Missing fields take their defaults; invalid values throw.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config: JsValue) -> Result<NetworkMapWasm, JsError> {
        let config: LayoutConfig = decode("layout config", config)?;
        Ok(Self {
            map: NetworkMap::with_config(config)?,
        })
    }

    // =========================================================================
    // Graph Input
    // =========================================================================

    /// Replace the graph and lay out every node.
    ///
    /// # Arguments
    ///
    /// * `nodes` - Array of `{ id, weight? }`
    /// * `edges` - Array of `{ id, from, to, kind? }`; `kind` is one of
    ///   `referral`, `knows`, `fleet`, `works_with`, `family`, and any other
    ///   tag reads back as `other`
    #[wasm_bindgen(js_name = setGraph)]
    pub fn set_graph(&mut self, nodes: JsValue, edges: JsValue) -> Result<(), JsError> {
        let nodes: Vec<Node> = decode("nodes", nodes)?;
        let edges: Vec<Edge> = decode("edges", edges)?;
        self.map.set_graph(nodes, edges);
        Ok(())
    }

    /// Restrict the layout to the given node ids (search/status filter).
    #[wasm_bindgen(js_name = setFilter)]
    pub fn set_filter(&mut self, ids: &[u32]) {
        let ids: Vec<NodeId> = ids.iter().copied().map(NodeId).collect();
        self.map.set_filter(&ids);
    }

    /// Lay out every node again.
    #[wasm_bindgen(js_name = clearFilter)]
    pub fn clear_filter(&mut self) {
        self.map.clear_filter();
    }

    /// Set the canvas size and relayout.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.map.resize(Canvas::new(width, height));
    }

    // =========================================================================
    // Layout Output
    // =========================================================================

    /// Final positions as [x0, y0, x1, y1, ...] in filter order.
    ///
    /// Empty when the canvas admits no layout.
    pub fn positions(&self) -> Float32Array {
        Float32Array::from(&self.map.positions()[..])
    }

    /// Final positions as an array of `{ id, x, y }`.
    #[wasm_bindgen(js_name = positionsMap)]
    pub fn positions_map(&self) -> Result<JsValue, JsError> {
        let entries: Vec<PositionEntry> = self
            .map
            .state()
            .final_positions()
            .map(|(id, p)| PositionEntry {
                id: id.raw(),
                x: p.x,
                y: p.y,
            })
            .collect();
        Ok(encode("positions", &entries)?)
    }

    /// Final position of one node as `[x, y]`, or undefined.
    #[wasm_bindgen(js_name = getPosition)]
    pub fn get_position(&self, node_id: u32) -> Option<Vec<f32>> {
        self.map
            .position(NodeId(node_id))
            .map(|p| vec![p.x, p.y])
    }

    #[wasm_bindgen(js_name = clusterCount)]
    pub fn cluster_count(&self) -> u32 {
        self.map.cluster_count() as u32
    }

    /// Ids of edges with both endpoints in the filter, in input order.
    #[wasm_bindgen(js_name = visibleEdges)]
    pub fn visible_edges(&self) -> Vec<u32> {
        self.map.visible_edges().iter().map(|e| e.id.raw()).collect()
    }

    // =========================================================================
    // Pointer Input
    // =========================================================================

    /// Pointer entered a node, or left all nodes. Returns true if the
    /// highlight changed.
    #[wasm_bindgen(js_name = pointerHover)]
    pub fn pointer_hover(&mut self, node_id: Option<u32>) -> bool {
        self.map.pointer(PointerEvent::Hover(node_id.map(NodeId))) == Effect::HighlightChanged
    }

    /// Select a node (click), or clear the selection with undefined.
    pub fn select(&mut self, node_id: Option<u32>) -> bool {
        self.map.select(node_id.map(NodeId)) == Effect::HighlightChanged
    }

    /// Start dragging a node. Returns false if it is not laid out.
    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, node_id: u32) -> bool {
        matches!(
            self.map.pointer(PointerEvent::Down(NodeId(node_id))),
            Effect::DragStarted(_)
        )
    }

    /// Start dragging whichever node is under the pointer.
    ///
    /// Returns the node id, or undefined on empty canvas.
    #[wasm_bindgen(js_name = pointerDownAt)]
    pub fn pointer_down_at(&mut self, x: f32, y: f32) -> Option<u32> {
        self.map.pointer_down_at(x, y).map(NodeId::raw)
    }

    /// Move the dragged node. Returns true if a position changed.
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        matches!(
            self.map.pointer(PointerEvent::Move { x, y }),
            Effect::Moved { .. }
        )
    }

    /// End the drag. Returns true if one was in progress.
    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self) -> bool {
        matches!(self.map.pointer(PointerEvent::Up), Effect::DragEnded(_))
    }

    #[wasm_bindgen(js_name = isDragging)]
    pub fn is_dragging(&self) -> bool {
        self.map.interaction().is_dragging()
    }

    /// Node drawn under `(x, y)`, if any.
    #[wasm_bindgen(js_name = hitTest)]
    pub fn hit_test(&self, x: f32, y: f32) -> Option<u32> {
        self.map.hit_test(x, y).map(NodeId::raw)
    }

    /// Current highlight as `{ active, nodes, edges }`.
    pub fn highlight(&self) -> Result<JsValue, JsError> {
        let highlight = self.map.highlight();
        let mut nodes: Vec<u32> = highlight.nodes().iter().map(|id| id.raw()).collect();
        let mut edges: Vec<u32> = highlight.edges().iter().map(|id| id.raw()).collect();
        nodes.sort_unstable();
        edges.sort_unstable();
        let view = HighlightView {
            active: highlight.active().map(NodeId::raw),
            nodes,
            edges,
        };
        Ok(encode("highlight", &view)?)
    }

    // =========================================================================
    // Overrides
    // =========================================================================

    /// Pin a node to a position until cleared or filtered away.
    ///
    /// Coordinates are stored as f32, like every position this module
    /// returns: `50.1` reads back as `50.099998`. Returns false, leaving the
    /// node untouched, when either coordinate is NaN or infinite.
    #[wasm_bindgen(js_name = setOverride)]
    pub fn set_override(&mut self, node_id: u32, x: f32, y: f32) -> bool {
        self.map.set_override(NodeId(node_id), Point::new(x, y))
    }

    /// Return a node to its computed position.
    #[wasm_bindgen(js_name = clearOverride)]
    pub fn clear_override(&mut self, node_id: u32) -> bool {
        self.map.clear_override(NodeId(node_id))
    }

    /// Drop every override.
    #[wasm_bindgen(js_name = resetLayout)]
    pub fn reset_layout(&mut self) {
        self.map.reset_layout();
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Edges touching a node as `{ edge, other, kind, isSource }`.
    #[wasm_bindgen(js_name = connectionsOf)]
    pub fn connections_of(&self, node_id: u32) -> Result<JsValue, JsError> {
        Ok(encode("connections", &self.map.connections_of(NodeId(node_id)))?)
    }

    /// Nodes reachable over referral edges as `{ node, depth }`, BFS order.
    #[wasm_bindgen(js_name = referralChain)]
    pub fn referral_chain(&self, node_id: u32) -> Result<JsValue, JsError> {
        Ok(encode("referral chain", &self.map.referral_chain(NodeId(node_id)))?)
    }

    /// `{ nodes, referralLinks, fleetGroups, clusters }`.
    pub fn stats(&self) -> Result<JsValue, JsError> {
        Ok(encode("stats", &self.map.stats())?)
    }
}

impl Default for NetworkMapWasm {
    fn default() -> Self {
        Self::new()
    }
}
