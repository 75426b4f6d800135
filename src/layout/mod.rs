//! Cluster layout pipeline.
//!
//! Stages, each consuming the previous one's output:
//!
//! 1. [`detect_clusters`] partitions the filtered nodes into connected
//!    components, largest first.
//! 2. [`plan_clusters`] gives every node a ring position.
//! 3. [`relax`] pushes overlapping nodes apart and clamps to the canvas.
//!
//! [`compute_layout`] runs them end to end. It is pure: the same nodes,
//! adjacency, canvas and config always give the same [`Layout`].

pub mod clusters;
pub mod config;
pub mod planner;
pub mod relax;

use std::collections::HashMap;

pub use clusters::{detect_clusters, Cluster};
pub use config::{Canvas, LayoutConfig, Point};
pub use planner::{plan_clusters, Arrangement, Plan};
pub use relax::{relax, RelaxStats};

use crate::graph::{Adjacency, NodeId};

/// Output of one pipeline run.
#[derive(Debug, Clone)]
pub struct Layout {
    canvas: Canvas,
    arrangement: Arrangement,
    clusters: Vec<Cluster>,
    /// Laid-out nodes in cluster order.
    order: Vec<NodeId>,
    positions: HashMap<NodeId, Point>,
}

impl Layout {
    /// A layout with no positions.
    pub fn empty(canvas: Canvas) -> Self {
        Self {
            canvas,
            arrangement: Arrangement::Empty,
            clusters: Vec::new(),
            order: Vec::new(),
            positions: HashMap::new(),
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn arrangement(&self) -> Arrangement {
        self.arrangement
    }

    /// Clusters, largest first.
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// Relaxed position of `id`, if it was laid out.
    pub fn position(&self, id: NodeId) -> Option<Point> {
        self.positions.get(&id).copied()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.positions.contains_key(&id)
    }

    /// Relaxed positions in cluster order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, Point)> + '_ {
        self.order.iter().map(|id| (*id, self.positions[id]))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Run detection, planning and relaxation for the filtered nodes.
///
/// An empty filter or a degenerate canvas yields an empty layout.
pub fn compute_layout(
    filtered: &[NodeId],
    adjacency: &Adjacency,
    canvas: Canvas,
    config: &LayoutConfig,
) -> Layout {
    if filtered.is_empty() {
        return Layout::empty(canvas);
    }
    if canvas.is_degenerate() {
        tracing::warn!(
            width = canvas.width,
            height = canvas.height,
            "degenerate canvas, skipping layout"
        );
        return Layout::empty(canvas);
    }

    let clusters = detect_clusters(filtered, adjacency);
    let Plan {
        arrangement,
        mut positions,
    } = plan_clusters(&clusters, canvas, config);
    let stats = relax(&mut positions, canvas, config);

    tracing::debug!(
        nodes = positions.len(),
        clusters = clusters.len(),
        ?arrangement,
        iterations = stats.iterations,
        "layout computed"
    );

    let order: Vec<NodeId> = positions.iter().map(|&(id, _)| id).collect();
    Layout {
        canvas,
        arrangement,
        clusters,
        order,
        positions: positions.into_iter().collect(),
    }
}
