//! R-tree based hit testing using the rstar crate.
//!
//! Each node is indexed as a disc: its final position plus its display
//! radius. Queries resolve pointer coordinates to the node drawn under them.

use std::collections::HashMap;

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use crate::graph::NodeId;
use crate::layout::Point;

/// A node disc in the spatial index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeDisc {
    /// The node identifier.
    pub id: NodeId,
    /// Center X coordinate.
    pub x: f32,
    /// Center Y coordinate.
    pub y: f32,
    /// Hit radius.
    pub radius: f32,
}

impl NodeDisc {
    pub fn new(id: NodeId, center: Point, radius: f32) -> Self {
        Self {
            id,
            x: center.x,
            y: center.y,
            radius,
        }
    }
}

impl RTreeObject for NodeDisc {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.x, self.y])
    }
}

impl PointDistance for NodeDisc {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.x - point[0];
        let dy = self.y - point[1];
        dx * dx + dy * dy
    }
}

/// Spatial index over final node positions.
#[derive(Default)]
pub struct SpatialIndex {
    tree: RTree<NodeDisc>,
    /// Current entry per node, so a drag can relocate without a rebuild.
    entries: HashMap<NodeId, NodeDisc>,
    /// Largest radius in the index; bounds the candidate search.
    max_radius: f32,
}

impl SpatialIndex {
    /// Create a new empty spatial index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the index from `(id, center, radius)` triples.
    pub fn rebuild<I>(&mut self, discs: I)
    where
        I: IntoIterator<Item = (NodeId, Point, f32)>,
    {
        self.entries.clear();
        self.max_radius = 0.0;
        for (id, center, radius) in discs {
            self.max_radius = self.max_radius.max(radius);
            self.entries.insert(id, NodeDisc::new(id, center, radius));
        }
        self.tree = RTree::bulk_load(self.entries.values().copied().collect());
    }

    /// Move an indexed node to a new center in O(log n).
    ///
    /// Returns false if the node is not indexed.
    pub fn relocate(&mut self, id: NodeId, center: Point) -> bool {
        let Some(old) = self.entries.get(&id).copied() else {
            return false;
        };
        self.tree.remove(&old);
        let moved = NodeDisc::new(id, center, old.radius);
        self.tree.insert(moved);
        self.entries.insert(id, moved);
        true
    }

    /// The node whose disc contains `(x, y)`, closest center first.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<NodeId> {
        let reach = self.max_radius * self.max_radius;
        self.tree
            .locate_within_distance([x, y], reach)
            .map(|disc| (disc, disc.distance_2(&[x, y])))
            .filter(|(disc, d2)| *d2 <= disc.radius * disc.radius)
            .min_by(|a, b| a.1.total_cmp(&b.1).then(a.0.id.cmp(&b.0.id)))
            .map(|(disc, _)| disc.id)
    }

    /// Get the number of nodes in the index.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
