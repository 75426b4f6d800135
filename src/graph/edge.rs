//! Edge type and related structures.
//!
//! Edges are unordered relationships between two nodes. The `from`/`to`
//! order and the relationship kind are carried through for rendering and for
//! the referral traversal; layout treats every edge as undirected and
//! unweighted.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::node::NodeId;

/// Stable edge identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(pub u32);

impl EdgeId {
    /// Create a new EdgeId from a raw u32.
    #[inline]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw u32 value.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Edge({})", self.0)
    }
}

impl From<u32> for EdgeId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Relationship tag. Opaque to layout.
///
/// Tags the map has no special handling for decode as [`RelationKind::Other`]
/// rather than failing the whole graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    /// `from` referred `to`.
    #[default]
    Referral,
    Knows,
    Fleet,
    WorksWith,
    Family,
    #[serde(other)]
    Other,
}

/// A relationship between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub from: NodeId,
    pub to: NodeId,
    #[serde(default)]
    pub kind: RelationKind,
}

impl Edge {
    pub fn new(
        id: impl Into<EdgeId>,
        from: impl Into<NodeId>,
        to: impl Into<NodeId>,
        kind: RelationKind,
    ) -> Self {
        Self {
            id: id.into(),
            from: from.into(),
            to: to.into(),
            kind,
        }
    }

    /// Whether `node` is one of the endpoints.
    #[inline]
    pub fn touches(&self, node: NodeId) -> bool {
        self.from == node || self.to == node
    }

    /// The endpoint opposite `node`, or `None` if `node` is not an endpoint.
    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if self.from == node {
            Some(self.to)
        } else if self.to == node {
            Some(self.from)
        } else {
            None
        }
    }
}

/// Edges whose endpoints are both in `visible`, in input order.
///
/// These are the edges a renderer draws; the rest stay inert until both
/// endpoints come back into the filtered set.
pub fn visible_edges<'a>(edges: &'a [Edge], visible: &HashSet<NodeId>) -> Vec<&'a Edge> {
    edges
        .iter()
        .filter(|e| visible.contains(&e.from) && visible.contains(&e.to))
        .collect()
}
