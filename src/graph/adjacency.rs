//! Symmetric neighbor map built from the edge list.
//!
//! Backed by petgraph's `UnGraphMap`, which keys nodes by `NodeId` directly
//! and keeps neighbor lists in insertion order, so traversals over the map are
//! deterministic for a fixed edge list.

use petgraph::graphmap::UnGraphMap;

use super::edge::Edge;
use super::node::NodeId;

/// Undirected, unweighted adjacency.
///
/// Nodes that appear in no edge are absent; querying them yields an empty
/// neighbor set. Edges may reference nodes outside the current filtered set:
/// they still contribute adjacency, and consumers that walk the map decide
/// whether to follow them.
#[derive(Debug, Clone, Default)]
pub struct Adjacency {
    graph: UnGraphMap<NodeId, ()>,
}

impl Adjacency {
    /// Build the map in O(E). Parallel edges collapse into one neighbor entry.
    pub fn build(edges: &[Edge]) -> Self {
        let mut graph = UnGraphMap::with_capacity(edges.len(), edges.len());
        for edge in edges {
            graph.add_edge(edge.from, edge.to, ());
        }
        Self { graph }
    }

    /// Neighbors of `id`, in first-seen order.
    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.graph.neighbors(id)
    }

    /// Number of distinct neighbors.
    pub fn degree(&self, id: NodeId) -> usize {
        self.graph.neighbors(id).count()
    }

    /// Whether `a` and `b` share an edge.
    pub fn are_adjacent(&self, a: NodeId, b: NodeId) -> bool {
        self.graph.contains_edge(a, b)
    }

    /// Whether `id` appears in any edge.
    pub fn contains(&self, id: NodeId) -> bool {
        self.graph.contains_node(id)
    }

    /// Number of nodes that appear in at least one edge.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::RelationKind;

    fn edge(id: u32, from: u32, to: u32) -> Edge {
        Edge::new(id, from, to, RelationKind::Knows)
    }

    #[test]
    fn test_build_is_symmetric() {
        let adj = Adjacency::build(&[edge(0, 1, 2), edge(1, 1, 3)]);

        let of_1: Vec<_> = adj.neighbors(NodeId(1)).collect();
        assert_eq!(of_1, vec![NodeId(2), NodeId(3)]);
        assert_eq!(adj.neighbors(NodeId(2)).collect::<Vec<_>>(), vec![NodeId(1)]);
        assert_eq!(adj.neighbors(NodeId(3)).collect::<Vec<_>>(), vec![NodeId(1)]);
        assert!(adj.are_adjacent(NodeId(2), NodeId(1)));
        assert!(!adj.are_adjacent(NodeId(2), NodeId(3)));
    }

    #[test]
    fn test_isolated_node_is_absent() {
        let adj = Adjacency::build(&[edge(0, 1, 2)]);
        assert!(!adj.contains(NodeId(7)));
        assert_eq!(adj.degree(NodeId(7)), 0);
        assert_eq!(adj.neighbors(NodeId(7)).count(), 0);
    }

    #[test]
    fn test_parallel_edges_collapse() {
        let adj = Adjacency::build(&[
            edge(0, 1, 2),
            Edge::new(1, 2, 1, RelationKind::Referral),
            edge(2, 1, 2),
        ]);
        assert_eq!(adj.degree(NodeId(1)), 1);
        assert_eq!(adj.degree(NodeId(2)), 1);
        assert_eq!(adj.node_count(), 2);
    }

    #[test]
    fn test_dangling_endpoint_still_contributes() {
        // Node 99 is not part of any node list; the edge is kept anyway.
        let adj = Adjacency::build(&[edge(0, 1, 99)]);
        assert!(adj.contains(NodeId(99)));
        assert_eq!(adj.neighbors(NodeId(1)).collect::<Vec<_>>(), vec![NodeId(99)]);
    }

    #[test]
    fn test_empty() {
        let adj = Adjacency::build(&[]);
        assert!(adj.is_empty());
        assert_eq!(adj.node_count(), 0);
    }
}
