//! Read-only relationship queries for detail panels.
//!
//! Nothing here feeds the layout pipeline. The referral chain is the one place
//! edge direction and kind matter, and it still walks referral edges both
//! ways.

use std::collections::{HashSet, VecDeque};

use serde::Serialize;

use crate::graph::{Edge, EdgeId, Node, NodeId, RelationKind};
use crate::layout::Layout;

/// One edge touching a node, seen from that node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub edge: EdgeId,
    pub other: NodeId,
    pub kind: RelationKind,
    /// The node is the edge's `from` endpoint.
    pub is_source: bool,
}

/// Every edge touching `id`, in edge-list order.
pub fn connections_of(id: NodeId, edges: &[Edge]) -> Vec<Connection> {
    edges
        .iter()
        .filter_map(|edge| {
            let other = edge.other(id)?;
            Some(Connection {
                edge: edge.id,
                other,
                kind: edge.kind,
                is_source: edge.from == id,
            })
        })
        .collect()
}

/// A node reached by [`referral_chain`] and its hop count from the start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChainEntry {
    pub node: NodeId,
    pub depth: u32,
}

/// Breadth-first walk from `start` over `Referral` edges in either direction.
///
/// Neighbors are discovered in edge-list order. Ids missing from `known` are
/// walked through but not reported, so a chain can bridge a node the host
/// does not know about.
pub fn referral_chain(start: NodeId, edges: &[Edge], known: &HashSet<NodeId>) -> Vec<ChainEntry> {
    let referrals: Vec<&Edge> = edges
        .iter()
        .filter(|e| e.kind == RelationKind::Referral)
        .collect();

    let mut chain = Vec::new();
    let mut visited = HashSet::from([start]);
    let mut queue = VecDeque::from([(start, 0u32)]);

    while let Some((node, depth)) = queue.pop_front() {
        if known.contains(&node) {
            chain.push(ChainEntry { node, depth });
        }
        for edge in &referrals {
            if let Some(next) = edge.other(node) {
                if visited.insert(next) {
                    queue.push_back((next, depth + 1));
                }
            }
        }
    }

    chain
}

/// Summary counts for a stats bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStats {
    /// All known nodes, filtered or not.
    pub nodes: usize,
    pub referral_links: usize,
    /// Distinct fleet-edge endpoints, counted in pairs (rounded up).
    pub fleet_groups: usize,
    /// Clusters in the last layout.
    pub clusters: usize,
}

pub fn network_stats(nodes: &[Node], edges: &[Edge], layout: &Layout) -> NetworkStats {
    let referral_links = edges
        .iter()
        .filter(|e| e.kind == RelationKind::Referral)
        .count();
    let fleet_members: HashSet<NodeId> = edges
        .iter()
        .filter(|e| e.kind == RelationKind::Fleet)
        .flat_map(|e| [e.from, e.to])
        .collect();

    NetworkStats {
        nodes: nodes.len(),
        referral_links,
        fleet_groups: fleet_members.len().div_ceil(2),
        clusters: layout.clusters().len(),
    }
}
