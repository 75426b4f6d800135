//! Connected-component detection over the filtered node set.
//!
//! Components are found with an iterative depth-first walk seeded from each
//! unvisited filtered node in input order. Neighbors outside the filtered set
//! are skipped without being marked, so an edge only joins two nodes when both
//! endpoints are visible.

use std::cmp::Reverse;
use std::collections::HashSet;

use crate::graph::{Adjacency, NodeId};

/// A maximal connected group of filtered nodes.
///
/// Member order is DFS preorder; callers should only rely on membership.
pub type Cluster = Vec<NodeId>;

/// Partition `filtered` into clusters, largest first.
///
/// Ties keep discovery order (the sort is stable), so the result is fully
/// determined by the node order and the adjacency map. Duplicate ids in
/// `filtered` are counted once.
pub fn detect_clusters(filtered: &[NodeId], adjacency: &Adjacency) -> Vec<Cluster> {
    let members: HashSet<NodeId> = filtered.iter().copied().collect();
    let mut visited: HashSet<NodeId> = HashSet::with_capacity(members.len());
    let mut clusters: Vec<Cluster> = Vec::new();
    let mut stack: Vec<NodeId> = Vec::new();
    let mut scratch: Vec<NodeId> = Vec::new();

    for &seed in filtered {
        if visited.contains(&seed) {
            continue;
        }

        let mut cluster = Cluster::new();
        stack.push(seed);

        while let Some(node) = stack.pop() {
            if !visited.insert(node) {
                continue;
            }
            cluster.push(node);

            // Reverse so the first neighbor is walked first, matching a
            // recursive preorder.
            scratch.clear();
            scratch.extend(
                adjacency
                    .neighbors(node)
                    .filter(|n| members.contains(n) && !visited.contains(n)),
            );
            stack.extend(scratch.iter().rev());
        }

        clusters.push(cluster);
    }

    clusters.sort_by_key(|c| Reverse(c.len()));
    clusters
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, RelationKind};

    fn ids(raw: &[u32]) -> Vec<NodeId> {
        raw.iter().copied().map(NodeId).collect()
    }

    fn adjacency(pairs: &[(u32, u32)]) -> Adjacency {
        let edges: Vec<Edge> = pairs
            .iter()
            .enumerate()
            .map(|(i, &(a, b))| Edge::new(i as u32, a, b, RelationKind::Knows))
            .collect();
        Adjacency::build(&edges)
    }

    fn sorted(cluster: &Cluster) -> Vec<u32> {
        let mut raw: Vec<u32> = cluster.iter().map(|id| id.0).collect();
        raw.sort_unstable();
        raw
    }

    #[test]
    fn test_empty_filter() {
        let adj = adjacency(&[(0, 1)]);
        assert!(detect_clusters(&[], &adj).is_empty());
    }

    #[test]
    fn test_no_edges_gives_singletons() {
        let adj = adjacency(&[]);
        let clusters = detect_clusters(&ids(&[0, 1, 2, 3, 4, 5]), &adj);
        assert_eq!(clusters.len(), 6);
        assert!(clusters.iter().all(|c| c.len() == 1));
        // Equal sizes keep input order
        let order: Vec<u32> = clusters.iter().map(|c| c[0].0).collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_sorted_by_descending_size() {
        // {0}, {1,2}, {3,4,5}
        let adj = adjacency(&[(1, 2), (3, 4), (4, 5)]);
        let clusters = detect_clusters(&ids(&[0, 1, 2, 3, 4, 5]), &adj);
        let sizes: Vec<usize> = clusters.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![3, 2, 1]);
        assert_eq!(sorted(&clusters[0]), vec![3, 4, 5]);
        assert_eq!(sorted(&clusters[1]), vec![1, 2]);
        assert_eq!(sorted(&clusters[2]), vec![0]);
    }

    #[test]
    fn test_hidden_bridge_splits_cluster() {
        // 1 - 2 - 3, but 2 is filtered out
        let adj = adjacency(&[(1, 2), (2, 3)]);
        let clusters = detect_clusters(&ids(&[1, 3]), &adj);
        assert_eq!(clusters.len(), 2);
        assert!(clusters.iter().all(|c| c.len() == 1));
    }

    #[test]
    fn test_dfs_preorder() {
        // 0 -> {1, 2}, 1 -> 3
        let adj = adjacency(&[(0, 1), (0, 2), (1, 3)]);
        let clusters = detect_clusters(&ids(&[0, 1, 2, 3]), &adj);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0], ids(&[0, 1, 3, 2]));
    }

    #[test]
    fn test_cycle_visits_each_node_once() {
        let adj = adjacency(&[(0, 1), (1, 2), (2, 0)]);
        let clusters = detect_clusters(&ids(&[0, 1, 2]), &adj);
        assert_eq!(clusters.len(), 1);
        assert_eq!(sorted(&clusters[0]), vec![0, 1, 2]);
    }

    #[test]
    fn test_duplicate_ids_counted_once() {
        let adj = adjacency(&[(0, 1)]);
        let clusters = detect_clusters(&ids(&[0, 1, 0, 2]), &adj);
        let total: usize = clusters.iter().map(Vec::len).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn test_branching_chain_is_one_cluster() {
        let pairs: Vec<(u32, u32)> = vec![
            (0, 1), (0, 2), (1, 3), (3, 4), (2, 5), (5, 6), (6, 7),
            (4, 8), (8, 9), (9, 10), (2, 11), (11, 12), (12, 13), (13, 14),
        ];
        let adj = adjacency(&pairs);
        let nodes: Vec<u32> = (0..15).collect();
        let clusters = detect_clusters(&ids(&nodes), &adj);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].len(), 15);
    }
}
