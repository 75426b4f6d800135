//! Initial placement of clusters and their members.
//!
//! Two arrangements:
//!
//! - **Single ring**: one cluster small enough to read as a ring is spread
//!   around the canvas center.
//! - **Ring of rings**: cluster centers sit evenly on an outer ring, largest
//!   cluster at 12 o'clock and the rest clockwise in size order. Each cluster
//!   spreads its members on its own sub-ring; singletons sit on their center.
//!
//! Every ring starts at 12 o'clock: member `i` of `n` sits at angle
//! `2π·i/n − π/2`.

use std::f32::consts::{FRAC_PI_2, TAU};

use super::clusters::Cluster;
use super::config::{Canvas, LayoutConfig, Point};
use crate::graph::NodeId;

/// Which placement branch produced a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrangement {
    /// Nothing to place.
    Empty,
    /// One cluster on a single ring around the canvas center.
    SingleRing,
    /// Cluster centers on an outer ring, members on sub-rings.
    RingOfRings,
}

/// Planned positions in cluster order.
#[derive(Debug, Clone)]
pub struct Plan {
    pub arrangement: Arrangement,
    pub positions: Vec<(NodeId, Point)>,
}

/// Usable radius around the canvas center: `min(w, h)/2 − padding − margin`,
/// floored at zero.
pub fn max_radius(canvas: Canvas, config: &LayoutConfig) -> f32 {
    (canvas.width.min(canvas.height) / 2.0 - config.padding - config.ring_margin).max(0.0)
}

/// Angle of slot `i` out of `n` on a ring starting at 12 o'clock.
#[inline]
pub fn ring_angle(i: usize, n: usize) -> f32 {
    TAU * i as f32 / n as f32 - FRAC_PI_2
}

/// Assign a pre-relaxation position to every clustered node.
///
/// `clusters` must already be sorted largest first; the first cluster takes
/// the 12 o'clock slot.
pub fn plan_clusters(clusters: &[Cluster], canvas: Canvas, config: &LayoutConfig) -> Plan {
    let node_count: usize = clusters.iter().map(Vec::len).sum();
    let mut positions = Vec::with_capacity(node_count);

    if node_count == 0 {
        return Plan {
            arrangement: Arrangement::Empty,
            positions,
        };
    }

    let center = canvas.center();
    let usable = max_radius(canvas, config);

    if let [only] = clusters {
        if only.len() <= config.single_ring_max_nodes {
            let radius = (only.len() as f32 * config.single_ring_spacing)
                .max(config.single_ring_min_radius)
                .min(usable);
            place_on_ring(only, center, radius, &mut positions);
            return Plan {
                arrangement: Arrangement::SingleRing,
                positions,
            };
        }
    }

    let count = clusters.len();
    // A lone oversized cluster stays centered instead of sliding to 12 o'clock.
    let center_distance = if count == 1 {
        0.0
    } else {
        usable * config.cluster_ring_factor
    };
    let sub_ring_cap = usable * config.sub_ring_max_factor;

    for (ci, cluster) in clusters.iter().enumerate() {
        let angle = ring_angle(ci, count);
        let cluster_center = Point::new(
            center.x + angle.cos() * center_distance,
            center.y + angle.sin() * center_distance,
        );

        if let [single] = cluster.as_slice() {
            positions.push((*single, cluster_center));
            continue;
        }

        let radius = (cluster.len() as f32 * config.sub_ring_spacing)
            .max(config.sub_ring_min_radius)
            .min(sub_ring_cap);
        place_on_ring(cluster, cluster_center, radius, &mut positions);
    }

    Plan {
        arrangement: Arrangement::RingOfRings,
        positions,
    }
}

/// Spread `members` evenly around `center`.
fn place_on_ring(members: &[NodeId], center: Point, radius: f32, out: &mut Vec<(NodeId, Point)>) {
    let n = members.len();
    for (i, &id) in members.iter().enumerate() {
        let angle = ring_angle(i, n);
        out.push((
            id,
            Point::new(center.x + angle.cos() * radius, center.y + angle.sin() * radius),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    fn cluster(range: std::ops::Range<u32>) -> Cluster {
        range.map(NodeId).collect()
    }

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < EPS, "expected {b}, got {a}");
    }

    #[test]
    fn test_empty() {
        let plan = plan_clusters(&[], Canvas::default(), &LayoutConfig::default());
        assert_eq!(plan.arrangement, Arrangement::Empty);
        assert!(plan.positions.is_empty());
    }

    #[test]
    fn test_max_radius() {
        let config = LayoutConfig::default();
        // 600/2 - 60 - 40
        assert_close(max_radius(Canvas::new(900.0, 600.0), &config), 200.0);
        assert_close(max_radius(Canvas::new(100.0, 100.0), &config), 0.0);
    }

    #[test]
    fn test_single_ring_radius_is_clamped_to_max_radius() {
        let config = LayoutConfig::default();
        let canvas = Canvas::new(900.0, 600.0);
        let clusters = vec![cluster(0..15)];
        let plan = plan_clusters(&clusters, canvas, &config);

        assert_eq!(plan.arrangement, Arrangement::SingleRing);
        assert_eq!(plan.positions.len(), 15);
        // max(120, 15 * 22) = 330, clamped to 200
        for &(_, p) in &plan.positions {
            assert_close(p.distance(canvas.center()), 200.0);
        }
    }

    #[test]
    fn test_single_ring_unclamped_on_large_canvas() {
        let config = LayoutConfig::default();
        let canvas = Canvas::new(2000.0, 2000.0);
        let clusters = vec![cluster(0..15)];
        let plan = plan_clusters(&clusters, canvas, &config);
        for &(_, p) in &plan.positions {
            assert_close(p.distance(canvas.center()), 330.0);
        }
    }

    #[test]
    fn test_first_node_at_twelve_oclock() {
        let config = LayoutConfig::default();
        let canvas = Canvas::new(900.0, 600.0);
        let clusters = vec![cluster(0..4)];
        let plan = plan_clusters(&clusters, canvas, &config);

        // max(120, 4 * 22) = 120
        let (id, first) = plan.positions[0];
        assert_eq!(id, NodeId(0));
        assert_close(first.x, 450.0);
        assert_close(first.y, 300.0 - 120.0);

        // Second node at 3 o'clock
        let (_, second) = plan.positions[1];
        assert_close(second.x, 450.0 + 120.0);
        assert_close(second.y, 300.0);
    }

    #[test]
    fn test_singletons_sit_on_outer_ring() {
        let config = LayoutConfig::default();
        let canvas = Canvas::new(900.0, 600.0);
        let clusters: Vec<Cluster> = (0..6).map(|i| vec![NodeId(i)]).collect();
        let plan = plan_clusters(&clusters, canvas, &config);

        assert_eq!(plan.arrangement, Arrangement::RingOfRings);
        assert_eq!(plan.positions.len(), 6);
        // 200 * 0.55
        for &(_, p) in &plan.positions {
            assert_close(p.distance(canvas.center()), 110.0);
        }
        let (_, first) = plan.positions[0];
        assert_close(first.x, 450.0);
        assert_close(first.y, 190.0);
    }

    #[test]
    fn test_sub_rings_around_cluster_centers() {
        let config = LayoutConfig::default();
        let canvas = Canvas::new(900.0, 600.0);
        let clusters = vec![cluster(0..3), cluster(3..5)];
        let plan = plan_clusters(&clusters, canvas, &config);

        assert_eq!(plan.arrangement, Arrangement::RingOfRings);
        // First cluster centered at 12 o'clock on the outer ring
        let first_center = Point::new(450.0, 300.0 - 110.0);
        // max(60, 3 * 18) = 60, capped at 200 * 0.35 = 70
        for &(_, p) in &plan.positions[..3] {
            assert_close(p.distance(first_center), 60.0);
        }
        // Second cluster at 6 o'clock
        let second_center = Point::new(450.0, 300.0 + 110.0);
        for &(_, p) in &plan.positions[3..] {
            assert_close(p.distance(second_center), 60.0);
        }
    }

    #[test]
    fn test_sub_ring_cap() {
        let config = LayoutConfig::default();
        let canvas = Canvas::new(900.0, 600.0);
        let clusters = vec![cluster(0..10), cluster(10..11)];
        let plan = plan_clusters(&clusters, canvas, &config);
        let first_center = Point::new(450.0, 190.0);
        // 10 * 18 = 180, capped at 70
        for &(_, p) in &plan.positions[..10] {
            assert_close(p.distance(first_center), 70.0);
        }
    }

    #[test]
    fn test_oversized_lone_cluster_stays_centered() {
        let config = LayoutConfig::default();
        let canvas = Canvas::new(900.0, 600.0);
        let clusters = vec![cluster(0..25)];
        let plan = plan_clusters(&clusters, canvas, &config);

        assert_eq!(plan.arrangement, Arrangement::RingOfRings);
        for &(_, p) in &plan.positions {
            assert_close(p.distance(canvas.center()), 70.0);
        }
    }
}
