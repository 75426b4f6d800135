//! Pairwise overlap relaxation.
//!
//! Each pass visits every unordered pair once; a pair closer than
//! `min_distance` is pushed apart along the line joining it, each node moving
//! half of the shortfall. After every pass all nodes are clamped to the padded
//! canvas interior. This is a bounded declutter, not a convergent solver:
//! dense clusters may keep some overlap.
//!
//! Cost is O(N²) per pass, fine for the low hundreds of nodes a customer map
//! shows.

use super::config::{Canvas, LayoutConfig, Point};
use crate::graph::NodeId;

/// What a relaxation run did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelaxStats {
    /// Passes actually run.
    pub iterations: u32,
    /// Largest distance any node moved during the last pass, or 0 when no
    /// convergence check was requested.
    pub last_displacement: f32,
}

/// Relax `positions` in place.
pub fn relax(
    positions: &mut [(NodeId, Point)],
    canvas: Canvas,
    config: &LayoutConfig,
) -> RelaxStats {
    let n = positions.len();
    let min_distance = config.min_distance;
    let mut stats = RelaxStats {
        iterations: 0,
        last_displacement: 0.0,
    };
    let mut before: Vec<Point> = Vec::new();

    for _ in 0..config.relax_iterations {
        if config.convergence_epsilon.is_some() {
            before.clear();
            before.extend(positions.iter().map(|&(_, p)| p));
        }

        let mut pushed = 0u32;
        for i in 0..n {
            for j in (i + 1)..n {
                let a = positions[i].1;
                let b = positions[j].1;
                let dx = b.x - a.x;
                let dy = b.y - a.y;
                let raw = (dx * dx + dy * dy).sqrt();
                // Coincident pair: no direction to push along, but no NaN either.
                let dist = if raw > 0.0 { raw } else { 1.0 };

                if dist < min_distance {
                    let force = (min_distance - dist) / 2.0;
                    let fx = dx / dist * force;
                    let fy = dy / dist * force;
                    positions[i].1 = Point::new(a.x - fx, a.y - fy);
                    positions[j].1 = Point::new(b.x + fx, b.y + fy);
                    pushed += 1;
                }
            }
        }

        for (_, p) in positions.iter_mut() {
            *p = canvas.clamp(*p, config.padding);
        }
        stats.iterations += 1;

        let Some(eps) = config.convergence_epsilon else {
            tracing::trace!(iteration = stats.iterations, pushed, "relaxation pass");
            continue;
        };
        let moved = before
            .iter()
            .zip(positions.iter())
            .map(|(&old, &(_, new))| old.distance(new))
            .fold(0.0_f32, f32::max);
        stats.last_displacement = moved;
        tracing::trace!(iteration = stats.iterations, pushed, moved, "relaxation pass");
        if moved < eps {
            break;
        }
    }

    stats
}
