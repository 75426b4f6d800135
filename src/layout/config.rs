//! Layout configuration and canvas geometry.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A position in canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Host surface size, in the same units as output positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f32,
    pub height: f32,
}

impl Canvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// A canvas with a zero, negative or non-finite side admits no layout.
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0)
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Clamp `p` to `[margin, side - margin]` on both axes.
    ///
    /// The margin shrinks to half the side on canvases too small to honour
    /// it, so the range never inverts.
    pub fn clamp(&self, p: Point, margin: f32) -> Point {
        Point::new(
            clamp_axis(p.x, self.width, margin),
            clamp_axis(p.y, self.height, margin),
        )
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(900.0, 600.0)
    }
}

#[inline]
fn clamp_axis(value: f32, side: f32, margin: f32) -> f32 {
    let margin = margin.min(side / 2.0);
    value.clamp(margin, side - margin)
}

/// Configuration for the cluster layout pipeline.
///
/// Defaults reproduce the customer network map's hand-tuned constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Gap kept between nodes and the canvas edge (default: 60.0).
    pub padding: f32,
    /// Extra margin subtracted from the usable radius (default: 40.0).
    pub ring_margin: f32,
    /// Largest lone cluster still drawn as a single ring (default: 20).
    pub single_ring_max_nodes: usize,
    /// Minimum radius of the single ring (default: 120.0).
    pub single_ring_min_radius: f32,
    /// Radius added per node on the single ring (default: 22.0).
    pub single_ring_spacing: f32,
    /// Radius of the ring carrying cluster centers, as a fraction of the
    /// usable radius (default: 0.55).
    pub cluster_ring_factor: f32,
    /// Minimum radius of a cluster's own ring (default: 60.0).
    pub sub_ring_min_radius: f32,
    /// Radius added per node on a cluster ring (default: 18.0).
    pub sub_ring_spacing: f32,
    /// Cap on a cluster ring's radius, as a fraction of the usable radius
    /// (default: 0.35).
    pub sub_ring_max_factor: f32,
    /// Pairwise repulsion passes (default: 50).
    pub relax_iterations: u32,
    /// Separation below which two nodes repel (default: 70.0).
    pub min_distance: f32,
    /// Stop relaxing once no node moves further than this in a pass.
    /// `None` always runs every pass (default).
    pub convergence_epsilon: Option<f32>,
    /// Gap kept between a dragged node and the canvas edge (default: 30.0).
    pub drag_margin: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            padding: 60.0,
            ring_margin: 40.0,
            single_ring_max_nodes: 20,
            single_ring_min_radius: 120.0,
            single_ring_spacing: 22.0,
            cluster_ring_factor: 0.55,
            sub_ring_min_radius: 60.0,
            sub_ring_spacing: 18.0,
            sub_ring_max_factor: 0.35,
            relax_iterations: 50,
            min_distance: 70.0,
            convergence_epsilon: None,
            drag_margin: 30.0,
        }
    }
}

impl LayoutConfig {
    /// Reject values that would make the pipeline produce non-finite or
    /// inverted geometry.
    pub fn validate(&self) -> Result<()> {
        let margins = [
            ("padding", self.padding),
            ("ringMargin", self.ring_margin),
            ("singleRingMinRadius", self.single_ring_min_radius),
            ("singleRingSpacing", self.single_ring_spacing),
            ("subRingMinRadius", self.sub_ring_min_radius),
            ("subRingSpacing", self.sub_ring_spacing),
            ("dragMargin", self.drag_margin),
        ];
        for (field, value) in margins {
            if !value.is_finite() {
                return Err(Error::InvalidConfig {
                    field,
                    reason: "must be finite",
                });
            }
            if value < 0.0 {
                return Err(Error::InvalidConfig {
                    field,
                    reason: "must not be negative",
                });
            }
        }

        for (field, value) in [
            ("clusterRingFactor", self.cluster_ring_factor),
            ("subRingMaxFactor", self.sub_ring_max_factor),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(Error::InvalidConfig {
                    field,
                    reason: "must be in (0, 1]",
                });
            }
        }

        if !(self.min_distance.is_finite() && self.min_distance > 0.0) {
            return Err(Error::InvalidConfig {
                field: "minDistance",
                reason: "must be a positive finite number",
            });
        }

        if let Some(eps) = self.convergence_epsilon {
            if !(eps.is_finite() && eps > 0.0) {
                return Err(Error::InvalidConfig {
                    field: "convergenceEpsilon",
                    reason: "must be a positive finite number",
                });
            }
        }

        Ok(())
    }
}
