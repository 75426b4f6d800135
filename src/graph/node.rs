//! Node type and related structures.
//!
//! The layout engine only depends on a node's identity. The sizing weight is
//! carried so hit testing can match what the renderer draws; every other
//! descriptive attribute lives in a side table owned by the host.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Base on-screen diameter of a node, before the weight bonus.
pub const BASE_DIAMETER: f32 = 40.0;

/// Largest diameter bonus a heavy node can earn.
pub const MAX_DIAMETER_BONUS: f32 = 8.0;

/// Weight needed for one unit of diameter bonus.
pub const WEIGHT_PER_BONUS: f32 = 5000.0;

/// Stable node identifier.
///
/// Hosts map their own record keys onto these; the engine never interprets
/// the value beyond equality, hashing and ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Create a new NodeId from a raw u32.
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

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

impl From<u32> for NodeId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<NodeId> for u32 {
    #[inline]
    fn from(id: NodeId) -> Self {
        id.0
    }
}

/// A node in the filtered set handed to the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    /// Sizing weight (lifetime spend for customer maps). Never affects layout.
    #[serde(default)]
    pub weight: f32,
}

impl Node {
    /// Create a node with zero weight.
    pub fn new(id: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            weight: 0.0,
        }
    }

    /// Create a node with a sizing weight.
    pub fn with_weight(id: impl Into<NodeId>, weight: f32) -> Self {
        Self {
            id: id.into(),
            weight,
        }
    }

    /// On-screen diameter: `40 + min(8, weight / 5000)`.
    ///
    /// Negative or non-finite weights earn no bonus.
    pub fn display_diameter(&self) -> f32 {
        let bonus = if self.weight.is_finite() {
            (self.weight / WEIGHT_PER_BONUS).clamp(0.0, MAX_DIAMETER_BONUS)
        } else {
            0.0
        };
        BASE_DIAMETER + bonus
    }

    /// Half of [`Node::display_diameter`].
    #[inline]
    pub fn display_radius(&self) -> f32 {
        self.display_diameter() * 0.5
    }
}
