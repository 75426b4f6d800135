//! Spatial indexing for pointer hit testing.

mod rtree;

pub use rtree::{NodeDisc, SpatialIndex};
