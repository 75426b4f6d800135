//! Graph data structures.
//!
//! Node and edge value types plus the symmetric adjacency map every later
//! stage of the layout pipeline reads from.

mod adjacency;
mod edge;
mod node;

pub use adjacency::Adjacency;
pub use edge::{visible_edges, Edge, EdgeId, RelationKind};
pub use node::{Node, NodeId, BASE_DIAMETER, MAX_DIAMETER_BONUS, WEIGHT_PER_BONUS};
