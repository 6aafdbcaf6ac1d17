//! Kinship graph and genealogical distance

pub mod distance;
pub mod graph;

pub use distance::{DistanceEngine, DistanceResult, shortest_path};
pub use graph::RelationshipGraph;
