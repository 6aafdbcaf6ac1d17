//! Algorithm implementations
//!
//! Date matching over the Hebrew calendar and distance computation over the
//! relationship graph.

pub mod kinship;
pub mod matching;
