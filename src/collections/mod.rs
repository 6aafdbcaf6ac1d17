//! Record collections
//!
//! The parsed family tree, indexed for lookup by identifier.

pub mod family_tree;

pub use family_tree::{FamilyTree, Relation};
