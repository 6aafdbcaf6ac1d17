//! Common traits
//!
//! Interfaces of the external collaborators the pipeline talks to, kept apart
//! from their implementations in [`crate::adapters`].

pub mod traits;

pub use traits::*;
