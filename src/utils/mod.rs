//! Utility functions
//!
//! File output for the tabular artifact and shared logging helpers.

pub mod io;
pub mod logging;
