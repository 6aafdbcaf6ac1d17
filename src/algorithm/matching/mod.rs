//! Hebrew date matching
//!
//! Decides which recurring events fall inside an upcoming window:
//!
//! 1. Leap-month policy for anchors missing from the occurrence year
//! 2. Month and day matching with elapsed-year arithmetic

pub mod matcher;
pub mod policy;

pub use matcher::{HebrewDateMatcher, MatchedEvent, elapsed_years};
pub use policy::LeapMonthPolicy;
