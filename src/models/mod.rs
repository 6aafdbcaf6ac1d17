//! Domain models
//!
//! Typed records produced by the parser and the events extracted from them.

pub mod event;
pub mod family;
pub mod individual;
pub mod skip;
pub mod types;

pub use event::{FamilyEvent, Subjects};
pub use family::Family;
pub use individual::{EventDate, Individual, display_name, years_between};
pub use skip::{ParseSkip, SkipLog};
pub use types::{EventKind, Gender};
