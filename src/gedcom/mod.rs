//! Genealogy file handling
//!
//! Normalization of raw text, date reading and record parsing.

pub mod dates;
pub mod line;
pub mod normalize;
pub mod parser;

pub use dates::parse_date;
pub use line::GedcomLine;
pub use normalize::{HEBREW_ESCAPE, NormalizedSource, decode, normalize};
pub use parser::{GedcomParser, ParsedTree};
