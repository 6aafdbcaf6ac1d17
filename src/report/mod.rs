//! Report assembly and rendering

pub mod assembler;
pub mod locale;
pub mod markdown;

pub use assembler::{
    EnrichedEntry, EntryDetails, MarriageEnd, PathStep, Report, ReportAssembler,
};
pub use locale::Locale;
pub use markdown::{details_text, render_json, render_markdown, render_title};
