//! Offline Hebrew calendar
//!
//! Month tables, date arithmetic, numerals and the upcoming-date window the
//! matcher consumes.

pub mod arithmetic;
pub mod date;
pub mod month;
pub mod numerals;
pub mod window;

pub use arithmetic::{days_in_month, days_in_year, is_leap_year, month_exists, months_in_year};
pub use date::{AnchorDate, HebrewDate};
pub use month::{HebrewMonth, MonthTable};
pub use numerals::{parse_hebrew_numeral, to_hebrew_numeral};
pub use window::{UpcomingDate, UpcomingWindow};
