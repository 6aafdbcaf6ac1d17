//! Hebrew calendar arithmetic.
//!
//! Dates are converted through a day count where day 1 is 1 January of year 1
//! in the proleptic Gregorian calendar, the same count `chrono` exposes through
//! `num_days_from_ce`. New years follow the molad of Tishrei with the
//! postponement rules folded into `elapsed_days` and `year_length_correction`.

use super::month::HebrewMonth;

/// Day count of 1 Tishrei, year 1
const EPOCH: i64 = -1_373_427;

/// Parts (1/1080 hour) in a day
const PARTS_PER_DAY: i64 = 25_920;

/// Mean year length as a ratio, used only to guess the year of a day count
const MEAN_YEAR_NUMERATOR: i64 = 35_975_351;
const MEAN_YEAR_DENOMINATOR: i64 = 98_496;

/// Whether the year carries Adar II
#[must_use]
pub fn is_leap_year(year: i32) -> bool {
    (7 * i64::from(year) + 1).rem_euclid(19) < 7
}

/// 12 or 13
#[must_use]
pub fn months_in_year(year: i32) -> u8 {
    if is_leap_year(year) { 13 } else { 12 }
}

/// Whether `month` occurs in `year` (only Adar II can be missing)
#[must_use]
pub fn month_exists(year: i32, month: HebrewMonth) -> bool {
    month != HebrewMonth::AdarII || is_leap_year(year)
}

fn elapsed_days(year: i32) -> i64 {
    let months_elapsed = (235 * i64::from(year) - 234).div_euclid(19);
    let parts_elapsed = 12_084 + 13_753 * months_elapsed;
    let days = 29 * months_elapsed + parts_elapsed.div_euclid(PARTS_PER_DAY);
    if (3 * (days + 1)).rem_euclid(7) < 3 {
        days + 1
    } else {
        days
    }
}

fn year_length_correction(year: i32) -> i64 {
    let previous = elapsed_days(year - 1);
    let current = elapsed_days(year);
    let next = elapsed_days(year + 1);
    if next - current == 356 {
        2
    } else if current - previous == 382 {
        1
    } else {
        0
    }
}

/// Day count of 1 Tishrei of `year`
#[must_use]
pub fn new_year(year: i32) -> i64 {
    EPOCH + elapsed_days(year) + year_length_correction(year)
}

/// 353–355 days for common years, 383–385 for leap years
#[must_use]
pub fn days_in_year(year: i32) -> i64 {
    new_year(year + 1) - new_year(year)
}

/// 29 or 30, depending on the month and the shape of the year
#[must_use]
pub fn days_in_month(year: i32, month: HebrewMonth) -> u8 {
    let length = days_in_year(year);
    let short = match month {
        HebrewMonth::Cheshvan => length % 10 != 5,
        HebrewMonth::Kislev => length % 10 == 3,
        HebrewMonth::Adar => !is_leap_year(year),
        other => other.always_short(),
    };
    if short { 29 } else { 30 }
}

/// Months from Nisan-based `first` up to but excluding `last`, summed in days
fn days_before(year: i32, first: u8, last: u8) -> i64 {
    (first..last)
        .filter_map(HebrewMonth::from_ordinal)
        .map(|m| i64::from(days_in_month(year, m)))
        .sum()
}

/// Day count of a Hebrew date. The date is not validated.
#[must_use]
pub fn to_day_count(year: i32, month: HebrewMonth, day: u8) -> i64 {
    let ordinal = month.ordinal();
    let tishrei = HebrewMonth::Tishrei.ordinal();
    let offset = if ordinal < tishrei {
        days_before(year, tishrei, months_in_year(year) + 1) + days_before(year, 1, ordinal)
    } else {
        days_before(year, tishrei, ordinal)
    };
    new_year(year) + offset + i64::from(day) - 1
}

/// Hebrew date of a day count as `(year, month, day)`
#[must_use]
pub fn from_day_count(count: i64) -> (i32, HebrewMonth, u8) {
    let approx = ((count - EPOCH) * MEAN_YEAR_DENOMINATOR).div_euclid(MEAN_YEAR_NUMERATOR);
    // Hebrew years in the supported range fit comfortably in i32
    let mut year = approx as i32;
    while new_year(year + 1) <= count {
        year += 1;
    }
    while new_year(year) > count {
        year -= 1;
    }

    let start = if count < to_day_count(year, HebrewMonth::Nisan, 1) {
        HebrewMonth::Tishrei.ordinal()
    } else {
        HebrewMonth::Nisan.ordinal()
    };
    let mut ordinal = start;
    loop {
        let Some(month) = HebrewMonth::from_ordinal(ordinal) else {
            break;
        };
        let last = to_day_count(year, month, days_in_month(year, month));
        if count <= last {
            let day = count - to_day_count(year, month, 1) + 1;
            return (year, month, day as u8);
        }
        ordinal += 1;
    }
    // Unreachable for counts inside `year`; Elul closes every year
    (year, HebrewMonth::Elul, 29)
}
