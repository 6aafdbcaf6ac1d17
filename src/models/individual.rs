//! Individual record model
//!
//! An Individual is one `INDI` record of the family tree. It is created once by
//! the parser and only read afterwards.

use serde::{Deserialize, Serialize};

use crate::calendar::AnchorDate;
use crate::models::types::Gender;

/// A date value read from a `DATE` line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDate {
    /// Value exactly as it appeared in the file
    pub raw: String,
    /// Recurring Hebrew anchor, when the value was a Hebrew date with day and month
    pub anchor: Option<AnchorDate>,
    /// Gregorian year of the event, when one could be derived
    pub gregorian_year: Option<i32>,
}

impl EventDate {
    /// A date that carries only its raw text
    #[must_use]
    pub fn raw(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            anchor: None,
            gregorian_year: None,
        }
    }

    /// Hebrew year of a full Hebrew date
    #[must_use]
    pub fn hebrew_year(&self) -> Option<i32> {
        self.anchor.and_then(|a| a.year)
    }
}

/// Full years from `from` to `to`.
///
/// Counted in Hebrew years when both dates carry one, else in Gregorian years.
/// Unknown or negative spans give `None`.
#[must_use]
pub fn years_between(from: &EventDate, to: &EventDate) -> Option<u32> {
    let span = match (from.hebrew_year(), to.hebrew_year()) {
        (Some(start), Some(end)) => end - start,
        _ => to.gregorian_year? - from.gregorian_year?,
    };
    u32::try_from(span).ok()
}

/// Core Individual entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Individual {
    /// Identifier in `@token@` form
    pub id: String,
    /// Display name with surname slashes removed
    pub name: String,
    /// Gender from the `SEX` tag
    pub gender: Gender,
    /// Birth date, if a `BIRT` event carried one
    pub birth: Option<EventDate>,
    /// Death date; `Some` whenever a `DEAT` event was recorded
    pub death: Option<EventDate>,
    /// Families this individual is a child of (`FAMC`)
    pub child_of: Vec<String>,
    /// Families this individual is a spouse in (`FAMS`)
    pub spouse_of: Vec<String>,
}

impl Individual {
    /// Create a new Individual with minimal required information
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            gender: Gender::Unknown,
            birth: None,
            death: None,
            child_of: Vec::new(),
            spouse_of: Vec::new(),
        }
    }

    /// Set the gender
    #[must_use]
    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    /// Set the birth date
    #[must_use]
    pub fn with_birth(mut self, birth: EventDate) -> Self {
        self.birth = Some(birth);
        self
    }

    /// Set the death date
    #[must_use]
    pub fn with_death(mut self, death: EventDate) -> Self {
        self.death = Some(death);
        self
    }

    /// Whether a death was recorded
    #[must_use]
    pub fn is_deceased(&self) -> bool {
        self.death.is_some()
    }

    /// Gregorian birth year, if known
    #[must_use]
    pub fn birth_year(&self) -> Option<i32> {
        self.birth.as_ref().and_then(|d| d.gregorian_year)
    }

    /// Gregorian death year, if known
    #[must_use]
    pub fn death_year(&self) -> Option<i32> {
        self.death.as_ref().and_then(|d| d.gregorian_year)
    }

    /// Age at death in years, when both dates are known and ordered
    #[must_use]
    pub fn age_at_death(&self) -> Option<u32> {
        years_between(self.birth.as_ref()?, self.death.as_ref()?)
    }
}

/// Turn a GEDCOM `NAME` value into a display name.
///
/// `John /Smith/` becomes `John Smith`; an empty result falls back to the id.
#[must_use]
pub fn display_name(raw: &str, id: &str) -> String {
    let name = raw
        .replace('/', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if name.is_empty() { id.to_string() } else { name }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::HebrewMonth;

    #[test]
    fn test_display_name_strips_surname_markers() {
        assert_eq!(display_name("John /Smith/", "@I1@"), "John Smith");
        assert_eq!(display_name("/Cohen/", "@I1@"), "Cohen");
        assert_eq!(display_name("  ", "@I1@"), "@I1@");
    }

    #[test]
    fn test_age_at_death_requires_both_years() {
        let mut birth = EventDate::raw("1900");
        birth.gregorian_year = Some(1900);
        let mut death = EventDate::raw("1970");
        death.gregorian_year = Some(1970);

        let person = Individual::new("@I1@", "A").with_birth(birth.clone());
        assert!(!person.is_deceased());
        assert_eq!(person.age_at_death(), None);

        let person = person.with_death(death);
        assert!(person.is_deceased());
        assert_eq!(person.age_at_death(), Some(70));

        let no_birth = Individual::new("@I2@", "B").with_death(EventDate::raw(""));
        assert!(no_birth.is_deceased());
        assert_eq!(no_birth.age_at_death(), None);
    }

    #[test]
    fn test_age_at_death_counts_hebrew_years() {
        // 10 Tevet 5700 is December 1939, 20 Tevet 5770 is January 2010
        let hebrew = |year: i32, day: u8, gregorian: i32| EventDate {
            raw: String::new(),
            anchor: Some(AnchorDate {
                month: HebrewMonth::Tevet,
                day,
                year: Some(year),
                leap_origin: false,
            }),
            gregorian_year: Some(gregorian),
        };
        let person = Individual::new("@I1@", "A")
            .with_birth(hebrew(5700, 10, 1939))
            .with_death(hebrew(5770, 20, 2010));
        assert_eq!(person.age_at_death(), Some(70));

        // Mixed calendars fall back to Gregorian years
        let mut death = EventDate::raw("2010");
        death.gregorian_year = Some(2010);
        let person = Individual::new("@I2@", "B")
            .with_birth(hebrew(5700, 10, 1939))
            .with_death(death);
        assert_eq!(person.age_at_death(), Some(71));
    }
}
