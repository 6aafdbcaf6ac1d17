//! Display text for Hebrew and English reports

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::calendar::HebrewDate;
use crate::collections::Relation;
use crate::error::ConfigError;
use crate::models::{EventKind, Gender};

/// Report language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    /// Hebrew, right to left
    #[default]
    #[serde(rename = "he")]
    Hebrew,
    /// English
    #[serde(rename = "en")]
    English,
}

impl Locale {
    /// Language code
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Hebrew => "he",
            Self::English => "en",
        }
    }

    /// Title of the published report, without date or Torah portion
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Hebrew => "תאריכים עבריים בשבוע הקרוב",
            Self::English => "Upcoming Hebrew dates",
        }
    }

    /// Heading above the entries
    #[must_use]
    pub const fn heading(self) -> &'static str {
        match self {
            Self::Hebrew => "תאריכים עבריים קרובים",
            Self::English => "Upcoming Hebrew dates",
        }
    }

    /// Body text when no event falls in the window
    #[must_use]
    pub fn no_events(self, days: usize) -> String {
        match self {
            Self::Hebrew => format!("אין אירועים בלוח העברי ב-{days} הימים הקרובים."),
            Self::English => format!("No upcoming Hebrew calendar events in the next {days} days."),
        }
    }

    /// Note about records left out while reading the tree
    #[must_use]
    pub fn skipped_note(self, count: usize) -> String {
        match self {
            Self::Hebrew => format!("⚠️ {count} רשומות דולגו בעת קריאת עץ המשפחה."),
            Self::English => format!("⚠️ {count} records were skipped while reading the family tree."),
        }
    }

    /// Field labels: event, person, distance, path
    #[must_use]
    pub const fn labels(self) -> [&'static str; 4] {
        match self {
            Self::Hebrew => ["אירוע", "שם", "מרחק", "מסלול"],
            Self::English => ["Event", "Name", "Distance", "Path"],
        }
    }

    /// Day of the week
    #[must_use]
    pub const fn weekday(self, day: Weekday) -> &'static str {
        match (self, day) {
            (Self::Hebrew, Weekday::Sun) => "יום ראשון",
            (Self::Hebrew, Weekday::Mon) => "יום שני",
            (Self::Hebrew, Weekday::Tue) => "יום שלישי",
            (Self::Hebrew, Weekday::Wed) => "יום רביעי",
            (Self::Hebrew, Weekday::Thu) => "יום חמישי",
            (Self::Hebrew, Weekday::Fri) => "יום שישי",
            (Self::Hebrew, Weekday::Sat) => "שבת",
            (Self::English, Weekday::Sun) => "Sunday",
            (Self::English, Weekday::Mon) => "Monday",
            (Self::English, Weekday::Tue) => "Tuesday",
            (Self::English, Weekday::Wed) => "Wednesday",
            (Self::English, Weekday::Thu) => "Thursday",
            (Self::English, Weekday::Fri) => "Friday",
            (Self::English, Weekday::Sat) => "Saturday",
        }
    }

    /// Name of an event kind
    #[must_use]
    pub const fn event_name(self, kind: EventKind) -> &'static str {
        match (self, kind) {
            (Self::Hebrew, EventKind::Birthday) => "יום הולדת",
            (Self::Hebrew, EventKind::Yahrzeit) => "יום פטירה",
            (Self::Hebrew, EventKind::Anniversary) => "יום נישואין",
            (Self::English, EventKind::Birthday) => "Birthday",
            (Self::English, EventKind::Yahrzeit) => "Yahrzeit",
            (Self::English, EventKind::Anniversary) => "Wedding anniversary",
        }
    }

    /// Hebrew date in the report language
    #[must_use]
    pub fn hebrew_date(self, date: HebrewDate) -> String {
        match self {
            Self::Hebrew => date.hebrew_display(),
            Self::English => date.english_display(),
        }
    }

    /// What one path step is to the next, e.g. "father of"
    #[must_use]
    pub const fn relation(self, relation: Option<Relation>) -> &'static str {
        match (self, relation) {
            (Self::Hebrew, Some(Relation::Husband)) => "בעלה של",
            (Self::Hebrew, Some(Relation::Wife)) => "אשתו של",
            (Self::Hebrew, Some(Relation::Spouse)) => "בן/בת הזוג של",
            (Self::Hebrew, Some(Relation::Father)) => "אבא של",
            (Self::Hebrew, Some(Relation::Mother)) => "אמא של",
            (Self::Hebrew, Some(Relation::Parent)) => "הורה של",
            (Self::Hebrew, Some(Relation::Son)) => "בן של",
            (Self::Hebrew, Some(Relation::Daughter)) => "בת של",
            (Self::Hebrew, Some(Relation::Child)) => "ילד/ה של",
            (Self::Hebrew, None) => "קרוב/ת משפחה של",
            (Self::English, Some(Relation::Husband)) => "husband of",
            (Self::English, Some(Relation::Wife)) => "wife of",
            (Self::English, Some(Relation::Spouse)) => "spouse of",
            (Self::English, Some(Relation::Father)) => "father of",
            (Self::English, Some(Relation::Mother)) => "mother of",
            (Self::English, Some(Relation::Parent)) => "parent of",
            (Self::English, Some(Relation::Son)) => "son of",
            (Self::English, Some(Relation::Daughter)) => "daughter of",
            (Self::English, Some(Relation::Child)) => "child of",
            (Self::English, None) => "relative of",
        }
    }

    /// Age on a living person's birthday
    #[must_use]
    pub fn birthday_age(self, gender: Gender, age: u32) -> String {
        match (self, gender) {
            (Self::Hebrew, Gender::Female) => format!("בת {age}"),
            (Self::Hebrew, _) => format!("בן {age}"),
            (Self::English, _) => format!("turns {age}"),
        }
    }

    /// Birthday of someone who has died
    #[must_use]
    pub fn deceased_birthday(
        self,
        gender: Gender,
        age_at_death: Option<u32>,
        years_since_birth: Option<u32>,
    ) -> String {
        let female = gender == Gender::Female;
        let mut parts = Vec::new();
        if let Some(age) = age_at_death {
            parts.push(match (self, female) {
                (Self::Hebrew, true) => format!("נפטרה בגיל {age}"),
                (Self::Hebrew, false) => format!("נפטר בגיל {age}"),
                (Self::English, _) => format!("died aged {age}"),
            });
        }
        if let Some(years) = years_since_birth {
            parts.push(match (self, female) {
                (Self::Hebrew, true) => format!("{years} שנים להולדתה"),
                (Self::Hebrew, false) => format!("{years} שנים להולדתו"),
                (Self::English, _) => format!("{years} years since birth"),
            });
        }
        parts.join(", ")
    }

    /// Yahrzeit details
    #[must_use]
    pub fn yahrzeit(
        self,
        gender: Gender,
        years_since_death: Option<u32>,
        age_at_death: Option<u32>,
    ) -> String {
        let female = gender == Gender::Female;
        match (years_since_death, age_at_death) {
            (Some(years), Some(age)) => match (self, female) {
                (Self::Hebrew, true) => format!("נפטרה בגיל {age}, לפני {years} שנים"),
                (Self::Hebrew, false) => format!("נפטר בגיל {age}, לפני {years} שנים"),
                (Self::English, _) => format!("died aged {age}, {years} years ago"),
            },
            (Some(years), None) => match (self, female) {
                (Self::Hebrew, true) => format!("נפטרה לפני {years} שנים"),
                (Self::Hebrew, false) => format!("נפטר לפני {years} שנים"),
                (Self::English, _) => format!("died {years} years ago"),
            },
            (None, Some(age)) => match (self, female) {
                (Self::Hebrew, true) => format!("נפטרה בגיל {age}"),
                (Self::Hebrew, false) => format!("נפטר בגיל {age}"),
                (Self::English, _) => format!("died aged {age}"),
            },
            (None, None) => String::new(),
        }
    }

    /// Years married for a couple still together
    #[must_use]
    pub fn years_married(self, years: u32) -> String {
        match self {
            Self::Hebrew => format!("{years} שנות נישואין"),
            Self::English => format!("{years} years married"),
        }
    }

    /// Marriage that ended in divorce
    #[must_use]
    pub fn divorced(self, marriage_year: Option<i32>) -> String {
        match (self, marriage_year) {
            (Self::Hebrew, Some(year)) => format!("נישאו ב-{year}, התגרשו"),
            (Self::Hebrew, None) => "התגרשו".to_string(),
            (Self::English, Some(year)) => format!("married in {year}, divorced"),
            (Self::English, None) => "divorced".to_string(),
        }
    }

    /// Marriage that ended with a spouse's death
    #[must_use]
    pub fn married_until_death(self, duration: Option<u32>) -> String {
        match (self, duration) {
            (Self::Hebrew, Some(years)) => format!("היו נשואים {years} שנים"),
            (Self::Hebrew, None) => "הנישואין הסתיימו בפטירה".to_string(),
            (Self::English, Some(years)) => format!("married for {years} years"),
            (Self::English, None) => "marriage ended by death".to_string(),
        }
    }

    /// Marker for a year in which the Hebrew and Gregorian anniversaries coincide
    #[must_use]
    pub const fn coincides(self) -> &'static str {
        match self {
            Self::Hebrew => "התאריך העברי והלועזי חלים יחד השנה",
            Self::English => "Hebrew and Gregorian dates coincide this year",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "he" | "heb" | "hebrew" => Ok(Self::Hebrew),
            "en" | "eng" | "english" => Ok(Self::English),
            _ => Err(ConfigError::Unsupported {
                name: "language",
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gendered_phrases() {
        assert_eq!(Locale::Hebrew.birthday_age(Gender::Female, 30), "בת 30");
        assert_eq!(Locale::Hebrew.birthday_age(Gender::Unknown, 30), "בן 30");
        assert_eq!(
            Locale::English.yahrzeit(Gender::Male, Some(10), None),
            "died 10 years ago"
        );
        assert_eq!(Locale::English.yahrzeit(Gender::Male, None, None), "");
    }

    #[test]
    fn test_parse_locale() {
        assert_eq!("EN".parse::<Locale>(), Ok(Locale::English));
        assert_eq!("he".parse::<Locale>(), Ok(Locale::Hebrew));
        assert!("fr".parse::<Locale>().is_err());
    }
}
