//! Hebrew months and the name table used to read them from GEDCOM dates.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Hebrew month, in civil order starting from Tishrei.
///
/// `Adar` is the only Adar of a common year and the first Adar (Adar I) of a
/// leap year, matching the GEDCOM `ADR` / `ADS` convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HebrewMonth {
    Tishrei,
    Cheshvan,
    Kislev,
    Tevet,
    Shevat,
    Adar,
    AdarII,
    Nisan,
    Iyar,
    Sivan,
    Tammuz,
    Av,
    Elul,
}

impl HebrewMonth {
    /// All months in civil order
    pub const ALL: [HebrewMonth; 13] = [
        HebrewMonth::Tishrei,
        HebrewMonth::Cheshvan,
        HebrewMonth::Kislev,
        HebrewMonth::Tevet,
        HebrewMonth::Shevat,
        HebrewMonth::Adar,
        HebrewMonth::AdarII,
        HebrewMonth::Nisan,
        HebrewMonth::Iyar,
        HebrewMonth::Sivan,
        HebrewMonth::Tammuz,
        HebrewMonth::Av,
        HebrewMonth::Elul,
    ];

    /// Month number counted from Nisan (Nisan = 1, Tishrei = 7, Adar II = 13)
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        match self {
            HebrewMonth::Nisan => 1,
            HebrewMonth::Iyar => 2,
            HebrewMonth::Sivan => 3,
            HebrewMonth::Tammuz => 4,
            HebrewMonth::Av => 5,
            HebrewMonth::Elul => 6,
            HebrewMonth::Tishrei => 7,
            HebrewMonth::Cheshvan => 8,
            HebrewMonth::Kislev => 9,
            HebrewMonth::Tevet => 10,
            HebrewMonth::Shevat => 11,
            HebrewMonth::Adar => 12,
            HebrewMonth::AdarII => 13,
        }
    }

    /// Inverse of [`HebrewMonth::ordinal`]
    #[must_use]
    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.ordinal() == ordinal)
    }

    /// GEDCOM 5.5 month code
    #[must_use]
    pub const fn gedcom_code(self) -> &'static str {
        match self {
            HebrewMonth::Tishrei => "TSH",
            HebrewMonth::Cheshvan => "CSH",
            HebrewMonth::Kislev => "KSL",
            HebrewMonth::Tevet => "TVT",
            HebrewMonth::Shevat => "SHV",
            HebrewMonth::Adar => "ADR",
            HebrewMonth::AdarII => "ADS",
            HebrewMonth::Nisan => "NSN",
            HebrewMonth::Iyar => "IYR",
            HebrewMonth::Sivan => "SVN",
            HebrewMonth::Tammuz => "TMZ",
            HebrewMonth::Av => "AAV",
            HebrewMonth::Elul => "ELL",
        }
    }

    /// Transliterated name; `leap_year` selects "Adar I" over "Adar"
    #[must_use]
    pub const fn english_name(self, leap_year: bool) -> &'static str {
        match self {
            HebrewMonth::Tishrei => "Tishrei",
            HebrewMonth::Cheshvan => "Cheshvan",
            HebrewMonth::Kislev => "Kislev",
            HebrewMonth::Tevet => "Tevet",
            HebrewMonth::Shevat => "Shevat",
            HebrewMonth::Adar if leap_year => "Adar I",
            HebrewMonth::Adar => "Adar",
            HebrewMonth::AdarII => "Adar II",
            HebrewMonth::Nisan => "Nisan",
            HebrewMonth::Iyar => "Iyar",
            HebrewMonth::Sivan => "Sivan",
            HebrewMonth::Tammuz => "Tammuz",
            HebrewMonth::Av => "Av",
            HebrewMonth::Elul => "Elul",
        }
    }

    /// Name in Hebrew script; `leap_year` selects "אדר א׳" over "אדר"
    #[must_use]
    pub const fn hebrew_name(self, leap_year: bool) -> &'static str {
        match self {
            HebrewMonth::Tishrei => "תשרי",
            HebrewMonth::Cheshvan => "חשון",
            HebrewMonth::Kislev => "כסלו",
            HebrewMonth::Tevet => "טבת",
            HebrewMonth::Shevat => "שבט",
            HebrewMonth::Adar if leap_year => "אדר א׳",
            HebrewMonth::Adar => "אדר",
            HebrewMonth::AdarII => "אדר ב׳",
            HebrewMonth::Nisan => "ניסן",
            HebrewMonth::Iyar => "אייר",
            HebrewMonth::Sivan => "סיון",
            HebrewMonth::Tammuz => "תמוז",
            HebrewMonth::Av => "אב",
            HebrewMonth::Elul => "אלול",
        }
    }

    /// Months that never have a 30th day
    #[must_use]
    pub const fn always_short(self) -> bool {
        matches!(
            self,
            HebrewMonth::Tevet
                | HebrewMonth::AdarII
                | HebrewMonth::Iyar
                | HebrewMonth::Tammuz
                | HebrewMonth::Elul
        )
    }
}

impl fmt::Display for HebrewMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.english_name(false))
    }
}

/// Lookup table from month spellings found in genealogy files to months.
///
/// Sources mix GEDCOM codes, transliterations and Hebrew script, so the table
/// is data rather than a `match`; tests and callers can build their own.
#[derive(Debug, Clone)]
pub struct MonthTable {
    names: FxHashMap<String, HebrewMonth>,
}

impl MonthTable {
    /// Create an empty table
    #[must_use]
    pub fn empty() -> Self {
        Self {
            names: FxHashMap::default(),
        }
    }

    /// Register a spelling for a month
    pub fn insert(&mut self, name: &str, month: HebrewMonth) {
        self.names.insert(normalize_key(name), month);
    }

    /// Builder form of [`MonthTable::insert`]
    #[must_use]
    pub fn with_name(mut self, name: &str, month: HebrewMonth) -> Self {
        self.insert(name, month);
        self
    }

    /// Look up a single spelling, ignoring case and quote marks
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<HebrewMonth> {
        self.names.get(&normalize_key(name)).copied()
    }

    /// Find the first month name in a token sequence.
    ///
    /// Two-token names ("ADAR II") win over their one-token prefix.
    /// Returns the index of the first token, the number of tokens used and the month.
    #[must_use]
    pub fn find_in(&self, tokens: &[&str]) -> Option<(usize, usize, HebrewMonth)> {
        for i in 0..tokens.len() {
            if i + 1 < tokens.len() {
                let pair = format!("{} {}", tokens[i], tokens[i + 1]);
                if let Some(month) = self.lookup(&pair) {
                    return Some((i, 2, month));
                }
            }
            if let Some(month) = self.lookup(tokens[i]) {
                return Some((i, 1, month));
            }
        }
        None
    }

    /// Number of registered spellings
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the table has no spellings
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for MonthTable {
    fn default() -> Self {
        let mut table = Self::empty();
        for month in HebrewMonth::ALL {
            table.insert(month.gedcom_code(), month);
            table.insert(month.english_name(false), month);
            table.insert(month.hebrew_name(false), month);
        }
        let aliases: &[(&str, HebrewMonth)] = &[
            ("HESHVAN", HebrewMonth::Cheshvan),
            ("MARCHESHVAN", HebrewMonth::Cheshvan),
            ("CHESVAN", HebrewMonth::Cheshvan),
            ("חשוון", HebrewMonth::Cheshvan),
            ("מרחשון", HebrewMonth::Cheshvan),
            ("TEBETH", HebrewMonth::Tevet),
            ("SHVAT", HebrewMonth::Shevat),
            ("SHEBAT", HebrewMonth::Shevat),
            ("ADAR I", HebrewMonth::Adar),
            ("ADAR 1", HebrewMonth::Adar),
            ("ADAR II", HebrewMonth::AdarII),
            ("ADAR 2", HebrewMonth::AdarII),
            ("ADAR SHENI", HebrewMonth::AdarII),
            ("אדר א", HebrewMonth::Adar),
            ("אדר ב", HebrewMonth::AdarII),
            ("IYYAR", HebrewMonth::Iyar),
            ("IYAR", HebrewMonth::Iyar),
            ("סיוון", HebrewMonth::Sivan),
            ("TAMUZ", HebrewMonth::Tammuz),
            ("AB", HebrewMonth::Av),
            ("NISSAN", HebrewMonth::Nisan),
            ("TISHRI", HebrewMonth::Tishrei),
        ];
        for &(name, month) in aliases {
            table.insert(name, month);
        }
        table
    }
}

fn normalize_key(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '"' | '\'' | '׳' | '״'))
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinal_round_trip_covers_every_month() {
        for month in HebrewMonth::ALL {
            assert_eq!(HebrewMonth::from_ordinal(month.ordinal()), Some(month));
        }
        assert_eq!(HebrewMonth::from_ordinal(0), None);
        assert_eq!(HebrewMonth::from_ordinal(14), None);
    }

    #[test]
    fn test_default_table_reads_codes_and_names() {
        let table = MonthTable::default();
        assert_eq!(table.lookup("ksl"), Some(HebrewMonth::Kislev));
        assert_eq!(table.lookup("ADS"), Some(HebrewMonth::AdarII));
        assert_eq!(table.lookup("Iyyar"), Some(HebrewMonth::Iyar));
        assert_eq!(table.lookup("סיון"), Some(HebrewMonth::Sivan));
        assert_eq!(table.lookup("אדר ב׳"), Some(HebrewMonth::AdarII));
        assert_eq!(table.lookup("XYZ"), None);
    }

    #[test]
    fn test_find_in_prefers_two_token_names() {
        let table = MonthTable::default();
        let tokens = ["14", "ADAR", "II", "5784"];
        assert_eq!(table.find_in(&tokens), Some((1, 2, HebrewMonth::AdarII)));

        let tokens = ["14", "ADAR", "5785"];
        assert_eq!(table.find_in(&tokens), Some((1, 1, HebrewMonth::Adar)));
    }

    #[test]
    fn test_custom_table_is_isolated() {
        let table = MonthTable::empty().with_name("FIRST", HebrewMonth::Tishrei);
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup("first"), Some(HebrewMonth::Tishrei));
        assert_eq!(table.lookup("TSH"), None);
    }
}
