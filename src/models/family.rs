//! Family record model

use serde::{Deserialize, Serialize};

use crate::models::individual::EventDate;

/// One `FAM` record: up to two spouses, their children and the marriage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Family {
    /// Identifier in `@token@` form
    pub id: String,
    /// `HUSB` reference
    pub husband: Option<String>,
    /// `WIFE` reference
    pub wife: Option<String>,
    /// `CHIL` references in file order
    pub children: Vec<String>,
    /// Marriage date, if a `MARR` event carried one
    pub marriage: Option<EventDate>,
    /// Divorce, `Some` whenever a `DIV` event was recorded
    pub divorce: Option<EventDate>,
}

impl Family {
    /// Create an empty family
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            husband: None,
            wife: None,
            children: Vec::new(),
            marriage: None,
            divorce: None,
        }
    }

    /// Spouses in order, husband first
    pub fn spouses(&self) -> impl Iterator<Item = &str> {
        self.husband.iter().chain(self.wife.iter()).map(String::as_str)
    }

    /// Both spouses, when the family has two
    #[must_use]
    pub fn couple(&self) -> Option<(&str, &str)> {
        Some((self.husband.as_deref()?, self.wife.as_deref()?))
    }

    /// Whether a divorce was recorded
    #[must_use]
    pub fn is_divorced(&self) -> bool {
        self.divorce.is_some()
    }

    /// Gregorian marriage year, if known
    #[must_use]
    pub fn marriage_year(&self) -> Option<i32> {
        self.marriage.as_ref().and_then(|d| d.gregorian_year)
    }

    /// Gregorian divorce year, if known
    #[must_use]
    pub fn divorce_year(&self) -> Option<i32> {
        self.divorce.as_ref().and_then(|d| d.gregorian_year)
    }
}
