//! Recurring events extracted from the tree

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::calendar::AnchorDate;
use crate::models::types::EventKind;

/// Subject identifiers of an event: one individual, or both spouses
pub type Subjects = SmallVec<[String; 2]>;

/// A Hebrew-dated event that recurs every year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyEvent {
    /// Individual, or husband then wife for anniversaries
    pub subjects: Subjects,
    /// What is being remembered
    pub kind: EventKind,
    /// Month and day the event recurs on
    pub anchor: AnchorDate,
    /// Gregorian year the event happened in, when known
    pub origin_year: Option<i32>,
    /// Family the anniversary belongs to
    pub family_id: Option<String>,
}

impl FamilyEvent {
    /// Birthday or yahrzeit of one individual
    #[must_use]
    pub fn personal(
        id: impl Into<String>,
        kind: EventKind,
        anchor: AnchorDate,
        origin_year: Option<i32>,
    ) -> Self {
        let mut subjects = Subjects::new();
        subjects.push(id.into());
        Self {
            subjects,
            kind,
            anchor,
            origin_year,
            family_id: None,
        }
    }

    /// Wedding anniversary of a couple
    #[must_use]
    pub fn anniversary(
        family_id: impl Into<String>,
        husband: impl Into<String>,
        wife: impl Into<String>,
        anchor: AnchorDate,
        origin_year: Option<i32>,
    ) -> Self {
        let mut subjects = Subjects::new();
        subjects.push(husband.into());
        subjects.push(wife.into());
        Self {
            subjects,
            kind: EventKind::Anniversary,
            anchor,
            origin_year,
            family_id: Some(family_id.into()),
        }
    }

    /// First subject; the individual for personal events
    #[must_use]
    pub fn primary_subject(&self) -> &str {
        self.subjects.first().map_or("", String::as_str)
    }
}
