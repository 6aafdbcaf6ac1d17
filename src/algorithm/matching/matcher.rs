//! Core matching of recurring events against a window of upcoming days
//!
//! An event matches a window day when the day its anchor is observed on in that
//! Hebrew year equals the window day. Each event matches at most once.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::calendar::{HebrewDate, UpcomingDate, UpcomingWindow};
use crate::collections::FamilyTree;
use crate::models::FamilyEvent;

use super::policy::LeapMonthPolicy;

/// An event that recurs inside the window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedEvent {
    /// The recurring event
    pub event: FamilyEvent,
    /// Window day it falls on
    pub occurrence: UpcomingDate,
    /// Whether the observed day differs from the anchor because of the leap-month policy
    pub shifted: bool,
    /// Full years between the original event and this occurrence, when the origin year is known
    pub elapsed_years: Option<u32>,
    /// Whether any subject has a recorded death
    pub deceased: bool,
}

impl MatchedEvent {
    /// Hebrew date of the occurrence
    #[must_use]
    pub fn hebrew(&self) -> HebrewDate {
        self.occurrence.hebrew
    }
}

/// Years from `origin` to `occurrence`, unavailable when unknown or negative
#[must_use]
pub fn elapsed_years(origin: Option<i32>, occurrence: i32) -> Option<u32> {
    origin.and_then(|y| u32::try_from(occurrence - y).ok())
}

/// Years since the event, in the Hebrew calendar when the anchor has a year.
///
/// Only events whose source gave a Gregorian year alone are counted in
/// Gregorian years.
fn occurrence_age(event: &FamilyEvent, day: &UpcomingDate) -> Option<u32> {
    match event.anchor.year {
        Some(origin) => elapsed_years(Some(origin), day.hebrew.year),
        None => elapsed_years(event.origin_year, day.gregorian.year()),
    }
}

/// Matcher for pairing events with window days
#[derive(Debug, Clone, Copy, Default)]
pub struct HebrewDateMatcher {
    policy: LeapMonthPolicy,
}

impl HebrewDateMatcher {
    /// Create a new matcher with the given policy
    #[must_use]
    pub const fn new(policy: LeapMonthPolicy) -> Self {
        Self { policy }
    }

    /// Policy in use
    #[must_use]
    pub const fn policy(&self) -> LeapMonthPolicy {
        self.policy
    }

    /// Whether `event` is observed on `day`, and if so whether it was moved there
    fn observed_on(&self, event: &FamilyEvent, day: &UpcomingDate) -> Option<bool> {
        let observed = self.policy.observed_in(&event.anchor, day.hebrew.year)?;
        (observed == day.hebrew)
            .then(|| observed.month != event.anchor.month || observed.day != event.anchor.day)
    }

    /// Events recurring inside `window`, in window order then event order
    #[must_use]
    pub fn match_events(
        &self,
        events: &[FamilyEvent],
        window: &UpcomingWindow,
        tree: &FamilyTree,
    ) -> Vec<MatchedEvent> {
        let mut matched = vec![false; events.len()];
        let mut out = Vec::new();

        for day in &window.dates {
            for (idx, event) in events.iter().enumerate() {
                if matched[idx] {
                    continue;
                }
                let Some(shifted) = self.observed_on(event, day) else {
                    continue;
                };
                matched[idx] = true;

                let deceased = event
                    .subjects
                    .iter()
                    .any(|id| tree.individual(id).is_some_and(|i| i.is_deceased()));
                log::debug!(
                    "{:?} of {} matches {} ({})",
                    event.kind,
                    event.primary_subject(),
                    day.hebrew,
                    day.gregorian
                );
                out.push(MatchedEvent {
                    event: event.clone(),
                    occurrence: *day,
                    shifted,
                    elapsed_years: occurrence_age(event, day),
                    deceased,
                });
            }
        }

        log::info!(
            "{} of {} events recur between {} and {}",
            out.len(),
            events.len(),
            window.start().map_or_else(String::new, |d| d.to_string()),
            window.end().map_or_else(String::new, |d| d.to_string())
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::calendar::{AnchorDate, HebrewMonth};
    use crate::models::{EventDate, EventKind, Individual};

    fn window(start: NaiveDate, days: u64) -> UpcomingWindow {
        UpcomingWindow::new(
            start
                .iter_days()
                .take(days as usize)
                .map(UpcomingDate::from_gregorian)
                .collect(),
        )
    }

    fn event(id: &str, kind: EventKind, month: HebrewMonth, day: u8, origin: Option<i32>) -> FamilyEvent {
        FamilyEvent::personal(id, kind, AnchorDate::new(month, day), origin)
    }

    #[test]
    fn test_matches_inside_window_only() {
        // 2024-12-16 is 15 Kislev 5785
        let start = NaiveDate::from_ymd_opt(2024, 12, 14).unwrap();
        let events = vec![
            event("@I1@", EventKind::Birthday, HebrewMonth::Kislev, 15, Some(1950)),
            event("@I2@", EventKind::Birthday, HebrewMonth::Nisan, 15, Some(1950)),
        ];
        let matches = HebrewDateMatcher::default().match_events(&events, &window(start, 7), &FamilyTree::new());
        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!(m.event.primary_subject(), "@I1@");
        assert_eq!(m.occurrence.gregorian, NaiveDate::from_ymd_opt(2024, 12, 16).unwrap());
        assert_eq!(m.elapsed_years, Some(74));
        assert!(!m.shifted);
        assert!(!m.deceased);
    }

    #[test]
    fn test_missing_origin_year_leaves_age_unavailable() {
        let start = NaiveDate::from_ymd_opt(2024, 12, 16).unwrap();
        let events = vec![event("@I1@", EventKind::Yahrzeit, HebrewMonth::Kislev, 15, None)];
        let mut tree = FamilyTree::new();
        tree.add_individual(Individual::new("@I1@", "A").with_death(EventDate::raw("")));

        let matches = HebrewDateMatcher::default().match_events(&events, &window(start, 1), &tree);
        assert_eq!(matches[0].elapsed_years, None);
        assert!(matches[0].deceased);
    }

    #[test]
    fn test_event_matches_once_across_a_long_window() {
        let start = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
        let events = vec![event("@I1@", EventKind::Birthday, HebrewMonth::Kislev, 15, None)];
        let matches = HebrewDateMatcher::default().match_events(&events, &window(start, 400), &FamilyTree::new());
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn test_adar_ii_anchor_in_common_year_follows_policy() {
        // 2025-03-14 is 14 Adar 5785, a common year
        let start = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let events = vec![event("@I1@", EventKind::Birthday, HebrewMonth::AdarII, 14, None)];

        let shift = HebrewDateMatcher::new(LeapMonthPolicy::ShiftToAdjacent)
            .match_events(&events, &window(start, 1), &FamilyTree::new());
        assert_eq!(shift.len(), 1);
        assert!(shift[0].shifted);

        let skip = HebrewDateMatcher::new(LeapMonthPolicy::Skip)
            .match_events(&events, &window(start, 1), &FamilyTree::new());
        assert!(skip.is_empty());
    }

    #[test]
    fn test_age_across_new_year_counts_hebrew_years() {
        // Born 10 Tevet 5700 (December 1939); 10 Tevet 5785 is 2025-01-10
        let anchor = AnchorDate {
            month: HebrewMonth::Tevet,
            day: 10,
            year: Some(5700),
            leap_origin: false,
        };
        let events = vec![FamilyEvent::personal("@I1@", EventKind::Birthday, anchor, Some(1939))];
        let start = NaiveDate::from_ymd_opt(2025, 1, 8).unwrap();

        let matches = HebrewDateMatcher::default().match_events(&events, &window(start, 7), &FamilyTree::new());
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].occurrence.gregorian, NaiveDate::from_ymd_opt(2025, 1, 10).unwrap());
        assert_eq!(matches[0].elapsed_years, Some(85));
    }

    #[test]
    fn test_elapsed_years_is_never_negative() {
        assert_eq!(elapsed_years(Some(2000), 2025), Some(25));
        assert_eq!(elapsed_years(Some(2030), 2025), None);
        assert_eq!(elapsed_years(None, 2025), None);
    }
}
