//! Report assembly
//!
//! Joins matched events with distances and biographical data into ordered
//! entries. Paths are attached only for subjects farther than the threshold.

use std::cmp::Ordering;

use chrono::{Datelike, NaiveDate, Weekday};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::algorithm::kinship::{DistanceEngine, DistanceResult};
use crate::algorithm::matching::MatchedEvent;
use crate::calendar::{HebrewDate, UpcomingWindow};
use crate::collections::{FamilyTree, Relation};
use crate::models::{EventKind, Gender, years_between};

/// Cycle after which Hebrew and Gregorian dates realign
pub const METONIC_CYCLE: u32 = 19;

/// How a marriage ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum MarriageEnd {
    /// A divorce was recorded
    Divorced {
        /// Gregorian year of the wedding
        marriage_year: Option<i32>,
    },
    /// A spouse died
    Death {
        /// Years from the wedding to the first death
        duration: Option<u32>,
    },
}

/// Per-kind details of an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntryDetails {
    /// Birthday of someone alive
    LivingBirthday {
        /// Age reached
        age: Option<u32>,
    },
    /// Birthday of someone who has died
    DeceasedBirthday {
        /// Age at death
        age_at_death: Option<u32>,
        /// Years since birth
        years_since_birth: Option<u32>,
    },
    /// Anniversary of a death
    Yahrzeit {
        /// Years since death
        years_since_death: Option<u32>,
        /// Age at death
        age_at_death: Option<u32>,
    },
    /// Wedding anniversary
    Anniversary {
        /// Years since the wedding
        years: Option<u32>,
        /// Set when the marriage is over
        ended: Option<MarriageEnd>,
    },
}

impl EntryDetails {
    /// Emoji class shown next to the entry
    #[must_use]
    pub const fn emoji(&self) -> &'static str {
        match self {
            Self::LivingBirthday { .. } => "🎂",
            Self::DeceasedBirthday { .. } => "🕯️",
            Self::Yahrzeit { .. } => "🪦",
            Self::Anniversary { .. } => "💑",
        }
    }
}

/// One step of a displayed path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathStep {
    /// Individual identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// What this individual is to the previous step; `None` for the reference
    pub relation: Option<Relation>,
}

/// Final report unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedEntry {
    /// Individuals the event belongs to
    pub subject_ids: Vec<String>,
    /// Display name, "A & B" for couples
    pub name: String,
    /// Gender used for phrasing; unknown for couples
    pub gender: Gender,
    /// Event kind
    pub kind: EventKind,
    /// Gregorian date of this occurrence
    pub gregorian_date: NaiveDate,
    /// Day of the week of this occurrence
    pub weekday: Weekday,
    /// Hebrew date of this occurrence
    pub hebrew_date: HebrewDate,
    /// Whether the day was moved by the leap-month policy
    pub shifted: bool,
    /// Hops from the reference individual; `None` when unreachable
    pub distance: Option<usize>,
    /// Path from the reference to the subject, shown past the threshold
    pub path: Option<Vec<PathStep>>,
    /// Kind-specific details
    pub details: EntryDetails,
    /// Hebrew and Gregorian anniversaries fall on the same day this year
    pub coincides_with_gregorian: bool,
}

/// Assembled report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Reference individual
    pub reference_id: String,
    /// Reference individual's display name
    pub reference_name: String,
    /// First day of the window
    pub window_start: Option<NaiveDate>,
    /// Last day of the window
    pub window_end: Option<NaiveDate>,
    /// Number of days in the window
    pub window_days: usize,
    /// Weekly Torah portion, when the date source supplied one
    pub torah_portion: Option<String>,
    /// Entries in presentation order
    pub entries: Vec<EnrichedEntry>,
    /// Records skipped while reading the tree
    pub skipped: usize,
}

impl Report {
    /// Whether no event falls in the window
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builds reports for one tree and threshold
#[derive(Debug, Clone, Copy)]
pub struct ReportAssembler<'a> {
    tree: &'a FamilyTree,
    threshold: u32,
}

impl<'a> ReportAssembler<'a> {
    /// Create an assembler
    #[must_use]
    pub const fn new(tree: &'a FamilyTree, threshold: u32) -> Self {
        Self { tree, threshold }
    }

    /// Path shown for a distance result, reference first
    fn path_for(&self, result: &DistanceResult) -> Option<Vec<PathStep>> {
        if result.hops <= self.threshold as usize {
            return None;
        }
        let steps = result
            .path
            .iter()
            .enumerate()
            .map(|(i, id)| PathStep {
                id: id.clone(),
                name: self.tree.name_of(id).to_string(),
                relation: i
                    .checked_sub(1)
                    .and_then(|prev| self.tree.relation(id, &result.path[prev])),
            })
            .collect();
        Some(steps)
    }

    /// Closest subject's distance; ties go to the first subject
    fn closest(
        &self,
        subjects: &[String],
        engine: &mut DistanceEngine<'_>,
    ) -> Option<DistanceResult> {
        let mut best: Option<DistanceResult> = None;
        for id in subjects {
            match engine.distance_to(id) {
                Ok(result) => {
                    if best.as_ref().is_none_or(|b| result.hops < b.hops) {
                        best = Some(result);
                    }
                }
                Err(err) => log::debug!("No distance for {id}: {err}"),
            }
        }
        best
    }

    fn details(&self, matched: &MatchedEvent) -> EntryDetails {
        let event = &matched.event;
        let person = self.tree.individual(event.primary_subject());
        match event.kind {
            EventKind::Birthday if matched.deceased => EntryDetails::DeceasedBirthday {
                age_at_death: person.and_then(|p| p.age_at_death()),
                years_since_birth: matched.elapsed_years,
            },
            EventKind::Birthday => EntryDetails::LivingBirthday {
                age: matched.elapsed_years,
            },
            EventKind::Yahrzeit => EntryDetails::Yahrzeit {
                years_since_death: matched.elapsed_years,
                age_at_death: person.and_then(|p| p.age_at_death()),
            },
            EventKind::Anniversary => EntryDetails::Anniversary {
                years: matched.elapsed_years,
                ended: self.marriage_end(matched),
            },
        }
    }

    fn marriage_end(&self, matched: &MatchedEvent) -> Option<MarriageEnd> {
        let family = matched
            .event
            .family_id
            .as_deref()
            .and_then(|id| self.tree.family(id));
        if let Some(family) = family {
            if family.is_divorced() {
                return Some(MarriageEnd::Divorced {
                    marriage_year: family.marriage_year(),
                });
            }
        }
        if !matched.deceased {
            return None;
        }
        let wedding = family.and_then(|f| f.marriage.as_ref());
        let duration = matched
            .event
            .subjects
            .iter()
            .filter_map(|id| {
                let death = self.tree.individual(id)?.death.as_ref()?;
                years_between(wedding?, death)
            })
            .min();
        Some(MarriageEnd::Death { duration })
    }

    fn entry(&self, matched: MatchedEvent, engine: &mut DistanceEngine<'_>) -> EnrichedEntry {
        let subjects = matched.event.subjects.to_vec();
        let distance = self.closest(&subjects, engine);
        let (name, gender) = if matched.event.kind == EventKind::Anniversary {
            let names = subjects.iter().map(|id| self.tree.name_of(id)).join(" & ");
            (names, Gender::Unknown)
        } else {
            let id = matched.event.primary_subject();
            let gender = self.tree.individual(id).map_or(Gender::Unknown, |p| p.gender);
            (self.tree.name_of(id).to_string(), gender)
        };
        let coincides = matched
            .elapsed_years
            .is_some_and(|n| n > 0 && n % METONIC_CYCLE == 0);

        EnrichedEntry {
            details: self.details(&matched),
            path: distance.as_ref().and_then(|d| self.path_for(d)),
            distance: distance.map(|d| d.hops),
            subject_ids: subjects,
            name,
            gender,
            kind: matched.event.kind,
            gregorian_date: matched.occurrence.gregorian,
            weekday: matched.occurrence.gregorian.weekday(),
            hebrew_date: matched.occurrence.hebrew,
            shifted: matched.shifted,
            coincides_with_gregorian: coincides,
        }
    }

    /// Assemble matched events into a report.
    ///
    /// Entries are ordered by date, then distance with unreachable subjects
    /// last, then name. No matches give an empty report, not an error.
    pub fn assemble(
        &self,
        matches: Vec<MatchedEvent>,
        engine: &mut DistanceEngine<'_>,
        window: &UpcomingWindow,
        skipped: usize,
    ) -> Report {
        let entries = matches
            .into_iter()
            .map(|m| self.entry(m, engine))
            .sorted_by(compare_entries)
            .collect_vec();

        let reference_id = engine.source().to_string();
        Report {
            reference_name: self.tree.name_of(&reference_id).to_string(),
            reference_id,
            window_start: window.start(),
            window_end: window.end(),
            window_days: window.len(),
            torah_portion: window.torah_portion.clone(),
            entries,
            skipped,
        }
    }
}

fn compare_entries(a: &EnrichedEntry, b: &EnrichedEntry) -> Ordering {
    let distance = |e: &EnrichedEntry| e.distance.unwrap_or(usize::MAX);
    a.gregorian_date
        .cmp(&b.gregorian_date)
        .then_with(|| distance(a).cmp(&distance(b)))
        .then_with(|| a.name.cmp(&b.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::kinship::RelationshipGraph;
    use crate::algorithm::matching::HebrewDateMatcher;
    use crate::calendar::{AnchorDate, HebrewMonth, UpcomingDate};
    use crate::models::{EventDate, Family, FamilyEvent, Individual};

    fn year(y: i32) -> EventDate {
        let mut date = EventDate::raw(y.to_string());
        date.gregorian_year = Some(y);
        date
    }

    /// G - P - C chain plus P's spouse S, and an unrelated U
    fn tree() -> FamilyTree {
        let mut tree = FamilyTree::new();
        tree.add_individual(Individual::new("@G@", "Grandpa").with_gender(Gender::Male));
        tree.add_individual(
            Individual::new("@P@", "Parent")
                .with_gender(Gender::Male)
                .with_birth(year(1960))
                .with_death(year(2020)),
        );
        tree.add_individual(Individual::new("@S@", "Spouse").with_gender(Gender::Female));
        tree.add_individual(Individual::new("@C@", "Child").with_gender(Gender::Female));
        tree.add_individual(Individual::new("@U@", "Unrelated"));
        let mut top = Family::new("@F1@");
        top.husband = Some("@G@".into());
        top.children.push("@P@".into());
        tree.add_family(top);
        let mut bottom = Family::new("@F2@");
        bottom.husband = Some("@P@".into());
        bottom.wife = Some("@S@".into());
        bottom.children.push("@C@".into());
        bottom.marriage = Some(year(1985));
        tree.add_family(bottom);
        tree
    }

    fn report(events: &[FamilyEvent], threshold: u32) -> Report {
        let tree = tree();
        let graph = RelationshipGraph::from_tree(&tree);
        let mut engine = DistanceEngine::new(&graph, "@G@").unwrap();
        let start = NaiveDate::from_ymd_opt(2024, 12, 16).unwrap();
        let window = UpcomingWindow::new(
            start.iter_days().take(7).map(UpcomingDate::from_gregorian).collect(),
        );
        let matches = HebrewDateMatcher::default().match_events(events, &window, &tree);
        ReportAssembler::new(&tree, threshold).assemble(matches, &mut engine, &window, 0)
    }

    fn kislev(day: u8) -> AnchorDate {
        AnchorDate::new(HebrewMonth::Kislev, day)
    }

    #[test]
    fn test_path_shown_only_past_threshold() {
        let events = vec![FamilyEvent::personal("@C@", EventKind::Birthday, kislev(15), Some(2000))];

        let entry = &report(&events, 1).entries[0];
        assert_eq!(entry.distance, Some(2));
        let path = entry.path.as_ref().unwrap();
        let ids: Vec<&str> = path.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["@G@", "@P@", "@C@"]);
        assert_eq!(path[0].relation, None);
        assert_eq!(path[1].relation, Some(Relation::Son));
        assert_eq!(path[2].relation, Some(Relation::Daughter));

        let entry = &report(&events, 2).entries[0];
        assert_eq!(entry.distance, Some(2));
        assert!(entry.path.is_none());
    }

    #[test]
    fn test_details_follow_kind_and_status() {
        let events = vec![
            FamilyEvent::personal("@P@", EventKind::Birthday, kislev(15), Some(1960)),
            FamilyEvent::personal("@P@", EventKind::Yahrzeit, kislev(16), Some(2020)),
            FamilyEvent::personal("@C@", EventKind::Birthday, kislev(17), Some(2005)),
        ];
        let report = report(&events, 8);
        assert_eq!(
            report.entries[0].details,
            EntryDetails::DeceasedBirthday {
                age_at_death: Some(60),
                years_since_birth: Some(64)
            }
        );
        assert_eq!(report.entries[0].details.emoji(), "🕯️");
        assert_eq!(
            report.entries[1].details,
            EntryDetails::Yahrzeit {
                years_since_death: Some(4),
                age_at_death: Some(60)
            }
        );
        assert_eq!(report.entries[2].details, EntryDetails::LivingBirthday { age: Some(19) });
        assert!(report.entries[2].coincides_with_gregorian);
        assert!(!report.entries[0].coincides_with_gregorian);
    }

    #[test]
    fn test_anniversary_uses_closer_spouse_and_death_end() {
        let event = FamilyEvent::anniversary("@F2@", "@P@", "@S@", kislev(15), Some(1985));
        let report = report(&[event], 8);
        let entry = &report.entries[0];
        assert_eq!(entry.name, "Parent & Spouse");
        assert_eq!(entry.distance, Some(1));
        assert_eq!(
            entry.details,
            EntryDetails::Anniversary {
                years: Some(39),
                ended: Some(MarriageEnd::Death { duration: Some(35) })
            }
        );
    }

    #[test]
    fn test_marriage_length_counts_hebrew_years() {
        // Wed 20 Elul 5745 (September 1985), widowed 5 Tishrei 5781 (September 2020)
        let hebrew = |month: HebrewMonth, day: u8, year: i32, gregorian: i32| EventDate {
            raw: String::new(),
            anchor: Some(AnchorDate {
                month,
                day,
                year: Some(year),
                leap_origin: false,
            }),
            gregorian_year: Some(gregorian),
        };
        let mut tree = tree();
        tree.add_individual(
            Individual::new("@P@", "Parent")
                .with_gender(Gender::Male)
                .with_death(hebrew(HebrewMonth::Tishrei, 5, 5781, 2020)),
        );
        let mut family = Family::new("@F2@");
        family.husband = Some("@P@".into());
        family.wife = Some("@S@".into());
        family.marriage = Some(hebrew(HebrewMonth::Elul, 20, 5745, 1985));
        tree.add_family(family);

        let event = FamilyEvent::anniversary("@F2@", "@P@", "@S@", kislev(15), Some(1985));
        let start = NaiveDate::from_ymd_opt(2024, 12, 16).unwrap();
        let window = UpcomingWindow::new(vec![UpcomingDate::from_gregorian(start)]);
        let matches = HebrewDateMatcher::default().match_events(&[event], &window, &tree);
        let graph = RelationshipGraph::from_tree(&tree);
        let mut engine = DistanceEngine::new(&graph, "@G@").unwrap();
        let report = ReportAssembler::new(&tree, 8).assemble(matches, &mut engine, &window, 0);
        assert_eq!(
            report.entries[0].details,
            EntryDetails::Anniversary {
                years: Some(39),
                ended: Some(MarriageEnd::Death { duration: Some(36) })
            }
        );
    }

    #[test]
    fn test_ordering_and_unreachable_subjects() {
        let events = vec![
            FamilyEvent::personal("@U@", EventKind::Birthday, kislev(15), None),
            FamilyEvent::personal("@C@", EventKind::Birthday, kislev(15), None),
            FamilyEvent::personal("@G@", EventKind::Birthday, kislev(16), None),
        ];
        let report = report(&events, 8);
        let order: Vec<(&str, Option<usize>)> = report
            .entries
            .iter()
            .map(|e| (e.subject_ids[0].as_str(), e.distance))
            .collect();
        assert_eq!(order, vec![("@C@", Some(2)), ("@U@", None), ("@G@", Some(0))]);
        assert!(report.entries[1].path.is_none());
        assert_eq!(report.reference_name, "Grandpa");
        assert_eq!(report.window_days, 7);
    }

    #[test]
    fn test_empty_match_set_is_an_empty_report() {
        let report = report(&[], 0);
        assert!(report.is_empty());
        assert_eq!(report.window_start, NaiveDate::from_ymd_opt(2024, 12, 16));
    }
}
