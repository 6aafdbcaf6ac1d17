//! Record and event extraction from normalized text.
//!
//! Parsing is a single pass over the lines that keeps the record under
//! construction and the level-1 event it is inside. Cross references are
//! resolved once every record has been read, then events are extracted from the
//! resolved records.

use crate::calendar::MonthTable;
use crate::collections::FamilyTree;
use crate::models::{
    EventDate, EventKind, Family, FamilyEvent, Gender, Individual, ParseSkip, SkipLog,
    display_name,
};

use super::dates::parse_date;
use super::line::GedcomLine;

/// Everything read from one file
#[derive(Debug, Clone, Default)]
pub struct ParsedTree {
    /// Individuals and families
    pub tree: FamilyTree,
    /// Recurring events in file order: personal events first, then anniversaries
    pub events: Vec<FamilyEvent>,
    /// Lines and references that were left out
    pub skipped: SkipLog,
}

/// Level-1 event a `DATE` line can belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EventTag {
    Birth,
    Death,
    Marriage,
    Divorce,
}

impl EventTag {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "BIRT" => Some(Self::Birth),
            "DEAT" => Some(Self::Death),
            "MARR" => Some(Self::Marriage),
            "DIV" => Some(Self::Divorce),
            _ => None,
        }
    }
}

/// Record under construction
#[derive(Debug)]
enum Record {
    Individual(Individual),
    Family(Family),
    Other,
}

/// Parser for normalized genealogy text
#[derive(Debug, Clone)]
pub struct GedcomParser {
    months: MonthTable,
}

impl Default for GedcomParser {
    fn default() -> Self {
        Self::new(MonthTable::default())
    }
}

impl GedcomParser {
    /// Create a parser that reads month names through `months`
    #[must_use]
    pub fn new(months: MonthTable) -> Self {
        Self { months }
    }

    /// Parse normalized text.
    ///
    /// Never fails: lines that do not fit are recorded in
    /// [`ParsedTree::skipped`] and parsing continues.
    #[must_use]
    pub fn parse(&self, text: &str) -> ParsedTree {
        let mut parsed = ParsedTree::default();
        let mut current = Record::Other;
        let mut event: Option<EventTag> = None;
        let mut seen_date = false;

        for (idx, raw_line) in text.lines().enumerate() {
            let line_no = idx + 1;
            let trimmed = raw_line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let Some(line) = GedcomLine::parse(trimmed) else {
                parsed
                    .skipped
                    .push(ParseSkip::at_line(line_no, format!("unparseable line '{trimmed}'")));
                continue;
            };

            match line.level {
                0 => {
                    self.finish(std::mem::replace(&mut current, Record::Other), &mut parsed);
                    event = None;
                    current = self.start_record(&line, line_no, &mut parsed.skipped);
                }
                1 => {
                    event = EventTag::from_tag(&line.tag);
                    seen_date = false;
                    self.apply_field(&mut current, &line, event);
                }
                2 if line.tag == "DATE" && !seen_date => {
                    if let Some(tag) = event {
                        seen_date = true;
                        let date = self.read_date(&line, line_no, &mut parsed.skipped);
                        apply_date(&mut current, tag, date);
                    }
                }
                _ => {}
            }
        }
        self.finish(current, &mut parsed);

        resolve_references(&mut parsed);
        parsed.events = extract_events(&parsed.tree);

        log::info!(
            "Parsed {} individuals, {} families and {} recurring events ({} skipped)",
            parsed.tree.individual_count(),
            parsed.tree.family_count(),
            parsed.events.len(),
            parsed.skipped.len()
        );
        parsed
    }

    fn start_record(&self, line: &GedcomLine, line_no: usize, skipped: &mut SkipLog) -> Record {
        match (line.tag.as_str(), &line.xref) {
            ("INDI", Some(id)) => Record::Individual(Individual::new(id.clone(), id.clone())),
            ("FAM", Some(id)) => Record::Family(Family::new(id.clone())),
            ("INDI" | "FAM", None) => {
                skipped.push(ParseSkip::at_line(
                    line_no,
                    format!("{} record without identifier", line.tag),
                ));
                Record::Other
            }
            _ => Record::Other,
        }
    }

    fn apply_field(&self, record: &mut Record, line: &GedcomLine, event: Option<EventTag>) {
        let value = line.value_str();
        match record {
            Record::Individual(person) => match line.tag.as_str() {
                "NAME" if person.name == person.id => {
                    person.name = display_name(value, &person.id);
                }
                "SEX" => person.gender = Gender::from(value),
                "FAMC" if !value.is_empty() => person.child_of.push(value.to_string()),
                "FAMS" if !value.is_empty() => person.spouse_of.push(value.to_string()),
                _ if event == Some(EventTag::Death) && person.death.is_none() => {
                    person.death = Some(EventDate::raw(value));
                }
                _ => {}
            },
            Record::Family(family) => match line.tag.as_str() {
                "HUSB" if family.husband.is_none() && !value.is_empty() => {
                    family.husband = Some(value.to_string());
                }
                "WIFE" if family.wife.is_none() && !value.is_empty() => {
                    family.wife = Some(value.to_string());
                }
                "CHIL" if !value.is_empty() && !family.children.iter().any(|c| c == value) => {
                    family.children.push(value.to_string());
                }
                _ if event == Some(EventTag::Divorce) && family.divorce.is_none() => {
                    family.divorce = Some(EventDate::raw(value));
                }
                _ => {}
            },
            Record::Other => {}
        }
    }

    fn read_date(&self, line: &GedcomLine, line_no: usize, skipped: &mut SkipLog) -> EventDate {
        let value = line.value_str();
        match parse_date(value, &self.months) {
            Ok(date) => date,
            Err(err) => {
                skipped.push(ParseSkip::at_line(line_no, format!("date '{value}': {err}")));
                EventDate::raw(value)
            }
        }
    }

    fn finish(&self, record: Record, parsed: &mut ParsedTree) {
        match record {
            Record::Individual(person) => {
                if parsed.tree.contains_individual(&person.id) {
                    parsed
                        .skipped
                        .push(ParseSkip::record(format!("duplicate individual {}", person.id)));
                }
                parsed.tree.add_individual(person);
            }
            Record::Family(family) => {
                if parsed.tree.family(&family.id).is_some() {
                    parsed
                        .skipped
                        .push(ParseSkip::record(format!("duplicate family {}", family.id)));
                }
                parsed.tree.add_family(family);
            }
            Record::Other => {}
        }
    }
}

fn apply_date(record: &mut Record, tag: EventTag, date: EventDate) {
    match (record, tag) {
        (Record::Individual(person), EventTag::Birth) => person.birth = Some(date),
        (Record::Individual(person), EventTag::Death) => person.death = Some(date),
        (Record::Family(family), EventTag::Marriage) => family.marriage = Some(date),
        (Record::Family(family), EventTag::Divorce) => family.divorce = Some(date),
        _ => {}
    }
}

/// Drop references to missing records and add links only one side recorded
fn resolve_references(parsed: &mut ParsedTree) {
    let tree = &parsed.tree;
    let mut families: Vec<Family> = tree.families().cloned().collect();
    let mut individuals: Vec<Individual> = tree.individuals().cloned().collect();

    for family in &mut families {
        let known = |id: &Option<String>| id.as_deref().is_none_or(|i| tree.contains_individual(i));
        if !known(&family.husband) {
            parsed.skipped.push(unknown_member(&family.id, family.husband.take()));
        }
        if !known(&family.wife) {
            parsed.skipped.push(unknown_member(&family.id, family.wife.take()));
        }
        let (kept, missing): (Vec<String>, Vec<String>) = std::mem::take(&mut family.children)
            .into_iter()
            .partition(|c| tree.contains_individual(c));
        family.children = kept;
        for child in missing {
            parsed.skipped.push(unknown_member(&family.id, Some(child)));
        }
    }

    for person in &mut individuals {
        for list in [&mut person.child_of, &mut person.spouse_of] {
            list.retain(|fam| {
                let exists = families.iter().any(|f| &f.id == fam);
                if !exists {
                    parsed.skipped.push(ParseSkip::record(format!(
                        "{} references unknown family {fam}",
                        person.id
                    )));
                }
                exists
            });
        }
        for fam in &person.child_of {
            if let Some(family) = families.iter_mut().find(|f| &f.id == fam) {
                if !family.children.contains(&person.id) {
                    family.children.push(person.id.clone());
                }
            }
        }
        for fam in &person.spouse_of {
            if let Some(family) = families.iter_mut().find(|f| &f.id == fam) {
                add_spouse(family, &person.id, person.gender);
            }
        }
    }

    let mut resolved = FamilyTree::new();
    for person in individuals {
        resolved.add_individual(person);
    }
    for family in families {
        resolved.add_family(family);
    }
    parsed.tree = resolved;
}

fn unknown_member(family_id: &str, member: Option<String>) -> ParseSkip {
    ParseSkip::record(format!(
        "family {family_id} references unknown individual {}",
        member.unwrap_or_default()
    ))
}

fn add_spouse(family: &mut Family, id: &str, gender: Gender) {
    if family.spouses().any(|s| s == id) {
        return;
    }
    let slot = match (gender, family.husband.is_none(), family.wife.is_none()) {
        (Gender::Male, true, _) | (Gender::Unknown, true, _) => &mut family.husband,
        (Gender::Female, _, true) | (Gender::Unknown, false, true) => &mut family.wife,
        _ => return,
    };
    *slot = Some(id.to_string());
}

/// Recurring events of a resolved tree
fn extract_events(tree: &FamilyTree) -> Vec<FamilyEvent> {
    let mut events = Vec::new();
    for person in tree.individuals() {
        if let Some(anchor) = person.birth.as_ref().and_then(|d| d.anchor) {
            events.push(FamilyEvent::personal(
                &person.id,
                EventKind::Birthday,
                anchor,
                person.birth_year(),
            ));
        }
        if let Some(anchor) = person.death.as_ref().and_then(|d| d.anchor) {
            events.push(FamilyEvent::personal(
                &person.id,
                EventKind::Yahrzeit,
                anchor,
                person.death_year(),
            ));
        }
    }
    for family in tree.families() {
        let Some(anchor) = family.marriage.as_ref().and_then(|d| d.anchor) else {
            continue;
        };
        match family.couple() {
            Some((husband, wife)) => events.push(FamilyEvent::anniversary(
                &family.id,
                husband,
                wife,
                anchor,
                family.marriage_year(),
            )),
            None => log::debug!(
                "Family {} has a marriage date but not both spouses; no anniversary",
                family.id
            ),
        }
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::HebrewMonth;

    const SAMPLE: &str = "\
0 HEAD
0 @I1@ INDI
1 NAME Avraham /Cohen/
1 SEX M
1 BIRT
2 DATE @#DHEBREW@ 15 KSL 5700
1 FAMS @F1@
0 @I2@ INDI
1 NAME Sarah /Levi/
1 SEX F
1 DEAT
2 DATE @#DHEBREW@ 3 NSN 5770
1 FAMS @F1@
0 @I3@ INDI
1 NAME Yitzhak /Cohen/
1 BIRT
2 DATE @#DHEBREW@ 40 KSL 5730
1 FAMC @F1@
0 @F1@ FAM
1 HUSB @I1@
1 WIFE @I2@
1 CHIL @I3@
1 CHIL @I9@
1 MARR
2 DATE @#DHEBREW@ 7 ELL 5725
0 TRLR
";

    #[test]
    fn test_records_and_events() {
        let parsed = GedcomParser::default().parse(SAMPLE);
        let tree = &parsed.tree;
        assert_eq!(tree.individual_count(), 3);
        assert_eq!(tree.name_of("@I1@"), "Avraham Cohen");
        assert_eq!(tree.individual("@I2@").map(|i| i.gender), Some(Gender::Female));
        assert!(tree.individual("@I2@").is_some_and(Individual::is_deceased));

        let kinds: Vec<(EventKind, &str)> = parsed
            .events
            .iter()
            .map(|e| (e.kind, e.primary_subject()))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (EventKind::Birthday, "@I1@"),
                (EventKind::Yahrzeit, "@I2@"),
                (EventKind::Anniversary, "@I1@"),
            ]
        );
        let marriage = &parsed.events[2];
        assert_eq!(marriage.anchor.month, HebrewMonth::Elul);
        assert_eq!(marriage.family_id.as_deref(), Some("@F1@"));
        assert_eq!(marriage.origin_year, Some(1965));
    }

    #[test]
    fn test_bad_date_and_unknown_member_are_skipped() {
        let parsed = GedcomParser::default().parse(SAMPLE);
        assert_eq!(parsed.skipped.len(), 2);
        let family = parsed.tree.family("@F1@").unwrap();
        assert_eq!(family.children, vec!["@I3@".to_string()]);
        let child = parsed.tree.individual("@I3@").unwrap();
        assert!(child.birth.as_ref().is_some_and(|b| b.anchor.is_none()));
    }

    #[test]
    fn test_thirtieth_of_a_short_month_is_skipped() {
        let text = "0 @I1@ INDI\n1 BIRT\n2 DATE @#DHEBREW@ 30 TVT\n0 @I2@ INDI\n1 BIRT\n2 DATE @#DHEBREW@ 30 KSL\n0 TRLR\n";
        let parsed = GedcomParser::default().parse(text);
        assert_eq!(parsed.skipped.len(), 1);
        assert_eq!(parsed.events.len(), 1);
        assert_eq!(parsed.events[0].primary_subject(), "@I2@");
    }

    #[test]
    fn test_one_sided_links_are_completed() {
        let text = "0 @I1@ INDI\n1 SEX F\n1 FAMS @F1@\n0 @I2@ INDI\n1 FAMC @F1@\n0 @F1@ FAM\n1 MARR\n2 DATE @#DHEBREW@ 1 TSH\n0 TRLR\n";
        let parsed = GedcomParser::default().parse(text);
        let family = parsed.tree.family("@F1@").unwrap();
        assert_eq!(family.wife.as_deref(), Some("@I1@"));
        assert_eq!(family.husband, None);
        assert_eq!(family.children, vec!["@I2@".to_string()]);
        // One spouse only: no anniversary
        assert!(parsed.events.is_empty());
        assert!(parsed.skipped.is_empty());
    }

    #[test]
    fn test_death_without_date_marks_deceased() {
        let text = "0 @I1@ INDI\n1 NAME Rivka\n1 DEAT Y\n0 TRLR\n";
        let parsed = GedcomParser::default().parse(text);
        let person = parsed.tree.individual("@I1@").unwrap();
        assert!(person.is_deceased());
        assert_eq!(person.death_year(), None);
        assert!(parsed.events.is_empty());
    }

    #[test]
    fn test_custom_month_table_is_used() {
        let months = MonthTable::empty().with_name("FIRST", HebrewMonth::Tishrei);
        let text = "0 @I1@ INDI\n1 BIRT\n2 DATE @#DHEBREW@ 2 FIRST\n0 TRLR\n";
        let parsed = GedcomParser::new(months).parse(text);
        assert_eq!(parsed.events.len(), 1);
        assert_eq!(parsed.events[0].anchor.month, HebrewMonth::Tishrei);
    }
}
