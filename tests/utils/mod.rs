//! Shared fixtures for integration tests
#![allow(dead_code)]

use chrono::NaiveDate;
use family_tree_notifier::adapters::CalendarSource;
use family_tree_notifier::common::traits::UpcomingDates;
use family_tree_notifier::{NotifierConfig, UpcomingWindow};

/// Three generations: grandparent G, parent P, child C, plus X whose
/// birth date is malformed and U who is unrelated to everyone.
///
/// G's birthday (20 Kislev) and C's birthday (17 Kislev) fall in the week
/// starting 2024-12-16 (15 Kislev 5785).
pub const THREE_GENERATIONS: &str = "\
0 HEAD
1 CHAR UTF-8
0 @G@ INDI
1 NAME Yitzhak /Avrahami/
1 SEX M
1 BIRT
2 DATE @#DHEBREW@ 20 KSL 5700
1 FAMS @F1@
0 @P@ INDI
1 NAME Yaakov /Avrahami/
1 SEX M
1 FAMC @F1@
1 FAMS @F2@
0 @C@ INDI
1 NAME Dina /Avrahami/
1 SEX F
1 BIRT
2 DATE @#DHEBREW@ 17 KSL 5760
1 FAMC @F2@
0 @X@ INDI
1 NAME Broken /Date/
1 BIRT
2 DATE @#DHEBREW@ 45 KSL 5750
1 FAMC @F2@
0 @U@ INDI
1 NAME Lavan /Aram/
1 BIRT
2 DATE @#DHEBREW@ 18 KSL 5720
0 @F1@ FAM
1 HUSB @G@
1 CHIL @P@
0 @F2@ FAM
1 HUSB @P@
1 CHIL @C@
1 CHIL @X@
0 TRLR
";

/// Monday 2024-12-16, which is 15 Kislev 5785
#[must_use]
pub fn window_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, 16).unwrap()
}

/// The seven days from [`window_start`]
#[must_use]
pub fn week() -> UpcomingWindow {
    CalendarSource::new().upcoming(window_start(), 7)
}

/// Configuration measuring from G with the given threshold
#[must_use]
pub fn config(threshold: u32) -> NotifierConfig {
    NotifierConfig::new("@G@")
        .unwrap()
        .with_distance_threshold(threshold)
        .with_start_date(window_start())
}
