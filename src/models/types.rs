//! Common domain type definitions
//!
//! Small enums shared by the record models and the report.

use serde::{Deserialize, Serialize};

/// Gender as recorded by the `SEX` tag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    /// Male
    Male,
    /// Female
    Female,
    /// Unknown or not recorded
    #[default]
    Unknown,
}

impl From<&str> for Gender {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "m" | "male" => Self::Male,
            "f" | "female" => Self::Female,
            _ => Self::Unknown,
        }
    }
}

/// Kind of recurring family event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Hebrew birthday of an individual
    Birthday,
    /// Anniversary of an individual's death
    Yahrzeit,
    /// Wedding anniversary of a couple
    Anniversary,
}

impl EventKind {
    /// Stable lowercase name used in tabular output
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Birthday => "birthday",
            Self::Yahrzeit => "yahrzeit",
            Self::Anniversary => "anniversary",
        }
    }
}
