//! Family tree collection
//!
//! Owns every parsed Individual and Family in file order, with id lookup.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::models::{Family, Gender, Individual};

/// How one individual relates to a directly connected one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    /// Male spouse
    Husband,
    /// Female spouse
    Wife,
    /// Spouse of unrecorded gender
    Spouse,
    /// Male parent
    Father,
    /// Female parent
    Mother,
    /// Parent of unrecorded gender
    Parent,
    /// Male child
    Son,
    /// Female child
    Daughter,
    /// Child of unrecorded gender
    Child,
}

/// All individuals and families of one parsed file
#[derive(Debug, Clone, Default)]
pub struct FamilyTree {
    individuals: Vec<Individual>,
    individual_index: FxHashMap<String, usize>,
    families: Vec<Family>,
    family_index: FxHashMap<String, usize>,
}

impl FamilyTree {
    /// Create a new empty tree
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an individual; a later record with the same id replaces the earlier one
    pub fn add_individual(&mut self, individual: Individual) {
        if let Some(&idx) = self.individual_index.get(&individual.id) {
            self.individuals[idx] = individual;
        } else {
            self.individual_index
                .insert(individual.id.clone(), self.individuals.len());
            self.individuals.push(individual);
        }
    }

    /// Add a family; a later record with the same id replaces the earlier one
    pub fn add_family(&mut self, family: Family) {
        if let Some(&idx) = self.family_index.get(&family.id) {
            self.families[idx] = family;
        } else {
            self.family_index
                .insert(family.id.clone(), self.families.len());
            self.families.push(family);
        }
    }

    /// Look up an individual by id
    #[must_use]
    pub fn individual(&self, id: &str) -> Option<&Individual> {
        self.individual_index
            .get(id)
            .map(|&idx| &self.individuals[idx])
    }

    /// Look up a family by id
    #[must_use]
    pub fn family(&self, id: &str) -> Option<&Family> {
        self.family_index.get(id).map(|&idx| &self.families[idx])
    }

    /// Whether an individual with this id exists
    #[must_use]
    pub fn contains_individual(&self, id: &str) -> bool {
        self.individual_index.contains_key(id)
    }

    /// Individuals in file order
    pub fn individuals(&self) -> impl Iterator<Item = &Individual> {
        self.individuals.iter()
    }

    /// Families in file order
    pub fn families(&self) -> impl Iterator<Item = &Family> {
        self.families.iter()
    }

    /// Number of individuals
    #[must_use]
    pub fn individual_count(&self) -> usize {
        self.individuals.len()
    }

    /// Number of families
    #[must_use]
    pub fn family_count(&self) -> usize {
        self.families.len()
    }

    /// Display name of an individual, or the id itself when unknown
    #[must_use]
    pub fn name_of<'a>(&'a self, id: &'a str) -> &'a str {
        self.individual(id).map_or(id, |i| i.name.as_str())
    }

    /// What `from` is to `to`, when the two share a family.
    ///
    /// Spouse links are checked first, then `from` as parent of `to`, then
    /// `from` as child of `to`.
    #[must_use]
    pub fn relation(&self, from: &str, to: &str) -> Option<Relation> {
        let gender = self.individual(from).map_or(Gender::Unknown, |i| i.gender);
        let by_gender = |male, female, unknown| match gender {
            Gender::Male => male,
            Gender::Female => female,
            Gender::Unknown => unknown,
        };

        for family in &self.families {
            if let Some((husband, wife)) = family.couple() {
                if (husband == from && wife == to) || (wife == from && husband == to) {
                    return Some(by_gender(Relation::Husband, Relation::Wife, Relation::Spouse));
                }
            }
        }
        for family in &self.families {
            let is_parent = family.spouses().any(|s| s == from);
            if is_parent && family.children.iter().any(|c| c == to) {
                return Some(by_gender(Relation::Father, Relation::Mother, Relation::Parent));
            }
        }
        for family in &self.families {
            let is_child = family.children.iter().any(|c| c == from);
            if is_child && family.spouses().any(|s| s == to) {
                return Some(by_gender(Relation::Son, Relation::Daughter, Relation::Child));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> FamilyTree {
        let mut tree = FamilyTree::new();
        tree.add_individual(Individual::new("@I1@", "Avraham").with_gender(Gender::Male));
        tree.add_individual(Individual::new("@I2@", "Sarah").with_gender(Gender::Female));
        tree.add_individual(Individual::new("@I3@", "Yitzhak").with_gender(Gender::Male));
        let mut family = Family::new("@F1@");
        family.husband = Some("@I1@".into());
        family.wife = Some("@I2@".into());
        family.children.push("@I3@".into());
        tree.add_family(family);
        tree
    }

    #[test]
    fn test_relations_follow_gender() {
        let tree = tree();
        assert_eq!(tree.relation("@I1@", "@I2@"), Some(Relation::Husband));
        assert_eq!(tree.relation("@I2@", "@I1@"), Some(Relation::Wife));
        assert_eq!(tree.relation("@I2@", "@I3@"), Some(Relation::Mother));
        assert_eq!(tree.relation("@I3@", "@I1@"), Some(Relation::Son));
        assert_eq!(tree.relation("@I3@", "@I9@"), None);
    }

    #[test]
    fn test_duplicate_ids_replace_in_place() {
        let mut tree = tree();
        tree.add_individual(Individual::new("@I1@", "Avram"));
        assert_eq!(tree.individual_count(), 3);
        assert_eq!(tree.name_of("@I1@"), "Avram");
        assert_eq!(tree.individuals().next().map(|i| i.id.as_str()), Some("@I1@"));
        assert_eq!(tree.name_of("@I9@"), "@I9@");
    }
}
