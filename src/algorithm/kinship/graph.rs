//! Undirected relationship graph
//!
//! Nodes are individual identifiers. Edges join spouses and each parent with
//! each child; siblings are only connected through their parents. Neighbours
//! keep insertion order, which makes traversals repeatable.

use rustc_hash::FxHashMap;

use crate::collections::FamilyTree;

/// Minimal owned simple graph over individual identifiers
#[derive(Debug, Clone, Default)]
pub struct RelationshipGraph {
    nodes: Vec<String>,
    index: FxHashMap<String, usize>,
    adjacency: Vec<Vec<usize>>,
    edges: usize,
}

impl RelationshipGraph {
    /// Create an empty graph
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph of a parsed tree.
    ///
    /// Every individual becomes a node, in file order, whether or not it
    /// belongs to a family.
    #[must_use]
    pub fn from_tree(tree: &FamilyTree) -> Self {
        let mut graph = Self::new();
        for person in tree.individuals() {
            graph.add_node(&person.id);
        }
        for family in tree.families() {
            let spouses: Vec<&str> = family.spouses().collect();
            if let [husband, wife] = spouses.as_slice() {
                graph.add_edge(husband, wife);
            }
            for parent in &spouses {
                for child in &family.children {
                    graph.add_edge(parent, child);
                }
            }
            // Childless single-spouse families still contribute their member
            for id in family.children.iter().map(String::as_str).chain(spouses.iter().copied()) {
                graph.add_node(id);
            }
        }
        log::info!(
            "Built relationship graph with {} nodes and {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        graph
    }

    /// Add a node if it is not present; returns its index
    pub fn add_node(&mut self, id: &str) -> usize {
        if let Some(&idx) = self.index.get(id) {
            return idx;
        }
        let idx = self.nodes.len();
        self.nodes.push(id.to_string());
        self.index.insert(id.to_string(), idx);
        self.adjacency.push(Vec::new());
        idx
    }

    /// Add an undirected edge, creating missing nodes.
    ///
    /// Returns `false` for self-loops and edges that already exist.
    pub fn add_edge(&mut self, a: &str, b: &str) -> bool {
        if a == b {
            return false;
        }
        let (ia, ib) = (self.add_node(a), self.add_node(b));
        if self.adjacency[ia].contains(&ib) {
            return false;
        }
        self.adjacency[ia].push(ib);
        self.adjacency[ib].push(ia);
        self.edges += 1;
        true
    }

    /// Whether `id` is a node
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Whether `a` and `b` are joined by an edge
    #[must_use]
    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        match (self.index.get(a), self.index.get(b)) {
            (Some(&ia), Some(&ib)) => self.adjacency[ia].contains(&ib),
            _ => false,
        }
    }

    /// Neighbours of `id` in insertion order; empty for unknown ids
    pub fn neighbors(&self, id: &str) -> impl Iterator<Item = &str> {
        self.index
            .get(id)
            .into_iter()
            .flat_map(|&idx| self.adjacency[idx].iter())
            .map(|&n| self.nodes[n].as_str())
    }

    /// Number of nodes
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of undirected edges
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges
    }

    pub(crate) fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub(crate) fn id_at(&self, idx: usize) -> &str {
        &self.nodes[idx]
    }

    pub(crate) fn adjacent(&self, idx: usize) -> &[usize] {
        &self.adjacency[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Family, Individual};

    #[test]
    fn test_edges_are_symmetric_and_simple() {
        let mut graph = RelationshipGraph::new();
        assert!(graph.add_edge("@A@", "@B@"));
        assert!(!graph.add_edge("@B@", "@A@"));
        assert!(!graph.add_edge("@A@", "@A@"));
        assert!(graph.has_edge("@B@", "@A@"));
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.neighbors("@A@").collect::<Vec<_>>(), vec!["@B@"]);
        assert_eq!(graph.neighbors("@Z@").count(), 0);
    }

    #[test]
    fn test_from_tree_links_spouses_and_children_not_siblings() {
        let mut tree = FamilyTree::new();
        for id in ["@H@", "@W@", "@C1@", "@C2@", "@LONER@"] {
            tree.add_individual(Individual::new(id, id));
        }
        let mut family = Family::new("@F1@");
        family.husband = Some("@H@".into());
        family.wife = Some("@W@".into());
        family.children = vec!["@C1@".into(), "@C2@".into()];
        tree.add_family(family);

        let graph = RelationshipGraph::from_tree(&tree);
        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.edge_count(), 5);
        assert!(graph.has_edge("@H@", "@W@"));
        assert!(graph.has_edge("@W@", "@C2@"));
        assert!(!graph.has_edge("@C1@", "@C2@"));
        assert!(graph.contains("@LONER@"));
    }
}
