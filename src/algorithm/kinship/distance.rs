//! Genealogical distance by breadth-first search
//!
//! Distance is the number of parent, child or spouse steps on a shortest path.
//! When several shortest paths exist, the one reached first by a traversal that
//! visits neighbours in insertion order is returned, so identical input always
//! yields the same path.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::graph::RelationshipGraph;
use crate::error::UnreachableError;

/// Shortest path between two individuals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceResult {
    /// Where the search started
    pub source: String,
    /// Where it ended
    pub target: String,
    /// Number of edges on the path
    pub hops: usize,
    /// Identifiers from source to target, both included
    pub path: Vec<String>,
}

/// Breadth-first parents from `source`, stopping early once `stop` is reached
fn bfs_parents(graph: &RelationshipGraph, source: usize, stop: Option<usize>) -> Vec<Option<usize>> {
    let mut parent = vec![None; graph.node_count()];
    let mut visited = vec![false; graph.node_count()];
    let mut queue = VecDeque::new();
    visited[source] = true;
    queue.push_back(source);

    while let Some(node) = queue.pop_front() {
        if Some(node) == stop {
            break;
        }
        for &next in graph.adjacent(node) {
            if !visited[next] {
                visited[next] = true;
                parent[next] = Some(node);
                queue.push_back(next);
            }
        }
    }
    parent
}

fn walk_back(
    graph: &RelationshipGraph,
    parent: &[Option<usize>],
    source: usize,
    target: usize,
) -> Option<DistanceResult> {
    let mut path = vec![target];
    let mut node = target;
    while node != source {
        node = parent[node]?;
        path.push(node);
    }
    path.reverse();
    Some(DistanceResult {
        source: graph.id_at(source).to_string(),
        target: graph.id_at(target).to_string(),
        hops: path.len() - 1,
        path: path.into_iter().map(|i| graph.id_at(i).to_string()).collect(),
    })
}

fn lookup(graph: &RelationshipGraph, id: &str) -> Result<usize, UnreachableError> {
    graph
        .index_of(id)
        .ok_or_else(|| UnreachableError::UnknownIndividual(id.to_string()))
}

/// Shortest path from `source` to `target`.
///
/// # Errors
/// Returns [`UnreachableError::UnknownIndividual`] if either id is not a node and
/// [`UnreachableError::Disconnected`] if no path exists.
pub fn shortest_path(
    graph: &RelationshipGraph,
    source: &str,
    target: &str,
) -> Result<DistanceResult, UnreachableError> {
    let s = lookup(graph, source)?;
    let t = lookup(graph, target)?;
    let parent = bfs_parents(graph, s, Some(t));
    walk_back(graph, &parent, s, t).ok_or_else(|| UnreachableError::Disconnected {
        source_id: source.to_string(),
        target_id: target.to_string(),
    })
}

/// Distances from one reference individual, computed with a single traversal
/// and memoized per target.
#[derive(Debug)]
pub struct DistanceEngine<'g> {
    graph: &'g RelationshipGraph,
    source: usize,
    parent: Vec<Option<usize>>,
    cache: FxHashMap<String, Result<DistanceResult, UnreachableError>>,
}

impl<'g> DistanceEngine<'g> {
    /// Run the traversal from `source`
    ///
    /// # Errors
    /// Returns [`UnreachableError::UnknownIndividual`] if `source` is not a node
    pub fn new(graph: &'g RelationshipGraph, source: &str) -> Result<Self, UnreachableError> {
        let source = lookup(graph, source)?;
        Ok(Self {
            graph,
            source,
            parent: bfs_parents(graph, source, None),
            cache: FxHashMap::default(),
        })
    }

    /// Reference individual
    #[must_use]
    pub fn source(&self) -> &str {
        self.graph.id_at(self.source)
    }

    /// Shortest path from the reference individual to `target`
    ///
    /// # Errors
    /// Same as [`shortest_path`]
    pub fn distance_to(&mut self, target: &str) -> Result<DistanceResult, UnreachableError> {
        if let Some(cached) = self.cache.get(target) {
            return cached.clone();
        }
        let result = lookup(self.graph, target).and_then(|t| {
            walk_back(self.graph, &self.parent, self.source, t).ok_or_else(|| {
                UnreachableError::Disconnected {
                    source_id: self.graph.id_at(self.source).to_string(),
                    target_id: target.to_string(),
                }
            })
        });
        self.cache.insert(target.to_string(), result.clone());
        result
    }

    /// Number of memoized targets
    #[must_use]
    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> RelationshipGraph {
        // A - B - D and A - C - D, with B inserted before C
        let mut graph = RelationshipGraph::new();
        graph.add_edge("A", "B");
        graph.add_edge("A", "C");
        graph.add_edge("B", "D");
        graph.add_edge("C", "D");
        graph.add_node("X");
        graph
    }

    #[test]
    fn test_self_distance_is_zero() {
        let graph = diamond();
        let result = shortest_path(&graph, "A", "A").unwrap();
        assert_eq!(result.hops, 0);
        assert_eq!(result.path, vec!["A"]);
    }

    #[test]
    fn test_tie_break_follows_insertion_order() {
        let graph = diamond();
        let result = shortest_path(&graph, "A", "D").unwrap();
        assert_eq!(result.hops, 2);
        assert_eq!(result.path, vec!["A", "B", "D"]);
        for _ in 0..10 {
            assert_eq!(shortest_path(&graph, "A", "D").unwrap(), result);
        }
    }

    #[test]
    fn test_disconnected_and_unknown() {
        let graph = diamond();
        assert_eq!(
            shortest_path(&graph, "A", "X"),
            Err(UnreachableError::Disconnected {
                source_id: "A".into(),
                target_id: "X".into()
            })
        );
        assert_eq!(
            shortest_path(&graph, "A", "Q"),
            Err(UnreachableError::UnknownIndividual("Q".into()))
        );
    }

    #[test]
    fn test_engine_agrees_with_shortest_path_and_memoizes() {
        let graph = diamond();
        let mut engine = DistanceEngine::new(&graph, "A").unwrap();
        for target in ["A", "B", "C", "D"] {
            assert_eq!(engine.distance_to(target), shortest_path(&graph, "A", target));
        }
        assert!(engine.distance_to("X").is_err());
        engine.distance_to("D").unwrap();
        assert_eq!(engine.cached(), 5);
        assert_eq!(engine.source(), "A");
    }
}
