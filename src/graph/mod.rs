//! Relationship graph: undirected adjacency over STRICT relationships, and
//! BFS connected components.

mod traversal;

pub use traversal::{bfs_component, connected_components};

use std::collections::{BTreeMap, BTreeSet};

use crate::schema::Relationship;

/// Undirected adjacency over table names.
///
/// Only tables that take part in at least one STRICT relationship are keys;
/// a missing key means "no neighbors".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjacencyGraph {
    edges: BTreeMap<String, BTreeSet<String>>,
}

impl AdjacencyGraph {
    /// Build the graph from STRICT relationships only. Every other kind is ignored.
    pub fn from_relationships(relationships: &[Relationship]) -> Self {
        let mut graph = Self::default();
        let mut skipped = 0usize;

        for rel in relationships {
            if rel.is_strict() {
                graph.add_edge(&rel.source_table, &rel.target_table);
            } else {
                skipped += 1;
            }
        }

        log::debug!(
            "Built strict graph: {} tables with edges, {} non-strict relationships skipped",
            graph.edges.len(),
            skipped
        );

        graph
    }

    /// Symmetric insertion.
    pub fn add_edge(&mut self, a: &str, b: &str) {
        self.edges
            .entry(a.to_string())
            .or_default()
            .insert(b.to_string());
        self.edges
            .entry(b.to_string())
            .or_default()
            .insert(a.to_string());
    }

    /// Neighbors of `table`, empty when the table has no strict relationships.
    pub fn neighbors<'a>(&'a self, table: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.edges
            .get(table)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    pub fn contains(&self, table: &str) -> bool {
        self.edges.contains_key(table)
    }

    /// Number of tables with at least one strict edge.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Iterate `(table, neighbors)` in table-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.edges.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Build the strict-only adjacency graph for a relationship list.
pub fn build_strict_graph(relationships: &[Relationship]) -> AdjacencyGraph {
    AdjacencyGraph::from_relationships(relationships)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::RelationshipType;

    fn rel(source: &str, target: &str, kind: RelationshipType) -> Relationship {
        Relationship::new(source, target, kind)
    }

    #[test]
    fn test_strict_edges_are_symmetric() {
        let graph = build_strict_graph(&[
            rel("order_items", "orders", RelationshipType::Strict),
            rel("orders", "users", RelationshipType::Strict),
        ]);

        let orders: Vec<_> = graph.neighbors("orders").collect();
        assert_eq!(orders, vec!["order_items", "users"]);
        assert_eq!(graph.neighbors("users").collect::<Vec<_>>(), vec!["orders"]);
        assert_eq!(graph.neighbors("order_items").collect::<Vec<_>>(), vec!["orders"]);

        for (table, neighbors) in graph.iter() {
            for n in neighbors {
                assert!(
                    graph.neighbors(n).any(|back| back == table),
                    "{} -> {} has no reverse edge",
                    table,
                    n
                );
            }
        }
    }

    #[test]
    fn test_non_strict_relationships_ignored() {
        let graph = build_strict_graph(&[
            rel("a", "b", RelationshipType::Loose),
            rel("a", "c", RelationshipType::DataSample),
            rel("b", "c", RelationshipType::Inferred),
            rel("c", "d", RelationshipType::Other),
        ]);
        assert!(graph.is_empty());
    }

    #[test]
    fn test_missing_table_has_no_neighbors() {
        let graph = build_strict_graph(&[rel("a", "b", RelationshipType::Strict)]);
        assert!(!graph.contains("orphan_table"));
        assert_eq!(graph.neighbors("orphan_table").count(), 0);
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn test_duplicate_and_reverse_edges_collapse() {
        let graph = build_strict_graph(&[
            rel("a", "b", RelationshipType::Strict),
            rel("a", "b", RelationshipType::Strict),
            rel("b", "a", RelationshipType::Strict),
        ]);
        assert_eq!(graph.neighbors("a").count(), 1);
        assert_eq!(graph.neighbors("b").count(), 1);
    }

    #[test]
    fn test_self_reference() {
        let graph =
            build_strict_graph(&[rel("categories", "categories", RelationshipType::Strict)]);
        assert_eq!(
            graph.neighbors("categories").collect::<Vec<_>>(),
            vec!["categories"]
        );
    }
}
