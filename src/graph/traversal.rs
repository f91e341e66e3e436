//! BFS connected components over the strict adjacency graph.

use std::collections::{BTreeSet, HashSet, VecDeque};

use super::AdjacencyGraph;

/// Collect the component reachable from `start`.
///
/// `visited` is shared across calls so each table lands in exactly one component.
/// Tables are marked visited when enqueued, not when dequeued, so nothing is queued twice.
/// Returns the component sorted by name.
pub fn bfs_component(
    graph: &AdjacencyGraph,
    start: &str,
    visited: &mut HashSet<String>,
) -> Vec<String> {
    let mut component = Vec::new();
    let mut queue = VecDeque::new();

    visited.insert(start.to_string());
    queue.push_back(start.to_string());

    while let Some(table) = queue.pop_front() {
        for neighbor in graph.neighbors(&table) {
            if !visited.contains(neighbor) {
                visited.insert(neighbor.to_string());
                queue.push_back(neighbor.to_string());
            }
        }
        component.push(table);
    }

    component.sort();
    component
}

/// Partition `tables` into connected components.
///
/// Seeds are taken in lexicographic order so discovery order is reproducible.
/// A table with no strict edges becomes a singleton component.
pub fn connected_components<'a, I>(graph: &AdjacencyGraph, tables: I) -> Vec<Vec<String>>
where
    I: IntoIterator<Item = &'a str>,
{
    let ordered: BTreeSet<&str> = tables.into_iter().collect();
    let mut visited = HashSet::with_capacity(ordered.len());
    let mut components = Vec::new();

    for table in ordered {
        if !visited.contains(table) {
            components.push(bfs_component(graph, table, &mut visited));
        }
    }

    components
}
