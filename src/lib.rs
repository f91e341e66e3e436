pub mod config;
pub mod error;
pub mod schema;
pub mod graph;
pub mod classify;
pub mod render;

pub use config::Config;
pub use error::{DomainmapError, Result};
pub use schema::{Relationship, RelationshipType, Schema, Table};
pub use graph::{build_strict_graph, connected_components, AdjacencyGraph};
pub use classify::{DomainClassifier, DomainMap, Partition};
