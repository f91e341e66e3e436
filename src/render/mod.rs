//! Diagram rendering for classified schemas.

mod mermaid;

pub use mermaid::{render_domain_chunks, render_schema, DiagramChunk};
