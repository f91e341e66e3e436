//! Mermaid `erDiagram` rendering for a whole schema or per-domain chunks.

use std::collections::{HashMap, HashSet};
use std::fmt::Write;

use serde::Serialize;

use crate::classify::DomainMap;
use crate::error::{DomainmapError, Result};
use crate::schema::{Column, Relationship, Schema, Table};

/// One rendered diagram for (part of) a domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagramChunk {
    /// Domain name, suffixed with ` - Part k` when the domain is split.
    pub name: String,
    pub tables: Vec<String>,
    pub diagram: String,
}

/// Render every table, column and relationship.
pub fn render_schema(schema: &Schema) -> String {
    let tables: Vec<&Table> = schema.tables.iter().collect();
    let relationships: Vec<&Relationship> = schema.relationships.iter().collect();
    render(&tables, &relationships, |_, _| true)
}

/// Render each domain as one or more diagrams of at most `max_tables_per_chunk` tables.
///
/// Tables keep schema order inside a domain. Only relationships with both ends in
/// the chunk are drawn, and only key columns (primary, foreign, or named by a drawn
/// relationship) are listed.
pub fn render_domain_chunks(
    schema: &Schema,
    domains: &DomainMap,
    max_tables_per_chunk: usize,
) -> Result<Vec<DiagramChunk>> {
    if max_tables_per_chunk == 0 {
        return Err(DomainmapError::Config(
            "max_tables_per_chunk must be greater than 0".to_string(),
        ));
    }

    let mut chunks = Vec::new();

    for (domain, names) in domains.iter() {
        let members: HashSet<&str> = names.iter().map(String::as_str).collect();
        let domain_tables: Vec<&Table> = schema
            .tables
            .iter()
            .filter(|t| members.contains(t.name.as_str()))
            .collect();

        if domain_tables.is_empty() {
            log::debug!("Domain {} has no tables in this schema, skipping", domain);
            continue;
        }

        let split = domain_tables.len() > max_tables_per_chunk;

        for (idx, chunk) in domain_tables.chunks(max_tables_per_chunk).enumerate() {
            let chunk_names: HashSet<&str> = chunk.iter().map(|t| t.name.as_str()).collect();
            let relationships: Vec<&Relationship> = schema
                .relationships
                .iter()
                .filter(|r| {
                    chunk_names.contains(r.source_table.as_str())
                        && chunk_names.contains(r.target_table.as_str())
                })
                .collect();

            let important = key_columns(&relationships);
            let diagram = render(chunk, &relationships, |table, column| {
                table.is_primary_key(column)
                    || column.foreign_key
                    || important
                        .get(table.name.as_str())
                        .map_or(false, |cols| cols.contains(column.name.as_str()))
            });

            let name = if split {
                format!("{} - Part {}", domain, idx + 1)
            } else {
                domain.to_string()
            };

            chunks.push(DiagramChunk {
                name,
                tables: chunk.iter().map(|t| t.name.clone()).collect(),
                diagram,
            });
        }
    }

    Ok(chunks)
}

/// Columns named on either side of the given relationships, per table.
fn key_columns<'a>(relationships: &[&'a Relationship]) -> HashMap<&'a str, HashSet<&'a str>> {
    let mut important: HashMap<&str, HashSet<&str>> = HashMap::new();
    for rel in relationships {
        if let Some(col) = rel.source_column.as_deref() {
            important.entry(rel.source_table.as_str()).or_default().insert(col);
        }
        if let Some(col) = rel.target_column.as_deref() {
            important.entry(rel.target_table.as_str()).or_default().insert(col);
        }
    }
    important
}

fn render<F>(tables: &[&Table], relationships: &[&Relationship], include_column: F) -> String
where
    F: Fn(&Table, &Column) -> bool,
{
    let mut out = String::new();
    out.push_str("erDiagram\n");
    out.push_str("    direction TB\n\n");

    for &table in tables {
        let _ = writeln!(out, "    {} {{", entity_name(&table.name));
        for column in table.columns.iter().filter(|c| include_column(table, *c)) {
            let _ = write!(out, "        {} {}", attribute_type(column), column.name);
            if table.is_primary_key(column) {
                out.push_str(" PK");
            } else if column.foreign_key {
                out.push_str(" FK");
            }
            out.push('\n');
        }
        out.push_str("    }\n\n");
    }

    for rel in relationships {
        let label = rel
            .source_column
            .as_deref()
            .unwrap_or_else(|| rel.relationship_type.as_str());
        let _ = writeln!(
            out,
            "    {} ||--o{{ {} : \"{}\"",
            entity_name(&rel.source_table),
            entity_name(&rel.target_table),
            relationship_label(label)
        );
    }

    out
}

fn entity_name(table: &str) -> String {
    table.to_uppercase()
}

/// Quoted labels may hold spaces and punctuation but not a double quote or a line break.
fn relationship_label(label: &str) -> String {
    label
        .chars()
        .map(|c| match c {
            '"' => '\'',
            '\n' | '\r' => ' ',
            c => c,
        })
        .collect()
}

/// Mermaid attribute types are single tokens; fall back to `string`.
fn attribute_type(column: &Column) -> String {
    match column.data_type.as_deref() {
        Some(t) if !t.trim().is_empty() => t
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect(),
        _ => "string".to_string(),
    }
}
