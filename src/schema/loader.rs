//! Schema loading (JSON / YAML) and contract checks.

use std::collections::HashSet;
use std::path::Path;

use super::Schema;
use crate::error::{DomainmapError, Result};

/// On-disk format of a schema document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    Json,
    Yaml,
}

impl SchemaFormat {
    /// Pick the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "json" => Ok(SchemaFormat::Json),
            "yaml" | "yml" => Ok(SchemaFormat::Yaml),
            other => Err(DomainmapError::Config(format!(
                "Unsupported schema file extension '{}' for {} (expected json, yaml or yml)",
                other,
                path.display()
            ))),
        }
    }
}

impl Schema {
    /// Parse a schema from JSON text. Missing required fields are fatal.
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| DomainmapError::MalformedSchema(format!("JSON schema: {}", e)))
    }

    /// Parse a schema from YAML text. Missing required fields are fatal.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml_ng::from_str(content)
            .map_err(|e| DomainmapError::MalformedSchema(format!("YAML schema: {}", e)))
    }

    pub fn parse(content: &str, format: SchemaFormat) -> Result<Self> {
        match format {
            SchemaFormat::Json => Self::from_json_str(content),
            SchemaFormat::Yaml => Self::from_yaml_str(content),
        }
    }

    /// Read, parse and validate a schema file.
    pub fn load(path: &Path) -> Result<Self> {
        let format = SchemaFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;

        let schema = Self::parse(&content, format).map_err(|e| match e {
            DomainmapError::MalformedSchema(msg) => {
                DomainmapError::MalformedSchema(format!("{} ({})", msg, path.display()))
            }
            other => other,
        })?;
        schema.validate()?;

        log::debug!(
            "Loaded schema {}: {} tables, {} relationships",
            path.display(),
            schema.tables.len(),
            schema.relationships.len()
        );

        Ok(schema)
    }

    /// Check the table-name contract the classifier relies on:
    /// names are non-empty and unique, and every STRICT endpoint is a declared table.
    /// Non-strict relationships never reach the graph, so strays there are only logged.
    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::with_capacity(self.tables.len());

        for (idx, table) in self.tables.iter().enumerate() {
            if table.name.trim().is_empty() {
                return Err(DomainmapError::MalformedSchema(format!(
                    "table #{} has an empty name",
                    idx
                )));
            }
            if !names.insert(table.name.as_str()) {
                return Err(DomainmapError::MalformedSchema(format!(
                    "duplicate table name '{}'",
                    table.name
                )));
            }
        }

        for rel in &self.relationships {
            for endpoint in [&rel.source_table, &rel.target_table] {
                if names.contains(endpoint.as_str()) {
                    continue;
                }
                if !rel.is_strict() {
                    log::debug!(
                        "Ignoring {} relationship {} -> {}: '{}' is not a declared table",
                        rel.relationship_type.as_str(),
                        rel.source_table,
                        rel.target_table,
                        endpoint
                    );
                    continue;
                }
                return Err(DomainmapError::UnknownTable {
                    table: endpoint.clone(),
                    source_table: rel.source_table.clone(),
                    target_table: rel.target_table.clone(),
                });
            }
        }

        Ok(())
    }

    /// All table names in declaration order.
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }
}
