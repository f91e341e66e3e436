//! Schema model: tables and typed relationships as produced by the schema scanner.
//!
//! Field names follow the scanner's camelCase JSON (`sourceTable`, `relationshipType`, ...).
//! Only table names and STRICT relationships matter for classification; columns,
//! column pairs and confidence are carried for diagram rendering.

mod loader;

pub use loader::SchemaFormat;

use serde::{Deserialize, Serialize};

/// A parsed schema document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub tables: Vec<Table>,
    pub relationships: Vec<Relationship>,
}

/// A table descriptor. Only `name` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<Column>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub primary_keys: Vec<String>,
}

impl Table {
    /// Table with a name and nothing else.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            primary_keys: Vec::new(),
        }
    }

    /// True if the column is flagged as a primary key or listed in `primaryKeys`.
    pub fn is_primary_key(&self, column: &Column) -> bool {
        column.primary_key
            || self
                .primary_keys
                .iter()
                .any(|pk| pk.eq_ignore_ascii_case(&column.name))
    }
}

/// A column descriptor.
///
/// Older scanner output lists columns as bare names, so a plain string is
/// accepted wherever a column object is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ColumnRepr", rename_all = "camelCase")]
pub struct Column {
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    pub primary_key: bool,
    pub foreign_key: bool,
}

impl Column {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: None,
            primary_key: false,
            foreign_key: false,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColumnRepr {
    Name(String),
    #[serde(rename_all = "camelCase")]
    Full {
        name: String,
        #[serde(rename = "type", default)]
        data_type: Option<String>,
        #[serde(default)]
        primary_key: bool,
        #[serde(default)]
        foreign_key: bool,
    },
}

impl From<ColumnRepr> for Column {
    fn from(repr: ColumnRepr) -> Self {
        match repr {
            ColumnRepr::Name(name) => Column::named(name),
            ColumnRepr::Full {
                name,
                data_type,
                primary_key,
                foreign_key,
            } => Column {
                name,
                data_type,
                primary_key,
                foreign_key,
            },
        }
    }
}

/// A declared relationship (source --relationship_type--> target).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub source_table: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_column: Option<String>,
    pub target_table: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_column: Option<String>,
    pub relationship_type: RelationshipType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl Relationship {
    pub fn new(
        source_table: impl Into<String>,
        target_table: impl Into<String>,
        relationship_type: RelationshipType,
    ) -> Self {
        Self {
            source_table: source_table.into(),
            source_column: None,
            target_table: target_table.into(),
            target_column: None,
            relationship_type,
            confidence: None,
        }
    }

    pub fn is_strict(&self) -> bool {
        self.relationship_type == RelationshipType::Strict
    }
}

/// Relationship kind. Anything the scanner emits that is not listed here
/// deserializes to `Other` and is treated as non-strict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationshipType {
    /// Declared foreign key
    Strict,
    /// Value overlap found by sampling rows
    DataSample,
    /// Guessed from naming
    Inferred,
    Loose,
    Other,
}

impl From<String> for RelationshipType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "STRICT" => RelationshipType::Strict,
            "DATA_SAMPLE" => RelationshipType::DataSample,
            "INFERRED" => RelationshipType::Inferred,
            "LOOSE" => RelationshipType::Loose,
            _ => RelationshipType::Other,
        }
    }
}

impl RelationshipType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipType::Strict => "STRICT",
            RelationshipType::DataSample => "DATA_SAMPLE",
            RelationshipType::Inferred => "INFERRED",
            RelationshipType::Loose => "LOOSE",
            RelationshipType::Other => "OTHER",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relationship_type_parses_known_kinds() {
        let kinds: Vec<RelationshipType> =
            serde_json::from_str(r#"["STRICT", "DATA_SAMPLE", "INFERRED", "LOOSE"]"#).unwrap();
        assert_eq!(
            kinds,
            vec![
                RelationshipType::Strict,
                RelationshipType::DataSample,
                RelationshipType::Inferred,
                RelationshipType::Loose,
            ]
        );
    }

    #[test]
    fn test_unknown_relationship_type_is_other() {
        let kind: RelationshipType = serde_json::from_str(r#""SOMETHING_NEW""#).unwrap();
        assert_eq!(kind, RelationshipType::Other);
        // Case matters: only the exact STRICT tag is structural
        let lower: RelationshipType = serde_json::from_str(r#""strict""#).unwrap();
        assert_eq!(lower, RelationshipType::Other);
    }

    #[test]
    fn test_columns_accept_names_or_objects() {
        let table: Table = serde_json::from_str(
            r#"{"name": "orders", "columns": ["id", {"name": "user_id", "type": "INT", "foreignKey": true}]}"#,
        )
        .unwrap();
        assert_eq!(table.columns[0], Column::named("id"));
        assert_eq!(table.columns[1].data_type.as_deref(), Some("INT"));
        assert!(table.columns[1].foreign_key);
        assert!(!table.columns[1].primary_key);
    }

    #[test]
    fn test_primary_key_from_list() {
        let mut table = Table::named("users");
        table.primary_keys.push("ID".to_string());
        assert!(table.is_primary_key(&Column::named("id")));
        assert!(!table.is_primary_key(&Column::named("email")));
    }

    #[test]
    fn test_relationship_camel_case_fields() {
        let rel: Relationship = serde_json::from_str(
            r#"{"sourceTable": "order_items", "sourceColumn": "order_id",
                "targetTable": "orders", "targetColumn": "id",
                "relationshipType": "STRICT", "confidence": 1.0}"#,
        )
        .unwrap();
        assert!(rel.is_strict());
        assert_eq!(rel.source_column.as_deref(), Some("order_id"));
        assert_eq!(rel.confidence, Some(1.0));
    }
}
