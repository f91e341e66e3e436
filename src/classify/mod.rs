//! Domain classification: label strict-graph components with business domains.
//!
//! Components are named by signature-table rules evaluated in priority order.
//! Components made only of auxiliary tables go to "Auxiliary Services", and any
//! table the labeling missed is routed to "Miscellaneous" so the output always
//! covers the schema exactly once.

mod matcher;
mod partition;
mod rules;

pub use matcher::{AuxiliaryMatcher, NamingConvention, DEFAULT_AUXILIARY_PREFIX};
pub use partition::{DomainClassifier, Partition};
pub use rules::{
    default_rules, first_match, DomainRule, AUDIT_OPERATIONS, AUXILIARY_SERVICES,
    CUSTOMER_USER_MANAGEMENT, MISCELLANEOUS, ORDER_MANAGEMENT, PRODUCT_CATALOG,
};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Domain name -> sorted, duplicate-free table names. Keys iterate in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DomainMap(BTreeMap<String, Vec<String>>);

impl DomainMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, domain: &str) -> Option<&[String]> {
        self.0.get(domain).map(Vec::as_slice)
    }

    /// Domain holding `table`, if any.
    pub fn domain_of(&self, table: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(_, tables)| tables.iter().any(|t| t == table))
            .map(|(domain, _)| domain.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn domain_names(&self) -> Vec<&str> {
        self.0.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of table assignments across all domains.
    pub fn table_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }

    /// Two-space indented JSON with domain names in ascending order.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

impl From<BTreeMap<String, Vec<String>>> for DomainMap {
    fn from(map: BTreeMap<String, Vec<String>>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DomainMap {
        let mut map = BTreeMap::new();
        map.insert(
            ORDER_MANAGEMENT.to_string(),
            vec!["order_items".to_string(), "orders".to_string()],
        );
        map.insert(AUXILIARY_SERVICES.to_string(), vec!["aux_table_1".to_string()]);
        DomainMap::from(map)
    }

    #[test]
    fn test_json_keys_sorted() {
        let json = sample().to_json_pretty().unwrap();
        let aux = json.find(AUXILIARY_SERVICES).unwrap();
        let orders = json.find(ORDER_MANAGEMENT).unwrap();
        assert!(aux < orders);
        assert!(json.contains("\n  \"Auxiliary Services\": [\n    \"aux_table_1\"\n  ]"));
    }

    #[test]
    fn test_domain_of() {
        let map = sample();
        assert_eq!(map.domain_of("orders"), Some(ORDER_MANAGEMENT));
        assert_eq!(map.domain_of("aux_table_1"), Some(AUXILIARY_SERVICES));
        assert_eq!(map.domain_of("ghost"), None);
        assert_eq!(map.table_count(), 3);
    }

    #[test]
    fn test_parse_domains_file() {
        let map = DomainMap::from_json_str(r#"{"Miscellaneous": ["orphan_table"]}"#).unwrap();
        assert_eq!(map.get(MISCELLANEOUS), Some(&["orphan_table".to_string()][..]));
    }
}
