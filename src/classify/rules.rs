//! Signature-table rules that name a component's domain.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

pub const ORDER_MANAGEMENT: &str = "Order Management";
pub const CUSTOMER_USER_MANAGEMENT: &str = "Customer & User Management";
pub const PRODUCT_CATALOG: &str = "Product Catalog & Inventory";
pub const AUDIT_OPERATIONS: &str = "Audit & Operations";
pub const MISCELLANEOUS: &str = "Miscellaneous";
pub const AUXILIARY_SERVICES: &str = "Auxiliary Services";

/// A domain is chosen when every `all_of` table and at least one `any_of`
/// table (if any are listed) are among the component's business tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRule {
    pub domain: String,
    #[serde(default)]
    pub all_of: Vec<String>,
    #[serde(default)]
    pub any_of: Vec<String>,
}

impl DomainRule {
    pub fn any_of(domain: &str, tables: &[&str]) -> Self {
        Self {
            domain: domain.to_string(),
            all_of: Vec::new(),
            any_of: tables.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn all_of(domain: &str, tables: &[&str]) -> Self {
        Self {
            domain: domain.to_string(),
            all_of: tables.iter().map(|t| t.to_string()).collect(),
            any_of: Vec::new(),
        }
    }

    pub fn matches(&self, business_tables: &HashSet<&str>) -> bool {
        let all = self
            .all_of
            .iter()
            .all(|t| business_tables.contains(t.as_str()));
        let any = self.any_of.is_empty()
            || self
                .any_of
                .iter()
                .any(|t| business_tables.contains(t.as_str()));
        all && any
    }
}

/// Built-in rules in priority order. The first match wins, so a component holding
/// `orders` together with `users` and `tenants` is Order Management.
pub fn default_rules() -> Vec<DomainRule> {
    vec![
        DomainRule::any_of(ORDER_MANAGEMENT, &["orders"]),
        DomainRule::all_of(CUSTOMER_USER_MANAGEMENT, &["users", "tenants"]),
        DomainRule::any_of(PRODUCT_CATALOG, &["products", "categories"]),
        DomainRule::any_of(AUDIT_OPERATIONS, &["audit_logs"]),
    ]
}

/// Name of the first rule matching `business_tables`, if any.
pub fn first_match<'a>(
    rules: &'a [DomainRule],
    business_tables: &HashSet<&str>,
) -> Option<&'a str> {
    rules
        .iter()
        .find(|rule| rule.matches(business_tables))
        .map(|rule| rule.domain.as_str())
}
