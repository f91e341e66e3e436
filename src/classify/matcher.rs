//! Auxiliary table naming conventions.

use regex::Regex;

use crate::error::{DomainmapError, Result};

/// Default prefix for generic auxiliary tables (`aux_table_1`, `aux_table_2`, ...).
pub const DEFAULT_AUXILIARY_PREFIX: &str = "aux_table_";

/// Decides whether a table is auxiliary (generic, supporting) rather than a business table.
pub trait AuxiliaryMatcher {
    fn is_auxiliary(&self, table: &str) -> bool;
}

impl<F> AuxiliaryMatcher for F
where
    F: Fn(&str) -> bool,
{
    fn is_auxiliary(&self, table: &str) -> bool {
        self(table)
    }
}

/// Naming convention configured by prefix or regular expression.
#[derive(Debug, Clone)]
pub enum NamingConvention {
    Prefix(String),
    Pattern(Regex),
}

impl NamingConvention {
    pub fn prefix(prefix: impl Into<String>) -> Self {
        NamingConvention::Prefix(prefix.into())
    }

    /// Compile a regex convention. The pattern is matched anywhere in the
    /// name unless anchored.
    pub fn pattern(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| {
            DomainmapError::Config(format!("Invalid auxiliary pattern '{}': {}", pattern, e))
        })?;
        Ok(NamingConvention::Pattern(regex))
    }
}

impl Default for NamingConvention {
    fn default() -> Self {
        NamingConvention::prefix(DEFAULT_AUXILIARY_PREFIX)
    }
}

impl AuxiliaryMatcher for NamingConvention {
    fn is_auxiliary(&self, table: &str) -> bool {
        match self {
            NamingConvention::Prefix(prefix) => table.starts_with(prefix.as_str()),
            NamingConvention::Pattern(regex) => regex.is_match(table),
        }
    }
}
