//! Component labeling and the total-cover guarantee.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use super::matcher::{AuxiliaryMatcher, NamingConvention};
use super::rules::{default_rules, first_match, DomainRule, AUXILIARY_SERVICES, MISCELLANEOUS};
use super::DomainMap;
use crate::config::ClassifierConfig;
use crate::error::{DomainmapError, Result};
use crate::graph::{build_strict_graph, connected_components, AdjacencyGraph};
use crate::schema::Schema;

/// Outcome of one classification run.
#[derive(Debug, Clone)]
pub struct Partition {
    /// Final domain -> tables mapping.
    pub domains: DomainMap,
    /// Strict-graph components in discovery order, each sorted.
    pub components: Vec<Vec<String>>,
    /// Tables that labeling left unassigned and were routed to the fallback domain.
    pub residual: Vec<String>,
}

/// Assigns every table of a schema to exactly one domain.
pub struct DomainClassifier {
    rules: Vec<DomainRule>,
    fallback_domain: String,
    auxiliary_domain: String,
    auxiliary: Box<dyn AuxiliaryMatcher>,
}

impl Default for DomainClassifier {
    fn default() -> Self {
        Self {
            rules: default_rules(),
            fallback_domain: MISCELLANEOUS.to_string(),
            auxiliary_domain: AUXILIARY_SERVICES.to_string(),
            auxiliary: Box::new(NamingConvention::default()),
        }
    }
}

impl DomainClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a classifier from the `[classifier]` config section.
    pub fn from_config(config: &ClassifierConfig) -> Result<Self> {
        let convention = match (&config.auxiliary_prefix, &config.auxiliary_pattern) {
            (Some(_), Some(_)) => {
                return Err(DomainmapError::Config(
                    "Set either classifier.auxiliary_prefix or classifier.auxiliary_pattern, not both"
                        .to_string(),
                ))
            }
            (_, Some(pattern)) => NamingConvention::pattern(pattern)?,
            (Some(prefix), None) if prefix.trim().is_empty() => {
                return Err(DomainmapError::Config(
                    "classifier.auxiliary_prefix must not be empty".to_string(),
                ))
            }
            (Some(prefix), None) => NamingConvention::prefix(prefix.clone()),
            (None, None) => NamingConvention::default(),
        };

        Ok(Self {
            rules: config.rules.clone().unwrap_or_else(default_rules),
            fallback_domain: config.fallback_domain.clone(),
            auxiliary_domain: config.auxiliary_domain.clone(),
            auxiliary: Box::new(convention),
        })
    }

    pub fn with_rules(mut self, rules: Vec<DomainRule>) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_auxiliary_matcher<M>(mut self, matcher: M) -> Self
    where
        M: AuxiliaryMatcher + 'static,
    {
        self.auxiliary = Box::new(matcher);
        self
    }

    pub fn with_fallback_domain(mut self, domain: impl Into<String>) -> Self {
        self.fallback_domain = domain.into();
        self
    }

    pub fn with_auxiliary_domain(mut self, domain: impl Into<String>) -> Self {
        self.auxiliary_domain = domain.into();
        self
    }

    pub fn rules(&self) -> &[DomainRule] {
        &self.rules
    }

    /// Validate the schema, build the strict graph and partition it.
    pub fn classify(&self, schema: &Schema) -> Result<Partition> {
        schema.validate()?;
        let graph = build_strict_graph(&schema.relationships);
        self.partition(&graph, &schema.table_names())
    }

    /// Partition `tables` using an already-built strict graph.
    ///
    /// Every table in the graph must also be in `tables`.
    pub fn partition(&self, graph: &AdjacencyGraph, tables: &[&str]) -> Result<Partition> {
        let all_tables: BTreeSet<&str> = tables.iter().copied().collect();

        if let Some((stray, _)) = graph.iter().find(|(t, _)| !all_tables.contains(t)) {
            return Err(DomainmapError::InvalidInput(format!(
                "table '{}' is in the relationship graph but not in the table list",
                stray
            )));
        }

        let components = connected_components(graph, all_tables.iter().copied());
        log::debug!(
            "Found {} connected components across {} tables",
            components.len(),
            all_tables.len()
        );

        let mut domains: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for component in &components {
            let (domain, members) = self.label_component(component);
            log::debug!("Component of {} table(s) -> {}", members.len(), domain);
            domains
                .entry(domain.to_string())
                .or_default()
                .extend(members.into_iter().cloned());
        }

        let residual = route_residual(&mut domains, &all_tables, &self.fallback_domain);

        Ok(Partition {
            domains: finalize(domains),
            components,
            residual,
        })
    }

    /// Pick the domain for one component and return the tables to place there:
    /// business tables first, then any auxiliary tables tied to them.
    fn label_component<'c>(&self, component: &'c [String]) -> (&str, Vec<&'c String>) {
        let (auxiliary, business): (Vec<&String>, Vec<&String>) = component
            .iter()
            .partition(|t| self.auxiliary.is_auxiliary(t.as_str()));

        if business.is_empty() {
            return (self.auxiliary_domain.as_str(), auxiliary);
        }

        let names: HashSet<&str> = business.iter().map(|t| t.as_str()).collect();
        let domain = first_match(&self.rules, &names).unwrap_or(self.fallback_domain.as_str());

        let mut members = business;
        members.extend(auxiliary);
        (domain, members)
    }
}

/// Append every table of `all_tables` that no domain holds to `fallback_domain`,
/// creating it if absent. Existing fallback entries are kept. Returns the routed tables.
fn route_residual(
    domains: &mut BTreeMap<String, Vec<String>>,
    all_tables: &BTreeSet<&str>,
    fallback_domain: &str,
) -> Vec<String> {
    let assigned: HashSet<&str> = domains.values().flatten().map(String::as_str).collect();
    let residual: Vec<String> = all_tables
        .iter()
        .filter(|t| !assigned.contains(*t))
        .map(|t| t.to_string())
        .collect();

    if !residual.is_empty() {
        log::warn!(
            "{} table(s) not assigned to any domain, routing to {}: {:?}",
            residual.len(),
            fallback_domain,
            residual
        );
        domains
            .entry(fallback_domain.to_string())
            .or_default()
            .extend(residual.iter().cloned());
    }

    residual
}

/// Sort and de-duplicate each domain, then enforce disjointness: a table that
/// ended up in more than one domain stays only in the first by name.
fn finalize(domains: BTreeMap<String, Vec<String>>) -> DomainMap {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = BTreeMap::new();

    for (domain, mut tables) in domains {
        tables.sort();
        tables.dedup();
        tables.retain(|t| {
            if seen.insert(t.clone()) {
                true
            } else {
                log::warn!(
                    "Table {} assigned to more than one domain, dropping it from {}",
                    t,
                    domain
                );
                false
            }
        });
        if !tables.is_empty() {
            out.insert(domain, tables);
        }
    }

    DomainMap::from(out)
}
