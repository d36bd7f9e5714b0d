//! Group registry with two-phase construction.
//!
//! Groups reference each other by name — forward, backward, and
//! self-references are all legal. The registry breaks the cycle
//! structurally: phase one indexes every group's membership record
//! (name + compiled patterns) under its name, phase two compiles rule
//! lists, resolving group references through that index. A reference
//! only ever needs the target's membership test, never its rules.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::{Config, GroupConfig, RuleConfig};
use crate::group::{Group, GroupMembership};
use crate::pattern::{PathPattern, PatternError};
use crate::rule::ImportRule;

/// Owns all groups and answers membership queries.
///
/// Read-only after construction.
#[derive(Debug)]
pub struct GroupRegistry {
    groups: BTreeMap<String, Group>,
}

impl GroupRegistry {
    /// Builds the registry from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns error if a path pattern fails to compile or a rule
    /// references an undeclared group. No partial registry is returned.
    pub fn from_config(config: &Config) -> Result<Self, RegistryError> {
        // Phase 1: membership records for every declared name, so rule
        // resolution in phase 2 is independent of declaration order.
        let mut memberships: BTreeMap<String, Arc<GroupMembership>> = BTreeMap::new();
        for (name, group_config) in &config.groups {
            let patterns = compile_patterns(name, group_config)?;
            memberships.insert(
                name.clone(),
                Arc::new(GroupMembership::new(name.clone(), patterns)),
            );
        }

        // Phase 2: rule lists, looked up through the phase-1 index.
        let mut groups = BTreeMap::new();
        for (name, group_config) in &config.groups {
            let (deny_rules, allow_rules) = match &group_config.dependencies {
                Some(deps) => (
                    build_rules(name, deps.deny.as_ref(), &memberships)?,
                    build_rules(name, deps.allow.as_ref(), &memberships)?,
                ),
                None => (Vec::new(), Vec::new()),
            };

            let membership = Arc::clone(&memberships[name]);
            groups.insert(name.clone(), Group::new(membership, deny_rules, allow_rules));
        }

        tracing::debug!(groups = groups.len(), "group registry built");
        Ok(Self { groups })
    }

    /// Fetches a group by name.
    #[must_use]
    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.get(name)
    }

    /// Returns every group whose path patterns match `path`, in name
    /// order. May be empty; groups are overlapping policies, not a
    /// partition.
    #[must_use]
    pub fn groups_containing(&self, path: &str) -> Vec<&Group> {
        self.groups
            .values()
            .filter(|g| g.matches_path(path))
            .collect()
    }

    /// Returns the number of declared groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns `true` if no groups are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

fn compile_patterns(
    name: &str,
    group_config: &GroupConfig,
) -> Result<Vec<PathPattern>, RegistryError> {
    group_config
        .paths
        .patterns()
        .map(|p| {
            PathPattern::new(p).map_err(|source| RegistryError::InvalidPattern {
                group: name.to_string(),
                source,
            })
        })
        .collect()
}

/// Compiles one rule spec into import rules.
///
/// Rule order follows the config fields: patterns, relative, groups,
/// subPackages. The lists are OR-ed at evaluation time, so order does
/// not affect the policy.
fn build_rules(
    group: &str,
    spec: Option<&RuleConfig>,
    memberships: &BTreeMap<String, Arc<GroupMembership>>,
) -> Result<Vec<ImportRule>, RegistryError> {
    let Some(spec) = spec else {
        return Ok(Vec::new());
    };

    let mut rules = Vec::new();

    for pattern in &spec.patterns {
        let compiled = PathPattern::new(pattern).map_err(|source| RegistryError::InvalidPattern {
            group: group.to_string(),
            source,
        })?;
        rules.push(ImportRule::Pattern(compiled));
    }

    for relative in &spec.relative {
        rules.push(ImportRule::Relative(relative.clone()));
    }

    for reference in &spec.groups {
        let membership =
            memberships
                .get(reference)
                .ok_or_else(|| RegistryError::UnknownGroup {
                    group: group.to_string(),
                    reference: reference.clone(),
                })?;
        rules.push(ImportRule::Group(Arc::clone(membership)));
    }

    if spec.sub_packages {
        rules.push(ImportRule::SubPackages);
    }

    Ok(rules)
}

/// Errors in registry construction.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// A group's path or rule pattern failed to compile.
    #[error("failed to build group {group}: {source}")]
    InvalidPattern {
        /// The group being built.
        group: String,
        /// The pattern error.
        #[source]
        source: PatternError,
    },

    /// A rule references a group that was never declared.
    #[error("failed to build group {group}: group {reference} not found")]
    UnknownGroup {
        /// The group being built.
        group: String,
        /// The undeclared name it referenced.
        reference: String,
    },
}
