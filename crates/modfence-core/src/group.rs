//! Groups: named policy units combining membership patterns with
//! deny/allow import rules.

use std::sync::Arc;

use crate::pattern::PathPattern;
use crate::rule::ImportRule;

/// The membership half of a group: its stable name and compiled path
/// patterns.
///
/// Built in the registry's first phase, before any rule list exists.
/// Group-reference rules hold an `Arc` to this record, so a group may
/// reference any declared group — later ones, earlier ones, or itself —
/// without ever needing the target's rules.
#[derive(Debug)]
pub struct GroupMembership {
    name: String,
    patterns: Vec<PathPattern>,
}

impl GroupMembership {
    /// Creates a membership record.
    #[must_use]
    pub fn new(name: impl Into<String>, patterns: Vec<PathPattern>) -> Self {
        Self {
            name: name.into(),
            patterns,
        }
    }

    /// Returns the group name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tests whether a package path belongs to this group (OR across
    /// patterns).
    #[must_use]
    pub fn matches_path(&self, path: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(path))
    }
}

/// A fully built group: membership plus ordered deny and allow rule lists.
///
/// Immutable once the registry finishes construction.
#[derive(Debug)]
pub struct Group {
    membership: Arc<GroupMembership>,
    deny_rules: Vec<ImportRule>,
    allow_rules: Vec<ImportRule>,
}

impl Group {
    /// Assembles a group from its membership record and rule lists.
    #[must_use]
    pub fn new(
        membership: Arc<GroupMembership>,
        deny_rules: Vec<ImportRule>,
        allow_rules: Vec<ImportRule>,
    ) -> Self {
        Self {
            membership,
            deny_rules,
            allow_rules,
        }
    }

    /// Returns the group name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.membership.name()
    }

    /// Tests whether a package path belongs to this group.
    #[must_use]
    pub fn matches_path(&self, path: &str) -> bool {
        self.membership.matches_path(path)
    }

    /// Binds this group's rule lists to one importing package.
    ///
    /// Binding per package is what lets [`ImportRule::Relative`] permit a
    /// different target for every importer sharing the rule.
    #[must_use]
    pub fn dependency_checker<'a>(&'a self, package: &'a str) -> DependencyChecker<'a> {
        DependencyChecker {
            package,
            deny_rules: &self.deny_rules,
            allow_rules: &self.allow_rules,
        }
    }
}

/// A group's rule lists bound to a specific importing package.
#[derive(Debug, Clone, Copy)]
pub struct DependencyChecker<'a> {
    package: &'a str,
    deny_rules: &'a [ImportRule],
    allow_rules: &'a [ImportRule],
}

impl DependencyChecker<'_> {
    /// Whether the bound package may import `import_path`.
    ///
    /// A group with no rules at all is unrestricted. A matching deny rule
    /// forbids the import unconditionally, even when an allow rule also
    /// matches. When allow rules exist, an import no rule matched is
    /// forbidden; with only deny rules, it is permitted.
    #[must_use]
    pub fn can_depend_on(&self, import_path: &str) -> bool {
        if self.deny_rules.is_empty() && self.allow_rules.is_empty() {
            return true;
        }

        if self
            .deny_rules
            .iter()
            .any(|rule| rule.allows(self.package, import_path))
        {
            return false;
        }

        if self
            .allow_rules
            .iter()
            .any(|rule| rule.allows(self.package, import_path))
        {
            return true;
        }

        self.allow_rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn membership(name: &str, patterns: &[&str]) -> Arc<GroupMembership> {
        Arc::new(GroupMembership::new(
            name,
            patterns
                .iter()
                .map(|p| PathPattern::new(p).unwrap())
                .collect(),
        ))
    }

    fn pattern_rule(pattern: &str) -> ImportRule {
        ImportRule::Pattern(PathPattern::new(pattern).unwrap())
    }

    #[test]
    fn membership_ors_across_patterns() {
        let m = membership("domain", &["internal/domain/**", "pkg/model/**"]);
        assert!(m.matches_path("internal/domain/user"));
        assert!(m.matches_path("pkg/model/order"));
        assert!(!m.matches_path("internal/api/handler"));
    }

    #[test]
    fn unrestricted_group_permits_everything() {
        let group = Group::new(membership("domain", &["internal/domain/**"]), vec![], vec![]);
        let checker = group.dependency_checker("internal/domain/user");
        assert!(checker.can_depend_on("internal/repository/db"));
        assert!(checker.can_depend_on("whatever"));
    }

    #[test]
    fn deny_wins_over_matching_allow() {
        let group = Group::new(
            membership("api", &["internal/api/**"]),
            vec![pattern_rule("internal/repository/**")],
            vec![pattern_rule("internal/**")],
        );
        let checker = group.dependency_checker("internal/api/handler");
        assert!(!checker.can_depend_on("internal/repository/db"));
        assert!(checker.can_depend_on("internal/domain/model"));
    }

    #[test]
    fn allow_list_defaults_to_deny() {
        let group = Group::new(
            membership("domain", &["internal/domain/**"]),
            vec![],
            vec![pattern_rule("internal/shared/**")],
        );
        let checker = group.dependency_checker("internal/domain/user");
        assert!(checker.can_depend_on("internal/shared/errs"));
        assert!(!checker.can_depend_on("internal/other/pkg"));
    }

    #[test]
    fn deny_list_defaults_to_allow() {
        let group = Group::new(
            membership("domain", &["internal/domain/**"]),
            vec![pattern_rule("internal/repository/**")],
            vec![],
        );
        let checker = group.dependency_checker("internal/domain/user");
        assert!(!checker.can_depend_on("internal/repository/db"));
        assert!(checker.can_depend_on("internal/other/pkg"));
    }

    #[test]
    fn relative_rule_evaluated_per_importer() {
        let group = Group::new(
            membership("svc", &["internal/service/**"]),
            vec![],
            vec![ImportRule::Relative("internal".to_string())],
        );
        assert!(group
            .dependency_checker("internal/service/user")
            .can_depend_on("internal/service/user/internal"));
        assert!(!group
            .dependency_checker("internal/service/order")
            .can_depend_on("internal/service/user/internal"));
    }
}
