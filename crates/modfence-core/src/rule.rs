//! Import permission rules.
//!
//! Each rule is a pure predicate over `(from_package, to_import)`. The
//! variant set is closed: the configuration schema fixes the vocabulary,
//! and exhaustive matching keeps the permission algorithm honest.

use std::sync::Arc;

use crate::group::GroupMembership;
use crate::pattern::PathPattern;

/// A single import permission predicate.
///
/// Rules carry no mutable state after construction. The same rule list is
/// evaluated against many importing packages; only [`ImportRule::Relative`]
/// reads the importer's identity.
#[derive(Debug, Clone)]
pub enum ImportRule {
    /// Import path matches a glob pattern. Importer is ignored.
    Pattern(PathPattern),

    /// Import path is exactly the importer's path joined with a fixed
    /// relative suffix. Each importing package gets its own permitted
    /// target.
    Relative(String),

    /// Import path falls inside another group's path patterns. Holds only
    /// the target group's membership record, never its rule lists.
    Group(Arc<GroupMembership>),

    /// Import path is a strict descendant of the importing package.
    SubPackages,
}

impl ImportRule {
    /// Whether this rule permits `to_import` from `from_package`.
    #[must_use]
    pub fn allows(&self, from_package: &str, to_import: &str) -> bool {
        match self {
            Self::Pattern(pattern) => pattern.matches(to_import),
            Self::Relative(suffix) => clean_join(from_package, suffix) == to_import,
            Self::Group(membership) => membership.matches_path(to_import),
            Self::SubPackages => to_import
                .strip_prefix(from_package)
                .is_some_and(|rest| rest.starts_with('/')),
        }
    }
}

/// Joins a base path with a relative suffix and lexically cleans the
/// result, resolving `.` and `..` segments.
///
/// Mirrors Go's `path.Join` for the slash-separated, already-relative
/// paths this crate deals in: `clean_join("internal/a", "../b")` is
/// `"internal/b"`.
fn clean_join(base: &str, suffix: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in base.split('/').chain(suffix.split('/')) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_rule_ignores_importer() {
        let rule = ImportRule::Pattern(PathPattern::new("internal/shared/**").unwrap());
        assert!(rule.allows("internal/domain/user", "internal/shared/errs"));
        assert!(rule.allows("anything/else", "internal/shared/errs"));
        assert!(!rule.allows("internal/domain/user", "internal/repository/db"));
    }

    #[test]
    fn relative_rule_binds_to_importer() {
        let rule = ImportRule::Relative("model".to_string());
        assert!(rule.allows("internal/domain", "internal/domain/model"));
        assert!(rule.allows("internal/service", "internal/service/model"));
        assert!(!rule.allows("internal/domain", "internal/service/model"));
    }

    #[test]
    fn relative_rule_resolves_parent_segments() {
        let rule = ImportRule::Relative("../shared".to_string());
        assert!(rule.allows("internal/domain", "internal/shared"));
        assert!(!rule.allows("internal/domain", "internal/domain/shared"));
    }

    #[test]
    fn group_rule_uses_membership_only() {
        let membership = Arc::new(GroupMembership::new(
            "domain",
            vec![PathPattern::new("internal/domain/**").unwrap()],
        ));
        let rule = ImportRule::Group(membership);
        assert!(rule.allows("internal/api/handler", "internal/domain/model"));
        assert!(!rule.allows("internal/api/handler", "internal/repository/db"));
    }

    #[test]
    fn sub_packages_rule_permits_strict_descendants() {
        let rule = ImportRule::SubPackages;
        assert!(rule.allows("internal/api", "internal/api/handler"));
        assert!(rule.allows("internal/api", "internal/api/handler/v2"));
        assert!(!rule.allows("internal/api", "internal/api"));
        assert!(!rule.allows("internal/api", "internal/apiserver"));
        assert!(!rule.allows("internal/api", "internal/domain/model"));
    }

    #[test]
    fn clean_join_basic() {
        assert_eq!(clean_join("internal/domain", "model"), "internal/domain/model");
        assert_eq!(clean_join("internal/domain", "./model"), "internal/domain/model");
    }

    #[test]
    fn clean_join_parent() {
        assert_eq!(clean_join("internal/a", "../b"), "internal/b");
        assert_eq!(clean_join("a", "../../b"), "b");
    }
}
