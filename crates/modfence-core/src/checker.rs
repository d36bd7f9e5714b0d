//! The check pass: evaluates every internal import against the policies
//! of the groups governing its package.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::registry::GroupRegistry;

/// Mapping from internal package path to the raw import identifiers found
/// in its non-test sources, deduplicated per package.
pub type PackageImports = BTreeMap<String, BTreeSet<String>>;

/// A single denied import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// The importing package, relative to the module root.
    pub package: String,
    /// The imported package, relative to the module root.
    pub import: String,
    /// The group whose policy denied the import.
    pub group: String,
}

/// Outcome of a full check pass.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    /// Every violation found, sorted by package, import, then group.
    pub violations: Vec<Violation>,
    /// Number of packages examined, governed or not.
    pub packages_checked: usize,
}

impl CheckResult {
    /// Returns `true` if any import was denied.
    #[must_use]
    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }
}

/// Checks every package's imports against the registry's group policies.
///
/// Packages no group governs are skipped entirely. Imports that do not
/// start with `root_module` followed by `/` are external and exempt. An
/// import a package's several governing groups each deny produces one
/// violation per denying group.
#[must_use]
pub fn check(
    root_module: &str,
    package_imports: &PackageImports,
    registry: &GroupRegistry,
) -> CheckResult {
    let mut violations = Vec::new();

    for (package, imports) in package_imports {
        let governing = registry.groups_containing(package);
        if governing.is_empty() {
            continue;
        }

        for import in imports {
            let Some(relative) = strip_module_prefix(root_module, import) else {
                continue;
            };

            for group in &governing {
                let checker = group.dependency_checker(package);
                if !checker.can_depend_on(relative) {
                    violations.push(Violation {
                        package: package.clone(),
                        import: relative.to_string(),
                        group: group.name().to_string(),
                    });
                }
            }
        }
    }

    violations.sort_unstable_by(|a, b| {
        (&a.package, &a.import, &a.group).cmp(&(&b.package, &b.import, &b.group))
    });

    CheckResult {
        violations,
        packages_checked: package_imports.len(),
    }
}

/// Strips the module prefix from an import identifier, or returns `None`
/// for external imports.
fn strip_module_prefix<'a>(root_module: &str, import: &'a str) -> Option<&'a str> {
    import
        .strip_prefix(root_module)
        .and_then(|rest| rest.strip_prefix('/'))
}
