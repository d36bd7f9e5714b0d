//! Repository traversal: builds the package→imports map for a Go module.
//!
//! A package is a directory; its import set is the union of the imports
//! of its non-test `.go` files. Per-file failures (unreadable, syntax
//! errors) become warnings and that file's contribution is dropped; only
//! a missing or invalid `go.mod` aborts collection.

use std::path::Path;

use ignore::WalkBuilder;
use modfence_core::PackageImports;

use crate::extractor::GoExtractor;
use crate::gomod::{self, GoModError};

/// Everything collection produces for the checker.
#[derive(Debug)]
pub struct Collection {
    /// The module path from `go.mod`.
    pub module_path: String,
    /// Per-package import sets, keyed by directory relative to the root.
    pub package_imports: PackageImports,
    /// Non-fatal problems encountered along the way.
    pub warnings: Vec<String>,
}

/// Walks the module rooted at `root` and gathers imports per package.
///
/// Hidden entries and `vendor/` are skipped, as are `_test.go` files.
/// Files in the module root itself are keyed as `"."`.
///
/// # Errors
///
/// Returns error only when `go.mod` is unreadable or lacks a `module`
/// directive.
pub fn collect(root: &Path) -> Result<Collection, GoModError> {
    let module_path = gomod::module_path(root)?;

    let extractor = GoExtractor::new();
    let mut package_imports = PackageImports::new();
    let mut warnings = Vec::new();

    let mut builder = WalkBuilder::new(root);
    builder
        .git_ignore(true)
        .filter_entry(|entry| entry.file_name() != std::ffi::OsStr::new("vendor"));

    for result in builder.build() {
        let entry = match result {
            Ok(entry) => entry,
            Err(e) => {
                warnings.push(format!("walk error: {e}"));
                continue;
            }
        };

        let path = entry.path();
        if !path.is_file() || !is_go_source(path) {
            continue;
        }

        let source = match std::fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) => {
                warnings.push(format!("failed to read {}: {e}", path.display()));
                continue;
            }
        };

        let imports = match extractor.imports(&source) {
            Ok(imports) => imports,
            Err(e) => {
                warnings.push(format!(
                    "failed to extract imports from {}: {e}",
                    path.display()
                ));
                continue;
            }
        };

        let Some(package) = package_dir(root, path) else {
            warnings.push(format!(
                "failed to get relative path for {}",
                path.display()
            ));
            continue;
        };

        package_imports.entry(package).or_default().extend(imports);
    }

    tracing::debug!(
        packages = package_imports.len(),
        warnings = warnings.len(),
        "source collection finished"
    );

    Ok(Collection {
        module_path,
        package_imports,
        warnings,
    })
}

fn is_go_source(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| name.ends_with(".go") && !name.ends_with("_test.go"))
}

/// The package a file belongs to: its directory, relative to the root.
fn package_dir(root: &Path, file: &Path) -> Option<String> {
    let dir = file.parent()?;
    let rel = dir.strip_prefix(root).ok()?;
    if rel.as_os_str().is_empty() {
        return Some(".".to_string());
    }
    Some(rel.to_string_lossy().replace('\\', "/"))
}
