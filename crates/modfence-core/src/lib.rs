//! # modfence-core
//!
//! Rule engine for enforcing a declared architecture on a Go module's
//! internal imports. Packages are partitioned into named groups by glob
//! path patterns; each group carries deny/allow rules over what its
//! members may import.
//!
//! The pieces, leaves first:
//!
//! - [`PathPattern`] — compiled glob over slash-separated package paths
//! - [`ImportRule`] — the four permission predicates (pattern, relative,
//!   group reference, sub-packages)
//! - [`Group`] / [`DependencyChecker`] — a policy unit and its rule lists
//!   bound to one importing package
//! - [`GroupRegistry`] — all groups, built in two phases so groups can
//!   reference each other by name in any order
//! - [`check`] — the pass producing the [`Violation`] list
//!
//! ## Example
//!
//! ```
//! use modfence_core::{check, Config, GroupRegistry, PackageImports};
//!
//! let config = Config::parse(r#"
//! version = 1
//!
//! [groups.domain]
//! paths = "internal/domain/**"
//!
//! [groups.domain.dependencies.deny]
//! patterns = ["internal/repository/**"]
//! "#).unwrap();
//! config.validate().unwrap();
//!
//! let registry = GroupRegistry::from_config(&config).unwrap();
//! let mut imports = PackageImports::new();
//! imports.insert(
//!     "internal/domain/user".to_string(),
//!     ["github.com/acme/shop/internal/repository/db".to_string()].into(),
//! );
//!
//! let result = check("github.com/acme/shop", &imports, &registry);
//! assert_eq!(result.violations.len(), 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod checker;
pub mod config;
pub mod group;
pub mod pattern;
pub mod registry;
pub mod rule;

pub use checker::{check, CheckResult, PackageImports, Violation};
pub use config::{Config, ConfigError};
pub use group::{DependencyChecker, Group, GroupMembership};
pub use pattern::{PathPattern, PatternError};
pub use registry::{GroupRegistry, RegistryError};
pub use rule::ImportRule;
