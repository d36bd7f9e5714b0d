//! # modfence-go
//!
//! Source collection for modfence: turns a Go module on disk into the
//! package→imports map the rule engine consumes.
//!
//! - [`GoExtractor`] — Tree-sitter based import extraction from Go source
//! - [`module_path`] — module identity from `go.mod`
//! - [`collect`] — repository traversal producing a [`Collection`]
//!
//! Collection is lossy by design: individual files that cannot be read
//! or parsed are reported as warnings and skipped, so one broken file
//! never hides the rest of the codebase from the checker.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod collector;
pub mod extractor;
pub mod gomod;

pub use collector::{collect, Collection};
pub use extractor::{ExtractError, GoExtractor};
pub use gomod::{module_path, GoModError};
