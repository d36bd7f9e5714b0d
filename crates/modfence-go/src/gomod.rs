//! Module path discovery from `go.mod`.

use std::path::{Path, PathBuf};

/// Reads the module path from `root/go.mod`.
///
/// Parsing is lenient: only the `module` directive is interpreted, line
/// comments are stripped, and an optionally quoted path is accepted.
///
/// # Errors
///
/// Returns error if `go.mod` cannot be read or has no `module` directive.
pub fn module_path(root: &Path) -> Result<String, GoModError> {
    let path = root.join("go.mod");
    let content = std::fs::read_to_string(&path).map_err(|e| GoModError::Io {
        path: path.clone(),
        source: e,
    })?;
    parse_module_directive(&content).ok_or(GoModError::MissingModule { path })
}

/// Finds the first `module` directive in a `go.mod` document.
fn parse_module_directive(content: &str) -> Option<String> {
    for line in content.lines() {
        let line = line.split_once("//").map_or(line, |(before, _)| before);
        let Some(rest) = line.trim().strip_prefix("module") else {
            continue;
        };
        if !rest.starts_with(char::is_whitespace) {
            continue;
        }
        let name = rest.trim().trim_matches('"');
        if !name.is_empty() {
            return Some(name.to_string());
        }
    }
    None
}

/// Errors in `go.mod` discovery.
#[derive(Debug, thiserror::Error)]
pub enum GoModError {
    /// Failed to read the file.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// IO error.
        source: std::io::Error,
    },

    /// The file has no `module` directive.
    #[error("no module directive in {path}")]
    MissingModule {
        /// The file that was read.
        path: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn parses_module_directive() {
        let content = "module github.com/acme/shop\n\ngo 1.22\n";
        assert_eq!(
            parse_module_directive(content).as_deref(),
            Some("github.com/acme/shop")
        );
    }

    #[test]
    fn parses_quoted_module_path() {
        assert_eq!(
            parse_module_directive("module \"github.com/acme/shop\"\n").as_deref(),
            Some("github.com/acme/shop")
        );
    }

    #[test]
    fn strips_line_comments() {
        assert_eq!(
            parse_module_directive("// the module\nmodule github.com/acme/shop // main\n")
                .as_deref(),
            Some("github.com/acme/shop")
        );
    }

    #[test]
    fn ignores_prefixed_identifiers() {
        assert!(parse_module_directive("modulex github.com/acme/shop\n").is_none());
    }

    #[test]
    fn missing_directive_is_none() {
        assert!(parse_module_directive("go 1.22\n").is_none());
    }

    #[test]
    fn reads_from_directory() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("go.mod"), "module example.com/app\n").unwrap();
        assert_eq!(module_path(tmp.path()).unwrap(), "example.com/app");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            module_path(tmp.path()),
            Err(GoModError::Io { .. })
        ));
    }

    #[test]
    fn missing_directive_is_an_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("go.mod"), "go 1.22\n").unwrap();
        assert!(matches!(
            module_path(tmp.path()),
            Err(GoModError::MissingModule { .. })
        ));
    }
}
