//! Go import extraction using Tree-sitter.

use tree_sitter::{Language, Node, Parser};

/// Extracts import paths from Go source files.
pub struct GoExtractor {
    language: Language,
}

impl GoExtractor {
    /// Creates a new Go extractor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_go::LANGUAGE.into(),
        }
    }

    /// Returns every import path in the source, in declaration order.
    ///
    /// Handles single and factored (`import ( ... )`) declarations, and
    /// named, dot, and blank import specs.
    ///
    /// # Errors
    ///
    /// Returns error if the source cannot be parsed or contains syntax
    /// errors; callers degrade this to a per-file warning.
    pub fn imports(&self, source: &str) -> Result<Vec<String>, ExtractError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .expect("failed to set go language");

        let src = source.as_bytes();
        let tree = parser.parse(src, None).ok_or(ExtractError::Parse)?;
        let root = tree.root_node();
        if root.has_error() {
            return Err(ExtractError::Syntax);
        }

        let mut imports = Vec::new();
        let mut cursor = root.walk();
        for node in root.children(&mut cursor) {
            if node.kind() == "import_declaration" {
                Self::collect_specs(&node, src, &mut imports);
            }
        }

        Ok(imports)
    }

    /// Walks an `import_declaration`, covering both the single-spec and
    /// the parenthesized-list forms.
    fn collect_specs(node: &Node<'_>, src: &[u8], out: &mut Vec<String>) {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "import_spec" => {
                    if let Some(path) = Self::spec_path(&child, src) {
                        out.push(path);
                    }
                }
                "import_spec_list" => {
                    let mut list_cursor = child.walk();
                    for spec in child.children(&mut list_cursor) {
                        if spec.kind() == "import_spec" {
                            if let Some(path) = Self::spec_path(&spec, src) {
                                out.push(path);
                            }
                        }
                    }
                }
                _ => {}
            }
        }
    }

    /// Reads the path literal out of an `import_spec`, stripping the
    /// interpreted (`"..."`) or raw (`` `...` ``) quotes.
    fn spec_path(node: &Node<'_>, src: &[u8]) -> Option<String> {
        let path_node = node.child_by_field_name("path").or_else(|| {
            let mut cursor = node.walk();
            let found = node.children(&mut cursor).find(|c| {
                matches!(
                    c.kind(),
                    "interpreted_string_literal" | "raw_string_literal"
                )
            });
            found
        })?;

        let text = Self::text(&path_node, src);
        let path = text.trim_matches(|c| c == '"' || c == '`');
        if path.is_empty() {
            None
        } else {
            Some(path.to_string())
        }
    }

    fn text<'a>(node: &Node<'_>, src: &'a [u8]) -> &'a str {
        std::str::from_utf8(&src[node.start_byte()..node.end_byte()]).unwrap_or("")
    }
}

impl Default for GoExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors in Go source extraction.
#[derive(Debug, Clone, Copy, thiserror::Error)]
pub enum ExtractError {
    /// The parser produced no tree.
    #[error("parser produced no syntax tree")]
    Parse,

    /// The source contains syntax errors.
    #[error("source contains syntax errors")]
    Syntax,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn imports(src: &str) -> Vec<String> {
        GoExtractor::new().imports(src).expect("extraction failed")
    }

    #[test]
    fn single_import() {
        let src = "package main\n\nimport \"fmt\"\n";
        assert_eq!(imports(src), vec!["fmt"]);
    }

    #[test]
    fn factored_import_block() {
        let src = r#"package main

import (
	"context"
	"fmt"

	"github.com/acme/shop/internal/domain/model"
)
"#;
        assert_eq!(
            imports(src),
            vec!["context", "fmt", "github.com/acme/shop/internal/domain/model"]
        );
    }

    #[test]
    fn named_dot_and_blank_specs() {
        let src = r#"package main

import (
	f "fmt"
	. "math"
	_ "embed"
)
"#;
        assert_eq!(imports(src), vec!["fmt", "math", "embed"]);
    }

    #[test]
    fn raw_string_path() {
        let src = "package main\n\nimport `os`\n";
        assert_eq!(imports(src), vec!["os"]);
    }

    #[test]
    fn multiple_declarations() {
        let src = "package main\n\nimport \"fmt\"\nimport \"os\"\n";
        assert_eq!(imports(src), vec!["fmt", "os"]);
    }

    #[test]
    fn no_imports() {
        let src = "package main\n\nfunc main() {}\n";
        assert!(imports(src).is_empty());
    }

    #[test]
    fn empty_source_has_no_imports() {
        assert!(imports("").is_empty());
    }

    #[test]
    fn syntax_errors_are_reported() {
        let src = "package main\n\nimport (\n\t\"fmt\"\n";
        assert!(matches!(
            GoExtractor::new().imports(src),
            Err(ExtractError::Syntax)
        ));
    }
}
