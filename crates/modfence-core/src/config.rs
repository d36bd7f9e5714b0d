//! TOML configuration for group and dependency declarations.
//!
//! The document is a version integer plus a `[groups.<name>]` table per
//! group. `paths` accepts a single pattern string, a list of patterns, or
//! detailed entries with reserved `include`/`exclude`/`recursive` options.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Top-level modfence configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Config schema version. Must be at least 1.
    #[serde(default)]
    pub version: u32,

    /// Group declarations, keyed by group name.
    #[serde(default)]
    pub groups: BTreeMap<String, GroupConfig>,
}

/// A single group declaration.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupConfig {
    /// Path patterns defining group membership.
    pub paths: PathConfigs,

    /// Optional deny/allow dependency rules.
    #[serde(default)]
    pub dependencies: Option<DependenciesConfig>,
}

/// The `paths` field of a group, normalized to a list.
#[derive(Debug, Clone, Default)]
pub struct PathConfigs(Vec<PathConfig>);

impl PathConfigs {
    /// Returns the path entries.
    #[must_use]
    pub fn entries(&self) -> &[PathConfig] {
        &self.0
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no entries were declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the bare pattern strings.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|pc| pc.dir.as_str())
    }
}

impl<'de> Deserialize<'de> for PathConfigs {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        /// Accepts `paths = "p"`, `paths = ["p", ...]`, or a detailed entry.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            One(RawEntry),
            Many(Vec<RawEntry>),
        }

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawEntry {
            Pattern(String),
            Detailed(PathConfig),
        }

        impl From<RawEntry> for PathConfig {
            fn from(raw: RawEntry) -> Self {
                match raw {
                    RawEntry::Pattern(dir) => Self {
                        dir,
                        include: Vec::new(),
                        exclude: Vec::new(),
                        recursive: false,
                    },
                    RawEntry::Detailed(pc) => pc,
                }
            }
        }

        let raw = Raw::deserialize(deserializer)?;
        let entries = match raw {
            Raw::One(entry) => vec![entry.into()],
            Raw::Many(entries) => entries.into_iter().map(Into::into).collect(),
        };
        Ok(Self(entries))
    }
}

/// A single path entry.
///
/// `include`, `exclude`, and `recursive` are parsed for forward
/// compatibility but do not refine matching yet; only `dir` feeds the
/// membership matcher.
#[derive(Debug, Clone, Deserialize)]
pub struct PathConfig {
    /// The glob pattern.
    pub dir: String,

    /// Reserved: sub-patterns to include.
    #[serde(default)]
    pub include: Vec<String>,

    /// Reserved: sub-patterns to exclude.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Reserved: whether matching descends recursively.
    #[serde(default)]
    pub recursive: bool,
}

/// Deny/allow rule specifications for a group.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DependenciesConfig {
    /// Imports permitted for members of the group.
    #[serde(default)]
    pub allow: Option<RuleConfig>,

    /// Imports forbidden for members of the group.
    #[serde(default)]
    pub deny: Option<RuleConfig>,
}

/// One deny or allow rule specification.
///
/// Every present field contributes rules of the corresponding variant;
/// all contributed rules in a list are OR-ed together.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuleConfig {
    /// Glob patterns over import paths.
    #[serde(default)]
    pub patterns: Vec<String>,

    /// Paths relative to each importing package.
    #[serde(default)]
    pub relative: Vec<String>,

    /// Names of groups whose members may be imported.
    #[serde(default)]
    pub groups: Vec<String>,

    /// Whether a package may import its own sub-packages.
    #[serde(default, rename = "subPackages")]
    pub sub_packages: bool,
}

/// Errors when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read config file.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// IO error.
        source: std::io::Error,
    },
    /// Failed to parse TOML.
    #[error("invalid config: {message}")]
    Parse {
        /// Parse error detail.
        message: String,
    },
    /// Config is structurally invalid.
    #[error("config validation: {0}")]
    Validation(String),
}

impl Config {
    /// Load from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parse from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Validate config consistency.
    ///
    /// Group cross-references are checked later, during registry
    /// construction; this pass covers the document itself.
    ///
    /// # Errors
    ///
    /// Returns error describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version < 1 {
            return Err(ConfigError::Validation(format!(
                "invalid version: {}",
                self.version
            )));
        }

        for (name, group) in &self.groups {
            if group.paths.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "group {name} has no paths configured"
                )));
            }
            for (i, pc) in group.paths.entries().iter().enumerate() {
                if pc.dir.is_empty() {
                    return Err(ConfigError::Validation(format!(
                        "group {name} paths[{i}] has empty pattern"
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let toml = r#"
version = 1

[groups.domain]
paths = "internal/domain/**"
"#;
        let config = Config::parse(toml).expect("parse failed");
        assert_eq!(config.version, 1);
        assert_eq!(config.groups.len(), 1);
        let patterns: Vec<&str> = config.groups["domain"].paths.patterns().collect();
        assert_eq!(patterns, vec!["internal/domain/**"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_path_list_sugar() {
        let toml = r#"
version = 1

[groups.domain]
paths = ["internal/domain/**", "pkg/model/**"]
"#;
        let config = Config::parse(toml).expect("parse failed");
        assert_eq!(config.groups["domain"].paths.len(), 2);
    }

    #[test]
    fn parse_detailed_path_entry() {
        let toml = r#"
version = 1

[groups.domain]
paths = [{ dir = "internal/domain/**", exclude = ["internal/domain/gen/**"], recursive = true }]
"#;
        let config = Config::parse(toml).expect("parse failed");
        let entry = &config.groups["domain"].paths.entries()[0];
        assert_eq!(entry.dir, "internal/domain/**");
        assert_eq!(entry.exclude, vec!["internal/domain/gen/**"]);
        assert!(entry.recursive);
    }

    #[test]
    fn parse_dependencies() {
        let toml = r#"
version = 1

[groups.domain]
paths = "internal/domain/**"

[groups.service]
paths = "internal/service/**"

[groups.service.dependencies.allow]
groups = ["domain"]
patterns = ["internal/shared/**"]
relative = ["helpers"]
subPackages = true

[groups.service.dependencies.deny]
groups = ["service"]
"#;
        let config = Config::parse(toml).expect("parse failed");
        let deps = config.groups["service"]
            .dependencies
            .as_ref()
            .expect("dependencies missing");
        let allow = deps.allow.as_ref().expect("allow missing");
        assert_eq!(allow.groups, vec!["domain"]);
        assert_eq!(allow.patterns, vec!["internal/shared/**"]);
        assert_eq!(allow.relative, vec!["helpers"]);
        assert!(allow.sub_packages);
        let deny = deps.deny.as_ref().expect("deny missing");
        assert_eq!(deny.groups, vec!["service"]);
        assert!(!deny.sub_packages);
    }

    #[test]
    fn missing_version_fails_validation() {
        let config = Config::parse("[groups.domain]\npaths = \"internal/domain/**\"\n")
            .expect("parse failed");
        assert!(config.validate().is_err());
    }

    #[test]
    fn version_zero_fails_validation() {
        let config = Config::parse("version = 0\n").expect("parse failed");
        assert!(config.validate().is_err());
    }

    #[test]
    fn group_without_paths_fails_validation() {
        let toml = r#"
version = 1

[groups.domain]
paths = []
"#;
        let config = Config::parse(toml).expect("parse failed");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("domain"));
    }

    #[test]
    fn empty_pattern_fails_validation() {
        let toml = r#"
version = 1

[groups.domain]
paths = ""
"#;
        let config = Config::parse(toml).expect("parse failed");
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(
            Config::parse("version = "),
            Err(ConfigError::Parse { .. })
        ));
    }
}
