//! Linker configuration
//!
//! Settings come from defaults, the environment, or a TOML file:
//!
//! ```toml
//! shadowing = "local-first"
//! transitive-imports = false
//! ```
//!
//! Environment variables:
//! - `CLOSURE_LINK_SHADOWING`: `strict` or `local-first`
//! - `CLOSURE_LINK_TRANSITIVE_IMPORTS`: `1/true/yes` or `0/false/no`

use std::env;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const SHADOWING_VAR: &str = "CLOSURE_LINK_SHADOWING";
const TRANSITIVE_VAR: &str = "CLOSURE_LINK_TRANSITIVE_IMPORTS";

/// How a local definition relates to an imported one with the same name and arity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShadowPolicy {
    /// Both count as candidates; the reference is ambiguous.
    #[default]
    Strict,
    /// A single local match hides imports.
    LocalFirst,
}

impl ShadowPolicy {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "strict" => Some(Self::Strict),
            "local-first" | "local_first" | "local" => Some(Self::LocalFirst),
            _ => None,
        }
    }
}

impl fmt::Display for ShadowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ShadowPolicy::Strict => "strict",
            ShadowPolicy::LocalFirst => "local-first",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct LinkerConfig {
    pub shadowing: ShadowPolicy,
    /// Follow the imports of imported units, not only the requesting unit's own.
    pub transitive_imports: bool,
}

impl Default for LinkerConfig {
    fn default() -> Self {
        Self {
            shadowing: ShadowPolicy::Strict,
            transitive_imports: true,
        }
    }
}

impl LinkerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let shadowing = env::var(SHADOWING_VAR).ok();
        let transitive = env::var(TRANSITIVE_VAR).ok();
        Self::default().with_overrides(shadowing.as_deref(), transitive.as_deref())
    }

    /// Apply raw override strings on top of `self`; blank values are ignored.
    pub fn with_overrides(
        self,
        shadowing: Option<&str>,
        transitive_imports: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let mut config = self;
        if let Some(raw) = shadowing.filter(|v| !v.trim().is_empty()) {
            config.shadowing = ShadowPolicy::parse(raw).ok_or_else(|| ConfigError::InvalidValue {
                key: SHADOWING_VAR.to_string(),
                value: raw.to_string(),
            })?;
        }
        if let Some(raw) = transitive_imports.filter(|v| !v.trim().is_empty()) {
            config.transitive_imports = parse_flag(raw).ok_or_else(|| ConfigError::InvalidValue {
                key: TRANSITIVE_VAR.to_string(),
                value: raw.to_string(),
            })?;
        }
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&text)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn defaults_are_strict_and_transitive() {
        let config = LinkerConfig::default();
        assert_eq!(config.shadowing, ShadowPolicy::Strict);
        assert!(config.transitive_imports);
    }

    #[test]
    fn overrides_parse_policy_and_flag() {
        let config = LinkerConfig::default()
            .with_overrides(Some("Local-First"), Some("no"))
            .unwrap();
        assert_eq!(
            config,
            LinkerConfig {
                shadowing: ShadowPolicy::LocalFirst,
                transitive_imports: false,
            }
        );

        let unchanged = LinkerConfig::default().with_overrides(Some("  "), None).unwrap();
        assert_eq!(unchanged, LinkerConfig::default());
    }

    #[test]
    fn overrides_reject_garbage() {
        let err = LinkerConfig::default()
            .with_overrides(Some("loose"), None)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid value 'loose' for CLOSURE_LINK_SHADOWING"
        );
        assert!(LinkerConfig::default()
            .with_overrides(None, Some("maybe"))
            .is_err());
    }

    #[test]
    fn toml_partial_config_keeps_defaults() {
        let config = LinkerConfig::from_toml_str("shadowing = \"local-first\"\n").unwrap();
        assert_eq!(config.shadowing, ShadowPolicy::LocalFirst);
        assert!(config.transitive_imports);
    }

    #[test]
    fn toml_rejects_unknown_keys() {
        let err = LinkerConfig::from_toml_str("tie-break = \"first\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "{err:?}");
    }

    #[test]
    fn toml_file_roundtrip_through_tempfile() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "transitive-imports = false").unwrap();
        let config = LinkerConfig::from_toml_file(file.path()).unwrap();
        assert!(!config.transitive_imports);
        assert_eq!(config.shadowing, ShadowPolicy::Strict);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = LinkerConfig::from_toml_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }), "{err:?}");
    }
}
