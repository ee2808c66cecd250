use crate::rules::{PrecedencePolicy, RuleSet, RuleSetBuilder};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// Default value functions for serde
fn default_output_file_name() -> String {
    "librewolf.overrides.cfg".to_string()
}

/// Caller-supplied rule entries. Always appended after the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuleAdditions {
    /// Literal name prefixes to drop (case-sensitive)
    pub exclude_prefixes: Vec<String>,
    /// Substrings to drop, matched case-insensitively
    pub exclude_substrings: Vec<String>,
    /// Regexes whose hit always drops, ahead of the allowlist
    pub exclude_regexes: Vec<String>,
    /// Regexes whose hit keeps, subject to precedence
    pub include_regexes: Vec<String>,
}

impl RuleAdditions {
    pub fn is_empty(&self) -> bool {
        self.exclude_prefixes.is_empty()
            && self.exclude_substrings.is_empty()
            && self.exclude_regexes.is_empty()
            && self.include_regexes.is_empty()
    }

    /// Append `other` after the entries already present.
    pub fn append(&mut self, other: RuleAdditions) {
        self.exclude_prefixes.extend(other.exclude_prefixes);
        self.exclude_substrings.extend(other.exclude_substrings);
        self.exclude_regexes.extend(other.exclude_regexes);
        self.include_regexes.extend(other.include_regexes);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportConfig {
    /// Evaluation order of the rule classes
    #[serde(default)]
    pub precedence: PrecedencePolicy,
    /// Extra rule entries on top of the built-in tables
    #[serde(default)]
    pub rules: RuleAdditions,
    /// Browser data directory holding profiles.ini (autodetected when unset)
    #[serde(default)]
    pub base_dir: Option<PathBuf>,
    /// Profile directory holding prefs.js (resolved from profiles.ini when unset)
    #[serde(default)]
    pub profile_dir: Option<PathBuf>,
    /// Explicit output path (defaults to `<base_dir>/<output_file_name>`)
    #[serde(default)]
    pub output: Option<PathBuf>,
    /// File name used when `output` is unset
    #[serde(default = "default_output_file_name")]
    pub output_file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            precedence: PrecedencePolicy::default(),
            rules: RuleAdditions::default(),
            base_dir: None,
            profile_dir: None,
            output: None,
            output_file_name: default_output_file_name(),
        }
    }
}

impl ExportConfig {
    /// Load config from a YAML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: ExportConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Load config from `path` when given, defaults otherwise.
    /// A path that is given but cannot be loaded is an error, not a fallback.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from_file(p),
            None => Ok(Self::default()),
        }
    }

    /// Build the frozen rule set for this run.
    pub fn rule_set(&self) -> crate::error::Result<RuleSet> {
        RuleSetBuilder::new()
            .precedence(self.precedence)
            .with_additions(&self.rules)
            .build()
    }

    /// Output path for a resolved base directory.
    pub fn output_path(&self, base_dir: &Path) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| base_dir.join(&self.output_file_name))
    }
}
