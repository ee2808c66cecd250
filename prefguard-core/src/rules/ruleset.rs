use crate::config::RuleAdditions;
use crate::error::{ExportError, PatternList, Result};
use regex::Regex;
use sha2::{Digest, Sha256};

use super::defaults::{
    DEFAULT_EXCLUDE_PREFIXES, DEFAULT_EXCLUDE_REGEXES, DEFAULT_EXCLUDE_SUBSTRINGS,
    DEFAULT_INCLUDE_REGEXES,
};
use super::precedence::{PrecedencePolicy, RuleClass};

/// Compiled, read-only rule set used for one export run.
///
/// Built once through [`RuleSetBuilder`] and then only borrowed by the
/// classifier. Nothing mutates it after `build()`.
#[derive(Debug, Clone)]
pub struct RuleSet {
    precedence: PrecedencePolicy,
    exclude_regexes: Vec<Regex>,
    include_regexes: Vec<Regex>,
    exclude_prefixes: Vec<String>,
    /// Stored case-folded
    exclude_substrings: Vec<String>,
}

impl RuleSet {
    pub fn builder() -> RuleSetBuilder {
        RuleSetBuilder::new()
    }

    pub fn precedence(&self) -> PrecedencePolicy {
        self.precedence
    }

    pub fn exclude_regexes(&self) -> impl Iterator<Item = &str> {
        self.exclude_regexes.iter().map(Regex::as_str)
    }

    pub fn include_regexes(&self) -> impl Iterator<Item = &str> {
        self.include_regexes.iter().map(Regex::as_str)
    }

    pub fn exclude_prefixes(&self) -> &[String] {
        &self.exclude_prefixes
    }

    pub fn exclude_substrings(&self) -> &[String] {
        &self.exclude_substrings
    }

    /// Returns the first entry of `class` that matches `name`, if any.
    pub fn first_match(&self, class: RuleClass, name: &str) -> Option<&str> {
        match class {
            RuleClass::ExactDeny => self
                .exclude_regexes
                .iter()
                .find(|re| re.is_match(name))
                .map(Regex::as_str),
            RuleClass::Allow => self
                .include_regexes
                .iter()
                .find(|re| re.is_match(name))
                .map(Regex::as_str),
            RuleClass::Prefix => self
                .exclude_prefixes
                .iter()
                .find(|prefix| name.starts_with(prefix.as_str()))
                .map(String::as_str),
            RuleClass::Substring => {
                let folded = name.to_lowercase();
                self.exclude_substrings
                    .iter()
                    .find(|substring| folded.contains(substring.as_str()))
                    .map(String::as_str)
            }
        }
    }

    /// SHA-256 over the precedence policy and every collection in order.
    /// Two rule sets with the same fingerprint classify identically.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.precedence.name());
        let lists: [(&str, Vec<&str>); 4] = [
            ("exclude_regexes", self.exclude_regexes().collect()),
            ("include_regexes", self.include_regexes().collect()),
            (
                "exclude_prefixes",
                self.exclude_prefixes.iter().map(String::as_str).collect(),
            ),
            (
                "exclude_substrings",
                self.exclude_substrings.iter().map(String::as_str).collect(),
            ),
        ];
        for (tag, entries) in lists {
            hasher.update(b"\x1e");
            hasher.update(tag);
            for entry in entries {
                hasher.update(b"\x1f");
                hasher.update(entry);
            }
        }
        format!("{:x}", hasher.finalize())
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        RuleSetBuilder::new()
            .build()
            .expect("built-in rule patterns must compile")
    }
}

/// Collects rule entries as plain strings; `build()` validates and compiles them.
#[derive(Debug, Clone)]
pub struct RuleSetBuilder {
    precedence: PrecedencePolicy,
    exclude_regexes: Vec<String>,
    include_regexes: Vec<String>,
    exclude_prefixes: Vec<String>,
    exclude_substrings: Vec<String>,
}

impl Default for RuleSetBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn owned(entries: &[&str]) -> Vec<String> {
    entries.iter().map(|s| s.to_string()).collect()
}

impl RuleSetBuilder {
    /// Start from the built-in defaults.
    pub fn new() -> Self {
        Self {
            precedence: PrecedencePolicy::default(),
            exclude_regexes: owned(DEFAULT_EXCLUDE_REGEXES),
            include_regexes: owned(DEFAULT_INCLUDE_REGEXES),
            exclude_prefixes: owned(DEFAULT_EXCLUDE_PREFIXES),
            exclude_substrings: owned(DEFAULT_EXCLUDE_SUBSTRINGS),
        }
    }

    /// Start from empty collections. Mostly useful when embedding the
    /// classifier with an entirely custom rule table.
    pub fn without_defaults() -> Self {
        Self {
            precedence: PrecedencePolicy::default(),
            exclude_regexes: Vec::new(),
            include_regexes: Vec::new(),
            exclude_prefixes: Vec::new(),
            exclude_substrings: Vec::new(),
        }
    }

    pub fn precedence(mut self, precedence: PrecedencePolicy) -> Self {
        self.precedence = precedence;
        self
    }

    pub fn extend_exclude_regexes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_regexes.extend(patterns.into_iter().map(Into::into));
        self
    }

    pub fn extend_include_regexes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_regexes.extend(patterns.into_iter().map(Into::into));
        self
    }

    pub fn extend_exclude_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_prefixes.extend(prefixes.into_iter().map(Into::into));
        self
    }

    pub fn extend_exclude_substrings<I, S>(mut self, substrings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_substrings
            .extend(substrings.into_iter().map(Into::into));
        self
    }

    /// Append every list of a config's additions.
    pub fn with_additions(self, additions: &RuleAdditions) -> Self {
        self.extend_exclude_regexes(additions.exclude_regexes.iter().cloned())
            .extend_include_regexes(additions.include_regexes.iter().cloned())
            .extend_exclude_prefixes(additions.exclude_prefixes.iter().cloned())
            .extend_exclude_substrings(additions.exclude_substrings.iter().cloned())
    }

    /// Compile all patterns. Fails on the first pattern that does not parse.
    pub fn build(self) -> Result<RuleSet> {
        let exclude_regexes = compile(&self.exclude_regexes, PatternList::ExcludeRegexes)?;
        let include_regexes = compile(&self.include_regexes, PatternList::IncludeRegexes)?;

        let rule_set = RuleSet {
            precedence: self.precedence,
            exclude_regexes,
            include_regexes,
            exclude_prefixes: self.exclude_prefixes,
            exclude_substrings: self
                .exclude_substrings
                .iter()
                .map(|s| s.to_lowercase())
                .collect(),
        };

        tracing::debug!(
            precedence = %rule_set.precedence,
            exclude_regexes = rule_set.exclude_regexes.len(),
            include_regexes = rule_set.include_regexes.len(),
            exclude_prefixes = rule_set.exclude_prefixes.len(),
            exclude_substrings = rule_set.exclude_substrings.len(),
            "rule set built"
        );

        Ok(rule_set)
    }
}

fn compile(patterns: &[String], list: PatternList) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(pattern).map_err(|source| ExportError::InvalidPattern {
                list,
                pattern: pattern.clone(),
                source,
            })
        })
        .collect()
}
