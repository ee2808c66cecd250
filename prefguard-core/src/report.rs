use crate::classifier::{PreferenceClassifier, RuleHit};
use crate::rules::PrecedencePolicy;
use crate::types::Partition;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A dropped preference together with the rule that dropped it.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedEntry {
    pub name: String,
    pub value: String,
    pub rule: Option<RuleHit>,
}

/// Machine-readable summary of one export run.
#[derive(Debug, Clone, Serialize)]
pub struct ExportReport {
    pub generated_at: DateTime<Utc>,
    pub profile_dir: PathBuf,
    /// `None` for dry runs
    pub output: Option<PathBuf>,
    pub read: usize,
    pub written: usize,
    pub skipped: usize,
    pub precedence: PrecedencePolicy,
    /// See `RuleSet::fingerprint`
    pub rules_fingerprint: String,
    pub skipped_prefs: Vec<SkippedEntry>,
}

impl ExportReport {
    pub fn new(
        classifier: &PreferenceClassifier<'_>,
        partition: &Partition,
        profile_dir: &Path,
        output: Option<&Path>,
    ) -> Self {
        let rules = classifier.rules();
        let skipped_prefs = partition
            .dropped
            .iter()
            .map(|pref| SkippedEntry {
                name: pref.name.clone(),
                value: pref.value.clone(),
                rule: classifier.explain(&pref.name).hit,
            })
            .collect();

        Self {
            generated_at: Utc::now(),
            profile_dir: profile_dir.to_path_buf(),
            output: output.map(Path::to_path_buf),
            read: partition.total(),
            written: partition.kept.len(),
            skipped: partition.dropped.len(),
            precedence: rules.precedence(),
            rules_fingerprint: rules.fingerprint(),
            skipped_prefs,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
