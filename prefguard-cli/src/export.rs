//! Export run orchestration
//!
//! Resolves paths, builds the rule set, reads prefs.js, partitions and
//! writes the override file. Printing is left to the binary.

use anyhow::{Context, Result};
use prefguard_core::profile::{autodetect_base_dir, pick_default_profile_dir, PREFS_JS};
use prefguard_core::{
    partition, read_prefs_file, write_overrides, ExportConfig, Partition, PreferenceClassifier,
    RuleSet,
};
use std::path::PathBuf;

/// Everything a finished run produced.
#[derive(Debug)]
pub struct ExportOutcome {
    pub base_dir: PathBuf,
    pub profile_dir: PathBuf,
    pub output: PathBuf,
    /// false for dry runs
    pub written: bool,
    pub rules: RuleSet,
    pub partition: Partition,
}

impl ExportOutcome {
    pub fn classifier(&self) -> PreferenceClassifier<'_> {
        PreferenceClassifier::new(&self.rules)
    }
}

/// Run one export. With `dry_run` nothing is written to disk.
///
/// The rule set is built before any file is touched, so a bad pattern
/// aborts the run without reading or writing anything.
pub fn run_export(config: &ExportConfig, dry_run: bool) -> Result<ExportOutcome> {
    let rules = config.rule_set().context("invalid rule configuration")?;

    let base_dir = match &config.base_dir {
        Some(dir) => dir.clone(),
        None => autodetect_base_dir(),
    };
    let profile_dir = match &config.profile_dir {
        Some(dir) => dir.clone(),
        None => pick_default_profile_dir(&base_dir)
            .with_context(|| format!("could not resolve a profile under {}", base_dir.display()))?,
    };
    tracing::info!(base_dir = %base_dir.display(), profile_dir = %profile_dir.display(), "resolved profile");

    let prefs = read_prefs_file(&profile_dir.join(PREFS_JS))?;
    let result = partition(&PreferenceClassifier::new(&rules), prefs);

    let output = config.output_path(&base_dir);
    if !dry_run {
        write_overrides(&output, &result.kept)
            .with_context(|| format!("failed to write {}", output.display()))?;
    }

    Ok(ExportOutcome {
        base_dir,
        profile_dir,
        output,
        written: !dry_run,
        rules,
        partition: result,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn profile_fixture() -> tempfile::TempDir {
        let base = tempfile::tempdir().unwrap();
        let profile = base.path().join("p.default");
        fs::create_dir_all(&profile).unwrap();
        fs::write(
            profile.join(PREFS_JS),
            "user_pref(\"beacon.enabled\", false);\nuser_pref(\"devtools.theme\", \"dark\");\n",
        )
        .unwrap();
        fs::write(
            base.path().join("profiles.ini"),
            "[Profile0]\nPath=p.default\nIsRelative=1\nDefault=1\n",
        )
        .unwrap();
        base
    }

    #[test]
    fn writes_kept_prefs() {
        let base = profile_fixture();
        let config = ExportConfig {
            base_dir: Some(base.path().to_path_buf()),
            ..ExportConfig::default()
        };

        let outcome = run_export(&config, false).unwrap();
        assert!(outcome.written);
        assert_eq!(outcome.profile_dir, base.path().join("p.default"));
        assert_eq!(outcome.partition.kept.len(), 1);
        assert_eq!(outcome.partition.dropped.len(), 1);

        let written = fs::read_to_string(&outcome.output).unwrap();
        assert!(written.ends_with("pref(\"beacon.enabled\", false);\n"));
    }

    #[test]
    fn dry_run_writes_nothing() {
        let base = profile_fixture();
        let config = ExportConfig {
            base_dir: Some(base.path().to_path_buf()),
            ..ExportConfig::default()
        };

        let outcome = run_export(&config, true).unwrap();
        assert!(!outcome.written);
        assert!(!outcome.output.exists());
    }

    #[test]
    fn explicit_profile_dir_skips_profiles_ini() {
        let base = profile_fixture();
        fs::remove_file(base.path().join("profiles.ini")).unwrap();
        let config = ExportConfig {
            base_dir: Some(base.path().to_path_buf()),
            profile_dir: Some(base.path().join("p.default")),
            ..ExportConfig::default()
        };

        let outcome = run_export(&config, false).unwrap();
        assert_eq!(outcome.partition.total(), 2);
    }

    #[test]
    fn bad_pattern_aborts_before_writing() {
        let base = profile_fixture();
        let mut config = ExportConfig {
            base_dir: Some(base.path().to_path_buf()),
            ..ExportConfig::default()
        };
        config.rules.include_regexes.push("(".to_string());

        let err = run_export(&config, false).unwrap_err();
        assert!(format!("{err:#}").contains("invalid include regex pattern"));
        assert!(!base.path().join("librewolf.overrides.cfg").exists());
    }
}
