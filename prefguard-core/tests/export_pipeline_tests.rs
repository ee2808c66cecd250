//! End-to-end export: profile discovery → prefs.js → filter → override file.
//!
//! Builds a throwaway LibreWolf data directory per test.

use prefguard_core::overrides::OVERRIDES_HEADER;
use prefguard_core::profile::pick_default_profile_dir;
use prefguard_core::{
    partition, read_prefs_file, render_audit, write_overrides, ExportConfig, ExportError,
    ExportReport, PreferenceClassifier,
};
use std::fs;
use std::path::Path;

const PREFS_JS: &str = r#"// Mozilla User Preferences

// DO NOT EDIT THIS FILE.
user_pref("app.update.lastUpdateTime.browser-cleanup-thumbnails", 1712345678);
user_pref("beacon.enabled", false);
user_pref("browser.sessionstore.window_state", "{\"windows\":[]}");
user_pref("extensions.webextensions.uuids", "{\"uBlock0@raymondhill.net\":\"0b6f-...\"}");
user_pref("network.trr.mode", 3);
user_pref("privacy.resistFingerprinting", true);
user_pref("security.tls.version.min", 3);
user_pref("sidebar.revamp", true);
not a pref line
"#;

fn fixture_base_dir(base: &Path) {
    fs::write(
        base.join("profiles.ini"),
        "[Profile0]\nName=default-default\nIsRelative=1\nPath=x1y2.default-default\nDefault=1\n\n[General]\nVersion=2\n",
    )
    .unwrap();
    let profile = base.join("x1y2.default-default");
    fs::create_dir_all(&profile).unwrap();
    fs::write(profile.join("prefs.js"), PREFS_JS).unwrap();
}

fn run_export(base: &Path, config: &ExportConfig) -> (String, String, ExportReport) {
    let profile_dir = pick_default_profile_dir(base).unwrap();
    let prefs = read_prefs_file(&profile_dir.join("prefs.js")).unwrap();

    let rules = config.rule_set().unwrap();
    let classifier = PreferenceClassifier::new(&rules);
    let result = partition(&classifier, prefs);

    let out_path = config.output_path(base);
    write_overrides(&out_path, &result.kept).unwrap();
    let report = ExportReport::new(&classifier, &result, &profile_dir, Some(&out_path));

    (
        fs::read_to_string(out_path).unwrap(),
        render_audit(&result.dropped),
        report,
    )
}

#[test]
fn default_export_writes_policy_prefs_only() {
    let base = tempfile::tempdir().unwrap();
    fixture_base_dir(base.path());

    let (written, audit, report) = run_export(base.path(), &ExportConfig::default());

    let expected = format!(
        "{OVERRIDES_HEADER}\n\n\
pref(\"beacon.enabled\", false);\n\
pref(\"network.trr.mode\", 3);\n\
pref(\"privacy.resistFingerprinting\", true);\n\
pref(\"security.tls.version.min\", 3);\n\
pref(\"sidebar.revamp\", true);\n"
    );
    pretty_assertions::assert_eq!(written, expected);

    assert!(audit.contains("# user_pref(\"extensions.webextensions.uuids\", "));
    assert!(audit.contains("# user_pref(\"browser.sessionstore.window_state\", \"{\\\"windows\\\":[]}\");"));
    assert_eq!((report.read, report.written, report.skipped), (8, 5, 3));
}

#[test]
fn config_additions_and_precedence_change_the_result() {
    let base = tempfile::tempdir().unwrap();
    fixture_base_dir(base.path());

    let yaml = "precedence: denylist-first\nrules:\n  exclude_prefixes: [\"sidebar.\"]\n";
    let config: ExportConfig = serde_yaml::from_str(yaml).unwrap();

    let (written, _, report) = run_export(base.path(), &config);

    assert!(!written.contains("sidebar.revamp"));
    assert!(!written.contains("security.tls.version.min"));
    assert!(written.contains("pref(\"privacy.resistFingerprinting\", true);"));
    assert_eq!(report.written, 3);
}

#[test]
fn explicit_output_path_is_honoured() {
    let base = tempfile::tempdir().unwrap();
    fixture_base_dir(base.path());
    let out = base.path().join("custom").join("user.cfg");

    let config = ExportConfig {
        output: Some(out.clone()),
        ..ExportConfig::default()
    };
    run_export(base.path(), &config);

    assert!(out.is_file());
    assert!(!base.path().join("librewolf.overrides.cfg").exists());
}

#[test]
fn invalid_extension_pattern_fails_before_classification() {
    let mut config = ExportConfig::default();
    config.rules.exclude_regexes.push("^a(b".to_string());
    assert!(matches!(
        config.rule_set(),
        Err(ExportError::InvalidPattern { .. })
    ));
}
