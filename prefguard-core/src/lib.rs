// prefguard core library
//
// Exports a browser profile's user preferences into a policy override file,
// keeping deliberate policy settings and dropping runtime churn.
// Main interface: build a RuleSet, classify or partition preferences with it.

pub mod types;
pub mod error;
pub mod config;
pub mod rules;
pub mod classifier;
pub mod filter;
pub mod prefs_js;
pub mod overrides;
pub mod profile;
pub mod report;

// Re-export main types and functions for easy use
pub use types::*;
pub use error::{ExportError, PatternList};
pub use config::{ExportConfig, RuleAdditions};
pub use rules::{PrecedencePolicy, RuleClass, RuleSet, RuleSetBuilder};
pub use classifier::{Classification, PreferenceClassifier, RuleHit};
pub use filter::partition;
pub use prefs_js::{read_prefs_file, PrefsParser, PrefsReader};
pub use overrides::{render_audit, render_audit_with_reasons, render_overrides, write_overrides};
pub use report::ExportReport;
