use serde::{Deserialize, Serialize};
use std::fmt;

// ===== PREFERENCE TYPES =====
// A preference is one `user_pref("<name>", <value>);` line from prefs.js.
// The value is kept exactly as captured and never interpreted.

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preference {
    /// Dotted hierarchical name (e.g. "privacy.resistFingerprinting")
    pub name: String,
    /// Raw serialized value, written back byte-for-byte
    pub value: String,
}

impl Preference {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl<N: Into<String>, V: Into<String>> From<(N, V)> for Preference {
    fn from((name, value): (N, V)) -> Self {
        Self::new(name, value)
    }
}

// ===== CLASSIFICATION TYPES =====

/// Keep/drop decision for a single preference name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Keep,
    Drop,
}

impl Verdict {
    pub fn is_keep(self) -> bool {
        matches!(self, Verdict::Keep)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Keep => f.write_str("keep"),
            Verdict::Drop => f.write_str("drop"),
        }
    }
}

/// Result of running a full preference collection through the filter.
/// Both halves keep the relative order of the input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Partition {
    pub kept: Vec<Preference>,
    pub dropped: Vec<Preference>,
}

impl Partition {
    /// Number of preferences that went in.
    pub fn total(&self) -> usize {
        self.kept.len() + self.dropped.len()
    }
}
