//! Error types for the preference export pipeline.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which regex collection a pattern was supplied for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternList {
    ExcludeRegexes,
    IncludeRegexes,
}

impl fmt::Display for PatternList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternList::ExcludeRegexes => f.write_str("exclude regex"),
            PatternList::IncludeRegexes => f.write_str("include regex"),
        }
    }
}

/// Errors that can occur while locating, reading, filtering or writing prefs.
#[derive(Debug, Error)]
pub enum ExportError {
    /// A caller-supplied pattern failed to compile.
    #[error("invalid {list} pattern `{pattern}`: {source}")]
    InvalidPattern {
        list: PatternList,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("profiles.ini not found at: {0}")]
    ProfilesIniNotFound(PathBuf),

    #[error("no usable profile found under: {0}")]
    NoUsableProfile(PathBuf),

    #[error("prefs.js not found at: {0}")]
    PrefsNotFound(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;
