//! prefs.js reader
//!
//! Turns the browser's `prefs.js` into a stream of [`Preference`] values.
//! Only lines of the form `user_pref("<name>", <value>);` are recognised;
//! everything else (comments, blank lines, malformed entries) is skipped
//! without error. Bytes that are not valid UTF-8 are replaced, never fatal.

use crate::error::{ExportError, Result};
use crate::types::Preference;
use regex::Regex;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

const USER_PREF_PATTERN: &str = r#"^\s*user_pref\("(?P<name>[^"]+)",\s*(?P<value>.+?)\s*\);\s*$"#;

/// Line matcher for `user_pref(...)` entries.
#[derive(Debug, Clone)]
pub struct PrefsParser {
    pattern: Regex,
}

impl Default for PrefsParser {
    fn default() -> Self {
        Self::new()
    }
}

impl PrefsParser {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(USER_PREF_PATTERN).expect("user_pref pattern must compile"),
        }
    }

    /// Parse one line. Returns `None` for anything that is not a user_pref entry.
    pub fn parse_line(&self, line: &str) -> Option<Preference> {
        let caps = self.pattern.captures(line)?;
        Some(Preference::new(&caps["name"], &caps["value"]))
    }
}

/// Lazy iterator over the user preferences of a prefs.js stream.
pub struct PrefsReader<R> {
    reader: R,
    parser: PrefsParser,
    buf: Vec<u8>,
    skipped: usize,
}

impl<R: BufRead> PrefsReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            parser: PrefsParser::new(),
            buf: Vec::new(),
            skipped: 0,
        }
    }

    /// Lines consumed so far that were not user_pref entries.
    pub fn skipped_lines(&self) -> usize {
        self.skipped
    }
}

impl<R: BufRead> Iterator for PrefsReader<R> {
    type Item = io::Result<Preference>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e)),
            }

            let line = String::from_utf8_lossy(&self.buf);
            let line = line.trim_end_matches(&['\n', '\r'][..]);
            match self.parser.parse_line(line) {
                Some(pref) => return Some(Ok(pref)),
                None => self.skipped += 1,
            }
        }
    }
}

/// Read every user preference from a prefs.js file, in file order.
pub fn read_prefs_file(path: &Path) -> Result<Vec<Preference>> {
    if !path.is_file() {
        return Err(ExportError::PrefsNotFound(path.to_path_buf()));
    }

    let mut reader = PrefsReader::new(BufReader::new(File::open(path)?));
    let prefs = reader.by_ref().collect::<io::Result<Vec<_>>>()?;

    tracing::debug!(
        path = %path.display(),
        prefs = prefs.len(),
        skipped_lines = reader.skipped_lines(),
        "read prefs.js"
    );

    Ok(prefs)
}
