//! Profile discovery
//!
//! Finds the browser data directory and resolves the default profile from
//! its `profiles.ini`.

use crate::error::{ExportError, Result};
use std::path::{Path, PathBuf};

pub const PROFILES_INI: &str = "profiles.ini";
pub const PREFS_JS: &str = "prefs.js";

/// Known LibreWolf data directories, most common first.
pub fn candidate_base_dirs() -> Vec<PathBuf> {
    let Some(home) = dirs::home_dir() else {
        return Vec::new();
    };
    vec![
        home.join(".librewolf"),
        home.join(".var")
            .join("app")
            .join("io.gitlab.librewolf-community")
            .join(".librewolf"),
    ]
}

/// One `[section]` of an INI file. Keys are stored lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IniSection {
    pub name: String,
    entries: Vec<(String, String)>,
}

impl IniSection {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            entries: Vec::new(),
        }
    }

    /// Case-insensitive key lookup. Later duplicates win.
    pub fn get(&self, key: &str) -> Option<&str> {
        let key = key.to_lowercase();
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Parsed `profiles.ini`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfilesIni {
    sections: Vec<IniSection>,
}

impl ProfilesIni {
    /// Read `<base_dir>/profiles.ini`.
    pub fn load(base_dir: &Path) -> Result<Self> {
        let ini = base_dir.join(PROFILES_INI);
        if !ini.is_file() {
            return Err(ExportError::ProfilesIniNotFound(ini));
        }
        let bytes = std::fs::read(&ini)?;
        Ok(Self::parse(&String::from_utf8_lossy(&bytes)))
    }

    /// Lenient INI parse: `[section]` headers, `key=value` or `key: value`
    /// entries, `#`/`;` comment lines. Entries before the first header and
    /// lines that fit none of these are ignored.
    pub fn parse(content: &str) -> Self {
        let mut sections: Vec<IniSection> = Vec::new();

        for raw in content.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                sections.push(IniSection::new(name.trim()));
                continue;
            }

            let Some(section) = sections.last_mut() else {
                continue;
            };
            if let Some(idx) = line.find(&['=', ':'][..]) {
                let key = line[..idx].trim().to_lowercase();
                let value = line[idx + 1..].trim().to_string();
                section.entries.push((key, value));
            }
        }

        Self { sections }
    }

    pub fn sections(&self) -> &[IniSection] {
        &self.sections
    }

    /// `Profile*` sections, the one flagged `Default=1` first; otherwise file order.
    pub fn profiles(&self) -> Vec<&IniSection> {
        let mut profiles: Vec<&IniSection> = self
            .sections
            .iter()
            .filter(|s| s.name.to_lowercase().starts_with("profile"))
            .collect();
        profiles.sort_by_key(|s| if s.get("Default") == Some("1") { 0 } else { 1 });
        profiles
    }
}

/// Directory a profile section points at, if it names one.
pub fn resolve_profile_dir(base_dir: &Path, section: &IniSection) -> Option<PathBuf> {
    let path = section.get("Path").filter(|p| !p.is_empty())?;
    let is_relative = section.get("IsRelative").unwrap_or("1") == "1";
    Some(if is_relative {
        base_dir.join(path)
    } else {
        PathBuf::from(path)
    })
}

/// First profile (default first) whose directory holds a prefs.js.
pub fn pick_default_profile_dir(base_dir: &Path) -> Result<PathBuf> {
    let ini = ProfilesIni::load(base_dir)?;
    for section in ini.profiles() {
        if let Some(dir) = resolve_profile_dir(base_dir, section) {
            if dir.join(PREFS_JS).is_file() {
                tracing::debug!(section = %section.name, dir = %dir.display(), "picked profile");
                return Ok(dir);
            }
            tracing::debug!(section = %section.name, dir = %dir.display(), "profile has no prefs.js");
        }
    }
    Err(ExportError::NoUsableProfile(base_dir.to_path_buf()))
}

/// First candidate directory that yields a usable profile, else `~/.librewolf`.
pub fn autodetect_base_dir() -> PathBuf {
    let candidates = candidate_base_dirs();
    for base_dir in &candidates {
        match pick_default_profile_dir(base_dir) {
            Ok(_) => return base_dir.clone(),
            Err(e) => tracing::debug!(base_dir = %base_dir.display(), error = %e, "skipping candidate"),
        }
    }
    candidates
        .into_iter()
        .next()
        .unwrap_or_else(|| PathBuf::from(".librewolf"))
}
