//! Override file rendering and writing
//!
//! Kept preferences become `pref("<name>", <value>);` lines under a fixed
//! header. Dropped preferences can be rendered as a commented audit listing.
//! Values are written exactly as they were captured.

use crate::classifier::PreferenceClassifier;
use crate::error::Result;
use crate::types::Preference;
use std::fmt::Write as _;
use std::fs;
use std::io::Write;
use std::path::Path;

pub const OVERRIDES_HEADER: &str = "/**\n \
* Generated from prefs.js user preferences\n \
* Policy-only, privacy-first: no IDs, timestamps, counters, UI state, or font pinning\n \
*/";

pub const AUDIT_HEADING: &str = "# --- skipped prefs (audit) ---";

/// Full override file contents, `\n` line endings.
pub fn render_overrides(prefs: &[Preference]) -> String {
    let mut out = String::with_capacity(OVERRIDES_HEADER.len() + prefs.len() * 48);
    out.push_str(OVERRIDES_HEADER);
    out.push_str("\n\n");
    for pref in prefs {
        let _ = writeln!(out, "pref(\"{}\", {});", pref.name, pref.value);
    }
    out
}

/// Commented listing of dropped preferences for human review.
pub fn render_audit(prefs: &[Preference]) -> String {
    let mut out = String::new();
    out.push_str(AUDIT_HEADING);
    out.push('\n');
    for pref in prefs {
        let _ = writeln!(out, "# user_pref(\"{}\", {});", pref.name, pref.value);
    }
    out
}

/// Audit listing with the deciding rule appended to each line.
pub fn render_audit_with_reasons(classifier: &PreferenceClassifier<'_>, prefs: &[Preference]) -> String {
    let mut out = String::new();
    out.push_str(AUDIT_HEADING);
    out.push('\n');
    for pref in prefs {
        let _ = write!(out, "# user_pref(\"{}\", {});", pref.name, pref.value);
        match classifier.explain(&pref.name).hit {
            Some(hit) => {
                let _ = writeln!(out, "  // {}: {}", hit.class, hit.pattern);
            }
            None => out.push('\n'),
        }
    }
    out
}

/// Write the override file atomically.
///
/// Contents go to a temporary file next to the target which is then renamed
/// over it, so readers see either the previous file or the complete new one.
/// A symlinked `out_path` is written through to its target, and an existing
/// file keeps its permissions.
pub fn write_overrides(out_path: &Path, prefs: &[Preference]) -> Result<()> {
    let target = match fs::symlink_metadata(out_path) {
        Ok(meta) if meta.file_type().is_symlink() => fs::canonicalize(out_path)?,
        _ => out_path.to_path_buf(),
    };
    let parent = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut tmp = tempfile::Builder::new()
        .prefix(".prefguard-")
        .suffix(".tmp")
        .tempfile_in(parent)?;
    tmp.write_all(render_overrides(prefs).as_bytes())?;
    // tempfile creates 0600
    if let Ok(existing) = fs::metadata(&target) {
        tmp.as_file().set_permissions(existing.permissions())?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(&target).map_err(|e| e.error)?;

    tracing::info!(path = %target.display(), prefs = prefs.len(), "wrote overrides");
    Ok(())
}
