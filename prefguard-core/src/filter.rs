use crate::classifier::PreferenceClassifier;
use crate::types::{Partition, Preference, Verdict};

/// Split preferences into kept and dropped, preserving input order in both.
///
/// Repeated names are not collapsed; every occurrence is classified and
/// passed through.
pub fn partition<I>(classifier: &PreferenceClassifier<'_>, prefs: I) -> Partition
where
    I: IntoIterator<Item = Preference>,
{
    let mut result = Partition::default();

    for pref in prefs {
        let classification = classifier.explain(&pref.name);
        tracing::trace!(
            name = %pref.name,
            verdict = %classification.verdict,
            rule = ?classification.hit.as_ref().map(|hit| hit.class),
            "classified"
        );
        match classification.verdict {
            Verdict::Keep => result.kept.push(pref),
            Verdict::Drop => result.dropped.push(pref),
        }
    }

    tracing::debug!(
        kept = result.kept.len(),
        dropped = result.dropped.len(),
        "partition complete"
    );

    result
}
