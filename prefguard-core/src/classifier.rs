use crate::rules::{RuleClass, RuleSet};
use crate::types::Verdict;
use serde::Serialize;

/// The rule entry that decided a classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleHit {
    pub class: RuleClass,
    /// Pattern, prefix or substring text as it appears in the rule set
    pub pattern: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub verdict: Verdict,
    /// `None` when no rule matched and the name fell through to default-allow
    pub hit: Option<RuleHit>,
}

/// Decides keep/drop for preference names against a borrowed rule set.
///
/// Walks the rule classes in the rule set's precedence order and stops at
/// the first class with a hit. A name no class claims is kept, including
/// the empty name.
#[derive(Debug, Clone, Copy)]
pub struct PreferenceClassifier<'a> {
    rules: &'a RuleSet,
}

impl<'a> PreferenceClassifier<'a> {
    pub fn new(rules: &'a RuleSet) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'a RuleSet {
        self.rules
    }

    pub fn classify(&self, name: &str) -> Verdict {
        self.explain(name).verdict
    }

    pub fn explain(&self, name: &str) -> Classification {
        for &class in self.rules.precedence().order() {
            if let Some(pattern) = self.rules.first_match(class, name) {
                return Classification {
                    verdict: class.verdict(),
                    hit: Some(RuleHit {
                        class,
                        pattern: pattern.to_string(),
                    }),
                };
            }
        }

        Classification {
            verdict: Verdict::Keep,
            hit: None,
        }
    }
}
