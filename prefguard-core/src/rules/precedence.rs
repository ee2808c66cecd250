// Precedence decision table.
//
// Each rule class carries a fixed verdict. A policy is the order in which
// the classes are consulted; the first class with a hit decides.

use crate::types::Verdict;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One collection of the rule set, viewed as a row of the decision table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleClass {
    /// Exact-regex denylist
    ExactDeny,
    /// Exact-regex allowlist
    Allow,
    /// Literal prefix denylist
    Prefix,
    /// Case-insensitive substring denylist
    Substring,
}

impl RuleClass {
    pub fn verdict(self) -> Verdict {
        match self {
            RuleClass::Allow => Verdict::Keep,
            RuleClass::ExactDeny | RuleClass::Prefix | RuleClass::Substring => Verdict::Drop,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RuleClass::ExactDeny => "exclude-regex",
            RuleClass::Allow => "include-regex",
            RuleClass::Prefix => "exclude-prefix",
            RuleClass::Substring => "exclude-substring",
        }
    }
}

impl fmt::Display for RuleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

const STRICT_ORDER: &[RuleClass] = &[
    RuleClass::ExactDeny,
    RuleClass::Allow,
    RuleClass::Prefix,
    RuleClass::Substring,
];

const DENYLIST_FIRST_ORDER: &[RuleClass] = &[
    RuleClass::ExactDeny,
    RuleClass::Prefix,
    RuleClass::Substring,
    RuleClass::Allow,
];

/// Named evaluation order for the rule classes.
///
/// Every policy consults the exact-regex denylist first, so an explicit
/// denylist hit always drops the preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrecedencePolicy {
    /// exclude-regex, include-regex, exclude-prefix, exclude-substring
    #[default]
    Strict,
    /// exclude-regex, exclude-prefix, exclude-substring, include-regex
    DenylistFirst,
}

impl PrecedencePolicy {
    pub const ALL: [PrecedencePolicy; 2] = [PrecedencePolicy::Strict, PrecedencePolicy::DenylistFirst];

    /// Rule classes in evaluation order.
    pub fn order(self) -> &'static [RuleClass] {
        match self {
            PrecedencePolicy::Strict => STRICT_ORDER,
            PrecedencePolicy::DenylistFirst => DENYLIST_FIRST_ORDER,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PrecedencePolicy::Strict => "strict",
            PrecedencePolicy::DenylistFirst => "denylist-first",
        }
    }
}

impl fmt::Display for PrecedencePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PrecedencePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PrecedencePolicy::ALL
            .into_iter()
            .find(|policy| policy.name() == s)
            .ok_or_else(|| {
                format!("unknown precedence policy '{s}' (expected 'strict' or 'denylist-first')")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_policy_starts_with_exact_deny() {
        for policy in PrecedencePolicy::ALL {
            assert_eq!(policy.order()[0], RuleClass::ExactDeny, "{policy}");
        }
    }

    #[test]
    fn every_policy_covers_each_class_once() {
        for policy in PrecedencePolicy::ALL {
            let order = policy.order();
            assert_eq!(order.len(), 4);
            for class in STRICT_ORDER {
                assert_eq!(order.iter().filter(|c| *c == class).count(), 1);
            }
        }
    }

    #[test]
    fn strict_consults_allowlist_before_prefix() {
        let order = PrecedencePolicy::Strict.order();
        let allow = order.iter().position(|c| *c == RuleClass::Allow).unwrap();
        let prefix = order.iter().position(|c| *c == RuleClass::Prefix).unwrap();
        assert!(allow < prefix);
    }

    #[test]
    fn only_allowlist_keeps() {
        assert_eq!(RuleClass::Allow.verdict(), Verdict::Keep);
        assert_eq!(RuleClass::ExactDeny.verdict(), Verdict::Drop);
        assert_eq!(RuleClass::Prefix.verdict(), Verdict::Drop);
        assert_eq!(RuleClass::Substring.verdict(), Verdict::Drop);
    }

    #[test]
    fn parses_policy_names() {
        assert_eq!("strict".parse(), Ok(PrecedencePolicy::Strict));
        assert_eq!("denylist-first".parse(), Ok(PrecedencePolicy::DenylistFirst));
        assert!("allow-first".parse::<PrecedencePolicy>().is_err());
    }

    #[test]
    fn serde_uses_kebab_case() {
        let yaml = serde_yaml::to_string(&PrecedencePolicy::DenylistFirst).unwrap();
        assert_eq!(yaml.trim(), "denylist-first");
    }
}
