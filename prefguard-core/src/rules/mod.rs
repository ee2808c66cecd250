// Rules module - the data side of classification.
// - defaults.rs: built-in denylist/allowlist tables
// - precedence.rs: rule classes and the named evaluation orders
// - ruleset.rs: compiled RuleSet and its builder

pub mod defaults;
pub mod precedence;
pub mod ruleset;

pub use precedence::{PrecedencePolicy, RuleClass};
pub use ruleset::{RuleSet, RuleSetBuilder};
