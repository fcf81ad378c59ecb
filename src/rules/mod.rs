//! Audit rule sets.
//!
//! A rule set is read-only configuration loaded once per run, either from a
//! JSON rule file or from the built-in defaults.

mod load;
mod types;

// Re-export public API
pub use load::{load_ruleset, parse_ruleset};
pub use types::{RuleSet, TimeoutRange};
