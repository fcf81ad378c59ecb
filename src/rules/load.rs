//! Rule set loading.

use std::path::Path;

use tokio::fs;

use super::types::RuleSet;
use crate::error_handling::RulesetError;

/// Parses and validates a rule set from JSON text.
pub fn parse_ruleset(content: &str) -> Result<RuleSet, RulesetError> {
    let rules: RuleSet = serde_json::from_str(content)?;
    rules.validated()
}

/// Loads the rule set from `path`, or the built-in defaults when `None`.
///
/// # Errors
///
/// Returns a `RulesetError` if the file cannot be read, is not valid rule set
/// JSON, or violates a rule set invariant.
pub async fn load_ruleset(path: Option<&Path>) -> Result<RuleSet, RulesetError> {
    let Some(path) = path else {
        log::info!("Using built-in rule set");
        return Ok(RuleSet::default());
    };

    let content = fs::read_to_string(path)
        .await
        .map_err(|source| RulesetError::Io {
            path: path.display().to_string(),
            source,
        })?;
    let rules = parse_ruleset(&content)?;
    log::info!(
        "Loaded rule set from {}: {}-{} bidders, {} required bidder(s), {} required ads.txt domain(s)",
        path.display(),
        rules.minimum_bidders,
        rules.maximum_bidders,
        rules.required_bidders.len(),
        rules.required_authorization_domains.len()
    );
    Ok(rules)
}
