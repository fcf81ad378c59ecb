//! Rule set data structures.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error_handling::RulesetError;

/// Inclusive range of acceptable bidder timeouts in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeoutRange {
    pub min: u64,
    pub max: u64,
}

impl TimeoutRange {
    pub fn contains(&self, timeout_ms: u64) -> bool {
        (self.min..=self.max).contains(&timeout_ms)
    }
}

/// Thresholds and requirements a page is audited against.
///
/// Field names in JSON follow the rule file format (`requiredAdsTxtEntries`,
/// `timeoutRange`); the internal names are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleSet {
    pub minimum_bidders: usize,
    pub maximum_bidders: usize,
    /// Bidder codes expected on the page (case-sensitive), in report order
    #[serde(default)]
    pub required_bidders: Vec<String>,
    /// Seller domains expected in ads.txt (matched case-insensitively)
    #[serde(
        default,
        rename = "requiredAdsTxtEntries",
        alias = "requiredAuthorizationDomains"
    )]
    pub required_authorization_domains: Vec<String>,
    #[serde(rename = "timeoutRange", alias = "timeoutRangeMs")]
    pub timeout_range_ms: TimeoutRange,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            minimum_bidders: 3,
            maximum_bidders: 10,
            required_bidders: vec!["appnexus".to_string(), "rubicon".to_string()],
            required_authorization_domains: vec![
                "google.com".to_string(),
                "appnexus.com".to_string(),
                "rubiconproject.com".to_string(),
            ],
            timeout_range_ms: TimeoutRange {
                min: 1000,
                max: 3000,
            },
        }
    }
}

impl RuleSet {
    /// Checks invariants and collapses duplicate list entries.
    ///
    /// Duplicates keep their first position. Domain duplicates are detected
    /// case-insensitively since matching against ads.txt ignores case.
    ///
    /// # Errors
    ///
    /// Returns `RulesetError::Invalid` if `maximum_bidders < minimum_bidders`
    /// or the timeout range is inverted.
    pub fn validated(mut self) -> Result<Self, RulesetError> {
        if self.maximum_bidders < self.minimum_bidders {
            return Err(RulesetError::Invalid(format!(
                "maximumBidders ({}) is less than minimumBidders ({})",
                self.maximum_bidders, self.minimum_bidders
            )));
        }
        if self.timeout_range_ms.min > self.timeout_range_ms.max {
            return Err(RulesetError::Invalid(format!(
                "timeoutRange.min ({}) is greater than timeoutRange.max ({})",
                self.timeout_range_ms.min, self.timeout_range_ms.max
            )));
        }

        let mut seen = HashSet::new();
        self.required_bidders.retain(|bidder| seen.insert(bidder.clone()));
        let mut seen = HashSet::new();
        self.required_authorization_domains
            .retain(|domain| seen.insert(domain.to_lowercase()));

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ruleset_is_valid() {
        let rules = RuleSet::default();
        assert_eq!(rules.clone().validated().expect("valid defaults"), rules);
    }

    #[test]
    fn test_timeout_range_is_inclusive() {
        let range = TimeoutRange { min: 1000, max: 3000 };
        assert!(range.contains(1000));
        assert!(range.contains(3000));
        assert!(!range.contains(999));
        assert!(!range.contains(3001));
    }

    #[test]
    fn test_inverted_bidder_bounds_rejected() {
        let rules = RuleSet {
            minimum_bidders: 5,
            maximum_bidders: 4,
            ..RuleSet::default()
        };
        assert!(matches!(rules.validated(), Err(RulesetError::Invalid(_))));
    }

    #[test]
    fn test_inverted_timeout_range_rejected() {
        let rules = RuleSet {
            timeout_range_ms: TimeoutRange { min: 3000, max: 1000 },
            ..RuleSet::default()
        };
        assert!(matches!(rules.validated(), Err(RulesetError::Invalid(_))));
    }

    #[test]
    fn test_duplicates_collapse_keeping_first() {
        let rules = RuleSet {
            required_bidders: vec!["ix".into(), "appnexus".into(), "ix".into(), "IX".into()],
            required_authorization_domains: vec![
                "Google.com".into(),
                "openx.com".into(),
                "google.com".into(),
            ],
            ..RuleSet::default()
        }
        .validated()
        .expect("valid rules");
        assert_eq!(rules.required_bidders, vec!["ix", "appnexus", "IX"]);
        assert_eq!(
            rules.required_authorization_domains,
            vec!["Google.com", "openx.com"]
        );
    }
}
