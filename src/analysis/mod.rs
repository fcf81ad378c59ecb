//! The audit engine.
//!
//! `evaluate()` combines a bidding snapshot, an ads.txt snapshot and a rule
//! set into a [`Verdict`]. It is pure and total: missing data is a FAIL
//! condition, never an error, and identical inputs give identical verdicts.

mod authorization;
mod bidding;
mod section;
mod types;

use crate::ads_txt::AuthorizationSnapshot;
use crate::bidding::BiddingSnapshot;
use crate::config::MAX_ACTION_ITEMS;
use crate::rules::RuleSet;

// Re-export public API
pub use types::{
    ActionItem, Check, CheckName, SectionResult, Severity, Status, Verdict, PRIORITY_CRITICAL,
    PRIORITY_MINOR, PRIORITY_WARNING,
};

/// Evaluates both snapshots against the rule set.
///
/// Action items from both sections are stable-sorted by priority (bidding
/// items precede ads.txt items of equal priority, and each section keeps the
/// order its checks ran in), then cut to the top three.
pub fn evaluate(
    bidding: &BiddingSnapshot,
    authorization: &AuthorizationSnapshot,
    rules: &RuleSet,
) -> Verdict {
    let bidding_section = bidding::evaluate_bidding(bidding, rules);
    let authorization_section = authorization::evaluate_authorization(authorization, rules);
    let overall_status = bidding_section
        .status()
        .worst(authorization_section.status());

    let (bidding_section, mut action_items) = bidding_section.finish();
    let (authorization_section, authorization_actions) = authorization_section.finish();
    action_items.extend(authorization_actions);
    action_items.sort_by_key(|item| item.priority);
    action_items.truncate(MAX_ACTION_ITEMS);

    Verdict {
        overall_status,
        bidding_section,
        authorization_section,
        action_items,
    }
}

/// Picks the singular or plural noun for a count.
pub(crate) fn plural<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 {
        singular
    } else {
        plural
    }
}
