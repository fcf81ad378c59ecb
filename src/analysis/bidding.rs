//! Header-bidding section checks.

use super::section::SectionBuilder;
use super::types::{ActionItem, CheckName, PRIORITY_MINOR, PRIORITY_WARNING};
use super::plural;
use crate::bidding::BiddingSnapshot;
use crate::rules::RuleSet;

/// Runs the bidding checks in order: detection, bidder count, required
/// bidders, timeout.
pub(super) fn evaluate_bidding(bidding: &BiddingSnapshot, rules: &RuleSet) -> SectionBuilder {
    let mut section = SectionBuilder::new();

    section.record(CheckName::Detected, bidding.detected, bidding.detected, true);
    if !bidding.detected {
        section.fail(
            "Prebid.js not detected on this page",
            ActionItem::critical("Install Prebid.js to enable header bidding"),
        );
        return section;
    }

    let count = bidding.bidder_count();
    let expected_count = format!("{}-{}", rules.minimum_bidders, rules.maximum_bidders);
    if count < rules.minimum_bidders {
        let shortfall = rules.minimum_bidders - count;
        section.record(CheckName::BidderCount, false, count, &expected_count);
        section.fail(
            format!(
                "Only {} {} (minimum: {})",
                count,
                plural(count, "bidder", "bidders"),
                rules.minimum_bidders
            ),
            ActionItem::critical(format!(
                "Add {} more {} for healthy competition",
                shortfall,
                plural(shortfall, "bidder", "bidders")
            )),
        );
    } else if count > rules.maximum_bidders {
        let excess = count - rules.maximum_bidders;
        section.record(CheckName::BidderCount, false, count, &expected_count);
        section.warn(
            format!(
                "Too many bidders ({}, maximum: {})",
                count, rules.maximum_bidders
            ),
            ActionItem::warning(
                PRIORITY_WARNING,
                format!(
                    "Remove {} {} to improve page performance",
                    excess,
                    plural(excess, "bidder", "bidders")
                ),
            ),
        );
    } else {
        section.record(CheckName::BidderCount, true, count, &expected_count);
    }

    let missing: Vec<&str> = rules
        .required_bidders
        .iter()
        .filter(|required| !bidding.bidders.contains(required.as_str()))
        .map(String::as_str)
        .collect();
    let missing_list = missing.join(", ");
    section.record(
        CheckName::RequiredBidders,
        missing.is_empty(),
        if missing.is_empty() {
            "none missing"
        } else {
            missing_list.as_str()
        },
        rules.required_bidders.join(", "),
    );
    if !missing.is_empty() {
        section.warn(
            format!("Missing recommended bidders: {}", missing_list),
            ActionItem::warning(
                PRIORITY_WARNING,
                format!("Add recommended bidders: {}", missing_list),
            ),
        );
    }

    if let Some(timeout) = bidding.timeout_ms.filter(|t| *t > 0) {
        let range = rules.timeout_range_ms;
        let expected_range = format!("{}-{}ms", range.min, range.max);
        let within = range.contains(timeout);
        section.record(
            CheckName::Timeout,
            within,
            format!("{}ms", timeout),
            &expected_range,
        );
        if !within {
            let recommendation = if timeout < range.min {
                format!("increase to {}ms", range.min)
            } else {
                format!("reduce to {}ms", range.max)
            };
            section.warn(
                format!(
                    "Timeout {}ms is outside recommended range ({})",
                    timeout, expected_range
                ),
                ActionItem::warning(
                    PRIORITY_MINOR,
                    format!(
                        "Adjust bidder timeout: {} (currently {}ms)",
                        recommendation, timeout
                    ),
                ),
            );
        }
    }

    section
}
