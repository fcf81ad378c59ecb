//! End-to-end audit scenarios: captured runtime JSON and ads.txt text through
//! extraction, parsing and evaluation.

use adstack_audit::ads_txt::parse_authorization_file;
use adstack_audit::analysis::CheckName;
use adstack_audit::bidding::{extract_bidding_snapshot, BiddingRuntime, JsonRuntime};
use adstack_audit::rules::parse_ruleset;
use adstack_audit::{evaluate, AuthorizationSnapshot, BiddingSnapshot, RuleSet, Severity, Status};
use serde_json::{json, Value};

fn snapshot_from(value: Value) -> BiddingSnapshot {
    let runtime = JsonRuntime::from_value(value);
    extract_bidding_snapshot(runtime.as_ref().map(|rt| rt as &dyn BiddingRuntime)).snapshot
}

fn rules(minimum: usize) -> RuleSet {
    parse_ruleset(&format!(
        r#"{{
            "minimumBidders": {},
            "maximumBidders": 6,
            "requiredBidders": [],
            "requiredAdsTxtEntries": ["google.com"],
            "timeoutRange": {{ "min": 1000, "max": 3000 }}
        }}"#,
        minimum
    ))
    .expect("valid rules")
}

#[test]
fn test_nothing_found_gives_two_critical_items() {
    let bidding = snapshot_from(Value::Null);
    let authorization = AuthorizationSnapshot::missing("ads.txt not found (404)");
    let verdict = evaluate(&bidding, &authorization, &RuleSet::default());

    assert_eq!(verdict.overall_status, Status::Fail);
    assert_eq!(verdict.action_items.len(), 2);
    assert!(verdict
        .action_items
        .iter()
        .all(|item| item.severity == Severity::Critical));
    assert!(verdict.action_items[0].message.contains("Prebid.js"));
    assert!(verdict.action_items[1].message.contains("ads.txt"));
}

#[test]
fn test_two_bidders_below_minimum_of_three() {
    let bidding = snapshot_from(json!({
        "adUnits": [
            { "code": "top", "bids": [{ "bidder": "x" }, { "bidder": "y" }] },
            { "code": "side", "bids": [{ "bidder": "x" }] }
        ]
    }));
    let authorization = parse_authorization_file("google.com, pub-1, DIRECT");
    let verdict = evaluate(&bidding, &authorization, &rules(3));

    assert_eq!(verdict.bidding_section.status, Status::Fail);
    assert_eq!(
        verdict.bidding_section.issues,
        vec!["Only 2 bidders (minimum: 3)"]
    );
    assert_eq!(
        verdict.action_items[0].message,
        "Add 1 more bidder for healthy competition"
    );
    assert_eq!(verdict.authorization_section.status, Status::Pass);
}

#[test]
fn test_duplicated_ads_txt_lines_warn_once() {
    let bidding = snapshot_from(json!({
        "adUnits": [{ "bids": [{ "bidder": "a" }, { "bidder": "b" }, { "bidder": "c" }] }]
    }));
    let authorization = parse_authorization_file(
        "google.com, pub-1, DIRECT\n\
         openx.com, 5, RESELLER\n\
         google.com, pub-1, DIRECT\n\
         openx.com, 5, RESELLER\n\
         openx.com, 5, RESELLER\n",
    );
    assert_eq!(authorization.duplicate_raw_lines.len(), 2);

    let verdict = evaluate(&bidding, &authorization, &rules(3));
    assert_eq!(verdict.authorization_section.status, Status::Warning);
    assert_eq!(
        verdict.authorization_section.issues,
        vec!["2 duplicate entries found"]
    );
    assert_eq!(verdict.overall_status, Status::Warning);
}

#[test]
fn test_strategies_union_to_distinct_bidders() {
    let capture = json!({
        "version": "v8.40.0",
        "bidResponses": {
            "top": { "bids": [{ "bidder": "appnexus", "bidderCode": "appnexus" },
                              { "bidder": "rubicon", "bidderCode": "rubiconAlias" }] }
        },
        "adUnits": [{ "code": "top", "bids": [{ "bidder": "ix" }, { "bidder": "appnexus" }] }],
        "bidderSettings": { "standard": {}, "rubicon": {}, "openx": {} },
        "config": { "bidderTimeout": 1200 }
    });
    let bidding = snapshot_from(capture);

    let bidders: Vec<&str> = bidding.bidders.iter().map(String::as_str).collect();
    assert_eq!(
        bidders,
        vec!["appnexus", "ix", "openx", "rubicon", "rubiconAlias"]
    );
    assert_eq!(bidding.timeout_ms, Some(1200));
    assert_eq!(bidding.library_version.as_deref(), Some("v8.40.0"));

    let verdict = evaluate(
        &bidding,
        &parse_authorization_file("google.com, 1, DIRECT"),
        &rules(3),
    );
    assert_eq!(verdict.overall_status, Status::Pass);
    let count = verdict
        .bidding_section
        .check(CheckName::BidderCount)
        .expect("bidder count check");
    assert_eq!(count.actual, "5");
}

#[test]
fn test_broken_strategy_does_not_hide_other_bidders() {
    let bidding = snapshot_from(json!({
        "bidResponses": "not an object",
        "adUnits": [{ "bids": [{ "bidder": "appnexus" }] }]
    }));
    assert!(bidding.detected);
    assert_eq!(bidding.bidder_count(), 1);
    // Cleared because a bidder was found
    assert!(bidding.extraction_errors.is_empty());
}

#[test]
fn test_many_problems_keep_three_highest_priority_actions() {
    let bidding = snapshot_from(json!({
        "adUnits": [{ "bids": [{ "bidder": "solo" }] }],
        "config": { "bidderTimeout": 9000 }
    }));
    let authorization = parse_authorization_file("a.com,1,DIRECT\na.com,1,DIRECT");
    let rules = RuleSet {
        required_bidders: vec!["appnexus".into()],
        ..rules(3)
    };
    let verdict = evaluate(&bidding, &authorization, &rules);

    assert_eq!(verdict.action_items.len(), 3);
    let priorities: Vec<u8> = verdict.action_items.iter().map(|i| i.priority).collect();
    assert_eq!(priorities, vec![1, 2, 2]);
    assert_eq!(verdict.action_items[2].message, "Add to ads.txt: google.com");
}

#[test]
fn test_float_timeout_is_still_checked() {
    let bidding = snapshot_from(json!({
        "adUnits": [{ "bids": [{ "bidder": "a" }, { "bidder": "b" }, { "bidder": "c" }] }],
        "config": { "bidderTimeout": 5000.0 }
    }));
    assert_eq!(bidding.timeout_ms, Some(5000));

    let verdict = evaluate(
        &bidding,
        &parse_authorization_file("google.com, 1, DIRECT"),
        &rules(3),
    );
    assert_eq!(verdict.bidding_section.status, Status::Warning);
    assert_eq!(
        verdict.bidding_section.issues,
        vec!["Timeout 5000ms is outside recommended range (1000-3000ms)"]
    );
}
