//! Tests for exit code policies (--fail-on flag)

use adstack_audit::ads_txt::parse_authorization_file;
use adstack_audit::{evaluate, AuthorizationSnapshot, BiddingSnapshot, FailOn, RuleSet, Status};

fn healthy_bidding() -> BiddingSnapshot {
    BiddingSnapshot {
        detected: true,
        bidders: ["appnexus", "rubicon", "ix"]
            .iter()
            .map(|b| b.to_string())
            .collect(),
        timeout_ms: Some(1500),
        library_version: Some("v8.0.0".to_string()),
        extraction_errors: Vec::new(),
    }
}

fn healthy_ads_txt() -> AuthorizationSnapshot {
    parse_authorization_file(
        "google.com, pub-1, DIRECT\nappnexus.com, 2, RESELLER\nrubiconproject.com, 3, RESELLER",
    )
}

#[test]
fn test_passing_audit_never_trips() {
    let verdict = evaluate(&healthy_bidding(), &healthy_ads_txt(), &RuleSet::default());
    assert_eq!(verdict.overall_status, Status::Pass);
    for fail_on in [FailOn::Never, FailOn::Fail, FailOn::Warning] {
        assert_eq!(fail_on.exit_code(verdict.overall_status), 0);
    }
}

#[test]
fn test_warning_audit_trips_only_warning_policy() {
    let mut ads_txt = healthy_ads_txt();
    ads_txt.duplicate_raw_lines.push("google.com, pub-1, DIRECT".to_string());
    let verdict = evaluate(&healthy_bidding(), &ads_txt, &RuleSet::default());
    assert_eq!(verdict.overall_status, Status::Warning);

    assert_eq!(FailOn::Never.exit_code(verdict.overall_status), 0);
    assert_eq!(FailOn::Fail.exit_code(verdict.overall_status), 0);
    assert_eq!(FailOn::Warning.exit_code(verdict.overall_status), 2);
}

#[test]
fn test_failing_audit_trips_fail_and_warning_policies() {
    let verdict = evaluate(
        &BiddingSnapshot::not_detected(),
        &healthy_ads_txt(),
        &RuleSet::default(),
    );
    assert_eq!(verdict.overall_status, Status::Fail);

    assert_eq!(FailOn::Never.exit_code(verdict.overall_status), 0);
    assert_eq!(FailOn::Fail.exit_code(verdict.overall_status), 2);
    assert_eq!(FailOn::Warning.exit_code(verdict.overall_status), 2);
}
