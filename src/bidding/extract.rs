//! Bidder extraction merger.
//!
//! Three strategies discover bidders and their results are unioned:
//! - realized bid responses (both `bidder` and `bidderCode`)
//! - static ad unit configuration
//! - the bidder settings registry, minus the reserved `standard` key
//!
//! Each strategy fails independently. A failure is recorded and the remaining
//! strategies still run.

use std::collections::BTreeSet;

use log::debug;

use super::runtime::BiddingRuntime;
use super::types::BiddingSnapshot;
use crate::config::STANDARD_BIDDER_SETTINGS_KEY;
use crate::error_handling::ExtractionError;

/// Result of running the extraction merger.
///
/// `snapshot.extraction_errors` follows the public policy (cleared once any
/// bidder was found); `raw_errors` keeps every strategy failure for
/// diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub snapshot: BiddingSnapshot,
    pub raw_errors: Vec<String>,
}

/// Builds a [`BiddingSnapshot`] from a runtime, if one is present.
pub fn extract_bidding_snapshot(runtime: Option<&dyn BiddingRuntime>) -> Extraction {
    let Some(runtime) = runtime else {
        return Extraction {
            snapshot: BiddingSnapshot::not_detected(),
            raw_errors: Vec::new(),
        };
    };

    let mut bidders = BTreeSet::new();
    let mut errors = Vec::new();

    match collect_from_bid_responses(runtime) {
        Ok(found) => merge("bid responses", found, &mut bidders),
        Err(e) => errors.push(format!("Bid responses: {}", e)),
    }
    match collect_from_ad_units(runtime) {
        Ok(found) => merge("ad units", found, &mut bidders),
        Err(e) => errors.push(format!("Ad units: {}", e)),
    }
    match collect_from_bidder_settings(runtime) {
        Ok(found) => merge("bidder settings", found, &mut bidders),
        Err(e) => errors.push(format!("Bidder settings: {}", e)),
    }

    let timeout_ms = match runtime.bidder_timeout() {
        Ok(timeout) => timeout,
        Err(e) => {
            errors.push(format!("Config: {}", e));
            None
        }
    };

    let raw_errors = errors.clone();
    // A partial success that produced bidders is not reported as an error state
    if !bidders.is_empty() {
        errors.clear();
    }

    Extraction {
        snapshot: BiddingSnapshot {
            detected: true,
            bidders,
            timeout_ms,
            library_version: runtime.version(),
            extraction_errors: errors,
        },
        raw_errors,
    }
}

fn merge(strategy: &str, found: Vec<String>, bidders: &mut BTreeSet<String>) {
    debug!("Found {} bidder(s) from {}", found.len(), strategy);
    bidders.extend(found);
}

fn collect_from_bid_responses(
    runtime: &dyn BiddingRuntime,
) -> Result<Vec<String>, ExtractionError> {
    Ok(runtime
        .bid_responses()?
        .into_iter()
        .flat_map(|response| [response.bidder, response.bidder_code])
        .flatten()
        .collect())
}

fn collect_from_ad_units(runtime: &dyn BiddingRuntime) -> Result<Vec<String>, ExtractionError> {
    Ok(runtime
        .ad_units()?
        .into_iter()
        .flat_map(|unit| unit.bids)
        .filter_map(|bid| bid.bidder)
        .collect())
}

fn collect_from_bidder_settings(
    runtime: &dyn BiddingRuntime,
) -> Result<Vec<String>, ExtractionError> {
    Ok(runtime
        .bidder_settings_keys()?
        .into_iter()
        .filter(|key| key != STANDARD_BIDDER_SETTINGS_KEY)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bidding::runtime::JsonRuntime;
    use crate::bidding::types::{AdUnit, BidConfig, BidResponse};
    use serde_json::json;

    /// Runtime whose strategies can be made to fail individually.
    #[derive(Default)]
    struct StubRuntime {
        responses: Option<Vec<BidResponse>>,
        units: Option<Vec<AdUnit>>,
        settings: Option<Vec<String>>,
    }

    fn failure(field: &'static str) -> ExtractionError {
        ExtractionError::ReadFailed {
            field,
            message: "threw".to_string(),
        }
    }

    impl BiddingRuntime for StubRuntime {
        fn version(&self) -> Option<String> {
            Some("9.0.0".to_string())
        }
        fn bid_responses(&self) -> Result<Vec<BidResponse>, ExtractionError> {
            self.responses.clone().ok_or_else(|| failure("getBidResponses"))
        }
        fn ad_units(&self) -> Result<Vec<AdUnit>, ExtractionError> {
            self.units.clone().ok_or_else(|| failure("adUnits"))
        }
        fn bidder_settings_keys(&self) -> Result<Vec<String>, ExtractionError> {
            self.settings.clone().ok_or_else(|| failure("bidderSettings"))
        }
        fn bidder_timeout(&self) -> Result<Option<u64>, ExtractionError> {
            Ok(Some(1200))
        }
    }

    fn names(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_absent_runtime_is_not_detected() {
        let extraction = extract_bidding_snapshot(None);
        assert_eq!(extraction.snapshot, BiddingSnapshot::not_detected());
        assert!(extraction.raw_errors.is_empty());
    }

    #[test]
    fn test_union_across_strategies_collapses_duplicates() {
        let rt = JsonRuntime::from_value(json!({
            "version": "v8.1.0",
            "bidResponses": { "top": { "bids": [
                { "bidder": "appnexus", "bidderCode": "appnexus" },
                { "bidder": "rubicon", "bidderCode": "rubiconAlias" }
            ] } },
            "adUnits": [{ "code": "top", "bids": [{ "bidder": "rubicon" }, { "bidder": "ix" }] }],
            "bidderSettings": { "standard": {}, "ix": {}, "openx": {} },
            "config": { "bidderTimeout": 1500 }
        }))
        .expect("object runtime");

        let extraction = extract_bidding_snapshot(Some(&rt));
        let snapshot = extraction.snapshot;
        assert!(snapshot.detected);
        assert_eq!(
            snapshot.bidders,
            names(&["appnexus", "ix", "openx", "rubicon", "rubiconAlias"])
        );
        assert_eq!(snapshot.timeout_ms, Some(1500));
        assert_eq!(snapshot.library_version.as_deref(), Some("v8.1.0"));
        assert!(snapshot.extraction_errors.is_empty());
    }

    #[test]
    fn test_standard_settings_key_is_excluded() {
        let stub = StubRuntime {
            responses: Some(Vec::new()),
            units: Some(Vec::new()),
            settings: Some(vec!["standard".to_string(), "Standard".to_string()]),
        };
        let snapshot = extract_bidding_snapshot(Some(&stub)).snapshot;
        // Only the exact reserved key is dropped; bidder codes are case-sensitive
        assert_eq!(snapshot.bidders, names(&["Standard"]));
    }

    #[test]
    fn test_failed_strategy_does_not_abort_others_and_errors_clear_on_success() {
        let stub = StubRuntime {
            responses: None,
            units: Some(vec![AdUnit {
                code: Some("top".to_string()),
                bids: vec![BidConfig {
                    bidder: Some("appnexus".to_string()),
                }],
            }]),
            settings: None,
        };
        let extraction = extract_bidding_snapshot(Some(&stub));
        assert_eq!(extraction.snapshot.bidders, names(&["appnexus"]));
        assert!(extraction.snapshot.extraction_errors.is_empty());
        assert_eq!(extraction.raw_errors.len(), 2);
        assert!(extraction.raw_errors[0].starts_with("Bid responses:"));
        assert!(extraction.raw_errors[1].starts_with("Bidder settings:"));
    }

    #[test]
    fn test_errors_kept_when_no_bidders_found() {
        let stub = StubRuntime::default();
        let extraction = extract_bidding_snapshot(Some(&stub));
        assert!(extraction.snapshot.detected);
        assert!(extraction.snapshot.bidders.is_empty());
        assert_eq!(extraction.snapshot.extraction_errors.len(), 3);
        assert_eq!(extraction.snapshot.extraction_errors, extraction.raw_errors);
        assert_eq!(extraction.snapshot.timeout_ms, Some(1200));
    }

    #[test]
    fn test_strategy_order_does_not_change_result() {
        let a = StubRuntime {
            responses: Some(vec![BidResponse {
                bidder: Some("x".to_string()),
                bidder_code: Some("y".to_string()),
            }]),
            units: Some(vec![AdUnit {
                code: None,
                bids: vec![BidConfig {
                    bidder: Some("z".to_string()),
                }],
            }]),
            settings: Some(vec!["x".to_string()]),
        };
        let b = StubRuntime {
            responses: Some(vec![BidResponse {
                bidder: Some("z".to_string()),
                bidder_code: None,
            }]),
            units: Some(vec![AdUnit {
                code: None,
                bids: vec![BidConfig {
                    bidder: Some("x".to_string()),
                }],
            }]),
            settings: Some(vec!["y".to_string(), "z".to_string()]),
        };
        let first = extract_bidding_snapshot(Some(&a)).snapshot;
        let second = extract_bidding_snapshot(Some(&b)).snapshot;
        assert_eq!(first.bidders, second.bidders);
        assert_eq!(first.bidder_count(), 3);
    }
}
