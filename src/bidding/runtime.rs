//! Access to a page's header-bidding runtime object.
//!
//! [`BiddingRuntime`] is the seam between the extraction merger and whatever
//! captured the live object. Every accessor copies values out, so a runtime
//! that mutates between calls (an auction completing mid-read) never leaves
//! the merger holding a live reference.

use serde_json::{Map, Value};

use super::types::{AdUnit, BidConfig, BidResponse};
use crate::error_handling::ExtractionError;

/// Read-only view of a header-bidding library's runtime state.
///
/// Accessors return `Ok(vec![])` when the underlying data is simply absent
/// and `Err` when it is present but unreadable.
pub trait BiddingRuntime {
    /// Library version string, if exposed.
    fn version(&self) -> Option<String>;

    /// Realized bid responses across all ad slots.
    fn bid_responses(&self) -> Result<Vec<BidResponse>, ExtractionError>;

    /// Statically configured ad units.
    fn ad_units(&self) -> Result<Vec<AdUnit>, ExtractionError>;

    /// Keys of the per-bidder settings registry, including reserved ones.
    fn bidder_settings_keys(&self) -> Result<Vec<String>, ExtractionError>;

    /// Global bidder timeout from the configuration accessor.
    ///
    /// `Ok(None)` when no accessor exists or the value is absent, zero or
    /// non-numeric.
    fn bidder_timeout(&self) -> Result<Option<u64>, ExtractionError>;
}

/// A runtime captured as JSON.
///
/// The expected layout mirrors the Prebid.js global:
///
/// ```json
/// {
///   "version": "v8.40.0",
///   "bidResponses": { "div-top": { "bids": [{ "bidder": "appnexus", "bidderCode": "appnexus" }] } },
///   "adUnits": [{ "code": "div-top", "bids": [{ "bidder": "rubicon" }] }],
///   "bidderSettings": { "standard": {}, "ix": {} },
///   "config": { "bidderTimeout": 1500 }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct JsonRuntime {
    root: Map<String, Value>,
}

impl JsonRuntime {
    /// Wraps a captured runtime object.
    ///
    /// Returns `None` when there is no object to inspect (`null` or a
    /// non-object value), which callers treat as "library not detected".
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(root) => Some(Self { root }),
            _ => None,
        }
    }

    fn field(&self, name: &str) -> Option<&Value> {
        self.root.get(name).filter(|value| !value.is_null())
    }
}

fn string_field(object: &Map<String, Value>, name: &str) -> Option<String> {
    object
        .get(name)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl BiddingRuntime for JsonRuntime {
    fn version(&self) -> Option<String> {
        self.field("version")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    fn bid_responses(&self) -> Result<Vec<BidResponse>, ExtractionError> {
        let Some(value) = self.field("bidResponses") else {
            return Ok(Vec::new());
        };
        let slots = value.as_object().ok_or(ExtractionError::UnexpectedShape {
            field: "bidResponses",
            expected: "an object keyed by ad slot",
        })?;

        let mut responses = Vec::new();
        for slot in slots.values() {
            // getBidResponses() wraps each slot as { bids: [...] }; accept a bare array too
            let bids = match slot {
                Value::Object(wrapper) => wrapper.get("bids").and_then(Value::as_array),
                Value::Array(bids) => Some(bids),
                _ => None,
            }
            .ok_or(ExtractionError::UnexpectedShape {
                field: "bidResponses",
                expected: "a bids array per ad slot",
            })?;

            responses.extend(bids.iter().filter_map(Value::as_object).map(|bid| {
                BidResponse {
                    bidder: string_field(bid, "bidder"),
                    bidder_code: string_field(bid, "bidderCode"),
                }
            }));
        }
        Ok(responses)
    }

    fn ad_units(&self) -> Result<Vec<AdUnit>, ExtractionError> {
        let Some(value) = self.field("adUnits") else {
            return Ok(Vec::new());
        };
        let units = value.as_array().ok_or(ExtractionError::UnexpectedShape {
            field: "adUnits",
            expected: "an array",
        })?;

        Ok(units
            .iter()
            .filter_map(Value::as_object)
            .map(|unit| AdUnit {
                code: string_field(unit, "code"),
                bids: unit
                    .get("bids")
                    .and_then(Value::as_array)
                    .map(|bids| {
                        bids.iter()
                            .filter_map(Value::as_object)
                            .map(|bid| BidConfig {
                                bidder: string_field(bid, "bidder"),
                            })
                            .collect()
                    })
                    .unwrap_or_default(),
            })
            .collect())
    }

    fn bidder_settings_keys(&self) -> Result<Vec<String>, ExtractionError> {
        let Some(value) = self.field("bidderSettings") else {
            return Ok(Vec::new());
        };
        let settings = value.as_object().ok_or(ExtractionError::UnexpectedShape {
            field: "bidderSettings",
            expected: "an object keyed by bidder code",
        })?;
        Ok(settings.keys().cloned().collect())
    }

    fn bidder_timeout(&self) -> Result<Option<u64>, ExtractionError> {
        let Some(config) = self.field("config") else {
            return Ok(None);
        };
        let config = config.as_object().ok_or(ExtractionError::UnexpectedShape {
            field: "config",
            expected: "an object",
        })?;
        Ok(config
            .get("bidderTimeout")
            .and_then(timeout_millis)
            .filter(|timeout| *timeout > 0))
    }
}

/// Reads a timeout in milliseconds from any positive JSON number.
///
/// Capture tools may serialize `5000` as `5000.0`; fractional values are
/// rounded to the nearest millisecond.
fn timeout_millis(value: &Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|millis| millis.is_finite() && *millis > 0.0)
            .map(|millis| millis.round() as u64)
    })
}
