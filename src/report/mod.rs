//! Audit report rendering.
//!
//! This module provides:
//! - [`AuditReport`] - the verdict together with the snapshots it was computed from
//! - `render_text()` - coloured, human-readable report
//! - `render_json()` - pretty-printed JSON document

mod json;
mod text;

use serde::Serialize;

use crate::ads_txt::AuthorizationSnapshot;
use crate::analysis::Verdict;
use crate::bidding::BiddingSnapshot;

// Re-export public API
pub use json::render_json;
pub use text::render_text;

/// Everything produced by one audit run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    /// Domain label of the audited page
    pub domain: String,
    /// Page URL as given
    pub url: String,
    /// Evaluation result
    pub verdict: Verdict,
    /// Bidding data the verdict was computed from
    pub bidding: BiddingSnapshot,
    /// ads.txt data the verdict was computed from
    pub authorization: AuthorizationSnapshot,
    /// Wall-clock duration of the run
    pub elapsed_seconds: f64,
}
