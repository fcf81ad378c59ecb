//! Data types for header-bidding inspection results.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// What was learned about a page's header-bidding library.
///
/// Bidder codes are case-sensitive; identity is exact string equality.
/// When `detected` is false, `bidders` is empty and both `timeout_ms` and
/// `library_version` are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiddingSnapshot {
    pub detected: bool,
    #[serde(default)]
    pub bidders: BTreeSet<String>,
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    #[serde(default)]
    pub library_version: Option<String>,
    #[serde(default)]
    pub extraction_errors: Vec<String>,
}

impl BiddingSnapshot {
    /// Snapshot for a page without a header-bidding library.
    pub fn not_detected() -> Self {
        Self::default()
    }

    /// "Not detected" snapshot carrying a single extraction error.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            extraction_errors: vec![error.into()],
            ..Self::default()
        }
    }

    /// Number of distinct bidders.
    pub fn bidder_count(&self) -> usize {
        self.bidders.len()
    }

    /// Restores the "not detected implies empty" invariant on data read from
    /// outside the process (e.g. a cached snapshot file).
    pub fn normalized(mut self) -> Self {
        if !self.detected {
            self.bidders.clear();
            self.timeout_ms = None;
            self.library_version = None;
        }
        self
    }
}

/// One realized bid response.
///
/// Both fields may name the same party (an alias bidder reports its own code).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BidResponse {
    pub bidder: Option<String>,
    pub bidder_code: Option<String>,
}

/// One statically configured ad unit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AdUnit {
    pub code: Option<String>,
    pub bids: Vec<BidConfig>,
}

/// A bidder entry within an ad unit's configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BidConfig {
    pub bidder: Option<String>,
}
