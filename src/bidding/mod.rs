//! Header-bidding library inspection.
//!
//! This module provides:
//! - [`BiddingRuntime`] - read-only view of the page's bidding library object
//! - [`JsonRuntime`] - a runtime captured as JSON
//! - `extract_bidding_snapshot()` - merges the three bidder discovery strategies

mod extract;
mod runtime;
mod types;

// Re-export public API
pub use extract::{extract_bidding_snapshot, Extraction};
pub use runtime::{BiddingRuntime, JsonRuntime};
pub use types::{AdUnit, BidConfig, BidResponse, BiddingSnapshot};
