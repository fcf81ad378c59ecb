//! Bidding runtime inspection with bounded wait.
//!
//! This module provides:
//! - [`RuntimeSource`] implementations that capture the page's bidding object
//! - an inspector task reached through a request/response channel
//! - the timeout-with-fallback policy (`InspectorHandle::inspect`)
//! - loading of a previously saved snapshot to use as that fallback

mod channel;
mod source;

use std::path::Path;

use anyhow::{Context, Result};

use crate::bidding::BiddingSnapshot;

// Re-export public API
pub use channel::{
    inspect_once, spawn_inspector, InspectionRequest, InspectionResponse, InspectorHandle,
};
pub use source::{FileRuntimeSource, RuntimeSource, StaticRuntimeSource};

/// Loads a previously captured [`BiddingSnapshot`] from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a snapshot.
pub async fn load_last_known_snapshot(path: &Path) -> Result<BiddingSnapshot> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read last known snapshot {}", path.display()))?;
    let snapshot: BiddingSnapshot =
        serde_json::from_str(&content).context("Failed to parse last known snapshot JSON")?;
    Ok(snapshot.normalized())
}
