//! ads.txt (authorized digital sellers) handling.
//!
//! This module provides:
//! - `parse_authorization_file()` - pure parser producing an [`AuthorizationSnapshot`]
//! - `snapshot_from_fetch()` - maps a fetch result (404, other status, network error) into a snapshot
//! - `fetch_authorization_file()` - HTTP collaborator with retry for transient failures

mod fetch;
mod parse;
mod types;

// Re-export public API
pub use fetch::{
    ads_txt_url, fetch_authorization_file, fetch_authorization_file_from_url, get_retry_strategy,
};
pub use parse::{
    parse_authorization_file, parse_authorization_file_with, snapshot_from_fetch, ParseOptions,
};
pub use types::{AccountType, AuthorizationEntry, AuthorizationSnapshot, FetchOutcome};
