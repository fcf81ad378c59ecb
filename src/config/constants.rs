//! Configuration constants.
//!
//! This module defines the constants used throughout the application,
//! including timeouts, size limits, retry policy and reserved names.

use std::time::Duration;

/// Path of the authorization file relative to the site root.
pub const ADS_TXT_PATH: &str = "/ads.txt";

/// Domain label used for pages loaded from the local filesystem.
pub const LOCAL_FILE_DOMAIN: &str = "localhost (file://)";

/// Domain label used when a page URL carries no hostname.
pub const UNKNOWN_DOMAIN: &str = "unknown";

/// Fetch error recorded when the ads.txt lookup is skipped for a local file.
pub const SKIPPED_LOCAL_FILE: &str = "Skipped for local file";

// Network operation timeouts
/// Default HTTP request timeout in seconds for the ads.txt fetch.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Default bounded wait for a bidding runtime inspection.
///
/// Past this the caller falls back to the last known snapshot, or to a
/// "not detected" snapshot carrying [`INSPECTION_TIMEOUT_ERROR`].
pub const DEFAULT_INSPECTION_TIMEOUT: Duration = Duration::from_millis(2000);

/// Extraction error recorded when an inspection times out without a fallback.
pub const INSPECTION_TIMEOUT_ERROR: &str = "Timeout waiting for Prebid data";

/// Queue depth of the inspection request channel.
pub const INSPECTION_CHANNEL_CAPACITY: usize = 8;

/// Default User-Agent string for HTTP requests.
///
/// Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

// Response and body size limits
/// Maximum ads.txt body size in bytes (1MB).
/// Larger responses are reported as a fetch error instead of being parsed.
pub const MAX_ADS_TXT_BODY_SIZE: usize = 1024 * 1024;

// Retry strategy
/// Exponential backoff base in milliseconds (delay n is `base^n * factor`).
pub const RETRY_BACKOFF_BASE_MS: u64 = 2;
/// Backoff multiplier: with base 2 this gives delays of 500ms, 1s, 2s...
pub const RETRY_FACTOR: u64 = 250;
/// Maximum delay between retries in seconds.
pub const RETRY_MAX_DELAY_SECS: u64 = 5;
/// Maximum number of retries after the initial attempt.
pub const RETRY_MAX_ATTEMPTS: usize = 2;

/// HTTP status code for Not Found.
pub const HTTP_STATUS_NOT_FOUND: u16 = 404;
/// HTTP status code for Too Many Requests (retriable).
pub const HTTP_STATUS_TOO_MANY_REQUESTS: u16 = 429;

// Analysis
/// Number of action items kept in a verdict.
pub const MAX_ACTION_ITEMS: usize = 3;

/// Reserved key of the bidder settings registry holding defaults for all bidders.
pub const STANDARD_BIDDER_SETTINGS_KEY: &str = "standard";
