//! Error type definitions.
//!
//! This module defines the typed errors raised at module seams. Transport and
//! extraction failures are converted into snapshot strings before they reach
//! the analysis engine; these types describe how they fail on the way there.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Error types for loading and validating a rule set.
#[derive(Error, Debug)]
pub enum RulesetError {
    /// The rule file could not be read.
    #[error("Failed to read rule file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The rule file is not valid JSON for a rule set.
    #[error("Failed to parse rule set JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The rule set parsed but violates an invariant.
    #[error("Invalid rule set: {0}")]
    Invalid(String),
}

/// Error raised by a single bidder extraction strategy.
///
/// Each strategy fails independently; the merger records the message and
/// carries on with the remaining strategies.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// A runtime field exists but does not have the expected shape.
    #[error("{field}: expected {expected}")]
    UnexpectedShape {
        field: &'static str,
        expected: &'static str,
    },

    /// The runtime reported a failure while reading a field.
    #[error("{field}: {message}")]
    ReadFailed {
        field: &'static str,
        message: String,
    },
}

/// Error types for a bidding runtime inspection round-trip.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum InspectionError {
    /// No response arrived within the bounded wait.
    #[error("Inspection timed out after {0}ms")]
    Timeout(u64),

    /// The inspector task is gone (channel closed or reply dropped).
    #[error("Inspector unavailable")]
    Closed,

    /// A response arrived for a different request.
    #[error("Inspection response id {got} does not match request id {expected}")]
    CorrelationMismatch { expected: u64, got: u64 },
}

/// Error types for resolving the page to audit.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TargetError {
    /// The page URL could not be parsed.
    #[error("Invalid page URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Browser-internal pages have no ad stack to audit.
    #[error("Cannot run on browser internal pages ({0})")]
    InternalPage(String),
}
