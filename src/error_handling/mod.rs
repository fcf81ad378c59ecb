//! Error handling.
//!
//! This module provides the error type definitions shared across the crate:
//! - Initialization failures (logger, HTTP client)
//! - Rule set loading and validation failures
//! - Per-strategy bidder extraction failures
//! - Inspection round-trip failures
//! - Page target resolution failures

mod types;

// Re-export public API
pub use types::{
    ExtractionError, InitializationError, InspectionError, RulesetError, TargetError,
};
