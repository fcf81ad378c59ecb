//! Verdict data model.

use serde::Serialize;
use strum_macros::{Display, EnumIter};

/// Outcome of a section or of the whole audit.
///
/// Ordered from best to worst, so `max` picks the more severe status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Display, EnumIter,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Status {
    Pass,
    Warning,
    Fail,
}

impl Status {
    /// The more severe of two statuses.
    pub fn worst(self, other: Status) -> Status {
        self.max(other)
    }
}

/// Severity label of an action item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Severity {
    Critical,
    Warning,
}

/// Priority of critical action items.
pub const PRIORITY_CRITICAL: u8 = 1;
/// Priority of warning action items.
pub const PRIORITY_WARNING: u8 = 2;
/// Priority of minor action items.
pub const PRIORITY_MINOR: u8 = 3;

/// A prioritized remediation suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    /// 1 = critical, 2 = warning, 3 = minor
    pub priority: u8,
    pub severity: Severity,
    pub message: String,
}

impl ActionItem {
    pub fn critical(message: impl Into<String>) -> Self {
        Self {
            priority: PRIORITY_CRITICAL,
            severity: Severity::Critical,
            message: message.into(),
        }
    }

    pub fn warning(priority: u8, message: impl Into<String>) -> Self {
        Self {
            priority,
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

/// Names of the individual checks recorded in a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum CheckName {
    Detected,
    BidderCount,
    RequiredBidders,
    Timeout,
    Exists,
    RequiredEntries,
    Duplicates,
}

/// One named pass/fail sub-result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Check {
    pub name: CheckName,
    pub pass: bool,
    pub actual: String,
    pub expected: String,
}

/// Result for one audited area (bidding or ads.txt).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionResult {
    pub status: Status,
    pub issues: Vec<String>,
    pub checks: Vec<Check>,
}

impl SectionResult {
    /// Looks up a recorded check by name.
    pub fn check(&self, name: CheckName) -> Option<&Check> {
        self.checks.iter().find(|check| check.name == name)
    }
}

/// Complete audit outcome.
///
/// `action_items` holds at most three items sorted by ascending priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub overall_status: Status,
    pub bidding_section: SectionResult,
    pub authorization_section: SectionResult,
    pub action_items: Vec<ActionItem>,
}
