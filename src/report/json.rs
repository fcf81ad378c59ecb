//! JSON report.

use super::AuditReport;

/// Serializes the whole report as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error only if serialization fails, which the report types do
/// not trigger in practice.
pub fn render_json(report: &AuditReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
