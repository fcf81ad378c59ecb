//! Accumulator for one section's status, issues, checks and action items.

use super::types::{ActionItem, Check, CheckName, SectionResult, Status};

/// Builds a [`SectionResult`] while checks run.
///
/// Status only ever moves towards FAIL: a WARNING never replaces a FAIL and
/// nothing returns a section to PASS.
#[derive(Debug)]
pub(super) struct SectionBuilder {
    status: Status,
    issues: Vec<String>,
    checks: Vec<Check>,
    actions: Vec<ActionItem>,
}

impl SectionBuilder {
    pub(super) fn new() -> Self {
        Self {
            status: Status::Pass,
            issues: Vec::new(),
            checks: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub(super) fn record(
        &mut self,
        name: CheckName,
        pass: bool,
        actual: impl ToString,
        expected: impl ToString,
    ) {
        self.checks.push(Check {
            name,
            pass,
            actual: actual.to_string(),
            expected: expected.to_string(),
        });
    }

    pub(super) fn fail(&mut self, issue: impl Into<String>, action: ActionItem) {
        self.raise(Status::Fail, issue.into(), action);
    }

    pub(super) fn warn(&mut self, issue: impl Into<String>, action: ActionItem) {
        self.raise(Status::Warning, issue.into(), action);
    }

    fn raise(&mut self, status: Status, issue: String, action: ActionItem) {
        self.status = self.status.worst(status);
        self.issues.push(issue);
        self.actions.push(action);
    }

    pub(super) fn status(&self) -> Status {
        self.status
    }

    /// Splits into the section result and the action items it generated.
    pub(super) fn finish(self) -> (SectionResult, Vec<ActionItem>) {
        (
            SectionResult {
                status: self.status,
                issues: self.issues,
                checks: self.checks,
            },
            self.actions,
        )
    }
}
