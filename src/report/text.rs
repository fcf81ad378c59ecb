//! Plain-text report.

use std::fmt::Write;

use colored::*;

use super::AuditReport;
use crate::ads_txt::AccountType;
use crate::analysis::{CheckName, SectionResult, Severity, Status};

fn status_emoji(status: Status) -> &'static str {
    match status {
        Status::Pass => "✅",
        Status::Warning => "⚠️",
        Status::Fail => "❌",
    }
}

fn paint(text: String, status: Status) -> ColoredString {
    match status {
        Status::Pass => text.green(),
        Status::Warning => text.yellow(),
        Status::Fail => text.red(),
    }
}

fn check_mark(section: &SectionResult, name: CheckName, failed: &'static str) -> &'static str {
    match section.check(name) {
        Some(check) if check.pass => "✅",
        Some(_) => failed,
        None => "",
    }
}

fn write_issues(out: &mut String, issues: &[String]) {
    if issues.is_empty() {
        return;
    }
    let _ = writeln!(out, "  {}", "Issues:".yellow());
    for issue in issues {
        let _ = writeln!(out, "    • {}", issue);
    }
}

fn write_checks(out: &mut String, section: &SectionResult) {
    if section.checks.is_empty() {
        return;
    }
    let _ = writeln!(out, "  Checks:");
    for check in &section.checks {
        let _ = writeln!(
            out,
            "    {} {}: {} (expected {})",
            if check.pass { "✅" } else { "❌" },
            check.name,
            check.actual,
            check.expected
        );
    }
}

fn write_errors(out: &mut String, errors: &[String]) {
    for error in errors {
        let _ = writeln!(out, "  Error: {}", error);
    }
}

/// Renders the report for a terminal.
///
/// Colouring follows `colored`'s global settings, so it switches off for
/// `NO_COLOR` and non-tty output.
pub fn render_text(report: &AuditReport) -> String {
    let verdict = &report.verdict;
    let mut out = String::new();

    let banner = format!(
        "{} {}",
        status_emoji(verdict.overall_status),
        verdict.overall_status
    );
    let _ = writeln!(out, "{}", paint(banner, verdict.overall_status).bold());
    let _ = writeln!(out, "{} {}", "Domain:".bold(), report.domain);
    let _ = writeln!(out);

    if !verdict.action_items.is_empty() {
        let _ = writeln!(out, "{}", "Top Priority Actions:".bold());
        for (index, item) in verdict.action_items.iter().enumerate() {
            let icon = match item.severity {
                Severity::Critical => "🔴",
                Severity::Warning => "⚠️",
            };
            let _ = writeln!(out, "  {}. {} {}", index + 1, icon, item.message);
        }
        let _ = writeln!(out);
    }

    // Prebid section
    let section = &verdict.bidding_section;
    let _ = writeln!(
        out,
        "{} {}",
        "Prebid.js:".bold(),
        status_emoji(section.status)
    );
    let bidding = &report.bidding;
    if bidding.detected {
        let _ = writeln!(
            out,
            "  Version: {}",
            bidding.library_version.as_deref().unwrap_or("Unknown")
        );
        let bidders: Vec<&str> = bidding.bidders.iter().map(String::as_str).collect();
        let _ = writeln!(
            out,
            "  Bidders: {} {} ({})",
            bidding.bidder_count(),
            check_mark(section, CheckName::BidderCount, "❌"),
            bidders.join(", ")
        );
        match bidding.timeout_ms.filter(|t| *t > 0) {
            Some(timeout) => {
                let _ = writeln!(
                    out,
                    "  Timeout: {}ms {}",
                    timeout,
                    check_mark(section, CheckName::Timeout, "⚠️")
                );
            }
            None => {
                let _ = writeln!(out, "  Timeout: Not set");
            }
        }
        write_errors(&mut out, &bidding.extraction_errors);
        write_issues(&mut out, &section.issues);
    } else {
        let _ = writeln!(out, "  ❌ Not detected");
        write_errors(&mut out, &bidding.extraction_errors);
    }
    write_checks(&mut out, section);
    let _ = writeln!(out);

    // ads.txt section
    let section = &verdict.authorization_section;
    let _ = writeln!(
        out,
        "{} {}",
        "ads.txt:".bold(),
        status_emoji(section.status)
    );
    let authorization = &report.authorization;
    if authorization.exists {
        let _ = writeln!(
            out,
            "  Entries: {} ({}: {}, {}: {})",
            authorization.entries.len(),
            AccountType::Direct,
            authorization.count_relationship(AccountType::Direct),
            AccountType::Reseller,
            authorization.count_relationship(AccountType::Reseller)
        );
        let _ = writeln!(
            out,
            "  Required SSPs: {}",
            check_mark(section, CheckName::RequiredEntries, "⚠️")
        );
        if !authorization.duplicate_raw_lines.is_empty() {
            let _ = writeln!(
                out,
                "  Duplicates: {} ⚠️",
                authorization.duplicate_raw_lines.len()
            );
        }
        if !authorization.malformed_lines.is_empty() {
            let lines: Vec<String> = authorization
                .malformed_lines
                .iter()
                .map(|line| line.to_string())
                .collect();
            let _ = writeln!(out, "  Malformed lines: {}", lines.join(", "));
        }
        write_issues(&mut out, &section.issues);
    } else {
        let _ = writeln!(out, "  ❌ Not found");
        if let Some(error) = authorization
            .fetch_error
            .as_deref()
            .filter(|e| !e.contains("Skipped"))
        {
            let _ = writeln!(out, "  Error: {}", error);
        }
    }
    write_checks(&mut out, section);

    out
}
