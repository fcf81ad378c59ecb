//! ads.txt parsing.
//!
//! Parsing is permissive by default: records with fewer than three
//! comma-separated fields are dropped from `entries` without being reported.
//! Strict mode keeps the same entries but records the dropped line numbers.

use std::collections::HashSet;

use super::types::{AuthorizationEntry, AuthorizationSnapshot, FetchOutcome};
use crate::config::HTTP_STATUS_NOT_FOUND;

/// Parser switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Record line numbers of malformed records in `malformed_lines`
    pub strict: bool,
}

/// Parses ads.txt content with default (permissive) options.
pub fn parse_authorization_file(content: &str) -> AuthorizationSnapshot {
    parse_authorization_file_with(content, ParseOptions::default())
}

/// Parses ads.txt content.
///
/// Every non-blank, non-comment line takes part in duplicate detection,
/// including lines too short to become an entry. Line numbers count every
/// line of the input.
pub fn parse_authorization_file_with(content: &str, options: ParseOptions) -> AuthorizationSnapshot {
    let mut entries = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut duplicates: Vec<String> = Vec::new();
    let mut duplicate_set: HashSet<&str> = HashSet::new();
    let mut malformed_lines = Vec::new();

    for (index, raw_line) in content.split('\n').enumerate() {
        let line = trim_line(raw_line);
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if !seen.insert(line) && duplicate_set.insert(line) {
            duplicates.push(line.to_string());
        }

        let fields: Vec<&str> = line.split(',').map(trim_line).collect();
        if fields.len() < 3 {
            if options.strict {
                malformed_lines.push(index + 1);
            }
            continue;
        }

        entries.push(AuthorizationEntry {
            seller_domain: fields[0].to_string(),
            publisher_account_id: fields[1].to_string(),
            account_type: fields[2].to_string(),
            certification_authority_id: fields
                .get(3)
                .filter(|field| !field.is_empty())
                .map(|field| field.to_string()),
            source_line_number: index + 1,
        });
    }

    AuthorizationSnapshot {
        exists: true,
        entries,
        duplicate_raw_lines: duplicates,
        fetch_error: None,
        malformed_lines,
    }
}

/// Maps the fetch collaborator's result into a snapshot.
///
/// Only a successful fetch with a body is parsed; every other outcome yields
/// `exists = false` with a fetch error describing why.
pub fn snapshot_from_fetch(outcome: &FetchOutcome, options: ParseOptions) -> AuthorizationSnapshot {
    match (outcome.ok, outcome.body.as_deref(), outcome.status_code) {
        (true, Some(body), _) => parse_authorization_file_with(body, options),
        (true, None, _) => AuthorizationSnapshot::missing("Fetch error: empty response"),
        (false, _, Some(HTTP_STATUS_NOT_FOUND)) => {
            AuthorizationSnapshot::missing("ads.txt not found (404)")
        }
        (false, _, Some(status)) => AuthorizationSnapshot::missing(format!("HTTP error: {}", status)),
        (false, _, None) => AuthorizationSnapshot::missing(format!(
            "Fetch error: {}",
            outcome.error_message.as_deref().unwrap_or("unknown error")
        )),
    }
}

/// Trims whitespace and a leading byte order mark.
fn trim_line(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}
