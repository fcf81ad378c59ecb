//! Data types for parsed ads.txt files.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Relationship declared in the third field of an ads.txt record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum AccountType {
    /// The publisher directly controls the seller account
    Direct,
    /// The seller resells inventory on the publisher's behalf
    Reseller,
}

/// One authorized seller record.
///
/// Field values are stored exactly as they appear in the file (trimmed, but
/// not case-normalized).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationEntry {
    /// Domain of the advertising system (field 1)
    pub seller_domain: String,
    /// Publisher's account id on that system (field 2)
    pub publisher_account_id: String,
    /// DIRECT or RESELLER, any case (field 3)
    pub account_type: String,
    /// Certification authority id (optional field 4)
    pub certification_authority_id: Option<String>,
    /// 1-based line number in the file, counting blank and comment lines
    pub source_line_number: usize,
}

impl AuthorizationEntry {
    /// Parses the account type case-insensitively; `None` for unknown values.
    pub fn relationship(&self) -> Option<AccountType> {
        self.account_type.parse().ok()
    }
}

/// Outcome of fetching and parsing a site's ads.txt file.
///
/// When `exists` is false, `entries` and `duplicate_raw_lines` are empty and
/// `fetch_error` usually says why.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationSnapshot {
    pub exists: bool,
    pub entries: Vec<AuthorizationEntry>,
    /// Trimmed lines that occur more than once, each listed once, in the order
    /// their second occurrence was seen.
    pub duplicate_raw_lines: Vec<String>,
    pub fetch_error: Option<String>,
    /// Line numbers of records with fewer than three fields. Only populated
    /// in strict mode.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub malformed_lines: Vec<usize>,
}

impl AuthorizationSnapshot {
    /// Snapshot for a file that could not be obtained.
    pub fn missing(error: impl Into<String>) -> Self {
        Self {
            fetch_error: Some(error.into()),
            ..Self::default()
        }
    }

    /// Lower-cased set of seller domains across all entries.
    pub fn seller_domains(&self) -> HashSet<String> {
        self.entries
            .iter()
            .map(|entry| entry.seller_domain.to_lowercase())
            .collect()
    }

    /// Number of entries declaring the given relationship.
    pub fn count_relationship(&self, account_type: AccountType) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.relationship() == Some(account_type))
            .count()
    }
}

/// Result of the ads.txt fetch collaborator.
///
/// `ok` is true only for a 2xx response whose body was read. A 404 is kept
/// distinguishable from other statuses through `status_code`; network-level
/// failures carry no status and an `error_message`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FetchOutcome {
    pub ok: bool,
    pub status_code: Option<u16>,
    pub body: Option<String>,
    pub error_message: Option<String>,
}

impl FetchOutcome {
    /// Successful fetch with a body.
    pub fn success(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            ok: true,
            status_code: Some(status_code),
            body: Some(body.into()),
            error_message: None,
        }
    }

    /// Non-2xx response.
    pub fn http_status(status_code: u16) -> Self {
        Self {
            status_code: Some(status_code),
            ..Self::default()
        }
    }

    /// Transport failure before any usable response.
    pub fn network_error(message: impl Into<String>) -> Self {
        Self {
            error_message: Some(message.into()),
            ..Self::default()
        }
    }
}
