//! Page target resolution.
//!
//! Turns the URL of the page being audited into the hostname whose ads.txt
//! file is fetched, and classifies pages that cannot be audited normally:
//! - `file://` pages are audited without an ads.txt lookup
//! - browser-internal pages (`chrome://`, `about:` ...) are rejected

use crate::config::{LOCAL_FILE_DOMAIN, UNKNOWN_DOMAIN};
use crate::error_handling::TargetError;

/// Schemes of browser-internal pages that have no ad stack.
const INTERNAL_SCHEMES: &[&str] = &[
    "about",
    "chrome",
    "chrome-extension",
    "edge",
    "moz-extension",
    "view-source",
];

/// A resolved page to audit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageTarget {
    /// A page served over HTTP(S); its ads.txt lives on `hostname`.
    Remote {
        /// Hostname used for the ads.txt lookup
        hostname: String,
    },
    /// A page loaded from the local filesystem; ads.txt is skipped.
    LocalFile,
}

impl PageTarget {
    /// Domain label shown in the report.
    pub fn display_domain(&self) -> &str {
        match self {
            PageTarget::Remote { hostname } => hostname,
            PageTarget::LocalFile => LOCAL_FILE_DOMAIN,
        }
    }
}

/// Resolves a page URL into a [`PageTarget`].
///
/// The hostname is taken verbatim from the parsed URL (the `url` crate already
/// lower-cases it); `www.` is kept because ads.txt must be served from the
/// exact host the page lives on.
///
/// # Errors
///
/// Returns `TargetError::InvalidUrl` if the URL cannot be parsed, and
/// `TargetError::InternalPage` for browser-internal schemes.
pub fn resolve_target(url: &str) -> Result<PageTarget, TargetError> {
    let parsed = url::Url::parse(url.trim()).map_err(|e| TargetError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    let scheme = parsed.scheme();
    if INTERNAL_SCHEMES.contains(&scheme) {
        return Err(TargetError::InternalPage(scheme.to_string()));
    }
    if scheme == "file" {
        return Ok(PageTarget::LocalFile);
    }

    let hostname = match parsed.host_str() {
        Some(host) if !host.is_empty() => host.to_string(),
        _ => UNKNOWN_DOMAIN.to_string(),
    };
    Ok(PageTarget::Remote { hostname })
}
