//! adstack_audit library: header-bidding and ads.txt auditing
//!
//! This library inspects a page's programmatic advertising setup. It reads the
//! page's header-bidding (Prebid.js) configuration, fetches and parses the
//! site's ads.txt file, and evaluates both against a rule set to produce a
//! prioritized verdict.
//!
//! The evaluator itself is a pure function ([`evaluate`]); everything around
//! it (fetching, inspection, rendering) feeds it or consumes its output.
//!
//! # Example
//!
//! ```no_run
//! use adstack_audit::{run_audit, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     url: "https://www.example.com/".to_string(),
//!     runtime_snapshot: Some("pbjs.json".into()),
//!     ..Default::default()
//! };
//!
//! let report = run_audit(config).await?;
//! println!("{}: {}", report.domain, report.verdict.overall_status);
//! for item in &report.verdict.action_items {
//!     println!("{}. {}", item.priority, item.message);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

pub mod ads_txt;
pub mod analysis;
pub mod bidding;
pub mod config;
pub mod domain;
pub mod error_handling;
pub mod initialization;
pub mod inspect;
pub mod report;
pub mod rules;

// Re-export public API
pub use ads_txt::{parse_authorization_file, AuthorizationEntry, AuthorizationSnapshot};
pub use analysis::{evaluate, ActionItem, Severity, Status, Verdict};
pub use bidding::BiddingSnapshot;
pub use config::{Config, FailOn, LogFormat, LogLevel, OutputFormat};
pub use report::{render_json, render_text, AuditReport};
pub use rules::RuleSet;
pub use run::run_audit;

// Internal run module (orchestrates one audit)
mod run {
    use std::time::{Duration, Instant};

    use anyhow::{Context, Result};
    use log::{debug, info, warn};

    use crate::ads_txt::{
        fetch_authorization_file, snapshot_from_fetch, AuthorizationSnapshot, ParseOptions,
    };
    use crate::analysis::evaluate;
    use crate::config::{Config, SKIPPED_LOCAL_FILE};
    use crate::domain::{resolve_target, PageTarget};
    use crate::initialization::init_client;
    use crate::inspect::{
        load_last_known_snapshot, spawn_inspector, FileRuntimeSource, StaticRuntimeSource,
    };
    use crate::report::AuditReport;
    use crate::rules::load_ruleset;

    /// Audits one page with the provided configuration.
    ///
    /// This is the main entry point for the library. The ads.txt fetch and
    /// the bidding inspection run concurrently; neither failing aborts the
    /// run, since both failures are part of the verdict.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The rule file cannot be loaded or is invalid
    /// - The URL cannot be parsed or is a browser-internal page
    /// - The last known snapshot file cannot be loaded
    /// - The HTTP client cannot be initialized
    pub async fn run_audit(config: Config) -> Result<AuditReport> {
        let start_time = Instant::now();

        let rules = load_ruleset(config.rules.as_deref())
            .await
            .context("Failed to load rule set")?;
        let target = resolve_target(&config.url)?;
        info!("Auditing {} ({})", config.url, target.display_domain());

        let last_known = match config.last_known_snapshot.as_deref() {
            Some(path) => Some(load_last_known_snapshot(path).await?),
            None => None,
        };

        let (inspector, inspector_task) = match config.runtime_snapshot.as_deref() {
            Some(path) => spawn_inspector(FileRuntimeSource::new(path)),
            None => {
                debug!("No runtime snapshot given; bidding library treated as absent");
                spawn_inspector(StaticRuntimeSource::new(None))
            }
        };

        let options = ParseOptions {
            strict: config.strict_ads_txt,
        };
        let client = match &target {
            PageTarget::Remote { .. } => {
                Some(init_client(&config).context("Failed to initialize HTTP client")?)
            }
            PageTarget::LocalFile => None,
        };

        let authorization = async {
            match (&target, client.as_deref()) {
                (PageTarget::Remote { hostname }, Some(client)) => {
                    let outcome = fetch_authorization_file(client, hostname).await;
                    let snapshot = snapshot_from_fetch(&outcome, options);
                    match &snapshot.fetch_error {
                        Some(error) => warn!("ads.txt unavailable for {}: {}", hostname, error),
                        None => info!(
                            "Fetched ads.txt for {}: {} entries, {} duplicate line(s)",
                            hostname,
                            snapshot.entries.len(),
                            snapshot.duplicate_raw_lines.len()
                        ),
                    }
                    snapshot
                }
                _ => AuthorizationSnapshot::missing(SKIPPED_LOCAL_FILE),
            }
        };
        let wait = Duration::from_millis(config.inspection_timeout_ms);
        let bidding = inspector.inspect(wait, last_known.as_ref());

        let (authorization, bidding) = tokio::join!(authorization, bidding);

        // A capture still running after a timeout is abandoned
        drop(inspector);
        inspector_task.abort();

        let verdict = evaluate(&bidding, &authorization, &rules);
        info!(
            "Overall status {} with {} action item(s)",
            verdict.overall_status,
            verdict.action_items.len()
        );

        Ok(AuditReport {
            domain: target.display_domain().to_string(),
            url: config.url,
            verdict,
            bidding,
            authorization,
            elapsed_seconds: start_time.elapsed().as_secs_f64(),
        })
    }
}
