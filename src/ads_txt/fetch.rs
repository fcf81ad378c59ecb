//! ads.txt fetching.
//!
//! Transient failures (connection errors, timeouts, 5xx, 429) are retried with
//! exponential backoff. Everything else, including 404, is final on the first
//! attempt. Failures never escape as errors: they come back as a
//! [`FetchOutcome`] describing what went wrong.

use std::time::Duration;

use log::{debug, info, warn};
use tokio_retry::strategy::ExponentialBackoff;
use tokio_retry::Retry;

use super::types::FetchOutcome;
use crate::config::{
    ADS_TXT_PATH, HTTP_STATUS_TOO_MANY_REQUESTS, MAX_ADS_TXT_BODY_SIZE, RETRY_FACTOR,
    RETRY_BACKOFF_BASE_MS, RETRY_MAX_ATTEMPTS, RETRY_MAX_DELAY_SECS,
};

/// Builds the ads.txt URL for a hostname.
pub fn ads_txt_url(domain: &str) -> String {
    format!("https://{}{}", domain, ADS_TXT_PATH)
}

/// Creates the exponential backoff retry strategy for ads.txt fetches.
///
/// Yields at most `RETRY_MAX_ATTEMPTS` delays, so a fetch makes at most
/// `RETRY_MAX_ATTEMPTS + 1` requests.
pub fn get_retry_strategy() -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(RETRY_BACKOFF_BASE_MS)
        .factor(RETRY_FACTOR)
        .max_delay(Duration::from_secs(RETRY_MAX_DELAY_SECS))
        .take(RETRY_MAX_ATTEMPTS)
}

/// Fetches `https://<domain>/ads.txt`.
pub async fn fetch_authorization_file(client: &reqwest::Client, domain: &str) -> FetchOutcome {
    let url = ads_txt_url(domain);
    info!("Fetching ads.txt from {}", url);
    fetch_authorization_file_from_url(client, &url).await
}

/// Fetches an ads.txt file from an explicit URL.
pub async fn fetch_authorization_file_from_url(client: &reqwest::Client, url: &str) -> FetchOutcome {
    // Err carries a retriable outcome; once retries run out it is returned as-is
    let outcome = match Retry::spawn(get_retry_strategy(), || attempt_fetch(client, url)).await {
        Ok(outcome) | Err(outcome) => outcome,
    };

    if outcome.ok {
        debug!(
            "ads.txt fetched from {} ({} bytes)",
            url,
            outcome.body.as_ref().map(String::len).unwrap_or(0)
        );
    } else {
        warn!(
            "ads.txt fetch from {} failed: status={:?} error={:?}",
            url, outcome.status_code, outcome.error_message
        );
    }
    outcome
}

/// Makes a single request.
///
/// Returns `Err` only for outcomes worth retrying.
async fn attempt_fetch(client: &reqwest::Client, url: &str) -> Result<FetchOutcome, FetchOutcome> {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            let outcome = FetchOutcome::network_error(e.to_string());
            return if e.is_timeout() || e.is_connect() || e.is_request() {
                debug!("Retriable network error fetching {}: {}", url, e);
                Err(outcome)
            } else {
                Ok(outcome)
            };
        }
    };

    let status = response.status();
    if !status.is_success() {
        let outcome = FetchOutcome::http_status(status.as_u16());
        return if is_retriable_status(status.as_u16()) {
            debug!("Retriable status {} fetching {}", status, url);
            Err(outcome)
        } else {
            Ok(outcome)
        };
    }

    if let Some(length) = response.content_length() {
        if usize::try_from(length).map_or(true, |length| length > MAX_ADS_TXT_BODY_SIZE) {
            return Ok(body_too_large());
        }
    }

    match read_body_capped(response, MAX_ADS_TXT_BODY_SIZE).await {
        Ok(Some(body)) => Ok(FetchOutcome::success(status.as_u16(), body)),
        Ok(None) => Ok(body_too_large()),
        Err(e) => Ok(FetchOutcome::network_error(e.to_string())),
    }
}

/// Reads the body chunk by chunk, giving up once it exceeds `limit` bytes.
///
/// Returns `Ok(None)` for an oversized body. Invalid UTF-8 is replaced rather
/// than rejected.
async fn read_body_capped(
    mut response: reqwest::Response,
    limit: usize,
) -> Result<Option<String>, reqwest::Error> {
    let mut body: Vec<u8> = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        if body.len() + chunk.len() > limit {
            return Ok(None);
        }
        body.extend_from_slice(&chunk);
    }
    Ok(Some(String::from_utf8_lossy(&body).into_owned()))
}

fn is_retriable_status(status: u16) -> bool {
    status == HTTP_STATUS_TOO_MANY_REQUESTS || (500..600).contains(&status)
}

fn body_too_large() -> FetchOutcome {
    FetchOutcome::network_error(format!(
        "ads.txt exceeds maximum size of {} bytes",
        MAX_ADS_TXT_BODY_SIZE
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use httptest::{matchers::*, responders::*, Expectation, Server};

    #[test]
    fn test_ads_txt_url() {
        assert_eq!(ads_txt_url("example.com"), "https://example.com/ads.txt");
    }

    #[test]
    fn test_retry_strategy_is_bounded() {
        let delays: Vec<Duration> = get_retry_strategy().collect();
        assert_eq!(delays.len(), RETRY_MAX_ATTEMPTS);
        assert!(delays
            .iter()
            .all(|d| *d <= Duration::from_secs(RETRY_MAX_DELAY_SECS)));
    }

    #[test]
    fn test_is_retriable_status() {
        assert!(is_retriable_status(429));
        assert!(is_retriable_status(500));
        assert!(is_retriable_status(503));
        assert!(!is_retriable_status(404));
        assert!(!is_retriable_status(403));
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/ads.txt"))
                .respond_with(status_code(200).body("google.com, pub-1, DIRECT\n")),
        );

        let client = reqwest::Client::new();
        let outcome =
            fetch_authorization_file_from_url(&client, &server.url_str("/ads.txt")).await;
        assert!(outcome.ok);
        assert_eq!(outcome.status_code, Some(200));
        assert_eq!(outcome.body.as_deref(), Some("google.com, pub-1, DIRECT\n"));
    }

    #[tokio::test]
    async fn test_fetch_not_found_is_not_retried() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/ads.txt"))
                .times(1)
                .respond_with(status_code(404)),
        );

        let client = reqwest::Client::new();
        let outcome =
            fetch_authorization_file_from_url(&client, &server.url_str("/ads.txt")).await;
        assert!(!outcome.ok);
        assert_eq!(outcome.status_code, Some(404));
    }

    #[tokio::test]
    async fn test_fetch_server_error_is_retried() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/ads.txt"))
                .times(RETRY_MAX_ATTEMPTS + 1)
                .respond_with(status_code(503)),
        );

        let client = reqwest::Client::new();
        let outcome =
            fetch_authorization_file_from_url(&client, &server.url_str("/ads.txt")).await;
        assert!(!outcome.ok);
        assert_eq!(outcome.status_code, Some(503));
    }

    #[tokio::test]
    async fn test_fetch_recovers_after_transient_error() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/ads.txt"))
                .times(2)
                .respond_with(httptest::cycle![
                    status_code(502),
                    status_code(200).body("appnexus.com, 1, RESELLER"),
                ]),
        );

        let client = reqwest::Client::new();
        let outcome =
            fetch_authorization_file_from_url(&client, &server.url_str("/ads.txt")).await;
        assert!(outcome.ok);
        assert_eq!(outcome.body.as_deref(), Some("appnexus.com, 1, RESELLER"));
    }

    #[tokio::test]
    async fn test_fetch_oversized_body_is_rejected() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/ads.txt"))
                .respond_with(status_code(200).body("a".repeat(MAX_ADS_TXT_BODY_SIZE + 1))),
        );

        let client = reqwest::Client::new();
        let outcome =
            fetch_authorization_file_from_url(&client, &server.url_str("/ads.txt")).await;
        assert!(!outcome.ok);
        assert_eq!(outcome.status_code, None);
        assert!(outcome
            .error_message
            .as_deref()
            .is_some_and(|e| e.contains("exceeds maximum size")));
    }

    #[tokio::test]
    async fn test_read_body_capped_stops_at_limit() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/ads.txt"))
                .times(2)
                .respond_with(status_code(200).body("google.com, pub-1, DIRECT\n")),
        );

        let client = reqwest::Client::new();
        let url = server.url_str("/ads.txt");
        let response = client.get(&url).send().await.expect("request succeeds");
        let body = read_body_capped(response, 8).await.expect("readable body");
        assert_eq!(body, None);

        let response = client.get(&url).send().await.expect("request succeeds");
        let body = read_body_capped(response, 1024).await.expect("readable body");
        assert_eq!(body.as_deref(), Some("google.com, pub-1, DIRECT\n"));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        // Bind then drop a listener so the port is very likely closed
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
            listener.local_addr().expect("addr").port()
        };
        let client = reqwest::Client::new();
        let outcome = fetch_authorization_file_from_url(
            &client,
            &format!("http://127.0.0.1:{}/ads.txt", port),
        )
        .await;
        assert!(!outcome.ok);
        assert_eq!(outcome.status_code, None);
        assert!(outcome.error_message.is_some());
    }
}
