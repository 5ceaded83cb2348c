//! HTTP redirect chain analysis.
//!
//! This module follows redirect chains manually, one hop at a time, so every
//! intermediate URL and status is recorded. Loops, protocol downgrades and
//! unusual chains are reported as issues rather than errors: `analyze` always
//! returns a report, so one bad URL never aborts a batch.

mod classify;
mod models;
mod resolve;
mod transport;


use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use log::debug;
use url::Url;

use classify::{classify_chain, IssueLog};
pub use models::{Issue, IssueType, RedirectAnalysis, RedirectHop, Severity};
pub use resolve::{protocol_of, resolve_location};
pub use transport::{Clock, HopResponse, HopTransport, ReqwestTransport, SystemClock};

/// Follows redirect chains through a `HopTransport`.
///
/// Cheap to clone; the transport and clock are shared.
#[derive(Clone)]
pub struct RedirectAnalyzer {
    transport: Arc<dyn HopTransport>,
    clock: Arc<dyn Clock>,
}

/// Why the hop loop stopped.
enum WalkEnd {
    /// Reached a 2xx response, or stopped on an issue that was already recorded
    Stopped,
    /// Still following a redirect when the hop budget ran out
    BudgetExhausted,
}

impl RedirectAnalyzer {
    /// Creates an analyzer that measures hops with the system clock.
    pub fn new(transport: Arc<dyn HopTransport>) -> Self {
        Self {
            transport,
            clock: Arc::new(SystemClock::new()),
        }
    }

    /// Replaces the clock used to measure hop durations.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Follows redirects from `start_url` for at most `max_redirects` hops.
    ///
    /// Each hop is requested once. A URL seen earlier in the same chain is a
    /// loop; a 2xx response ends the chain; any other non-redirect status,
    /// an unresolvable `Location`, or a transport failure ends it with an
    /// issue. The finished chain is then classified by length, total time and
    /// the mix of 301/302 codes.
    pub async fn analyze(&self, start_url: &str, max_redirects: usize) -> RedirectAnalysis {
        let mut visited: HashSet<String> = HashSet::new();
        let mut chain: Vec<RedirectHop> = Vec::new();
        let mut issues = IssueLog::new();
        let mut loop_urls: Vec<String> = Vec::new();
        let mut total_time_ms: u64 = 0;
        let mut current = start_url.to_string();
        let mut end = WalkEnd::Stopped;

        for hop_index in 0..max_redirects {
            if !visited.insert(visit_key(&current)) {
                issues.push(
                    IssueType::RedirectLoop,
                    Severity::Critical,
                    format!("Redirect loop detected at {current}"),
                );
                loop_urls.push(current.clone());
                end = WalkEnd::Stopped;
                break;
            }

            let current_url = match Url::parse(&current) {
                Ok(url) => url,
                Err(e) => {
                    issues.push(
                        IssueType::FetchError,
                        Severity::High,
                        format!("Failed to fetch {current}: invalid URL: {e}"),
                    );
                    end = WalkEnd::Stopped;
                    break;
                }
            };

            let started = self.clock.now();
            let response = match self.transport.fetch(&current).await {
                Ok(response) => response,
                Err(e) => {
                    issues.push(
                        IssueType::FetchError,
                        Severity::High,
                        format!("Failed to fetch {current}: {e}"),
                    );
                    end = WalkEnd::Stopped;
                    break;
                }
            };
            let elapsed = self.clock.now().saturating_sub(started);
            let elapsed_ms = duration_ms(elapsed);
            total_time_ms = total_time_ms.saturating_add(elapsed_ms);

            debug!(
                "Hop {} for {}: {} -> {} ({}ms)",
                hop_index + 1,
                start_url,
                current,
                response.status,
                elapsed_ms
            );

            let location = response
                .location
                .as_deref()
                .map(str::trim)
                .filter(|loc| !loc.is_empty())
                .map(str::to_string);

            chain.push(RedirectHop {
                url: current.clone(),
                status_code: response.status,
                location: response.location.clone(),
                elapsed_ms,
                protocol: protocol_of(&current_url),
            });

            match (response.status, location) {
                (300..=399, Some(loc)) => {
                    let target = match resolve_location(&current_url, &loc) {
                        Ok(target) if matches!(target.scheme(), "http" | "https") => target,
                        Ok(target) => {
                            issues.push(
                                IssueType::InvalidRedirect,
                                Severity::High,
                                format!(
                                    "Redirect from {current} to unsupported scheme '{}'",
                                    target.scheme()
                                ),
                            );
                            end = WalkEnd::Stopped;
                            break;
                        }
                        Err(e) => {
                            issues.push(
                                IssueType::InvalidRedirect,
                                Severity::High,
                                format!("Invalid redirect location '{loc}' from {current}: {e}"),
                            );
                            end = WalkEnd::Stopped;
                            break;
                        }
                    };

                    if current_url.scheme() == "https" && target.scheme() == "http" {
                        issues.push(
                            IssueType::ProtocolDowngrade,
                            Severity::High,
                            format!("Redirect downgrades HTTPS to HTTP: {current} -> {target}"),
                        );
                    }

                    current = target.to_string();
                    end = WalkEnd::BudgetExhausted;
                }
                (200..=299, _) => {
                    end = WalkEnd::Stopped;
                    break;
                }
                (status, _) => {
                    issues.push(
                        IssueType::ErrorStatus,
                        Severity::High,
                        format!("HTTP {status} at {current}"),
                    );
                    end = WalkEnd::Stopped;
                    break;
                }
            }
        }

        if let WalkEnd::BudgetExhausted = end {
            issues.push(
                IssueType::MaxRedirectsExceeded,
                Severity::Medium,
                format!(
                    "Stopped after {max_redirects} hops without reaching a final response; next URL was {current}"
                ),
            );
        }

        let chain_length = chain.len().saturating_sub(1);
        issues.extend(classify_chain(
            &chain,
            chain_length,
            Duration::from_millis(total_time_ms),
        ));

        RedirectAnalysis {
            start_url: start_url.to_string(),
            final_url: current,
            has_loop: !loop_urls.is_empty(),
            loop_urls,
            chain_length,
            total_time_ms,
            chain,
            issues: issues.into_vec(),
        }
    }
}

/// Normalized form used for loop detection, so `https://a.test` and
/// `https://a.test/` count as the same URL.
fn visit_key(url: &str) -> String {
    Url::parse(url)
        .map(String::from)
        .unwrap_or_else(|_| url.to_string())
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
