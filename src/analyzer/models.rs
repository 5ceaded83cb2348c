//! Redirect analysis data structures.
//!
//! Field names serialize in camelCase so reports can be handed straight to a
//! browser client.

use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

/// One request/response pair within a redirect chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectHop {
    /// URL requested for this hop
    pub url: String,
    /// HTTP status observed
    pub status_code: u16,
    /// `Location` header value, if any
    pub location: Option<String>,
    /// Time taken by this hop in milliseconds
    pub elapsed_ms: u64,
    /// Scheme of `url` with trailing colon (`http:` or `https:`)
    pub protocol: String,
}

/// Issue severity, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational, e.g. a single redirect
    Low,
    /// Worth fixing, e.g. a short chain or a slow one
    Medium,
    /// Broken or risky, e.g. an error status or a downgrade
    High,
    /// Redirect loop
    Critical,
}

impl Severity {
    /// Lowercase wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kinds of anomalies recorded against a redirect chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    // Walk termination
    /// A URL was revisited within the same chain
    RedirectLoop,
    /// An HTTPS URL redirected to HTTP
    ProtocolDowngrade,
    /// `Location` could not be resolved to an http(s) URL
    InvalidRedirect,
    /// Non-2xx response that is not a usable redirect
    ErrorStatus,
    /// The request itself failed (connect error, timeout, bad URL)
    FetchError,
    /// Hop budget ran out while still redirecting
    MaxRedirectsExceeded,
    // Chain classification
    /// Exactly one redirect
    SingleRedirect,
    /// Two or three redirects
    RedirectChain,
    /// More than three redirects
    LongRedirectChain,
    /// Chain took longer than a second in total
    SlowRedirects,
    /// Chain contains both 301 and 302 responses
    MixedRedirectTypes,
}

impl IssueType {
    /// Snake-case wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueType::RedirectLoop => "redirect_loop",
            IssueType::ProtocolDowngrade => "protocol_downgrade",
            IssueType::InvalidRedirect => "invalid_redirect",
            IssueType::ErrorStatus => "error_status",
            IssueType::FetchError => "fetch_error",
            IssueType::MaxRedirectsExceeded => "max_redirects_exceeded",
            IssueType::SingleRedirect => "single_redirect",
            IssueType::RedirectChain => "redirect_chain",
            IssueType::LongRedirectChain => "long_redirect_chain",
            IssueType::SlowRedirects => "slow_redirects",
            IssueType::MixedRedirectTypes => "mixed_redirect_types",
        }
    }
}

impl std::fmt::Display for IssueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified anomaly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Issue kind, serialized as `type`
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    /// How serious the issue is
    pub severity: Severity,
    /// Human-readable detail
    pub message: String,
}

impl Issue {
    /// Builds an issue.
    pub fn new(issue_type: IssueType, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            issue_type,
            severity,
            message: message.into(),
        }
    }
}

/// Result of following one start URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectAnalysis {
    /// URL the walk started from
    pub start_url: String,
    /// Cursor when the walk stopped
    pub final_url: String,
    /// Hops in fetch order
    pub chain: Vec<RedirectHop>,
    /// Redirects before the terminal response (the terminal hop is not counted)
    pub chain_length: usize,
    /// Sum of the hops' `elapsed_ms`
    pub total_time_ms: u64,
    /// Whether a URL was revisited
    pub has_loop: bool,
    /// First repeated URL, when a loop was detected
    pub loop_urls: Vec<String>,
    /// Issues in the order they were raised
    pub issues: Vec<Issue>,
}

impl RedirectAnalysis {
    /// Whether an issue of `issue_type` was raised.
    pub fn has_issue(&self, issue_type: IssueType) -> bool {
        self.issues.iter().any(|i| i.issue_type == issue_type)
    }

    /// Most severe issue recorded, if any.
    pub fn max_severity(&self) -> Option<Severity> {
        self.issues.iter().map(|i| i.severity).max()
    }
}
