//! Issue accumulation and post-walk chain classification.

use std::time::Duration;

use super::models::{Issue, IssueType, RedirectHop, Severity};
use crate::config::{LONG_CHAIN_THRESHOLD, SLOW_CHAIN_THRESHOLD, VERY_SLOW_CHAIN_THRESHOLD};

/// Ordered issue accumulator owned by a single analysis.
#[derive(Debug, Default)]
pub(crate) struct IssueLog {
    issues: Vec<Issue>,
}

impl IssueLog {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(
        &mut self,
        issue_type: IssueType,
        severity: Severity,
        message: impl Into<String>,
    ) {
        let issue = Issue::new(issue_type, severity, message);
        log::debug!("{} ({}): {}", issue.issue_type, issue.severity, issue.message);
        self.issues.push(issue);
    }

    pub(crate) fn extend(&mut self, issues: impl IntoIterator<Item = Issue>) {
        self.issues.extend(issues);
    }

    pub(crate) fn into_vec(self) -> Vec<Issue> {
        self.issues
    }
}

/// Classifies a finished chain by length, total time and redirect codes.
pub(crate) fn classify_chain(
    chain: &[RedirectHop],
    chain_length: usize,
    total_time: Duration,
) -> Vec<Issue> {
    let mut issues = Vec::new();

    match chain_length {
        0 => {}
        1 => issues.push(Issue::new(
            IssueType::SingleRedirect,
            Severity::Low,
            "Single redirect detected",
        )),
        n if n <= LONG_CHAIN_THRESHOLD => issues.push(Issue::new(
            IssueType::RedirectChain,
            Severity::Medium,
            format!("Redirect chain with {n} hops"),
        )),
        n => issues.push(Issue::new(
            IssueType::LongRedirectChain,
            Severity::High,
            format!("Long redirect chain with {n} hops"),
        )),
    }

    if total_time > SLOW_CHAIN_THRESHOLD {
        let severity = if total_time > VERY_SLOW_CHAIN_THRESHOLD {
            Severity::High
        } else {
            Severity::Medium
        };
        issues.push(Issue::new(
            IssueType::SlowRedirects,
            severity,
            format!("Redirect chain took {}ms", total_time.as_millis()),
        ));
    }

    let has_permanent = chain.iter().any(|hop| hop.status_code == 301);
    let has_temporary = chain.iter().any(|hop| hop.status_code == 302);
    if has_permanent && has_temporary {
        issues.push(Issue::new(
            IssueType::MixedRedirectTypes,
            Severity::Low,
            "Chain mixes permanent (301) and temporary (302) redirects",
        ));
    }

    issues
}
