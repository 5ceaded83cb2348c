//! Issue statistics tracking.
//!
//! Thread-safe counters for the issues raised across every analysis served by
//! this process.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use crate::analyzer::{IssueType, RedirectAnalysis};

/// Thread-safe issue statistics tracker.
///
/// All issue types are initialized to zero on creation, so lookups never miss.
/// Share it across tasks with `Arc`.
pub struct IssueStats {
    issues: HashMap<IssueType, AtomicUsize>,
    batches: AtomicUsize,
    urls: AtomicUsize,
    persistence_failures: AtomicUsize,
}

impl IssueStats {
    pub fn new() -> Self {
        let mut issues = HashMap::new();
        for issue_type in IssueType::iter() {
            issues.insert(issue_type, AtomicUsize::new(0));
        }

        IssueStats {
            issues,
            batches: AtomicUsize::new(0),
            urls: AtomicUsize::new(0),
            persistence_failures: AtomicUsize::new(0),
        }
    }

    /// Increment an issue counter.
    pub fn increment_issue(&self, issue_type: IssueType) {
        if let Some(counter) = self.issues.get(&issue_type) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment issue counter for {:?} which is not in the map",
                issue_type
            );
        }
    }

    /// Records one completed batch and every issue it raised.
    pub fn record_batch(&self, analyses: &[RedirectAnalysis]) {
        self.batches.fetch_add(1, Ordering::Relaxed);
        self.urls.fetch_add(analyses.len(), Ordering::Relaxed);
        for issue in analyses.iter().flat_map(|a| a.issues.iter()) {
            self.increment_issue(issue.issue_type);
        }
    }

    pub fn record_persistence_failure(&self) {
        self.persistence_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_issue_count(&self, issue_type: IssueType) -> usize {
        self.issues
            .get(&issue_type)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    pub fn total_issues(&self) -> usize {
        self.issues.values().map(|c| c.load(Ordering::Relaxed)).sum()
    }

    pub fn batches(&self) -> usize {
        self.batches.load(Ordering::Relaxed)
    }

    pub fn urls(&self) -> usize {
        self.urls.load(Ordering::Relaxed)
    }

    pub fn persistence_failures(&self) -> usize {
        self.persistence_failures.load(Ordering::Relaxed)
    }
}

impl Default for IssueStats {
    fn default() -> Self {
        Self::new()
    }
}
