//! One-shot analysis for the `check` command.

use std::time::Instant;

use anyhow::{bail, Result};
use log::{error, info, warn};

use super::input::read_url_lines;
use super::statistics::{print_issue_statistics, print_simple_summary};
use super::url::validate_and_normalize_url;
use crate::analyzer::RedirectAnalysis;
use crate::batch::{analyze_batch, summarize};
use crate::config::{CheckOpt, Config, FailOn, MAX_REDIRECTS_CEILING};
use crate::error_handling::IssueStats;
use crate::initialization::{init_analyzer, init_store};
use crate::server::AnalyzeData;
use crate::storage::{AnalysisStore, NewAnalysisRecord};

/// Analyzes the URLs named on the command line (and in `--file`) as one batch.
///
/// The report is also stored when `--db-path` is set; a storage failure is
/// logged and leaves `analysis_id` empty.
///
/// # Errors
///
/// Fails if the input file cannot be read, no valid URL remains after
/// normalization, or the HTTP client cannot be built.
pub async fn run_check(opt: &CheckOpt) -> Result<AnalyzeData> {
    let mut raw_urls = opt.urls.clone();
    if let Some(path) = &opt.file {
        raw_urls.extend(read_url_lines(path).await?);
    }

    let urls: Vec<String> = raw_urls
        .iter()
        .filter_map(|u| validate_and_normalize_url(u))
        .collect();
    if urls.is_empty() {
        bail!("No valid URLs to analyze");
    }

    let mut config = Config {
        timeout_seconds: opt.client.timeout_seconds,
        user_agent: opt.client.user_agent.clone(),
        max_concurrency: opt.client.max_concurrency.max(1),
        default_max_redirects: opt.max_redirects.min(MAX_REDIRECTS_CEILING),
        ..Default::default()
    };
    if let Some(db_path) = &opt.db_path {
        config.db_path = db_path.clone();
    }

    let analyzer = init_analyzer(&config)?;
    let start = Instant::now();
    let analyses = analyze_batch(
        &analyzer,
        &urls,
        config.default_max_redirects,
        config.max_concurrency,
    )
    .await;
    let summary = summarize(&analyses);

    let stats = IssueStats::new();
    stats.record_batch(&analyses);
    print_simple_summary(&summary, start.elapsed().as_secs_f64());
    print_issue_statistics(&stats);

    let analysis_id = if opt.db_path.is_some() {
        let record = NewAnalysisRecord {
            analyzed_urls: &urls,
            summary: &summary,
            analyses: &analyses,
            created_at_ms: chrono::Utc::now().timestamp_millis(),
        };
        match init_store(&config).await {
            Ok(store) => match store.store(&record).await {
                Ok(id) => {
                    info!("Stored analysis {id} in {}", config.db_path.display());
                    Some(id)
                }
                Err(e) => {
                    error!("Failed to store analysis: {e}");
                    None
                }
            },
            Err(e) => {
                warn!("Database unavailable, report not stored: {e:#}");
                None
            }
        }
    } else {
        None
    };

    Ok(AnalyzeData {
        summary,
        analyses,
        analysis_id,
    })
}

/// Whether any analysis carries an issue at or above the `fail_on` threshold.
pub fn exceeds_threshold(analyses: &[RedirectAnalysis], fail_on: FailOn) -> bool {
    match fail_on.threshold() {
        Some(threshold) => analyses
            .iter()
            .filter_map(RedirectAnalysis::max_severity)
            .any(|severity| severity >= threshold),
        None => false,
    }
}
