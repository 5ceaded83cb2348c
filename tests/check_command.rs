//! Tests for the `check` command flow and its exit-code policy.

use std::io::Write;

use clap::Parser;
use tempfile::{NamedTempFile, TempDir};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use redirect_audit::app::{exceeds_threshold, run_check};
use redirect_audit::config::{CheckOpt, Command, Opt};
use redirect_audit::FailOn;

fn parse_check(args: &[&str]) -> CheckOpt {
    let mut argv = vec!["redirect_audit", "--log-level", "error", "check"];
    argv.extend_from_slice(args);
    match Opt::try_parse_from(argv).expect("check options should parse").command {
        Command::Check(check) => check,
        Command::Serve(_) => panic!("expected check command"),
    }
}

async fn start_loop_upstream() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/loop"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/loop"))
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/ok"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_check_reads_file_and_stores_report() {
    let upstream = start_loop_upstream().await;
    let dir = TempDir::new().expect("Failed to create temp directory");
    let db_path = dir.path().join("check.db");

    let mut input = NamedTempFile::new().expect("Failed to create temp file");
    writeln!(input, "# upstream endpoints").expect("Failed to write URL");
    writeln!(input, "{}/loop", upstream.uri()).expect("Failed to write URL");
    writeln!(input).expect("Failed to write URL");
    input.flush().expect("Failed to flush file");

    let ok_url = format!("{}/ok", upstream.uri());
    let input_path = input.path().to_string_lossy().to_string();
    let db_arg = db_path.to_string_lossy().to_string();
    let opt = parse_check(&[
        ok_url.as_str(),
        "--file",
        input_path.as_str(),
        "--db-path",
        db_arg.as_str(),
        "--timeout-seconds",
        "2",
    ]);

    let report = run_check(&opt).await.expect("check should succeed");

    assert_eq!(report.summary.total_urls, 2);
    assert_eq!(report.summary.urls_with_loops, 1);
    assert_eq!(report.analyses[0].start_url, ok_url);
    assert!(report.analyses[1].has_loop);
    assert!(report.analysis_id.is_some());
    assert!(db_path.exists());

    assert!(exceeds_threshold(&report.analyses, FailOn::Critical));
    assert!(!exceeds_threshold(&report.analyses, FailOn::Never));
}

#[tokio::test]
async fn test_check_without_db_path_does_not_store() {
    let upstream = start_loop_upstream().await;
    let ok_url = format!("{}/ok", upstream.uri());
    let opt = parse_check(&[ok_url.as_str()]);

    let report = run_check(&opt).await.expect("check should succeed");

    assert_eq!(report.summary.total_urls, 1);
    assert_eq!(report.summary.total_issues, 0);
    assert_eq!(report.analysis_id, None);
    assert!(!exceeds_threshold(&report.analyses, FailOn::Low));
}
