mod common;

use std::time::Duration;

use ficoscan::pipeline::events::ScanStatus;
use ficoscan::report::{self, Report, ReportFormat};

use common::{run_scan, test_config, write_fixture};

#[test]
fn single_worker_finds_keyword() {
    let fixture = write_fixture(b"alpha beta FICO gamma");
    let cfg = test_config("single_match", 1, Duration::from_secs(60));
    let outcome = run_scan(&cfg, &fixture);

    assert_eq!(outcome.results.len(), 1);
    let result = &outcome.results[0];
    assert_eq!(result.status, ScanStatus::Matched);
    // "alpha " + "beta " + "FICO "
    assert_eq!(result.byte_count, 16);
    let elapsed = result.elapsed.expect("elapsed for match");
    assert!(elapsed > Duration::ZERO);
    assert!(elapsed < Duration::from_secs(60));
}

#[test]
fn single_worker_without_keyword() {
    let fixture = write_fixture(b"alpha beta gamma");
    let cfg = test_config("single_miss", 1, Duration::from_secs(60));
    let outcome = run_scan(&cfg, &fixture);

    assert_eq!(outcome.results.len(), 1);
    assert_eq!(outcome.results[0].status, ScanStatus::NotMatched);
    assert_eq!(outcome.results[0].elapsed, None);
    assert_eq!(outcome.summary.matched, 0);
}

#[test]
fn embedded_keyword_is_not_a_match() {
    let fixture = write_fixture(b"check your ficoscore and myfico today");
    let cfg = test_config("embedded", 1, Duration::from_secs(60));
    let outcome = run_scan(&cfg, &fixture);
    assert_eq!(outcome.results[0].status, ScanStatus::NotMatched);
}

#[test]
fn punctuation_and_newlines_are_sanitized() {
    let fixture = write_fixture(b"the score,\nwas \"Fico.\" today");
    let cfg = test_config("sanitized", 1, Duration::from_secs(60));
    let outcome = run_scan(&cfg, &fixture);
    assert_eq!(outcome.results[0].status, ScanStatus::Matched);
}

#[test]
fn every_worker_reports_once() {
    let mut data = Vec::new();
    for i in 0..200 {
        if i % 20 == 5 {
            data.extend_from_slice(b"fico ");
        } else {
            data.extend_from_slice(b"lorem ");
        }
    }
    let fixture = write_fixture(&data);
    let cfg = test_config("ten_workers", 10, Duration::from_secs(60));
    let outcome = run_scan(&cfg, &fixture);

    assert_eq!(outcome.results.len(), 10);
    assert_eq!(outcome.summary.received, 10);
    assert_eq!(outcome.summary.discarded, 0);
    assert_eq!(outcome.summary.panicked_workers, 0);
    let mut ids: Vec<u64> = outcome.results.iter().map(|r| r.chunk_id).collect();
    ids.sort_unstable();
    assert_eq!(ids, (0..10).collect::<Vec<u64>>());
    assert!(outcome.summary.matched >= 1);
}

#[test]
fn results_are_capped() {
    let fixture = write_fixture(&common::filler_with_tail("fico", 400, ""));
    let mut cfg = test_config("capped", 16, Duration::from_secs(60));
    cfg.max_results = 10;
    let outcome = run_scan(&cfg, &fixture);

    assert_eq!(outcome.results.len(), 10);
    assert_eq!(outcome.summary.received, 16);
    assert_eq!(outcome.summary.discarded, 6);
}

#[test]
fn custom_keyword_is_honoured() {
    let fixture = write_fixture(b"credit Score report");
    let mut cfg = test_config("custom_keyword", 1, Duration::from_secs(60));
    cfg.keyword = "score".to_string();
    let outcome = run_scan(&cfg, &fixture);
    assert_eq!(outcome.results[0].status, ScanStatus::Matched);
    assert_eq!(outcome.summary.keyword, "score");
}

#[test]
fn report_renders_pipeline_output() {
    let fixture = write_fixture(b"alpha beta FICO gamma");
    let cfg = test_config("report", 1, Duration::from_secs(60));
    let outcome = run_scan(&cfg, &fixture);

    let report = Report::from_results(&outcome.results);
    assert!(report.average_bytes_per_ms.is_some());

    let mut out = Vec::new();
    report::build_renderer(ReportFormat::Csv, false)
        .render(&report, &mut out)
        .expect("render");
    let text = String::from_utf8(out).expect("utf8");
    assert!(text.lines().nth(1).expect("row").contains(",SUCCESS,"));
}

#[test]
fn summary_serializes_every_field() {
    let fixture = write_fixture(b"alpha beta FICO gamma");
    let cfg = test_config("summary_json", 2, Duration::from_secs(60));
    let outcome = run_scan(&cfg, &fixture);

    let json = serde_json::to_value(&outcome.summary).expect("summary json");
    assert_eq!(json["run_id"], "summary_json");
    assert_eq!(json["keyword"], "fico");
    assert_eq!(json["workers"], 2);
    assert_eq!(json["total_bytes"], 21);
    assert_eq!(json["chunk_limit"], 10);
    assert_eq!(json["received"], 2);
    assert_eq!(json["panicked_workers"], 0);
    assert!(json["elapsed_ms"].as_f64().expect("elapsed") >= 0.0);
}
