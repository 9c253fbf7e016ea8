//! End-to-end session tests: landing through report and back.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::time::Duration;

use siteaudit_core::flow::{FlowController, StateKind};
use siteaudit_core::model::LeadForm;
use siteaudit_core::sequencer::{AnalysisSequencer, PHASES, SequenceOutcome};
use siteaudit_core::synth::{issue_count_for, synthesize};
use tokio::sync::watch;

#[tokio::test(start_paused = true)]
async fn full_session_round_trip() {
    let mut flow = FlowController::new();
    assert_eq!(flow.kind(), StateKind::Landing);

    flow.submit_url("example.com").unwrap();
    assert_eq!(flow.kind(), StateKind::Analyzing);

    let sequencer = AnalysisSequencer::new();
    let (_tx, rx) = watch::channel(false);
    let started = tokio::time::Instant::now();
    let mut fractions = Vec::new();

    let outcome = flow
        .run_analysis(&sequencer, rx, |p| fractions.push(p.fraction()))
        .await
        .unwrap();

    assert_eq!(outcome, SequenceOutcome::Completed);
    assert!(started.elapsed() >= Duration::from_millis(6500));
    assert_eq!(fractions.len(), PHASES.len() + 1);
    assert!(fractions.windows(2).all(|w| w[0] < w[1]));
    assert!((fractions[fractions.len() - 1] - 1.0).abs() < f64::EPSILON);

    assert_eq!(flow.kind(), StateKind::LeadCapture);
    let report = flow.report().expect("report after analysis");
    assert_eq!(report.url, "https://example.com");

    flow.submit_lead(&LeadForm::new("Jo", "jo@x.com", "startup"))
        .unwrap();
    assert_eq!(flow.kind(), StateKind::Report);
    assert_eq!(flow.lead().unwrap().first_name(), "Jo");

    flow.start_over().unwrap();
    assert_eq!(flow.kind(), StateKind::Landing);
    assert!(flow.url().is_none());
    assert!(flow.report().is_none());
    assert!(flow.lead().is_none());
}

#[tokio::test(start_paused = true)]
async fn teardown_mid_analysis_prevents_completion() {
    let mut flow = FlowController::new();
    flow.submit_url("https://shop.example.com").unwrap();

    let sequencer = AnalysisSequencer::new();
    let (tx, rx) = watch::channel(false);

    // Tear the view down partway through the third phase.
    let teardown = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(2000)).await;
        drop(tx);
    });

    let mut last_completed = 0;
    let outcome = flow
        .run_analysis(&sequencer, rx, |p| last_completed = p.completed)
        .await
        .unwrap();
    teardown.await.unwrap();

    assert_eq!(outcome, SequenceOutcome::Cancelled { completed: 2 });
    assert_eq!(last_completed, 2);
    assert_eq!(flow.kind(), StateKind::Analyzing);
    assert!(flow.report().is_none());

    // Once torn down, nothing fires later either.
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(flow.kind(), StateKind::Analyzing);
}

#[test]
fn second_session_after_reset_gets_fresh_report() {
    let mut flow = FlowController::with_seed(3);
    flow.submit_url("first.example").unwrap();
    flow.finish_analysis().unwrap();
    flow.submit_lead(&LeadForm::new("Ada", "ada@first.example", "agency"))
        .unwrap();
    flow.start_over().unwrap();

    flow.submit_url("second.example").unwrap();
    flow.finish_analysis().unwrap();
    assert_eq!(flow.report().unwrap().url, "https://second.example");
    assert!(flow.lead().is_none());
}

#[test]
fn repeated_synthesis_keeps_shape() {
    let a = synthesize("https://example.com");
    let b = synthesize("https://example.com");
    assert_eq!(a.url, b.url);

    for (sa, sb) in a.scores().zip(b.scores()) {
        assert_eq!(sa.category, sb.category);
        assert_eq!(sa.title, sb.title);
        assert_eq!(sa.issues.len(), issue_count_for(sa.score));
        assert_eq!(sb.issues.len(), issue_count_for(sb.score));
        // The shorter list is always a prefix of the longer one.
        let n = sa.issues.len().min(sb.issues.len());
        assert_eq!(sa.issues[..n], sb.issues[..n]);
    }
}
