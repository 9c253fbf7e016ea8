//! Integration tests for the `siteaudit` CLI binary.
//!
//! These tests run the CLI as a subprocess with `SITEAUDIT_PACE=0` so the
//! analysis phases do not wait, feeding prompt answers through stdin.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::io::Write as _;
use std::path::Path;
use std::process::{Command, Stdio};

use serde_json::Value;

/// Helper: locate the `siteaudit` binary built by `cargo test`.
fn siteaudit_bin() -> String {
    let path = env!("CARGO_BIN_EXE_siteaudit");
    assert!(
        Path::new(path).exists(),
        "siteaudit binary not found at {path}"
    );
    path.to_owned()
}

/// Helper: run siteaudit with args and stdin, return (`exit_code`, stdout, stderr).
fn run_with_input(args: &[&str], input: &str) -> (i32, String, String) {
    let mut child = Command::new(siteaudit_bin())
        .args(args)
        .env("SITEAUDIT_PACE", "0")
        .env_remove("RUST_LOG")
        .env_remove("SITEAUDIT_LOG_LEVEL")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn siteaudit");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
        .expect("failed to write stdin");

    let output = child.wait_with_output().expect("failed to wait on siteaudit");
    let code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (code, stdout, stderr)
}

fn run(args: &[&str]) -> (i32, String, String) {
    run_with_input(args, "")
}

const FULL_LEAD: [&str; 6] = [
    "--name",
    "Jo Smith",
    "--email",
    "jo@x.com",
    "--business-type",
    "saas",
];

fn audit_args<'a>(url: &'a str, extra: &[&'a str]) -> Vec<&'a str> {
    let mut args = vec!["audit", url];
    args.extend_from_slice(extra);
    args
}

// ── Version & help ───────────────────────────────────────────────────

#[test]
fn test_version_flag() {
    let (code, stdout, _) = run(&["--version"]);
    assert_eq!(code, 0, "siteaudit --version should exit 0");
    assert!(stdout.contains("siteaudit"), "version output: {stdout}");
}

#[test]
fn test_help_lists_commands() {
    let (code, stdout, _) = run(&["--help"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("SiteAudit CLI"), "help: {stdout}");
    for sub in ["audit", "phases", "business-types"] {
        assert!(stdout.contains(sub), "help should list '{sub}'");
    }
}

// ── phases / business-types ──────────────────────────────────────────

#[test]
fn test_phases_lists_all_eight() {
    let (code, stdout, _) = run(&["phases", "--pace", "1"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Connecting to website..."));
    assert!(stdout.contains("Generating report..."));
    assert!(stdout.contains("1000 ms"));
    assert!(stdout.contains("6500 ms"), "total should be 6500 ms: {stdout}");
}

#[test]
fn test_business_types_lists_values() {
    let (code, stdout, _) = run(&["business-types"]);
    assert_eq!(code, 0);
    for value in ["ecommerce", "saas", "agency", "local", "startup", "enterprise", "other"] {
        assert!(stdout.contains(value), "missing {value}");
    }
    assert!(stdout.contains("SaaS / Software"));
}

// ── audit, scripted ──────────────────────────────────────────────────

#[test]
fn test_audit_json_output() {
    let (code, stdout, stderr) = run(&audit_args("example.com", &[&FULL_LEAD[..], &["--json"]].concat()));
    assert_eq!(code, 0, "stderr: {stderr}");

    let output: Value = serde_json::from_str(&stdout).expect("stdout should be one JSON object");
    assert_eq!(output["report"]["url"], "https://example.com");
    assert_eq!(output["lead"]["name"], "Jo Smith");
    assert_eq!(output["lead"]["businessType"], "saas");

    let overall = output["report"]["overallScore"].as_u64().unwrap();
    assert!((45..=78).contains(&overall));
    assert!(output["summary"]["topPriorities"].as_array().unwrap().len() <= 3);
    for key in [
        "seo",
        "pageSpeed",
        "mobileFriendly",
        "uxDesign",
        "conversionOptimization",
        "trustCredibility",
    ] {
        let issues = output["report"][key]["issues"].as_array().unwrap();
        assert!((1..=3).contains(&issues.len()), "{key} issue count");
    }
}

#[test]
fn test_audit_text_report() {
    let (code, stdout, stderr) = run(&audit_args("example.com", &FULL_LEAD));
    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(stdout.contains("Analyzing Your Website"));
    assert!(stdout.contains("Enter your details to unlock"));
    assert!(stdout.contains("Hi Jo, here's your website analysis"));
    assert!(stdout.contains("https://example.com"));
    assert!(stdout.contains("Top Priorities"));
    assert!(stdout.contains("Trust & Credibility"));
}

#[test]
fn test_audit_rejects_empty_url() {
    let (code, _, stderr) = run(&audit_args("   ", &FULL_LEAD));
    assert_eq!(code, 1);
    assert!(stderr.contains("Please enter a website URL"), "stderr: {stderr}");
}

#[test]
fn test_audit_rejects_unparsable_url() {
    let (code, stdout, stderr) = run(&audit_args("exa mple.com", &FULL_LEAD));
    assert_eq!(code, 1);
    assert!(stderr.contains("Please enter a valid URL (e.g., example.com)"), "stderr: {stderr}");
    assert!(!stdout.contains("Analyzing Your Website"));
}

#[test]
fn test_audit_rejects_invalid_flag_email() {
    let (code, stdout, stderr) = run(&audit_args(
        "example.com",
        &["--name", "Jo", "--email", "not-an-email", "--business-type", "saas"],
    ));
    assert_eq!(code, 1);
    assert!(stderr.contains("Please enter a valid email"), "stderr: {stderr}");
    assert!(!stdout.contains("Top Priorities"));
}

// ── audit, prompted ──────────────────────────────────────────────────

#[test]
fn test_audit_prompts_for_missing_lead_fields() {
    let (code, stdout, stderr) = run_with_input(&["audit", "example.com"], "Jo\njo@x.com\n5\n");
    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(stderr.contains("Your name"));
    assert!(stderr.contains("Startup"));
    assert!(stdout.contains("Hi Jo"));
}

#[test]
fn test_audit_reprompts_invalid_field_only() {
    // Blank name first; the email and business type are valid and kept.
    let (code, stdout, stderr) = run_with_input(
        &["audit", "example.com", "--json"],
        "\njo@x.com\nstartup\nJo\n",
    );
    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(stderr.contains("Name is required"));
    let output: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(output["lead"]["name"], "Jo");
    assert_eq!(output["lead"]["businessType"], "startup");
}

#[test]
fn test_audit_fails_when_input_closes() {
    let (code, _, stderr) = run(&["audit", "example.com"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("input closed"), "stderr: {stderr}");
}

#[test]
fn test_interactive_session_start_over() {
    let input = "  \nexample.com\nJo\njo@x.com\n2\ny\nsecond.example\nAda\nada@second.example\nother\nn\n";
    let (code, stdout, stderr) = run_with_input(&["audit"], input);
    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(stderr.contains("Please enter a website URL"));
    assert!(stdout.contains("Hi Jo"));
    assert!(stdout.contains("Hi Ada"));
    assert!(stdout.contains("https://second.example"));
}

#[test]
fn test_json_session_prints_single_object() {
    // Without a URL argument the answers are prompted for, but `--json`
    // never offers another round.
    let (code, stdout, stderr) = run_with_input(
        &["audit", "--json"],
        "example.com\nJo\njo@x.com\nsaas\ny\nsecond.example\n",
    );
    assert_eq!(code, 0, "stderr: {stderr}");
    let output: Value = serde_json::from_str(&stdout).expect("exactly one JSON object");
    assert_eq!(output["report"]["url"], "https://example.com");
    assert!(!stderr.contains("Run another audit?"));
}

// ── cancellation ─────────────────────────────────────────────────────

#[cfg(unix)]
#[test]
fn test_sigint_during_analysis_exits_130() {
    use std::io::Read as _;

    let mut child = Command::new(siteaudit_bin())
        .args(["audit", "example.com"])
        .args(FULL_LEAD)
        .env("SITEAUDIT_PACE", "1")
        .env_remove("RUST_LOG")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn siteaudit");

    // Wait for the first progress line: the handler is installed by then.
    let mut stdout = child.stdout.take().expect("stdout is piped");
    let mut seen = Vec::new();
    let mut buf = [0u8; 256];
    while !String::from_utf8_lossy(&seen).contains("Connecting to website...") {
        let n = stdout.read(&mut buf).expect("failed to read stdout");
        assert!(n > 0, "siteaudit exited before analysis started");
        seen.extend_from_slice(&buf[..n]);
    }
    std::thread::sleep(std::time::Duration::from_millis(200));

    let status = Command::new("kill")
        .args(["-INT", &child.id().to_string()])
        .status()
        .expect("failed to run kill");
    assert!(status.success());

    let mut rest = String::new();
    stdout.read_to_string(&mut rest).expect("failed to drain stdout");
    let output = child.wait_with_output().expect("failed to wait on siteaudit");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(130), "stderr: {stderr}");
    assert!(stderr.contains("analysis cancelled"), "stderr: {stderr}");
    assert!(!rest.contains("Enter your details to unlock"));
}
