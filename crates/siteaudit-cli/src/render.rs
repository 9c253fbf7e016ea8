//! Terminal rendering for each screen of the audit flow.

use std::io::Write as _;

use siteaudit_core::error::LeadErrors;
use siteaudit_core::model::{AuditReport, AuditScore, LeadInfo, Severity};
use siteaudit_core::sequencer::Progress;
use siteaudit_core::summary::{self, ReportSummary};

// ── ANSI color helpers ───────────────────────────────────────────────

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";
pub const WHITE: &str = "\x1b[37m";

const BANNER: &str = r"
  ┌─┐┬┌┬┐┌─┐  ┌─┐┬ ┬┌┬┐┬┌┬┐
  └─┐│ │ ├┤   ├─┤│ │ │││ │
  └─┘┴ ┴ └─┘  ┴ ┴└─┘─┴┘┴ ┴
";

const FEATURES: [(&str, &str); 6] = [
    ("SEO Analysis", "Find hidden SEO issues hurting your rankings"),
    ("Page Speed", "Identify what's slowing your site down"),
    ("Mobile Check", "See how your site performs on mobile"),
    ("UX & Design", "Discover usability problems"),
    ("Conversion", "Learn why visitors aren't converting"),
    ("Trust Signals", "Build credibility with visitors"),
];

const BAR_WIDTH: usize = 20;

pub fn print_banner() {
    println!("{CYAN}{BOLD}{BANNER}{RESET}");
    println!("  {DIM}Free website audit. Find out what's holding your site back.{RESET}");
    println!();
    for (title, description) in FEATURES {
        println!("  {GREEN}✓{RESET} {BOLD}{title:<14}{RESET} {DIM}{description}{RESET}");
    }
    println!();
}

fn header(title: &str) {
    println!("{BOLD}{CYAN}{title}{RESET}");
    println!("{DIM}─────────────────────────────────────────{RESET}");
}

fn kv_line(key: &str, value: &str) {
    println!("  {DIM}{key:<20}{RESET} {WHITE}{value}{RESET}");
}

pub fn warning(msg: &str) {
    eprintln!("{YELLOW}{BOLD}⚠{RESET} {YELLOW}{msg}{RESET}");
}

/// Inline message under the offending input.
pub fn field_error(msg: &str) {
    eprintln!("    {RED}✗ {msg}{RESET}");
}

pub fn print_lead_errors(errors: &LeadErrors) {
    for (field, message) in errors.iter() {
        eprintln!("    {RED}✗ {field}: {message}{RESET}");
    }
}

/// Green at 75 and above, yellow from 50, red below.
fn score_color(score: u8) -> &'static str {
    if score >= 75 {
        GREEN
    } else if score >= 50 {
        YELLOW
    } else {
        RED
    }
}

fn bar(filled: usize, width: usize) -> String {
    let filled = filled.min(width);
    format!("{}{DIM}{}{RESET}", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn score_bar(score: u8) -> String {
    let filled = usize::from(score.min(100)) * BAR_WIDTH / 100;
    format!("{}{}", score_color(score), bar(filled, BAR_WIDTH))
}

pub fn progress_line(progress: Progress) -> String {
    let filled = if progress.total == 0 {
        BAR_WIDTH
    } else {
        progress.completed * BAR_WIDTH / progress.total
    };
    let percent = progress.completed * 100 / progress.total.max(1);
    let label = progress.current.unwrap_or("Almost done...");
    format!("  {CYAN}[{}{CYAN}]{RESET} {percent:>3}% {label}", bar(filled, BAR_WIDTH))
}

pub fn print_progress(progress: Progress) {
    let mut stdout = std::io::stdout().lock();
    let _ = write!(stdout, "\r\x1b[2K{}", progress_line(progress));
    if progress.is_done() {
        let _ = writeln!(stdout);
    }
    let _ = stdout.flush();
}

pub fn print_analyzing(url: &str) {
    println!();
    header("Analyzing Your Website");
    kv_line("URL", url);
    println!();
}

/// Locked preview: scores stay hidden unless `peek` is set.
pub fn print_preview(report: &AuditReport, peek: bool) {
    let issues = report.all_issues().count();
    println!();
    header("Your Website Audit is Ready");
    println!(
        "  We found {RED}{BOLD}{issues} issues{RESET} on your website. Get the full breakdown with actionable fixes."
    );
    println!();

    let overall = if peek {
        format!("{}{}{RESET}", score_color(report.overall_score), report.overall_score)
    } else {
        format!("{DIM}??{RESET}")
    };
    kv_line("Overall", &overall);

    for item in summary::preview_scores(report) {
        let value = if peek {
            format!("{} {}", score_bar(item.score), item.score)
        } else {
            format!("{DIM}{}{RESET}", "▒".repeat(BAR_WIDTH))
        };
        kv_line(item.label, &value);
    }
    println!();
    println!("  {DIM}Enter your details to unlock the complete analysis.{RESET}");
    println!();
}

fn severity_tag(severity: Severity) -> String {
    match severity {
        Severity::Critical => format!("{RED}{BOLD}CRITICAL{RESET}"),
        Severity::Important => format!("{YELLOW}{BOLD}IMPORTANT{RESET}"),
        Severity::Suggested => format!("{CYAN}SUGGESTED{RESET}"),
    }
}

fn print_audit_card(audit: &AuditScore) {
    println!(
        "  {BOLD}{}{RESET} {} {}{}{RESET} {DIM}({}){RESET}",
        audit.title,
        score_bar(audit.score),
        score_color(audit.score),
        audit.score,
        audit.status
    );
    println!("  {DIM}{}{RESET}", audit.description);
    for issue in &audit.issues {
        println!("    {} {}", severity_tag(issue.severity), issue.title);
        println!("      {}", issue.description);
        println!("      {GREEN}Tip:{RESET} {}", issue.tip);
    }
    println!();
}

pub fn print_report(report: &AuditReport, lead: &LeadInfo) {
    let summary = ReportSummary::new(report);

    println!();
    header(&format!("Hi {}, here's your website analysis", lead.first_name()));
    kv_line("Report for", &report.url);
    kv_line("Generated", &report.analyzed_at.format("%Y-%m-%d").to_string());
    println!();

    kv_line(
        "Overall score",
        &format!(
            "{}{BOLD}{}{RESET}/100  {}",
            score_color(report.overall_score),
            report.overall_score,
            summary.verdict_message
        ),
    );
    kv_line("Critical", &summary.counts.critical.to_string());
    kv_line("Important", &summary.counts.important.to_string());
    kv_line("Suggested", &summary.counts.suggested.to_string());
    println!();

    header("Top Priorities");
    for (i, issue) in summary.top_priorities.iter().enumerate() {
        println!("  {BOLD}{}.{RESET} {} {DIM}{}{RESET}", i + 1, issue.title, issue.tip);
    }
    println!();

    header("Detailed Analysis");
    for audit in report.scores() {
        print_audit_card(audit);
    }

    println!("  {DIM}Want help fixing these issues? Book a free consultation.{RESET}");
    println!();
}
