//! Derived views over a finished report: severity counts, top priorities,
//! the verdict line, and the locked preview.

use serde::Serialize;

use crate::catalog;
use crate::model::{AuditIssue, AuditReport, Severity};

/// Maximum number of top-priority issues shown.
pub const TOP_PRIORITY_LIMIT: usize = 3;
/// Critical issues that may fill the top-priority list before important ones.
pub const TOP_PRIORITY_CRITICAL_LIMIT: usize = 2;

/// Issue counts across all categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IssueCounts {
    pub critical: usize,
    pub important: usize,
    pub suggested: usize,
}

impl IssueCounts {
    #[must_use]
    pub fn total(&self) -> usize {
        self.critical + self.important + self.suggested
    }
}

/// Headline for the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Verdict {
    Good,
    NeedsWork,
    Critical,
}

impl Verdict {
    #[must_use]
    pub fn for_score(score: u8) -> Self {
        if score >= 75 {
            Self::Good
        } else if score >= 50 {
            Self::NeedsWork
        } else {
            Self::Critical
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Good => "Good! A few improvements needed.",
            Self::NeedsWork => "Needs work. Follow our recommendations.",
            Self::Critical => "Critical issues found. Act now!",
        }
    }
}

/// One bar of the locked preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PreviewScore {
    pub label: &'static str,
    pub score: u8,
}

/// Everything the report screen shows besides the per-category cards.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary<'a> {
    pub counts: IssueCounts,
    pub verdict: Verdict,
    pub verdict_message: &'static str,
    pub top_priorities: Vec<&'a AuditIssue>,
}

impl<'a> ReportSummary<'a> {
    #[must_use]
    pub fn new(report: &'a AuditReport) -> Self {
        let verdict = Verdict::for_score(report.overall_score);
        Self {
            counts: issue_counts(report),
            verdict,
            verdict_message: verdict.message(),
            top_priorities: top_priorities(report),
        }
    }
}

#[must_use]
pub fn issue_counts(report: &AuditReport) -> IssueCounts {
    report
        .all_issues()
        .fold(IssueCounts::default(), |mut counts, issue| {
            match issue.severity {
                Severity::Critical => counts.critical += 1,
                Severity::Important => counts.important += 1,
                Severity::Suggested => counts.suggested += 1,
            }
            counts
        })
}

/// Up to two critical issues, topped up with important ones, at most three.
#[must_use]
pub fn top_priorities(report: &AuditReport) -> Vec<&AuditIssue> {
    let critical: Vec<_> = report
        .all_issues()
        .filter(|i| i.severity == Severity::Critical)
        .take(TOP_PRIORITY_CRITICAL_LIMIT)
        .collect();
    let remaining = TOP_PRIORITY_LIMIT - critical.len();

    critical
        .into_iter()
        .chain(
            report
                .all_issues()
                .filter(|i| i.severity == Severity::Important)
                .take(remaining),
        )
        .collect()
}

/// The six `(label, score)` bars shown before the report is unlocked.
#[must_use]
pub fn preview_scores(report: &AuditReport) -> Vec<PreviewScore> {
    report
        .scores()
        .map(|s| PreviewScore {
            label: catalog::spec(s.category).preview_label,
            score: s.score,
        })
        .collect()
}
