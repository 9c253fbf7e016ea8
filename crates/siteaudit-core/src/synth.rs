//! Mock report synthesizer.
//!
//! Produces an [`AuditReport`] with a fixed shape and random scores. No
//! analysis of the URL takes place; the URL is only recorded.
//!
//! The overall score is drawn on its own from [`OVERALL_SCORE_RANGE`] and is
//! not aggregated from the category scores.

use chrono::Utc;
use rand::Rng;
use tracing::debug;

use crate::catalog::{self, OVERALL_SCORE_RANGE};
use crate::model::{AuditReport, AuditScore, Category, Status};

/// Number of catalog issues listed for a score: 3 below 50, 2 below 75,
/// otherwise 1.
#[must_use]
pub fn issue_count_for(score: u8) -> usize {
    if score < 50 {
        3
    } else if score < 75 {
        2
    } else {
        1
    }
}

impl AuditScore {
    /// Build the score entry for `category` with a known `score`.
    #[must_use]
    pub fn from_score(category: Category, score: u8) -> Self {
        let spec = catalog::spec(category);
        Self {
            category,
            score,
            status: Status::from_score(score),
            title: spec.title.to_owned(),
            description: spec.description.to_owned(),
            issues: spec.issues[..issue_count_for(score)]
                .iter()
                .map(catalog::IssueSpec::to_issue)
                .collect(),
        }
    }
}

/// Synthesize a report using the thread-local RNG.
#[must_use]
pub fn synthesize(url: &str) -> AuditReport {
    synthesize_with(url, &mut rand::rng())
}

/// Synthesize a report drawing every score from `rng`.
pub fn synthesize_with<R: Rng + ?Sized>(url: &str, rng: &mut R) -> AuditReport {
    let overall_score = rng.random_range(OVERALL_SCORE_RANGE);
    let mut draw = |category: Category| {
        let score = rng.random_range(catalog::spec(category).score_range());
        AuditScore::from_score(category, score)
    };

    let report = AuditReport {
        url: url.to_owned(),
        overall_score,
        analyzed_at: Utc::now(),
        seo: draw(Category::Seo),
        page_speed: draw(Category::PageSpeed),
        mobile_friendly: draw(Category::MobileFriendly),
        ux_design: draw(Category::UxDesign),
        conversion_optimization: draw(Category::ConversionOptimization),
        trust_credibility: draw(Category::TrustCredibility),
    };

    debug!(
        url = %report.url,
        overall = report.overall_score,
        issues = report.all_issues().count(),
        "mock report synthesized"
    );
    report
}
