//! Audit data model.
//!
//! Every type here is plain data: created by the synthesizer or the lead
//! validator, owned by the flow controller, and serialized with the
//! camelCase field names the web flow used.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Issue priority tier. Declaration order is priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Important,
    Suggested,
}

impl Severity {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Important => "important",
            Self::Suggested => "suggested",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Health status of a single score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Critical,
    Warning,
    Good,
}

impl Status {
    /// Below 50 is critical, below 75 is a warning, everything else is good.
    #[must_use]
    pub fn from_score(score: u8) -> Self {
        if score < 50 {
            Self::Critical
        } else if score < 75 {
            Self::Warning
        } else {
            Self::Good
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Warning => "warning",
            Self::Good => "good",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the six audit dimensions, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Seo,
    PageSpeed,
    MobileFriendly,
    UxDesign,
    ConversionOptimization,
    TrustCredibility,
}

impl Category {
    /// All categories in the order the report lists them.
    pub const ALL: [Self; 6] = [
        Self::Seo,
        Self::PageSpeed,
        Self::MobileFriendly,
        Self::UxDesign,
        Self::ConversionOptimization,
        Self::TrustCredibility,
    ];
}

/// A single finding within a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditIssue {
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub tip: String,
}

/// Score and findings for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditScore {
    pub category: Category,
    /// 0-100.
    pub score: u8,
    pub status: Status,
    pub title: String,
    pub description: String,
    /// Prefix of the category catalog; length depends on the score tier.
    pub issues: Vec<AuditIssue>,
}

/// A complete mock audit of one URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    pub url: String,
    pub overall_score: u8,
    pub analyzed_at: DateTime<Utc>,
    pub seo: AuditScore,
    pub page_speed: AuditScore,
    pub mobile_friendly: AuditScore,
    pub ux_design: AuditScore,
    pub conversion_optimization: AuditScore,
    pub trust_credibility: AuditScore,
}

impl AuditReport {
    /// Score for a given category.
    #[must_use]
    pub fn score(&self, category: Category) -> &AuditScore {
        match category {
            Category::Seo => &self.seo,
            Category::PageSpeed => &self.page_speed,
            Category::MobileFriendly => &self.mobile_friendly,
            Category::UxDesign => &self.ux_design,
            Category::ConversionOptimization => &self.conversion_optimization,
            Category::TrustCredibility => &self.trust_credibility,
        }
    }

    /// All six scores in report order.
    pub fn scores(&self) -> impl Iterator<Item = &AuditScore> {
        Category::ALL.into_iter().map(|c| self.score(c))
    }

    /// Every issue across all categories, in report order.
    pub fn all_issues(&self) -> impl Iterator<Item = &AuditIssue> {
        self.scores().flat_map(|s| s.issues.iter())
    }
}

/// The fixed set of business types offered on the lead form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusinessType {
    Ecommerce,
    Saas,
    Agency,
    Local,
    Startup,
    Enterprise,
    Other,
}

impl BusinessType {
    pub const ALL: [Self; 7] = [
        Self::Ecommerce,
        Self::Saas,
        Self::Agency,
        Self::Local,
        Self::Startup,
        Self::Enterprise,
        Self::Other,
    ];

    /// Form value, e.g. `saas`.
    #[must_use]
    pub fn value(self) -> &'static str {
        match self {
            Self::Ecommerce => "ecommerce",
            Self::Saas => "saas",
            Self::Agency => "agency",
            Self::Local => "local",
            Self::Startup => "startup",
            Self::Enterprise => "enterprise",
            Self::Other => "other",
        }
    }

    /// Human-readable label shown in the picker.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Ecommerce => "E-commerce / Online Store",
            Self::Saas => "SaaS / Software",
            Self::Agency => "Agency / Consulting",
            Self::Local => "Local Business",
            Self::Startup => "Startup",
            Self::Enterprise => "Enterprise",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for BusinessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

/// Returned when a string is not one of the seven form values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown business type: {0}")]
pub struct UnknownBusinessType(pub String);

impl FromStr for BusinessType {
    type Err = UnknownBusinessType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|bt| bt.value() == s)
            .ok_or_else(|| UnknownBusinessType(s.to_owned()))
    }
}

/// Raw lead form input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadForm {
    pub name: String,
    pub email: String,
    pub business_type: String,
}

impl LeadForm {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        business_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            business_type: business_type.into(),
        }
    }
}

/// A validated lead. Only [`crate::validate::validate_lead`] creates one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadInfo {
    pub name: String,
    pub email: String,
    pub business_type: BusinessType,
}

impl LeadInfo {
    /// First whitespace-separated word of the name, used in the greeting.
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}
