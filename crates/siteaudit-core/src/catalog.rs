//! Static category definitions and issue catalogs.
//!
//! Each category has a fixed score range and exactly three catalog issues in
//! priority order (critical, important, suggested). The synthesizer reads
//! these tables and never mutates them.

use std::ops::RangeInclusive;

use crate::model::{AuditIssue, Category, Severity};

/// Range the overall score is drawn from. Independent of category scores.
pub const OVERALL_SCORE_RANGE: RangeInclusive<u8> = 45..=78;

/// A catalog entry. Converted into an owned [`AuditIssue`] when selected.
#[derive(Debug, Clone, Copy)]
pub struct IssueSpec {
    pub severity: Severity,
    pub title: &'static str,
    pub description: &'static str,
    pub tip: &'static str,
}

impl IssueSpec {
    #[must_use]
    pub fn to_issue(&self) -> AuditIssue {
        AuditIssue {
            severity: self.severity,
            title: self.title.to_owned(),
            description: self.description.to_owned(),
            tip: self.tip.to_owned(),
        }
    }
}

/// Fixed definition of one audit category.
#[derive(Debug, Clone, Copy)]
pub struct CategorySpec {
    pub category: Category,
    pub title: &'static str,
    pub description: &'static str,
    /// Short label used on the locked preview.
    pub preview_label: &'static str,
    pub min_score: u8,
    pub max_score: u8,
    pub issues: [IssueSpec; 3],
}

impl CategorySpec {
    #[must_use]
    pub fn score_range(&self) -> RangeInclusive<u8> {
        self.min_score..=self.max_score
    }
}

/// Lookup the fixed definition for a category.
#[must_use]
pub fn spec(category: Category) -> &'static CategorySpec {
    match category {
        Category::Seo => &SEO,
        Category::PageSpeed => &PAGE_SPEED,
        Category::MobileFriendly => &MOBILE_FRIENDLY,
        Category::UxDesign => &UX_DESIGN,
        Category::ConversionOptimization => &CONVERSION_OPTIMIZATION,
        Category::TrustCredibility => &TRUST_CREDIBILITY,
    }
}

const fn issue(
    severity: Severity,
    title: &'static str,
    description: &'static str,
    tip: &'static str,
) -> IssueSpec {
    IssueSpec {
        severity,
        title,
        description,
        tip,
    }
}

static SEO: CategorySpec = CategorySpec {
    category: Category::Seo,
    title: "SEO Score",
    description: "How well your site is optimized for search engines",
    preview_label: "SEO",
    min_score: 40,
    max_score: 85,
    issues: [
        issue(
            Severity::Critical,
            "Missing Meta Description",
            "Your page lacks a meta description, reducing click-through rates from search results.",
            "Add a compelling 150-160 character meta description that includes your main keyword.",
        ),
        issue(
            Severity::Important,
            "Missing H1 Tag",
            "No H1 heading found on the page, hurting SEO and accessibility.",
            "Add a single, keyword-rich H1 tag that describes your page content.",
        ),
        issue(
            Severity::Suggested,
            "Images Missing Alt Text",
            "3 images are missing alt attributes, reducing accessibility and image SEO.",
            "Add descriptive alt text to all images that describes what they show.",
        ),
    ],
};

static PAGE_SPEED: CategorySpec = CategorySpec {
    category: Category::PageSpeed,
    title: "Page Speed",
    description: "How fast your website loads for visitors",
    preview_label: "Speed",
    min_score: 35,
    max_score: 80,
    issues: [
        issue(
            Severity::Critical,
            "Large Image Files",
            "Unoptimized images are adding 2.3MB to your page load.",
            "Compress images using WebP format and implement lazy loading.",
        ),
        issue(
            Severity::Important,
            "Render-Blocking Resources",
            "CSS and JavaScript files are blocking initial render.",
            "Defer non-critical scripts and inline critical CSS.",
        ),
        issue(
            Severity::Suggested,
            "Browser Caching Not Configured",
            "Static assets are being re-downloaded on each visit.",
            "Set cache-control headers to leverage browser caching.",
        ),
    ],
};

static MOBILE_FRIENDLY: CategorySpec = CategorySpec {
    category: Category::MobileFriendly,
    title: "Mobile Friendliness",
    description: "How well your site works on mobile devices",
    preview_label: "Mobile",
    min_score: 50,
    max_score: 90,
    issues: [
        issue(
            Severity::Critical,
            "Touch Targets Too Small",
            "Buttons and links are smaller than 48x48px, making them hard to tap.",
            "Increase button sizes and add adequate spacing between interactive elements.",
        ),
        issue(
            Severity::Important,
            "Text Too Small on Mobile",
            "Some text is below 16px, requiring users to zoom.",
            "Use a minimum font size of 16px for body text on mobile.",
        ),
        issue(
            Severity::Suggested,
            "Horizontal Scrolling Detected",
            "Content extends beyond the viewport on mobile devices.",
            "Use responsive design and avoid fixed-width elements.",
        ),
    ],
};

static UX_DESIGN: CategorySpec = CategorySpec {
    category: Category::UxDesign,
    title: "UX & Design",
    description: "User experience and visual design quality",
    preview_label: "UX",
    min_score: 45,
    max_score: 85,
    issues: [
        issue(
            Severity::Critical,
            "Confusing Navigation",
            "Menu structure is unclear, making it hard for visitors to find information.",
            "Simplify navigation to 5-7 main items and use clear, descriptive labels.",
        ),
        issue(
            Severity::Important,
            "Low Color Contrast",
            "Text-to-background contrast is below WCAG standards in some areas.",
            "Ensure a minimum contrast ratio of 4.5:1 for normal text.",
        ),
        issue(
            Severity::Suggested,
            "No Visual Hierarchy",
            "Important content doesn't stand out from secondary information.",
            "Use size, color, and spacing to create clear visual hierarchy.",
        ),
    ],
};

static CONVERSION_OPTIMIZATION: CategorySpec = CategorySpec {
    category: Category::ConversionOptimization,
    title: "Conversion Optimization",
    description: "How effectively your site converts visitors",
    preview_label: "Conversion",
    min_score: 30,
    max_score: 75,
    issues: [
        issue(
            Severity::Critical,
            "No Clear CTA Above Fold",
            "Visitors can't immediately see what action to take.",
            "Add a prominent, contrasting call-to-action button in your hero section.",
        ),
        issue(
            Severity::Important,
            "Too Many Form Fields",
            "Your contact form has 8+ fields, causing abandonment.",
            "Reduce form fields to essential ones only (3-5 fields maximum).",
        ),
        issue(
            Severity::Suggested,
            "Weak Value Proposition",
            "It's unclear what makes your business unique.",
            "Add a clear headline that communicates your unique benefit in 6 words or less.",
        ),
    ],
};

static TRUST_CREDIBILITY: CategorySpec = CategorySpec {
    category: Category::TrustCredibility,
    title: "Trust & Credibility",
    description: "How trustworthy your site appears to visitors",
    preview_label: "Trust",
    min_score: 40,
    max_score: 80,
    issues: [
        issue(
            Severity::Critical,
            "No Customer Testimonials",
            "Missing social proof reduces trust and conversions.",
            "Add 3-5 customer testimonials with names, photos, and specific results.",
        ),
        issue(
            Severity::Important,
            "Contact Information Hard to Find",
            "Visitors can't easily verify your business is legitimate.",
            "Display phone number, email, and address prominently in header or footer.",
        ),
        issue(
            Severity::Suggested,
            "No Trust Badges",
            "Missing security and certification badges reduce confidence.",
            "Add SSL badge, payment security icons, and relevant certifications.",
        ),
    ],
};
