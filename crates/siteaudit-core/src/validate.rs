//! Input validators for the landing form and the lead capture form.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::error::{LeadErrors, LeadField, UrlError};
use crate::model::{BusinessType, LeadForm, LeadInfo};

/// Limits are in UTF-16 code units, the unit browser form limits count in.
pub const NAME_MAX_CHARS: usize = 100;
pub const EMAIL_MAX_CHARS: usize = 255;

pub const NAME_REQUIRED: &str = "Name is required";
pub const NAME_TOO_LONG: &str = "Name too long";
pub const EMAIL_INVALID: &str = "Please enter a valid email";
pub const EMAIL_TOO_LONG: &str = "Email too long";
pub const BUSINESS_TYPE_REQUIRED: &str = "Please select a business type";

// Leading dot and consecutive dots are rejected separately; the regex crate
// has no lookahead.
#[allow(clippy::expect_used)]
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("email pattern is a valid regex")
});

/// Normalize a website address typed into the landing form.
///
/// The input is trimmed and `https://` is prepended unless it already starts
/// with `http://` or `https://`. The returned string is the prefixed input
/// itself, not the parser's serialization, so `example.com` becomes
/// `https://example.com` without a trailing slash.
///
/// # Errors
///
/// - [`UrlError::Empty`] if the input is empty after trimming.
/// - [`UrlError::Invalid`] if the prefixed input is not an absolute URL.
pub fn normalize_url(input: &str) -> Result<String, UrlError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let candidate = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_owned()
    } else {
        format!("https://{trimmed}")
    };

    match Url::parse(&candidate) {
        Ok(_) => Ok(candidate),
        Err(_) => Err(UrlError::Invalid { candidate }),
    }
}

/// Whether `email` has acceptable syntax. Does not trim.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    !email.starts_with('.') && !email.contains("..") && EMAIL_RE.is_match(email)
}

fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

/// Validate a lead form submission.
///
/// Every field is checked; the error carries one message per invalid field.
///
/// # Errors
///
/// Returns [`LeadErrors`] listing each invalid field with its message.
pub fn validate_lead(form: &LeadForm) -> Result<LeadInfo, LeadErrors> {
    let mut errors = LeadErrors::default();

    let name = form.name.trim();
    if name.is_empty() {
        errors.insert(LeadField::Name, NAME_REQUIRED);
    } else if utf16_len(name) > NAME_MAX_CHARS {
        errors.insert(LeadField::Name, NAME_TOO_LONG);
    }

    let email = form.email.trim();
    if utf16_len(email) > EMAIL_MAX_CHARS {
        errors.insert(LeadField::Email, EMAIL_TOO_LONG);
    } else if !is_valid_email(email) {
        errors.insert(LeadField::Email, EMAIL_INVALID);
    }

    let business_type = form.business_type.trim().parse::<BusinessType>().ok();
    if business_type.is_none() {
        errors.insert(LeadField::BusinessType, BUSINESS_TYPE_REQUIRED);
    }

    match business_type {
        Some(business_type) if errors.is_empty() => Ok(LeadInfo {
            name: name.to_owned(),
            email: email.to_owned(),
            business_type,
        }),
        _ => Err(errors),
    }
}
