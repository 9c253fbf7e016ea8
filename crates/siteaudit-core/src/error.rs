//! Error types for `siteaudit-core`.
//!
//! Validation errors carry the exact message shown next to the offending
//! input. None of them are fatal: the caller displays the message and stays
//! on the current screen.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Errors from URL normalization.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlError {
    /// The input was empty or whitespace only.
    #[error("Please enter a website URL")]
    Empty,

    /// The input could not be parsed as an absolute URL after normalization.
    #[error("Please enter a valid URL (e.g., example.com)")]
    Invalid {
        /// The normalized candidate that failed to parse.
        candidate: String,
    },
}

/// A field of the lead capture form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LeadField {
    Name,
    Email,
    BusinessType,
}

impl LeadField {
    /// Form field name as used in error maps.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::BusinessType => "businessType",
        }
    }
}

impl fmt::Display for LeadField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-field lead validation failures.
///
/// Holds at most one message per field. Never empty when returned as an
/// error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("lead form has {} invalid field(s)", .fields.len())]
pub struct LeadErrors {
    fields: BTreeMap<LeadField, String>,
}

impl LeadErrors {
    pub(crate) fn insert(&mut self, field: LeadField, message: impl Into<String>) {
        self.fields.entry(field).or_insert_with(|| message.into());
    }

    /// Message for a single field, if that field is invalid.
    #[must_use]
    pub fn get(&self, field: LeadField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    /// Iterate invalid fields in form order.
    pub fn iter(&self) -> impl Iterator<Item = (LeadField, &str)> {
        self.fields.iter().map(|(f, m)| (*f, m.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Errors from flow controller transitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    /// The submitted URL failed validation. State is unchanged.
    #[error(transparent)]
    InvalidUrl(#[from] UrlError),

    /// The submitted lead form failed validation. State is unchanged.
    #[error(transparent)]
    InvalidLead(#[from] LeadErrors),

    /// The action is not valid from the current state.
    #[error("cannot {action} while in state '{state}'")]
    InvalidTransition {
        state: &'static str,
        action: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_error_messages_match_form_copy() {
        assert_eq!(UrlError::Empty.to_string(), "Please enter a website URL");
        let err = UrlError::Invalid {
            candidate: "https://a b".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "Please enter a valid URL (e.g., example.com)"
        );
    }

    #[test]
    fn lead_errors_keep_first_message_per_field() {
        let mut errors = LeadErrors::default();
        errors.insert(LeadField::Email, "first");
        errors.insert(LeadField::Email, "second");
        errors.insert(LeadField::Name, "Name is required");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get(LeadField::Email), Some("first"));
        let order: Vec<_> = errors.iter().map(|(f, _)| f).collect();
        assert_eq!(order, vec![LeadField::Name, LeadField::Email]);
        assert_eq!(errors.to_string(), "lead form has 2 invalid field(s)");
    }

    #[test]
    fn lead_errors_serialize_with_form_field_names() {
        let mut errors = LeadErrors::default();
        errors.insert(LeadField::BusinessType, "Please select a business type");
        let json = serde_json::to_value(&errors).unwrap_or_default();
        assert_eq!(
            json["fields"]["businessType"],
            "Please select a business type"
        );
    }

    #[test]
    fn invalid_transition_names_state_and_action() {
        let err = FlowError::InvalidTransition {
            state: "landing",
            action: "submit lead",
        };
        assert_eq!(err.to_string(), "cannot submit lead while in state 'landing'");
    }
}
