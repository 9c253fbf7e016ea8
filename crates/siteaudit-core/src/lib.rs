//! Core library for `SiteAudit`.
//!
//! Contains the audit data model, the static issue catalogs, the mock report
//! synthesizer, URL and lead validators, the analysis phase sequencer, the
//! flow controller state machine, and the report summaries shown on the
//! final screen. Nothing here renders output; the CLI crate owns the view.

pub mod catalog;
pub mod error;
pub mod flow;
pub mod model;
pub mod sequencer;
pub mod summary;
pub mod synth;
pub mod validate;
