//! # Navigator Core
//!
//! Core triage logic for the care navigator.
//!
//! This crate contains pure, I/O-free operations:
//! - The ordered, first-match-wins triage rule engine
//! - Care-level to provider-keyword mapping
//! - The insurance post-filter over provider candidates
//! - Startup configuration
//!
//! **No API concerns**: HTTP serving, provider-directory transport and
//! caching belong in `api-rest` and `navigator-places`.

pub mod config;
pub mod error;
pub mod insurance;
pub mod provider;
pub mod triage;

pub use config::NavigatorConfig;
pub use error::{NavigatorError, NavigatorResult};
pub use insurance::{filter_by_insurance, narrow_with_broadening};
pub use provider::Provider;
pub use triage::{
    evaluate, PatientReport, Severity, SymptomDuration, TriageDecision, TriageLevel,
    RED_FLAG_PHRASES,
};
