//! Error types for folio
//!
//! This module defines domain-specific error types that provide clear,
//! actionable error messages to users.

use thiserror::Error;

/// Validation errors for user input in the TUI.
///
/// These errors are shown directly to users and should be clear and actionable.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Name is required")]
    NameRequired,

    #[error("Amount is required")]
    AmountRequired,

    #[error("Invalid amount format: {0}")]
    InvalidAmount(String),

    #[error("Amount must be positive, got {0}")]
    NonPositiveAmount(f64),
}

/// Parse errors for textual time-frame and growth-rate selections.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unknown time frame '{0}' (expected daily, weekly, monthly or yearly)")]
    UnknownTimeFrame(String),

    #[error("unknown growth rate '{0}' (expected current, optimistic or conservative)")]
    UnknownGrowthRate(String),
}
