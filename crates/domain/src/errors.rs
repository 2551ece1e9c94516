//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// Location identifier is not a non-negative integer
    #[error("Invalid location id: {0}")]
    InvalidLocationId(String),

    /// Date range bounds are inverted
    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    /// Date/time parsing error
    #[error("Invalid date/time: {0}")]
    InvalidDateTime(String),
}
