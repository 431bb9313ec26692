//! Error types for the rostering engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur in the engine.

use thiserror::Error;
use uuid::Uuid;

/// The main error type for the rostering engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use roster_engine::error::RosterError;
///
/// let error = RosterError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
/// ```
#[derive(Debug, Error)]
pub enum RosterError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No rate was found for the given shift type and staffing ratio.
    #[error("Rate not found for shift type '{shift_type}' at ratio '{ratio}' on date {date}")]
    RateNotFound {
        /// The shift type label.
        shift_type: String,
        /// The staffing ratio code.
        ratio: String,
        /// The date for which the rate was requested.
        date: chrono::NaiveDate,
    },

    /// A shift-series request was invalid or contained inconsistent data.
    #[error("Invalid shift series: {message}")]
    InvalidSeries {
        /// A description of what made the series invalid.
        message: String,
    },

    /// A shift was invalid or contained inconsistent data.
    #[error("Invalid shift '{shift_id}': {message}")]
    InvalidShift {
        /// The ID of the invalid shift.
        shift_id: Uuid,
        /// A description of what made the shift invalid.
        message: String,
    },

    /// A record was not found under the requesting tenant.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity that was not found.
        entity: &'static str,
        /// The identifier that was looked up.
        id: Uuid,
    },

    /// The session token was missing or did not resolve to a session.
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// A description of the authentication failure.
        message: String,
    },

    /// The session was valid but the user may not perform the operation.
    #[error("Forbidden: {message}")]
    Forbidden {
        /// A description of the authorization failure.
        message: String,
    },
}

/// A type alias for Results that return RosterError.
pub type RosterResult<T> = Result<T, RosterError>;
