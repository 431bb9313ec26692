//! Response types for the rostering engine API.
//!
//! This module defines the success payloads, the error response structure,
//! and the mapping from engine errors to HTTP statuses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::RosterError;
use crate::models::{FundingCategory, Role, ShiftInstance};
use crate::rostering::ShiftType;
use crate::store::DeductionOutcome;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates a missing/invalid session token error response.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new("UNAUTHORIZED", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<RosterError> for ApiErrorResponse {
    fn from(error: RosterError) -> Self {
        match error {
            RosterError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            RosterError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            RosterError::RateNotFound {
                shift_type,
                ratio,
                date,
            } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "RATE_NOT_FOUND",
                    format!(
                        "Rate not found for shift type '{}' at ratio '{}' on date {}",
                        shift_type, ratio, date
                    ),
                    "The rate schedule has no entry effective for the shift date",
                ),
            },
            RosterError::InvalidSeries { message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_SERIES",
                    format!("Invalid shift series: {}", message),
                    "The series request contains invalid information",
                ),
            },
            RosterError::InvalidShift { shift_id, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_SHIFT",
                    format!("Invalid shift '{}': {}", shift_id, message),
                    "The shift cannot be completed in its current state",
                ),
            },
            RosterError::NotFound { entity, id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("NOT_FOUND", format!("{} not found: {}", entity, id)),
            },
            RosterError::Unauthorized { message } => ApiErrorResponse {
                status: StatusCode::UNAUTHORIZED,
                error: ApiError::unauthorized(message),
            },
            RosterError::Forbidden { message } => ApiErrorResponse {
                status: StatusCode::FORBIDDEN,
                error: ApiError::new("FORBIDDEN", message),
            },
        }
    }
}

/// Response body for `POST /sessions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    /// The minted bearer token.
    pub token: Uuid,
    /// The user the session belongs to.
    pub user_id: Uuid,
    /// The tenant claimed by the session.
    pub tenant_id: Uuid,
    /// The user's role.
    pub role: Role,
}

/// Response body for `POST /shift-series`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesCreatedResponse {
    /// The tag shared by every shift created from this series.
    pub series_tag: String,
    /// Number of shift rows created. Zero is a valid outcome (e.g. a
    /// boundary date before the start).
    pub created_count: usize,
    /// The created shift rows, ordered by start time.
    pub shifts: Vec<ShiftInstance>,
}

/// Per-client budget view returned by `GET /clients/:id/budgets`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetView {
    /// The funding category code.
    pub category: FundingCategory,
    /// Human-readable category name from the scheme configuration.
    pub category_name: String,
    /// Remaining balance in dollars.
    pub remaining: Decimal,
    /// Most recent activity note, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Costed breakdown attached to a completion response for shifts with an
/// assigned client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingSummary {
    /// The rate band the shift fell into.
    pub shift_type: ShiftType,
    /// The funding category the cost draws from.
    pub category: FundingCategory,
    /// Elapsed hours.
    pub hours: Decimal,
    /// Hourly rate applied.
    pub rate: Decimal,
    /// Total cost.
    pub cost: Decimal,
    /// What happened to the client's balance.
    pub deduction: DeductionOutcome,
}

/// Response body for `POST /shifts/:id/complete`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteShiftResponse {
    /// The completed shift row.
    pub shift: ShiftInstance,
    /// Billing details; absent when the shift has no assigned client.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing: Option<BillingSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details")); // Should be skipped when None
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let id = Uuid::new_v4();
        let api_error: ApiErrorResponse = RosterError::NotFound {
            entity: "Client",
            id,
        }
        .into();
        assert_eq!(api_error.status, StatusCode::NOT_FOUND);
        assert_eq!(api_error.error.code, "NOT_FOUND");
    }

    #[test]
    fn test_unauthorized_maps_to_401() {
        let api_error: ApiErrorResponse = RosterError::Unauthorized {
            message: "missing session token".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::UNAUTHORIZED);
        assert_eq!(api_error.error.code, "UNAUTHORIZED");
    }

    #[test]
    fn test_forbidden_maps_to_403() {
        let api_error: ApiErrorResponse = RosterError::Forbidden {
            message: "role does not permit rostering".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_invalid_series_maps_to_400() {
        let api_error: ApiErrorResponse = RosterError::InvalidSeries {
            message: "end time before start time".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "INVALID_SERIES");
    }

    #[test]
    fn test_config_error_maps_to_500() {
        let api_error: ApiErrorResponse = RosterError::ConfigNotFound {
            path: "/missing".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_deduction_outcome_serialization() {
        let outcome = DeductionOutcome::Applied {
            new_balance: Decimal::new(45952, 2),
        };
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("\"result\":\"applied\""));
        assert!(json.contains("\"new_balance\":\"459.52\""));
    }
}
