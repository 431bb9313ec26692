//! HTTP API for the rostering engine.
//!
//! This module contains the axum router, the request/response types, the
//! shared application state, and the tenant/session guard middleware.

mod auth;
mod handlers;
mod request;
mod response;
mod state;

pub use auth::{AuthContext, SESSION_HEADER};
pub use handlers::create_router;
pub use request::{
    CompleteShiftRequest, CreateClientRequest, CreateSeriesRequest, CreateSessionRequest,
    UpsertBudgetRequest,
};
pub use response::{
    ApiError, ApiErrorResponse, BillingSummary, BudgetView, CompleteShiftResponse,
    SeriesCreatedResponse, SessionResponse,
};
pub use state::AppState;
