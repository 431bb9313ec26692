//! HTTP request handlers for the rostering engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Extension, Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{
    BudgetLedgerEntry, Client, Permission, ShiftInstance, ShiftStatus, weekday_label,
};
use crate::rostering::{calculate_shift_cost, expand_series};
use crate::store::BudgetCharge;

use super::auth::{AuthContext, require_session};
use super::request::{
    CompleteShiftRequest, CreateClientRequest, CreateSeriesRequest, CreateSessionRequest,
    UpsertBudgetRequest,
};
use super::response::{
    ApiError, ApiErrorResponse, BillingSummary, BudgetView, CompleteShiftResponse,
    SeriesCreatedResponse, SessionResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
///
/// Every route except `POST /sessions` sits behind the session/tenant
/// guard.
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .route(
            "/clients",
            post(create_client_handler).get(list_clients_handler),
        )
        .route(
            "/clients/:id/budgets",
            put(upsert_budget_handler).get(list_budgets_handler),
        )
        .route("/shift-series", post(create_series_handler))
        .route("/shifts", get(list_shifts_handler))
        .route("/shifts/:id/complete", post(complete_shift_handler))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    Router::new()
        .route("/sessions", post(create_session_handler))
        .merge(protected)
        .with_state(state)
}

fn require_permission(
    auth: &AuthContext,
    permission: Permission,
) -> Result<(), ApiErrorResponse> {
    if auth.user.role.permits(permission) {
        Ok(())
    } else {
        Err(crate::error::RosterError::Forbidden {
            message: "role does not permit this operation".to_string(),
        }
        .into())
    }
}

/// Handler for POST /sessions.
///
/// Mints a session token for an existing user. Full credential-based
/// authentication is out of scope; this is the bootstrap for the guard.
async fn create_session_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateSessionRequest>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let session = state.store().create_session(request.user_id)?;
    let (_, user) = state
        .store()
        .resolve_session(session.token)?
        .ok_or(crate::error::RosterError::NotFound {
            entity: "Session",
            id: session.token,
        })?;
    info!(user_id = %user.id, tenant_id = %session.tenant_id, "Session created");
    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            token: session.token,
            user_id: session.user_id,
            tenant_id: session.tenant_id,
            role: user.role,
        }),
    ))
}

/// Handler for POST /clients.
async fn create_client_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<CreateClientRequest>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    require_permission(&auth, Permission::ManageClients)?;

    let client = Client {
        id: Uuid::new_v4(),
        tenant_id: auth.tenant_id,
        name: request.name,
        ndis_number: request.ndis_number,
        created_at: Utc::now(),
    };
    state.store().create_client(client.clone());
    info!(client_id = %client.id, tenant_id = %auth.tenant_id, "Client created");
    Ok((StatusCode::CREATED, Json(client)))
}

/// Handler for GET /clients.
async fn list_clients_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    require_permission(&auth, Permission::View)?;
    Ok(Json(state.store().list_clients(auth.tenant_id)))
}

/// Handler for PUT /clients/:id/budgets.
async fn upsert_budget_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(client_id): Path<Uuid>,
    Json(request): Json<UpsertBudgetRequest>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    require_permission(&auth, Permission::ManageClients)?;

    let entry = BudgetLedgerEntry {
        client_id,
        category: request.category,
        remaining: request.remaining,
        note: request.note,
    };
    state.store().upsert_budget(auth.tenant_id, entry.clone())?;
    info!(
        client_id = %client_id,
        category = %entry.category,
        remaining = %entry.remaining,
        "Budget balance set"
    );
    Ok(Json(entry))
}

/// Handler for GET /clients/:id/budgets.
async fn list_budgets_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(client_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    require_permission(&auth, Permission::View)?;

    let entries = state.store().list_budgets(auth.tenant_id, client_id)?;
    let views: Vec<BudgetView> = entries
        .into_iter()
        .map(|entry| BudgetView {
            category_name: state.scheme().describe_category(entry.category).name.clone(),
            category: entry.category,
            remaining: entry.remaining,
            note: entry.note,
        })
        .collect();
    Ok(Json(views))
}

/// Handler for POST /shift-series.
///
/// Validates the request, deduplicates the weekday selection, expands the
/// pattern, and persists each occurrence as an independent shift row. The
/// response reports the created count so a zero-shift expansion is visible
/// feedback rather than a silent no-op.
async fn create_series_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    payload: Result<Json<CreateSeriesRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    // Correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing shift-series request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => ApiError::new(
                    "MISSING_CONTENT_TYPE",
                    "Content-Type must be application/json",
                ),
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return Err(ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error,
            });
        }
    };

    require_permission(&auth, Permission::ManageRoster)?;

    // Referenced records must exist under the requesting tenant.
    if let Some(client_id) = request.client_id {
        state.store().get_client(auth.tenant_id, client_id)?;
    }

    let series = request.into_series()?;
    let occurrences = expand_series(&series);
    let series_tag = format!("series_{}", Uuid::new_v4().simple());

    // One independent insert per occurrence; there is no batch atomicity.
    let mut shifts: Vec<ShiftInstance> = Vec::with_capacity(occurrences.len());
    for occurrence in occurrences {
        let shift = ShiftInstance {
            id: Uuid::new_v4(),
            tenant_id: auth.tenant_id,
            title: series.title.clone(),
            start_time: occurrence.start,
            end_time: occurrence.end,
            user_id: series.user_id,
            client_id: series.client_id,
            series_tag: series_tag.clone(),
            weekday_label: weekday_label(occurrence.weekday).to_string(),
            status: ShiftStatus::Scheduled,
        };
        state.store().insert_shift(shift.clone());
        shifts.push(shift);
    }

    info!(
        correlation_id = %correlation_id,
        tenant_id = %auth.tenant_id,
        series_tag = %series_tag,
        created_count = shifts.len(),
        "Shift series expanded"
    );

    Ok((
        StatusCode::CREATED,
        [(header::CONTENT_TYPE, "application/json")],
        Json(SeriesCreatedResponse {
            series_tag,
            created_count: shifts.len(),
            shifts,
        }),
    ))
}

/// Handler for GET /shifts.
async fn list_shifts_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    require_permission(&auth, Permission::View)?;
    Ok(Json(state.store().list_shifts(auth.tenant_id)))
}

/// Handler for POST /shifts/:id/complete.
///
/// Classifies the shift from its start hour, costs it against the rate
/// schedule for the worked ratio, and attempts the conditional budget
/// deduction. An insufficient balance does not fail the request; the
/// outcome is reported in the response body.
async fn complete_shift_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(shift_id): Path<Uuid>,
    Json(request): Json<CompleteShiftRequest>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    require_permission(&auth, Permission::CompleteShifts)?;

    let shift = state.store().get_shift(auth.tenant_id, shift_id)?;

    if shift.client_id.is_some() {
        let cost = calculate_shift_cost(&shift, request.ratio, state.scheme())?;
        let charge = BudgetCharge {
            category: cost.category,
            cost: cost.amount,
            note: request.note,
        };
        let (completed, outcome) =
            state
                .store()
                .complete_shift(auth.tenant_id, shift_id, Some(charge))?;

        info!(
            correlation_id = %correlation_id,
            shift_id = %shift_id,
            shift_type = %cost.shift_type,
            cost = %cost.amount,
            "Shift completed"
        );

        let billing = outcome.map(|deduction| BillingSummary {
            shift_type: cost.shift_type,
            category: cost.category,
            hours: cost.hours,
            rate: cost.rate,
            cost: cost.amount,
            deduction,
        });
        Ok(Json(CompleteShiftResponse {
            shift: completed,
            billing,
        }))
    } else {
        let (completed, _) = state.store().complete_shift(auth.tenant_id, shift_id, None)?;
        info!(
            correlation_id = %correlation_id,
            shift_id = %shift_id,
            "Unassigned shift completed without deduction"
        );
        Ok(Json(CompleteShiftResponse {
            shift: completed,
            billing: None,
        }))
    }
}
