//! Tenant/session guard middleware.
//!
//! Every protected route passes through [`require_session`], which resolves
//! the bearer token and re-validates that the session's user still exists
//! under the claimed tenant before the request proceeds. Handlers read the
//! resulting [`AuthContext`] from request extensions and evaluate role
//! permissions through [`Role::permits`].
//!
//! [`Role::permits`]: crate::models::Role::permits

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;
use uuid::Uuid;

use crate::models::User;

use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Header carrying the session token.
pub const SESSION_HEADER: &str = "x-session-token";

/// Authenticated request context inserted by the guard.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// The authenticated user.
    pub user: User,
    /// The tenant every store access is scoped to.
    pub tenant_id: Uuid,
}

/// Middleware enforcing the session/tenant guard.
///
/// Responds 401 when the token is missing, malformed, or unknown; 403 when
/// the session's user has been removed or no longer belongs to the tenant
/// the session claims.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Uuid::parse_str(value).ok());

    let Some(token) = token else {
        warn!("Request rejected: missing or malformed session token");
        return unauthorized("missing or malformed session token");
    };

    match state.store().resolve_session(token) {
        Ok(Some((session, user))) => {
            request.extensions_mut().insert(AuthContext {
                user,
                tenant_id: session.tenant_id,
            });
            next.run(request).await
        }
        Ok(None) => {
            warn!("Request rejected: unknown session token");
            unauthorized("unknown session token")
        }
        Err(err) => {
            warn!(error = %err, "Request rejected by tenant guard");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

fn unauthorized(message: &str) -> Response {
    ApiErrorResponse {
        status: axum::http::StatusCode::UNAUTHORIZED,
        error: ApiError::unauthorized(message),
    }
    .into_response()
}
