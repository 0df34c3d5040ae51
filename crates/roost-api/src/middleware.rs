use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::Response;

use crate::AppState;
use crate::error::ApiError;

/// Authenticated subject extracted from a validated access token.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub u64);

/// Validate the bearer access token and stash the subject id for handlers.
/// A missing or malformed header is indistinguishable from a bad token.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers()).ok_or(ApiError::Unauthorized)?;
    let user_id = roost_auth::token::validate_access(&state.jwt_secret, token)
        .map_err(|_| ApiError::Unauthorized)?;
    req.extensions_mut().insert(AuthUser(user_id));
    Ok(next.run(req).await)
}

/// `Authorization: Bearer <token>`, used both for access JWTs and for the
/// opaque refresh tokens presented to the session endpoints.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// `Authorization: ApiKey <key>`, the webhook caller credential.
pub fn api_key(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("ApiKey ")
}
