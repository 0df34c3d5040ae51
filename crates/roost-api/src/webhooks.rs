use axum::{Json, extract::State, http::HeaderMap, http::StatusCode};

use roost_types::api::WebhookRequest;

use crate::AppState;
use crate::error::ApiError;
use crate::middleware::api_key;

/// Payment-provider webhook that grants the privileged flag. Idempotent: an
/// already-privileged user upgrades to 204 all the same, and events other
/// than `user.upgraded` are acknowledged without touching the store.
pub async fn privilege_upgrade(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<WebhookRequest>,
) -> Result<StatusCode, ApiError> {
    let key = api_key(&headers).ok_or(ApiError::Unauthorized)?;
    if key != state.webhook_key {
        return Err(ApiError::Unauthorized);
    }
    if req.event != "user.upgraded" {
        return Ok(StatusCode::NO_CONTENT);
    }

    tokio::task::spawn_blocking(move || {
        state.store.update(|doc| {
            let user = doc
                .users
                .get_mut(&req.data.user_id)
                .ok_or(ApiError::NotFound)?;
            user.is_privileged = true;
            Ok::<(), ApiError>(())
        })
    })
    .await
    .map_err(|_| ApiError::Internal("blocking task failed"))??;

    Ok(StatusCode::NO_CONTENT)
}
