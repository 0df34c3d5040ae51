use axum::{Json, extract::State, http::HeaderMap, http::StatusCode, response::IntoResponse};
use chrono::Utc;

use roost_auth::refresh::{self, RefreshCheck};
use roost_auth::token;
use roost_types::api::AccessTokenResponse;

use crate::AppState;
use crate::error::ApiError;
use crate::middleware::bearer_token;

/// Exchange a refresh token for a fresh access token.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let presented = bearer_token(&headers)
        .ok_or(ApiError::Unauthorized)?
        .to_owned();

    let minted = tokio::task::spawn_blocking(move || {
        state.store.update(|doc| {
            let now = Utc::now().timestamp();
            match refresh::check_refresh(&mut doc.refresh_tokens, &presented, now) {
                RefreshCheck::Valid { user_id } => {
                    let access = token::issue_access(
                        &state.jwt_secret,
                        user_id,
                        now,
                        0,
                        token::EXCHANGE_TTL_SECS,
                    )?;
                    Ok(Some(access))
                }
                // The pruned record must still reach disk, so this arm is
                // not an error from the store's point of view.
                RefreshCheck::Expired => Ok(None),
                RefreshCheck::Missing => Err(ApiError::Unauthorized),
            }
        })
    })
    .await
    .map_err(|_| ApiError::Internal("blocking task failed"))??;

    match minted {
        Some(token) => Ok(Json(AccessTokenResponse { token })),
        None => Err(ApiError::Unauthorized),
    }
}

/// Revoke a refresh token server-side.
pub async fn revoke(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let presented = bearer_token(&headers)
        .ok_or(ApiError::Unauthorized)?
        .to_owned();

    tokio::task::spawn_blocking(move || {
        state.store.update(|doc| {
            if !refresh::revoke_refresh(&mut doc.refresh_tokens, &presented) {
                return Err(ApiError::NotFound);
            }
            Ok(())
        })
    })
    .await
    .map_err(|_| ApiError::Internal("blocking task failed"))??;

    Ok(StatusCode::NO_CONTENT)
}
