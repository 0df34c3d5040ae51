use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::Utc;

use roost_auth::{password, refresh, token};
use roost_types::api::{CredentialsRequest, LoginRequest, LoginResponse, UserResponse};

use crate::AppState;
use crate::error::ApiError;
use crate::middleware::AuthUser;

pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    check_credentials(&req.email, &req.password)?;

    // Password hashing is deliberately slow; keep it off the async runtime
    // together with the store round-trip.
    let resp = tokio::task::spawn_blocking(move || {
        state.store.update(|doc| {
            if doc.emails.contains_key(&req.email) {
                return Err(ApiError::EmailTaken);
            }
            let hash = password::hash_password(&req.password)?;
            let user = doc.create_user(&req.email, hash);
            Ok(UserResponse {
                id: user.id,
                email: user.email.clone(),
                is_privileged: user.is_privileged,
            })
        })
    })
    .await
    .map_err(|_| ApiError::Internal("blocking task failed"))??;

    Ok((StatusCode::CREATED, Json(resp)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    check_credentials(&req.email, &req.password)?;

    let resp = tokio::task::spawn_blocking(move || {
        state.store.update(|doc| {
            // Unknown email and wrong password answer identically.
            let user = doc.user_by_email(&req.email).ok_or(ApiError::Unauthorized)?;
            if !password::verify_password(&user.password_hash, &req.password)? {
                return Err(ApiError::Unauthorized);
            }
            let (id, email, is_privileged) = (user.id, user.email.clone(), user.is_privileged);

            let now = Utc::now().timestamp();
            let access = token::issue_access(
                &state.jwt_secret,
                id,
                now,
                req.expires_in_seconds,
                token::LOGIN_TTL_SECS,
            )?;
            let refresh_token = refresh::issue_refresh(&mut doc.refresh_tokens, id, now);

            Ok(LoginResponse {
                id,
                email,
                is_privileged,
                token: access,
                refresh_token,
            })
        })
    })
    .await
    .map_err(|_| ApiError::Internal("blocking task failed"))??;

    Ok(Json(resp))
}

pub async fn update_user(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Json(req): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    check_credentials(&req.email, &req.password)?;

    let resp = tokio::task::spawn_blocking(move || {
        state.store.update(|doc| {
            // Refuse to steal another account's email; the index stays a
            // uniqueness index.
            if doc
                .emails
                .get(&req.email)
                .is_some_and(|&owner| owner != user_id)
            {
                return Err(ApiError::EmailTaken);
            }
            let hash = password::hash_password(&req.password)?;
            let user = doc
                .update_user_credentials(user_id, &req.email, hash)
                .ok_or(ApiError::Unauthorized)?;
            Ok(UserResponse {
                id: user.id,
                email: user.email.clone(),
                is_privileged: user.is_privileged,
            })
        })
    })
    .await
    .map_err(|_| ApiError::Internal("blocking task failed"))??;

    Ok(Json(resp))
}

fn check_credentials(email: &str, password: &str) -> Result<(), ApiError> {
    if email.is_empty() {
        return Err(ApiError::Validation("no email address provided"));
    }
    if password.is_empty() {
        return Err(ApiError::Validation("password can't be blank"));
    }
    Ok(())
}
