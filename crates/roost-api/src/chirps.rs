use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use roost_types::api::{ChirpRequest, CleanedBodyResponse};

use crate::AppState;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::profanity;

pub const MAX_CHIRP_CHARS: usize = 140;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub author_id: Option<u64>,
    pub sort: Option<String>,
}

pub async fn create_chirp(
    State(state): State<AppState>,
    Extension(AuthUser(author_id)): Extension<AuthUser>,
    Json(req): Json<ChirpRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let body = checked_body(&req.body)?;

    let chirp = tokio::task::spawn_blocking(move || {
        state
            .store
            .update(|doc| Ok::<_, ApiError>(doc.create_chirp(author_id, body).clone()))
    })
    .await
    .map_err(|_| ApiError::Internal("blocking task failed"))??;

    Ok((StatusCode::CREATED, Json(chirp)))
}

pub async fn list_chirps(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let chirps = tokio::task::spawn_blocking(move || {
        state.store.read(|doc| Ok::<_, ApiError>(doc.chirps_sorted()))
    })
    .await
    .map_err(|_| ApiError::Internal("blocking task failed"))??;

    let mut chirps = match params.author_id {
        Some(author_id) => chirps
            .into_iter()
            .filter(|c| c.author_id == author_id)
            .collect(),
        None => chirps,
    };
    if params.sort.as_deref() == Some("desc") {
        chirps.reverse();
    }

    Ok(Json(chirps))
}

pub async fn get_chirp(
    State(state): State<AppState>,
    Path(chirp_id): Path<u64>,
) -> Result<impl IntoResponse, ApiError> {
    let chirp = tokio::task::spawn_blocking(move || {
        state
            .store
            .read(|doc| doc.chirps.get(&chirp_id).cloned().ok_or(ApiError::NotFound))
    })
    .await
    .map_err(|_| ApiError::Internal("blocking task failed"))??;

    Ok(Json(chirp))
}

/// Only the author may delete a chirp; anyone else holding a valid token
/// gets a 403, not a 401.
pub async fn delete_chirp(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(chirp_id): Path<u64>,
) -> Result<impl IntoResponse, ApiError> {
    tokio::task::spawn_blocking(move || {
        state.store.update(|doc| {
            let chirp = doc.chirps.get(&chirp_id).ok_or(ApiError::NotFound)?;
            if chirp.author_id != user_id {
                return Err(ApiError::Forbidden);
            }
            doc.chirps.remove(&chirp_id);
            Ok(())
        })
    })
    .await
    .map_err(|_| ApiError::Internal("blocking task failed"))??;

    Ok(StatusCode::NO_CONTENT)
}

/// Length check plus masking, no persistence.
pub async fn validate_chirp(
    Json(req): Json<ChirpRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cleaned_body = checked_body(&req.body)?;
    Ok(Json(CleanedBodyResponse { cleaned_body }))
}

fn checked_body(body: &str) -> Result<String, ApiError> {
    if body.chars().count() > MAX_CHIRP_CHARS {
        return Err(ApiError::Validation("message is too long"));
    }
    Ok(profanity::clean_body(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_at_limit_passes() {
        let body = "a".repeat(MAX_CHIRP_CHARS);
        assert_eq!(checked_body(&body).unwrap(), body);
    }

    #[test]
    fn oversized_body_is_rejected() {
        let body = "a".repeat(MAX_CHIRP_CHARS + 1);
        assert!(matches!(
            checked_body(&body),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn accepted_body_is_masked() {
        assert_eq!(
            checked_body("hello kerfuffle world").unwrap(),
            "hello **** world"
        );
    }
}
