use serde::{Deserialize, Serialize};

// -- Users --

/// Shared by registration and profile update; both take a full credential
/// pair.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: u64,
    pub email: String,
    pub is_privileged: bool,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// Requested access-token lifetime. Out-of-range values silently fall
    /// back to the login default.
    #[serde(default)]
    pub expires_in_seconds: i64,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub id: u64,
    pub email: String,
    pub is_privileged: bool,
    pub token: String,
    pub refresh_token: String,
}

// -- Chirps --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChirpRequest {
    pub body: String,
}

#[derive(Debug, Serialize)]
pub struct CleanedBodyResponse {
    pub cleaned_body: String,
}

// -- Sessions --

#[derive(Debug, Serialize)]
pub struct AccessTokenResponse {
    pub token: String,
}

// -- Webhooks --

#[derive(Debug, Deserialize)]
pub struct WebhookRequest {
    pub event: String,
    pub data: WebhookData,
}

#[derive(Debug, Deserialize)]
pub struct WebhookData {
    pub user_id: u64,
}

// -- Errors --

/// Every error response is this one envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
