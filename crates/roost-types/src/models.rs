use serde::{Deserialize, Serialize};

/// Accounts are created once on registration and mutated in place on profile
/// updates; they are never physically removed, so user ids stay meaningful
/// as chirp authors forever.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub password_hash: String,
    #[serde(default)]
    pub is_privileged: bool,
}

/// A post. The body is stored already masked; see the profanity pass in
/// roost-api.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chirp {
    pub id: u64,
    pub body: String,
    pub author_id: u64,
}

/// Session record keyed by its opaque token string. Valid only while present
/// in the collection and not past `expires_at` (epoch seconds).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    pub user_id: u64,
    pub expires_at: i64,
}
