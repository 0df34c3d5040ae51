//! Token authority: password digests, signed access tokens, and opaque
//! refresh tokens.
//!
//! Stateless with respect to process memory: the refresh functions operate
//! only on the `refresh_tokens` collection the caller hands in, so all
//! persistence decisions stay with the caller.

pub mod password;
pub mod refresh;
pub mod token;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Hashing or digest parsing failed. Not a credential mismatch.
    #[error("password hashing failed")]
    Hashing,
    #[error("token signing failed")]
    Signing,
    /// Forged, malformed, and expired credentials all collapse here; the
    /// distinction is never surfaced.
    #[error("unauthorized")]
    Unauthorized,
}
