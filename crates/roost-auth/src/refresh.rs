use std::collections::HashMap;

use rand_core::{OsRng, RngCore};

use roost_types::models::RefreshToken;

/// Refresh tokens live for 60 days from issuance.
pub const REFRESH_TTL_SECS: i64 = 60 * 24 * 60 * 60;

const TOKEN_BYTES: usize = 32;

/// Outcome of presenting a refresh token for exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshCheck {
    Valid {
        user_id: u64,
    },
    /// Present but past expiry. The record has already been pruned from the
    /// collection; the caller must persist that removal before rejecting.
    Expired,
    Missing,
}

/// Mint a new opaque refresh token for `user_id` and record it in the
/// collection. 32 random bytes rendered as hex; in 2^256 space a collision
/// check against existing tokens would be pointless.
pub fn issue_refresh(
    tokens: &mut HashMap<String, RefreshToken>,
    user_id: u64,
    now: i64,
) -> String {
    let mut buf = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut buf);
    let token = hex::encode(buf);
    tokens.insert(
        token.clone(),
        RefreshToken {
            user_id,
            expires_at: now + REFRESH_TTL_SECS,
        },
    );
    token
}

/// Look up a refresh token. Validity is rechecked on every use, never
/// cached; an expired record is removed as a side effect.
pub fn check_refresh(
    tokens: &mut HashMap<String, RefreshToken>,
    token: &str,
    now: i64,
) -> RefreshCheck {
    match tokens.get(token) {
        None => RefreshCheck::Missing,
        Some(record) if now < record.expires_at => RefreshCheck::Valid {
            user_id: record.user_id,
        },
        Some(_) => {
            tokens.remove(token);
            RefreshCheck::Expired
        }
    }
}

/// Delete a refresh token unconditionally. Returns whether it was present.
pub fn revoke_refresh(tokens: &mut HashMap<String, RefreshToken>, token: &str) -> bool {
    tokens.remove(token).is_some()
}
