//! Admin session tokens: generation, storage hashing, and expiry rules.
//!
//! A session token is 32 random bytes, hex-encoded, handed to the browser in
//! the `admin_session` cookie. Only an HMAC of the token (keyed by the server
//! session secret) is ever persisted, so the store alone cannot be used to
//! forge a cookie.

use chrono::TimeDelta;
use rand::RngCore;

use crate::hashing::{hex_encode, hmac_sha256_hex};
use crate::types::Timestamp;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE_NAME: &str = "admin_session";

/// Default session lifetime in days.
pub const DEFAULT_SESSION_TTL_DAYS: i64 = 7;

/// Number of random bytes in a session token (256 bits).
pub const TOKEN_BYTES: usize = 32;

/// A freshly generated token and the hash to persist for it.
pub struct IssuedToken {
    /// Sent to the client exactly once, never stored.
    pub plaintext: String,
    /// Stored server-side and used for lookups.
    pub hash: String,
}

/// Generate a new session token from the thread-local CSPRNG.
pub fn generate_session_token(secret: &str) -> IssuedToken {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    let plaintext = hex_encode(bytes);
    let hash = hash_session_token(secret, &plaintext);
    IssuedToken { plaintext, hash }
}

/// Hash a presented token the same way it was hashed at issue time.
pub fn hash_session_token(secret: &str, token: &str) -> String {
    hmac_sha256_hex(secret.as_bytes(), token.as_bytes())
}

/// A session is expired from `expires_at` onwards; the boundary is exclusive.
pub fn is_expired(expires_at: Timestamp, now: Timestamp) -> bool {
    expires_at <= now
}

/// Session lifetime as a duration.
pub fn session_ttl(days: i64) -> TimeDelta {
    TimeDelta::days(days)
}
