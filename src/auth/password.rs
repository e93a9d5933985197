// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Meridian Labs

//! Password hashing.
//!
//! Bcrypt with a per-hash random salt (cost factor 12). The pair is pure:
//! no I/O, no shared state. Comparison is constant-time inside bcrypt's
//! own verify.
//!
//! Bcrypt only reads the first 72 bytes of its input; longer passwords are
//! rejected up front rather than silently truncated. Callers on the async
//! runtime should run both functions through `tokio::task::spawn_blocking`,
//! hashing is deliberately expensive.

use super::AuthError;

/// Bcrypt's hard input limit, in bytes.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Work factor for new hashes.
const COST: u32 = 12;

/// Hash a plaintext password into a self-describing `$2b$12$...` string.
///
/// Two calls with the same input produce different strings (random salt);
/// both verify against the original password.
pub fn hash(plaintext: &str) -> Result<String, AuthError> {
    check_length(plaintext)?;
    bcrypt::hash(plaintext, COST).map_err(|e| AuthError::Internal(e.to_string()))
}

/// Verify a plaintext password against a stored hash.
///
/// Returns `Ok(false)` for a wrong password; an unparseable hash string is
/// an error, not a mismatch.
pub fn verify(plaintext: &str, hashed: &str) -> Result<bool, AuthError> {
    if plaintext.len() > MAX_PASSWORD_BYTES {
        // Anything past the bound could never have been hashed by us.
        return Ok(false);
    }
    bcrypt::verify(plaintext, hashed).map_err(|e| AuthError::Internal(e.to_string()))
}

fn check_length(plaintext: &str) -> Result<(), AuthError> {
    if plaintext.len() > MAX_PASSWORD_BYTES {
        return Err(AuthError::PasswordInvalid(format!(
            "password exceeds {MAX_PASSWORD_BYTES} bytes"
        )));
    }
    Ok(())
}
