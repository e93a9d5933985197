// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Meridian Labs

//! Signed bearer tokens.
//!
//! One [`TokenService`] instance exists per principal track (user, admin),
//! each holding its own HMAC secret. A token is a compact JWT with three
//! claims: `sub` (principal id), `iat`, and `exp` (`iat` + 24 hours).
//! Tokens are never stored server-side; rotating a secret invalidates all
//! outstanding tokens for that track.
//!
//! Verification checks the signature against *this* instance's secret only.
//! There is no fallback to the other track's secret: a user-track token
//! presented to the admin verifier fails as invalid, even if the subject
//! ids were to collide across namespaces.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::AuthError;

/// Token lifetime: 24 hours from issuance.
pub const TOKEN_LIFETIME_HOURS: i64 = 24;

/// Clock skew tolerance on verification (60 seconds).
const CLOCK_SKEW_LEEWAY: u64 = 60;

/// Claim set carried by every token.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Subject: the principal id.
    sub: String,
    /// Issued-at (Unix seconds).
    iat: i64,
    /// Expiry (Unix seconds).
    exp: i64,
}

/// Issues and verifies signed, expiring bearer tokens for one track.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    lifetime: Duration,
}

impl TokenService {
    /// Build a service around a signing secret with the standard lifetime.
    pub fn new(secret: &[u8]) -> Self {
        Self::with_lifetime(secret, Duration::hours(TOKEN_LIFETIME_HOURS))
    }

    /// Build a service with an explicit lifetime. Exposed for tests that
    /// need already-expired tokens.
    pub fn with_lifetime(secret: &[u8], lifetime: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            lifetime,
        }
    }

    /// Issue a token for `subject_id`.
    pub fn issue(&self, subject_id: &str) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject_id.to_string(),
            iat: now.timestamp(),
            exp: (now + self.lifetime).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Internal(e.to_string()))
    }

    /// Verify a token and return its subject id.
    ///
    /// Fails with [`AuthError::TokenExpired`] past `exp`, and with
    /// [`AuthError::TokenInvalid`] for a bad signature, malformed payload,
    /// or a token signed by the other track's secret.
    pub fn verify(&self, token: &str) -> Result<String, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = CLOCK_SKEW_LEEWAY;
        validation.validate_aud = false;

        let token_data =
            decode::<Claims>(token, &self.decoding, &validation).map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::TokenInvalid,
            })?;

        Ok(token_data.claims.sub)
    }
}
