// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Meridian Labs

//! Authentication errors.
//!
//! Every variant renders as a uniform "unauthorized" outcome; the
//! `error_code` in the body is an internal diagnostic, not something
//! clients should branch on beyond authenticated-vs-not.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Authentication and authorization failure taxonomy.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Missing or malformed `Authorization: Bearer` header.
    #[error("Authorization header is missing or malformed")]
    Unauthenticated,
    /// Bad signature, malformed claims, or a token signed for the other
    /// track.
    #[error("Token is invalid")]
    TokenInvalid,
    /// Valid signature, but past `exp`.
    #[error("Token has expired")]
    TokenExpired,
    /// Valid token whose subject no longer exists in the configured
    /// collection (e.g. the principal was deleted after issuance).
    #[error("Principal not found")]
    PrincipalNotFound,
    /// Login failure. Deliberately identical for "no such identity" and
    /// "wrong password" so usernames cannot be enumerated.
    #[error("Invalid credentials")]
    InvalidCredentials,
    /// Password fails validation (e.g. longer than bcrypt's 72-byte input
    /// bound). Rejected rather than silently truncated.
    #[error("Password is invalid: {0}")]
    PasswordInvalid(String),
    /// Hashing or signing machinery failed.
    #[error("Internal authentication error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: String,
    error_code: String,
}

impl AuthError {
    /// Internal diagnostic code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::Unauthenticated => "unauthenticated",
            AuthError::TokenInvalid => "token_invalid",
            AuthError::TokenExpired => "token_expired",
            AuthError::PrincipalNotFound => "principal_not_found",
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::PasswordInvalid(_) => "password_invalid",
            AuthError::Internal(_) => "internal_error",
        }
    }

    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Unauthenticated
            | AuthError::TokenInvalid
            | AuthError::TokenExpired
            | AuthError::PrincipalNotFound
            | AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::PasswordInvalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(AuthErrorBody {
            error: self.to_string(),
            error_code: self.error_code().to_string(),
        });
        (status, body).into_response()
    }
}
