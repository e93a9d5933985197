// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Meridian Labs

//! Axum extractors enforcing the request-authorization contract.
//!
//! Each protected route names exactly one principal track by taking one of
//! these extractors:
//!
//! ```rust,ignore
//! async fn me(UserAuth(user): UserAuth) -> Json<UserPublic> { ... }
//! async fn stats(AdminAuth(admin): AdminAuth, ...) -> ... { ... }
//! ```
//!
//! The gate is pure: bearer header → track verifier → live store lookup →
//! principal record into the handler. Nothing is mutated on the way in,
//! and every failure renders the uniform 401 from [`AuthError`].

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::models::{Admin, User};
use crate::state::AppState;

use super::AuthError;

/// Pull the bearer token out of the Authorization header.
///
/// A missing header, a non-UTF-8 value, or a non-Bearer scheme are all the
/// same failure: the request is simply unauthenticated.
fn bearer_token(parts: &Parts) -> Result<&str, AuthError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::Unauthenticated)?
        .to_str()
        .map_err(|_| AuthError::Unauthenticated)?;

    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::Unauthenticated)
}

/// Extractor for user-track authentication.
///
/// Verifies against the user token service and resolves the subject in the
/// users collection.
pub struct UserAuth(pub User);

impl FromRequestParts<AppState> for UserAuth {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let subject_id = state.user_tokens.verify(token)?;

        let user = state
            .store
            .find_user_by_id(&subject_id)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?
            .ok_or(AuthError::PrincipalNotFound)?;

        Ok(UserAuth(user))
    }
}

/// Extractor for admin-track authentication.
///
/// Verifies against the admin token service and resolves the subject in
/// the admins collection. A user-track token presented here fails
/// signature verification; there is no cross-track fallback.
pub struct AdminAuth(pub Admin);

impl FromRequestParts<AppState> for AdminAuth {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let subject_id = state.admin_tokens.verify(token)?;

        let admin = state
            .store
            .find_admin_by_id(&subject_id)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?
            .ok_or(AuthError::PrincipalNotFound)?;

        Ok(AdminAuth(admin))
    }
}
