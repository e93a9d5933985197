// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Meridian Labs

//! User registration and login.

use axum::{extract::State, http::StatusCode, Json};
use tokio::task;

use crate::auth::{password, AuthError, UserAuth};
use crate::error::ApiError;
use crate::models::{
    new_id, now_rfc3339, AuthResponse, LoginRequest, RegisterRequest, User, UserPublic,
};
use crate::sanitize;
use crate::state::AppState;

/// Register a new user account.
///
/// The email must be unused; uniqueness is enforced by the store's unique
/// index, so a concurrent duplicate registration fails here rather than
/// corrupting the collection.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Invalid registration data"),
        (status = 409, description = "Email already registered"),
        (status = 422, description = "Password fails validation"),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let name = sanitize::clean(&request.name);
    let email = request.email.trim().to_lowercase();
    let country = sanitize::clean(&request.country);

    if name.is_empty() || country.is_empty() {
        return Err(ApiError::bad_request("name and country are required"));
    }
    if !email.contains('@') {
        return Err(ApiError::bad_request("a valid email address is required"));
    }
    if request.password.is_empty() {
        return Err(ApiError::bad_request("password is required"));
    }

    let plaintext = request.password;
    let password_hash = task::spawn_blocking(move || password::hash(&plaintext))
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?
        .map_err(ApiError::from)?;

    let user = User {
        id: new_id(),
        name,
        email,
        password_hash,
        country,
        created_at: now_rfc3339(),
    };

    // Duplicate email surfaces from the store as a 409.
    state.store.insert_user(user.clone()).await?;

    let token = state.user_tokens.issue(&user.id).map_err(ApiError::from)?;
    tracing::info!(user_id = %user.id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: user.into(),
        }),
    ))
}

/// Log in with email and password.
///
/// Unknown email and wrong password are indistinguishable to the caller.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AuthError> {
    let email = request.email.trim().to_lowercase();
    let user = state
        .store
        .find_user_by_email(&email)
        .await
        .map_err(|e| AuthError::Internal(e.to_string()))?
        .ok_or(AuthError::InvalidCredentials)?;

    let hash = user.password_hash.clone();
    let plaintext = request.password;
    let valid = task::spawn_blocking(move || password::verify(&plaintext, &hash))
        .await
        .map_err(|e| AuthError::Internal(e.to_string()))??;

    if !valid {
        return Err(AuthError::InvalidCredentials);
    }

    let token = state.user_tokens.issue(&user.id)?;
    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// Return the authenticated user's public profile.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Auth",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Current user", body = UserPublic),
        (status = 401, description = "Missing or invalid token"),
    )
)]
pub async fn me(UserAuth(user): UserAuth) -> Json<UserPublic> {
    Json(user.into())
}
