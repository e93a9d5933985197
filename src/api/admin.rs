// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Meridian Labs

//! Administrator endpoints.
//!
//! Everything here except `login` sits behind the admin-track bearer gate
//! ([`AdminAuth`]); a user-track token never passes it.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tokio::task;

use crate::auth::{password, AdminAuth, AuthError};
use crate::error::ApiError;
use crate::models::{
    new_id, now_rfc3339, AdminLoginRequest, AdminLoginResponse, AdminStats, Article, ArticleInput,
    ChangePasswordRequest, Contact, InvestorInquiry, MessageResponse, UserPublic,
};
use crate::state::AppState;

/// Minimum accepted length for a replacement admin password.
const MIN_PASSWORD_LEN: usize = 8;

/// Log in to the admin dashboard.
///
/// Reports `requires_password_change` so the frontend can force the
/// bootstrap admin straight into the change-password flow.
#[utoipa::path(
    post,
    path = "/api/admin/login",
    tag = "Admin",
    request_body = AdminLoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AdminLoginResponse),
        (status = 401, description = "Invalid credentials"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<AdminLoginRequest>,
) -> Result<Json<AdminLoginResponse>, AuthError> {
    // Same failure for unknown username and wrong password; no
    // enumeration signal.
    let admin = state
        .store
        .find_admin_by_username(request.username.trim())
        .await
        .map_err(|e| AuthError::Internal(e.to_string()))?
        .ok_or(AuthError::InvalidCredentials)?;

    let hash = admin.password_hash.clone();
    let plaintext = request.password;
    let valid = task::spawn_blocking(move || password::verify(&plaintext, &hash))
        .await
        .map_err(|e| AuthError::Internal(e.to_string()))??;

    if !valid {
        return Err(AuthError::InvalidCredentials);
    }

    let token = state.admin_tokens.issue(&admin.id)?;
    Ok(Json(AdminLoginResponse {
        token,
        requires_password_change: admin.requires_password_change,
    }))
}

/// Change the authenticated admin's password.
///
/// The current password is re-verified even though the caller already
/// holds a valid token: a stolen token alone must not be enough to take
/// over the credentials. Success clears `requires_password_change`.
#[utoipa::path(
    post,
    path = "/api/admin/change-password",
    tag = "Admin",
    security(("bearer" = [])),
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 400, description = "New password rejected"),
        (status = 401, description = "Invalid token or wrong current password"),
    )
)]
pub async fn change_password(
    State(state): State<AppState>,
    AdminAuth(admin): AdminAuth,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    if request.new_password.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::bad_request(format!(
            "new password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    let hash = admin.password_hash.clone();
    let current = request.current_password;
    let valid = task::spawn_blocking(move || password::verify(&current, &hash))
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?
        .map_err(ApiError::from)?;

    if !valid {
        // Stored hash stays untouched.
        return Err(AuthError::InvalidCredentials.into());
    }

    let new_plaintext = request.new_password;
    let new_hash = task::spawn_blocking(move || password::hash(&new_plaintext))
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?
        .map_err(ApiError::from)?;

    state
        .store
        .update_admin_password(&admin.id, &new_hash)
        .await?;
    tracing::info!(admin_id = %admin.id, "admin password changed");

    Ok(Json(MessageResponse {
        message: "Password changed successfully".into(),
    }))
}

/// Dashboard totals.
#[utoipa::path(
    get,
    path = "/api/admin/stats",
    tag = "Admin",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Collection totals", body = AdminStats),
        (status = 401, description = "Missing or invalid admin token"),
    )
)]
pub async fn stats(
    State(state): State<AppState>,
    AdminAuth(_admin): AdminAuth,
) -> Result<Json<AdminStats>, ApiError> {
    Ok(Json(AdminStats {
        total_users: state.store.count_users().await?,
        total_articles: state.store.count_articles().await?,
        total_contacts: state.store.count_contacts().await?,
        total_inquiries: state.store.count_inquiries().await?,
    }))
}

/// List all registered users (public views only).
#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = "Admin",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "All users", body = [UserPublic]),
        (status = 401, description = "Missing or invalid admin token"),
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    AdminAuth(_admin): AdminAuth,
) -> Result<Json<Vec<UserPublic>>, ApiError> {
    let users = state.store.list_users().await?;
    Ok(Json(users.into_iter().map(UserPublic::from).collect()))
}

/// List all contact submissions.
#[utoipa::path(
    get,
    path = "/api/admin/contacts",
    tag = "Admin",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "All contact messages", body = [Contact]),
        (status = 401, description = "Missing or invalid admin token"),
    )
)]
pub async fn list_contacts(
    State(state): State<AppState>,
    AdminAuth(_admin): AdminAuth,
) -> Result<Json<Vec<Contact>>, ApiError> {
    Ok(Json(state.store.list_contacts().await?))
}

/// List all investor inquiries.
#[utoipa::path(
    get,
    path = "/api/admin/investor-inquiries",
    tag = "Admin",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "All investor inquiries", body = [InvestorInquiry]),
        (status = 401, description = "Missing or invalid admin token"),
    )
)]
pub async fn list_inquiries(
    State(state): State<AppState>,
    AdminAuth(_admin): AdminAuth,
) -> Result<Json<Vec<InvestorInquiry>>, ApiError> {
    Ok(Json(state.store.list_inquiries().await?))
}

/// List all articles with their full bodies.
#[utoipa::path(
    get,
    path = "/api/admin/articles",
    tag = "Admin",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "All articles", body = [Article]),
        (status = 401, description = "Missing or invalid admin token"),
    )
)]
pub async fn list_articles(
    State(state): State<AppState>,
    AdminAuth(_admin): AdminAuth,
) -> Result<Json<Vec<Article>>, ApiError> {
    Ok(Json(state.store.list_articles().await?))
}

/// Publish a new article.
#[utoipa::path(
    post,
    path = "/api/admin/articles",
    tag = "Admin",
    security(("bearer" = [])),
    request_body = ArticleInput,
    responses(
        (status = 201, description = "Article created", body = Article),
        (status = 401, description = "Missing or invalid admin token"),
    )
)]
pub async fn create_article(
    State(state): State<AppState>,
    AdminAuth(_admin): AdminAuth,
    Json(input): Json<ArticleInput>,
) -> Result<(StatusCode, Json<Article>), ApiError> {
    let article = Article {
        id: new_id(),
        title: input.title,
        excerpt: input.excerpt,
        category: input.category,
        content: input.content,
        published_at: now_rfc3339(),
    };
    state.store.insert_article(article.clone()).await?;
    Ok((StatusCode::CREATED, Json(article)))
}

/// Replace an article's editable fields.
#[utoipa::path(
    put,
    path = "/api/admin/articles/{id}",
    tag = "Admin",
    security(("bearer" = [])),
    request_body = ArticleInput,
    responses(
        (status = 200, description = "Article updated", body = Article),
        (status = 401, description = "Missing or invalid admin token"),
        (status = 404, description = "No article with this id"),
    )
)]
pub async fn update_article(
    State(state): State<AppState>,
    AdminAuth(_admin): AdminAuth,
    Path(id): Path<String>,
    Json(input): Json<ArticleInput>,
) -> Result<Json<Article>, ApiError> {
    Ok(Json(state.store.update_article(&id, input).await?))
}

/// Delete an article.
#[utoipa::path(
    delete,
    path = "/api/admin/articles/{id}",
    tag = "Admin",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Article deleted", body = MessageResponse),
        (status = 401, description = "Missing or invalid admin token"),
        (status = 404, description = "No article with this id"),
    )
)]
pub async fn delete_article(
    State(state): State<AppState>,
    AdminAuth(_admin): AdminAuth,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.store.delete_article(&id).await?;
    Ok(Json(MessageResponse {
        message: "Article deleted".into(),
    }))
}
