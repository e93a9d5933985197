// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Meridian Labs

//! # Data Models
//!
//! Typed records for every document collection plus the request/response
//! structures used by the REST API. All documents are explicit structs
//! translated at the store boundary; raw documents never reach handlers.
//!
//! ## Principal variants
//!
//! - [`User`]: site visitors with an account (email is unique).
//! - [`Admin`]: dashboard administrators (username is unique). Admins and
//!   users live in separate collections and separate id namespaces.
//!
//! Password hashes are serialized into store documents but are never part
//! of an API response; handlers go through [`UserPublic`].

use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Produce a fresh opaque document id (UUID v4, string form).
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Current UTC time as an RFC 3339 string, the timestamp format used in
/// every document and API payload.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

// =============================================================================
// Principals
// =============================================================================

/// A registered site user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    /// Opaque unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Email address, unique across users.
    pub email: String,
    /// Bcrypt password hash. Never serialized into API responses.
    pub password_hash: String,
    /// Country of residence.
    pub country: String,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
}

/// A dashboard administrator.
///
/// Admins are an independent principal class: their own collection, their
/// own token signing secret, and a mandatory password change after the
/// bootstrap-created account first logs in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Admin {
    /// Opaque unique identifier.
    pub id: String,
    /// Login username, unique across admins.
    pub username: String,
    /// Bcrypt password hash.
    pub password_hash: String,
    /// Set at bootstrap; cleared permanently by the first successful
    /// password change.
    pub requires_password_change: bool,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
}

/// Public view of a [`User`], safe to return to any caller.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct UserPublic {
    pub id: String,
    pub name: String,
    pub email: String,
    pub country: String,
    pub created_at: String,
}

impl From<User> for UserPublic {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            country: user.country,
            created_at: user.created_at,
        }
    }
}

// =============================================================================
// Articles
// =============================================================================

/// A published article, as stored and as returned to administrators.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Article {
    /// Opaque unique identifier.
    pub id: String,
    pub title: String,
    /// Short teaser shown in listings.
    pub excerpt: String,
    pub category: String,
    /// Full body, only exposed through the admin surface.
    pub content: String,
    /// Publication timestamp (RFC 3339); listings sort on this, newest first.
    pub published_at: String,
}

/// Public listing view of an [`Article`] (no body).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ArticleSummary {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub category: String,
    pub published_at: String,
}

impl From<Article> for ArticleSummary {
    fn from(article: Article) -> Self {
        Self {
            id: article.id,
            title: article.title,
            excerpt: article.excerpt,
            category: article.category,
            published_at: article.published_at,
        }
    }
}

/// Payload for creating or replacing an article.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArticleInput {
    pub title: String,
    pub excerpt: String,
    pub category: String,
    pub content: String,
}

/// Paginated public article listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArticlesListResponse {
    pub articles: Vec<ArticleSummary>,
    /// Total matching articles across all pages.
    pub total: u64,
    /// The page this response covers (1-based).
    pub page: u64,
    pub total_pages: u64,
}

// =============================================================================
// Contact & Investor Intake
// =============================================================================

/// A submitted contact-form message.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub created_at: String,
}

/// Request body for the contact form.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// A submitted investor inquiry.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct InvestorInquiry {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub investment_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub created_at: String,
}

/// Request body for an investor inquiry.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InvestorInquiryRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub investment_range: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

// =============================================================================
// Chat
// =============================================================================

/// A logged chat exchange (message + placeholder response).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatLog {
    pub id: String,
    /// The user who sent the message.
    pub user_id: String,
    pub message: String,
    pub response: String,
    pub created_at: String,
}

/// Request body for the chat endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatRequest {
    pub message: String,
}

/// Chat endpoint response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatResponse {
    pub response: String,
}

// =============================================================================
// Auth Requests / Responses
// =============================================================================

/// Registration request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub country: String,
}

/// User login request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful registration/login response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    /// Bearer token for the user track.
    pub token: String,
    pub user: UserPublic,
}

/// Admin login request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdminLoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful admin login response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdminLoginResponse {
    /// Bearer token for the admin track.
    pub token: String,
    /// Whether the caller must be routed into the forced change-password
    /// flow before using the dashboard.
    pub requires_password_change: bool,
}

/// Admin password change request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Dashboard statistics.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdminStats {
    pub total_users: u64,
    pub total_articles: u64,
    pub total_contacts: u64,
    pub total_inquiries: u64,
}

/// Generic acknowledgment body for intake endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
