// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Meridian Labs

//! # Document Store Contract
//!
//! The backend's only shared mutable resource. Everything above this module
//! works with typed records; translation to and from raw documents happens
//! inside the implementations.
//!
//! Identity uniqueness (user email, admin username) is enforced *here*, by
//! the store itself: the insert fails atomically with
//! [`StoreError::Duplicate`] on conflict. Callers never pre-check
//! existence, so two concurrent registrations with the same email cannot
//! both succeed.
//!
//! ## Implementations
//!
//! - [`MongoStore`]: production backend; unique indexes created at startup.
//! - [`MemoryStore`]: lock-per-store backend for tests and local runs.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Admin, Article, ArticleInput, ChatLog, Contact, InvestorInquiry, User};

pub mod memory;
pub mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

/// Store-level failure.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique field (email, username) already holds this value. The
    /// payload names the field for the caller's error message.
    #[error("{0} already exists")]
    Duplicate(String),
    /// The referenced document does not exist.
    #[error("{0} not found")]
    NotFound(String),
    /// The backing store failed (connectivity, serialization). Terminal
    /// for the current request; never retried here.
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Article listing query: optional case-insensitive substring over title,
/// excerpt, and category; 1-based page; page size.
#[derive(Debug, Clone)]
pub struct ArticleQuery {
    pub search: Option<String>,
    pub page: u64,
    pub limit: u64,
}

/// One page of matching articles plus the total match count.
#[derive(Debug, Clone)]
pub struct ArticlePage {
    pub articles: Vec<Article>,
    pub total: u64,
}

/// Typed operations over the six document collections.
///
/// Lookups by identifier return `Ok(None)` for absent documents; only
/// update/delete of a named document reports [`StoreError::NotFound`].
#[async_trait]
pub trait Store: Send + Sync {
    // --- users ---------------------------------------------------------

    /// Insert a user; fails with `Duplicate` if the email is taken.
    async fn insert_user(&self, user: User) -> Result<(), StoreError>;
    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, StoreError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    /// All users, newest first.
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;
    async fn count_users(&self) -> Result<u64, StoreError>;

    // --- admins --------------------------------------------------------

    /// Insert an admin; fails with `Duplicate` if the username is taken.
    async fn insert_admin(&self, admin: Admin) -> Result<(), StoreError>;
    async fn find_admin_by_id(&self, id: &str) -> Result<Option<Admin>, StoreError>;
    async fn find_admin_by_username(&self, username: &str) -> Result<Option<Admin>, StoreError>;
    /// Replace the password hash and clear `requires_password_change`.
    async fn update_admin_password(&self, id: &str, password_hash: &str)
        -> Result<(), StoreError>;

    // --- articles ------------------------------------------------------

    async fn insert_article(&self, article: Article) -> Result<(), StoreError>;
    /// Paged search, sorted by `published_at` descending.
    async fn search_articles(&self, query: &ArticleQuery) -> Result<ArticlePage, StoreError>;
    /// All articles, newest first (admin listing).
    async fn list_articles(&self) -> Result<Vec<Article>, StoreError>;
    /// Replace an article's editable fields; returns the updated record.
    async fn update_article(&self, id: &str, input: ArticleInput) -> Result<Article, StoreError>;
    async fn delete_article(&self, id: &str) -> Result<(), StoreError>;
    async fn count_articles(&self) -> Result<u64, StoreError>;

    // --- contact & investor intake ------------------------------------

    async fn insert_contact(&self, contact: Contact) -> Result<(), StoreError>;
    async fn list_contacts(&self) -> Result<Vec<Contact>, StoreError>;
    async fn count_contacts(&self) -> Result<u64, StoreError>;

    async fn insert_inquiry(&self, inquiry: InvestorInquiry) -> Result<(), StoreError>;
    async fn list_inquiries(&self) -> Result<Vec<InvestorInquiry>, StoreError>;
    async fn count_inquiries(&self) -> Result<u64, StoreError>;

    // --- chat logs -----------------------------------------------------

    async fn insert_chat_log(&self, log: ChatLog) -> Result<(), StoreError>;
}
