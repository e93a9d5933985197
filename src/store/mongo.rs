// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Meridian Labs

//! MongoDB store backend.
//!
//! Documents carry our own `id` field (UUID string); Mongo's `_id` is left
//! to the driver and ignored on the way out. Uniqueness of user email and
//! admin username is enforced by unique indexes created at startup, so a
//! conflicting insert fails atomically with a duplicate-key write error
//! that we surface as [`StoreError::Duplicate`].

use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, Database, IndexModel};

use crate::models::{Admin, Article, ArticleInput, ChatLog, Contact, InvestorInquiry, User};

use super::{ArticlePage, ArticleQuery, Store, StoreError};

/// MongoDB-backed [`Store`] implementation.
pub struct MongoStore {
    users: Collection<User>,
    admins: Collection<Admin>,
    articles: Collection<Article>,
    contacts: Collection<Contact>,
    inquiries: Collection<InvestorInquiry>,
    chat_logs: Collection<ChatLog>,
}

impl MongoStore {
    /// Connect to `uri` and bind the named database.
    pub async fn connect(uri: &str, db_name: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(Self::with_database(client.database(db_name)))
    }

    fn with_database(db: Database) -> Self {
        Self {
            users: db.collection("users"),
            admins: db.collection("admins"),
            articles: db.collection("articles"),
            contacts: db.collection("contacts"),
            inquiries: db.collection("investor_inquiries"),
            chat_logs: db.collection("chat_logs"),
        }
    }

    /// Create the unique indexes backing identity uniqueness. Run once at
    /// startup, before traffic; repeated runs are no-ops server-side.
    pub async fn ensure_indexes(&self) -> Result<(), StoreError> {
        let unique = |keys: Document| {
            IndexModel::builder()
                .keys(keys)
                .options(IndexOptions::builder().unique(true).build())
                .build()
        };

        self.users
            .create_index(unique(doc! { "email": 1 }))
            .await
            .map_err(backend)?;
        self.admins
            .create_index(unique(doc! { "username": 1 }))
            .await
            .map_err(backend)?;
        // Non-unique: listings sort on published_at.
        self.articles
            .create_index(IndexModel::builder().keys(doc! { "published_at": -1 }).build())
            .await
            .map_err(backend)?;
        Ok(())
    }
}

fn backend(err: mongodb::error::Error) -> StoreError {
    StoreError::Backend(err.to_string())
}

/// Map a duplicate-key write error (E11000) onto `Duplicate`, anything
/// else onto `Backend`.
fn insert_error(err: mongodb::error::Error, what: &str) -> StoreError {
    use mongodb::error::{ErrorKind, WriteFailure};
    match *err.kind {
        ErrorKind::Write(WriteFailure::WriteError(ref write_err)) if write_err.code == 11000 => {
            StoreError::Duplicate(what.to_string())
        }
        _ => backend(err),
    }
}

/// Build the `$or` regex filter for an article search.
fn article_filter(query: &ArticleQuery) -> Document {
    match query.search.as_deref() {
        Some(needle) if !needle.is_empty() => {
            let regex = doc! { "$regex": needle, "$options": "i" };
            doc! {
                "$or": [
                    { "title": regex.clone() },
                    { "excerpt": regex.clone() },
                    { "category": regex },
                ]
            }
        }
        _ => doc! {},
    }
}

#[async_trait]
impl Store for MongoStore {
    async fn insert_user(&self, user: User) -> Result<(), StoreError> {
        self.users
            .insert_one(&user)
            .await
            .map_err(|e| insert_error(e, "Email"))?;
        Ok(())
    }

    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        self.users
            .find_one(doc! { "id": id })
            .await
            .map_err(backend)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        self.users
            .find_one(doc! { "email": email })
            .await
            .map_err(backend)
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        self.users
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .await
            .map_err(backend)?
            .try_collect()
            .await
            .map_err(backend)
    }

    async fn count_users(&self) -> Result<u64, StoreError> {
        self.users.count_documents(doc! {}).await.map_err(backend)
    }

    async fn insert_admin(&self, admin: Admin) -> Result<(), StoreError> {
        self.admins
            .insert_one(&admin)
            .await
            .map_err(|e| insert_error(e, "Username"))?;
        Ok(())
    }

    async fn find_admin_by_id(&self, id: &str) -> Result<Option<Admin>, StoreError> {
        self.admins
            .find_one(doc! { "id": id })
            .await
            .map_err(backend)
    }

    async fn find_admin_by_username(&self, username: &str) -> Result<Option<Admin>, StoreError> {
        self.admins
            .find_one(doc! { "username": username })
            .await
            .map_err(backend)
    }

    async fn update_admin_password(
        &self,
        id: &str,
        password_hash: &str,
    ) -> Result<(), StoreError> {
        let result = self
            .admins
            .update_one(
                doc! { "id": id },
                doc! { "$set": {
                    "password_hash": password_hash,
                    "requires_password_change": false,
                } },
            )
            .await
            .map_err(backend)?;

        if result.matched_count == 0 {
            return Err(StoreError::NotFound("Admin".into()));
        }
        Ok(())
    }

    async fn insert_article(&self, article: Article) -> Result<(), StoreError> {
        self.articles
            .insert_one(&article)
            .await
            .map_err(backend)?;
        Ok(())
    }

    async fn search_articles(&self, query: &ArticleQuery) -> Result<ArticlePage, StoreError> {
        let filter = article_filter(query);
        let total = self
            .articles
            .count_documents(filter.clone())
            .await
            .map_err(backend)?;

        let skip = query.page.saturating_sub(1).saturating_mul(query.limit);
        let articles = self
            .articles
            .find(filter)
            .sort(doc! { "published_at": -1 })
            .skip(skip)
            .limit(query.limit as i64)
            .await
            .map_err(backend)?
            .try_collect()
            .await
            .map_err(backend)?;

        Ok(ArticlePage { articles, total })
    }

    async fn list_articles(&self) -> Result<Vec<Article>, StoreError> {
        self.articles
            .find(doc! {})
            .sort(doc! { "published_at": -1 })
            .await
            .map_err(backend)?
            .try_collect()
            .await
            .map_err(backend)
    }

    async fn update_article(&self, id: &str, input: ArticleInput) -> Result<Article, StoreError> {
        let result = self
            .articles
            .update_one(
                doc! { "id": id },
                doc! { "$set": {
                    "title": &input.title,
                    "excerpt": &input.excerpt,
                    "category": &input.category,
                    "content": &input.content,
                } },
            )
            .await
            .map_err(backend)?;

        if result.matched_count == 0 {
            return Err(StoreError::NotFound("Article".into()));
        }

        self.articles
            .find_one(doc! { "id": id })
            .await
            .map_err(backend)?
            .ok_or_else(|| StoreError::NotFound("Article".into()))
    }

    async fn delete_article(&self, id: &str) -> Result<(), StoreError> {
        let result = self
            .articles
            .delete_one(doc! { "id": id })
            .await
            .map_err(backend)?;

        if result.deleted_count == 0 {
            return Err(StoreError::NotFound("Article".into()));
        }
        Ok(())
    }

    async fn count_articles(&self) -> Result<u64, StoreError> {
        self.articles
            .count_documents(doc! {})
            .await
            .map_err(backend)
    }

    async fn insert_contact(&self, contact: Contact) -> Result<(), StoreError> {
        self.contacts
            .insert_one(&contact)
            .await
            .map_err(backend)?;
        Ok(())
    }

    async fn list_contacts(&self) -> Result<Vec<Contact>, StoreError> {
        self.contacts
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .await
            .map_err(backend)?
            .try_collect()
            .await
            .map_err(backend)
    }

    async fn count_contacts(&self) -> Result<u64, StoreError> {
        self.contacts
            .count_documents(doc! {})
            .await
            .map_err(backend)
    }

    async fn insert_inquiry(&self, inquiry: InvestorInquiry) -> Result<(), StoreError> {
        self.inquiries
            .insert_one(&inquiry)
            .await
            .map_err(backend)?;
        Ok(())
    }

    async fn list_inquiries(&self) -> Result<Vec<InvestorInquiry>, StoreError> {
        self.inquiries
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .await
            .map_err(backend)?
            .try_collect()
            .await
            .map_err(backend)
    }

    async fn count_inquiries(&self) -> Result<u64, StoreError> {
        self.inquiries
            .count_documents(doc! {})
            .await
            .map_err(backend)
    }

    async fn insert_chat_log(&self, log: ChatLog) -> Result<(), StoreError> {
        self.chat_logs
            .insert_one(&log)
            .await
            .map_err(backend)?;
        Ok(())
    }
}
