// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Meridian Labs

//! In-memory store backend.
//!
//! Used by the test suite and for running the server without a database.
//! Each operation takes the store lock once, so check-and-insert for the
//! unique fields is atomic here just as the unique index makes it in Mongo.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::{Admin, Article, ArticleInput, ChatLog, Contact, InvestorInquiry, User};

use super::{ArticlePage, ArticleQuery, Store, StoreError};

#[derive(Default)]
struct Collections {
    users: HashMap<String, User>,
    admins: HashMap<String, Admin>,
    articles: HashMap<String, Article>,
    contacts: Vec<Contact>,
    inquiries: Vec<InvestorInquiry>,
    chat_logs: Vec<ChatLog>,
}

/// HashMap-backed [`Store`] implementation.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Case-insensitive substring match used by article search.
fn matches_search(article: &Article, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    article.title.to_lowercase().contains(&needle)
        || article.excerpt.to_lowercase().contains(&needle)
        || article.category.to_lowercase().contains(&needle)
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_user(&self, user: User) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        if inner.users.values().any(|u| u.email == user.email) {
            return Err(StoreError::Duplicate("Email".into()));
        }
        inner.users.insert(user.id.clone(), user);
        Ok(())
    }

    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        Ok(self.inner.read().await.users.get(id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .inner
            .read()
            .await
            .users
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let mut users: Vec<User> = self.inner.read().await.users.values().cloned().collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    async fn count_users(&self) -> Result<u64, StoreError> {
        Ok(self.inner.read().await.users.len() as u64)
    }

    async fn insert_admin(&self, admin: Admin) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        if inner.admins.values().any(|a| a.username == admin.username) {
            return Err(StoreError::Duplicate("Username".into()));
        }
        inner.admins.insert(admin.id.clone(), admin);
        Ok(())
    }

    async fn find_admin_by_id(&self, id: &str) -> Result<Option<Admin>, StoreError> {
        Ok(self.inner.read().await.admins.get(id).cloned())
    }

    async fn find_admin_by_username(&self, username: &str) -> Result<Option<Admin>, StoreError> {
        Ok(self
            .inner
            .read()
            .await
            .admins
            .values()
            .find(|a| a.username == username)
            .cloned())
    }

    async fn update_admin_password(
        &self,
        id: &str,
        password_hash: &str,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let admin = inner
            .admins
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound("Admin".into()))?;
        admin.password_hash = password_hash.to_string();
        admin.requires_password_change = false;
        Ok(())
    }

    async fn insert_article(&self, article: Article) -> Result<(), StoreError> {
        self.inner
            .write()
            .await
            .articles
            .insert(article.id.clone(), article);
        Ok(())
    }

    async fn search_articles(&self, query: &ArticleQuery) -> Result<ArticlePage, StoreError> {
        let inner = self.inner.read().await;
        let mut matching: Vec<Article> = inner
            .articles
            .values()
            .filter(|a| {
                query
                    .search
                    .as_deref()
                    .map(|needle| matches_search(a, needle))
                    .unwrap_or(true)
            })
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.published_at.cmp(&a.published_at));

        let total = matching.len() as u64;
        let skip = query.page.saturating_sub(1).saturating_mul(query.limit) as usize;
        let articles = matching
            .into_iter()
            .skip(skip)
            .take(query.limit as usize)
            .collect();

        Ok(ArticlePage { articles, total })
    }

    async fn list_articles(&self) -> Result<Vec<Article>, StoreError> {
        let mut articles: Vec<Article> =
            self.inner.read().await.articles.values().cloned().collect();
        articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(articles)
    }

    async fn update_article(&self, id: &str, input: ArticleInput) -> Result<Article, StoreError> {
        let mut inner = self.inner.write().await;
        let article = inner
            .articles
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound("Article".into()))?;
        article.title = input.title;
        article.excerpt = input.excerpt;
        article.category = input.category;
        article.content = input.content;
        Ok(article.clone())
    }

    async fn delete_article(&self, id: &str) -> Result<(), StoreError> {
        if self.inner.write().await.articles.remove(id).is_some() {
            Ok(())
        } else {
            Err(StoreError::NotFound("Article".into()))
        }
    }

    async fn count_articles(&self) -> Result<u64, StoreError> {
        Ok(self.inner.read().await.articles.len() as u64)
    }

    async fn insert_contact(&self, contact: Contact) -> Result<(), StoreError> {
        self.inner.write().await.contacts.push(contact);
        Ok(())
    }

    async fn list_contacts(&self) -> Result<Vec<Contact>, StoreError> {
        let mut contacts = self.inner.read().await.contacts.clone();
        contacts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(contacts)
    }

    async fn count_contacts(&self) -> Result<u64, StoreError> {
        Ok(self.inner.read().await.contacts.len() as u64)
    }

    async fn insert_inquiry(&self, inquiry: InvestorInquiry) -> Result<(), StoreError> {
        self.inner.write().await.inquiries.push(inquiry);
        Ok(())
    }

    async fn list_inquiries(&self) -> Result<Vec<InvestorInquiry>, StoreError> {
        let mut inquiries = self.inner.read().await.inquiries.clone();
        inquiries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(inquiries)
    }

    async fn count_inquiries(&self) -> Result<u64, StoreError> {
        Ok(self.inner.read().await.inquiries.len() as u64)
    }

    async fn insert_chat_log(&self, log: ChatLog) -> Result<(), StoreError> {
        self.inner.write().await.chat_logs.push(log);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{new_id, now_rfc3339};

    fn user(email: &str) -> User {
        User {
            id: new_id(),
            name: "Test".into(),
            email: email.into(),
            password_hash: "$2b$12$hash".into(),
            country: "US".into(),
            created_at: now_rfc3339(),
        }
    }

    fn article(title: &str, published_at: &str) -> Article {
        Article {
            id: new_id(),
            title: title.into(),
            excerpt: format!("{title} excerpt"),
            category: "News".into(),
            content: "body".into(),
            published_at: published_at.into(),
        }
    }

    #[tokio::test]
    async fn duplicate_email_insert_fails() {
        let store = MemoryStore::new();
        store.insert_user(user("a@x.com")).await.unwrap();

        let err = store.insert_user(user("a@x.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
        assert_eq!(store.count_users().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn user_lookup_by_email_and_id() {
        let store = MemoryStore::new();
        let u = user("b@x.com");
        let id = u.id.clone();
        store.insert_user(u).await.unwrap();

        assert!(store.find_user_by_email("b@x.com").await.unwrap().is_some());
        assert!(store.find_user_by_email("c@x.com").await.unwrap().is_none());
        assert!(store.find_user_by_id(&id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn duplicate_admin_username_insert_fails() {
        let store = MemoryStore::new();
        let admin = Admin {
            id: new_id(),
            username: "admin".into(),
            password_hash: "$2b$12$hash".into(),
            requires_password_change: true,
            created_at: now_rfc3339(),
        };
        store.insert_admin(admin.clone()).await.unwrap();

        let mut second = admin;
        second.id = new_id();
        assert!(matches!(
            store.insert_admin(second).await,
            Err(StoreError::Duplicate(_))
        ));
    }

    #[tokio::test]
    async fn update_admin_password_clears_flag() {
        let store = MemoryStore::new();
        let admin = Admin {
            id: new_id(),
            username: "root".into(),
            password_hash: "old".into(),
            requires_password_change: true,
            created_at: now_rfc3339(),
        };
        let id = admin.id.clone();
        store.insert_admin(admin).await.unwrap();

        store.update_admin_password(&id, "new").await.unwrap();
        let updated = store.find_admin_by_id(&id).await.unwrap().unwrap();
        assert_eq!(updated.password_hash, "new");
        assert!(!updated.requires_password_change);
    }

    #[tokio::test]
    async fn article_search_filters_sorts_and_pages() {
        let store = MemoryStore::new();
        store
            .insert_article(article("Alpha release", "2026-01-01T00:00:00+00:00"))
            .await
            .unwrap();
        store
            .insert_article(article("Beta release", "2026-02-01T00:00:00+00:00"))
            .await
            .unwrap();
        store
            .insert_article(article("Unrelated", "2026-03-01T00:00:00+00:00"))
            .await
            .unwrap();

        // Substring match is case-insensitive and total counts all matches.
        let page = store
            .search_articles(&ArticleQuery {
                search: Some("RELEASE".into()),
                page: 1,
                limit: 1,
            })
            .await
            .unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.articles.len(), 1);
        // Newest first.
        assert_eq!(page.articles[0].title, "Beta release");

        let page2 = store
            .search_articles(&ArticleQuery {
                search: Some("release".into()),
                page: 2,
                limit: 1,
            })
            .await
            .unwrap();
        assert_eq!(page2.articles[0].title, "Alpha release");
    }

    #[tokio::test]
    async fn article_update_and_delete_missing_are_not_found() {
        let store = MemoryStore::new();
        let input = ArticleInput {
            title: "t".into(),
            excerpt: "e".into(),
            category: "c".into(),
            content: "b".into(),
        };
        assert!(matches!(
            store.update_article("missing", input).await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.delete_article("missing").await,
            Err(StoreError::NotFound(_))
        ));
    }
}
