// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Meridian Labs

//! One-time default administrator bootstrap.
//!
//! Runs to completion before the server accepts traffic. If no admin with
//! the well-known default username exists, one is created with the
//! well-known default password and `requires_password_change = true`, so
//! the first dashboard login is forced straight into the change-password
//! flow. This is the only path that creates an administrator; there is no
//! authenticated "create admin" operation.

use std::sync::Arc;

use crate::models::{new_id, now_rfc3339, Admin};
use crate::store::{Store, StoreError};

use super::{password, AuthError};

/// Username of the bootstrap administrator.
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";

/// Initial password of the bootstrap administrator. Unusable for anything
/// beyond the forced first password change.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Ensure the default admin exists. Idempotent: an existing record (or a
/// duplicate-key failure from a racing insert) is a no-op.
pub async fn ensure_default_admin(store: &Arc<dyn Store>) -> Result<(), AuthError> {
    let existing = store
        .find_admin_by_username(DEFAULT_ADMIN_USERNAME)
        .await
        .map_err(|e| AuthError::Internal(e.to_string()))?;

    if existing.is_some() {
        tracing::debug!(username = DEFAULT_ADMIN_USERNAME, "default admin present");
        return Ok(());
    }

    let password_hash =
        tokio::task::spawn_blocking(|| password::hash(DEFAULT_ADMIN_PASSWORD))
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))??;

    let admin = Admin {
        id: new_id(),
        username: DEFAULT_ADMIN_USERNAME.to_string(),
        password_hash,
        requires_password_change: true,
        created_at: now_rfc3339(),
    };

    match store.insert_admin(admin).await {
        Ok(()) => {
            tracing::info!(
                username = DEFAULT_ADMIN_USERNAME,
                "created default admin, password change required on first login"
            );
            Ok(())
        }
        // Someone else inserted between our check and insert; the store's
        // uniqueness guarantee makes that outcome equivalent to "present".
        Err(StoreError::Duplicate(_)) => Ok(()),
        Err(e) => Err(AuthError::Internal(e.to_string())),
    }
}
