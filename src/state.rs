// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Meridian Labs

//! Shared application state.
//!
//! Built once in `main` from the startup [`Config`] and handed to the
//! router; read-only for the lifetime of the process. The store is the
//! only thing behind it that mutates.

use std::sync::Arc;

use crate::auth::TokenService;
use crate::config::Config;
use crate::store::Store;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    /// Signs and verifies user-track tokens.
    pub user_tokens: Arc<TokenService>,
    /// Signs and verifies admin-track tokens. Its secret must differ from
    /// the user-track secret (operational requirement).
    pub admin_tokens: Arc<TokenService>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: &Config) -> Self {
        Self {
            store,
            user_tokens: Arc::new(TokenService::new(config.user_token_secret.as_bytes())),
            admin_tokens: Arc::new(TokenService::new(config.admin_token_secret.as_bytes())),
        }
    }
}
