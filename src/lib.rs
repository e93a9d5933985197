// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Meridian Labs

//! Meridian - Company Site Backend
//!
//! REST backend for the Meridian site: visitor accounts, an admin
//! dashboard, article publishing, and contact/investor intake, over a
//! MongoDB document store.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Dual-track authentication (user and admin bearer tokens)
//! - `store` - Persistence behind the [`store::Store`] trait
//! - `models` - Documents and API payloads

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod sanitize;
pub mod state;
pub mod store;
