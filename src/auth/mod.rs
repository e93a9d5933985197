// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Meridian Labs

//! # Authentication Core
//!
//! Dual-tier authentication: ordinary users and administrators are fully
//! independent principal classes, each with its own signing secret,
//! credential collection, and password lifecycle.
//!
//! ## Request flow
//!
//! 1. Client sends `Authorization: Bearer <JWT>`
//! 2. The route's extractor ([`UserAuth`] or [`AdminAuth`]):
//!    - verifies signature and expiry against that track's secret only
//!    - resolves the `sub` claim to a live record in that track's
//!      collection
//!    - hands the principal record to the handler
//!
//! Tokens carry `{sub, iat, exp}`, live 24 hours, and are never stored
//! server-side.

pub mod bootstrap;
pub mod error;
pub mod extractor;
pub mod password;
pub mod token;

pub use error::AuthError;
pub use extractor::{AdminAuth, UserAuth};
pub use token::TokenService;
