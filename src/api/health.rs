// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Meridian Labs

//! Service root and health probes.

use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::now_rfc3339;

/// Root banner.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RootResponse {
    pub message: String,
    pub status: String,
}

/// Liveness probe body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    /// Probe time (RFC 3339).
    pub timestamp: String,
}

/// API root banner.
#[utoipa::path(
    get,
    path = "/api/",
    tag = "Health",
    responses(
        (status = 200, description = "Service banner", body = RootResponse),
    )
)]
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Meridian API".into(),
        status: "running".into(),
    })
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse),
    )
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".into(),
        timestamp: now_rfc3339(),
    })
}
