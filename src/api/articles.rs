// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Meridian Labs

//! Public article listing.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::ApiError;
use crate::models::{ArticleSummary, ArticlesListResponse};
use crate::state::AppState;
use crate::store::ArticleQuery;

const DEFAULT_PAGE_SIZE: u64 = 12;
const MAX_PAGE_SIZE: u64 = 100;

/// Listing query parameters.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ArticlesParams {
    /// 1-based page number.
    pub page: Option<u64>,
    /// Page size (capped at 100).
    pub limit: Option<u64>,
    /// Case-insensitive substring matched against title, excerpt, and
    /// category.
    pub search: Option<String>,
}

/// List published articles, newest first, with optional search.
#[utoipa::path(
    get,
    path = "/api/articles",
    tag = "Articles",
    params(ArticlesParams),
    responses(
        (status = 200, description = "One page of articles", body = ArticlesListResponse),
    )
)]
pub async fn list_articles(
    State(state): State<AppState>,
    Query(params): Query<ArticlesParams>,
) -> Result<Json<ArticlesListResponse>, ApiError> {
    let page = params.page.unwrap_or(1).max(1);
    let limit = params
        .limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let search = params
        .search
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let result = state
        .store
        .search_articles(&ArticleQuery {
            search,
            page,
            limit,
        })
        .await?;

    let total_pages = result.total.div_ceil(limit).max(1);

    Ok(Json(ArticlesListResponse {
        articles: result
            .articles
            .into_iter()
            .map(ArticleSummary::from)
            .collect(),
        total: result.total,
        page,
        total_pages,
    }))
}
