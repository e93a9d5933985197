// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Meridian Labs

//! Investor inquiry intake.

use axum::{extract::State, http::StatusCode, Json};

use crate::error::ApiError;
use crate::models::{new_id, now_rfc3339, InvestorInquiry, InvestorInquiryRequest, MessageResponse};
use crate::sanitize;
use crate::state::AppState;

/// Accept an investor inquiry.
///
/// `company`, `investment_range`, and `message` are optional; empty
/// strings collapse to absent.
#[utoipa::path(
    post,
    path = "/api/investor-inquiries",
    tag = "Intake",
    request_body = InvestorInquiryRequest,
    responses(
        (status = 201, description = "Inquiry stored", body = MessageResponse),
        (status = 400, description = "Required fields missing"),
    )
)]
pub async fn submit_inquiry(
    State(state): State<AppState>,
    Json(request): Json<InvestorInquiryRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let inquiry = InvestorInquiry {
        id: new_id(),
        name: sanitize::clean(&request.name),
        email: request.email.trim().to_lowercase(),
        company: sanitize::clean_opt(request.company),
        investment_range: sanitize::clean_opt(request.investment_range),
        message: sanitize::clean_opt(request.message),
        created_at: now_rfc3339(),
    };

    if inquiry.name.is_empty() {
        return Err(ApiError::bad_request("name is required"));
    }
    if !inquiry.email.contains('@') {
        return Err(ApiError::bad_request("a valid email address is required"));
    }

    state.store.insert_inquiry(inquiry).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Investor inquiry submitted successfully".into(),
        }),
    ))
}
