// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Meridian Labs

//! Contact-form intake.

use axum::{extract::State, http::StatusCode, Json};

use crate::error::ApiError;
use crate::models::{new_id, now_rfc3339, Contact, ContactRequest, MessageResponse};
use crate::sanitize;
use crate::state::AppState;

/// Accept a contact-form submission.
#[utoipa::path(
    post,
    path = "/api/contact",
    tag = "Intake",
    request_body = ContactRequest,
    responses(
        (status = 201, description = "Message stored", body = MessageResponse),
        (status = 400, description = "Required fields missing"),
    )
)]
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(request): Json<ContactRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let contact = Contact {
        id: new_id(),
        name: sanitize::clean(&request.name),
        email: request.email.trim().to_lowercase(),
        subject: sanitize::clean(&request.subject),
        message: sanitize::clean(&request.message),
        created_at: now_rfc3339(),
    };

    if contact.name.is_empty() || contact.message.is_empty() {
        return Err(ApiError::bad_request("name and message are required"));
    }
    if !contact.email.contains('@') {
        return Err(ApiError::bad_request("a valid email address is required"));
    }

    state.store.insert_contact(contact).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Contact form submitted successfully".into(),
        }),
    ))
}
