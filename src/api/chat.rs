// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Meridian Labs

//! Authenticated chat endpoint.
//!
//! Responses are a canned acknowledgment for now; every exchange is still
//! logged so a real assistant backend can be swapped in behind the same
//! route later.

use axum::{extract::State, Json};

use crate::auth::UserAuth;
use crate::error::ApiError;
use crate::models::{new_id, now_rfc3339, ChatLog, ChatRequest, ChatResponse};
use crate::sanitize;
use crate::state::AppState;

/// Send a chat message and receive a response.
#[utoipa::path(
    post,
    path = "/api/chat",
    tag = "Chat",
    security(("bearer" = [])),
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Chat response", body = ChatResponse),
        (status = 400, description = "Empty message"),
        (status = 401, description = "Missing or invalid token"),
    )
)]
pub async fn send_message(
    State(state): State<AppState>,
    UserAuth(user): UserAuth,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let message = sanitize::clean(&request.message);
    if message.is_empty() {
        return Err(ApiError::bad_request("message is required"));
    }

    let response = format!(
        "Thanks for reaching out! Our team has received your message: \"{message}\". \
         A full assistant is coming soon."
    );

    state
        .store
        .insert_chat_log(ChatLog {
            id: new_id(),
            user_id: user.id,
            message,
            response: response.clone(),
            created_at: now_rfc3339(),
        })
        .await?;

    Ok(Json(ChatResponse { response }))
}
