//! Chat endpoint.
//!
//! POST /api/chatbot
//!
//! Request:  `{ "session_id": "...", "message": "..." }`
//! Response: `{ "reply": "..." }`
//!
//! The turn runs on its own task so a client that disconnects mid-request
//! does not cancel it: the transcript always ends up with both the user
//! message and the reply the responder produced for it.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use chatrelay_types::chat::{ChatReply, ChatRequest};
use chatrelay_types::error::ChatError;

use crate::http::error::AppError;
use crate::state::AppState;

/// POST /api/chatbot - Run one chat turn for a session.
pub async fn chatbot(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, AppError> {
    let Json(request) = body?;
    let session_id = request.session_id.unwrap_or_default();
    let message = request.message.unwrap_or_default();

    let service = state.chat_service.clone();
    let reply = tokio::spawn(async move { service.handle(&session_id, &message).await })
        .await
        .map_err(|e| ChatError::Internal(format!("chat turn aborted: {e}")))??;

    if reply.fallback {
        tracing::info!("Returned fallback reply");
    }

    Ok(Json(reply))
}
