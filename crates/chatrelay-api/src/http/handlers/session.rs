//! Session transcript handler.
//!
//! GET /api/sessions/{session_id}/messages - Read a session's transcript.
//!
//! Reading an unknown session yields an empty transcript, the same as the
//! store's lazy `get`. The read registers the id: it stays in the store for
//! the life of the process and counts toward `/health`'s `sessions`.

use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;

use chatrelay_types::chat::Transcript;

use crate::state::AppState;

/// Response body for the transcript endpoint.
#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub session_id: String,
    pub messages: Transcript,
}

/// GET /api/sessions/{session_id}/messages - Get the transcript for a session.
///
/// Creates an empty session entry when `session_id` is unknown.
pub async fn get_messages(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Json<TranscriptResponse> {
    let messages = state.chat_service.transcript(&session_id);

    Json(TranscriptResponse {
        session_id,
        messages,
    })
}

#[cfg(test)]
mod tests {
    use chatrelay_types::chat::Message;

    use super::*;
    use crate::state::unreachable_responder_state;

    #[tokio::test]
    async fn unknown_session_has_empty_transcript() {
        let state = unreachable_responder_state();
        let Json(resp) = get_messages(State(state), Path("new-session".to_string())).await;
        assert_eq!(resp.session_id, "new-session");
        assert!(resp.messages.is_empty());
    }

    #[tokio::test]
    async fn returns_stored_messages_in_order() {
        let state = unreachable_responder_state();
        state.chat_service.store().update(
            "s1",
            Transcript::from(vec![Message::user("hi"), Message::assistant("hello")]),
        );

        let Json(resp) = get_messages(State(state), Path("s1".to_string())).await;
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "session_id": "s1",
                "messages": [
                    {"role": "user", "content": "hi"},
                    {"role": "assistant", "content": "hello"},
                ],
            })
        );
    }
}
