//! Axum router configuration with middleware.
//!
//! Routes:
//! - POST /api/chatbot
//! - GET  /api/sessions/{session_id}/messages (reading an unknown id registers it)
//! - GET  /health
//!
//! Middleware: CORS (origins from `[server].allowed_origins`), tracing.

use axum::Router;
use axum::extract::State;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.server.allowed_origins);

    Router::new()
        .route("/api/chatbot", post(handlers::chat::chatbot))
        .route(
            "/api/sessions/{session_id}/messages",
            get(handlers::session::get_messages),
        )
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS policy for the configured origins.
///
/// `"*"` allows any origin without credentials. An explicit origin list
/// allows credentials and mirrors the requested methods and headers.
/// Origins that are not valid header values are skipped with a warning.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let values: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(values))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// GET /health - Liveness check with the number of known sessions.
async fn health_check(State(state): State<AppState>) -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "sessions": state.chat_service.store().len(),
    }))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use axum::response::Response;
    use tower::ServiceExt;

    use chatrelay_types::config::DEFAULT_FALLBACK_REPLY;

    use super::*;
    use crate::state::unreachable_responder_state;

    fn post_chat(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/api/chatbot")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn assert_invalid_request(router: Router, req: Request<Body>) {
        let resp = router.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = body_json(resp).await;
        assert_eq!(body["code"], "INVALID_REQUEST");
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn health_reports_session_count() {
        let state = unreachable_responder_state();
        let _ = state.chat_service.transcript("s1");

        let axum::Json(body) = health_check(State(state)).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["sessions"], 1);
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let router = build_router(unreachable_responder_state());
        assert_invalid_request(router, post_chat("{not json")).await;
    }

    #[tokio::test]
    async fn null_message_is_bad_request() {
        let state = unreachable_responder_state();
        let router = build_router(state.clone());
        assert_invalid_request(router, post_chat(r#"{"session_id":"s1","message":null}"#)).await;
        assert!(state.chat_service.store().is_empty());
    }

    #[tokio::test]
    async fn non_string_message_is_bad_request() {
        let router = build_router(unreachable_responder_state());
        assert_invalid_request(router, post_chat(r#"{"session_id":"s1","message":5}"#)).await;
    }

    #[tokio::test]
    async fn missing_content_type_is_bad_request() {
        let router = build_router(unreachable_responder_state());
        let req = Request::builder()
            .method(Method::POST)
            .uri("/api/chatbot")
            .body(Body::from(r#"{"session_id":"s1","message":"hi"}"#))
            .unwrap();
        assert_invalid_request(router, req).await;
    }

    #[tokio::test]
    async fn chat_turn_is_visible_through_transcript_route() {
        let router = build_router(unreachable_responder_state());

        let resp = router
            .clone()
            .oneshot(post_chat(r#"{"session_id":"s1","message":"hi"}"#))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            body_json(resp).await,
            serde_json::json!({ "reply": DEFAULT_FALLBACK_REPLY })
        );

        let resp = router
            .oneshot(get_request("/api/sessions/s1/messages"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            body_json(resp).await,
            serde_json::json!({
                "session_id": "s1",
                "messages": [
                    {"role": "user", "content": "hi"},
                    {"role": "assistant", "content": DEFAULT_FALLBACK_REPLY},
                ],
            })
        );
    }

    #[tokio::test]
    async fn reading_unknown_session_registers_it() {
        let router = build_router(unreachable_responder_state());

        let resp = router
            .clone()
            .oneshot(get_request("/api/sessions/fresh/messages"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = router.oneshot(get_request("/health")).await.unwrap();
        assert_eq!(body_json(resp).await["sessions"], 1);
    }

    #[tokio::test]
    async fn preflight_from_configured_origin_allows_credentials() {
        let router = build_router(unreachable_responder_state());
        let req = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/chatbot")
            .header(header::ORIGIN, "http://localhost:3000")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap();

        let resp = router.oneshot(req).await.unwrap();
        let headers = resp.headers();
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:3000"
        );
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "POST");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "content-type");
    }

    #[tokio::test]
    async fn preflight_from_other_origin_is_not_allowed() {
        let router = build_router(unreachable_responder_state());
        let req = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/chatbot")
            .header(header::ORIGIN, "https://evil.example")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();

        let resp = router.oneshot(req).await.unwrap();
        assert!(resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }

    #[test]
    fn wildcard_and_invalid_origins_build() {
        let _ = cors_layer(&["*".to_string()]);
        let _ = cors_layer(&["http://localhost:3000".to_string(), "bad\norigin".to_string()]);
    }
}
