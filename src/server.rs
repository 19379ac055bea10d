//! HTTP receiver for Slack Events API and interactivity requests.

use crate::gateway::Gateway;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use reacji_channels::slack::{
    events::{decode_event_body, decode_interaction_body, Inbound},
    signature::{self, SIGNATURE_HEADER, TIMESTAMP_HEADER},
};
use reacji_core::config::ServerConfig;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Shared state for handlers.
#[derive(Clone)]
pub struct ServerState {
    gateway: Arc<Gateway>,
    /// `None` disables signature checks.
    signing_secret: Option<String>,
}

impl ServerState {
    pub fn new(gateway: Arc<Gateway>, signing_secret: &str) -> Self {
        let signing_secret = if signing_secret.is_empty() {
            warn!("SLACK_SIGNING_SECRET is empty, request signatures will not be verified");
            None
        } else {
            Some(signing_secret.to_string())
        };
        Self {
            gateway,
            signing_secret,
        }
    }
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Check the request signature. Returns `Some(response)` if rejected.
fn check_signature(headers: &HeaderMap, body: &[u8], secret: &Option<String>) -> Option<Response> {
    let secret = secret.as_deref()?;
    match signature::verify(
        secret,
        header(headers, TIMESTAMP_HEADER),
        header(headers, SIGNATURE_HEADER),
        body,
        chrono::Utc::now().timestamp(),
    ) {
        Ok(()) => None,
        Err(e) => {
            warn!("rejected unsigned request: {e}");
            Some((StatusCode::UNAUTHORIZED, Json(json!({"error": e.to_string()}))).into_response())
        }
    }
}

fn bad_request(e: impl std::fmt::Display) -> Response {
    debug!("bad request: {e}");
    (StatusCode::BAD_REQUEST, Json(json!({"error": e.to_string()}))).into_response()
}

/// `POST /slack/events`
async fn events(State(state): State<ServerState>, headers: HeaderMap, body: Bytes) -> Response {
    if let Some(rejected) = check_signature(&headers, &body, &state.signing_secret) {
        return rejected;
    }
    match decode_event_body(&body) {
        Ok(Inbound::UrlVerification { challenge }) => {
            Json(json!({ "challenge": challenge })).into_response()
        }
        Ok(Inbound::Event(event)) => {
            let gateway = Arc::clone(&state.gateway);
            tokio::spawn(async move { gateway.dispatch(event).await });
            StatusCode::OK.into_response()
        }
        Ok(Inbound::Ignored) => StatusCode::OK.into_response(),
        Err(e) => bad_request(e),
    }
}

/// `POST /slack/interactions`
async fn interactions(
    State(state): State<ServerState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if let Some(rejected) = check_signature(&headers, &body, &state.signing_secret) {
        return rejected;
    }
    match decode_interaction_body(&body) {
        Ok(Inbound::Event(event)) => match state.gateway.acknowledge(event) {
            Some(ack) => Json(ack).into_response(),
            None => StatusCode::OK.into_response(),
        },
        Ok(_) => StatusCode::OK.into_response(),
        Err(e) => bad_request(e),
    }
}

/// `GET /health`
async fn health(State(state): State<ServerState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "backend": state.gateway.backend_name(),
    }))
}

/// Build the axum router with shared state.
pub fn build_router(state: ServerState) -> Router {
    Router::new()
        .route("/slack/events", post(events))
        .route("/slack/interactions", post(interactions))
        .route("/health", get(health))
        .with_state(state)
}

/// Serve until Ctrl+C.
pub async fn serve(config: &ServerConfig, state: ServerState) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        error!("failed to bind to {addr}: {e}");
        anyhow::anyhow!("failed to bind to {addr}: {e}")
    })?;
    info!("listening on {addr}");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reacjilator::tests::{registry_with, root, RecordingPlatform};
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use reacji_backends::stub::StubTranslator;
    use reacji_channels::slack::signature::compute_signature;
    use reacji_core::config::BackendKind;
    use std::time::Duration;
    use tower::ServiceExt;

    const SECRET: &str = "test-signing-secret";

    fn test_state(platform: Arc<RecordingPlatform>, secret: &str) -> ServerState {
        let registry = registry_with(StubTranslator::new("deepl", BackendKind::Deepl));
        let gateway = Arc::new(Gateway::new(
            platform,
            Arc::new(registry),
            "deepl-translation",
        ));
        ServerState::new(gateway, secret)
    }

    fn test_router(secret: &str) -> Router {
        build_router(test_state(Arc::new(RecordingPlatform::default()), secret))
    }

    fn signed_post(uri: &str, body: &str, content_type: &str) -> Request<Body> {
        let ts = chrono::Utc::now().timestamp().to_string();
        Request::post(uri)
            .header("Content-Type", content_type)
            .header(TIMESTAMP_HEADER, &ts)
            .header(SIGNATURE_HEADER, compute_signature(SECRET, &ts, body.as_bytes()))
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(resp: Response) -> Value {
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let resp = test_router(SECRET)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["backend"], "deepl");
    }

    #[tokio::test]
    async fn test_url_verification_returns_challenge() {
        let body = r#"{"type":"url_verification","token":"t","challenge":"abc123"}"#;
        let resp = test_router(SECRET)
            .oneshot(signed_post("/slack/events", body, "application/json"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["challenge"], "abc123");
    }

    #[tokio::test]
    async fn test_unsigned_request_is_rejected() {
        let req = Request::post("/slack/events")
            .header("Content-Type", "application/json")
            .body(Body::from(r#"{"type":"url_verification","challenge":"x"}"#))
            .unwrap();
        let resp = test_router(SECRET).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_bad_signature_is_rejected() {
        let ts = chrono::Utc::now().timestamp().to_string();
        let req = Request::post("/slack/events")
            .header(TIMESTAMP_HEADER, &ts)
            .header(SIGNATURE_HEADER, compute_signature("wrong", &ts, b"{}"))
            .body(Body::from("{}"))
            .unwrap();
        let resp = test_router(SECRET).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_empty_secret_skips_verification() {
        let req = Request::post("/slack/events")
            .body(Body::from(r#"{"type":"url_verification","challenge":"dev"}"#))
            .unwrap();
        let resp = test_router("").oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["challenge"], "dev");
    }

    #[tokio::test]
    async fn test_malformed_event_is_bad_request() {
        let resp = test_router(SECRET)
            .oneshot(signed_post("/slack/events", "not json", "application/json"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_reaction_event_is_acked_and_dispatched() {
        let platform = Arc::new(RecordingPlatform::with_thread(vec![root("Hello")]));
        let app = build_router(test_state(platform.clone(), SECRET));
        let body = r#"{"type":"event_callback","event":{"type":"reaction_added","reaction":"flag-jp","item":{"type":"message","channel":"C1","ts":"1700000000.000100"}}}"#;

        let resp = app
            .oneshot(signed_post("/slack/events", body, "application/json"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        for _ in 0..50 {
            if !platform.posted().is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(platform.posted()[0].1, "[ja] Hello");
    }

    #[tokio::test]
    async fn test_view_submission_returns_loading_ack() {
        let payload = r#"{"type":"view_submission","view":{"id":"V1","callback_id":"run-translation","private_metadata":"","state":{"values":{"text":{"a":{"value":"Hello"}},"lang":{"a":{"selected_option":{"value":"ja"}}}}}}}"#;
        let body = format!("payload={}", urlencoding::encode(payload));
        let resp = test_router(SECRET)
            .oneshot(signed_post(
                "/slack/interactions",
                &body,
                "application/x-www-form-urlencoded",
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["response_action"], "update");
        assert_eq!(json["view"]["private_metadata"], "ja");
    }

    #[tokio::test]
    async fn test_shortcut_gets_empty_ack() {
        let payload = r#"{"type":"shortcut","callback_id":"deepl-translation","trigger_id":"t1"}"#;
        let body = format!("payload={}", urlencoding::encode(payload));
        let resp = test_router(SECRET)
            .oneshot(signed_post(
                "/slack/interactions",
                &body,
                "application/x-www-form-urlencoded",
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.is_empty());
    }
}
