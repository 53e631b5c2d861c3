//! In-process test application
//!
//! Builds the real router against a wiremock backend and drives it with
//! tower's `oneshot`, so tests exercise routing, extraction and error
//! conversion without opening a socket.

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use chrono::Utc;
use serde_json::Value;
use tower::ServiceExt;
use wiremock::MockServer;

use certifyer_webui::config::{
    AppConfig, BackendConfig, ExportConfig, LinkConfig, LoggingConfig, ServerConfig,
};
use certifyer_webui::services::TokenPayload;
use certifyer_webui::{api, AppState};

pub struct TestApp {
    pub backend: MockServer,
    pub state: AppState,
    router: Router,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let backend = MockServer::start().await;
        Self::build(backend.uri(), backend).await
    }

    /// Like `spawn`, but the configured backend URL points at a port with
    /// nothing listening, so every backend call fails at the transport level
    pub async fn spawn_with_unreachable_backend() -> Self {
        // Bind to grab a free port, then release it before building the app
        let listener =
            std::net::TcpListener::bind("127.0.0.1:0").expect("failed to reserve a port");
        let dead_url = format!(
            "http://127.0.0.1:{}",
            listener.local_addr().expect("no local addr").port()
        );
        drop(listener);
        let backend = MockServer::start().await;
        Self::build(dead_url, backend).await
    }

    async fn build(backend_url: String, backend: MockServer) -> Self {
        let config = AppConfig {
            server: ServerConfig {
                public_base_url: "https://certs.example.com".to_string(),
                ..ServerConfig::default()
            },
            backend: BackendConfig {
                url: backend_url,
                timeout_secs: 5,
                api_key: None,
            },
            links: LinkConfig::default(),
            export: ExportConfig {
                // Keep asset retries snappy in tests
                asset_timeout_ms: 500,
                ..ExportConfig::default()
            },
            logging: LoggingConfig::default(),
        };
        let state = AppState::from_config(config).expect("failed to build test state");
        let router = Router::new()
            .merge(api::health_routes())
            .nest("/api/v1", api::public_routes())
            .with_state(state.clone());
        Self {
            backend,
            state,
            router,
        }
    }

    /// Encode a valid link token for the given identity
    pub fn token_for(&self, org_id: &str, program_id: &str, certificate_id: &str) -> String {
        self.state
            .codec
            .encode(&TokenPayload {
                organization_id: org_id.to_string(),
                program_id: program_id.to_string(),
                certificate_id: certificate_id.to_string(),
                issued_at: Utc::now(),
            })
            .expect("token encoding failed")
    }

    /// Encode a token issued in the past (for expiry scenarios)
    pub fn stale_token_for(&self, certificate_id: &str, age_days: i64) -> String {
        self.state
            .codec
            .encode(&TokenPayload {
                organization_id: "o1".to_string(),
                program_id: "p1".to_string(),
                certificate_id: certificate_id.to_string(),
                issued_at: Utc::now() - chrono::Duration::days(age_days),
            })
            .expect("token encoding failed")
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .body(Body::empty())
                    .expect("failed to build request"),
            )
            .await
            .expect("request failed")
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> Response<Body> {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .expect("failed to build request"),
            )
            .await
            .expect("request failed")
    }
}

/// Read a response body as bytes
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body")
        .to_vec()
}

/// Read a response body as JSON
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).expect("body is not valid JSON")
}

/// Assert a status and return the parsed JSON body
pub async fn expect_json(response: Response<Body>, status: StatusCode) -> Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}
