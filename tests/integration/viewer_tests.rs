//! Certificate viewer endpoint tests

use axum::http::StatusCode;
use serde_json::json;

use crate::common::fixtures::*;
use crate::common::test_app::{expect_json, TestApp};

#[tokio::test]
async fn health_endpoints_respond() {
    let app = TestApp::spawn().await;
    for uri in ["/health", "/health/live", "/health/ready"] {
        let response = app.get(uri).await;
        assert_eq!(response.status(), StatusCode::OK, "uri: {}", uri);
    }
}

#[tokio::test]
async fn token_link_resolves_to_certificate_view() {
    let app = TestApp::spawn().await;
    mount_certificate(&app.backend, "c-12345678", certificate_body("c-12345678")).await;

    let token = app.token_for("o1", "p1", "c-12345678");
    let response = app.get(&format!("/api/v1/certificate/{}", token)).await;
    let body = expect_json(response, StatusCode::OK).await;

    assert_eq!(body["certificate"]["id"], "c-12345678");
    assert_eq!(body["certificate"]["courseName"], "Rust Fundamentals");
    // New shape: name collected at view time
    assert_eq!(body["needsName"], true);
    assert_eq!(body["status"], "valid");
    assert_eq!(body["certificate"]["verificationCode"], "VER-12345678");
    assert!(body["canonicalUrl"]
        .as_str()
        .unwrap()
        .starts_with("https://certs.example.com/certificate/"));
}

#[tokio::test]
async fn legacy_three_segment_link_still_resolves() {
    let app = TestApp::spawn().await;
    mount_certificate(
        &app.backend,
        "cert-legacy-1",
        legacy_certificate_body("cert-legacy-1", "Ada Lovelace"),
    )
    .await;

    let response = app.get("/api/v1/certificate/o2/p2/cert-legacy-1").await;
    let body = expect_json(response, StatusCode::OK).await;

    assert_eq!(body["needsName"], false);
    assert_eq!(body["certificate"]["studentName"], "Ada Lovelace");
    // Legacy shape pulls course metadata from the program snapshot
    assert_eq!(body["certificate"]["program"]["name"], "Analytical Engines");
}

#[tokio::test]
async fn expired_token_is_gone_without_legacy_fallback() {
    let app = TestApp::spawn().await;
    // Even a fetchable certificate must not be reachable through a stale token
    mount_certificate(&app.backend, "c1", certificate_body("c1")).await;

    let stale = app.stale_token_for("c1", 40);
    let response = app.get(&format!("/api/v1/certificate/{}", stale)).await;
    let body = expect_json(response, StatusCode::GONE).await;
    assert_eq!(body["error"], "invalid_or_expired_link");
    assert!(body["recovery"].is_string());
}

#[tokio::test]
async fn malformed_token_collapses_to_same_error_as_expired() {
    let app = TestApp::spawn().await;

    let expired = {
        let stale = app.stale_token_for("c1", 40);
        let response = app.get(&format!("/api/v1/certificate/{}", stale)).await;
        expect_json(response, StatusCode::GONE).await
    };
    let malformed = {
        let response = app.get("/api/v1/certificate/not-a-real-token").await;
        expect_json(response, StatusCode::GONE).await
    };
    // No oracle distinguishing tampered from stale links
    assert_eq!(expired["error"], malformed["error"]);
    assert_eq!(expired["message"], malformed["message"]);
}

#[tokio::test]
async fn unrecognized_path_shape_is_bad_request() {
    let app = TestApp::spawn().await;
    let response = app.get("/api/v1/certificate/a/b").await;
    let body = expect_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn missing_certificate_is_not_found() {
    let app = TestApp::spawn().await;
    mount_certificate_missing(&app.backend, "ghost").await;

    let token = app.token_for("o1", "p1", "ghost");
    let response = app.get(&format!("/api/v1/certificate/{}", token)).await;
    let body = expect_json(response, StatusCode::NOT_FOUND).await;
    assert_eq!(body["error"], "certificate_not_found");
}

#[tokio::test]
async fn backend_failure_surfaces_as_bad_gateway() {
    let app = TestApp::spawn().await;
    // No mock mounted: wiremock answers 404 for the unmatched path would be
    // NotFound, so mount an explicit 500 instead
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .respond_with(wiremock::ResponseTemplate::new(500))
        .mount(&app.backend)
        .await;

    let token = app.token_for("o1", "p1", "c1");
    let response = app.get(&format!("/api/v1/certificate/{}", token)).await;
    let body = expect_json(response, StatusCode::BAD_GATEWAY).await;
    assert_eq!(body["error"], "backend_error");
}

#[tokio::test]
async fn unreachable_backend_is_distinct_from_backend_failure() {
    // Connection refused is retryable and must not wear the same error code
    // as an unexpected backend response
    let app = TestApp::spawn_with_unreachable_backend().await;

    let token = app.token_for("o1", "p1", "c1");
    let response = app.get(&format!("/api/v1/certificate/{}", token)).await;
    let body = expect_json(response, StatusCode::BAD_GATEWAY).await;
    assert_eq!(body["error"], "backend_unreachable");
    assert_eq!(
        body["recovery"],
        "Check your connection and reload the page"
    );
}

#[tokio::test]
async fn custom_config_suppresses_library_lookup() {
    let app = TestApp::spawn().await;
    // Certificate carries both a library template id and a saved design; the
    // saved design must win and the library must never be consulted
    let body = with_custom_config(certificate_body("c-custom"));
    mount_certificate(&app.backend, "c-custom", body).await;
    forbid_template_lookup(&app.backend, "template4").await;

    let token = app.token_for("o1", "p1", "c-custom");
    let response = app.get(&format!("/api/v1/certificate/{}", token)).await;
    let body = expect_json(response, StatusCode::OK).await;
    assert_eq!(
        body["certificate"]["customTemplateConfig"]["name"],
        "Saved Design"
    );
}

#[tokio::test]
async fn library_template_is_hydrated_when_no_custom_config() {
    let app = TestApp::spawn().await;
    mount_certificate(&app.backend, "c-lib", certificate_body("c-lib")).await;
    mount_template(
        &app.backend,
        "template4",
        json!({"name": "Ocean", "colors": {"accentColor": "#0ea5e9"}}),
    )
    .await;

    let token = app.token_for("o1", "p1", "c-lib");
    let response = app.get(&format!("/api/v1/certificate/{}", token)).await;
    let body = expect_json(response, StatusCode::OK).await;
    assert_eq!(body["certificate"]["customTemplateConfig"]["name"], "Ocean");
}

#[tokio::test]
async fn library_lookup_failure_degrades_to_defaults() {
    let app = TestApp::spawn().await;
    mount_certificate(&app.backend, "c-deg", certificate_body("c-deg")).await;
    // Template route answers 500; the certificate still renders
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .and(wiremock::matchers::path("/templates/template4"))
        .respond_with(wiremock::ResponseTemplate::new(500))
        .mount(&app.backend)
        .await;

    let token = app.token_for("o1", "p1", "c-deg");
    let response = app.get(&format!("/api/v1/certificate/{}", token)).await;
    let body = expect_json(response, StatusCode::OK).await;
    assert!(body["certificate"]["customTemplateConfig"].is_null());
}

#[tokio::test]
async fn testimonial_submission_passes_through() {
    let app = TestApp::spawn().await;
    wiremock::Mock::given(wiremock::matchers::method("POST"))
        .and(wiremock::matchers::path("/certificates/c1/testimonial"))
        .respond_with(wiremock::ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.backend)
        .await;

    let response = app
        .post_json(
            "/api/v1/certificates/c1/testimonial",
            json!({
                "studentName": "Ada Lovelace",
                "testimonial": "Great course!",
                "courseName": "Rust Fundamentals",
                "organizationId": "o1",
                "programId": "p1"
            }),
        )
        .await;
    let body = expect_json(response, StatusCode::ACCEPTED).await;
    assert_eq!(body["status"], "accepted");
}

#[tokio::test]
async fn testimonial_with_blank_name_is_rejected() {
    let app = TestApp::spawn().await;
    let response = app
        .post_json(
            "/api/v1/certificates/c1/testimonial",
            json!({"studentName": "   ", "testimonial": "x"}),
        )
        .await;
    let body = expect_json(response, StatusCode::UNPROCESSABLE_ENTITY).await;
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn testimonial_with_bad_certificate_id_is_rejected() {
    let app = TestApp::spawn().await;
    let response = app
        .post_json(
            "/api/v1/certificates/bad%20id/testimonial",
            json!({"studentName": "Ada", "testimonial": ""}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn share_target_builds_platform_url() {
    let app = TestApp::spawn().await;
    mount_certificate(&app.backend, "c-share", certificate_body("c-share")).await;
    // No template mock mounted: the library lookup 404s and degrades quietly

    let token = app.token_for("o1", "p1", "c-share");
    let response = app
        .get(&format!(
            "/api/v1/certificate/{}/share?platform=twitter",
            token
        ))
        .await;
    let body = expect_json(response, StatusCode::OK).await;
    let url = body["url"].as_str().unwrap();
    assert!(url.starts_with("https://twitter.com/intent/tweet"));
    assert!(url.contains("Rust%20Fundamentals"));
}

#[tokio::test]
async fn share_with_unknown_platform_is_bad_request() {
    let app = TestApp::spawn().await;
    mount_certificate(&app.backend, "c-share2", certificate_body("c-share2")).await;

    let token = app.token_for("o1", "p1", "c-share2");
    let response = app
        .get(&format!(
            "/api/v1/certificate/{}/share?platform=myspace",
            token
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
