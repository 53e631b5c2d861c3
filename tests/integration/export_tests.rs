//! Export endpoint tests

use axum::http::{header, StatusCode};
use serde_json::json;

use crate::common::fixtures::*;
use crate::common::test_app::{body_bytes, expect_json, TestApp};

fn content_disposition(response: &axum::http::Response<axum::body::Body>) -> String {
    response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .expect("missing content-disposition")
        .to_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn export_returns_jpeg_attachment() {
    let app = TestApp::spawn().await;
    mount_certificate(&app.backend, "c-exp", certificate_body("c-exp")).await;

    let token = app.token_for("o1", "p1", "c-exp");
    let response = app
        .get(&format!("/api/v1/certificate/{}/image", token))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "image/jpeg"
    );
    let disposition = content_disposition(&response);
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains("Rust_Fundamentals"));

    let bytes = body_bytes(response).await;
    assert_eq!(&bytes[..2], &[0xff, 0xd8]);
    assert_eq!(&bytes[bytes.len() - 2..], &[0xff, 0xd9]);
}

#[tokio::test]
async fn export_filename_uses_entered_name() {
    let app = TestApp::spawn().await;
    // New-shape certificate: no stored student name
    mount_certificate(&app.backend, "c-name", certificate_body("c-name")).await;

    let token = app.token_for("o1", "p1", "c-name");
    let response = app
        .get(&format!(
            "/api/v1/certificate/{}/image?name=Ada%20Lovelace",
            token
        ))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let disposition = content_disposition(&response);
    assert!(disposition.contains("Rust_Fundamentals_Ada_Lovelace.jpeg"));
}

#[tokio::test]
async fn export_survives_broken_logo_asset() {
    let app = TestApp::spawn().await;
    let logo_url = format!("{}/assets/logo.png", app.backend.uri());
    let body = with_logo(certificate_body("c-logo"), &logo_url);
    mount_certificate(&app.backend, "c-logo", body).await;
    // Logo route intentionally not mounted: both the fetch and its
    // cache-busted retry fail, degrading to a transparent placeholder

    let token = app.token_for("o1", "p1", "c-logo");
    let response = app
        .get(&format!("/api/v1/certificate/{}/image", token))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = body_bytes(response).await;
    assert_eq!(&bytes[..2], &[0xff, 0xd8]);
}

#[tokio::test]
async fn export_embeds_resolvable_logo_asset() {
    let app = TestApp::spawn().await;
    let logo_url = format!("{}/assets/logo.png", app.backend.uri());
    let body = with_logo(certificate_body("c-logo2"), &logo_url);
    mount_certificate(&app.backend, "c-logo2", body).await;
    mount_asset(&app.backend, "/assets/logo.png", png_bytes(8, 8)).await;

    let token = app.token_for("o1", "p1", "c-logo2");
    let response = app
        .get(&format!("/api/v1/certificate/{}/image", token))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn export_with_custom_design_renders() {
    let app = TestApp::spawn().await;
    let body = with_custom_config(certificate_body("c-custom-exp"));
    mount_certificate(&app.backend, "c-custom-exp", body).await;
    forbid_template_lookup(&app.backend, "template4").await;

    let token = app.token_for("o1", "p1", "c-custom-exp");
    let response = app
        .get(&format!("/api/v1/certificate/{}/image", token))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn export_of_expired_link_is_gone() {
    let app = TestApp::spawn().await;
    let stale = app.stale_token_for("c1", 45);
    let response = app
        .get(&format!("/api/v1/certificate/{}/image", stale))
        .await;
    let body = expect_json(response, StatusCode::GONE).await;
    assert_eq!(body["error"], "invalid_or_expired_link");
}

#[tokio::test]
async fn export_of_missing_certificate_is_not_found() {
    let app = TestApp::spawn().await;
    mount_certificate_missing(&app.backend, "ghost").await;

    let token = app.token_for("o1", "p1", "ghost");
    let response = app
        .get(&format!("/api/v1/certificate/{}/image", token))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn export_via_legacy_link_works() {
    let app = TestApp::spawn().await;
    mount_certificate(
        &app.backend,
        "cert-old",
        legacy_certificate_body("cert-old", "Grace Hopper"),
    )
    .await;

    let response = app
        .get("/api/v1/certificate/o2/p2/cert-old/image")
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let disposition = content_disposition(&response);
    // Stored name wins; legacy course name comes from the program snapshot
    assert!(disposition.contains("Analytical_Engines_Grace_Hopper.jpeg"));
}

#[tokio::test]
async fn testimonial_payload_too_long_is_rejected() {
    let app = TestApp::spawn().await;
    let response = app
        .post_json(
            "/api/v1/certificates/c1/testimonial",
            json!({"studentName": "Ada", "testimonial": "x".repeat(2001)}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
