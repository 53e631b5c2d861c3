//! Backend response fixtures

use std::io::Cursor;

use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// New-shape certificate: no embedded student name, course metadata on the
/// certificate itself
pub fn certificate_body(id: &str) -> Value {
    json!({
        "certificate": {
            "id": id,
            "courseName": "Rust Fundamentals",
            "certificateHeader": "Certificate of Completion",
            "courseDescription": "Completed all twelve modules",
            "completionDate": "2024-06-11",
            "status": "active",
            "organizationId": "o1",
            "programId": "p1",
            "template": "template4",
            "signatories": [
                {"name": "Dr. Smith", "title": "Dean", "signatureUrl": null}
            ]
        },
        "organization": {"id": "o1", "name": "Acme Academy", "logo": null},
        "program": {"id": "p1", "name": "Rust Track"}
    })
}

/// Legacy-shape certificate with an embedded student name
pub fn legacy_certificate_body(id: &str, student_name: &str) -> Value {
    json!({
        "certificate": {
            "id": id,
            "studentName": student_name,
            "completionDate": "2023-01-15",
            "status": "valid"
        },
        "organization": {"id": "o2", "name": "Old School"},
        "program": {
            "id": "p2",
            "name": "Analytical Engines",
            "description": "A venerable course",
            "template": "template2"
        }
    })
}

/// Attach a custom template configuration to a certificate body
pub fn with_custom_config(mut body: Value) -> Value {
    body["certificate"]["customTemplateConfig"] = json!({
        "name": "Saved Design",
        "colors": {"background": "#123456", "accentColor": "#abcdef"}
    });
    body
}

/// Point the bundled organization's logo at a URL
pub fn with_logo(mut body: Value, logo_url: &str) -> Value {
    body["organization"]["logo"] = json!(logo_url);
    body
}

pub async fn mount_certificate(server: &MockServer, id: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/certificates/{}", id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub async fn mount_certificate_missing(server: &MockServer, id: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/certificates/{}", id)))
        .respond_with(ResponseTemplate::new(404))
        .mount(server)
        .await;
}

pub async fn mount_template(server: &MockServer, template_id: &str, config: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/templates/{}", template_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "template": {"name": "Library Design", "config": config}
        })))
        .expect(1)
        .mount(server)
        .await;
}

/// Mount a template route that must never be called
pub async fn forbid_template_lookup(server: &MockServer, template_id: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/templates/{}", template_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"template": null})))
        .expect(0)
        .mount(server)
        .await;
}

/// Minimal valid PNG for asset mocking
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([40, 80, 120, 255]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .expect("PNG encoding failed");
    out.into_inner()
}

pub async fn mount_asset(server: &MockServer, asset_path: &str, bytes: Vec<u8>) {
    Mock::given(method("GET"))
        .and(path(asset_path))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/png")
                .set_body_bytes(bytes),
        )
        .mount(server)
        .await;
}
