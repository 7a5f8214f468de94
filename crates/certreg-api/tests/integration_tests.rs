//! # Integration Tests for certreg-api
//!
//! Tests issuer management, the certificate lifecycle over HTTP, the
//! error-to-status mapping, metadata proxy behavior (503 without a
//! store), health probes, and OpenAPI spec generation.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use certreg_api::state::AppState;
use certreg_core::AccountId;

const ADMIN: &str = "admin";

/// Helper: build the test app with `admin` as registry admin and no
/// metadata store.
fn test_app() -> axum::Router {
    let state = AppState::new(AccountId::new(ADMIN).unwrap());
    certreg_api::app(state)
}

/// Helper: read response body as string.
async fn body_string(response: axum::http::Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Helper: read response body as JSON.
async fn body_json(response: axum::http::Response<Body>) -> Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

/// Helper: JSON request with an `x-actor` header.
fn request(method: &str, uri: &str, actor: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("x-actor", actor)
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

/// Helper: bare GET without identity.
fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Helper: drive one request against a fresh clone of the router.
async fn send(app: &axum::Router, req: Request<Body>) -> axum::http::Response<Body> {
    app.clone().oneshot(req).await.unwrap()
}

/// Helper: authorize `issuer` as admin, asserting success.
async fn authorize(app: &axum::Router, issuer: &str) {
    let response = send(
        app,
        request("POST", "/v1/issuers", ADMIN, json!({ "target": issuer })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Helper: issue a certificate and return its id.
async fn issue(app: &axum::Router, issuer: &str, recipient: &str, pointer: &str) -> u64 {
    let response = send(
        app,
        request(
            "POST",
            "/v1/certificates",
            issuer,
            json!({ "recipient": recipient, "metadata_pointer": pointer }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_u64().unwrap()
}

// -- Health Probes ------------------------------------------------------------

#[tokio::test]
async fn test_liveness_probe() {
    let response = send(&test_app(), get("/health/liveness")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");
}

#[tokio::test]
async fn test_readiness_probe() {
    let response = send(&test_app(), get("/health/readiness")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ready");
}

// -- Caller Identity ----------------------------------------------------------

#[tokio::test]
async fn test_mutation_without_actor_header_returns_401() {
    let app = test_app();
    let response = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/v1/issuers")
            .header("content-type", "application/json")
            .body(Body::from(json!({ "target": "issuer-a" }).to_string()))
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_queries_need_no_actor_header() {
    let app = test_app();
    let response = send(&app, get(&format!("/v1/issuers/{ADMIN}"))).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// -- Issuer Management --------------------------------------------------------

#[tokio::test]
async fn test_admin_is_an_issuer_from_the_start() {
    let app = test_app();
    let response = send(&app, get(&format!("/v1/issuers/{ADMIN}"))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["authorized"], json!(true));
}

#[tokio::test]
async fn test_admin_authorizes_and_revokes_issuer() {
    let app = test_app();
    authorize(&app, "issuer-a").await;

    let response = send(&app, get("/v1/issuers/issuer-a")).await;
    assert_eq!(body_json(response).await["authorized"], json!(true));

    let response = send(
        &app,
        Request::builder()
            .method("DELETE")
            .uri("/v1/issuers/issuer-a")
            .header("x-actor", ADMIN)
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["target"], "issuer-a");

    let response = send(&app, get("/v1/issuers/issuer-a")).await;
    assert_eq!(body_json(response).await["authorized"], json!(false));
}

#[tokio::test]
async fn test_non_admin_cannot_authorize_issuer() {
    let app = test_app();
    let response = send(
        &app,
        request("POST", "/v1/issuers", "mallory", json!({ "target": "mallory" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_admin_cannot_be_revoked_as_issuer() {
    let app = test_app();
    let response = send(
        &app,
        Request::builder()
            .method("DELETE")
            .uri(&format!("/v1/issuers/{ADMIN}"))
            .header("x-actor", ADMIN)
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// -- Certificate Lifecycle ----------------------------------------------------

#[tokio::test]
async fn test_full_certificate_lifecycle() {
    let app = test_app();
    authorize(&app, "issuer-a").await;

    let id = issue(&app, "issuer-a", "alice", "QmPointer1").await;
    assert_eq!(id, 1);

    // Look it up.
    let response = send(&app, get("/v1/certificates/1")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["issuer"], "issuer-a");
    assert_eq!(body["recipient"], "alice");
    assert_eq!(body["metadata_pointer"], "QmPointer1");
    assert_eq!(body["is_revoked"], json!(false));
    assert_eq!(body["revoke_reason"], "");

    // Verify: valid.
    let response = send(&app, get("/v1/certificates/1/verify")).await;
    let body = body_json(response).await;
    assert_eq!(body["valid"], json!(true));

    // Revoke as issuer of record.
    let response = send(
        &app,
        request(
            "POST",
            "/v1/certificates/1/revoke",
            "issuer-a",
            json!({ "reason": "issued in error" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["is_revoked"], json!(true));
    assert_eq!(body["revoke_reason"], "issued in error");
    assert_eq!(body["revoked_by"], "issuer-a");

    // Verify: now invalid, but still retrievable.
    let response = send(&app, get("/v1/certificates/1/verify")).await;
    let body = body_json(response).await;
    assert_eq!(body["valid"], json!(false));
    assert_eq!(body["certificate"]["is_revoked"], json!(true));
}

#[tokio::test]
async fn test_ids_are_sequential_from_one() {
    let app = test_app();
    let first = issue(&app, ADMIN, "alice", "QmA").await;
    let second = issue(&app, ADMIN, "bob", "QmB").await;
    let third = issue(&app, ADMIN, "alice", "QmC").await;
    assert_eq!((first, second, third), (1, 2, 3));
}

#[tokio::test]
async fn test_unauthorized_caller_cannot_issue() {
    let app = test_app();
    let response = send(
        &app,
        request(
            "POST",
            "/v1/certificates",
            "mallory",
            json!({ "recipient": "alice", "metadata_pointer": "QmX" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_empty_metadata_pointer_is_rejected() {
    let app = test_app();
    let response = send(
        &app,
        request(
            "POST",
            "/v1/certificates",
            ADMIN,
            json!({ "recipient": "alice", "metadata_pointer": "" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_unknown_certificate_returns_404() {
    let app = test_app();
    for uri in ["/v1/certificates/99", "/v1/certificates/99/verify"] {
        let response = send(&app, get(uri)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "uri: {uri}");
    }
}

#[tokio::test]
async fn test_double_revocation_returns_409() {
    let app = test_app();
    let id = issue(&app, ADMIN, "alice", "QmA").await;
    let uri = format!("/v1/certificates/{id}/revoke");

    let response = send(&app, request("POST", &uri, ADMIN, json!({}))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, request("POST", &uri, ADMIN, json!({}))).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn test_third_party_cannot_revoke() {
    let app = test_app();
    authorize(&app, "issuer-a").await;
    authorize(&app, "issuer-b").await;
    let id = issue(&app, "issuer-a", "alice", "QmA").await;

    // A different issuer is not the issuer of record.
    let response = send(
        &app,
        request(
            "POST",
            &format!("/v1/certificates/{id}/revoke"),
            "issuer-b",
            json!({ "reason": "nope" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_can_revoke_any_certificate() {
    let app = test_app();
    authorize(&app, "issuer-a").await;
    let id = issue(&app, "issuer-a", "alice", "QmA").await;

    let response = send(
        &app,
        request(
            "POST",
            &format!("/v1/certificates/{id}/revoke"),
            ADMIN,
            json!({ "reason": "policy" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["revoked_by"], ADMIN);
}

// -- Recipient Listing --------------------------------------------------------

#[tokio::test]
async fn test_recipient_listing_preserves_issuance_order() {
    let app = test_app();
    issue(&app, ADMIN, "alice", "QmA").await;
    issue(&app, ADMIN, "bob", "QmB").await;
    issue(&app, ADMIN, "alice", "QmC").await;

    let response = send(&app, get("/v1/recipients/alice/certificates")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["recipient"], "alice");
    assert_eq!(body["certificate_ids"], json!([1, 3]));
}

#[tokio::test]
async fn test_unknown_recipient_gets_empty_list() {
    let app = test_app();
    let response = send(&app, get("/v1/recipients/nobody/certificates")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["certificate_ids"], json!([]));
}

// -- Metadata Proxy -----------------------------------------------------------
//
// Without a store configured, metadata endpoints return 503.

#[tokio::test]
async fn test_metadata_upload_returns_503_without_store() {
    let app = test_app();
    let response = send(
        &app,
        request(
            "POST",
            "/v1/metadata",
            ADMIN,
            json!({ "name": "Alice", "course": "Rust 101", "date": "2026-06-01" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "SERVICE_UNAVAILABLE");
}

#[tokio::test]
async fn test_metadata_upload_validates_before_store_check() {
    // Field validation answers 422 even with no store configured.
    let app = test_app();
    let response = send(
        &app,
        request(
            "POST",
            "/v1/metadata",
            ADMIN,
            json!({ "name": "", "course": "Rust 101", "date": "2026-06-01" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_metadata_fetch_returns_503_without_store() {
    let app = test_app();
    let response = send(&app, get("/v1/metadata/QmSomePointer")).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

// -- OpenAPI ------------------------------------------------------------------

#[tokio::test]
async fn test_openapi_spec_is_served() {
    let app = test_app();
    let response = send(&app, get("/openapi.json")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["paths"]["/v1/certificates"].is_object());
    assert!(body["paths"]["/v1/issuers"].is_object());
}
