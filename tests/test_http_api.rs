//! HTTP route tests, driven through the router with `tower::ServiceExt::oneshot`.

mod mocks;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use dentobridge_leads::client::{LeadApiClient, LeadGateway};
use dentobridge_leads::config::MailSettings;
use dentobridge_leads::error::{DISPATCH_FAILED_MESSAGE, UNEXPECTED_ERROR_MESSAGE};
use dentobridge_leads::server::{self, CONTACT_PATH, DEMO_REQUEST_PATH};
use dentobridge_leads::{AppState, ContactSubmission, LeadService, Metrics};
use http_body_util::BodyExt;
use mocks::{MockEmailSender, SendBehavior};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

const SITE_URL: &str = "https://dentobridge.com";

fn app(sender: &MockEmailSender) -> Router {
    let service = LeadService::new(
        Arc::new(sender.clone()),
        MailSettings::default(),
        Metrics::new(),
    );
    server::router(AppState::new(service, SITE_URL))
}

fn post_json(path: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn send_json(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, body) = send(app, request).await;
    (status, serde_json::from_str(&body).unwrap())
}

fn valid_contact() -> Value {
    json!({
        "nom": "Ben",
        "prenom": "Ali",
        "telephone": "0612345678",
        "email": "a@b.com",
        "sujet": "support",
        "message": "J'ai un problème technique"
    })
}

#[tokio::test]
async fn test_contact_accepted() {
    let sender = MockEmailSender::new();

    let (status, body) = send_json(
        app(&sender),
        post_json(CONTACT_PATH, valid_contact().to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));
    assert_eq!(sender.sent_count(), 1);
}

#[tokio::test]
async fn test_contact_validation_failure() {
    let sender = MockEmailSender::new();
    let mut payload = valid_contact();
    payload["telephone"] = json!("06123");

    let (status, body) = send_json(app(&sender), post_json(CONTACT_PATH, payload.to_string())).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], json!(false));
    assert_eq!(
        body["error"],
        json!("Le numéro de téléphone doit contenir exactement 10 chiffres")
    );
    assert_eq!(sender.sent_count(), 0);
}

#[tokio::test]
async fn test_missing_and_null_fields_fail_validation() {
    let sender = MockEmailSender::new();
    let payload = json!({ "nom": null, "prenom": "Ali" });

    let (status, body) = send_json(app(&sender), post_json(CONTACT_PATH, payload.to_string())).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], json!("Le nom est requis"));
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let sender = MockEmailSender::new();

    let (status, body) = send_json(
        app(&sender),
        post_json(CONTACT_PATH, "{ not json".to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!(UNEXPECTED_ERROR_MESSAGE));
    assert_eq!(sender.sent_count(), 0);
}

#[tokio::test]
async fn test_missing_content_type_is_bad_request() {
    let sender = MockEmailSender::new();
    let request = Request::builder()
        .method("POST")
        .uri(DEMO_REQUEST_PATH)
        .body(Body::from(valid_contact().to_string()))
        .unwrap();

    let (status, _) = send(app(&sender), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_provider_rejection_is_bad_gateway() {
    let sender = MockEmailSender::rejecting(422, "Invalid `to` field");

    let (status, body) = send_json(
        app(&sender),
        post_json(CONTACT_PATH, valid_contact().to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], json!(DISPATCH_FAILED_MESSAGE));
}

#[tokio::test]
async fn test_sender_panic_is_internal_error() {
    let sender = MockEmailSender::with_behavior(SendBehavior::Panic);
    let payload = json!({
        "nom": "Martin",
        "prenom": "Claire",
        "telephone": "0123456789",
        "forfait": "starter"
    });

    let (status, body) = send_json(
        app(&sender),
        post_json(DEMO_REQUEST_PATH, payload.to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], json!(UNEXPECTED_ERROR_MESSAGE));
}

#[tokio::test]
async fn test_demo_request_with_empty_email() {
    let sender = MockEmailSender::new();
    let payload = json!({
        "nom": "Martin",
        "prenom": "Claire",
        "telephone": "0123456789",
        "email": "",
        "forfait": "starter"
    });

    let (status, _) = send_json(
        app(&sender),
        post_json(DEMO_REQUEST_PATH, payload.to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let sent = sender.sent();
    assert_eq!(
        sent[0].subject,
        "Demande de démo DentoBridge - Starter (~50 Commandes/Mois)"
    );
    assert!(sent[0].text.contains("- Email: Non renseigné"));
}

#[tokio::test]
async fn test_demo_request_without_package_is_rejected() {
    let sender = MockEmailSender::new();
    let payload = json!({
        "nom": "Ben",
        "prenom": "Ali",
        "telephone": "0612345678"
    });

    let (status, body) = send_json(
        app(&sender),
        post_json(DEMO_REQUEST_PATH, payload.to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("Veuillez sélectionner un forfait"));
    assert_eq!(sender.sent_count(), 0);
}

#[tokio::test]
async fn test_health() {
    let sender = MockEmailSender::new();
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send_json(app(&sender), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("ok"));
    assert!(body["version"].is_string());
    assert_eq!(body["metrics"]["contact"]["sent"], json!(0));
}

#[tokio::test]
async fn test_sitemap() {
    let sender = MockEmailSender::new();
    let request = Request::builder()
        .uri("/sitemap.xml")
        .body(Body::empty())
        .unwrap();

    let response = app(&sender).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/xml"
    );

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let xml = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(xml.contains("<loc>https://dentobridge.com</loc>"));
    assert!(xml.contains("<changefreq>monthly</changefreq>"));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let sender = MockEmailSender::new();
    let request = Request::builder()
        .uri("/api/unknown")
        .body(Body::empty())
        .unwrap();

    let (status, _) = send(app(&sender), request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_lead_api_client_against_running_server() {
    let sender = MockEmailSender::new();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = app(&sender);
    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });

    let client = LeadApiClient::new(format!("http://{}", addr), Duration::from_secs(5));

    let accepted = client
        .submit_contact(&ContactSubmission {
            last_name: "Ben".into(),
            first_name: "Ali".into(),
            phone: "0612345678".into(),
            email: "a@b.com".into(),
            subject: "general".into(),
            custom_subject: None,
            message: "Bonjour, une question".into(),
        })
        .await;
    let accepted = tokio_test::assert_ok!(accepted);
    assert!(accepted.success);

    let rejected = client
        .submit_contact(&ContactSubmission::default())
        .await
        .unwrap();
    assert!(!rejected.success);
    assert_eq!(rejected.error.as_deref(), Some("Le nom est requis"));

    assert_eq!(sender.sent_count(), 1);
    assert_eq!(
        sender.sent()[0].subject,
        "Contact DentoBridge - Question générale"
    );
}
