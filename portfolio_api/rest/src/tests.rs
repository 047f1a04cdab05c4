use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    routing, Router,
};
use chrono::{TimeZone, Utc};
use portfolio_core_contact_contracts::{
    ContactListError, ContactPage, ContactSubmitError, MockContactFeatureService,
};
use portfolio_core_health_contracts::{HealthStatus, MockHealthFeatureService};
use portfolio_demo::{
    contact::{ALICE, ALL_CONTACTS},
    ADMIN_KEY,
};
use portfolio_models::{
    auth::AdminAuthError,
    contact::{ContactSubmission, SubmissionField},
    environment::Environment,
    pagination::{PageMeta, PageRequest},
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::{middlewares, CorsPolicy, RestServer, RestServerConfig};

type Sut = RestServer<MockHealthFeatureService, MockContactFeatureService>;

fn sut(health: MockHealthFeatureService, contact: MockContactFeatureService) -> Router {
    Sut {
        health,
        contact,
        config: RestServerConfig {
            environment: Environment::new("test"),
            api_version: "v1".into(),
            cors: Arc::new(CorsPolicy {
                origins: vec!["http://localhost:3000".into()],
                preview_suffix: Some(".vercel.app".into()),
            }),
        },
    }
    .router()
}

fn contact(contact: MockContactFeatureService) -> Router {
    sut(MockHealthFeatureService::new(), contact)
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, headers, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn list_request(admin_key: Option<&str>, query: &str) -> Request<Body> {
    let mut request = Request::get(format!("/api/v1/admin/contacts{query}"));
    if let Some(admin_key) = admin_key {
        request = request.header("x-admin-key", admin_key);
    }
    request.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn health() {
    // Arrange
    let health = MockHealthFeatureService::new().with_get_status(HealthStatus {
        timestamp: Utc.with_ymd_and_hms(2024, 5, 4, 3, 2, 1).unwrap(),
        environment: Environment::new("test"),
        database: false,
    });
    let sut = sut(health, MockContactFeatureService::new());

    // Act
    let (status, headers, body) = send(sut, get("/api/v1/health")).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert!(headers.contains_key("x-request-id"));
    assert_eq!(
        body,
        json!({
            "status": "ok",
            "message": "Portfolio API is running",
            "timestamp": "2024-05-04T03:02:01Z",
            "environment": "test",
            "database": false,
        })
    );
}

#[tokio::test]
async fn submit_ok() {
    // Arrange
    let submission = ContactSubmission {
        name: "John Doe".into(),
        email: "john@example.com".into(),
        phone: "0123456789".into(),
        message: "Hello".into(),
    };
    let contact = MockContactFeatureService::new().with_submit(submission, Ok(ALICE.id));

    // Act
    let (status, _, body) = send(
        self::contact(contact),
        post_json(
            "/api/v1/contact",
            json!({
                "name": "John Doe",
                "email": "john@example.com",
                "phone": "0123456789",
                "message": "Hello",
                "extra": "ignored",
            }),
        ),
    )
    .await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "success": true,
            "message": "Message sent successfully",
            "contactId": ALICE.id.to_string(),
        })
    );
}

#[tokio::test]
async fn submit_invalid() {
    // Arrange
    let submission = ContactSubmission {
        name: SubmissionField::NotAString,
        email: SubmissionField::Missing,
        phone: "0123456789".into(),
        message: "Hello".into(),
    };
    let contact = MockContactFeatureService::new()
        .with_submit(submission, Err(ContactSubmitError::MissingFields));

    // Act
    let (status, _, body) = send(
        self::contact(contact),
        post_json(
            "/api/v1/contact",
            json!({"name": 42, "email": null, "phone": "0123456789", "message": "Hello"}),
        ),
    )
    .await;

    // Assert
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "success": false,
            "error": "All fields are required: name, email, phone, and message",
        })
    );
}

#[tokio::test]
async fn submit_store_failure() {
    // Arrange
    let contact = MockContactFeatureService::new().with_submit(
        ContactSubmission {
            name: "John Doe".into(),
            email: "john@example.com".into(),
            phone: "0123456789".into(),
            message: "Hello".into(),
        },
        Err(ContactSubmitError::Other(anyhow::anyhow!("connection refused"))),
    );

    // Act
    let (status, _, body) = send(
        self::contact(contact),
        post_json(
            "/api/v1/contact",
            json!({
                "name": "John Doe",
                "email": "john@example.com",
                "phone": "0123456789",
                "message": "Hello",
            }),
        ),
    )
    .await;

    // Assert
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"success": false, "error": "Failed to send message"})
    );
}

#[tokio::test]
async fn submit_malformed_body() {
    // Arrange
    let sut = contact(MockContactFeatureService::new());
    let request = Request::post("/api/v1/contact")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    // Act
    let (status, _, body) = send(sut, request).await;

    // Assert
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn submit_form_body() {
    // Arrange
    let submission = ContactSubmission {
        name: "John Doe".into(),
        email: "john@example.com".into(),
        phone: "0123456789".into(),
        message: SubmissionField::Missing,
    };
    let contact = MockContactFeatureService::new()
        .with_submit(submission, Err(ContactSubmitError::MissingFields));
    let request = Request::post("/api/v1/contact")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(
            "name=John+Doe&email=john%40example.com&phone=0123456789&message=",
        ))
        .unwrap();

    // Act
    let (status, _, body) = send(self::contact(contact), request).await;

    // Assert
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "success": false,
            "error": "All fields are required: name, email, phone, and message",
        })
    );
}

#[tokio::test]
async fn submit_without_json_body() {
    for content_type in [None, Some("text/plain")] {
        // Arrange
        let submission = ContactSubmission {
            name: SubmissionField::Missing,
            email: SubmissionField::Missing,
            phone: SubmissionField::Missing,
            message: SubmissionField::Missing,
        };
        let contact = MockContactFeatureService::new()
            .with_submit(submission, Err(ContactSubmitError::MissingFields));
        let mut request = Request::post("/api/v1/contact");
        if let Some(content_type) = content_type {
            request = request.header(header::CONTENT_TYPE, content_type);
        }
        let request = request.body(Body::from("hello")).unwrap();

        // Act
        let (status, _, body) = send(self::contact(contact), request).await;

        // Assert
        assert_eq!(status, StatusCode::BAD_REQUEST, "{content_type:?}");
        assert_eq!(
            body["error"],
            json!("All fields are required: name, email, phone, and message")
        );
    }
}

#[tokio::test]
async fn list_ok() {
    // Arrange
    let request = PageRequest::parse(Some("2"), Some("3"));
    let page = ContactPage {
        records: vec![ALL_CONTACTS[3].clone()],
        meta: PageMeta::new(request, 4),
    };
    let contact = MockContactFeatureService::new().with_list(
        Some(ADMIN_KEY.into()),
        request,
        Ok(page),
    );

    // Act
    let (status, _, body) = send(
        self::contact(contact),
        list_request(Some(ADMIN_KEY), "?page=2&limit=3"),
    )
    .await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"], json!({"page": 2, "limit": 3, "total": 4, "totalPages": 2}));
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["id"], json!(ALL_CONTACTS[3].id.to_string()));
    assert_eq!(body["data"][0]["createdAt"], json!("2024-01-01T09:00:00Z"));
}

#[tokio::test]
async fn list_lenient_query() {
    // Arrange
    let request = PageRequest::parse(Some(" 3abc"), Some("0"));
    let contact = MockContactFeatureService::new().with_list(
        Some(ADMIN_KEY.into()),
        request,
        Ok(ContactPage {
            records: Vec::new(),
            meta: PageMeta::new(request, 0),
        }),
    );

    // Act
    let (status, _, body) = send(
        self::contact(contact),
        list_request(Some(ADMIN_KEY), "?page=%203abc&limit=0"),
    )
    .await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"], json!({"page": 3, "limit": 1, "total": 0, "totalPages": 0}));
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn list_repeated_query_key() {
    // Arrange
    let request = PageRequest::parse(Some("2"), Some("5"));
    let contact = MockContactFeatureService::new().with_list(
        Some(ADMIN_KEY.into()),
        request,
        Ok(ContactPage {
            records: Vec::new(),
            meta: PageMeta::new(request, 12),
        }),
    );

    // Act
    let (status, _, body) = send(
        self::contact(contact),
        list_request(Some(ADMIN_KEY), "?limit=5&page=2&page=3"),
    )
    .await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"], json!({"page": 2, "limit": 5, "total": 12, "totalPages": 3}));
}

#[tokio::test]
async fn list_auth_errors() {
    for (admin_key, error, expected_status, expected_message) in [
        (
            None,
            AdminAuthError::Missing,
            StatusCode::UNAUTHORIZED,
            "Admin authentication required",
        ),
        (
            Some(""),
            AdminAuthError::Missing,
            StatusCode::UNAUTHORIZED,
            "Admin authentication required",
        ),
        (
            Some("wrong"),
            AdminAuthError::Invalid,
            StatusCode::FORBIDDEN,
            "Invalid admin key",
        ),
    ] {
        // Arrange
        let contact = MockContactFeatureService::new().with_list(
            admin_key.map(Into::into),
            PageRequest::default(),
            Err(ContactListError::Auth(error)),
        );

        // Act
        let (status, _, body) =
            send(self::contact(contact), list_request(admin_key, "")).await;

        // Assert
        assert_eq!(status, expected_status);
        assert_eq!(
            body,
            json!({"status": "error", "message": expected_message})
        );
    }
}

#[tokio::test]
async fn list_store_failure() {
    // Arrange
    let contact = MockContactFeatureService::new().with_list(
        Some(ADMIN_KEY.into()),
        PageRequest::default(),
        Err(ContactListError::Other(anyhow::anyhow!("timeout"))),
    );

    // Act
    let (status, _, body) =
        send(self::contact(contact), list_request(Some(ADMIN_KEY), "")).await;

    // Assert
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"status": "error", "message": "Failed to fetch contacts"})
    );
}

#[tokio::test]
async fn not_found() {
    for (method, uri, route) in [
        (Method::GET, "/api/v1/nope?x=1", "/api/v1/nope?x=1"),
        (Method::GET, "/", "/"),
        (Method::GET, "/api/v2/health", "/api/v2/health"),
        (Method::GET, "/api/v1/contact", "/api/v1/contact"),
        (Method::DELETE, "/api/v1/admin/contacts", "/api/v1/admin/contacts"),
    ] {
        // Arrange
        let sut = sut(
            MockHealthFeatureService::new(),
            MockContactFeatureService::new(),
        );
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        // Act
        let (status, _, body) = send(sut, request).await;

        // Assert
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({"status": "error", "message": format!("Route {route} not found")})
        );
    }
}

#[tokio::test]
async fn cors() {
    for (origin, expected) in [
        ("http://localhost:3000", true),
        ("https://feature-x.vercel.app", true),
        ("https://evil.example", false),
    ] {
        // Arrange
        let sut = contact(MockContactFeatureService::new());
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/v1/contact")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();

        // Act
        let (_, headers, _) = send(sut, request).await;

        // Assert
        let allow_origin = headers
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .map(|x| x.to_str().unwrap());
        assert_eq!(allow_origin, expected.then_some(origin), "{origin}");
        if expected {
            assert_eq!(
                headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
                "true"
            );
        }
    }
}

#[tokio::test]
async fn disallowed_origin_is_rejected() {
    for request in [
        Request::post("/api/v1/contact")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ORIGIN, "https://evil.example")
            .body(Body::from(
                json!({
                    "name": "John Doe",
                    "email": "john@example.com",
                    "phone": "0123456789",
                    "message": "Hello",
                })
                .to_string(),
            ))
            .unwrap(),
        Request::get("/api/v1/admin/contacts")
            .header("x-admin-key", ADMIN_KEY)
            .header(header::ORIGIN, "https://evil.example")
            .body(Body::empty())
            .unwrap(),
    ] {
        // Arrange
        let sut = contact(MockContactFeatureService::new());

        // Act
        let (status, headers, body) = send(sut, request).await;

        // Assert
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(!headers.contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
        assert_eq!(
            body,
            json!({"status": "error", "message": "Not allowed by CORS"})
        );
    }
}

#[tokio::test]
async fn allowed_origin_reaches_handler() {
    // Arrange
    let submission = ContactSubmission {
        name: "John Doe".into(),
        email: "john@example.com".into(),
        phone: "0123456789".into(),
        message: "Hello".into(),
    };
    let contact = MockContactFeatureService::new().with_submit(submission, Ok(ALICE.id));
    let request = Request::post("/api/v1/contact")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::ORIGIN, "https://feature-x.vercel.app")
        .body(Body::from(
            json!({
                "name": "John Doe",
                "email": "john@example.com",
                "phone": "0123456789",
                "message": "Hello",
            })
            .to_string(),
        ))
        .unwrap();

    // Act
    let (status, headers, _) = send(self::contact(contact), request).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://feature-x.vercel.app"
    );
}

fn panicking(environment: &str) -> Router {
    let router = Router::new().route(
        "/boom",
        routing::get(|| async {
            if true {
                panic!("something broke");
            }
        }),
    );
    middlewares::panic_handler::add(Environment::new(environment))(router)
}

#[tokio::test]
async fn panic_details_outside_production() {
    // Act
    let (status, _, body) = send(panicking("development"), get("/boom")).await;

    // Assert
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"status": "error", "message": "something broke"})
    );
}

#[tokio::test]
async fn panic_redacted_in_production() {
    // Act
    let (status, _, body) = send(panicking("production"), get("/boom")).await;

    // Assert
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"status": "error", "message": "Internal server error"})
    );
}

#[tokio::test]
async fn request_id_from_proxy_is_kept() {
    // Arrange
    let sut = sut(
        MockHealthFeatureService::new(),
        MockContactFeatureService::new(),
    );
    let request = Request::get("/api/v1/nope")
        .header("x-request-id", "edge-1234")
        .body(Body::empty())
        .unwrap();

    // Act
    let (status, headers, _) = send(sut, request).await;

    // Assert
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(headers["x-request-id"], "edge-1234");
}
