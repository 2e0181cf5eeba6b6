//! Shared test infrastructure
//!
//! Spins up a mock data service and wires the application against it, so
//! tests exercise the real services and HTTP handlers end to end.

use std::sync::Once;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use mia_backoffice::config::Settings;
use mia_backoffice::handlers::{build_router, AppState};
use mia_backoffice::services::ServiceFactory;

static INIT: Once = Once::new();

/// Initialize test environment
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt::try_init();
    });
}

/// A running mock data service plus the app wired against it
pub struct TestApp {
    pub server: MockServer,
    pub services: ServiceFactory,
    pub router: Router,
    pub settings: Settings,
}

impl TestApp {
    pub async fn spawn() -> Self {
        init_test_env();

        let server = MockServer::start().await;
        let settings = test_settings(&server.uri());
        let services = ServiceFactory::new(settings.clone()).expect("service factory");
        let router = build_router(AppState::new(services.clone()));

        Self {
            server,
            services,
            router,
            settings,
        }
    }

    /// Issue a request against the in-process router
    pub async fn request(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router response")
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.request(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_json(&self, uri: &str, body: Value, bearer: Option<&str>) -> Response<Body> {
        let mut builder = Request::post(uri).header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.request(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    pub async fn delete(&self, uri: &str, bearer: Option<&str>) -> Response<Body> {
        let mut builder = Request::delete(uri);
        if let Some(token) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.request(builder.body(Body::empty()).unwrap()).await
    }
}

/// Settings pointed at the mock data service
pub fn test_settings(data_service_url: &str) -> Settings {
    let mut settings = Settings::default();
    settings.data_service.url = data_service_url.to_string();
    settings.data_service.public_key = "test-anon-key".to_string();
    settings.data_service.secret_key = "test-secret-key".to_string();
    settings.data_service.timeout_seconds = 5;
    settings
}

/// Read a JSON response body
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}

pub fn assert_status(response: &Response<Body>, expected: StatusCode) {
    assert_eq!(response.status(), expected);
}

/// Mock: the auth service recognizes `token` as `user_id`
pub async fn mock_current_user(server: &MockServer, token: &str, user_id: Uuid) {
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .and(wiremock::matchers::header(
            "Authorization",
            format!("Bearer {}", token).as_str(),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": user_id,
            "email": "admin@mia.edu",
        })))
        .mount(server)
        .await;
}

/// Mock: the roles table holds `role` for `user_id` (or no row at all)
pub async fn mock_role(server: &MockServer, user_id: Uuid, role: Option<&str>) {
    let rows = match role {
        Some(role) => json!([{ "user_id": user_id, "role": role }]),
        None => json!([]),
    };

    Mock::given(method("GET"))
        .and(path("/rest/v1/user_roles"))
        .and(query_param("user_id", format!("eq.{}", user_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(rows))
        .mount(server)
        .await;
}

/// Mock: password sign-in succeeds with the given session
pub async fn mock_sign_in(server: &MockServer, user_id: Uuid, access: &str, refresh: &str) {
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": access,
            "refresh_token": refresh,
            "expires_in": 3600,
            "user": { "id": user_id, "email": "admin@mia.edu" },
        })))
        .mount(server)
        .await;
}

/// A complete stored admission row as the data service would return it
pub fn admission_row(id: Uuid, status: &str, photo_url: Option<&str>) -> Value {
    json!({
        "id": id,
        "branch": "Mothers International Academy",
        "session": "2025-2026",
        "class": "Nursery",
        "student_name": "Asha Rao",
        "dob": "2020-04-12",
        "gender": "Female",
        "caste": null,
        "religion": null,
        "father_name": "R Rao",
        "father_qualification": null,
        "father_occupation": null,
        "father_occupation_details": null,
        "father_income": 42000.5,
        "mother_name": "S Rao",
        "mother_qualification": null,
        "mother_occupation": null,
        "mother_occupation_details": null,
        "mother_income": null,
        "mobile_number": "9876543210",
        "contact_number": null,
        "email": null,
        "present_address": "12 Lake Road",
        "permanent_address": "12 Lake Road",
        "siblings": null,
        "guardian": null,
        "photo_url": photo_url,
        "status": status,
        "created_at": "2025-08-20T10:00:00Z",
        "updated_at": "2025-08-20T10:00:00Z",
    })
}

/// A stored notice row as the data service would return it
pub fn notice_row(id: Uuid, title: &str, notice_date: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": "details",
        "type": "event",
        "notice_date": notice_date,
        "created_by": Uuid::new_v4(),
        "created_at": "2025-08-20T10:00:00Z",
    })
}
