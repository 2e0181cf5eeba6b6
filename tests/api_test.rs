//! HTTP API integration tests
//!
//! Exercises the thin JSON API end to end against a mock data service.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use helpers::{
    assert_status, body_json, mock_current_user, mock_role, notice_row, TestApp,
};

#[tokio::test]
async fn health_reports_ok() {
    let app = TestApp::spawn().await;

    let response = app.get("/api/health").await;
    assert_status(&response, StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "OK");
}

#[tokio::test]
async fn contact_submission_inserts_one_row() {
    let app = TestApp::spawn().await;
    let id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path("/rest/v1/contact_messages"))
        .and(body_partial_json(json!({
            "name": "A",
            "email": "a@x.com",
            "phone": "1234567890",
            "subject": "S",
            "message": "M",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([{
            "id": id,
            "name": "A",
            "email": "a@x.com",
            "phone": "1234567890",
            "subject": "S",
            "message": "M",
            "created_at": "2025-08-20T10:00:00Z",
        }])))
        .expect(1)
        .mount(&app.server)
        .await;

    let response = app
        .post_json(
            "/api/contact",
            json!({
                "name": "A",
                "email": "a@x.com",
                "phone": "1234567890",
                "subject": "S",
                "message": "M",
            }),
            None,
        )
        .await;

    assert_status(&response, StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Message sent successfully");
}

#[tokio::test]
async fn contact_submission_with_blank_message_never_reaches_the_service() {
    let app = TestApp::spawn().await;

    let response = app
        .post_json(
            "/api/contact",
            json!({
                "name": "A",
                "email": "a@x.com",
                "phone": "1234567890",
                "subject": "S",
                "message": "  ",
            }),
            None,
        )
        .await;

    assert_status(&response, StatusCode::BAD_REQUEST);
    let requests = app.server.received_requests().await.unwrap();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn contact_inbox_lists_newest_first_and_deletes_by_id() {
    let app = TestApp::spawn().await;
    let id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/contact_messages"))
        .and(query_param("order", "created_at.desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": id,
            "name": "A",
            "email": "a@x.com",
            "phone": "1234567890",
            "subject": "S",
            "message": "M",
            "created_at": "2025-08-20T10:00:00Z",
        }])))
        .expect(1)
        .mount(&app.server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/contact_messages"))
        .and(query_param("id", format!("eq.{}", id)))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&app.server)
        .await;

    let messages = app.services.contacts_service.list().await.unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].id, id);

    app.services.contacts_service.delete(id).await.unwrap();
}

#[tokio::test]
async fn notices_list_is_public_and_ordered_by_notice_date() {
    let app = TestApp::spawn().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/notices"))
        .and(query_param("order", "notice_date.desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            notice_row(Uuid::new_v4(), "Newest", "2025-12-05"),
            notice_row(Uuid::new_v4(), "Oldest", "2025-01-02"),
        ])))
        .expect(1)
        .mount(&app.server)
        .await;

    let response = app.get("/api/notices").await;
    assert_status(&response, StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"][0]["title"], "Newest");
    assert_eq!(body["data"][1]["title"], "Oldest");
}

#[tokio::test]
async fn notice_creation_without_token_is_forbidden() {
    let app = TestApp::spawn().await;

    let response = app
        .post_json(
            "/api/notices",
            json!({
                "title": "T",
                "description": "D",
                "type": "event",
                "notice_date": "2025-06-01",
            }),
            None,
        )
        .await;

    assert_status(&response, StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Admin access required");
}

#[tokio::test]
async fn notice_creation_with_non_admin_token_is_forbidden() {
    let app = TestApp::spawn().await;
    let user_id = Uuid::new_v4();

    mock_current_user(&app.server, "user-token", user_id).await;
    mock_role(&app.server, user_id, None).await;

    let response = app
        .post_json(
            "/api/notices",
            json!({
                "title": "T",
                "description": "D",
                "type": "event",
                "notice_date": "2025-06-01",
            }),
            Some("user-token"),
        )
        .await;

    assert_status(&response, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn notice_creation_with_wrong_role_is_forbidden() {
    let app = TestApp::spawn().await;
    let user_id = Uuid::new_v4();

    mock_current_user(&app.server, "editor-token", user_id).await;
    mock_role(&app.server, user_id, Some("editor")).await;

    let response = app
        .post_json(
            "/api/notices",
            json!({
                "title": "T",
                "description": "D",
                "type": "event",
                "notice_date": "2025-06-01",
            }),
            Some("editor-token"),
        )
        .await;

    assert_status(&response, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn notice_creation_with_missing_fields_is_a_bad_request() {
    let app = TestApp::spawn().await;
    let user_id = Uuid::new_v4();

    mock_current_user(&app.server, "admin-token", user_id).await;
    mock_role(&app.server, user_id, Some("admin")).await;

    let response = app
        .post_json("/api/notices", json!({ "title": "T" }), Some("admin-token"))
        .await;

    assert_status(&response, StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Missing required fields");
}

#[tokio::test]
async fn notice_creation_with_unknown_type_stays_in_the_json_envelope() {
    let app = TestApp::spawn().await;
    let user_id = Uuid::new_v4();

    mock_current_user(&app.server, "admin-token", user_id).await;
    mock_role(&app.server, user_id, Some("admin")).await;

    let response = app
        .post_json(
            "/api/notices",
            json!({
                "title": "T",
                "description": "D",
                "type": "party",
                "notice_date": "2025-06-01",
            }),
            Some("admin-token"),
        )
        .await;

    assert_status(&response, StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid notice type: party");
}

#[tokio::test]
async fn notice_creation_records_the_admin_as_creator() {
    let app = TestApp::spawn().await;
    let user_id = Uuid::new_v4();

    mock_current_user(&app.server, "admin-token", user_id).await;
    mock_role(&app.server, user_id, Some("admin")).await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/notices"))
        .and(body_partial_json(json!({
            "title": "Sports Day",
            "type": "event",
            "created_by": user_id,
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!([notice_row(Uuid::new_v4(), "Sports Day", "2025-12-05")])),
        )
        .expect(1)
        .mount(&app.server)
        .await;

    let response = app
        .post_json(
            "/api/notices",
            json!({
                "title": "Sports Day",
                "description": "Annual sports day",
                "type": "event",
                "notice_date": "2025-12-05",
            }),
            Some("admin-token"),
        )
        .await;

    assert_status(&response, StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn notice_edit_patches_only_the_given_fields() {
    let app = TestApp::spawn().await;
    let user_id = Uuid::new_v4();
    let id = Uuid::new_v4();

    mock_current_user(&app.server, "admin-token", user_id).await;
    mock_role(&app.server, user_id, Some("admin")).await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/notices"))
        .and(query_param("id", format!("eq.{}", id)))
        .and(body_partial_json(json!({ "title": "Rescheduled" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([notice_row(id, "Rescheduled", "2025-12-05")])),
        )
        .expect(1)
        .mount(&app.server)
        .await;

    let request = mia_backoffice::models::UpdateNoticeRequest {
        title: Some("Rescheduled".to_string()),
        ..Default::default()
    };
    let notice = app
        .services
        .notices_service
        .update(Some("admin-token"), id, request)
        .await
        .unwrap();

    assert_eq!(notice.title, "Rescheduled");

    // The patch body carries only the changed field.
    let requests = app.server.received_requests().await.unwrap();
    let patch = requests
        .iter()
        .find(|r| r.url.path() == "/rest/v1/notices")
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&patch.body).unwrap();
    assert!(body.get("description").is_none());
    assert!(body.get("notice_date").is_none());
}

#[tokio::test]
async fn notice_edit_with_no_fields_is_rejected() {
    let app = TestApp::spawn().await;
    let user_id = Uuid::new_v4();

    mock_current_user(&app.server, "admin-token", user_id).await;
    mock_role(&app.server, user_id, Some("admin")).await;

    let result = app
        .services
        .notices_service
        .update(
            Some("admin-token"),
            Uuid::new_v4(),
            mia_backoffice::models::UpdateNoticeRequest::default(),
        )
        .await;

    assert!(matches!(
        result,
        Err(mia_backoffice::BackofficeError::InvalidInput(_))
    ));
}

#[tokio::test]
async fn notice_deletion_requires_admin() {
    let app = TestApp::spawn().await;
    let id = Uuid::new_v4();

    let response = app.delete(&format!("/api/notices/{}", id), None).await;
    assert_status(&response, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn notice_deletion_removes_the_row() {
    let app = TestApp::spawn().await;
    let user_id = Uuid::new_v4();
    let id = Uuid::new_v4();

    mock_current_user(&app.server, "admin-token", user_id).await;
    mock_role(&app.server, user_id, Some("admin")).await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/notices"))
        .and(query_param("id", format!("eq.{}", id)))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&app.server)
        .await;

    let response = app
        .delete(&format!("/api/notices/{}", id), Some("admin-token"))
        .await;

    assert_status(&response, StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
}
