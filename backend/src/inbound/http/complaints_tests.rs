//! Tests for the complaint handlers.

use super::*;
use crate::domain::ports::{
    AccessTokenError, MockAccessTokens, MockComplaintCommand, MockComplaintQuery,
    MockLoginService, MockRegistrationService,
};
use crate::domain::{
    AuthenticatedUser, Category, ComplaintDraft, ComplaintStatus, EmailAddress, Error, Rating,
    Role, UserId, UserName,
};
use crate::inbound::http::error::json_error_handler;
use crate::test_support::fixture_timestamp;
use actix_web::http::{StatusCode, header};
use actix_web::{App, test as actix_test};
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use std::sync::Arc;

const ADMIN_TOKEN: &str = "admin.token";
const USER_TOKEN: &str = "user.token";

struct Callers {
    admin: AuthenticatedUser,
    user: AuthenticatedUser,
}

#[fixture]
fn callers() -> Callers {
    Callers {
        admin: AuthenticatedUser::new(UserId::random(), Role::Admin),
        user: AuthenticatedUser::new(UserId::random(), Role::User),
    }
}

fn tokens_for(callers: &Callers) -> MockAccessTokens {
    let admin = callers.admin;
    let user = callers.user;
    let mut tokens = MockAccessTokens::new();
    tokens.expect_verify().returning(move |token| match token {
        ADMIN_TOKEN => Ok(admin),
        USER_TOKEN => Ok(user),
        _ => Err(AccessTokenError::malformed()),
    });
    tokens
}

fn pothole(owner: UserId) -> Complaint {
    Complaint::new(ComplaintDraft {
        id: ComplaintId::random(),
        owner,
        title: "Pothole".to_owned(),
        description: "Deep pothole outside number 12".to_owned(),
        category: Category::Infrastructure,
        created_at: fixture_timestamp(),
    })
    .expect("valid complaint")
}

fn test_app(
    tokens: MockAccessTokens,
    complaints: MockComplaintCommand,
    queries: MockComplaintQuery,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = HttpState {
        complaints: Arc::new(complaints),
        complaint_queries: Arc::new(queries),
        login: Arc::new(MockLoginService::new()),
        registration: Arc::new(MockRegistrationService::new()),
        tokens: Arc::new(tokens),
    };
    App::new()
        .app_data(web::Data::new(state))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(
            web::scope("/api")
                .service(list_all_complaints)
                .service(list_my_complaints)
                .service(create_complaint)
                .service(update_complaint_status)
                .service(submit_feedback),
        )
}

fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

#[rstest]
#[actix_web::test]
async fn create_returns_created_pending_complaint(callers: Callers) {
    let owner = callers.user.id();
    let mut complaints = MockComplaintCommand::new();
    complaints
        .expect_create()
        .withf(move |request| {
            request.caller.id() == owner
                && request.title == "Pothole"
                && request.category == Category::Infrastructure
        })
        .times(1)
        .returning(move |_| Ok(pothole(owner)));
    let app = actix_test::init_service(test_app(
        tokens_for(&callers),
        complaints,
        MockComplaintQuery::new(),
    ))
    .await;

    let request = actix_test::TestRequest::post()
        .uri("/api/complaints")
        .insert_header(bearer(USER_TOKEN))
        .set_json(json!({
            "title": "Pothole",
            "description": "Deep pothole outside number 12",
            "category": "Infrastructure"
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["status"], "Pending");
    assert_eq!(body["category"], "Infrastructure");
    assert_eq!(body["user"], owner.to_string());
    assert_eq!(body["createdAt"], "2025-01-01T09:00:00.000Z");
    assert!(body.get("feedback").is_none());
}

#[rstest]
#[case::unknown_category(
    json!({"title": "Pothole", "description": "Deep", "category": "Roads"}),
    "category",
    "invalid_category"
)]
#[case::missing_title(
    json!({"description": "Deep", "category": "Other"}),
    "title",
    "missing_field"
)]
#[case::missing_category(
    json!({"title": "Pothole", "description": "Deep"}),
    "category",
    "missing_field"
)]
#[actix_web::test]
async fn create_rejects_invalid_bodies_before_calling_the_service(
    callers: Callers,
    #[case] payload: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let app = actix_test::init_service(test_app(
        tokens_for(&callers),
        MockComplaintCommand::new(),
        MockComplaintQuery::new(),
    ))
    .await;

    let request = actix_test::TestRequest::post()
        .uri("/api/complaints")
        .insert_header(bearer(USER_TOKEN))
        .set_json(payload)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["field"], field);
    assert_eq!(body["details"]["code"], code);
}

#[rstest]
#[case::list_mine("GET", "/api/complaints")]
#[case::list_all("GET", "/api/complaints/all")]
#[case::create("POST", "/api/complaints")]
#[actix_web::test]
async fn requests_without_a_token_are_unauthorized(
    callers: Callers,
    #[case] method: &str,
    #[case] uri: &str,
) {
    let app = actix_test::init_service(test_app(
        tokens_for(&callers),
        MockComplaintCommand::new(),
        MockComplaintQuery::new(),
    ))
    .await;

    let request = match method {
        "POST" => actix_test::TestRequest::post().set_json(json!({})),
        _ => actix_test::TestRequest::get(),
    }
    .uri(uri)
    .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response
            .headers()
            .get(header::WWW_AUTHENTICATE)
            .and_then(|value| value.to_str().ok()),
        Some("Bearer")
    );
}

#[rstest]
#[actix_web::test]
async fn list_mine_passes_the_caller_through(callers: Callers) {
    let owner = callers.user.id();
    let mut queries = MockComplaintQuery::new();
    queries
        .expect_list_mine()
        .withf(move |caller| caller.id() == owner)
        .times(1)
        .returning(move |_| Ok(vec![pothole(owner)]));
    let app = actix_test::init_service(test_app(
        tokens_for(&callers),
        MockComplaintCommand::new(),
        queries,
    ))
    .await;

    let request = actix_test::TestRequest::get()
        .uri("/api/complaints")
        .insert_header(bearer(USER_TOKEN))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    let listed = body.as_array().expect("array body");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["user"], owner.to_string());
}

#[rstest]
#[actix_web::test]
async fn list_all_embeds_owner_details_or_null(callers: Callers) {
    let owner = callers.user.id();
    let mut queries = MockComplaintQuery::new();
    queries.expect_list_all().times(1).returning(move |_| {
        Ok(vec![
            AdminComplaintView {
                complaint: pothole(owner),
                owner: Some(UserSummary {
                    id: owner,
                    name: UserName::new("Ada").expect("valid name"),
                    email: EmailAddress::new("ada@example.org").expect("valid email"),
                }),
            },
            AdminComplaintView {
                complaint: pothole(UserId::random()),
                owner: None,
            },
        ])
    });
    let app = actix_test::init_service(test_app(
        tokens_for(&callers),
        MockComplaintCommand::new(),
        queries,
    ))
    .await;

    let request = actix_test::TestRequest::get()
        .uri("/api/complaints/all")
        .insert_header(bearer(ADMIN_TOKEN))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body[0]["user"],
        json!({"id": owner.to_string(), "name": "Ada", "email": "ada@example.org"})
    );
    assert_eq!(body[1]["user"], Value::Null);
}

#[rstest]
#[actix_web::test]
async fn list_all_surfaces_forbidden_for_standard_users(callers: Callers) {
    let mut queries = MockComplaintQuery::new();
    queries
        .expect_list_all()
        .returning(|_| Err(Error::forbidden("admin role required")));
    let app = actix_test::init_service(test_app(
        tokens_for(&callers),
        MockComplaintCommand::new(),
        queries,
    ))
    .await;

    let request = actix_test::TestRequest::get()
        .uri("/api/complaints/all")
        .insert_header(bearer(USER_TOKEN))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "forbidden");
}

#[rstest]
#[actix_web::test]
async fn update_status_forwards_the_status_label(callers: Callers) {
    let owner = callers.user.id();
    let mut complaint = pothole(owner);
    let complaint_id = complaint.id();
    complaint.set_status(ComplaintStatus::InProgress, fixture_timestamp());
    let mut complaints = MockComplaintCommand::new();
    complaints
        .expect_update_status()
        .withf(move |request| {
            request.complaint_id == complaint_id
                && request.status.as_deref() == Some("In Progress")
        })
        .times(1)
        .return_once(move |_| Ok(complaint));
    let app = actix_test::init_service(test_app(
        tokens_for(&callers),
        complaints,
        MockComplaintQuery::new(),
    ))
    .await;

    let request = actix_test::TestRequest::patch()
        .uri(&format!("/api/complaints/{complaint_id}/status"))
        .insert_header(bearer(ADMIN_TOKEN))
        .set_json(json!({"status": "In Progress"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["status"], "In Progress");
}

#[rstest]
#[actix_web::test]
async fn update_status_rejects_malformed_ids(callers: Callers) {
    let mut complaints = MockComplaintCommand::new();
    complaints.expect_update_status().times(0);
    let app = actix_test::init_service(test_app(
        tokens_for(&callers),
        complaints,
        MockComplaintQuery::new(),
    ))
    .await;

    let request = actix_test::TestRequest::patch()
        .uri("/api/complaints/not-a-uuid/status")
        .insert_header(bearer(ADMIN_TOKEN))
        .set_json(json!({"status": "Resolved"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["field"], "id");
    assert_eq!(body["details"]["code"], "invalid_uuid");
}

#[rstest]
#[actix_web::test]
async fn update_status_leaves_status_validation_to_the_service(callers: Callers) {
    let mut complaints = MockComplaintCommand::new();
    complaints
        .expect_update_status()
        .withf(|request| request.status.as_deref() == Some("Closed"))
        .times(1)
        .returning(|_| Err(Error::forbidden("only administrators can update complaint status")));
    let app = actix_test::init_service(test_app(
        tokens_for(&callers),
        complaints,
        MockComplaintQuery::new(),
    ))
    .await;

    let request = actix_test::TestRequest::patch()
        .uri("/api/complaints/00000000-0000-0000-0000-000000000001/status")
        .insert_header(bearer(USER_TOKEN))
        .set_json(json!({"status": "Closed"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[rstest]
#[actix_web::test]
async fn update_status_surfaces_not_found(callers: Callers) {
    let mut complaints = MockComplaintCommand::new();
    complaints
        .expect_update_status()
        .returning(|request| {
            Err(Error::not_found(format!(
                "complaint {} not found",
                request.complaint_id
            )))
        });
    let app = actix_test::init_service(test_app(
        tokens_for(&callers),
        complaints,
        MockComplaintQuery::new(),
    ))
    .await;

    let request = actix_test::TestRequest::patch()
        .uri("/api/complaints/00000000-0000-0000-0000-000000000009/status")
        .insert_header(bearer(ADMIN_TOKEN))
        .set_json(json!({"status": "Resolved"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "not_found");
}

#[rstest]
#[actix_web::test]
async fn feedback_is_returned_with_the_complaint(callers: Callers) {
    let owner = callers.user.id();
    let mut complaint = pothole(owner);
    let complaint_id = complaint.id();
    complaint.set_status(ComplaintStatus::Resolved, fixture_timestamp());
    complaint
        .record_feedback(
            Feedback::new(
                Rating::new(5).expect("valid rating"),
                "Fixed fast",
                fixture_timestamp(),
            )
            .expect("valid feedback"),
        )
        .expect("resolved complaint accepts feedback");
    let mut complaints = MockComplaintCommand::new();
    complaints
        .expect_submit_feedback()
        .withf(move |request| {
            request.caller.id() == owner
                && request.rating == Some(5)
                && request.comment.as_deref() == Some("Fixed fast")
        })
        .times(1)
        .return_once(move |_| Ok(complaint));
    let app = actix_test::init_service(test_app(
        tokens_for(&callers),
        complaints,
        MockComplaintQuery::new(),
    ))
    .await;

    let request = actix_test::TestRequest::post()
        .uri(&format!("/api/complaints/{complaint_id}/feedback"))
        .insert_header(bearer(USER_TOKEN))
        .set_json(json!({"rating": 5, "comment": "Fixed fast"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body["feedback"],
        json!({
            "rating": 5,
            "comment": "Fixed fast",
            "createdAt": "2025-01-01T09:00:00.000Z"
        })
    );
}

#[rstest]
#[actix_web::test]
async fn feedback_with_an_empty_body_still_reaches_the_service(callers: Callers) {
    let mut complaints = MockComplaintCommand::new();
    complaints
        .expect_submit_feedback()
        .withf(|request| request.rating.is_none() && request.comment.is_none())
        .times(1)
        .returning(|request| {
            Err(Error::not_found(format!(
                "complaint {} not found",
                request.complaint_id
            )))
        });
    let app = actix_test::init_service(test_app(
        tokens_for(&callers),
        complaints,
        MockComplaintQuery::new(),
    ))
    .await;

    let request = actix_test::TestRequest::post()
        .uri("/api/complaints/00000000-0000-0000-0000-000000000009/feedback")
        .insert_header(bearer(USER_TOKEN))
        .set_json(json!({}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn feedback_with_a_non_numeric_rating_is_bad_json(callers: Callers) {
    let app = actix_test::init_service(test_app(
        tokens_for(&callers),
        MockComplaintCommand::new(),
        MockComplaintQuery::new(),
    ))
    .await;

    let request = actix_test::TestRequest::post()
        .uri("/api/complaints/00000000-0000-0000-0000-000000000001/feedback")
        .insert_header(bearer(USER_TOKEN))
        .set_json(json!({"rating": "five", "comment": "Fixed"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["code"], "invalid_json");
}
