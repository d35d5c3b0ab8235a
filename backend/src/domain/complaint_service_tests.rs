//! Tests for the complaint service.

use std::sync::Arc;

use mockall::predicate::eq;
use rstest::{fixture, rstest};
use serde_json::json;

use super::*;
use crate::domain::ports::{MockComplaintRepository, MockUserRepository};
use crate::domain::{
    Category, ComplaintStatus, EmailAddress, ErrorCode, Role, UserName, UserSummary,
};
use crate::test_support::{MutableClock, fixture_timestamp};

fn citizen() -> AuthenticatedUser {
    AuthenticatedUser::new(UserId::random(), Role::User)
}

fn admin() -> AuthenticatedUser {
    AuthenticatedUser::new(UserId::random(), Role::Admin)
}

fn complaint_for(owner: UserId, status: ComplaintStatus) -> Complaint {
    let mut complaint = Complaint::new(ComplaintDraft {
        id: ComplaintId::random(),
        owner,
        title: "Broken streetlight".to_owned(),
        description: "Dark corner on Elm Road".to_owned(),
        category: Category::Infrastructure,
        created_at: fixture_timestamp(),
    })
    .expect("valid complaint");
    complaint.set_status(status, fixture_timestamp());
    complaint
}

fn summary(id: UserId, name: &str) -> UserSummary {
    UserSummary {
        id,
        name: UserName::new(name).expect("valid name"),
        email: EmailAddress::new(format!("{}@example.org", name.to_lowercase()))
            .expect("valid email"),
    }
}

#[fixture]
fn clock() -> Arc<MutableClock> {
    Arc::new(MutableClock::at_fixture_time())
}

fn service(
    complaints: MockComplaintRepository,
    users: MockUserRepository,
    clock: Arc<MutableClock>,
) -> ComplaintService<MockComplaintRepository, MockUserRepository> {
    ComplaintService::new(Arc::new(complaints), Arc::new(users), clock)
}

#[rstest]
#[tokio::test]
async fn create_files_pending_complaint_for_caller(clock: Arc<MutableClock>) {
    let caller = citizen();
    let mut complaints = MockComplaintRepository::new();
    complaints.expect_insert().times(1).returning(|_| Ok(()));

    let created = service(complaints, MockUserRepository::new(), clock)
        .create(CreateComplaintRequest {
            caller,
            title: "  Pothole ".to_owned(),
            description: "Deep pothole".to_owned(),
            category: Category::Infrastructure,
        })
        .await
        .expect("complaint created");

    assert_eq!(created.owner(), caller.id());
    assert_eq!(created.title(), "Pothole");
    assert_eq!(created.status(), ComplaintStatus::Pending);
    assert_eq!(created.created_at(), fixture_timestamp());
    assert_eq!(created.updated_at(), fixture_timestamp());
}

#[rstest]
#[tokio::test]
async fn create_rejects_blank_title_without_touching_storage(clock: Arc<MutableClock>) {
    let mut complaints = MockComplaintRepository::new();
    complaints.expect_insert().times(0);

    let error = service(complaints, MockUserRepository::new(), clock)
        .create(CreateComplaintRequest {
            caller: citizen(),
            title: "   ".to_owned(),
            description: "Deep pothole".to_owned(),
            category: Category::Other,
        })
        .await
        .expect_err("blank title rejected");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        error.details(),
        Some(&json!({"field": "title", "code": "required"}))
    );
}

#[rstest]
#[tokio::test]
async fn create_maps_connection_error_to_service_unavailable(clock: Arc<MutableClock>) {
    let mut complaints = MockComplaintRepository::new();
    complaints
        .expect_insert()
        .times(1)
        .return_once(|_| Err(ComplaintRepositoryError::connection("pool exhausted")));

    let error = service(complaints, MockUserRepository::new(), clock)
        .create(CreateComplaintRequest {
            caller: citizen(),
            title: "Noise".to_owned(),
            description: "Late night drilling".to_owned(),
            category: Category::Environmental,
        })
        .await
        .expect_err("connection failure");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn update_status_checks_existence_before_role(clock: Arc<MutableClock>) {
    let mut complaints = MockComplaintRepository::new();
    complaints
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(None));
    complaints.expect_update().times(0);

    let error = service(complaints, MockUserRepository::new(), clock)
        .update_status(UpdateComplaintStatusRequest {
            caller: citizen(),
            complaint_id: ComplaintId::random(),
            status: Some("Closed".to_owned()),
        })
        .await
        .expect_err("missing complaint");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn update_status_forbids_non_admin(clock: Arc<MutableClock>) {
    let owner = citizen();
    let existing = complaint_for(owner.id(), ComplaintStatus::Pending);
    let mut complaints = MockComplaintRepository::new();
    complaints
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(existing)));
    complaints.expect_update().times(0);

    let error = service(complaints, MockUserRepository::new(), clock)
        .update_status(UpdateComplaintStatusRequest {
            caller: owner,
            complaint_id: ComplaintId::random(),
            status: Some("Closed".to_owned()),
        })
        .await
        .expect_err("owner is not admin");

    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[rstest]
#[case::unknown(
    Some("Closed"),
    json!({"field": "status", "value": "Closed", "code": "invalid_status"})
)]
#[case::wrong_case(
    Some("resolved"),
    json!({"field": "status", "value": "resolved", "code": "invalid_status"})
)]
#[case::missing(None, json!({"field": "status", "code": "missing_field"}))]
#[tokio::test]
async fn update_status_validates_the_status_after_the_role_check(
    clock: Arc<MutableClock>,
    #[case] status: Option<&str>,
    #[case] details: serde_json::Value,
) {
    let existing = complaint_for(UserId::random(), ComplaintStatus::Pending);
    let mut complaints = MockComplaintRepository::new();
    complaints
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(existing)));
    complaints.expect_update().times(0);

    let error = service(complaints, MockUserRepository::new(), clock)
        .update_status(UpdateComplaintStatusRequest {
            caller: admin(),
            complaint_id: ComplaintId::random(),
            status: status.map(str::to_owned),
        })
        .await
        .expect_err("status rejected");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.details(), Some(&details));
}

#[rstest]
#[case(ComplaintStatus::Resolved, ComplaintStatus::Pending)]
#[case(ComplaintStatus::Rejected, ComplaintStatus::InProgress)]
#[case(ComplaintStatus::Pending, ComplaintStatus::Resolved)]
#[tokio::test]
async fn update_status_allows_any_transition_and_bumps_updated_at(
    clock: Arc<MutableClock>,
    #[case] from: ComplaintStatus,
    #[case] to: ComplaintStatus,
) {
    let existing = complaint_for(UserId::random(), from);
    let id = existing.id();
    let mut complaints = MockComplaintRepository::new();
    complaints
        .expect_find_by_id()
        .with(eq(id))
        .times(1)
        .return_once(move |_| Ok(Some(existing)));
    complaints
        .expect_update()
        .withf(move |stored| stored.id() == id && stored.status() == to)
        .times(1)
        .returning(|_| Ok(()));
    clock.advance_minutes(30);

    let updated = service(complaints, MockUserRepository::new(), clock.clone())
        .update_status(UpdateComplaintStatusRequest {
            caller: admin(),
            complaint_id: id,
            status: Some(to.as_str().to_owned()),
        })
        .await
        .expect("admin updates status");

    assert_eq!(updated.status(), to);
    assert_eq!(updated.updated_at(), clock.utc());
    assert_eq!(updated.created_at(), fixture_timestamp());
}

#[rstest]
#[tokio::test]
async fn submit_feedback_forbids_non_owner(clock: Arc<MutableClock>) {
    let existing = complaint_for(UserId::random(), ComplaintStatus::Resolved);
    let mut complaints = MockComplaintRepository::new();
    complaints
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(existing)));
    complaints.expect_update().times(0);

    let error = service(complaints, MockUserRepository::new(), clock)
        .submit_feedback(SubmitFeedbackRequest {
            caller: admin(),
            complaint_id: ComplaintId::random(),
            rating: Some(5),
            comment: None,
        })
        .await
        .expect_err("not the owner");

    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[rstest]
#[case(ComplaintStatus::Pending)]
#[case(ComplaintStatus::InProgress)]
#[case(ComplaintStatus::Rejected)]
#[tokio::test]
async fn submit_feedback_requires_resolved_status(
    clock: Arc<MutableClock>,
    #[case] status: ComplaintStatus,
) {
    let owner = citizen();
    let existing = complaint_for(owner.id(), status);
    let mut complaints = MockComplaintRepository::new();
    complaints
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(existing)));
    complaints.expect_update().times(0);

    let error = service(complaints, MockUserRepository::new(), clock)
        .submit_feedback(SubmitFeedbackRequest {
            caller: owner,
            complaint_id: ComplaintId::random(),
            // Out-of-range on purpose: the status check comes first.
            rating: Some(9),
            comment: None,
        })
        .await
        .expect_err("complaint not resolved");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        error.details(),
        Some(&json!({"field": "status", "code": "not_resolved"}))
    );
}

#[rstest]
#[case(Some(0), Some("ok"), "rating", "rating_out_of_range")]
#[case(Some(6), Some("ok"), "rating", "rating_out_of_range")]
#[case(Some(4), Some("   "), "comment", "required")]
#[case(None, Some("ok"), "rating", "missing_field")]
#[case(Some(4), None, "comment", "missing_field")]
#[tokio::test]
async fn submit_feedback_validates_rating_and_comment(
    clock: Arc<MutableClock>,
    #[case] rating: Option<i64>,
    #[case] comment: Option<&str>,
    #[case] field: &str,
    #[case] code: &str,
) {
    let owner = citizen();
    let existing = complaint_for(owner.id(), ComplaintStatus::Resolved);
    let mut complaints = MockComplaintRepository::new();
    complaints
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(existing)));
    complaints.expect_update().times(0);

    let error = service(complaints, MockUserRepository::new(), clock)
        .submit_feedback(SubmitFeedbackRequest {
            caller: owner,
            complaint_id: ComplaintId::random(),
            rating,
            comment: comment.map(str::to_owned),
        })
        .await
        .expect_err("invalid feedback");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        error.details().and_then(|d| d.get("field")),
        Some(&json!(field))
    );
    assert_eq!(
        error.details().and_then(|d| d.get("code")),
        Some(&json!(code))
    );
}

#[rstest]
#[tokio::test]
async fn submit_feedback_records_feedback_without_touching_updated_at(
    clock: Arc<MutableClock>,
) {
    let owner = citizen();
    let existing = complaint_for(owner.id(), ComplaintStatus::Resolved);
    let mut complaints = MockComplaintRepository::new();
    complaints
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(existing)));
    complaints
        .expect_update()
        .withf(|stored| stored.feedback().is_some())
        .times(1)
        .returning(|_| Ok(()));
    clock.advance_minutes(90);

    let updated = service(complaints, MockUserRepository::new(), clock.clone())
        .submit_feedback(SubmitFeedbackRequest {
            caller: owner,
            complaint_id: ComplaintId::random(),
            rating: Some(5),
            comment: Some(" Fixed fast ".to_owned()),
        })
        .await
        .expect("feedback recorded");

    let feedback = updated.feedback().expect("feedback attached");
    assert_eq!(feedback.rating().get(), 5);
    assert_eq!(feedback.comment(), "Fixed fast");
    assert_eq!(feedback.created_at(), clock.utc());
    assert_eq!(updated.updated_at(), fixture_timestamp());
}

#[rstest]
#[tokio::test]
async fn list_all_forbids_non_admin(clock: Arc<MutableClock>) {
    let mut complaints = MockComplaintRepository::new();
    complaints.expect_list_all().times(0);

    let error = service(complaints, MockUserRepository::new(), clock)
        .list_all(citizen())
        .await
        .expect_err("citizen cannot list all");

    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn list_all_populates_owners_and_tolerates_missing_accounts(clock: Arc<MutableClock>) {
    let known = UserId::random();
    let missing = UserId::random();
    let listed = vec![
        complaint_for(known, ComplaintStatus::Pending),
        complaint_for(missing, ComplaintStatus::Resolved),
        complaint_for(known, ComplaintStatus::Rejected),
    ];
    let mut complaints = MockComplaintRepository::new();
    complaints
        .expect_list_all()
        .times(1)
        .return_once(move || Ok(listed));
    let mut users = MockUserRepository::new();
    users
        .expect_find_summaries()
        .withf(move |ids| ids.len() == 2 && ids.contains(&known) && ids.contains(&missing))
        .times(1)
        .return_once(move |_| Ok(vec![summary(known, "Ada")]));

    let views = service(complaints, users, clock)
        .list_all(admin())
        .await
        .expect("admin lists complaints");

    assert_eq!(views.len(), 3);
    let owner_names: Vec<Option<&str>> = views
        .iter()
        .map(|view| view.owner.as_ref().map(|owner| owner.name.as_ref()))
        .collect();
    assert_eq!(owner_names, vec![Some("Ada"), None, Some("Ada")]);
}

#[rstest]
#[tokio::test]
async fn list_all_skips_user_lookup_when_empty(clock: Arc<MutableClock>) {
    let mut complaints = MockComplaintRepository::new();
    complaints
        .expect_list_all()
        .times(1)
        .return_once(|| Ok(Vec::new()));
    let mut users = MockUserRepository::new();
    users.expect_find_summaries().times(0);

    let views = service(complaints, users, clock)
        .list_all(admin())
        .await
        .expect("empty listing");

    assert!(views.is_empty());
}

#[rstest]
#[tokio::test]
async fn list_mine_queries_by_caller(clock: Arc<MutableClock>) {
    let caller = citizen();
    let owned = complaint_for(caller.id(), ComplaintStatus::Pending);
    let expected = owned.clone();
    let mut complaints = MockComplaintRepository::new();
    complaints
        .expect_list_by_owner()
        .with(eq(caller.id()))
        .times(1)
        .return_once(move |_| Ok(vec![owned]));

    let mine = service(complaints, MockUserRepository::new(), clock)
        .list_mine(caller)
        .await
        .expect("own listing");

    assert_eq!(mine, vec![expected]);
}

#[rstest]
#[tokio::test]
async fn query_errors_are_internal(clock: Arc<MutableClock>) {
    let mut complaints = MockComplaintRepository::new();
    complaints
        .expect_list_by_owner()
        .times(1)
        .return_once(|_| Err(ComplaintRepositoryError::query("syntax error")));

    let error = service(complaints, MockUserRepository::new(), clock)
        .list_mine(citizen())
        .await
        .expect_err("query failure");

    assert_eq!(error.code(), ErrorCode::InternalError);
}
