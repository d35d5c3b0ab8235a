//! Complaint HTTP handlers.
//!
//! ```text
//! GET   /api/complaints/all
//! GET   /api/complaints
//! POST  /api/complaints {"title":"Pothole","description":"...","category":"Infrastructure"}
//! PATCH /api/complaints/{id}/status {"status":"Resolved"}
//! POST  /api/complaints/{id}/feedback {"rating":5,"comment":"Fixed fast"}
//! ```

use actix_web::{HttpResponse, get, patch, post, web};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{
    AdminComplaintView, CreateComplaintRequest, SubmitFeedbackRequest,
    UpdateComplaintStatusRequest,
};
use crate::domain::{Complaint, ComplaintId, Feedback, UserSummary};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::BearerAuth;
use crate::inbound::http::schemas::{CategorySchema, ComplaintStatusSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_category, parse_uuid, require};

/// Request payload for filing a complaint.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateComplaintRequestBody {
    /// Short summary of the problem.
    #[schema(example = "Pothole on Main St")]
    pub title: Option<String>,
    /// Full account of the problem.
    #[schema(example = "Deep pothole outside number 12")]
    pub description: Option<String>,
    /// One of `Infrastructure`, `Public Services`, `Environmental`, `Other`.
    #[schema(example = "Infrastructure")]
    pub category: Option<String>,
}

/// Request payload for changing a complaint's status.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequestBody {
    /// One of `Pending`, `In Progress`, `Resolved`, `Rejected`.
    #[schema(example = "Resolved")]
    pub status: Option<String>,
}

/// Request payload for submitting feedback.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequestBody {
    /// Score from 1 to 5.
    #[schema(minimum = 1, maximum = 5, example = 5)]
    pub rating: Option<i64>,
    /// Free-text comment; must not be blank.
    #[schema(example = "Fixed fast")]
    pub comment: Option<String>,
}

/// Feedback attached to a resolved complaint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResponseBody {
    /// Score from 1 to 5.
    pub rating: u8,
    /// Comment left by the owner.
    pub comment: String,
    /// When the feedback was recorded.
    #[schema(format = "date-time")]
    pub created_at: String,
}

/// Complaint as returned to its owner and by mutations. `user` is the owner
/// id.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintResponseBody {
    /// Complaint id.
    #[schema(format = "uuid")]
    pub id: String,
    /// Short summary of the problem.
    pub title: String,
    /// Full account of the problem.
    pub description: String,
    /// Display label of the category.
    #[schema(value_type = CategorySchema)]
    pub category: String,
    /// Display label of the status.
    #[schema(value_type = ComplaintStatusSchema)]
    pub status: String,
    /// Id of the owning account.
    #[schema(format = "uuid")]
    pub user: String,
    /// Present once the owner has rated the outcome.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<FeedbackResponseBody>,
    /// Creation time.
    #[schema(format = "date-time")]
    pub created_at: String,
    /// Time of the last status change.
    #[schema(format = "date-time")]
    pub updated_at: String,
}

/// Owner details embedded in the admin listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintOwnerBody {
    /// Owner account id.
    #[schema(format = "uuid")]
    pub id: String,
    /// Owner display name.
    pub name: String,
    /// Owner e-mail address.
    pub email: String,
}

/// Complaint as returned by the admin listing. `user` is `null` when the
/// owning account no longer exists.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminComplaintResponseBody {
    /// Complaint id.
    #[schema(format = "uuid")]
    pub id: String,
    /// Short summary of the problem.
    pub title: String,
    /// Full account of the problem.
    pub description: String,
    /// Display label of the category.
    #[schema(value_type = CategorySchema)]
    pub category: String,
    /// Display label of the status.
    #[schema(value_type = ComplaintStatusSchema)]
    pub status: String,
    /// Owning account, if it still exists.
    pub user: Option<ComplaintOwnerBody>,
    /// Present once the owner has rated the outcome.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<FeedbackResponseBody>,
    /// Creation time.
    #[schema(format = "date-time")]
    pub created_at: String,
    /// Time of the last status change.
    #[schema(format = "date-time")]
    pub updated_at: String,
}

fn timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl From<&Feedback> for FeedbackResponseBody {
    fn from(value: &Feedback) -> Self {
        Self {
            rating: value.rating().get(),
            comment: value.comment().to_owned(),
            created_at: timestamp(value.created_at()),
        }
    }
}

impl From<Complaint> for ComplaintResponseBody {
    fn from(value: Complaint) -> Self {
        Self {
            id: value.id().to_string(),
            title: value.title().to_owned(),
            description: value.description().to_owned(),
            category: value.category().to_string(),
            status: value.status().to_string(),
            user: value.owner().to_string(),
            feedback: value.feedback().map(FeedbackResponseBody::from),
            created_at: timestamp(value.created_at()),
            updated_at: timestamp(value.updated_at()),
        }
    }
}

impl From<UserSummary> for ComplaintOwnerBody {
    fn from(value: UserSummary) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name.into(),
            email: value.email.into(),
        }
    }
}

impl From<AdminComplaintView> for AdminComplaintResponseBody {
    fn from(value: AdminComplaintView) -> Self {
        let AdminComplaintView { complaint, owner } = value;
        Self {
            id: complaint.id().to_string(),
            title: complaint.title().to_owned(),
            description: complaint.description().to_owned(),
            category: complaint.category().to_string(),
            status: complaint.status().to_string(),
            user: owner.map(ComplaintOwnerBody::from),
            feedback: complaint.feedback().map(FeedbackResponseBody::from),
            created_at: timestamp(complaint.created_at()),
            updated_at: timestamp(complaint.updated_at()),
        }
    }
}

fn parse_complaint_id(raw: &str) -> ApiResult<ComplaintId> {
    parse_uuid(raw, FieldName::new("id")).map(ComplaintId::from_uuid)
}

/// List every complaint with owner details. Admin only.
#[utoipa::path(
    get,
    path = "/api/complaints/all",
    responses(
        (status = 200, description = "All complaints", body = [AdminComplaintResponseBody]),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Caller is not an admin", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["complaints"],
    operation_id = "listAllComplaints",
    security(("BearerAuth" = []))
)]
#[get("/complaints/all")]
pub async fn list_all_complaints(
    auth: BearerAuth,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<AdminComplaintResponseBody>>> {
    let views = state.complaint_queries.list_all(auth.user()).await?;
    Ok(web::Json(views.into_iter().map(Into::into).collect()))
}

/// List complaints filed by the caller.
#[utoipa::path(
    get,
    path = "/api/complaints",
    responses(
        (status = 200, description = "Caller's complaints", body = [ComplaintResponseBody]),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["complaints"],
    operation_id = "listMyComplaints",
    security(("BearerAuth" = []))
)]
#[get("/complaints")]
pub async fn list_my_complaints(
    auth: BearerAuth,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<ComplaintResponseBody>>> {
    let complaints = state.complaint_queries.list_mine(auth.user()).await?;
    Ok(web::Json(complaints.into_iter().map(Into::into).collect()))
}

/// File a new complaint owned by the caller.
///
/// # Examples
/// ```no_run
/// use actix_web::{App, web};
/// use complaints::inbound::http::complaints::create_complaint;
///
/// let app = App::new().service(web::scope("/api").service(create_complaint));
/// ```
#[utoipa::path(
    post,
    path = "/api/complaints",
    request_body = CreateComplaintRequestBody,
    responses(
        (status = 201, description = "Complaint filed", body = ComplaintResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["complaints"],
    operation_id = "createComplaint",
    security(("BearerAuth" = []))
)]
#[post("/complaints")]
pub async fn create_complaint(
    auth: BearerAuth,
    state: web::Data<HttpState>,
    payload: web::Json<CreateComplaintRequestBody>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let title = require(body.title, FieldName::new("title"))?;
    let description = require(body.description, FieldName::new("description"))?;
    let category = parse_category(&require(body.category, FieldName::new("category"))?)?;

    let complaint = state
        .complaints
        .create(CreateComplaintRequest {
            caller: auth.user(),
            title,
            description,
            category,
        })
        .await?;

    Ok(HttpResponse::Created().json(ComplaintResponseBody::from(complaint)))
}

/// Change a complaint's status. Admin only; any status may follow any other.
///
/// The body is checked only after the complaint is found and the caller is
/// known to be an admin.
#[utoipa::path(
    patch,
    path = "/api/complaints/{id}/status",
    params(("id" = String, Path, format = "uuid", description = "Complaint id")),
    request_body = UpdateStatusRequestBody,
    responses(
        (status = 200, description = "Status updated", body = ComplaintResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Caller is not an admin", body = ErrorSchema),
        (status = 404, description = "Complaint not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["complaints"],
    operation_id = "updateComplaintStatus",
    security(("BearerAuth" = []))
)]
#[patch("/complaints/{id}/status")]
pub async fn update_complaint_status(
    auth: BearerAuth,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateStatusRequestBody>,
) -> ApiResult<web::Json<ComplaintResponseBody>> {
    let complaint_id = parse_complaint_id(&path.into_inner())?;

    let complaint = state
        .complaints
        .update_status(UpdateComplaintStatusRequest {
            caller: auth.user(),
            complaint_id,
            status: payload.into_inner().status,
        })
        .await?;

    Ok(web::Json(complaint.into()))
}

/// Record owner feedback on a resolved complaint, replacing any earlier
/// feedback.
#[utoipa::path(
    post,
    path = "/api/complaints/{id}/feedback",
    params(("id" = String, Path, format = "uuid", description = "Complaint id")),
    request_body = FeedbackRequestBody,
    responses(
        (status = 200, description = "Feedback recorded", body = ComplaintResponseBody),
        (status = 400, description = "Invalid request or complaint not resolved", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Caller does not own the complaint", body = ErrorSchema),
        (status = 404, description = "Complaint not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["complaints"],
    operation_id = "submitComplaintFeedback",
    security(("BearerAuth" = []))
)]
#[post("/complaints/{id}/feedback")]
pub async fn submit_feedback(
    auth: BearerAuth,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<FeedbackRequestBody>,
) -> ApiResult<web::Json<ComplaintResponseBody>> {
    let complaint_id = parse_complaint_id(&path.into_inner())?;
    let FeedbackRequestBody { rating, comment } = payload.into_inner();

    let complaint = state
        .complaints
        .submit_feedback(SubmitFeedbackRequest {
            caller: auth.user(),
            complaint_id,
            rating,
            comment,
        })
        .await?;

    Ok(web::Json(complaint.into()))
}

#[cfg(test)]
#[path = "complaints_tests.rs"]
mod tests;
