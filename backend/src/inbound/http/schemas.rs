//! OpenAPI schema definitions for domain types.
//!
//! Domain types do not derive `ToSchema`; the wrappers here mirror their wire
//! form and are registered with utoipa under the domain type's name.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request conflicts with existing state.
    #[schema(rename = "conflict")]
    Conflict,
    /// A dependency such as the database is unavailable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// Every error body carries `message`; the other fields are additive.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "title must not be empty")]
    message: String,
    /// Correlation identifier, also sent as the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Field-level context such as `{"field": "title", "code": "required"}`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Category`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Category)]
pub enum CategorySchema {
    /// Roads, lighting and utilities.
    #[schema(rename = "Infrastructure")]
    Infrastructure,
    /// Transport, waste collection and other council services.
    #[schema(rename = "Public Services")]
    PublicServices,
    /// Pollution, noise and green spaces.
    #[schema(rename = "Environmental")]
    Environmental,
    /// Anything else.
    #[schema(rename = "Other")]
    Other,
}

/// OpenAPI schema for [`crate::domain::ComplaintStatus`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ComplaintStatus)]
pub enum ComplaintStatusSchema {
    /// Filed and awaiting review.
    #[schema(rename = "Pending")]
    Pending,
    /// Being worked on.
    #[schema(rename = "In Progress")]
    InProgress,
    /// Fixed; the owner may leave feedback.
    #[schema(rename = "Resolved")]
    Resolved,
    /// Closed without action.
    #[schema(rename = "Rejected")]
    Rejected,
}

/// OpenAPI schema for [`crate::domain::Role`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Role)]
pub enum RoleSchema {
    /// May list every complaint and change statuses.
    #[schema(rename = "admin")]
    Admin,
    /// Standard account.
    #[schema(rename = "user")]
    User,
}
