//! Driving port for complaint mutations.
//!
//! Inbound adapters hand over the caller identity resolved by the
//! authorization gate; role and ownership checks happen behind this port so
//! every transport enforces them the same way.

use async_trait::async_trait;

use crate::domain::{AuthenticatedUser, Category, Complaint, ComplaintId, Error};

/// Request to file a new complaint.
#[derive(Debug, Clone)]
pub struct CreateComplaintRequest {
    /// Caller filing the complaint; becomes the owner.
    pub caller: AuthenticatedUser,
    /// Short summary; must not be blank.
    pub title: String,
    /// Free-text detail; must not be blank.
    pub description: String,
    /// Category parsed from its display label.
    pub category: Category,
}

/// Request to change a complaint's status.
///
/// The status arrives as the raw label from the request body. It is only
/// parsed once the complaint exists and the caller is an admin.
#[derive(Debug, Clone)]
pub struct UpdateComplaintStatusRequest {
    /// Must hold the admin role.
    pub caller: AuthenticatedUser,
    /// Complaint to update.
    pub complaint_id: ComplaintId,
    /// Display label such as `"In Progress"`; `None` when absent.
    pub status: Option<String>,
}

/// Request to attach feedback to a resolved complaint.
#[derive(Debug, Clone)]
pub struct SubmitFeedbackRequest {
    /// Must be the complaint owner.
    pub caller: AuthenticatedUser,
    /// Complaint to attach feedback to.
    pub complaint_id: ComplaintId,
    /// Raw rating; required and validated to `1..=5` after the status check.
    pub rating: Option<i64>,
    /// Raw comment; required after the status check.
    pub comment: Option<String>,
}

/// Complaint write use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ComplaintCommand: Send + Sync {
    /// File a complaint owned by the caller, starting in `Pending`.
    async fn create(&self, request: CreateComplaintRequest) -> Result<Complaint, Error>;

    /// Set a new status (admin only).
    ///
    /// Check order: existence, role, then the status value.
    async fn update_status(&self, request: UpdateComplaintStatusRequest)
    -> Result<Complaint, Error>;

    /// Record or overwrite owner feedback on a resolved complaint.
    ///
    /// Check order: existence, ownership, status, then rating and comment.
    async fn submit_feedback(&self, request: SubmitFeedbackRequest) -> Result<Complaint, Error>;
}
