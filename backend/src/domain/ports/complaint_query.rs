//! Driving port for complaint reads.

use async_trait::async_trait;

use crate::domain::{AuthenticatedUser, Complaint, Error, UserSummary};

/// Complaint paired with its owner's public details for the admin listing.
///
/// `owner` is `None` when the owning account no longer exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminComplaintView {
    /// The stored complaint.
    pub complaint: Complaint,
    /// Owner details, if the account still exists.
    pub owner: Option<UserSummary>,
}

/// Complaint read use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ComplaintQuery: Send + Sync {
    /// Every complaint with owner details populated. Admin only.
    async fn list_all(&self, caller: AuthenticatedUser) -> Result<Vec<AdminComplaintView>, Error>;

    /// Complaints filed by the caller.
    async fn list_mine(&self, caller: AuthenticatedUser) -> Result<Vec<Complaint>, Error>;
}
