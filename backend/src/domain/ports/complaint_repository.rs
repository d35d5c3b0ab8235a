//! Port abstraction for complaint persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{Complaint, ComplaintId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by complaint repository adapters.
    pub enum ComplaintRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "complaint repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "complaint repository query failed: {message}",
    }
}

/// Storage for complaint records.
///
/// `update` overwrites the stored row wholesale; there is no version check, so
/// concurrent writers race and the last one wins.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ComplaintRepository: Send + Sync {
    /// Persist a newly filed complaint.
    async fn insert(&self, complaint: &Complaint) -> Result<(), ComplaintRepositoryError>;

    /// Fetch a complaint by identifier.
    async fn find_by_id(
        &self,
        id: &ComplaintId,
    ) -> Result<Option<Complaint>, ComplaintRepositoryError>;

    /// Every complaint, newest first.
    async fn list_all(&self) -> Result<Vec<Complaint>, ComplaintRepositoryError>;

    /// Complaints filed by `owner`, newest first.
    async fn list_by_owner(&self, owner: &UserId)
    -> Result<Vec<Complaint>, ComplaintRepositoryError>;

    /// Replace the stored status, feedback and `updated_at` of an existing
    /// complaint.
    async fn update(&self, complaint: &Complaint) -> Result<(), ComplaintRepositoryError>;
}
