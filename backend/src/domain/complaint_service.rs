//! Complaint domain service.
//!
//! Implements the complaint driving ports over the complaint and user
//! repositories. Role and ownership rules live here rather than in the HTTP
//! layer.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    AdminComplaintView, ComplaintCommand, ComplaintQuery, ComplaintRepository,
    ComplaintRepositoryError, CreateComplaintRequest, SubmitFeedbackRequest,
    UpdateComplaintStatusRequest, UserPersistenceError, UserRepository,
};
use crate::domain::{
    AuthenticatedUser, Complaint, ComplaintDraft, ComplaintId, ComplaintStatus,
    ComplaintValidationError, Error, Feedback, Rating, UserId,
};

fn map_complaint_repository_error(error: ComplaintRepositoryError) -> Error {
    match error {
        ComplaintRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("complaint repository unavailable: {message}"))
        }
        ComplaintRepositoryError::Query { message } => {
            Error::internal(format!("complaint repository error: {message}"))
        }
    }
}

fn map_user_repository_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        other => Error::internal(format!("user repository error: {other}")),
    }
}

/// Map a complaint validation failure to an `invalid_request` error carrying
/// `{field, code}` details, plus `value` when the input failed to parse.
pub(crate) fn validation_error(error: &ComplaintValidationError) -> Error {
    let details = match error.rejected_value() {
        Some(value) => json!({
            "field": error.field(),
            "value": value,
            "code": error.code(),
        }),
        None => json!({
            "field": error.field(),
            "code": error.code(),
        }),
    };
    Error::invalid_request(error.to_string()).with_details(details)
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, Error> {
    value.ok_or_else(|| validation_error(&ComplaintValidationError::MissingField { field }))
}

fn parse_status(raw: Option<String>) -> Result<ComplaintStatus, Error> {
    required(raw, "status")?
        .parse()
        .map_err(|err| validation_error(&err))
}

fn require_admin(caller: &AuthenticatedUser, action: &str) -> Result<(), Error> {
    if caller.is_admin() {
        Ok(())
    } else {
        Err(Error::forbidden(format!("only administrators can {action}")))
    }
}

/// Complaint service implementing [`ComplaintCommand`] and [`ComplaintQuery`].
#[derive(Clone)]
pub struct ComplaintService<C, U> {
    complaints: Arc<C>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<C, U> ComplaintService<C, U> {
    /// Create a service over the given repositories and clock.
    pub fn new(complaints: Arc<C>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            complaints,
            users,
            clock,
        }
    }
}

impl<C, U> ComplaintService<C, U>
where
    C: ComplaintRepository,
{
    async fn load(&self, id: &ComplaintId) -> Result<Complaint, Error> {
        self.complaints
            .find_by_id(id)
            .await
            .map_err(map_complaint_repository_error)?
            .ok_or_else(|| Error::not_found(format!("complaint {id} not found")))
    }

    async fn store(&self, complaint: &Complaint) -> Result<(), Error> {
        self.complaints
            .update(complaint)
            .await
            .map_err(map_complaint_repository_error)
    }
}

#[async_trait]
impl<C, U> ComplaintCommand for ComplaintService<C, U>
where
    C: ComplaintRepository,
    U: UserRepository,
{
    async fn create(&self, request: CreateComplaintRequest) -> Result<Complaint, Error> {
        let CreateComplaintRequest {
            caller,
            title,
            description,
            category,
        } = request;
        let complaint = Complaint::new(ComplaintDraft {
            id: ComplaintId::random(),
            owner: caller.id(),
            title,
            description,
            category,
            created_at: self.clock.utc(),
        })
        .map_err(|err| validation_error(&err))?;

        self.complaints
            .insert(&complaint)
            .await
            .map_err(map_complaint_repository_error)?;

        info!(
            complaint_id = %complaint.id(),
            owner = %complaint.owner(),
            category = %complaint.category(),
            "complaint filed"
        );
        Ok(complaint)
    }

    async fn update_status(
        &self,
        request: UpdateComplaintStatusRequest,
    ) -> Result<Complaint, Error> {
        let mut complaint = self.load(&request.complaint_id).await?;
        require_admin(&request.caller, "update complaint status")?;
        let status = parse_status(request.status)?;

        let previous = complaint.status();
        complaint.set_status(status, self.clock.utc());
        self.store(&complaint).await?;

        info!(
            complaint_id = %complaint.id(),
            admin = %request.caller.id(),
            from = %previous,
            to = %complaint.status(),
            "complaint status changed"
        );
        Ok(complaint)
    }

    async fn submit_feedback(&self, request: SubmitFeedbackRequest) -> Result<Complaint, Error> {
        let mut complaint = self.load(&request.complaint_id).await?;
        if !complaint.is_owned_by(request.caller.id()) {
            return Err(Error::forbidden(
                "only the complaint owner can submit feedback",
            ));
        }
        if !complaint.status().is_resolved() {
            return Err(validation_error(
                &ComplaintValidationError::FeedbackRequiresResolved {
                    status: complaint.status(),
                },
            ));
        }

        let rating = Rating::new(required(request.rating, "rating")?)
            .map_err(|err| validation_error(&err))?;
        let comment = required(request.comment, "comment")?;
        let feedback = Feedback::new(rating, &comment, self.clock.utc())
            .map_err(|err| validation_error(&err))?;
        complaint
            .record_feedback(feedback)
            .map_err(|err| validation_error(&err))?;
        self.store(&complaint).await?;

        info!(
            complaint_id = %complaint.id(),
            rating = rating.get(),
            "complaint feedback recorded"
        );
        Ok(complaint)
    }
}

#[async_trait]
impl<C, U> ComplaintQuery for ComplaintService<C, U>
where
    C: ComplaintRepository,
    U: UserRepository,
{
    async fn list_all(&self, caller: AuthenticatedUser) -> Result<Vec<AdminComplaintView>, Error> {
        require_admin(&caller, "list all complaints")?;

        let complaints = self
            .complaints
            .list_all()
            .await
            .map_err(map_complaint_repository_error)?;

        let owner_ids: Vec<UserId> = complaints
            .iter()
            .map(Complaint::owner)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let owners: HashMap<UserId, _> = if owner_ids.is_empty() {
            HashMap::new()
        } else {
            self.users
                .find_summaries(&owner_ids)
                .await
                .map_err(map_user_repository_error)?
                .into_iter()
                .map(|summary| (summary.id, summary))
                .collect()
        };

        Ok(complaints
            .into_iter()
            .map(|complaint| {
                let owner = owners.get(&complaint.owner()).cloned();
                AdminComplaintView { complaint, owner }
            })
            .collect())
    }

    async fn list_mine(&self, caller: AuthenticatedUser) -> Result<Vec<Complaint>, Error> {
        self.complaints
            .list_by_owner(&caller.id())
            .await
            .map_err(map_complaint_repository_error)
    }
}

#[cfg(test)]
#[path = "complaint_service_tests.rs"]
mod tests;
