//! The complaint aggregate.

use chrono::{DateTime, Utc};

use super::{Category, ComplaintId, ComplaintStatus, ComplaintValidationError, Feedback};
use crate::domain::UserId;

/// A citizen complaint.
///
/// ## Invariants
/// - `title` and `description` are trimmed and non-empty.
/// - `feedback` is only ever recorded while `status` is
///   [`ComplaintStatus::Resolved`].
/// - `updated_at` is never earlier than `created_at` when built via
///   [`Complaint::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Complaint {
    id: ComplaintId,
    owner: UserId,
    title: String,
    description: String,
    category: Category,
    status: ComplaintStatus,
    feedback: Option<Feedback>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Input for filing a new complaint.
#[derive(Debug, Clone)]
pub struct ComplaintDraft {
    /// Identifier assigned by the service.
    pub id: ComplaintId,
    /// Filing account.
    pub owner: UserId,
    /// Short summary; trimmed, must not be blank.
    pub title: String,
    /// Free-text detail; trimmed, must not be blank.
    pub description: String,
    /// Complaint category.
    pub category: Category,
    /// Filing time; also the initial `updated_at`.
    pub created_at: DateTime<Utc>,
}

/// Every stored field, used by repositories to rebuild a complaint.
#[derive(Debug, Clone)]
pub struct ComplaintSnapshot {
    /// Stored identifier.
    pub id: ComplaintId,
    /// Filing account.
    pub owner: UserId,
    /// Stored title.
    pub title: String,
    /// Stored description.
    pub description: String,
    /// Stored category.
    pub category: Category,
    /// Current status.
    pub status: ComplaintStatus,
    /// Owner feedback, if any.
    pub feedback: Option<Feedback>,
    /// Filing time.
    pub created_at: DateTime<Utc>,
    /// Last status change.
    pub updated_at: DateTime<Utc>,
}

fn required_text(
    value: &str,
    empty: ComplaintValidationError,
) -> Result<String, ComplaintValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(empty);
    }
    Ok(trimmed.to_owned())
}

impl Complaint {
    /// File a new complaint in the [`ComplaintStatus::Pending`] state.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use complaints::domain::{
    ///     Category, Complaint, ComplaintDraft, ComplaintId, ComplaintStatus, UserId,
    /// };
    ///
    /// let complaint = Complaint::new(ComplaintDraft {
    ///     id: ComplaintId::random(),
    ///     owner: UserId::random(),
    ///     title: " Pothole ".into(),
    ///     description: "Deep pothole on Main St".into(),
    ///     category: Category::Infrastructure,
    ///     created_at: Utc::now(),
    /// })
    /// .expect("valid complaint");
    /// assert_eq!(complaint.title(), "Pothole");
    /// assert_eq!(complaint.status(), ComplaintStatus::Pending);
    /// assert!(complaint.feedback().is_none());
    /// ```
    pub fn new(draft: ComplaintDraft) -> Result<Self, ComplaintValidationError> {
        let title = required_text(&draft.title, ComplaintValidationError::EmptyTitle)?;
        let description =
            required_text(&draft.description, ComplaintValidationError::EmptyDescription)?;
        Ok(Self {
            id: draft.id,
            owner: draft.owner,
            title,
            description,
            category: draft.category,
            status: ComplaintStatus::Pending,
            feedback: None,
            created_at: draft.created_at,
            updated_at: draft.created_at,
        })
    }

    /// Rebuild a stored complaint, re-checking the text rules.
    ///
    /// Stored feedback is accepted under any status because an admin may move
    /// a complaint out of the resolved state after feedback was recorded.
    pub fn restore(snapshot: ComplaintSnapshot) -> Result<Self, ComplaintValidationError> {
        let ComplaintSnapshot {
            id,
            owner,
            title,
            description,
            category,
            status,
            feedback,
            created_at,
            updated_at,
        } = snapshot;
        let title = required_text(&title, ComplaintValidationError::EmptyTitle)?;
        let description = required_text(&description, ComplaintValidationError::EmptyDescription)?;
        Ok(Self {
            id,
            owner,
            title,
            description,
            category,
            status,
            feedback,
            created_at,
            updated_at,
        })
    }

    /// Stable identifier.
    pub fn id(&self) -> ComplaintId {
        self.id
    }

    /// Account that filed the complaint.
    pub fn owner(&self) -> UserId {
        self.owner
    }

    /// Trimmed title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Trimmed description.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Category chosen when filing.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Current triage status.
    pub fn status(&self) -> ComplaintStatus {
        self.status
    }

    /// Latest owner feedback.
    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Filing time.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Time of the last status change.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Whether `user` filed this complaint.
    pub fn is_owned_by(&self, user: UserId) -> bool {
        self.owner == user
    }

    /// Set the triage status and refresh `updated_at`.
    ///
    /// Existing feedback is kept even when the complaint leaves the resolved
    /// state; only new submissions are gated on the status.
    pub fn set_status(&mut self, status: ComplaintStatus, at: DateTime<Utc>) {
        self.status = status;
        self.updated_at = at;
    }

    /// Attach owner feedback, replacing any earlier submission.
    ///
    /// Does not touch `updated_at`.
    pub fn record_feedback(&mut self, feedback: Feedback) -> Result<(), ComplaintValidationError> {
        if !self.status.is_resolved() {
            return Err(ComplaintValidationError::FeedbackRequiresResolved {
                status: self.status,
            });
        }
        self.feedback = Some(feedback);
        Ok(())
    }
}
