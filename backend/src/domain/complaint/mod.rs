//! Complaint records and the values that make them up.
//!
//! A complaint is filed by its owner, triaged by administrators through status
//! changes, and once resolved may carry a single piece of owner feedback that
//! later submissions overwrite. There is no deletion path.

use std::fmt;

mod record;
mod values;

pub use record::{Complaint, ComplaintDraft, ComplaintSnapshot};
pub use values::{Category, ComplaintId, ComplaintStatus, Feedback, Rating};

/// Validation errors raised by complaint constructors and mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComplaintValidationError {
    /// A required request field was absent.
    MissingField {
        /// Wire name of the field.
        field: &'static str,
    },
    /// Complaint id is not a UUID.
    InvalidId,
    /// Title is blank after trimming.
    EmptyTitle,
    /// Description is blank after trimming.
    EmptyDescription,
    /// Category label is not one of the fixed set.
    UnknownCategory {
        /// Label as received.
        value: String,
    },
    /// Status label is not one of the fixed set.
    UnknownStatus {
        /// Label as received.
        value: String,
    },
    /// Rating outside `1..=5`.
    RatingOutOfRange {
        /// Rating as received.
        value: i64,
    },
    /// Feedback comment is blank after trimming.
    EmptyComment,
    /// Feedback was sent before the complaint was resolved.
    FeedbackRequiresResolved {
        /// Status at the time of the attempt.
        status: ComplaintStatus,
    },
}

impl fmt::Display for ComplaintValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "missing required field: {field}"),
            Self::InvalidId => write!(f, "complaint id must be a valid UUID"),
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::EmptyDescription => write!(f, "description must not be empty"),
            Self::UnknownCategory { value } => write!(
                f,
                "category must be one of {} (got {value:?})",
                Category::expected_values()
            ),
            Self::UnknownStatus { value } => write!(
                f,
                "status must be one of {} (got {value:?})",
                ComplaintStatus::expected_values()
            ),
            Self::RatingOutOfRange { value } => write!(
                f,
                "rating must be between {} and {} (got {value})",
                Rating::MIN,
                Rating::MAX
            ),
            Self::EmptyComment => write!(f, "comment must not be empty"),
            Self::FeedbackRequiresResolved { status } => write!(
                f,
                "feedback can only be submitted for resolved complaints (status is {status})"
            ),
        }
    }
}

impl std::error::Error for ComplaintValidationError {}

impl ComplaintValidationError {
    /// Request field the failure refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field } => *field,
            Self::InvalidId => "id",
            Self::EmptyTitle => "title",
            Self::EmptyDescription => "description",
            Self::UnknownCategory { .. } => "category",
            Self::UnknownStatus { .. } | Self::FeedbackRequiresResolved { .. } => "status",
            Self::RatingOutOfRange { .. } => "rating",
            Self::EmptyComment => "comment",
        }
    }

    /// Stable machine-readable reason, used in error details.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "missing_field",
            Self::InvalidId => "invalid_uuid",
            Self::EmptyTitle | Self::EmptyDescription | Self::EmptyComment => "required",
            Self::UnknownCategory { .. } => "invalid_category",
            Self::UnknownStatus { .. } => "invalid_status",
            Self::RatingOutOfRange { .. } => "rating_out_of_range",
            Self::FeedbackRequiresResolved { .. } => "not_resolved",
        }
    }

    /// Input that failed to parse, echoed back in error details.
    #[must_use]
    pub fn rejected_value(&self) -> Option<&str> {
        match self {
            Self::UnknownCategory { value } | Self::UnknownStatus { value } => Some(value),
            _ => None,
        }
    }
}
