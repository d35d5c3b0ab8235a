//! Identifier, enumerations and feedback values for complaints.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ComplaintValidationError;

/// Stable complaint identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComplaintId(Uuid);

impl ComplaintId {
    /// Parse a hyphenated UUID string.
    pub fn new(id: impl AsRef<str>) -> Result<Self, ComplaintValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| ComplaintValidationError::InvalidId)
    }

    /// Wrap an already-parsed UUID.
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Fresh random (v4) identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ComplaintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fixed set of complaint categories.
///
/// The wire and storage form is the human-readable label, e.g.
/// `"Public Services"`.
///
/// # Examples
/// ```
/// use complaints::domain::Category;
///
/// let category: Category = "Public Services".parse().expect("known category");
/// assert_eq!(category, Category::PublicServices);
/// assert!("Roads".parse::<Category>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Roads, lighting, water and other physical assets.
    Infrastructure,
    /// Transport, waste collection and other council services.
    PublicServices,
    /// Pollution, noise, waste.
    Environmental,
    /// Anything that fits no other category.
    Other,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Self; 4] = [
        Self::Infrastructure,
        Self::PublicServices,
        Self::Environmental,
        Self::Other,
    ];

    /// Display and storage label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Infrastructure => "Infrastructure",
            Self::PublicServices => "Public Services",
            Self::Environmental => "Environmental",
            Self::Other => "Other",
        }
    }

    pub(super) fn expected_values() -> String {
        join_labels(Self::ALL.iter().map(|c| c.as_str()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ComplaintValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| ComplaintValidationError::UnknownCategory {
                value: value.to_owned(),
            })
    }
}

/// Triage status. Any status may follow any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ComplaintStatus {
    /// Filed and awaiting triage.
    #[default]
    Pending,
    /// Being worked on.
    InProgress,
    /// Fixed; the owner may now leave feedback.
    Resolved,
    /// Closed without action.
    Rejected,
}

impl ComplaintStatus {
    /// Every status, in display order.
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::InProgress,
        Self::Resolved,
        Self::Rejected,
    ];

    /// Display and storage label, e.g. `"In Progress"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
            Self::Rejected => "Rejected",
        }
    }

    /// Whether feedback may be submitted.
    #[must_use]
    pub const fn is_resolved(self) -> bool {
        matches!(self, Self::Resolved)
    }

    pub(super) fn expected_values() -> String {
        join_labels(Self::ALL.iter().map(|s| s.as_str()))
    }
}

impl fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplaintStatus {
    type Err = ComplaintValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| ComplaintValidationError::UnknownStatus {
                value: value.to_owned(),
            })
    }
}

fn join_labels<'a>(labels: impl Iterator<Item = &'a str>) -> String {
    labels
        .map(|label| format!("{label:?}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Star rating between [`Rating::MIN`] and [`Rating::MAX`] inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rating(u8);

impl Rating {
    /// Lowest accepted rating.
    pub const MIN: u8 = 1;
    /// Highest accepted rating.
    pub const MAX: u8 = 5;

    /// Validate a rating supplied as a wide integer so out-of-range input is
    /// reported verbatim.
    pub fn new(value: i64) -> Result<Self, ComplaintValidationError> {
        u8::try_from(value)
            .ok()
            .filter(|rating| (Self::MIN..=Self::MAX).contains(rating))
            .map(Self)
            .ok_or(ComplaintValidationError::RatingOutOfRange { value })
    }

    /// Numeric value.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

/// Owner feedback attached to a resolved complaint.
///
/// ## Invariants
/// - `comment` is trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    rating: Rating,
    comment: String,
    created_at: DateTime<Utc>,
}

impl Feedback {
    /// Build feedback, trimming the comment and rejecting it when blank.
    pub fn new(
        rating: Rating,
        comment: impl AsRef<str>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ComplaintValidationError> {
        let comment = comment.as_ref().trim();
        if comment.is_empty() {
            return Err(ComplaintValidationError::EmptyComment);
        }
        Ok(Self {
            rating,
            comment: comment.to_owned(),
            created_at,
        })
    }

    /// Star rating.
    pub fn rating(&self) -> Rating {
        self.rating
    }

    /// Trimmed comment text.
    pub fn comment(&self) -> &str {
        self.comment.as_str()
    }

    /// When the feedback was submitted.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
