//! PostgreSQL-backed `ComplaintRepository` implementation using Diesel ORM.
//!
//! Category and status are stored as their display labels. Feedback occupies
//! three nullable columns which the schema forces to be all set or all null;
//! a row that slips past that is reported as a query error rather than being
//! half-loaded.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{ComplaintRepository, ComplaintRepositoryError};
use crate::domain::{
    Category, Complaint, ComplaintId, ComplaintSnapshot, ComplaintStatus, Feedback, Rating,
    UserId,
};

use super::diesel_error_mapping::{StoreFailure, classify_diesel_error, classify_pool_error};
use super::models::{ComplaintRow, ComplaintUpdate, NewComplaintRow};
use super::pool::DbPool;
use super::schema::complaints;

/// Diesel-backed implementation of the complaint repository port.
#[derive(Clone)]
pub struct DieselComplaintRepository {
    pool: DbPool,
}

impl DieselComplaintRepository {
    /// Create a repository over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_port_error(failure: StoreFailure) -> ComplaintRepositoryError {
    match failure {
        StoreFailure::Connection(message) => ComplaintRepositoryError::connection(message),
        StoreFailure::Query(message) => ComplaintRepositoryError::query(message),
        StoreFailure::UniqueViolation { constraint } => ComplaintRepositoryError::query(format!(
            "unique constraint {} violated",
            constraint.as_deref().unwrap_or("<unknown>")
        )),
    }
}

fn corrupt(id: Uuid, field: &str, err: impl std::fmt::Display) -> ComplaintRepositoryError {
    warn!(complaint_id = %id, field, error = %err, "stored complaint row failed validation");
    ComplaintRepositoryError::query(format!("stored complaint {id} has invalid {field}"))
}

type FeedbackColumns<'a> = (Option<i16>, Option<&'a str>, Option<DateTime<Utc>>);

fn feedback_columns(complaint: &Complaint) -> FeedbackColumns<'_> {
    complaint.feedback().map_or((None, None, None), |feedback| {
        (
            Some(i16::from(feedback.rating().get())),
            Some(feedback.comment()),
            Some(feedback.created_at()),
        )
    })
}

fn complaint_changes(complaint: &Complaint) -> ComplaintUpdate<'_> {
    let (feedback_rating, feedback_comment, feedback_created_at) = feedback_columns(complaint);
    ComplaintUpdate {
        status: complaint.status().as_str(),
        feedback_rating,
        feedback_comment,
        feedback_created_at,
        updated_at: complaint.updated_at(),
    }
}

fn row_feedback(row: &ComplaintRow) -> Result<Option<Feedback>, ComplaintRepositoryError> {
    match (
        row.feedback_rating,
        row.feedback_comment.as_deref(),
        row.feedback_created_at,
    ) {
        (None, None, None) => Ok(None),
        (Some(rating), Some(comment), Some(created_at)) => {
            let rating =
                Rating::new(i64::from(rating)).map_err(|err| corrupt(row.id, "feedback", err))?;
            Feedback::new(rating, comment, created_at)
                .map(Some)
                .map_err(|err| corrupt(row.id, "feedback", err))
        }
        _ => Err(corrupt(row.id, "feedback", "partially populated columns")),
    }
}

fn row_to_complaint(row: ComplaintRow) -> Result<Complaint, ComplaintRepositoryError> {
    let feedback = row_feedback(&row)?;
    let category = row
        .category
        .parse::<Category>()
        .map_err(|err| corrupt(row.id, "category", err))?;
    let status = row
        .status
        .parse::<ComplaintStatus>()
        .map_err(|err| corrupt(row.id, "status", err))?;
    let id = row.id;

    Complaint::restore(ComplaintSnapshot {
        id: ComplaintId::from_uuid(row.id),
        owner: UserId::from_uuid(row.user_id),
        title: row.title,
        description: row.description,
        category,
        status,
        feedback,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
    .map_err(|err| corrupt(id, "text", err))
}

fn rows_to_complaints(rows: Vec<ComplaintRow>) -> Result<Vec<Complaint>, ComplaintRepositoryError> {
    rows.into_iter().map(row_to_complaint).collect()
}

#[async_trait]
impl ComplaintRepository for DieselComplaintRepository {
    async fn insert(&self, complaint: &Complaint) -> Result<(), ComplaintRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| to_port_error(classify_pool_error(err)))?;
        let (feedback_rating, feedback_comment, feedback_created_at) = feedback_columns(complaint);

        let row = NewComplaintRow {
            id: *complaint.id().as_uuid(),
            user_id: *complaint.owner().as_uuid(),
            title: complaint.title(),
            description: complaint.description(),
            category: complaint.category().as_str(),
            status: complaint.status().as_str(),
            feedback_rating,
            feedback_comment,
            feedback_created_at,
            created_at: complaint.created_at(),
            updated_at: complaint.updated_at(),
        };

        diesel::insert_into(complaints::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| to_port_error(classify_diesel_error(err, "insert complaint")))
    }

    async fn find_by_id(
        &self,
        id: &ComplaintId,
    ) -> Result<Option<Complaint>, ComplaintRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| to_port_error(classify_pool_error(err)))?;

        let row = complaints::table
            .filter(complaints::id.eq(id.as_uuid()))
            .select(ComplaintRow::as_select())
            .first::<ComplaintRow>(&mut conn)
            .await
            .optional()
            .map_err(|err| to_port_error(classify_diesel_error(err, "find complaint")))?;

        row.map(row_to_complaint).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Complaint>, ComplaintRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| to_port_error(classify_pool_error(err)))?;

        let rows: Vec<ComplaintRow> = complaints::table
            .order((complaints::created_at.desc(), complaints::id.desc()))
            .select(ComplaintRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| to_port_error(classify_diesel_error(err, "list complaints")))?;

        rows_to_complaints(rows)
    }

    async fn list_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Complaint>, ComplaintRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| to_port_error(classify_pool_error(err)))?;

        let rows: Vec<ComplaintRow> = complaints::table
            .filter(complaints::user_id.eq(owner.as_uuid()))
            .order((complaints::created_at.desc(), complaints::id.desc()))
            .select(ComplaintRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| to_port_error(classify_diesel_error(err, "list owner complaints")))?;

        rows_to_complaints(rows)
    }

    async fn update(&self, complaint: &Complaint) -> Result<(), ComplaintRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| to_port_error(classify_pool_error(err)))?;
        let changes = complaint_changes(complaint);
        let complaint_id = complaint.id();
        let target = complaints::table.filter(complaints::id.eq(*complaint_id.as_uuid()));
        let affected = diesel::update(target)
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(|err| to_port_error(classify_diesel_error(err, "update complaint")))?;

        if affected == 0 {
            warn!(%complaint_id, "update matched no rows");
            return Err(ComplaintRepositoryError::query(format!(
                "complaint {complaint_id} does not exist"
            )));
        }
        Ok(())
    }
}
