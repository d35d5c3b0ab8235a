//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{
    EmailAddress, PasswordHash, Role, User, UserDraft, UserId, UserName, UserSummary,
};

use super::diesel_error_mapping::{StoreFailure, classify_diesel_error, classify_pool_error};
use super::models::{NewUserRow, UserRow, UserSummaryRow};
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a repository over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_port_error(failure: StoreFailure, email: Option<&EmailAddress>) -> UserPersistenceError {
    match failure {
        StoreFailure::Connection(message) => UserPersistenceError::connection(message),
        StoreFailure::Query(message) => UserPersistenceError::query(message),
        StoreFailure::UniqueViolation { constraint } => match email {
            Some(email) => UserPersistenceError::duplicate(email.as_ref()),
            None => UserPersistenceError::query(format!(
                "unique constraint {} violated",
                constraint.as_deref().unwrap_or("<unknown>")
            )),
        },
    }
}

fn corrupt(field: &str, id: Uuid, err: impl std::fmt::Display) -> UserPersistenceError {
    warn!(user_id = %id, field, error = %err, "stored user row failed validation");
    UserPersistenceError::query(format!("stored user {id} has invalid {field}"))
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let UserRow {
        id,
        name,
        email,
        password_hash,
        role,
        created_at,
    } = row;

    Ok(User::new(UserDraft {
        id: UserId::from_uuid(id),
        name: UserName::new(&name).map_err(|err| corrupt("name", id, err))?,
        email: EmailAddress::new(&email).map_err(|err| corrupt("email", id, err))?,
        password_hash: PasswordHash::new(password_hash),
        role: role.parse::<Role>().map_err(|err| corrupt("role", id, err))?,
        created_at,
    }))
}

fn row_to_summary(row: UserSummaryRow) -> Result<UserSummary, UserPersistenceError> {
    Ok(UserSummary {
        id: UserId::from_uuid(row.id),
        name: UserName::new(&row.name).map_err(|err| corrupt("name", row.id, err))?,
        email: EmailAddress::new(&row.email).map_err(|err| corrupt("email", row.id, err))?,
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| to_port_error(classify_pool_error(err), None))?;

        let row = NewUserRow {
            id: *user.id().as_uuid(),
            name: user.name().as_ref(),
            email: user.email().as_ref(),
            password_hash: user.password_hash().as_ref(),
            role: user.role().as_str(),
            created_at: user.created_at(),
        };

        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                to_port_error(classify_diesel_error(err, "insert user"), Some(user.email()))
            })
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| to_port_error(classify_pool_error(err), None))?;

        let row = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(|err| to_port_error(classify_diesel_error(err, "find user by id"), None))?;

        row.map(row_to_user).transpose()
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| to_port_error(classify_pool_error(err), None))?;

        let row = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(|err| {
                to_port_error(classify_diesel_error(err, "find user by email"), None)
            })?;

        row.map(row_to_user).transpose()
    }

    async fn find_summaries(
        &self,
        ids: &[UserId],
    ) -> Result<Vec<UserSummary>, UserPersistenceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| to_port_error(classify_pool_error(err), None))?;

        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let rows: Vec<UserSummaryRow> = users::table
            .filter(users::id.eq_any(&uuids))
            .select(UserSummaryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| to_port_error(classify_diesel_error(err, "load user summaries"), None))?;

        rows.into_iter().map(row_to_summary).collect()
    }
}
