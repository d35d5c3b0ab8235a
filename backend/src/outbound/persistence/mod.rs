//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories translate between Diesel rows (`models.rs`, `schema.rs`) and
//! domain values; neither row types nor Diesel errors leave this module.
//! Connections come from a `bb8` pool over `diesel-async`, and the schema is
//! brought up to date by [`run_pending_migrations`] before the server binds.
//!
//! # Example
//!
//! ```no_run
//! use complaints::outbound::persistence::{
//!     DbPool, DieselComplaintRepository, PoolConfig, run_pending_migrations,
//! };
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let url = "postgres://complaints@localhost/complaints";
//! run_pending_migrations(url).await?;
//! let pool = DbPool::new(&PoolConfig::new(url)).await?;
//! let complaints = DieselComplaintRepository::new(pool);
//! # let _ = complaints;
//! # Ok(())
//! # }
//! ```

mod diesel_complaint_repository;
mod diesel_error_mapping;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_complaint_repository::DieselComplaintRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
