//! Domain primitives, aggregates and services.
//!
//! Purpose: define the strongly typed complaint and account model used by the
//! HTTP and persistence adapters, plus the services that enforce role and
//! ownership rules. Nothing here depends on actix-web or Diesel.
//!
//! Public surface:
//! - Error / ErrorCode: transport agnostic failure payload.
//! - Complaint and its values (Category, ComplaintStatus, Feedback, Rating).
//! - User and its values (UserId, UserName, EmailAddress, Role).
//! - Auth values (LoginCredentials, RegistrationDetails, AuthenticatedUser).
//! - ComplaintService and AccountService, which implement the driving ports.

pub mod account_service;
pub mod auth;
pub mod complaint;
pub mod complaint_service;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::account_service::{AccountService, AdminBootstrap};
pub use self::auth::{
    AccessToken, AuthValidationError, AuthenticatedUser, LoginCredentials, PASSWORD_MIN_LEN,
    RegistrationDetails,
};
pub use self::complaint::{
    Category, Complaint, ComplaintDraft, ComplaintId, ComplaintSnapshot, ComplaintStatus,
    ComplaintValidationError, Feedback, Rating,
};
pub use self::complaint_service::ComplaintService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EmailAddress, PasswordHash, Role, USER_NAME_MAX, User, UserDraft, UserId, UserName,
    UserSummary, UserValidationError,
};
