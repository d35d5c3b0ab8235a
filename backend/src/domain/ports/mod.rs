//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`ComplaintCommand`, `ComplaintQuery`, `LoginService`,
//! `RegistrationService`) are called by inbound adapters. Driven ports
//! (repositories, `AccessTokens`, `PasswordHasher`) are implemented by
//! outbound adapters and expose typed errors that services map onto the
//! domain [`Error`](crate::domain::Error).

mod macros;
pub(crate) use macros::define_port_error;

mod access_tokens;
mod complaint_command;
mod complaint_query;
mod complaint_repository;
mod login_service;
mod password_hasher;
mod registration_service;
mod user_repository;

#[cfg(test)]
pub use access_tokens::MockAccessTokens;
pub use access_tokens::{AccessTokenError, AccessTokens};
#[cfg(test)]
pub use complaint_command::MockComplaintCommand;
pub use complaint_command::{
    ComplaintCommand, CreateComplaintRequest, SubmitFeedbackRequest, UpdateComplaintStatusRequest,
};
#[cfg(test)]
pub use complaint_query::MockComplaintQuery;
pub use complaint_query::{AdminComplaintView, ComplaintQuery};
#[cfg(test)]
pub use complaint_repository::MockComplaintRepository;
pub use complaint_repository::{ComplaintRepository, ComplaintRepositoryError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{LoginOutcome, LoginService};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use registration_service::MockRegistrationService;
pub use registration_service::RegistrationService;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
