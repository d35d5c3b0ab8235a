//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccessTokens, ComplaintCommand, ComplaintQuery, LoginService, RegistrationService,
};

/// Dependency bundle for HTTP handlers.
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
///
/// use complaints::domain::ports::{
///     AccessTokens, ComplaintCommand, ComplaintQuery, LoginService, RegistrationService,
/// };
/// use complaints::inbound::http::state::HttpState;
///
/// fn build(
///     complaints: Arc<dyn ComplaintCommand>,
///     complaint_queries: Arc<dyn ComplaintQuery>,
///     login: Arc<dyn LoginService>,
///     registration: Arc<dyn RegistrationService>,
///     tokens: Arc<dyn AccessTokens>,
/// ) -> HttpState {
///     HttpState {
///         complaints,
///         complaint_queries,
///         login,
///         registration,
///         tokens,
///     }
/// }
/// ```
#[derive(Clone)]
pub struct HttpState {
    /// Complaint mutations.
    pub complaints: Arc<dyn ComplaintCommand>,
    /// Complaint reads.
    pub complaint_queries: Arc<dyn ComplaintQuery>,
    /// Credential checks and token issue.
    pub login: Arc<dyn LoginService>,
    /// Account creation.
    pub registration: Arc<dyn RegistrationService>,
    /// Verifier used by the bearer extractor.
    pub tokens: Arc<dyn AccessTokens>,
}
