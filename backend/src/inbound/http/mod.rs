//! HTTP inbound adapter exposing REST endpoints.
//!
//! Handlers only see [`state::HttpState`], a bundle of domain ports, so they
//! can be exercised with mocks or in-memory adapters.

use actix_web::{Scope, web};

pub mod accounts;
pub mod bearer;
pub mod complaints;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod token_config;
pub(crate) mod validation;

pub use error::ApiResult;

use error::{json_error_handler, path_error_handler};

/// Every JSON endpoint, mounted under `/api` with the domain error envelope
/// for body and path extraction failures.
///
/// # Examples
/// ```no_run
/// use actix_web::{App, web};
/// use complaints::inbound::http::{api_scope, state::HttpState};
///
/// fn app(state: HttpState) {
///     let _app = App::new().app_data(web::Data::new(state)).service(api_scope());
/// }
/// ```
pub fn api_scope() -> Scope {
    web::scope("/api")
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .service(accounts::register)
        .service(accounts::login)
        .service(complaints::list_all_complaints)
        .service(complaints::list_my_complaints)
        .service(complaints::create_complaint)
        .service(complaints::update_complaint_status)
        .service(complaints::submit_feedback)
}
