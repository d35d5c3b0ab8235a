//! Account API handlers.
//!
//! ```text
//! POST /api/auth/register {"name":"Ada","email":"ada@example.org","password":"..."}
//! POST /api/auth/login {"email":"ada@example.org","password":"..."}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{LoginCredentials, RegistrationDetails, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, RoleSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, auth_validation_error, require};

/// Registration request body.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Display name.
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
    /// E-mail address; stored lowercased.
    #[schema(example = "ada@example.org")]
    pub email: Option<String>,
    /// At least eight characters.
    #[schema(example = "correct horse battery")]
    pub password: Option<String>,
}

/// Login request body.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// E-mail address; stored lowercased.
    #[schema(example = "ada@example.org")]
    pub email: Option<String>,
    /// Plain-text password.
    #[schema(example = "correct horse battery")]
    pub password: Option<String>,
}

/// Public account details.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    /// Account id.
    #[schema(format = "uuid")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Normalized e-mail address.
    pub email: String,
    /// `admin` or `user`.
    #[schema(value_type = RoleSchema)]
    pub role: String,
}

impl From<&User> for AccountResponse {
    fn from(value: &User) -> Self {
        Self {
            id: value.id().to_string(),
            name: value.name().to_string(),
            email: value.email().to_string(),
            role: value.role().as_str().to_owned(),
        }
    }
}

/// Successful login payload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Bearer token for the `Authorization` header.
    pub token: String,
    /// The authenticated account.
    pub user: AccountResponse,
}

/// Create a standard account.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AccountResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let name = require(body.name, FieldName::new("name"))?;
    let email = require(body.email, FieldName::new("email"))?;
    let password = require(body.password, FieldName::new("password"))?;
    let details = RegistrationDetails::try_from_parts(&name, &email, &password)
        .map_err(|err| auth_validation_error(&err))?;

    let user = state.registration.register(&details).await?;
    Ok(HttpResponse::Created().json(AccountResponse::from(&user)))
}

/// Exchange credentials for a bearer token.
///
/// Unknown e-mails and wrong passwords both return the same `401`.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let body = payload.into_inner();
    let email = require(body.email, FieldName::new("email"))?;
    let password = require(body.password, FieldName::new("password"))?;
    let credentials = LoginCredentials::try_from_parts(&email, &password)
        .map_err(|err| auth_validation_error(&err))?;

    let outcome = state.login.login(&credentials).await?;
    Ok(web::Json(LoginResponse {
        user: AccountResponse::from(&outcome.user),
        token: outcome.token.into_inner(),
    }))
}
