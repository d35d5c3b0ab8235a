//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every handler under `inbound::http`, the request and
//! response bodies they use, and the schema wrappers for domain types. The
//! document is served by Swagger UI in debug builds and printed by the
//! `openapi-dump` binary.

use crate::inbound::http::accounts::{AccountResponse, LoginRequest, LoginResponse, RegisterRequest};
use crate::inbound::http::complaints::{
    AdminComplaintResponseBody, ComplaintOwnerBody, ComplaintResponseBody,
    CreateComplaintRequestBody, FeedbackRequestBody, FeedbackResponseBody,
    UpdateStatusRequestBody,
};
use crate::inbound::http::schemas::{
    CategorySchema, ComplaintStatusSchema, ErrorCodeSchema, ErrorSchema, RoleSchema,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the bearer scheme referenced by handler `security` attributes.
pub const BEARER_SCHEME: &str = "BearerAuth";

/// Adds the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .description(Some("Token issued by POST /api/auth/login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Complaint tracker API",
        description = "Citizen complaint submission, triage and feedback."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login,
        crate::inbound::http::complaints::list_all_complaints,
        crate::inbound::http::complaints::list_my_complaints,
        crate::inbound::http::complaints::create_complaint,
        crate::inbound::http::complaints::update_complaint_status,
        crate::inbound::http::complaints::submit_feedback,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        CategorySchema,
        ComplaintStatusSchema,
        RoleSchema,
        RegisterRequest,
        LoginRequest,
        AccountResponse,
        LoginResponse,
        CreateComplaintRequestBody,
        UpdateStatusRequestBody,
        FeedbackRequestBody,
        FeedbackResponseBody,
        ComplaintResponseBody,
        ComplaintOwnerBody,
        AdminComplaintResponseBody,
    )),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "complaints", description = "Complaint lifecycle"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn object_fields(name: &str) -> Vec<String> {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        match schemas.get(name).expect("schema registered") {
            RefOr::T(Schema::Object(obj)) => obj.properties.keys().cloned().collect(),
            _ => panic!("expected object schema for {name}"),
        }
    }

    #[rstest]
    fn error_schema_is_camel_case() {
        // utoipa replaces :: with . in schema names
        let fields = object_fields("crate.domain.Error");
        for field in ["code", "message", "traceId", "details"] {
            assert!(fields.iter().any(|f| f == field), "missing {field}");
        }
    }

    #[rstest]
    fn complaint_body_exposes_wire_names() {
        let fields = object_fields("ComplaintResponseBody");
        for field in ["id", "category", "status", "user", "createdAt", "updatedAt"] {
            assert!(fields.iter().any(|f| f == field), "missing {field}");
        }
    }

    #[rstest]
    #[case("/api/complaints")]
    #[case("/api/complaints/all")]
    #[case("/api/complaints/{id}/status")]
    #[case("/api/complaints/{id}/feedback")]
    #[case("/api/auth/login")]
    #[case("/health/ready")]
    fn every_route_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key(BEARER_SCHEME));
    }
}
