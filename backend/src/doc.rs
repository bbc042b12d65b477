//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: all HTTP endpoints of the inbound layer (complaints, admin,
//!   session, health)
//! - **Schemas**: the domain and request/response types the endpoints
//!   exchange
//! - **Security**: the session cookie scheme the role-gated admin endpoints
//!   rely on
//!
//! The generated specification backs Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Comment, Complaint, ComplaintStats, Error, ErrorCode, Status};
use crate::inbound::http::admin::{DashboardResponse, UpdateStatusRequest};
use crate::inbound::http::complaints::{
    ComplaintDetail, LikeResponse, NewCommentRequest, NewComplaintRequest,
};
use crate::inbound::http::roles::SelectRoleRequest;
use crate::inbound::http::session::Role;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie carrying the visitor id and role flag.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Campus complaint desk API",
        description = "HTTP interface for submitting, discussing, and administering student complaints."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::complaints::list_complaints,
        crate::inbound::http::complaints::get_complaint,
        crate::inbound::http::complaints::create_complaint,
        crate::inbound::http::complaints::toggle_like,
        crate::inbound::http::complaints::add_comment,
        crate::inbound::http::complaints::list_categories,
        crate::inbound::http::admin::dashboard,
        crate::inbound::http::admin::update_status,
        crate::inbound::http::roles::select_role,
        crate::inbound::http::roles::logout,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Complaint,
        Comment,
        Status,
        ComplaintStats,
        ComplaintDetail,
        LikeResponse,
        NewComplaintRequest,
        NewCommentRequest,
        DashboardResponse,
        UpdateStatusRequest,
        SelectRoleRequest,
        Role,
        Error,
        ErrorCode,
    )),
    tags(
        (name = "complaints", description = "Submitting and discussing complaints"),
        (name = "admin", description = "Dashboard and status administration"),
        (name = "session", description = "Role selection and logout"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
