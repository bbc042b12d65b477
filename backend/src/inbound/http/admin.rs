//! Administrative endpoints: dashboard statistics and status transitions.
//!
//! Both endpoints require the session's role flag to be `admin`. The flag
//! is the whole of the authorisation story; there are no accounts behind it.

use actix_web::{HttpResponse, get, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Complaint, ComplaintStats, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_status;

/// Dashboard payload: aggregate counters plus the full listing.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    /// Aggregate counters over the whole store.
    pub stats: ComplaintStats,
    /// Every complaint, newest first.
    pub complaints: Vec<Complaint>,
}

/// Body for the status update endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    /// Target status token: `Pending`, `InProgress` or `Resolved`.
    #[schema(example = "InProgress")]
    pub status: String,
}

/// Admin dashboard: statistics and the complete complaint list.
#[utoipa::path(
    get,
    path = "/api/v1/admin/dashboard",
    responses(
        (status = 200, description = "Statistics and complaints", body = DashboardResponse),
        (status = 403, description = "Admin role flag missing", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminDashboard"
)]
#[get("/admin/dashboard")]
pub async fn dashboard(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<DashboardResponse>> {
    session.require_admin()?;
    Ok(web::Json(DashboardResponse {
        stats: state.store.stats(),
        complaints: state.store.list_all(),
    }))
}

/// Overwrite a complaint's status.
///
/// Any status may replace any other; repeating the current status is a
/// no-op that still succeeds.
#[utoipa::path(
    put,
    path = "/api/v1/admin/complaints/{id}/status",
    params(("id" = u64, Path, description = "Complaint id")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 204, description = "Status updated"),
        (status = 400, description = "Unparseable status token", body = Error),
        (status = 403, description = "Admin role flag missing", body = Error),
        (status = 404, description = "No such complaint", body = Error)
    ),
    tags = ["admin"],
    operation_id = "updateComplaintStatus"
)]
#[put("/admin/complaints/{id}/status")]
pub async fn update_status(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<u64>,
    payload: web::Json<UpdateStatusRequest>,
) -> ApiResult<HttpResponse> {
    session.require_admin()?;
    let status = parse_status("status", &payload.status)?;
    state.store.update_status(path.into_inner(), status)?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test, web};
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::{ComplaintDraft, ComplaintStore, Status};
    use crate::inbound::http::roles::select_role;
    use crate::inbound::http::state::default_categories;
    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};

    fn seeded_state() -> web::Data<HttpState> {
        let store = ComplaintStore::new();
        store.create(ComplaintDraft {
            title: "Broken light".to_owned(),
            category: "Electrical".to_owned(),
            description: "Out on floor 2".to_owned(),
            student_name: "Student".to_owned(),
            is_anonymous: false,
        });
        web::Data::new(HttpState::new(Arc::new(store), default_categories()))
    }

    fn test_app(
        state: web::Data<HttpState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().app_data(state).wrap(test_session_middleware()).service(
            web::scope("/api/v1")
                .service(dashboard)
                .service(update_status)
                .service(select_role),
        )
    }

    async fn admin_cookie(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
    ) -> Cookie<'static> {
        let res = actix_test::call_service(
            app,
            actix_test::TestRequest::post()
                .uri("/api/v1/session/role")
                .set_json(json!({ "role": "admin" }))
                .to_request(),
        )
        .await;
        session_cookie(&res).expect("session cookie issued")
    }

    #[actix_web::test]
    async fn dashboard_is_gated_on_the_admin_flag() {
        let app = actix_test::init_service(test_app(seeded_state())).await;

        let anonymous = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/admin/dashboard")
                .to_request(),
        )
        .await;
        assert_eq!(anonymous.status(), StatusCode::FORBIDDEN);

        let cookie = admin_cookie(&app).await;
        let allowed = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/admin/dashboard")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(allowed.status(), StatusCode::OK);
        let payload: Value = actix_test::read_body_json(allowed).await;
        assert_eq!(
            payload.get("stats").and_then(|s| s.get("totalComplaints")),
            Some(&json!(1))
        );
        assert_eq!(
            payload
                .get("complaints")
                .and_then(Value::as_array)
                .map(Vec::len),
            Some(1)
        );
    }

    #[actix_web::test]
    async fn student_sessions_cannot_update_status() {
        let app = actix_test::init_service(test_app(seeded_state())).await;
        let chose_student = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/session/role")
                .set_json(json!({ "role": "student" }))
                .to_request(),
        )
        .await;
        let cookie = session_cookie(&chose_student).expect("session cookie issued");

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri("/api/v1/admin/complaints/1/status")
                .cookie(cookie)
                .set_json(json!({ "status": "Resolved" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn admins_can_move_status_in_any_direction() {
        let state = seeded_state();
        let app = actix_test::init_service(test_app(state.clone())).await;
        let cookie = admin_cookie(&app).await;

        for target in ["Resolved", "Pending", "InProgress"] {
            let res = actix_test::call_service(
                &app,
                actix_test::TestRequest::put()
                    .uri("/api/v1/admin/complaints/1/status")
                    .cookie(cookie.clone())
                    .set_json(json!({ "status": target }))
                    .to_request(),
            )
            .await;
            assert_eq!(res.status(), StatusCode::NO_CONTENT);
        }
        let stored = state.store.complaint(1).expect("stored complaint");
        assert_eq!(stored.status, Status::InProgress);
    }

    #[actix_web::test]
    async fn bad_status_tokens_and_unknown_ids_are_rejected() {
        let app = actix_test::init_service(test_app(seeded_state())).await;
        let cookie = admin_cookie(&app).await;

        let bad_token = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri("/api/v1/admin/complaints/1/status")
                .cookie(cookie.clone())
                .set_json(json!({ "status": "Escalated" }))
                .to_request(),
        )
        .await;
        assert_eq!(bad_token.status(), StatusCode::BAD_REQUEST);

        let unknown = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri("/api/v1/admin/complaints/9/status")
                .cookie(cookie)
                .set_json(json!({ "status": "Resolved" }))
                .to_request(),
        )
        .await;
        assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
    }
}
