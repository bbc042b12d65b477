//! Session role selection and logout, mirroring the landing-page flow of
//! the original application.

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::{Role, SessionContext};

/// Body for `POST /api/v1/session/role`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SelectRoleRequest {
    /// Chosen role: `student` or `admin`.
    pub role: Role,
}

/// Record the visitor's role on the session.
#[utoipa::path(
    post,
    path = "/api/v1/session/role",
    request_body = SelectRoleRequest,
    responses(
        (status = 204, description = "Role recorded"),
        (status = 400, description = "Unknown role token", body = Error)
    ),
    tags = ["session"],
    operation_id = "selectRole",
    security([])
)]
#[post("/session/role")]
pub async fn select_role(
    session: SessionContext,
    payload: web::Json<SelectRoleRequest>,
) -> ApiResult<HttpResponse> {
    session.set_role(payload.role)?;
    Ok(HttpResponse::NoContent().finish())
}

/// Clear the session: visitor id, role, everything.
#[utoipa::path(
    post,
    path = "/api/v1/session/logout",
    responses(
        (status = 204, description = "Session cleared")
    ),
    tags = ["session"],
    operation_id = "logout",
    security([])
)]
#[post("/session/logout")]
pub async fn logout(session: SessionContext) -> ApiResult<HttpResponse> {
    session.clear();
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test, web};
    use serde_json::json;

    use super::*;
    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};

    fn test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().wrap(test_session_middleware()).service(
            web::scope("/api/v1")
                .service(select_role)
                .service(logout)
                .route(
                    "/whoami",
                    web::get().to(|session: SessionContext| async move {
                        let role = session.role()?;
                        Ok::<_, crate::domain::Error>(
                            actix_web::HttpResponse::Ok().json(json!({ "role": role })),
                        )
                    }),
                ),
        )
    }

    #[actix_web::test]
    async fn roles_round_trip_through_the_session() {
        let app = actix_test::init_service(test_app()).await;

        let selected = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/session/role")
                .set_json(json!({ "role": "admin" }))
                .to_request(),
        )
        .await;
        assert_eq!(selected.status(), StatusCode::NO_CONTENT);
        let cookie = session_cookie(&selected).expect("session cookie issued");

        let whoami = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/whoami")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let payload: serde_json::Value = actix_test::read_body_json(whoami).await;
        assert_eq!(payload, json!({ "role": "admin" }));
    }

    #[actix_web::test]
    async fn unknown_role_tokens_are_rejected() {
        let app = actix_test::init_service(test_app()).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/session/role")
                .set_json(json!({ "role": "janitor" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn logout_clears_the_session_cookie() {
        let app = actix_test::init_service(test_app()).await;

        let selected = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/session/role")
                .set_json(json!({ "role": "student" }))
                .to_request(),
        )
        .await;
        let cookie = session_cookie(&selected).expect("session cookie issued");

        let logged_out = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/session/logout")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(logged_out.status(), StatusCode::NO_CONTENT);
        let removal = session_cookie(&logged_out).expect("removal cookie issued");
        assert!(removal.value().is_empty(), "purge should blank the cookie");
    }
}
