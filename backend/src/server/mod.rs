//! Server construction and middleware wiring.
//!
//! The composition root: assembles the session middleware, mounts every
//! endpoint, and owns the only call to [`HealthState::mark_ready`].

mod config;
#[cfg(test)]
mod tests;

pub use config::ServerConfig;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::admin::{dashboard, update_status};
use crate::inbound::http::complaints::{
    add_comment, create_complaint, get_complaint, list_categories, list_complaints, toggle_like,
};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::roles::{logout, select_role};
use crate::inbound::http::state::HttpState;
use crate::middleware::Trace;

/// Build the HTTP server and mark the health state ready.
///
/// The returned [`Server`] has been bound but not started; `await` it to
/// serve. Session cookies are signed with `config.key` and scoped to the
/// whole site so the visitor id survives navigation between the public and
/// admin surfaces.
///
/// # Errors
/// Returns [`std::io::Error`] when binding the listener fails.
pub fn create_server(
    state: HttpState,
    health_state: web::Data<HealthState>,
    config: ServerConfig,
    #[cfg(feature = "metrics")] prometheus: actix_web_prom::PrometheusMetrics,
) -> std::io::Result<Server> {
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
    } = config;
    let state = web::Data::new(state);
    // Clone for the server factory so the readiness probe stays reachable.
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        let session = SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
            .cookie_name("session".into())
            .cookie_path("/".into())
            .cookie_secure(cookie_secure)
            .cookie_http_only(true)
            .cookie_same_site(same_site)
            .build();

        let api = web::scope("/api/v1")
            .wrap(session)
            .service(list_complaints)
            .service(get_complaint)
            .service(create_complaint)
            .service(toggle_like)
            .service(add_comment)
            .service(list_categories)
            .service(dashboard)
            .service(update_status)
            .service(select_role)
            .service(logout);

        let mut app = App::new()
            .app_data(state.clone())
            .app_data(server_health_state.clone())
            .wrap(Trace)
            .service(api)
            .service(ready)
            .service(live);

        #[cfg(debug_assertions)]
        {
            app = app
                .service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
        }

        #[cfg(feature = "metrics")]
        let app = app.wrap(prometheus.clone());

        app
    })
    .bind(bind_addr)?;

    health_state.mark_ready();
    Ok(server.run())
}
