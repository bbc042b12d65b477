//! Tests for server bootstrap: configuration and readiness signalling.

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use rstest::{fixture, rstest};

use super::{ServerConfig, create_server};
use crate::domain::ComplaintStore;
use crate::inbound::http::health::HealthState;
use crate::inbound::http::state::{HttpState, default_categories};

#[fixture]
fn state() -> HttpState {
    HttpState::new(Arc::new(ComplaintStore::new()), default_categories())
}

#[fixture]
fn health_state() -> web::Data<HealthState> {
    web::Data::new(HealthState::new())
}

#[fixture]
fn config() -> ServerConfig {
    let addr: SocketAddr = ([127, 0, 0, 1], 0).into();
    ServerConfig::new(Key::generate(), false, SameSite::Lax, addr)
}

#[rstest]
fn config_reports_its_bind_address(config: ServerConfig) {
    assert!(config.bind_addr().ip().is_loopback());
}

#[cfg(not(feature = "metrics"))]
#[rstest]
#[actix_rt::test]
async fn create_server_marks_readiness(
    state: HttpState,
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) {
    assert!(!health_state.is_ready(), "state should start unready");

    let _server =
        create_server(state, health_state.clone(), config).expect("server should build");

    assert!(
        health_state.is_ready(),
        "server creation should mark readiness"
    );
}

#[cfg(feature = "metrics")]
#[rstest]
#[actix_rt::test]
async fn create_server_marks_readiness_with_metrics(
    state: HttpState,
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) {
    let prometheus = actix_web_prom::PrometheusMetricsBuilder::new("test")
        .endpoint("/metrics")
        .build()
        .expect("metrics should build for tests");

    assert!(!health_state.is_ready(), "state should start unready");

    let _server = create_server(state, health_state.clone(), config, prometheus)
        .expect("server should build");

    assert!(
        health_state.is_ready(),
        "server creation should mark readiness"
    );
}
