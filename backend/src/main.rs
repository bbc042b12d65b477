//! Backend entry-point: wires the complaint store, sessions, and the HTTP
//! server together.

use std::env;
use std::sync::Arc;

use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use backend::domain::ComplaintStore;
use backend::inbound::http::health::HealthState;
use backend::inbound::http::state::{HttpState, default_categories};
use backend::server::{ServerConfig, create_server};

/// `Key::derive_from` needs enough input material to be meaningful.
const SESSION_KEY_MIN_LEN: usize = 64;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let key = load_session_key()?;
    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .map(|v| v != "0")
        .unwrap_or(true);

    let store = Arc::new(ComplaintStore::new());
    let state = HttpState::new(store, default_categories());
    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(key, cookie_secure, SameSite::Lax, ([0, 0, 0, 0], 8080).into());

    #[cfg(feature = "metrics")]
    let server = create_server(state, health_state, config, make_metrics()?)?;
    #[cfg(not(feature = "metrics"))]
    let server = create_server(state, health_state, config)?;

    server.await
}

/// Load the cookie signing key, falling back to an ephemeral key only where
/// losing every session on restart is acceptable.
fn load_session_key() -> std::io::Result<Key> {
    let key_path =
        env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
    match std::fs::read(&key_path) {
        Ok(bytes) if bytes.len() >= SESSION_KEY_MIN_LEN => Ok(Key::derive_from(&bytes)),
        Ok(bytes) => Err(std::io::Error::other(format!(
            "session key at {key_path} is {} bytes; need at least {SESSION_KEY_MIN_LEN}",
            bytes.len()
        ))),
        Err(e) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read session key at {key_path}: {e}"
                )))
            }
        }
    }
}

#[cfg(feature = "metrics")]
fn make_metrics() -> std::io::Result<actix_web_prom::PrometheusMetrics> {
    actix_web_prom::PrometheusMetricsBuilder::new("complaint_desk")
        .endpoint("/metrics")
        .build()
        .map_err(|e| std::io::Error::other(format!("configure Prometheus metrics: {e}")))
}
