//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions so handlers only deal with
//! domain-friendly operations: a stable opaque visitor id and the coarse
//! role flag.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::Error;

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const ROLE_KEY: &str = "role";

/// Coarse per-session role flag.
///
/// Recorded when the visitor picks a side on the landing flow. Admin
/// endpoints require [`Role::Admin`]; nothing else is checked anywhere —
/// this is a role flag, not an authentication scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A complaint-submitting visitor.
    Student,
    /// A dashboard-operating administrator.
    Admin,
}

/// Newtype wrapper exposing higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Stable opaque identifier for the current visitor.
    ///
    /// Assigned lazily on first use and persisted in the session cookie, so
    /// repeated requests from the same browser observe the same id. This is
    /// the identifier the per-user like toggle is keyed by.
    pub fn user_id(&self) -> Result<String, Error> {
        if let Some(id) = self.0.get::<String>(USER_ID_KEY).map_err(read_failure)? {
            return Ok(id);
        }
        let id = Uuid::new_v4().to_string();
        self.0.insert(USER_ID_KEY, &id).map_err(write_failure)?;
        Ok(id)
    }

    /// Record the visitor's chosen role.
    pub fn set_role(&self, role: Role) -> Result<(), Error> {
        self.0.insert(ROLE_KEY, role).map_err(write_failure)
    }

    /// The recorded role, if the visitor has chosen one.
    pub fn role(&self) -> Result<Option<Role>, Error> {
        self.0.get::<Role>(ROLE_KEY).map_err(read_failure)
    }

    /// Require the admin role flag or fail with `403 Forbidden`.
    pub fn require_admin(&self) -> Result<(), Error> {
        match self.role()? {
            Some(Role::Admin) => Ok(()),
            _ => Err(Error::forbidden("admin role required")),
        }
    }

    /// Drop all session state, including the visitor id and role.
    pub fn clear(&self) {
        self.0.purge();
    }
}

fn read_failure(error: impl std::fmt::Display) -> Error {
    Error::internal(format!("failed to read session: {error}"))
}

fn write_failure(error: impl std::fmt::Display) -> Error {
    Error::internal(format!("failed to persist session: {error}"))
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
