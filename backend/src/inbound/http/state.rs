//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data`. It is
//! assembled by the composition root and injected; no handler reaches for a
//! global.

use std::sync::Arc;

use crate::domain::ComplaintStore;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// The process-wide complaint store.
    pub store: Arc<ComplaintStore>,
    /// Valid complaint categories. Maintained by the deployment and surfaced
    /// to clients verbatim; the store never validates against this list.
    pub categories: Arc<[String]>,
}

impl HttpState {
    /// Bundle the store with the deployment's category list.
    pub fn new(store: Arc<ComplaintStore>, categories: Vec<String>) -> Self {
        Self {
            store,
            categories: categories.into(),
        }
    }
}

/// The ten default campus categories.
pub fn default_categories() -> Vec<String> {
    [
        "Hostel",
        "Electrical",
        "Library",
        "Canteen",
        "Department",
        "Infrastructure",
        "Transportation",
        "Sports Facilities",
        "Academic",
        "Other",
    ]
    .into_iter()
    .map(str::to_owned)
    .collect()
}
