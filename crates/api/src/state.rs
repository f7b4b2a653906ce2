use std::sync::Arc;

use issuelog_core::gate::JournalGate;
use issuelog_core::store::{JournalStore, PermissionOracle};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Journal persistence.
    pub journals: Arc<dyn JournalStore>,
    /// Per-project permission lookups.
    pub permissions: Arc<dyn PermissionOracle>,
    /// Database pool, absent when running on in-memory stores.
    pub pool: Option<issuelog_db::DbPool>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Gate over this state's store and oracle, for one request.
    pub fn gate(&self) -> JournalGate<'_> {
        JournalGate::new(self.journals.as_ref(), self.permissions.as_ref())
    }
}
