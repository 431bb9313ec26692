//! Application state for the rostering engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::SchemeLoader;
use crate::store::RosterStore;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers: the
/// loaded rate schedule and the store.
#[derive(Clone)]
pub struct AppState {
    /// The loaded funding-scheme rate schedule.
    scheme: Arc<SchemeLoader>,
    /// The tenant-scoped persistence layer.
    store: Arc<RosterStore>,
}

impl AppState {
    /// Creates a new application state with the given rate schedule and an
    /// empty store.
    pub fn new(scheme: SchemeLoader) -> Self {
        Self {
            scheme: Arc::new(scheme),
            store: Arc::new(RosterStore::new()),
        }
    }

    /// Returns a reference to the rate schedule.
    pub fn scheme(&self) -> &SchemeLoader {
        &self.scheme
    }

    /// Returns a reference to the store.
    pub fn store(&self) -> &RosterStore {
        &self.store
    }
}
