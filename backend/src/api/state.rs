//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on the repository port and remain testable without I/O.

use std::sync::Arc;

use crate::store::{InMemoryUserRepository, UserRepository};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// User persistence port.
    pub users: Arc<dyn UserRepository>,
}

impl HttpState {
    /// Build state around a repository adapter.
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// State backed by an empty in-memory repository.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryUserRepository::new()))
    }
}
