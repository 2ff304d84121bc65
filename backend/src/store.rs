//! User persistence port and the in-process adapter backing the users routes.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::schema::{SchemaError, User};

/// Persistence errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query {
        /// Adapter-specific description.
        message: String,
    },
}

impl RepositoryError {
    /// Build a [`RepositoryError::Query`].
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Change applied to a stored user while the repository holds it exclusively.
pub type UserChange = Box<dyn FnOnce(User) -> Result<User, SchemaError> + Send>;

/// Failures of [`UserRepository::update`].
#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    /// No user has the requested identifier.
    #[error("user {id} not found")]
    NotFound {
        /// Requested identifier.
        id: i64,
    },
    /// The change produced an invalid user.
    #[error(transparent)]
    Rejected(#[from] SchemaError),
    /// The adapter failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// One window of stored users together with the store size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPage {
    /// Users in ascending id order.
    pub users: Vec<User>,
    /// Number of users held by the store.
    pub total: usize,
}

/// Port for user persistence adapters.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Reserve the identifier for the next user.
    async fn next_id(&self) -> Result<i64, RepositoryError>;

    /// Insert or replace a user record.
    async fn save(&self, user: &User) -> Result<(), RepositoryError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError>;

    /// List users ordered by id, skipping `skip` and returning at most `limit`.
    async fn list(&self, skip: usize, limit: usize) -> Result<UserPage, RepositoryError>;

    /// Replace a user with `change(current)`, atomically with respect to
    /// other writers. The stored record is untouched when `change` fails.
    async fn update(&self, id: i64, change: UserChange) -> Result<User, UpdateError>;
}

/// Users held in process memory; identifiers start at 1.
#[derive(Debug)]
pub struct InMemoryUserRepository {
    users: RwLock<BTreeMap<i64, User>>,
    last_id: AtomicI64,
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self {
            users: RwLock::new(BTreeMap::new()),
            last_id: AtomicI64::new(0),
        }
    }
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn next_id(&self) -> Result<i64, RepositoryError> {
        let previous = self.last_id.fetch_add(1, Ordering::SeqCst);
        previous
            .checked_add(1)
            .ok_or_else(|| RepositoryError::query("user identifiers exhausted"))
    }

    async fn save(&self, user: &User) -> Result<(), RepositoryError> {
        self.users.write().await.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn list(&self, skip: usize, limit: usize) -> Result<UserPage, RepositoryError> {
        let users = self.users.read().await;
        Ok(UserPage {
            users: users.values().skip(skip).take(limit).cloned().collect(),
            total: users.len(),
        })
    }

    async fn update(&self, id: i64, change: UserChange) -> Result<User, UpdateError> {
        let mut users = self.users.write().await;
        let current = users
            .get(&id)
            .cloned()
            .ok_or(UpdateError::NotFound { id })?;
        let updated = change(current)?;
        users.insert(id, updated.clone());
        Ok(updated)
    }
}
