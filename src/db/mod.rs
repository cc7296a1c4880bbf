use async_trait::async_trait;

use crate::error::Result;
use crate::models::User;

pub mod memory;

pub use memory::InMemoryUserStore;

/// Lookup-by-username collaborator backing authentication.
///
/// Implementations resolve usernames by exact, case-sensitive match and must
/// support concurrent reads: the lookup sits on the hot path of every
/// authenticated request.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Resolve a username to its identity record.
    /// Returns `UserNotFound` when no record matches.
    async fn find_by_username(&self, username: &str) -> Result<User>;

    /// Persist a new identity record.
    /// Returns `UsernameTaken` when the username is already registered.
    async fn insert(&self, user: User) -> Result<User>;
}
