//! Profile storage: one JSON document per user, last write wins.

use async_trait::async_trait;
use serde_json::Value;

mod memory;

pub use memory::InMemoryProfileStore;

/// Trait abstraction for profile storage.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Store `profile` under its resolved `user_id`, replacing any previous
    /// profile. Returns the stored document unchanged.
    async fn save(&self, profile: Value) -> Value;

    /// The stored profile, or `{}` when the user has none.
    async fn get(&self, user_id: &str) -> Value;
}
