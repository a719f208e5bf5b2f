//! Check-in storage: an append-only list of JSON documents per user.

use async_trait::async_trait;
use serde_json::Value;

mod memory;

pub use memory::InMemoryCheckinStore;

/// Trait abstraction for check-in storage.
#[async_trait]
pub trait CheckinStore: Send + Sync {
    /// Append `checkin` to the list for its resolved `user_id` and return it.
    async fn create(&self, checkin: Value) -> Value;

    /// All check-ins for `user_id` in insertion order; empty when none exist.
    async fn list(&self, user_id: &str) -> Vec<Value>;
}
