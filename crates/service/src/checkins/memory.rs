use serde_json::Value;
use tracing::debug;

use super::CheckinStore;
use crate::payload::{resolve_user_id, UserKey};
use crate::storage::memory_map_store::MemoryMapStore;

/// Process-local check-in store keeping a map of `user_id -> [checkin]`.
///
/// Lists are unbounded and never shrink.
#[derive(Clone, Default)]
pub struct InMemoryCheckinStore {
    store: MemoryMapStore<UserKey, Vec<Value>>,
}

impl InMemoryCheckinStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl CheckinStore for InMemoryCheckinStore {
    async fn create(&self, checkin: Value) -> Value {
        let user_id = resolve_user_id(&checkin);
        let entry = checkin.clone();
        let count = self
            .store
            .update_entry(user_id.clone(), move |list| {
                list.push(entry);
                list.len()
            })
            .await;
        debug!(%user_id, count, "checkin appended");
        checkin
    }

    async fn list(&self, user_id: &str) -> Vec<Value> {
        self.store.get(&UserKey::path(user_id)).await.unwrap_or_default()
    }
}
