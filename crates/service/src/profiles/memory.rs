use serde_json::Value;
use tracing::debug;

use super::ProfileStore;
use crate::payload::{empty_object, resolve_user_id, UserKey};
use crate::storage::memory_map_store::MemoryMapStore;

/// Process-local profile store keeping a map of `user_id -> profile`.
#[derive(Clone, Default)]
pub struct InMemoryProfileStore {
    store: MemoryMapStore<UserKey, Value>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn save(&self, profile: Value) -> Value {
        let user_id = resolve_user_id(&profile);
        let previous = self.store.insert(user_id.clone(), profile.clone()).await;
        debug!(%user_id, replaced = previous.is_some(), "profile saved");
        profile
    }

    async fn get(&self, user_id: &str) -> Value {
        self.store.get(&UserKey::path(user_id)).await.unwrap_or_else(empty_object)
    }
}
