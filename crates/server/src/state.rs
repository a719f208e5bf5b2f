use std::sync::Arc;

use service::checkins::{CheckinStore, InMemoryCheckinStore};
use service::profiles::{InMemoryProfileStore, ProfileStore};

/// Stores shared by every handler. Built once at startup and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub profiles: Arc<dyn ProfileStore>,
    pub checkins: Arc<dyn CheckinStore>,
}

impl AppState {
    pub fn new(profiles: Arc<dyn ProfileStore>, checkins: Arc<dyn CheckinStore>) -> Self {
        Self { profiles, checkins }
    }

    /// Fresh, empty process-local stores.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryProfileStore::new()),
            Arc::new(InMemoryCheckinStore::new()),
        )
    }
}
