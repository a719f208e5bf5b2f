//! Service layer holding the profile and check-in stores.
//! - Stores are explicit components owned by whoever builds the app state.
//! - Payloads are opaque `serde_json::Value` documents, echoed back verbatim.
//! - Each store serializes writes through a single `RwLock`.

pub mod payload;
pub mod storage;
pub mod profiles;
pub mod checkins;
