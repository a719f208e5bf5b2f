//! Storage abstractions for service layer
//!
//! Process-local maps shared by the profile and check-in stores.

pub mod memory_map_store;
