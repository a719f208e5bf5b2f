//! Process-wide helpers shared by the binary and the server crate.

pub mod logging;
