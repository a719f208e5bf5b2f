//! User identifier resolution for incoming payloads.

use std::fmt;

use serde_json::Value;

/// Key used when a payload carries no `user_id`.
pub const DEFAULT_USER_ID: &str = "demo";

/// Store key derived from a payload's `user_id`.
///
/// Path parameters are always strings, so they only ever address `Str` keys.
/// A `user_id` that is present but not a string (`5`, `true`, `null`, arrays,
/// objects) lands in `Json`, keyed by its JSON text. Those entries are kept
/// apart from string users and from `"demo"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UserKey {
    Str(String),
    Json(String),
}

impl UserKey {
    /// Key addressed by a `/{user_id}` path segment.
    pub fn path(user_id: &str) -> Self {
        Self::Str(user_id.to_string())
    }

    pub fn demo() -> Self {
        Self::Str(DEFAULT_USER_ID.to_string())
    }
}

impl fmt::Display for UserKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Json(j) => write!(f, "json:{j}"),
        }
    }
}

/// Resolve the store key for a payload.
///
/// Objects without a `user_id` member and non-object payloads map to
/// [`DEFAULT_USER_ID`].
pub fn resolve_user_id(payload: &Value) -> UserKey {
    match payload.get("user_id") {
        Some(Value::String(s)) => UserKey::Str(s.clone()),
        Some(other) => UserKey::Json(other.to_string()),
        None => UserKey::demo(),
    }
}

/// The empty object returned for unknown profiles.
pub fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}
