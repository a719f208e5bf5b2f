use axum::{extract::{Path, State}, Json};
use serde_json::Value;

use crate::state::AppState;

/// Store a profile under its `user_id` and echo it back.
pub async fn save_profile(
    State(state): State<AppState>,
    Json(profile): Json<Value>,
) -> Json<Value> {
    Json(state.profiles.save(profile).await)
}

/// Stored profile for `user_id`, or `{}`.
pub async fn get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Json<Value> {
    Json(state.profiles.get(&user_id).await)
}
