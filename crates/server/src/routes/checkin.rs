use axum::{extract::{Path, State}, Json};
use serde_json::Value;

use crate::state::AppState;

/// Append a check-in to its user's list and echo it back.
pub async fn create_checkin(
    State(state): State<AppState>,
    Json(checkin): Json<Value>,
) -> Json<Value> {
    Json(state.checkins.create(checkin).await)
}

/// Every check-in for `user_id` in the order it was posted.
pub async fn list_checkins(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Json<Vec<Value>> {
    Json(state.checkins.list(&user_id).await)
}
