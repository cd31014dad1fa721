use axum::{Json, extract::State};
use serde::Deserialize;

use crate::AppState;
use crate::db::store;
use crate::error::Result;
use crate::models::User;
use crate::routes::Payload;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub username: Option<String>,
}

/// Register a new user
///
/// POST /api/users
///
/// Returns `{_id, username}`. Usernames are unique; a taken one is a 409.
pub async fn create_user(
    State(state): State<AppState>,
    Payload(payload): Payload<CreateUserRequest>,
) -> Result<Json<User>> {
    let username = User::validate_username(payload.username.as_deref())?;

    let db = state.db.clone();
    let user = tokio::task::spawn_blocking(move || store::create_user(&db, &username)).await??;

    Ok(Json(user))
}

/// List every user as `{_id, username}`, oldest first
///
/// GET /api/users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>> {
    let db = state.db.clone();
    let users = tokio::task::spawn_blocking(move || store::list_users(&db)).await??;

    tracing::debug!("Listing {} users", users.len());

    Ok(Json(users))
}
