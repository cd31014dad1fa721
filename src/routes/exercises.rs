use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::constants::ERR_INVALID_USER_ID;
use crate::db::store;
use crate::error::{AppError, Result};
use crate::models::{NewExercise, User, display_date};
use crate::routes::{Payload, text_or_number};

#[derive(Debug, Deserialize)]
pub struct AddExerciseRequest {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub duration: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AddExerciseResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub description: String,
    pub duration: u32,
    pub date: String,
}

/// Log an exercise against a user
///
/// POST /api/users/{id}/exercises
///
/// The body is validated before anything is written: description 1-16 characters,
/// a positive whole duration, and an optional `YYYY-MM-DD` / `YYYY/MM/DD` date
/// (today, UTC, when omitted).
pub async fn add_exercise(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Payload(payload): Payload<AddExerciseRequest>,
) -> Result<Json<AddExerciseResponse>> {
    if !User::validate_id(&user_id) {
        return Err(AppError::InvalidInput(ERR_INVALID_USER_ID.to_string()));
    }

    let exercise = NewExercise::validate(
        payload.description.as_deref(),
        payload.duration.as_deref(),
        payload.date.as_deref(),
    )?;

    let db = state.db.clone();
    let today = Utc::now().date_naive();
    let (user, record) = tokio::task::spawn_blocking(move || {
        store::add_exercise(&db, &user_id, exercise, today)
    })
    .await??;

    Ok(Json(AddExerciseResponse {
        id: user.id,
        username: user.username,
        description: record.description,
        duration: record.duration,
        date: display_date(record.date),
    }))
}
