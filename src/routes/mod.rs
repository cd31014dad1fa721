pub mod exercises;
pub mod health;
pub mod index;
pub mod logs;
pub mod payload;
pub mod users;

pub use exercises::add_exercise;
pub use health::health_check;
pub use index::index;
pub use logs::user_logs;
pub use payload::{Payload, text_or_number};
pub use users::{create_user, list_users};

use axum::{
    Router,
    routing::{get, post},
};

use crate::AppState;

/// All API routes, without transport layers (CORS, tracing)
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/api/users", post(create_user).get(list_users))
        .route("/api/users/:id/exercises", post(add_exercise))
        .route("/api/users/:id/logs", get(user_logs))
        .with_state(state)
}
