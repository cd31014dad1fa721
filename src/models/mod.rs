pub mod exercise;
pub mod user;

pub use exercise::{ExerciseRecord, NewExercise, display_date};
pub use user::{User, UserRecord};

use uuid::Uuid;

/// Fresh opaque identifier: time-ordered, 32 lowercase hex characters
pub fn generate_id() -> String {
    Uuid::now_v7().simple().to_string()
}
