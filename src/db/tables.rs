use redb::TableDefinition;

/// Users table: user_id -> UserRecord (serialized)
pub const USERS: TableDefinition<&str, &[u8]> = TableDefinition::new("users");

/// Username index: username -> user_id
/// Enforces username uniqueness
pub const USERNAMES: TableDefinition<&str, &str> = TableDefinition::new("usernames");

/// Exercises table: exercise_id -> ExerciseRecord (serialized)
pub const EXERCISES: TableDefinition<&str, &[u8]> = TableDefinition::new("exercises");
