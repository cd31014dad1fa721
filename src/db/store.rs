//! Record store operations
//!
//! Synchronous redb access. Handlers call these from `spawn_blocking`.

use chrono::NaiveDate;
use redb::{Database, ReadOnlyTable, ReadableDatabase, ReadableTable};
use serde::{Serialize, de::DeserializeOwned};

use super::{BINCODE_CONFIG, tables};
use crate::error::{AppError, Result};
use crate::log_query::{ExerciseSource, Resolution, resolve_log};
use crate::models::{ExerciseRecord, NewExercise, User, UserRecord, generate_id};

/// Register a new user with a unique username
pub fn create_user(db: &Database, username: &str) -> Result<User> {
    let id = generate_id();

    let write_txn = db.begin_write()?;
    {
        let mut usernames = write_txn.open_table(tables::USERNAMES)?;
        if usernames.get(username)?.is_some() {
            tracing::info!("Username already taken: {}", username);
            return Err(AppError::UserAlreadyExists);
        }
        usernames.insert(username, id.as_str())?;
        drop(usernames);

        let mut users = write_txn.open_table(tables::USERS)?;
        let record = UserRecord {
            username: username.to_string(),
            log: Vec::new(),
        };
        users.insert(id.as_str(), encode(&record)?.as_slice())?;
    }
    write_txn.commit()?;

    tracing::info!("New user registered: {}", id);

    Ok(User {
        id,
        username: username.to_string(),
    })
}

/// All users in creation order
pub fn list_users(db: &Database) -> Result<Vec<User>> {
    let read_txn = db.begin_read()?;
    let users = read_txn.open_table(tables::USERS)?;

    let mut result = Vec::new();
    for entry in users.iter()? {
        let (key, value) = entry?;
        let record: UserRecord = decode(value.value())?;
        result.push(User {
            id: key.value().to_string(),
            username: record.username,
        });
    }

    Ok(result)
}

/// Fetch a single user by id
pub fn find_user(db: &Database, user_id: &str) -> Result<User> {
    let read_txn = db.begin_read()?;
    let users = read_txn.open_table(tables::USERS)?;
    let record = read_user(&users, user_id)?;

    Ok(User {
        id: user_id.to_string(),
        username: record.username,
    })
}

/// Persist an exercise and append it to the user's log in one transaction
pub fn add_exercise(
    db: &Database,
    user_id: &str,
    exercise: NewExercise,
    today: NaiveDate,
) -> Result<(User, ExerciseRecord)> {
    let exercise_id = generate_id();
    let record = exercise.into_record(today);

    let write_txn = db.begin_write()?;
    let username = {
        let mut users = write_txn.open_table(tables::USERS)?;
        let mut user_record: UserRecord = match users.get(user_id)? {
            Some(bytes) => decode(bytes.value())?,
            None => {
                tracing::warn!("Exercise for non-existent user: {}", user_id);
                return Err(AppError::UserNotFound);
            }
        };

        let mut exercises = write_txn.open_table(tables::EXERCISES)?;
        exercises.insert(exercise_id.as_str(), encode(&record)?.as_slice())?;

        user_record.log.push(exercise_id.clone());
        users.insert(user_id, encode(&user_record)?.as_slice())?;

        user_record.username
    };
    write_txn.commit()?;

    tracing::info!("Exercise {} logged for user {}", exercise_id, user_id);

    Ok((
        User {
            id: user_id.to_string(),
            username,
        },
        record,
    ))
}

/// Fetch a user together with every log reference resolved, in log order.
///
/// Both reads happen in one read transaction so the log and the exercises agree.
pub fn load_user_log(db: &Database, user_id: &str) -> Result<(User, Vec<Resolution>)> {
    let read_txn = db.begin_read()?;
    let users = read_txn.open_table(tables::USERS)?;
    let record = read_user(&users, user_id)?;

    let exercises = ExerciseTable(read_txn.open_table(tables::EXERCISES)?);
    let resolutions = resolve_log(&exercises, &record.log)?;

    Ok((
        User {
            id: user_id.to_string(),
            username: record.username,
        },
        resolutions,
    ))
}

/// Exercises table opened inside a read transaction
pub struct ExerciseTable(ReadOnlyTable<&'static str, &'static [u8]>);

impl ExerciseSource for ExerciseTable {
    fn resolve(&self, id: &str) -> Result<Resolution> {
        Ok(match self.0.get(id)? {
            Some(bytes) => Resolution::Resolved(decode(bytes.value())?),
            None => Resolution::Unresolved(id.to_string()),
        })
    }
}

fn read_user(users: &ReadOnlyTable<&'static str, &'static [u8]>, user_id: &str) -> Result<UserRecord> {
    users
        .get(user_id)?
        .map(|bytes| decode(bytes.value()))
        .transpose()?
        .ok_or(AppError::UserNotFound)
}

fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    Ok(bincode::serde::encode_to_vec(value, BINCODE_CONFIG)?)
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let (value, _) = bincode::serde::decode_from_slice(bytes, BINCODE_CONFIG)?;
    Ok(value)
}
