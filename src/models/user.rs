use serde::{Deserialize, Serialize};

use crate::constants::ERR_USERNAME_REQUIRED;
use crate::error::{AppError, Result};

/// User record stored in redb
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    /// Exercise ids in the order they were logged
    pub log: Vec<String>,
}

/// User model for API responses
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
}

impl User {
    /// Validate that an id has the shape produced by [`generate_id`](super::generate_id)
    pub fn validate_id(id: &str) -> bool {
        id.len() == 32 && id.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f'))
    }

    /// Validate a submitted username, returning it unchanged when acceptable
    pub fn validate_username(raw: Option<&str>) -> Result<String> {
        match raw {
            Some(name) if !name.trim().is_empty() => Ok(name.to_string()),
            _ => Err(AppError::InvalidInput(ERR_USERNAME_REQUIRED.to_string())),
        }
    }
}
