use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::constants::ERR_INVALID_USER_ID;
use crate::db::store;
use crate::error::{AppError, Result};
use crate::log_query::{LogEntry, LogQuery, LogView};
use crate::models::User;

/// Query parameters for the log endpoint; all optional, all raw text
#[derive(Debug, Default, Deserialize)]
pub struct LogParams {
    pub from: Option<String>,
    pub to: Option<String>,
    pub limit: Option<String>,
}

/// Log response envelope
///
/// `from` and `to` are left out entirely unless the request supplied them.
#[derive(Debug, Serialize, PartialEq)]
pub struct LogResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    pub count: usize,
    pub log: Vec<LogEntry>,
}

impl LogResponse {
    /// Start from the fields every response carries
    pub fn builder(user: User) -> LogResponseBuilder {
        LogResponseBuilder {
            id: user.id,
            username: user.username,
            from: None,
            to: None,
            log: Vec::new(),
        }
    }
}

#[derive(Debug)]
pub struct LogResponseBuilder {
    id: String,
    username: String,
    from: Option<String>,
    to: Option<String>,
    log: Vec<LogEntry>,
}

impl LogResponseBuilder {
    pub fn with_from(mut self, from: Option<String>) -> Self {
        self.from = from;
        self
    }

    pub fn with_to(mut self, to: Option<String>) -> Self {
        self.to = to;
        self
    }

    pub fn with_log(mut self, log: Vec<LogEntry>) -> Self {
        self.log = log;
        self
    }

    /// Echoed bounds and entries of an engine result
    pub fn with_view(self, view: LogView) -> Self {
        self.with_from(view.from).with_to(view.to).with_log(view.log)
    }

    /// `count` is always derived from the entries
    pub fn build(self) -> LogResponse {
        LogResponse {
            id: self.id,
            username: self.username,
            from: self.from,
            to: self.to,
            count: self.log.len(),
            log: self.log,
        }
    }
}

/// Filtered view of a user's exercise log
///
/// GET /api/users/{id}/logs?from=&to=&limit=
///
/// Bounds are inclusive and either may be omitted. `limit` keeps the first N matching
/// entries in logging order. Malformed filter values never fail the request: an
/// unreadable date matches nothing, an unusable limit is ignored.
pub async fn user_logs(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    params: std::result::Result<Query<LogParams>, QueryRejection>,
) -> Result<Json<LogResponse>> {
    let Query(params) =
        params.map_err(|rejection| AppError::InvalidInput(rejection.body_text()))?;

    if !User::validate_id(&user_id) {
        return Err(AppError::InvalidInput(ERR_INVALID_USER_ID.to_string()));
    }

    let query = LogQuery::from_params(
        params.from.as_deref(),
        params.to.as_deref(),
        params.limit.as_deref(),
    );

    let db = state.db.clone();
    let (user, resolutions) =
        tokio::task::spawn_blocking(move || store::load_user_log(&db, &user_id)).await??;

    let view = query.apply(resolutions);
    if view.unresolved > 0 {
        tracing::warn!(
            "User {} has {} dangling log references",
            user.id,
            view.unresolved
        );
    }

    Ok(Json(LogResponse::builder(user).with_view(view).build()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn alice() -> User {
        User {
            id: "0190f3b6c2a47b3e8d3c5a1e2f4b6d8a".to_string(),
            username: "alice".to_string(),
        }
    }

    fn entry() -> LogEntry {
        LogEntry {
            description: "swim".to_string(),
            duration: 45,
            date: "Mon Jan 01 2024".to_string(),
        }
    }

    #[test]
    fn test_required_fields_only() {
        let response = LogResponse::builder(alice()).build();
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(
            value,
            json!({
                "_id": "0190f3b6c2a47b3e8d3c5a1e2f4b6d8a",
                "username": "alice",
                "count": 0,
                "log": []
            })
        );
    }

    #[test]
    fn test_only_requested_bounds_appear() {
        let response = LogResponse::builder(alice())
            .with_from(Some("Mon Jan 01 2024".to_string()))
            .with_log(vec![entry()])
            .build();
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["from"], "Mon Jan 01 2024");
        assert!(value.get("to").is_none());
        assert_eq!(value["count"], 1);
    }

    #[test]
    fn test_key_order() {
        let response = LogResponse::builder(alice())
            .with_from(Some("Mon Jan 01 2024".to_string()))
            .with_to(Some("Tue Jan 02 2024".to_string()))
            .build();
        let text = serde_json::to_string(&response).unwrap();

        let positions: Vec<usize> = ["\"_id\"", "\"username\"", "\"from\"", "\"to\"", "\"count\"", "\"log\""]
            .iter()
            .map(|key| text.find(key).unwrap())
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_count_follows_entries() {
        let response = LogResponse::builder(alice())
            .with_log(vec![entry(), entry()])
            .build();
        assert_eq!(response.count, 2);
    }
}
