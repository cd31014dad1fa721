use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_path: String,
    /// Allowed CORS origins; `*` allows any origin
    pub allowed_origins: Vec<String>,
    pub environment: String,
    /// Attach the tower-http trace layer to every request
    pub log_requests: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if it exists (development)
        dotenvy::dotenv().ok();

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        // SERVER_PORT wins; PORT is what most hosting platforms inject
        let server_port = env::var("SERVER_PORT")
            .or_else(|_| env::var("PORT"))
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| "Invalid SERVER_PORT")?;

        let database_path = env::var("DATABASE_PATH")
            .unwrap_or_else(|_| "./data/exercise-tracker.db".to_string());

        let allowed_origins = parse_origins(
            &env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string()),
        );

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let log_requests = match env::var("LOG_REQUESTS") {
            Ok(value) => parse_flag(&value).ok_or("Invalid LOG_REQUESTS")?,
            Err(_) => false,
        };

        Ok(Config {
            server_host,
            server_port,
            database_path,
            allowed_origins,
            environment,
            log_requests,
        })
    }

    /// Get server address as string
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Whether CORS should accept requests from any origin
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|origin| origin == "*")
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
