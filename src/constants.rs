/// Maximum exercise description length, in characters
pub const MAX_DESCRIPTION_CHARS: usize = 16;

/// Human-readable calendar date used in every response (e.g. "Mon Jan 01 2024")
pub const DISPLAY_DATE_FORMAT: &str = "%a %b %d %Y";

/// Echo text for a date bound that could not be parsed
pub const INVALID_DATE_DISPLAY: &str = "Invalid Date";

/// Accepted shape for an exercise date supplied on creation
pub const EXERCISE_DATE_PATTERN: &str = r"^[0-9]{4}[-/][0-9]{2}[-/][0-9]{2}$";

// =============================================================================
// Error Messages
// =============================================================================

/// Error message for a malformed user id in the request path
pub const ERR_INVALID_USER_ID: &str = "Invalid user ID format";

/// Error message for an exercise date that does not match the accepted pattern
pub const ERR_INVALID_DATE_FORMAT: &str = "Invalid date format";

pub const ERR_USERNAME_REQUIRED: &str = "Username is required";

pub const ERR_DESCRIPTION_REQUIRED: &str = "Description is required";

pub const ERR_DESCRIPTION_TOO_LONG: &str = "Description must be at most 16 characters";

pub const ERR_DURATION_REQUIRED: &str = "Duration is required";

pub const ERR_DURATION_NOT_POSITIVE: &str = "Duration must be a positive whole number";
