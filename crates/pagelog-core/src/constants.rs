/// pagelog version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Key under which the session identifier is persisted in the session store.
pub const SESSION_ID_KEY: &str = "log_session_id";

/// Length of a generated fingerprint.
pub const FINGERPRINT_LEN: usize = 32;

/// Minimum width of the base-36 hash inside a fingerprint.
pub const FINGERPRINT_HASH_WIDTH: usize = 10;

/// Action target used when neither an id nor a tag/form name is known.
pub const UNKNOWN_TARGET: &str = "unknown";

/// Substituted for device profile fields the host cannot provide.
pub const UNKNOWN_FIELD: &str = "unknown";

/// Content type of every outbound request body.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Header carrying the user id on every outbound request.
pub const USER_ID_HEADER: &str = "X-Pagelog-User";
