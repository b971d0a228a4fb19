use thiserror::Error;

/// Errors raised outside the command path: persistence and host-side
/// administration. Player-facing validation never uses this type;
/// handlers answer with a corrective message instead.
#[derive(Debug, Error)]
pub enum GameError {
    /// Wrapper around IO errors (state file access, directory creation).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapper around JSON serialization and deserialization errors.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Returned when an operation targets a player or record that does not exist.
    #[error("record not found: {0}")]
    NotFound(String),

    /// Internal error (task join errors, closed channels, bad admin input)
    #[error("internal error: {0}")]
    Internal(String),
}
