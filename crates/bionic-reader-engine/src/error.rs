use thiserror::Error;

/// Errors raised at the engine's configuration boundary.
///
/// Rewriting and navigation never fail on unexpected tree shapes or missing
/// host data; those degrade to "nothing to do". Only values that would break
/// the emphasis arithmetic are rejected, and only when they enter the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("{name} must be between {min} and {max}, got {value}")]
    InvalidSetting {
        name: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
}

/// Failures reported by the host while acting on navigation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("Failed to create page \"{title}\": {reason}")]
    CreateFailed { title: String, reason: String },

    #[error("Failed to open block {uid}: {reason}")]
    OpenFailed { uid: String, reason: String },
}
