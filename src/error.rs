//! Error types for placement sessions, the template store, and configuration.

/// Failure reported by the host's document store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The store refused the template data.
    #[error("template rejected: {0}")]
    Rejected(String),

    /// The store could not be reached.
    #[error("template store unavailable: {0}")]
    Unavailable(String),
}

/// Why a placement did not produce a template, or why an operation was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    /// The user backed out. Not a failure; no template was created.
    #[error("placement cancelled")]
    Cancelled,

    /// Persisting the confirmed template failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The session was dropped before it settled.
    #[error("placement session dropped before settling")]
    Abandoned,

    /// `start` was called on a session that already left idle.
    #[error("placement session already started")]
    AlreadyStarted,

    /// The session is not accepting input.
    #[error("placement session is not active")]
    NotActive,

    /// Another session is already in progress.
    #[error("a placement session is already active")]
    SessionActive,
}

impl PlacementError {
    /// Whether this is a user-initiated abort rather than a failure.
    #[must_use]
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// A configuration value could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    Parse { var: &'static str, value: String },
}
