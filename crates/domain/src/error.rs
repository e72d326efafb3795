//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`DoseHubError`] via `#[from]` or an explicit `From` impl.

/// Top-level error shared by the application and adapter layers.
#[derive(Debug, thiserror::Error)]
pub enum DoseHubError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error(transparent)]
    Conflict(#[from] ConflictError),

    #[error(transparent)]
    MissingElement(#[from] MissingElementError),

    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// A domain invariant was violated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("device type must not be empty")]
    EmptyDeviceType,

    #[error("unknown device type `{0}`")]
    UnknownDeviceType(String),

    #[error("version must not be empty")]
    EmptyVersion,

    #[error("serial number must not be empty")]
    EmptySerialNumber,

    #[error("version {version} belongs to `{actual}`, not `{expected}`")]
    VersionTypeMismatch {
        version: String,
        expected: String,
        actual: String,
    },

    #[error("invalid identifier `{0}`")]
    InvalidId(String),
}

/// A lookup by identifier found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// A uniqueness constraint would be broken.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} `{key}` already exists")]
pub struct ConflictError {
    pub entity: &'static str,
    pub key: String,
}

/// An element expected in the host document is absent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("element `{id}` is missing from the document")]
pub struct MissingElementError {
    pub id: String,
}
