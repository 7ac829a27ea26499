//! Errors for the fallible edges of the crate: construction, config and
//! persistence. The per-frame simulation path never returns these.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PhysicsError {
    /// Shape parameters that cannot describe a real shape.
    #[error("invalid shape: {0}")]
    InvalidShape(String),

    /// A persisted collider kind discriminant that maps to no shape.
    #[error("unknown collider kind {0}")]
    UnknownColliderKind(i32),

    /// A persisted category discriminant outside the closed category set.
    #[error("unknown collider category {0}")]
    UnknownCategory(i32),

    /// A persisted body kind discriminant outside {dynamic, kinematic, static}.
    #[error("unknown body kind {0}")]
    UnknownBodyKind(i32),

    /// A persisted record whose fields do not match its declared kind.
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    #[error("invalid config value for `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PhysicsError>;
