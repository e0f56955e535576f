//! Unified error type for dyna.
//!
//! Schema-shape failures ([`Error::InvalidArgument`], [`Error::UnknownEntity`],
//! [`Error::UnrelatedEntity`]) are raised locally before any backend call.
//! Backend failures are boxed into [`Error::Backend`] and passed through as-is.

/// Unified error type covering all failure modes of the mapping layer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An argument was empty or otherwise unusable (e.g. a record without
    /// its identifier attribute).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The entity name is not declared in the model.
    #[error("'{0}' not found in model")]
    UnknownEntity(String),

    /// `list` was invoked with a type that is not declared as related.
    #[error("'{related}' has no '{entity}'")]
    UnrelatedEntity {
        /// The entity type being listed.
        entity: String,
        /// The type the listing was scoped by.
        related: String,
    },

    /// A key read back from the backend did not have the `name#id` shape.
    #[error("Malformed key: {0}")]
    MalformedKey(String),

    /// The key-value backend failed.
    #[error("Backend error: {source}")]
    Backend {
        /// The underlying backend error.
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl Error {
    /// Convenience constructor for [`Error::InvalidArgument`].
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    /// Convenience constructor for [`Error::UnknownEntity`].
    pub fn unknown_entity(name: impl Into<String>) -> Self {
        Error::UnknownEntity(name.into())
    }

    /// Convenience constructor for [`Error::UnrelatedEntity`].
    pub fn unrelated(entity: impl Into<String>, related: impl Into<String>) -> Self {
        Error::UnrelatedEntity {
            entity: entity.into(),
            related: related.into(),
        }
    }

    /// Convenience constructor for [`Error::Backend`].
    pub fn backend(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Error::Backend {
            source: source.into(),
        }
    }

    /// True for errors detected locally from the declared schema.
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidArgument(_) | Error::UnknownEntity(_) | Error::UnrelatedEntity { .. }
        )
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
