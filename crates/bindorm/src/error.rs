//! Error types for bindorm

use thiserror::Error;

/// Result type alias for bindorm operations
pub type OrmResult<T> = Result<T, OrmError>;

/// Error types for statement construction
#[derive(Debug, Error)]
pub enum OrmError {
    /// `build` was called without any assignable
    #[error("no updated columns")]
    NoUpdatedColumns,

    /// An assignable that does not name a target column
    #[error("unsupported assignable type: {0}")]
    UnsupportedAssignableType(String),

    /// A field that is not part of the entity's metadata
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// An expression shape that cannot be rendered in its position
    #[error("unsupported expression: {0}")]
    UnsupportedExpression(String),

    /// The entity type could not be turned into table metadata
    #[error("invalid model {type_name}: {message}")]
    InvalidModel { type_name: String, message: String },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl OrmError {
    /// Create an unknown field error
    pub fn unknown_field(field: impl Into<String>) -> Self {
        Self::UnknownField(field.into())
    }

    /// Create an unsupported assignable error from the offending value
    pub fn unsupported_assignable(value: &impl std::fmt::Debug) -> Self {
        Self::UnsupportedAssignableType(format!("{value:?}"))
    }

    /// Create an unsupported expression error
    pub fn unsupported_expression(message: impl Into<String>) -> Self {
        Self::UnsupportedExpression(message.into())
    }

    /// Create an invalid model error for a specific type
    pub fn invalid_model(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidModel {
            type_name: type_name.into(),
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Check if this is a "no updated columns" error
    pub fn is_no_updated_columns(&self) -> bool {
        matches!(self, Self::NoUpdatedColumns)
    }

    /// Check if this is an unknown field error
    pub fn is_unknown_field(&self) -> bool {
        matches!(self, Self::UnknownField(_))
    }

    /// Check if this is an invalid model error
    pub fn is_invalid_model(&self) -> bool {
        matches!(self, Self::InvalidModel { .. })
    }
}
