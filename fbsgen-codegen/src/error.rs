//! Error types for schema generation.

use thiserror::Error;

/// Error type for schema generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Protocol parsing error.
    #[error("protocol parse error: {0}")]
    Parse(#[from] fbsgen_schema::ParseError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A field references an enum with no default in the merged map.
    #[error("missing enum default: enum '{enum_name}' used by field '{field}' of '{message}'")]
    MissingEnumDefault {
        /// Enum name.
        enum_name: String,
        /// Field name.
        field: String,
        /// Message name.
        message: String,
    },

    /// Unknown type token.
    #[error("unknown type '{type_name}' in field '{field}'")]
    UnknownType {
        /// Type name.
        type_name: String,
        /// Field name.
        field: String,
    },

    /// Array syntax that cannot be expressed as a single-level vector.
    #[error("unsupported array type '{type_name}' in field '{field}'")]
    InvalidArrayType {
        /// Type name.
        type_name: String,
        /// Field name.
        field: String,
    },
}

impl CodegenError {
    /// Creates an unknown type error.
    pub fn unknown_type(type_name: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnknownType {
            type_name: type_name.into(),
            field: field.into(),
        }
    }

    /// Returns true if this is the fatal missing-default lookup failure.
    #[must_use]
    pub fn is_missing_default(&self) -> bool {
        matches!(self, Self::MissingEnumDefault { .. })
    }
}
