//! Serde error types for the value bridge.

use std::fmt::Display;

use crate::error::DecodeError;

/// Error type for serde serialization/deserialization operations.
#[derive(Debug, thiserror::Error)]
pub enum SerdeError {
    /// The value tree holds a different kind than the target type asked for.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// The type cannot be represented as a `Value`.
    #[error("unsupported type: {0}")]
    UnsupportedType(&'static str),

    /// `None` outside of a struct field or map value.
    #[error("none cannot be represented outside a struct field or map value")]
    BareNone,

    /// Error while decoding the byte graph.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Custom error message.
    #[error("{0}")]
    Custom(String),
}

impl SerdeError {
    pub(crate) fn mismatch(expected: &'static str, actual: &crate::Value) -> Self {
        SerdeError::TypeMismatch {
            expected,
            actual: actual.type_name(),
        }
    }
}

impl serde::ser::Error for SerdeError {
    fn custom<T: Display>(msg: T) -> Self {
        SerdeError::Custom(msg.to_string())
    }
}

impl serde::de::Error for SerdeError {
    fn custom<T: Display>(msg: T) -> Self {
        SerdeError::Custom(msg.to_string())
    }
}
