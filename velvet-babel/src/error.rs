//! Error types for format operations

use std::fmt;

/// Errors that can occur during format operations
#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// Format not found in registry
    FormatNotFound(String),
    /// Error during serialization
    SerializationError(String),
    /// Format does not support the requested operation
    NotSupported(String),
    /// The input document violates the content-item envelope contract
    InvalidInput {
        /// Index of the offending content item, when the problem is item-local
        index: Option<usize>,
        message: String,
    },
    /// A content item declared a type this converter cannot map
    UnsupportedItemType { index: usize, item_type: String },
}

impl FormatError {
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        FormatError::InvalidInput {
            index: None,
            message: message.into(),
        }
    }

    pub(crate) fn invalid_item(index: usize, message: impl Into<String>) -> Self {
        FormatError::InvalidInput {
            index: Some(index),
            message: message.into(),
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::FormatNotFound(name) => write!(f, "Format '{name}' not found"),
            FormatError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            FormatError::NotSupported(msg) => write!(f, "Operation not supported: {msg}"),
            FormatError::InvalidInput {
                index: Some(index),
                message,
            } => write!(f, "Invalid input at content item {index}: {message}"),
            FormatError::InvalidInput {
                index: None,
                message,
            } => write!(f, "Invalid input: {message}"),
            FormatError::UnsupportedItemType { index, item_type } => {
                write!(
                    f,
                    "Unsupported content item type '{item_type}' at content item {index}"
                )
            }
        }
    }
}

impl std::error::Error for FormatError {}
