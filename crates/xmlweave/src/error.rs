//! Error types for xmlweave

use std::fmt;
use thiserror::Error;

/// Error kind for detailed categorization
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// A document-level operation needed a root element and none was set
    MissingRoot,
    /// A field's value cannot be rendered under its declared policy
    UnmappableField { type_name: String, field: String },
    /// A transformed field named a transform the registry does not hold
    UnknownTransform { name: String },
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRoot => write!(f, "document has no root element"),
            Self::UnmappableField { type_name, field } => {
                write!(f, "unmappable field `{field}` on `{type_name}`")
            }
            Self::UnknownTransform { name } => write!(f, "unknown transform: {name}"),
        }
    }
}

/// Main error type for xmlweave
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    message: String,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        let message = kind.to_string();
        Self { kind, message }
    }

    pub fn with_message(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Result type alias for xmlweave
pub type Result<T> = std::result::Result<T, Error>;
