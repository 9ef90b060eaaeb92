use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolverError {
    #[error("Identifier `{0}` is not a parsable ARK identifier")]
    MalformedIdentifier(String),
    #[error("Unsupported shoulder `{shoulder}` of ARK {ark}")]
    NoResponsibleMapper { ark: String, shoulder: String },
    #[error("Unregistered ARK identifier `{0}`")]
    UnknownIdentifier(String),
    #[error("Invalid NAAN in `{ark}` (supported {expected})")]
    AuthorityMismatch { ark: String, expected: String },
    #[error("Unsupported metadata format: {0}")]
    UnsupportedFormat(String),
    #[error("Mapper unavailable: {0}")]
    MapperUnavailable(String),
    #[error("Backing store `{}` is corrupt: {reason}", .path.display())]
    BackingStoreCorrupt { path: PathBuf, reason: String },
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Response category a front end maps a failure onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    ClientError,
    NotFound,
    Internal,
}

impl ResolverError {
    pub fn class(&self) -> ErrorClass {
        match self {
            ResolverError::MalformedIdentifier(_) | ResolverError::UnsupportedFormat(_) => {
                ErrorClass::ClientError
            }
            ResolverError::NoResponsibleMapper { .. } | ResolverError::UnknownIdentifier(_) => {
                ErrorClass::NotFound
            }
            ResolverError::AuthorityMismatch { .. }
            | ResolverError::MapperUnavailable(_)
            | ResolverError::BackingStoreCorrupt { .. }
            | ResolverError::IoError(_)
            | ResolverError::JsonError(_)
            | ResolverError::ConfigError(_) => ErrorClass::Internal,
        }
    }
}

impl ErrorClass {
    /// HTTP status an HTTP front end answers with.
    pub fn status_code(self) -> u16 {
        match self {
            ErrorClass::ClientError => 400,
            ErrorClass::NotFound => 404,
            ErrorClass::Internal => 500,
        }
    }

    pub fn exit_code(self) -> i32 {
        match self {
            ErrorClass::ClientError => 2,
            ErrorClass::NotFound => 3,
            ErrorClass::Internal => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ErrorClass::ClientError => "invalid request",
            ErrorClass::NotFound => "not found",
            ErrorClass::Internal => "internal error",
        }
    }
}
