//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// Inference failures are structural properties of the input document,
/// so none of them are retried and no partial configuration is produced.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// An HTTP verb outside GET/POST/PUT/PATCH/DELETE was found on a path.
    #[from(ignore)]
    #[display("{verb} is not a supported operation type (path '{path}')")]
    UnsupportedOperation {
        /// The offending verb, upper-cased.
        verb: String,
        /// The path template the operation belongs to.
        path: String,
    },

    /// A GET operation with path parameters has no `2XX` response.
    #[from(ignore)]
    #[display("Couldn't find successful response for operation {operation}")]
    MissingSuccessResponse {
        /// The operation summary, or `VERB path` when it has none.
        operation: String,
    },

    /// A `$ref` that does not point at an existing local component.
    #[from(ignore)]
    #[display("Unresolved reference: {_0}")]
    UnresolvedReference(String),

    /// The document could not be read as an OpenAPI 3.x description.
    #[from(ignore)]
    #[display("Invalid OpenAPI document: {_0}")]
    InvalidDocument(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_io_conversion() {
        let io_err = Error::new(ErrorKind::NotFound, "missing.yml");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
    }

    #[test]
    fn test_string_conversion() {
        let msg = String::from("something wrong");
        let app_err: AppError = msg.into();
        match app_err {
            AppError::General(s) => assert_eq!(s, "something wrong"),
            _ => panic!("String should convert to AppError::General"),
        }
    }

    #[test]
    fn test_unsupported_operation_names_verb() {
        let err = AppError::UnsupportedOperation {
            verb: "HEAD".into(),
            path: "/users".into(),
        };
        assert_eq!(
            err.to_string(),
            "HEAD is not a supported operation type (path '/users')"
        );
    }

    #[test]
    fn test_missing_success_response_names_operation() {
        let err = AppError::MissingSuccessResponse {
            operation: "Get user by id".into(),
        };
        assert!(err.to_string().ends_with("for operation Get user by id"));
    }
}
