#![deny(missing_docs)]

//! # API Document Model
//!
//! - **shims**: order-preserving deserialization of paths and operations.
//! - **refs**: `$ref` resolution against `components`.
//! - **servers**: base URL derivation.

pub mod refs;
pub mod servers;
pub mod shims;

pub use refs::{resolve, resolve_boxed};
pub use servers::base_url;
pub use shims::{ApiDocument, ApiPath, ApiPaths, HttpVerb};

use crate::error::{AppError, AppResult};

/// Parses an OpenAPI 3.x document from YAML or JSON text.
///
/// Swagger 2.0 documents and documents without a version field are rejected.
pub fn parse_api_document(content: &str) -> AppResult<ApiDocument> {
    let document: ApiDocument = serde_yaml::from_str(content)
        .map_err(|e| AppError::InvalidDocument(format!("Failed to parse OpenAPI YAML: {}", e)))?;

    match (&document.openapi, &document.swagger) {
        (Some(version), _) if version.starts_with("3.") => {}
        (Some(version), _) => {
            return Err(AppError::InvalidDocument(format!(
                "Unsupported OpenAPI version: {}. Only 3.x is supported.",
                version
            )));
        }
        (None, Some(version)) => {
            return Err(AppError::InvalidDocument(format!(
                "Swagger {} documents are not supported. Convert to OpenAPI 3.x first.",
                version
            )));
        }
        (None, None) => {
            return Err(AppError::InvalidDocument(
                "missing 'openapi' version field.".into(),
            ));
        }
    }

    tracing::debug!(paths = document.paths.len(), "parsed API document");
    Ok(document)
}
