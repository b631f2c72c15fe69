#![deny(missing_docs)]

//! # crudgen Core
//!
//! Derives a CRUD mock API configuration from an OpenAPI document: each
//! operation is classified as create/read/update/delete, and operations on
//! identified paths get a JSONPath filter selecting their records.

/// Shared error types.
pub mod error;

/// OpenAPI document model and loading.
pub mod document;

/// Classification of operations into CRUD actions.
pub mod inference;

/// Output configuration model and rendering.
pub mod config;

pub use config::{
    render_json, CrudAction, CrudActionKind, CrudApiConfiguration, CrudAuth, EntraAuthConfig,
    CRUD_API_SCHEMA,
};
pub use document::{parse_api_document, ApiDocument, ApiPath, HttpVerb};
pub use error::{AppError, AppResult};
pub use inference::{build_configuration, build_configuration_with, BuildOptions};

/// Parses `content` and builds its configuration in one step.
pub fn generate_configuration(
    content: &str,
    options: &BuildOptions,
) -> AppResult<CrudApiConfiguration> {
    let document = parse_api_document(content)?;
    build_configuration_with(&document, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_configuration() {
        let yaml = r#"
openapi: 3.0.0
paths:
  /orders:
    post: { responses: {} }
"#;
        let config = generate_configuration(yaml, &BuildOptions::new("orders")).unwrap();
        assert_eq!(config.actions[0].action, CrudActionKind::Create);
        assert_eq!(config.data_file, "orders-data.json");
    }

    #[test]
    fn test_generate_configuration_invalid_document() {
        let res = generate_configuration("swagger: '2.0'", &BuildOptions::new("orders"));
        assert!(matches!(res, Err(AppError::InvalidDocument(_))));
    }
}
