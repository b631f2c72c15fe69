#![deny(missing_docs)]

//! # Action Inference
//!
//! Walks an API document and derives one CRUD action per operation.
//!
//! - **operation**: operation + effective parameters.
//! - **classifier**: operation -> CRUD archetype.
//! - **filter**: path parameters -> JSONPath record filter.

pub mod classifier;
pub mod filter;
pub mod operation;

pub use classifier::classify;
pub use filter::synthesize_filter;
pub use operation::ResolvedOperation;

use crate::config::{CrudAction, CrudApiConfiguration, CrudAuth, EntraAuthConfig};
use crate::document::{base_url, ApiDocument, ApiPath, HttpVerb};
use crate::error::AppResult;
use openapiv3::{Components, Operation};

/// Settings applied on top of what the document declares.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Resource name; the data file is `<resource_name>-data.json`.
    pub resource_name: String,
    /// Replaces the base URL taken from `servers`.
    pub base_url: Option<String>,
    /// Recorded as `apiFile` in the output.
    pub api_file: Option<String>,
    /// Protects the whole API with Entra tokens.
    pub entra_auth: Option<EntraAuthConfig>,
}

impl BuildOptions {
    /// Options with only a resource name.
    pub fn new(resource_name: impl Into<String>) -> Self {
        Self {
            resource_name: resource_name.into(),
            ..Default::default()
        }
    }
}

/// Builds the configuration for `document`.
///
/// Actions follow document order: paths first, then operations within a path.
/// The first classification error aborts the walk.
pub fn build_configuration(
    document: &ApiDocument,
    resource_name: &str,
) -> AppResult<CrudApiConfiguration> {
    build_configuration_with(document, &BuildOptions::new(resource_name))
}

/// Same as [`build_configuration`] with explicit [`BuildOptions`].
pub fn build_configuration_with(
    document: &ApiDocument,
    options: &BuildOptions,
) -> AppResult<CrudApiConfiguration> {
    let components = document.components.as_ref();

    let actions = document
        .paths
        .iter()
        .flat_map(|(template, item)| {
            item.operations
                .iter()
                .map(move |(verb, operation)| (template, item, *verb, operation))
        })
        .map(|(template, item, verb, operation)| {
            infer_action(template, item, verb, operation, components)
        })
        .collect::<AppResult<Vec<_>>>()?;

    let url = options
        .base_url
        .clone()
        .unwrap_or_else(|| base_url(&document.servers));

    let (auth, entra_auth_config) = match &options.entra_auth {
        Some(entra) => (CrudAuth::Entra, Some(entra.clone())),
        None => (CrudAuth::None, None),
    };

    let config = CrudApiConfiguration {
        api_file: options.api_file.clone(),
        auth,
        entra_auth_config,
        ..CrudApiConfiguration::new(url, &options.resource_name, actions)
    };

    tracing::info!(
        actions = config.actions.len(),
        base_url = %config.base_url,
        data_file = %config.data_file,
        "inferred CRUD API configuration"
    );
    Ok(config)
}

/// Derives the action for a single operation.
pub fn infer_action(
    template: &str,
    item: &ApiPath,
    verb: HttpVerb,
    operation: &Operation,
    components: Option<&Components>,
) -> AppResult<CrudAction> {
    let op = ResolvedOperation::new(template, item, verb, operation, components)?;
    let kind = classify(&op, components)?;
    let query = synthesize_filter(op.path_parameters(), components)?;

    tracing::debug!(%verb, path = template, action = ?kind, query = ?query, "inferred action");
    Ok(CrudAction::new(kind, template).with_query(query))
}
