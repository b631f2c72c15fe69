#![deny(missing_docs)]

//! # CRUD API Configuration
//!
//! The declarative description consumed by a CRUD mock server: where the API
//! lives, which data file backs it, and one action per API operation.
//!
//! Field names serialize in camelCase and optional fields are omitted, so the
//! rendered JSON can be loaded directly by the serving component.

pub mod render;

pub use render::render_json;

use serde::{Deserialize, Serialize};
use std::fmt;

/// JSON schema the rendered configuration conforms to.
pub const CRUD_API_SCHEMA: &str =
    "https://raw.githubusercontent.com/microsoft/dev-proxy/main/schemas/v0.23.0/crudapiplugin.schema.json";

/// The semantic role of an API operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CrudActionKind {
    /// Adds a record.
    Create,
    /// Returns the whole collection.
    #[default]
    GetAll,
    /// Returns the single record matching the query.
    GetOne,
    /// Returns every record matching the query.
    GetMany,
    /// Merges the request body into the matching record.
    Merge,
    /// Replaces the matching record.
    Update,
    /// Removes the matching record.
    Delete,
}

impl CrudActionKind {
    /// The method the serving component binds this action to by default.
    pub fn default_method(&self) -> &'static str {
        match self {
            Self::Create => "POST",
            Self::GetAll | Self::GetOne | Self::GetMany => "GET",
            Self::Merge => "PATCH",
            Self::Update => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for CrudActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Create => "create",
            Self::GetAll => "getAll",
            Self::GetOne => "getOne",
            Self::GetMany => "getMany",
            Self::Merge => "merge",
            Self::Update => "update",
            Self::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// Authentication required to call the mock API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CrudAuth {
    /// Anonymous access.
    #[default]
    None,
    /// Microsoft Entra issued bearer tokens.
    Entra,
}

impl CrudAuth {
    fn is_none(&self) -> bool {
        *self == CrudAuth::None
    }
}

/// Token validation settings used when `auth` is `entra`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntraAuthConfig {
    /// Expected `aud` claim.
    #[serde(default)]
    pub audience: String,
    /// Expected `iss` claim.
    #[serde(default)]
    pub issuer: String,
    /// Scopes of which at least one must be present.
    #[serde(default)]
    pub scopes: Vec<String>,
    /// Roles of which at least one must be present.
    #[serde(default)]
    pub roles: Vec<String>,
    /// Reject expired tokens.
    #[serde(default)]
    pub validate_lifetime: bool,
    /// Verify the token signature.
    #[serde(default)]
    pub validate_signing_key: bool,
}

/// One inferred action: a URL template bound to a CRUD archetype.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrudAction {
    /// The archetype.
    pub action: CrudActionKind,
    /// URL template relative to the base URL (e.g. `/users/{id}`).
    pub url: String,
    /// HTTP method, when it differs from the archetype's default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// JSONPath filter selecting the affected records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Per-action auth override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<CrudAuth>,
    /// Per-action Entra settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entra_auth_config: Option<EntraAuthConfig>,
}

impl CrudAction {
    /// Creates an action with no query and no overrides.
    pub fn new(action: CrudActionKind, url: impl Into<String>) -> Self {
        Self {
            action,
            url: url.into(),
            ..Default::default()
        }
    }

    /// Attaches a filter query.
    pub fn with_query(mut self, query: Option<String>) -> Self {
        self.query = query;
        self
    }

    /// The method the action answers to.
    pub fn effective_method(&self) -> &str {
        self.method
            .as_deref()
            .unwrap_or_else(|| self.action.default_method())
    }
}

/// The full mock API description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrudApiConfiguration {
    /// Format version of this file.
    #[serde(rename = "$schema")]
    pub schema: String,
    /// The API description the configuration was generated from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_file: Option<String>,
    /// URL the mock API is served under.
    pub base_url: String,
    /// JSON file holding the records.
    pub data_file: String,
    /// Actions in document order.
    pub actions: Vec<CrudAction>,
    /// Default authentication for all actions.
    #[serde(default, skip_serializing_if = "CrudAuth::is_none")]
    pub auth: CrudAuth,
    /// Entra settings, when `auth` is `entra`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entra_auth_config: Option<EntraAuthConfig>,
}

impl CrudApiConfiguration {
    /// Creates a configuration for `resource_name`, backed by `<resource_name>-data.json`.
    pub fn new(base_url: impl Into<String>, resource_name: &str, actions: Vec<CrudAction>) -> Self {
        Self {
            schema: CRUD_API_SCHEMA.to_string(),
            api_file: None,
            base_url: base_url.into(),
            data_file: data_file_name(resource_name),
            actions,
            auth: CrudAuth::None,
            entra_auth_config: None,
        }
    }
}

/// Name of the data file backing `resource_name`.
pub fn data_file_name(resource_name: &str) -> String {
    format!("{}-data.json", resource_name)
}
