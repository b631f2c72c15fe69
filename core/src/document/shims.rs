#![deny(missing_docs)]

//! # Document Shims
//!
//! Intermediate deserialization layer for the parts of an OpenAPI document
//! whose ordering matters. Leaf objects (operations, parameters, responses,
//! schemas, components) reuse the `openapiv3` types as-is; paths and the
//! operations inside a path item are read into `IndexMap`s so the walk
//! sees them in document order.

use indexmap::IndexMap;
use openapiv3::{Components, Operation, Parameter, ReferenceOr, Server};
use serde::de::{Error as DeError, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// The HTTP verbs a path item can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpVerb {
    /// `get`
    Get,
    /// `put`
    Put,
    /// `post`
    Post,
    /// `delete`
    Delete,
    /// `options`
    Options,
    /// `head`
    Head,
    /// `patch`
    Patch,
    /// `trace`
    Trace,
}

impl HttpVerb {
    /// Maps a path item field name to a verb.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "get" => Some(Self::Get),
            "put" => Some(Self::Put),
            "post" => Some(Self::Post),
            "delete" => Some(Self::Delete),
            "options" => Some(Self::Options),
            "head" => Some(Self::Head),
            "patch" => Some(Self::Patch),
            "trace" => Some(Self::Trace),
            _ => None,
        }
    }

    /// Upper-case method name, as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Put => "PUT",
            Self::Post => "POST",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
            Self::Head => "HEAD",
            Self::Patch => "PATCH",
            Self::Trace => "TRACE",
        }
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Root of a parsed API description.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiDocument {
    /// OpenAPI version (e.g. "3.0.3").
    pub openapi: Option<String>,

    /// Swagger version, only read so legacy documents can be rejected clearly.
    pub swagger: Option<String>,

    /// Server list. The first entry provides the base URL.
    #[serde(default)]
    pub servers: Vec<Server>,

    /// Path items keyed by URL template, in document order.
    #[serde(default)]
    pub paths: ApiPaths,

    /// Reusable components used to resolve `$ref`s.
    #[serde(default)]
    pub components: Option<Components>,
}

/// The Paths Object. Specification extensions (`x-...`) are skipped.
#[derive(Debug, Clone, Default)]
pub struct ApiPaths {
    /// Path items keyed by URL template (e.g. `/users/{id}`).
    pub items: IndexMap<String, ApiPath>,
}

impl ApiPaths {
    /// Iterates `(template, path item)` pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ApiPath)> {
        self.items.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of path items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true when no path items are present.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'de> Deserialize<'de> for ApiPaths {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PathsVisitor;

        impl<'de> Visitor<'de> for PathsVisitor {
            type Value = ApiPaths;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of path templates to path items")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut items = IndexMap::new();
                while let Some(key) = map.next_key::<String>()? {
                    if key.starts_with("x-") {
                        map.next_value::<IgnoredAny>()?;
                        continue;
                    }
                    let item = map.next_value::<ApiPath>().map_err(|e| {
                        A::Error::custom(format!("Failed to parse path item '{}': {}", key, e))
                    })?;
                    items.insert(key, item);
                }
                Ok(ApiPaths { items })
            }
        }

        deserializer.deserialize_map(PathsVisitor)
    }
}

/// A Path Item: shared parameters plus operations keyed by verb.
#[derive(Debug, Clone, Default)]
pub struct ApiPath {
    /// Parameters that apply to every operation on this path.
    pub parameters: Vec<ReferenceOr<Parameter>>,
    /// Operations in the order they were declared.
    pub operations: IndexMap<HttpVerb, Operation>,
}

impl<'de> Deserialize<'de> for ApiPath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PathItemVisitor;

        impl<'de> Visitor<'de> for PathItemVisitor {
            type Value = ApiPath;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an OpenAPI path item")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut item = ApiPath::default();
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "parameters" => item.parameters = map.next_value()?,
                        "summary" | "description" | "servers" => {
                            map.next_value::<IgnoredAny>()?;
                        }
                        "$ref" => {
                            return Err(A::Error::custom(
                                "path item references are not supported",
                            ));
                        }
                        k if k.starts_with("x-") => {
                            map.next_value::<IgnoredAny>()?;
                        }
                        k => {
                            let verb = HttpVerb::from_key(k).ok_or_else(|| {
                                A::Error::custom(format!("unknown path item field '{}'", k))
                            })?;
                            let operation = map.next_value::<Operation>().map_err(|e| {
                                A::Error::custom(format!("operation '{}': {}", k, e))
                            })?;
                            item.operations.insert(verb, operation);
                        }
                    }
                }
                Ok(item)
            }
        }

        deserializer.deserialize_map(PathItemVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbs_keep_document_order() {
        let yaml = r#"
post: { responses: {} }
get: { responses: {} }
delete: { responses: {} }
"#;
        let item: ApiPath = serde_yaml::from_str(yaml).unwrap();
        let verbs: Vec<HttpVerb> = item.operations.keys().copied().collect();
        assert_eq!(verbs, vec![HttpVerb::Post, HttpVerb::Get, HttpVerb::Delete]);
    }

    #[test]
    fn test_paths_skip_extensions_and_keep_order() {
        let yaml = r#"
/zebras: { get: { responses: {} } }
x-internal: true
/apples: { get: { responses: {} } }
"#;
        let paths: ApiPaths = serde_yaml::from_str(yaml).unwrap();
        let keys: Vec<&str> = paths.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["/zebras", "/apples"]);
    }

    #[test]
    fn test_path_level_parameters_and_metadata() {
        let yaml = r#"
summary: A user
description: Single user resource
x-owner: team
parameters:
  - name: id
    in: path
    required: true
    schema: { type: string }
get: { responses: {} }
"#;
        let item: ApiPath = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(item.parameters.len(), 1);
        assert_eq!(item.operations.len(), 1);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let yaml = "fetch: { responses: {} }";
        let res: Result<ApiPath, _> = serde_yaml::from_str(yaml);
        assert!(res.unwrap_err().to_string().contains("unknown path item field 'fetch'"));
    }

    #[test]
    fn test_path_item_ref_is_rejected() {
        let yaml = "$ref: '#/components/pathItems/User'";
        let res: Result<ApiPath, _> = serde_yaml::from_str(yaml);
        assert!(res.is_err());
    }

    #[test]
    fn test_verb_display() {
        assert_eq!(HttpVerb::Patch.to_string(), "PATCH");
        assert_eq!(HttpVerb::from_key("trace"), Some(HttpVerb::Trace));
        assert_eq!(HttpVerb::from_key("GET"), None);
    }
}
