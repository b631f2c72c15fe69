//! # Action Classifier
//!
//! Maps an operation to its CRUD archetype. Side-effecting verbs map
//! directly; for GET the shape of the `2XX` response decides between a
//! single record and a collection.

use crate::config::CrudActionKind;
use crate::document::{resolve, resolve_boxed, HttpVerb};
use crate::error::{AppError, AppResult};
use crate::inference::operation::ResolvedOperation;
use openapiv3::{Components, ReferenceOr, Schema, SchemaKind, StatusCode, Type};

/// Response class used to pick the success payload.
const SUCCESS_STATUS: StatusCode = StatusCode::Range(2);

/// Property holding the items of an envelope-wrapped collection.
const ENVELOPE_PROPERTY: &str = "value";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RootType {
    Array,
    Object,
    Other,
}

/// Determines the archetype of `op`.
///
/// # Errors
///
/// * `UnsupportedOperation` for OPTIONS, HEAD and TRACE.
/// * `MissingSuccessResponse` for a GET with path parameters and no `2XX` response.
/// * `UnresolvedReference` when the response or its schema cannot be resolved.
pub fn classify(
    op: &ResolvedOperation<'_>,
    components: Option<&Components>,
) -> AppResult<CrudActionKind> {
    match op.verb {
        HttpVerb::Post => Ok(CrudActionKind::Create),
        HttpVerb::Patch => Ok(CrudActionKind::Merge),
        HttpVerb::Put => Ok(CrudActionKind::Update),
        HttpVerb::Delete => Ok(CrudActionKind::Delete),
        HttpVerb::Get => classify_read(op, components),
        verb => Err(AppError::UnsupportedOperation {
            verb: verb.to_string(),
            path: op.path.to_string(),
        }),
    }
}

fn classify_read(
    op: &ResolvedOperation<'_>,
    components: Option<&Components>,
) -> AppResult<CrudActionKind> {
    // no identifiers in the path: the whole collection
    if op.path_parameters().next().is_none() {
        return Ok(CrudActionKind::GetAll);
    }

    let response = op
        .operation
        .responses
        .responses
        .get(&SUCCESS_STATUS)
        .ok_or_else(|| AppError::MissingSuccessResponse {
            operation: op.label(),
        })?;
    let response = resolve(response, components)?;

    let Some(schema) = response
        .content
        .values()
        .next()
        .and_then(|media| media.schema.as_ref())
    else {
        return Ok(CrudActionKind::GetOne);
    };
    let schema = resolve(schema, components)?;

    let kind = match root_type(schema) {
        RootType::Array => CrudActionKind::GetMany,
        RootType::Object => match object_property(schema, ENVELOPE_PROPERTY) {
            Some(value) => match root_type(resolve_boxed(value, components)?) {
                RootType::Array => CrudActionKind::GetMany,
                _ => CrudActionKind::GetOne,
            },
            None => CrudActionKind::GetOne,
        },
        RootType::Other => CrudActionKind::GetOne,
    };
    Ok(kind)
}

fn root_type(schema: &Schema) -> RootType {
    match &schema.schema_kind {
        SchemaKind::Type(Type::Array(_)) => RootType::Array,
        SchemaKind::Type(Type::Object(_)) => RootType::Object,
        SchemaKind::Any(any) => match any.typ.as_deref() {
            Some("array") => RootType::Array,
            Some("object") => RootType::Object,
            _ => RootType::Other,
        },
        _ => RootType::Other,
    }
}

fn object_property<'a>(schema: &'a Schema, name: &str) -> Option<&'a ReferenceOr<Box<Schema>>> {
    match &schema.schema_kind {
        SchemaKind::Type(Type::Object(object)) => object.properties.get(name),
        SchemaKind::Any(any) => any.properties.get(name),
        _ => None,
    }
}
