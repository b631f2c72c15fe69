#![deny(missing_docs)]

//! # Reference Resolution
//!
//! Resolves local `$ref`s (`#/components/{section}/{name}`) against the
//! document's `components`. External documents are never fetched; a `$ref`
//! into another file is reported as unresolved.

use crate::error::{AppError, AppResult};
use openapiv3::{Components, Parameter, ReferenceOr, Response, Schema};
use percent_encoding::percent_decode_str;

/// Reference chains longer than this are treated as cycles.
const MAX_REF_HOPS: usize = 32;

/// A component type that can be looked up by name in `components`.
pub trait Component: Sized {
    /// The `components` section holding this type (e.g. `schemas`).
    const SECTION: &'static str;

    /// Returns the named entry of this section.
    fn lookup<'a>(components: &'a Components, name: &str) -> Option<&'a ReferenceOr<Self>>;
}

impl Component for Schema {
    const SECTION: &'static str = "schemas";

    fn lookup<'a>(components: &'a Components, name: &str) -> Option<&'a ReferenceOr<Self>> {
        components.schemas.get(name)
    }
}

impl Component for Parameter {
    const SECTION: &'static str = "parameters";

    fn lookup<'a>(components: &'a Components, name: &str) -> Option<&'a ReferenceOr<Self>> {
        components.parameters.get(name)
    }
}

impl Component for Response {
    const SECTION: &'static str = "responses";

    fn lookup<'a>(components: &'a Components, name: &str) -> Option<&'a ReferenceOr<Self>> {
        components.responses.get(name)
    }
}

/// Returns the inline item, following `$ref` chains through `components`.
pub fn resolve<'a, T: Component>(
    item: &'a ReferenceOr<T>,
    components: Option<&'a Components>,
) -> AppResult<&'a T> {
    match item {
        ReferenceOr::Item(value) => Ok(value),
        ReferenceOr::Reference { reference } => resolve_reference(reference, components),
    }
}

/// Same as [`resolve`] for the boxed schemas used by object properties.
pub fn resolve_boxed<'a>(
    item: &'a ReferenceOr<Box<Schema>>,
    components: Option<&'a Components>,
) -> AppResult<&'a Schema> {
    match item {
        ReferenceOr::Item(value) => Ok(value.as_ref()),
        ReferenceOr::Reference { reference } => resolve_reference(reference, components),
    }
}

fn resolve_reference<'a, T: Component>(
    reference: &str,
    components: Option<&'a Components>,
) -> AppResult<&'a T> {
    let components =
        components.ok_or_else(|| AppError::UnresolvedReference(reference.to_string()))?;

    let mut current = reference;
    for _ in 0..MAX_REF_HOPS {
        let name = component_name(current, T::SECTION)
            .ok_or_else(|| AppError::UnresolvedReference(current.to_string()))?;
        match T::lookup(components, &name) {
            Some(ReferenceOr::Item(value)) => return Ok(value),
            Some(ReferenceOr::Reference { reference }) => current = reference.as_str(),
            None => return Err(AppError::UnresolvedReference(current.to_string())),
        }
    }

    Err(AppError::UnresolvedReference(format!(
        "{} (reference cycle)",
        reference
    )))
}

/// Extracts `{name}` from `#/components/{section}/{name}`.
fn component_name(reference: &str, section: &str) -> Option<String> {
    let pointer = reference.strip_prefix("#/")?;
    let segments: Vec<&str> = pointer.split('/').collect();
    if segments.len() != 3 || segments[0] != "components" || segments[1] != section {
        return None;
    }

    let name = decode_pointer_segment(segments[2]);
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Decodes a JSON Pointer segment (handles `~1`, `~0` and percent escapes).
fn decode_pointer_segment(segment: &str) -> String {
    let decoded = segment.replace("~1", "/").replace("~0", "~");
    percent_decode_str(&decoded)
        .decode_utf8_lossy()
        .into_owned()
}
