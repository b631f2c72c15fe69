//! # Resolved Operations
//!
//! Pairs an operation with its location and its effective, `$ref`-free
//! parameter list.

use crate::document::{resolve, ApiPath, HttpVerb};
use crate::error::AppResult;
use openapiv3::{Components, Operation, Parameter, ParameterData};
use std::mem::discriminant;

/// An operation ready for classification.
#[derive(Debug, Clone)]
pub struct ResolvedOperation<'a> {
    /// URL template of the owning path.
    pub path: &'a str,
    /// The verb the operation is registered under.
    pub verb: HttpVerb,
    /// The operation as declared.
    pub operation: &'a Operation,
    /// Path-level parameters not overridden by the operation, then the
    /// operation's own parameters, in declaration order.
    pub parameters: Vec<&'a Parameter>,
}

impl<'a> ResolvedOperation<'a> {
    /// Resolves the parameters of `operation` declared on `path_item`.
    pub fn new(
        path: &'a str,
        path_item: &'a ApiPath,
        verb: HttpVerb,
        operation: &'a Operation,
        components: Option<&'a Components>,
    ) -> AppResult<Self> {
        let own = operation
            .parameters
            .iter()
            .map(|p| resolve(p, components))
            .collect::<AppResult<Vec<_>>>()?;

        let mut parameters = Vec::with_capacity(path_item.parameters.len() + own.len());
        for shared in &path_item.parameters {
            let shared = resolve(shared, components)?;
            if !own.iter().any(|p| same_parameter(p, shared)) {
                parameters.push(shared);
            }
        }
        parameters.extend(own);

        Ok(Self {
            path,
            verb,
            operation,
            parameters,
        })
    }

    /// Parameters bound to a segment of the URL template.
    pub fn path_parameters(&self) -> impl Iterator<Item = &'a ParameterData> + '_ {
        self.parameters.iter().copied().filter_map(|p| match p {
            Parameter::Path { parameter_data, .. } => Some(parameter_data),
            _ => None,
        })
    }

    /// Human readable name: the summary, or `VERB path`.
    pub fn label(&self) -> String {
        match self.operation.summary.as_deref() {
            Some(summary) if !summary.trim().is_empty() => summary.to_string(),
            _ => format!("{} {}", self.verb, self.path),
        }
    }
}

/// Parameters are identified by name and location.
fn same_parameter(a: &Parameter, b: &Parameter) -> bool {
    discriminant(a) == discriminant(b) && a.parameter_data_ref().name == b.parameter_data_ref().name
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse_api_document;

    const DOC: &str = r#"
openapi: 3.0.3
paths:
  /tenants/{tenant}/users/{id}:
    parameters:
      - name: tenant
        in: path
        required: true
        schema: { type: string }
      - name: id
        in: path
        required: true
        schema: { type: string }
    get:
      summary: Get user
      parameters:
        - name: id
          in: path
          required: true
          schema: { type: integer }
        - $ref: '#/components/parameters/Expand'
      responses: {}
    delete:
      responses: {}
components:
  parameters:
    Expand:
      name: expand
      in: query
      schema: { type: string }
"#;

    fn with_operation<F: FnOnce(ResolvedOperation<'_>)>(verb: HttpVerb, check: F) {
        let doc = parse_api_document(DOC).unwrap();
        let (template, item) = doc.paths.iter().next().unwrap();
        let operation = &item.operations[&verb];
        let resolved =
            ResolvedOperation::new(template, item, verb, operation, doc.components.as_ref())
                .unwrap();
        check(resolved);
    }

    #[test]
    fn test_operation_overrides_shared_parameter() {
        with_operation(HttpVerb::Get, |op| {
            let names: Vec<&str> = op
                .parameters
                .iter()
                .map(|p| p.parameter_data_ref().name.as_str())
                .collect();
            assert_eq!(names, vec!["tenant", "id", "expand"]);

            let id = op.path_parameters().find(|p| p.name == "id").unwrap();
            assert!(matches!(
                &id.format,
                openapiv3::ParameterSchemaOrContent::Schema(openapiv3::ReferenceOr::Item(s))
                    if matches!(s.schema_kind, openapiv3::SchemaKind::Type(openapiv3::Type::Integer(_)))
            ));
        });
    }

    #[test]
    fn test_shared_parameters_apply_to_every_operation() {
        with_operation(HttpVerb::Delete, |op| {
            assert_eq!(op.path_parameters().count(), 2);
        });
    }

    #[test]
    fn test_label_prefers_summary() {
        with_operation(HttpVerb::Get, |op| assert_eq!(op.label(), "Get user"));
        with_operation(HttpVerb::Delete, |op| {
            assert_eq!(op.label(), "DELETE /tenants/{tenant}/users/{id}")
        });
    }
}
