//! # Identifier Filter
//!
//! Builds the JSONPath query that selects the records addressed by an
//! operation's path parameters, e.g. `$.[?(@.id == '{id}')]` for `/users/{id}`.
//! The serving component substitutes `{id}` with the value from the request URL.

use crate::document::resolve;
use crate::error::AppResult;
use openapiv3::{Components, ParameterData, ParameterSchemaOrContent, SchemaKind, Type};

/// How a parameter value is written inside a clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueStyle {
    /// `'{name}'`
    Quoted,
    /// `{name}`
    Bare,
}

/// Synthesizes the filter for the given path parameters.
///
/// Returns `None` when there are no path parameters. Parameters whose type is
/// neither string, integer nor number produce no clause; when every parameter
/// is skipped the vacuous filter `$.[?()]` is returned.
pub fn synthesize_filter<'a, I>(
    path_parameters: I,
    components: Option<&Components>,
) -> AppResult<Option<String>>
where
    I: IntoIterator<Item = &'a ParameterData>,
{
    let mut seen = false;
    let mut clauses = Vec::new();

    for parameter in path_parameters {
        seen = true;
        match value_style(parameter, components)? {
            Some(style) => clauses.push(clause(&parameter.name, style)),
            None => tracing::warn!(
                parameter = %parameter.name,
                "path parameter type has no filter representation, clause skipped"
            ),
        }
    }

    if !seen {
        return Ok(None);
    }
    Ok(Some(format!("$.[?({})]", clauses.join(" && "))))
}

fn clause(name: &str, style: ValueStyle) -> String {
    match style {
        ValueStyle::Quoted => format!("@.{name} == '{{{name}}}'"),
        ValueStyle::Bare => format!("@.{name} == {{{name}}}"),
    }
}

fn value_style(
    parameter: &ParameterData,
    components: Option<&Components>,
) -> AppResult<Option<ValueStyle>> {
    let ParameterSchemaOrContent::Schema(schema) = &parameter.format else {
        return Ok(None);
    };

    let style = match &resolve(schema, components)?.schema_kind {
        SchemaKind::Type(Type::String(_)) => Some(ValueStyle::Quoted),
        SchemaKind::Type(Type::Integer(_)) | SchemaKind::Type(Type::Number(_)) => {
            Some(ValueStyle::Bare)
        }
        SchemaKind::Any(any) => match any.typ.as_deref() {
            Some("string") => Some(ValueStyle::Quoted),
            Some("integer") | Some("number") => Some(ValueStyle::Bare),
            _ => None,
        },
        _ => None,
    };
    Ok(style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use openapiv3::Parameter;

    fn parameters(yaml: &str) -> Vec<ParameterData> {
        let params: Vec<Parameter> = serde_yaml::from_str(yaml).unwrap();
        params.into_iter().map(Parameter::parameter_data).collect()
    }

    fn filter(yaml: &str) -> Option<String> {
        let components: openapiv3::Components = serde_yaml::from_str(
            r#"
schemas:
  UserId: { type: string, format: uuid }
"#,
        )
        .unwrap();
        synthesize_filter(&parameters(yaml), Some(&components)).unwrap()
    }

    #[test]
    fn test_no_parameters_no_filter() {
        assert_eq!(synthesize_filter(std::iter::empty(), None).unwrap(), None);
    }

    #[test]
    fn test_string_parameter_is_quoted() {
        let query = filter("- { name: id, in: path, required: true, schema: { type: string } }");
        assert_eq!(query.as_deref(), Some("$.[?(@.id == '{id}')]"));
    }

    #[test]
    fn test_integer_parameter_is_bare() {
        let query = filter("- { name: id, in: path, required: true, schema: { type: integer } }");
        assert_eq!(query.as_deref(), Some("$.[?(@.id == {id})]"));
    }

    #[test]
    fn test_number_parameter_is_bare() {
        let query = filter(
            "- { name: version, in: path, required: true, schema: { type: number, format: float } }",
        );
        assert_eq!(query.as_deref(), Some("$.[?(@.version == {version})]"));
    }

    #[test]
    fn test_clauses_keep_declaration_order() {
        let query = filter(
            r#"
- { name: a, in: path, required: true, schema: { type: string } }
- { name: b, in: path, required: true, schema: { type: integer } }
"#,
        );
        assert_eq!(query.as_deref(), Some("$.[?(@.a == '{a}' && @.b == {b})]"));
    }

    #[test]
    fn test_referenced_schema_type() {
        let query = filter(
            "- { name: userId, in: path, required: true, schema: { $ref: '#/components/schemas/UserId' } }",
        );
        assert_eq!(query.as_deref(), Some("$.[?(@.userId == '{userId}')]"));
    }

    #[test]
    fn test_unsupported_type_is_skipped() {
        let query = filter(
            r#"
- { name: flag, in: path, required: true, schema: { type: boolean } }
- { name: id, in: path, required: true, schema: { type: integer } }
"#,
        );
        assert_eq!(query.as_deref(), Some("$.[?(@.id == {id})]"));
    }

    #[test]
    fn test_all_skipped_is_vacuous() {
        let query = filter("- { name: flag, in: path, required: true, schema: { type: boolean } }");
        assert_eq!(query.as_deref(), Some("$.[?()]"));
    }

    #[test]
    fn test_is_deterministic() {
        let yaml = r#"
- { name: tenant, in: path, required: true, schema: { type: string } }
- { name: id, in: path, required: true, schema: { type: integer } }
"#;
        assert_eq!(filter(yaml), filter(yaml));
    }
}
