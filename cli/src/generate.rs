#![deny(missing_docs)]

//! # Generate Command
//!
//! Reads an API description, infers its CRUD actions and writes
//! `<resource>-api.json` into the output directory.

use crate::error::{CliError, CliResult};
use crate::source::Source;
use crudgen_core::{generate_configuration, render_json, BuildOptions, EntraAuthConfig};
use std::fs;
use std::path::PathBuf;

/// Arguments for the generate command.
#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Path or http(s) URL of the OpenAPI description (YAML or JSON).
    #[clap(short, long, env = "CRUDGEN_INPUT")]
    pub input: String,

    /// Resource name. Output is `<resource>-api.json`, backed by `<resource>-data.json`.
    #[clap(short, long, env = "CRUDGEN_RESOURCE")]
    pub resource: String,

    /// Directory the configuration is written to.
    #[clap(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Base URL of the mock API. Defaults to the document's first server.
    #[clap(long, env = "CRUDGEN_BASE_URL")]
    pub base_url: Option<String>,

    /// Authentication settings.
    #[clap(flatten)]
    pub auth_args: AuthArgs,
}

/// Authentication modes selectable from the command line.
#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthMode {
    /// Anonymous access.
    #[default]
    None,
    /// Microsoft Entra bearer tokens.
    Entra,
}

/// Flags describing how the mock API validates tokens.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct AuthArgs {
    /// Authentication required by the mock API.
    #[clap(long, value_enum, default_value_t = AuthMode::None)]
    pub auth: AuthMode,

    /// Expected token audience.
    #[clap(long)]
    pub entra_audience: Option<String>,

    /// Expected token issuer.
    #[clap(long)]
    pub entra_issuer: Option<String>,

    /// Accepted scope (repeatable).
    #[clap(long = "entra-scope")]
    pub entra_scopes: Vec<String>,

    /// Accepted role (repeatable).
    #[clap(long = "entra-role")]
    pub entra_roles: Vec<String>,

    /// Reject expired tokens.
    #[clap(long)]
    pub entra_validate_lifetime: bool,

    /// Verify token signatures.
    #[clap(long)]
    pub entra_validate_signing_key: bool,
}

impl AuthArgs {
    /// The Entra settings, when Entra auth was selected.
    pub fn entra_config(&self) -> Option<EntraAuthConfig> {
        match self.auth {
            AuthMode::None => None,
            AuthMode::Entra => Some(EntraAuthConfig {
                audience: self.entra_audience.clone().unwrap_or_default(),
                issuer: self.entra_issuer.clone().unwrap_or_default(),
                scopes: self.entra_scopes.clone(),
                roles: self.entra_roles.clone(),
                validate_lifetime: self.entra_validate_lifetime,
                validate_signing_key: self.entra_validate_signing_key,
            }),
        }
    }
}

/// Executes the generation and returns the path of the written file.
pub fn execute(args: &GenerateArgs) -> CliResult<PathBuf> {
    validate_resource_name(&args.resource)?;

    let source = Source::parse(&args.input);
    let content = source.read()?;

    let options = BuildOptions {
        resource_name: args.resource.clone(),
        base_url: args.base_url.clone(),
        api_file: source.file_name(),
        entra_auth: args.auth_args.entra_config(),
    };
    let config = generate_configuration(&content, &options)?;
    let json = render_json(&config)?;

    fs::create_dir_all(&args.output_dir)?;
    let output_path = args.output_dir.join(format!("{}-api.json", args.resource));
    fs::write(&output_path, json)?;

    tracing::info!(path = %output_path.display(), "wrote CRUD API configuration");
    println!(
        "Generated {} actions at {:?} (data file: {})",
        config.actions.len(),
        output_path,
        config.data_file
    );

    Ok(output_path)
}

/// The resource name ends up in file names, so it must be a plain name.
fn validate_resource_name(name: &str) -> CliResult<()> {
    if name.trim().is_empty() {
        return Err(CliError::General("resource name must not be empty".into()));
    }
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(CliError::General(format!(
            "resource name '{}' must not contain path separators",
            name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const USERS: &str = r#"
openapi: 3.0.3
info: {title: Users, version: 1.0.0}
servers:
  - url: https://api.contoso.com
paths:
  /users:
    get: { responses: {} }
    post: { responses: {} }
  /users/{id}:
    get:
      parameters:
        - { name: id, in: path, required: true, schema: { type: string } }
      responses:
        '2XX':
          description: OK
          content:
            application/json:
              schema: { type: object }
"#;

    fn args(input: PathBuf, output_dir: PathBuf) -> GenerateArgs {
        GenerateArgs {
            input: input.to_string_lossy().into_owned(),
            resource: "users".into(),
            output_dir,
            base_url: None,
            auth_args: AuthArgs::default(),
        }
    }

    #[test]
    fn test_execute_writes_configuration() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("users.yaml");
        fs::write(&input, USERS).unwrap();
        let output_dir = dir.path().join("out");

        let path = execute(&args(input, output_dir.clone())).unwrap();

        assert_eq!(path, output_dir.join("users-api.json"));
        let contents = fs::read_to_string(path).unwrap();
        assert!(contents.contains(r#""apiFile": "users.yaml""#));
        assert!(contents.contains(r#""baseUrl": "https://api.contoso.com""#));
        assert!(contents.contains(r#""dataFile": "users-data.json""#));
        assert!(contents.contains(r#""query": "$.[?(@.id == '{id}')]""#));
        assert!(!contents.contains(r#""auth""#));
    }

    #[test]
    fn test_execute_with_entra_auth() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("users.yaml");
        fs::write(&input, USERS).unwrap();

        let mut args = args(input, dir.path().to_path_buf());
        args.base_url = Some("http://localhost:3000".into());
        args.auth_args = AuthArgs {
            auth: AuthMode::Entra,
            entra_audience: Some("api://users".into()),
            entra_scopes: vec!["User.Read".into()],
            ..Default::default()
        };

        let contents = fs::read_to_string(execute(&args).unwrap()).unwrap();
        assert!(contents.contains(r#""baseUrl": "http://localhost:3000""#));
        assert!(contents.contains(r#""auth": "entra""#));
        assert!(contents.contains(r#""audience": "api://users""#));
    }

    #[test]
    fn test_execute_missing_input() {
        let dir = tempdir().unwrap();
        let err = execute(&args(dir.path().join("missing.yaml"), dir.path().to_path_buf()))
            .unwrap_err();
        assert!(err.to_string().contains("OpenAPI file not found"));
    }

    #[test]
    fn test_execute_reports_inference_errors() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("bad.yaml");
        fs::write(
            &input,
            "openapi: 3.0.3\npaths:\n  /users:\n    options: { responses: {} }\n",
        )
        .unwrap();
        let output_dir = dir.path().join("out");

        let err = execute(&args(input, output_dir.clone())).unwrap_err();
        assert!(matches!(err, CliError::Core(_)));
        assert!(!output_dir.join("users-api.json").exists());
    }

    #[test]
    fn test_resource_name_validation() {
        assert!(validate_resource_name("users").is_ok());
        assert!(validate_resource_name("").is_err());
        assert!(validate_resource_name("../users").is_err());
    }
}
