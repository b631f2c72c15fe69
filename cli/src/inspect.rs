#![deny(missing_docs)]

//! # Inspect Command
//!
//! Prints the inferred actions without writing any file.

use crate::error::CliResult;
use crate::source::Source;
use crudgen_core::{generate_configuration, BuildOptions, CrudApiConfiguration};
use std::io::{self, Write};

/// Arguments for the inspect command.
#[derive(clap::Args, Debug, Clone)]
pub struct InspectArgs {
    /// Path or http(s) URL of the OpenAPI description (YAML or JSON).
    #[clap(short, long, env = "CRUDGEN_INPUT")]
    pub input: String,
}

/// Executes the inspection, printing to stdout.
pub fn execute(args: &InspectArgs) -> CliResult<()> {
    let content = Source::parse(&args.input).read()?;
    let config = generate_configuration(&content, &BuildOptions::new("inspect"))?;

    let mut out = io::stdout().lock();
    write_actions(&config, &mut out)?;
    Ok(())
}

/// Writes one `ACTION METHOD URL QUERY` line per action.
pub fn write_actions(config: &CrudApiConfiguration, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "base url: {}", config.base_url)?;
    for action in &config.actions {
        let line = format!(
            "{:<8} {:<7} {} {}",
            action.action.to_string(),
            action.effective_method(),
            action.url,
            action.query.as_deref().unwrap_or_default()
        );
        writeln!(out, "{}", line.trim_end())?;
    }
    Ok(())
}
