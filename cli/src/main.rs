#![deny(missing_docs)]

//! # crudgen CLI
//!
//! Command Line Interface for generating CRUD mock API configurations.
//!
//! Supported Commands:
//! - `generate`: OpenAPI -> `<resource>-api.json`.
//! - `inspect`: Prints the inferred actions.

use clap::{Parser, Subcommand};

use crate::error::CliResult;

mod error;
mod generate;
mod inspect;
mod source;

#[derive(Parser, Debug)]
#[clap(author, version, about = "CRUD mock API configuration generator")]
struct Cli {
    /// Log filter used when `RUST_LOG` is not set (e.g. `debug`, `crudgen_core=trace`).
    #[clap(long, global = true, env = "CRUDGEN_LOG", default_value = "warn")]
    log_level: String,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Infer CRUD actions from an OpenAPI description and write the configuration.
    Generate(generate::GenerateArgs),
    /// Print the inferred CRUD actions without writing files.
    Inspect(inspect::InspectArgs),
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Generate(args) => {
            generate::execute(args)?;
        }
        Commands::Inspect(args) => inspect::execute(args)?,
    }

    Ok(())
}
