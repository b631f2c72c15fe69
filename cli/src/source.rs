#![deny(missing_docs)]

//! # Input Sources
//!
//! Reads the API description from a local file or, with the `client`
//! feature, from an `http(s)` URL.

use crate::error::{CliError, CliResult};
use std::fs;
use std::path::PathBuf;
use url::Url;

/// Where the API description comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A local YAML or JSON file.
    File(PathBuf),
    /// A remote document.
    Remote(Url),
}

impl Source {
    /// Interprets `input` as a URL when it has an http(s) scheme, else as a path.
    pub fn parse(input: &str) -> Self {
        match Url::parse(input) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Source::Remote(url),
            _ => Source::File(PathBuf::from(input)),
        }
    }

    /// Reads the whole document.
    pub fn read(&self) -> CliResult<String> {
        match self {
            Source::File(path) => {
                if !path.exists() {
                    return Err(CliError::General(format!(
                        "OpenAPI file not found: {:?}",
                        path
                    )));
                }
                tracing::debug!(path = %path.display(), "reading API description");
                Ok(fs::read_to_string(path)?)
            }
            Source::Remote(url) => fetch(url),
        }
    }

    /// File name recorded as `apiFile` in the configuration.
    pub fn file_name(&self) -> Option<String> {
        match self {
            Source::File(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned()),
            Source::Remote(url) => url
                .path_segments()
                .and_then(|mut segments| segments.next_back())
                .filter(|name| !name.is_empty())
                .map(str::to_string),
        }
    }
}

#[cfg(feature = "client")]
fn fetch(url: &Url) -> CliResult<String> {
    tracing::info!(%url, "downloading API description");
    ureq::get(url.as_str())
        .call()
        .and_then(|mut response| response.body_mut().read_to_string())
        .map_err(|e| CliError::Fetch(format!("{}: {}", url, e)))
}

#[cfg(not(feature = "client"))]
fn fetch(url: &Url) -> CliResult<String> {
    Err(CliError::General(format!(
        "cannot download {}: built without the `client` feature",
        url
    )))
}
