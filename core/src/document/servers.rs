//! # Servers
//!
//! Derives the base URL of the API from the `servers` block.

use openapiv3::Server;
use regex::Regex;
use std::sync::OnceLock;

/// Base URL used when a document declares no servers (OAS default).
pub const DEFAULT_BASE_URL: &str = "/";

fn variable_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{([^{}]+)\}").expect("Invalid regex"))
}

/// Returns the first server's URL with `{variable}` placeholders replaced by
/// their declared defaults. Unknown variables are left untouched.
pub fn base_url(servers: &[Server]) -> String {
    let Some(server) = servers.first() else {
        return DEFAULT_BASE_URL.to_string();
    };

    let Some(variables) = server.variables.as_ref() else {
        return server.url.clone();
    };

    variable_pattern()
        .replace_all(&server.url, |caps: &regex::Captures| {
            match variables.get(&caps[1]) {
                Some(var) => var.default.clone(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}
