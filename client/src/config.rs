//! Front-end configuration baked in at build time.
//!
//! Values come from `FOLIO_*` environment variables visible to the compiler
//! (`option_env!`), mirroring how the bundle is built for each deployment.
//! Parsing goes through a lookup function so tests never touch the process
//! environment.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// REST backend origin, without a trailing slash.
    pub api_base_url: String,
    /// Web API key of the identity provider project; empty disables sign-in.
    pub identity_api_key: String,
    /// Page that performs the federated sign-in inside a popup, if deployed.
    pub federated_url: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl AppConfig {
    /// Build config from the variables captured at compile time.
    ///
    /// - `FOLIO_API_URL`: default `http://localhost:5000`
    /// - `FOLIO_IDENTITY_API_KEY`: default empty
    /// - `FOLIO_FEDERATED_URL`: optional
    pub fn from_build_env() -> Self {
        Self::from_lookup(|key| {
            let value = match key {
                "FOLIO_API_URL" => option_env!("FOLIO_API_URL"),
                "FOLIO_IDENTITY_API_KEY" => option_env!("FOLIO_IDENTITY_API_KEY"),
                "FOLIO_FEDERATED_URL" => option_env!("FOLIO_FEDERATED_URL"),
                _ => None,
            };
            value.map(str::to_owned)
        })
    }

    /// Build config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let api_base_url = read("FOLIO_API_URL")
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned())
            .trim_end_matches('/')
            .to_owned();
        let identity_api_key = read("FOLIO_IDENTITY_API_KEY").unwrap_or_default();
        let federated_url = read("FOLIO_FEDERATED_URL");

        Self { api_base_url, identity_api_key, federated_url }
    }
}
