//! Credential lookup.
//!
//! Values come from an optional key=value file first (usually `.env`), then
//! from the process environment. The file is never exported into the
//! environment; lookups go through [`Env::get`] instead.

use std::{collections::HashMap, fmt, path::Path};

use color_eyre::Result;
use log::{debug, warn};
use thiserror::Error;

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const BASE_URL_VAR: &str = "OPENAI_BASE_URL";

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("{var} is not set, export it or add it to the env file")]
    Missing { var: String },

    #[error("{var} is empty")]
    Empty { var: String },
}

#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Result<Self, CredentialError> {
        Self::named(key.into(), API_KEY_VAR)
    }

    fn named(key: String, var: &str) -> Result<Self, CredentialError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(CredentialError::Empty { var: var.into() });
        }
        Ok(Self(key.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[derive(Debug, Default)]
pub struct Env {
    file_vars: HashMap<String, String>,
}

impl Env {
    /// Reads `path` if it exists. Comment lines and lines that don't parse
    /// (e.g. no `=`) are skipped.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No env file at {}", path.display());
            return Ok(Self::default());
        }

        let mut file_vars = HashMap::new();
        for item in dotenvy::from_path_iter(path)? {
            match item {
                Ok((key, value)) => {
                    file_vars.insert(key, value);
                }
                Err(err) => warn!("Skipping line in {}: {err}", path.display()),
            }
        }
        debug!("Loaded {} value(s) from {}", file_vars.len(), path.display());

        Ok(Self { file_vars })
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.file_vars
            .get(key)
            .cloned()
            .or_else(|| std::env::var(key).ok())
    }

    pub fn api_key(&self) -> Result<ApiKey, CredentialError> {
        self.credential(API_KEY_VAR)
    }

    pub fn credential(&self, var: &str) -> Result<ApiKey, CredentialError> {
        let value = self
            .get(var)
            .ok_or_else(|| CredentialError::Missing { var: var.into() })?;
        ApiKey::named(value, var)
    }
}
