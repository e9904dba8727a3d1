// src/credentials.rs
use log::{info, warn};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_KEY_FILE: &str = "key.txt";
pub const DEFAULT_ENDPOINT_FILE: &str = "endpoint.txt";

/// Which of the two credential files a failure refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialKind {
    ApiKey,
    Endpoint,
}

impl CredentialKind {
    fn contents(&self) -> &'static str {
        match self {
            CredentialKind::ApiKey => "your API key",
            CredentialKind::Endpoint => "your endpoint URL",
        }
    }

    fn loaded_message(&self) -> &'static str {
        match self {
            CredentialKind::ApiKey => "API key loaded successfully.",
            CredentialKind::Endpoint => "Endpoint loaded successfully.",
        }
    }
}

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Error: '{}' file not found. Please ensure the file exists and contains {}.", .path.display(), .kind.contents())]
    Missing { kind: CredentialKind, path: PathBuf },

    #[error("failed to read '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// API key and service endpoint, read once and never mutated
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
    endpoint: String,
}

impl Credentials {
    /// Load both files, key first. Prints a confirmation line for each file read.
    pub fn load(key_path: &Path, endpoint_path: &Path) -> Result<Self, CredentialError> {
        let api_key = read_trimmed(key_path, CredentialKind::ApiKey)?;
        println!("{}", CredentialKind::ApiKey.loaded_message());

        let endpoint = read_trimmed(endpoint_path, CredentialKind::Endpoint)?;
        println!("{}", CredentialKind::Endpoint.loaded_message());

        Ok(Self::new(api_key, endpoint))
    }

    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

fn read_trimmed(path: &Path, kind: CredentialKind) -> Result<String, CredentialError> {
    let raw = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => CredentialError::Missing {
            kind,
            path: path.to_path_buf(),
        },
        _ => CredentialError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let value = raw.trim().to_string();
    if value.is_empty() {
        warn!("'{}' is empty", path.display());
    } else {
        info!("Read {} bytes from '{}'", value.len(), path.display());
    }
    Ok(value)
}
