use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a build. A site is never published with ambiguous or
/// partially invalid content.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("malformed document {}: {reason}", path.display())]
    MalformedDocument { path: PathBuf, reason: String },

    #[error("duplicate slug `{slug}`: {} and {}", first.display(), second.display())]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("invalid site config: {0}")]
    Config(String),

    #[error("failed to parse site config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("feed error: {0}")]
    Feed(String),

    /// A route enumerated from the index failed to resolve against it.
    #[error("route lookup failed during build: {0}")]
    Lookup(#[from] LookupError),
}

impl BuildError {
    pub(crate) fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::MalformedDocument {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Lookup failures. These are recoverable and map to a "not found" outcome
/// in whatever layer serves routes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("not found: {resource}")]
    NotFound { resource: String },

    #[error("invalid page number `{input}`")]
    InvalidPageNumber { input: String },
}

impl LookupError {
    pub(crate) fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }
}

pub type Result<T, E = BuildError> = std::result::Result<T, E>;
