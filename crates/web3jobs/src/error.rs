use std::path::PathBuf;
use thiserror::Error;

use crate::catalog::{CompanyId, JobId};

#[derive(Error, Debug)]
pub enum BoardError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Session error: {0}")]
    Session(#[from] crate::session::SessionError),

    #[error("Admin error: {0}")]
    Admin(#[from] AdminError),

    #[error("Storage error: {0}")]
    Storage(#[from] crate::storage::StorageError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },

    #[error("Schema validation failed: {errors}")]
    SchemaValidation { errors: String },

    #[error("Failed to resolve admin password: {0}")]
    Secret(#[from] crate::secrets::SecretError),
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Duplicate job id {0} in catalog")]
    DuplicateJob(JobId),

    #[error("Duplicate company id {0} in catalog")]
    DuplicateCompany(CompanyId),
}

#[derive(Error, Debug)]
pub enum AdminError {
    #[error("Admin privileges required")]
    Forbidden,

    #[error("Missing required fields: {}", missing_fields.join(", "))]
    Validation { missing_fields: Vec<&'static str> },

    #[error("Company {id} not found")]
    NotFound { id: CompanyId },

    #[error("Job board '{url}' is already registered to an active company")]
    DuplicateJobBoard { url: String },

    #[error("No company ids left after {}", crate::catalog::CompanyId::MAX)]
    IdSpaceExhausted,

    #[error("Failed to save company records: {0}")]
    Storage(#[from] crate::storage::StorageError),
}

/// Returned when a sector, ATS or provider tag does not name a known value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {kind} '{value}'")]
pub struct ParseTagError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseTagError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BoardError>;
