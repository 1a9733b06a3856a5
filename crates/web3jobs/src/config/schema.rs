use std::num::NonZeroUsize;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::pager::DEFAULT_PAGE_SIZE;
use crate::secrets::{expand_home, resolve_admin_password};
use crate::session::auth::ReservedCredential;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    pub version: String,
    #[serde(default = "default_jobs_per_page")]
    pub jobs_per_page: usize,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub admin: AdminConfig,
}

fn default_jobs_per_page() -> usize {
    DEFAULT_PAGE_SIZE.get()
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            jobs_per_page: default_jobs_per_page(),
            storage: StorageConfig::default(),
            catalog: CatalogConfig::default(),
            admin: AdminConfig::default(),
        }
    }
}

impl BoardConfig {
    /// Page size as the pager expects it. Validation rejects 0, so the
    /// fallback only applies to hand-built configs.
    pub fn page_size(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.jobs_per_page).unwrap_or(DEFAULT_PAGE_SIZE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    #[default]
    Sqlite,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// SQLite file path. Defaults to `~/.web3jobs/data/session.db`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl StorageConfig {
    pub fn resolved_path(&self) -> Option<PathBuf> {
        match &self.path {
            Some(path) => Some(PathBuf::from(expand_home(path))),
            None => crate::db::default_session_path(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON catalog file. The bundled sample catalog is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl CatalogConfig {
    pub fn resolved_path(&self) -> Option<PathBuf> {
        self.path.as_deref().map(|p| PathBuf::from(expand_home(p)))
    }
}

/// The reserved admin credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminConfig {
    #[serde(default = "default_admin_email")]
    pub email: String,

    /// Direct password value (for local development).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Path to file containing the password (for Docker secrets).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_file: Option<String>,

    /// Environment variable containing the password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_env_var: Option<String>,
}

fn default_admin_email() -> String {
    ReservedCredential::DEFAULT_EMAIL.to_string()
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            email: default_admin_email(),
            password: None,
            password_file: None,
            password_env_var: None,
        }
    }
}

impl AdminConfig {
    /// Resolves the credential pair the session manager accepts.
    ///
    /// With no password source configured the built-in password is used.
    pub fn credential(&self) -> Result<ReservedCredential, ConfigError> {
        let password = resolve_admin_password(
            self.password.as_deref(),
            self.password_file.as_deref(),
            self.password_env_var.as_deref(),
        )?;

        Ok(match password {
            Some(password) => ReservedCredential::new(self.email.clone(), password),
            None => ReservedCredential::with_default_password(self.email.clone()),
        })
    }
}
