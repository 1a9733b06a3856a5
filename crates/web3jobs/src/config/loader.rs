use std::path::Path;

use crate::config::schema::BoardConfig;
use crate::error::ConfigError;

const SCHEMA_JSON: &str = include_str!("../../schema/board-config-v1.json");

const SUPPORTED_VERSION: &str = "1.0";
const MAX_JOBS_PER_PAGE: usize = 100;

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<BoardConfig, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    let config = load_config_from_str(&content)?;
    log::debug!("Loaded board configuration from {}", path.display());
    Ok(config)
}

pub fn load_config_from_str(content: &str) -> Result<BoardConfig, ConfigError> {
    let json_value: serde_json::Value = serde_json::from_str(content)?;

    validate_schema(&json_value)?;

    let config: BoardConfig = serde_json::from_value(json_value)?;

    validate_config(&config)?;

    Ok(config)
}

fn validate_schema(json_value: &serde_json::Value) -> Result<(), ConfigError> {
    let schema: serde_json::Value =
        serde_json::from_str(SCHEMA_JSON).map_err(|e| ConfigError::Validation {
            message: format!("Invalid embedded schema JSON: {}", e),
        })?;

    let validator = jsonschema::validator_for(&schema).map_err(|e| ConfigError::Validation {
        message: format!("Failed to compile JSON schema: {}", e),
    })?;

    let error_messages: Vec<String> = validator
        .iter_errors(json_value)
        .map(|e| e.to_string())
        .collect();
    if !error_messages.is_empty() {
        return Err(ConfigError::SchemaValidation {
            errors: error_messages.join("; "),
        });
    }

    Ok(())
}

fn validate_config(config: &BoardConfig) -> Result<(), ConfigError> {
    if config.version != SUPPORTED_VERSION {
        return Err(ConfigError::Validation {
            message: format!("Unsupported config version: {}", config.version),
        });
    }

    // The schema enforces this too; kept for configs built in code.
    if config.jobs_per_page == 0 || config.jobs_per_page > MAX_JOBS_PER_PAGE {
        return Err(ConfigError::Validation {
            message: format!(
                "jobs_per_page must be between 1 and {}, got {}",
                MAX_JOBS_PER_PAGE, config.jobs_per_page
            ),
        });
    }

    if config.admin.email.trim().is_empty() || !config.admin.email.contains('@') {
        return Err(ConfigError::Validation {
            message: "admin.email must be an email address".to_string(),
        });
    }

    Ok(())
}
