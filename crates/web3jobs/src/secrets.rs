//! Where the admin password comes from.
//!
//! A config names at most one effective source. When several are filled in,
//! the inline value beats the file, and the file beats the environment.

use std::path::PathBuf;

use secrecy::SecretString;

#[derive(Debug, thiserror::Error)]
pub enum SecretError {
    #[error("Cannot read admin password file '{path}': {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Admin password variable '{name}' is not set")]
    EnvVarMissing { name: String },

    #[error("Admin password variable '{name}' is not valid UTF-8")]
    EnvVarNotUnicode { name: String },

    /// The source exists but holds only whitespace.
    #[error("Admin password from {origin} is empty")]
    Empty { origin: String },
}

/// One configured origin of the admin password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordSource {
    Inline(String),
    File(PathBuf),
    EnvVar(String),
}

impl PasswordSource {
    /// Picks the highest-priority non-empty source, if any is configured.
    pub fn select(
        inline: Option<&str>,
        file: Option<&str>,
        env_var: Option<&str>,
    ) -> Option<Self> {
        let given = |value: Option<&str>| value.filter(|v| !v.is_empty()).map(str::to_string);

        given(inline)
            .map(PasswordSource::Inline)
            .or_else(|| given(file).map(|p| PasswordSource::File(PathBuf::from(expand_home(&p)))))
            .or_else(|| given(env_var).map(PasswordSource::EnvVar))
    }

    /// Reads the password. Surrounding whitespace, such as the trailing
    /// newline of a mounted secret file, is not part of it.
    pub fn read(&self) -> Result<SecretString, SecretError> {
        let raw = match self {
            PasswordSource::Inline(value) => value.clone(),
            PasswordSource::File(path) => {
                std::fs::read_to_string(path).map_err(|source| SecretError::Unreadable {
                    path: path.clone(),
                    source,
                })?
            }
            PasswordSource::EnvVar(name) => std::env::var(name).map_err(|e| match e {
                std::env::VarError::NotPresent => SecretError::EnvVarMissing { name: name.clone() },
                std::env::VarError::NotUnicode(_) => {
                    SecretError::EnvVarNotUnicode { name: name.clone() }
                }
            })?,
        };

        let password = raw.trim();
        if password.is_empty() {
            return Err(SecretError::Empty {
                origin: self.to_string(),
            });
        }
        Ok(SecretString::from(password.to_string()))
    }
}

impl std::fmt::Display for PasswordSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PasswordSource::Inline(_) => f.write_str("the config file"),
            PasswordSource::File(path) => write!(f, "file '{}'", path.display()),
            PasswordSource::EnvVar(name) => write!(f, "variable '{}'", name),
        }
    }
}

/// Resolves the configured admin password, or `None` if no source is set.
pub fn resolve_admin_password(
    inline: Option<&str>,
    file: Option<&str>,
    env_var: Option<&str>,
) -> Result<Option<SecretString>, SecretError> {
    PasswordSource::select(inline, file, env_var)
        .map(|source| {
            log::debug!("Reading admin password from {}", source);
            source.read()
        })
        .transpose()
}

/// Expands a leading `~` or `~/` to the home directory. `~user` is left alone.
pub(crate) fn expand_home(path: &str) -> String {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => return path.to_string(),
    };
    match dirs::home_dir() {
        Some(home) => format!("{}{}", home.to_string_lossy(), rest),
        None => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_select_prefers_inline_then_file() {
        assert_eq!(
            PasswordSource::select(Some("pw"), Some("/run/secrets/admin"), Some("ADMIN_PW")),
            Some(PasswordSource::Inline("pw".to_string()))
        );
        assert_eq!(
            PasswordSource::select(Some(""), Some("/run/secrets/admin"), Some("ADMIN_PW")),
            Some(PasswordSource::File(PathBuf::from("/run/secrets/admin")))
        );
        assert_eq!(
            PasswordSource::select(None, Some(""), Some("ADMIN_PW")),
            Some(PasswordSource::EnvVar("ADMIN_PW".to_string()))
        );
        assert_eq!(PasswordSource::select(None, None, Some("")), None);
    }

    #[test]
    fn test_nothing_configured() {
        assert!(resolve_admin_password(None, None, None).unwrap().is_none());
    }

    #[test]
    fn test_mounted_file_newline_dropped() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "hunter2").unwrap();

        let password = resolve_admin_password(None, file.path().to_str(), None)
            .unwrap()
            .unwrap();
        assert_eq!(password.expose_secret(), "hunter2");
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = resolve_admin_password(None, Some("/no/such/admin-password"), None).unwrap_err();
        assert!(err.to_string().contains("/no/such/admin-password"));
    }

    #[test]
    #[serial]
    fn test_env_var_source() {
        std::env::set_var("W3J_ADMIN_PW_SET", "  from-env\n");
        let password = resolve_admin_password(None, None, Some("W3J_ADMIN_PW_SET"))
            .unwrap()
            .unwrap();
        assert_eq!(password.expose_secret(), "from-env");
        std::env::remove_var("W3J_ADMIN_PW_SET");

        assert!(matches!(
            resolve_admin_password(None, None, Some("W3J_ADMIN_PW_SET")),
            Err(SecretError::EnvVarMissing { .. })
        ));
    }

    #[test]
    fn test_blank_password_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "   ").unwrap();

        let err = resolve_admin_password(None, file.path().to_str(), None).unwrap_err();
        assert!(matches!(err, SecretError::Empty { .. }));
        assert!(resolve_admin_password(Some("  "), None, None).is_err());
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/var/lib/web3jobs"), "/var/lib/web3jobs");
        assert_eq!(expand_home("~other/x"), "~other/x");

        if let Some(home) = dirs::home_dir() {
            let home = home.to_string_lossy().into_owned();
            assert_eq!(expand_home("~/boards"), format!("{}/boards", home));
            assert_eq!(expand_home("~"), home);
        }
    }
}
