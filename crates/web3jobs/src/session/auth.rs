//! Authentication providers.
//!
//! [`CredentialAuth`] checks an email/password pair and is the only way an
//! admin identity can be produced. [`SocialAuth`] hands back an identity for
//! a provider without any verification.

use std::fmt;
use std::str::FromStr;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::error::ParseTagError;

/// The signed-in user as persisted under `session.user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub name: String,
    pub email: String,
    pub avatar: String,
    #[serde(default, alias = "isSuperAdmin")]
    pub is_admin: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialProvider {
    Google,
    LinkedIn,
}

impl SocialProvider {
    pub const ALL: [SocialProvider; 2] = [SocialProvider::Google, SocialProvider::LinkedIn];

    pub fn id(self) -> &'static str {
        match self {
            SocialProvider::Google => "google",
            SocialProvider::LinkedIn => "linkedin",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            SocialProvider::Google => "Google",
            SocialProvider::LinkedIn => "LinkedIn",
        }
    }
}

impl fmt::Display for SocialProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for SocialProvider {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SocialProvider::ALL
            .into_iter()
            .find(|p| p.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseTagError::new("social provider", s))
    }
}

pub trait CredentialAuth: Send + Sync {
    /// Returns the identity for a valid pair, `None` otherwise.
    fn authenticate(&self, email: &str, password: &str) -> Option<Identity>;
}

pub trait SocialAuth: Send + Sync {
    fn sign_in(&self, provider: SocialProvider) -> Identity;
}

/// The single reserved admin account.
#[derive(Debug)]
pub struct ReservedCredential {
    email: String,
    password: SecretString,
}

impl ReservedCredential {
    pub const DEFAULT_EMAIL: &'static str = "shardulbuzo@gmail.com";
    pub const DEFAULT_PASSWORD: &'static str = "birdisthewordA1$";

    pub const ADMIN_NAME: &'static str = "Shardul (Admin)";
    pub const ADMIN_AVATAR: &'static str = "https://api.dicebear.com/7.x/avataaars/svg?seed=admin";

    pub fn new(email: impl Into<String>, password: SecretString) -> Self {
        Self {
            email: email.into(),
            password,
        }
    }

    pub fn with_default_password(email: impl Into<String>) -> Self {
        Self::new(email, SecretString::from(Self::DEFAULT_PASSWORD.to_string()))
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &SecretString {
        &self.password
    }
}

impl Default for ReservedCredential {
    fn default() -> Self {
        Self::with_default_password(Self::DEFAULT_EMAIL)
    }
}

impl CredentialAuth for ReservedCredential {
    fn authenticate(&self, email: &str, password: &str) -> Option<Identity> {
        if email != self.email || password != self.password.expose_secret() {
            return None;
        }
        Some(Identity {
            name: Self::ADMIN_NAME.to_string(),
            email: self.email.clone(),
            avatar: Self::ADMIN_AVATAR.to_string(),
            is_admin: true,
        })
    }
}

/// Deterministic stand-in for OAuth sign-in.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockSocialAuth;

impl SocialAuth for MockSocialAuth {
    fn sign_in(&self, provider: SocialProvider) -> Identity {
        let (name, email) = match provider {
            SocialProvider::Google => ("John Doe", "john@gmail.com"),
            SocialProvider::LinkedIn => ("Jane Smith", "jane@linkedin.com"),
        };
        Identity {
            name: name.to_string(),
            email: email.to_string(),
            avatar: format!(
                "https://api.dicebear.com/7.x/avataaars/svg?seed={}",
                provider.id()
            ),
            is_admin: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_credential_accepts_exact_pair() {
        let auth = ReservedCredential::default();
        let identity = auth
            .authenticate("shardulbuzo@gmail.com", "birdisthewordA1$")
            .unwrap();
        assert!(identity.is_admin);
        assert_eq!(identity.name, "Shardul (Admin)");
        assert!(identity.avatar.ends_with("seed=admin"));
    }

    #[test]
    fn test_reserved_credential_rejects_others() {
        let auth = ReservedCredential::default();
        assert!(auth.authenticate("x@y.com", "wrong").is_none());
        assert!(auth
            .authenticate("shardulbuzo@gmail.com", "birdisthewordA1")
            .is_none());
        assert!(auth.authenticate("SHARDULBUZO@gmail.com", "birdisthewordA1$").is_none());
        assert!(auth.authenticate("", "").is_none());
    }

    #[test]
    fn test_custom_password() {
        let auth = ReservedCredential::new("ops@example.com", SecretString::from("s3cret".to_string()));
        assert!(auth.authenticate("ops@example.com", "s3cret").is_some());
        assert!(auth.authenticate("ops@example.com", "birdisthewordA1$").is_none());
    }

    #[test]
    fn test_debug_hides_password() {
        let debug = format!("{:?}", ReservedCredential::default());
        assert!(!debug.contains("birdistheword"));
    }

    #[test]
    fn test_mock_social_identities() {
        let google = MockSocialAuth.sign_in(SocialProvider::Google);
        assert_eq!(google.name, "John Doe");
        assert_eq!(google.email, "john@gmail.com");
        assert!(google.avatar.ends_with("seed=google"));
        assert!(!google.is_admin);

        let linkedin = MockSocialAuth.sign_in(SocialProvider::LinkedIn);
        assert_eq!(linkedin.name, "Jane Smith");
        assert_eq!(linkedin.email, "jane@linkedin.com");
    }

    #[test]
    fn test_provider_from_str() {
        assert_eq!("google".parse::<SocialProvider>().unwrap(), SocialProvider::Google);
        assert_eq!("LinkedIn".parse::<SocialProvider>().unwrap(), SocialProvider::LinkedIn);
        assert!("github".parse::<SocialProvider>().is_err());
    }

    #[test]
    fn test_identity_serde_accepts_legacy_flag() {
        let json = r#"{"name":"A","email":"a@b.c","avatar":"x","isSuperAdmin":true}"#;
        let identity: Identity = serde_json::from_str(json).unwrap();
        assert!(identity.is_admin);

        let out = serde_json::to_string(&identity).unwrap();
        assert!(out.contains("\"isAdmin\":true"));
    }

    #[test]
    fn test_identity_without_flag_is_not_admin() {
        let json = r#"{"name":"A","email":"a@b.c","avatar":"x"}"#;
        let identity: Identity = serde_json::from_str(json).unwrap();
        assert!(!identity.is_admin);
    }
}
