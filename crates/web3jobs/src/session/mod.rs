//! Sign-in state and the saved-job set.
//!
//! [`SessionManager`] is the only writer of the persisted session keys. Every
//! mutation writes to the store first and touches in-memory state only once
//! the write has succeeded, so a failed write leaves the session unchanged.

pub mod auth;

use std::collections::BTreeSet;
use std::sync::Arc;

use thiserror::Error;

use crate::catalog::JobId;
use crate::sanitize::{hash_value, redact_email};
use crate::storage::{KeyValueStore, KvOp, StorageError};

pub use auth::{
    CredentialAuth, Identity, MockSocialAuth, ReservedCredential, SocialAuth, SocialProvider,
};

/// Serialized [`Identity`], admin flag included.
pub const USER_KEY: &str = "session.user";
/// Legacy standalone admin flag. Never written and never trusted.
pub const ADMIN_MARKER_KEY: &str = "session.isSuperAdmin";
/// JSON array of saved job ids, ascending.
pub const SAVED_JOBS_KEY: &str = "session.savedJobs";

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Session storage failed: {0}")]
    Storage(#[from] StorageError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated(Identity),
}

impl SessionState {
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            SessionState::Anonymous => None,
            SessionState::Authenticated(identity) => Some(identity),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    pub fn is_admin(&self) -> bool {
        self.identity().is_some_and(|i| i.is_admin)
    }
}

/// Result of a bookmark toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookmarkOutcome {
    Saved,
    Removed,
    /// Nobody is signed in; the caller should prompt for login.
    AuthenticationRequired,
}

impl BookmarkOutcome {
    pub fn is_saved(self) -> bool {
        self == BookmarkOutcome::Saved
    }
}

pub struct SessionManager {
    store: Arc<dyn KeyValueStore>,
    credentials: Box<dyn CredentialAuth>,
    social: Box<dyn SocialAuth>,
    state: SessionState,
    saved: BTreeSet<JobId>,
}

impl SessionManager {
    /// Manager with the built-in reserved credential and mock social sign-in.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_auth(
            store,
            Box::new(ReservedCredential::default()),
            Box::new(MockSocialAuth),
        )
    }

    pub fn with_auth(
        store: Arc<dyn KeyValueStore>,
        credentials: Box<dyn CredentialAuth>,
        social: Box<dyn SocialAuth>,
    ) -> Self {
        Self {
            store,
            credentials,
            social,
            state: SessionState::Anonymous,
            saved: BTreeSet::new(),
        }
    }

    /// The store the session persists to.
    pub fn storage(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// Rebuilds the session from storage.
    ///
    /// Missing or malformed entries yield an anonymous session; only a failing
    /// backend is reported as an error.
    pub fn restore(&mut self) -> Result<&SessionState, SessionError> {
        let _span = tracing::info_span!("session.restore").entered();

        let identity = self
            .store
            .get(USER_KEY)?
            .and_then(|raw| match serde_json::from_str::<Identity>(&raw) {
                Ok(identity) => Some(identity),
                Err(e) => {
                    log::warn!(
                        "Ignoring malformed persisted identity (value {}): {}",
                        hash_value(&raw),
                        e
                    );
                    None
                }
            });

        let Some(identity) = identity else {
            if self.store.get(SAVED_JOBS_KEY)?.is_some() {
                log::debug!("Discarding saved jobs persisted without an identity");
            }
            self.state = SessionState::Anonymous;
            self.saved.clear();
            return Ok(&self.state);
        };

        if let Some(marker) = self.store.get(ADMIN_MARKER_KEY)? {
            let marker_admin = marker.trim() == "true";
            if marker_admin != identity.is_admin {
                log::warn!(
                    "Stale admin marker ({}) disagrees with identity of {}; ignoring it",
                    marker.trim(),
                    redact_email(&identity.email)
                );
            }
        }

        let saved = match self.store.get(SAVED_JOBS_KEY)? {
            None => BTreeSet::new(),
            Some(raw) => match serde_json::from_str::<BTreeSet<JobId>>(&raw) {
                Ok(saved) => saved,
                Err(e) => {
                    log::warn!(
                        "Ignoring malformed saved-jobs entry (value {}): {}",
                        hash_value(&raw),
                        e
                    );
                    BTreeSet::new()
                }
            },
        };

        log::info!(
            "Restored session for {} (admin: {}, {} saved jobs)",
            redact_email(&identity.email),
            identity.is_admin,
            saved.len()
        );
        self.state = SessionState::Authenticated(identity);
        self.saved = saved;
        Ok(&self.state)
    }

    /// Signs in with the reserved credential pair.
    pub fn login(&mut self, email: &str, password: &str) -> Result<Identity, SessionError> {
        let Some(identity) = self.credentials.authenticate(email, password) else {
            log::warn!("Rejected sign-in for {}", redact_email(email));
            return Err(SessionError::InvalidCredentials);
        };
        self.establish(identity)
    }

    /// Signs in through a social provider. Never grants admin.
    pub fn login_social(&mut self, provider: SocialProvider) -> Result<Identity, SessionError> {
        let mut identity = self.social.sign_in(provider);
        if identity.is_admin {
            log::warn!(
                "{} sign-in returned an admin identity; dropping the flag",
                provider
            );
            identity.is_admin = false;
        }
        self.establish(identity)
    }

    fn establish(&mut self, identity: Identity) -> Result<Identity, SessionError> {
        let same_user = self
            .state
            .identity()
            .is_some_and(|current| current.email == identity.email);

        let mut ops = vec![
            KvOp::set(USER_KEY, serde_json::to_string(&identity).map_err(StorageError::from)?),
            KvOp::remove(ADMIN_MARKER_KEY),
        ];
        if !same_user {
            ops.push(KvOp::remove(SAVED_JOBS_KEY));
        }
        self.store.apply(&ops)?;

        if !same_user {
            self.saved.clear();
        }
        log::info!(
            "Signed in {} (admin: {})",
            redact_email(&identity.email),
            identity.is_admin
        );
        self.state = SessionState::Authenticated(identity.clone());
        Ok(identity)
    }

    /// Ends the session and removes every persisted session key.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.store.apply(&[
            KvOp::remove(USER_KEY),
            KvOp::remove(ADMIN_MARKER_KEY),
            KvOp::remove(SAVED_JOBS_KEY),
        ])?;

        if let Some(identity) = self.state.identity() {
            log::info!("Signed out {}", redact_email(&identity.email));
        }
        self.state = SessionState::Anonymous;
        self.saved.clear();
        Ok(())
    }

    /// Flips membership of `job_id` in the saved set and persists it.
    pub fn toggle_bookmark(&mut self, job_id: JobId) -> Result<BookmarkOutcome, SessionError> {
        if !self.state.is_authenticated() {
            return Ok(BookmarkOutcome::AuthenticationRequired);
        }

        let mut next = self.saved.clone();
        let outcome = if next.remove(&job_id) {
            BookmarkOutcome::Removed
        } else {
            next.insert(job_id);
            BookmarkOutcome::Saved
        };

        let encoded = serde_json::to_string(&next).map_err(StorageError::from)?;
        self.store.set(SAVED_JOBS_KEY, &encoded)?;

        log::debug!("Job {} bookmark toggled: {:?}", job_id, outcome);
        self.saved = next;
        Ok(outcome)
    }

    pub fn is_saved(&self, job_id: JobId) -> bool {
        self.saved.contains(&job_id)
    }

    /// Saved ids in ascending order.
    pub fn saved_jobs(&self) -> &BTreeSet<JobId> {
        &self.saved
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.state.identity()
    }

    pub fn is_admin(&self) -> bool {
        self.state.is_admin()
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("state", &self.state)
            .field("saved", &self.saved)
            .finish_non_exhaustive()
    }
}
