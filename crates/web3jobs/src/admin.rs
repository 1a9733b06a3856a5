//! Admin-only mutations of the company list, plus dashboard statistics.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::catalog::registry;
use crate::catalog::{AtsType, Company, CompanyDraft, CompanyId, JobStore};
use crate::error::AdminError;
use crate::session::SessionState;
use crate::storage::KeyValueStore;

/// Fails with [`AdminError::Forbidden`] unless the session holds an admin.
pub fn ensure_admin(state: &SessionState) -> Result<(), AdminError> {
    if state.is_admin() {
        Ok(())
    } else {
        Err(AdminError::Forbidden)
    }
}

/// Write access to companies, obtainable only with an admin session.
///
/// With a registry attached, every change is saved there before the job
/// store sees it, so a failed save changes nothing.
pub struct AdminMutator<'a> {
    store: &'a mut JobStore,
    registry: Option<&'a dyn KeyValueStore>,
}

impl<'a> AdminMutator<'a> {
    pub fn new(store: &'a mut JobStore, state: &SessionState) -> Result<Self, AdminError> {
        ensure_admin(state)?;
        Ok(Self {
            store,
            registry: None,
        })
    }

    /// Saves the company list to `kv` on every change.
    pub fn persist_to(mut self, kv: &'a dyn KeyValueStore) -> Self {
        self.registry = Some(kv);
        self
    }

    fn save(&self, companies: &[Company]) -> Result<(), AdminError> {
        if let Some(kv) = self.registry {
            kv.apply(&[registry::save_op(companies)?])?;
        }
        Ok(())
    }

    /// Registers a company and returns the stored record.
    ///
    /// Nothing is inserted unless every check passes.
    pub fn add_company(&mut self, draft: CompanyDraft) -> Result<Company, AdminError> {
        let name = draft.name.trim();
        let job_board_url = draft.job_board_url.trim();

        let mut missing_fields = Vec::new();
        if name.is_empty() {
            missing_fields.push("name");
        }
        if job_board_url.is_empty() {
            missing_fields.push("job_board_url");
        }
        if !missing_fields.is_empty() {
            return Err(AdminError::Validation { missing_fields });
        }

        let board_key = normalize_board_url(job_board_url);
        if self
            .store
            .active_companies()
            .any(|c| normalize_board_url(&c.job_board_url) == board_key)
        {
            return Err(AdminError::DuplicateJobBoard {
                url: job_board_url.to_string(),
            });
        }

        let ats_type = draft
            .ats_type
            .or_else(|| AtsType::detect(job_board_url))
            .unwrap_or_default();

        let id = self
            .store
            .next_company_id()
            .ok_or(AdminError::IdSpaceExhausted)?;

        let company = Company {
            id,
            name: name.to_string(),
            website_url: draft.website_url.trim().to_string(),
            logo_url: draft.logo_url.trim().to_string(),
            job_board_url: job_board_url.to_string(),
            ats_type,
            description: draft
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            active: true,
        };

        let mut companies = self.store.companies().to_vec();
        companies.push(company.clone());
        self.save(&companies)?;

        log::info!(
            "Added company {} '{}' ({})",
            company.id,
            company.name,
            company.ats_type
        );
        self.store.push_company(company.clone());
        Ok(company)
    }

    /// Soft-deletes a company. Already inactive companies stay inactive.
    pub fn deactivate_company(&mut self, id: CompanyId) -> Result<(), AdminError> {
        match self.store.company(id) {
            None => return Err(AdminError::NotFound { id }),
            Some(company) if !company.active => return Ok(()),
            Some(_) => {}
        }

        let companies: Vec<Company> = self
            .store
            .companies()
            .iter()
            .map(|c| Company {
                active: c.active && c.id != id,
                ..c.clone()
            })
            .collect();
        self.save(&companies)?;

        self.store.deactivate_company(id);
        log::info!("Deactivated company {}", id);
        Ok(())
    }
}

impl std::fmt::Debug for AdminMutator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminMutator")
            .field("companies", &self.store.companies().len())
            .field("persisted", &self.registry.is_some())
            .finish()
    }
}

fn normalize_board_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_ascii_lowercase()
}

/// Headline numbers for the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardStats {
    pub total_jobs: usize,
    pub active_companies: usize,
    /// Postings dated in the same calendar month as `today`.
    pub jobs_this_month: usize,
}

pub fn dashboard_stats(store: &JobStore, today: NaiveDate) -> BoardStats {
    BoardStats {
        total_jobs: store.jobs().len(),
        active_companies: store.active_companies().count(),
        jobs_this_month: store
            .jobs()
            .iter()
            .filter(|job| {
                job.posted_date.year() == today.year() && job.posted_date.month() == today.month()
            })
            .count(),
    }
}
