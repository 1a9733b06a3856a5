//! In-memory job store: the postings and companies the board serves.

pub mod loader;
pub mod model;
pub mod registry;
pub mod seed;

pub use loader::{load_catalog, load_catalog_from_str, Catalog};
pub use model::{AtsType, Company, CompanyDraft, CompanyId, JobId, JobPosting, Sector};
pub use seed::sample_catalog;

/// Logo shown when a posting's company is unknown or has no logo.
pub const PLACEHOLDER_LOGO: &str = "https://via.placeholder.com/100";

/// Authoritative list of postings and company records for the session.
///
/// Companies are only ever appended or deactivated, so their order is the
/// order of creation.
#[derive(Debug, Clone, Default)]
pub struct JobStore {
    jobs: Vec<JobPosting>,
    companies: Vec<Company>,
}

impl JobStore {
    pub fn new(jobs: Vec<JobPosting>, companies: Vec<Company>) -> Self {
        Self { jobs, companies }
    }

    pub fn from_catalog(catalog: Catalog) -> Self {
        Self::new(catalog.jobs, catalog.companies)
    }

    pub fn jobs(&self) -> &[JobPosting] {
        &self.jobs
    }

    pub fn job(&self, id: JobId) -> Option<&JobPosting> {
        self.jobs.iter().find(|job| job.id == id)
    }

    /// Swaps in a fresh job list from the data provider.
    pub fn replace_jobs(&mut self, jobs: Vec<JobPosting>) {
        log::debug!("Replacing {} jobs with {}", self.jobs.len(), jobs.len());
        self.jobs = jobs;
    }

    /// All companies, including deactivated ones.
    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    pub fn active_companies(&self) -> impl Iterator<Item = &Company> {
        self.companies.iter().filter(|c| c.active)
    }

    pub fn company(&self, id: CompanyId) -> Option<&Company> {
        self.companies.iter().find(|c| c.id == id)
    }

    /// Resolves a posting's employer reference, if it points anywhere.
    pub fn employer_of(&self, job: &JobPosting) -> Option<&Company> {
        self.company(job.company_id)
    }

    /// Logo URL for a company, falling back to [`PLACEHOLDER_LOGO`].
    pub fn company_logo(&self, id: CompanyId) -> &str {
        self.company(id)
            .map(|c| c.logo_url.as_str())
            .filter(|url| !url.is_empty())
            .unwrap_or(PLACEHOLDER_LOGO)
    }

    /// Next identifier to hand out: one past the highest ever assigned.
    /// `None` once the highest id is `CompanyId::MAX`.
    pub(crate) fn next_company_id(&self) -> Option<CompanyId> {
        self.companies
            .iter()
            .map(|c| c.id)
            .max()
            .unwrap_or(0)
            .checked_add(1)
    }

    /// Installs company records read back from storage.
    pub(crate) fn replace_companies(&mut self, companies: Vec<Company>) {
        log::debug!(
            "Replacing {} companies with {} stored records",
            self.companies.len(),
            companies.len()
        );
        self.companies = companies;
    }

    pub(crate) fn push_company(&mut self, company: Company) {
        self.companies.push(company);
    }

    /// Clears the active flag. Returns `false` if no such company exists.
    pub(crate) fn deactivate_company(&mut self, id: CompanyId) -> bool {
        match self.companies.iter_mut().find(|c| c.id == id) {
            Some(company) => {
                company.active = false;
                true
            }
            None => false,
        }
    }
}
