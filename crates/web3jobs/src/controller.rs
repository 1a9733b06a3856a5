//! The board's single state owner.
//!
//! [`BoardController`] holds the job store, the session, the current query and
//! page. Company changes are saved to the same key-value store as the session. Presentation layers call its intent methods and either read a fresh
//! [`BoardView`] or react to the [`BoardEvent`]s it broadcasts.

use std::num::NonZeroUsize;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tokio::sync::broadcast;

use crate::admin::{dashboard_stats, ensure_admin, AdminMutator, BoardStats};
use crate::broadcast::{BoardEvent, BoardEventBroadcaster};
use crate::catalog::registry::load_companies;
use crate::catalog::{
    load_catalog, sample_catalog, Company, CompanyDraft, CompanyId, JobId, JobPosting, JobStore,
};
use crate::config::BoardConfig;
use crate::error::Result;
use crate::pager::{paginate, total_pages, PageLabel};
use crate::query::{JobQuery, SectorFilter};
use crate::session::{
    BookmarkOutcome, Identity, MockSocialAuth, SessionManager, SocialProvider,
};
use crate::storage::{open_store, KeyValueStore};

/// A job as it appears in the result list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobCard {
    #[serde(flatten)]
    pub job: JobPosting,
    pub logo_url: String,
    pub saved: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub signed_in: bool,
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub is_admin: bool,
    pub saved_count: usize,
}

/// Everything needed to render one results page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardView {
    pub query: String,
    pub sector: SectorFilter,
    pub cards: Vec<JobCard>,
    pub page: usize,
    pub total_pages: usize,
    pub total_results: usize,
    pub labels: Vec<PageLabel>,
    /// One-based "showing X to Y" bounds; `None` when nothing matches.
    pub range: Option<(usize, usize)>,
    pub has_previous: bool,
    pub has_next: bool,
    pub session: SessionSummary,
}

pub struct BoardController {
    store: JobStore,
    session: SessionManager,
    registry: Arc<dyn KeyValueStore>,
    query: JobQuery,
    page: usize,
    page_size: NonZeroUsize,
    events: BoardEventBroadcaster,
}

impl BoardController {
    pub fn new(store: JobStore, session: SessionManager, page_size: NonZeroUsize) -> Self {
        Self {
            store,
            registry: Arc::clone(session.storage()),
            session,
            query: JobQuery::default(),
            page: 1,
            page_size,
            events: BoardEventBroadcaster::default(),
        }
    }

    /// Builds a controller from configuration and restores the persisted
    /// session and company records.
    pub fn from_config(config: &BoardConfig, today: NaiveDate) -> Result<Self> {
        let catalog = match config.catalog.resolved_path() {
            Some(path) => load_catalog(path)?,
            None => {
                log::debug!("No catalog configured, using the bundled sample");
                sample_catalog(today)
            }
        };

        let kv = open_store(&config.storage)?;
        let mut store = JobStore::from_catalog(catalog);
        if let Some(companies) = load_companies(kv.as_ref())? {
            store.replace_companies(companies);
        }

        let credential = config.admin.credential()?;
        let mut session =
            SessionManager::with_auth(kv, Box::new(credential), Box::new(MockSocialAuth));
        session.restore()?;

        Ok(Self::new(store, session, config.page_size()))
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BoardEvent> {
        self.events.subscribe()
    }

    pub fn events(&self) -> &BoardEventBroadcaster {
        &self.events
    }

    pub fn query(&self) -> &JobQuery {
        &self.query
    }

    pub fn set_query_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if self.query.text == text {
            return;
        }
        self.query.text = text;
        self.results_changed();
    }

    pub fn set_sector(&mut self, sector: SectorFilter) {
        if self.query.sector == sector {
            return;
        }
        self.query.sector = sector;
        self.results_changed();
    }

    /// Swaps in a new job list from the data provider.
    pub fn replace_jobs(&mut self, jobs: Vec<JobPosting>) {
        self.store.replace_jobs(jobs);
        self.results_changed();
    }

    fn results_changed(&mut self) {
        let total = self.results().len();
        self.page = 1;
        self.events.send(BoardEvent::ResultsChanged { total });
        self.events.send(BoardEvent::PageChanged {
            page: 1,
            total_pages: total_pages(total, self.page_size),
        });
    }

    pub fn results(&self) -> Vec<&JobPosting> {
        self.query.apply(self.store.jobs())
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.results().len(), self.page_size)
    }

    /// Moves to `page`, clamped to the available pages. Returns the new page.
    pub fn set_page(&mut self, page: usize) -> usize {
        let total_pages = self.total_pages();
        let page = page.clamp(1, total_pages);
        if page != self.page {
            self.page = page;
            self.events.send(BoardEvent::PageChanged { page, total_pages });
        }
        self.page
    }

    pub fn next_page(&mut self) -> usize {
        self.set_page(self.page.saturating_add(1))
    }

    pub fn previous_page(&mut self) -> usize {
        self.set_page(self.page.saturating_sub(1))
    }

    pub fn view(&self) -> BoardView {
        let results = self.results();
        let page = paginate(&results, self.page_size, self.page);

        let cards = page
            .items
            .iter()
            .map(|job| self.card(job))
            .collect();

        BoardView {
            query: self.query.text.clone(),
            sector: self.query.sector,
            cards,
            page: page.page,
            total_pages: page.total_pages,
            total_results: page.total_items,
            labels: page.labels(),
            range: page.range(),
            has_previous: page.has_previous(),
            has_next: page.has_next(),
            session: self.session_summary(),
        }
    }

    fn card(&self, job: &JobPosting) -> JobCard {
        JobCard {
            job: job.clone(),
            logo_url: self.store.company_logo(job.company_id).to_string(),
            saved: self.session.is_saved(job.id),
        }
    }

    pub fn session_summary(&self) -> SessionSummary {
        match self.session.identity() {
            None => SessionSummary::default(),
            Some(identity) => SessionSummary {
                signed_in: true,
                name: Some(identity.name.clone()),
                email: Some(identity.email.clone()),
                avatar: Some(identity.avatar.clone()),
                is_admin: identity.is_admin,
                saved_count: self.session.saved_jobs().len(),
            },
        }
    }

    /// Saved postings still present in the store, by ascending id.
    pub fn saved_jobs(&self) -> Vec<JobCard> {
        self.session
            .saved_jobs()
            .iter()
            .filter_map(|id| self.store.job(*id))
            .map(|job| self.card(job))
            .collect()
    }

    pub fn toggle_bookmark(&mut self, job_id: JobId) -> Result<BookmarkOutcome> {
        let outcome = self.session.toggle_bookmark(job_id)?;
        match outcome {
            BookmarkOutcome::AuthenticationRequired => {
                self.events.send(BoardEvent::LoginRequired);
            }
            BookmarkOutcome::Saved | BookmarkOutcome::Removed => {
                self.events.send(BoardEvent::SavedJobsChanged {
                    count: self.session.saved_jobs().len(),
                });
            }
        }
        Ok(outcome)
    }

    pub fn login(&mut self, email: &str, password: &str) -> Result<Identity> {
        let identity = self.session.login(email, password)?;
        self.session_changed();
        Ok(identity)
    }

    pub fn login_social(&mut self, provider: SocialProvider) -> Result<Identity> {
        let identity = self.session.login_social(provider)?;
        self.session_changed();
        Ok(identity)
    }

    pub fn logout(&mut self) -> Result<()> {
        self.session.logout()?;
        self.session_changed();
        Ok(())
    }

    fn session_changed(&self) {
        self.events.send(BoardEvent::SessionChanged {
            signed_in: self.session.state().is_authenticated(),
            is_admin: self.session.is_admin(),
        });
        self.events.send(BoardEvent::SavedJobsChanged {
            count: self.session.saved_jobs().len(),
        });
    }

    pub fn companies(&self) -> &[Company] {
        self.store.companies()
    }

    pub fn add_company(&mut self, draft: CompanyDraft) -> Result<Company> {
        let company = AdminMutator::new(&mut self.store, self.session.state())?
            .persist_to(self.registry.as_ref())
            .add_company(draft)?;
        self.companies_changed();
        Ok(company)
    }

    pub fn deactivate_company(&mut self, id: CompanyId) -> Result<()> {
        AdminMutator::new(&mut self.store, self.session.state())?
            .persist_to(self.registry.as_ref())
            .deactivate_company(id)?;
        self.companies_changed();
        Ok(())
    }

    fn companies_changed(&self) {
        self.events.send(BoardEvent::CompaniesChanged {
            active: self.store.active_companies().count(),
        });
    }

    /// Admin dashboard numbers.
    pub fn dashboard_stats(&self, today: NaiveDate) -> Result<BoardStats> {
        ensure_admin(self.session.state())?;
        Ok(dashboard_stats(&self.store, today))
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn store(&self) -> &JobStore {
        &self.store
    }
}

impl std::fmt::Debug for BoardController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoardController")
            .field("query", &self.query)
            .field("page", &self.page)
            .field("page_size", &self.page_size)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}
