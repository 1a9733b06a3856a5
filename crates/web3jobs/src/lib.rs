pub mod admin;
pub mod broadcast;
pub mod catalog;
pub mod config;
pub mod controller;
pub mod db;
pub mod error;
pub mod pager;
pub mod query;
pub mod sanitize;
pub mod secrets;
pub mod session;
pub mod storage;

pub use admin::{AdminMutator, BoardStats};
pub use broadcast::{BoardEvent, BoardEventBroadcaster};
pub use catalog::{
    load_catalog, sample_catalog, AtsType, Catalog, Company, CompanyDraft, CompanyId, JobId,
    JobPosting, JobStore, Sector,
};
pub use config::{load_config, BoardConfig};
pub use controller::{BoardController, BoardView, JobCard, SessionSummary};
pub use error::{AdminError, BoardError, CatalogError, ConfigError, ParseTagError, Result};
pub use pager::{paginate, page_labels, Page, PageLabel};
pub use query::{filter, JobQuery, SectorFilter};
pub use secrets::{resolve_admin_password, PasswordSource, SecretError};
pub use session::{BookmarkOutcome, Identity, SessionError, SessionManager, SessionState, SocialProvider};
pub use storage::{KeyValueStore, KvOp, MemoryStore, SqliteStore, StorageError};
