//! Job postings, companies and the tags that classify them.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ParseTagError;

pub type JobId = u32;
pub type CompanyId = u32;

/// Fixed category a posting belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sector {
    Engineering,
    Sales,
    Marketing,
    Design,
    Operations,
}

impl Sector {
    /// Sectors in the order the board lists them.
    pub const ALL: [Sector; 5] = [
        Sector::Engineering,
        Sector::Sales,
        Sector::Marketing,
        Sector::Design,
        Sector::Operations,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Sector::Engineering => "engineering",
            Sector::Sales => "sales",
            Sector::Marketing => "marketing",
            Sector::Design => "design",
            Sector::Operations => "operations",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Sector::Engineering => "Engineering",
            Sector::Sales => "Sales",
            Sector::Marketing => "Marketing",
            Sector::Design => "Design",
            Sector::Operations => "Operations",
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Sector {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sector::ALL
            .into_iter()
            .find(|sector| sector.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseTagError::new("sector", s))
    }
}

/// Applicant-tracking system a posting or job board originates from.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum AtsType {
    #[default]
    Lever,
    Greenhouse,
    Ashby,
    Breezy,
    Workable,
}

/// Host fragments that identify each ATS in a job-board URL.
const ATS_HOST_PATTERNS: [(AtsType, &str); 5] = [
    (AtsType::Lever, "jobs.lever.co"),
    (AtsType::Greenhouse, "greenhouse.io"),
    (AtsType::Ashby, "ashbyhq.com"),
    (AtsType::Breezy, "breezy.hr"),
    (AtsType::Workable, "workable.com"),
];

impl AtsType {
    pub const ALL: [AtsType; 5] = [
        AtsType::Lever,
        AtsType::Greenhouse,
        AtsType::Ashby,
        AtsType::Breezy,
        AtsType::Workable,
    ];

    pub fn id(self) -> &'static str {
        match self {
            AtsType::Lever => "lever",
            AtsType::Greenhouse => "greenhouse",
            AtsType::Ashby => "ashby",
            AtsType::Breezy => "breezy",
            AtsType::Workable => "workable",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            AtsType::Lever => "Lever",
            AtsType::Greenhouse => "Greenhouse",
            AtsType::Ashby => "Ashby",
            AtsType::Breezy => "Breezy",
            AtsType::Workable => "Workable",
        }
    }

    /// Recognizes the ATS behind a job-board URL by its host.
    pub fn detect(url: &str) -> Option<Self> {
        let url = url.to_ascii_lowercase();
        ATS_HOST_PATTERNS
            .into_iter()
            .find(|(_, host)| url.contains(host))
            .map(|(ats, _)| ats)
    }
}

impl fmt::Display for AtsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for AtsType {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AtsType::ALL
            .into_iter()
            .find(|ats| ats.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseTagError::new("ATS type", s))
    }
}

/// A single job listing.
///
/// Field names follow the board's JSON feed; the camelCase spellings used by
/// older feeds are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: JobId,
    pub title: String,
    pub company_name: String,
    pub company_id: CompanyId,
    pub location: String,
    /// Free-text compensation, e.g. `$120k - $180k`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    pub sector: Sector,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(alias = "atsType")]
    pub ats_type: AtsType,
    #[serde(alias = "jobUrl")]
    pub job_url: String,
    #[serde(alias = "postedDate")]
    pub posted_date: NaiveDate,
}

/// A company whose job board feeds the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    #[serde(default)]
    pub website_url: String,
    #[serde(default)]
    pub logo_url: String,
    pub job_board_url: String,
    #[serde(default)]
    pub ats_type: AtsType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Cleared when the company is deleted; records are never removed.
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

/// Form input for registering a new company.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub website_url: String,
    #[serde(default)]
    pub logo_url: String,
    #[serde(default)]
    pub job_board_url: String,
    /// Detected from `job_board_url` when absent.
    #[serde(default)]
    pub ats_type: Option<AtsType>,
    #[serde(default)]
    pub description: Option<String>,
}

impl CompanyDraft {
    pub fn new(name: impl Into<String>, job_board_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            job_board_url: job_board_url.into(),
            ..Self::default()
        }
    }
}
