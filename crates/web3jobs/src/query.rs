//! Free-text and sector filtering over the job list.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::{JobPosting, Sector};
use crate::error::ParseTagError;

/// Sector restriction applied before the text match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum SectorFilter {
    #[default]
    All,
    Only(Sector),
}

impl SectorFilter {
    pub fn matches(self, sector: Sector) -> bool {
        match self {
            SectorFilter::All => true,
            SectorFilter::Only(wanted) => wanted == sector,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            SectorFilter::All => "all",
            SectorFilter::Only(sector) => sector.id(),
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            SectorFilter::All => "All Jobs",
            SectorFilter::Only(sector) => sector.display_name(),
        }
    }
}

impl From<Sector> for SectorFilter {
    fn from(sector: Sector) -> Self {
        SectorFilter::Only(sector)
    }
}

impl fmt::Display for SectorFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for SectorFilter {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(SectorFilter::All);
        }
        s.parse::<Sector>().map(SectorFilter::Only)
    }
}

impl From<SectorFilter> for String {
    fn from(filter: SectorFilter) -> Self {
        filter.id().to_string()
    }
}

impl TryFrom<String> for SectorFilter {
    type Error = ParseTagError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// The search box and sector tabs, as one value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobQuery {
    pub sector: SectorFilter,
    pub text: String,
}

impl JobQuery {
    pub fn new(sector: SectorFilter, text: impl Into<String>) -> Self {
        Self {
            sector,
            text: text.into(),
        }
    }

    pub fn apply<'a>(&self, jobs: &'a [JobPosting]) -> Vec<&'a JobPosting> {
        filter(jobs, self.sector, &self.text)
    }
}

/// Returns the postings that pass the sector filter and contain `query`.
///
/// The match is a case-insensitive substring test against the title,
/// employer name, description and each skill tag. An empty query matches
/// everything. Input order is preserved.
pub fn filter<'a>(jobs: &'a [JobPosting], sector: SectorFilter, query: &str) -> Vec<&'a JobPosting> {
    let needle = query.to_lowercase();
    jobs.iter()
        .filter(|job| sector.matches(job.sector))
        .filter(|job| needle.is_empty() || matches_text(job, &needle))
        .collect()
}

/// `needle` must already be lowercased.
fn matches_text(job: &JobPosting, needle: &str) -> bool {
    job.title.to_lowercase().contains(needle)
        || job.company_name.to_lowercase().contains(needle)
        || job.description.to_lowercase().contains(needle)
        || job
            .skills
            .iter()
            .any(|skill| skill.to_lowercase().contains(needle))
}
