//! Builders for postings and company drafts.

#![allow(dead_code)]

use chrono::NaiveDate;
use web3jobs::{AtsType, CompanyDraft, CompanyId, JobId, JobPosting, Sector};

/// Builder for `JobPosting` with neutral defaults.
pub struct JobBuilder {
    job: JobPosting,
}

impl JobBuilder {
    pub fn new(id: JobId) -> Self {
        Self {
            job: JobPosting {
                id,
                title: format!("Role {}", id),
                company_name: "Acme".to_string(),
                company_id: 1,
                location: "Remote".to_string(),
                salary: None,
                sector: Sector::Engineering,
                description: "Build things.".to_string(),
                full_description: None,
                requirements: None,
                skills: vec![],
                ats_type: AtsType::Lever,
                job_url: format!("https://example.com/job{}", id),
                posted_date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            },
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.job.title = title.to_string();
        self
    }

    pub fn company(mut self, id: CompanyId, name: &str) -> Self {
        self.job.company_id = id;
        self.job.company_name = name.to_string();
        self
    }

    pub fn sector(mut self, sector: Sector) -> Self {
        self.job.sector = sector;
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.job.description = description.to_string();
        self
    }

    pub fn skills(mut self, skills: &[&str]) -> Self {
        self.job.skills = skills.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn posted(mut self, date: NaiveDate) -> Self {
        self.job.posted_date = date;
        self
    }

    pub fn build(self) -> JobPosting {
        self.job
    }
}

/// `count` engineering postings with ids `1..=count`.
pub fn numbered_jobs(count: u32) -> Vec<JobPosting> {
    (1..=count).map(|id| JobBuilder::new(id).build()).collect()
}

/// Builder for `CompanyDraft`, mirroring the admin form.
pub struct CompanyDraftBuilder {
    draft: CompanyDraft,
}

impl CompanyDraftBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            draft: CompanyDraft::new(name, format!("https://jobs.lever.co/{}", name.to_lowercase())),
        }
    }

    pub fn board(mut self, url: &str) -> Self {
        self.draft.job_board_url = url.to_string();
        self
    }

    pub fn website(mut self, url: &str) -> Self {
        self.draft.website_url = url.to_string();
        self
    }

    pub fn logo(mut self, url: &str) -> Self {
        self.draft.logo_url = url.to_string();
        self
    }

    pub fn ats(mut self, ats: AtsType) -> Self {
        self.draft.ats_type = Some(ats);
        self
    }

    pub fn description(mut self, text: &str) -> Self {
        self.draft.description = Some(text.to_string());
        self
    }

    pub fn build(self) -> CompanyDraft {
        self.draft
    }
}
