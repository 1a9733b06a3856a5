use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::model::{Company, JobPosting};
use crate::error::CatalogError;

/// Everything the job data provider hands to the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub jobs: Vec<JobPosting>,
    #[serde(default)]
    pub companies: Vec<Company>,
}

pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog, CatalogError> {
    let path = path.as_ref();
    let _span = tracing::info_span!("catalog.load").entered();

    let content = std::fs::read_to_string(path).map_err(|e| CatalogError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    let catalog = load_catalog_from_str(&content)?;
    log::info!(
        "Loaded {} jobs and {} companies from {}",
        catalog.jobs.len(),
        catalog.companies.len(),
        path.display()
    );
    Ok(catalog)
}

pub fn load_catalog_from_str(content: &str) -> Result<Catalog, CatalogError> {
    let catalog: Catalog = serde_json::from_str(content)?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

fn validate_catalog(catalog: &Catalog) -> Result<(), CatalogError> {
    let mut job_ids = HashSet::new();
    for job in &catalog.jobs {
        if !job_ids.insert(job.id) {
            return Err(CatalogError::DuplicateJob(job.id));
        }
    }

    let mut company_ids = HashSet::new();
    for company in &catalog.companies {
        if !company_ids.insert(company.id) {
            return Err(CatalogError::DuplicateCompany(company.id));
        }
    }

    // Dangling employer references are tolerated; the logo lookup falls back.
    let dangling = catalog
        .jobs
        .iter()
        .filter(|job| !company_ids.contains(&job.company_id))
        .count();
    if dangling > 0 {
        log::warn!(
            "{} jobs reference companies missing from the catalog",
            dangling
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CATALOG_JSON: &str = r#"
    {
        "jobs": [
            {
                "id": 1,
                "title": "Senior Smart Contract Engineer",
                "company_name": "Crypto.com",
                "company_id": 1,
                "location": "Remote",
                "salary": "$180k - $250k",
                "sector": "engineering",
                "description": "Build secure smart contracts.",
                "full_description": "Build secure smart contracts for DeFi protocols.",
                "atsType": "lever",
                "jobUrl": "https://jobs.lever.co/crypto/abc123",
                "postedDate": "2026-02-01",
                "skills": ["Solidity", "Rust", "Security"],
                "requirements": "5+ years blockchain development"
            }
        ],
        "companies": [
            {
                "id": 1,
                "name": "Crypto.com",
                "website_url": "https://crypto.com",
                "logo_url": "https://example.com/logo.png",
                "job_board_url": "https://jobs.lever.co/crypto",
                "ats_type": "lever",
                "description": "Leading cryptocurrency platform",
                "active": true
            }
        ]
    }
    "#;

    #[test]
    fn test_load_catalog_from_str() {
        let catalog = load_catalog_from_str(CATALOG_JSON).unwrap();
        assert_eq!(catalog.jobs.len(), 1);
        assert_eq!(catalog.companies.len(), 1);
        assert_eq!(
            catalog.jobs[0].requirements.as_deref(),
            Some("5+ years blockchain development")
        );
    }

    #[test]
    fn test_load_catalog_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", CATALOG_JSON).unwrap();
        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.jobs[0].title, "Senior Smart Contract Engineer");
    }

    #[test]
    fn test_missing_file() {
        let result = load_catalog("/nonexistent/catalog.json");
        assert!(matches!(result, Err(CatalogError::ReadFile { .. })));
    }

    #[test]
    fn test_companies_optional() {
        let json = r#"{"jobs": []}"#;
        let catalog = load_catalog_from_str(json).unwrap();
        assert!(catalog.companies.is_empty());
    }

    #[test]
    fn test_duplicate_job_ids_rejected() {
        let mut catalog = load_catalog_from_str(CATALOG_JSON).unwrap();
        catalog.jobs.push(catalog.jobs[0].clone());
        let json = serde_json::to_string(&catalog).unwrap();
        let result = load_catalog_from_str(&json);
        assert!(matches!(result, Err(CatalogError::DuplicateJob(1))));
    }

    #[test]
    fn test_unknown_sector_rejected() {
        let json = CATALOG_JSON.replace("\"engineering\"", "\"legal\"");
        let result = load_catalog_from_str(&json);
        assert!(matches!(result, Err(CatalogError::ParseJson(_))));
    }
}
