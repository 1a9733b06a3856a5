//! Bundled sample catalog used when no catalog file is configured.

use chrono::{Days, NaiveDate};

use super::loader::Catalog;
use super::model::{AtsType, Company, JobPosting, Sector};

const SAMPLE_JOB_COUNT: u32 = 50;

const TITLES: [&str; 10] = [
    "Senior Blockchain Engineer",
    "Head of Marketing",
    "Enterprise Sales Manager",
    "Smart Contract Developer",
    "Product Designer",
    "Growth Hacker",
    "Security Engineer",
    "Community Manager",
    "Full Stack Engineer",
    "Business Development Lead",
];

const EMPLOYERS: [&str; 10] = [
    "Chainalysis",
    "Fireblocks",
    "Zero Hash",
    "Crypto.com",
    "IO Global",
    "Uniswap Labs",
    "Coinbase",
    "Polygon",
    "Alchemy",
    "Circle",
];

const LOCATIONS: [&str; 5] = [
    "Remote",
    "New York, NY",
    "San Francisco, CA",
    "London, UK",
    "Singapore",
];

const SECTORS: [Sector; 5] = [
    Sector::Engineering,
    Sector::Marketing,
    Sector::Sales,
    Sector::Design,
    Sector::Operations,
];

const SKILLS: [&str; 6] = ["Solidity", "Rust", "React", "Node.js", "TypeScript", "Web3"];

const DESCRIPTION: &str = "Join our team to build the future of Web3. We're looking for talented \
individuals passionate about decentralized technology.";

/// Builds the 50-posting sample catalog.
///
/// Posting dates are spread over the 30 days before `today`, so the output is
/// deterministic for a given date.
pub fn sample_catalog(today: NaiveDate) -> Catalog {
    let jobs = (0..SAMPLE_JOB_COUNT).map(|i| sample_job(i, today)).collect();
    Catalog {
        jobs,
        companies: sample_companies(),
    }
}

fn sample_job(i: u32, today: NaiveDate) -> JobPosting {
    let idx = i as usize;
    let salary = (i % 3 != 0).then(|| format!("${}k - ${}k", 100 + i * 2, 150 + i * 3));
    let skill_count = 3 + idx % 4;
    let posted_date = today
        .checked_sub_days(Days::new(u64::from((i * 7) % 30)))
        .unwrap_or(today);

    JobPosting {
        id: i + 1,
        title: TITLES[idx % TITLES.len()].to_string(),
        company_name: EMPLOYERS[idx % EMPLOYERS.len()].to_string(),
        company_id: (i % 10) + 1,
        location: LOCATIONS[idx % LOCATIONS.len()].to_string(),
        salary,
        sector: SECTORS[idx % SECTORS.len()],
        description: DESCRIPTION.to_string(),
        full_description: None,
        requirements: None,
        skills: SKILLS[..skill_count].iter().map(|s| s.to_string()).collect(),
        ats_type: AtsType::ALL[idx % AtsType::ALL.len()],
        job_url: format!("https://example.com/job{}", i + 1),
        posted_date,
    }
}

fn sample_companies() -> Vec<Company> {
    vec![
        Company {
            id: 1,
            name: "Chainalysis".to_string(),
            website_url: "https://chainalysis.com".to_string(),
            logo_url: "https://images.unsplash.com/photo-1639762681485-074b7f938ba0?w=100&h=100&fit=crop"
                .to_string(),
            job_board_url: "https://jobs.ashbyhq.com/chainalysis-careers".to_string(),
            ats_type: AtsType::Ashby,
            description: Some("Blockchain data platform".to_string()),
            active: true,
        },
        Company {
            id: 2,
            name: "Fireblocks".to_string(),
            website_url: "https://fireblocks.com".to_string(),
            logo_url: "https://images.unsplash.com/photo-1621504450181-5d356f61d307?w=100&h=100&fit=crop"
                .to_string(),
            job_board_url: "https://job-boards.greenhouse.io/fireblocks/".to_string(),
            ats_type: AtsType::Greenhouse,
            description: Some("Digital asset custody platform".to_string()),
            active: true,
        },
        Company {
            id: 3,
            name: "Zero Hash".to_string(),
            website_url: "https://zerohash.com".to_string(),
            logo_url: "https://images.unsplash.com/photo-1605792657660-596af9009e82?w=100&h=100&fit=crop"
                .to_string(),
            job_board_url: "https://zero-hash.breezy.hr/".to_string(),
            ats_type: AtsType::Breezy,
            description: Some("B2B crypto infrastructure".to_string()),
            active: true,
        },
    ]
}
