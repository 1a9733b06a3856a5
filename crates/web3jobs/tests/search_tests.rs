//! Filtering and pagination properties over a hand-built job list.

mod common;

use std::num::NonZeroUsize;

use common::{numbered_jobs, JobBuilder};
use web3jobs::{filter, page_labels, paginate, JobPosting, PageLabel, Sector, SectorFilter};

fn board_jobs() -> Vec<JobPosting> {
    vec![
        JobBuilder::new(1)
            .title("Senior Solidity Engineer")
            .company(1, "Chainalysis")
            .skills(&["Solidity", "Rust"])
            .build(),
        JobBuilder::new(2)
            .title("Growth Marketer")
            .company(2, "Fireblocks")
            .sector(Sector::Marketing)
            .description("Own our DeFi launch campaigns.")
            .build(),
        JobBuilder::new(3)
            .title("Product Designer")
            .company(3, "Zero Hash")
            .sector(Sector::Design)
            .skills(&["Figma"])
            .build(),
        JobBuilder::new(4)
            .title("Account Executive")
            .company(9, "Unlisted Labs")
            .sector(Sector::Sales)
            .build(),
        JobBuilder::new(5)
            .title("Protocol Engineer")
            .company(2, "Fireblocks")
            .skills(&["Go", "RUST"])
            .build(),
    ]
}

/// A filter case.
struct SearchCase {
    name: &'static str,
    sector: SectorFilter,
    query: &'static str,
    expected_ids: &'static [u32],
}

const SEARCH_CASES: &[SearchCase] = &[
    SearchCase {
        name: "everything",
        sector: SectorFilter::All,
        query: "",
        expected_ids: &[1, 2, 3, 4, 5],
    },
    SearchCase {
        name: "skill_any_case",
        sector: SectorFilter::All,
        query: "rust",
        expected_ids: &[1, 5],
    },
    SearchCase {
        name: "employer_name",
        sector: SectorFilter::All,
        query: "FIREBLOCKS",
        expected_ids: &[2, 5],
    },
    SearchCase {
        name: "description_text",
        sector: SectorFilter::All,
        query: "defi",
        expected_ids: &[2],
    },
    SearchCase {
        name: "sector_and_text",
        sector: SectorFilter::Only(Sector::Engineering),
        query: "engineer",
        expected_ids: &[1, 5],
    },
    SearchCase {
        name: "sector_excludes_text_match",
        sector: SectorFilter::Only(Sector::Design),
        query: "engineer",
        expected_ids: &[],
    },
    SearchCase {
        name: "location_is_not_searched",
        sector: SectorFilter::All,
        query: "remote",
        expected_ids: &[],
    },
];

#[test]
fn test_search_cases() {
    let jobs = board_jobs();
    for case in SEARCH_CASES {
        let ids: Vec<u32> = filter(&jobs, case.sector, case.query)
            .iter()
            .map(|j| j.id)
            .collect();
        assert_eq!(ids, case.expected_ids, "case '{}'", case.name);
    }
}

#[test]
fn test_results_are_ordered_subsequence() {
    let jobs = board_jobs();
    let sectors = std::iter::once(SectorFilter::All).chain(Sector::ALL.map(SectorFilter::Only));
    for sector in sectors {
        for query in ["", "e", "engineer", "rust", "zzz"] {
            let result = filter(&jobs, sector, query);
            let mut cursor = jobs.iter();
            for job in &result {
                assert!(sector.matches(job.sector));
                assert!(
                    cursor.any(|j| j.id == job.id),
                    "{:?}/{} broke input order",
                    sector,
                    query
                );
            }
        }
    }
}

#[test]
fn test_filter_is_idempotent() {
    let jobs = board_jobs();
    for query in ["", "engineer", "fire", "figma"] {
        let once: Vec<JobPosting> = filter(&jobs, SectorFilter::All, query)
            .into_iter()
            .cloned()
            .collect();
        let twice: Vec<JobPosting> = filter(&once, SectorFilter::All, query)
            .into_iter()
            .cloned()
            .collect();
        assert_eq!(once, twice);
    }
}

#[test]
fn test_pages_partition_results() {
    for len in [0u32, 1, 9, 10, 11, 37] {
        let jobs = numbered_jobs(len);
        for size in [1usize, 3, 10, 50] {
            let size = NonZeroUsize::new(size).unwrap();
            let first = paginate(&jobs, size, 1);
            let mut seen = Vec::new();
            for page in 1..=first.total_pages {
                seen.extend(paginate(&jobs, size, page).items.iter().map(|j| j.id));
            }
            let expected: Vec<u32> = jobs.iter().map(|j| j.id).collect();
            assert_eq!(seen, expected, "len {} size {}", len, size);
        }
    }
}

#[test]
fn test_empty_results_have_one_page() {
    let jobs: Vec<JobPosting> = vec![];
    let page = paginate(&jobs, NonZeroUsize::new(10).unwrap(), 1);
    assert_eq!(page.total_pages, 1);
    assert!(page.items.is_empty());
}

#[test]
fn test_labels_never_repeat_gaps() {
    for total in 1..=12 {
        for current in 1..=total {
            let labels = page_labels(current, total);
            assert_eq!(labels.first(), Some(&PageLabel::Page(1)));
            assert_eq!(labels.last(), Some(&PageLabel::Page(total)));
            for pair in labels.windows(2) {
                assert!(!(pair[0] == PageLabel::Gap && pair[1] == PageLabel::Gap));
            }
            for near in current.saturating_sub(1).max(1)..=(current + 1).min(total) {
                assert!(labels.contains(&PageLabel::Page(near)));
            }
        }
    }
}
