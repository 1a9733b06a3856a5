//! Plain-text rendering of board views.

use std::fmt::Write as _;

use web3jobs::{BoardStats, BoardView, Company, Identity, JobCard, PageLabel, SessionSummary};

pub fn view(view: &BoardView) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} jobs{}{}",
        view.total_results,
        if view.query.is_empty() {
            String::new()
        } else {
            format!(" matching \"{}\"", view.query)
        },
        match view.sector {
            web3jobs::SectorFilter::All => String::new(),
            sector => format!(" in {}", sector.display_name()),
        }
    );

    if view.cards.is_empty() {
        let _ = writeln!(out, "No jobs found. Try adjusting your filters.");
        return out;
    }

    for card in &view.cards {
        out.push_str(&job_card(card));
    }

    if let Some((from, to)) = view.range {
        let _ = writeln!(
            out,
            "Showing {}-{} of {}   {}",
            from,
            to,
            view.total_results,
            labels(&view.labels, view.page)
        );
    }
    out
}

pub fn job_card(card: &JobCard) -> String {
    let job = &card.job;
    let mut out = String::new();
    let marker = if card.saved { "*" } else { " " };
    let _ = writeln!(out, "{} [{}] {} - {}", marker, job.id, job.title, job.company_name);
    let _ = writeln!(
        out,
        "      {} | {} | {} | posted {}",
        job.location,
        job.salary.as_deref().unwrap_or("Salary not listed"),
        job.sector.display_name(),
        job.posted_date
    );
    if !job.skills.is_empty() {
        let _ = writeln!(out, "      {}", job.skills.join(", "));
    }
    let _ = writeln!(out, "      {} via {}", job.job_url, job.ats_type.display_name());
    out
}

fn labels(labels: &[PageLabel], current: usize) -> String {
    labels
        .iter()
        .map(|label| match label {
            PageLabel::Page(n) if *n == current => format!("[{}]", n),
            PageLabel::Page(n) => n.to_string(),
            PageLabel::Gap => "...".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn saved(cards: &[JobCard]) -> String {
    if cards.is_empty() {
        return "No saved jobs yet.\n".to_string();
    }
    cards.iter().map(job_card).collect()
}

pub fn session(summary: &SessionSummary) -> String {
    if !summary.signed_in {
        return "Not signed in.\n".to_string();
    }
    format!(
        "{} <{}>{}\n{} saved jobs\n",
        summary.name.as_deref().unwrap_or_default(),
        summary.email.as_deref().unwrap_or_default(),
        if summary.is_admin { " (admin)" } else { "" },
        summary.saved_count
    )
}

pub fn signed_in(identity: &Identity) -> String {
    format!(
        "Signed in as {}{}\n",
        identity.name,
        if identity.is_admin { " (admin)" } else { "" }
    )
}

pub fn companies<'a>(companies: impl Iterator<Item = &'a Company>) -> String {
    let mut out = String::new();
    for company in companies {
        let _ = writeln!(
            out,
            "[{}] {}{} - {} ({})",
            company.id,
            company.name,
            if company.active { "" } else { " (inactive)" },
            company.job_board_url,
            company.ats_type.display_name()
        );
    }
    if out.is_empty() {
        out.push_str("No companies.\n");
    }
    out
}

pub fn stats(stats: &BoardStats) -> String {
    format!(
        "Total jobs:       {}\nActive companies: {}\nJobs this month:  {}\n",
        stats.total_jobs, stats.active_companies, stats.jobs_this_month
    )
}
