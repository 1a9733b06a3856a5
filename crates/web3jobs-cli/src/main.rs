mod args;
mod error;
mod logging;
mod render;

use std::process::ExitCode;

use chrono::{Local, NaiveDate};
use clap::Parser;
use serde::Serialize;

use args::{Cli, Command};
use error::{CliError, Result};
use web3jobs::{load_config, BoardConfig, BoardController, BookmarkOutcome, CompanyDraft};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match run(cli) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(cli: Cli) -> Result<String> {
    let config = match &cli.config {
        Some(path) => load_config(path).map_err(web3jobs::BoardError::from)?,
        None => BoardConfig::default(),
    };
    let today = Local::now().date_naive();
    let mut board = BoardController::from_config(&config, today)?;

    tracing::debug!(command = ?cli.command, "running command");
    execute(&mut board, cli.command, cli.json, today)
}

fn output<T: Serialize>(json: bool, value: &T, text: impl FnOnce(&T) -> String) -> Result<String> {
    if json {
        Ok(format!("{}\n", serde_json::to_string_pretty(value)?))
    } else {
        Ok(text(value))
    }
}

fn execute(
    board: &mut BoardController,
    command: Command,
    json: bool,
    today: NaiveDate,
) -> Result<String> {
    match command {
        Command::Search {
            query,
            sector,
            page,
        } => {
            board.set_query_text(query);
            board.set_sector(sector);
            board.set_page(page);
            output(json, &board.view(), render::view)
        }
        Command::Saved => output(json, &board.saved_jobs(), |cards| render::saved(cards)),
        Command::Save { job_id } => match board.toggle_bookmark(job_id)? {
            BookmarkOutcome::AuthenticationRequired => Err(CliError::LoginRequired),
            outcome => output(json, &outcome.is_saved(), |saved| {
                if *saved {
                    format!("Saved job {}\n", job_id)
                } else {
                    format!("Removed job {} from saved\n", job_id)
                }
            }),
        },
        Command::Login { email, password } => {
            let identity = board.login(&email, &password)?;
            output(json, &identity, render::signed_in)
        }
        Command::Social { provider } => {
            let identity = board.login_social(provider)?;
            output(json, &identity, render::signed_in)
        }
        Command::Logout => {
            board.logout()?;
            output(json, &board.session_summary(), |_| "Signed out.\n".to_string())
        }
        Command::Whoami => output(json, &board.session_summary(), render::session),
        Command::Companies { all } => {
            let companies: Vec<_> = board
                .companies()
                .iter()
                .filter(|c| all || c.active)
                .cloned()
                .collect();
            output(json, &companies, |list| render::companies(list.iter()))
        }
        Command::AddCompany {
            name,
            job_board_url,
            website_url,
            logo_url,
            ats_type,
            description,
        } => {
            let company = board.add_company(CompanyDraft {
                name,
                website_url,
                logo_url,
                job_board_url,
                ats_type,
                description,
            })?;
            output(json, &company, |c| {
                format!("Added company {} ({})\n", c.name, c.id)
            })
        }
        Command::DeactivateCompany { id } => {
            board.deactivate_company(id)?;
            output(json, &id, |id| format!("Deactivated company {}\n", id))
        }
        Command::Stats => {
            let stats = board.dashboard_stats(today)?;
            output(json, &stats, render::stats)
        }
    }
}
