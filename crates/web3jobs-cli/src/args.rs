use std::path::PathBuf;

use clap::{Parser, Subcommand};
use web3jobs::{AtsType, CompanyId, JobId, SectorFilter, SocialProvider};

/// web3jobs - browse, bookmark and administer a Web3 job board
#[derive(Parser, Debug)]
#[command(name = "web3jobs")]
#[command(version)]
#[command(about = "Terminal front end for the web3jobs board", long_about = None)]
pub struct Cli {
    /// Board configuration file (JSON)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long = "json", global = true)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search postings by text and sector
    Search {
        /// Matched against title, company, description and skills
        #[arg(default_value = "")]
        query: String,

        /// Sector id, or "all"
        #[arg(short = 's', long = "sector", default_value = "all")]
        sector: SectorFilter,

        #[arg(short = 'p', long = "page", default_value_t = 1)]
        page: usize,
    },

    /// List saved postings
    Saved,

    /// Save or unsave a posting
    Save {
        job_id: JobId,
    },

    /// Sign in with email and password
    Login {
        #[arg(long = "email")]
        email: String,

        #[arg(long = "password")]
        password: String,
    },

    /// Sign in through a social provider (google, linkedin)
    Social {
        provider: SocialProvider,
    },

    /// Sign out and forget saved postings
    Logout,

    /// Show the signed-in user
    Whoami,

    /// List companies
    Companies {
        /// Include deactivated companies
        #[arg(long = "all")]
        all: bool,
    },

    /// Register a company (admin)
    AddCompany {
        #[arg(long = "name")]
        name: String,

        #[arg(long = "board")]
        job_board_url: String,

        #[arg(long = "website", default_value = "")]
        website_url: String,

        #[arg(long = "logo", default_value = "")]
        logo_url: String,

        /// Detected from the board URL when omitted
        #[arg(long = "ats")]
        ats_type: Option<AtsType>,

        #[arg(long = "description")]
        description: Option<String>,
    },

    /// Deactivate a company (admin)
    DeactivateCompany {
        id: CompanyId,
    },

    /// Dashboard statistics (admin)
    Stats,
}
