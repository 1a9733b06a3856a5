//! Shared test utilities for web3jobs integration tests.
//!
//! This module provides:
//! - `TestBoard` for running a controller over an isolated SQLite session file
//! - Builder patterns for creating postings and company drafts

pub mod builders;
pub mod harness;

pub use builders::*;
pub use harness::TestBoard;
