//! Test harness for isolated board execution.
//!
//! `TestBoard` owns a temp directory holding the SQLite session file, so a
//! board can be dropped and reopened to check what survives a restart.

#![allow(dead_code)]

use std::path::PathBuf;

use chrono::NaiveDate;
use tempfile::TempDir;

use web3jobs::config::{BoardConfig, StorageBackend, StorageConfig};
use web3jobs::BoardController;

pub const ADMIN_EMAIL: &str = "shardulbuzo@gmail.com";
pub const ADMIN_PASSWORD: &str = "birdisthewordA1$";

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 2, 10).unwrap()
}

pub struct TestBoard {
    temp_dir: TempDir,
    pub config: BoardConfig,
}

impl TestBoard {
    /// Board over the bundled sample catalog and a fresh session file.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config = BoardConfig {
            storage: StorageConfig {
                backend: StorageBackend::Sqlite,
                path: Some(
                    temp_dir
                        .path()
                        .join("data")
                        .join("session.db")
                        .to_string_lossy()
                        .into_owned(),
                ),
            },
            ..BoardConfig::default()
        };
        Self { temp_dir, config }
    }

    pub fn session_path(&self) -> PathBuf {
        self.temp_dir.path().join("data").join("session.db")
    }

    /// Writes `content` into the temp directory and points the catalog at it.
    pub fn with_catalog(mut self, content: &str) -> Self {
        let path = self.temp_dir.path().join("jobs.json");
        std::fs::write(&path, content).expect("Failed to write catalog");
        self.config.catalog.path = Some(path.to_string_lossy().into_owned());
        self
    }

    /// Opens a controller, restoring whatever session the file holds.
    pub fn open(&self) -> BoardController {
        BoardController::from_config(&self.config, today()).expect("Failed to open board")
    }
}
