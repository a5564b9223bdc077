//! Helpers shared by the integration tests.
#![allow(dead_code)]

use cinepair::config::Config;
use std::path::{Path, PathBuf};

/// A SQLite file in the temp dir, removed with its WAL/SHM siblings on drop.
pub struct TempDb {
    path: PathBuf,
}

impl TempDb {
    pub fn new(prefix: &str) -> Self {
        let path = std::env::temp_dir().join(format!("{prefix}-{}.db", uuid::Uuid::new_v4()));
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn url(&self) -> String {
        format!("sqlite:{}", self.path.display())
    }

    /// Defaults pointed at this database, with argon2 cheap enough for tests.
    pub fn config(&self) -> Config {
        let mut config = Config::default();
        config.general.database_path = self.url();
        config.security.argon2_memory_cost_kib = 1024;
        config.security.argon2_time_cost = 1;
        config
    }
}

impl Drop for TempDb {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm", "-journal"] {
            let mut file = self.path.clone().into_os_string();
            file.push(suffix);
            let _ = std::fs::remove_file(file);
        }
    }
}

