/// Test utilities for storage and service tests.
///
/// `TestEnvironment` owns a temporary data directory that is removed when it
/// goes out of scope, even if the test panics.
use anyhow::Result;
use std::path::PathBuf;
use tempfile::TempDir;

use super::connection::CsvConnection;

pub struct TestEnvironment {
    /// Kept alive so the directory survives until drop
    _temp_dir: TempDir,
    pub connection: CsvConnection,
    pub base_path: PathBuf,
}

impl TestEnvironment {
    pub async fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let base_path = temp_dir.path().to_path_buf();
        let connection = CsvConnection::new(&base_path)?;

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            connection,
            base_path,
        })
    }
}
