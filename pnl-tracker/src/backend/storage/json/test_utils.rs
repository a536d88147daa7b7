/// Test utilities for storage and service tests
///
/// `TestEnvironment` owns a temporary data directory that is removed when the
/// environment is dropped, even if the test panics.
use anyhow::Result;
use std::path::PathBuf;
use tempfile::TempDir;

use super::connection::JsonConnection;
use super::{JsonRecordRepository, JsonStructureRepository};
use crate::backend::storage::traits::Connection;

pub struct TestEnvironment {
    /// Kept alive so the directory outlives the test body
    _temp_dir: TempDir,
    pub connection: JsonConnection,
    pub base_path: PathBuf,
}

impl TestEnvironment {
    pub async fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let base_path = temp_dir.path().to_path_buf();
        let connection = JsonConnection::new(&base_path)?;

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            connection,
            base_path,
        })
    }

    pub fn record_repository(&self) -> JsonRecordRepository {
        self.connection.create_record_repository()
    }

    pub fn structure_repository(&self) -> JsonStructureRepository {
        self.connection.create_structure_repository()
    }
}
