use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

use super::{JsonRecordRepository, JsonStructureRepository};
use crate::backend::storage::traits::Connection;

const RECORDS_FILE_NAME: &str = "records.json";
const STRUCTURE_FILE_NAME: &str = "custom-structure.json";

/// JsonConnection owns the data directory and the JSON documents inside it
#[derive(Clone, Debug)]
pub struct JsonConnection {
    base_directory: Arc<PathBuf>,
    /// Serializes read-modify-write cycles on the documents
    write_lock: Arc<Mutex<()>>,
}

impl JsonConnection {
    /// Create a connection rooted at `base_directory`, creating it if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .with_context(|| format!("Failed to create data directory {}", base_path.display()))?;
            info!("Created data directory {}", base_path.display());
        }

        Ok(Self {
            base_directory: Arc::new(base_path),
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn data_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn records_file_path(&self) -> PathBuf {
        self.base_directory.join(RECORDS_FILE_NAME)
    }

    pub fn structure_file_path(&self) -> PathBuf {
        self.base_directory.join(STRUCTURE_FILE_NAME)
    }

    pub(crate) async fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    /// Read and parse a JSON document. A missing file yields `None`.
    pub(crate) fn read_document<T: DeserializeOwned>(&self, path: &Path) -> Result<Option<T>> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("{} does not exist yet", path.display());
                return Ok(None);
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", path.display()));
            }
        };

        let value = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(Some(value))
    }

    /// Serialize `value` to `path` via a temp file and rename
    pub(crate) fn write_document<T: Serialize + ?Sized>(&self, path: &Path, value: &T) -> Result<()> {
        let temp_path = path.with_extension("tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to open {}", temp_path.display()))?;

            let mut writer = BufWriter::new(file);
            serde_json::to_writer(&mut writer, value)?;
            writer.flush()?;
        }

        fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;
        debug!("Wrote {}", path.display());
        Ok(())
    }
}

impl Connection for JsonConnection {
    type RecordRepository = JsonRecordRepository;
    type StructureRepository = JsonStructureRepository;

    fn create_record_repository(&self) -> Self::RecordRepository {
        JsonRecordRepository::new(self.clone())
    }

    fn create_structure_repository(&self) -> Self::StructureRepository {
        JsonStructureRepository::new(self.clone())
    }
}
