use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, info};

use super::connection::JsonConnection;
use crate::backend::{domain::models::record::DailyRecord, storage::traits::RecordStorage};

/// Records stored as a single JSON array in `records.json`
#[derive(Clone, Debug)]
pub struct JsonRecordRepository {
    connection: JsonConnection,
}

impl JsonRecordRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }

    fn read_records(&self) -> Result<Vec<DailyRecord>> {
        let path = self.connection.records_file_path();
        Ok(self.connection.read_document(&path)?.unwrap_or_default())
    }

    fn write_records(&self, records: &[DailyRecord]) -> Result<()> {
        let path = self.connection.records_file_path();
        self.connection.write_document(&path, records)
    }
}

#[async_trait]
impl RecordStorage for JsonRecordRepository {
    async fn load_records(&self) -> Result<Vec<DailyRecord>> {
        let records = self.read_records()?;
        debug!("Loaded {} records", records.len());
        Ok(records)
    }

    async fn save_records(&self, records: &[DailyRecord]) -> Result<()> {
        let _guard = self.connection.lock_writes().await;
        self.write_records(records)?;
        info!("Saved {} records", records.len());
        Ok(())
    }

    async fn get_record(&self, record_id: &str) -> Result<Option<DailyRecord>> {
        let records = self.read_records()?;
        Ok(records.into_iter().find(|r| r.id == record_id))
    }

    async fn upsert_record(&self, record: &DailyRecord) -> Result<bool> {
        let _guard = self.connection.lock_writes().await;
        let mut records = self.read_records()?;

        let replaced = match records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => {
                *existing = record.clone();
                true
            }
            None => {
                records.push(record.clone());
                false
            }
        };

        self.write_records(&records)?;
        debug!("Upserted record {} (replaced: {})", record.id, replaced);
        Ok(replaced)
    }

    async fn delete_record(&self, record_id: &str) -> Result<bool> {
        let _guard = self.connection.lock_writes().await;
        let mut records = self.read_records()?;
        let before = records.len();
        records.retain(|r| r.id != record_id);

        if records.len() == before {
            return Ok(false);
        }

        self.write_records(&records)?;
        info!("Deleted record {}", record_id);
        Ok(true)
    }
}
