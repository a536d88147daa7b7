//! # Storage Traits
//!
//! Storage abstractions used by the domain layer. Services only see these
//! traits, so the JSON-file backend can be swapped without touching them.

use anyhow::Result;
use async_trait::async_trait;

use crate::backend::domain::models::{record::DailyRecord, structure::CustomExpenseStructure};

/// Persistence for daily records
#[async_trait]
pub trait RecordStorage: Send + Sync {
    /// Load every stored record, in storage order
    async fn load_records(&self) -> Result<Vec<DailyRecord>>;

    /// Replace the full record set (used by restore)
    async fn save_records(&self, records: &[DailyRecord]) -> Result<()>;

    /// Retrieve a record by id (the ISO date)
    async fn get_record(&self, record_id: &str) -> Result<Option<DailyRecord>>;

    /// Insert a record, or replace the one with the same id.
    /// Returns true when an existing record was replaced.
    async fn upsert_record(&self, record: &DailyRecord) -> Result<bool>;

    /// Delete a record by id.
    /// Returns true if the record was found and deleted, false otherwise.
    async fn delete_record(&self, record_id: &str) -> Result<bool>;
}

/// Persistence for the saved custom expense structure
#[async_trait]
pub trait StructureStorage: Send + Sync {
    /// The stored structure, or None if nothing has been saved yet
    async fn load_structure(&self) -> Result<Option<CustomExpenseStructure>>;

    /// Replace the stored structure
    async fn save_structure(&self, structure: &CustomExpenseStructure) -> Result<()>;
}

/// Factory for repositories over one storage location.
///
/// Services are generic over the connection so tests can point them at a
/// temporary directory.
pub trait Connection: Send + Sync + Clone {
    type RecordRepository: RecordStorage + Clone;
    type StructureRepository: StructureStorage + Clone;

    fn create_record_repository(&self) -> Self::RecordRepository;

    fn create_structure_repository(&self) -> Self::StructureRepository;
}
