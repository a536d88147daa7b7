//! Backup and restore of all records plus the custom expense structure.
//!
//! Imports are checked field by field against the backup shape before any
//! data is touched, so a bad file can never leave storage half-restored.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde_json::Value;
use shared::{BackupData, RestorePreview, BACKUP_FORMAT_VERSION, LEGACY_BACKUP_VERSION};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

use crate::backend::{
    domain::{
        commands::backup::{CreateBackupResult, ParsedBackup, RestoreResult},
        expense_structure_service::ExpenseStructureService,
        models::record::RecordValidationError,
        record_service::sort_newest_first,
    },
    io::mappers::{RecordMapper, StructureMapper},
    storage::{Connection, RecordStorage},
};

pub const DEFAULT_BACKUP_FILE_PREFIX: &str = "pnl-backup";

pub const OVERWRITE_WARNING: &str =
    "Warning: This will overwrite all your current data. This action cannot be undone.";
pub const LEGACY_WARNING: &str =
    "Legacy backup file detected. Your custom expense items will not be restored.";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum BackupError {
    #[error("No records to export.")]
    NoRecords,
    #[error("File is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("Invalid file structure at {0}. Please upload a valid backup file.")]
    InvalidStructure(String),
    #[error("Invalid date '{0}' in backup")]
    InvalidDate(String),
    #[error("Backup contains more than one record for {0}")]
    DuplicateDate(String),
}

#[derive(Clone)]
pub struct BackupService<C: Connection> {
    record_repository: C::RecordRepository,
    structure_service: ExpenseStructureService<C>,
    file_prefix: String,
}

impl<C: Connection> BackupService<C> {
    pub fn new(
        connection: Arc<C>,
        structure_service: ExpenseStructureService<C>,
        file_prefix: impl Into<String>,
    ) -> Self {
        let record_repository = connection.create_record_repository();
        Self {
            record_repository,
            structure_service,
            file_prefix: file_prefix.into(),
        }
    }

    /// Snapshot every record and the structure as pretty-printed JSON
    pub async fn create_backup(&self, today: NaiveDate) -> Result<CreateBackupResult> {
        let mut records = self.record_repository.load_records().await?;
        if records.is_empty() {
            return Err(BackupError::NoRecords.into());
        }
        sort_newest_first(&mut records);
        let structure = self.structure_service.get_structure().await?;

        let record_count = records.len();
        let backup = BackupData {
            version: BACKUP_FORMAT_VERSION,
            records: RecordMapper::to_dto_list(records),
            custom_structure: StructureMapper::to_dto(structure),
        };
        let json = serde_json::to_string_pretty(&backup).context("Failed to serialize backup")?;
        let filename = format!("{}-{}.json", self.file_prefix, today.format("%Y-%m-%d"));

        info!("Prepared backup of {} records as {}", record_count, filename);
        Ok(CreateBackupResult {
            backup,
            json,
            filename,
            record_count,
        })
    }

    /// Validate backup text without touching storage
    pub fn parse_backup(text: &str) -> Result<ParsedBackup, BackupError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| BackupError::InvalidJson(e.to_string()))?;

        let (backup, legacy) = if value.is_array() {
            check_records(&value, "$")?;
            let records = decode(value)?;
            debug!("Parsed legacy backup without version or custom structure");
            (
                BackupData {
                    version: LEGACY_BACKUP_VERSION,
                    records,
                    custom_structure: Default::default(),
                },
                true,
            )
        } else {
            check_backup(&value)?;
            (decode::<BackupData>(value)?, false)
        };

        let mut seen = HashSet::new();
        let mut records = Vec::with_capacity(backup.records.len());
        for dto in backup.records {
            let record = RecordMapper::to_domain(dto).map_err(|e| match e {
                RecordValidationError::InvalidDate(date) => BackupError::InvalidDate(date),
                other => BackupError::InvalidStructure(other.to_string()),
            })?;
            if !seen.insert(record.id.clone()) {
                return Err(BackupError::DuplicateDate(record.id));
            }
            records.push(record);
        }
        sort_newest_first(&mut records);

        Ok(ParsedBackup {
            version: backup.version,
            records,
            structure: StructureMapper::to_domain(backup.custom_structure),
            legacy,
        })
    }

    /// What a restore of `backup` would do
    pub fn preview(backup: &ParsedBackup) -> RestorePreview {
        let mut warning = String::new();
        if backup.legacy {
            warning.push_str(LEGACY_WARNING);
            warning.push(' ');
        }
        warning.push_str(OVERWRITE_WARNING);

        RestorePreview {
            version: backup.version,
            record_count: backup.records.len(),
            restores_custom_structure: !backup.structure.is_empty(),
            legacy: backup.legacy,
            warning,
        }
    }

    /// Replace all records and the structure with the backup's contents
    pub async fn restore(&self, backup: ParsedBackup) -> Result<RestoreResult> {
        let restored_records = backup.records.len();
        let restored_structure = !backup.structure.is_empty();

        self.record_repository
            .save_records(&backup.records)
            .await
            .context("Failed to restore records")?;
        self.structure_service
            .replace_structure(&backup.structure)
            .await
            .context("Failed to restore custom expense structure")?;

        let success_message = format!("Restored {} records", restored_records);
        info!("{} (custom structure restored: {})", success_message, restored_structure);
        Ok(RestoreResult {
            restored_records,
            restored_structure,
            success_message,
        })
    }
}

fn decode<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, BackupError> {
    serde_json::from_value(value).map_err(|e| BackupError::InvalidStructure(e.to_string()))
}

fn invalid(path: impl Into<String>) -> BackupError {
    BackupError::InvalidStructure(path.into())
}

fn check_backup(value: &Value) -> Result<(), BackupError> {
    let object = value.as_object().ok_or_else(|| invalid("$"))?;

    let version = object.get("version").ok_or_else(|| invalid("$.version"))?;
    if !version.as_u64().is_some_and(|v| v <= u64::from(u32::MAX)) {
        return Err(invalid("$.version"));
    }

    let records = object.get("records").ok_or_else(|| invalid("$.records"))?;
    check_records(records, "$.records")?;

    let structure = object
        .get("customStructure")
        .and_then(Value::as_object)
        .ok_or_else(|| invalid("$.customStructure"))?;
    for (category, items) in structure {
        let path = format!("$.customStructure.{}", category);
        let items = items.as_array().ok_or_else(|| invalid(path.as_str()))?;
        if !items.iter().all(Value::is_string) {
            return Err(invalid(path));
        }
    }
    Ok(())
}

fn check_records(value: &Value, path: &str) -> Result<(), BackupError> {
    let records = value.as_array().ok_or_else(|| invalid(path))?;
    for (i, record) in records.iter().enumerate() {
        let path = format!("{}[{}]", path, i);
        let fields = record.as_object().ok_or_else(|| invalid(path.as_str()))?;
        require(fields, &path, "id", Value::is_string)?;
        require(fields, &path, "date", Value::is_string)?;
        require(fields, &path, "totalSales", Value::is_number)?;

        let categories = fields
            .get("expenses")
            .and_then(Value::as_array)
            .ok_or_else(|| invalid(format!("{}.expenses", path)))?;
        for (j, category) in categories.iter().enumerate() {
            check_category(category, &format!("{}.expenses[{}]", path, j))?;
        }
    }
    Ok(())
}

fn check_category(value: &Value, path: &str) -> Result<(), BackupError> {
    let fields = value.as_object().ok_or_else(|| invalid(path))?;
    require(fields, path, "id", Value::is_string)?;
    require(fields, path, "name", Value::is_string)?;

    let items = fields
        .get("items")
        .and_then(Value::as_array)
        .ok_or_else(|| invalid(format!("{}.items", path)))?;
    for (k, item) in items.iter().enumerate() {
        let path = format!("{}.items[{}]", path, k);
        let item_fields = item.as_object().ok_or_else(|| invalid(path.as_str()))?;
        require(item_fields, &path, "id", Value::is_string)?;
        require(item_fields, &path, "name", Value::is_string)?;
        require(item_fields, &path, "amount", Value::is_number)?;
        if let Some(photo) = item_fields.get("billPhoto") {
            if !photo.is_string() {
                return Err(invalid(format!("{}.billPhoto", path)));
            }
        }
    }
    Ok(())
}

fn require(
    fields: &serde_json::Map<String, Value>,
    path: &str,
    key: &str,
    check: fn(&Value) -> bool,
) -> Result<(), BackupError> {
    match fields.get(key) {
        Some(value) if check(value) => Ok(()),
        _ => Err(invalid(format!("{}.{}", path, key))),
    }
}
