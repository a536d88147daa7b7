//! # Backend Module
//!
//! Contains all non-UI logic for the P&L tracker.
//!
//! - **Domain**: Records, expense structure, aggregation, backup and export
//! - **Storage**: JSON documents in the data directory
//! - **IO**: Mapping between the public JSON shapes and domain models
//!
//! ## Architecture
//!
//! ```text
//! CLI (pnl binary)
//!     ↓
//! Domain Layer (services)
//!     ↓
//! Storage Layer (JsonConnection, repositories)
//! ```

pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use crate::backend::domain::{
    AmountFormatter, BackupService, ExpenseStructureService, ExportService, RecordService,
    SummaryService,
};
use crate::backend::storage::JsonConnection;
use crate::config::AppConfig;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub connection: Arc<JsonConnection>,
    pub record_service: RecordService<JsonConnection>,
    pub structure_service: ExpenseStructureService<JsonConnection>,
    pub summary_service: SummaryService,
    pub backup_service: BackupService<JsonConnection>,
    pub export_service: ExportService,
    pub formatter: AmountFormatter,
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    let data_directory = config.data_directory();
    info!("Setting up storage in {}", data_directory.display());
    let connection = Arc::new(
        JsonConnection::new(&data_directory).context("Failed to open the data directory")?,
    );

    info!("Setting up domain services");
    let structure_service = ExpenseStructureService::new(connection.clone());
    let record_service = RecordService::new(
        connection.clone(),
        structure_service.clone(),
        config.carry_forward_categories.clone(),
    );
    let summary_service = SummaryService::new(config.chart_window, config.recent_activity_limit);
    let backup_service = BackupService::new(
        connection.clone(),
        structure_service.clone(),
        config.backup_file_prefix.clone(),
    );

    Ok(AppState {
        connection,
        record_service,
        structure_service,
        summary_service,
        backup_service,
        export_service: ExportService::new(),
        formatter: AmountFormatter::new(config.currency_symbol.clone()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::commands::records::{RecordListQuery, SaveRecordCommand};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_initialize_backend_uses_configured_directory() {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = temp_dir.path().join("data");
        let config = AppConfig {
            data_directory: Some(data_dir.clone()),
            currency_symbol: "Rs.".to_string(),
            ..AppConfig::default()
        };

        let state = initialize_backend(&config).await.unwrap();
        assert!(data_dir.is_dir());
        assert_eq!(state.formatter.currency_symbol(), "Rs.");

        let date = NaiveDate::from_ymd_opt(2024, 7, 24).unwrap();
        let draft = state.record_service.new_record_draft(date).await.unwrap();
        state
            .record_service
            .save_record(SaveRecordCommand {
                record: draft,
                is_new: true,
                overwrite: false,
            })
            .await
            .unwrap();

        let records = state.record_service.list_records(RecordListQuery::default()).await.unwrap();
        assert_eq!(records.len(), 1);
        assert!(data_dir.join("records.json").exists());
    }
}
