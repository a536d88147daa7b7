//! Domain-level command and result types.
//!
//! Services take and return these; the CLI maps its arguments onto them and
//! renders the results. Public JSON shapes live in the `shared` crate.

pub mod records {
    use crate::backend::domain::models::record::DailyRecord;
    use shared::ItemPath;

    /// Query parameters for listing records.
    #[derive(Debug, Clone, Default)]
    pub struct RecordListQuery {
        /// Matches against the en-GB date (dd/mm/yyyy) or the ISO date
        pub search: Option<String>,
    }

    /// Input for persisting a record.
    #[derive(Debug, Clone)]
    pub struct SaveRecordCommand {
        pub record: DailyRecord,
        /// True when the record comes from a new draft rather than an edit
        pub is_new: bool,
        /// Allow a new record to replace an existing one on the same date
        pub overwrite: bool,
    }

    /// Result of persisting a record.
    #[derive(Debug, Clone)]
    pub struct SaveRecordResult {
        pub record: DailyRecord,
        pub replaced: bool,
        pub success_message: String,
    }

    /// Command for deleting a record.
    #[derive(Debug, Clone)]
    pub struct DeleteRecordCommand {
        pub record_id: String,
    }

    /// Result of deleting a record.
    #[derive(Debug, Clone)]
    pub struct DeleteRecordResult {
        pub deleted: bool,
        pub success_message: String,
    }

    /// Input for adding an expense item to a draft record.
    #[derive(Debug, Clone)]
    pub struct AddItemCommand {
        pub path: ItemPath,
        /// Also remember the item for future records
        pub save_for_future: bool,
    }
}

pub mod backup {
    use crate::backend::domain::models::{record::DailyRecord, structure::CustomExpenseStructure};
    use shared::BackupData;

    /// Result of preparing a backup file.
    #[derive(Debug, Clone)]
    pub struct CreateBackupResult {
        pub backup: BackupData,
        /// Pretty-printed JSON, ready to write
        pub json: String,
        pub filename: String,
        pub record_count: usize,
    }

    /// A backup that passed validation and is ready to restore.
    #[derive(Debug, Clone, PartialEq)]
    pub struct ParsedBackup {
        pub version: u32,
        pub records: Vec<DailyRecord>,
        pub structure: CustomExpenseStructure,
        /// The file was a bare array of records with no structure
        pub legacy: bool,
    }

    /// Result of a completed restore.
    #[derive(Debug, Clone)]
    pub struct RestoreResult {
        pub restored_records: usize,
        pub restored_structure: bool,
        pub success_message: String,
    }
}

pub mod export {
    /// Result of exporting record summaries as CSV.
    #[derive(Debug, Clone)]
    pub struct CsvExportResult {
        pub csv_content: String,
        pub filename: String,
        pub record_count: usize,
    }
}
