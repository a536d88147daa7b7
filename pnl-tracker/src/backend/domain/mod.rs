//! # Domain Module
//!
//! Business logic for the daily P&L tracker.
//!
//! Services here know nothing about the terminal or the on-disk format; they
//! work through the storage traits and return domain models or the view DTOs
//! from `shared`.
//!
//! ## Module Organization
//!
//! - **record_service**: Listing, drafting, saving and deleting daily records
//! - **expense_structure_service**: The user's saved expense items
//! - **summary_service**: Rolling averages, dashboard and record breakdowns
//! - **chart**: Trend points and bar geometry
//! - **backup_service**: JSON backup, validated import and restore
//! - **export_service**: CSV summaries and export files
//! - **bill_photo**: Compressing bill images into data URLs
//! - **catalog**: Default categories, items and typical costs
//! - **formatting**: Currency and date display
//!
//! ## Business Rules
//!
//! - A record is keyed by its ISO date; there is at most one per day
//! - Sales and expense amounts are non-negative
//! - Profit is always sales minus the sum of expense items, never stored
//! - Restores validate the whole file before replacing anything

pub mod backup_service;
pub mod bill_photo;
pub mod catalog;
pub mod chart;
pub mod commands;
pub mod expense_structure_service;
pub mod export_service;
pub mod formatting;
pub mod models;
pub mod record_service;
pub mod summary_service;

pub use backup_service::{BackupError, BackupService};
pub use bill_photo::BillPhotoError;
pub use expense_structure_service::ExpenseStructureService;
pub use export_service::ExportService;
pub use formatting::AmountFormatter;
pub use models::record::{DailyRecord, ExpenseCategory, ExpenseItem, RecordValidationError};
pub use models::structure::CustomExpenseStructure;
pub use record_service::RecordService;
pub use summary_service::SummaryService;
