//! CLI command definitions.

use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use shared::ItemPath;

/// `Category/Item=amount`, as passed to `--expense`
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseAssignment {
    pub path: ItemPath,
    pub amount: f64,
}

impl FromStr for ExpenseAssignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (path, amount) = s
            .rsplit_once('=')
            .ok_or_else(|| format!("Expected Category/Item=AMOUNT, got '{}'", s))?;
        let path = ItemPath::parse(path).map_err(|e| e.to_string())?;
        let amount: f64 = amount
            .trim()
            .parse()
            .map_err(|_| format!("'{}' is not a valid amount", amount.trim()))?;
        Ok(Self { path, amount })
    }
}

pub fn parse_item_path(s: &str) -> Result<ItemPath, String> {
    ItemPath::parse(s).map_err(|e| e.to_string())
}

pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// Dashboard command arguments.
#[derive(Debug, Args)]
pub struct DashboardCommand {
    /// Treat this date as today (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub today: Option<NaiveDate>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Expense edits shared by `records new` and `records edit`.
#[derive(Debug, Args, Default)]
pub struct RecordEdits {
    /// Total sales for the day
    #[arg(long)]
    pub sales: Option<f64>,

    /// Set an item amount, e.g. "Meat/Beef=4490" (repeatable)
    #[arg(long = "expense", value_name = "CAT/ITEM=AMOUNT")]
    pub expenses: Vec<ExpenseAssignment>,

    /// Add a new item to a category, e.g. "Meat/Mutton" (repeatable)
    #[arg(long = "add-item", value_name = "CAT/ITEM", value_parser = parse_item_path)]
    pub add_items: Vec<ItemPath>,

    /// Also remember added items for future records
    #[arg(long)]
    pub save_items: bool,
}

/// Record management commands.
#[derive(Debug, Subcommand)]
pub enum RecordsCommand {
    /// List records, newest first
    List {
        /// Filter by date, e.g. "07/2024" or "2024-07"
        #[arg(short, long)]
        search: Option<String>,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the breakdown of one record
    Show {
        #[arg(value_parser = parse_date)]
        date: NaiveDate,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Create a record, pre-filled from the latest one
    New {
        /// Day of the record (defaults to today)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,

        #[command(flatten)]
        edits: RecordEdits,

        /// Replace an existing record on the same date
        #[arg(long)]
        overwrite: bool,
    },

    /// Change an existing record
    Edit {
        #[arg(value_parser = parse_date)]
        date: NaiveDate,

        #[command(flatten)]
        edits: RecordEdits,

        /// Remove an item, e.g. "Meat/Fish" (repeatable)
        #[arg(long = "remove-item", value_name = "CAT/ITEM", value_parser = parse_item_path)]
        remove_items: Vec<ItemPath>,
    },

    /// Delete a record
    Delete {
        #[arg(value_parser = parse_date)]
        date: NaiveDate,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

/// Bill photo commands.
#[derive(Debug, Subcommand)]
pub enum PhotoCommand {
    /// Compress an image and attach it to an item
    Attach {
        #[arg(value_parser = parse_date)]
        date: NaiveDate,
        #[arg(value_parser = parse_item_path)]
        item: ItemPath,
        file: PathBuf,
    },

    /// Write an item's stored photo to a JPEG file
    Export {
        #[arg(value_parser = parse_date)]
        date: NaiveDate,
        #[arg(value_parser = parse_item_path)]
        item: ItemPath,
        output: PathBuf,
    },

    /// Remove an item's photo
    Remove {
        #[arg(value_parser = parse_date)]
        date: NaiveDate,
        #[arg(value_parser = parse_item_path)]
        item: ItemPath,
    },
}

/// Backup commands.
#[derive(Debug, Subcommand)]
pub enum BackupCommand {
    /// Write every record and the custom structure to a JSON file
    Export {
        /// Directory for the backup file (defaults to Documents)
        #[arg(short, long, value_name = "DIR")]
        output: Option<String>,
    },

    /// Restore from a backup file, replacing all current data
    Import {
        file: PathBuf,

        /// Restore without stopping at the preview
        #[arg(long)]
        yes: bool,
    },
}

/// CSV export arguments.
#[derive(Debug, Args)]
pub struct ExportCsvCommand {
    /// Directory for the CSV file (defaults to Documents)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<String>,
}

/// Custom expense structure commands.
#[derive(Debug, Subcommand)]
pub enum StructureCommand {
    /// Show the categories and items used for new records
    Show,

    /// Remember an item for future records
    AddItem { category: String, item: String },
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Print the config file path
    Path,
}
