use serde::{Deserialize, Serialize};
use indexmap::IndexMap;
use std::fmt;

/// A single expense line within a category (e.g. "Beef" under "Meat")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseItem {
    pub id: String,
    pub name: String,
    pub amount: f64,
    /// Compressed bill image as a `data:image/jpeg;base64,...` URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bill_photo: Option<String>,
}

/// A named group of expense items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseCategory {
    pub id: String,
    pub name: String,
    pub items: Vec<ExpenseItem>,
}

/// One day of trading. The id is the ISO date (YYYY-MM-DD) so there is at most
/// one record per day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    pub id: String,
    pub date: String,
    pub total_sales: f64,
    pub expenses: Vec<ExpenseCategory>,
}

/// Category name -> item names the user wants on every new record, in
/// insertion order
pub type CustomExpenseStructure = IndexMap<String, Vec<String>>;

/// Version written by the current backup format
pub const BACKUP_FORMAT_VERSION: u32 = 1;

/// Version assigned to legacy backups (a bare array of records)
pub const LEGACY_BACKUP_VERSION: u32 = 0;

/// Full data export: every record plus the saved custom expense structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupData {
    pub version: u32,
    pub records: Vec<DailyRecord>,
    pub custom_structure: CustomExpenseStructure,
}

/// Average profit over a trailing window of days
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollingAverage {
    /// Window length in days (today inclusive)
    pub window_days: u32,
    /// Average profit across the records inside the window (0 if none)
    pub average_profit: f64,
    /// Number of records that fell inside the window
    pub days_counted: usize,
}

/// One point of the profit/loss trend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataPoint {
    pub date: String,
    pub sales: f64,
    pub expenses: f64,
    pub profit: f64,
}

/// Sign of a bar, used for colouring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarTone {
    Positive,
    Negative,
}

/// A laid-out bar in chart viewport coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartBar {
    pub date: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub tone: BarTone,
    pub point: ChartDataPoint,
}

/// Bar chart geometry for a set of data points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    /// Y coordinate that bars grow away from
    pub baseline_y: f64,
    /// Whether a dashed zero line should be drawn at `baseline_y`
    pub has_zero_line: bool,
    pub max_profit: f64,
    pub min_profit: f64,
    pub bars: Vec<ChartBar>,
}

/// Condensed view of a record for lists and recent activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSummary {
    pub id: String,
    pub date: String,
    pub total_sales: f64,
    pub total_expenses: f64,
    pub profit: f64,
}

/// Everything the dashboard shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// True when there are no records at all
    pub is_empty: bool,
    pub seven_day: RollingAverage,
    pub thirty_day: RollingAverage,
    pub chart: Vec<ChartDataPoint>,
    pub recent: Vec<RecordSummary>,
}

/// A non-zero expense line in a record breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemBreakdown {
    pub name: String,
    pub amount: f64,
    pub has_bill_photo: bool,
}

/// A category with a non-zero total in a record breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub name: String,
    pub total: f64,
    pub items: Vec<ItemBreakdown>,
}

/// Detailed view of a single record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordBreakdown {
    pub summary: RecordSummary,
    pub categories: Vec<CategoryBreakdown>,
}

/// What a restore is about to do, shown before the user confirms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestorePreview {
    pub version: u32,
    pub record_count: usize,
    pub restores_custom_structure: bool,
    pub legacy: bool,
    pub warning: String,
}

/// Reference to an item inside a record, written `Category/Item`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPath {
    pub category: String,
    pub item: String,
}

impl ItemPath {
    pub fn new(category: impl Into<String>, item: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            item: item.into(),
        }
    }

    /// Parse `Category/Item`. The split happens at the first `/` so item
    /// names may themselves contain slashes.
    pub fn parse(input: &str) -> Result<Self, ItemPathError> {
        let (category, item) = input
            .split_once('/')
            .ok_or_else(|| ItemPathError::MissingSeparator(input.to_string()))?;
        let category = category.trim();
        let item = item.trim();
        if category.is_empty() || item.is_empty() {
            return Err(ItemPathError::EmptySegment(input.to_string()));
        }
        Ok(Self::new(category, item))
    }
}

impl fmt::Display for ItemPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category, self.item)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemPathError {
    MissingSeparator(String),
    EmptySegment(String),
}

impl fmt::Display for ItemPathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemPathError::MissingSeparator(input) => {
                write!(f, "Expected Category/Item, got '{}'", input)
            }
            ItemPathError::EmptySegment(input) => {
                write!(f, "Category and item must both be non-empty in '{}'", input)
            }
        }
    }
}

impl std::error::Error for ItemPathError {}
