//! Domain model for a daily record and its expenses.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::ItemPath;
use uuid::Uuid;

/// ISO date format used for record ids and persisted dates
pub const RECORD_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseItem {
    pub id: String,
    pub name: String,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bill_photo: Option<String>,
}

impl ExpenseItem {
    pub fn new(name: impl Into<String>, amount: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            amount,
            bill_photo: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseCategory {
    pub id: String,
    pub name: String,
    pub items: Vec<ExpenseItem>,
}

impl ExpenseCategory {
    pub fn new(name: impl Into<String>, items: Vec<ExpenseItem>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            items,
        }
    }

    pub fn total(&self) -> f64 {
        self.items.iter().map(|item| item.amount).sum()
    }

    pub fn item(&self, name: &str) -> Option<&ExpenseItem> {
        self.items.iter().find(|item| item.name == name)
    }

    /// Case-insensitive lookup, used to stop near-duplicate item names
    pub fn has_item_named(&self, name: &str) -> bool {
        let wanted = name.to_lowercase();
        self.items.iter().any(|item| item.name.to_lowercase() == wanted)
    }
}

/// Persisted as-is; the JSON shape matches the backup format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    /// Always the ISO form of `date`
    pub id: String,
    pub date: NaiveDate,
    pub total_sales: f64,
    pub expenses: Vec<ExpenseCategory>,
}

impl DailyRecord {
    pub fn new(date: NaiveDate, total_sales: f64, expenses: Vec<ExpenseCategory>) -> Self {
        Self {
            id: Self::id_for_date(date),
            date,
            total_sales,
            expenses,
        }
    }

    pub fn id_for_date(date: NaiveDate) -> String {
        date.format(RECORD_DATE_FORMAT).to_string()
    }

    pub fn parse_date(value: &str) -> Result<NaiveDate, RecordValidationError> {
        NaiveDate::parse_from_str(value, RECORD_DATE_FORMAT)
            .map_err(|_| RecordValidationError::InvalidDate(value.to_string()))
    }

    pub fn total_expenses(&self) -> f64 {
        self.expenses.iter().map(ExpenseCategory::total).sum()
    }

    pub fn profit(&self) -> f64 {
        self.total_sales - self.total_expenses()
    }

    pub fn category(&self, name: &str) -> Option<&ExpenseCategory> {
        self.expenses.iter().find(|category| category.name == name)
    }

    pub fn category_mut(&mut self, name: &str) -> Result<&mut ExpenseCategory, RecordValidationError> {
        self.expenses
            .iter_mut()
            .find(|category| category.name == name)
            .ok_or_else(|| RecordValidationError::UnknownCategory(name.to_string()))
    }

    pub fn item_mut(&mut self, path: &ItemPath) -> Result<&mut ExpenseItem, RecordValidationError> {
        let category = self.category_mut(&path.category)?;
        category
            .items
            .iter_mut()
            .find(|item| item.name == path.item)
            .ok_or_else(|| RecordValidationError::UnknownItem(path.to_string()))
    }

    /// Check the amounts a record may hold before it is persisted
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        if !self.total_sales.is_finite() || self.total_sales < 0.0 {
            return Err(RecordValidationError::NegativeSales(self.total_sales));
        }
        for category in &self.expenses {
            for item in &category.items {
                if !item.amount.is_finite() || item.amount < 0.0 {
                    return Err(RecordValidationError::NegativeAmount {
                        item: format!("{}/{}", category.name, item.name),
                        amount: item.amount,
                    });
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RecordValidationError {
    #[error("A record for {0} already exists")]
    DuplicateDate(String),
    #[error("No record found for {0}")]
    RecordNotFound(String),
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Total sales must be a non-negative number, got {0}")]
    NegativeSales(f64),
    #[error("Amount for {item} must be a non-negative number, got {amount}")]
    NegativeAmount { item: String, amount: f64 },
    #[error("Item name cannot be empty")]
    EmptyItemName,
    #[error("'{item}' already exists in {category}")]
    DuplicateItem { category: String, item: String },
    #[error("Unknown expense category '{0}'")]
    UnknownCategory(String),
    #[error("Unknown expense item '{0}'")]
    UnknownItem(String),
}
