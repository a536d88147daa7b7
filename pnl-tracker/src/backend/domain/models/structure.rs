//! Domain model for the user's saved expense structure.
use serde::{Deserialize, Serialize};
use indexmap::IndexMap;

/// Category name -> item names that should appear on every new record.
/// Categories keep the order they were inserted in.
///
/// Only categories that already exist can gain items; unknown categories are
/// kept as-is (a restore may bring them in) but never created by the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomExpenseStructure(IndexMap<String, Vec<String>>);

impl CustomExpenseStructure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(map: IndexMap<String, Vec<String>>) -> Self {
        Self(map)
    }

    pub fn into_map(self) -> IndexMap<String, Vec<String>> {
        self.0
    }

    pub fn insert_category(&mut self, category: impl Into<String>, items: Vec<String>) {
        self.0.insert(category.into(), items);
    }

    pub fn items_for(&self, category: &str) -> Option<&[String]> {
        self.0.get(category).map(Vec::as_slice)
    }

    pub fn contains_item(&self, category: &str, item: &str) -> bool {
        self.0
            .get(category)
            .map(|items| items.iter().any(|existing| existing == item))
            .unwrap_or(false)
    }

    /// Append `item` to an existing category. Returns false (and changes
    /// nothing) when the category is unknown or already lists the item.
    pub fn add_item(&mut self, category: &str, item: &str) -> bool {
        match self.0.get_mut(category) {
            Some(items) if !items.iter().any(|existing| existing == item) => {
                items.push(item.to_string());
                true
            }
            _ => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.0.iter()
    }
}
