//! Default expense categories, their items, and typical daily costs.
//!
//! New records are built from this catalog merged with the user's saved
//! structure. The fallback costs pre-fill items whose value rarely changes.

use crate::backend::domain::models::{
    record::{ExpenseCategory, ExpenseItem},
    structure::CustomExpenseStructure,
};

/// Default categories in display order, each with its default items
pub const DEFAULT_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Market Bills",
        &[
            "Kaduveli Ameer Muttom",
            "Kaduveli Nasar Muttom",
            "Vegetables",
            "Plastics and Parcel",
            "Kappa",
            "Fruits",
        ],
    ),
    ("Meat", &["Beef", "Chicken", "Potty", "Fish"]),
    (
        "Diary Expenses",
        &[
            "Milk",
            "Banana Leaf (Ela)",
            "Curd",
            "Ice",
            "Dosa Maav Supplier 1 (Old)",
            "Dosa Maav Supplier 2 (New)",
            "Egg Supplier 1 (KLM)",
            "Egg Supplier 2 (Ani)",
            "Chappathi Supplier",
            "Ediyappam",
            "Appam",
            "Snacks",
            "Tea Powder",
        ],
    ),
    ("Gas", &["Super Gas", "Jinesh Gas"]),
    (
        "Labours",
        &[
            "Morning Porotta Master",
            "Morning Tea Master",
            "Morning Cleaning",
            "Morning Supplier",
            "Ameer",
            "Cook",
            "Kitchen Helper 1",
            "Kitchen Cleaning",
            "Night Porotta Master",
            "Night Tea Master (Abid)",
            "Night Cleaning 1",
            "Night Cleaning 2",
            "Night Supplier 1 (Jerul)",
            "Night Supplier 2 (Naga)",
            "Night Supplier 3 (Tajir)",
            "Night Supplier 4 (Noorsen)",
            "Chinese Master",
            "Alfaham Master",
            "Sadik",
            "Shabeer",
            "Vappa",
        ],
    ),
    (
        "Fixed Costs",
        &[
            "Daily Rent (Shop + Kitchen + Family Room)",
            "Electricity (Shop + Kitchen + Family Room)",
            "Water Bill",
        ],
    ),
];

/// Typical daily cost per item, used to pre-fill new records
pub const FALLBACK_ITEM_COSTS: &[(&str, f64)] = &[
    ("Morning Porotta Master", 1000.0),
    ("Morning Tea Master", 700.0),
    ("Morning Cleaning", 500.0),
    ("Morning Supplier", 700.0),
    ("Ameer", 1000.0),
    ("Cook", 2000.0),
    ("Kitchen Helper 1", 700.0),
    ("Kitchen Cleaning", 500.0),
    ("Night Porotta Master", 1200.0),
    ("Night Tea Master (Abid)", 800.0),
    ("Night Cleaning 1", 500.0),
    ("Night Cleaning 2", 500.0),
    ("Night Supplier 1 (Jerul)", 700.0),
    ("Night Supplier 2 (Naga)", 700.0),
    ("Night Supplier 3 (Tajir)", 700.0),
    ("Night Supplier 4 (Noorsen)", 700.0),
    ("Chinese Master", 900.0),
    ("Alfaham Master", 800.0),
    ("Sadik", 500.0),
    ("Shabeer", 1200.0),
    ("Potty", 750.0),
    ("Beef", 4490.0),
    ("Milk", 1050.0),
    ("Banana Leaf (Ela)", 250.0),
    ("Curd", 90.0),
    ("Chappathi Supplier", 180.0),
    ("Ediyappam", 240.0),
    ("Appam", 240.0),
    ("Snacks", 70.0),
    ("Super Gas", 1552.5),
    ("Daily Rent (Shop + Kitchen + Family Room)", 2333.3),
    ("Electricity (Shop + Kitchen + Family Room)", 1266.0),
    ("Water Bill", 200.0),
];

/// Fallback daily cost for an item, if the catalog knows one
pub fn fallback_cost(item_name: &str) -> Option<f64> {
    FALLBACK_ITEM_COSTS
        .iter()
        .find(|(name, _)| *name == item_name)
        .map(|(_, cost)| *cost)
}

/// Structure used before the user has saved any custom items
pub fn default_custom_structure() -> CustomExpenseStructure {
    let mut structure = CustomExpenseStructure::new();
    for (category, items) in DEFAULT_CATEGORIES {
        structure.insert_category(*category, items.iter().map(|item| item.to_string()).collect());
    }
    structure
}

/// Build the empty expense sheet for a new record.
///
/// Categories always follow the default order. Each category lists its
/// default items first, then any saved custom items, without duplicates.
/// Saved categories that are not part of the catalog are ignored.
pub fn generate_new_record_expenses(structure: &CustomExpenseStructure) -> Vec<ExpenseCategory> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|(category, default_items)| {
            let mut item_names: Vec<&str> = Vec::with_capacity(default_items.len());
            let custom_items = structure.items_for(category).unwrap_or_default();
            for name in default_items
                .iter()
                .copied()
                .chain(custom_items.iter().map(String::as_str))
            {
                if !item_names.contains(&name) {
                    item_names.push(name);
                }
            }

            let items = item_names
                .into_iter()
                .map(|name| ExpenseItem::new(name, 0.0))
                .collect();
            ExpenseCategory::new(*category, items)
        })
        .collect()
}
