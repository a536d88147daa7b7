//! Record service domain logic: listing, drafting, saving and deleting daily
//! records, plus the edits a record goes through before it is saved.

use anyhow::Result;
use chrono::NaiveDate;
use shared::ItemPath;
use std::sync::Arc;
use tracing::{debug, info};

use crate::backend::{
    domain::{
        catalog,
        commands::records::{
            AddItemCommand, DeleteRecordCommand, DeleteRecordResult, RecordListQuery,
            SaveRecordCommand, SaveRecordResult,
        },
        expense_structure_service::ExpenseStructureService,
        formatting,
        models::record::{DailyRecord, ExpenseItem, RecordValidationError},
    },
    storage::{Connection, RecordStorage},
};

/// Categories whose amounts are copied from the latest record into new drafts
pub const DEFAULT_CARRY_FORWARD_CATEGORIES: &[&str] = &["Labours", "Fixed Costs"];

#[derive(Clone)]
pub struct RecordService<C: Connection> {
    record_repository: C::RecordRepository,
    structure_service: ExpenseStructureService<C>,
    carry_forward_categories: Vec<String>,
}

impl<C: Connection> RecordService<C> {
    pub fn new(
        connection: Arc<C>,
        structure_service: ExpenseStructureService<C>,
        carry_forward_categories: Vec<String>,
    ) -> Self {
        let record_repository = connection.create_record_repository();
        Self {
            record_repository,
            structure_service,
            carry_forward_categories,
        }
    }

    /// All records, newest first, optionally filtered by a date search term
    pub async fn list_records(&self, query: RecordListQuery) -> Result<Vec<DailyRecord>> {
        let mut records = self.record_repository.load_records().await?;
        sort_newest_first(&mut records);

        if let Some(term) = query.search.as_deref() {
            records.retain(|record| matches_search(record, term));
            debug!("Search '{}' matched {} records", term, records.len());
        }

        Ok(records)
    }

    pub async fn get_record(&self, record_id: &str) -> Result<DailyRecord> {
        self.record_repository
            .get_record(record_id)
            .await?
            .ok_or_else(|| RecordValidationError::RecordNotFound(record_id.to_string()).into())
    }

    /// Build an unsaved record for `date`.
    ///
    /// Items in carry-forward categories take their amount from the latest
    /// record when it has the same item; everything else starts at the
    /// catalog's fallback cost, or 0.
    pub async fn new_record_draft(&self, date: NaiveDate) -> Result<DailyRecord> {
        let structure = self.structure_service.get_structure().await?;
        let records = self.list_records(RecordListQuery::default()).await?;
        let most_recent = records.first();

        let mut expenses = catalog::generate_new_record_expenses(&structure);
        for category in &mut expenses {
            let carries_forward = self.carry_forward_categories.iter().any(|c| *c == category.name);
            let recent_category = most_recent.and_then(|record| record.category(&category.name));

            for item in &mut category.items {
                let recent_item = recent_category.and_then(|c| c.item(&item.name));
                item.amount = match recent_item {
                    Some(recent) if carries_forward => recent.amount,
                    _ => catalog::fallback_cost(&item.name).unwrap_or(0.0),
                };
            }
        }

        debug!(
            "Drafted record for {} (carried forward from {:?})",
            date,
            most_recent.map(|r| r.id.as_str())
        );
        Ok(DailyRecord::new(date, 0.0, expenses))
    }

    /// Insert or replace a record keyed by its date
    pub async fn save_record(&self, command: SaveRecordCommand) -> Result<SaveRecordResult> {
        let record = command.record;
        record.validate()?;

        if command.is_new && !command.overwrite {
            if self.record_repository.get_record(&record.id).await?.is_some() {
                return Err(RecordValidationError::DuplicateDate(record.id.clone()).into());
            }
        }

        let replaced = self.record_repository.upsert_record(&record).await?;
        let success_message = if replaced {
            format!("Record for {} updated", record.id)
        } else {
            format!("Record for {} created", record.id)
        };
        info!("{}", success_message);

        Ok(SaveRecordResult {
            record,
            replaced,
            success_message,
        })
    }

    pub async fn delete_record(&self, command: DeleteRecordCommand) -> Result<DeleteRecordResult> {
        let deleted = self.record_repository.delete_record(&command.record_id).await?;
        let success_message = if deleted {
            format!("Record for {} deleted", command.record_id)
        } else {
            format!("No record found for {}", command.record_id)
        };

        Ok(DeleteRecordResult {
            deleted,
            success_message,
        })
    }

    /// Add a new zero-amount item to a category of an unsaved record
    pub async fn add_item(&self, record: &mut DailyRecord, command: AddItemCommand) -> Result<()> {
        let item_name = add_item_to_record(record, &command.path)?;

        if command.save_for_future {
            self.structure_service
                .save_custom_item(&command.path.category, &item_name)
                .await?;
        }
        Ok(())
    }
}

/// Newest first; records are unique per date so the order is total
pub fn sort_newest_first(records: &mut [DailyRecord]) {
    records.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Case-insensitive match against `dd/mm/yyyy` or the ISO date
///
/// The term is used as typed, so whitespace never matches a date.
pub fn matches_search(record: &DailyRecord, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let term = term.to_lowercase();
    formatting::format_date_numeric(record.date).to_lowercase().contains(&term)
        || record.id.contains(&term)
}

/// Append a new item to a category. Returns the trimmed item name.
pub fn add_item_to_record(
    record: &mut DailyRecord,
    path: &ItemPath,
) -> Result<String, RecordValidationError> {
    let name = path.item.trim();
    if name.is_empty() {
        return Err(RecordValidationError::EmptyItemName);
    }

    let category = record.category_mut(&path.category)?;
    if category.has_item_named(name) {
        return Err(RecordValidationError::DuplicateItem {
            category: category.name.clone(),
            item: name.to_string(),
        });
    }

    category.items.push(ExpenseItem::new(name, 0.0));
    Ok(name.to_string())
}

pub fn remove_item(record: &mut DailyRecord, path: &ItemPath) -> Result<ExpenseItem, RecordValidationError> {
    let category = record.category_mut(&path.category)?;
    let index = category
        .items
        .iter()
        .position(|item| item.name == path.item)
        .ok_or_else(|| RecordValidationError::UnknownItem(path.to_string()))?;
    Ok(category.items.remove(index))
}

pub fn set_item_amount(
    record: &mut DailyRecord,
    path: &ItemPath,
    amount: f64,
) -> Result<(), RecordValidationError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(RecordValidationError::NegativeAmount {
            item: path.to_string(),
            amount,
        });
    }
    record.item_mut(path)?.amount = amount;
    Ok(())
}

/// Attach (`Some`) or clear (`None`) the bill photo of an item
pub fn set_bill_photo(
    record: &mut DailyRecord,
    path: &ItemPath,
    photo: Option<String>,
) -> Result<(), RecordValidationError> {
    record.item_mut(path)?.bill_photo = photo;
    Ok(())
}

pub fn clear_bill_photo(record: &mut DailyRecord, path: &ItemPath) -> Result<(), RecordValidationError> {
    set_bill_photo(record, path, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::json::test_utils::TestEnvironment;
    use crate::backend::storage::JsonConnection;

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
    }

    async fn setup() -> (TestEnvironment, RecordService<JsonConnection>) {
        let env = TestEnvironment::new().await.unwrap();
        let connection = Arc::new(env.connection.clone());
        let structure_service = ExpenseStructureService::new(connection.clone());
        let carry = DEFAULT_CARRY_FORWARD_CATEGORIES.iter().map(|c| c.to_string()).collect();
        let service = RecordService::new(connection, structure_service, carry);
        (env, service)
    }

    async fn save_new(service: &RecordService<JsonConnection>, record: DailyRecord) -> SaveRecordResult {
        service
            .save_record(SaveRecordCommand {
                record,
                is_new: true,
                overwrite: false,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_first_draft_uses_fallback_costs() {
        let (_env, service) = setup().await;
        let draft = service.new_record_draft(date("2024-07-24")).await.unwrap();

        assert_eq!(draft.id, "2024-07-24");
        assert_eq!(draft.total_sales, 0.0);
        assert_eq!(draft.category("Meat").unwrap().item("Beef").unwrap().amount, 4490.0);
        assert_eq!(draft.category("Meat").unwrap().item("Chicken").unwrap().amount, 0.0);
        assert_eq!(draft.category("Labours").unwrap().item("Cook").unwrap().amount, 2000.0);
    }

    #[tokio::test]
    async fn test_draft_carries_forward_labour_and_fixed_costs_only() {
        let (_env, service) = setup().await;
        let mut previous = service.new_record_draft(date("2024-07-23")).await.unwrap();
        set_item_amount(&mut previous, &ItemPath::new("Labours", "Cook"), 2500.0).unwrap();
        set_item_amount(&mut previous, &ItemPath::new("Labours", "Vappa"), 300.0).unwrap();
        set_item_amount(&mut previous, &ItemPath::new("Fixed Costs", "Water Bill"), 0.0).unwrap();
        set_item_amount(&mut previous, &ItemPath::new("Meat", "Beef"), 6000.0).unwrap();
        save_new(&service, previous).await;

        let draft = service.new_record_draft(date("2024-07-24")).await.unwrap();
        let amount = |category: &str, item: &str| draft.category(category).unwrap().item(item).unwrap().amount;

        assert_eq!(amount("Labours", "Cook"), 2500.0);
        assert_eq!(amount("Labours", "Vappa"), 300.0);
        assert_eq!(amount("Fixed Costs", "Water Bill"), 0.0);
        assert_eq!(amount("Meat", "Beef"), 4490.0);
    }

    #[tokio::test]
    async fn test_save_new_record_rejects_duplicate_date() {
        let (_env, service) = setup().await;
        let draft = service.new_record_draft(date("2024-07-24")).await.unwrap();
        let created = save_new(&service, draft.clone()).await;
        assert!(!created.replaced);

        let err = service
            .save_record(SaveRecordCommand {
                record: draft.clone(),
                is_new: true,
                overwrite: false,
            })
            .await
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<RecordValidationError>(),
            Some(&RecordValidationError::DuplicateDate("2024-07-24".to_string()))
        );

        let replaced = service
            .save_record(SaveRecordCommand {
                record: draft,
                is_new: true,
                overwrite: true,
            })
            .await
            .unwrap();
        assert!(replaced.replaced);
    }

    #[tokio::test]
    async fn test_edit_replaces_existing_record() {
        let (_env, service) = setup().await;
        let draft = service.new_record_draft(date("2024-07-24")).await.unwrap();
        save_new(&service, draft).await;

        let mut record = service.get_record("2024-07-24").await.unwrap();
        record.total_sales = 18000.0;
        let result = service
            .save_record(SaveRecordCommand {
                record,
                is_new: false,
                overwrite: false,
            })
            .await
            .unwrap();
        assert!(result.replaced);
        assert_eq!(service.get_record("2024-07-24").await.unwrap().total_sales, 18000.0);
    }

    #[tokio::test]
    async fn test_save_rejects_negative_sales() {
        let (_env, service) = setup().await;
        let mut draft = service.new_record_draft(date("2024-07-24")).await.unwrap();
        draft.total_sales = -5.0;
        let err = service
            .save_record(SaveRecordCommand {
                record: draft,
                is_new: true,
                overwrite: false,
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RecordValidationError>(),
            Some(RecordValidationError::NegativeSales(_))
        ));
    }

    #[tokio::test]
    async fn test_list_sorts_newest_first_and_searches() {
        let (_env, service) = setup().await;
        for day in ["2024-07-22", "2024-07-24", "2024-06-30"] {
            let draft = service.new_record_draft(date(day)).await.unwrap();
            save_new(&service, draft).await;
        }

        let ids: Vec<String> = service
            .list_records(RecordListQuery::default())
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["2024-07-24", "2024-07-22", "2024-06-30"]);

        let found = service
            .list_records(RecordListQuery {
                search: Some("24/07".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "2024-07-24");

        let found = service
            .list_records(RecordListQuery {
                search: Some("2024-07".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_search_term_is_not_trimmed() {
        let record = DailyRecord::new(date("2024-07-24"), 0.0, vec![]);
        assert!(matches_search(&record, ""));
        assert!(matches_search(&record, "24/07"));
        assert!(!matches_search(&record, "   "));
        assert!(!matches_search(&record, " 24/07"));
    }

    #[tokio::test]
    async fn test_delete_record() {
        let (_env, service) = setup().await;
        let draft = service.new_record_draft(date("2024-07-24")).await.unwrap();
        save_new(&service, draft).await;

        let result = service
            .delete_record(DeleteRecordCommand {
                record_id: "2024-07-24".to_string(),
            })
            .await
            .unwrap();
        assert!(result.deleted);

        let result = service
            .delete_record(DeleteRecordCommand {
                record_id: "2024-07-24".to_string(),
            })
            .await
            .unwrap();
        assert!(!result.deleted);
        assert!(service.get_record("2024-07-24").await.is_err());
    }

    #[tokio::test]
    async fn test_add_item_and_save_for_future() {
        let (_env, service) = setup().await;
        let mut draft = service.new_record_draft(date("2024-07-24")).await.unwrap();

        service
            .add_item(
                &mut draft,
                AddItemCommand {
                    path: ItemPath::new("Meat", "  Mutton "),
                    save_for_future: true,
                },
            )
            .await
            .unwrap();
        assert_eq!(draft.category("Meat").unwrap().item("Mutton").unwrap().amount, 0.0);

        let next = service.new_record_draft(date("2024-07-25")).await.unwrap();
        assert!(next.category("Meat").unwrap().item("Mutton").is_some());
    }

    #[test]
    fn test_add_item_validation() {
        let mut record = DailyRecord::new(
            date("2024-07-24"),
            0.0,
            catalog::generate_new_record_expenses(&catalog::default_custom_structure()),
        );

        assert_eq!(
            add_item_to_record(&mut record, &ItemPath::new("Meat", "   ")),
            Err(RecordValidationError::EmptyItemName)
        );
        assert_eq!(
            add_item_to_record(&mut record, &ItemPath::new("Meat", "BEEF")),
            Err(RecordValidationError::DuplicateItem {
                category: "Meat".to_string(),
                item: "BEEF".to_string(),
            })
        );
        assert_eq!(
            add_item_to_record(&mut record, &ItemPath::new("Transport", "Auto")),
            Err(RecordValidationError::UnknownCategory("Transport".to_string()))
        );
    }

    #[test]
    fn test_remove_item_and_photo() {
        let mut record = DailyRecord::new(
            date("2024-07-24"),
            0.0,
            catalog::generate_new_record_expenses(&catalog::default_custom_structure()),
        );
        let beef = ItemPath::new("Meat", "Beef");

        set_bill_photo(&mut record, &beef, Some("data:image/jpeg;base64,AA==".to_string())).unwrap();
        assert!(record.category("Meat").unwrap().item("Beef").unwrap().bill_photo.is_some());
        clear_bill_photo(&mut record, &beef).unwrap();
        assert!(record.category("Meat").unwrap().item("Beef").unwrap().bill_photo.is_none());

        let removed = remove_item(&mut record, &beef).unwrap();
        assert_eq!(removed.name, "Beef");
        assert!(record.category("Meat").unwrap().item("Beef").is_none());
        assert!(remove_item(&mut record, &beef).is_err());
    }

    #[test]
    fn test_set_item_amount_rejects_negative() {
        let mut record = DailyRecord::new(
            date("2024-07-24"),
            0.0,
            catalog::generate_new_record_expenses(&catalog::default_custom_structure()),
        );
        assert!(matches!(
            set_item_amount(&mut record, &ItemPath::new("Gas", "Super Gas"), -1.0),
            Err(RecordValidationError::NegativeAmount { .. })
        ));
    }
}
