//! Custom expense structure: the items a user wants on every new record.

use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

use crate::backend::{
    domain::{catalog, models::structure::CustomExpenseStructure},
    storage::{Connection, StructureStorage},
};

#[derive(Clone)]
pub struct ExpenseStructureService<C: Connection> {
    structure_repository: C::StructureRepository,
}

impl<C: Connection> ExpenseStructureService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        let structure_repository = connection.create_structure_repository();
        Self { structure_repository }
    }

    /// The saved structure, or the catalog default if nothing is saved yet
    pub async fn get_structure(&self) -> Result<CustomExpenseStructure> {
        match self.structure_repository.load_structure().await? {
            Some(structure) => Ok(structure),
            None => {
                debug!("No saved structure, using catalog defaults");
                Ok(catalog::default_custom_structure())
            }
        }
    }

    /// Remember `item` under `category` for future records.
    ///
    /// Returns false without writing when the category is unknown or already
    /// lists the item.
    pub async fn save_custom_item(&self, category: &str, item: &str) -> Result<bool> {
        let mut structure = self.get_structure().await?;
        if !structure.add_item(category, item) {
            debug!("Not saving '{}' under '{}': unknown category or already present", item, category);
            return Ok(false);
        }

        self.structure_repository.save_structure(&structure).await?;
        info!("Saved custom item '{}' under '{}'", item, category);
        Ok(true)
    }

    pub async fn replace_structure(&self, structure: &CustomExpenseStructure) -> Result<()> {
        self.structure_repository.save_structure(structure).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::json::test_utils::TestEnvironment;
    use crate::backend::storage::JsonConnection;

    async fn setup() -> (TestEnvironment, ExpenseStructureService<JsonConnection>) {
        let env = TestEnvironment::new().await.unwrap();
        let service = ExpenseStructureService::new(Arc::new(env.connection.clone()));
        (env, service)
    }

    #[tokio::test]
    async fn test_defaults_when_nothing_saved() {
        let (_env, service) = setup().await;
        let structure = service.get_structure().await.unwrap();
        assert_eq!(structure, catalog::default_custom_structure());
    }

    #[tokio::test]
    async fn test_save_custom_item_persists() {
        let (env, service) = setup().await;
        assert!(service.save_custom_item("Meat", "Mutton").await.unwrap());

        let reloaded = ExpenseStructureService::new(Arc::new(env.connection.clone()));
        let structure = reloaded.get_structure().await.unwrap();
        assert!(structure.contains_item("Meat", "Mutton"));
        assert!(structure.contains_item("Meat", "Beef"));
    }

    #[tokio::test]
    async fn test_save_custom_item_ignores_duplicates_and_unknown_categories() {
        let (env, service) = setup().await;
        assert!(!service.save_custom_item("Meat", "Beef").await.unwrap());
        assert!(!service.save_custom_item("Transport", "Auto").await.unwrap());
        assert!(!env.connection.structure_file_path().exists());
    }

    #[tokio::test]
    async fn test_replace_structure() {
        let (_env, service) = setup().await;
        service.replace_structure(&CustomExpenseStructure::new()).await.unwrap();
        assert!(service.get_structure().await.unwrap().is_empty());
    }
}
