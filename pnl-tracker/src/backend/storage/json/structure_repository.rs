use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use super::connection::JsonConnection;
use crate::backend::{
    domain::models::structure::CustomExpenseStructure, storage::traits::StructureStorage,
};

/// Custom expense structure stored as one JSON object in `custom-structure.json`
#[derive(Clone, Debug)]
pub struct JsonStructureRepository {
    connection: JsonConnection,
}

impl JsonStructureRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl StructureStorage for JsonStructureRepository {
    async fn load_structure(&self) -> Result<Option<CustomExpenseStructure>> {
        let path = self.connection.structure_file_path();
        self.connection.read_document(&path)
    }

    async fn save_structure(&self, structure: &CustomExpenseStructure) -> Result<()> {
        let _guard = self.connection.lock_writes().await;
        let path = self.connection.structure_file_path();
        self.connection.write_document(&path, structure)?;
        info!("Saved custom structure with {} categories", structure.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::json::test_utils::TestEnvironment;

    #[tokio::test]
    async fn test_missing_structure_is_none() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = env.structure_repository();
        assert!(repo.load_structure().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_and_load_structure() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = env.structure_repository();

        let mut structure = CustomExpenseStructure::new();
        structure.insert_category("Meat", vec!["Beef".to_string(), "Mutton".to_string()]);
        repo.save_structure(&structure).await.unwrap();

        let loaded = repo.load_structure().await.unwrap().unwrap();
        assert_eq!(loaded, structure);
    }

    #[tokio::test]
    async fn test_empty_structure_is_stored_not_missing() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = env.structure_repository();
        repo.save_structure(&CustomExpenseStructure::new()).await.unwrap();
        assert_eq!(repo.load_structure().await.unwrap(), Some(CustomExpenseStructure::new()));
    }
}
