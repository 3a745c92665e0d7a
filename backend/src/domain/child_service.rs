use anyhow::Result;
use chrono::{Local, Utc};
use log::{info, warn};
use std::sync::Arc;

use crate::domain::commands::children::{
    CreateChildCommand, CreateChildResult, DeleteChildCommand, DeleteChildResult, GetChildCommand,
    GetChildResult, ListChildrenResult,
};
use crate::domain::models::child::Child;
use crate::domain::validation;
use crate::storage::csv::{ChildRepository, CsvConnection};
use crate::storage::traits::ChildStorage;

/// Service for managing children in the fever tracking system
#[derive(Clone)]
pub struct ChildService {
    child_repository: ChildRepository,
}

impl ChildService {
    /// Create a new ChildService
    pub fn new(connection: Arc<CsvConnection>) -> Self {
        let child_repository = ChildRepository::new(connection.as_ref().clone());
        Self { child_repository }
    }

    /// Register a new child
    pub async fn create_child(&self, command: CreateChildCommand) -> Result<CreateChildResult> {
        info!(
            "Creating child: name={}, date_of_birth={}",
            command.name, command.date_of_birth
        );

        let date_of_birth = validation::validate_new_child(&command, Local::now().date_naive())?;

        let name = command.name.trim().to_string();

        // Child data lives in a directory derived from the name, so two
        // children cannot share one.
        let existing = self.child_repository.list_children().await?;
        if existing.iter().any(|c| {
            ChildRepository::generate_safe_directory_name(&c.name)
                == ChildRepository::generate_safe_directory_name(&name)
        }) {
            return Err(anyhow::anyhow!("A child named '{}' already exists", name));
        }

        let now = Utc::now();
        let child = Child {
            id: Child::generate_id(now.timestamp_millis() as u64),
            name,
            date_of_birth,
            weight_kg: command.weight_kg,
            created_at: now,
            updated_at: now,
        };

        self.child_repository.store_child(&child).await?;

        info!("Created child: {} with ID: {}", child.name, child.id);

        Ok(CreateChildResult { child })
    }

    /// Get a child by ID
    pub async fn get_child(&self, command: GetChildCommand) -> Result<GetChildResult> {
        info!("Getting child: {}", command.child_id);

        let child = self.child_repository.get_child(&command.child_id).await?;

        if child.is_none() {
            warn!("Child not found: {}", command.child_id);
        }

        Ok(GetChildResult { child })
    }

    /// List all children
    pub async fn list_children(&self) -> Result<ListChildrenResult> {
        let children = self.child_repository.list_children().await?;

        info!("Found {} children", children.len());

        Ok(ListChildrenResult { children })
    }

    /// Delete a child and all of its records
    pub async fn delete_child(&self, command: DeleteChildCommand) -> Result<DeleteChildResult> {
        info!("Deleting child: {}", command.child_id);

        let child = self
            .child_repository
            .get_child(&command.child_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Child not found: {}", command.child_id))?;

        self.child_repository.delete_child(&command.child_id).await?;

        info!("Deleted child: {} with ID: {}", child.name, child.id);

        Ok(DeleteChildResult {
            success_message: format!("Child '{}' deleted successfully", child.name),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::ValidationError;
    use tempfile::tempdir;

    fn setup_test() -> (ChildService, tempfile::TempDir) {
        let temp_dir = tempdir().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();
        (ChildService::new(Arc::new(connection)), temp_dir)
    }

    #[tokio::test]
    async fn test_create_child_trims_name() {
        let (service, _temp_dir) = setup_test();
        let command = CreateChildCommand {
            name: "  Test Child ".to_string(),
            date_of_birth: "2015-05-20".to_string(),
            weight_kg: Some(18.0),
        };

        let result = service.create_child(command).await.unwrap();
        assert_eq!(result.child.name, "Test Child");
        assert_eq!(result.child.date_of_birth.to_string(), "2015-05-20");
        assert_eq!(result.child.weight_kg, Some(18.0));
    }

    #[tokio::test]
    async fn test_create_child_validation() {
        let (service, _temp_dir) = setup_test();

        let blank_name = CreateChildCommand {
            name: " ".to_string(),
            date_of_birth: "2015-05-20".to_string(),
            weight_kg: None,
        };
        let err = service.create_child(blank_name).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::EmptyChildName)
        );

        let bad_date = CreateChildCommand {
            name: "Bad Date".to_string(),
            date_of_birth: "2015/05/20".to_string(),
            weight_kg: None,
        };
        let err = service.create_child(bad_date).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::InvalidDateOfBirth)
        );

        let future_date = CreateChildCommand {
            name: "Unborn".to_string(),
            date_of_birth: "2999-01-01".to_string(),
            weight_kg: None,
        };
        let err = service.create_child(future_date).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::DateOfBirthInFuture)
        );
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let (service, _temp_dir) = setup_test();
        let command = CreateChildCommand {
            name: "Emma".to_string(),
            date_of_birth: "2015-05-20".to_string(),
            weight_kg: None,
        };
        service.create_child(command.clone()).await.unwrap();
        assert!(service.create_child(command).await.is_err());
    }

    #[tokio::test]
    async fn test_get_and_list_children() {
        let (service, _temp_dir) = setup_test();
        let created = service
            .create_child(CreateChildCommand {
                name: "Alice".to_string(),
                date_of_birth: "2018-01-01".to_string(),
                weight_kg: None,
            })
            .await
            .unwrap();

        let fetched = service
            .get_child(GetChildCommand {
                child_id: created.child.id.clone(),
            })
            .await
            .unwrap();
        assert_eq!(fetched.child.unwrap().name, "Alice");

        let listed = service.list_children().await.unwrap();
        assert_eq!(listed.children.len(), 1);
    }

    #[tokio::test]
    async fn test_get_nonexistent_child() {
        let (service, _temp_dir) = setup_test();
        let result = service
            .get_child(GetChildCommand {
                child_id: "child::missing".to_string(),
            })
            .await
            .unwrap();
        assert!(result.child.is_none());
    }

    #[tokio::test]
    async fn test_delete_child() {
        let (service, _temp_dir) = setup_test();
        let created = service
            .create_child(CreateChildCommand {
                name: "To Be Deleted".to_string(),
                date_of_birth: "2018-01-01".to_string(),
                weight_kg: None,
            })
            .await
            .unwrap();

        service
            .delete_child(DeleteChildCommand {
                child_id: created.child.id.clone(),
            })
            .await
            .unwrap();

        let fetched = service
            .get_child(GetChildCommand {
                child_id: created.child.id,
            })
            .await
            .unwrap();
        assert!(fetched.child.is_none());
    }

    #[tokio::test]
    async fn test_delete_nonexistent_child() {
        let (service, _temp_dir) = setup_test();
        let result = service
            .delete_child(DeleteChildCommand {
                child_id: "child::missing".to_string(),
            })
            .await;
        assert!(result.is_err());
    }
}
