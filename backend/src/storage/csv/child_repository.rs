use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info, warn};
use std::fs;
use std::path::PathBuf;

use super::connection::CsvConnection;
use crate::domain::models::child::Child;
use crate::storage::traits::ChildStorage;

/// YAML-based child repository using filesystem discovery: every directory
/// under the base directory that contains a `child.yaml` is a child.
#[derive(Clone)]
pub struct ChildRepository {
    connection: CsvConnection,
}

impl ChildRepository {
    /// Create a new child repository
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    /// Generate a safe filesystem identifier from a child name.
    /// Converts "Emma Smith" -> "emma_smith", "José María" -> "jose_maria".
    pub fn generate_safe_directory_name(child_name: &str) -> String {
        child_name
            .chars()
            .map(|c| {
                if c.is_alphanumeric() {
                    c.to_ascii_lowercase()
                } else if c.is_whitespace() {
                    '_'
                } else {
                    match c {
                        'á' | 'à' | 'ä' | 'â' => 'a',
                        'é' | 'è' | 'ë' | 'ê' => 'e',
                        'í' | 'ì' | 'ï' | 'î' => 'i',
                        'ó' | 'ò' | 'ö' | 'ô' => 'o',
                        'ú' | 'ù' | 'ü' | 'û' => 'u',
                        'ñ' => 'n',
                        'ç' => 'c',
                        _ => '_',
                    }
                }
            })
            .collect::<String>()
            .trim_matches('_')
            .to_string()
    }

    /// Get the path to a child's YAML profile
    fn get_child_yaml_path(&self, directory_name: &str) -> PathBuf {
        self.connection
            .get_child_directory(directory_name)
            .join("child.yaml")
    }

    /// Load a child from a specific directory, or None when the directory
    /// holds no profile.
    fn load_child_from_directory(&self, directory_name: &str) -> Result<Option<Child>> {
        let yaml_path = self.get_child_yaml_path(directory_name);

        if !yaml_path.exists() {
            return Ok(None);
        }

        let yaml_content = fs::read_to_string(&yaml_path)
            .with_context(|| format!("Failed to read {}", yaml_path.display()))?;
        let child: Child = serde_yaml::from_str(&yaml_content)
            .with_context(|| format!("Invalid child profile at {}", yaml_path.display()))?;

        Ok(Some(child))
    }

    /// Discover all children by scanning directories
    fn discover_children(&self) -> Result<Vec<Child>> {
        let base_dir = self.connection.base_directory();

        if !base_dir.exists() {
            debug!("Base directory doesn't exist, returning empty children list");
            return Ok(Vec::new());
        }

        let mut children = Vec::new();

        for entry in fs::read_dir(base_dir)? {
            let entry = entry?;
            let path = entry.path();

            if !path.is_dir() {
                continue;
            }

            let dir_name = match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => name,
                None => {
                    warn!("Skipping directory with invalid name: {:?}", path);
                    continue;
                }
            };

            match self.load_child_from_directory(dir_name) {
                Ok(Some(child)) => {
                    debug!("Discovered child {} in directory {}", child.id, dir_name);
                    children.push(child);
                }
                Ok(None) => {
                    debug!("Directory {} doesn't contain a child profile", dir_name);
                }
                Err(e) => {
                    warn!("Error loading child from directory {}: {}", dir_name, e);
                }
            }
        }

        // Sort children by name for consistent ordering
        children.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(children)
    }

    /// Find the directory name holding a child by ID
    pub fn find_directory_by_child_id(&self, child_id: &str) -> Result<Option<String>> {
        let base_dir = self.connection.base_directory();

        if !base_dir.exists() {
            return Ok(None);
        }

        for entry in fs::read_dir(base_dir)? {
            let entry = entry?;
            let path = entry.path();

            if !path.is_dir() {
                continue;
            }

            let dir_name = match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => name.to_string(),
                None => continue,
            };

            if let Ok(Some(child)) = self.load_child_from_directory(&dir_name) {
                if child.id == child_id {
                    return Ok(Some(dir_name));
                }
            }
        }

        Ok(None)
    }

    /// Save a child profile to their directory (atomic write)
    fn save_child_to_directory(&self, child: &Child, directory_name: &str) -> Result<()> {
        let child_dir = self.connection.get_child_directory(directory_name);
        if !child_dir.exists() {
            fs::create_dir_all(&child_dir)?;
            info!("Created child directory: {:?}", child_dir);
        }

        let yaml_path = self.get_child_yaml_path(directory_name);
        let yaml_content = serde_yaml::to_string(child)?;

        let temp_path = yaml_path.with_extension("tmp");
        fs::write(&temp_path, yaml_content)?;
        fs::rename(&temp_path, &yaml_path)?;

        info!("Saved child {} to directory {}", child.id, directory_name);
        Ok(())
    }
}

#[async_trait]
impl ChildStorage for ChildRepository {
    async fn store_child(&self, child: &Child) -> Result<()> {
        let dir_name = Self::generate_safe_directory_name(&child.name);
        self.save_child_to_directory(child, &dir_name)
    }

    async fn get_child(&self, child_id: &str) -> Result<Option<Child>> {
        let children = self.discover_children()?;
        Ok(children.into_iter().find(|c| c.id == child_id))
    }

    async fn list_children(&self) -> Result<Vec<Child>> {
        self.discover_children()
    }

    async fn delete_child(&self, child_id: &str) -> Result<()> {
        let directory_name = match self.find_directory_by_child_id(child_id)? {
            Some(dir) => dir,
            None => return Err(anyhow::anyhow!("Child not found: {}", child_id)),
        };

        let child_dir = self.connection.get_child_directory(&directory_name);

        if child_dir.exists() {
            fs::remove_dir_all(&child_dir)?;
            info!("Deleted child directory: {:?}", child_dir);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn setup_test_repo() -> (ChildRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();
        (ChildRepository::new(connection), temp_dir)
    }

    fn test_child(id: &str, name: &str) -> Child {
        let now = chrono::Utc::now();
        Child {
            id: id.to_string(),
            name: name.to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2019, 6, 1).unwrap(),
            weight_kg: Some(14.5),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_generate_safe_directory_name() {
        assert_eq!(
            ChildRepository::generate_safe_directory_name("Emma Smith"),
            "emma_smith"
        );
        assert_eq!(
            ChildRepository::generate_safe_directory_name("José María"),
            "jose_maria"
        );
        assert_eq!(
            ChildRepository::generate_safe_directory_name("Kid #1"),
            "kid_1"
        );
    }

    #[tokio::test]
    async fn test_store_and_discover_child() {
        let (repo, _temp_dir) = setup_test_repo();
        let child = test_child("child::123", "Test Child");

        repo.store_child(&child).await.unwrap();

        let children = repo.list_children().await.unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].id, "child::123");
        assert_eq!(children[0].weight_kg, Some(14.5));

        let retrieved = repo.get_child("child::123").await.unwrap();
        assert_eq!(retrieved.unwrap().name, "Test Child");
    }

    #[tokio::test]
    async fn test_children_listed_in_name_order() {
        let (repo, _temp_dir) = setup_test_repo();
        repo.store_child(&test_child("child::2", "Zoe")).await.unwrap();
        repo.store_child(&test_child("child::1", "Alice")).await.unwrap();

        let children = repo.list_children().await.unwrap();
        assert_eq!(children[0].name, "Alice");
        assert_eq!(children[1].name, "Zoe");
    }

    #[tokio::test]
    async fn test_delete_child_removes_directory() {
        let (repo, temp_dir) = setup_test_repo();
        let child = test_child("child::9", "Briefly Here");
        repo.store_child(&child).await.unwrap();

        repo.delete_child("child::9").await.unwrap();

        assert!(repo.get_child("child::9").await.unwrap().is_none());
        assert!(!temp_dir.path().join("briefly_here").exists());
    }

    #[tokio::test]
    async fn test_delete_unknown_child_errors() {
        let (repo, _temp_dir) = setup_test_repo();
        assert!(repo.delete_child("child::missing").await.is_err());
    }
}
