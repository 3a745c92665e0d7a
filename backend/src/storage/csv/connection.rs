use anyhow::Result;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// CsvConnection manages file paths and ensures record files exist for each
/// child.
#[derive(Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
}

impl CsvConnection {
    /// Create a new connection with a base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Create a new connection in the default data directory.
    /// `FEVER_TRACKER_DATA_DIR` overrides the location; otherwise data goes
    /// to ~/Documents/Fever Tracker.
    pub fn new_default() -> Result<Self> {
        if let Ok(dir) = std::env::var("FEVER_TRACKER_DATA_DIR") {
            info!("Using data directory from FEVER_TRACKER_DATA_DIR: {}", dir);
            return Self::new(dir);
        }

        let home_dir = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| anyhow::anyhow!("Could not determine home directory"))?;

        let data_dir = PathBuf::from(home_dir)
            .join("Documents")
            .join("Fever Tracker");
        info!("Using default data directory: {}", data_dir.display());

        Self::new(data_dir)
    }

    /// Get the base directory path
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Get the directory path for a child's data
    pub fn get_child_directory(&self, directory_name: &str) -> PathBuf {
        self.base_directory.join(directory_name)
    }

    /// Get the file path for a child's temperature readings
    pub fn get_temperatures_file_path(&self, directory_name: &str) -> PathBuf {
        self.get_child_directory(directory_name)
            .join("temperatures.csv")
    }

    /// Get the file path for a child's medication definitions
    pub fn get_medications_file_path(&self, directory_name: &str) -> PathBuf {
        self.get_child_directory(directory_name)
            .join("medications.csv")
    }

    /// Get the file path for a child's dose logs
    pub fn get_medication_logs_file_path(&self, directory_name: &str) -> PathBuf {
        self.get_child_directory(directory_name)
            .join("medication_logs.csv")
    }

    /// Get the file path for a child's reminders
    pub fn get_reminders_file_path(&self, directory_name: &str) -> PathBuf {
        self.get_child_directory(directory_name)
            .join("reminders.csv")
    }

    /// Ensure a record file exists with its header row, creating the child
    /// directory as needed.
    pub fn ensure_record_file_exists(&self, file_path: &Path, header: &str) -> Result<()> {
        if let Some(parent) = file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        if !file_path.exists() {
            fs::write(file_path, format!("{}\n", header))?;
        }

        Ok(())
    }
}
