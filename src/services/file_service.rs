use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use log::{debug, error, info, warn};

use crate::errors::WikiError;
use crate::utils::validate_title;

const ENTRY_EXTENSION: &str = "md";

/// Service for entry storage: one `<Title>.md` file per entry
#[derive(Clone)]
pub struct FileService {
    base_dir: PathBuf,
}

impl FileService {
    /// Create a new file service
    pub fn new(base_dir: PathBuf) -> Self {
        debug!("Creating FileService with base directory: {:?}", base_dir);
        Self { base_dir }
    }

    /// Create the entries directory if it does not exist yet
    pub fn ensure_base_dir(&self) -> Result<(), WikiError> {
        if !self.base_dir.is_dir() {
            info!("Creating entries directory {:?}", self.base_dir);
            fs::create_dir_all(&self.base_dir)?;
        }
        Ok(())
    }

    fn entry_path(&self, title: &str) -> Result<PathBuf, WikiError> {
        let title = validate_title(title)?;
        Ok(self.base_dir.join(format!("{}.{}", title, ENTRY_EXTENSION)))
    }

    /// Names of all entries, sorted
    pub fn list_entries(&self) -> Result<Vec<String>, WikiError> {
        debug!("Listing entries in {:?}", self.base_dir);

        let dir = fs::read_dir(&self.base_dir).map_err(|e| {
            error!("Failed to read entries directory {:?}: {}", self.base_dir, e);
            WikiError::Io(e)
        })?;

        let mut entries = Vec::new();
        for entry in dir {
            match entry {
                Ok(entry) => {
                    let is_file = entry.file_type().map(|ft| ft.is_file()).unwrap_or(false);
                    let path = entry.path();
                    if !is_file || !has_entry_extension(&path) {
                        continue;
                    }
                    match path.file_stem().and_then(|s| s.to_str()) {
                        Some(stem) if !stem.starts_with('.') => entries.push(stem.to_string()),
                        _ => debug!("Skipping {:?}", path),
                    }
                }
                Err(e) => {
                    warn!("Failed to read directory entry: {}", e);
                }
            }
        }

        entries.sort();
        info!("Listed {} entries", entries.len());
        Ok(entries)
    }

    /// Read an entry, or `None` if it does not exist
    pub fn get_entry(&self, title: &str) -> Result<Option<String>, WikiError> {
        let path = self.entry_path(title)?;
        debug!("Reading entry '{}' from {:?}", title, path);

        match fs::read_to_string(&path) {
            Ok(content) => {
                info!("Read entry '{}', {} bytes", title, content.len());
                Ok(Some(content))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("Entry '{}' does not exist", title);
                Ok(None)
            }
            Err(e) => {
                error!("Failed to read entry {:?}: {}", path, e);
                Err(WikiError::Io(e))
            }
        }
    }

    /// Check if an entry exists
    pub fn entry_exists(&self, title: &str) -> bool {
        let exists = self.entry_path(title).map(|p| p.is_file()).unwrap_or(false);
        debug!("Entry exists check: '{}' -> {}", title, exists);
        exists
    }

    /// Create or replace an entry
    pub fn save_entry(&self, title: &str, content: &str) -> Result<(), WikiError> {
        let path = self.entry_path(title)?;
        debug!("Saving entry '{}' to {:?}", title, path);

        fs::write(&path, content).map_err(|e| {
            error!("Failed to write entry {:?}: {}", path, e);
            WikiError::Io(e)
        })?;

        info!("Saved entry '{}', {} bytes", title, content.len());
        Ok(())
    }

    /// Last modification time of an entry
    pub fn last_modified(&self, title: &str) -> Option<SystemTime> {
        let path = self.entry_path(title).ok()?;
        fs::metadata(path).and_then(|m| m.modified()).ok()
    }
}

fn has_entry_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s == ENTRY_EXTENSION)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn service() -> (TempDir, FileService) {
        let dir = TempDir::new().unwrap();
        let service = FileService::new(dir.path().to_path_buf());
        (dir, service)
    }

    #[test]
    fn lists_markdown_entries_sorted() {
        let (dir, service) = service();
        fs::write(dir.path().join("Python.md"), "# Python").unwrap();
        fs::write(dir.path().join("CSS.md"), "# CSS").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        fs::write(dir.path().join(".draft.md"), "ignored").unwrap();
        fs::create_dir(dir.path().join("Folder.md")).unwrap();

        assert_eq!(service.list_entries().unwrap(), vec!["CSS", "Python"]);
    }

    #[test]
    fn missing_entry_is_none() {
        let (_dir, service) = service();
        assert_eq!(service.get_entry("Nope").unwrap(), None);
        assert!(!service.entry_exists("Nope"));
        assert!(service.last_modified("Nope").is_none());
    }

    #[test]
    fn save_then_read() {
        let (_dir, service) = service();
        service.save_entry("Git", "# Git\n\nVersion control").unwrap();
        assert_eq!(service.get_entry("Git").unwrap().as_deref(), Some("# Git\n\nVersion control"));
        assert!(service.entry_exists("Git"));
        assert!(service.last_modified("Git").is_some());
    }

    #[test]
    fn save_replaces_existing() {
        let (_dir, service) = service();
        service.save_entry("Git", "old").unwrap();
        service.save_entry("Git", "new").unwrap();
        assert_eq!(service.get_entry("Git").unwrap().as_deref(), Some("new"));
        assert_eq!(service.list_entries().unwrap(), vec!["Git"]);
    }

    #[test]
    fn empty_entry_is_distinct_from_missing() {
        let (_dir, service) = service();
        service.save_entry("Blank", "").unwrap();
        assert_eq!(service.get_entry("Blank").unwrap().as_deref(), Some(""));
    }

    #[test]
    fn rejects_path_traversal() {
        let (_dir, service) = service();
        assert!(matches!(service.save_entry("../escape", "x"), Err(WikiError::InvalidTitle(_))));
        assert!(matches!(service.get_entry("a/b"), Err(WikiError::InvalidTitle(_))));
    }

    #[test]
    fn creates_missing_base_dir() {
        let dir = TempDir::new().unwrap();
        let service = FileService::new(dir.path().join("nested").join("entries"));
        service.ensure_base_dir().unwrap();
        assert_eq!(service.list_entries().unwrap(), Vec::<String>::new());
    }
}
