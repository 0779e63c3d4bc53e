//! Data directory management and saved-comparison persistence.
//!
//! The data directory holds the editable lookup tables (exchange rates, POD
//! list) as CSV files and a `saved/` folder with one JSON document per saved
//! comparison.

use crate::config;
use crate::error::{LclError, Result};
use crate::models::SavedComparison;
use std::fs;
use std::path::{Path, PathBuf};

const SAVED_EXTENSION: &str = "json";

/// Where a comparison was written and whether it replaced an earlier one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub name: String,
    pub path: PathBuf,
    pub overwritten: bool,
}

/// Owns the on-disk layout of the data directory.
pub struct DataStore {
    /// Directory holding the lookup tables and saved comparisons.
    pub data_dir: PathBuf,
}

impl DataStore {
    /// Create a store rooted at `data_dir`.
    ///
    /// If `data_dir` is `None`, uses the platform-appropriate default data
    /// directory. Creates the directory and its `saved/` folder if needed.
    pub fn new(data_dir: Option<PathBuf>) -> Result<Self> {
        let dir = data_dir.unwrap_or_else(config::default_data_dir);
        fs::create_dir_all(dir.join(config::SAVED_DIR))?;
        Ok(Self { data_dir: dir })
    }

    pub fn saved_dir(&self) -> PathBuf {
        self.data_dir.join(config::SAVED_DIR)
    }

    /// Path of a lookup table file, whether or not it exists yet.
    pub fn data_file(&self, table: &str) -> Result<PathBuf> {
        let files = config::data_files();
        let filename = files
            .get(table)
            .ok_or_else(|| LclError::NotFound(format!("Unknown data table: {}", table)))?;
        Ok(self.data_dir.join(filename))
    }

    /// Path of a lookup table file that must already exist.
    pub fn ensure_data_file(&self, table: &str) -> Result<PathBuf> {
        let path = self.data_file(table)?;
        if !path.exists() {
            return Err(LclError::NotFound(format!(
                "Data file {} is missing",
                path.display()
            )));
        }
        Ok(path)
    }

    /// Save a comparison under `name`, replacing any earlier save of the
    /// same (sanitized) name.
    ///
    /// Writes to a temp file first and renames on success, so a failed
    /// write never leaves a truncated document behind.
    pub fn save(&self, name: &str, saved: &SavedComparison) -> Result<SaveOutcome> {
        let safe = safe_name(name)?;
        let path = self.saved_path(&safe);
        let overwritten = path.exists();
        if overwritten {
            tracing::warn!(name = %safe, "overwriting existing saved comparison");
        }

        let tmp = path.with_extension(format!("{}.tmp", SAVED_EXTENSION));
        let result = (|| -> Result<()> {
            let json = serde_json::to_string_pretty(saved)?;
            fs::write(&tmp, json)?;
            fs::rename(&tmp, &path)?;
            Ok(())
        })();

        if result.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        result?;

        tracing::info!(name = %safe, path = %path.display(), "saved comparison");
        Ok(SaveOutcome {
            name: safe,
            path,
            overwritten,
        })
    }

    /// Names of all saved comparisons, sorted.
    pub fn list(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(self.saved_dir())? {
            let path = entry?.path();
            let is_saved = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.eq_ignore_ascii_case(SAVED_EXTENSION))
                .unwrap_or(false);
            if !is_saved {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.resolve(name).map(|p| p.exists()).unwrap_or(false)
    }

    pub fn load(&self, name: &str) -> Result<SavedComparison> {
        let path = self.existing(name)?;
        let contents = fs::read_to_string(&path)?;
        serde_json::from_str(&contents).map_err(|e| {
            tracing::warn!(path = %path.display(), error = %e, "saved comparison is unreadable");
            LclError::from(e)
        })
    }

    pub fn delete(&self, name: &str) -> Result<()> {
        let path = self.existing(name)?;
        fs::remove_file(&path)?;
        tracing::info!(path = %path.display(), "deleted saved comparison");
        Ok(())
    }

    fn existing(&self, name: &str) -> Result<PathBuf> {
        let path = self.resolve(name)?;
        if !path.exists() {
            return Err(LclError::NotFound(format!(
                "No saved comparison named '{}'",
                name
            )));
        }
        Ok(path)
    }

    /// Accepts the name with or without the file extension.
    fn resolve(&self, name: &str) -> Result<PathBuf> {
        let trimmed = name.trim();
        let stem = Path::new(trimmed)
            .extension()
            .and_then(|e| e.to_str())
            .filter(|e| e.eq_ignore_ascii_case(SAVED_EXTENSION))
            .and_then(|_| Path::new(trimmed).file_stem().and_then(|s| s.to_str()))
            .unwrap_or(trimmed);
        Ok(self.saved_path(&safe_name(stem)?))
    }

    fn saved_path(&self, safe: &str) -> PathBuf {
        self.saved_dir().join(format!("{}.{}", safe, SAVED_EXTENSION))
    }
}

/// Reduce a user-supplied name to a safe file stem.
///
/// Keeps ASCII letters, digits, spaces, `_` and `-`, then turns spaces into
/// underscores. A name with nothing left is rejected.
pub fn safe_name(name: &str) -> Result<String> {
    let kept: String = name
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '_' | '-'))
        .collect();
    let safe = kept.replace(' ', "_");
    if safe.is_empty() {
        return Err(LclError::InvalidArgument(
            "Filename cannot be empty".to_string(),
        ));
    }
    Ok(safe)
}
