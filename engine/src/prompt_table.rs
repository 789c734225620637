use std::{collections::HashSet, path::Path};

use color_eyre::{Result, eyre::Context};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Output path, relative to the output directory
    pub filename: String,
    pub prompt: String,
}

impl Entry {
    pub fn new(filename: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            prompt: prompt.into(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("Entry {index} has an empty filename")]
    EmptyFilename { index: usize },

    #[error("Entry {filename} has an empty prompt")]
    EmptyPrompt { filename: String },

    #[error("Duplicate filename: {0}")]
    DuplicateFilename(String),
}

/// Ordered filename -> prompt mapping. Filenames are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Entry>", into = "Vec<Entry>")]
pub struct PromptTable {
    entries: Vec<Entry>,
}

impl PromptTable {
    pub fn new(entries: Vec<Entry>) -> Result<Self, TableError> {
        let mut seen = HashSet::new();
        for (index, entry) in entries.iter().enumerate() {
            if entry.filename.trim().is_empty() {
                return Err(TableError::EmptyFilename { index });
            }
            if entry.prompt.trim().is_empty() {
                return Err(TableError::EmptyPrompt {
                    filename: entry.filename.clone(),
                });
            }
            if !seen.insert(entry.filename.as_str()) {
                return Err(TableError::DuplicateFilename(entry.filename.clone()));
            }
        }
        Ok(Self { entries })
    }

    pub fn from_ron_str(s: &str) -> Result<Self> {
        Ok(ron::from_str(s)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading prompt table {}", path.display()))?;
        Self::from_ron_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<Vec<Entry>> for PromptTable {
    type Error = TableError;

    fn try_from(entries: Vec<Entry>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<PromptTable> for Vec<Entry> {
    fn from(table: PromptTable) -> Self {
        table.entries
    }
}
