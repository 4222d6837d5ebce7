//! Loader for the dashboard's `changes.json`
//!
//! The file is an array of package entries. Each entry carries up to four
//! lists of change documents (changed/added classes and interfaces); they
//! are flattened into one row per API record, in file order.

use crate::model::{ApiChangeDocument, ApiChangeRecord, ClassLabel};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ChangeLogError {
    #[error("Failed to read change log {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse change log")]
    Parse(#[from] serde_json::Error),
}

/// One package entry of the change log
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageChanges {
    pub package: Option<String>,
    pub name: Option<String>,
    pub changed_classes: Vec<ApiChangeDocument>,
    pub added_interfaces: Vec<ApiChangeDocument>,
    pub changed_interfaces: Vec<ApiChangeDocument>,
    pub added_classes: Vec<ApiChangeDocument>,
}

impl PackageChanges {
    /// Package name, whichever key the entry used
    pub fn package_name(&self) -> Option<&str> {
        self.package.as_deref().or(self.name.as_deref())
    }

    pub fn documents(&self) -> impl Iterator<Item = &ApiChangeDocument> {
        self.changed_classes
            .iter()
            .chain(&self.added_interfaces)
            .chain(&self.changed_interfaces)
            .chain(&self.added_classes)
    }
}

/// A record together with the class that declares it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeEntry {
    pub package: Option<String>,
    pub owner: String,
    pub record: ApiChangeRecord,
}

impl ChangeEntry {
    /// `package.Owner`, or just the owner when no package is known
    pub fn qualified_owner(&self) -> String {
        match self.package.as_deref().filter(|p| !p.is_empty()) {
            Some(package) => format!("{}.{}", package, self.owner),
            None => self.owner.clone(),
        }
    }
}

/// Parsed change log
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeLog {
    pub packages: Vec<PackageChanges>,
}

impl ChangeLog {
    pub fn load(path: &Path) -> Result<Self, ChangeLogError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ChangeLogError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let log = Self::from_json(&contents)?;
        debug!(
            "Loaded {} packages from {}",
            log.packages.len(),
            path.display()
        );
        Ok(log)
    }

    pub fn from_json(contents: &str) -> Result<Self, ChangeLogError> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Flatten into one entry per record
    pub fn entries(&self) -> Vec<ChangeEntry> {
        let mut entries = Vec::new();
        for pkg in &self.packages {
            let package = pkg.package_name().map(str::to_string);
            for doc in pkg.documents() {
                entries.extend(doc.implemented_methods.iter().map(|record| ChangeEntry {
                    package: package.clone(),
                    owner: doc.name.clone(),
                    record: record.clone(),
                }));
            }
        }
        entries
    }
}

/// Exact-match filters; `None` matches everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeFilter {
    pub change_type: Option<String>,
    pub class_label: Option<ClassLabel>,
    pub category: Option<String>,
}

impl ChangeFilter {
    pub fn is_empty(&self) -> bool {
        self.change_type.is_none() && self.class_label.is_none() && self.category.is_none()
    }

    pub fn matches(&self, entry: &ChangeEntry) -> bool {
        let record = &entry.record;
        self.change_type
            .as_deref()
            .map_or(true, |t| record.change_type == t)
            && self.class_label.map_or(true, |l| record.class_label == l)
            && self
                .category
                .as_deref()
                .map_or(true, |c| record.category.as_deref() == Some(c))
    }

    pub fn apply<'a>(&self, entries: &'a [ChangeEntry]) -> Vec<&'a ChangeEntry> {
        entries.iter().filter(|e| self.matches(e)).collect()
    }
}
