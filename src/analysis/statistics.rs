//! Class label × category counts for the statistics view

use crate::changelog::ChangeEntry;
use crate::model::ClassLabel;
use std::collections::HashMap;

/// Privacy categories in display order
pub const CATEGORIES: &[&str] = &[
    "Location",
    "Personal Info",
    "Financial Info",
    "Health and Fitness",
    "Messages",
    "Photos and Videos",
    "Audio Files",
    "Files and Docs",
    "Calendar",
    "Contacts",
    "App Activity",
    "Web Browsing",
    "App Info and Performance",
    "Device or other IDs",
    UNKNOWN_CATEGORY,
];

pub const UNKNOWN_CATEGORY: &str = "Category Unknown";

/// Counts of change entries per class label and category
#[derive(Debug, Clone, Default)]
pub struct CategoryStatistics {
    /// Fixed categories first, then any others in first-seen order
    categories: Vec<String>,
    counts: HashMap<(ClassLabel, String), usize>,
    total: usize,
}

impl CategoryStatistics {
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a ChangeEntry>) -> Self {
        let mut stats = Self {
            categories: CATEGORIES.iter().map(|c| c.to_string()).collect(),
            ..Default::default()
        };

        for entry in entries {
            let category = entry.record.category_or_unknown().to_string();
            if !stats.categories.contains(&category) {
                stats.categories.push(category.clone());
            }
            *stats
                .counts
                .entry((entry.record.class_label, category))
                .or_default() += 1;
            stats.total += 1;
        }

        stats
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn count(&self, label: ClassLabel, category: &str) -> usize {
        self.counts
            .get(&(label, category.to_string()))
            .copied()
            .unwrap_or(0)
    }

    pub fn label_total(&self, label: ClassLabel) -> usize {
        self.counts
            .iter()
            .filter(|((l, _), _)| *l == label)
            .map(|(_, n)| n)
            .sum()
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// One row per category with counts for each label, in label order
    pub fn rows(&self) -> Vec<(&str, [usize; 3])> {
        self.categories
            .iter()
            .map(|category| {
                let counts = ClassLabel::ALL.map(|label| self.count(label, category));
                (category.as_str(), counts)
            })
            .collect()
    }
}
