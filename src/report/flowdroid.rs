//! FlowDroid source/sink definitions from a change log

use crate::changelog::ChangeEntry;
use crate::model::ClassLabel;
use chrono::{DateTime, Utc};
use miette::{IntoDiagnostic, Result, WrapErr};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::info;

const FILE_PREFIX: &str = "sources-sinks-flowdroid";

/// A method annotated as source, sink, or both
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowDroidMethod {
    pub owner: String,
    pub code_long: String,
    pub source: bool,
    pub sink: bool,
}

impl FlowDroidMethod {
    pub fn tag(&self) -> &'static str {
        match (self.source, self.sink) {
            (true, true) => "_BOTH_",
            (true, false) => "_SOURCE_",
            _ => "_SINK_",
        }
    }

    pub fn line(&self) -> String {
        format!("<{}: {}> -> {}", self.owner, self.code_long, self.tag())
    }
}

/// Sensitive entries grouped by owner and signature, in first-seen order
pub fn group_methods<'a>(entries: impl IntoIterator<Item = &'a ChangeEntry>) -> Vec<FlowDroidMethod> {
    let mut methods: Vec<FlowDroidMethod> = Vec::new();
    let mut index: HashMap<(String, String), usize> = HashMap::new();

    for entry in entries {
        if entry.record.class_label.flowdroid_tag().is_none() {
            continue;
        }

        let key = (entry.qualified_owner(), entry.record.code_long.clone());
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            methods.push(FlowDroidMethod {
                owner: key.0,
                code_long: key.1,
                source: false,
                sink: false,
            });
            methods.len() - 1
        });

        match entry.record.class_label {
            ClassLabel::SensitiveSource => methods[slot].source = true,
            ClassLabel::SensitiveSink => methods[slot].sink = true,
            ClassLabel::NonSensitive => {}
        }
    }

    methods
}

pub fn render<'a>(entries: impl IntoIterator<Item = &'a ChangeEntry>) -> String {
    group_methods(entries)
        .iter()
        .map(FlowDroidMethod::line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// `sources-sinks-flowdroid_YYYYMMDDHHMMSS.txt` for a UTC timestamp
pub fn default_file_name(at: DateTime<Utc>) -> String {
    format!("{}_{}.txt", FILE_PREFIX, at.format("%Y%m%d%H%M%S"))
}

/// Writes FlowDroid definitions to a file
pub struct FlowDroidExporter {
    output_path: Option<PathBuf>,
}

impl FlowDroidExporter {
    pub fn new(output_path: Option<PathBuf>) -> Self {
        Self { output_path }
    }

    /// Write the file and return its path
    pub fn export(&self, entries: &[ChangeEntry]) -> Result<PathBuf> {
        let path = self
            .output_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(default_file_name(Utc::now())));

        let contents = render(entries);
        let count = contents.lines().count();
        std::fs::write(&path, contents)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to write {}", path.display()))?;

        info!("Wrote {} FlowDroid definitions to {}", count, path.display());
        Ok(path)
    }
}
