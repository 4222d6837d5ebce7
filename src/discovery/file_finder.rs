use crate::config::Config;
use ignore::WalkBuilder;
use miette::{IntoDiagnostic, Result, WrapErr};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// A discovered Java source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path to the file
    pub path: PathBuf,

    /// Path relative to the scanned root, with `/` separators
    pub relative_path: String,
}

impl SourceFile {
    pub fn new(path: PathBuf, root: &Path) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .unwrap_or(&path)
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        Self {
            path,
            relative_path,
        }
    }

    /// Link base for this file under `base_url`
    pub fn link_base(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.relative_path)
    }

    pub fn read_contents(&self) -> Result<String> {
        std::fs::read_to_string(&self.path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read {}", self.path.display()))
    }
}

/// Finds `.java` files under a directory
pub struct FileFinder<'a> {
    config: &'a Config,
}

impl<'a> FileFinder<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// All Java files under `root`, sorted by relative path
    pub fn find_files(&self, root: &Path) -> Vec<SourceFile> {
        debug!("Scanning for Java files in: {}", root.display());

        if !root.exists() {
            trace!("Directory does not exist: {}", root.display());
            return Vec::new();
        }

        let walker = WalkBuilder::new(root)
            .hidden(true)           // Skip hidden files
            .git_ignore(true)       // Respect .gitignore
            .git_global(true)       // Respect global gitignore
            .git_exclude(true)      // Respect .git/info/exclude
            .ignore(true)           // Respect .ignore files
            .parents(true)          // Check parent directories for ignore files
            .follow_links(false)    // Don't follow symlinks
            .build();

        let mut files: Vec<SourceFile> = walker
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .filter_map(|entry| {
                let path = entry.path();

                if path.extension().and_then(|e| e.to_str()) != Some("java") {
                    return None;
                }

                if self.config.should_exclude(path) {
                    trace!("Excluding: {}", path.display());
                    return None;
                }

                trace!("Found: {}", path.display());
                Some(SourceFile::new(path.to_path_buf(), root))
            })
            .collect();

        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        debug!("Found {} Java files", files.len());
        files
    }
}
