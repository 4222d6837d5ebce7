//! apichanges - Compiler-free API-change extraction for Java sources
//!
//! This library scans Java source text for method and constructor headers,
//! qualifies every type name using only the file's own package, imports and
//! class header, and emits API-change records for a privacy dashboard.
//!
//! # Architecture
//!
//! The extraction pipeline consists of:
//! 1. **Comment Stripping** - Blank comments while keeping byte offsets
//! 2. **Header Extraction** - Package, imports, class name and type variables
//! 3. **Declaration Location** - One structural pattern plus lexical filters
//! 4. **Name Resolution** - Import, package and built-in lookup with erasure
//! 5. **Sensitivity Classification** - Describe returned and transmitted data
//! 6. **Record Assembly** - `code`, `code_long` and source links
//!
//! Change logs produced downstream can be loaded, filtered, counted and
//! exported as FlowDroid source/sink definitions.

pub mod analysis;
pub mod changelog;
pub mod config;
pub mod discovery;
pub mod extract;
pub mod model;
pub mod parser;
pub mod report;
pub mod resolve;

pub use analysis::{CategoryStatistics, SensitivityClassifier};
pub use changelog::{ChangeEntry, ChangeFilter, ChangeLog, ChangeLogError};
pub use config::Config;
pub use discovery::{FileFinder, SourceFile};
pub use extract::{ApiChangeExtractor, ExtractError};
pub use model::{ApiChangeDocument, ApiChangeRecord, ClassLabel, DataDescriptor, Destination};
pub use report::{ReportFormat, Reporter};
pub use resolve::{resolve, NameResolver, ResolveOptions};
