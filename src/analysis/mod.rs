mod sensitivity;
mod statistics;

pub use sensitivity::{possibly_sensitive, SensitivityClassifier};
pub use statistics::{CategoryStatistics, CATEGORIES, UNKNOWN_CATEGORY};
