//! Serialized API-change records
//!
//! Field names match the `changes.json` documents consumed by the dashboard
//! tables, charts and the FlowDroid exporter.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Curated privacy classification of an API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ClassLabel {
    SensitiveSource,
    SensitiveSink,
    #[default]
    NonSensitive,
}

impl ClassLabel {
    pub const ALL: [ClassLabel; 3] = [
        ClassLabel::SensitiveSource,
        ClassLabel::SensitiveSink,
        ClassLabel::NonSensitive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClassLabel::SensitiveSource => "Sensitive Source",
            ClassLabel::SensitiveSink => "Sensitive Sink",
            ClassLabel::NonSensitive => "Non-Sensitive",
        }
    }

    /// Annotation used in FlowDroid source/sink files
    pub fn flowdroid_tag(&self) -> Option<&'static str> {
        match self {
            ClassLabel::SensitiveSource => Some("_SOURCE_"),
            ClassLabel::SensitiveSink => Some("_SINK_"),
            ClassLabel::NonSensitive => None,
        }
    }
}

impl fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised labels count as non-sensitive
impl From<String> for ClassLabel {
    fn from(s: String) -> Self {
        match s.trim() {
            "Sensitive Source" => ClassLabel::SensitiveSource,
            "Sensitive Sink" => ClassLabel::SensitiveSink,
            _ => ClassLabel::NonSensitive,
        }
    }
}

impl From<ClassLabel> for String {
    fn from(label: ClassLabel) -> Self {
        label.as_str().to_string()
    }
}

/// Where transmitted data ends up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub resource: String,
    #[serde(default, alias = "accesible_to_third_parties")]
    pub accessible_to_third_parties: bool,
}

impl Destination {
    pub fn application_code() -> Self {
        Self {
            resource: "Application code".to_string(),
            accessible_to_third_parties: false,
        }
    }
}

/// Data flowing out of (returned) or into (transmitted) an API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataDescriptor {
    #[serde(rename = "type")]
    pub data_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub possibly_sensitive: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destinations: Option<Vec<Destination>>,
}

/// One API entry of a change document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiChangeRecord {
    pub code: String,
    #[serde(default)]
    pub code_long: String,
    #[serde(default)]
    pub link: String,
    #[serde(default, rename = "class")]
    pub class_label: ClassLabel,
    #[serde(default, alias = "categories", deserialize_with = "deserialize_category")]
    pub category: Option<String>,
    #[serde(default)]
    pub change_type: String,
    #[serde(default)]
    pub data_returned: Vec<DataDescriptor>,
    #[serde(default)]
    pub data_transmitted: Vec<DataDescriptor>,
}

impl ApiChangeRecord {
    /// Category used for grouping, with the dashboard's fallback
    pub fn category_or_unknown(&self) -> &str {
        self.category.as_deref().unwrap_or(crate::analysis::UNKNOWN_CATEGORY)
    }
}

/// All extracted methods of one class
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ApiChangeDocument {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub implemented_methods: Vec<ApiChangeRecord>,
}

impl ApiChangeDocument {
    pub fn new(name: impl Into<String>, implemented_methods: Vec<ApiChangeRecord>) -> Self {
        Self {
            name: name.into(),
            implemented_methods,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.implemented_methods.is_empty()
    }
}

/// Accepts `null`, a string, or a list of strings (joined with `,`)
fn deserialize_category<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        One(String),
        Many(Vec<String>),
    }

    let raw: Option<Raw> = Option::deserialize(deserializer)?;
    let joined = match raw {
        None => return Ok(None),
        Some(Raw::One(s)) => s,
        Some(Raw::Many(list)) => list.join(","),
    };
    let joined = joined.trim().to_string();
    Ok(if joined.is_empty() { None } else { Some(joined) })
}
