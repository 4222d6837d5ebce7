//! Coarse sensitivity heuristic for returned and transmitted data
//!
//! Primitive values are plain data with no indirection, so they are flagged
//! as possibly sensitive. Object types are not flagged: their content cannot
//! be judged lexically.

use crate::model::{DataDescriptor, Destination, TypeReference};
use crate::parser::is_primitive;

/// Whether a (short or resolved) type name is flagged by default
pub fn possibly_sensitive(name: &str) -> bool {
    is_primitive(name)
}

/// Builds data descriptors for extracted declarations
#[derive(Debug, Clone, Default)]
pub struct SensitivityClassifier {
    string_is_sensitive: bool,
}

impl SensitivityClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also flag `String` values
    pub fn with_string_sensitive(mut self, enabled: bool) -> Self {
        self.string_is_sensitive = enabled;
        self
    }

    pub fn is_possibly_sensitive(&self, name: &str) -> bool {
        possibly_sensitive(name)
            || (self.string_is_sensitive && matches!(name, "String" | "java.lang.String"))
    }

    /// Empty for constructors and `void`, otherwise one descriptor
    pub fn data_returned(&self, return_type: Option<&TypeReference>) -> Vec<DataDescriptor> {
        let Some(type_ref) = return_type.filter(|t| !t.is_void()) else {
            return Vec::new();
        };

        let data_type = type_ref.resolved_name.clone();
        let possibly_sensitive = self.is_possibly_sensitive(&data_type);
        let description = if possibly_sensitive {
            format!("A {} value that may itself be sensitive data", data_type)
        } else {
            format!(
                "An object of type {} that might contain sensitive data, but is not sensitive itself",
                data_type
            )
        };

        vec![DataDescriptor {
            data_type,
            description,
            possibly_sensitive,
            destinations: None,
        }]
    }

    /// One descriptor per parameter, all flowing into application code
    pub fn data_transmitted<'a>(
        &self,
        parameter_types: impl IntoIterator<Item = &'a TypeReference>,
    ) -> Vec<DataDescriptor> {
        parameter_types
            .into_iter()
            .map(|type_ref| {
                let data_type = if type_ref.resolved_name.is_empty() {
                    type_ref.short_name.clone()
                } else {
                    type_ref.resolved_name.clone()
                };
                DataDescriptor {
                    possibly_sensitive: self.is_possibly_sensitive(&data_type),
                    description: format!("A {} into the application code", data_type),
                    data_type,
                    destinations: Some(vec![Destination::application_code()]),
                }
            })
            .collect()
    }
}
