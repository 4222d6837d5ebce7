use serde::Serialize;
use std::collections::BTreeSet;

/// A type name as written together with its qualified form
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TypeReference {
    /// Type as written, with generic arguments erased
    pub short_name: String,
    /// Fully qualified name, empty for `void`
    pub resolved_name: String,
    pub is_primitive: bool,
}

impl TypeReference {
    pub fn new(short_name: impl Into<String>, resolved_name: impl Into<String>) -> Self {
        let short_name = short_name.into();
        let is_primitive = crate::parser::is_primitive(&short_name);
        let resolved_name = if is_primitive {
            short_name.clone()
        } else {
            resolved_name.into()
        };
        Self {
            short_name,
            resolved_name,
            is_primitive,
        }
    }

    pub fn is_void(&self) -> bool {
        self.short_name == "void" || self.resolved_name.is_empty()
    }
}

/// A formal parameter with its resolved type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub name: String,
    pub type_ref: TypeReference,
    pub annotations: Vec<String>,
}

/// A method or constructor found in a source unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodDeclaration {
    pub modifiers: BTreeSet<String>,
    pub annotations: Vec<String>,
    /// Raw return type text, `None` for constructors
    pub return_type_text: Option<String>,
    /// Resolved return type, `None` for constructors
    pub return_type: Option<TypeReference>,
    pub method_name: String,
    /// Raw text between the parentheses
    pub parameter_text: String,
    pub parameters: Vec<Parameter>,
    pub throws: Vec<TypeReference>,
    pub source_offset: usize,
    /// 1-based
    pub line_number: usize,
    pub is_constructor: bool,
}

impl MethodDeclaration {
    pub fn parameter_types(&self) -> impl Iterator<Item = &TypeReference> {
        self.parameters.iter().map(|p| &p.type_ref)
    }
}
