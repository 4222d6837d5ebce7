use crate::analysis::SensitivityClassifier;
use crate::model::{ApiChangeDocument, ApiChangeRecord, ClassLabel, MethodDeclaration};
use crate::parser::collapse_whitespace;

/// Change type of every freshly extracted declaration
pub const ADDITION: &str = "Addition";

/// Turns resolved declarations into change records
pub struct RecordAssembler<'a> {
    base_url: &'a str,
    classifier: &'a SensitivityClassifier,
}

impl<'a> RecordAssembler<'a> {
    pub fn new(base_url: &'a str, classifier: &'a SensitivityClassifier) -> Self {
        Self {
            base_url,
            classifier,
        }
    }

    pub fn record(&self, decl: &MethodDeclaration) -> ApiChangeRecord {
        ApiChangeRecord {
            code: code(decl),
            code_long: code_long(decl),
            link: link(self.base_url, decl.line_number),
            class_label: ClassLabel::NonSensitive,
            category: None,
            change_type: ADDITION.to_string(),
            data_returned: self.classifier.data_returned(decl.return_type.as_ref()),
            data_transmitted: self.classifier.data_transmitted(decl.parameter_types()),
        }
    }

    /// Records in source order, wrapped with the class name
    pub fn document(&self, class_name: &str, declarations: &[MethodDeclaration]) -> ApiChangeDocument {
        ApiChangeDocument::new(
            class_name,
            declarations.iter().map(|d| self.record(d)).collect(),
        )
    }
}

/// Signature as written: `ReturnType name(params)`, no return type for constructors
pub fn code(decl: &MethodDeclaration) -> String {
    let params = collapse_whitespace(&decl.parameter_text);
    match &decl.return_type_text {
        Some(ret) => format!("{} {}({})", ret, decl.method_name, params),
        None => format!("{}({})", decl.method_name, params),
    }
}

/// Signature with qualified types and no parameter names
pub fn code_long(decl: &MethodDeclaration) -> String {
    let params: Vec<&str> = decl
        .parameter_types()
        .map(|t| t.resolved_name.as_str())
        .collect();
    let call = format!("{}({})", decl.method_name, params.join(", "));

    match decl.return_type.as_ref().map(|t| t.resolved_name.as_str()) {
        Some(ret) if !ret.is_empty() => format!("{} {}", ret, call),
        _ => call,
    }
}

pub fn link(base_url: &str, line_number: usize) -> String {
    format!("{};l={}", base_url, line_number)
}
