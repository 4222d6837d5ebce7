//! Package, import and primary class extraction

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Name used for the document when no `class` header is present
pub const UNKNOWN_CLASS: &str = "UnknownClass";

static PACKAGE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bpackage\s+([\w$.]+)\s*;").expect("valid package regex"));

static IMPORT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bimport\s+(static\s+)?([\w$.]+(?:\s*\.\s*\*)?)\s*;").expect("valid import regex")
});

static CLASS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bclass\s+([\p{Alphabetic}_$][\w$]*)(?:\s*<((?:[^<>{};]|<[^<>{};]*>)*)>)?")
        .expect("valid class regex")
});

/// A type variable declared on a class or method, with its first bound
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeVariable {
    pub name: String,
    pub bound: Option<String>,
}

/// Header declarations of one compilation unit
///
/// Imports keep declaration order and duplicates; precedence between them is
/// decided by the resolver, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportTable {
    pub package_name: Option<String>,
    pub imports: Vec<String>,
    pub class_name: Option<String>,
    pub class_type_variables: Vec<TypeVariable>,
}

impl ImportTable {
    /// Build the table from comment-free source text
    pub fn from_cleaned(cleaned: &str) -> Self {
        let (class_name, class_type_variables) = match extract_class_header(cleaned) {
            Some((name, vars)) => (Some(name), vars),
            None => (None, Vec::new()),
        };

        Self {
            package_name: extract_package(cleaned),
            imports: extract_imports(cleaned),
            class_name,
            class_type_variables,
        }
    }

    /// The class name to put on the output document
    pub fn document_name(&self) -> &str {
        self.class_name.as_deref().unwrap_or(UNKNOWN_CLASS)
    }

    /// Explicit single-type imports (not wildcards)
    pub fn explicit_imports(&self) -> impl Iterator<Item = &str> {
        self.imports.iter().map(String::as_str).filter(|i| !i.ends_with(".*"))
    }

    /// Wildcard imports with their `.*` suffix removed, in declaration order
    pub fn wildcard_prefixes(&self) -> impl Iterator<Item = &str> {
        self.imports.iter().filter_map(|i| i.strip_suffix(".*"))
    }
}

/// Extract the package name from a `package a.b.c;` statement
pub fn extract_package(cleaned: &str) -> Option<String> {
    PACKAGE_PATTERN
        .captures(cleaned)
        .map(|cap| cap[1].to_string())
}

/// Extract every non-static import in declaration order
pub fn extract_imports(cleaned: &str) -> Vec<String> {
    IMPORT_PATTERN
        .captures_iter(cleaned)
        // Static imports name members, not types
        .filter(|cap| cap.get(1).is_none())
        .map(|cap| cap[2].split_whitespace().collect::<String>())
        .collect()
}

fn extract_class_header(cleaned: &str) -> Option<(String, Vec<TypeVariable>)> {
    let cap = CLASS_PATTERN.captures(cleaned)?;
    let vars = cap
        .get(2)
        .map(|m| parse_type_variables(m.as_str()))
        .unwrap_or_default();
    Some((cap[1].to_string(), vars))
}

/// Parse the inside of a type parameter list such as `K, V extends Comparable<V>`
pub fn parse_type_variables(text: &str) -> Vec<TypeVariable> {
    split_top_level(text, ',')
        .into_iter()
        .filter_map(|part| {
            let mut words = part.split_whitespace();
            let name = words.next()?.to_string();
            let bound = match words.next() {
                Some("extends") => {
                    let rest: Vec<&str> = words.collect();
                    let rest = rest.join(" ");
                    split_top_level(&rest, '&')
                        .into_iter()
                        .next()
                        .map(|b| b.trim().to_string())
                        .filter(|b| !b.is_empty())
                }
                _ => None,
            };
            Some(TypeVariable { name, bound })
        })
        .collect()
}

/// Split on `sep` at angle-bracket depth zero
pub(crate) fn split_top_level(text: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth -= 1,
            c if c == sep && depth == 0 => {
                parts.push(&text[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);

    parts.into_iter().filter(|p| !p.trim().is_empty()).collect()
}
