//! Method and constructor header detection
//!
//! One structural regular expression finds candidate headers; every
//! semantic decision (keyword rejection, constructor detection) is made by
//! the plain functions below on the captured fields.
//!
//! Matching runs on the literal-masked view so text inside strings never
//! looks like a header; captured text is read back from the cleaned view.

use super::header::{parse_type_variables, ImportTable, TypeVariable};
use super::params::{parse_parameters, ParameterError, RawParameter};
use super::source::SourceUnit;
use once_cell::sync::Lazy;
use regex::{Captures, Match, Regex};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, trace};

/// Every reserved word of the language, plus `true`, `false` and `null`
pub const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally",
    "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface",
    "long", "native", "new", "package", "private", "protected", "public", "return", "short",
    "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "try", "void", "volatile", "while", "true", "false", "null", "_",
];

/// The eight primitive type keywords
pub const PRIMITIVE_TYPES: &[&str] = &[
    "byte", "short", "int", "long", "float", "double", "char", "boolean",
];

/// Contextual words that start a non-method construct when seen in type position
const CONTEXTUAL_DECLARATIONS: &[&str] = &["record", "yield", "var", "sealed", "permits"];

const MODIFIERS: &str =
    "public|private|protected|static|final|synchronized|native|abstract|strictfp|default|transient|volatile";

const ANNOTATION: &str = r"@[\w$.]+(?:\s*\((?:[^()]|\([^()]*\))*\))?";

/// Generic argument list with two levels of nesting
const GENERIC_ARGS: &str = r"<(?:[^<>{};()]|<(?:[^<>{};()]|<[^<>{};()]*>)*>)*>";

static HEADER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let prefix = format!(r"(?P<prefix>(?:(?:{ANNOTATION}|\b(?:{MODIFIERS})\b)\s+)*)");
    let type_params = format!(r"(?:(?P<type_params>{GENERIC_ARGS})\s*)?");
    let return_type = format!(
        r"(?:(?P<return_type>[\p{{Alphabetic}}_$][\w$]*(?:\s*\.\s*[\p{{Alphabetic}}_$][\w$]*)*(?:\s*{GENERIC_ARGS})?(?:\s*\[\s*\])*)\s+)?"
    );
    let name = r"(?P<name>[\p{Alphabetic}_$][\w$]*)";
    let params = r"\s*\((?P<params>(?:[^(){};]|\([^(){};]*\))*)\)";
    let throws = r"\s*(?:throws\s+(?P<throws>[\w$.<>\[\],\s]+?))?\s*\{";

    Regex::new(&format!("{prefix}{type_params}{return_type}{name}{params}{throws}"))
        .expect("valid method header regex")
});

static PREFIX_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?P<annotation>{ANNOTATION})|\b(?P<modifier>{MODIFIERS})\b"))
        .expect("valid prefix token regex")
});

/// A declaration header exactly as found in the source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawHeader {
    pub annotations: Vec<String>,
    pub modifiers: BTreeSet<String>,
    pub type_parameters: Vec<TypeVariable>,
    /// Raw return type, `None` for constructors
    pub return_type: Option<String>,
    pub name: String,
    /// Text between the parentheses, untouched
    pub parameters: String,
    pub throws: Vec<String>,
    /// Byte offset of the first non-annotation token of the header
    pub offset: usize,
    /// 1-based line of `offset` in the original text
    pub line: usize,
    pub is_constructor: bool,
}

impl RawHeader {
    /// Tokenize the parameter list
    pub fn parse_parameters(&self) -> Result<Vec<RawParameter>, ParameterError> {
        parse_parameters(&self.parameters)
    }

    /// The header as `name(params)` with whitespace runs collapsed
    pub fn display(&self) -> String {
        let head = match &self.return_type {
            Some(ret) => format!("{} {}", ret, self.name),
            None => self.name.clone(),
        };
        collapse_whitespace(&format!("{}({})", head, self.parameters.trim()))
    }
}

/// Finds declaration headers in a source unit
pub struct DeclarationLocator<'a> {
    table: &'a ImportTable,
}

impl<'a> DeclarationLocator<'a> {
    pub fn new(table: &'a ImportTable) -> Self {
        Self { table }
    }

    /// Every accepted header in source order
    pub fn locate(&self, unit: &SourceUnit) -> Vec<RawHeader> {
        let class_name = self.table.class_name.as_deref();

        let headers: Vec<RawHeader> = HEADER_PATTERN
            .captures_iter(unit.masked())
            .filter_map(|cap| {
                let header = header_from_captures(&cap, class_name, unit);
                if header.is_none() {
                    trace!("Rejected header candidate: {}", collapse_whitespace(&cap[0]));
                }
                header
            })
            .collect();

        debug!(
            "Located {} declarations in class {}",
            headers.len(),
            self.table.document_name()
        );
        headers
    }
}

fn header_from_captures(cap: &Captures, class_name: Option<&str>, unit: &SourceUnit) -> Option<RawHeader> {
    let name_match = cap.name("name")?;
    let name = name_match.as_str();

    if is_keyword(name) {
        return None;
    }

    let cleaned = unit.cleaned();
    let return_type = cap
        .name("return_type")
        .map(|m| normalize_type_text(source_text(cleaned, &m)));

    if let Some(ret) = &return_type {
        let base = ret.split(|c| c == '<' || c == '[').next().unwrap_or(ret);
        let is_type_keyword = base == "void" || PRIMITIVE_TYPES.contains(&base);
        if (is_keyword(base) && !is_type_keyword) || CONTEXTUAL_DECLARATIONS.contains(&base) {
            return None;
        }
    }

    let is_constructor = class_name == Some(name);
    if return_type.is_none() && !is_constructor {
        return None;
    }

    let prefix = cap.name("prefix");
    let (annotations, modifiers, first_modifier) = match prefix {
        Some(p) => split_prefix(source_text(cleaned, &p)),
        None => (Vec::new(), BTreeSet::new(), None),
    };

    let offset = match (prefix, first_modifier) {
        (Some(p), Some(pos)) => p.start() + pos,
        _ => cap
            .name("type_params")
            .or_else(|| cap.name("return_type"))
            .unwrap_or(name_match)
            .start(),
    };

    let type_parameters = cap
        .name("type_params")
        .map(|m| {
            let inner = source_text(cleaned, &m);
            parse_type_variables(&inner[1..inner.len() - 1])
        })
        .unwrap_or_default();

    let throws = cap
        .name("throws")
        .map(|m| {
            super::header::split_top_level(source_text(cleaned, &m), ',')
                .into_iter()
                .map(normalize_type_text)
                .collect()
        })
        .unwrap_or_default();

    Some(RawHeader {
        annotations,
        modifiers,
        type_parameters,
        return_type: if is_constructor { None } else { return_type },
        name: name.to_string(),
        parameters: cap
            .name("params")
            .map(|m| source_text(cleaned, &m).to_string())
            .unwrap_or_default(),
        throws,
        offset,
        line: unit.line_of(offset),
        is_constructor,
    })
}

/// The cleaned text under a match taken on the masked view
fn source_text<'a>(cleaned: &'a str, m: &Match<'a>) -> &'a str {
    cleaned.get(m.range()).unwrap_or(m.as_str())
}

/// Separate annotations from modifier keywords; also returns the byte
/// position of the first modifier within the prefix
fn split_prefix(prefix: &str) -> (Vec<String>, BTreeSet<String>, Option<usize>) {
    let mut annotations = Vec::new();
    let mut modifiers = BTreeSet::new();
    let mut first_modifier = None;

    for cap in PREFIX_TOKEN.captures_iter(prefix) {
        if let Some(a) = cap.name("annotation") {
            annotations.push(collapse_whitespace(a.as_str()));
        } else if let Some(m) = cap.name("modifier") {
            if first_modifier.is_none() {
                first_modifier = Some(m.start());
            }
            modifiers.insert(m.as_str().to_string());
        }
    }

    (annotations, modifiers, first_modifier)
}

pub fn is_keyword(word: &str) -> bool {
    JAVA_KEYWORDS.contains(&word)
}

pub fn is_primitive(word: &str) -> bool {
    PRIMITIVE_TYPES.contains(&word)
}

/// Drop all whitespace from a type, then restore one space after commas
fn normalize_type_text(text: &str) -> String {
    let compact: String = text.split_whitespace().collect();
    compact.replace(',', ", ")
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
