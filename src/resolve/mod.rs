//! Short type name resolution
//!
//! Resolution never fails: a name that cannot be qualified comes back as
//! written. Precedence, highest first:
//!
//! 1. empty names and keywords resolve to the empty string
//! 2. primitives stay as they are
//! 3. an explicit single-type import ending in `.<name>`
//! 4. the first wildcard import
//! 5. the enclosing class itself, qualified with the package
//! 6. the built-in alias table
//! 7. the package of the compilation unit
//! 8. the name unchanged

mod builtins;

pub use builtins::BUILTIN_TYPES;

use crate::model::TypeReference;
use crate::parser::{is_keyword, is_primitive, ImportTable, TypeVariable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::trace;

const OBJECT: &str = "java.lang.Object";

/// Tunables for the resolver
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveOptions {
    /// Extra short-name aliases, consulted before the built-in table
    pub aliases: BTreeMap<String, String>,

    /// Consult the alias table before wildcard imports
    pub builtins_before_wildcards: bool,
}

/// Resolves type names against one compilation unit's header
pub struct NameResolver<'a> {
    table: &'a ImportTable,
    options: &'a ResolveOptions,
    /// Innermost scope first
    type_variables: Vec<TypeVariable>,
}

impl<'a> NameResolver<'a> {
    pub fn new(table: &'a ImportTable, options: &'a ResolveOptions) -> Self {
        Self {
            table,
            options,
            type_variables: table.class_type_variables.clone(),
        }
    }

    /// A resolver that also knows a method's own type variables
    pub fn for_method(&self, method_type_variables: &[TypeVariable]) -> NameResolver<'a> {
        let mut type_variables = method_type_variables.to_vec();
        type_variables.extend(self.type_variables.iter().cloned());
        NameResolver {
            table: self.table,
            options: self.options,
            type_variables,
        }
    }

    /// Qualify a bare type name
    pub fn resolve(&self, short_name: &str) -> String {
        let short_name = short_name.trim();

        if is_primitive(short_name) {
            return short_name.to_string();
        }
        if short_name.is_empty() || is_keyword(short_name) {
            return String::new();
        }

        if let Some(explicit) = self
            .table
            .explicit_imports()
            .find(|import| import.ends_with(&format!(".{}", short_name)))
        {
            return explicit.to_string();
        }

        if self.options.builtins_before_wildcards {
            if let Some(alias) = self.alias(short_name) {
                return alias;
            }
        }

        if let Some(prefix) = self.table.wildcard_prefixes().next() {
            return format!("{}.{}", prefix, short_name);
        }

        let package = self.table.package_name.as_deref();

        if self.table.class_name.as_deref() == Some(short_name) {
            return qualify(package, short_name);
        }

        if let Some(alias) = self.alias(short_name) {
            return alias;
        }

        qualify(package, short_name)
    }

    /// Resolve a full type text: erase generic arguments, keep array
    /// dimensions, erase type variables and qualify nested names
    pub fn resolve_type(&self, text: &str) -> TypeReference {
        let compact: String = text.split_whitespace().collect();
        let erased = erase_generics(&compact);
        let (base, dims) = split_array_suffix(&erased);
        let suffix = "[]".repeat(dims);
        let short_name = format!("{}{}", base, suffix);

        let resolved = if let Some(var) = self.type_variable(base) {
            match &var.bound {
                Some(bound) => {
                    let bound = erase_generics(&bound.split_whitespace().collect::<String>());
                    self.resolve_dotted(&bound)
                }
                None => OBJECT.to_string(),
            }
        } else {
            self.resolve_dotted(base)
        };

        let resolved = if resolved.is_empty() {
            resolved
        } else {
            format!("{}{}", resolved, suffix)
        };

        trace!("Resolved type {} -> {}", text.trim(), resolved);
        TypeReference::new(short_name, resolved)
    }

    fn resolve_dotted(&self, name: &str) -> String {
        let Some((outer, rest)) = name.split_once('.') else {
            return self.resolve(name);
        };

        // `java.util.Map` is already qualified; `Map.Entry` is a nested type
        if outer.chars().next().map_or(true, char::is_lowercase) {
            return name.to_string();
        }

        let outer = self.resolve(outer);
        if outer.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", outer, rest)
        }
    }

    fn alias(&self, short_name: &str) -> Option<String> {
        self.options
            .aliases
            .get(short_name)
            .cloned()
            .or_else(|| builtins::lookup(short_name).map(str::to_string))
    }

    fn type_variable(&self, name: &str) -> Option<&TypeVariable> {
        self.type_variables.iter().find(|v| v.name == name)
    }
}

/// Resolve with default options against explicit header parts
pub fn resolve(
    short_name: &str,
    imports: &[String],
    package_name: Option<&str>,
    class_name: Option<&str>,
) -> String {
    let table = ImportTable {
        package_name: package_name.map(str::to_string),
        imports: imports.to_vec(),
        class_name: class_name.map(str::to_string),
        class_type_variables: Vec::new(),
    };
    let options = ResolveOptions::default();
    NameResolver::new(&table, &options).resolve(short_name)
}

fn qualify(package: Option<&str>, short_name: &str) -> String {
    match package {
        Some(package) if !package.is_empty() => format!("{}.{}", package, short_name),
        _ => short_name.to_string(),
    }
}

/// Remove every `<...>` section, including nested ones
fn erase_generics(text: &str) -> String {
    let mut depth = 0usize;
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}

/// Split `Foo[][]` / `Foo...` into the base name and its dimension count
fn split_array_suffix(text: &str) -> (&str, usize) {
    let mut base = text;
    let mut dims = 0;

    if let Some(stripped) = base.strip_suffix("...") {
        base = stripped;
        dims += 1;
    }
    while let Some(stripped) = base.strip_suffix("[]") {
        base = stripped;
        dims += 1;
    }

    (base, dims)
}
