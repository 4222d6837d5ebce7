//! Source text to API-change document
//!
//! Runs the whole pipeline: comment stripping, header extraction,
//! declaration location, name resolution, sensitivity classification and
//! record assembly. Each call is independent and keeps no state.

mod assembler;

pub use assembler::{code, code_long, link, RecordAssembler, ADDITION};

use crate::analysis::SensitivityClassifier;
use crate::config::ExtractionConfig;
use crate::model::{ApiChangeDocument, MethodDeclaration, Parameter};
use crate::parser::{DeclarationLocator, ImportTable, ParameterError, RawHeader, SourceUnit};
use crate::resolve::{NameResolver, ResolveOptions};
use thiserror::Error;
use tracing::{debug, warn};

/// Extraction errors
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("No Java source code to process")]
    EmptySource,
    #[error("No base URL provided for source links")]
    MissingBaseUrl,
    #[error("Malformed declaration header at line {line}: {header}")]
    MalformedHeader {
        line: usize,
        header: String,
        #[source]
        source: ParameterError,
    },
}

/// Header table and resolved declarations of one source unit
#[derive(Debug, Clone)]
pub struct Extraction {
    pub table: ImportTable,
    pub declarations: Vec<MethodDeclaration>,
}

/// Runs the extraction pipeline
#[derive(Debug, Clone, Default)]
pub struct ApiChangeExtractor {
    resolve_options: ResolveOptions,
    classifier: SensitivityClassifier,
    skip_malformed: bool,
}

impl ApiChangeExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            resolve_options: ResolveOptions {
                aliases: config.aliases.clone(),
                builtins_before_wildcards: config.builtins_before_wildcards,
            },
            classifier: SensitivityClassifier::new().with_string_sensitive(config.string_is_sensitive),
            skip_malformed: config.skip_malformed,
        }
    }

    /// Log and drop malformed headers instead of failing
    pub fn with_skip_malformed(mut self, skip: bool) -> Self {
        self.skip_malformed = skip;
        self
    }

    /// Extract a complete document, or fail without partial output
    pub fn extract(&self, source: &str, base_url: &str) -> Result<ApiChangeDocument, ExtractError> {
        if source.trim().is_empty() {
            return Err(ExtractError::EmptySource);
        }
        let base_url = base_url.trim();
        if base_url.is_empty() {
            return Err(ExtractError::MissingBaseUrl);
        }

        let unit = SourceUnit::new(source);
        let extraction = self.extract_unit(&unit)?;

        let assembler = RecordAssembler::new(base_url, &self.classifier);
        Ok(assembler.document(extraction.table.document_name(), &extraction.declarations))
    }

    /// Locate and resolve every declaration of a source unit
    pub fn extract_unit(&self, unit: &SourceUnit) -> Result<Extraction, ExtractError> {
        let table = ImportTable::from_cleaned(unit.masked());
        debug!(
            "Header: package {:?}, {} imports, class {}",
            table.package_name,
            table.imports.len(),
            table.document_name()
        );

        let headers = DeclarationLocator::new(&table).locate(unit);
        let resolver = NameResolver::new(&table, &self.resolve_options);

        let mut declarations = Vec::with_capacity(headers.len());
        for header in &headers {
            match declare(header, &resolver) {
                Ok(decl) => declarations.push(decl),
                Err(source) if self.skip_malformed => {
                    warn!("Skipping header at line {}: {}", header.line, source);
                }
                Err(source) => {
                    return Err(ExtractError::MalformedHeader {
                        line: header.line,
                        header: header.display(),
                        source,
                    });
                }
            }
        }

        Ok(Extraction {
            table,
            declarations,
        })
    }
}

fn declare(header: &RawHeader, resolver: &NameResolver) -> Result<MethodDeclaration, ParameterError> {
    let scoped = resolver.for_method(&header.type_parameters);

    let parameters = header
        .parse_parameters()?
        .into_iter()
        .map(|p| Parameter {
            type_ref: scoped.resolve_type(&p.type_text),
            name: p.name,
            annotations: p.annotations,
        })
        .collect();

    Ok(MethodDeclaration {
        modifiers: header.modifiers.clone(),
        annotations: header.annotations.clone(),
        return_type_text: header.return_type.clone(),
        return_type: header.return_type.as_deref().map(|t| scoped.resolve_type(t)),
        method_name: header.name.clone(),
        parameter_text: header.parameters.clone(),
        parameters,
        throws: header.throws.iter().map(|t| scoped.resolve_type(t)).collect(),
        source_offset: header.offset,
        line_number: header.line,
        is_constructor: header.is_constructor,
    })
}
