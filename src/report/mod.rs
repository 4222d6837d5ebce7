mod flowdroid;
mod json;
mod terminal;

pub use flowdroid::{default_file_name, group_methods, render as render_flowdroid, FlowDroidExporter, FlowDroidMethod};
pub use json::JsonReporter;
pub use terminal::{sensitive_returned, third_party_transmitted, TerminalReporter};

use crate::model::ApiChangeDocument;
use miette::Result;
use std::path::PathBuf;

/// Output format for extraction results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Json,
    Terminal,
}

impl ReportFormat {
    /// Parse a config value; unknown names fall back to JSON
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "terminal" => ReportFormat::Terminal,
            _ => ReportFormat::Json,
        }
    }
}

/// Reporter for extracted change documents
pub struct Reporter {
    format: ReportFormat,
    output_path: Option<PathBuf>,
    pretty: bool,
    show_code_long: bool,
}

impl Reporter {
    pub fn new(format: ReportFormat, output_path: Option<PathBuf>, pretty: bool) -> Self {
        Self {
            format,
            output_path,
            pretty,
            show_code_long: true,
        }
    }

    /// Print qualified signatures in terminal output
    pub fn with_code_long(mut self, show: bool) -> Self {
        self.show_code_long = show;
        self
    }

    fn terminal(&self) -> TerminalReporter {
        TerminalReporter::new().with_code_long(self.show_code_long)
    }

    /// Report a single document
    pub fn report_document(&self, document: &ApiChangeDocument) -> Result<()> {
        match self.format {
            ReportFormat::Terminal => {
                self.terminal().report_documents(std::slice::from_ref(document));
                Ok(())
            }
            ReportFormat::Json => JsonReporter::new(self.output_path.clone(), self.pretty).report(document),
        }
    }

    /// Report documents of a directory run; JSON output is an array
    pub fn report_documents(&self, documents: &[ApiChangeDocument]) -> Result<()> {
        match self.format {
            ReportFormat::Terminal => {
                self.terminal().report_documents(documents);
                Ok(())
            }
            ReportFormat::Json => JsonReporter::new(self.output_path.clone(), self.pretty).report(documents),
        }
    }
}
