use miette::{IntoDiagnostic, Result, WrapErr};
use serde::Serialize;
use std::path::PathBuf;

/// JSON reporter for change documents
pub struct JsonReporter {
    output_path: Option<PathBuf>,
    pretty: bool,
}

impl JsonReporter {
    pub fn new(output_path: Option<PathBuf>, pretty: bool) -> Self {
        Self {
            output_path,
            pretty,
        }
    }

    pub fn render<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        if self.pretty {
            serde_json::to_string_pretty(value).into_diagnostic()
        } else {
            serde_json::to_string(value).into_diagnostic()
        }
    }

    pub fn report<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        let json = self.render(value)?;

        if let Some(path) = &self.output_path {
            std::fs::write(path, &json)
                .into_diagnostic()
                .wrap_err_with(|| format!("Failed to write report: {}", path.display()))?;
            eprintln!("Report written to: {}", path.display());
        } else {
            println!("{}", json);
        }

        Ok(())
    }
}
