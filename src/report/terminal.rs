use crate::analysis::CategoryStatistics;
use crate::changelog::ChangeEntry;
use crate::model::{ApiChangeDocument, ApiChangeRecord, ClassLabel};
use colored::Colorize;

const BAR_WIDTH: usize = 30;

/// Terminal reporter with colored output
pub struct TerminalReporter {
    /// Also print the qualified signature under each entry
    show_code_long: bool,
}

impl TerminalReporter {
    pub fn new() -> Self {
        Self {
            show_code_long: true,
        }
    }

    pub fn with_code_long(mut self, show: bool) -> Self {
        self.show_code_long = show;
        self
    }

    /// Extraction summary, one block per document
    pub fn report_documents(&self, documents: &[ApiChangeDocument]) {
        let total: usize = documents.iter().map(|d| d.implemented_methods.len()).sum();
        if total == 0 {
            println!("{}", "No method or constructor declarations found.".yellow());
            return;
        }

        println!();
        for doc in documents.iter().filter(|d| !d.is_empty()) {
            println!("{}", doc.name.cyan().bold());
            for record in &doc.implemented_methods {
                println!("  {} {}", line_label(record).dimmed(), record.code);
                if self.show_code_long {
                    println!("      {}", record.code_long.dimmed());
                }
            }
            println!();
        }

        println!(
            "{}",
            format!("Extracted {} declarations from {} classes", total, documents.len())
                .green()
                .bold()
        );
    }

    /// Change-log entries grouped by class label
    pub fn report_changes(&self, entries: &[&ChangeEntry]) {
        if entries.is_empty() {
            println!("{}", "No matching API changes.".yellow());
            return;
        }

        for label in ClassLabel::ALL {
            let group: Vec<&&ChangeEntry> = entries
                .iter()
                .filter(|e| e.record.class_label == label)
                .collect();
            if group.is_empty() {
                continue;
            }

            println!();
            println!("{}", format!("{} ({})", label, group.len()).color(label_color(label)).bold());

            for entry in group {
                self.print_entry(entry);
            }
        }

        println!();
        println!("{}", format!("{} API changes", entries.len()).bold());
    }

    fn print_entry(&self, entry: &ChangeEntry) {
        let record = &entry.record;
        let category = record.category.as_deref().unwrap_or("");
        println!(
            "  {} {} [{}] {}",
            entry.qualified_owner().cyan(),
            record.code,
            record.change_type.dimmed(),
            category.magenta()
        );
        if self.show_code_long && !record.code_long.is_empty() {
            println!("      {}", record.code_long.dimmed());
        }

        let details = match record.class_label {
            ClassLabel::SensitiveSource => sensitive_returned(record),
            ClassLabel::SensitiveSink => third_party_transmitted(record),
            ClassLabel::NonSensitive => return,
        };
        if details.is_empty() {
            println!("      {}", "None".dimmed());
        }
        for detail in details {
            println!("      {} {}", "→".dimmed(), detail);
        }
    }

    /// Label × category table with bars scaled to the largest row
    pub fn report_statistics(&self, stats: &CategoryStatistics) {
        if stats.total() == 0 {
            println!("{}", "No API changes to count.".yellow());
            return;
        }

        let rows = stats.rows();
        let max_row = rows
            .iter()
            .map(|(_, counts)| counts.iter().sum::<usize>())
            .max()
            .unwrap_or(0)
            .max(1);

        println!();
        println!(
            "{:<26} {:>7} {:>7} {:>7}  {}",
            "Category".bold(),
            "Source".red().bold(),
            "Sink".yellow().bold(),
            "Other".blue().bold(),
            "Total".bold()
        );

        for (category, [source, sink, other]) in rows {
            let row_total = source + sink + other;
            println!(
                "{:<26} {:>7} {:>7} {:>7}  {} {}",
                category,
                source,
                sink,
                other,
                bar(source, sink, other, max_row),
                row_total
            );
        }

        println!();
        println!(
            "{}: {} sources, {} sinks, {} non-sensitive ({} total)",
            "Summary".bold(),
            stats.label_total(ClassLabel::SensitiveSource).to_string().red(),
            stats.label_total(ClassLabel::SensitiveSink).to_string().yellow(),
            stats.label_total(ClassLabel::NonSensitive).to_string().blue(),
            stats.total()
        );
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn label_color(label: ClassLabel) -> colored::Color {
    match label {
        ClassLabel::SensitiveSource => colored::Color::Red,
        ClassLabel::SensitiveSink => colored::Color::Yellow,
        ClassLabel::NonSensitive => colored::Color::Blue,
    }
}

fn line_label(record: &ApiChangeRecord) -> String {
    let line = record
        .link
        .rsplit_once(";l=")
        .map(|(_, l)| l)
        .unwrap_or("?");
    format!("{:>5}", format!("l.{}", line))
}

fn bar(source: usize, sink: usize, other: usize, max_row: usize) -> String {
    let width = |n: usize| n * BAR_WIDTH / max_row;
    format!(
        "{}{}{}",
        "█".repeat(width(source)).red(),
        "█".repeat(width(sink)).yellow(),
        "█".repeat(width(other)).blue()
    )
}

/// Descriptions of returned data flagged as possibly sensitive
pub fn sensitive_returned(record: &ApiChangeRecord) -> Vec<String> {
    record
        .data_returned
        .iter()
        .filter(|d| d.possibly_sensitive)
        .map(|d| d.description.clone())
        .collect()
}

/// `type to resource` for sensitive data sent somewhere third parties can read
pub fn third_party_transmitted(record: &ApiChangeRecord) -> Vec<String> {
    record
        .data_transmitted
        .iter()
        .filter(|d| d.possibly_sensitive)
        .flat_map(|d| {
            d.destinations
                .iter()
                .flatten()
                .filter(|dest| dest.accessible_to_third_parties)
                .map(move |dest| format!("{} to {}", d.data_type, dest.resource))
        })
        .collect()
}
