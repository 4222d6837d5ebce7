use apichanges::analysis::CategoryStatistics;
use apichanges::changelog::{ChangeFilter, ChangeLog};
use apichanges::config::Config;
use apichanges::discovery::{FileFinder, SourceFile};
use apichanges::extract::{ApiChangeExtractor, ExtractError};
use apichanges::model::{ApiChangeDocument, ClassLabel};
use apichanges::report::{FlowDroidExporter, ReportFormat, Reporter, TerminalReporter};
use clap::{Parser, Subcommand};
use colored::Colorize;
use miette::{miette, IntoDiagnostic, Result, WrapErr};
use rayon::prelude::*;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// apichanges - Extract API-change records from Java sources
#[derive(Parser, Debug)]
#[command(name = "apichanges")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode - only output results
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract method and constructor declarations from a Java file or directory
    Extract {
        /// Java file, directory of Java files, or `-` for stdin
        input: PathBuf,

        /// Base URL for source links (a directory's files are appended to it)
        #[arg(long)]
        base_url: Option<String>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (for json format)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Single-line JSON output
        #[arg(long)]
        compact: bool,

        /// Extract directory files in parallel
        #[arg(long)]
        parallel: bool,

        /// Flag String values as possibly sensitive
        #[arg(long)]
        string_sensitive: bool,

        /// Skip headers whose parameter lists cannot be parsed
        #[arg(long)]
        skip_malformed: bool,

        /// Patterns to exclude (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Hide qualified signatures in terminal output
        #[arg(long)]
        brief: bool,
    },

    /// List change-log entries grouped by class
    List {
        /// Path to changes.json
        changes: PathBuf,

        /// Only entries with this change type (e.g. Addition)
        #[arg(long)]
        change_type: Option<String>,

        /// Only entries with this class
        #[arg(long = "class", value_enum)]
        class_label: Option<ClassArg>,

        /// Only entries with this category
        #[arg(long)]
        category: Option<String>,

        /// Hide qualified signatures
        #[arg(long)]
        brief: bool,
    },

    /// Count change-log entries per class and category
    Stats {
        /// Path to changes.json
        changes: PathBuf,
    },

    /// Export sensitive sources and sinks in FlowDroid format
    Flowdroid {
        /// Path to changes.json
        changes: PathBuf,

        /// Output file (default: sources-sinks-flowdroid_<timestamp>.txt)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    Json,
    Terminal,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => ReportFormat::Json,
            OutputFormat::Terminal => ReportFormat::Terminal,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum ClassArg {
    Source,
    Sink,
    NonSensitive,
}

impl From<ClassArg> for ClassLabel {
    fn from(class: ClassArg) -> Self {
        match class {
            ClassArg::Source => ClassLabel::SensitiveSource,
            ClassArg::Sink => ClassLabel::SensitiveSink,
            ClassArg::NonSensitive => ClassLabel::NonSensitive,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    debug!("apichanges v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;

    match cli.command {
        Command::Extract {
            input,
            base_url,
            format,
            output,
            compact,
            parallel,
            string_sensitive,
            skip_malformed,
            exclude,
            brief,
        } => {
            let mut config = config;
            if let Some(base_url) = base_url {
                config.extraction.base_url = Some(base_url);
            }
            config.extraction.string_is_sensitive |= string_sensitive;
            config.extraction.skip_malformed |= skip_malformed;
            config.exclude.extend(exclude);

            let format = format
                .map(ReportFormat::from)
                .unwrap_or_else(|| ReportFormat::from_name(&config.report.format));
            let pretty = config.report.pretty && !compact;
            let reporter = Reporter::new(format, output, pretty).with_code_long(!brief);

            run_extract(&config, &input, parallel, &reporter)
        }
        Command::List {
            changes,
            change_type,
            class_label,
            category,
            brief,
        } => {
            let filter = ChangeFilter {
                change_type,
                class_label: class_label.map(ClassLabel::from),
                category,
            };
            run_list(&changes, &filter, brief)
        }
        Command::Stats { changes } => run_stats(&changes),
        Command::Flowdroid { changes, output } => run_flowdroid(&changes, output),
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Results go to stdout, so logs stay on stderr
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    if let Some(config_path) = &cli.config {
        Config::from_file(config_path)
    } else {
        Config::from_default_locations(Path::new("."))
    }
}

fn run_extract(config: &Config, input: &Path, parallel: bool, reporter: &Reporter) -> Result<()> {
    let base_url = config
        .extraction
        .base_url
        .clone()
        .unwrap_or_default();
    let extractor = ApiChangeExtractor::from_config(&config.extraction);

    if input.is_dir() {
        // Per-file checks skip empty files, so the base URL is required up front
        if base_url.trim().is_empty() {
            return Err(ExtractError::MissingBaseUrl).into_diagnostic();
        }
        let documents = extract_directory(config, &extractor, input, &base_url, parallel)?;
        return reporter.report_documents(&documents);
    }

    // Empty source is reported before a missing base URL
    let source = read_input(input)?;
    let document = extractor.extract(&source, &base_url).into_diagnostic()?;
    info!(
        "Extracted {} declarations from {}",
        document.implemented_methods.len(),
        document.name
    );
    reporter.report_document(&document)
}

fn read_input(input: &Path) -> Result<String> {
    if input.as_os_str() == "-" {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .into_diagnostic()
            .wrap_err("Failed to read source from stdin")?;
        return Ok(source);
    }

    std::fs::read_to_string(input)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read {}", input.display()))
}

fn extract_directory(
    config: &Config,
    extractor: &ApiChangeExtractor,
    root: &Path,
    base_url: &str,
    parallel: bool,
) -> Result<Vec<ApiChangeDocument>> {
    use indicatif::{ProgressBar, ProgressStyle};
    use std::time::Instant;

    let start_time = Instant::now();

    info!("Discovering files...");
    let files = FileFinder::new(config).find_files(root);
    info!("Found {} Java files", files.len());

    if files.is_empty() {
        eprintln!("{}", "No Java files found.".yellow());
        return Ok(Vec::new());
    }

    let results: Vec<Result<Option<ApiChangeDocument>>> = if parallel {
        files
            .par_iter()
            .map(|file| extract_file(extractor, file, base_url))
            .collect()
    } else {
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
                .into_diagnostic()?
                .progress_chars("#>-"),
        );

        let results: Vec<_> = files
            .iter()
            .map(|file| {
                let result = extract_file(extractor, file, base_url);
                pb.inc(1);
                result
            })
            .collect();
        pb.finish_and_clear();
        results
    };

    let documents: Vec<ApiChangeDocument> = results
        .into_iter()
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .flatten()
        .collect();

    info!(
        "Extracted {} declarations from {} files in {:.2}s",
        documents.iter().map(|d| d.implemented_methods.len()).sum::<usize>(),
        documents.len(),
        start_time.elapsed().as_secs_f64()
    );

    Ok(documents)
}

/// `None` for files with no source text
fn extract_file(
    extractor: &ApiChangeExtractor,
    file: &SourceFile,
    base_url: &str,
) -> Result<Option<ApiChangeDocument>> {
    let source = file.read_contents()?;
    match extractor.extract(&source, &file.link_base(base_url)) {
        Ok(document) => Ok(Some(document)),
        Err(ExtractError::EmptySource) => {
            warn!("Skipping empty file: {}", file.relative_path);
            Ok(None)
        }
        Err(e) => Err(e)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to extract {}", file.relative_path)),
    }
}

fn load_entries(changes: &Path) -> Result<Vec<apichanges::ChangeEntry>> {
    let log = ChangeLog::load(changes).into_diagnostic()?;
    Ok(log.entries())
}

fn run_list(changes: &Path, filter: &ChangeFilter, brief: bool) -> Result<()> {
    let entries = load_entries(changes)?;
    let matched = filter.apply(&entries);
    debug!("{} of {} entries match", matched.len(), entries.len());

    TerminalReporter::new()
        .with_code_long(!brief)
        .report_changes(&matched);
    Ok(())
}

fn run_stats(changes: &Path) -> Result<()> {
    let entries = load_entries(changes)?;
    let stats = CategoryStatistics::from_entries(&entries);
    TerminalReporter::new().report_statistics(&stats);
    Ok(())
}

fn run_flowdroid(changes: &Path, output: Option<PathBuf>) -> Result<()> {
    let entries = load_entries(changes)?;
    if entries.is_empty() {
        return Err(miette!("No data available to export"));
    }

    let path = FlowDroidExporter::new(output).export(&entries)?;
    println!(
        "{}",
        format!("FlowDroid definitions written to: {}", path.display()).green()
    );
    Ok(())
}
