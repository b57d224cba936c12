use clap::{Parser, Subcommand, ValueEnum};
use form_spec::document::{self, DocumentFormat};
use form_spec::{
    PayloadExclusivity, ValidationOptions, ValidationReport, Validator, Violation,
    document_schema, validate,
};
use globset::{Glob, GlobMatcher};
use serde::Serialize;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

const MAX_DEPTH_ENV: &str = "FORM_DSL_MAX_NESTING_DEPTH";
const LENIENT_ENV: &str = "FORM_DSL_LENIENT_PAYLOADS";
const DEFAULT_INCLUDE: &str = "**/*.{json,yaml,yml}";

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Form DSL validation CLI",
    long_about = "Validates form definitions, emits the document JSON Schema, and converts documents between JSON and YAML"
)]
struct Cli {
    /// Log engine activity to stderr (RUST_LOG overrides).
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum TargetFormat {
    Json,
    Yaml,
}

impl From<TargetFormat> for DocumentFormat {
    fn from(format: TargetFormat) -> Self {
        match format {
            TargetFormat::Json => DocumentFormat::Json,
            TargetFormat::Yaml => DocumentFormat::Yaml,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Validate one or more form documents and report every violation.
    Validate {
        /// Form documents (.json, .yaml, .yml) or directories to scan.
        #[arg(required = true, value_name = "PATH")]
        paths: Vec<PathBuf>,
        /// Report format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Deepest hierarchical checklist level to inspect (defaults to FORM_DSL_MAX_NESTING_DEPTH or 32).
        #[arg(long, value_name = "N")]
        max_depth: Option<usize>,
        /// Ignore payloads that do not match the widget type (also FORM_DSL_LENIENT_PAYLOADS=1).
        #[arg(long)]
        lenient_payloads: bool,
        /// Glob applied to files found while scanning directories.
        #[arg(long, value_name = "GLOB", default_value = DEFAULT_INCLUDE)]
        include: String,
    },
    /// Print the JSON Schema of the form document format.
    Schema {
        /// Write the schema to a file instead of stdout.
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Convert a form document between JSON and YAML.
    Convert {
        /// Source document (.json, .yaml, .yml).
        #[arg(long, value_name = "INPUT")]
        input: PathBuf,
        /// Target format.
        #[arg(long, value_enum)]
        to: TargetFormat,
        /// Write the converted document to a file instead of stdout.
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Command::Validate {
            paths,
            format,
            max_depth,
            lenient_payloads,
            include,
        } => {
            let options =
                resolve_options(max_depth, lenient_payloads, |key| env::var(key).ok())?;
            run_validate(paths, format, options, &include)
        }
        Command::Schema { out } => run_schema(out),
        Command::Convert { input, to, out } => run_convert(input, to, out),
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Flags win over environment variables, which win over the defaults.
fn resolve_options(
    max_depth: Option<usize>,
    lenient_payloads: bool,
    lookup: impl Fn(&str) -> Option<String>,
) -> CliResult<ValidationOptions> {
    let defaults = ValidationOptions::default();

    let max_nesting_depth = match max_depth {
        Some(depth) => depth,
        None => match lookup(MAX_DEPTH_ENV) {
            Some(raw) => raw.trim().parse::<usize>().map_err(|err| {
                format!("{MAX_DEPTH_ENV} must be a non-negative integer, got '{raw}': {err}")
            })?,
            None => defaults.max_nesting_depth,
        },
    };

    let lenient = lenient_payloads
        || lookup(LENIENT_ENV).is_some_and(|raw| {
            matches!(
                raw.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            )
        });

    Ok(ValidationOptions {
        max_nesting_depth,
        payload_exclusivity: if lenient {
            PayloadExclusivity::Lenient
        } else {
            PayloadExclusivity::Strict
        },
    })
}

/// Per-document outcome for the validate command.
#[derive(Debug, Serialize)]
struct DocumentResult {
    path: String,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    violations: Vec<Violation>,
}

impl DocumentResult {
    fn checked(path: &Path, report: ValidationReport) -> Self {
        DocumentResult {
            path: path.display().to_string(),
            valid: report.valid,
            error: None,
            violations: report.violations,
        }
    }

    fn unreadable(path: &Path, error: String) -> Self {
        DocumentResult {
            path: path.display().to_string(),
            valid: false,
            error: Some(error),
            violations: Vec::new(),
        }
    }
}

fn run_validate(
    paths: Vec<PathBuf>,
    format: OutputFormat,
    options: ValidationOptions,
    include: &str,
) -> CliResult<()> {
    let documents = collect_documents(&paths, include)?;
    if documents.is_empty() {
        return Err("no form documents found".into());
    }
    let validator = Validator::new(options);
    debug!(
        count = documents.len(),
        options = ?validator.options(),
        "validating form documents"
    );
    let results: Vec<DocumentResult> = documents
        .iter()
        .map(|path| match document::read_path(path) {
            Ok(form) => DocumentResult::checked(path, validator.report(&form)),
            Err(err) => DocumentResult::unreadable(path, err.to_string()),
        })
        .collect();

    match format {
        OutputFormat::Text => results.iter().for_each(describe_result),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
    }

    let failed = results.iter().filter(|result| !result.valid).count();
    if failed == 0 {
        Ok(())
    } else {
        Err(format!("{} of {} documents failed validation", failed, results.len()).into())
    }
}

fn describe_result(result: &DocumentResult) {
    if let Some(error) = &result.error {
        println!("{}: unreadable", result.path);
        println!("  {}", error);
        return;
    }
    if result.valid {
        println!("{}: valid", result.path);
        return;
    }
    println!(
        "{}: invalid ({} violation{})",
        result.path,
        result.violations.len(),
        if result.violations.len() == 1 { "" } else { "s" }
    );
    for violation in &result.violations {
        println!("  {}", violation);
    }
}

/// Expands directories recursively, keeping files whose path relative to the
/// scanned directory matches `include`. Explicit file arguments are kept as-is.
/// Symbolic links are not followed while scanning.
fn collect_documents(paths: &[PathBuf], include: &str) -> CliResult<Vec<PathBuf>> {
    let matcher = Glob::new(include)?.compile_matcher();
    let mut found = Vec::new();
    for path in paths {
        if path.is_dir() {
            scan_directory(path, &matcher, &mut found)?;
        } else {
            found.push(path.clone());
        }
    }
    Ok(found)
}

fn scan_directory(root: &Path, matcher: &GlobMatcher, found: &mut Vec<PathBuf>) -> CliResult<()> {
    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        if matcher.is_match(relative) {
            found.push(entry.into_path());
        }
    }
    Ok(())
}

fn run_schema(out: Option<PathBuf>) -> CliResult<()> {
    let schema = serde_json::to_string_pretty(&document_schema())?;
    write_output(out.as_deref(), &schema)
}

fn run_convert(input: PathBuf, to: TargetFormat, out: Option<PathBuf>) -> CliResult<()> {
    let form = document::read_path(&input)?;
    if let Err(violations) = validate(&form) {
        warn!(
            path = %input.display(),
            violations = violations.len(),
            "converting a form definition that does not validate"
        );
    }
    let converted = document::to_string(to.into(), &form)?;
    write_output(out.as_deref(), &converted)
}

fn write_output(out: Option<&Path>, contents: &str) -> CliResult<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, contents)?;
            println!("Wrote {}", path.display());
        }
        None => println!("{}", contents.trim_end()),
    }
    Ok(())
}
