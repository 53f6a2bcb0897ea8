//! CLI Application logic
//!
//! Contains the command-line interface implementation. Each subcommand has
//! a `render_*` function producing its output as a string and a
//! `*_command` wrapper that prints or writes it.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cfold_core::{
    annotate, lines_of, CommandContext, FoldCommand, FoldRange, FoldRequest, FoldingAnalyzer,
    RangeRepository, ScanConfig, Scanner, Settings,
};

/// Output format for ranges and fold requests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for tool consumption
    Json,
}

/// Fold commands runnable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CommandArg {
    /// Fold everything
    All,
    /// Fold block comments and documentation blocks
    DocComments,
    /// Fold everything except the innermost range around the cursor
    AroundCursor,
    /// Fold function bodies
    Functions,
    /// Fold functions and namespace/class/struct/enum blocks
    FunctionsAndStructural,
}

impl From<CommandArg> for FoldCommand {
    fn from(arg: CommandArg) -> Self {
        match arg {
            CommandArg::All => FoldCommand::FoldAll,
            CommandArg::DocComments => FoldCommand::FoldDocComments,
            CommandArg::AroundCursor => FoldCommand::FoldAroundCursor,
            CommandArg::Functions => FoldCommand::FoldFunctions,
            CommandArg::FunctionsAndStructural => FoldCommand::FoldFunctionsAndStructural,
        }
    }
}

/// Where the scan configuration comes from
#[derive(Debug, Clone, Default, Args)]
pub struct ScanOptions {
    /// Settings file (cfold.toml format)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable every detector, ignoring any settings file
    #[arg(long)]
    pub all: bool,
}

#[derive(Parser)]
#[command(name = "cfold")]
#[command(author, version, about = "Folding ranges for C, C++ and C#", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the folding ranges of a source file
    Ranges {
        /// Input source file
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        #[command(flatten)]
        scan: ScanOptions,

        /// Log every detection event to stderr
        #[arg(long)]
        trace: bool,
    },

    /// Write the source with each folding range marked as ` @_N_`
    Dump {
        /// Input source file
        input: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        scan: ScanOptions,
    },

    /// Show the fold request a command would send to the editor
    Anchors {
        /// Fold command to plan
        #[arg(value_enum)]
        command: CommandArg,

        /// Input source file
        input: PathBuf,

        /// Zero-based cursor line
        #[arg(long)]
        cursor: usize,

        /// Pretend text is selected (commands then do nothing)
        #[arg(long)]
        selection_not_empty: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        #[command(flatten)]
        scan: ScanOptions,
    },
}

/// Run the CLI application
///
/// This is the main entry point for the CLI, parsing arguments and
/// dispatching to the appropriate command handler.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    init_logging();

    match cli.command {
        Commands::Ranges {
            input,
            format,
            scan,
            trace,
        } => {
            ranges_command(&input, format, &scan, trace)?;
        }
        Commands::Dump {
            input,
            output,
            scan,
        } => {
            dump_command(&input, output.as_deref(), &scan)?;
        }
        Commands::Anchors {
            command,
            input,
            cursor,
            selection_not_empty,
            format,
            scan,
        } => {
            let ctx = CommandContext {
                cursor_line: cursor,
                selection_empty: !selection_not_empty,
            };
            anchors_command(command, &input, &ctx, format, &scan)?;
        }
    }

    Ok(())
}

/// Diagnostics go to stderr so stdout stays machine-readable
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

/// Resolve the scan configuration for a run
///
/// `--all` wins; otherwise the given settings file is loaded, and without
/// one the default profile applies.
pub fn load_scan_config(options: &ScanOptions) -> Result<ScanConfig> {
    if options.all {
        return Ok(ScanConfig::all_enabled());
    }
    let Some(path) = &options.config else {
        return Ok(ScanConfig::default());
    };

    let settings = Settings::load_from_path(path)
        .with_context(|| format!("Failed to load settings: {}", path.display()))?
        .with_context(|| format!("Config file not found: {}", path.display()))?;
    debug!("Loaded settings from {}", path.display());
    Ok(settings.scan_config())
}

fn read_source(input: &Path) -> Result<String> {
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }
    fs::read_to_string(input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))
}

fn scan_file(
    input: &Path,
    options: &ScanOptions,
    trace: bool,
) -> Result<(String, RangeRepository, ScanConfig)> {
    let config = load_scan_config(options)?;
    let source = read_source(input)?;
    let repo = Scanner::new(config).with_trace(trace).scan_text(&source);
    Ok((source, repo, config))
}

/// Folding ranges of `input`, one per line as `start-end kind` or as a JSON array
pub fn render_ranges(
    input: &Path,
    format: OutputFormat,
    options: &ScanOptions,
    trace: bool,
) -> Result<String> {
    let (_, repo, config) = scan_file(input, options, trace)?;
    let ranges = FoldingAnalyzer::generate_ranges(&repo, &config);

    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(&ranges).context("Failed to serialize ranges to JSON")
        }
        OutputFormat::Text => Ok(ranges_text(&ranges)),
    }
}

fn ranges_text(ranges: &[FoldRange]) -> String {
    ranges
        .iter()
        .map(|r| format!("{}-{}\t{}\n", r.start_line, r.end_line, r.kind))
        .collect()
}

/// List folding ranges
pub fn ranges_command(
    input: &Path,
    format: OutputFormat,
    options: &ScanOptions,
    trace: bool,
) -> Result<()> {
    let output = render_ranges(input, format, options, trace)?;
    print!("{}", output);
    if format == OutputFormat::Json {
        println!();
    }
    Ok(())
}

/// Source of `input` annotated with fold markers
pub fn render_dump(input: &Path, options: &ScanOptions) -> Result<String> {
    let (source, repo, config) = scan_file(input, options, false)?;
    let ranges = FoldingAnalyzer::generate_ranges(&repo, &config);
    Ok(annotate(&lines_of(&source), &ranges))
}

/// Write the annotated source to `output`, or stdout
pub fn dump_command(input: &Path, output: Option<&Path>, options: &ScanOptions) -> Result<()> {
    let annotated = render_dump(input, options)?;

    match output {
        Some(path) => {
            fs::write(path, annotated)
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            println!("✓ Wrote {}", path.display());
        }
        None => println!("{}", annotated),
    }
    Ok(())
}

/// Fold request `command` produces for `input`, or a no-op
pub fn render_anchors(
    command: CommandArg,
    input: &Path,
    ctx: &CommandContext,
    format: OutputFormat,
    options: &ScanOptions,
) -> Result<String> {
    let (_, repo, config) = scan_file(input, options, false)?;
    let command = FoldCommand::from(command);
    let request = command.plan(&repo, &config, ctx);

    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&request)
            .context("Failed to serialize fold request to JSON"),
        OutputFormat::Text => Ok(match request {
            None => format!("{}: nothing to fold", command),
            Some(FoldRequest::All) => format!("{}: fold everything", command),
            Some(request) => {
                let lines: Vec<String> = request
                    .selection_lines()
                    .iter()
                    .map(|line| line.to_string())
                    .collect();
                format!("{}: fold 1 level up from lines {}", command, lines.join(", "))
            }
        }),
    }
}

/// Print the planned fold request
pub fn anchors_command(
    command: CommandArg,
    input: &Path,
    ctx: &CommandContext,
    format: OutputFormat,
    options: &ScanOptions,
) -> Result<()> {
    println!("{}", render_anchors(command, input, ctx, format, options)?);
    Ok(())
}
