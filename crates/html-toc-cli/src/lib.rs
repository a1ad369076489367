use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use html_toc_builder::RunOutcome;
use html_toc_config::{Config, LoadOptions};
use html_toc_ops::{
    DocumentSource, OperationError, Operations, OutlineFormat, OutlineOutcome, RenderOutcome,
    ScanOptions, TocMode, TocOptions, TocOutcome,
};
use log::LevelFilter;

/// Entry point for CLI execution. Returns the desired exit code.
pub fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut load = LoadOptions::default();
    if let Some(path) = cli.config {
        load = load.with_override_path(path);
    }
    let config = Config::load(load)?;
    let ops = Operations::new(config);

    let result = match cli.command {
        Command::Sync(args) => handle_sync(&ops, args),
        Command::Render(args) => handle_render(&ops, args),
        Command::Outline(args) => handle_outline(&ops, args),
    };

    match result {
        Err(OperationError::InvalidInput(message)) => {
            eprintln!("{message}");
            Ok(2)
        }
        Err(OperationError::Io { path, source }) => {
            eprintln!("I/O error on {}: {}", path.display(), source);
            Ok(4)
        }
        Err(err) => Err(err.into()),
        Ok(code) => Ok(code),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let _ = env_logger::builder()
        .filter_level(LevelFilter::Warn)
        .filter_module("html_toc_builder", level)
        .filter_module("html_toc_ops", level)
        .filter_module("html_toc_cli", level)
        .parse_default_env()
        .try_init();
}

fn handle_sync(ops: &Operations, args: SyncArgs) -> Result<i32, OperationError> {
    let SyncArgs {
        path,
        check: _,
        update,
        diff,
        no_ignore,
        quiet,
    } = args;

    let mode = if update {
        TocMode::Update
    } else if diff {
        TocMode::Diff
    } else {
        TocMode::Check
    };

    let options = TocOptions {
        scan: ScanOptions {
            paths: path,
            respect_ignore: !no_ignore,
        },
        mode,
        quiet,
    };
    let TocOutcome {
        rendered,
        exit_code,
        ..
    } = ops.toc(options)?;

    if !rendered.is_empty() {
        emit(&rendered);
    }
    Ok(exit_code)
}

fn handle_render(ops: &Operations, args: RenderArgs) -> Result<i32, OperationError> {
    let RenderOutcome { html, result } = ops.render(read_input(args.input)?)?;
    if let RunOutcome::Skipped(reason) = result {
        log::info!("document left unchanged: {reason}");
    }
    print!("{html}");
    Ok(0)
}

fn handle_outline(ops: &Operations, args: OutlineArgs) -> Result<i32, OperationError> {
    let format = match args.format.unwrap_or(OutlineFormatValue::Plain) {
        OutlineFormatValue::Plain => OutlineFormat::Plain,
        OutlineFormatValue::Json => OutlineFormat::Json,
    };
    let OutlineOutcome { rendered, .. } = ops.outline(read_input(args.input)?, format)?;
    if !rendered.is_empty() {
        emit(&rendered);
    }
    Ok(0)
}

fn read_input(input: PathBuf) -> Result<DocumentSource, OperationError> {
    if input.as_os_str() != "-" {
        return Ok(DocumentSource::Path(input));
    }
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|source| OperationError::Io {
            path: PathBuf::from("<stdin>"),
            source,
        })?;
    Ok(DocumentSource::Inline(buffer))
}

fn emit(content: &str) {
    print!("{}", content);
    if !content.ends_with('\n') {
        println!();
    }
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Generate tables of contents for HTML documents",
    propagate_version = true
)]
struct Cli {
    /// Use this config file instead of discovering `.html-toc.toml`
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Synchronise the TOC of every HTML file in the project
    Sync(SyncArgs),
    /// Print one document with its TOC rebuilt
    Render(RenderArgs),
    /// Print the TOC tree of one document
    Outline(OutlineArgs),
}

#[derive(Args)]
struct SyncArgs {
    /// Restrict processing to specific files or directories
    #[arg(long = "path", value_name = "PATH", action = ArgAction::Append)]
    path: Vec<PathBuf>,
    /// Report stale files without modifying them (default)
    #[arg(long, conflicts_with_all = ["update", "diff"])]
    check: bool,
    /// Rewrite stale files in place
    #[arg(long, conflicts_with_all = ["check", "diff"])]
    update: bool,
    /// Print unified diffs for stale files
    #[arg(long, conflicts_with_all = ["check", "update"])]
    diff: bool,
    /// Disable `.html-toc-ignore` filtering
    #[arg(long = "no-ignore")]
    no_ignore: bool,
    /// Suppress output when no changes are required
    #[arg(long)]
    quiet: bool,
}

#[derive(Args)]
struct RenderArgs {
    /// HTML file to read, or `-` for stdin
    #[arg(value_name = "FILE")]
    input: PathBuf,
}

#[derive(Args)]
struct OutlineArgs {
    /// HTML file to read, or `-` for stdin
    #[arg(value_name = "FILE")]
    input: PathBuf,
    /// Output format (plain or json)
    #[arg(long, value_enum)]
    format: Option<OutlineFormatValue>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutlineFormatValue {
    Plain,
    Json,
}
