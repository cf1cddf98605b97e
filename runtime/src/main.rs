use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use strategy_digest::cli;
use strategy_digest::config::DigestConfig;

#[derive(Parser)]
#[command(name = "strategy-digest", version, about = "Aggregate strategy backtest reports into a JSON digest")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Machine-readable JSON output on stdout
    #[arg(long, global = true)]
    json: bool,

    /// Suppress console output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Show skipped files and info-level logs
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the report folder and rewrite the digest (default)
    Build {
        /// Folder containing the HTML reports
        #[arg(long, short)]
        input: Option<PathBuf>,
        /// Digest file to write
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Per-category totals from an existing digest
    Summary {
        /// Digest file to read (defaults to the configured output)
        #[arg(long, short)]
        input: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let args = Cli::parse();

    if args.json {
        std::env::set_var("DIGEST_JSON", "1");
    }
    if args.quiet {
        std::env::set_var("DIGEST_QUIET", "1");
    }
    if args.verbose {
        std::env::set_var("DIGEST_VERBOSE", "1");
    }
    if args.no_color {
        std::env::set_var("DIGEST_NO_COLOR", "1");
    }

    let level = if args.verbose { "info" } else { "error" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("strategy_digest={level}").parse()?),
        )
        .init();

    match plan(args.command, DigestConfig::from_env()) {
        Action::Build(config) => cli::build_cmd::run(&config),
        Action::Summary(path) => cli::summary_cmd::run(&path),
    }
}

/// What a parsed command line resolves to.
#[derive(Debug, PartialEq, Eq)]
enum Action {
    Build(DigestConfig),
    Summary(PathBuf),
}

/// Resolve the subcommand against the configured paths. No subcommand
/// means `build` with the configured paths.
fn plan(command: Option<Command>, config: DigestConfig) -> Action {
    match command {
        None => Action::Build(config),
        Some(Command::Build { input, output }) => {
            Action::Build(config.with_overrides(input, output))
        }
        Some(Command::Summary { input }) => {
            Action::Summary(input.unwrap_or(config.output_path))
        }
    }
}
