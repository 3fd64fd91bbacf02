//! Solved Archive - Main Entry Point
//!
//! Command line front end for the `solved_archive` library.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use solved_archive::handlers::organize::{OrganizeRequest, ResolverKind};
use solved_archive::handlers::{dashboard, organize, stats, update_readmes};
use solved_archive::{ArchiveConfig, DuplicatePolicy};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Exit status when the run is interrupted with Ctrl-C
const EXIT_INTERRUPTED: i32 = 130;

/// Maintenance tools for a solved-problems archive
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Archive root directory
    #[arg(long, global = true, default_value = ".")]
    archive: PathBuf,

    /// Optional TOML file overriding the archive layout
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Move problems into easy/medium/hard buckets
    Organize {
        /// Platform whose root-level problems are sorted
        #[arg(long, default_value = "leetcode")]
        platform: String,

        /// Difficulty source
        #[arg(long, value_enum, default_value_t = ResolverKind::Readme)]
        resolver: ResolverKind,

        /// Lookup command for the `command` resolver (slug is appended)
        #[arg(long)]
        lookup_command: Option<String>,

        /// What to do when the bucket already holds the problem
        #[arg(long, value_enum)]
        on_duplicate: Option<DuplicatePolicy>,

        /// Report what would move without touching anything
        #[arg(long)]
        dry_run: bool,

        /// Commit the reorganization when the archive is a git repository
        #[arg(long)]
        commit: bool,
    },
    /// Count solved problems per platform
    Stats {
        /// Also break counts down by modification month
        #[arg(long)]
        by_month: bool,

        /// Write the per-platform file counts to stats.json
        #[arg(long)]
        json: bool,
    },
    /// Rewrite the solved-count badges in README files
    UpdateReadmes,
    /// Write the monthly progress dashboard
    Dashboard {
        /// Output file (defaults to dashboard.md in the archive)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> Result<()> {
    let config = ArchiveConfig::load(&args.archive, args.config.as_deref())?;

    match args.command {
        Command::Organize {
            platform,
            resolver,
            lookup_command,
            on_duplicate,
            dry_run,
            commit,
        } => {
            let request = OrganizeRequest {
                platform,
                resolver,
                lookup_command,
                policy: on_duplicate,
                dry_run,
                commit,
            };
            organize::handle_organize(&config, &request)?;
        }
        Command::Stats { by_month, json } => {
            stats::handle_stats(&config, by_month, json)?;
        }
        Command::UpdateReadmes => {
            update_readmes::handle_update_readmes(&config)?;
        }
        Command::Dashboard { output } => {
            dashboard::handle_dashboard(&config, output.as_deref())?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Check if no arguments were provided (except the program name)
    if std::env::args().len() == 1 {
        let mut cmd = Args::command();
        cmd.print_help().ok();
        println!();
        return ExitCode::from(2);
    }

    let args = Args::parse();
    init_tracing(args.verbose);

    // File work is blocking; keep the main task free to notice Ctrl-C
    let worker = tokio::task::spawn_blocking(move || run(args));

    tokio::select! {
        result = worker => match result {
            Ok(Ok(())) => ExitCode::SUCCESS,
            Ok(Err(e)) => {
                eprintln!("\nUnexpected error: {:#}", e);
                ExitCode::FAILURE
            }
            Err(e) => {
                eprintln!("\nUnexpected error: {}", e);
                ExitCode::FAILURE
            }
        },
        signal = tokio::signal::ctrl_c() => {
            if let Err(e) = signal {
                eprintln!("Failed to listen for Ctrl-C: {}", e);
                std::process::exit(1);
            }
            eprintln!("\n\nInterrupted by user");
            // The blocking worker cannot be cancelled; leave without waiting for it
            std::process::exit(EXIT_INTERRUPTED);
        }
    }
}
