//! junit-journal - Command-line tool for JUnit journal reports

use anyhow::Context;
use clap::{Parser, Subcommand};
use junit_journal::commands::{Command, MergeCommand};
use junit_journal::ui::{CliUI, UI};
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "junit-journal")]
#[command(about = "JUnit journal report tool", long_about = None)]
struct Cli {
    /// Report file to operate on
    #[arg(short = 'f', long, global = true, env = "JUNIT_JOURNAL_LOGFILE")]
    logfile: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Move the test suites of another report into the log file
    Merge {
        /// Report whose test suites are moved
        report: PathBuf,
    },
}

fn run(cli: Cli, ui: &mut dyn UI) -> anyhow::Result<i32> {
    match cli.command {
        Commands::Merge { report } => {
            let logfile = cli
                .logfile
                .context("no log file given (use --logfile or JUNIT_JOURNAL_LOGFILE)")?;
            let cmd = MergeCommand::new(logfile.clone(), report.clone());
            cmd.execute(ui).with_context(|| {
                format!(
                    "failed to merge {} into {}",
                    report.display(),
                    logfile.display()
                )
            })
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut ui = CliUI::new();

    match run(cli, &mut ui) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            let _ = writeln!(std::io::stderr(), "Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
