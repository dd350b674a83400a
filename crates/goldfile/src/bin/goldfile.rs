//! CLI entrypoint for fixture tooling.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Fixture tooling for goldfile-based test suites.
#[derive(Debug, Parser)]
#[command(name = "goldfile")]
#[command(about = "Inspect fixture suites and validate fixture files")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the test cases a suite directory defines.
    List {
        /// Suite root directory (one subdirectory per case).
        #[arg(long)]
        dir: PathBuf,
        /// Optional shared fixture directory.
        #[arg(long)]
        shared: Option<PathBuf>,
        /// Emit JSON instead of plain text.
        #[arg(long)]
        json: bool,
    },
    /// Decode every fixture file under a tree that has a registered codec.
    Validate {
        /// Fixture tree root.
        #[arg(long)]
        dir: PathBuf,
        /// Emit the report as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::List { dir, shared, json } => {
            let mut suite = goldfile::TestSuite::new(dir);
            if let Some(shared) = shared {
                suite = suite.with_shared_dir(shared);
            }
            let cases = suite.cases()?;

            if json {
                println!("{}", serde_json::to_string_pretty(&cases)?);
            } else {
                for case in &cases {
                    let mut flags = Vec::new();
                    if case.skip {
                        flags.push("skip");
                    }
                    if case.only {
                        flags.push("only");
                    }
                    let flags = if flags.is_empty() {
                        String::new()
                    } else {
                        format!(" [{}]", flags.join(","))
                    };
                    println!("{}{} ({})", case.name, flags, case.dir.display());
                }
                eprintln!("{} case(s)", cases.len());
            }
        }
        Command::Validate { dir, json } => {
            let report = goldfile::validate_tree(&dir)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for failure in &report.failures {
                    eprintln!("FAIL {}: {}", failure.path.display(), failure.message);
                }
                eprintln!(
                    "checked={} skipped={} failed={}",
                    report.checked,
                    report.skipped,
                    report.failures.len()
                );
            }

            if !report.ok() {
                return Err(format!(
                    "{} fixture file(s) failed validation",
                    report.failures.len()
                )
                .into());
            }
        }
    }

    Ok(())
}
