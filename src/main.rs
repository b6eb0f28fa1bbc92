//! funcfinder command line
//!
//! Search questions, show a question with its declared answers, or ask the
//! whole catalog to answer it.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use funcfinder::search::search_questions;
use funcfinder::{catalog, Config, Session};

// ──────────────────────────────────────────────────────────────────────────────
// COMMAND LINE
// ──────────────────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "funcfinder", about = "Find functions that pass a behavioral test", version)]
struct Cli {
    /// Read FUNCFINDER_* settings from this file instead of ./.env
    #[arg(long = "env-file", global = true)]
    env_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Questions whose name and documentation contain every term
    Find {
        #[arg(required = true)]
        terms: Vec<String>,
    },
    /// A question, its declared answers and how they fare
    Show {
        question: String,
        /// Skip benchmarking
        #[arg(short = 't', long)]
        notime: bool,
        /// Print a JSON summary instead of the text report
        #[arg(long)]
        json: bool,
    },
    /// Search the whole catalog for answers to a question
    Ask {
        question: String,
        /// Skip benchmarking
        #[arg(short = 't', long)]
        notime: bool,
    },
    /// Every question name
    List,
}

// ──────────────────────────────────────────────────────────────────────────────
// MAIN ENTRY POINT
// ──────────────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.env_file.is_none() {
        dotenv::dotenv().ok();
    }

    // Logs go to stderr; stdout carries the report
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let mut config = match &cli.env_file {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env(),
    };

    let catalog = catalog::load().context("Failed to load the bundled catalog")?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Find { terms } => {
            let found = search_questions(&catalog, terms.as_slice());
            writeln!(out)?;
            for spec in &found {
                writeln!(out, "{}:\n", spec.name())?;
                writeln!(out, "{}", spec.doc())?;
                writeln!(out, "\n-----------------------\n")?;
            }
            if found.is_empty() {
                writeln!(out, "No questions found")?;
            }
        }
        Command::Show { question, notime, json } => {
            config.time_answers &= !notime;
            if json {
                let mut session = Session::new(&catalog, config, io::sink());
                session.show_question(&question)?;
                serde_json::to_writer_pretty(&mut out, &session.summary())?;
                writeln!(out)?;
            } else {
                Session::new(&catalog, config, &mut out).show_question(&question)?;
            }
        }
        Command::Ask { question, notime } => {
            config.time_answers &= !notime;
            Session::new(&catalog, config, &mut out).ask(&question)?;
        }
        Command::List => {
            for spec in catalog.questions() {
                writeln!(out, "{}", spec.name())?;
            }
        }
    }

    info!("Done");
    Ok(())
}
