//! Mauka Search Index - Main entrypoint.
//!
//! Initializes logging, loads configuration, and dispatches to the
//! `index`/`search`/`validate` subcommands.

mod config;
mod data_structures;
mod error;
mod indexer;
mod query;
mod session;
mod text_source;
mod tokenize;

#[cfg(test)]
mod tests;

use clap::{Parser, Subcommand};
use error::{MaukaError, MaukaResult};
use query::QueryMode;
use session::Session;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use text_source::{FilesystemTextSource, TextSource};
use tracing::info;

/// Command line arguments for the Mauka search index.
#[derive(Parser, Debug)]
#[clap(name = "Mauka Search Index", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Command to execute
    #[clap(subcommand)]
    command: Option<Command>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Build or update the index from the configured documents directory
    Index,

    /// Interactively query the index (ANY/ALL modes)
    Search,

    /// Load the persisted index pair and sanity-check it
    Validate,
}

/// Initialize the logging system.
fn init_logging() -> MaukaResult<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_line_number(true)
        .with_file(true)
        .with_thread_names(true)
        .pretty()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| MaukaError::Custom(format!("Failed to set global tracing subscriber: {e}")))
}

/// Main entry point for the application.
fn main() -> MaukaResult<()> {
    init_logging()?;

    let args = <Args as clap::Parser>::parse();

    let env_prefix = "MAUKA";
    let config_loader = config::ConfigLoader::new(args.config.as_deref(), env_prefix);

    let index_config = match config_loader.load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            process::exit(1);
        }
    };

    match args.command.unwrap_or(Command::Search) {
        Command::Index => run_index(index_config),
        Command::Search => run_search(index_config),
        Command::Validate => run_validate(index_config),
    }
}

fn run_index(config: config::IndexConfig) -> MaukaResult<()> {
    info!("Building index from {:?}", config.paths.documents_dir);
    let documents_dir = config.paths.documents_dir.clone();
    let text_source = FilesystemTextSource::new(documents_dir.clone());
    let mut session = Session::bootstrap(config).map_err(MaukaError::Core)?;

    let entries = std::fs::read_dir(&documents_dir).map_err(MaukaError::Io)?;
    for entry in entries {
        let entry = entry.map_err(MaukaError::Io)?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let doc_id = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        let text = text_source.fetch(&doc_id).map_err(MaukaError::Tokenize)?;
        let text_len = text.len();
        if let Err(e) = session.index_text(&doc_id, &text) {
            if matches!(e, error::core::CoreError::DocumentTooLarge(_, _)) {
                tracing::warn!("Skipping {}: {}", doc_id, e);
                continue;
            }
            return Err(MaukaError::Core(e));
        }
        info!("Indexed {}: {} bytes", doc_id, text_len);
    }

    info!("Index build complete");
    Ok(())
}

fn run_validate(config: config::IndexConfig) -> MaukaResult<()> {
    info!("Validating persisted index pair");
    match Session::bootstrap(config) {
        Ok(_) => {
            info!("Index validated successfully");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Index validation error: {}", e);
            process::exit(1);
        }
    }
}

fn run_search(config: config::IndexConfig) -> MaukaResult<()> {
    let documents_dir = config.paths.documents_dir.clone();
    let mut session = Session::bootstrap(config).map_err(MaukaError::Core)?;
    let text_source = FilesystemTextSource::new(documents_dir);

    let stdin = io::stdin();

    print!("Please input search word(s) (separate by whitespace) >>> ");
    io::stdout().flush().ok();
    let mut input = String::new();
    stdin.read_line(&mut input).map_err(MaukaError::Io)?;
    let words: Vec<String> = session.tokenize(&input);

    let mode = loop {
        print!("Search mode -- 1: Including ANY word; 2: Including ALL word >>> ");
        io::stdout().flush().ok();
        let mut choice = String::new();
        stdin.read_line(&mut choice).map_err(MaukaError::Io)?;
        match choice.trim() {
            "1" => break QueryMode::Any,
            "2" => break QueryMode::All,
            _ => continue,
        }
    };

    let results = session
        .search(&text_source, &words, mode)
        .map_err(MaukaError::Core)?;

    println!("Results:");
    if results.is_empty() {
        let mode_name = if mode == QueryMode::Any {
            "Include ANY"
        } else {
            "Include ALL"
        };
        println!(
            "\t:( Your search - {words:?} ({mode_name}) - did not match any documents."
        );
    } else {
        for (i, doc) in results.iter().enumerate() {
            println!("\t({i}) {doc}");
        }
    }

    Ok(())
}
