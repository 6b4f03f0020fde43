use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::info;

use nexus_console::config::{ConfigOverrides, ConsoleConfig, parse_delimiter};
use nexus_console::data::{QueryResult, tokenize_with_delimiter};
use nexus_console::integration::DatastoreListing;
use nexus_console::integration::completion::PrefixCompletionMatcher;
use nexus_console::logging;

#[derive(Parser)]
#[command(
    name = "nexus-console",
    version,
    about = "Nexus console core: query-result decoding and integration editor completion",
    after_help = r#"Examples:
  nexus-console tokenize results.csv
  nexus-console tokenize --delimiter ';' < export.txt
  nexus-console query-result results.csv
  nexus-console complete --line 'console.lo'
  nexus-console complete --line 'datastore.query("logs", re' --listing datastores.json
"#
)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Log level filter for stderr (overrides RUST_LOG).
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Disable ANSI colors in log output.
    #[arg(long, global = true)]
    no_color: bool,

    /// Also write a debug session log to the user cache directory.
    #[arg(long, global = true)]
    log_file: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Decode delimited text into a JSON array of rows.
    Tokenize {
        /// Input file (stdin when omitted).
        file: Option<PathBuf>,
        /// Field delimiter (single character, or `tab`).
        #[arg(long, value_parser = parse_delimiter_arg)]
        delimiter: Option<char>,
    },
    /// Decode a datastore query response into header and rows.
    QueryResult {
        /// Input file (stdin when omitted).
        file: Option<PathBuf>,
    },
    /// Print completion candidates for an editor line.
    Complete {
        /// Current line of the editor.
        #[arg(long)]
        line: String,
        /// Cursor column in characters (end of line when omitted).
        #[arg(long)]
        column: Option<usize>,
        /// JSON symbol catalog to use instead of the built-in one.
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Keep catalog order instead of ranking spelled-out entries first.
        #[arg(long)]
        no_rank: bool,
        /// Maximum number of candidates to print.
        #[arg(long)]
        max_results: Option<usize>,
        /// Datastore listing (JSON) used to resolve datastore hints.
        #[arg(long)]
        listing: Option<PathBuf>,
    },
}

fn parse_delimiter_arg(s: &str) -> Result<char, String> {
    parse_delimiter(s).ok_or_else(|| format!("expected a single character, got '{}'", s))
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _guard = logging::init_logger(args.no_color, args.log_level.as_deref(), args.log_file)
        .context("failed to initialize logging")?;

    match args.command {
        Command::Tokenize { file, delimiter } => {
            let config = ConsoleConfig::from_env_or_default(&ConfigOverrides {
                delimiter,
                ..Default::default()
            });
            let text = read_input(file.as_deref())?;
            let table = tokenize_with_delimiter(&text, config.delimiter);
            info!(rows = table.len(), "Tokenized input");
            print_json(&table)
        }
        Command::QueryResult { file } => {
            let text = read_input(file.as_deref())?;
            let result = QueryResult::parse(&text);
            info!(rows = result.len(), columns = result.header.len(), "Decoded query result");
            print_json(&result)
        }
        Command::Complete {
            line,
            column,
            catalog,
            no_rank,
            max_results,
            listing,
        } => {
            let config = ConsoleConfig::from_env_or_default(&ConfigOverrides {
                catalog,
                rank: no_rank.then_some(false),
                max_results,
                ..Default::default()
            });
            let catalog = config.catalog.load()?;
            let matcher = PrefixCompletionMatcher::with_options(&catalog, config.match_options.clone());

            let column = column.unwrap_or_else(|| line.chars().count());
            let suggestions = matcher.suggest(&line, column);

            let listings: Vec<DatastoreListing> = match &listing {
                Some(path) => {
                    let json = fs::read_to_string(path)
                        .with_context(|| format!("failed to read {}", path.display()))?;
                    serde_json::from_str(&json)
                        .with_context(|| format!("invalid datastore listing {}", path.display()))?
                }
                None => Vec::new(),
            };
            let resolved = match (&suggestions.datastore, listing.is_some()) {
                (Some(hint), true) => Some(hint.resolve(&listings)),
                _ => None,
            };

            print_json(&json!({
                "suggestions": suggestions,
                "datastore": resolved,
            }))
        }
    }
}
