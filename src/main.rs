//! econdex CLI - Command line interface for econ_index
//!
//! Loads a county data file into both indexes on every invocation and runs
//! one command against them. Output is JSON so it can be driven by other
//! tools.

use clap::{Parser, Subcommand};
use econ_index::model::PUBLIC_ATTRIBUTES;
use econ_index::{Engine, EngineConfig, Query};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "econdex")]
#[command(about = "Compare hash-table and trie lookups over county economic data")]
#[command(version)]
struct Cli {
    /// Path to the county data file (CSV)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Output format (json or text)
    #[arg(short, long, default_value = "json")]
    format: OutputFormat,

    /// Path to the config file (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// Show ingestion results and index sizes
    Stats,

    /// Look up one value in both indexes and time each
    Query {
        /// Two-letter state code
        #[arg(short, long)]
        state: String,
        /// County name (free text)
        #[arg(short, long)]
        county: String,
        /// Attribute name
        #[arg(short, long, value_parser = clap::builder::PossibleValuesParser::new(PUBLIC_ATTRIBUTES))]
        attribute: String,
        /// Four-digit year
        #[arg(short, long)]
        year: String,
    },

    /// Per-state need index, in trie order
    Need {
        /// Include per-attribute averages
        #[arg(long)]
        detail: bool,
    },

    /// Legend buckets over the need index
    Legend,

    /// Print the geographic hierarchy
    Tree {
        /// Only this state (full name)
        #[arg(short, long)]
        state: Option<String>,
    },

    /// Show the effective configuration
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = match &cli.config {
        Some(path) => Some(path.clone()),
        None => EngineConfig::default_path().ok(),
    };
    let config = match &config_path {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .target(env_logger::Target::Stderr)
        .init();

    match cli.command {
        Commands::Config => {
            output(
                &cli.format,
                &serde_json::json!({
                    "path": config_path.map(|p| p.display().to_string()),
                    "config": config
                }),
            );
        }

        Commands::Stats => {
            let engine = open_engine(cli.data.as_deref(), config)?;
            output(
                &cli.format,
                &serde_json::json!({
                    "report": engine.report(),
                    "stats": engine.stats()
                }),
            );
        }

        Commands::Query {
            state,
            county,
            attribute,
            year,
        } => {
            let engine = open_engine(cli.data.as_deref(), config)?;
            let query = Query::new(&state, &county, &attribute, &year);
            let cmp = engine.query(&query)?;
            output(
                &cli.format,
                &serde_json::json!({
                    "query": query,
                    "value": cmp.shown().unwrap_or(""),
                    "hash": {
                        "value": cmp.hash.sentinel(),
                        "elapsed_ms": cmp.hash.elapsed_ms()
                    },
                    "trie": {
                        "value": cmp.trie.sentinel(),
                        "elapsed_ms": cmp.trie.elapsed_ms()
                    }
                }),
            );
            if cmp.shown().is_none() {
                std::process::exit(1);
            }
        }

        Commands::Need { detail } => {
            let engine = open_engine(cli.data.as_deref(), config)?;
            let needs = engine.state_needs();
            let items: Vec<_> = needs
                .iter()
                .map(|n| {
                    if detail {
                        serde_json::json!(n)
                    } else {
                        serde_json::json!({ "state": n.state, "need": n.need })
                    }
                })
                .collect();
            output(
                &cli.format,
                &serde_json::json!({
                    "count": items.len(),
                    "states": items
                }),
            );
        }

        Commands::Legend => {
            let engine = open_engine(cli.data.as_deref(), config)?;
            let legend = engine.legend();
            let states: Vec<_> = engine
                .state_needs()
                .iter()
                .map(|n| {
                    serde_json::json!({
                        "state": n.state,
                        "need": n.need,
                        "bucket": legend.bucket_of(n.need)
                    })
                })
                .collect();
            output(
                &cli.format,
                &serde_json::json!({
                    "legend": legend,
                    "states": states
                }),
            );
        }

        Commands::Tree { state } => {
            let engine = open_engine(cli.data.as_deref(), config)?;
            let trie = engine.trie();
            let dump = match state {
                Some(name) => {
                    let id = trie
                        .find_path([name.as_str()])
                        .ok_or_else(|| anyhow::anyhow!("State not found: {}", name))?;
                    trie.dump_from(id)
                }
                None => trie.dump(),
            };
            match cli.format {
                OutputFormat::Text => print!("{}", dump),
                OutputFormat::Json => {
                    output(&cli.format, &serde_json::json!({ "tree": dump }));
                }
            }
        }
    }

    Ok(())
}

fn open_engine(data: Option<&Path>, config: EngineConfig) -> anyhow::Result<Engine> {
    let path = data.ok_or_else(|| anyhow::anyhow!("No data file given (use --data)"))?;
    Ok(Engine::open(path, config)?)
}

fn output(format: &OutputFormat, value: &serde_json::Value) {
    match format {
        OutputFormat::Json => {
            println!("{}", value);
        }
        OutputFormat::Text => {
            println!(
                "{}",
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            );
        }
    }
}
