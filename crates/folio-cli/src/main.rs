//! Folio command line
//!
//! `folio replay <script.json> [--config folio.toml] [--json]` applies a script
//! of store operations and prints the resulting histories.

mod render;
mod script;

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, Command};
use folio_core::{HistoryStore, StoreConfig};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("folio")
        .version(folio_core::VERSION)
        .about("Branching page histories")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("replay")
                .about("Replay a JSON script of history operations")
                .arg(
                    Arg::new("script")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("JSON array of create/extend/branch/append/checkout steps"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .value_parser(value_parser!(PathBuf))
                        .help("TOML store configuration"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let matches = cli().get_matches();

    match matches.subcommand() {
        Some(("replay", args)) => {
            let script = args
                .get_one::<PathBuf>("script")
                .context("script path is required")?;
            let config = args.get_one::<PathBuf>("config").map(PathBuf::as_path);
            replay(script, config, args.get_flag("json"))
        }
        _ => Ok(()),
    }
}

fn load_config(path: Option<&Path>) -> Result<StoreConfig> {
    let Some(path) = path else {
        return Ok(StoreConfig::default());
    };
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    StoreConfig::from_toml_str(&source)
        .with_context(|| format!("invalid config {}", path.display()))
}

fn replay(script: &Path, config: Option<&Path>, json: bool) -> Result<()> {
    let config = load_config(config)?;
    let source = std::fs::read_to_string(script)
        .with_context(|| format!("failed to read script {}", script.display()))?;
    let steps = script::parse_script(&source)?;

    tracing::info!(
        script = %script.display(),
        steps = steps.len(),
        sibling_order = ?config.sibling_order,
        "Replaying script"
    );

    let store = HistoryStore::with_config(config)?;
    script::replay(&store, &steps)?;

    let histories = store.histories();
    if json {
        println!("{}", render::to_json(&histories)?);
    } else {
        for history in &histories {
            print!("{}", render::outline(history)?);
        }
    }
    Ok(())
}
