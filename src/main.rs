use std::io::{Error, ErrorKind};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use log::info;
use tenxten_engine::{Engine, GameTree, KeyScheme, SearchConfig};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON game tree to search from its start position
    #[arg(long)]
    tree: PathBuf,
    #[arg(long, default_value_t = 3)]
    depth: u32,
    /// Key the transposition table on remaining depth as well
    #[arg(long)]
    depth_keyed: bool,
    /// Accepted for engine protocols; the search does not enforce it
    #[arg(long)]
    time_limit_ms: Option<u64>,
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<(), Error> {
    let args = Args::parse();
    let level: log::Level = args.log_level.parse()
        .map_err(|_| Error::new(ErrorKind::InvalidInput, format!("Invalid log level: {}", args.log_level)))?;
    simple_logger::init_with_level(level).map_err(|e| Error::new(ErrorKind::Other, e))?;

    let json = std::fs::read_to_string(&args.tree)?;
    let tree = Arc::new(GameTree::from_json(&json).map_err(|e| Error::new(ErrorKind::InvalidData, e))?);
    info!("Loaded {} positions from {}", tree.len(), args.tree.display());

    let config = SearchConfig {
        depth: args.depth,
        key_scheme: if args.depth_keyed { KeyScheme::PositionAndDepth } else { KeyScheme::Position },
    };
    let engine = Engine::new(config);
    let result = engine.choose_move(&tree.start(), args.time_limit_ms.map(Duration::from_millis))
        .map_err(|e| Error::new(ErrorKind::InvalidInput, e))?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
