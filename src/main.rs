use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use treebot::config::{EngineConfig, StrategyKind};
use treebot::search::EvalKind;
use treebot::strategy::{Clock, Minimax, SearchStrategy};
use treebot::uci::UciEngine;
use treebot::{build_strategy, Position};

#[derive(Parser, Debug)]
#[command(author, version, about = "Fixed-depth alpha-beta chess bot (UCI)", long_about = None)]
struct Args {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Search depth in plies
    #[arg(long)]
    depth: Option<u32>,

    /// Leaf evaluator
    #[arg(long, value_enum)]
    eval: Option<EvalKind>,

    /// Move selection strategy
    #[arg(long, value_enum)]
    strategy: Option<StrategyKind>,

    /// Seed for the random strategy
    #[arg(long)]
    seed: Option<u64>,

    /// Search this FEN once and exit instead of running the UCI loop
    #[arg(long)]
    fen: Option<String>,

    /// Moves (UCI) to play from the start or --fen position before searching
    #[arg(long, num_args = 1..)]
    moves: Vec<String>,
}

fn load_config(args: &Args) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::from_json_file(path)?,
        None => EngineConfig::default(),
    };
    if let Some(d) = args.depth { config.depth = d; }
    if let Some(e) = args.eval { config.eval = e; }
    if let Some(s) = args.strategy { config.strategy = s; }
    if let Some(s) = args.seed { config.seed = s; }
    config.validate()?;
    Ok(config)
}

fn search_once(config: &EngineConfig, pos: &Position) -> Result<()> {
    let clock = Clock::default();
    match config.strategy {
        StrategyKind::Minimax => {
            let mut engine = Minimax::from_config(config);
            let mv = engine.choose_move(pos, &clock, false, false)?;
            println!("bestmove {}", pos.move_to_uci(mv));
            if let Some(stats) = engine.last_stats() {
                println!(
                    "nodes {} leaves {} depth {} value {}",
                    stats.total_nodes,
                    stats.evaluated_leaves,
                    stats.reached_depth,
                    stats.root_value.map_or_else(|| "-".to_string(), |v| v.to_string())
                );
            }
        }
        StrategyKind::Random => {
            let mut engine = build_strategy(config);
            let mv = engine.choose_move(pos, &clock, false, false)?;
            println!("bestmove {}", pos.move_to_uci(mv));
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = load_config(&args)?;

    if args.fen.is_some() || !args.moves.is_empty() {
        let pos = match &args.fen {
            Some(fen) => Position::from_fen_and_moves(fen, &args.moves),
            None => Position::set_from_start_and_moves(&args.moves),
        }
        .context("setting up position")?;
        return search_once(&config, &pos);
    }

    let stdin = io::stdin();
    let mut engine = UciEngine::new(build_strategy(&config), io::stdout());
    engine.run_loop(stdin.lock())?;
    Ok(())
}
