mod terminal;

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use blackjack::{LineInput, Table};
use blackjack_cli::{parse_config_from_file, Config};
use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::terminal::Terminal;

const DEFAULT_CONFIG_FILE: &str = ".blackjack.yml";

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct CommandLineArgs {
    /// The path of the config file. Defaults to ~/.blackjack.yml if it exists
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of rounds to play
    #[arg(short, long)]
    rounds: Option<u32>,

    /// Number of decks in the shoe
    #[arg(short, long)]
    decks: Option<u8>,

    /// Seed the shuffle for a reproducible game
    #[arg(short, long)]
    seed: Option<u64>,
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<Config> {
    if let Some(path) = path {
        return parse_config_from_file(&path)
            .with_context(|| format!("failed to load {}", path.display()));
    }

    match home::home_dir().map(|dir| dir.join(DEFAULT_CONFIG_FILE)) {
        Some(path) if path.is_file() => {
            info!("using config file {}", path.display());
            parse_config_from_file(&path)
                .with_context(|| format!("failed to load {}", path.display()))
        }
        _ => {
            info!("no config file found, using defaults");
            Ok(Config::default())
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = CommandLineArgs::parse();
    let mut config = load_config(args.config)?;
    if let Some(rounds) = args.rounds {
        config.session.rounds = rounds;
    }
    if let Some(decks) = args.decks {
        config.rule.number_of_decks = decks;
    }
    if args.seed.is_some() {
        config.session.seed = args.seed;
    }
    let config = config;
    info!("{:?}", config);

    let rule: blackjack::Rule = config.rule.try_into()?;
    let rng = match config.session.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut table = Table::new(rule, rng);
    let mut input = LineInput::new(io::stdin().lock());
    let mut terminal = Terminal::new(config.session.rounds);
    let stats = table.play_rounds(config.session.rounds, &mut input, &mut terminal)?;

    println!();
    println!("{}", stats);
    Ok(())
}
