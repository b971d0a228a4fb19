//! Binary entrypoint for the chatrpg CLI.
//!
//! Commands:
//! - `init` - write a starter `config.toml`
//! - `console [--player <id>]` - play from stdin; each line is a command
//! - `status` - print player, battle and deity counts from the state file
//! - `deity --player <id> --name <name>` - promote a registered player to deity
//!
//! See the library crate docs for module-level details: `chatrpg::`.
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

use chatrpg::config::Config;
use chatrpg::host::{normalize_sender, split_addressed_line, GameServer};
use chatrpg::storage::StateStore;

#[derive(Parser)]
#[command(name = "chatrpg")]
#[command(about = "A text-command role-playing game for chat channels")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init,
    /// Play from the terminal, one command per line
    Console {
        /// Sender id for every line; otherwise lines are `<id>: <command>`
        #[arg(short, long)]
        player: Option<String>,
    },
    /// Show world statistics from the state file
    Status,
    /// Promote a registered player to deity
    Deity {
        /// Sender id of the registered player
        #[arg(short, long)]
        player: String,
        /// Name of the deity
        #[arg(short, long)]
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Init = cli.command {
        Config::create_default(&cli.config).await?;
        println!("Wrote default configuration to {}", cli.config);
        return Ok(());
    }

    let loaded = Config::load(&cli.config).await;
    init_logging(loaded.as_ref().ok(), cli.verbose);
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            warn!("{}; using built-in defaults", e);
            Config::default()
        }
    };
    config.validate()?;

    match cli.command {
        Commands::Init => {}
        Commands::Console { player } => {
            run_console(config, player).await?;
        }
        Commands::Status => {
            let store = StateStore::new(&config.game.state_file);
            let state = store.load().await?;
            println!("State file: {}", store.path().display());
            println!("Players: {}", state.players.len());
            println!("Active battles: {}", state.active_battles.len());
            println!("Deities: {}", state.deities.len());
        }
        Commands::Deity { player, name } => {
            let store = StateStore::new(&config.game.state_file);
            let mut state = store.load().await?;
            let player_id = normalize_sender(&player, &config.game.sender_prefix);
            state
                .create_deity(&player_id, &name)
                .with_context(|| format!("Cannot promote {}", player_id))?;
            store.save(&state).await?;
            info!("Created deity {} for {}", name, chatrpg::logutil::mask_id(&player_id));
            println!("{} is now the deity {}", player_id, name);
        }
    }

    Ok(())
}

async fn run_console(config: Config, fixed_player: Option<String>) -> Result<()> {
    info!("Starting chatrpg v{}", env!("CARGO_PKG_VERSION"));
    let server = GameServer::open(config.game.clone()).await?;
    let handle = server.spawn();
    let interactive = atty::is(atty::Stream::Stdin);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        if interactive {
            print!("> ");
            let _ = std::io::stdout().flush();
        }
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (player_id, text) = match &fixed_player {
            Some(id) => (id.as_str(), line),
            None => match split_addressed_line(line, &config.game.sender_prefix) {
                Some(parts) => parts,
                None => {
                    println!("Expected '<player id>: <command>'");
                    continue;
                }
            },
        };

        let reply = handle.submit(player_id, text).await?;
        println!("{}\n", reply);
    }

    handle.shutdown().await;
    Ok(())
}

fn init_logging(config: Option<&Config>, verbosity: u8) {
    let mut builder = env_logger::Builder::new();
    // CLI verbosity overrides config
    let base_level = match verbosity {
        0 => config
            .map(|c| c.log_level_filter())
            .unwrap_or(log::LevelFilter::Info),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);

    let log_file = config
        .and_then(|c| c.logging.file.as_ref())
        .and_then(|file| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(file)
                .ok()
        });

    if let Some(f) = log_file {
        let write_mutex = std::sync::Arc::new(std::sync::Mutex::new(f));
        // Foreground sessions also see the lines on the console
        let is_tty = atty::is(atty::Stream::Stdout);

        builder.format(move |fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            let line = format!("{} [{}] {}", ts, record.level(), record.args());

            if let Ok(mut guard) = write_mutex.lock() {
                let _ = writeln!(guard, "{}", line);
            }

            if is_tty {
                writeln!(fmt, "{}", line)
            } else {
                Ok(())
            }
        });
    } else {
        builder.format(|fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            writeln!(fmt, "{} [{}] {}", ts, record.level(), record.args())
        });
    }
    let _ = builder.try_init();
}
