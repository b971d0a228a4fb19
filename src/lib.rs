//! # chatrpg - Text-Command Role-Playing Game
//!
//! chatrpg runs a persistent multiplayer RPG driven entirely by short text
//! commands arriving over a chat channel. Players register characters,
//! explore zones, duel each other, shop and complete quests.
//!
//! ## Features
//!
//! - **Command Interpreter**: Prefix-matched keywords, registration gate, corrective replies for bad input.
//! - **Duels**: Turn-based five-round duels with damage from attributes, race/class bonuses, elements and zones.
//! - **Progression**: Experience, level-ups and a G..SS rank ladder.
//! - **Economy**: Shop purchases, skill books, instant quests and zone exploration.
//! - **Deterministic Testing**: All randomness flows through an injectable generator.
//! - **Single-Writer Host**: A Tokio actor serializes commands and saves atomically after each one.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatrpg::config::Config;
//! use chatrpg::host::GameServer;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml").await?;
//!     let handle = GameServer::open(config.game).await?.spawn();
//!
//!     let reply = handle
//!         .submit("whatsapp:+15550001", "register alice human warrior fire")
//!         .await?;
//!     println!("{}", reply);
//!
//!     handle.shutdown().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`game`] - Rule tables, combat, progression, duels, economy and the command dispatcher
//! - [`host`] - Single-writer actor owning the world and its persistence
//! - [`storage`] - JSON state file with atomic writes
//! - [`config`] - Configuration management and validation
//! - [`validation`] - Username validation
//! - [`logutil`] / [`metrics`] - Log sanitizing and in-process counters
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   Chat / CLI    │ ← inbound lines
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │   Host Actor    │ ← serializes commands, saves state
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │   Game Core     │ ← pure rules over GameState
//! └─────────────────┘
//! ```

pub mod config;
pub mod game;
pub mod host;
pub mod logutil;
pub mod metrics;
pub mod storage;
pub mod validation;
