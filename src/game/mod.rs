//! The game core: rule tables, state model, combat, progression, duels,
//! economy and the command dispatcher.
//!
//! Nothing in here performs I/O. The host hands a [`GameState`] and a
//! [`GameRng`] to [`process_command`] for every inbound line and persists
//! the state afterwards.

pub mod battle;
pub mod combat;
pub mod commands;
pub mod economy;
pub mod errors;
pub mod progression;
pub mod rng;
pub mod rules;
pub mod types;

pub use commands::{parse, process_command, Command};
pub use errors::GameError;
pub use rng::{GameRng, ScriptedRng, StdGameRng};
pub use types::{Battle, GameState, Player};
