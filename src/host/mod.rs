//! Single-writer game actor.
//!
//! One tokio task owns the [`GameState`], the random generator and the
//! [`StateStore`]. Every inbound line travels over an unbounded channel as a
//! [`GameCommand::Submit`], is processed to completion, persisted, and only
//! then answered, so commands never interleave and the file on disk never
//! lags behind a reply that has been sent.
//!
//! A panic inside the game core is caught here and turned into
//! [`APOLOGY`]; the channel never sees a fault.

use log::{debug, error, info, warn};
use std::panic::{catch_unwind, AssertUnwindSafe};
use tokio::sync::{mpsc, oneshot};

use crate::config::GameSettings;
use crate::game::errors::GameError;
use crate::game::process_command;
use crate::game::rng::{GameRng, StdGameRng};
use crate::game::types::GameState;
use crate::logutil::mask_id;
use crate::metrics;
use crate::storage::StateStore;

pub const APOLOGY: &str = "Sorry, an error occurred. Please try again later.";

/// Strip the transport prefix (`whatsapp:+1555...`) and surrounding whitespace.
pub fn normalize_sender(raw: &str, prefix: &str) -> String {
    let trimmed = raw.trim();
    let stripped = if prefix.is_empty() {
        trimmed
    } else {
        trimmed.strip_prefix(prefix).unwrap_or(trimmed)
    };
    stripped.trim().to_string()
}

/// Split a console line of the form `<sender>: <command>`. The transport
/// prefix is removed first so `whatsapp:+1555: status` addresses `+1555`.
pub fn split_addressed_line<'a>(line: &'a str, prefix: &str) -> Option<(&'a str, &'a str)> {
    let trimmed = line.trim();
    let rest = if prefix.is_empty() {
        trimmed
    } else {
        trimmed.strip_prefix(prefix).unwrap_or(trimmed)
    };
    let (id, text) = rest.split_once(':')?;
    let id = id.trim();
    if id.is_empty() {
        return None;
    }
    Some((id, text.trim()))
}

pub enum GameCommand {
    Submit {
        player_id: String,
        text: String,
        reply: oneshot::Sender<String>,
    },
    Snapshot(oneshot::Sender<GameState>),
    Shutdown(oneshot::Sender<()>),
}

/// Owner of the game world. Use [`GameServer::spawn`] to run it as an actor,
/// or [`GameServer::handle_line`] directly from synchronous code.
pub struct GameServer {
    state: GameState,
    rng: Box<dyn GameRng + Send + Sync>,
    store: StateStore,
    settings: GameSettings,
}

impl GameServer {
    /// Load the state file named in `settings` and seed the generator.
    pub async fn open(settings: GameSettings) -> Result<Self, GameError> {
        let store = StateStore::new(&settings.state_file);
        let state = store.load().await?;
        let rng: Box<dyn GameRng + Send + Sync> = match settings.rng_seed {
            Some(seed) => {
                info!("Using seeded random generator (seed {})", seed);
                Box::new(StdGameRng::from_seed(seed))
            }
            None => Box::new(StdGameRng::from_entropy()),
        };
        Ok(Self::with_parts(state, rng, store, settings))
    }

    pub fn with_parts(
        state: GameState,
        rng: Box<dyn GameRng + Send + Sync>,
        store: StateStore,
        settings: GameSettings,
    ) -> Self {
        Self {
            state,
            rng,
            store,
            settings,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Normalize the sender and run one command through the core.
    pub fn handle_line(&mut self, raw_sender: &str, text: &str) -> String {
        let player_id = normalize_sender(raw_sender, &self.settings.sender_prefix);
        let state = &mut self.state;
        let rng = self.rng.as_mut();
        match catch_unwind(AssertUnwindSafe(|| {
            process_command(text, &player_id, state, rng)
        })) {
            Ok(reply) => reply,
            Err(panic) => {
                let what = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                error!(
                    "Internal failure processing command from {}: {}",
                    mask_id(&player_id),
                    what
                );
                metrics::inc_internal_failures();
                APOLOGY.to_string()
            }
        }
    }

    /// Persist the current state; failures are logged, never surfaced.
    pub async fn persist(&self) {
        if let Err(e) = self.store.save(&self.state).await {
            warn!(
                "Failed to save game state to {}: {}",
                self.store.path().display(),
                e
            );
        }
    }

    /// Move the server onto its own task and return a handle to it.
    pub fn spawn(mut self) -> GameHandle {
        let (tx, mut rx) = mpsc::unbounded_channel::<GameCommand>();
        let handle = GameHandle { tx };

        tokio::spawn(async move {
            while let Some(cmd) = rx.recv().await {
                match cmd {
                    GameCommand::Submit {
                        player_id,
                        text,
                        reply,
                    } => {
                        let response = self.handle_line(&player_id, &text);
                        if self.settings.autosave {
                            self.persist().await;
                        }
                        if reply.send(response).is_err() {
                            debug!("Reply receiver for {} dropped", mask_id(&player_id));
                        }
                    }
                    GameCommand::Snapshot(reply) => {
                        let _ = reply.send(self.state.clone());
                    }
                    GameCommand::Shutdown(reply) => {
                        self.persist().await;
                        let m = metrics::snapshot();
                        info!(
                            "Game server stopping: commands={} unknown={} unregistered={} duels_started={} duels_resolved={} duels_open={} level_ups={} failures={}",
                            m.commands_processed,
                            m.unknown_commands,
                            m.unregistered_rejections,
                            m.duels_started,
                            m.duels_resolved,
                            m.duels_open(),
                            m.level_ups,
                            m.internal_failures
                        );
                        let _ = reply.send(());
                        break;
                    }
                }
            }
            debug!("Game server task exited");
        });

        handle
    }
}

/// Cloneable handle to a running [`GameServer`].
#[derive(Clone)]
pub struct GameHandle {
    tx: mpsc::UnboundedSender<GameCommand>,
}

impl GameHandle {
    /// Submit a line from `player_id` and wait for the reply.
    pub async fn submit(&self, player_id: &str, text: &str) -> Result<String, GameError> {
        let (tx, rx) = oneshot::channel();
        self.tx
            .send(GameCommand::Submit {
                player_id: player_id.to_string(),
                text: text.to_string(),
                reply: tx,
            })
            .map_err(|_| GameError::Internal("game server is not running".to_string()))?;
        rx.await
            .map_err(|_| GameError::Internal("game server dropped the reply".to_string()))
    }

    /// Copy of the current world, or `None` once the server has stopped.
    pub async fn snapshot(&self) -> Option<GameState> {
        let (tx, rx) = oneshot::channel();
        if self.tx.send(GameCommand::Snapshot(tx)).is_ok() {
            rx.await.ok()
        } else {
            None
        }
    }

    /// Save and stop the server.
    pub async fn shutdown(&self) {
        let (tx, rx) = oneshot::channel();
        let _ = self.tx.send(GameCommand::Shutdown(tx));
        let _ = rx.await;
    }
}
