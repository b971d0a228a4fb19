//! Test utilities & fixtures shared by the integration tests.

use chatrpg::game::rng::GameRng;
use chatrpg::game::{process_command, GameState};

/// Run one line for `player_id` against `state`.
pub fn send(state: &mut GameState, rng: &mut dyn GameRng, player_id: &str, line: &str) -> String {
    process_command(line, player_id, state, rng)
}

/// World with two registered fighters: `p1` = alice (Human Warrior, Fire)
/// and `p2` = bob (Orc Mage, Water).
#[allow(dead_code)]
pub fn two_player_world(rng: &mut dyn GameRng) -> GameState {
    let mut state = GameState::new();
    let a = send(&mut state, rng, "p1", "register alice human warrior fire");
    assert!(a.starts_with("Welcome alice"), "registration failed: {a}");
    let b = send(&mut state, rng, "p2", "register bob orc mage water");
    assert!(b.starts_with("Welcome bob"), "registration failed: {b}");
    state
}
