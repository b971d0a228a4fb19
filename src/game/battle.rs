//! Duel lifecycle: challenge, alternating attacks, resolution.
//!
//! A duel is created by `duel <username>`, advanced by `attack [skill]` and
//! removed once [`DUEL_ROUNDS`] attacks have been recorded. The player whose
//! attack closes the final round is credited with the win.

use log::{debug, info, warn};

use crate::game::combat::calculate_damage;
use crate::game::progression::grant_experience;
use crate::game::rng::GameRng;
use crate::game::rules::{Skill, Zone};
use crate::game::types::{Battle, GameState};
use crate::logutil::mask_id;
use crate::metrics;

/// Attacks recorded before a duel resolves.
pub const DUEL_ROUNDS: u32 = 5;
pub const DUEL_WIN_EXPERIENCE: u64 = 50;
pub const DUEL_WIN_GOLD: u32 = 10;

/// Handle `duel <username>`.
pub fn start_duel(
    state: &mut GameState,
    player_id: &str,
    target_name: Option<&str>,
    rng: &mut dyn GameRng,
) -> String {
    let Some(target_name) = target_name else {
        return "Please specify a player to duel. Example: duel [player]".to_string();
    };
    let Some(target_id) = state.find_by_username(target_name).map(str::to_string) else {
        return format!("Player '{}' not found.", target_name);
    };
    if target_id == player_id {
        return "You can't duel yourself.".to_string();
    }

    let (challenger_name, challenger_busy) = match state.players.get(player_id) {
        Some(p) => (p.username.clone(), p.in_battle),
        None => return "You are not registered.".to_string(),
    };
    let (target_username, target_busy) = match state.players.get(&target_id) {
        Some(p) => (p.username.clone(), p.in_battle),
        None => return format!("Player '{}' not found.", target_name),
    };
    if challenger_busy || target_busy {
        return "Either you or your target is already in a battle.".to_string();
    }

    let zone = Zone::ALL[rng.index(Zone::ALL.len())];
    let key = state.unused_battle_key(player_id, &target_id);
    state.active_battles.insert(
        key.clone(),
        Battle {
            players: [player_id.to_string(), target_id.clone()],
            current_turn: player_id.to_string(),
            rounds: 0,
            logs: vec![format!(
                "{} challenged {} to a duel!",
                challenger_name, target_username
            )],
            zone,
        },
    );
    for id in [player_id, target_id.as_str()] {
        if let Some(p) = state.players.get_mut(id) {
            p.in_battle = true;
        }
    }
    metrics::inc_duels_started();
    info!(
        "duel started key={} zone={} challenger={} target={}",
        mask_id(&key),
        zone.name(),
        challenger_name,
        target_username
    );

    format!(
        "You challenged {} to a duel in the {}!\nUse 'attack [skill]' to make your move.",
        target_username,
        zone.name()
    )
}

/// Handle `attack [skill name]`.
pub fn attack(
    state: &mut GameState,
    player_id: &str,
    skill_name: Option<&str>,
    rng: &mut dyn GameRng,
) -> String {
    let Some(player) = state.players.get(player_id) else {
        return "You are not registered.".to_string();
    };
    if !player.in_battle {
        return "You're not in a battle.".to_string();
    }

    let Some(key) = state.battle_key_for(player_id) else {
        warn!(
            "player {} flagged in battle without a battle record; clearing flag",
            mask_id(player_id)
        );
        if let Some(p) = state.players.get_mut(player_id) {
            p.in_battle = false;
        }
        return "You're not in an active battle. Your status has been reset.".to_string();
    };

    let (current_turn, zone, opponent_id) = {
        let battle = &state.active_battles[&key];
        (
            battle.current_turn.clone(),
            battle.zone,
            battle.opponent_of(player_id).unwrap_or_default().to_string(),
        )
    };
    if current_turn != player_id {
        return "It's not your turn to attack.".to_string();
    }

    let (Some(attacker), Some(defender)) = (
        state.players.get(player_id).cloned(),
        state.players.get(&opponent_id).cloned(),
    ) else {
        warn!(
            "battle {} references a missing player; dissolving it",
            mask_id(&key)
        );
        state.active_battles.remove(&key);
        if let Some(p) = state.players.get_mut(player_id) {
            p.in_battle = false;
        }
        return "Your opponent is no longer around. The duel has been cancelled.".to_string();
    };

    let skill = skill_name
        .and_then(|name| attacker.learned_skill(name))
        .unwrap_or(Skill::BASIC_MELEE);
    let damage = calculate_damage(&attacker, &defender, skill, zone, rng);
    debug!(
        "attack battle={} attacker={} skill={} damage={}",
        mask_id(&key),
        attacker.username,
        skill.name(),
        damage
    );

    let rounds = {
        let Some(battle) = state.active_battles.get_mut(&key) else {
            return "You're not in an active battle.".to_string();
        };
        battle.logs.push(format!(
            "{} used {} and dealt {} damage!",
            attacker.username,
            skill.name(),
            damage
        ));
        battle.current_turn = opponent_id.clone();
        battle.rounds += 1;
        battle.rounds
    };

    if rounds < DUEL_ROUNDS {
        return format!(
            "You used {} and dealt {} damage! Waiting for {} to make their move.",
            skill.name(),
            damage,
            defender.username
        );
    }

    resolve_duel(state, &key, player_id, &opponent_id)
}

/// Close the duel in favour of `winner_id`, pay out, and drop the record.
fn resolve_duel(state: &mut GameState, key: &str, winner_id: &str, loser_id: &str) -> String {
    let Some(mut battle) = state.active_battles.remove(key) else {
        return "The duel has already ended.".to_string();
    };
    if let Some(loser) = state.players.get_mut(loser_id) {
        loser.in_battle = false;
    }
    let Some(winner) = state.players.get_mut(winner_id) else {
        return "The duel has ended.".to_string();
    };
    winner.in_battle = false;
    battle
        .logs
        .push(format!("The duel has ended! {} wins!", winner.username));

    winner.gold = winner.gold.saturating_add(DUEL_WIN_GOLD);
    let leveled = grant_experience(winner, DUEL_WIN_EXPERIENCE);
    metrics::inc_duels_resolved();
    if leveled {
        metrics::inc_level_ups();
    }
    info!(
        "duel resolved key={} winner={} rounds={}",
        mask_id(key),
        winner.username,
        battle.rounds
    );

    let mut out = battle.logs.join("\n");
    out.push_str(&format!(
        "\n\nYou won the duel and gained {} XP and {} gold!",
        DUEL_WIN_EXPERIENCE, DUEL_WIN_GOLD
    ));
    if leveled {
        out.push_str(&format!(" You reached level {}!", winner.level));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::rng::ScriptedRng;
    use crate::game::rules::{Class, Element, Race};
    use crate::game::types::Player;

    fn two_players() -> GameState {
        let mut state = GameState::new();
        state.players.insert(
            "a".into(),
            Player::new("Alice", Race::Human, Class::Warrior, Element::Fire),
        );
        state.players.insert(
            "b".into(),
            Player::new("Bob", Race::Orc, Class::Mage, Element::Water),
        );
        state
    }

    #[test]
    fn duel_sets_flags_and_turn() {
        let mut state = two_players();
        let mut rng = ScriptedRng::constant(0.0);
        let out = start_duel(&mut state, "a", Some("BOB"), &mut rng);
        assert!(out.contains("You challenged Bob to a duel in the Forest"));
        let battle = &state.active_battles["a_b"];
        assert_eq!(battle.current_turn, "a");
        assert_eq!(battle.rounds, 0);
        assert_eq!(battle.logs.len(), 1);
        assert!(state.players["a"].in_battle);
        assert!(state.players["b"].in_battle);
    }

    #[test]
    fn underscore_ids_do_not_share_a_battle() {
        let mut state = GameState::new();
        for (id, name) in [("a_b", "Ann"), ("c", "Cy"), ("a", "Al"), ("b_c", "Bea")] {
            state.players.insert(
                id.into(),
                Player::new(name, Race::Human, Class::Warrior, Element::Fire),
            );
        }
        let mut rng = ScriptedRng::constant(0.0);
        start_duel(&mut state, "a_b", Some("cy"), &mut rng);
        start_duel(&mut state, "a", Some("bea"), &mut rng);

        assert_eq!(state.active_battles.len(), 2);
        assert!(state.active_battles["a_b_c"].involves("a_b"));
        assert!(state.active_battles["a_b_c#2"].involves("a"));

        let out = attack(&mut state, "a", None, &mut rng);
        assert!(out.contains("Waiting for Bea"), "{out}");
        assert_eq!(state.active_battles["a_b_c#2"].rounds, 1);
        assert_eq!(state.active_battles["a_b_c"].rounds, 0);
    }

    #[test]
    fn duel_rejections() {
        let mut state = two_players();
        let mut rng = ScriptedRng::constant(0.0);
        assert_eq!(
            start_duel(&mut state, "a", None, &mut rng),
            "Please specify a player to duel. Example: duel [player]"
        );
        assert_eq!(
            start_duel(&mut state, "a", Some("carol"), &mut rng),
            "Player 'carol' not found."
        );
        assert_eq!(
            start_duel(&mut state, "a", Some("alice"), &mut rng),
            "You can't duel yourself."
        );
        state.players.get_mut("b").unwrap().in_battle = true;
        assert_eq!(
            start_duel(&mut state, "a", Some("bob"), &mut rng),
            "Either you or your target is already in a battle."
        );
        assert!(state.active_battles.is_empty());
    }

    #[test]
    fn turn_order_is_enforced() {
        let mut state = two_players();
        let mut rng = ScriptedRng::constant(0.5);
        start_duel(&mut state, "a", Some("bob"), &mut rng);
        assert_eq!(
            attack(&mut state, "b", None, &mut rng),
            "It's not your turn to attack."
        );
        let out = attack(&mut state, "a", None, &mut rng);
        assert!(out.starts_with("You used Punch"));
        assert_eq!(state.active_battles["a_b"].current_turn, "b");
    }

    #[test]
    fn stale_battle_flag_self_heals() {
        let mut state = two_players();
        state.players.get_mut("a").unwrap().in_battle = true;
        let mut rng = ScriptedRng::constant(0.5);
        let out = attack(&mut state, "a", None, &mut rng);
        assert_eq!(out, "You're not in an active battle. Your status has been reset.");
        assert!(!state.players["a"].in_battle);
    }

    #[test]
    fn unknown_skill_falls_back_to_punch() {
        let mut state = two_players();
        let mut rng = ScriptedRng::constant(0.5);
        start_duel(&mut state, "a", Some("bob"), &mut rng);
        attack(&mut state, "a", Some("fireball"), &mut rng);
        let log = state.active_battles["a_b"].logs.last().unwrap().clone();
        assert!(log.starts_with("Alice used Punch"), "{}", log);
    }
}
