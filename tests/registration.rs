mod common;

use chatrpg::game::rules::{Rank, Skill};
use chatrpg::game::{GameState, ScriptedRng};
use common::send;

#[test]
fn register_alice_human_warrior_fire() {
    let mut state = GameState::new();
    let mut rng = ScriptedRng::constant(0.5);
    let reply = send(&mut state, &mut rng, "+15550001", "register alice human warrior fire");
    assert_eq!(
        reply,
        "Welcome alice, the Human Warrior!\n\
         You have 10 points to distribute among your attributes.\n\
         Use 'attributes [str] [agi] [int] [end]' to set them.\n\
         Example: attributes 4 2 2 2"
    );

    let alice = &state.players["+15550001"];
    assert_eq!(alice.level, 1);
    assert_eq!(alice.experience, 0);
    assert_eq!(alice.gold, 100);
    assert_eq!(alice.karma, 0);
    assert_eq!(alice.rank, Rank::G);
    assert_eq!(alice.inventory, vec!["Iron Axe".to_string()]);
    assert_eq!(alice.skills, vec![Skill::Punch]);
    assert_eq!(alice.attributes.strength, 0);
    assert!(!alice.in_battle);
    assert!(!alice.is_deity);
}

#[test]
fn duplicate_username_rejected_case_insensitively() {
    let mut state = GameState::new();
    let mut rng = ScriptedRng::constant(0.5);
    send(&mut state, &mut rng, "p1", "register Alice human warrior fire");
    let second = send(&mut state, &mut rng, "p2", "REGISTER ALICE elf mage water");
    assert_eq!(second, "Username already taken. Please choose another.");
    assert!(!state.players.contains_key("p2"));
    assert_eq!(state.players["p1"].username, "Alice");
}

#[test]
fn unregistered_players_only_get_register_and_help() {
    let mut state = GameState::new();
    let mut rng = ScriptedRng::constant(0.5);
    for line in ["status", "duel bob", "shop", "quest 1", "explore forest"] {
        assert_eq!(
            send(&mut state, &mut rng, "stranger", line),
            "You are not registered. Use 'register [username] [race] [class] [element]' to join the game."
        );
    }
    let help = send(&mut state, &mut rng, "stranger", "  HELP ");
    assert!(help.contains("RACES:\n- Human: Versatile and adaptable\n"));
    assert!(help.contains("- Anaon: Ethereal wraith with control over dark energies\n"));
    assert!(help.contains("- Fire: Destructive burning element (strong vs Plant, weak vs Water)\n"));
    assert!(help.contains("- Light: Radiant illumination element (strong vs Darkness)\n"));
    assert!(help.contains("- Sky: Open air high above the ground"));
    assert!(state.players.is_empty());
}

#[test]
fn invalid_enum_values_list_the_choices() {
    let mut state = GameState::new();
    let mut rng = ScriptedRng::constant(0.5);
    assert_eq!(
        send(&mut state, &mut rng, "p1", "register zed human pirate fire"),
        "Invalid class. Choose from: Warrior, Archer, Mage, Paladin, Rogue, Druid, Necromancer, \
         Bard, Berserker, Alchemist, Guardian, Scout, Chronomancer, Artisan"
    );
    assert_eq!(
        send(&mut state, &mut rng, "p1", "register zed human mage ice"),
        "Invalid element. Choose from: Fire, Water, Plant, Earth, Wind, Darkness, Light"
    );
    assert!(send(&mut state, &mut rng, "p1", "register zed!! human mage fire")
        .starts_with("Username contains invalid characters"));
    assert!(state.players.is_empty());
}

#[test]
fn each_class_gets_its_first_kit_item() {
    let mut state = GameState::new();
    let mut rng = ScriptedRng::constant(0.5);
    send(&mut state, &mut rng, "p1", "register archy elf archer wind");
    send(&mut state, &mut rng, "p2", "register necro anaon necromancer darkness");
    assert_eq!(state.players["p1"].inventory, vec!["Wooden Bow".to_string()]);
    assert_eq!(state.players["p2"].inventory, vec!["Rat Skull".to_string()]);
}
