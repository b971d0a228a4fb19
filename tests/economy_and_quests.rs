mod common;

use chatrpg::game::rules::Skill;
use chatrpg::game::{GameState, ScriptedRng};
use common::send;

fn alice() -> (GameState, ScriptedRng) {
    let mut rng = ScriptedRng::constant(0.5);
    let mut state = GameState::new();
    send(&mut state, &mut rng, "p1", "register alice human warrior fire");
    (state, rng)
}

#[test]
fn buy_health_potion_with_forty_gold_fails() {
    let (mut state, mut rng) = alice();
    state.players.get_mut("p1").unwrap().gold = 40;
    let before = state.players["p1"].inventory.clone();

    let reply = send(&mut state, &mut rng, "p1", "buy health potion");
    assert_eq!(
        reply,
        "You don't have enough gold to buy Health Potion. You need 50 gold."
    );
    assert_eq!(state.players["p1"].gold, 40);
    assert_eq!(state.players["p1"].inventory, before);
}

#[test]
fn shop_listing_then_purchase_then_use() {
    let (mut state, mut rng) = alice();
    let shop = send(&mut state, &mut rng, "p1", "shop");
    assert!(shop.contains("- Health Potion (50 gold): Restores health"));
    assert!(shop.contains("Your gold: 100"));

    assert_eq!(
        send(&mut state, &mut rng, "p1", "buy Health Potion"),
        "You bought Health Potion for 50 gold."
    );
    assert_eq!(state.players["p1"].gold, 50);
    assert_eq!(
        send(&mut state, &mut rng, "p1", "inventory"),
        "=== INVENTORY ===\n\n- Iron Axe\n- Health Potion\n"
    );
    assert_eq!(
        send(&mut state, &mut rng, "p1", "use health potion"),
        "You used Health Potion. You feel refreshed!"
    );
    assert_eq!(state.players["p1"].inventory, vec!["Iron Axe".to_string()]);
    assert_eq!(send(&mut state, &mut rng, "p1", "buy"), "Please specify what to buy. Example: buy [item name]");
}

#[test]
fn skill_book_teaches_fireball() {
    let (mut state, mut rng) = alice();
    state.players.get_mut("p1").unwrap().gold = 250;
    assert_eq!(
        send(&mut state, &mut rng, "p1", "buy skill book: fireball"),
        "You learned a new skill: Fireball!"
    );
    let p = &state.players["p1"];
    assert_eq!(p.gold, 50);
    assert_eq!(p.skills, vec![Skill::Punch, Skill::Fireball]);
    assert_eq!(p.inventory.len(), 1);
    assert_eq!(
        send(&mut state, &mut rng, "p1", "skills"),
        "=== SKILLS ===\n\n- Punch: Basic melee attack\n- Fireball: Launch a ball of fire\n"
    );
}

#[test]
fn quest_completion_levels_up_and_grants_karma() {
    let (mut state, mut rng) = alice();
    let board = send(&mut state, &mut rng, "p1", "quest");
    assert!(board.contains("#1: Herb Gathering\n- Collect medicinal herbs\n- Rewards: 100 XP, 50 gold"));
    assert!(board.ends_with("To start a quest, type 'quest [id]'"));

    let reply = send(&mut state, &mut rng, "p1", "quest 3");
    assert_eq!(
        reply,
        "You completed the 'Lost Artifact' quest!\nYou gained 300 XP and 150 gold. Karma +20. You leveled up!"
    );
    let p = &state.players["p1"];
    // 300 XP: level 1->2 costs 100, 2->3 costs 200
    assert_eq!(p.level, 3);
    assert_eq!(p.experience, 0);
    assert_eq!(p.gold, 250);
    assert_eq!(p.karma, 20);

    assert_eq!(
        send(&mut state, &mut rng, "p1", "quest one"),
        "Invalid quest ID. Please enter a number."
    );
    assert_eq!(send(&mut state, &mut rng, "p1", "quest 4"), "Quest #4 not found.");
    assert_eq!(send(&mut state, &mut rng, "p1", "quest -1"), "Quest #-1 not found.");
}

#[test]
fn explore_outcomes_follow_the_generator() {
    let (mut state, _) = alice();

    // monster: exp 10 + floor(0.5 * 21) = 20, gold 5 + floor(0.5 * 11) = 10
    let mut rng = ScriptedRng::new([0.1, 0.5, 0.5]);
    assert_eq!(
        send(&mut state, &mut rng, "p1", "explore Mountain"),
        "You encountered a monster in the Mountain!\nAfter defeating it, you gained 20 XP and 10 gold."
    );

    // treasure without an item
    let mut rng = ScriptedRng::new([0.4, 0.999, 0.5]);
    assert_eq!(
        send(&mut state, &mut rng, "p1", "explore volcano"),
        "You found a small treasure in the Volcano! You gained 30 gold."
    );

    // treasure with the first pool item
    let mut rng = ScriptedRng::new([0.4, 0.0, 0.0, 0.0]);
    assert_eq!(
        send(&mut state, &mut rng, "p1", "explore ocean"),
        "You found a treasure chest in the Ocean!\nInside was 10 gold and a Health Potion."
    );

    let p = &state.players["p1"];
    assert_eq!(p.experience, 20);
    assert_eq!(p.gold, 100 + 10 + 30 + 10);
    assert!(p.inventory.iter().any(|i| i == "Health Potion"));
}

#[test]
fn rank_and_status_reflect_progress() {
    let (mut state, mut rng) = alice();
    {
        let p = state.players.get_mut("p1").unwrap();
        p.level = 9;
        p.experience = 850;
    }
    // 900 needed for level 10; Herb Gathering adds 100
    send(&mut state, &mut rng, "p1", "quest 1");
    let p = &state.players["p1"];
    assert_eq!(p.level, 10);
    assert_eq!(p.rank.name(), "F");

    let rank = send(&mut state, &mut rng, "p1", "rank");
    assert!(rank.contains("Your current rank: F"));
    assert!(rank.contains("Next rank (E) requirements:\n- Reach level 20"));
    let status = send(&mut state, &mut rng, "p1", "status");
    assert!(status.contains("Level 10 Human Warrior"));
    assert!(status.contains("Rank: F"));
}
