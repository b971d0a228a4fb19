//! Shop purchases, instant quests, zone exploration and item use.
//!
//! Every handler returns the reply text; failures leave the player untouched.

use log::{debug, info};

use crate::game::progression::grant_experience;
use crate::game::rng::GameRng;
use crate::game::rules::{
    find_quest, find_shop_item, join_names, ItemKind, Zone, QUEST_BOARD, SHOP_CATALOG, TREASURE_ITEMS,
};
use crate::game::types::Player;
use crate::metrics;

pub const MONSTER_EXPERIENCE: (u32, u32) = (10, 30);
pub const MONSTER_GOLD: (u32, u32) = (5, 15);
pub const TREASURE_GOLD: (u32, u32) = (10, 30);
/// Chance that a treasure chest also holds an item.
pub const TREASURE_ITEM_CHANCE: f64 = 0.3;

const LEVELED_SUFFIX: &str = " You leveled up!";

/// Outcome of one `explore` roll, drawn with equal weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encounter {
    Monster,
    Treasure,
    Nothing,
}

impl Encounter {
    pub const ALL: [Encounter; 3] = [Encounter::Monster, Encounter::Treasure, Encounter::Nothing];
}

/// Shop catalog plus the player's purse.
pub fn format_shop_listing(player: &Player) -> String {
    let mut out = String::from("=== SHOP ITEMS ===\n\n");
    for item in SHOP_CATALOG.iter() {
        out.push_str(&format!(
            "- {} ({} gold): {}\n",
            item.name, item.cost, item.description
        ));
    }
    out.push_str(&format!("\nYour gold: {}\n", player.gold));
    out.push_str("To buy an item, type 'buy [item name]'");
    out
}

/// Handle `buy <item name>`.
pub fn buy(player: &mut Player, item_name: Option<&str>) -> String {
    let Some(item_name) = item_name.map(str::trim).filter(|s| !s.is_empty()) else {
        return "Please specify what to buy. Example: buy [item name]".to_string();
    };
    let Some(item) = find_shop_item(item_name) else {
        return format!("{} is not available in the shop.", item_name);
    };
    if player.gold < item.cost {
        return format!(
            "You don't have enough gold to buy {}. You need {} gold.",
            item.name, item.cost
        );
    }

    player.gold -= item.cost;
    debug!(
        "{} bought {} for {} (gold left {})",
        player.username, item.name, item.cost, player.gold
    );

    match item.kind {
        ItemKind::SkillBook(skill) => {
            if !player.knows_skill(skill) {
                player.skills.push(skill);
                return format!("You learned a new skill: {}!", skill.name());
            }
        }
        ItemKind::Consumable | ItemKind::Weapon | ItemKind::Armor => {
            player.inventory.push(item.name.to_string());
        }
    }
    format!("You bought {} for {} gold.", item.name, item.cost)
}

/// Quest board text shown by a bare `quest`.
pub fn format_quest_list() -> String {
    let mut out = String::from("=== AVAILABLE QUESTS ===\n\n");
    for quest in QUEST_BOARD.iter() {
        out.push_str(&format!(
            "#{}: {}\n- {}\n- Rewards: {} XP, {} gold\n\n",
            quest.id, quest.name, quest.description, quest.reward_exp, quest.reward_gold
        ));
    }
    out.push_str("To start a quest, type 'quest [id]'");
    out
}

/// Handle `quest [id]`. Quests complete the moment they are chosen.
pub fn quest(player: &mut Player, id_arg: Option<&str>) -> String {
    let Some(raw) = id_arg else {
        return format_quest_list();
    };
    let Ok(id) = raw.trim().parse::<i64>() else {
        return "Invalid quest ID. Please enter a number.".to_string();
    };
    let Some(quest) = u32::try_from(id).ok().and_then(find_quest) else {
        return format!("Quest #{} not found.", id);
    };

    player.gold = player.gold.saturating_add(quest.reward_gold);
    player.karma += quest.reward_karma;
    let leveled = grant_experience(player, quest.reward_exp as u64);
    if leveled {
        metrics::inc_level_ups();
    }
    info!("{} completed quest #{} ({})", player.username, quest.id, quest.name);

    let mut out = format!(
        "You completed the '{}' quest!\nYou gained {} XP and {} gold.",
        quest.name, quest.reward_exp, quest.reward_gold
    );
    if quest.reward_karma != 0 {
        out.push_str(&format!(" Karma +{}.", quest.reward_karma));
    }
    if leveled {
        out.push_str(LEVELED_SUFFIX);
    }
    out
}

/// Handle `explore <zone>`.
pub fn explore(player: &mut Player, zone_arg: Option<&str>, rng: &mut dyn GameRng) -> String {
    let zone_names = join_names(Zone::ALL.iter().map(|z| z.name()));
    let Some(raw) = zone_arg else {
        return format!("Please specify a zone to explore. Available zones: {}", zone_names);
    };
    let Some(zone) = Zone::parse(raw) else {
        return format!("Invalid zone. Available zones: {}", zone_names);
    };
    if player.in_battle {
        return "You can't explore while in battle.".to_string();
    }

    let encounter = Encounter::ALL[rng.index(Encounter::ALL.len())];
    debug!("{} explores {}: {:?}", player.username, zone.name(), encounter);

    match encounter {
        Encounter::Monster => {
            let exp = rng.range_inclusive(MONSTER_EXPERIENCE.0, MONSTER_EXPERIENCE.1);
            let gold = rng.range_inclusive(MONSTER_GOLD.0, MONSTER_GOLD.1);
            player.gold = player.gold.saturating_add(gold);
            let leveled = grant_experience(player, exp as u64);
            if leveled {
                metrics::inc_level_ups();
            }
            format!(
                "You encountered a monster in the {}!\nAfter defeating it, you gained {} XP and {} gold.{}",
                zone.name(),
                exp,
                gold,
                if leveled { LEVELED_SUFFIX } else { "" }
            )
        }
        Encounter::Treasure => {
            let gold = rng.range_inclusive(TREASURE_GOLD.0, TREASURE_GOLD.1);
            player.gold = player.gold.saturating_add(gold);
            if rng.chance(TREASURE_ITEM_CHANCE) {
                let found = TREASURE_ITEMS[rng.index(TREASURE_ITEMS.len())];
                player.inventory.push(found.to_string());
                return format!(
                    "You found a treasure chest in the {}!\nInside was {} gold and a {}.",
                    zone.name(),
                    gold,
                    found
                );
            }
            format!(
                "You found a small treasure in the {}! You gained {} gold.",
                zone.name(),
                gold
            )
        }
        Encounter::Nothing => format!(
            "You explored the {} but found nothing of interest.",
            zone.name()
        ),
    }
}

/// Handle `use <item or skill>` outside of combat.
pub fn use_item_or_skill(player: &mut Player, target: Option<&str>) -> String {
    let Some(target) = target.map(str::trim).filter(|s| !s.is_empty()) else {
        return "Please specify what to use. Example: use [item/skill]".to_string();
    };

    if let Some(pos) = player.inventory_position(target) {
        let item = player.inventory[pos].clone();
        if item.contains("Potion") {
            player.inventory.remove(pos);
            return format!("You used {}. You feel refreshed!", item);
        }
        return format!("You can't use {} right now.", item);
    }

    match player.learned_skill(target) {
        Some(skill) if skill.usable_outside_combat() => {
            format!("You used {}. You feel better!", skill.name())
        }
        Some(skill) => format!("{} can only be used in combat.", skill.name()),
        None => format!("You don't have {}.", target),
    }
}
