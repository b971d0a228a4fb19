//! Command parsing and dispatch.
//!
//! [`process_command`] is the single entry point the host calls for every
//! inbound line. The first token selects the action by case-insensitive
//! prefix; everything after it keeps the casing the player typed.

use log::{debug, info};

use crate::game::battle;
use crate::game::economy;
use crate::game::rng::GameRng;
use crate::game::rules::{join_names, Class, Element, Race, Rank, Zone};
use crate::game::types::{GameState, Player};
use crate::logutil::{escape_log, mask_id};
use crate::metrics;
use crate::validation::validate_player_name;

pub const NOT_REGISTERED: &str =
    "You are not registered. Use 'register [username] [race] [class] [element]' to join the game.";
pub const UNKNOWN_COMMAND: &str = "Unknown command. Type 'help' for available commands.";
const REGISTRATION_USAGE: &str = "Registration format: register [username] [race] [class] [element]";

/// A parsed command from a registered player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Status,
    Inventory,
    Skills,
    Duel(Option<String>),
    Attack(Option<String>),
    Use(Option<String>),
    Shop,
    Buy(Option<String>),
    Explore(Option<String>),
    Quest(Option<String>),
    Rank,
    Unknown(String),
}

/// Split `input` into a lowercased keyword and the untouched argument tokens.
fn tokenize(input: &str) -> (String, Vec<&str>) {
    let mut parts = input.split_whitespace();
    let keyword = parts.next().unwrap_or_default().to_lowercase();
    (keyword, parts.collect())
}

fn first(args: &[&str]) -> Option<String> {
    args.first().map(|s| s.to_string())
}

fn rest(args: &[&str]) -> Option<String> {
    if args.is_empty() {
        None
    } else {
        Some(args.join(" "))
    }
}

/// Parse a line into a [`Command`]. Keywords are tried in a fixed order and
/// match when the first token starts with them (`statusplease` is `status`).
pub fn parse(input: &str) -> Command {
    let (keyword, args) = tokenize(input);
    let kw = keyword.as_str();

    let cmd = if kw.starts_with("help") {
        Command::Help
    } else if kw.starts_with("status") {
        Command::Status
    } else if kw.starts_with("inventory") {
        Command::Inventory
    } else if kw.starts_with("skills") {
        Command::Skills
    } else if kw.starts_with("duel") {
        Command::Duel(first(&args))
    } else if kw.starts_with("attack") {
        Command::Attack(rest(&args))
    } else if kw.starts_with("use") {
        Command::Use(rest(&args))
    } else if kw.starts_with("shop") {
        Command::Shop
    } else if kw.starts_with("buy") {
        Command::Buy(rest(&args))
    } else if kw.starts_with("explore") {
        Command::Explore(first(&args))
    } else if kw.starts_with("quest") {
        Command::Quest(first(&args))
    } else if kw.starts_with("rank") {
        Command::Rank
    } else {
        Command::Unknown(input.trim().to_string())
    };
    debug!("Parsed command: {:?}", cmd);
    cmd
}

/// Interpret one line from `player_id`, mutate `state` in place and return
/// the reply. Never fails: bad input produces a corrective message.
pub fn process_command(
    raw: &str,
    player_id: &str,
    state: &mut GameState,
    rng: &mut dyn GameRng,
) -> String {
    metrics::inc_commands_processed();
    debug!(
        "command from {}: {}",
        mask_id(player_id),
        escape_log(raw)
    );

    if !state.players.contains_key(player_id) {
        return process_unregistered(raw, player_id, state);
    }

    match parse(raw) {
        Command::Help => help_text(),
        Command::Duel(target) => battle::start_duel(state, player_id, target.as_deref(), rng),
        Command::Attack(skill) => battle::attack(state, player_id, skill.as_deref(), rng),
        Command::Unknown(_) => {
            metrics::inc_unknown_commands();
            UNKNOWN_COMMAND.to_string()
        }
        cmd => {
            let Some(player) = state.players.get_mut(player_id) else {
                return NOT_REGISTERED.to_string();
            };
            dispatch_player(cmd, player, rng)
        }
    }
}

/// Handlers that only touch the caller's own record.
fn dispatch_player(cmd: Command, player: &mut Player, rng: &mut dyn GameRng) -> String {
    match cmd {
        Command::Status => format_status(player),
        Command::Inventory => format_inventory(player),
        Command::Skills => format_skills(player),
        Command::Use(target) => economy::use_item_or_skill(player, target.as_deref()),
        Command::Shop => economy::format_shop_listing(player),
        Command::Buy(item) => economy::buy(player, item.as_deref()),
        Command::Explore(zone) => economy::explore(player, zone.as_deref(), rng),
        Command::Quest(id) => economy::quest(player, id.as_deref()),
        Command::Rank => format_rank_info(player),
        Command::Help => help_text(),
        Command::Duel(_) | Command::Attack(_) | Command::Unknown(_) => UNKNOWN_COMMAND.to_string(),
    }
}

fn process_unregistered(raw: &str, player_id: &str, state: &mut GameState) -> String {
    let trimmed = raw.trim();
    let (keyword, _) = tokenize(trimmed);
    if keyword.starts_with("register") {
        return register(trimmed, player_id, state);
    }
    if trimmed.eq_ignore_ascii_case("help") {
        return help_text();
    }
    metrics::inc_unregistered_rejections();
    NOT_REGISTERED.to_string()
}

/// Handle `register <username> <race> <class> <element>`. Tokens past the
/// fifth are ignored.
pub fn register(raw: &str, player_id: &str, state: &mut GameState) -> String {
    let parts: Vec<&str> = raw.split_whitespace().collect();
    if parts.len() < 5 {
        return REGISTRATION_USAGE.to_string();
    }
    let username = parts[1];

    let Some(race) = Race::parse(parts[2]) else {
        return format!(
            "Invalid race. Choose from: {}",
            join_names(Race::ALL.iter().map(|r| r.name()))
        );
    };
    let Some(class) = Class::parse(parts[3]) else {
        return format!(
            "Invalid class. Choose from: {}",
            join_names(Class::ALL.iter().map(|c| c.name()))
        );
    };
    let Some(element) = Element::parse(parts[4]) else {
        return format!(
            "Invalid element. Choose from: {}",
            join_names(Element::ALL.iter().map(|e| e.name()))
        );
    };

    let username = match validate_player_name(username) {
        Ok(name) => name,
        Err(e) => return format!("{}. Please choose another.", e),
    };
    if state.username_taken(&username) {
        return "Username already taken. Please choose another.".to_string();
    }

    let player = Player::new(&username, race, class, element);
    state.players.insert(player_id.to_string(), player);
    info!(
        "registered {} ({} {} {}) for {}",
        username,
        race.name(),
        class.name(),
        element.name(),
        mask_id(player_id)
    );

    format!(
        "Welcome {}, the {} {}!\n\
         You have 10 points to distribute among your attributes.\n\
         Use 'attributes [str] [agi] [int] [end]' to set them.\n\
         Example: attributes 4 2 2 2",
        username,
        race.name(),
        class.name()
    )
}

pub fn help_text() -> String {
    let mut out = String::from(
        "=== CHAT RPG - COMMAND GUIDE ===\n\n\
         GENERAL COMMANDS:\n\
         - help: Show this help\n\
         - status: Check your character status\n\
         - inventory: View your items\n\
         - skills: List your skills\n\n\
         REGISTRATION:\n\
         - register [username] [race] [class] [element]: Create character\n\
         - attributes [str] [agi] [int] [end]: Set attributes\n\n\
         COMBAT:\n\
         - duel [player]: Challenge someone to a duel\n\
         - attack [skill]: Use a skill in combat\n\
         - use [item/skill]: Use an item or skill\n\n\
         EXPLORATION:\n\
         - explore [zone]: Explore a zone\n\
         - quest [id]: Start a quest\n\n\
         ECONOMY:\n\
         - shop: View available items\n\
         - buy [item]: Purchase an item\n\n\
         PROGRESSION:\n\
         - rank: View rank information\n",
    );

    out.push_str("\nRACES:\n");
    for race in Race::ALL {
        out.push_str(&format!("- {}: {}\n", race.name(), race.description()));
    }
    out.push_str("\nCLASSES:\n");
    for class in Class::ALL {
        out.push_str(&format!("- {}: {}\n", class.name(), class.description()));
    }
    out.push_str("\nELEMENTS:\n");
    for element in Element::ALL {
        out.push_str(&format!(
            "- {}: {} (strong vs {}",
            element.name(),
            element.description(),
            element.advantage().name()
        ));
        if let Some(weak) = element.disadvantage() {
            out.push_str(&format!(", weak vs {}", weak.name()));
        }
        out.push_str(")\n");
    }
    out.push_str("\nZONES:\n");
    for zone in Zone::ALL {
        out.push_str(&format!("- {}: {}\n", zone.name(), zone.description()));
    }
    out
}

pub fn format_status(player: &Player) -> String {
    let a = &player.attributes;
    format!(
        "=== STATUS: {} ===\n\n\
         Level {} {} {}\n\
         Element: {}\n\
         Rank: {}\n\n\
         XP: {}\n\
         Gold: {}\n\
         Karma: {}\n\n\
         ATTRIBUTES:\n\
         - Strength: {}\n\
         - Agility: {}\n\
         - Intelligence: {}\n\
         - Endurance: {}\n\n\
         Type 'skills' or 'inventory' for more info.",
        player.username,
        player.level,
        player.race.name(),
        player.class.name(),
        player.element.name(),
        player.rank.name(),
        player.experience,
        player.gold,
        player.karma,
        a.strength,
        a.agility,
        a.intelligence,
        a.endurance
    )
}

pub fn format_inventory(player: &Player) -> String {
    if player.inventory.is_empty() {
        return "Your inventory is empty.".to_string();
    }
    let mut out = String::from("=== INVENTORY ===\n\n");
    for item in &player.inventory {
        out.push_str(&format!("- {}\n", item));
    }
    out
}

pub fn format_skills(player: &Player) -> String {
    if player.skills.is_empty() {
        return "You don't have any skills yet.".to_string();
    }
    let mut out = String::from("=== SKILLS ===\n\n");
    for skill in &player.skills {
        out.push_str(&format!("- {}: {}\n", skill.name(), skill.description()));
    }
    out
}

fn push_rank_bonuses(out: &mut String, rank: Rank) {
    out.push_str(&format!("- Max stats: {}\n", rank.max_stats()));
    for (stat, value) in rank.bonuses() {
        out.push_str(&format!(
            "- {}: +{}%\n",
            stat.label(),
            (value * 100.0).round_ties_even() as i64
        ));
    }
    for unlock in rank.unlocks() {
        out.push_str(&format!("- {} unlocked\n", unlock));
    }
}

pub fn format_rank_info(player: &Player) -> String {
    let mut out = format!(
        "=== RANK INFORMATION ===\n\n\
         Your current rank: {}\n\
         Level: {}\n\n\
         Current rank bonuses:\n",
        player.rank.name(),
        player.level
    );
    push_rank_bonuses(&mut out, player.rank);

    match player.rank.next() {
        Some(next) => {
            out.push_str(&format!(
                "\nNext rank ({}) requirements:\n- Reach level {}\n\nNext rank bonuses:\n",
                next.name(),
                next.level_requirement()
            ));
            push_rank_bonuses(&mut out, next);
        }
        None => out.push_str("\nYou have reached the maximum rank!"),
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::rng::ScriptedRng;
    use crate::game::rules::Skill;

    #[test]
    fn keywords_match_by_prefix_and_keep_argument_case() {
        assert_eq!(parse("HELP"), Command::Help);
        assert_eq!(parse("  statusplease "), Command::Status);
        assert_eq!(parse("duel BoB extra"), Command::Duel(Some("BoB".into())));
        assert_eq!(
            parse("attack Mind Shuffle"),
            Command::Attack(Some("Mind Shuffle".into()))
        );
        assert_eq!(parse("Buy Health Potion"), Command::Buy(Some("Health Potion".into())));
        assert_eq!(parse("quest"), Command::Quest(None));
        assert_eq!(parse("dance"), Command::Unknown("dance".into()));
        assert_eq!(parse(""), Command::Unknown(String::new()));
    }

    #[test]
    fn unregistered_gate_runs_first() {
        let mut state = GameState::new();
        let mut rng = ScriptedRng::constant(0.5);
        assert_eq!(process_command("status", "p1", &mut state, &mut rng), NOT_REGISTERED);
        assert!(process_command("help", "p1", &mut state, &mut rng).contains("COMMAND GUIDE"));
        assert_eq!(
            process_command("help me", "p1", &mut state, &mut rng),
            NOT_REGISTERED
        );
        assert_eq!(
            process_command("register alice", "p1", &mut state, &mut rng),
            REGISTRATION_USAGE
        );
        assert!(state.players.is_empty());
    }

    #[test]
    fn registration_creates_starting_character() {
        let mut state = GameState::new();
        let out = register("register Alice human warrior fire", "p1", &mut state);
        assert!(out.starts_with("Welcome Alice, the Human Warrior!"));
        let p = &state.players["p1"];
        assert_eq!(p.username, "Alice");
        assert_eq!(p.level, 1);
        assert_eq!(p.gold, 100);
        assert_eq!(p.rank, Rank::G);
        assert_eq!(p.inventory, vec!["Iron Axe".to_string()]);
        assert_eq!(p.skills, vec![Skill::Punch]);
    }

    #[test]
    fn registration_rejections() {
        let mut state = GameState::new();
        assert!(register("register bob goblin mage fire", "p1", &mut state)
            .starts_with("Invalid race. Choose from: Human, Elf"));
        assert!(register("register bob elf pirate fire", "p1", &mut state)
            .starts_with("Invalid class."));
        assert!(register("register bob elf mage ice", "p1", &mut state)
            .starts_with("Invalid element."));
        assert_eq!(
            register("register b elf mage fire", "p1", &mut state),
            "Username is too short (minimum 2 characters). Please choose another."
        );
        register("register bob elf mage fire", "p1", &mut state);
        assert_eq!(
            register("register BOB orc warrior water", "p2", &mut state),
            "Username already taken. Please choose another."
        );
        assert_eq!(state.players.len(), 1);
    }

    #[test]
    fn registered_player_commands() {
        let mut state = GameState::new();
        let mut rng = ScriptedRng::constant(0.5);
        process_command("register alice human warrior fire", "p1", &mut state, &mut rng);

        let status = process_command("STATUS", "p1", &mut state, &mut rng);
        assert!(status.contains("Level 1 Human Warrior"));
        assert!(status.contains("Gold: 100"));
        assert_eq!(
            process_command("inventory", "p1", &mut state, &mut rng),
            "=== INVENTORY ===\n\n- Iron Axe\n"
        );
        assert_eq!(
            process_command("register again human mage fire", "p1", &mut state, &mut rng),
            UNKNOWN_COMMAND
        );
        assert_eq!(
            process_command("attributes 4 2 2 2", "p1", &mut state, &mut rng),
            UNKNOWN_COMMAND
        );
    }

    #[test]
    fn rank_info_lists_current_and_next() {
        let p = Player::new("alice", Race::Human, Class::Warrior, Element::Fire);
        let info = format_rank_info(&p);
        assert!(info.contains("Your current rank: G"));
        assert!(info.contains("- exp_gain: +5%"));
        assert!(info.contains("Next rank (F) requirements:\n- Reach level 10"));

        let mut top = p.clone();
        top.rank = Rank::SS;
        let info = format_rank_info(&top);
        assert!(info.contains("- divine_raids unlocked"));
        assert!(info.ends_with("You have reached the maximum rank!"));
    }
}
