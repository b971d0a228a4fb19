use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::game::errors::GameError;
use crate::game::rules::{Class, Element, Race, Rank, Skill, Zone, STARTING_GOLD};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    pub strength: u32,
    pub agility: u32,
    pub intelligence: u32,
    pub endurance: u32,
}

/// A registered character, keyed in [`GameState::players`] by the sender id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub username: String,
    pub race: Race,
    pub class: Class,
    pub element: Element,
    pub level: u32,
    pub experience: u64,
    pub gold: u32,
    pub karma: i64,
    pub rank: Rank,
    pub attributes: Attributes,
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub inventory: Vec<String>,
    #[serde(default)]
    pub equipped: HashMap<String, String>,
    #[serde(default)]
    pub is_deity: bool,
    #[serde(default)]
    pub in_battle: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Player {
    /// Fresh level-1 character with the default skill and the first item of
    /// the class kit.
    pub fn new(username: &str, race: Race, class: Class, element: Element) -> Self {
        Self {
            username: username.to_string(),
            race,
            class,
            element,
            level: 1,
            experience: 0,
            gold: STARTING_GOLD,
            karma: 0,
            rank: Rank::G,
            attributes: Attributes::default(),
            skills: vec![Skill::BASIC_MELEE],
            inventory: vec![class.starting_items()[0].to_string()],
            equipped: HashMap::new(),
            is_deity: false,
            in_battle: false,
            created_at: Some(Utc::now()),
        }
    }

    pub fn knows_skill(&self, skill: Skill) -> bool {
        self.skills.contains(&skill)
    }

    /// Learned skill matching `name` case-insensitively.
    pub fn learned_skill(&self, name: &str) -> Option<Skill> {
        Skill::parse(name).filter(|s| self.knows_skill(*s))
    }

    /// Index of an inventory entry matching `name` case-insensitively.
    pub fn inventory_position(&self, name: &str) -> Option<usize> {
        let wanted = name.trim();
        self.inventory
            .iter()
            .position(|item| item.eq_ignore_ascii_case(wanted))
    }
}

/// An active duel between two players.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Battle {
    pub players: [String; 2],
    pub current_turn: String,
    pub rounds: u32,
    pub logs: Vec<String>,
    pub zone: Zone,
}

impl Battle {
    pub fn involves(&self, player_id: &str) -> bool {
        self.players.iter().any(|p| p == player_id)
    }

    /// The other participant, if `player_id` is one of the two.
    pub fn opponent_of(&self, player_id: &str) -> Option<&str> {
        if self.players[0] == player_id {
            Some(&self.players[1])
        } else if self.players[1] == player_id {
            Some(&self.players[0])
        } else {
            None
        }
    }
}

/// Composite key for the duel between `challenger` and `target`.
pub fn battle_key(challenger: &str, target: &str) -> String {
    format!("{}_{}", challenger, target)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneRecord {
    pub element_bonus: Element,
    pub element_penalty: Element,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeityRecord {
    pub name: String,
    pub player_phone: String,
    #[serde(default)]
    pub chosen: Vec<String>,
}

/// Aggregate root handed to the dispatcher for every command. The host owns
/// it and persists it; the core only mutates it in place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameState {
    #[serde(default)]
    pub players: HashMap<String, Player>,
    #[serde(default)]
    pub active_battles: HashMap<String, Battle>,
    #[serde(default)]
    pub zones: HashMap<String, ZoneRecord>,
    #[serde(default)]
    pub items: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub deities: HashMap<String, DeityRecord>,
}

impl GameState {
    /// Empty world with the zone table pre-populated.
    pub fn new() -> Self {
        let zones = Zone::ALL
            .into_iter()
            .map(|z| {
                (
                    z.name().to_string(),
                    ZoneRecord {
                        element_bonus: z.element_bonus(),
                        element_penalty: z.element_penalty(),
                    },
                )
            })
            .collect();
        Self {
            zones,
            ..Self::default()
        }
    }

    /// Player id owning `username`, compared case-insensitively.
    pub fn find_by_username(&self, username: &str) -> Option<&str> {
        self.players
            .iter()
            .find(|(_, p)| p.username.eq_ignore_ascii_case(username))
            .map(|(id, _)| id.as_str())
    }

    pub fn username_taken(&self, username: &str) -> bool {
        self.find_by_username(username).is_some()
    }

    /// Key of the battle `player_id` participates in.
    pub fn battle_key_for(&self, player_id: &str) -> Option<String> {
        self.active_battles
            .iter()
            .find(|(_, b)| b.involves(player_id))
            .map(|(k, _)| k.clone())
    }

    /// Map key for a new duel. Sender ids may contain `_`, so when the plain
    /// key already belongs to another pair a `#n` suffix is added.
    pub fn unused_battle_key(&self, challenger: &str, target: &str) -> String {
        let base = battle_key(challenger, target);
        if !self.active_battles.contains_key(&base) {
            return base;
        }
        let mut n = 2u32;
        loop {
            let candidate = format!("{}#{}", base, n);
            if !self.active_battles.contains_key(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    /// Promote a registered player to deity and record it in the deity table.
    pub fn create_deity(&mut self, player_id: &str, name: &str) -> Result<(), GameError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GameError::Internal("deity name must not be empty".to_string()));
        }
        let player = self
            .players
            .get_mut(player_id)
            .ok_or_else(|| GameError::NotFound(format!("player {}", player_id)))?;
        player.is_deity = true;
        self.deities.insert(
            player_id.to_string(),
            DeityRecord {
                name: name.to_string(),
                player_phone: player_id.to_string(),
                chosen: Vec::new(),
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_has_zone_table() {
        let state = GameState::new();
        assert_eq!(state.zones.len(), 5);
        let forest = &state.zones["Forest"];
        assert_eq!(forest.element_bonus, Element::Plant);
        assert_eq!(forest.element_penalty, Element::Fire);
    }

    #[test]
    fn persisted_layout_uses_expected_keys() {
        let mut state = GameState::new();
        state.players.insert(
            "+15550001".into(),
            Player::new("Alice", Race::Human, Class::Warrior, Element::Fire),
        );
        let json = serde_json::to_value(&state).unwrap();
        for key in ["players", "active_battles", "zones", "items", "deities"] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
        let p = &json["players"]["+15550001"];
        assert_eq!(p["class"], "Warrior");
        assert_eq!(p["rank"], "G");
        assert_eq!(p["skills"][0], "Punch");
    }

    #[test]
    fn deity_requires_existing_player() {
        let mut state = GameState::new();
        assert!(matches!(
            state.create_deity("nobody", "Sol"),
            Err(GameError::NotFound(_))
        ));
        state.players.insert(
            "p1".into(),
            Player::new("Bob", Race::Elf, Class::Mage, Element::Light),
        );
        state.create_deity("p1", "Sol").unwrap();
        assert!(state.players["p1"].is_deity);
        assert_eq!(state.deities["p1"].name, "Sol");
    }

    #[test]
    fn battle_opponent_lookup() {
        let b = Battle {
            players: ["a".into(), "b".into()],
            current_turn: "a".into(),
            rounds: 0,
            logs: vec![],
            zone: Zone::Sky,
        };
        assert_eq!(b.opponent_of("a"), Some("b"));
        assert_eq!(b.opponent_of("b"), Some("a"));
        assert_eq!(b.opponent_of("c"), None);
    }
}
