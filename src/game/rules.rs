//! Static rule tables: races, classes, elements, zones, ranks, skills, the
//! shop catalog and the quest board.
//!
//! Every table is keyed by a closed enum so a missing entry is a build error
//! rather than a runtime lookup miss. Names round-trip through serde using the
//! same capitalized labels players type, so persisted state stays readable.

use serde::{Deserialize, Serialize};

/// Gold granted to a freshly registered character.
pub const STARTING_GOLD: u32 = 100;

/// Items that can turn up in a treasure chest while exploring.
pub const TREASURE_ITEMS: [&str; 4] = [
    "Health Potion",
    "Mana Potion",
    "Mysterious Amulet",
    "Glowing Herb",
];

/// Named numeric modifiers used across the race, class, zone and rank tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stat {
    ExpGain,
    GoldGain,
    KarmaGain,
    Dodge,
    Defense,
    Speed,
    Endurance,
    Intelligence,
    Strength,
    Agility,
    Charisma,
    Constitution,
    MaxHp,
    Damage,
    MeleeDamage,
    RangeDamage,
    MagicPower,
    Magic,
    DarkMagic,
    Healing,
    Crit,
    NatureControl,
    Summon,
    LifeLeech,
    Support,
    PartyBuffs,
    Rage,
    Potions,
    Bombs,
    AllyProtection,
    MagicBarriers,
    Reconnaissance,
    Traps,
    TimeManipulation,
    Crafting,
    Upgrade,
    Commerce,
    AttackSpeed,
    Resistance,
    Accuracy,
}

impl Stat {
    pub fn label(self) -> &'static str {
        match self {
            Stat::ExpGain => "exp_gain",
            Stat::GoldGain => "gold_gain",
            Stat::KarmaGain => "karma_gain",
            Stat::Dodge => "dodge",
            Stat::Defense => "defense",
            Stat::Speed => "speed",
            Stat::Endurance => "endurance",
            Stat::Intelligence => "intelligence",
            Stat::Strength => "strength",
            Stat::Agility => "agility",
            Stat::Charisma => "charisma",
            Stat::Constitution => "constitution",
            Stat::MaxHp => "max_hp",
            Stat::Damage => "damage",
            Stat::MeleeDamage => "melee_damage",
            Stat::RangeDamage => "range_damage",
            Stat::MagicPower => "magic_power",
            Stat::Magic => "magic",
            Stat::DarkMagic => "dark_magic",
            Stat::Healing => "healing",
            Stat::Crit => "crit",
            Stat::NatureControl => "nature_control",
            Stat::Summon => "summon",
            Stat::LifeLeech => "life_leech",
            Stat::Support => "support",
            Stat::PartyBuffs => "party_buffs",
            Stat::Rage => "rage",
            Stat::Potions => "potions",
            Stat::Bombs => "bombs",
            Stat::AllyProtection => "ally_protection",
            Stat::MagicBarriers => "magic_barriers",
            Stat::Reconnaissance => "reconnaissance",
            Stat::Traps => "traps",
            Stat::TimeManipulation => "time_manipulation",
            Stat::Crafting => "crafting",
            Stat::Upgrade => "upgrade",
            Stat::Commerce => "commerce",
            Stat::AttackSpeed => "attack_speed",
            Stat::Resistance => "resistance",
            Stat::Accuracy => "accuracy",
        }
    }
}

fn lookup(table: &[(Stat, f64)], stat: Stat) -> Option<f64> {
    table.iter().find(|(s, _)| *s == stat).map(|(_, v)| *v)
}

/// Join display names for "choose from" style messages.
pub fn join_names<I: IntoIterator<Item = &'static str>>(names: I) -> String {
    names.into_iter().collect::<Vec<_>>().join(", ")
}

// ---------------------------------------------------------------------------
// Races
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Race {
    Human,
    Elf,
    Dwarf,
    Orc,
    Anaon,
}

impl Race {
    pub const ALL: [Race; 5] = [Race::Human, Race::Elf, Race::Dwarf, Race::Orc, Race::Anaon];

    pub fn name(self) -> &'static str {
        match self {
            Race::Human => "Human",
            Race::Elf => "Elf",
            Race::Dwarf => "Dwarf",
            Race::Orc => "Orc",
            Race::Anaon => "Anaon",
        }
    }

    /// Case-insensitive lookup by display name.
    pub fn parse(input: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|r| r.name().eq_ignore_ascii_case(input.trim()))
    }

    pub fn description(self) -> &'static str {
        match self {
            Race::Human => "Versatile and adaptable",
            Race::Elf => "Swift and agile",
            Race::Dwarf => "Stout and strong",
            Race::Orc => "Brutal and powerful",
            Race::Anaon => "Ethereal wraith with control over dark energies",
        }
    }

    /// Trait modifiers; negative values are racial penalties.
    pub fn traits(self) -> &'static [(Stat, f64)] {
        match self {
            Race::Human => &[(Stat::ExpGain, 0.05)],
            Race::Elf => &[(Stat::Dodge, 0.10), (Stat::Endurance, -0.05)],
            Race::Dwarf => &[(Stat::Defense, 0.15), (Stat::Speed, -0.10)],
            Race::Orc => &[(Stat::MeleeDamage, 0.20), (Stat::Intelligence, -0.10)],
            Race::Anaon => &[(Stat::DarkMagic, 0.15), (Stat::MaxHp, -0.10)],
        }
    }

    pub fn modifier(self, stat: Stat) -> Option<f64> {
        lookup(self.traits(), stat)
    }
}

// ---------------------------------------------------------------------------
// Classes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Class {
    Warrior,
    Archer,
    Mage,
    Paladin,
    Rogue,
    Druid,
    Necromancer,
    Bard,
    Berserker,
    Alchemist,
    Guardian,
    Scout,
    Chronomancer,
    Artisan,
}

impl Class {
    pub const ALL: [Class; 14] = [
        Class::Warrior,
        Class::Archer,
        Class::Mage,
        Class::Paladin,
        Class::Rogue,
        Class::Druid,
        Class::Necromancer,
        Class::Bard,
        Class::Berserker,
        Class::Alchemist,
        Class::Guardian,
        Class::Scout,
        Class::Chronomancer,
        Class::Artisan,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Class::Warrior => "Warrior",
            Class::Archer => "Archer",
            Class::Mage => "Mage",
            Class::Paladin => "Paladin",
            Class::Rogue => "Rogue",
            Class::Druid => "Druid",
            Class::Necromancer => "Necromancer",
            Class::Bard => "Bard",
            Class::Berserker => "Berserker",
            Class::Alchemist => "Alchemist",
            Class::Guardian => "Guardian",
            Class::Scout => "Scout",
            Class::Chronomancer => "Chronomancer",
            Class::Artisan => "Artisan",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(input.trim()))
    }

    pub fn description(self) -> &'static str {
        match self {
            Class::Warrior => "Master of weapons and physical combat",
            Class::Archer => "Skilled in ranged combat",
            Class::Mage => "Wielder of arcane magic",
            Class::Paladin => "Holy warrior with defensive and healing abilities",
            Class::Rogue => "Stealthy and agile fighter",
            Class::Druid => "Nature magic user with healing abilities",
            Class::Necromancer => "Master of death magic and summoning undead",
            Class::Bard => "Magical musician with support abilities",
            Class::Berserker => "Rage-fueled warrior with high damage",
            Class::Alchemist => "Creator of potions and bombs",
            Class::Guardian => "Protective warrior focused on defense",
            Class::Scout => "Expert in reconnaissance and traps",
            Class::Chronomancer => "Manipulator of time and space",
            Class::Artisan => "Master crafter of weapons and armor",
        }
    }

    /// Fractional values are multipliers, whole numbers are flat attribute points.
    pub fn bonuses(self) -> &'static [(Stat, f64)] {
        match self {
            Class::Warrior => &[(Stat::MeleeDamage, 0.15), (Stat::Endurance, 10.0)],
            Class::Archer => &[(Stat::RangeDamage, 0.15), (Stat::Agility, 10.0)],
            Class::Mage => &[(Stat::MagicPower, 0.20), (Stat::Intelligence, 10.0)],
            Class::Paladin => &[
                (Stat::Defense, 0.10),
                (Stat::Healing, 0.05),
                (Stat::Endurance, 10.0),
            ],
            Class::Rogue => &[(Stat::Dodge, 0.20), (Stat::Crit, 0.20), (Stat::Agility, 10.0)],
            Class::Druid => &[
                (Stat::Healing, 0.15),
                (Stat::NatureControl, 0.15),
                (Stat::Intelligence, 5.0),
                (Stat::Strength, 5.0),
            ],
            Class::Necromancer => &[
                (Stat::Summon, 0.15),
                (Stat::LifeLeech, 0.10),
                (Stat::DarkMagic, 10.0),
            ],
            Class::Bard => &[
                (Stat::Support, 0.20),
                (Stat::PartyBuffs, 0.15),
                (Stat::Charisma, 10.0),
                (Stat::Agility, 5.0),
            ],
            Class::Berserker => &[
                (Stat::Rage, 0.25),
                (Stat::Defense, -0.15),
                (Stat::Strength, 10.0),
                (Stat::Endurance, 10.0),
            ],
            Class::Alchemist => &[
                (Stat::Potions, 0.20),
                (Stat::Bombs, 0.15),
                (Stat::Intelligence, 10.0),
                (Stat::Constitution, 5.0),
            ],
            Class::Guardian => &[
                (Stat::AllyProtection, 0.20),
                (Stat::MagicBarriers, 0.15),
                (Stat::Defense, 10.0),
                (Stat::Endurance, 10.0),
            ],
            Class::Scout => &[
                (Stat::Reconnaissance, 0.20),
                (Stat::Traps, 0.15),
                (Stat::Agility, 10.0),
                (Stat::Intelligence, 5.0),
            ],
            Class::Chronomancer => &[
                (Stat::TimeManipulation, 0.20),
                (Stat::Magic, 0.15),
                (Stat::Intelligence, 10.0),
            ],
            Class::Artisan => &[
                (Stat::Crafting, 0.25),
                (Stat::Upgrade, 0.20),
                (Stat::Commerce, 10.0),
                (Stat::Constitution, 5.0),
            ],
        }
    }

    pub fn modifier(self, stat: Stat) -> Option<f64> {
        lookup(self.bonuses(), stat)
    }

    /// Class kit; only the first item is handed out at registration.
    pub fn starting_items(self) -> [&'static str; 2] {
        match self {
            Class::Warrior => ["Iron Axe", "Steel Shield"],
            Class::Archer => ["Wooden Bow", "Quiver of 20 Arrows"],
            Class::Mage => ["Carved Wooden Staff", "Basic Spellbook"],
            Class::Paladin => ["Blessed Shortsword", "Major Healing Potion"],
            Class::Rogue => ["Light Dagger", "Shadow Cloak"],
            Class::Druid => ["Sacred Branch", "5x Healing Herbs"],
            Class::Necromancer => ["Rat Skull", "Tome of Necromancy"],
            Class::Bard => ["Lute", "Enchanted Flute"],
            Class::Berserker => ["Rusty Hatchet", "Rage Flask"],
            Class::Alchemist => ["Basic Alchemy Kit", "3x Smoke Bombs"],
            Class::Guardian => ["Guard's Hammer", "Magic Barrier Scroll"],
            Class::Scout => ["Spyglass", "2x Mechanical Traps"],
            Class::Chronomancer => ["Mystic Hourglass", "Enchanted Pocket Watch"],
            Class::Artisan => ["Portable Anvil", "Blacksmith's Hammer"],
        }
    }
}

// ---------------------------------------------------------------------------
// Elements
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Fire,
    Water,
    Plant,
    Earth,
    Wind,
    Darkness,
    Light,
}

impl Element {
    pub const ALL: [Element; 7] = [
        Element::Fire,
        Element::Water,
        Element::Plant,
        Element::Earth,
        Element::Wind,
        Element::Darkness,
        Element::Light,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Element::Fire => "Fire",
            Element::Water => "Water",
            Element::Plant => "Plant",
            Element::Earth => "Earth",
            Element::Wind => "Wind",
            Element::Darkness => "Darkness",
            Element::Light => "Light",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|e| e.name().eq_ignore_ascii_case(input.trim()))
    }

    pub fn description(self) -> &'static str {
        match self {
            Element::Fire => "Destructive burning element",
            Element::Water => "Flowing liquid element",
            Element::Plant => "Living growth element",
            Element::Earth => "Solid ground element",
            Element::Wind => "Moving air element",
            Element::Darkness => "Shadowy void element",
            Element::Light => "Radiant illumination element",
        }
    }

    /// The element this one deals bonus damage against.
    pub fn advantage(self) -> Element {
        match self {
            Element::Fire => Element::Plant,
            Element::Water => Element::Fire,
            Element::Plant => Element::Water,
            Element::Earth => Element::Wind,
            Element::Wind => Element::Earth,
            Element::Darkness => Element::Light,
            Element::Light => Element::Darkness,
        }
    }

    pub fn disadvantage(self) -> Option<Element> {
        match self {
            Element::Fire => Some(Element::Water),
            Element::Water => Some(Element::Plant),
            Element::Plant => Some(Element::Fire),
            Element::Earth => Some(Element::Water),
            Element::Wind => Some(Element::Fire),
            Element::Darkness | Element::Light => None,
        }
    }

    pub fn beats(self, other: Element) -> bool {
        self.advantage() == other
    }
}

// ---------------------------------------------------------------------------
// Zones
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Forest,
    Volcano,
    Ocean,
    Mountain,
    Sky,
}

impl Zone {
    pub const ALL: [Zone; 5] = [Zone::Forest, Zone::Volcano, Zone::Ocean, Zone::Mountain, Zone::Sky];

    pub fn name(self) -> &'static str {
        match self {
            Zone::Forest => "Forest",
            Zone::Volcano => "Volcano",
            Zone::Ocean => "Ocean",
            Zone::Mountain => "Mountain",
            Zone::Sky => "Sky",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|z| z.name().eq_ignore_ascii_case(input.trim()))
    }

    pub fn description(self) -> &'static str {
        match self {
            Zone::Forest => "Dense woodland with abundant plant life",
            Zone::Volcano => "Fiery mountain with rivers of lava",
            Zone::Ocean => "Vast expanse of water and waves",
            Zone::Mountain => "Rocky highlands reaching to the skies",
            Zone::Sky => "Open air high above the ground",
        }
    }

    /// Per-element effects active inside the zone.
    pub fn effects(self) -> &'static [(Element, Stat, f64)] {
        match self {
            Zone::Forest => &[
                (Element::Plant, Stat::Damage, 0.10),
                (Element::Fire, Stat::Defense, -0.10),
            ],
            Zone::Volcano => &[
                (Element::Fire, Stat::AttackSpeed, 0.15),
                (Element::Water, Stat::Resistance, -0.15),
            ],
            Zone::Ocean => &[
                (Element::Water, Stat::MaxHp, 0.10),
                (Element::Plant, Stat::Dodge, -0.10),
            ],
            Zone::Mountain => &[
                (Element::Earth, Stat::Endurance, 0.10),
                (Element::Wind, Stat::Agility, -0.10),
            ],
            Zone::Sky => &[
                (Element::Wind, Stat::Dodge, 0.12),
                (Element::Earth, Stat::Accuracy, -0.12),
            ],
        }
    }

    pub fn modifier(self, element: Element, stat: Stat) -> Option<f64> {
        self.effects()
            .iter()
            .find(|(e, s, _)| *e == element && *s == stat)
            .map(|(_, _, v)| *v)
    }

    /// Element favoured by the zone (first effect) and the one it hinders (second).
    pub fn element_bonus(self) -> Element {
        self.effects()[0].0
    }

    pub fn element_penalty(self) -> Element {
        self.effects()[1].0
    }
}

// ---------------------------------------------------------------------------
// Ranks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    G,
    F,
    E,
    D,
    C,
    B,
    A,
    S,
    SS,
}

impl Rank {
    pub const LADDER: [Rank; 9] = [
        Rank::G,
        Rank::F,
        Rank::E,
        Rank::D,
        Rank::C,
        Rank::B,
        Rank::A,
        Rank::S,
        Rank::SS,
    ];

    /// Levels required per rank step.
    pub const LEVELS_PER_RANK: u32 = 10;

    pub fn name(self) -> &'static str {
        match self {
            Rank::G => "G",
            Rank::F => "F",
            Rank::E => "E",
            Rank::D => "D",
            Rank::C => "C",
            Rank::B => "B",
            Rank::A => "A",
            Rank::S => "S",
            Rank::SS => "SS",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Clamps to the top rung.
    pub fn from_index(index: usize) -> Rank {
        Self::LADDER[index.min(Self::LADDER.len() - 1)]
    }

    pub fn next(self) -> Option<Rank> {
        Self::LADDER.get(self.index() + 1).copied()
    }

    /// Level at which this rank is reached.
    pub fn level_requirement(self) -> u32 {
        self.index() as u32 * Self::LEVELS_PER_RANK
    }

    pub fn max_stats(self) -> u32 {
        100 + 50 * self.index() as u32
    }

    pub fn bonuses(self) -> &'static [(Stat, f64)] {
        match self {
            Rank::G => &[(Stat::ExpGain, 0.05)],
            Rank::F => &[(Stat::GoldGain, 0.05)],
            Rank::E => &[(Stat::KarmaGain, 0.05)],
            Rank::D => &[(Stat::ExpGain, 0.10)],
            Rank::C => &[(Stat::GoldGain, 0.10)],
            Rank::B => &[(Stat::KarmaGain, 0.10)],
            Rank::A => &[(Stat::ExpGain, 0.15)],
            Rank::S => &[(Stat::GoldGain, 0.15)],
            Rank::SS => &[(Stat::KarmaGain, 0.20)],
        }
    }

    pub fn unlocks(self) -> &'static [&'static str] {
        match self {
            Rank::A => &["summons"],
            Rank::S => &["ascensions"],
            Rank::SS => &["divine_raids"],
            _ => &[],
        }
    }
}

impl Default for Rank {
    fn default() -> Self {
        Rank::G
    }
}

// ---------------------------------------------------------------------------
// Skills
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Skill {
    Punch,
    #[serde(rename = "Mind Shuffle")]
    MindShuffle,
    #[serde(rename = "Precision Shot")]
    PrecisionShot,
    #[serde(rename = "Minor Heal")]
    MinorHeal,
    #[serde(rename = "Magic Shield")]
    MagicShield,
    Fireball,
    #[serde(rename = "Water Blast")]
    WaterBlast,
}

impl Skill {
    pub const ALL: [Skill; 7] = [
        Skill::Punch,
        Skill::MindShuffle,
        Skill::PrecisionShot,
        Skill::MinorHeal,
        Skill::MagicShield,
        Skill::Fireball,
        Skill::WaterBlast,
    ];

    /// Skill every character starts with and the fallback for `attack`.
    pub const BASIC_MELEE: Skill = Skill::Punch;

    pub fn name(self) -> &'static str {
        match self {
            Skill::Punch => "Punch",
            Skill::MindShuffle => "Mind Shuffle",
            Skill::PrecisionShot => "Precision Shot",
            Skill::MinorHeal => "Minor Heal",
            Skill::MagicShield => "Magic Shield",
            Skill::Fireball => "Fireball",
            Skill::WaterBlast => "Water Blast",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.name().eq_ignore_ascii_case(input.trim()))
    }

    pub fn description(self) -> &'static str {
        match self {
            Skill::Punch => "Basic melee attack",
            Skill::MindShuffle => "Confuse target with mental attack",
            Skill::PrecisionShot => "Accurate ranged attack",
            Skill::MinorHeal => "Recover a small amount of health",
            Skill::MagicShield => "Create protective barrier",
            Skill::Fireball => "Launch a ball of fire",
            Skill::WaterBlast => "Blast the target with a torrent of water",
        }
    }

    /// Physical and ranged skills scale with strength; everything else with intelligence.
    pub fn is_physical(self) -> bool {
        matches!(self, Skill::Punch | Skill::PrecisionShot)
    }

    /// Skills boosted by a class magic-power bonus.
    pub fn is_magic(self) -> bool {
        matches!(self, Skill::MindShuffle | Skill::MagicShield)
    }

    /// Skills that have an effect outside of a duel.
    pub fn usable_outside_combat(self) -> bool {
        matches!(self, Skill::MinorHeal)
    }
}

// ---------------------------------------------------------------------------
// Shop
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Consumable,
    Weapon,
    Armor,
    SkillBook(Skill),
}

#[derive(Debug, Clone, Copy)]
pub struct ShopItem {
    pub name: &'static str,
    pub cost: u32,
    pub description: &'static str,
    pub kind: ItemKind,
}

pub const SHOP_CATALOG: [ShopItem; 5] = [
    ShopItem {
        name: "Health Potion",
        cost: 50,
        description: "Restores health",
        kind: ItemKind::Consumable,
    },
    ShopItem {
        name: "Mana Potion",
        cost: 50,
        description: "Restores mana",
        kind: ItemKind::Consumable,
    },
    ShopItem {
        name: "Basic Sword",
        cost: 100,
        description: "+5 attack",
        kind: ItemKind::Weapon,
    },
    ShopItem {
        name: "Wooden Shield",
        cost: 80,
        description: "+3 defense",
        kind: ItemKind::Armor,
    },
    ShopItem {
        name: "Skill Book: Fireball",
        cost: 200,
        description: "Learn Fireball skill",
        kind: ItemKind::SkillBook(Skill::Fireball),
    },
];

pub fn find_shop_item(name: &str) -> Option<&'static ShopItem> {
    SHOP_CATALOG
        .iter()
        .find(|item| item.name.eq_ignore_ascii_case(name.trim()))
}

// ---------------------------------------------------------------------------
// Quests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct Quest {
    pub id: u32,
    pub name: &'static str,
    pub description: &'static str,
    pub reward_exp: u32,
    pub reward_gold: u32,
    pub reward_karma: i64,
}

pub const QUEST_BOARD: [Quest; 3] = [
    Quest {
        id: 1,
        name: "Herb Gathering",
        description: "Collect medicinal herbs",
        reward_exp: 100,
        reward_gold: 50,
        reward_karma: 0,
    },
    Quest {
        id: 2,
        name: "Monster Hunt",
        description: "Defeat 5 monsters",
        reward_exp: 200,
        reward_gold: 100,
        reward_karma: 10,
    },
    Quest {
        id: 3,
        name: "Lost Artifact",
        description: "Find the ancient artifact",
        reward_exp: 300,
        reward_gold: 150,
        reward_karma: 20,
    },
];

pub fn find_quest(id: u32) -> Option<&'static Quest> {
    QUEST_BOARD.iter().find(|q| q.id == id)
}
