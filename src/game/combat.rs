//! Duel damage calculation.
//!
//! Pipeline, applied in order:
//! 1. Base: `5 + 2 * strength` for physical skills, `5 + 2 * intelligence` otherwise
//! 2. Racial melee bonus (basic melee skill only)
//! 3. Class melee bonus for the basic melee skill, else class magic power for magic skills
//! 4. Elemental advantage over the defender: x1.10
//! 5. Zone damage modifier for the attacker's element
//! 6. Variance drawn uniformly from `[0.9, 1.1]`
//! 7. Rounded to the nearest integer (ties to even), never negative

use crate::game::rng::GameRng;
use crate::game::rules::{Skill, Stat, Zone};
use crate::game::types::Player;

pub const BASE_DAMAGE: f64 = 5.0;
pub const ATTRIBUTE_SCALING: f64 = 2.0;
pub const ELEMENT_ADVANTAGE_MULTIPLIER: f64 = 1.10;
pub const VARIANCE_MIN: f64 = 0.9;
pub const VARIANCE_MAX: f64 = 1.1;

/// Damage before variance and rounding. Pure; exposed for inspection and tests.
pub fn raw_damage(attacker: &Player, defender: &Player, skill: Skill, zone: Zone) -> f64 {
    let attribute = if skill.is_physical() {
        attacker.attributes.strength
    } else {
        attacker.attributes.intelligence
    };
    let mut damage = BASE_DAMAGE + ATTRIBUTE_SCALING * attribute as f64;

    if skill == Skill::BASIC_MELEE {
        if let Some(bonus) = attacker.race.modifier(Stat::MeleeDamage) {
            damage *= 1.0 + bonus;
        }
    }

    // only the first matching class bonus applies
    let class_melee = attacker
        .class
        .modifier(Stat::MeleeDamage)
        .filter(|_| skill == Skill::BASIC_MELEE);
    let class_magic = attacker
        .class
        .modifier(Stat::MagicPower)
        .filter(|_| skill.is_magic());
    if let Some(bonus) = class_melee.or(class_magic) {
        damage *= 1.0 + bonus;
    }

    if attacker.element.beats(defender.element) {
        damage *= ELEMENT_ADVANTAGE_MULTIPLIER;
    }

    if let Some(bonus) = zone.modifier(attacker.element, Stat::Damage) {
        damage *= 1.0 + bonus;
    }

    damage.max(0.0)
}

/// Final integer damage for one attack. Only the variance draw touches `rng`.
pub fn calculate_damage(
    attacker: &Player,
    defender: &Player,
    skill: Skill,
    zone: Zone,
    rng: &mut dyn GameRng,
) -> u32 {
    let variance = rng.uniform(VARIANCE_MIN, VARIANCE_MAX);
    let damage = raw_damage(attacker, defender, skill, zone) * variance;
    damage.round_ties_even().max(0.0) as u32
}
