//! Experience, level-ups and rank advancement.

use log::info;

use crate::game::rules::Rank;
use crate::game::types::Player;

/// Experience needed to advance from `level` to the next level.
pub fn experience_for_next_level(level: u32) -> u64 {
    level as u64 * 100
}

/// Rank a character at `level` is entitled to: one rung per ten levels,
/// capped at the top of the ladder.
pub fn rank_for_level(level: u32) -> Rank {
    Rank::from_index((level / Rank::LEVELS_PER_RANK) as usize)
}

/// Apply every level-up the player's experience pays for.
///
/// Subtracts each threshold from the experience pool, recomputes rank after
/// each step (rank never drops) and returns whether at least one level was
/// gained. Calling it again without new experience changes nothing.
pub fn check_level_up(player: &mut Player) -> bool {
    let mut leveled = false;
    loop {
        let required = experience_for_next_level(player.level);
        if player.experience < required {
            break;
        }
        player.experience -= required;
        player.level += 1;
        leveled = true;

        let earned = rank_for_level(player.level);
        if earned > player.rank {
            info!(
                "{} advanced to rank {} at level {}",
                player.username,
                earned.name(),
                player.level
            );
            player.rank = earned;
        }
    }
    if leveled {
        info!("{} reached level {}", player.username, player.level);
    }
    leveled
}

/// Add experience and run the level-up check in one step.
pub fn grant_experience(player: &mut Player, amount: u64) -> bool {
    player.experience = player.experience.saturating_add(amount);
    check_level_up(player)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::rules::{Class, Element, Race};

    fn player() -> Player {
        Player::new("tester", Race::Human, Class::Warrior, Element::Fire)
    }

    #[test]
    fn no_level_up_below_threshold() {
        let mut p = player();
        p.experience = 99;
        assert!(!check_level_up(&mut p));
        assert_eq!(p.level, 1);
        assert_eq!(p.experience, 99);
    }

    #[test]
    fn exact_threshold_levels_once() {
        let mut p = player();
        p.experience = 100;
        assert!(check_level_up(&mut p));
        assert_eq!(p.level, 2);
        assert_eq!(p.experience, 0);
        assert!(!check_level_up(&mut p));
    }

    #[test]
    fn multiple_levels_in_one_call() {
        let mut p = player();
        // 100 (1->2) + 200 (2->3) + 300 (3->4) = 600, 50 left over
        p.experience = 650;
        assert!(check_level_up(&mut p));
        assert_eq!(p.level, 4);
        assert_eq!(p.experience, 50);
    }

    #[test]
    fn rank_follows_every_ten_levels() {
        let mut p = player();
        p.level = 9;
        p.experience = experience_for_next_level(9);
        assert!(check_level_up(&mut p));
        assert_eq!(p.level, 10);
        assert_eq!(p.rank, Rank::F);
    }

    #[test]
    fn rank_is_capped_and_never_decreases() {
        assert_eq!(rank_for_level(1), Rank::G);
        assert_eq!(rank_for_level(79), Rank::S);
        assert_eq!(rank_for_level(500), Rank::SS);

        let mut p = player();
        p.rank = Rank::C;
        p.experience = 100;
        check_level_up(&mut p);
        assert_eq!(p.rank, Rank::C);
    }
}
