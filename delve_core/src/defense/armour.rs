//! Armour class - to-hit rolls and physical mitigation

use super::constants::{AC_CAP, AC_DIVISOR};
use crate::rng::Dice;

/// Reduce a physical blow by armour: `dam - dam * min(ac, 150) / 250`
pub fn mitigate_by_ac(damage: i32, ac: i32) -> i32 {
    let ac = ac.clamp(0, AC_CAP);
    damage - damage * ac / AC_DIVISOR
}

/// Does a monster blow connect?
///
/// 5% of blows always hit and 5% always miss; a stunned monster misses half
/// its blows outright. Otherwise `randint1(power + 3 * level)` must beat
/// three quarters of the player's AC.
pub fn check_hit(power: i32, level: i32, ac: i32, stunned: bool, rng: &mut dyn Dice) -> bool {
    let k = rng.randint0(100);
    if stunned && rng.one_in(2) {
        return false;
    }
    if k < 10 {
        return k < 5;
    }
    let chance = power + level * 3;
    chance > 0 && rng.randint1(chance) > ac * 3 / 4
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedDice;

    #[test]
    fn test_ac_mitigation() {
        assert_eq!(mitigate_by_ac(100, 0), 100);
        assert_eq!(mitigate_by_ac(100, 50), 80);
        // capped at 150
        assert_eq!(mitigate_by_ac(100, 150), 40);
        assert_eq!(mitigate_by_ac(100, 400), 40);
    }

    #[test]
    fn test_auto_hit_and_miss_band() {
        let mut rng = ScriptedDice::new([3]);
        assert!(check_hit(0, 0, 500, false, &mut rng));
        let mut rng = ScriptedDice::new([7]);
        assert!(!check_hit(1000, 50, 0, false, &mut rng));
    }

    #[test]
    fn test_power_against_ac() {
        // k = 50, then randint1(60) rolls 60 against 100 * 3 / 4 = 75
        let mut rng = ScriptedDice::new([50, 59]);
        assert!(!check_hit(60, 0, 100, false, &mut rng));
        let mut rng = ScriptedDice::new([50, 59]);
        assert!(check_hit(60, 0, 40, false, &mut rng));
    }

    #[test]
    fn test_stunned_monster_fumbles() {
        let mut rng = ScriptedDice::new([3, 0]);
        assert!(!check_hit(60, 10, 0, true, &mut rng));
    }
}
