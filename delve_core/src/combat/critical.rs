//! Critical hits from monster blows

use crate::rng::Dice;

/// Severity of a monster critical, 0 for none
///
/// Only blows rolling near their maximum can crit; big hits climb the scale.
pub fn monster_critical(dice: i32, sides: i32, damage: i32, rng: &mut dyn Dice) -> i32 {
    let total = dice * sides;
    if damage < total * 19 / 20 {
        return 0;
    }
    if damage < 20 && rng.randint0(100) >= damage {
        return 0;
    }

    let mut bonus = 0;
    if damage >= total && damage >= 40 {
        bonus += 1;
    }
    if damage >= 20 {
        while rng.randint0(100) < 2 {
            bonus += 1;
        }
    }

    let base = match damage {
        d if d > 45 => 6,
        d if d > 33 => 5,
        d if d > 25 => 4,
        d if d > 18 => 3,
        d if d > 11 => 2,
        _ => 1,
    };
    base + bonus
}

/// Cut magnitude for a critical of `severity`
pub fn critical_cut(severity: i32, rng: &mut dyn Dice) -> i32 {
    match severity {
        s if s <= 0 => 0,
        1 => rng.randint1(5),
        2 => rng.randint1(5) + 5,
        3 => rng.randint1(20) + 20,
        4 => rng.randint1(50) + 50,
        5 => rng.randint1(100) + 100,
        6 => 300,
        _ => 500,
    }
}

/// Stun magnitude for a critical of `severity`
pub fn critical_stun(severity: i32, rng: &mut dyn Dice) -> i32 {
    match severity {
        s if s <= 0 => 0,
        1 => rng.randint1(5),
        2 => rng.randint1(5) + 10,
        3 => rng.randint1(10) + 20,
        4 => rng.randint1(15) + 30,
        5 => rng.randint1(20) + 40,
        6 => 80,
        _ => 150,
    }
}
