//! DamageReducer - per-kind resistance rate tables
//!
//! Every rate can be evaluated four ways. `Random` rolls the dice and is what
//! combat uses; `Min`, `Average` and `Max` substitute fixed values for the die
//! so lore and tooltip code can show a damage range without touching the RNG.

use super::constants::RESIST_ALL_DIVISOR;
use super::{ResistanceProfile, Traits};
use crate::damage::DamageKind;
use crate::rng::Dice;
use serde::{Deserialize, Serialize};

/// How to evaluate the dice term of a rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateMode {
    Random,
    Average,
    /// Smallest possible damage (largest divisor)
    Min,
    /// Largest possible damage
    Max,
}

impl RateMode {
    pub fn all() -> &'static [RateMode] {
        &[RateMode::Random, RateMode::Average, RateMode::Min, RateMode::Max]
    }
}

/// How a damage kind's resistance scales incoming damage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReductionRule {
    /// Left alone here; the element damage functions apply their own rates
    Passthrough,
    /// No resistance reduces it
    Unresisted,
    /// `(d4 + 4) / 9` once for innate resistance or opposition, twice for both
    Compounding,
    /// `numer / (d4 + 7)` when resisted
    Banded { numer: i32 },
    /// Halved for good alignment, doubled for evil
    HolyFire,
    /// Doubled for good alignment
    HellFire,
}

/// A rational damage multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate {
    pub num: i32,
    pub den: i32,
}

impl Rate {
    pub fn new(num: i32, den: i32) -> Self {
        Rate { num, den: den.max(1) }
    }

    pub fn apply(self, amount: i32) -> i32 {
        (amount as i64 * self.num as i64 / self.den as i64) as i32
    }

    /// `numer / (d4 + 7)`
    pub fn banded(numer: i32, mode: RateMode, rng: &mut dyn Dice) -> Rate {
        match mode {
            RateMode::Random => Rate::new(numer, rng.randint1(4) + 7),
            RateMode::Min => Rate::new(numer, 11),
            // d4 averages 2.5
            RateMode::Average => Rate::new(numer * 2, 19),
            RateMode::Max => Rate::new(numer, 8),
        }
    }

    /// `(d4 + 4) / 9`
    pub fn compounding(mode: RateMode, rng: &mut dyn Dice) -> Rate {
        match mode {
            RateMode::Random => Rate::new(rng.randint1(4) + 4, 9),
            RateMode::Min => Rate::new(5, 9),
            RateMode::Average => Rate::new(13, 18),
            RateMode::Max => Rate::new(8, 9),
        }
    }
}

/// Resist-all: damage / 100, with a 1-in-3 chance of 1 instead of 0
pub fn resist_all_divide(damage: i32, mode: RateMode, rng: &mut dyn Dice) -> i32 {
    if damage <= 0 {
        return 0;
    }
    let reduced = damage / RESIST_ALL_DIVISOR;
    if reduced > 0 {
        return reduced;
    }
    match mode {
        RateMode::Random => i32::from(rng.one_in(3)),
        RateMode::Max => 1,
        RateMode::Min | RateMode::Average => 0,
    }
}

/// Final damage for one hit, rolling the dice
pub fn reduce(kind: DamageKind, raw: i32, profile: &ResistanceProfile, rng: &mut dyn Dice) -> i32 {
    reduce_with_mode(kind, raw, profile, RateMode::Random, rng)
}

/// Final damage for one hit in the given evaluation mode
///
/// Only `RateMode::Random` reads from `rng`.
pub fn reduce_with_mode(
    kind: DamageKind,
    raw: i32,
    profile: &ResistanceProfile,
    mode: RateMode,
    rng: &mut dyn Dice,
) -> i32 {
    if raw <= 0 {
        return 0;
    }
    let def = profile.defense(kind);
    if def.immune {
        return 0;
    }

    let mut dam = raw;
    if profile.has(Traits::RES_ALL) {
        dam = resist_all_divide(dam, mode, rng);
    }

    let rule = kind.policy().reduction;
    match rule {
        ReductionRule::Passthrough | ReductionRule::Unresisted => {}
        ReductionRule::Compounding => {
            if def.resistant || def.opposing {
                dam = Rate::compounding(mode, rng).apply(dam);
            }
            if def.resistant && def.opposing {
                dam = Rate::compounding(mode, rng).apply(dam);
            }
        }
        ReductionRule::Banded { numer } => {
            if def.resistant {
                dam = Rate::banded(numer, mode, rng).apply(dam);
            }
        }
        ReductionRule::HolyFire => {
            if profile.is_good() {
                dam /= 2;
            } else if profile.is_evil() {
                dam *= 2;
            }
        }
        ReductionRule::HellFire => {
            if profile.is_good() {
                dam *= 2;
            }
        }
    }

    if rule != ReductionRule::Passthrough && def.vulnerable {
        dam *= 2;
    }
    if kind == DamageKind::Lite && profile.wraith {
        dam *= 2;
    }
    dam
}

struct Unrolled;

impl Dice for Unrolled {
    fn randint0(&mut self, _n: i32) -> i32 {
        0
    }
}

/// Deterministic damage estimate for display; `Random` is read as `Average`
pub fn estimate(kind: DamageKind, raw: i32, profile: &ResistanceProfile, mode: RateMode) -> i32 {
    let mode = if mode == RateMode::Random {
        RateMode::Average
    } else {
        mode
    };
    reduce_with_mode(kind, raw, profile, mode, &mut Unrolled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defense::Opposing;
    use crate::rng::ScriptedDice;

    #[test]
    fn test_banded_rates() {
        let p = ResistanceProfile::neutral().with_traits(Traits::RES_NETHER);
        // d4 = 1 gives 6/8
        let mut rng = ScriptedDice::new([0]);
        assert_eq!(reduce(DamageKind::Nether, 80, &p, &mut rng), 60);
        assert_eq!(estimate(DamageKind::Nether, 88, &p, RateMode::Min), 48);
        assert_eq!(estimate(DamageKind::Nether, 80, &p, RateMode::Max), 60);
    }

    #[test]
    fn test_sound_uses_five() {
        let p = ResistanceProfile::neutral().with_traits(Traits::RES_SOUND);
        assert_eq!(estimate(DamageKind::Sound, 80, &p, RateMode::Max), 50);
        let neutral = ResistanceProfile::neutral();
        assert_eq!(estimate(DamageKind::Sound, 80, &neutral, RateMode::Max), 80);
    }

    #[test]
    fn test_compounding_poison() {
        let both = ResistanceProfile::neutral()
            .with_traits(Traits::RES_POIS)
            .with_opposing(Opposing::POIS);
        // d4 = 4 both times: 90 * 8/9 = 80, 80 * 8/9 = 71
        let mut rng = ScriptedDice::new([3, 3]);
        assert_eq!(reduce(DamageKind::Poison, 90, &both, &mut rng), 71);
        assert_eq!(rng.calls(), 2);

        let one = ResistanceProfile::neutral().with_opposing(Opposing::POIS);
        let mut rng = ScriptedDice::new([3, 3]);
        assert_eq!(reduce(DamageKind::Poison, 90, &one, &mut rng), 80);
        assert_eq!(rng.calls(), 1);
    }

    #[test]
    fn test_alignment_rates() {
        let good = ResistanceProfile::neutral().with_alignment(50);
        let evil = ResistanceProfile::neutral().with_alignment(-50);
        let plain = ResistanceProfile::neutral();
        assert_eq!(estimate(DamageKind::HolyFire, 40, &good, RateMode::Average), 20);
        assert_eq!(estimate(DamageKind::HolyFire, 40, &evil, RateMode::Average), 80);
        assert_eq!(estimate(DamageKind::HolyFire, 40, &plain, RateMode::Average), 40);
        assert_eq!(estimate(DamageKind::HellFire, 40, &good, RateMode::Average), 80);
        assert_eq!(estimate(DamageKind::HellFire, 40, &evil, RateMode::Average), 40);
    }

    #[test]
    fn test_elements_pass_through() {
        let p = ResistanceProfile::neutral().with_traits(Traits::RES_FIRE | Traits::VULN_FIRE);
        assert_eq!(estimate(DamageKind::Fire, 30, &p, RateMode::Min), 30);
        let im = ResistanceProfile::neutral().with_traits(Traits::IM_FIRE);
        assert_eq!(estimate(DamageKind::Fire, 30, &im, RateMode::Max), 0);
    }

    #[test]
    fn test_light_vulnerability_stacks() {
        let mut p = ResistanceProfile::neutral().with_traits(Traits::VULN_LITE);
        assert_eq!(estimate(DamageKind::Lite, 10, &p, RateMode::Average), 20);
        p.wraith = true;
        assert_eq!(estimate(DamageKind::Lite, 10, &p, RateMode::Average), 40);
    }

    #[test]
    fn test_resist_all() {
        let p = ResistanceProfile::neutral().with_traits(Traits::RES_ALL);
        assert_eq!(estimate(DamageKind::Missile, 450, &p, RateMode::Average), 4);
        assert_eq!(estimate(DamageKind::Missile, 50, &p, RateMode::Min), 0);
        assert_eq!(estimate(DamageKind::Missile, 50, &p, RateMode::Max), 1);
        let mut rng = ScriptedDice::new([0]);
        assert_eq!(reduce(DamageKind::Missile, 50, &p, &mut rng), 1);
        let mut rng = ScriptedDice::new([1]);
        assert_eq!(reduce(DamageKind::Missile, 50, &p, &mut rng), 0);
    }

    #[test]
    fn test_non_positive_raw() {
        let mut rng = ScriptedDice::constant(0);
        assert_eq!(reduce(DamageKind::Mana, -5, &ResistanceProfile::neutral(), &mut rng), 0);
        assert_eq!(rng.calls(), 0);
    }
}
