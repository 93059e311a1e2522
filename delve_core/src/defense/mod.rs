//! Defense system - Traits, Resistances, Damage rates, Armour

mod armour;
mod rate;
mod resistance;
mod traits;

pub use armour::{check_hit, mitigate_by_ac};
pub use rate::{
    estimate, reduce, reduce_with_mode, resist_all_divide, Rate, RateMode, ReductionRule,
};
pub use resistance::{KindDefense, Opposing, Resistance, ResistanceProfile};
pub use traits::Traits;

use crate::ctx::Ctx;
use crate::player::HitKind;
use serde::{Deserialize, Serialize};

/// Defense calculation constants
pub mod constants {
    /// AC above this stops helping against physical blows
    pub const AC_CAP: i32 = 150;

    /// Divisor of the AC mitigation formula
    pub const AC_DIVISOR: i32 = 250;

    /// Resist-all divides incoming damage by this
    pub const RESIST_ALL_DIVISOR: i32 = 100;
}

/// How an attack fared against the invulnerability shield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvulnGate {
    Blocked,
    /// Lucky hit slipped through
    Penetrated,
    /// Force sources always open the shield
    CutOpen,
}

/// Decide whether a hit gets past an active invulnerability shield
pub fn invulnerability_gate(kind: HitKind, ctx: &mut Ctx<'_>) -> InvulnGate {
    if kind == HitKind::Force {
        InvulnGate::CutOpen
    } else if ctx.rng.one_in(ctx.constants.invulnerability_penetration) {
        InvulnGate::Penetrated
    } else {
        InvulnGate::Blocked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CombatConstants;
    use crate::rng::ScriptedDice;
    use crate::sink::NullSink;

    #[test]
    fn test_force_always_cuts_open() {
        let mut dice = ScriptedDice::constant(5);
        let mut sink = NullSink;
        let constants = CombatConstants::default();
        let mut ctx = Ctx::new(&mut dice, &mut sink, &constants);
        assert_eq!(invulnerability_gate(HitKind::Force, &mut ctx), InvulnGate::CutOpen);
        assert_eq!(invulnerability_gate(HitKind::Attack, &mut ctx), InvulnGate::Blocked);
    }

    #[test]
    fn test_lucky_penetration() {
        let mut dice = ScriptedDice::new([0]);
        let mut sink = NullSink;
        let constants = CombatConstants::default();
        let mut ctx = Ctx::new(&mut dice, &mut sink, &constants);
        assert_eq!(invulnerability_gate(HitKind::Attack, &mut ctx), InvulnGate::Penetrated);
    }
}
