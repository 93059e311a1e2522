//! Per-turn status processing

use super::kind::{Decay, StatusKind};
use super::tier::cut_bleed;
use crate::config::CombatConstants;
use crate::ctx::Ctx;
use crate::player::{adj_con_fix, HitKind, Player};
use crate::types::Stat;
use serde::{Deserialize, Serialize};

/// How fast statuses wear off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecayPolicy {
    /// Decrement for the quick-decay statuses
    pub quick: i32,
}

impl Default for DecayPolicy {
    fn default() -> Self {
        DecayPolicy { quick: 1 }
    }
}

impl DecayPolicy {
    pub fn from_constants(constants: &CombatConstants) -> Self {
        DecayPolicy {
            quick: constants.quick_decay(),
        }
    }
}

/// What one status tick did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    /// HP lost to poison and bleeding
    pub damage: i32,
    /// Statuses that ran out this tick
    pub expired: Vec<StatusKind>,
}

impl Player {
    /// Wear every active status down by one tick
    pub fn tick_all(&mut self, policy: DecayPolicy, ctx: &mut Ctx<'_>) -> Vec<StatusKind> {
        let active: Vec<(StatusKind, i32)> = self.status.active().collect();
        let recover = adj_con_fix(self.stats.cur(Stat::Con)) + 1;
        let mut expired = Vec::new();

        for (kind, left) in active {
            let dec = match kind.spec().decay {
                Decay::Flat => 1,
                Decay::Quick => policy.quick,
                Decay::Constitution => {
                    // Mortal wounds never close on their own.
                    if kind == StatusKind::Cut && self.status.cut_tier() >= 7 {
                        0
                    } else {
                        recover
                    }
                }
            };
            if dec == 0 {
                continue;
            }
            self.set_timed(kind, left - dec, ctx);
            if !self.status.is_active(kind) {
                expired.push(kind);
            }
        }
        expired
    }
}

/// Advance one game turn of status processing: poison and bleeding damage,
/// then decay of every timed status.
pub fn tick_statuses(player: &mut Player, ctx: &mut Ctx<'_>) -> TickReport {
    let mut report = TickReport::default();
    if player.is_dead {
        return report;
    }

    if !player.is_active(StatusKind::Invulnerable) {
        if player.is_active(StatusKind::Poisoned) {
            report.damage += player.take_hit(HitKind::NoEscape, 1, "poison", ctx);
        }
        let bleed = cut_bleed(player.status().cut_tier());
        if bleed > 0 {
            report.damage += player.take_hit(HitKind::NoEscape, bleed, "a fatal wound", ctx);
        }
    }

    report.expired = player.tick_all(DecayPolicy::from_constants(ctx.constants), ctx);
    player.game_turn += 1;
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedDice;
    use crate::sink::RecordingSink;
    use crate::player::Stats;

    #[test]
    fn test_flat_and_quick_decay() {
        let mut dice = ScriptedDice::constant(999);
        let mut sink = RecordingSink::new();
        let constants = CombatConstants {
            easy_mode: true,
            ..CombatConstants::default()
        };
        let mut ctx = Ctx::new(&mut dice, &mut sink, &constants);
        let mut p = Player::default();
        p.set_blind(5, &mut ctx);
        p.set_timed(StatusKind::Hasted, 5, &mut ctx);

        tick_statuses(&mut p, &mut ctx);
        assert_eq!(p.remaining(StatusKind::Blind), 3);
        assert_eq!(p.remaining(StatusKind::Hasted), 4);
        assert_eq!(p.game_turn, 1);
    }

    #[test]
    fn test_poison_hurts_and_recovers_by_con() {
        let mut dice = ScriptedDice::constant(999);
        let mut sink = RecordingSink::new();
        let constants = CombatConstants::default();
        let mut ctx = Ctx::new(&mut dice, &mut sink, &constants);
        // CON 18 gives adj_con_fix 3, so poison drops by 4 a turn
        let mut p = Player::default().with_stats(Stats::uniform(18));
        p.set_poisoned(6, &mut ctx);

        let r = tick_statuses(&mut p, &mut ctx);
        assert_eq!(r.damage, 1);
        assert_eq!(p.chp, 99);
        assert_eq!(p.remaining(StatusKind::Poisoned), 2);

        let r = tick_statuses(&mut p, &mut ctx);
        assert_eq!(r.expired, vec![StatusKind::Poisoned]);
        drop(ctx);
        assert!(sink.saw("You are no longer poisoned."));
    }

    #[test]
    fn test_mortal_wound_does_not_heal() {
        let mut dice = ScriptedDice::constant(999);
        let mut sink = RecordingSink::new();
        let constants = CombatConstants::default();
        let mut ctx = Ctx::new(&mut dice, &mut sink, &constants);
        let mut p = Player::default().with_hp(1000);
        p.set_cut(1500, &mut ctx);

        let r = tick_statuses(&mut p, &mut ctx);
        assert_eq!(r.damage, 200);
        assert_eq!(p.remaining(StatusKind::Cut), 1500);
    }

    #[test]
    fn test_invulnerable_skips_bleeding() {
        let mut dice = ScriptedDice::constant(999);
        let mut sink = RecordingSink::new();
        let constants = CombatConstants::default();
        let mut ctx = Ctx::new(&mut dice, &mut sink, &constants);
        let mut p = Player::default();
        p.set_cut(30, &mut ctx);
        p.set_poisoned(10, &mut ctx);
        p.set_timed(StatusKind::Invulnerable, 5, &mut ctx);

        let r = tick_statuses(&mut p, &mut ctx);
        assert_eq!(r.damage, 0);
        assert_eq!(p.chp, 100);
    }
}
