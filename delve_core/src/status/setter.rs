//! Status setters - the only way statuses change
//!
//! Every setter clamps to [0, MAX_DURATION], fires onset / recovery notices
//! only on the zero crossing, and is a no-op on a dead player. The return
//! value is whether anything observable happened.

use super::kind::StatusKind;
use super::store::clamp_duration;
use super::tier::{cut_message, cut_tier, stun_message, stun_tier};
use crate::avatar::Virtue;
use crate::ctx::Ctx;
use crate::player::{Action, Player, Stance};
use crate::sink::Dirty;
use crate::types::Stat;

impl Player {
    pub fn remaining(&self, kind: StatusKind) -> i32 {
        self.status.remaining(kind)
    }

    pub fn is_active(&self, kind: StatusKind) -> bool {
        self.status.is_active(kind)
    }

    /// Set a status to an absolute duration
    pub fn set_timed(&mut self, kind: StatusKind, v: i32, ctx: &mut Ctx<'_>) -> bool {
        if self.is_dead {
            return false;
        }
        match kind {
            StatusKind::Stunned => return self.set_stun(v, ctx),
            StatusKind::Cut => return self.set_cut(v, ctx),
            _ => {}
        }

        let v = clamp_duration(v);
        let old = self.status.remaining(kind);
        let spec = kind.spec();
        let mut notice = false;

        if v > 0 && old == 0 {
            ctx.msg("status", spec.onset);
            tracing::debug!(status = spec.key, duration = v, "status onset");
            self.on_onset(kind, ctx);
            notice = true;
        } else if v == 0 && old > 0 {
            ctx.msg("status", spec.recovery);
            tracing::debug!(status = spec.key, "status recovered");
            notice = true;
        }

        self.status.put(kind, v);

        if !notice {
            return false;
        }
        ctx.sink.disturb();
        ctx.dirty(spec.dirty);
        true
    }

    /// Shift a status by `delta` (negative deltas stop at zero)
    pub fn mod_timed(&mut self, kind: StatusKind, delta: i32, ctx: &mut Ctx<'_>) -> bool {
        let next = self.status.remaining(kind).saturating_add(delta);
        self.set_timed(kind, next, ctx)
    }

    /// Set a buff without ever shortening one that is already longer
    pub fn extend_timed(&mut self, kind: StatusKind, v: i32, ctx: &mut Ctx<'_>) -> bool {
        if self.is_dead {
            return false;
        }
        if self.status.remaining(kind) > v {
            return false;
        }
        self.set_timed(kind, v, ctx)
    }

    /// Set a tiered status (Stun or Cut) by magnitude. Other kinds fall back
    /// to a plain duration set.
    pub fn set_tiered(&mut self, kind: StatusKind, magnitude: i32, ctx: &mut Ctx<'_>) -> bool {
        match kind {
            StatusKind::Stunned => self.set_stun(magnitude, ctx),
            StatusKind::Cut => self.set_cut(magnitude, ctx),
            _ => self.set_timed(kind, magnitude, ctx),
        }
    }

    pub fn set_stun(&mut self, v: i32, ctx: &mut Ctx<'_>) -> bool {
        if self.is_dead {
            return false;
        }
        let mut v = clamp_duration(v);
        if self.is_stun_immune() {
            v = 0;
        }
        let old_tier = stun_tier(self.status.remaining(StatusKind::Stunned));
        let new_tier = stun_tier(v);
        let mut notice = false;

        if new_tier > old_tier {
            ctx.msg("stun", stun_message(new_tier));
            tracing::debug!(from = old_tier, to = new_tier, "stun tier up");
            if heavy_blow(v, ctx) {
                ctx.msg("stun", "A vicious blow hits your head.");
                if ctx.rng.one_in(3) {
                    self.drain_stat_permanently(Stat::Int, ctx);
                    self.drain_stat_permanently(Stat::Wis, ctx);
                } else if ctx.rng.one_in(2) {
                    self.drain_stat_permanently(Stat::Int, ctx);
                } else {
                    self.drain_stat_permanently(Stat::Wis, ctx);
                }
            }
            self.break_stance(ctx);
            self.reset_concentration(ctx);
            self.stop_singing(ctx);
            notice = true;
        } else if new_tier < old_tier {
            if new_tier == 0 {
                ctx.msg("stun", "You are no longer stunned.");
            }
            tracing::debug!(from = old_tier, to = new_tier, "stun tier down");
            notice = true;
        }

        self.status.put(StatusKind::Stunned, v);

        if !notice {
            return false;
        }
        ctx.sink.disturb();
        ctx.dirty(Dirty::BONUS | Dirty::STATUS);
        true
    }

    pub fn mod_stun(&mut self, delta: i32, ctx: &mut Ctx<'_>) -> bool {
        let next = self.status.remaining(StatusKind::Stunned).saturating_add(delta);
        self.set_stun(next, ctx)
    }

    pub fn set_cut(&mut self, v: i32, ctx: &mut Ctx<'_>) -> bool {
        if self.is_dead {
            return false;
        }
        let mut v = clamp_duration(v);
        if self.is_cut_immune() {
            v = 0;
        }
        let old_tier = cut_tier(self.status.remaining(StatusKind::Cut));
        let new_tier = cut_tier(v);
        let mut notice = false;

        if new_tier > old_tier {
            ctx.msg("cut", cut_message(new_tier));
            tracing::debug!(from = old_tier, to = new_tier, "cut tier up");
            if heavy_blow(v, ctx) && !self.is_sustained(Stat::Chr) {
                ctx.msg("cut", "You have been horribly scarred.");
                self.drain_stat_permanently(Stat::Chr, ctx);
            }
            notice = true;
        } else if new_tier < old_tier {
            if new_tier == 0 {
                ctx.msg("cut", "You are no longer bleeding.");
            }
            tracing::debug!(from = old_tier, to = new_tier, "cut tier down");
            notice = true;
        }

        self.status.put(StatusKind::Cut, v);

        if !notice {
            return false;
        }
        ctx.sink.disturb();
        ctx.dirty(Dirty::BONUS | Dirty::STATUS);
        true
    }

    pub fn mod_cut(&mut self, delta: i32, ctx: &mut Ctx<'_>) -> bool {
        let next = self.status.remaining(StatusKind::Cut).saturating_add(delta);
        self.set_cut(next, ctx)
    }

    pub fn set_blind(&mut self, v: i32, ctx: &mut Ctx<'_>) -> bool {
        self.set_timed(StatusKind::Blind, v, ctx)
    }

    pub fn mod_blind(&mut self, delta: i32, ctx: &mut Ctx<'_>) -> bool {
        self.mod_timed(StatusKind::Blind, delta, ctx)
    }

    pub fn set_confused(&mut self, v: i32, ctx: &mut Ctx<'_>) -> bool {
        self.set_timed(StatusKind::Confused, v, ctx)
    }

    pub fn mod_confused(&mut self, delta: i32, ctx: &mut Ctx<'_>) -> bool {
        self.mod_timed(StatusKind::Confused, delta, ctx)
    }

    pub fn set_poisoned(&mut self, v: i32, ctx: &mut Ctx<'_>) -> bool {
        self.set_timed(StatusKind::Poisoned, v, ctx)
    }

    pub fn mod_poison(&mut self, delta: i32, ctx: &mut Ctx<'_>) -> bool {
        self.mod_timed(StatusKind::Poisoned, delta, ctx)
    }

    pub fn set_afraid(&mut self, v: i32, ctx: &mut Ctx<'_>) -> bool {
        self.set_timed(StatusKind::Afraid, v, ctx)
    }

    pub fn mod_afraid(&mut self, delta: i32, ctx: &mut Ctx<'_>) -> bool {
        self.mod_timed(StatusKind::Afraid, delta, ctx)
    }

    pub fn set_paralyzed(&mut self, v: i32, ctx: &mut Ctx<'_>) -> bool {
        self.set_timed(StatusKind::Paralyzed, v, ctx)
    }

    pub fn mod_paralyzed(&mut self, delta: i32, ctx: &mut Ctx<'_>) -> bool {
        self.mod_timed(StatusKind::Paralyzed, delta, ctx)
    }

    pub fn mod_hallucination(&mut self, delta: i32, ctx: &mut Ctx<'_>) -> bool {
        self.mod_timed(StatusKind::Hallucinating, delta, ctx)
    }

    pub fn mod_slow(&mut self, delta: i32, ctx: &mut Ctx<'_>) -> bool {
        self.mod_timed(StatusKind::Slowed, delta, ctx)
    }

    pub fn mod_fast(&mut self, delta: i32, ctx: &mut Ctx<'_>) -> bool {
        self.mod_timed(StatusKind::Hasted, delta, ctx)
    }

    /// Cure a status outright; returns whether it was active
    pub fn cure(&mut self, kind: StatusKind, ctx: &mut Ctx<'_>) -> bool {
        self.set_timed(kind, 0, ctx)
    }

    fn on_onset(&mut self, kind: StatusKind, ctx: &mut Ctx<'_>) {
        match kind {
            StatusKind::Confused => {
                if self.channel.action == Action::Learning {
                    ctx.msg("status", "You cannot continue learning new spells.");
                    self.channel.action = Action::None;
                }
                self.break_stance(ctx);
                self.reset_concentration(ctx);
                self.stop_singing(ctx);
                self.channel.aiming = false;
                self.chg_virtue(Virtue::Harmony, -1, ctx);
            }
            StatusKind::Afraid => {
                if matches!(self.channel.stance, Stance::Kata(_)) {
                    self.break_stance(ctx);
                }
                self.chg_virtue(Virtue::Valour, -1, ctx);
            }
            StatusKind::Paralyzed => {
                self.reset_concentration(ctx);
                self.stop_singing(ctx);
                self.channel.action = Action::None;
            }
            StatusKind::Hallucinating => {
                self.reset_concentration(ctx);
                self.chg_virtue(Virtue::Enlightenment, -1, ctx);
            }
            StatusKind::Blind => {
                self.chg_virtue(Virtue::Enlightenment, -1, ctx);
            }
            StatusKind::Hasted => {
                self.chg_virtue(Virtue::Patience, -1, ctx);
                self.chg_virtue(Virtue::Diligence, 1, ctx);
            }
            StatusKind::Invulnerable => {
                self.chg_virtue(Virtue::Unlife, -2, ctx);
                self.chg_virtue(Virtue::Honour, -2, ctx);
                self.chg_virtue(Virtue::Sacrifice, -3, ctx);
                self.chg_virtue(Virtue::Valour, -5, ctx);
            }
            StatusKind::WraithForm => {
                self.chg_virtue(Virtue::Unlife, 3, ctx);
                self.chg_virtue(Virtue::Honour, -2, ctx);
                self.chg_virtue(Virtue::Sacrifice, -2, ctx);
                self.chg_virtue(Virtue::Valour, -5, ctx);
            }
            _ => {}
        }
    }

    fn break_stance(&mut self, ctx: &mut Ctx<'_>) {
        if self.channel.stance != Stance::None {
            ctx.msg("status", "Your posture gets loose.");
            self.channel.stance = Stance::None;
            ctx.dirty(Dirty::STANCE | Dirty::BONUS);
        }
    }

    fn reset_concentration(&mut self, ctx: &mut Ctx<'_>) {
        if self.channel.concentration > 0 {
            ctx.msg("status", "You stop concentrating.");
            self.channel.concentration = 0;
            ctx.dirty(Dirty::BONUS);
        }
    }

    fn stop_singing(&mut self, ctx: &mut Ctx<'_>) {
        if self.channel.singing {
            ctx.msg("status", "Your singing is interrupted.");
            self.channel.singing = false;
            ctx.dirty(Dirty::STATUS);
        }
    }
}

/// Tier increases roll for a lasting injury
fn heavy_blow(v: i32, ctx: &mut Ctx<'_>) -> bool {
    ctx.rng.randint1(1000) < v || ctx.rng.one_in(16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CombatConstants;
    use crate::player::{Class, Race};
    use crate::rng::ScriptedDice;
    use crate::sink::RecordingSink;

    // Every one_in(N) fails and randint1(1000) rolls 1000
    fn quiet_dice() -> ScriptedDice {
        ScriptedDice::constant(999)
    }

    #[test]
    fn test_onset_fires_once() {
        let mut dice = quiet_dice();
        let mut sink = RecordingSink::new();
        let constants = CombatConstants::default();
        let mut ctx = Ctx::new(&mut dice, &mut sink, &constants);
        let mut p = Player::default();

        assert!(p.set_confused(5, &mut ctx));
        assert!(!p.set_confused(3, &mut ctx));
        assert_eq!(p.remaining(StatusKind::Confused), 3);
        assert!(p.set_confused(0, &mut ctx));
        assert!(!p.set_confused(0, &mut ctx));
        drop(ctx);
        assert_eq!(sink.count("status"), 2);
        assert!(sink.saw("You are confused!"));
        assert!(sink.saw("You feel less confused now."));
    }

    #[test]
    fn test_negative_delta_stops_at_zero() {
        let mut dice = quiet_dice();
        let mut sink = RecordingSink::new();
        let constants = CombatConstants::default();
        let mut ctx = Ctx::new(&mut dice, &mut sink, &constants);
        let mut p = Player::default();
        p.set_blind(4, &mut ctx);
        assert!(p.mod_blind(-100, &mut ctx));
        assert_eq!(p.remaining(StatusKind::Blind), 0);
    }

    #[test]
    fn test_confusion_interrupts_channel() {
        let mut dice = quiet_dice();
        let mut sink = RecordingSink::new();
        let constants = CombatConstants::default();
        let mut ctx = Ctx::new(&mut dice, &mut sink, &constants);
        let mut p = Player::new(Race::Human, Class::Monk);
        p.channel.action = Action::Learning;
        p.channel.stance = Stance::Kamae(1);
        p.channel.concentration = 3;
        p.channel.singing = true;
        p.channel.aiming = true;

        p.set_confused(10, &mut ctx);
        assert!(p.channel.is_idle());
        drop(ctx);
        assert!(sink.saw("Your posture gets loose."));
    }

    #[test]
    fn test_dead_player_is_frozen() {
        let mut dice = quiet_dice();
        let mut sink = RecordingSink::new();
        let constants = CombatConstants::default();
        let mut ctx = Ctx::new(&mut dice, &mut sink, &constants);
        let mut p = Player::default();
        p.is_dead = true;
        assert!(!p.set_blind(10, &mut ctx));
        assert!(!p.set_stun(60, &mut ctx));
        assert!(!p.set_cut(60, &mut ctx));
        assert!(!p.extend_timed(StatusKind::Hasted, 10, &mut ctx));
        assert!(p.status().is_empty());
    }

    #[test]
    fn test_extend_never_shortens() {
        let mut dice = quiet_dice();
        let mut sink = RecordingSink::new();
        let constants = CombatConstants::default();
        let mut ctx = Ctx::new(&mut dice, &mut sink, &constants);
        let mut p = Player::default();
        p.set_timed(StatusKind::Hasted, 20, &mut ctx);
        assert!(!p.extend_timed(StatusKind::Hasted, 10, &mut ctx));
        assert_eq!(p.remaining(StatusKind::Hasted), 20);
        p.extend_timed(StatusKind::Hasted, 30, &mut ctx);
        assert_eq!(p.remaining(StatusKind::Hasted), 30);
    }

    #[test]
    fn test_stun_tier_messages() {
        let mut dice = quiet_dice();
        let mut sink = RecordingSink::new();
        let constants = CombatConstants::default();
        let mut ctx = Ctx::new(&mut dice, &mut sink, &constants);
        let mut p = Player::default();
        assert!(p.set_stun(10, &mut ctx));
        assert!(!p.set_stun(20, &mut ctx));
        assert!(p.set_stun(60, &mut ctx));
        assert!(p.set_stun(20, &mut ctx));
        assert!(p.set_stun(0, &mut ctx));
        drop(ctx);
        assert_eq!(sink.count("stun"), 3);
        assert!(sink.saw("You have been heavily stunned."));
        assert!(sink.saw("You are no longer stunned."));
    }

    #[test]
    fn test_vicious_blow_drains_permanently() {
        // randint1(1000) = 1 < 60, then one_in(3) succeeds: INT and WIS
        let mut dice = ScriptedDice::new([0, 0]).with_fallback(5);
        let mut sink = RecordingSink::new();
        let constants = CombatConstants::default();
        let mut ctx = Ctx::new(&mut dice, &mut sink, &constants);
        let mut p = Player::default();
        p.set_stun(60, &mut ctx);
        assert_eq!(p.stats.cur(Stat::Int), 14);
        assert_eq!(p.stats.max(Stat::Int), 14);
        assert_eq!(p.stats.cur(Stat::Wis), 14);
        drop(ctx);
        assert!(sink.saw("A vicious blow hits your head."));
    }

    #[test]
    fn test_scar_respects_sustain() {
        let mut dice = ScriptedDice::new([0]).with_fallback(5);
        let mut sink = RecordingSink::new();
        let constants = CombatConstants::default();
        let mut ctx = Ctx::new(&mut dice, &mut sink, &constants);
        let mut p = Player::default().with_innate(crate::defense::Traits::SUST_CHR);
        p.set_cut(300, &mut ctx);
        assert_eq!(p.stats.cur(Stat::Chr), 15);
        drop(ctx);
        assert!(!sink.saw("scarred"));
        assert!(sink.saw("deep gash"));
    }

    #[test]
    fn test_golem_ignores_stun() {
        let mut dice = quiet_dice();
        let mut sink = RecordingSink::new();
        let constants = CombatConstants::default();
        let mut ctx = Ctx::new(&mut dice, &mut sink, &constants);
        let mut p = Player::new(Race::Golem, Class::Warrior);
        assert!(!p.set_stun(500, &mut ctx));
        assert_eq!(p.status().stun_tier(), 0);
    }

    #[test]
    fn test_invulnerability_onset_shifts_virtues() {
        let mut dice = quiet_dice();
        let mut sink = RecordingSink::new();
        let constants = CombatConstants::default();
        let mut ctx = Ctx::new(&mut dice, &mut sink, &constants);
        let mut p = Player::new(Race::Human, Class::Warrior);
        p.set_timed(StatusKind::Invulnerable, 5, &mut ctx);
        assert_eq!(p.virtues.score(Virtue::Valour), Some(-5));
        assert_eq!(p.virtues.score(Virtue::Honour), Some(-2));
    }
}
