//! HP and mana changes - the single subtraction path for player damage

use super::Player;
use crate::avatar::Virtue;
use crate::ctx::Ctx;
use crate::defense::{invulnerability_gate, InvulnGate};
use crate::sink::Dirty;
use crate::status::StatusKind;
use serde::{Deserialize, Serialize};

/// How a hit interacts with protective buffs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitKind {
    /// Ordinary attack: stopped by invulnerability, halved by wraith form
    Attack,
    /// Cuts through invulnerability and wraith form
    Force,
    /// Environmental damage that skips protective buffs
    NoEscape,
    /// Direct life loss (ruination, dispel-player runes)
    LoseLife,
}

impl Player {
    /// Subtract HP. Returns the damage actually taken.
    pub fn take_hit(&mut self, kind: HitKind, damage: i32, killer: &str, ctx: &mut Ctx<'_>) -> i32 {
        if self.is_dead {
            return 0;
        }
        let mut damage = damage.max(0);
        if kind != HitKind::LoseLife {
            ctx.sink.disturb();
        }

        if matches!(kind, HitKind::Attack | HitKind::Force) {
            if self.status.is_active(StatusKind::Invulnerable) {
                match invulnerability_gate(kind, ctx) {
                    InvulnGate::Blocked => return 0,
                    InvulnGate::CutOpen => {
                        ctx.msg("damage", "The attack cuts your shield of invulnerability open!")
                    }
                    InvulnGate::Penetrated => {
                        ctx.msg("damage", "The attack penetrates your shield of invulnerability!")
                    }
                }
            }

            if kind == HitKind::Force && self.decoy_active() {
                ctx.msg("damage", "The attack hits Shadow together with you!");
            }

            if self.status.is_active(StatusKind::WraithForm) {
                if kind == HitKind::Force {
                    ctx.msg("damage", "The attack cuts through your ethereal body!");
                } else {
                    damage /= 2;
                    if damage == 0 && ctx.rng.one_in(2) {
                        damage = 1;
                    }
                }
            }
        }

        self.chp -= damage;
        ctx.dirty(Dirty::HP);

        if self.chp < 0 {
            self.is_dead = true;
            self.died_from = Some(killer.to_string());
            tracing::info!(killer, damage, "player killed");
            ctx.msg("death", "You die.");
            ctx.sink.player_died(killer);
            return damage;
        }

        let warning = self.mhp * ctx.constants.low_hp_warning_percent / 100;
        if damage > 0 && self.chp < warning {
            ctx.msg("hp", "*** LOW HITPOINT WARNING! ***");
        }
        damage
    }

    /// Heal HP. Returns true if HP was below max.
    pub fn hp_player(&mut self, amount: i32, ctx: &mut Ctx<'_>) -> bool {
        if self.is_dead || self.chp >= self.mhp {
            return false;
        }
        let mut num = amount.max(0);
        if let Some(vitality) = self.virtues.score(Virtue::Vitality) {
            num = num * (vitality + 1250) / 1250;
        }
        if num > 0 && self.chp < self.mhp / 3 {
            self.chg_virtue(Virtue::Vitality, 1, ctx);
        }
        self.chp = (self.chp + num).min(self.mhp);
        ctx.dirty(Dirty::HP);

        let text = if num < 5 {
            "You feel a little better."
        } else if num < 15 {
            "You feel better."
        } else if num < 35 {
            "You feel much better."
        } else {
            "You feel very good."
        };
        ctx.msg("hp", text);
        true
    }

    /// Remove mana, never below zero. Returns the mana actually lost.
    pub fn lose_mana(&mut self, amount: i32, ctx: &mut Ctx<'_>) -> i32 {
        if self.is_dead {
            return 0;
        }
        let lost = amount.clamp(0, self.csp);
        if lost > 0 {
            self.csp -= lost;
            ctx.dirty(Dirty::MANA);
        }
        lost
    }

    pub fn restore_mana(&mut self, ctx: &mut Ctx<'_>) -> bool {
        if !self.is_dead && self.csp < self.msp {
            self.csp = self.msp;
            ctx.msg("hp", "You feel your head clear.");
            ctx.dirty(Dirty::MANA);
            return true;
        }
        false
    }
}
