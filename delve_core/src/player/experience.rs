//! Experience and level tracking

use super::Player;
use crate::ctx::Ctx;
use crate::defense::Traits;
use crate::sink::Dirty;

pub const MAX_LEVEL: i32 = 50;

/// Hard cap on experience points
pub const MAX_EXP: i32 = 99_999_999;

/// Experience needed to advance past each level (index 0 = reaching level 2)
const PLAYER_EXP: [i32; 50] = [
    10, 25, 45, 70, 100, 140, 200, 280, 380, 500, 650, 850, 1100, 1400, 1800, 2300, 2900, 3600,
    4400, 5400, 6800, 8400, 10200, 12500, 17500, 25000, 35000, 50000, 75000, 100000, 150000,
    200000, 275000, 350000, 450000, 550000, 700000, 850000, 1000000, 1250000, 1500000, 1800000,
    2100000, 2400000, 2700000, 3000000, 3500000, 4000000, 4500000, 5000000,
];

/// Experience required to reach `level`
pub fn exp_for_level(level: i32) -> i32 {
    if level <= 1 {
        return 0;
    }
    let i = ((level - 2) as usize).min(PLAYER_EXP.len() - 1);
    PLAYER_EXP[i]
}

/// Level a character with `exp` points has
pub fn level_for_exp(exp: i32) -> i32 {
    let mut level = 1;
    while level < MAX_LEVEL && exp >= exp_for_level(level + 1) {
        level += 1;
    }
    level
}

impl Player {
    /// Lose experience outright
    pub fn lose_exp(&mut self, amount: i32, ctx: &mut Ctx<'_>) {
        if self.is_dead || self.race.is_exp_immune() {
            return;
        }
        let amount = amount.clamp(0, self.exp);
        self.exp -= amount;
        self.check_experience(ctx);
    }

    /// Drain experience unless hold-life saves it.
    ///
    /// With hold-life the drain is resisted with probability
    /// `hold_exp_prob`%, and otherwise only `slip` is lost. Returns true if
    /// anything was drained.
    pub fn drain_exp(
        &mut self,
        drain: i32,
        slip: i32,
        hold_exp_prob: i32,
        ctx: &mut Ctx<'_>,
    ) -> bool {
        if self.is_dead || self.race.is_exp_immune() {
            return false;
        }
        let hold = self.traits().contains(Traits::HOLD_EXP);
        if hold && ctx.rng.randint0(100) < hold_exp_prob {
            ctx.msg("exp", "You keep hold of your life force!");
            return false;
        }
        if hold {
            ctx.msg("exp", "You feel your life slipping away!");
            self.lose_exp(slip, ctx);
        } else {
            ctx.msg("exp", "You feel your life draining away!");
            self.lose_exp(drain, ctx);
        }
        tracing::debug!(exp = self.exp, hold, "experience drained");
        true
    }

    pub fn gain_exp(&mut self, amount: i32, ctx: &mut Ctx<'_>) {
        if self.is_dead {
            return;
        }
        let amount = amount.max(0);
        self.exp = self.exp.saturating_add(amount).min(MAX_EXP);
        if self.exp < self.max_exp {
            // Regaining lost experience also trickles into the max.
            self.max_exp = self.max_exp.saturating_add(amount / 10).min(MAX_EXP);
        }
        self.check_experience(ctx);
    }

    /// Restore drained experience. Returns true if any was missing.
    pub fn restore_exp(&mut self, ctx: &mut Ctx<'_>) -> bool {
        if !self.is_dead && self.exp < self.max_exp {
            ctx.msg("exp", "You feel your life energies returning.");
            self.exp = self.max_exp;
            self.check_experience(ctx);
            return true;
        }
        false
    }

    /// Recompute level after an experience change
    pub fn check_experience(&mut self, ctx: &mut Ctx<'_>) {
        self.exp = self.exp.clamp(0, MAX_EXP);
        self.max_exp = self.max_exp.clamp(0, MAX_EXP);
        if self.exp > self.max_exp {
            self.max_exp = self.exp;
        }
        ctx.dirty(Dirty::EXP);

        let level = level_for_exp(self.exp);
        while self.level > level {
            self.level -= 1;
            ctx.msg("exp", &format!("You dropped to level {}.", self.level));
            ctx.dirty(Dirty::BONUS);
        }
        while self.level < level {
            self.level += 1;
            ctx.msg("exp", &format!("Welcome to level {}.", self.level));
            ctx.dirty(Dirty::BONUS);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exp_table_edges() {
        assert_eq!(exp_for_level(1), 0);
        assert_eq!(exp_for_level(2), 10);
        assert_eq!(exp_for_level(50), 5_000_000);
        assert_eq!(level_for_exp(0), 1);
        assert_eq!(level_for_exp(9), 1);
        assert_eq!(level_for_exp(10), 2);
        assert_eq!(level_for_exp(99), 5);
        assert_eq!(level_for_exp(MAX_EXP), MAX_LEVEL);
    }

    #[test]
    fn test_levels_are_monotonic() {
        let mut last = 0;
        for level in 1..=MAX_LEVEL {
            let needed = exp_for_level(level);
            assert!(needed >= last);
            last = needed;
        }
    }
}
