//! Primary stats and their lookup tables
//!
//! Stat values use the classic encoding: 3..=18 are plain values, and
//! 18/xx is stored as `18 + xx` (so 18/100 is 118). The hard floor is 3.

use super::Player;
use crate::avatar::Virtue;
use crate::ctx::Ctx;
use crate::defense::Traits;
use crate::rng::Dice;
use crate::sink::Dirty;
use crate::types::Stat;
use serde::{Deserialize, Serialize};

/// Lowest value a stat can be reduced to
pub const STAT_FLOOR: i32 = 3;

/// Highest storable stat value (18/220)
pub const STAT_CAP: i32 = 18 + 220;

/// Status recovery bonus by constitution
const ADJ_CON_FIX: [i32; 38] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, // 3..13
    1, 2, 2, 2, // 14..17
    3, 3, 3, 3, 3, // 18/00..18/49
    4, 4, 5, 6, 6, // 18/50..18/99
    7, 7, 8, 8, 8, // 18/100..18/149
    9, 9, 9, 9, 9, // 18/150..18/199
    10, 10, 10, // 18/200+
];

/// Theft avoidance by dexterity
const ADJ_DEX_SAFE: [i32; 38] = [
    0, 1, 2, 3, 4, 5, 5, 6, 6, 7, 7, // 3..13
    8, 8, 9, 9, // 14..17
    10, 10, 15, 15, 20, // 18/00..18/49
    25, 30, 35, 40, 45, // 18/50..18/99
    50, 60, 70, 80, 90, // 18/100..18/149
    100, 100, 100, 100, 100, // 18/150..18/199
    100, 100, 100, // 18/200+
];

/// Index into the adjustment tables for a stat value
pub fn stat_index(value: i32) -> usize {
    if value <= 18 {
        (value - STAT_FLOOR).max(0) as usize
    } else if value <= 18 + 219 {
        (15 + (value - 18) / 10) as usize
    } else {
        37
    }
}

pub fn adj_con_fix(con: i32) -> i32 {
    ADJ_CON_FIX[stat_index(con)]
}

pub fn adj_dex_safe(dex: i32) -> i32 {
    ADJ_DEX_SAFE[stat_index(dex)]
}

/// Current and maximum values of the six stats
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    cur: [i32; 6],
    max: [i32; 6],
}

impl Default for Stats {
    fn default() -> Self {
        Stats::uniform(15)
    }
}

impl Stats {
    pub fn new(values: [i32; 6]) -> Self {
        let values = values.map(|v| v.clamp(STAT_FLOOR, STAT_CAP));
        Stats {
            cur: values,
            max: values,
        }
    }

    pub fn uniform(value: i32) -> Self {
        Stats::new([value; 6])
    }

    pub fn cur(&self, stat: Stat) -> i32 {
        self.cur[stat.index()]
    }

    pub fn max(&self, stat: Stat) -> i32 {
        self.max[stat.index()]
    }

    pub fn is_drained(&self, stat: Stat) -> bool {
        self.cur(stat) < self.max(stat)
    }

    /// Lower a stat by a loss of `amount` (10 is a normal drain).
    ///
    /// With `permanent` the maximum is lowered too. Returns true if either
    /// value changed.
    pub fn decrease(
        &mut self,
        stat: Stat,
        amount: i32,
        permanent: bool,
        rng: &mut dyn Dice,
    ) -> bool {
        let i = stat.index();
        let mut cur = self.cur[i];
        let mut max = self.max[i];
        let same = cur == max;
        let mut changed = false;

        if cur > STAT_FLOOR {
            cur = lowered(cur, amount, rng);
            if cur != self.cur[i] {
                changed = true;
            }
        }

        if permanent && max > STAT_FLOOR {
            max = lowered(max, amount, rng);
            if same || max < cur {
                max = cur;
            }
            if max != self.max[i] {
                changed = true;
            }
        }

        self.cur[i] = cur;
        self.max[i] = max;
        changed
    }

    /// Scale the current value, as time attacks do (e.g. 3/4)
    pub fn scale(&mut self, stat: Stat, num: i32, den: i32) -> bool {
        let i = stat.index();
        let next = (self.cur[i] * num / den.max(1)).max(STAT_FLOOR);
        let changed = next != self.cur[i];
        self.cur[i] = next;
        changed
    }

    /// Restore the current value to the maximum
    pub fn restore(&mut self, stat: Stat) -> bool {
        let i = stat.index();
        if self.cur[i] != self.max[i] {
            self.cur[i] = self.max[i];
            return true;
        }
        false
    }

    /// Raise both values, as a stat gain potion does
    pub fn increase(&mut self, stat: Stat, amount: i32) -> bool {
        let i = stat.index();
        let next = if self.cur[i] < 18 {
            (self.cur[i] + 1).min(18)
        } else {
            (self.cur[i] + amount.max(1)).min(STAT_CAP)
        };
        if next == self.cur[i] {
            return false;
        }
        self.cur[i] = next;
        if next > self.max[i] {
            self.max[i] = next;
        }
        true
    }

    pub fn swap(&mut self, a: Stat, b: Stat) {
        self.cur.swap(a.index(), b.index());
        self.max.swap(a.index(), b.index());
    }
}

/// One step of stat loss. Below 18 the loss is 1..4 points by severity; in
/// the 18/xx range it scales with how far above 18 the stat is.
fn lowered(value: i32, amount: i32, rng: &mut dyn Dice) -> i32 {
    let mut v = value;
    if v <= 18 {
        if amount > 90 {
            v -= 1;
        }
        if amount > 50 {
            v -= 1;
        }
        if amount > 20 {
            v -= 1;
        }
        v -= 1;
    } else {
        let base = (((v - 18) / 2 + 1) / 2 + 1).max(1);
        let mut loss = ((rng.randint1(base) + base) * amount) / 100;
        if loss < amount / 2 {
            loss = amount / 2;
        }
        v -= loss;
        if v < 18 {
            v = if amount <= 20 { 18 } else { 17 };
        }
    }
    v.max(STAT_FLOOR)
}

impl Player {
    pub fn is_sustained(&self, stat: Stat) -> bool {
        self.traits().contains(Traits::sustain_for(stat))
    }

    /// Lower a stat, permanently if asked. Returns true if it changed.
    pub fn dec_stat(
        &mut self,
        stat: Stat,
        amount: i32,
        permanent: bool,
        ctx: &mut Ctx<'_>,
    ) -> bool {
        if self.is_dead {
            return false;
        }
        if permanent && self.stats.max(stat) > STAT_FLOOR {
            self.chg_virtue(Virtue::Sacrifice, 1, ctx);
            if matches!(stat, Stat::Int | Stat::Wis) {
                self.chg_virtue(Virtue::Enlightenment, -2, ctx);
            }
        }
        let changed = self.stats.decrease(stat, amount, permanent, ctx.rng);
        if changed {
            tracing::debug!(?stat, cur = self.stats.cur(stat), permanent, "stat lowered");
            ctx.dirty(Dirty::BONUS | Dirty::STATS);
        }
        changed
    }

    /// A normal stat drain, blocked by the matching sustain.
    ///
    /// Returns true if something was noticed (the drain or the sustain).
    pub fn do_dec_stat(&mut self, stat: Stat, ctx: &mut Ctx<'_>) -> bool {
        if self.is_dead {
            return false;
        }
        if self.is_sustained(stat) {
            ctx.msg(
                "stat",
                &format!("You feel {} for a moment, but the feeling passes.", stat.loss_word()),
            );
            return true;
        }
        if self.dec_stat(stat, 10, false, ctx) {
            ctx.msg("stat", &format!("You feel very {}.", stat.loss_word()));
            return true;
        }
        false
    }

    /// Permanent drain used by heavy blows; sustains block it silently
    pub fn drain_stat_permanently(&mut self, stat: Stat, ctx: &mut Ctx<'_>) -> bool {
        if self.is_dead || self.is_sustained(stat) {
            return false;
        }
        if self.dec_stat(stat, 10, true, ctx) {
            ctx.msg("stat", &format!("You feel very {}.", stat.loss_word()));
            return true;
        }
        false
    }

    pub fn res_stat(&mut self, stat: Stat, ctx: &mut Ctx<'_>) -> bool {
        if !self.is_dead && self.stats.restore(stat) {
            ctx.msg("stat", &format!("You feel less {}.", stat.loss_word()));
            ctx.dirty(Dirty::BONUS | Dirty::STATS);
            return true;
        }
        false
    }

    /// Swap two random stats (nexus scrambling)
    pub fn shuffle_stats(&mut self, ctx: &mut Ctx<'_>) {
        if self.is_dead {
            return;
        }
        let a = ctx.rng.randint0(6) as usize;
        let mut b = ctx.rng.randint0(5) as usize;
        if b >= a {
            b += 1;
        }
        self.stats.swap(Stat::from_index(a), Stat::from_index(b));
        ctx.msg("stat", "Your body starts to scramble...");
        ctx.dirty(Dirty::BONUS | Dirty::STATS);
    }

    /// Time attacks: one stat (or all) fall to three quarters
    pub fn age_stat(&mut self, stat: Stat, ctx: &mut Ctx<'_>) -> bool {
        if self.is_dead {
            return false;
        }
        let changed = self.stats.scale(stat, 3, 4);
        if changed {
            ctx.dirty(Dirty::BONUS | Dirty::STATS);
        }
        changed
    }
}
