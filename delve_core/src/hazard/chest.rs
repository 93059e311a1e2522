//! Chest traps

use super::trap::poison_proof;
use super::HazardOutcome;
use crate::ctx::Ctx;
use crate::damage::DamageKind;
use crate::defense::Traits;
use crate::player::{HitKind, Player};
use crate::status::StatusKind;
use crate::types::{Stat, SummonKind};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Traps set on a chest. Several can fire at once.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct ChestTraps: u16 {
        const LOSE_STR = 1 << 0;
        const LOSE_CON = 1 << 1;
        const POISON = 1 << 2;
        const PARALYZE = 1 << 3;
        const EXPLODE = 1 << 4;
        const SUMMON = 1 << 5;
        const SCATTER = 1 << 6;
        const ALARM = 1 << 7;
        const RUNES_OF_EVIL = 1 << 8;
        const E_SUMMON = 1 << 9;
        const BIRD_STORM = 1 << 10;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chest {
    /// Object level; scales the nastier traps
    pub level: i32,
    #[serde(default)]
    pub traps: ChestTraps,
    /// Contents destroyed or scattered
    #[serde(default)]
    pub emptied: bool,
}

impl Chest {
    pub fn new(level: i32, traps: ChestTraps) -> Self {
        Chest {
            level,
            traps,
            emptied: false,
        }
    }

    pub fn is_trapped(&self) -> bool {
        !self.traps.is_empty()
    }
}

/// Fire every trap on the chest, in a fixed order
pub fn resolve_chest_trap(
    player: &mut Player,
    chest: &mut Chest,
    ctx: &mut Ctx<'_>,
) -> HazardOutcome {
    let mut out = HazardOutcome::begin("a chest trap", player);
    let traps = chest.traps;
    if player.is_dead || traps.is_empty() {
        return out.finish(player);
    }
    tracing::debug!(?traps, level = chest.level, "chest trap triggered");

    // a trap that kills the player ends the sequence
    if traps.contains(ChestTraps::LOSE_STR) {
        needle(player, Stat::Str, &mut out, ctx);
    }
    if traps.contains(ChestTraps::LOSE_CON) && !player.is_dead {
        needle(player, Stat::Con, &mut out, ctx);
    }
    if traps.contains(ChestTraps::POISON) && !player.is_dead {
        ctx.msg("trap", "A puff of green gas surrounds you!");
        if !poison_proof(player, player.traits()) {
            let turns = 10 + ctx.rng.randint1(20);
            player.mod_poison(turns, ctx);
        }
    }
    if traps.contains(ChestTraps::PARALYZE) && !player.is_dead {
        ctx.msg("trap", "A puff of yellow gas surrounds you!");
        if !player.traits().contains(Traits::FREE_ACT) {
            let turns = 10 + ctx.rng.randint1(20);
            player.mod_paralyzed(turns, ctx);
        }
    }
    if traps.contains(ChestTraps::SUMMON) && !player.is_dead {
        ctx.msg("trap", "You are enveloped in a cloud of smoke!");
        let count = 2 + ctx.rng.randint1(3);
        out.summoned += ctx.sink.summon_monster(SummonKind::Any, count);
    }
    if traps.contains(ChestTraps::E_SUMMON) && !player.is_dead {
        ctx.msg("trap", "Elemental beings appear to protect their treasures!");
        let count = 5 + ctx.rng.randint1(3);
        out.summoned += ctx.sink.summon_monster(SummonKind::Elemental, count);
    }
    if traps.contains(ChestTraps::BIRD_STORM) && !player.is_dead {
        ctx.msg("trap", "A storm of birds swirls around you!");
        let count = ctx.rng.randint1(5) + chest.level / 5;
        out.summoned += ctx.sink.summon_monster(SummonKind::Bird, count);
    }
    if traps.contains(ChestTraps::RUNES_OF_EVIL) && !player.is_dead {
        runes_of_evil(player, chest.level, &mut out, ctx);
    }
    if traps.contains(ChestTraps::EXPLODE) && !player.is_dead {
        ctx.msg("trap", "There is a sudden explosion!");
        ctx.msg("trap", "Everything inside the chest is destroyed!");
        chest.emptied = true;
        let dam = ctx.rng.damroll(5, 8);
        out.damage += player.take_hit(HitKind::Attack, dam, "an exploding chest", ctx);
    }
    if traps.contains(ChestTraps::SCATTER) && !chest.emptied && !player.is_dead {
        ctx.msg("trap", "The contents of the chest scatter all over the dungeon!");
        chest.emptied = true;
        ctx.sink.scatter_chest();
    }
    if traps.contains(ChestTraps::ALARM) && !player.is_dead {
        ctx.msg("trap", "An alarm sounds!");
        ctx.sink.aggravate_monsters();
    }
    out.finish(player)
}

fn needle(player: &mut Player, stat: Stat, out: &mut HazardOutcome, ctx: &mut Ctx<'_>) {
    ctx.msg("trap", "A small needle has pricked you!");
    let dam = ctx.rng.damroll(1, 4);
    out.damage += player.take_hit(HitKind::Attack, dam, "a poison needle", ctx);
    if !player.is_dead {
        player.do_dec_stat(stat, ctx);
    }
}

/// Four to six curses, each of which the saving throw may shrug off
fn runes_of_evil(player: &mut Player, level: i32, out: &mut HazardOutcome, ctx: &mut Ctx<'_>) {
    ctx.msg("trap", "Hideous voices bid:  'Let the darkness have thee!'");
    let count = 4 + ctx.rng.randint0(3);
    for _ in 0..count {
        if player.is_dead {
            break;
        }
        if ctx.rng.randint1(100 + level * 2) <= player.saving_throw() {
            continue;
        }
        if ctx.rng.one_in(6) {
            let dam = ctx.rng.damroll(5, 20);
            let killer = "a chest dispel-player trap";
            out.damage += player.take_hit(HitKind::NoEscape, dam, killer, ctx);
        } else if ctx.rng.one_in(5) {
            player.mod_cut(200, ctx);
        } else if ctx.rng.one_in(4) {
            if player.traits().contains(Traits::FREE_ACT) {
                let stun = 10 + ctx.rng.randint0(100);
                player.mod_stun(stun, ctx);
            } else {
                let turns = 2 + ctx.rng.randint0(6);
                player.mod_paralyzed(turns, ctx);
            }
        } else if ctx.rng.one_in(3) {
            ctx.sink.disenchant_equipment();
        } else if ctx.rng.one_in(2) {
            for stat in Stat::all() {
                player.do_dec_stat(*stat, ctx);
            }
        } else {
            out.route(player, DamageKind::Nether, 150, "a chest rune", ctx);
        }
    }
    if player.is_active(StatusKind::Paralyzed) {
        ctx.sink.disturb();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CombatConstants;
    use crate::rng::ScriptedDice;
    use crate::sink::{RecordingSink, SinkCall};

    fn open(
        player: &mut Player,
        chest: &mut Chest,
        dice: &mut ScriptedDice,
    ) -> (HazardOutcome, RecordingSink) {
        let mut sink = RecordingSink::new();
        let constants = CombatConstants::default();
        let out = {
            let mut ctx = Ctx::new(dice, &mut sink, &constants);
            resolve_chest_trap(player, chest, &mut ctx)
        };
        (out, sink)
    }

    #[test]
    fn test_untrapped_chest_is_quiet() {
        let mut p = Player::default();
        let mut chest = Chest::new(10, ChestTraps::empty());
        let (out, sink) = open(&mut p, &mut chest, &mut ScriptedDice::constant(0));
        assert_eq!(out.damage, 0);
        assert!(sink.calls.is_empty());
    }

    #[test]
    fn test_explosion_destroys_contents() {
        let mut p = Player::default();
        let mut chest = Chest::new(10, ChestTraps::EXPLODE | ChestTraps::SCATTER);
        let (out, sink) = open(&mut p, &mut chest, &mut ScriptedDice::constant(99));
        assert_eq!(out.damage, 40);
        assert!(chest.emptied);
        // nothing left to scatter
        assert!(!sink.called(&SinkCall::ScatterChest));
    }

    #[test]
    fn test_scatter_and_alarm() {
        let mut p = Player::default();
        let mut chest = Chest::new(10, ChestTraps::SCATTER | ChestTraps::ALARM);
        let (_, sink) = open(&mut p, &mut chest, &mut ScriptedDice::constant(0));
        assert!(sink.called(&SinkCall::ScatterChest));
        assert!(sink.called(&SinkCall::Aggravate));
    }

    #[test]
    fn test_summons_scale() {
        let mut p = Player::default();
        let mut chest = Chest::new(25, ChestTraps::E_SUMMON | ChestTraps::BIRD_STORM);
        let (_, sink) = open(&mut p, &mut chest, &mut ScriptedDice::constant(0));
        assert!(sink.called(&SinkCall::Summon(SummonKind::Elemental, 6)));
        assert!(sink.called(&SinkCall::Summon(SummonKind::Bird, 6)));
    }

    #[test]
    fn test_runes_of_evil_saved() {
        // every save roll lands at 1, under a saving throw of 30
        let mut p = Player::default();
        let mut chest = Chest::new(30, ChestTraps::RUNES_OF_EVIL);
        let (out, _) = open(&mut p, &mut chest, &mut ScriptedDice::constant(0));
        assert_eq!(out.damage, 0);
        assert!(out.statuses.is_empty());
    }

    #[test]
    fn test_runes_of_evil_nether_bolt() {
        // count 4; each curse fails the save, skips the first five branches
        // and lands as a 150-point nether bolt
        let mut p = Player::default().with_hp(2000);
        let mut chest = Chest::new(30, ChestTraps::RUNES_OF_EVIL);
        let mut dice = ScriptedDice::new([0]).with_fallback(9999);
        let (out, _) = open(&mut p, &mut chest, &mut dice);
        assert!(!out.events.is_empty());
        assert!(out.events.iter().all(|e| e.kind == DamageKind::Nether));
        assert!(out.damage > 0);
    }

    #[test]
    fn test_lethal_needle_ends_the_sequence() {
        let mut p = Player::default().with_hp(2);
        let traps = ChestTraps::LOSE_STR
            | ChestTraps::SUMMON
            | ChestTraps::SCATTER
            | ChestTraps::ALARM;
        let mut chest = Chest::new(20, traps);
        let (out, sink) = open(&mut p, &mut chest, &mut ScriptedDice::constant(99));
        assert!(p.is_dead);
        assert_eq!(out.summoned, 0);
        assert!(!sink.calls.iter().any(|c| matches!(c, SinkCall::Summon(..))));
        assert!(!sink.called(&SinkCall::ScatterChest));
        assert!(!sink.called(&SinkCall::Aggravate));
        assert!(!chest.emptied);
    }

    #[test]
    fn test_poison_needle_drains() {
        let mut p = Player::default();
        let before = p.stats.cur(Stat::Con);
        let mut chest = Chest::new(5, ChestTraps::LOSE_CON);
        let (out, _) = open(&mut p, &mut chest, &mut ScriptedDice::constant(0));
        assert_eq!(out.damage, 1);
        assert!(p.stats.cur(Stat::Con) < before);
    }
}
