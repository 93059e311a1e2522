//! Kill-path virtue rules
//!
//! Each rule looks only at the slain race, the floor and the player's level,
//! and contributes independent deltas. `on_monster_killed` is the single entry
//! point for every path that can kill a monster (player blows, retaliation
//! auras, exploding attackers).

use super::Virtue;
use crate::combat::{BlowEffect, MonsterRace, RaceFlags};
use crate::ctx::Ctx;
use crate::player::Player;
use crate::rng::Dice;
use crate::types::Floor;
use serde::{Deserialize, Serialize};

/// A single virtue adjustment produced by a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtueDelta {
    pub virtue: Virtue,
    pub amount: i32,
}

impl VirtueDelta {
    fn new(virtue: Virtue, amount: i32) -> Self {
        VirtueDelta { virtue, amount }
    }
}

/// Kills that only count rarely when a breeder has been farmed this much
const BREEDER_FARM_KILLS: u32 = 1000;

/// Virtue changes earned by killing a monster of `race`
pub fn kill_virtue_deltas(
    race: &MonsterRace,
    floor: Floor,
    player_level: i32,
    rng: &mut dyn Dice,
) -> Vec<VirtueDelta> {
    let mut out = Vec::new();
    let flags = race.flags;
    let depth = floor.depth;
    let unique = flags.contains(RaceFlags::UNIQUE);
    // chance of a rare shift grows with monster level and depth
    let deep_roll =
        |bonus: i32, rng: &mut dyn Dice| race.level / 10 + bonus * depth >= rng.randint1(100);

    if floor.is_surface() && !floor.ambush && !floor.arena {
        out.push(VirtueDelta::new(Virtue::Valour, -1));
    } else if race.level > depth && rng.randint1(10) <= race.level - depth {
        out.push(VirtueDelta::new(Virtue::Valour, 1));
    }
    if race.level > 60 {
        out.push(VirtueDelta::new(Virtue::Valour, 1));
    }
    if race.level >= 2 * (player_level + 1) {
        out.push(VirtueDelta::new(Virtue::Valour, 2));
    }

    if unique {
        if flags.intersects(RaceFlags::EVIL | RaceFlags::GOOD) {
            out.push(VirtueDelta::new(Virtue::Harmony, 2));
        }
        if flags.contains(RaceFlags::GOOD) {
            out.push(VirtueDelta::new(Virtue::Unlife, 2));
            out.push(VirtueDelta::new(Virtue::Vitality, -2));
        }
        if rng.one_in(3) {
            out.push(VirtueDelta::new(Virtue::Individualism, -1));
        }
    }

    if flags.contains(RaceFlags::BEGGAR) {
        out.push(VirtueDelta::new(Virtue::Compassion, -1));
    }

    if flags.contains(RaceFlags::GOOD) && deep_roll(3, rng) {
        out.push(VirtueDelta::new(Virtue::Unlife, 1));
    }

    if flags.contains(RaceFlags::ANGEL) {
        if unique {
            out.push(VirtueDelta::new(Virtue::Faith, -2));
        } else if deep_roll(3, rng) {
            let amount = if flags.contains(RaceFlags::GOOD) { -1 } else { 1 };
            out.push(VirtueDelta::new(Virtue::Faith, amount));
        }
    } else if flags.contains(RaceFlags::DEMON) {
        if unique {
            out.push(VirtueDelta::new(Virtue::Faith, 2));
        } else if deep_roll(3, rng) {
            out.push(VirtueDelta::new(Virtue::Faith, 1));
        }
    }

    if flags.contains(RaceFlags::UNDEAD) && unique {
        out.push(VirtueDelta::new(Virtue::Vitality, 2));
    }

    if race.lore.ancestors_slain > 0 {
        if unique {
            out.push(VirtueDelta::new(Virtue::Honour, 10));
        } else if deep_roll(2, rng) {
            out.push(VirtueDelta::new(Virtue::Honour, 1));
        }
    }

    if flags.contains(RaceFlags::MULTIPLY)
        && race.lore.total_kills > BREEDER_FARM_KILLS
        && rng.one_in(10)
    {
        out.push(VirtueDelta::new(Virtue::Valour, -1));
    }

    let thief = race
        .blows
        .iter()
        .any(|b| matches!(b.effect, BlowEffect::EatGold | BlowEffect::EatItem));
    if thief {
        if unique {
            out.push(VirtueDelta::new(Virtue::Justice, 3));
        } else if 1 + race.level / 10 + 2 * depth >= rng.randint1(100) {
            out.push(VirtueDelta::new(Virtue::Justice, 1));
        }
    } else if race.is_innocent() {
        out.push(VirtueDelta::new(Virtue::Justice, -1));
    }

    if flags.contains(RaceFlags::ANIMAL)
        && !flags.intersects(RaceFlags::EVIL | RaceFlags::SPELLCASTER)
        && rng.one_in(4)
    {
        out.push(VirtueDelta::new(Virtue::Nature, -1));
    }

    out
}

/// Apply the kill-path rules for a slain monster
pub fn on_monster_killed(
    player: &mut Player,
    race: &MonsterRace,
    ctx: &mut Ctx<'_>,
) -> Vec<VirtueDelta> {
    let deltas = kill_virtue_deltas(race, ctx.floor, player.level, ctx.rng);
    for d in &deltas {
        player.chg_virtue(d.virtue, d.amount, ctx);
    }
    tracing::debug!(race = %race.name, changes = deltas.len(), "kill virtues applied");
    deltas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{Blow, BlowMethod, DamageDice};
    use crate::rng::ScriptedDice;

    fn race(level: i32, flags: RaceFlags) -> MonsterRace {
        MonsterRace::new("test", "test monster", level).with_flags(flags)
    }

    fn has(deltas: &[VirtueDelta], virtue: Virtue, amount: i32) -> bool {
        deltas.contains(&VirtueDelta::new(virtue, amount))
    }

    #[test]
    fn test_surface_kill_costs_valour() {
        let mut rng = ScriptedDice::constant(99);
        let d = kill_virtue_deltas(&race(1, RaceFlags::empty()), Floor::at_depth(0), 10, &mut rng);
        assert!(has(&d, Virtue::Valour, -1));
    }

    #[test]
    fn test_out_of_depth_kill() {
        // randint1(10) rolls 1 against a level gap of 5
        let mut rng = ScriptedDice::new([0]).with_fallback(99);
        let plain = race(15, RaceFlags::empty());
        let d = kill_virtue_deltas(&plain, Floor::at_depth(10), 30, &mut rng);
        assert!(has(&d, Virtue::Valour, 1));
    }

    #[test]
    fn test_big_kill_for_low_level_player() {
        let mut rng = ScriptedDice::constant(99);
        let d = kill_virtue_deltas(&race(70, RaceFlags::empty()), Floor::at_depth(80), 5, &mut rng);
        assert!(has(&d, Virtue::Valour, 1));
        assert!(has(&d, Virtue::Valour, 2));
    }

    #[test]
    fn test_good_unique() {
        let mut rng = ScriptedDice::constant(99);
        let d = kill_virtue_deltas(
            &race(30, RaceFlags::UNIQUE | RaceFlags::GOOD),
            Floor::at_depth(30),
            30,
            &mut rng,
        );
        assert!(has(&d, Virtue::Harmony, 2));
        assert!(has(&d, Virtue::Unlife, 2));
        assert!(has(&d, Virtue::Vitality, -2));
    }

    #[test]
    fn test_innocent_and_thief() {
        let mut rng = ScriptedDice::constant(99);
        let harmless = race(0, RaceFlags::empty());
        let d = kill_virtue_deltas(&harmless, Floor::at_depth(1), 1, &mut rng);
        assert!(has(&d, Virtue::Justice, -1));

        let thief = race(5, RaceFlags::UNIQUE).with_blow(Blow::new(
            BlowMethod::Touch,
            BlowEffect::EatGold,
            DamageDice::new(0, 0),
        ));
        let d = kill_virtue_deltas(&thief, Floor::at_depth(5), 10, &mut rng);
        assert!(has(&d, Virtue::Justice, 3));
    }

    #[test]
    fn test_ancestor_killer_unique() {
        let mut rng = ScriptedDice::constant(99);
        let mut r = race(20, RaceFlags::UNIQUE);
        r.lore.ancestors_slain = 2;
        let d = kill_virtue_deltas(&r, Floor::at_depth(20), 25, &mut rng);
        assert!(has(&d, Virtue::Honour, 10));
    }

    #[test]
    fn test_on_monster_killed_updates_player() {
        use crate::config::CombatConstants;
        use crate::sink::NullSink;

        let mut dice = ScriptedDice::constant(99);
        let mut sink = NullSink;
        let constants = CombatConstants::default();
        let mut ctx = Ctx::new(&mut dice, &mut sink, &constants).with_floor(Floor::at_depth(0));
        let mut player = Player::default();
        on_monster_killed(&mut player, &race(1, RaceFlags::empty()), &mut ctx);
        assert_eq!(player.virtues.score(Virtue::Valour), Some(-1));
    }
}
