//! Integration test: monsters, traps and potions against one character
//!
//! Seeded encounters check bookkeeping that must hold on every roll: the
//! blow stage trace, HP accounting and the gold ledger.

use delve_core::avatar::{kill_virtue_deltas, Virtue, VirtueDelta};
use delve_core::combat::{monster_take_hit, resolve_monster_attack, Attacker, BlowStage};
use delve_core::config::{default_monster_races, CombatConstants};
use delve_core::hazard::{resolve_chest_trap, resolve_trap, Chest, ChestTraps, TrapKind};
use delve_core::player::Player;
use delve_core::potion::{quaff_potion_effect, PotionKind};
use delve_core::rng::{GameRng, ScriptedDice};
use delve_core::sink::{NullSink, RecordingSink};
use delve_core::types::{Floor, MonsterId};
use delve_core::{Ctx, StatusKind};

#[test]
fn every_bundled_race_resolves_cleanly() {
    let constants = CombatConstants::default();
    let races = default_monster_races();
    let mut ids: Vec<&String> = races.keys().collect();
    ids.sort();

    for (n, id) in ids.into_iter().enumerate() {
        let race = &races[id];
        let mut rng = GameRng::new(1000 + n as u64);
        let mut sink = NullSink;
        let mut ctx = Ctx::new(&mut rng, &mut sink, &constants).with_floor(Floor::at_depth(5));
        let mut player = Player::default().with_hp(100_000).with_mana(50);

        for round in 0..30 {
            let mut attacker = Attacker::new(MonsterId(round), race.clone());
            let hp_before = player.chp;
            let summary = resolve_monster_attack(&mut player, &mut attacker, &mut ctx);

            assert!(summary.blows.len() <= race.blows.len(), "{id}");
            let blow_total: i32 = summary.blows.iter().map(|b| b.get_damage).sum();
            assert_eq!(summary.total_damage, blow_total);
            assert_eq!(player.chp, hp_before - summary.total_damage, "{id}");
            for blow in &summary.blows {
                assert_eq!(blow.stages.first(), Some(&BlowStage::Pending), "{id}");
                assert_eq!(blow.stage(), BlowStage::Resolved, "{id}");
                if blow.hit && !blow.repelled {
                    assert_eq!(
                        blow.stages,
                        vec![
                            BlowStage::Pending,
                            BlowStage::AcMitigated,
                            BlowStage::EffectDispatched,
                            BlowStage::Resolved
                        ],
                        "{id}"
                    );
                } else {
                    assert_eq!(blow.get_damage, 0, "{id}");
                }
            }
            assert_eq!(summary.attacker_died, !attacker.alive, "{id}");
        }
    }
}

#[test]
fn thieves_keep_the_ledger_straight() {
    let constants = CombatConstants::default();
    let races = default_monster_races();
    let cutpurse = &races["cutpurse"];
    let mut rng = GameRng::new(99);
    let mut sink = RecordingSink::new();
    let mut ctx = Ctx::new(&mut rng, &mut sink, &constants);
    let mut player = Player::default().with_hp(10_000).with_gold(5_000);

    let mut stolen = 0;
    for round in 0..40 {
        let mut thief = Attacker::new(MonsterId(round), cutpurse.clone());
        let summary = resolve_monster_attack(&mut player, &mut thief, &mut ctx);
        for blow in &summary.blows {
            assert!(!(blow.theft_caught && blow.gold_stolen > 0));
            stolen += blow.gold_stolen;
        }
    }
    assert_eq!(player.gold, 5_000 - stolen);
    assert!(player.gold >= 0);
}

#[test]
fn traps_account_for_every_hit_point() {
    let constants = CombatConstants::default();
    for (n, &trap) in TrapKind::all().iter().enumerate() {
        for seed in 0..10u64 {
            let mut rng = GameRng::new(seed * 31 + n as u64);
            let mut sink = NullSink;
            let mut ctx = Ctx::new(&mut rng, &mut sink, &constants);
            let mut player = Player::default().with_hp(1_000);

            let out = resolve_trap(&mut player, trap, &mut ctx);
            assert_eq!(player.mhp - player.chp, out.damage, "{trap:?}");
            if matches!(
                trap,
                TrapKind::BlindGas | TrapKind::ConfuseGas | TrapKind::PoisonGas | TrapKind::SleepGas
            ) {
                assert_eq!(out.damage, 0, "{trap:?}");
                assert!(out.events.is_empty(), "{trap:?}");
                assert_eq!(out.statuses.len(), 1, "{trap:?}");
            }
            if matches!(trap, TrapKind::Fire | TrapKind::Acid) {
                assert_eq!(out.events.len(), 1, "{trap:?}");
            }
        }
    }
}

#[test]
fn chest_traps_account_for_every_hit_point() {
    let constants = CombatConstants::default();
    for seed in 0..25u64 {
        let mut rng = GameRng::new(seed);
        let mut sink = NullSink;
        let mut ctx = Ctx::new(&mut rng, &mut sink, &constants);
        let mut player = Player::default().with_hp(5_000);
        let mut chest = Chest::new(40, ChestTraps::all());

        let out = resolve_chest_trap(&mut player, &mut chest, &mut ctx);
        assert_eq!(player.mhp - player.chp, out.damage);
        assert!(chest.emptied);
    }
}

#[test]
fn potions_never_panic_and_bad_ones_never_heal() {
    let constants = CombatConstants::default();
    for (n, &potion) in PotionKind::all().iter().enumerate() {
        let mut rng = GameRng::new(n as u64);
        let mut sink = NullSink;
        let mut ctx = Ctx::new(&mut rng, &mut sink, &constants);
        let mut player = Player::default().with_hp(500).with_mana(40);
        player.chp = 250;
        player.csp = 10;
        player.exp = 400;

        quaff_potion_effect(&mut player, potion, &mut ctx);
        if potion.is_bad() {
            assert!(player.chp <= 250, "{potion:?}");
        }
    }
}

#[test]
fn healing_clears_ailments() {
    let constants = CombatConstants::default();
    let mut dice = ScriptedDice::constant(0);
    let mut sink = RecordingSink::new();
    let mut ctx = Ctx::new(&mut dice, &mut sink, &constants);
    let mut player = Player::default().with_hp(400);
    player.chp = 50;
    player.set_timed(StatusKind::Blind, 20, &mut ctx);
    player.set_timed(StatusKind::Poisoned, 20, &mut ctx);
    player.set_tiered(StatusKind::Cut, 60, &mut ctx);

    assert!(quaff_potion_effect(&mut player, PotionKind::Healing, &mut ctx));
    assert_eq!(player.chp, 350);
    assert!(!player.is_active(StatusKind::Blind));
    assert!(!player.is_active(StatusKind::Poisoned));
    assert!(!player.is_active(StatusKind::Cut));
}

#[test]
fn surface_kill_costs_valour() {
    let constants = CombatConstants::default();
    let races = default_monster_races();
    let grip = races["grip"].clone();
    let mut dice = ScriptedDice::constant(99);
    let mut sink = RecordingSink::new();
    let mut player = Player::default();

    let mut roll = ScriptedDice::constant(99);
    let deltas = kill_virtue_deltas(&grip, Floor::at_depth(0), player.level, &mut roll);
    assert_eq!(deltas, vec![VirtueDelta { virtue: Virtue::Valour, amount: -1 }]);

    let mut attacker = Attacker::new(MonsterId(7), grip);
    let died = {
        let mut ctx = Ctx::new(&mut dice, &mut sink, &constants).with_floor(Floor::at_depth(0));
        monster_take_hit(&mut attacker, 1_000, " dies.", &mut player, &mut ctx)
    };
    assert!(died);
    assert!(!attacker.alive);
    assert_eq!(attacker.race.lore.total_kills, 1);
    assert_eq!(player.virtues.score(Virtue::Valour), Some(-1));
}
