//! Integration test: end-to-end hits and status transitions
//!
//! Each test drives the public API with scripted dice so every roll is
//! known up front.

use delve_core::config::CombatConstants;
use delve_core::damage::{apply_damage, DamageKind, DamageSource};
use delve_core::defense::{estimate, RateMode, Resistance, ResistanceProfile, Traits};
use delve_core::player::{Class, Player, Race};
use delve_core::rng::ScriptedDice;
use delve_core::sink::RecordingSink;
use delve_core::status::StatusKind;
use delve_core::Ctx;

fn hazard() -> DamageSource<'static> {
    DamageSource::hazard("a test", 10)
}

#[test]
fn unresisted_poison_hit() {
    let constants = CombatConstants::default();
    let mut sink = RecordingSink::new();
    let mut dice = ScriptedDice::constant(0);
    let mut ctx = Ctx::new(&mut dice, &mut sink, &constants);
    let mut player = Player::default();

    let event = apply_damage(&mut player, DamageKind::Poison, 20, &mut hazard(), &mut ctx);

    assert_eq!(event.resistance, Resistance::Neutral);
    assert_eq!(event.amount, 20);
    assert_eq!(event.get_damage, 20);
    assert_eq!(player.chp, 80);
    assert_eq!(player.remaining(StatusKind::Poisoned), 10);
    assert!(event.secondary_applied);
    assert_eq!(event.statuses.len(), 1);
    assert_eq!(event.statuses[0].kind, StatusKind::Poisoned);
    assert_eq!((event.statuses[0].before, event.statuses[0].after), (0, 10));
}

#[test]
fn poison_duration_tracks_the_roll() {
    let constants = CombatConstants::default();
    let mut sink = RecordingSink::new();
    // hurt-chance roll misses, then random(0..20) lands on 7
    let mut dice = ScriptedDice::new([5, 7]).with_fallback(0);
    let mut ctx = Ctx::new(&mut dice, &mut sink, &constants);
    let mut player = Player::default();

    apply_damage(&mut player, DamageKind::Poison, 20, &mut hazard(), &mut ctx);
    assert_eq!(player.remaining(StatusKind::Poisoned), 17);
}

#[test]
fn elements_skip_the_rate_table() {
    let constants = CombatConstants::default();
    let mut sink = RecordingSink::new();
    let mut dice = ScriptedDice::constant(0);
    let mut ctx = Ctx::new(&mut dice, &mut sink, &constants);
    let mut player = Player::default().with_innate(Traits::RES_FIRE);
    let profile = ResistanceProfile::of(&player);

    assert_eq!(profile.classify(DamageKind::Fire), Resistance::Resistant);
    for mode in [RateMode::Min, RateMode::Average, RateMode::Max] {
        assert_eq!(estimate(DamageKind::Fire, 30, &profile, mode), 30);
    }

    let event = apply_damage(&mut player, DamageKind::Fire, 30, &mut hazard(), &mut ctx);
    assert_eq!(event.amount, 30);
    // the fire damage function applies the resistance itself
    assert_eq!(event.get_damage, 10);

    // light still blinds through its own table
    let event = apply_damage(&mut player, DamageKind::Lite, 30, &mut hazard(), &mut ctx);
    assert!(event.secondary_applied);
    assert!(player.is_active(StatusKind::Blind));
}

#[test]
fn stun_tiers_rise_and_recover() {
    let constants = CombatConstants::default();
    let mut sink = RecordingSink::new();
    // heavy-blow checks always fail
    let mut dice = ScriptedDice::constant(999);
    let mut player = Player::default();
    let mut tiers = Vec::new();
    {
        let mut ctx = Ctx::new(&mut dice, &mut sink, &constants);
        for v in [0, 10, 60, 120, 40, 0] {
            player.set_tiered(StatusKind::Stunned, v, &mut ctx);
            tiers.push(player.status().stun_tier());
        }
    }

    assert_eq!(tiers, vec![0, 1, 2, 3, 2, 0]);
    // two heavy-blow rolls for each of the three increases, none otherwise
    assert_eq!(dice.calls(), 3 * 2);
    let recovered = sink
        .texts()
        .iter()
        .filter(|t| **t == "You are no longer stunned.")
        .count();
    assert_eq!(recovered, 1);
}

#[test]
fn stun_immune_race_ignores_stuns() {
    let constants = CombatConstants::default();
    let mut sink = RecordingSink::new();
    let mut dice = ScriptedDice::constant(0);
    let mut player = Player::new(Race::Golem, Class::Warrior);
    let notice = {
        let mut ctx = Ctx::new(&mut dice, &mut sink, &constants);
        player.set_tiered(StatusKind::Stunned, 500, &mut ctx)
    };

    assert!(!notice);
    assert_eq!(player.status().stun_tier(), 0);
    assert!(sink.messages.is_empty());
    assert_eq!(dice.calls(), 0);
}

#[test]
fn onset_fires_once() {
    let constants = CombatConstants::default();
    let mut sink = RecordingSink::new();
    let mut dice = ScriptedDice::constant(0);
    let onset = StatusKind::Confused.spec().onset;
    let mut player = Player::default();
    {
        let mut ctx = Ctx::new(&mut dice, &mut sink, &constants);
        assert!(player.set_timed(StatusKind::Confused, 5, &mut ctx));
        assert!(!player.set_timed(StatusKind::Confused, 3, &mut ctx));
    }
    assert_eq!(sink.texts().iter().filter(|t| **t == onset).count(), 1);
    assert_eq!(player.remaining(StatusKind::Confused), 3);
}

#[test]
fn cut_tiers_climb_one_message_each() {
    let constants = CombatConstants::default();
    let mut sink = RecordingSink::new();
    let mut dice = ScriptedDice::constant(999);
    let mut player = Player::default();

    let cut_messages = |sink: &RecordingSink| {
        sink.messages
            .iter()
            .filter(|(k, t)| k == "cut" && !t.contains("scarred"))
            .count()
    };

    let mut tiers = Vec::new();
    let mut counts = Vec::new();
    for v in [0, 5, 15, 30, 60, 150, 250, 1500] {
        let before = cut_messages(&sink);
        {
            let mut ctx = Ctx::new(&mut dice, &mut sink, &constants);
            player.set_tiered(StatusKind::Cut, v, &mut ctx);
        }
        tiers.push(player.status().cut_tier());
        counts.push(cut_messages(&sink) - before);
    }
    assert_eq!(tiers, vec![0, 1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(counts, vec![0, 1, 1, 1, 1, 1, 1, 1]);
}

#[test]
fn cut_within_a_tier_is_silent() {
    let constants = CombatConstants::default();
    let mut sink = RecordingSink::new();
    let mut dice = ScriptedDice::constant(999);
    let mut player = Player::default();
    let mut ctx = Ctx::new(&mut dice, &mut sink, &constants);

    assert!(player.set_tiered(StatusKind::Cut, 15, &mut ctx));
    assert!(!player.set_tiered(StatusKind::Cut, 20, &mut ctx));
    drop(ctx);
    assert_eq!(sink.count("cut"), 1);
    assert_eq!(player.remaining(StatusKind::Cut), 20);
}
