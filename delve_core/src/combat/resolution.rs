//! Monster blow resolution
//!
//! Each blow runs `Pending -> AcMitigated -> EffectDispatched -> Resolved`:
//! 1. Roll to hit against armour (protection from evil may repel it)
//! 2. Roll damage; armour soaks physical effects, Superhurt may crit
//! 3. Subtract HP, then the effect's secondary bundle unless the decoy
//!    took it or the player died
//! 4. Cut/stun criticals, retaliation auras, exploding attackers

use super::critical::{critical_cut, critical_stun, monster_critical};
use super::monster::{monster_damage_mod, monster_take_hit, Attacker, RaceFlags};
use super::result::{AttackSummary, BlowStage, MonsterAttackOutcome};
use super::{Blow, BlowEffect, BlowMethod};
use crate::avatar::Virtue;
use crate::ctx::Ctx;
use crate::damage::{acid_damage, cold_damage, elec_damage, fire_damage, smart_learn, time_warp};
use crate::defense::{check_hit, mitigate_by_ac, Opposing, ResistanceProfile, Traits};
use crate::player::{adj_dex_safe, HitKind, LifeType, Player, Race};
use crate::sink::Dirty;
use crate::status::StatusKind;
use crate::types::{Element, LearnedResist, Stat};

/// Most blows a monster gets per turn
pub const MAX_BLOWS: usize = 4;

/// Superhurt's crit check. `None` means the blow is an ordinary Hurt.
pub fn try_critical(
    rlev: i32,
    ac: i32,
    damage: i32,
    evaded: bool,
    ctx: &mut Ctx<'_>,
) -> Option<i32> {
    let lucky = ctx.rng.randint1(rlev * 2 + 300) > ac + 200 || ctx.rng.one_in(13);
    if !lucky || evaded {
        return None;
    }
    Some(damage.max(mitigate_by_ac(damage, ac) * 2))
}

/// Resolve one blow from `attacker`
pub fn resolve_monster_blow(
    player: &mut Player,
    attacker: &mut Attacker,
    blow: &Blow,
    ctx: &mut Ctx<'_>,
) -> MonsterAttackOutcome {
    let mut out = MonsterAttackOutcome::new(blow.method, blow.effect);
    if player.is_dead || !attacker.alive {
        out.advance(BlowStage::Resolved);
        return out;
    }

    let rlev = attacker.level();
    let ac = player.ac();
    let stunned = attacker.stunned;
    let name = attacker.race.cap_name();
    ctx.sink.disturb();

    let lands = blow.effect == BlowEffect::None
        || check_hit(blow.effect.power(), rlev, ac, stunned, ctx.rng);
    if !lands {
        if blow.method.shows_miss() {
            ctx.msg("combat", &format!("{name} misses you."));
        }
        out.advance(BlowStage::Resolved);
        return out;
    }
    out.hit = true;

    if player.is_active(StatusKind::ProtectionFromEvil)
        && attacker.race.flags.contains(RaceFlags::EVIL)
        && player.level >= rlev
        && ctx.rng.randint0(100) + player.level > 50
    {
        ctx.msg("combat", &format!("{name} is repelled."));
        out.repelled = true;
        out.advance(BlowStage::Resolved);
        return out;
    }

    let verb = blow.method.verb(ctx.rng);
    ctx.msg("combat", &format!("{name} {verb}"));

    out.evaded = player.decoy_active();
    out.raw_damage = blow.dice.roll(ctx.rng);
    let mut damage = out.raw_damage;

    match blow.effect {
        BlowEffect::None => damage = 0,
        BlowEffect::Superhurt => match try_critical(rlev, ac, damage, out.evaded, ctx) {
            Some(crit) => {
                ctx.msg("combat", "It was a *GREAT* hit!");
                out.critical = true;
                damage = crit;
            }
            None => damage = mitigate_by_ac(damage, ac),
        },
        BlowEffect::Hurt | BlowEffect::Shatter => damage = mitigate_by_ac(damage, ac),
        _ => {}
    }
    out.damage = damage;
    out.advance(BlowStage::AcMitigated);

    dispatch_effect(player, attacker, blow, &mut out, ctx);
    out.advance(BlowStage::EffectDispatched);

    if !out.evaded && !player.is_dead && out.damage > 0 {
        apply_blow_critical(player, blow, &mut out, ctx);
    }

    if blow.method.is_touch() && !out.evaded && !player.is_dead {
        retaliate(player, attacker, &mut out, ctx);
    }

    if blow.method == BlowMethod::Explode && attacker.alive && !player.is_dead {
        let overkill = attacker.hp + 1;
        if monster_take_hit(attacker, overkill, " explodes into tiny shreds.", player, ctx) {
            out.attacker_died = true;
            out.blinked = false;
        }
    }

    out.advance(BlowStage::Resolved);
    out
}

/// Run all of a monster's blows
pub fn resolve_monster_attack(
    player: &mut Player,
    attacker: &mut Attacker,
    ctx: &mut Ctx<'_>,
) -> AttackSummary {
    let mut summary = AttackSummary::default();
    let blows: Vec<Blow> = attacker.race.blows.iter().take(MAX_BLOWS).copied().collect();

    for blow in &blows {
        if player.is_dead || !attacker.alive {
            break;
        }
        let out = resolve_monster_blow(player, attacker, blow, ctx);
        summary.total_damage += out.get_damage;
        summary.blinked |= out.blinked;
        summary.attacker_died |= out.attacker_died;
        summary.blows.push(out);
    }

    if summary.blinked && attacker.alive && !player.is_dead {
        ctx.msg("combat", "There is a puff of smoke!");
        ctx.sink.monster_blinks(attacker.id);
    } else {
        summary.blinked = false;
    }
    summary.player_died = player.is_dead;
    tracing::debug!(
        monster = attacker.id.0,
        blows = summary.blows.len(),
        hits = summary.hits(),
        damage = summary.total_damage,
        "monster attack resolved"
    );
    summary
}

fn hurt(
    player: &mut Player,
    attacker: &Attacker,
    out: &mut MonsterAttackOutcome,
    ctx: &mut Ctx<'_>,
) {
    let killer = attacker.race.killer_name();
    out.get_damage += player.take_hit(HitKind::Attack, out.damage, &killer, ctx);
}

/// Whether the secondary part of the blow may run
fn lands_secondary(player: &Player, out: &MonsterAttackOutcome) -> bool {
    !player.is_dead && !out.evaded
}

fn learn(attacker: &mut Attacker, tag: LearnedResist, player: &Player, ctx: &mut Ctx<'_>) {
    let profile = ResistanceProfile::of(player);
    smart_learn(attacker, tag, player, &profile, ctx);
}

fn dispatch_effect(
    player: &mut Player,
    attacker: &mut Attacker,
    blow: &Blow,
    out: &mut MonsterAttackOutcome,
    ctx: &mut Ctx<'_>,
) {
    let rlev = attacker.level();

    if let Some(element) = blow.effect.element() {
        let killer = attacker.race.killer_name();
        let (text, tag) = match element {
            Element::Acid => ("You are covered in acid!", LearnedResist::Acid),
            Element::Elec => ("You are struck by electricity!", LearnedResist::Elec),
            Element::Fire => ("You are enveloped in flames!", LearnedResist::Fire),
            Element::Cold => ("You are covered with frost!", LearnedResist::Cold),
        };
        ctx.msg("combat", text);
        out.get_damage += match element {
            Element::Acid => acid_damage(player, out.damage, &killer, ctx),
            Element::Elec => elec_damage(player, out.damage, &killer, ctx),
            Element::Fire => fire_damage(player, out.damage, &killer, ctx),
            Element::Cold => cold_damage(player, out.damage, &killer, ctx),
        };
        learn(attacker, tag, player, ctx);
        return;
    }

    if let Some(stat) = blow.effect.lost_stat() {
        hurt(player, attacker, out, ctx);
        if lands_secondary(player, out) {
            player.do_dec_stat(stat, ctx);
        }
        return;
    }

    match blow.effect {
        BlowEffect::DrainMana => {
            if out.evaded {
                ctx.msg("combat", "The attack hits Shadow, but you are unharmed!");
            } else {
                player.lose_mana(out.damage, ctx);
            }
            learn(attacker, LearnedResist::Mana, player, ctx);
            return;
        }
        _ => hurt(player, attacker, out, ctx),
    }
    if !lands_secondary(player, out) {
        return;
    }

    let traits = player.traits();
    match blow.effect {
        BlowEffect::Shatter => {
            if out.damage > 23 {
                ctx.sink.earthquake(8);
            }
        }
        BlowEffect::Poison => {
            if !poison_resisted(player, traits) {
                let turns = ctx.rng.randint1(rlev) + 5;
                player.mod_poison(turns, ctx);
            }
            learn(attacker, LearnedResist::Pois, player, ctx);
        }
        BlowEffect::UnBonus => {
            if !traits.contains(Traits::RES_DISEN) && ctx.sink.disenchant_equipment() {
                ctx.dirty(Dirty::BONUS | Dirty::EQUIPPY);
            }
            learn(attacker, LearnedResist::Disen, player, ctx);
        }
        BlowEffect::UnPower => {
            let charges = ctx.sink.drain_charges();
            if charges > 0 {
                ctx.msg("combat", "Energy drains from your pack!");
                if attacker.heal(rlev * charges) > 0 {
                    ctx.dirty(Dirty::HEALTH);
                }
            }
        }
        BlowEffect::EatGold | BlowEffect::EatItem => steal(player, attacker, blow.effect, out, ctx),
        BlowEffect::EatFood => {
            if ctx.sink.eat_food() {
                ctx.msg("combat", "Your food was eaten!");
            }
        }
        BlowEffect::EatLight => {
            let turns = 250 + ctx.rng.randint1(250);
            if ctx.sink.drain_light(turns) {
                ctx.msg("combat", "Your light dims.");
            }
        }
        BlowEffect::Blind => {
            if !traits.contains(Traits::RES_BLIND) {
                let turns = 10 + ctx.rng.randint1(rlev);
                player.mod_blind(turns, ctx);
            }
            learn(attacker, LearnedResist::Blind, player, ctx);
        }
        BlowEffect::Confuse => {
            if !traits.contains(Traits::RES_CONF) {
                let turns = 3 + ctx.rng.randint1(rlev);
                player.mod_confused(turns, ctx);
            }
            learn(attacker, LearnedResist::Conf, player, ctx);
        }
        BlowEffect::Terrify => {
            if traits.contains(Traits::RES_FEAR) {
                ctx.msg("combat", "You stand your ground!");
            } else if ctx.rng.randint0(100 + rlev / 2) < player.saving_throw() {
                ctx.msg("combat", "You stand your ground!");
            } else {
                let turns = 3 + ctx.rng.randint1(rlev);
                player.mod_afraid(turns, ctx);
            }
            learn(attacker, LearnedResist::Fear, player, ctx);
        }
        BlowEffect::Paralyze => {
            if traits.contains(Traits::FREE_ACT) {
                ctx.msg("combat", "You are unaffected!");
            } else if ctx.rng.randint0(100 + rlev / 2) < player.saving_throw() {
                ctx.msg("combat", "You resist the effects!");
            } else if !player.is_active(StatusKind::Paralyzed) {
                let turns = 3 + ctx.rng.randint1(rlev);
                player.set_paralyzed(turns, ctx);
            }
            learn(attacker, LearnedResist::Free, player, ctx);
        }
        BlowEffect::LoseAll => {
            for &stat in Stat::all() {
                player.do_dec_stat(stat, ctx);
            }
        }
        BlowEffect::ExpDrain10 => drain_tier(player, 10, 95, ctx),
        BlowEffect::ExpDrain20 => drain_tier(player, 20, 90, ctx),
        BlowEffect::ExpDrain40 => drain_tier(player, 40, 75, ctx),
        BlowEffect::ExpDrain80 => drain_tier(player, 80, 50, ctx),
        BlowEffect::Disease => {
            if !poison_resisted(player, traits) {
                let turns = ctx.rng.randint1(rlev) + 5;
                player.mod_poison(turns, ctx);
            }
            if ctx.rng.randint1(100) < 11
                && player.race != Race::Android
                && !player.is_sustained(Stat::Con)
            {
                let amount = ctx.rng.randint1(10);
                let permanent = ctx.rng.one_in(10);
                if player.dec_stat(Stat::Con, amount, permanent, ctx) {
                    ctx.msg("combat", "Disease saps your health.");
                }
            }
        }
        BlowEffect::Time => {
            if !traits.contains(Traits::RES_TIME) {
                time_warp(player, ctx);
            }
        }
        BlowEffect::DrainLife => {
            let drain =
                ctx.rng.damroll(20, 6) + (player.exp / 100) * ctx.constants.drain_life_factor;
            let held = !player.drain_exp(drain, drain / 10, 50, ctx);
            if player.life() == LifeType::Living && !held && attacker.heal(out.damage) > 0 {
                ctx.msg("combat", &format!("{} appears healthier.", attacker.race.cap_name()));
                ctx.dirty(Dirty::HEALTH);
            }
        }
        BlowEffect::Inertia => {
            let turns = 4 + ctx.rng.randint0(rlev) / 10;
            player.mod_slow(turns, ctx);
        }
        BlowEffect::Stun => {
            let stun = 10 + ctx.rng.randint1(rlev / 4);
            player.mod_stun(stun, ctx);
        }
        _ => {}
    }
}

fn poison_resisted(player: &Player, traits: Traits) -> bool {
    traits.contains(Traits::RES_POIS)
        || ResistanceProfile::of(player).opposing.contains(Opposing::POIS)
}

fn drain_tier(player: &mut Player, dice: i32, hold: i32, ctx: &mut Ctx<'_>) {
    let drain = ctx.rng.damroll(dice, 6) + (player.exp / 100) * ctx.constants.drain_life_factor;
    player.drain_exp(drain, drain / 10, hold, ctx);
}

/// Thieves: a quick player keeps their belongings
fn steal(
    player: &mut Player,
    attacker: &Attacker,
    effect: BlowEffect,
    out: &mut MonsterAttackOutcome,
    ctx: &mut Ctx<'_>,
) {
    let dex = player.stats.cur(Stat::Dex);
    let chance = adj_dex_safe(dex) + player.level;
    let caught = !player.is_active(StatusKind::Paralyzed) && ctx.rng.randint0(100) < chance;
    tracing::debug!(chance, caught, ?effect, "theft check");

    if caught {
        out.theft_caught = true;
        let text = if effect == BlowEffect::EatGold {
            "You quickly protect your money pouch!"
        } else {
            "You grab hold of your backpack!"
        };
        ctx.msg("combat", text);
        // caught thieves still slip away two times in three
        if ctx.rng.randint0(3) != 0 {
            out.blinked = true;
        }
        return;
    }

    if effect == BlowEffect::EatGold {
        let mut gold = player.gold / 10 + ctx.rng.randint1(25);
        if gold < 2 {
            gold = 2;
        }
        if gold > 5000 {
            gold = player.gold / 20 + ctx.rng.randint1(3000);
        }
        gold = gold.min(player.gold);
        player.gold -= gold;
        out.gold_stolen = gold;
        if gold <= 0 {
            ctx.msg("combat", "Nothing was stolen.");
        } else if player.gold > 0 {
            ctx.msg("combat", "Your purse feels lighter.");
            ctx.msg("combat", &format!("{gold} coins were stolen!"));
            player.chg_virtue(Virtue::Sacrifice, 1, ctx);
        } else {
            ctx.msg("combat", "Your purse feels lighter.");
            ctx.msg("combat", "All of your coins were stolen!");
            player.chg_virtue(Virtue::Sacrifice, 2, ctx);
        }
        ctx.dirty(Dirty::GOLD);
        out.blinked = true;
        return;
    }

    if let Some(item) = ctx.sink.steal_item(attacker.id) {
        ctx.msg("combat", &format!("Your {item} was stolen!"));
        player.chg_virtue(Virtue::Sacrifice, 1, ctx);
        ctx.dirty(Dirty::INVENTORY);
        out.item_stolen = Some(item);
        out.blinked = true;
    }
}

fn apply_blow_critical(
    player: &mut Player,
    blow: &Blow,
    out: &mut MonsterAttackOutcome,
    ctx: &mut Ctx<'_>,
) {
    let mut cut = blow.method.can_cut();
    let mut stun = blow.method.can_stun();
    if cut && stun {
        if ctx.rng.randint0(100) < 50 {
            cut = false;
        } else {
            stun = false;
        }
    }
    if cut {
        let severity = monster_critical(blow.dice.num, blow.dice.sides, out.damage, ctx.rng);
        let amount = critical_cut(severity, ctx.rng);
        if amount > 0 {
            out.cut = amount;
            player.mod_cut(amount, ctx);
        }
    }
    if stun {
        let severity = monster_critical(blow.dice.num, blow.dice.sides, out.damage, ctx.rng);
        let amount = critical_stun(severity, ctx.rng);
        if amount > 0 {
            out.stun = amount;
            player.mod_stun(amount, ctx);
        }
    }
}

struct Aura {
    trait_flag: Traits,
    immune: RaceFlags,
    text: &'static str,
    death: &'static str,
}

const AURAS: [Aura; 3] = [
    Aura {
        trait_flag: Traits::SH_FIRE,
        immune: RaceFlags::IM_FIRE,
        text: "is suddenly very hot!",
        death: " turns into a pile of ash.",
    },
    Aura {
        trait_flag: Traits::SH_ELEC,
        immune: RaceFlags::IM_ELEC,
        text: "gets zapped!",
        death: " turns into a pile of cinder.",
    },
    Aura {
        trait_flag: Traits::SH_COLD,
        immune: RaceFlags::IM_COLD,
        text: "is very cold!",
        death: " was frozen.",
    },
];

/// Fire, lightning and frost auras burn whoever touches the player
fn retaliate(
    player: &mut Player,
    attacker: &mut Attacker,
    out: &mut MonsterAttackOutcome,
    ctx: &mut Ctx<'_>,
) {
    let traits = player.traits();
    for aura in &AURAS {
        if !attacker.alive || !traits.contains(aura.trait_flag) {
            continue;
        }
        if attacker.race.flags.contains(aura.immune) {
            continue;
        }
        let raw = ctx.rng.damroll(2, 6);
        let dam = monster_damage_mod(&attacker.race, raw, ctx);
        ctx.msg("combat", &format!("{} {}", attacker.race.cap_name(), aura.text));
        if monster_take_hit(attacker, dam, aura.death, player, ctx) {
            out.attacker_died = true;
            out.blinked = false;
        }
    }
}
