//! EffectApplier - per-kind secondary effects
//!
//! Every handler follows the same order: HP damage first, then the
//! secondary effects, and only while the player is alive and the decoy did
//! not take the hit.

use super::elemental::{acid_damage, cold_damage, elec_damage, fire_damage};
use super::{DamageEvent, DamageKind, DamageSource};
use crate::ctx::Ctx;
use crate::defense::{Opposing, ResistanceProfile, Traits};
use crate::player::{HitKind, Player, Race};
use crate::status::StatusKind;
use crate::types::{Element, Stat};

pub(crate) type Handler =
    fn(&mut Player, &mut DamageEvent, &ResistanceProfile, &mut DamageSource<'_>, &mut Ctx<'_>);

/// `randint0(100 + level / 2) < max(5, save)`
pub fn saving_throw_holds(player: &Player, level: i32, ctx: &mut Ctx<'_>) -> bool {
    let save = player.saving_throw().max(5);
    let roll = ctx.rng.randint0(100 + level / 2);
    let held = roll < save;
    tracing::debug!(roll, save, held, "saving throw");
    held
}

fn hit(player: &mut Player, event: &mut DamageEvent, ctx: &mut Ctx<'_>) {
    let taken = player.take_hit(HitKind::Attack, event.amount, &event.killer, ctx);
    event.get_damage += taken;
}

/// Whether secondary effects may run; records the answer on the event
fn open(player: &Player, event: &mut DamageEvent) -> bool {
    let ok = !player.is_dead && !event.evaded && !event.saved;
    event.secondary_applied = ok;
    ok
}

/// Saving-throw kinds: a successful save negates the whole effect.
/// The decoy takes the hit before a save is ever rolled.
fn saved(
    player: &Player,
    event: &mut DamageEvent,
    source: &DamageSource<'_>,
    ctx: &mut Ctx<'_>,
) -> bool {
    if !event.evaded && saving_throw_holds(player, source.level, ctx) {
        ctx.msg("damage", "You resist the effects!");
        event.saved = true;
        event.amount = 0;
    }
    event.saved
}

fn blind_note(player: &Player, ctx: &mut Ctx<'_>, text: &str) {
    if player.is_active(StatusKind::Blind) {
        ctx.msg("damage", text);
    }
}

/// Stun from sound-like blasts, capped for large hits
fn blast_stun(amount: i32, ctx: &mut Ctx<'_>) -> i32 {
    let cap = if amount > 90 { 35 } else { amount / 3 + 5 };
    ctx.rng.randint1(cap)
}

fn element(
    elem: Element,
    player: &mut Player,
    event: &mut DamageEvent,
    ctx: &mut Ctx<'_>,
    apply: fn(&mut Player, i32, &str, &mut Ctx<'_>) -> i32,
) {
    let note = match elem {
        Element::Acid => "You are hit by acid!",
        Element::Elec => "You are hit by lightning!",
        Element::Fire => "You are hit by fire!",
        Element::Cold => "You are hit by cold!",
    };
    blind_note(player, ctx, note);
    let taken = apply(player, event.amount, &event.killer, ctx);
    event.get_damage += taken;
    open(player, event);
}

pub(crate) fn acid(
    p: &mut Player,
    e: &mut DamageEvent,
    _: &ResistanceProfile,
    _: &mut DamageSource<'_>,
    ctx: &mut Ctx<'_>,
) {
    element(Element::Acid, p, e, ctx, acid_damage);
}

pub(crate) fn elec(
    p: &mut Player,
    e: &mut DamageEvent,
    _: &ResistanceProfile,
    _: &mut DamageSource<'_>,
    ctx: &mut Ctx<'_>,
) {
    element(Element::Elec, p, e, ctx, elec_damage);
}

pub(crate) fn fire(
    p: &mut Player,
    e: &mut DamageEvent,
    _: &ResistanceProfile,
    _: &mut DamageSource<'_>,
    ctx: &mut Ctx<'_>,
) {
    element(Element::Fire, p, e, ctx, fire_damage);
}

pub(crate) fn cold(
    p: &mut Player,
    e: &mut DamageEvent,
    _: &ResistanceProfile,
    _: &mut DamageSource<'_>,
    ctx: &mut Ctx<'_>,
) {
    element(Element::Cold, p, e, ctx, cold_damage);
}

/// Damage with no secondary effects
pub(crate) fn plain(
    p: &mut Player,
    e: &mut DamageEvent,
    _: &ResistanceProfile,
    _: &mut DamageSource<'_>,
    ctx: &mut Ctx<'_>,
) {
    hit(p, e, ctx);
    open(p, e);
}

fn poison_resisted(profile: &ResistanceProfile) -> bool {
    profile.has(Traits::RES_POIS) || profile.opposing.contains(Opposing::POIS)
}

/// Shared by poison and nuke. Returns whether the venom took hold.
fn venom(
    player: &mut Player,
    event: &mut DamageEvent,
    profile: &ResistanceProfile,
    ctx: &mut Ctx<'_>,
) -> bool {
    let resisted = poison_resisted(profile);
    blind_note(player, ctx, "You are hit by poison!");
    if !resisted && !event.evaded && ctx.rng.one_in(ctx.constants.hurt_chance) {
        player.do_dec_stat(Stat::Con, ctx);
    }
    hit(player, event, ctx);
    if !open(player, event) || resisted {
        return false;
    }
    let extra = ctx.rng.randint0(event.amount) + 10;
    player.mod_poison(extra, ctx);
    true
}

pub(crate) fn poison(
    p: &mut Player,
    e: &mut DamageEvent,
    profile: &ResistanceProfile,
    _: &mut DamageSource<'_>,
    ctx: &mut Ctx<'_>,
) {
    venom(p, e, profile, ctx);
}

pub(crate) fn nuke(
    p: &mut Player,
    e: &mut DamageEvent,
    profile: &ResistanceProfile,
    _: &mut DamageSource<'_>,
    ctx: &mut Ctx<'_>,
) {
    if !venom(p, e, profile, ctx) {
        return;
    }
    if ctx.rng.one_in(5) {
        ctx.msg("damage", "You undergo a freakish metamorphosis!");
        if ctx.rng.one_in(4) {
            ctx.sink.polymorph_self();
        } else {
            p.shuffle_stats(ctx);
        }
    }
    if ctx.rng.one_in(6) {
        ctx.sink.inventory_damage(Element::Acid, 2);
    }
}

pub(crate) fn plasma(
    p: &mut Player,
    e: &mut DamageEvent,
    profile: &ResistanceProfile,
    _: &mut DamageSource<'_>,
    ctx: &mut Ctx<'_>,
) {
    blind_note(p, ctx, "You are hit by something *HOT*!");
    hit(p, e, ctx);
    if open(p, e) && !profile.has(Traits::RES_SOUND) {
        let cap = if e.amount > 40 { 35 } else { e.amount * 3 / 4 + 5 };
        let stun = ctx.rng.randint1(cap);
        p.mod_stun(stun, ctx);
    }
    let fire_safe = profile.traits.intersects(Traits::RES_FIRE | Traits::IM_FIRE)
        || profile.opposing.contains(Opposing::FIRE);
    if !fire_safe {
        ctx.sink.inventory_damage(Element::Fire, 3);
    }
}

pub(crate) fn nether(
    p: &mut Player,
    e: &mut DamageEvent,
    profile: &ResistanceProfile,
    _: &mut DamageSource<'_>,
    ctx: &mut Ctx<'_>,
) {
    blind_note(p, ctx, "You are hit by nether forces!");
    if p.race == Race::Spectre && !e.evaded {
        ctx.msg("damage", "You feel invigorated!");
        p.hp_player(e.amount / 4, ctx);
        e.amount = 0;
        open(p, e);
        return;
    }
    hit(p, e, ctx);
    if open(p, e) && !profile.has(Traits::RES_NETHER) {
        let exp = p.exp;
        p.drain_exp(200 + exp / 100, 200 + exp / 1000, 75, ctx);
    }
}

pub(crate) fn water(
    p: &mut Player,
    e: &mut DamageEvent,
    profile: &ResistanceProfile,
    _: &mut DamageSource<'_>,
    ctx: &mut Ctx<'_>,
) {
    blind_note(p, ctx, "You are hit by something wet!");
    hit(p, e, ctx);
    if !open(p, e) || profile.has(Traits::RES_WATER) {
        return;
    }
    if !profile.has(Traits::RES_SOUND) {
        let stun = ctx.rng.randint1(40);
        p.mod_stun(stun, ctx);
    }
    if !profile.has(Traits::RES_CONF) {
        let conf = ctx.rng.randint1(5) + 5;
        p.mod_confused(conf, ctx);
    }
    if ctx.rng.one_in(5) {
        ctx.sink.inventory_damage(Element::Cold, 3);
    }
}

pub(crate) fn chaos(
    p: &mut Player,
    e: &mut DamageEvent,
    profile: &ResistanceProfile,
    _: &mut DamageSource<'_>,
    ctx: &mut Ctx<'_>,
) {
    blind_note(p, ctx, "You are hit by a wave of anarchy!");
    hit(p, e, ctx);
    if !open(p, e) {
        return;
    }
    let res_chaos = profile.has(Traits::RES_CHAOS);
    if !profile.has(Traits::RES_CONF) {
        let conf = ctx.rng.randint0(20) + 10;
        p.mod_confused(conf, ctx);
    }
    if !res_chaos {
        let image = ctx.rng.randint1(10);
        p.mod_hallucination(image, ctx);
        if ctx.rng.one_in(3) {
            ctx.msg("damage", "Your body is twisted by chaos!");
            ctx.sink.gain_mutation();
        }
    }
    if !profile.has(Traits::RES_NETHER) && !res_chaos {
        let exp = p.exp;
        p.drain_exp(5000 + exp / 100, 500 + exp / 1000, 75, ctx);
    }
    if !res_chaos || ctx.rng.one_in(9) {
        ctx.sink.inventory_damage(Element::Elec, 2);
        ctx.sink.inventory_damage(Element::Fire, 2);
    }
}

pub(crate) fn shards(
    p: &mut Player,
    e: &mut DamageEvent,
    profile: &ResistanceProfile,
    _: &mut DamageSource<'_>,
    ctx: &mut Ctx<'_>,
) {
    blind_note(p, ctx, "You are hit by something sharp!");
    hit(p, e, ctx);
    let resisted = profile.has(Traits::RES_SHARDS);
    if open(p, e) && !resisted {
        p.mod_cut(e.amount, ctx);
    }
    if !resisted || ctx.rng.one_in(13) {
        ctx.sink.inventory_damage(Element::Cold, 2);
    }
}

pub(crate) fn sound(
    p: &mut Player,
    e: &mut DamageEvent,
    profile: &ResistanceProfile,
    _: &mut DamageSource<'_>,
    ctx: &mut Ctx<'_>,
) {
    blind_note(p, ctx, "You are hit by a loud noise!");
    hit(p, e, ctx);
    let resisted = profile.has(Traits::RES_SOUND);
    if open(p, e) && !resisted {
        let stun = blast_stun(e.amount, ctx);
        p.mod_stun(stun, ctx);
    }
    if !resisted || ctx.rng.one_in(13) {
        ctx.sink.inventory_damage(Element::Cold, 2);
    }
}

pub(crate) fn confusion(
    p: &mut Player,
    e: &mut DamageEvent,
    profile: &ResistanceProfile,
    _: &mut DamageSource<'_>,
    ctx: &mut Ctx<'_>,
) {
    blind_note(p, ctx, "You are hit by something puzzling!");
    hit(p, e, ctx);
    if open(p, e) && !profile.has(Traits::RES_CONF) {
        let conf = ctx.rng.randint1(20) + 10;
        p.mod_confused(conf, ctx);
    }
}

pub(crate) fn disenchant(
    p: &mut Player,
    e: &mut DamageEvent,
    profile: &ResistanceProfile,
    _: &mut DamageSource<'_>,
    ctx: &mut Ctx<'_>,
) {
    blind_note(p, ctx, "You are hit by something static!");
    hit(p, e, ctx);
    if open(p, e) && !profile.has(Traits::RES_DISEN) && ctx.sink.disenchant_equipment() {
        ctx.dirty(crate::sink::Dirty::BONUS | crate::sink::Dirty::EQUIPPY);
    }
}

/// Nexus scrambling: pull, teleport, level teleport or stat swap
pub(crate) fn apply_nexus(p: &mut Player, ctx: &mut Ctx<'_>) {
    match ctx.rng.randint1(7) {
        1..=3 => ctx.sink.teleport_player(0),
        4 | 5 => ctx.sink.teleport_player(200),
        6 => {
            if ctx.rng.randint0(100) < p.saving_throw() {
                ctx.msg("damage", "You resist the effects!");
            } else {
                ctx.sink.teleport_level();
            }
        }
        _ => {
            if ctx.rng.randint0(100) < p.saving_throw() {
                ctx.msg("damage", "You resist the effects!");
            } else {
                p.shuffle_stats(ctx);
            }
        }
    }
}

pub(crate) fn nexus(
    p: &mut Player,
    e: &mut DamageEvent,
    profile: &ResistanceProfile,
    _: &mut DamageSource<'_>,
    ctx: &mut Ctx<'_>,
) {
    blind_note(p, ctx, "You are hit by something strange!");
    hit(p, e, ctx);
    if open(p, e) && !profile.has(Traits::RES_NEXUS) {
        apply_nexus(p, ctx);
    }
}

pub(crate) fn force(
    p: &mut Player,
    e: &mut DamageEvent,
    profile: &ResistanceProfile,
    _: &mut DamageSource<'_>,
    ctx: &mut Ctx<'_>,
) {
    blind_note(p, ctx, "You are hit by kinetic force!");
    hit(p, e, ctx);
    if open(p, e) && !profile.has(Traits::RES_SOUND) {
        let stun = ctx.rng.randint1(20);
        p.mod_stun(stun, ctx);
    }
}

pub(crate) fn rocket(
    p: &mut Player,
    e: &mut DamageEvent,
    profile: &ResistanceProfile,
    _: &mut DamageSource<'_>,
    ctx: &mut Ctx<'_>,
) {
    blind_note(p, ctx, "There is an explosion!");
    hit(p, e, ctx);
    let res_shards = profile.has(Traits::RES_SHARDS);
    if open(p, e) {
        if !profile.has(Traits::RES_SOUND) {
            let stun = ctx.rng.randint1(20);
            p.mod_stun(stun, ctx);
        }
        if !res_shards {
            p.mod_cut(e.amount / 2, ctx);
        }
    }
    if !res_shards || ctx.rng.one_in(12) {
        ctx.sink.inventory_damage(Element::Cold, 3);
    }
}

pub(crate) fn inertia(
    p: &mut Player,
    e: &mut DamageEvent,
    _: &ResistanceProfile,
    _: &mut DamageSource<'_>,
    ctx: &mut Ctx<'_>,
) {
    blind_note(p, ctx, "You are hit by something slow!");
    hit(p, e, ctx);
    if open(p, e) {
        let slow = ctx.rng.randint0(4) + 4;
        p.mod_slow(slow, ctx);
    }
}

fn can_be_blinded(p: &Player, profile: &ResistanceProfile, resist: Traits) -> bool {
    !p.is_active(StatusKind::Blind) && !profile.traits.intersects(resist | Traits::RES_BLIND)
}

pub(crate) fn lite(
    p: &mut Player,
    e: &mut DamageEvent,
    profile: &ResistanceProfile,
    _: &mut DamageSource<'_>,
    ctx: &mut Ctx<'_>,
) {
    blind_note(p, ctx, "You are hit by something!");
    if profile.has(Traits::VULN_LITE) && !e.evaded {
        ctx.msg("damage", "The light scorches your flesh!");
    }
    hit(p, e, ctx);
    if !open(p, e) {
        return;
    }
    if can_be_blinded(p, profile, Traits::RES_LITE) {
        let turns = ctx.rng.randint1(5) + 2;
        p.mod_blind(turns, ctx);
    }
    if p.is_active(StatusKind::WraithForm) {
        ctx.msg("damage", "The light forces you out of your incorporeal shadow form.");
        p.cure(StatusKind::WraithForm, ctx);
    }
}

pub(crate) fn dark(
    p: &mut Player,
    e: &mut DamageEvent,
    profile: &ResistanceProfile,
    _: &mut DamageSource<'_>,
    ctx: &mut Ctx<'_>,
) {
    blind_note(p, ctx, "You are hit by something!");
    hit(p, e, ctx);
    if open(p, e) && can_be_blinded(p, profile, Traits::RES_DARK | Traits::IM_DARK) {
        let turns = ctx.rng.randint1(5) + 2;
        p.mod_blind(turns, ctx);
    }
}

pub(crate) fn time(
    p: &mut Player,
    e: &mut DamageEvent,
    profile: &ResistanceProfile,
    _: &mut DamageSource<'_>,
    ctx: &mut Ctx<'_>,
) {
    blind_note(p, ctx, "You are hit by a blast from the past!");
    if profile.has(Traits::RES_TIME) {
        ctx.msg("damage", "You feel as if time is passing you by.");
    }
    hit(p, e, ctx);
    if !open(p, e) || profile.has(Traits::RES_TIME) {
        return;
    }
    time_warp(p, ctx);
}

/// Time attacks: lost experience, one aged stat, or all of them
pub(crate) fn time_warp(p: &mut Player, ctx: &mut Ctx<'_>) {
    match ctx.rng.randint1(10) {
        1..=5 => {
            ctx.msg("damage", "You feel like a chunk of the past has been ripped away.");
            let loss = 100 + (p.exp / 100) * ctx.constants.drain_life_factor;
            p.lose_exp(loss, ctx);
        }
        6..=9 => {
            let stat = Stat::from_index(ctx.rng.randint0(6) as usize);
            ctx.msg(
                "damage",
                &format!("You're not as {} as you used to be...", stat.gain_word()),
            );
            p.age_stat(stat, ctx);
        }
        _ => {
            ctx.msg("damage", "You're not as powerful as you used to be...");
            for &stat in Stat::all() {
                p.age_stat(stat, ctx);
            }
        }
    }
}

pub(crate) fn gravity(
    p: &mut Player,
    e: &mut DamageEvent,
    profile: &ResistanceProfile,
    _: &mut DamageSource<'_>,
    ctx: &mut Ctx<'_>,
) {
    blind_note(p, ctx, "You are hit by something heavy!");
    ctx.msg("damage", "Gravity warps around you.");
    hit(p, e, ctx);
    let floating = profile.has(Traits::LEVITATION);
    if open(p, e) {
        ctx.sink.teleport_player(5);
        if !floating {
            let slow = ctx.rng.randint0(4) + 4;
            p.mod_slow(slow, ctx);
        }
        if !(floating || profile.has(Traits::RES_SOUND)) {
            let stun = blast_stun(e.amount, ctx);
            p.mod_stun(stun, ctx);
        }
    }
    if !floating || ctx.rng.one_in(13) {
        ctx.sink.inventory_damage(Element::Cold, 2);
    }
}

pub(crate) fn meteor(
    p: &mut Player,
    e: &mut DamageEvent,
    profile: &ResistanceProfile,
    _: &mut DamageSource<'_>,
    ctx: &mut Ctx<'_>,
) {
    blind_note(p, ctx, "Something falls from the sky on you!");
    hit(p, e, ctx);
    open(p, e);
    if !profile.has(Traits::RES_SHARDS) || ctx.rng.one_in(13) {
        if !profile.has(Traits::IM_FIRE) {
            ctx.sink.inventory_damage(Element::Fire, 2);
        }
        ctx.sink.inventory_damage(Element::Cold, 2);
    }
}

pub(crate) fn ice(
    p: &mut Player,
    e: &mut DamageEvent,
    profile: &ResistanceProfile,
    _: &mut DamageSource<'_>,
    ctx: &mut Ctx<'_>,
) {
    blind_note(p, ctx, "You are hit by something sharp and cold!");
    let taken = cold_damage(p, e.amount, &e.killer, ctx);
    e.get_damage += taken;
    if !open(p, e) {
        return;
    }
    if !profile.has(Traits::RES_SHARDS) {
        let cut = ctx.rng.damroll(5, 8);
        p.mod_cut(cut, ctx);
    }
    if !profile.has(Traits::RES_SOUND) {
        let stun = ctx.rng.randint1(15);
        p.mod_stun(stun, ctx);
    }
    let cold_safe = profile.has(Traits::RES_COLD) || profile.opposing.contains(Opposing::COLD);
    if (!cold_safe || ctx.rng.one_in(12)) && !profile.has(Traits::IM_COLD) {
        ctx.sink.inventory_damage(Element::Cold, 3);
    }
}

pub(crate) fn death_ray(
    p: &mut Player,
    e: &mut DamageEvent,
    profile: &ResistanceProfile,
    _: &mut DamageSource<'_>,
    ctx: &mut Ctx<'_>,
) {
    blind_note(p, ctx, "You are hit by something extremely cold!");
    if profile.defense(DamageKind::DeathRay).immune {
        ctx.msg("damage", "You are unaffected!");
        open(p, e);
        return;
    }
    hit(p, e, ctx);
    open(p, e);
}

pub(crate) fn drain_mana(
    p: &mut Player,
    e: &mut DamageEvent,
    _: &ResistanceProfile,
    source: &mut DamageSource<'_>,
    ctx: &mut Ctx<'_>,
) {
    if p.csp == 0 {
        e.amount = 0;
        return;
    }
    if let Some(caster) = source.caster.as_deref() {
        ctx.msg(
            "damage",
            &format!("{} draws psychic energy from you!", caster.race.cap_name()),
        );
    }
    let drained = p.lose_mana(e.amount, ctx);
    e.amount = drained;
    open(p, e);

    if let Some(caster) = source.caster.as_deref_mut() {
        if caster.heal(drained) > 0 {
            ctx.msg("damage", &format!("{} appears healthier.", caster.race.cap_name()));
            ctx.dirty(crate::sink::Dirty::HEALTH);
        }
    }
}

pub(crate) fn mind_blast(
    p: &mut Player,
    e: &mut DamageEvent,
    profile: &ResistanceProfile,
    source: &mut DamageSource<'_>,
    ctx: &mut Ctx<'_>,
) {
    if saved(p, e, source, ctx) {
        return;
    }
    if !e.evaded {
        ctx.msg("damage", "Your mind is blasted by psionic energy.");
    }
    hit(p, e, ctx);
    if !open(p, e) {
        return;
    }
    if !profile.has(Traits::RES_CONF) {
        let conf = ctx.rng.randint0(4) + 4;
        p.mod_confused(conf, ctx);
    }
    if !profile.has(Traits::RES_CHAOS) && ctx.rng.one_in(3) {
        let image = ctx.rng.randint0(250) + 150;
        p.mod_hallucination(image, ctx);
    }
    p.lose_mana(50, ctx);
}

/// Keep draining while the saving throw keeps failing and the drain bites
fn drain_while_failing(p: &mut Player, stat: Stat, level: i32, ctx: &mut Ctx<'_>) {
    while ctx.rng.randint0(100 + level / 2) > p.saving_throw().max(5) {
        let before = p.stats.cur(stat);
        p.do_dec_stat(stat, ctx);
        if p.stats.cur(stat) == before {
            break;
        }
    }
}

pub(crate) fn brain_smash(
    p: &mut Player,
    e: &mut DamageEvent,
    profile: &ResistanceProfile,
    source: &mut DamageSource<'_>,
    ctx: &mut Ctx<'_>,
) {
    if saved(p, e, source, ctx) {
        return;
    }
    if !e.evaded {
        ctx.msg("damage", "Your mind is blasted by psionic energy.");
    }
    hit(p, e, ctx);
    if !open(p, e) {
        return;
    }
    p.lose_mana(100, ctx);
    if !profile.has(Traits::RES_BLIND) {
        let turns = 8 + ctx.rng.randint0(8);
        p.mod_blind(turns, ctx);
    }
    if !profile.has(Traits::RES_CONF) {
        let conf = ctx.rng.randint0(4) + 4;
        p.mod_confused(conf, ctx);
    }
    if !profile.has(Traits::FREE_ACT) {
        let para = ctx.rng.randint0(4) + 4;
        p.mod_paralyzed(para, ctx);
    }
    let slow = ctx.rng.randint0(4) + 4;
    p.mod_slow(slow, ctx);

    drain_while_failing(p, Stat::Int, source.level, ctx);
    drain_while_failing(p, Stat::Wis, source.level, ctx);

    if !profile.has(Traits::RES_CHAOS) {
        let image = ctx.rng.randint0(250) + 150;
        p.mod_hallucination(image, ctx);
    }
}

fn cause_wounds(
    p: &mut Player,
    e: &mut DamageEvent,
    source: &DamageSource<'_>,
    ctx: &mut Ctx<'_>,
    curse_chance: i32,
    heavy_chance: i32,
) {
    if saved(p, e, source, ctx) {
        return;
    }
    hit(p, e, ctx);
    if open(p, e) {
        ctx.sink.curse_equipment(curse_chance, heavy_chance);
    }
}

pub(crate) fn cause_light(
    p: &mut Player,
    e: &mut DamageEvent,
    _: &ResistanceProfile,
    source: &mut DamageSource<'_>,
    ctx: &mut Ctx<'_>,
) {
    cause_wounds(p, e, source, ctx, 15, 0);
}

pub(crate) fn cause_serious(
    p: &mut Player,
    e: &mut DamageEvent,
    _: &ResistanceProfile,
    source: &mut DamageSource<'_>,
    ctx: &mut Ctx<'_>,
) {
    let heavy = (source.level / 2 - 15).min(5);
    cause_wounds(p, e, source, ctx, 25, heavy);
}

pub(crate) fn cause_critical(
    p: &mut Player,
    e: &mut DamageEvent,
    _: &ResistanceProfile,
    source: &mut DamageSource<'_>,
    ctx: &mut Ctx<'_>,
) {
    let heavy = (source.level / 2 - 15).min(15);
    cause_wounds(p, e, source, ctx, 33, heavy);
}

pub(crate) fn cause_mortal(
    p: &mut Player,
    e: &mut DamageEvent,
    _: &ResistanceProfile,
    source: &mut DamageSource<'_>,
    ctx: &mut Ctx<'_>,
) {
    if saved(p, e, source, ctx) {
        return;
    }
    hit(p, e, ctx);
    if open(p, e) {
        let cut = ctx.rng.damroll(10, 10);
        p.mod_cut(cut, ctx);
    }
}

/// Hand of doom takes a share of current HP and never kills outright
pub(crate) fn hand_of_doom(
    p: &mut Player,
    e: &mut DamageEvent,
    _: &ResistanceProfile,
    source: &mut DamageSource<'_>,
    ctx: &mut Ctx<'_>,
) {
    if saved(p, e, source, ctx) {
        return;
    }
    let percent = 40 + ctx.rng.randint1(20);
    e.amount = percent * p.chp.max(0) / 100;
    hit(p, e, ctx);
    if !p.is_dead && p.chp < 1 {
        p.chp = 1;
    }
    if open(p, e) {
        ctx.msg("damage", "You feel your life fade away!");
        ctx.sink.curse_equipment(40, 20);
    }
}

/// Psychic spears cut through invulnerability
pub(crate) fn psychic_spear(
    p: &mut Player,
    e: &mut DamageEvent,
    _: &ResistanceProfile,
    _: &mut DamageSource<'_>,
    ctx: &mut Ctx<'_>,
) {
    blind_note(p, ctx, "You are hit by a spear of psychic energy!");
    let taken = p.take_hit(HitKind::Force, e.amount, &e.killer, ctx);
    e.get_damage += taken;
    open(p, e);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CombatConstants;
    use crate::player::Class;
    use crate::rng::ScriptedDice;
    use crate::sink::{RecordingSink, SinkCall};

    fn run(
        handler: Handler,
        player: &mut Player,
        kind: DamageKind,
        amount: i32,
        dice: &mut ScriptedDice,
    ) -> (DamageEvent, RecordingSink) {
        let mut sink = RecordingSink::new();
        let constants = CombatConstants::default();
        let mut event = DamageEvent::new(kind, amount, "a tester");
        event.amount = amount;
        let profile = ResistanceProfile::of(player);
        let mut source = DamageSource::hazard("a tester", 0);
        {
            let mut ctx = Ctx::new(dice, &mut sink, &constants);
            handler(player, &mut event, &profile, &mut source, &mut ctx);
        }
        (event, sink)
    }

    #[test]
    fn test_confusion_respects_resistance() {
        let mut p = Player::default().with_innate(Traits::RES_CONF);
        run(confusion, &mut p, DamageKind::Confusion, 10, &mut ScriptedDice::constant(0));
        assert!(!p.is_active(StatusKind::Confused));
        assert_eq!(p.chp, 90);

        let mut p = Player::default();
        let mut dice = ScriptedDice::constant(0);
        let (event, _) = run(confusion, &mut p, DamageKind::Confusion, 10, &mut dice);
        assert!(p.is_active(StatusKind::Confused));
        assert!(event.secondary_applied);
    }

    #[test]
    fn test_spectre_drinks_nether() {
        let mut p = Player::new(Race::Spectre, Class::Warrior);
        p.chp = 50;
        let mut dice = ScriptedDice::constant(99);
        let (event, sink) = run(nether, &mut p, DamageKind::Nether, 40, &mut dice);
        assert_eq!(p.chp, 60);
        assert_eq!(event.get_damage, 0);
        assert!(sink.saw("You feel invigorated!"));
    }

    #[test]
    fn test_hand_of_doom_takes_a_share() {
        // save roll 99 fails against 30, randint1(20) gives 20
        let mut p = Player::default();
        let mut dice = ScriptedDice::constant(99);
        let (event, sink) = run(hand_of_doom, &mut p, DamageKind::HandOfDoom, 0, &mut dice);
        assert_eq!(event.get_damage, 60);
        assert_eq!(p.chp, 40);
        assert!(sink.called(&SinkCall::Curse(40, 20)));
    }

    #[test]
    fn test_mind_blast_saved() {
        let mut p = Player::default();
        let mut dice = ScriptedDice::constant(0);
        let (event, sink) = run(mind_blast, &mut p, DamageKind::MindBlast, 30, &mut dice);
        assert!(event.saved);
        assert!(!event.secondary_applied);
        assert_eq!(p.chp, 100);
        assert!(sink.saw("You resist the effects!"));
    }

    #[test]
    fn test_brain_smash_drain_stops_on_sustain() {
        let mut p = Player::default().with_innate(Traits::SUST_INT | Traits::SUST_WIS);
        let int = p.stats.cur(Stat::Int);
        let mut dice = ScriptedDice::constant(99);
        let (event, _) = run(brain_smash, &mut p, DamageKind::BrainSmash, 20, &mut dice);
        assert_eq!(event.get_damage, 20);
        assert_eq!(p.stats.cur(Stat::Int), int);
        assert!(p.is_active(StatusKind::Blind));
    }

    #[test]
    fn test_shards_cut_unless_resisted() {
        let mut p = Player::default();
        run(shards, &mut p, DamageKind::Shards, 12, &mut ScriptedDice::constant(99));
        assert!(p.is_active(StatusKind::Cut));

        let mut p = Player::default().with_innate(Traits::RES_SHARDS);
        run(shards, &mut p, DamageKind::Shards, 12, &mut ScriptedDice::constant(99));
        assert!(!p.is_active(StatusKind::Cut));
    }
}
