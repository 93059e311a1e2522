//! Damage pipeline - classification, reduction, HP loss and secondary effects
//!
//! [`apply_damage`] is the entry point every caller uses (monster spells,
//! breath, traps, potions). It runs the fixed order: classify, reduce,
//! subtract HP, secondary effects, then resistance learning for monster
//! casters.

mod effect;
mod elemental;
mod event;
mod kind;

pub use effect::saving_throw_holds;
pub use elemental::{acid_damage, cold_damage, elec_damage, element_rate, fire_damage};
pub use event::{DamageEvent, DamageSource};
pub use kind::{DamageKind, DecoyRule, KindPolicy};

pub(crate) use effect::{apply_nexus, time_warp};

use crate::combat::Attacker;
use crate::ctx::Ctx;
use crate::defense::{reduce, Opposing, ResistanceProfile, Traits};
use crate::player::Player;
use crate::types::LearnedResist;

/// Route one hit of `kind` through the pipeline
pub fn apply_damage(
    player: &mut Player,
    kind: DamageKind,
    raw: i32,
    source: &mut DamageSource<'_>,
    ctx: &mut Ctx<'_>,
) -> DamageEvent {
    let mut event = DamageEvent::new(kind, raw, &source.killer);
    if player.is_dead {
        return event;
    }

    let before = player.status().clone();
    let profile = ResistanceProfile::of(player);
    let policy = kind.policy();

    event.resistance = profile.classify(kind);
    event.evaded = player.decoy_active();
    event.amount = reduce(kind, raw, &profile, ctx.rng);

    if event.evaded && policy.decoy == DecoyRule::BlocksAll {
        ctx.msg("damage", "The attack hits Shadow, but you are unharmed!");
        event.amount = 0;
    } else {
        (policy.handler)(player, &mut event, &profile, source, ctx);
    }

    if let Some(caster) = source.caster.as_deref_mut() {
        for &tag in policy.learns {
            smart_learn(caster, tag, player, &profile, ctx);
        }
    }

    event.statuses = player.status().diff(&before);
    tracing::debug!(
        kind = ?kind,
        raw,
        amount = event.amount,
        taken = event.get_damage,
        evaded = event.evaded,
        saved = event.saved,
        "damage applied"
    );
    event
}

/// Let `monster` remember `tag` if the player just demonstrated it
pub(crate) fn smart_learn(
    monster: &mut Attacker,
    tag: LearnedResist,
    player: &Player,
    profile: &ResistanceProfile,
    ctx: &mut Ctx<'_>,
) -> bool {
    if !demonstrates(tag, player, profile, ctx) {
        return false;
    }
    if monster.learn(tag) {
        tracing::trace!(monster = monster.id.0, ?tag, "resistance learned");
    }
    ctx.sink.learn_resistance(monster.id, tag);
    true
}

/// Whether the player just showed a monster they have `tag`
fn demonstrates(
    tag: LearnedResist,
    player: &Player,
    profile: &ResistanceProfile,
    ctx: &mut Ctx<'_>,
) -> bool {
    let innate_or_timed =
        |t: Traits, o: Opposing| profile.traits.intersects(t) || profile.opposing.contains(o);
    match tag {
        LearnedResist::Acid => innate_or_timed(Traits::RES_ACID | Traits::IM_ACID, Opposing::ACID),
        LearnedResist::Elec => innate_or_timed(Traits::RES_ELEC | Traits::IM_ELEC, Opposing::ELEC),
        LearnedResist::Fire => innate_or_timed(Traits::RES_FIRE | Traits::IM_FIRE, Opposing::FIRE),
        LearnedResist::Cold => innate_or_timed(Traits::RES_COLD | Traits::IM_COLD, Opposing::COLD),
        LearnedResist::Pois => innate_or_timed(Traits::RES_POIS, Opposing::POIS),
        LearnedResist::Nether => profile.has(Traits::RES_NETHER),
        LearnedResist::Lite => profile.has(Traits::RES_LITE),
        LearnedResist::Dark => profile.traits.intersects(Traits::RES_DARK | Traits::IM_DARK),
        LearnedResist::Fear => profile.has(Traits::RES_FEAR),
        LearnedResist::Conf => profile.has(Traits::RES_CONF),
        LearnedResist::Chaos => profile.has(Traits::RES_CHAOS),
        LearnedResist::Disen => profile.has(Traits::RES_DISEN),
        LearnedResist::Blind => profile.has(Traits::RES_BLIND),
        LearnedResist::Nexus => profile.has(Traits::RES_NEXUS),
        LearnedResist::Sound => profile.has(Traits::RES_SOUND),
        LearnedResist::Shard => profile.has(Traits::RES_SHARDS),
        LearnedResist::Free => profile.has(Traits::FREE_ACT),
        LearnedResist::Reflect => profile.has(Traits::REFLECT),
        LearnedResist::Mana => player.msp == 0,
        LearnedResist::Save => ctx.rng.randint0(100) < player.saving_throw(),
    }
}
