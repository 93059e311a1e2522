//! Damage kinds and the per-kind policy table
//!
//! `DamageKind::policy` is the one place a kind's behaviour is defined: the
//! reduction rule the reducer applies, what the multishadow decoy blocks, the
//! resistances an attacking monster can learn, and the secondary-effect
//! handler. Every caller (monster spells, blows, traps, potions) goes through
//! the same table.

use super::effect::{self, Handler};
use crate::defense::ReductionRule;
use crate::types::LearnedResist;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageKind {
    Acid,
    Elec,
    Fire,
    Cold,
    Poison,
    Nuke,
    Missile,
    Arrow,
    HolyFire,
    HellFire,
    Plasma,
    Nether,
    Water,
    Chaos,
    Shards,
    Sound,
    Confusion,
    Disenchant,
    Nexus,
    Force,
    Rocket,
    Inertia,
    Lite,
    Dark,
    Time,
    Gravity,
    Disintegrate,
    Mana,
    Meteor,
    Ice,
    DeathRay,
    DrainMana,
    MindBlast,
    BrainSmash,
    CauseLight,
    CauseSerious,
    CauseCritical,
    CauseMortal,
    HandOfDoom,
    PsychicSpear,
    Void,
}

/// What an active decoy stops
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecoyRule {
    /// Raw damage lands; secondary effects are skipped
    BlocksSecondary,
    /// Nothing happens at all
    BlocksAll,
}

/// Static behaviour of one damage kind
pub struct KindPolicy {
    pub kind: DamageKind,
    pub reduction: ReductionRule,
    pub decoy: DecoyRule,
    /// Resistances a monster caster may learn from this kind
    pub learns: &'static [LearnedResist],
    pub(crate) handler: Handler,
}

impl std::fmt::Debug for KindPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KindPolicy")
            .field("kind", &self.kind)
            .field("reduction", &self.reduction)
            .field("decoy", &self.decoy)
            .field("learns", &self.learns)
            .finish()
    }
}

const fn policy(
    kind: DamageKind,
    reduction: ReductionRule,
    learns: &'static [LearnedResist],
    handler: Handler,
) -> KindPolicy {
    KindPolicy {
        kind,
        reduction,
        decoy: DecoyRule::BlocksSecondary,
        learns,
        handler,
    }
}

use DamageKind as K;
use LearnedResist as L;
use ReductionRule as R;

static POLICIES: [KindPolicy; 41] = [
    policy(K::Acid, R::Passthrough, &[L::Acid], effect::acid),
    policy(K::Elec, R::Passthrough, &[L::Elec], effect::elec),
    policy(K::Fire, R::Passthrough, &[L::Fire], effect::fire),
    policy(K::Cold, R::Passthrough, &[L::Cold], effect::cold),
    policy(K::Poison, R::Compounding, &[L::Pois], effect::poison),
    policy(K::Nuke, R::Compounding, &[L::Pois], effect::nuke),
    policy(K::Missile, R::Unresisted, &[], effect::plain),
    policy(K::Arrow, R::Unresisted, &[], effect::plain),
    policy(K::HolyFire, R::HolyFire, &[], effect::plain),
    policy(K::HellFire, R::HellFire, &[], effect::plain),
    policy(K::Plasma, R::Unresisted, &[L::Sound], effect::plasma),
    policy(K::Nether, R::Banded { numer: 6 }, &[L::Nether], effect::nether),
    policy(K::Water, R::Banded { numer: 5 }, &[L::Sound, L::Conf], effect::water),
    policy(K::Chaos, R::Banded { numer: 6 }, &[L::Chaos, L::Nether, L::Conf], effect::chaos),
    policy(K::Shards, R::Banded { numer: 6 }, &[L::Shard], effect::shards),
    policy(K::Sound, R::Banded { numer: 5 }, &[L::Sound], effect::sound),
    policy(K::Confusion, R::Banded { numer: 5 }, &[L::Conf], effect::confusion),
    policy(K::Disenchant, R::Banded { numer: 6 }, &[L::Disen], effect::disenchant),
    policy(K::Nexus, R::Banded { numer: 6 }, &[L::Nexus], effect::nexus),
    policy(K::Force, R::Unresisted, &[L::Sound], effect::force),
    policy(K::Rocket, R::Banded { numer: 6 }, &[L::Shard, L::Sound], effect::rocket),
    policy(K::Inertia, R::Unresisted, &[], effect::inertia),
    policy(K::Lite, R::Banded { numer: 4 }, &[L::Lite, L::Blind], effect::lite),
    policy(K::Dark, R::Banded { numer: 4 }, &[L::Dark, L::Blind], effect::dark),
    policy(K::Time, R::Banded { numer: 6 }, &[], effect::time),
    policy(K::Gravity, R::Banded { numer: 6 }, &[], effect::gravity),
    policy(K::Disintegrate, R::Unresisted, &[], effect::plain),
    policy(K::Mana, R::Unresisted, &[L::Mana], effect::plain),
    policy(K::Meteor, R::Unresisted, &[L::Shard], effect::meteor),
    policy(K::Ice, R::Passthrough, &[L::Cold, L::Shard, L::Sound], effect::ice),
    policy(K::DeathRay, R::Banded { numer: 4 }, &[], effect::death_ray),
    KindPolicy {
        decoy: DecoyRule::BlocksAll,
        ..policy(K::DrainMana, R::Unresisted, &[L::Mana], effect::drain_mana)
    },
    policy(K::MindBlast, R::Unresisted, &[L::Save, L::Conf, L::Chaos], effect::mind_blast),
    policy(
        K::BrainSmash,
        R::Unresisted,
        &[L::Save, L::Blind, L::Conf, L::Free, L::Chaos],
        effect::brain_smash,
    ),
    policy(K::CauseLight, R::Unresisted, &[L::Save], effect::cause_light),
    policy(K::CauseSerious, R::Unresisted, &[L::Save], effect::cause_serious),
    policy(K::CauseCritical, R::Unresisted, &[L::Save], effect::cause_critical),
    policy(K::CauseMortal, R::Unresisted, &[L::Save], effect::cause_mortal),
    policy(K::HandOfDoom, R::Unresisted, &[L::Save], effect::hand_of_doom),
    policy(K::PsychicSpear, R::Unresisted, &[], effect::psychic_spear),
    policy(K::Void, R::Banded { numer: 6 }, &[L::Nexus], effect::plain),
];

impl DamageKind {
    pub fn all() -> &'static [DamageKind] {
        &[
            K::Acid,
            K::Elec,
            K::Fire,
            K::Cold,
            K::Poison,
            K::Nuke,
            K::Missile,
            K::Arrow,
            K::HolyFire,
            K::HellFire,
            K::Plasma,
            K::Nether,
            K::Water,
            K::Chaos,
            K::Shards,
            K::Sound,
            K::Confusion,
            K::Disenchant,
            K::Nexus,
            K::Force,
            K::Rocket,
            K::Inertia,
            K::Lite,
            K::Dark,
            K::Time,
            K::Gravity,
            K::Disintegrate,
            K::Mana,
            K::Meteor,
            K::Ice,
            K::DeathRay,
            K::DrainMana,
            K::MindBlast,
            K::BrainSmash,
            K::CauseLight,
            K::CauseSerious,
            K::CauseCritical,
            K::CauseMortal,
            K::HandOfDoom,
            K::PsychicSpear,
            K::Void,
        ]
    }

    pub fn policy(self) -> &'static KindPolicy {
        &POLICIES[self as usize]
    }

    /// The four classic elements
    pub fn is_element(self) -> bool {
        matches!(self, K::Acid | K::Elec | K::Fire | K::Cold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_table_is_aligned() {
        assert_eq!(DamageKind::all().len(), POLICIES.len());
        for &kind in DamageKind::all() {
            assert_eq!(kind.policy().kind, kind);
        }
    }

    #[test]
    fn test_only_drain_mana_blocks_everything() {
        for &kind in DamageKind::all() {
            let expected = if kind == DamageKind::DrainMana {
                DecoyRule::BlocksAll
            } else {
                DecoyRule::BlocksSecondary
            };
            assert_eq!(kind.policy().decoy, expected, "{kind:?}");
        }
    }

    #[test]
    fn test_elements_pass_through() {
        for &kind in DamageKind::all() {
            let passthrough = kind.policy().reduction == ReductionRule::Passthrough;
            assert_eq!(passthrough, kind.is_element() || kind == DamageKind::Ice, "{kind:?}");
        }
    }
}
