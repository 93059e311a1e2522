//! Status kinds and their static descriptor table

use crate::sink::Dirty;
use serde::{Deserialize, Serialize};

/// Every timed or tiered player status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Blind,
    Confused,
    Poisoned,
    Afraid,
    Paralyzed,
    Hallucinating,
    Stunned,
    Cut,
    Slowed,
    Hasted,
    Invulnerable,
    WraithForm,
    Heroism,
    Berserk,
    ShieldBuff,
    Blessed,
    OpposeAcid,
    OpposeElec,
    OpposeFire,
    OpposeCold,
    OpposePois,
    TimedEsp,
    TimedInfravision,
    TimedStealth,
    TimedLevitation,
    TimedRegeneration,
    ResistMagic,
    ReflectMissiles,
    MultiShadow,
    ResistNether,
    ResistTime,
    ProtectionFromEvil,
}

/// How a status wears off each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decay {
    /// One point per tick
    Flat,
    /// Easy mode multiplies the decrement
    Quick,
    /// Constitution-scaled recovery
    Constitution,
}

/// Static description of a status kind
#[derive(Debug, Clone, Copy)]
pub struct StatusSpec {
    pub kind: StatusKind,
    pub key: &'static str,
    pub onset: &'static str,
    pub recovery: &'static str,
    pub dirty: Dirty,
    pub decay: Decay,
}

const fn spec(
    kind: StatusKind,
    key: &'static str,
    onset: &'static str,
    recovery: &'static str,
    dirty: Dirty,
    decay: Decay,
) -> StatusSpec {
    StatusSpec {
        kind,
        key,
        onset,
        recovery,
        dirty,
        decay,
    }
}

const REDRAW: Dirty = Dirty::STATUS;
const BONUS: Dirty = Dirty::STATUS.union(Dirty::BONUS);

static SPECS: [StatusSpec; 32] = [
    spec(
        StatusKind::Blind,
        "blind",
        "You are blind!",
        "You can see again.",
        Dirty::STATUS.union(Dirty::MAP).union(Dirty::MONSTERS).union(Dirty::VIEW),
        Decay::Quick,
    ),
    spec(
        StatusKind::Confused,
        "confused",
        "You are confused!",
        "You feel less confused now.",
        REDRAW,
        Decay::Quick,
    ),
    spec(
        StatusKind::Poisoned,
        "poisoned",
        "You are poisoned!",
        "You are no longer poisoned.",
        REDRAW,
        Decay::Constitution,
    ),
    spec(
        StatusKind::Afraid,
        "afraid",
        "You are terrified!",
        "You feel bolder now.",
        BONUS,
        Decay::Quick,
    ),
    spec(
        StatusKind::Paralyzed,
        "paralyzed",
        "You are paralyzed!",
        "You can move again.",
        REDRAW,
        Decay::Quick,
    ),
    spec(
        StatusKind::Hallucinating,
        "hallucinating",
        "Oh, wow! Everything looks so cosmic now!",
        "You can see clearly again.",
        Dirty::STATUS.union(Dirty::MAP).union(Dirty::MONSTERS),
        Decay::Quick,
    ),
    spec(
        StatusKind::Stunned,
        "stunned",
        "You have been stunned.",
        "You are no longer stunned.",
        BONUS,
        Decay::Constitution,
    ),
    spec(
        StatusKind::Cut,
        "cut",
        "You have been given a graze.",
        "You are no longer bleeding.",
        BONUS,
        Decay::Constitution,
    ),
    spec(
        StatusKind::Slowed,
        "slowed",
        "You feel yourself moving slower!",
        "You feel yourself speed up.",
        BONUS.union(Dirty::SPEED),
        Decay::Quick,
    ),
    spec(
        StatusKind::Hasted,
        "hasted",
        "You feel yourself moving faster!",
        "You feel yourself slow down.",
        BONUS.union(Dirty::SPEED),
        Decay::Flat,
    ),
    spec(
        StatusKind::Invulnerable,
        "invulnerable",
        "Invulnerability!",
        "The invulnerability wears off.",
        BONUS.union(Dirty::MAP).union(Dirty::HEALTH),
        Decay::Flat,
    ),
    spec(
        StatusKind::WraithForm,
        "wraith_form",
        "You leave the physical world and turn into a wraith-being!",
        "You feel opaque.",
        BONUS.union(Dirty::MAP).union(Dirty::HEALTH),
        Decay::Flat,
    ),
    spec(
        StatusKind::Heroism,
        "heroism",
        "You feel like a hero!",
        "The heroism wears off.",
        BONUS.union(Dirty::HP),
        Decay::Flat,
    ),
    spec(
        StatusKind::Berserk,
        "berserk",
        "You feel like a killing machine!",
        "You feel less Berserk.",
        BONUS.union(Dirty::HP),
        Decay::Flat,
    ),
    spec(
        StatusKind::ShieldBuff,
        "shield",
        "Your skin turns to stone.",
        "Your skin returns to normal.",
        BONUS,
        Decay::Flat,
    ),
    spec(
        StatusKind::Blessed,
        "blessed",
        "You feel righteous!",
        "The prayer has expired.",
        BONUS,
        Decay::Flat,
    ),
    spec(
        StatusKind::OpposeAcid,
        "oppose_acid",
        "You feel resistant to acid!",
        "You feel less resistant to acid.",
        REDRAW,
        Decay::Flat,
    ),
    spec(
        StatusKind::OpposeElec,
        "oppose_elec",
        "You feel resistant to electricity!",
        "You feel less resistant to electricity.",
        REDRAW,
        Decay::Flat,
    ),
    spec(
        StatusKind::OpposeFire,
        "oppose_fire",
        "You feel resistant to fire!",
        "You feel less resistant to fire.",
        REDRAW,
        Decay::Flat,
    ),
    spec(
        StatusKind::OpposeCold,
        "oppose_cold",
        "You feel resistant to cold!",
        "You feel less resistant to cold.",
        REDRAW,
        Decay::Flat,
    ),
    spec(
        StatusKind::OpposePois,
        "oppose_pois",
        "You feel resistant to poison!",
        "You feel less resistant to poison.",
        REDRAW,
        Decay::Flat,
    ),
    spec(
        StatusKind::TimedEsp,
        "esp",
        "You feel your consciousness expand!",
        "Your consciousness contracts again.",
        BONUS.union(Dirty::MONSTERS),
        Decay::Flat,
    ),
    spec(
        StatusKind::TimedInfravision,
        "infravision",
        "Your eyes begin to tingle!",
        "Your eyes stop tingling.",
        BONUS.union(Dirty::MONSTERS),
        Decay::Flat,
    ),
    spec(
        StatusKind::TimedStealth,
        "stealth",
        "You begin to walk silently!",
        "You no longer walk silently.",
        BONUS,
        Decay::Flat,
    ),
    spec(
        StatusKind::TimedLevitation,
        "levitation",
        "You begin to fly!",
        "You stop flying.",
        BONUS,
        Decay::Flat,
    ),
    spec(
        StatusKind::TimedRegeneration,
        "regeneration",
        "You feel yourself regenerating quickly!",
        "You feel yourself regenerating slowly.",
        BONUS,
        Decay::Flat,
    ),
    spec(
        StatusKind::ResistMagic,
        "resist_magic",
        "You have been protected from magic!",
        "You are no longer protected from magic.",
        BONUS,
        Decay::Flat,
    ),
    spec(
        StatusKind::ReflectMissiles,
        "reflect",
        "Your body becomes smooth.",
        "Your body is no longer smooth.",
        BONUS,
        Decay::Flat,
    ),
    spec(
        StatusKind::MultiShadow,
        "multishadow",
        "Your Shadow enveloped you.",
        "Your Shadow disappears.",
        BONUS,
        Decay::Flat,
    ),
    spec(
        StatusKind::ResistNether,
        "resist_nether",
        "You feel nether resistant!",
        "You feel less nether resistant.",
        REDRAW,
        Decay::Flat,
    ),
    spec(
        StatusKind::ResistTime,
        "resist_time",
        "You feel time resistant!",
        "You feel less time resistant.",
        REDRAW,
        Decay::Flat,
    ),
    spec(
        StatusKind::ProtectionFromEvil,
        "prot_evil",
        "You feel safe from evil!",
        "You no longer feel safe from evil.",
        REDRAW,
        Decay::Flat,
    ),
];

impl StatusKind {
    pub fn all() -> &'static [StatusKind] {
        &[
            StatusKind::Blind,
            StatusKind::Confused,
            StatusKind::Poisoned,
            StatusKind::Afraid,
            StatusKind::Paralyzed,
            StatusKind::Hallucinating,
            StatusKind::Stunned,
            StatusKind::Cut,
            StatusKind::Slowed,
            StatusKind::Hasted,
            StatusKind::Invulnerable,
            StatusKind::WraithForm,
            StatusKind::Heroism,
            StatusKind::Berserk,
            StatusKind::ShieldBuff,
            StatusKind::Blessed,
            StatusKind::OpposeAcid,
            StatusKind::OpposeElec,
            StatusKind::OpposeFire,
            StatusKind::OpposeCold,
            StatusKind::OpposePois,
            StatusKind::TimedEsp,
            StatusKind::TimedInfravision,
            StatusKind::TimedStealth,
            StatusKind::TimedLevitation,
            StatusKind::TimedRegeneration,
            StatusKind::ResistMagic,
            StatusKind::ReflectMissiles,
            StatusKind::MultiShadow,
            StatusKind::ResistNether,
            StatusKind::ResistTime,
            StatusKind::ProtectionFromEvil,
        ]
    }

    pub fn spec(self) -> &'static StatusSpec {
        &SPECS[self as usize]
    }

    /// Stun and Cut use magnitude tiers instead of plain durations
    pub fn is_tiered(self) -> bool {
        matches!(self, StatusKind::Stunned | StatusKind::Cut)
    }

    /// Harmful conditions, as opposed to buffs
    pub fn is_ailment(self) -> bool {
        matches!(
            self,
            StatusKind::Blind
                | StatusKind::Confused
                | StatusKind::Poisoned
                | StatusKind::Afraid
                | StatusKind::Paralyzed
                | StatusKind::Hallucinating
                | StatusKind::Stunned
                | StatusKind::Cut
                | StatusKind::Slowed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_table_is_aligned() {
        assert_eq!(StatusKind::all().len(), SPECS.len());
        for (i, kind) in StatusKind::all().iter().enumerate() {
            assert_eq!(*kind as usize, i);
            assert_eq!(kind.spec().kind, *kind);
        }
    }

    #[test]
    fn test_quick_decay_membership() {
        let quick: Vec<_> = StatusKind::all()
            .iter()
            .filter(|k| k.spec().decay == Decay::Quick)
            .copied()
            .collect();
        assert_eq!(
            quick,
            vec![
                StatusKind::Blind,
                StatusKind::Confused,
                StatusKind::Afraid,
                StatusKind::Paralyzed,
                StatusKind::Hallucinating,
                StatusKind::Slowed,
            ]
        );
    }
}
