//! ResistanceProfile - per-kind defensive state derived from the player
//!
//! Never cached: build it with [`ResistanceProfile::of`] right before it is
//! needed, since gear and buffs change between turns.

use super::Traits;
use crate::damage::DamageKind;
use crate::player::{LifeType, Player, EVIL_ALIGNMENT, GOOD_ALIGNMENT};
use crate::status::StatusKind;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Timed oppose-element buffs
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Opposing: u8 {
        const ACID = 1 << 0;
        const ELEC = 1 << 1;
        const FIRE = 1 << 2;
        const COLD = 1 << 3;
        const POIS = 1 << 4;
    }
}

/// Categorical resistance to one damage kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resistance {
    Immune,
    Resistant,
    Vulnerable,
    Neutral,
}

/// Every defensive fact about one damage kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KindDefense {
    pub immune: bool,
    pub resistant: bool,
    pub vulnerable: bool,
    pub opposing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResistanceProfile {
    pub traits: Traits,
    pub opposing: Opposing,
    pub alignment: i32,
    pub life: LifeType,
    /// Wraith form doubles light damage
    pub wraith: bool,
}

impl Default for ResistanceProfile {
    fn default() -> Self {
        ResistanceProfile {
            traits: Traits::empty(),
            opposing: Opposing::empty(),
            alignment: 0,
            life: LifeType::Living,
            wraith: false,
        }
    }
}

impl ResistanceProfile {
    /// A profile with no defenses at all
    pub fn neutral() -> Self {
        Self::default()
    }

    /// Snapshot the player's current defenses
    pub fn of(player: &Player) -> Self {
        let s = player.status();
        let mut opposing = Opposing::empty();
        for (kind, flag) in [
            (StatusKind::OpposeAcid, Opposing::ACID),
            (StatusKind::OpposeElec, Opposing::ELEC),
            (StatusKind::OpposeFire, Opposing::FIRE),
            (StatusKind::OpposeCold, Opposing::COLD),
            (StatusKind::OpposePois, Opposing::POIS),
        ] {
            if s.is_active(kind) {
                opposing |= flag;
            }
        }
        ResistanceProfile {
            traits: player.traits(),
            opposing,
            alignment: player.alignment,
            life: player.life(),
            wraith: s.is_active(StatusKind::WraithForm),
        }
    }

    pub fn with_traits(mut self, traits: Traits) -> Self {
        self.traits |= traits;
        self
    }

    pub fn with_opposing(mut self, opposing: Opposing) -> Self {
        self.opposing |= opposing;
        self
    }

    pub fn with_alignment(mut self, alignment: i32) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_life(mut self, life: LifeType) -> Self {
        self.life = life;
        self
    }

    pub fn has(&self, t: Traits) -> bool {
        self.traits.contains(t)
    }

    pub fn is_good(&self) -> bool {
        self.alignment > GOOD_ALIGNMENT
    }

    pub fn is_evil(&self) -> bool {
        self.alignment < EVIL_ALIGNMENT
    }

    pub fn defense(&self, kind: DamageKind) -> KindDefense {
        let t = self.traits;
        let element = |im: Traits, res: Traits, vuln: Traits, opp: Opposing| KindDefense {
            immune: t.contains(im),
            resistant: t.contains(res),
            vulnerable: t.contains(vuln),
            opposing: self.opposing.contains(opp),
        };
        let resist = |res: Traits| KindDefense {
            resistant: t.contains(res),
            ..KindDefense::default()
        };

        match kind {
            DamageKind::Acid => {
                element(Traits::IM_ACID, Traits::RES_ACID, Traits::VULN_ACID, Opposing::ACID)
            }
            DamageKind::Elec => {
                element(Traits::IM_ELEC, Traits::RES_ELEC, Traits::VULN_ELEC, Opposing::ELEC)
            }
            DamageKind::Fire => {
                element(Traits::IM_FIRE, Traits::RES_FIRE, Traits::VULN_FIRE, Opposing::FIRE)
            }
            DamageKind::Cold | DamageKind::Ice => {
                element(Traits::IM_COLD, Traits::RES_COLD, Traits::VULN_COLD, Opposing::COLD)
            }
            DamageKind::Poison | DamageKind::Nuke => KindDefense {
                resistant: t.contains(Traits::RES_POIS),
                opposing: self.opposing.contains(Opposing::POIS),
                ..KindDefense::default()
            },
            DamageKind::Lite => KindDefense {
                resistant: t.contains(Traits::RES_LITE),
                vulnerable: t.contains(Traits::VULN_LITE),
                ..KindDefense::default()
            },
            DamageKind::Dark => KindDefense {
                immune: t.contains(Traits::IM_DARK),
                resistant: t.contains(Traits::RES_DARK),
                ..KindDefense::default()
            },
            DamageKind::Shards | DamageKind::Rocket => resist(Traits::RES_SHARDS),
            DamageKind::Sound => resist(Traits::RES_SOUND),
            DamageKind::Confusion => resist(Traits::RES_CONF),
            DamageKind::Chaos => resist(Traits::RES_CHAOS),
            DamageKind::Nether => resist(Traits::RES_NETHER),
            DamageKind::Disenchant => resist(Traits::RES_DISEN),
            DamageKind::Nexus | DamageKind::Void => resist(Traits::RES_NEXUS),
            DamageKind::Time => resist(Traits::RES_TIME),
            DamageKind::Water => resist(Traits::RES_WATER),
            DamageKind::Gravity => resist(Traits::LEVITATION),
            DamageKind::DeathRay => KindDefense {
                immune: self.life != LifeType::Living,
                resistant: t.contains(Traits::HOLD_EXP),
                ..KindDefense::default()
            },
            _ => KindDefense::default(),
        }
    }

    /// Categorical state; immunity always wins
    pub fn classify(&self, kind: DamageKind) -> Resistance {
        let d = self.defense(kind);
        if d.immune {
            Resistance::Immune
        } else if d.resistant {
            Resistance::Resistant
        } else if d.vulnerable || (kind == DamageKind::Lite && self.wraith) {
            Resistance::Vulnerable
        } else {
            Resistance::Neutral
        }
    }

    /// Timed oppose buff active for this kind (acid/elec/fire/cold/poison only)
    pub fn is_opposing(&self, kind: DamageKind) -> bool {
        self.defense(kind).opposing
    }
}
