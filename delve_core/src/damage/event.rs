//! DamageEvent - the record of one resolved hit

use super::DamageKind;
use crate::combat::Attacker;
use crate::defense::Resistance;
use crate::status::StatusDelta;
use crate::types::MonsterId;
use serde::{Deserialize, Serialize};

/// Who or what is dealing the damage
#[derive(Debug)]
pub struct DamageSource<'a> {
    /// Name used in death messages ("an orc", "a fire trap")
    pub killer: String,
    /// Level used against the player's saving throw
    pub level: i32,
    /// The monster casting, if any. Drain effects heal it.
    pub caster: Option<&'a mut Attacker>,
}

impl<'a> DamageSource<'a> {
    /// A monster-cast hit
    pub fn monster(caster: &'a mut Attacker) -> Self {
        DamageSource {
            killer: caster.race.killer_name(),
            level: caster.race.level,
            caster: Some(caster),
        }
    }

    /// Traps, potions and other sourceless hazards
    pub fn hazard(killer: impl Into<String>, level: i32) -> Self {
        DamageSource {
            killer: killer.into(),
            level,
            caster: None,
        }
    }

    pub fn caster_id(&self) -> Option<MonsterId> {
        self.caster.as_ref().map(|c| c.id)
    }
}

/// Result of routing one hit through the damage pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageEvent {
    pub kind: DamageKind,
    /// Dice-rolled amount before any reduction
    pub raw: i32,
    pub killer: String,
    /// The multishadow decoy absorbed the hit
    pub evaded: bool,
    pub resistance: Resistance,
    /// Amount after the rate tables
    pub amount: i32,
    /// HP actually lost
    pub get_damage: i32,
    /// Secondary effects were allowed to run (not dead, not evaded, not saved)
    pub secondary_applied: bool,
    /// The saving throw negated the effect
    pub saved: bool,
    /// Status changes the hit caused
    pub statuses: Vec<StatusDelta>,
}

impl DamageEvent {
    pub fn new(kind: DamageKind, raw: i32, killer: &str) -> Self {
        DamageEvent {
            kind,
            raw,
            killer: killer.to_string(),
            evaded: false,
            resistance: Resistance::Neutral,
            amount: 0,
            get_damage: 0,
            secondary_applied: false,
            saved: false,
            statuses: Vec::new(),
        }
    }
}
