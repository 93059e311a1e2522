//! MonsterAttackOutcome - what one blow (or one full attack) did

use super::{BlowEffect, BlowMethod};
use serde::{Deserialize, Serialize};

/// Per-blow resolution stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlowStage {
    Pending,
    AcMitigated,
    EffectDispatched,
    Resolved,
}

/// Result of resolving a single blow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterAttackOutcome {
    pub method: BlowMethod,
    pub effect: BlowEffect,
    /// Stages the blow passed through, in order
    pub stages: Vec<BlowStage>,

    // === Hit ===
    pub hit: bool,
    /// Protection from evil turned the blow away
    pub repelled: bool,
    /// The shadow decoy took the blow's secondary effect
    pub evaded: bool,
    pub critical: bool,

    // === Damage ===
    /// Rolled dice before armour
    pub raw_damage: i32,
    /// Damage after armour, before HP subtraction
    pub damage: i32,
    /// HP the player actually lost
    pub get_damage: i32,
    pub cut: i32,
    pub stun: i32,

    // === Theft ===
    pub theft_caught: bool,
    pub gold_stolen: i32,
    pub item_stolen: Option<String>,

    // === Attacker ===
    /// The thief should blink away once the attack is over
    pub blinked: bool,
    pub attacker_died: bool,
}

impl MonsterAttackOutcome {
    pub fn new(method: BlowMethod, effect: BlowEffect) -> Self {
        MonsterAttackOutcome {
            method,
            effect,
            stages: vec![BlowStage::Pending],
            hit: false,
            repelled: false,
            evaded: false,
            critical: false,
            raw_damage: 0,
            damage: 0,
            get_damage: 0,
            cut: 0,
            stun: 0,
            theft_caught: false,
            gold_stolen: 0,
            item_stolen: None,
            blinked: false,
            attacker_died: false,
        }
    }

    pub(crate) fn advance(&mut self, stage: BlowStage) {
        tracing::trace!(?stage, method = ?self.method, effect = ?self.effect, "blow stage");
        self.stages.push(stage);
    }

    pub fn stage(&self) -> BlowStage {
        self.stages.last().copied().unwrap_or(BlowStage::Pending)
    }

    pub fn summary(&self) -> String {
        if !self.hit {
            return "Missed".to_string();
        }
        if self.repelled {
            return "Repelled".to_string();
        }
        let mut parts = vec![format!("{} damage", self.get_damage)];
        if self.critical {
            parts.push("critical".to_string());
        }
        if self.evaded {
            parts.push("hit Shadow".to_string());
        }
        if self.cut > 0 {
            parts.push(format!("cut {}", self.cut));
        }
        if self.stun > 0 {
            parts.push(format!("stun {}", self.stun));
        }
        if self.theft_caught {
            parts.push("thief caught".to_string());
        }
        if self.attacker_died {
            parts.push("attacker died".to_string());
        }
        parts.join(", ")
    }
}

/// Result of a monster's whole attack turn
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackSummary {
    pub blows: Vec<MonsterAttackOutcome>,
    pub total_damage: i32,
    /// The monster blinked away with loot
    pub blinked: bool,
    pub attacker_died: bool,
    pub player_died: bool,
}

impl AttackSummary {
    pub fn hits(&self) -> usize {
        self.blows.iter().filter(|b| b.hit && !b.repelled).count()
    }
}
