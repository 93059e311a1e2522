//! Prelude module for convenient imports
//!
//! ```rust
//! use delve_core::prelude::*;
//! ```

// Player and status
pub use crate::player::{Class, HitKind, Player, Race};
pub use crate::status::{tick_statuses, StatusKind};

// Damage pipeline
pub use crate::damage::{apply_damage, DamageEvent, DamageKind, DamageSource};
pub use crate::defense::{ResistanceProfile, Traits};

// Combat and hazards
pub use crate::combat::{resolve_monster_attack, resolve_monster_blow, Attacker, MonsterRace};
pub use crate::hazard::{
    resolve_chest_trap, resolve_terrain, resolve_trap, Chest, ChestTraps, Terrain, TrapKind,
};
pub use crate::potion::{quaff_potion_effect, PotionKind};

// Plumbing
pub use crate::config::{default_constants, default_monster_races, CombatConstants};
pub use crate::ctx::Ctx;
pub use crate::rng::{Dice, GameRng};
pub use crate::sink::{EffectSink, NullSink, TracingSink};
pub use crate::types::{Floor, Stat};
