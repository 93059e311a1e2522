//! delve_core - Combat and status-effect resolution for a roguelike dungeon crawler
//!
//! This library provides:
//! - Player: HP, mana, experience, stats and the timed status store
//! - ResistanceProfile / DamageReducer: per-kind resistance and damage rates
//! - apply_damage: the per-kind effect table shared by every damage source
//! - Monster blows: to-hit, criticals, theft, auras and the blow state trace
//! - Traps, chest traps and potions
//! - Avatar virtues shifted by kills and status onsets
//!
//! Every resolver takes a [`Ctx`] carrying the dice, the effect sink and the
//! tunable constants; nothing here touches global state.

pub mod avatar;
pub mod combat;
pub mod config;
pub mod ctx;
pub mod damage;
pub mod defense;
pub mod hazard;
pub mod player;
pub mod potion;
pub mod prelude;
pub mod rng;
pub mod sink;
pub mod status;
pub mod types;

// Re-export core types for convenience
pub use avatar::{on_monster_killed, AvatarVirtues, Virtue};
pub use combat::{
    resolve_monster_attack, resolve_monster_blow, Attacker, AttackSummary, Blow, BlowEffect,
    BlowMethod, MonsterAttackOutcome, MonsterRace,
};
pub use config::{default_constants, default_monster_races, CombatConstants, ConfigError};
pub use ctx::Ctx;
pub use damage::{apply_damage, DamageEvent, DamageKind, DamageSource};
pub use defense::{reduce, RateMode, Resistance, ResistanceProfile, Traits};
pub use hazard::{resolve_chest_trap, resolve_terrain, resolve_trap, HazardOutcome};
pub use player::{HitKind, Player};
pub use potion::{quaff_potion_effect, PotionKind};
pub use rng::{Dice, GameRng, ScriptedDice};
pub use sink::{Dirty, EffectSink, NullSink, RecordingSink, TracingSink};
pub use status::{tick_statuses, PlayerStatus, StatusKind};
pub use types::{Floor, Stat};
