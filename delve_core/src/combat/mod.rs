//! Combat resolution - monster blows against the player

mod blow;
mod critical;
mod monster;
mod resolution;
mod result;

pub use blow::{Blow, BlowEffect, BlowMethod, DamageDice};
pub use critical::{critical_cut, critical_stun, monster_critical};
pub use monster::{
    monster_damage_mod, monster_take_hit, Attacker, MonsterLore, MonsterRace, RaceFlags,
};
pub use resolution::{resolve_monster_attack, resolve_monster_blow, try_critical, MAX_BLOWS};
pub use result::{AttackSummary, BlowStage, MonsterAttackOutcome};
