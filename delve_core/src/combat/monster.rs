//! Monster races and the attacking monster instance

use super::Blow;
use crate::avatar::on_monster_killed;
use crate::ctx::Ctx;
use crate::defense::{resist_all_divide, RateMode};
use crate::player::Player;
use crate::types::{LearnedResist, MonsterId};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Race flags the combat core reads
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct RaceFlags: u32 {
        const UNIQUE      = 1 << 0;
        const EVIL        = 1 << 1;
        const GOOD        = 1 << 2;
        const ANIMAL      = 1 << 3;
        const UNDEAD      = 1 << 4;
        const DEMON       = 1 << 5;
        const ANGEL       = 1 << 6;
        const MULTIPLY    = 1 << 7;
        const BEGGAR      = 1 << 8;
        const SPELLCASTER = 1 << 9;
        const NONLIVING   = 1 << 10;
        const RES_ALL     = 1 << 11;
        const IM_FIRE     = 1 << 12;
        const IM_ELEC     = 1 << 13;
        const IM_COLD     = 1 << 14;
    }
}

/// Player-side knowledge about a race
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MonsterLore {
    /// How many of the player's ancestors this race has killed
    #[serde(default)]
    pub ancestors_slain: u32,
    #[serde(default)]
    pub total_kills: u32,
}

/// Static description of a kind of monster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterRace {
    pub id: String,
    pub name: String,
    pub level: i32,
    #[serde(default = "default_hp")]
    pub hp: i32,
    #[serde(default)]
    pub flags: RaceFlags,
    #[serde(default)]
    pub blows: Vec<Blow>,
    #[serde(default)]
    pub lore: MonsterLore,
}

fn default_hp() -> i32 {
    10
}

impl MonsterRace {
    pub fn new(id: impl Into<String>, name: impl Into<String>, level: i32) -> Self {
        MonsterRace {
            id: id.into(),
            name: name.into(),
            level,
            hp: default_hp(),
            flags: RaceFlags::empty(),
            blows: Vec::new(),
            lore: MonsterLore::default(),
        }
    }

    pub fn with_flags(mut self, flags: RaceFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn with_blow(mut self, blow: Blow) -> Self {
        self.blows.push(blow);
        self
    }

    pub fn with_hp(mut self, hp: i32) -> Self {
        self.hp = hp.max(1);
        self
    }

    pub fn is_unique(&self) -> bool {
        self.flags.contains(RaceFlags::UNIQUE)
    }

    /// Level 0 and no attack that can hurt
    pub fn is_innocent(&self) -> bool {
        self.level == 0 && !self.blows.iter().any(Blow::is_damaging)
    }

    /// "the cave spider", or just the name for uniques
    pub fn the_name(&self) -> String {
        if self.is_unique() {
            self.name.clone()
        } else {
            format!("the {}", self.name)
        }
    }

    /// Sentence-start form of [`MonsterRace::the_name`]
    pub fn cap_name(&self) -> String {
        let name = self.the_name();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => name,
        }
    }

    /// How a death by this race is recorded ("a cave spider")
    pub fn killer_name(&self) -> String {
        if self.is_unique() {
            return self.name.clone();
        }
        let article = match self.name.chars().next() {
            Some(c) if "aeiouAEIOU".contains(c) => "an",
            _ => "a",
        };
        format!("{} {}", article, self.name)
    }
}

/// A live monster on the level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attacker {
    pub id: MonsterId,
    pub race: MonsterRace,
    pub hp: i32,
    pub max_hp: i32,
    pub stunned: bool,
    pub alive: bool,
    /// Player resistances this monster has seen
    pub learned: Vec<LearnedResist>,
}

impl Attacker {
    pub fn new(id: MonsterId, race: MonsterRace) -> Self {
        let hp = race.hp;
        Attacker {
            id,
            race,
            hp,
            max_hp: hp,
            stunned: false,
            alive: true,
            learned: Vec::new(),
        }
    }

    pub fn level(&self) -> i32 {
        self.race.level.max(1)
    }

    /// Heal up to max HP. Returns the HP actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        if !self.alive || amount <= 0 {
            return 0;
        }
        let before = self.hp;
        self.hp = (self.hp + amount).min(self.max_hp);
        self.hp - before
    }

    /// Remember a resistance. Returns true if it was new.
    pub fn learn(&mut self, tag: LearnedResist) -> bool {
        if self.learned.contains(&tag) {
            return false;
        }
        self.learned.push(tag);
        true
    }
}

/// Damage modifier shared by every hit a monster takes
pub fn monster_damage_mod(race: &MonsterRace, damage: i32, ctx: &mut Ctx<'_>) -> i32 {
    if race.flags.contains(RaceFlags::RES_ALL) {
        return resist_all_divide(damage, RateMode::Random, ctx.rng);
    }
    damage
}

/// Damage a monster. Returns true if it died, after running the kill path.
pub fn monster_take_hit(
    attacker: &mut Attacker,
    damage: i32,
    death_note: &str,
    player: &mut Player,
    ctx: &mut Ctx<'_>,
) -> bool {
    if !attacker.alive {
        return false;
    }
    attacker.hp -= damage.max(0);
    if attacker.hp >= 0 {
        return false;
    }

    attacker.alive = false;
    ctx.msg("monster", &format!("{}{}", attacker.race.cap_name(), death_note));
    tracing::info!(monster = attacker.id.0, race = %attacker.race.id, "monster killed");
    ctx.sink.monster_died(attacker.id);
    on_monster_killed(player, &attacker.race, ctx);
    attacker.race.lore.total_kills = attacker.race.lore.total_kills.saturating_add(1);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{BlowEffect, BlowMethod, DamageDice};
    use crate::config::CombatConstants;
    use crate::rng::ScriptedDice;
    use crate::sink::{RecordingSink, SinkCall};

    #[test]
    fn test_names() {
        let orc = MonsterRace::new("orc", "orc soldier", 8);
        assert_eq!(orc.the_name(), "the orc soldier");
        assert_eq!(orc.cap_name(), "The orc soldier");
        assert_eq!(orc.killer_name(), "an orc soldier");
        let boss =
            MonsterRace::new("grip", "Grip, Farmer Maggot's Dog", 2).with_flags(RaceFlags::UNIQUE);
        assert_eq!(boss.cap_name(), "Grip, Farmer Maggot's Dog");
        assert_eq!(boss.killer_name(), "Grip, Farmer Maggot's Dog");
    }

    #[test]
    fn test_innocence() {
        let mushroom = MonsterRace::new("shrieker", "shrieker mushroom patch", 0);
        assert!(mushroom.is_innocent());
        let bite = Blow::new(BlowMethod::Bite, BlowEffect::Hurt, DamageDice::new(1, 3));
        let biter = mushroom.clone().with_blow(bite);
        assert!(!biter.is_innocent());
    }

    #[test]
    fn test_heal_is_capped() {
        let rat = MonsterRace::new("rat", "giant rat", 1).with_hp(12);
        let mut m = Attacker::new(MonsterId(1), rat);
        m.hp = 5;
        assert_eq!(m.heal(100), 7);
        assert_eq!(m.hp, 12);
    }

    #[test]
    fn test_kill_runs_kill_path() {
        let mut dice = ScriptedDice::constant(99);
        let mut sink = RecordingSink::new();
        let constants = CombatConstants::default();
        let mut ctx = Ctx::new(&mut dice, &mut sink, &constants);
        let mut player = Player::default();
        let mut m = Attacker::new(MonsterId(4), MonsterRace::new("jackal", "jackal", 1).with_hp(8));
        assert!(!monster_take_hit(&mut m, 8, " dies.", &mut player, &mut ctx));
        assert!(monster_take_hit(&mut m, 1, " dies.", &mut player, &mut ctx));
        assert!(!m.alive);
        assert_eq!(m.race.lore.total_kills, 1);
        drop(ctx);
        assert!(sink.saw("The jackal dies."));
        assert!(sink.called(&SinkCall::MonsterDied(MonsterId(4))));
    }

    #[test]
    fn test_resist_all_soaks_damage() {
        let mut dice = ScriptedDice::constant(99);
        let mut sink = RecordingSink::new();
        let constants = CombatConstants::default();
        let mut ctx = Ctx::new(&mut dice, &mut sink, &constants);
        let golem = MonsterRace::new("golem", "mithril golem", 30).with_flags(RaceFlags::RES_ALL);
        assert_eq!(monster_damage_mod(&golem, 450, &mut ctx), 4);
    }
}
