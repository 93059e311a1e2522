//! Shared types used across modules

use serde::{Deserialize, Serialize};

/// The six primary stats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    Str,
    Int,
    Wis,
    Dex,
    Con,
    Chr,
}

impl Stat {
    pub fn all() -> &'static [Stat] {
        &[Stat::Str, Stat::Int, Stat::Wis, Stat::Dex, Stat::Con, Stat::Chr]
    }

    pub fn index(self) -> usize {
        match self {
            Stat::Str => 0,
            Stat::Int => 1,
            Stat::Wis => 2,
            Stat::Dex => 3,
            Stat::Con => 4,
            Stat::Chr => 5,
        }
    }

    pub fn from_index(i: usize) -> Stat {
        Stat::all()[i % 6]
    }

    /// Word used when the stat goes down ("You feel very weak.")
    pub fn loss_word(self) -> &'static str {
        match self {
            Stat::Str => "weak",
            Stat::Int => "stupid",
            Stat::Wis => "naive",
            Stat::Dex => "clumsy",
            Stat::Con => "sickly",
            Stat::Chr => "ugly",
        }
    }

    /// Word used when the stat goes up or is sustained
    pub fn gain_word(self) -> &'static str {
        match self {
            Stat::Str => "strong",
            Stat::Int => "smart",
            Stat::Wis => "wise",
            Stat::Dex => "dextrous",
            Stat::Con => "healthy",
            Stat::Chr => "cute",
        }
    }
}

/// Element classes used for inventory destruction and auras
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    Acid,
    Elec,
    Fire,
    Cold,
}

impl Element {
    pub fn all() -> &'static [Element] {
        &[Element::Acid, Element::Elec, Element::Fire, Element::Cold]
    }
}

/// Handle for a monster instance on the level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct MonsterId(pub u32);

/// Resistances a monster can learn the player has
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearnedResist {
    Acid,
    Elec,
    Fire,
    Cold,
    Pois,
    Nether,
    Lite,
    Dark,
    Fear,
    Conf,
    Chaos,
    Disen,
    Blind,
    Nexus,
    Sound,
    Shard,
    Free,
    Mana,
    Reflect,
    Save,
}

/// Which kind of monster a summon call-out asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummonKind {
    Any,
    Elemental,
    Bird,
    HighLevel,
}

/// Where the current event happens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Floor {
    /// Dungeon depth; 0 is the surface
    pub depth: i32,
    /// The player was ambushed on the surface
    pub ambush: bool,
    /// The event happens inside the arena
    pub arena: bool,
}

impl Default for Floor {
    fn default() -> Self {
        Floor {
            depth: 1,
            ambush: false,
            arena: false,
        }
    }
}

impl Floor {
    pub fn at_depth(depth: i32) -> Self {
        Floor {
            depth,
            ..Floor::default()
        }
    }

    pub fn is_surface(&self) -> bool {
        self.depth == 0
    }
}
