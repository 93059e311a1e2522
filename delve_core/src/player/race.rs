//! Races and classes - innate traits by level

use crate::defense::Traits;
use serde::{Deserialize, Serialize};

/// Whether a creature has a life force that can be drained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifeType {
    Living,
    Undead,
    Nonliving,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Race {
    Human,
    HalfElf,
    Elf,
    Hobbit,
    Gnome,
    Dwarf,
    HalfOrc,
    HalfTroll,
    HighElf,
    Barbarian,
    Yeek,
    Klackon,
    Kobold,
    DarkElf,
    Draconian,
    MindFlayer,
    Imp,
    Golem,
    Skeleton,
    Zombie,
    Vampire,
    Spectre,
    Sprite,
    Ent,
    Kutar,
    Android,
}

impl Race {
    pub fn all() -> &'static [Race] {
        &[
            Race::Human,
            Race::HalfElf,
            Race::Elf,
            Race::Hobbit,
            Race::Gnome,
            Race::Dwarf,
            Race::HalfOrc,
            Race::HalfTroll,
            Race::HighElf,
            Race::Barbarian,
            Race::Yeek,
            Race::Klackon,
            Race::Kobold,
            Race::DarkElf,
            Race::Draconian,
            Race::MindFlayer,
            Race::Imp,
            Race::Golem,
            Race::Skeleton,
            Race::Zombie,
            Race::Vampire,
            Race::Spectre,
            Race::Sprite,
            Race::Ent,
            Race::Kutar,
            Race::Android,
        ]
    }

    pub fn life(self) -> LifeType {
        match self {
            Race::Skeleton | Race::Zombie | Race::Vampire | Race::Spectre => LifeType::Undead,
            Race::Golem | Race::Android => LifeType::Nonliving,
            _ => LifeType::Living,
        }
    }

    /// Traits the race has at the given character level
    pub fn traits(self, level: i32) -> Traits {
        match self {
            Race::Human | Race::HalfElf | Race::Sprite => Traits::empty(),
            Race::Elf => Traits::RES_LITE,
            Race::Hobbit => Traits::HOLD_EXP,
            Race::Gnome => Traits::FREE_ACT,
            Race::Dwarf => Traits::RES_BLIND,
            Race::HalfOrc => Traits::RES_DARK,
            Race::HalfTroll => Traits::SUST_STR,
            Race::HighElf => Traits::RES_LITE | Traits::SEE_INVIS,
            Race::Barbarian => Traits::RES_FEAR,
            Race::Yeek => {
                let mut t = Traits::RES_ACID;
                if level > 19 {
                    t |= Traits::IM_ACID;
                }
                t
            }
            Race::Klackon => Traits::RES_CONF | Traits::RES_ACID,
            Race::Kobold => Traits::RES_POIS,
            Race::DarkElf => Traits::RES_DARK,
            Race::Draconian => {
                let mut t = Traits::LEVITATION;
                if level > 4 {
                    t |= Traits::RES_FIRE;
                }
                if level > 9 {
                    t |= Traits::RES_COLD;
                }
                if level > 14 {
                    t |= Traits::RES_ACID;
                }
                if level > 19 {
                    t |= Traits::RES_ELEC;
                }
                if level > 34 {
                    t |= Traits::RES_POIS;
                }
                t
            }
            Race::MindFlayer => Traits::SUST_INT | Traits::SUST_WIS,
            Race::Imp => {
                let mut t = Traits::RES_FIRE;
                if level > 9 {
                    t |= Traits::SEE_INVIS;
                }
                if level > 19 {
                    t |= Traits::IM_FIRE;
                }
                t
            }
            Race::Golem => {
                Traits::RES_POIS | Traits::FREE_ACT | Traits::SEE_INVIS | Traits::HOLD_EXP
            }
            Race::Skeleton => {
                let mut t =
                    Traits::RES_SHARDS | Traits::HOLD_EXP | Traits::SEE_INVIS | Traits::RES_POIS;
                if level > 9 {
                    t |= Traits::RES_COLD;
                }
                t
            }
            Race::Zombie => {
                let mut t =
                    Traits::RES_NETHER | Traits::HOLD_EXP | Traits::SEE_INVIS | Traits::RES_POIS;
                if level > 4 {
                    t |= Traits::RES_COLD;
                }
                t
            }
            Race::Vampire => {
                Traits::RES_DARK
                    | Traits::IM_DARK
                    | Traits::HOLD_EXP
                    | Traits::RES_NETHER
                    | Traits::RES_COLD
                    | Traits::RES_POIS
                    | Traits::VULN_LITE
            }
            Race::Spectre => {
                let mut t = Traits::LEVITATION
                    | Traits::FREE_ACT
                    | Traits::RES_COLD
                    | Traits::SEE_INVIS
                    | Traits::HOLD_EXP
                    | Traits::RES_NETHER
                    | Traits::RES_POIS;
                if level > 34 {
                    t |= Traits::SUST_INT;
                }
                t
            }
            Race::Ent => Traits::SUST_CON | Traits::VULN_FIRE,
            Race::Kutar => Traits::RES_CONF,
            Race::Android => Traits::FREE_ACT | Traits::RES_POIS | Traits::HOLD_EXP,
        }
    }

    /// Stun can never be applied to this race
    pub fn is_stun_immune(self) -> bool {
        matches!(self, Race::Golem)
    }

    /// Cuts can never be applied to this race at the given level
    pub fn is_cut_immune(self, level: i32) -> bool {
        match self {
            Race::Golem | Race::Skeleton | Race::Spectre => true,
            Race::Zombie => level < 12,
            _ => false,
        }
    }

    /// Experience can not be drained from this race
    pub fn is_exp_immune(self) -> bool {
        matches!(self, Race::Android)
    }

    /// Whether the race takes damage from light like a vampire
    pub fn burns_in_light(self) -> bool {
        matches!(self, Race::Vampire)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Class {
    Warrior,
    Mage,
    Priest,
    Rogue,
    Ranger,
    Paladin,
    WarriorMage,
    ChaosWarrior,
    Monk,
    Mindcrafter,
    HighMage,
    Berserker,
    Samurai,
    Ninja,
    Bard,
}

impl Class {
    pub fn all() -> &'static [Class] {
        &[
            Class::Warrior,
            Class::Mage,
            Class::Priest,
            Class::Rogue,
            Class::Ranger,
            Class::Paladin,
            Class::WarriorMage,
            Class::ChaosWarrior,
            Class::Monk,
            Class::Mindcrafter,
            Class::HighMage,
            Class::Berserker,
            Class::Samurai,
            Class::Ninja,
            Class::Bard,
        ]
    }

    /// Traits the class has at the given character level
    pub fn traits(self, level: i32) -> Traits {
        let mut t = Traits::empty();
        match self {
            Class::Warrior => {
                if level > 29 {
                    t |= Traits::RES_FEAR;
                }
            }
            Class::Paladin => {
                if level > 39 {
                    t |= Traits::RES_FEAR;
                }
            }
            Class::ChaosWarrior => {
                if level > 29 {
                    t |= Traits::RES_CHAOS;
                }
                if level > 39 {
                    t |= Traits::RES_FEAR;
                }
            }
            Class::Monk => {
                if level > 24 {
                    t |= Traits::FREE_ACT;
                }
            }
            Class::Mindcrafter => {
                if level > 9 {
                    t |= Traits::RES_FEAR;
                }
                if level > 19 {
                    t |= Traits::SUST_WIS;
                }
                if level > 29 {
                    t |= Traits::RES_CONF;
                }
            }
            Class::Berserker => {
                t |= Traits::RES_FEAR | Traits::SUST_CON;
            }
            Class::Ninja => {
                t |= Traits::RES_FEAR;
                if level > 19 {
                    t |= Traits::RES_POIS;
                }
            }
            Class::Samurai => {
                if level > 29 {
                    t |= Traits::RES_FEAR;
                }
            }
            _ => {}
        }
        t
    }

    /// Veteran berserkers shrug off stuns
    pub fn is_stun_immune(self, level: i32) -> bool {
        self == Class::Berserker && level > 34
    }
}
