//! Player entity - the single owner of HP, stats, statuses and virtues

mod damage;
mod equipment;
mod experience;
mod race;
mod stats;

pub use damage::HitKind;
pub use equipment::{Equipment, EquipmentSlot};
pub use experience::{exp_for_level, level_for_exp, MAX_EXP, MAX_LEVEL};
pub use race::{Class, LifeType, Race};
pub use stats::{adj_con_fix, adj_dex_safe, stat_index, Stats, STAT_CAP, STAT_FLOOR};

use crate::avatar::AvatarVirtues;
use crate::defense::Traits;
use crate::status::{PlayerStatus, StatusKind};
use serde::{Deserialize, Serialize};

/// Alignment above which the player counts as good
pub const GOOD_ALIGNMENT: i32 = 10;

/// Alignment below which the player counts as evil
pub const EVIL_ALIGNMENT: i32 = -10;

/// Multi-turn action in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    #[default]
    None,
    Resting,
    Learning,
    Searching,
}

/// Martial stance held between turns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stance {
    #[default]
    None,
    /// Monk posture
    Kamae(u8),
    /// Samurai form
    Kata(u8),
}

/// Channelled state that status onsets can interrupt
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelState {
    pub action: Action,
    pub stance: Stance,
    /// Stored concentration (mindcrafter / force trainer)
    pub concentration: i32,
    /// A song or hex is being maintained
    pub singing: bool,
    /// A ranged aim is being held
    pub aiming: bool,
}

impl ChannelState {
    pub fn is_idle(&self) -> bool {
        self.action == Action::None
            && self.stance == Stance::None
            && self.concentration == 0
            && !self.singing
            && !self.aiming
    }
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub race: Race,
    pub class: Class,
    pub level: i32,
    pub exp: i32,
    pub max_exp: i32,
    pub chp: i32,
    pub mhp: i32,
    pub csp: i32,
    pub msp: i32,
    pub gold: i32,
    pub alignment: i32,
    pub stats: Stats,
    /// Saving throw skill (percent)
    pub skill_sav: i32,
    pub base_ac: i32,
    pub equipment: Vec<Equipment>,
    /// Extra innate traits (mutations, intrinsics)
    pub innate: Traits,
    pub(crate) status: PlayerStatus,
    pub channel: ChannelState,
    pub virtues: AvatarVirtues,
    pub game_turn: u64,
    pub is_dead: bool,
    pub died_from: Option<String>,
}

impl Default for Player {
    fn default() -> Self {
        Player::new(Race::Human, Class::Warrior)
    }
}

impl Player {
    pub fn new(race: Race, class: Class) -> Self {
        Player {
            name: "Adventurer".to_string(),
            race,
            class,
            level: 1,
            exp: 0,
            max_exp: 0,
            chp: 100,
            mhp: 100,
            csp: 0,
            msp: 0,
            gold: 100,
            alignment: 0,
            stats: Stats::default(),
            skill_sav: 30,
            base_ac: 0,
            equipment: Vec::new(),
            innate: Traits::empty(),
            status: PlayerStatus::new(),
            channel: ChannelState::default(),
            virtues: AvatarVirtues::for_character(race, class),
            game_turn: 0,
            is_dead: false,
            died_from: None,
        }
    }

    /// Set level (and the matching experience)
    pub fn with_level(mut self, level: i32) -> Self {
        self.level = level.clamp(1, MAX_LEVEL);
        self.exp = exp_for_level(self.level);
        self.max_exp = self.exp;
        self
    }

    pub fn with_hp(mut self, hp: i32) -> Self {
        self.mhp = hp.max(1);
        self.chp = self.mhp;
        self
    }

    pub fn with_mana(mut self, sp: i32) -> Self {
        self.msp = sp.max(0);
        self.csp = self.msp;
        self
    }

    pub fn with_stats(mut self, stats: Stats) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_save(mut self, skill_sav: i32) -> Self {
        self.skill_sav = skill_sav;
        self
    }

    pub fn with_ac(mut self, ac: i32) -> Self {
        self.base_ac = ac;
        self
    }

    pub fn with_alignment(mut self, alignment: i32) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_gold(mut self, gold: i32) -> Self {
        self.gold = gold.max(0);
        self
    }

    pub fn with_innate(mut self, traits: Traits) -> Self {
        self.innate |= traits;
        self
    }

    pub fn equip(mut self, item: Equipment) -> Self {
        self.equipment.push(item);
        self
    }

    /// Read-only view of the timed statuses
    pub fn status(&self) -> &PlayerStatus {
        &self.status
    }

    /// All defensive traits currently in effect
    pub fn traits(&self) -> Traits {
        let mut t = self.innate | self.race.traits(self.level) | self.class.traits(self.level);
        for item in &self.equipment {
            t |= item.traits;
        }

        let s = &self.status;
        if s.is_active(StatusKind::Heroism) || s.is_active(StatusKind::Berserk) {
            t |= Traits::RES_FEAR;
        }
        if s.is_active(StatusKind::TimedLevitation) {
            t |= Traits::LEVITATION;
        }
        if s.is_active(StatusKind::WraithForm) {
            t |= Traits::IM_DARK | Traits::REFLECT;
        }
        if s.is_active(StatusKind::ReflectMissiles) {
            t |= Traits::REFLECT;
        }
        if s.is_active(StatusKind::ResistNether) {
            t |= Traits::RES_NETHER;
        }
        if s.is_active(StatusKind::ResistTime) {
            t |= Traits::RES_TIME;
        }
        t
    }

    /// Armour class including gear and protective buffs
    pub fn ac(&self) -> i32 {
        let mut ac = self.base_ac + self.equipment.iter().map(Equipment::total_ac).sum::<i32>();
        if self.status.is_active(StatusKind::ShieldBuff) {
            ac += 50;
        }
        if self.status.is_active(StatusKind::Blessed) {
            ac += 5;
        }
        ac.max(0)
    }

    /// Effective saving throw
    pub fn saving_throw(&self) -> i32 {
        if self.status.is_active(StatusKind::ResistMagic) {
            self.skill_sav.max(95)
        } else {
            self.skill_sav
        }
    }

    /// The shadow decoy soaks this turn's hit
    pub fn decoy_active(&self) -> bool {
        self.status.is_active(StatusKind::MultiShadow) && self.game_turn % 2 == 1
    }

    pub fn is_good(&self) -> bool {
        self.alignment > GOOD_ALIGNMENT
    }

    pub fn is_evil(&self) -> bool {
        self.alignment < EVIL_ALIGNMENT
    }

    pub fn life(&self) -> LifeType {
        self.race.life()
    }

    pub fn is_stun_immune(&self) -> bool {
        self.race.is_stun_immune() || self.class.is_stun_immune(self.level)
    }

    pub fn is_cut_immune(&self) -> bool {
        self.race.is_cut_immune(self.level)
    }
}
