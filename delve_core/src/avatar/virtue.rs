//! Virtue scores and the eight tracked slots

use crate::ctx::Ctx;
use crate::player::{Class, Player, Race};
use crate::rng::Dice;
use crate::sink::Dirty;
use serde::{Deserialize, Serialize};

/// Number of virtues a character tracks
pub const VIRTUE_SLOTS: usize = 8;

/// Absolute ceiling on any virtue score
pub const VIRTUE_HARD_CAP: i32 = 125;

/// Scores where an increase may stick instead of passing (1 in 2)
const SOFT_CAPS: [i32; 3] = [50, 80, 100];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Virtue {
    Compassion,
    Honour,
    Justice,
    Sacrifice,
    Knowledge,
    Faith,
    Enlightenment,
    Enchantment,
    Chance,
    Nature,
    Harmony,
    Vitality,
    Unlife,
    Patience,
    Temperance,
    Diligence,
    Valour,
    Individualism,
}

impl Virtue {
    pub fn all() -> &'static [Virtue] {
        &[
            Virtue::Compassion,
            Virtue::Honour,
            Virtue::Justice,
            Virtue::Sacrifice,
            Virtue::Knowledge,
            Virtue::Faith,
            Virtue::Enlightenment,
            Virtue::Enchantment,
            Virtue::Chance,
            Virtue::Nature,
            Virtue::Harmony,
            Virtue::Vitality,
            Virtue::Unlife,
            Virtue::Patience,
            Virtue::Temperance,
            Virtue::Diligence,
            Virtue::Valour,
            Virtue::Individualism,
        ]
    }
}

fn class_virtues(class: Class) -> &'static [Virtue] {
    match class {
        Class::Warrior | Class::Samurai => &[Virtue::Valour, Virtue::Honour],
        Class::Mage => &[Virtue::Knowledge, Virtue::Enchantment],
        Class::Priest => &[Virtue::Faith, Virtue::Temperance],
        Class::Rogue | Class::Ninja => &[Virtue::Chance, Virtue::Individualism],
        Class::Ranger => &[Virtue::Nature, Virtue::Temperance],
        Class::Paladin => &[Virtue::Justice, Virtue::Valour],
        Class::WarriorMage => &[Virtue::Enchantment, Virtue::Valour],
        Class::ChaosWarrior => &[Virtue::Individualism, Virtue::Chance],
        Class::Monk => &[Virtue::Faith, Virtue::Diligence],
        Class::Mindcrafter => &[Virtue::Harmony, Virtue::Enlightenment],
        Class::HighMage => &[Virtue::Enlightenment, Virtue::Enchantment],
        Class::Berserker => &[Virtue::Valour, Virtue::Individualism],
        Class::Bard => &[Virtue::Harmony, Virtue::Compassion],
    }
}

fn race_virtues(race: Race) -> &'static [Virtue] {
    match race {
        Race::Human | Race::Barbarian => &[Virtue::Individualism],
        Race::HalfElf | Race::Elf | Race::HighElf => &[Virtue::Nature, Virtue::Knowledge],
        Race::Hobbit => &[Virtue::Temperance],
        Race::Gnome => &[Virtue::Chance],
        Race::Dwarf => &[Virtue::Diligence],
        Race::HalfOrc | Race::HalfTroll => &[Virtue::Valour],
        Race::Yeek => &[Virtue::Patience],
        Race::Klackon => &[Virtue::Diligence, Virtue::Harmony],
        Race::Kobold => &[Virtue::Chance],
        Race::DarkElf => &[Virtue::Knowledge],
        Race::Draconian => &[Virtue::Valour, Virtue::Enchantment],
        Race::MindFlayer => &[Virtue::Enlightenment],
        Race::Imp => &[Virtue::Individualism],
        Race::Golem | Race::Android => &[Virtue::Diligence],
        Race::Skeleton | Race::Zombie | Race::Vampire | Race::Spectre => &[Virtue::Unlife],
        Race::Sprite => &[Virtue::Nature],
        Race::Ent => &[Virtue::Nature, Virtue::Patience],
        Race::Kutar => &[Virtue::Patience],
    }
}

/// One tracked virtue and its score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtueSlot {
    pub virtue: Virtue,
    pub score: i32,
}

/// The character's tracked virtues
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarVirtues {
    slots: Vec<VirtueSlot>,
}

impl AvatarVirtues {
    /// Track exactly these virtues (duplicates dropped, extra entries ignored)
    pub fn new(virtues: &[Virtue]) -> Self {
        let mut slots: Vec<VirtueSlot> = Vec::with_capacity(VIRTUE_SLOTS);
        for &virtue in virtues {
            if slots.len() == VIRTUE_SLOTS {
                break;
            }
            if !slots.iter().any(|s| s.virtue == virtue) {
                slots.push(VirtueSlot { virtue, score: 0 });
            }
        }
        AvatarVirtues { slots }
    }

    /// Class virtues first, then race virtues, then the fixed fill order
    pub fn for_character(race: Race, class: Class) -> Self {
        let order: Vec<Virtue> = class_virtues(class)
            .iter()
            .chain(race_virtues(race))
            .chain(Virtue::all())
            .copied()
            .collect();
        Self::new(&order)
    }

    pub fn slots(&self) -> &[VirtueSlot] {
        &self.slots
    }

    pub fn is_tracked(&self, virtue: Virtue) -> bool {
        self.slots.iter().any(|s| s.virtue == virtue)
    }

    /// Score of a tracked virtue; None if the character does not track it
    pub fn score(&self, virtue: Virtue) -> Option<i32> {
        self.slots.iter().find(|s| s.virtue == virtue).map(|s| s.score)
    }

    /// Shift a virtue, honouring the sticky soft caps and the hard cap.
    ///
    /// Returns false when the virtue is untracked or `amount` is 0.
    pub fn change(&mut self, virtue: Virtue, amount: i32, rng: &mut dyn Dice) -> bool {
        if amount == 0 {
            return false;
        }
        let Some(slot) = self.slots.iter_mut().find(|s| s.virtue == virtue) else {
            return false;
        };

        let target = slot.score + amount;
        if amount > 0 {
            for cap in SOFT_CAPS {
                if target > cap && rng.one_in(2) {
                    slot.score = slot.score.max(cap);
                    return true;
                }
            }
            slot.score = target.min(VIRTUE_HARD_CAP);
        } else {
            for cap in SOFT_CAPS {
                if target < -cap && rng.one_in(2) {
                    slot.score = slot.score.min(-cap);
                    return true;
                }
            }
            slot.score = target.max(-VIRTUE_HARD_CAP);
        }
        true
    }
}

impl Player {
    /// Adjust a virtue score; untracked virtues and dead characters are ignored
    pub fn chg_virtue(&mut self, virtue: Virtue, amount: i32, ctx: &mut Ctx<'_>) {
        if self.is_dead {
            return;
        }
        if self.virtues.change(virtue, amount, ctx.rng) {
            tracing::trace!(?virtue, amount, "virtue changed");
            ctx.dirty(Dirty::BONUS);
        }
    }
}
