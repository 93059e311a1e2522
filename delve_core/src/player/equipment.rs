//! Worn equipment - the parts of an item the combat core reads

use crate::defense::Traits;
use serde::{Deserialize, Serialize};

/// Equipment slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    Weapon,
    Bow,
    Ring,
    Amulet,
    Light,
    Body,
    Cloak,
    Shield,
    Helm,
    Gloves,
    Boots,
}

/// A worn item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub name: String,
    pub slot: EquipmentSlot,
    /// Base armour class
    #[serde(default)]
    pub ac: i32,
    /// Enchantment bonus to armour class
    #[serde(default)]
    pub to_ac: i32,
    #[serde(default)]
    pub traits: Traits,
}

impl Equipment {
    pub fn new(name: impl Into<String>, slot: EquipmentSlot) -> Self {
        Equipment {
            name: name.into(),
            slot,
            ac: 0,
            to_ac: 0,
            traits: Traits::empty(),
        }
    }

    pub fn with_ac(mut self, ac: i32, to_ac: i32) -> Self {
        self.ac = ac;
        self.to_ac = to_ac;
        self
    }

    pub fn with_traits(mut self, traits: Traits) -> Self {
        self.traits |= traits;
        self
    }

    pub fn total_ac(&self) -> i32 {
        self.ac + self.to_ac
    }
}
