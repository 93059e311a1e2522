//! Resolution context threaded through every combat call

use crate::config::CombatConstants;
use crate::rng::Dice;
use crate::sink::{Dirty, EffectSink};
use crate::types::Floor;

/// Everything a resolver needs besides the player and the attacker
pub struct Ctx<'a> {
    pub rng: &'a mut dyn Dice,
    pub sink: &'a mut dyn EffectSink,
    pub constants: &'a CombatConstants,
    pub floor: Floor,
}

impl<'a> Ctx<'a> {
    pub fn new(
        rng: &'a mut dyn Dice,
        sink: &'a mut dyn EffectSink,
        constants: &'a CombatConstants,
    ) -> Self {
        Ctx {
            rng,
            sink,
            constants,
            floor: Floor::default(),
        }
    }

    pub fn with_floor(mut self, floor: Floor) -> Self {
        self.floor = floor;
        self
    }

    pub fn msg(&mut self, key: &'static str, text: &str) {
        self.sink.notify(key, text);
    }

    pub fn dirty(&mut self, flags: Dirty) {
        self.sink.mark_dirty(flags);
    }
}
