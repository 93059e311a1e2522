//! Effect sink - the outbound interface to UI, AI and world collaborators
//!
//! The core never prints, redraws or touches the map itself. Every
//! user-visible message, redraw request and world side effect goes through an
//! [`EffectSink`]. All methods have no-op defaults so embedders implement only
//! what they care about.

use crate::types::{Element, LearnedResist, MonsterId, SummonKind};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Redraw / recalculation flags a UI layer should act on
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Dirty: u32 {
        const STATUS    = 1 << 0;
        const HP        = 1 << 1;
        const MANA      = 1 << 2;
        const EXP       = 1 << 3;
        const STATS     = 1 << 4;
        const BONUS     = 1 << 5;
        const SPEED     = 1 << 6;
        const GOLD      = 1 << 7;
        const EQUIPPY   = 1 << 8;
        const MAP       = 1 << 9;
        const MONSTERS  = 1 << 10;
        const HEALTH    = 1 << 11;
        const STANCE    = 1 << 12;
        const VIEW      = 1 << 13;
        const INVENTORY = 1 << 14;
    }
}

/// Consumer of everything the engine wants the outside world to know or do
#[allow(unused_variables)]
pub trait EffectSink {
    /// A user-visible message. `key` is a stable category for filtering.
    fn notify(&mut self, key: &'static str, text: &str) {}

    /// Request a redraw / recalculation
    fn mark_dirty(&mut self, flags: Dirty) {}

    /// Interrupt whatever repeated command the player is running
    fn disturb(&mut self) {}

    /// A monster learned that the player resists something
    fn learn_resistance(&mut self, monster: MonsterId, resist: LearnedResist) {}

    /// Possibly destroy carried items vulnerable to `element`.
    /// Returns how many were destroyed.
    fn inventory_damage(&mut self, element: Element, chance: i32) -> i32 {
        0
    }

    /// Acid hit worn armour. Returns true if the armour absorbed part of it.
    fn damage_armour(&mut self) -> bool {
        false
    }

    /// Summon `count` monsters near the player. Returns how many appeared.
    fn summon_monster(&mut self, kind: SummonKind, count: i32) -> i32 {
        0
    }

    /// Teleport the player up to `distance` squares; 0 means next to the attacker
    fn teleport_player(&mut self, distance: i32) {}

    fn teleport_level(&mut self) {}

    fn fall_through_trapdoor(&mut self) {}

    /// Grant a random mutation. Returns true if one was gained.
    fn gain_mutation(&mut self) -> bool {
        false
    }

    fn polymorph_self(&mut self) {}

    /// Curse worn equipment. Returns true if anything was cursed.
    fn curse_equipment(&mut self, chance: i32, heavy_chance: i32) -> bool {
        false
    }

    /// Reduce the enchantment of a worn item. Returns true if one changed.
    fn disenchant_equipment(&mut self) -> bool {
        false
    }

    /// A thief takes an item. Returns the stolen item's name, if any.
    fn steal_item(&mut self, thief: MonsterId) -> Option<String> {
        None
    }

    /// Returns true if food was eaten
    fn eat_food(&mut self) -> bool {
        false
    }

    /// Drain fuel from the light source. Returns true if it dimmed.
    fn drain_light(&mut self, turns: i32) -> bool {
        false
    }

    /// Drain charges from carried devices. Returns charges drained.
    fn drain_charges(&mut self) -> i32 {
        0
    }

    fn earthquake(&mut self, radius: i32) {}

    fn aggravate_monsters(&mut self) {}

    fn scatter_chest(&mut self) {}

    /// Returns true if the map was forgotten
    fn forget_map(&mut self) -> bool {
        false
    }

    /// Reveal the surroundings
    fn map_area(&mut self) {}

    /// A monster teleports away after its attack
    fn monster_blinks(&mut self, monster: MonsterId) {}

    fn monster_died(&mut self, monster: MonsterId) {}

    fn player_died(&mut self, killer: &str) {}
}

/// Sink that drops everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EffectSink for NullSink {}

/// A call made to a [`RecordingSink`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkCall {
    Disturb,
    Learn(MonsterId, LearnedResist),
    InventoryDamage(Element, i32),
    DamageArmour,
    Summon(SummonKind, i32),
    Teleport(i32),
    TeleportLevel,
    Trapdoor,
    Mutation,
    Polymorph,
    Curse(i32, i32),
    Disenchant,
    StealItem(MonsterId),
    EatFood,
    DrainLight(i32),
    DrainCharges,
    Earthquake(i32),
    Aggravate,
    ScatterChest,
    ForgetMap,
    MapArea,
    Blink(MonsterId),
    MonsterDied(MonsterId),
    PlayerDied(String),
}

/// Sink that records every call, for tests and replays
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordingSink {
    pub messages: Vec<(String, String)>,
    pub dirty: Dirty,
    pub calls: Vec<SinkCall>,
    /// What `steal_item` hands back
    pub stolen_item: Option<String>,
    /// What `drain_charges` hands back
    pub charges: i32,
    /// Whether worn armour absorbs acid
    pub armour_absorbs: bool,
    /// Whether `eat_food` finds food
    pub has_food: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of messages with the given key
    pub fn count(&self, key: &str) -> usize {
        self.messages.iter().filter(|(k, _)| k == key).count()
    }

    /// Whether any message contains `needle`
    pub fn saw(&self, needle: &str) -> bool {
        self.messages.iter().any(|(_, t)| t.contains(needle))
    }

    pub fn texts(&self) -> Vec<&str> {
        self.messages.iter().map(|(_, t)| t.as_str()).collect()
    }

    pub fn called(&self, call: &SinkCall) -> bool {
        self.calls.contains(call)
    }

    pub fn clear(&mut self) {
        self.messages.clear();
        self.calls.clear();
        self.dirty = Dirty::empty();
    }
}

impl EffectSink for RecordingSink {
    fn notify(&mut self, key: &'static str, text: &str) {
        self.messages.push((key.to_string(), text.to_string()));
    }

    fn mark_dirty(&mut self, flags: Dirty) {
        self.dirty |= flags;
    }

    fn disturb(&mut self) {
        self.calls.push(SinkCall::Disturb);
    }

    fn learn_resistance(&mut self, monster: MonsterId, resist: LearnedResist) {
        self.calls.push(SinkCall::Learn(monster, resist));
    }

    fn inventory_damage(&mut self, element: Element, chance: i32) -> i32 {
        self.calls.push(SinkCall::InventoryDamage(element, chance));
        0
    }

    fn damage_armour(&mut self) -> bool {
        self.calls.push(SinkCall::DamageArmour);
        self.armour_absorbs
    }

    fn summon_monster(&mut self, kind: SummonKind, count: i32) -> i32 {
        self.calls.push(SinkCall::Summon(kind, count));
        count
    }

    fn teleport_player(&mut self, distance: i32) {
        self.calls.push(SinkCall::Teleport(distance));
    }

    fn teleport_level(&mut self) {
        self.calls.push(SinkCall::TeleportLevel);
    }

    fn fall_through_trapdoor(&mut self) {
        self.calls.push(SinkCall::Trapdoor);
    }

    fn gain_mutation(&mut self) -> bool {
        self.calls.push(SinkCall::Mutation);
        true
    }

    fn polymorph_self(&mut self) {
        self.calls.push(SinkCall::Polymorph);
    }

    fn curse_equipment(&mut self, chance: i32, heavy_chance: i32) -> bool {
        self.calls.push(SinkCall::Curse(chance, heavy_chance));
        false
    }

    fn disenchant_equipment(&mut self) -> bool {
        self.calls.push(SinkCall::Disenchant);
        true
    }

    fn steal_item(&mut self, thief: MonsterId) -> Option<String> {
        self.calls.push(SinkCall::StealItem(thief));
        self.stolen_item.take()
    }

    fn eat_food(&mut self) -> bool {
        self.calls.push(SinkCall::EatFood);
        self.has_food
    }

    fn drain_light(&mut self, turns: i32) -> bool {
        self.calls.push(SinkCall::DrainLight(turns));
        true
    }

    fn drain_charges(&mut self) -> i32 {
        self.calls.push(SinkCall::DrainCharges);
        self.charges
    }

    fn earthquake(&mut self, radius: i32) {
        self.calls.push(SinkCall::Earthquake(radius));
    }

    fn aggravate_monsters(&mut self) {
        self.calls.push(SinkCall::Aggravate);
    }

    fn scatter_chest(&mut self) {
        self.calls.push(SinkCall::ScatterChest);
    }

    fn forget_map(&mut self) -> bool {
        self.calls.push(SinkCall::ForgetMap);
        true
    }

    fn map_area(&mut self) {
        self.calls.push(SinkCall::MapArea);
    }

    fn monster_blinks(&mut self, monster: MonsterId) {
        self.calls.push(SinkCall::Blink(monster));
    }

    fn monster_died(&mut self, monster: MonsterId) {
        self.calls.push(SinkCall::MonsterDied(monster));
    }

    fn player_died(&mut self, killer: &str) {
        self.calls.push(SinkCall::PlayerDied(killer.to_string()));
    }
}

/// Sink that forwards messages and call-outs to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EffectSink for TracingSink {
    fn notify(&mut self, key: &'static str, text: &str) {
        tracing::info!(target: "delve::notify", key, "{}", text);
    }

    fn mark_dirty(&mut self, flags: Dirty) {
        tracing::trace!(target: "delve::notify", ?flags, "mark dirty");
    }

    fn learn_resistance(&mut self, monster: MonsterId, resist: LearnedResist) {
        tracing::debug!(
            target: "delve::notify",
            monster = monster.0,
            ?resist,
            "monster learned resistance"
        );
    }

    fn inventory_damage(&mut self, element: Element, chance: i32) -> i32 {
        tracing::debug!(target: "delve::notify", ?element, chance, "inventory damage");
        0
    }

    fn summon_monster(&mut self, kind: SummonKind, count: i32) -> i32 {
        tracing::info!(target: "delve::notify", ?kind, count, "summon");
        count
    }

    fn teleport_player(&mut self, distance: i32) {
        tracing::debug!(target: "delve::notify", distance, "teleport player");
    }

    fn teleport_level(&mut self) {
        tracing::info!(target: "delve::notify", "teleport level");
    }

    fn fall_through_trapdoor(&mut self) {
        tracing::info!(target: "delve::notify", "fell through trapdoor");
    }

    fn curse_equipment(&mut self, chance: i32, heavy_chance: i32) -> bool {
        tracing::debug!(target: "delve::notify", chance, heavy_chance, "curse equipment");
        false
    }

    fn earthquake(&mut self, radius: i32) {
        tracing::info!(target: "delve::notify", radius, "earthquake");
    }

    fn monster_blinks(&mut self, monster: MonsterId) {
        tracing::debug!(target: "delve::notify", monster = monster.0, "monster blinks away");
    }

    fn monster_died(&mut self, monster: MonsterId) {
        tracing::info!(target: "delve::notify", monster = monster.0, "monster died");
    }

    fn player_died(&mut self, killer: &str) {
        tracing::info!(target: "delve::notify", killer, "player died");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink_collects() {
        let mut sink = RecordingSink::new();
        sink.notify("status", "You are blind!");
        sink.mark_dirty(Dirty::STATUS);
        sink.mark_dirty(Dirty::HP);
        sink.teleport_player(10);

        assert_eq!(sink.count("status"), 1);
        assert!(sink.saw("blind"));
        assert!(sink.dirty.contains(Dirty::STATUS | Dirty::HP));
        assert!(sink.called(&SinkCall::Teleport(10)));

        sink.clear();
        assert!(sink.messages.is_empty());
        assert!(sink.dirty.is_empty());
    }

    #[test]
    fn test_null_sink_defaults() {
        let mut sink = NullSink;
        assert_eq!(sink.inventory_damage(Element::Fire, 3), 0);
        assert!(sink.steal_item(MonsterId(1)).is_none());
        assert!(!sink.gain_mutation());
    }

    #[test]
    fn test_steal_item_is_one_shot() {
        let mut sink = RecordingSink {
            stolen_item: Some("a Flask of oil".to_string()),
            ..RecordingSink::default()
        };
        assert_eq!(sink.steal_item(MonsterId(3)).as_deref(), Some("a Flask of oil"));
        assert!(sink.steal_item(MonsterId(3)).is_none());
    }
}
