//! Element damage functions - acid, lightning, fire and cold
//!
//! The rate tables leave the four elements alone; these functions apply the
//! element rules themselves: immunity zeroes the hit, vulnerability doubles
//! it, innate resistance and timed opposition each cut it to a third.

use crate::ctx::Ctx;
use crate::defense::{ResistanceProfile, Traits};
use crate::player::{HitKind, Player};
use crate::types::{Element, Stat};

struct ElementRule {
    element: Element,
    immune: Traits,
    resist: Traits,
    vulnerable: Traits,
    /// Stat at risk when the hit is taken unresisted
    stat: Stat,
}

const ACID: ElementRule = ElementRule {
    element: Element::Acid,
    immune: Traits::IM_ACID,
    resist: Traits::RES_ACID,
    vulnerable: Traits::VULN_ACID,
    stat: Stat::Chr,
};

const ELEC: ElementRule = ElementRule {
    element: Element::Elec,
    immune: Traits::IM_ELEC,
    resist: Traits::RES_ELEC,
    vulnerable: Traits::VULN_ELEC,
    stat: Stat::Dex,
};

const FIRE: ElementRule = ElementRule {
    element: Element::Fire,
    immune: Traits::IM_FIRE,
    resist: Traits::RES_FIRE,
    vulnerable: Traits::VULN_FIRE,
    stat: Stat::Str,
};

const COLD: ElementRule = ElementRule {
    element: Element::Cold,
    immune: Traits::IM_COLD,
    resist: Traits::RES_COLD,
    vulnerable: Traits::VULN_COLD,
    stat: Stat::Str,
};

/// Scale an element hit by the player's defenses without side effects
pub fn element_rate(element: Element, damage: i32, profile: &ResistanceProfile) -> i32 {
    let rule = rule_for(element);
    if profile.has(rule.immune) || damage <= 0 {
        return 0;
    }
    let mut dam = damage;
    if profile.has(rule.vulnerable) {
        dam *= 2;
    }
    if profile.has(rule.resist) {
        dam = (dam + 2) / 3;
    }
    if opposed(element, profile) {
        dam = (dam + 2) / 3;
    }
    dam
}

fn rule_for(element: Element) -> &'static ElementRule {
    match element {
        Element::Acid => &ACID,
        Element::Elec => &ELEC,
        Element::Fire => &FIRE,
        Element::Cold => &COLD,
    }
}

fn opposed(element: Element, profile: &ResistanceProfile) -> bool {
    use crate::defense::Opposing;
    let flag = match element {
        Element::Acid => Opposing::ACID,
        Element::Elec => Opposing::ELEC,
        Element::Fire => Opposing::FIRE,
        Element::Cold => Opposing::COLD,
    };
    profile.opposing.contains(flag)
}

/// Inventory destruction chance grows with the size of the hit
fn inventory_chance(damage: i32) -> i32 {
    if damage < 30 {
        1
    } else if damage < 60 {
        2
    } else {
        3
    }
}

fn element_damage(
    element: Element,
    player: &mut Player,
    damage: i32,
    killer: &str,
    ctx: &mut Ctx<'_>,
) -> i32 {
    let rule = rule_for(element);
    let profile = ResistanceProfile::of(player);
    let chance = inventory_chance(damage);
    let resisted = profile.has(rule.resist);
    let double_resist = opposed(element, &profile);

    let mut dam = element_rate(element, damage, &profile);
    if dam == 0 {
        return 0;
    }

    if !player.decoy_active() {
        if !(resisted || double_resist) && ctx.rng.one_in(ctx.constants.hurt_chance) {
            player.do_dec_stat(rule.stat, ctx);
        }
        if element == Element::Acid && ctx.sink.damage_armour() {
            dam = (dam + 1) / 2;
        }
    }

    let taken = player.take_hit(HitKind::Attack, dam, killer, ctx);
    if !(resisted && double_resist) {
        ctx.sink.inventory_damage(element, chance);
    }
    taken
}

pub fn acid_damage(player: &mut Player, damage: i32, killer: &str, ctx: &mut Ctx<'_>) -> i32 {
    element_damage(Element::Acid, player, damage, killer, ctx)
}

pub fn elec_damage(player: &mut Player, damage: i32, killer: &str, ctx: &mut Ctx<'_>) -> i32 {
    element_damage(Element::Elec, player, damage, killer, ctx)
}

pub fn fire_damage(player: &mut Player, damage: i32, killer: &str, ctx: &mut Ctx<'_>) -> i32 {
    element_damage(Element::Fire, player, damage, killer, ctx)
}

pub fn cold_damage(player: &mut Player, damage: i32, killer: &str, ctx: &mut Ctx<'_>) -> i32 {
    element_damage(Element::Cold, player, damage, killer, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CombatConstants;
    use crate::rng::ScriptedDice;
    use crate::sink::{RecordingSink, SinkCall};
    use crate::status::StatusKind;

    #[test]
    fn test_rates() {
        let none = ResistanceProfile::neutral();
        assert_eq!(element_rate(Element::Fire, 30, &none), 30);
        let res = none.clone().with_traits(Traits::RES_FIRE);
        assert_eq!(element_rate(Element::Fire, 30, &res), 10);
        let both = res.clone().with_opposing(crate::defense::Opposing::FIRE);
        assert_eq!(element_rate(Element::Fire, 30, &both), 4);
        let vuln = none.clone().with_traits(Traits::VULN_FIRE);
        assert_eq!(element_rate(Element::Fire, 30, &vuln), 60);
        let im = none.with_traits(Traits::IM_FIRE | Traits::VULN_FIRE);
        assert_eq!(element_rate(Element::Fire, 30, &im), 0);
    }

    #[test]
    fn test_fire_damage_resisted() {
        let mut dice = ScriptedDice::constant(99);
        let mut sink = RecordingSink::new();
        let constants = CombatConstants::default();
        let mut ctx = Ctx::new(&mut dice, &mut sink, &constants);
        let mut p = Player::default().with_innate(Traits::RES_FIRE);
        assert_eq!(fire_damage(&mut p, 30, "a fire trap", &mut ctx), 10);
        assert_eq!(p.chp, 90);
        drop(ctx);
        assert!(sink.called(&SinkCall::InventoryDamage(Element::Fire, 2)));
    }

    #[test]
    fn test_double_resist_spares_inventory() {
        let mut dice = ScriptedDice::constant(99);
        let mut sink = RecordingSink::new();
        let constants = CombatConstants::default();
        let mut ctx = Ctx::new(&mut dice, &mut sink, &constants);
        let mut p = Player::default().with_innate(Traits::RES_COLD);
        p.set_timed(StatusKind::OpposeCold, 10, &mut ctx);
        cold_damage(&mut p, 90, "a frost giant", &mut ctx);
        drop(ctx);
        assert!(!sink.calls.iter().any(|c| matches!(c, SinkCall::InventoryDamage(..))));
    }

    #[test]
    fn test_acid_armour_absorbs() {
        let mut dice = ScriptedDice::constant(99);
        let mut sink = RecordingSink::new();
        sink.armour_absorbs = true;
        let constants = CombatConstants::default();
        let mut ctx = Ctx::new(&mut dice, &mut sink, &constants);
        let mut p = Player::default();
        assert_eq!(acid_damage(&mut p, 20, "a pool of acid", &mut ctx), 10);
    }

    #[test]
    fn test_unresisted_hit_can_drain() {
        // one_in(16) succeeds on 0
        let mut dice = ScriptedDice::constant(0);
        let mut sink = RecordingSink::new();
        let constants = CombatConstants::default();
        let mut ctx = Ctx::new(&mut dice, &mut sink, &constants);
        let mut p = Player::default();
        let before = p.stats.cur(Stat::Dex);
        elec_damage(&mut p, 10, "a spark", &mut ctx);
        assert!(p.stats.cur(Stat::Dex) < before);
    }
}
