//! Potion effects on the drinker

use crate::avatar::Virtue;
use crate::ctx::Ctx;
use crate::defense::{Opposing, ResistanceProfile, Traits};
use crate::player::{HitKind, Player, MAX_EXP};
use crate::status::StatusKind;
use crate::types::Stat;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PotionKind {
    Water,
    AppleJuice,
    Slowness,
    SaltWater,
    Poison,
    Blindness,
    Booze,
    Sleep,
    LoseMemories,
    Ruination,
    Infravision,
    SlowPoison,
    NeutralizePoison,
    Boldness,
    Speed,
    ResistHeat,
    ResistCold,
    Resistance,
    Heroism,
    Berserk,
    CureLight,
    CureSerious,
    CureCritical,
    Healing,
    StarHealing,
    Life,
    RestoreMana,
    RestoreExp,
    Curing,
    Invulnerability,
    Experience,
    Enlightenment,
}

impl PotionKind {
    pub fn all() -> &'static [PotionKind] {
        use PotionKind::*;
        &[
            Water, AppleJuice, Slowness, SaltWater, Poison, Blindness, Booze, Sleep, LoseMemories,
            Ruination, Infravision, SlowPoison, NeutralizePoison, Boldness, Speed, ResistHeat,
            ResistCold, Resistance, Heroism, Berserk, CureLight, CureSerious, CureCritical, Healing,
            StarHealing, Life, RestoreMana, RestoreExp, Curing, Invulnerability, Experience,
            Enlightenment,
        ]
    }

    /// Potions that only hurt the drinker
    pub fn is_bad(self) -> bool {
        matches!(
            self,
            PotionKind::Slowness
                | PotionKind::SaltWater
                | PotionKind::Poison
                | PotionKind::Blindness
                | PotionKind::Booze
                | PotionKind::Sleep
                | PotionKind::LoseMemories
                | PotionKind::Ruination
        )
    }
}

const OPPOSE_ALL: [StatusKind; 5] = [
    StatusKind::OpposeAcid,
    StatusKind::OpposeElec,
    StatusKind::OpposeFire,
    StatusKind::OpposeCold,
    StatusKind::OpposePois,
];

/// Apply a quaffed potion. Returns true if the effect was noticed.
pub fn quaff_potion_effect(player: &mut Player, potion: PotionKind, ctx: &mut Ctx<'_>) -> bool {
    if player.is_dead {
        return false;
    }
    let traits = player.traits();
    let mut ident = false;

    match potion {
        PotionKind::Water | PotionKind::AppleJuice => {
            ctx.msg("potion", "You feel less thirsty.");
            ident = true;
        }
        PotionKind::Slowness => {
            let turns = ctx.rng.randint1(25) + 15;
            ident = player.mod_slow(turns, ctx);
        }
        PotionKind::SaltWater => {
            ctx.msg("potion", "The potion makes you vomit!");
            player.cure(StatusKind::Poisoned, ctx);
            player.mod_paralyzed(4, ctx);
            ident = true;
        }
        PotionKind::Poison => {
            let opposed = ResistanceProfile::of(player).opposing.contains(Opposing::POIS);
            if !traits.contains(Traits::RES_POIS) && !opposed {
                let turns = ctx.rng.randint0(15) + 10;
                ident = player.mod_poison(turns, ctx);
            }
        }
        PotionKind::Blindness => {
            if !traits.contains(Traits::RES_BLIND) {
                let turns = ctx.rng.randint0(100) + 100;
                ident = player.mod_blind(turns, ctx);
            }
        }
        PotionKind::Booze => {
            player.chg_virtue(Virtue::Temperance, -1, ctx);
            if !traits.contains(Traits::RES_CONF) {
                let turns = ctx.rng.randint0(20) + 15;
                ident |= player.mod_confused(turns, ctx);
            }
            if !traits.contains(Traits::RES_CHAOS) && ctx.rng.one_in(2) {
                let turns = ctx.rng.randint0(150) + 150;
                ident |= player.mod_hallucination(turns, ctx);
            }
        }
        PotionKind::Sleep => {
            if !traits.contains(Traits::FREE_ACT) {
                ctx.msg("potion", "You fall asleep.");
                let turns = ctx.rng.randint0(4) + 4;
                ident = player.mod_paralyzed(turns, ctx);
            }
        }
        PotionKind::LoseMemories => {
            if !traits.contains(Traits::HOLD_EXP) && player.exp > 0 {
                ctx.msg("potion", "You feel your memories fade.");
                player.chg_virtue(Virtue::Knowledge, -5, ctx);
                player.lose_exp(player.exp / 4, ctx);
                ident = true;
            }
        }
        PotionKind::Ruination => {
            ctx.msg("potion", "Your nerves and muscles feel weak and lifeless!");
            let dam = ctx.rng.damroll(10, 10);
            player.take_hit(HitKind::LoseLife, dam, "a potion of Ruination", ctx);
            for stat in Stat::all() {
                player.dec_stat(*stat, 25, true, ctx);
            }
            ident = true;
        }
        PotionKind::Infravision => {
            let turns = 100 + ctx.rng.randint1(100);
            ident = player.extend_timed(StatusKind::TimedInfravision, turns, ctx);
        }
        PotionKind::SlowPoison => {
            let left = player.remaining(StatusKind::Poisoned);
            ident = player.set_poisoned(left / 2, ctx);
        }
        PotionKind::NeutralizePoison => {
            ident = player.cure(StatusKind::Poisoned, ctx);
        }
        PotionKind::Boldness => {
            ident = player.cure(StatusKind::Afraid, ctx);
        }
        PotionKind::Speed => {
            ident = if player.is_active(StatusKind::Hasted) {
                player.mod_fast(5, ctx)
            } else {
                let turns = ctx.rng.randint1(25) + 15;
                player.mod_fast(turns, ctx)
            };
        }
        PotionKind::ResistHeat => {
            let turns = ctx.rng.randint1(10) + 10;
            ident = player.extend_timed(StatusKind::OpposeFire, turns, ctx);
        }
        PotionKind::ResistCold => {
            let turns = ctx.rng.randint1(10) + 10;
            ident = player.extend_timed(StatusKind::OpposeCold, turns, ctx);
        }
        PotionKind::Resistance => {
            for kind in OPPOSE_ALL {
                let turns = ctx.rng.randint1(20) + 20;
                ident |= player.extend_timed(kind, turns, ctx);
            }
        }
        PotionKind::Heroism | PotionKind::Berserk => {
            let (heal, kind) = if potion == PotionKind::Heroism {
                (10, StatusKind::Heroism)
            } else {
                (30, StatusKind::Berserk)
            };
            ident |= player.hp_player(heal, ctx);
            ident |= player.cure(StatusKind::Afraid, ctx);
            let turns = ctx.rng.randint1(25) + 25;
            ident |= player.extend_timed(kind, turns, ctx);
        }
        PotionKind::CureLight => {
            let heal = ctx.rng.damroll(2, 8);
            ident |= player.hp_player(heal, ctx);
            ident |= player.cure(StatusKind::Blind, ctx);
            ident |= player.mod_cut(-10, ctx);
        }
        PotionKind::CureSerious => {
            let heal = ctx.rng.damroll(4, 8);
            ident |= player.hp_player(heal, ctx);
            ident |= player.cure(StatusKind::Blind, ctx);
            ident |= player.cure(StatusKind::Confused, ctx);
            let cut = player.remaining(StatusKind::Cut);
            ident |= player.set_cut(cut / 2 - 50, ctx);
        }
        PotionKind::CureCritical => {
            let heal = ctx.rng.damroll(6, 8);
            ident |= player.hp_player(heal, ctx);
            ident |= cure_ailments(player, ctx);
        }
        PotionKind::Healing => {
            ident |= player.hp_player(300, ctx);
            ident |= cure_ailments(player, ctx);
        }
        PotionKind::StarHealing => {
            ident |= player.hp_player(1200, ctx);
            ident |= cure_ailments(player, ctx);
        }
        PotionKind::Life => {
            ctx.msg("potion", "You feel life flow through your body!");
            player.chg_virtue(Virtue::Vitality, 1, ctx);
            player.chg_virtue(Virtue::Unlife, -5, ctx);
            player.restore_exp(ctx);
            for stat in Stat::all() {
                player.res_stat(*stat, ctx);
            }
            player.hp_player(5000, ctx);
            cure_ailments(player, ctx);
            ident = true;
        }
        PotionKind::RestoreMana => {
            ident = player.restore_mana(ctx);
        }
        PotionKind::RestoreExp => {
            ident = player.restore_exp(ctx);
        }
        PotionKind::Curing => {
            ident |= player.hp_player(50, ctx);
            ident |= cure_ailments(player, ctx);
            ident |= player.cure(StatusKind::Hallucinating, ctx);
        }
        PotionKind::Invulnerability => {
            let turns = ctx.rng.randint1(4) + 4;
            ident = player.extend_timed(StatusKind::Invulnerable, turns, ctx);
        }
        PotionKind::Experience => {
            if player.exp < MAX_EXP {
                let gain = (player.exp / 2 + 10).min(100_000);
                ctx.msg("potion", "You feel more experienced.");
                player.chg_virtue(Virtue::Enlightenment, 1, ctx);
                player.gain_exp(gain, ctx);
                ident = true;
            }
        }
        PotionKind::Enlightenment => {
            ctx.msg("potion", "An image of your surroundings forms in your mind...");
            player.chg_virtue(Virtue::Knowledge, 1, ctx);
            player.chg_virtue(Virtue::Enlightenment, 1, ctx);
            ctx.sink.map_area();
            ident = true;
        }
    }

    tracing::debug!(?potion, ident, "potion quaffed");
    ident
}

/// Blindness, confusion, poison, stun and cuts
fn cure_ailments(player: &mut Player, ctx: &mut Ctx<'_>) -> bool {
    let mut notice = false;
    for kind in [
        StatusKind::Blind,
        StatusKind::Confused,
        StatusKind::Poisoned,
        StatusKind::Stunned,
        StatusKind::Cut,
    ] {
        notice |= player.cure(kind, ctx);
    }
    notice
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CombatConstants;
    use crate::rng::ScriptedDice;
    use crate::sink::{RecordingSink, SinkCall};

    fn quaff(
        player: &mut Player,
        potion: PotionKind,
        dice: &mut ScriptedDice,
    ) -> (bool, RecordingSink) {
        let mut sink = RecordingSink::new();
        let constants = CombatConstants::default();
        let ident = {
            let mut ctx = Ctx::new(dice, &mut sink, &constants);
            quaff_potion_effect(player, potion, &mut ctx)
        };
        (ident, sink)
    }

    #[test]
    fn test_poison_resisted_is_not_noticed() {
        let mut p = Player::default().with_innate(Traits::RES_POIS);
        let (ident, _) = quaff(&mut p, PotionKind::Poison, &mut ScriptedDice::constant(0));
        assert!(!ident);
        assert!(!p.is_active(StatusKind::Poisoned));
    }

    #[test]
    fn test_cure_light_wounds() {
        let mut p = Player::default();
        p.chp = 50;
        let (ident, _) = quaff(&mut p, PotionKind::CureLight, &mut ScriptedDice::constant(99));
        assert!(ident);
        assert_eq!(p.chp, 66);
    }

    #[test]
    fn test_cure_on_healthy_player_is_unnoticed() {
        let mut p = Player::default();
        let (ident, _) = quaff(&mut p, PotionKind::CureCritical, &mut ScriptedDice::constant(0));
        assert!(!ident);
    }

    #[test]
    fn test_neutralize_poison() {
        let mut p = Player::default();
        let (ident, _) = quaff(&mut p, PotionKind::Poison, &mut ScriptedDice::constant(0));
        assert!(ident);
        let mut dice = ScriptedDice::constant(0);
        let (ident, _) = quaff(&mut p, PotionKind::NeutralizePoison, &mut dice);
        assert!(ident);
        assert!(!p.is_active(StatusKind::Poisoned));
    }

    #[test]
    fn test_resistance_opposes_everything() {
        let mut p = Player::default();
        quaff(&mut p, PotionKind::Resistance, &mut ScriptedDice::constant(0));
        for kind in OPPOSE_ALL {
            assert_eq!(p.remaining(kind), 21);
        }
    }

    #[test]
    fn test_speed_stacks_when_hasted() {
        let mut p = Player::default();
        quaff(&mut p, PotionKind::Speed, &mut ScriptedDice::constant(0));
        assert_eq!(p.remaining(StatusKind::Hasted), 16);
        quaff(&mut p, PotionKind::Speed, &mut ScriptedDice::constant(0));
        assert_eq!(p.remaining(StatusKind::Hasted), 21);
    }

    #[test]
    fn test_ruination_drains_permanently() {
        let mut p = Player::default().with_hp(500);
        let before = p.stats.max(Stat::Str);
        quaff(&mut p, PotionKind::Ruination, &mut ScriptedDice::constant(0));
        assert_eq!(p.chp, 490);
        assert!(p.stats.max(Stat::Str) < before);
    }

    #[test]
    fn test_enlightenment_maps() {
        let mut p = Player::default();
        let mut dice = ScriptedDice::constant(0);
        let (ident, sink) = quaff(&mut p, PotionKind::Enlightenment, &mut dice);
        assert!(ident);
        assert!(sink.called(&SinkCall::MapArea));
    }

    #[test]
    fn test_sleep_blocked_by_free_action() {
        let mut p = Player::default().with_innate(Traits::FREE_ACT);
        let (ident, _) = quaff(&mut p, PotionKind::Sleep, &mut ScriptedDice::constant(0));
        assert!(!ident);
    }
}
