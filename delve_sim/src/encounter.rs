//! Headless encounter loop: one character against a stream of monsters

use delve_core::combat::{
    monster_take_hit, resolve_monster_attack, Attacker, AttackSummary, MonsterRace,
};
use delve_core::hazard::{resolve_trap, HazardOutcome, TrapKind};
use delve_core::potion::{quaff_potion_effect, PotionKind};
use delve_core::status::{tick_statuses, TickReport};
use delve_core::types::MonsterId;
use delve_core::{Ctx, Player};
use serde::Serialize;

/// Everything that happened in one round
#[derive(Debug, Serialize)]
pub struct RoundReport {
    pub round: u32,
    pub monster: String,
    pub attack: AttackSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trap: Option<HazardOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub potion: Option<PotionKind>,
    pub tick: TickReport,
    pub hp: i32,
}

/// Totals for a whole run
#[derive(Debug, Default, Serialize)]
pub struct EncounterReport {
    pub seed: u64,
    pub rounds_played: u32,
    pub kills: u32,
    pub damage_taken: i32,
    pub traps_sprung: u32,
    pub potions_quaffed: u32,
    pub final_hp: i32,
    pub died: bool,
    pub killer: Option<String>,
    pub rounds: Vec<RoundReport>,
}

/// Knobs for one run
#[derive(Debug, Clone, Copy)]
pub struct EncounterPlan {
    pub rounds: u32,
    /// Spring a trap every this many rounds; 0 disables traps
    pub trap_every: u32,
    /// Quaff a cure when HP drops below this percentage
    pub quaff_below: i32,
}

pub struct Encounter<'r> {
    race: &'r MonsterRace,
    attacker: Attacker,
    next_id: u32,
}

impl<'r> Encounter<'r> {
    pub fn new(race: &'r MonsterRace) -> Self {
        Encounter {
            race,
            attacker: Attacker::new(MonsterId(0), race.clone()),
            next_id: 1,
        }
    }

    fn respawn(&mut self) {
        self.attacker = Attacker::new(MonsterId(self.next_id), self.race.clone());
        self.next_id += 1;
    }

    /// Play rounds until the plan runs out or the player dies
    pub fn run(
        &mut self,
        player: &mut Player,
        plan: EncounterPlan,
        seed: u64,
        ctx: &mut Ctx<'_>,
    ) -> EncounterReport {
        let mut report = EncounterReport {
            seed,
            ..Default::default()
        };

        for round in 1..=plan.rounds {
            if player.is_dead {
                break;
            }
            let hp_before = player.chp;

            let attack = resolve_monster_attack(player, &mut self.attacker, ctx);

            let trap = if plan.trap_every > 0 && round % plan.trap_every == 0 && !player.is_dead {
                let traps = TrapKind::all();
                let pick = ctx.rng.randint0(traps.len() as i32) as usize;
                report.traps_sprung += 1;
                Some(resolve_trap(player, traps[pick], ctx))
            } else {
                None
            };

            let potion = if !player.is_dead && player.chp * 100 < player.mhp * plan.quaff_below {
                let potion = PotionKind::CureCritical;
                quaff_potion_effect(player, potion, ctx);
                report.potions_quaffed += 1;
                Some(potion)
            } else {
                None
            };

            if self.attacker.alive && !player.is_dead {
                let swing = ctx.rng.damroll(2, 6) + player.level;
                if monster_take_hit(&mut self.attacker, swing, " dies.", player, ctx) {
                    report.kills += 1;
                    self.respawn();
                }
            } else if !self.attacker.alive {
                report.kills += 1;
                self.respawn();
            }

            let tick = tick_statuses(player, ctx);
            report.damage_taken += (hp_before - player.chp).max(0);
            report.rounds.push(RoundReport {
                round,
                monster: self.race.id.clone(),
                attack,
                trap,
                potion,
                tick,
                hp: player.chp,
            });
            report.rounds_played = round;
        }

        report.final_hp = player.chp;
        report.died = player.is_dead;
        report.killer = player.died_from.clone();
        tracing::info!(
            rounds = report.rounds_played,
            kills = report.kills,
            died = report.died,
            "encounter finished"
        );
        report
    }
}
