//! Floor traps and the terrain that carries them
//!
//! Pits, darts and gases roll their own dice and touch the status store
//! directly; fire and acid traps are routed through [`apply_damage`] so
//! resistances apply.

use super::HazardOutcome;
use crate::ctx::Ctx;
use crate::damage::{apply_damage, DamageKind, DamageSource};
use crate::defense::{check_hit, Opposing, ResistanceProfile, Traits};
use crate::player::{HitKind, Player};
use crate::types::{Stat, SummonKind};
use serde::{Deserialize, Serialize};

/// Power used for dart traps' to-hit roll
const DART_POWER: i32 = 125;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrapKind {
    Trapdoor,
    Pit,
    SpikedPit,
    PoisonPit,
    SummonRune,
    TeleportRune,
    Fire,
    Acid,
    SlowDart,
    StrDart,
    DexDart,
    ConDart,
    BlindGas,
    ConfuseGas,
    PoisonGas,
    SleepGas,
    Alarm,
}

impl TrapKind {
    pub fn all() -> &'static [TrapKind] {
        use TrapKind::*;
        &[
            Trapdoor, Pit, SpikedPit, PoisonPit, SummonRune, TeleportRune, Fire, Acid, SlowDart,
            StrDart, DexDart, ConDart, BlindGas, ConfuseGas, PoisonGas, SleepGas, Alarm,
        ]
    }

    /// Death-message name
    pub fn name(self) -> &'static str {
        match self {
            TrapKind::Trapdoor => "a trap door",
            TrapKind::Pit => "a pit",
            TrapKind::SpikedPit => "a spiked pit",
            TrapKind::PoisonPit => "a poison pit",
            TrapKind::SummonRune => "a summon monster rune",
            TrapKind::TeleportRune => "a teleport rune",
            TrapKind::Fire => "a fire trap",
            TrapKind::Acid => "an acid trap",
            TrapKind::SlowDart | TrapKind::StrDart | TrapKind::DexDart | TrapKind::ConDart => {
                "a dart trap"
            }
            TrapKind::BlindGas
            | TrapKind::ConfuseGas
            | TrapKind::PoisonGas
            | TrapKind::SleepGas => "a gas trap",
            TrapKind::Alarm => "an alarm",
        }
    }

    /// Levitation carries the player over it
    pub fn is_floor_trap(self) -> bool {
        matches!(
            self,
            TrapKind::Trapdoor | TrapKind::Pit | TrapKind::SpikedPit | TrapKind::PoisonPit
        )
    }

    /// The trap is used up once triggered
    pub fn is_single_use(self) -> bool {
        self == TrapKind::SummonRune
    }
}

/// A map feature, possibly hiding a trap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Terrain {
    pub name: String,
    #[serde(default)]
    pub trap: Option<TrapKind>,
}

impl Terrain {
    pub fn floor() -> Self {
        Terrain {
            name: "open floor".to_string(),
            trap: None,
        }
    }

    pub fn trapped(trap: TrapKind) -> Self {
        Terrain {
            name: "trapped floor".to_string(),
            trap: Some(trap),
        }
    }
}

/// Step onto `terrain`. `None` when nothing there is dangerous.
pub fn resolve_terrain(
    player: &mut Player,
    terrain: &mut Terrain,
    ctx: &mut Ctx<'_>,
) -> Option<HazardOutcome> {
    let trap = terrain.trap?;
    let outcome = resolve_trap(player, trap, ctx);
    if trap.is_single_use() && !outcome.avoided {
        terrain.trap = None;
    }
    Some(outcome)
}

/// Spring a trap on the player
pub fn resolve_trap(player: &mut Player, trap: TrapKind, ctx: &mut Ctx<'_>) -> HazardOutcome {
    let mut out = HazardOutcome::begin(trap.name(), player);
    if player.is_dead {
        return out.finish(player);
    }
    ctx.sink.disturb();
    let traits = player.traits();
    let floating = traits.contains(Traits::LEVITATION);
    tracing::debug!(?trap, floating, "trap triggered");

    if trap.is_floor_trap() && floating {
        let text = match trap {
            TrapKind::Trapdoor => "You float gently over the trap door.",
            TrapKind::Pit => "You float gently over the pit.",
            _ => "You float gently over the floor spikes.",
        };
        ctx.msg("trap", text);
        out.avoided = true;
        return out.finish(player);
    }

    match trap {
        TrapKind::Trapdoor => {
            ctx.msg("trap", "You have fallen through a trap door!");
            let dam = ctx.rng.damroll(2, 8);
            out.damage += player.take_hit(HitKind::NoEscape, dam, trap.name(), ctx);
            if !player.is_dead {
                ctx.sink.fall_through_trapdoor();
            }
        }
        TrapKind::Pit => {
            ctx.msg("trap", "You have fallen into a pit!");
            let dam = ctx.rng.damroll(2, 6);
            out.damage += player.take_hit(HitKind::NoEscape, dam, trap.name(), ctx);
        }
        TrapKind::SpikedPit => {
            ctx.msg("trap", "You fall into a spiked pit!");
            let mut dam = ctx.rng.damroll(2, 6);
            let mut cut = 0;
            if ctx.rng.one_in(2) {
                ctx.msg("trap", "You are impaled!");
                dam *= 2;
                cut = ctx.rng.randint1(dam);
            }
            out.damage += player.take_hit(HitKind::NoEscape, dam, trap.name(), ctx);
            if cut > 0 && !player.is_dead {
                player.mod_cut(cut, ctx);
            }
        }
        TrapKind::PoisonPit => {
            ctx.msg("trap", "You fall into a spiked pit!");
            let mut dam = ctx.rng.damroll(2, 6);
            let mut cut = 0;
            let mut venom = 0;
            if ctx.rng.one_in(2) {
                ctx.msg("trap", "You are impaled on poisonous spikes!");
                dam *= 2;
                cut = ctx.rng.randint1(dam);
                if poison_proof(player, traits) {
                    ctx.msg("trap", "The poison does not affect you!");
                } else {
                    dam *= 2;
                    venom = ctx.rng.randint1(dam);
                }
            }
            out.damage += player.take_hit(HitKind::NoEscape, dam, trap.name(), ctx);
            // statuses land only on a survivor
            if !player.is_dead {
                if cut > 0 {
                    player.mod_cut(cut, ctx);
                }
                if venom > 0 {
                    player.mod_poison(venom, ctx);
                }
            }
        }
        TrapKind::SummonRune => {
            ctx.msg("trap", "There is a flash of shimmering light!");
            let count = 2 + ctx.rng.randint1(3);
            out.summoned += ctx.sink.summon_monster(SummonKind::Any, count);
        }
        TrapKind::TeleportRune => {
            ctx.msg("trap", "You hit a teleport trap!");
            ctx.sink.teleport_player(100);
        }
        TrapKind::Fire => {
            ctx.msg("trap", "You are enveloped in flames!");
            let dam = ctx.rng.damroll(4, 6);
            out.route(player, DamageKind::Fire, dam, trap.name(), ctx);
        }
        TrapKind::Acid => {
            ctx.msg("trap", "You are splashed with acid!");
            let dam = ctx.rng.damroll(4, 6);
            out.route(player, DamageKind::Acid, dam, trap.name(), ctx);
        }
        TrapKind::SlowDart | TrapKind::StrDart | TrapKind::DexDart | TrapKind::ConDart => {
            dart(player, trap, &mut out, ctx);
        }
        TrapKind::BlindGas => {
            ctx.msg("trap", "A black gas surrounds you!");
            if !traits.contains(Traits::RES_BLIND) {
                let turns = ctx.rng.randint0(50) + 25;
                player.mod_blind(turns, ctx);
            }
        }
        TrapKind::ConfuseGas => {
            ctx.msg("trap", "A gas of scintillating colors surrounds you!");
            if !traits.contains(Traits::RES_CONF) {
                let turns = ctx.rng.randint0(20) + 10;
                player.mod_confused(turns, ctx);
            }
        }
        TrapKind::PoisonGas => {
            ctx.msg("trap", "A pungent green gas surrounds you!");
            if !poison_proof(player, traits) {
                let turns = ctx.rng.randint0(20) + 10;
                player.mod_poison(turns, ctx);
            }
        }
        TrapKind::SleepGas => {
            ctx.msg("trap", "A strange white mist surrounds you!");
            if !traits.contains(Traits::FREE_ACT) {
                ctx.msg("trap", "You fall asleep.");
                let turns = ctx.rng.randint0(10) + 5;
                player.mod_paralyzed(turns, ctx);
            }
        }
        TrapKind::Alarm => {
            ctx.msg("trap", "An alarm sounds!");
            ctx.sink.aggravate_monsters();
        }
    }
    out.finish(player)
}

pub(super) fn poison_proof(player: &Player, traits: Traits) -> bool {
    traits.contains(Traits::RES_POIS)
        || ResistanceProfile::of(player).opposing.contains(Opposing::POIS)
}

fn dart(player: &mut Player, trap: TrapKind, out: &mut HazardOutcome, ctx: &mut Ctx<'_>) {
    if !check_hit(DART_POWER, 0, player.ac(), false, ctx.rng) {
        ctx.msg("trap", "A small dart barely misses you.");
        out.avoided = true;
        return;
    }
    ctx.msg("trap", "A small dart hits you!");
    let dam = ctx.rng.damroll(1, 4);
    out.damage += player.take_hit(HitKind::Attack, dam, trap.name(), ctx);
    if player.is_dead || player.decoy_active() {
        return;
    }
    match trap {
        TrapKind::SlowDart => {
            let turns = ctx.rng.randint0(20) + 20;
            player.mod_slow(turns, ctx);
        }
        TrapKind::StrDart => {
            player.do_dec_stat(Stat::Str, ctx);
        }
        TrapKind::DexDart => {
            player.do_dec_stat(Stat::Dex, ctx);
        }
        _ => {
            player.do_dec_stat(Stat::Con, ctx);
        }
    }
}

impl HazardOutcome {
    /// Send a hit through the full damage pipeline
    pub(super) fn route(
        &mut self,
        player: &mut Player,
        kind: DamageKind,
        raw: i32,
        killer: &str,
        ctx: &mut Ctx<'_>,
    ) {
        let mut source = DamageSource::hazard(killer, ctx.floor.depth);
        let event = apply_damage(player, kind, raw, &mut source, ctx);
        self.damage += event.get_damage;
        self.events.push(event);
    }
}
