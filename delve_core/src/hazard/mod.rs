//! Traps and environmental hazards

mod chest;
mod trap;

pub use chest::{resolve_chest_trap, Chest, ChestTraps};
pub use trap::{resolve_terrain, resolve_trap, Terrain, TrapKind};

use crate::damage::DamageEvent;
use crate::player::Player;
use crate::status::{PlayerStatus, StatusDelta};
use serde::{Deserialize, Serialize};

/// What a sprung trap did to the player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HazardOutcome {
    pub source: String,
    /// The player floated over it or the dart missed
    pub avoided: bool,
    /// HP lost, across every hit
    pub damage: i32,
    /// Hits routed through the damage pipeline
    pub events: Vec<DamageEvent>,
    pub statuses: Vec<StatusDelta>,
    pub summoned: i32,
    #[serde(skip)]
    before: PlayerStatus,
}

impl HazardOutcome {
    pub(crate) fn begin(source: &str, player: &Player) -> Self {
        HazardOutcome {
            source: source.to_string(),
            avoided: false,
            damage: 0,
            events: Vec::new(),
            statuses: Vec::new(),
            summoned: 0,
            before: player.status().clone(),
        }
    }

    pub(crate) fn finish(mut self, player: &Player) -> Self {
        self.statuses = player.status().diff(&self.before);
        self
    }
}
