//! Monster race configuration loading

use super::ConfigError;
use crate::combat::{Blow, BlowEffect, BlowMethod, DamageDice, MonsterRace, RaceFlags, MAX_BLOWS};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Highest level a monster race may have
pub const MAX_MONSTER_LEVEL: i32 = 127;

/// Container for monster race configurations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonsterRacesConfig {
    #[serde(rename = "races")]
    pub races: Vec<MonsterRace>,
}

impl MonsterRacesConfig {
    /// Reject races the combat core cannot resolve sensibly
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for race in &self.races {
            if !seen.insert(race.id.as_str()) {
                return Err(invalid(&race.id, "duplicate race id"));
            }
            if !(0..=MAX_MONSTER_LEVEL).contains(&race.level) {
                return Err(invalid(&race.id, &format!("level {} out of range", race.level)));
            }
            if race.blows.len() > MAX_BLOWS {
                let msg = format!("{} blows, at most {MAX_BLOWS}", race.blows.len());
                return Err(invalid(&race.id, &msg));
            }
            for blow in &race.blows {
                if blow.dice.num < 0 || blow.dice.sides < 0 {
                    return Err(invalid(&race.id, "negative damage dice"));
                }
                if blow.effect.is_physical() && blow.dice.is_zero() {
                    let msg = format!("{:?} blow without damage dice", blow.effect);
                    return Err(invalid(&race.id, &msg));
                }
            }
        }
        Ok(())
    }

    fn into_map(self) -> HashMap<String, MonsterRace> {
        self.races.into_iter().map(|r| (r.id.clone(), r)).collect()
    }
}

fn invalid(id: &str, what: &str) -> ConfigError {
    ConfigError::ValidationError(format!("monster race '{id}': {what}"))
}

/// Load monster races from a TOML file
pub fn load_monster_races(path: &Path) -> Result<HashMap<String, MonsterRace>, ConfigError> {
    let config: MonsterRacesConfig = super::load_toml(path)?;
    config.validate()?;
    Ok(config.into_map())
}

/// Load monster races from a TOML string
pub fn parse_monster_races(content: &str) -> Result<HashMap<String, MonsterRace>, ConfigError> {
    let config: MonsterRacesConfig = super::parse_toml(content)?;
    config.validate()?;
    Ok(config.into_map())
}

/// Get the bundled monster races
pub fn default_monster_races() -> HashMap<String, MonsterRace> {
    let toml = include_str!("../../config/monsters.toml");
    parse_monster_races(toml).unwrap_or_else(|err| {
        tracing::warn!(%err, "bundled monster table rejected, using fallback");
        let mut map = HashMap::new();
        let kobold = MonsterRace::new("kobold", "kobold", 2)
            .with_hp(12)
            .with_flags(RaceFlags::EVIL)
            .with_blow(Blow::new(BlowMethod::Hit, BlowEffect::Hurt, DamageDice::new(1, 8)));
        map.insert(kobold.id.clone(), kobold);
        map
    })
}
