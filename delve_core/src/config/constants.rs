//! Combat constants configuration

use serde::{Deserialize, Serialize};

/// Tunable combat constants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatConstants {
    /// Easy mode: the quick-decay statuses wear off faster
    #[serde(default)]
    pub easy_mode: bool,
    /// Decrement used for quick-decay statuses when easy mode is on
    #[serde(default = "default_quick_decay_factor")]
    pub quick_decay_factor: i32,
    /// 1-in-N chance for an unresisted element or poison hit to drain a stat
    #[serde(default = "default_hurt_chance")]
    pub hurt_chance: i32,
    /// 1-in-N chance for a hit to get through invulnerability
    #[serde(default = "default_invulnerability_penetration")]
    pub invulnerability_penetration: i32,
    /// Experience drain scaling, per 100 points of current experience
    #[serde(default = "default_drain_life_factor")]
    pub drain_life_factor: i32,
    /// Warn when HP drops below this percentage of max HP
    #[serde(default = "default_low_hp_warning_percent")]
    pub low_hp_warning_percent: i32,
}

impl Default for CombatConstants {
    fn default() -> Self {
        CombatConstants {
            easy_mode: false,
            quick_decay_factor: default_quick_decay_factor(),
            hurt_chance: default_hurt_chance(),
            invulnerability_penetration: default_invulnerability_penetration(),
            drain_life_factor: default_drain_life_factor(),
            low_hp_warning_percent: default_low_hp_warning_percent(),
        }
    }
}

impl CombatConstants {
    /// Decrement applied each tick to the quick-decay statuses
    pub fn quick_decay(&self) -> i32 {
        if self.easy_mode {
            self.quick_decay_factor.max(1)
        } else {
            1
        }
    }
}

/// Built-in constants, read from the bundled `constants.toml`
pub fn default_constants() -> CombatConstants {
    let toml = include_str!("../../config/constants.toml");
    super::parse_toml(toml).unwrap_or_default()
}

fn default_quick_decay_factor() -> i32 {
    2
}
fn default_hurt_chance() -> i32 {
    16
}
fn default_invulnerability_penetration() -> i32 {
    13
}
fn default_drain_life_factor() -> i32 {
    2
}
fn default_low_hp_warning_percent() -> i32 {
    20
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let constants = CombatConstants::default();
        assert_eq!(constants.hurt_chance, 16);
        assert_eq!(constants.invulnerability_penetration, 13);
        assert_eq!(constants.quick_decay(), 1);
    }

    #[test]
    fn test_parse_constants() {
        let toml = r#"
easy_mode = true
hurt_chance = 10
"#;
        let constants: CombatConstants = toml::from_str(toml).unwrap();
        assert!(constants.easy_mode);
        assert_eq!(constants.hurt_chance, 10);
        assert_eq!(constants.quick_decay(), 2);
        assert_eq!(constants.drain_life_factor, 2);
    }

    #[test]
    fn test_bundled_constants_match_defaults() {
        let bundled = default_constants();
        let built_in = CombatConstants::default();
        assert_eq!(bundled.hurt_chance, built_in.hurt_chance);
        assert_eq!(bundled.low_hp_warning_percent, built_in.low_hp_warning_percent);
        assert!(!bundled.easy_mode);
    }
}
