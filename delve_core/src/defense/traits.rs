//! Trait flags - the raw defensive properties granted by race, class, gear and buffs

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Defensive trait flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Traits: u64 {
        const RES_ACID    = 1 << 0;
        const RES_ELEC    = 1 << 1;
        const RES_FIRE    = 1 << 2;
        const RES_COLD    = 1 << 3;
        const RES_POIS    = 1 << 4;
        const RES_LITE    = 1 << 5;
        const RES_DARK    = 1 << 6;
        const RES_SHARDS  = 1 << 7;
        const RES_SOUND   = 1 << 8;
        const RES_CONF    = 1 << 9;
        const RES_CHAOS   = 1 << 10;
        const RES_NETHER  = 1 << 11;
        const RES_DISEN   = 1 << 12;
        const RES_NEXUS   = 1 << 13;
        const RES_TIME    = 1 << 14;
        const RES_WATER   = 1 << 15;
        const RES_BLIND   = 1 << 16;
        const RES_FEAR    = 1 << 17;

        const IM_ACID     = 1 << 20;
        const IM_ELEC     = 1 << 21;
        const IM_FIRE     = 1 << 22;
        const IM_COLD     = 1 << 23;
        const IM_DARK     = 1 << 24;

        const VULN_ACID   = 1 << 26;
        const VULN_ELEC   = 1 << 27;
        const VULN_FIRE   = 1 << 28;
        const VULN_COLD   = 1 << 29;
        const VULN_LITE   = 1 << 30;

        const SUST_STR    = 1 << 32;
        const SUST_INT    = 1 << 33;
        const SUST_WIS    = 1 << 34;
        const SUST_DEX    = 1 << 35;
        const SUST_CON    = 1 << 36;
        const SUST_CHR    = 1 << 37;

        const FREE_ACT    = 1 << 40;
        const HOLD_EXP    = 1 << 41;
        const SEE_INVIS   = 1 << 42;
        const LEVITATION  = 1 << 43;
        const REFLECT     = 1 << 44;
        /// Divides all incoming damage by 100
        const RES_ALL     = 1 << 45;

        const SH_FIRE     = 1 << 48;
        const SH_ELEC     = 1 << 49;
        const SH_COLD     = 1 << 50;
    }
}

impl Traits {
    /// Sustain flag protecting `stat`
    pub fn sustain_for(stat: crate::types::Stat) -> Traits {
        use crate::types::Stat;
        match stat {
            Stat::Str => Traits::SUST_STR,
            Stat::Int => Traits::SUST_INT,
            Stat::Wis => Traits::SUST_WIS,
            Stat::Dex => Traits::SUST_DEX,
            Stat::Con => Traits::SUST_CON,
            Stat::Chr => Traits::SUST_CHR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Stat;

    #[test]
    fn test_sustain_lookup() {
        assert_eq!(Traits::sustain_for(Stat::Con), Traits::SUST_CON);
        assert_eq!(Traits::sustain_for(Stat::Chr), Traits::SUST_CHR);
    }

    #[test]
    fn test_traits_toml_round_trip() {
        #[derive(Serialize, Deserialize)]
        struct Holder {
            traits: Traits,
        }
        let h = Holder {
            traits: Traits::RES_FIRE | Traits::FREE_ACT,
        };
        let s = toml::to_string(&h).unwrap();
        let back: Holder = toml::from_str(&s).unwrap();
        assert_eq!(back.traits, h.traits);
    }
}
