//! Monster blows - method, effect and damage dice

use crate::rng::Dice;
use crate::types::{Element, Stat};
use serde::{Deserialize, Serialize};

/// How a blow is delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlowMethod {
    Hit,
    Touch,
    Punch,
    Kick,
    Claw,
    Bite,
    Sting,
    Slash,
    Butt,
    Crush,
    Engulf,
    Charge,
    Crawl,
    Drool,
    Spit,
    Explode,
    Gaze,
    Wail,
    Spore,
    Beg,
    Insult,
    Moan,
    Show,
}

const INSULTS: [&str; 8] = [
    "insults you!",
    "insults your mother!",
    "gives you the finger!",
    "humiliates you!",
    "defiles you!",
    "dances around you!",
    "makes obscene gestures!",
    "moons you!!!",
];

const MOANS: [&str; 4] = [
    "seems sad about something.",
    "asks if you have seen its dogs.",
    "tells you to get off its land.",
    "mumbles something about mushrooms.",
];

impl BlowMethod {
    pub fn all() -> &'static [BlowMethod] {
        use BlowMethod::*;
        &[
            Hit, Touch, Punch, Kick, Claw, Bite, Sting, Slash, Butt, Crush, Engulf, Charge, Crawl,
            Drool, Spit, Explode, Gaze, Wail, Spore, Beg, Insult, Moan, Show,
        ]
    }

    /// What the player reads after the monster's name
    pub fn verb(self, rng: &mut dyn Dice) -> &'static str {
        match self {
            BlowMethod::Hit => "hits you.",
            BlowMethod::Touch => "touches you.",
            BlowMethod::Punch => "punches you.",
            BlowMethod::Kick => "kicks you.",
            BlowMethod::Claw => "claws you.",
            BlowMethod::Bite => "bites you.",
            BlowMethod::Sting => "stings you.",
            BlowMethod::Slash => "slashes you.",
            BlowMethod::Butt => "butts you.",
            BlowMethod::Crush => "crushes you.",
            BlowMethod::Engulf => "engulfs you.",
            BlowMethod::Charge => "charges you.",
            BlowMethod::Crawl => "crawls on you.",
            BlowMethod::Drool => "drools on you.",
            BlowMethod::Spit => "spits on you.",
            BlowMethod::Explode => "explodes.",
            BlowMethod::Gaze => "gazes at you.",
            BlowMethod::Wail => "wails at you.",
            BlowMethod::Spore => "releases spores at you.",
            BlowMethod::Beg => "begs you for money.",
            BlowMethod::Insult => INSULTS[rng.randint0(INSULTS.len() as i32) as usize],
            BlowMethod::Moan => MOANS[rng.randint0(MOANS.len() as i32) as usize],
            BlowMethod::Show => "sings to you.",
        }
    }

    pub fn can_cut(self) -> bool {
        matches!(self, BlowMethod::Hit | BlowMethod::Claw | BlowMethod::Bite | BlowMethod::Slash)
    }

    pub fn can_stun(self) -> bool {
        matches!(
            self,
            BlowMethod::Hit
                | BlowMethod::Punch
                | BlowMethod::Kick
                | BlowMethod::Butt
                | BlowMethod::Crush
        )
    }

    /// Physical contact; triggers the player's retaliation auras
    pub fn is_touch(self) -> bool {
        matches!(
            self,
            BlowMethod::Hit
                | BlowMethod::Touch
                | BlowMethod::Punch
                | BlowMethod::Kick
                | BlowMethod::Claw
                | BlowMethod::Bite
                | BlowMethod::Sting
                | BlowMethod::Slash
                | BlowMethod::Butt
                | BlowMethod::Crush
                | BlowMethod::Engulf
                | BlowMethod::Charge
                | BlowMethod::Crawl
        )
    }

    /// Whether a miss is worth telling the player about
    pub fn shows_miss(self) -> bool {
        self.is_touch() && self != BlowMethod::Crawl
    }
}

/// What a blow does once it lands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlowEffect {
    None,
    Hurt,
    Superhurt,
    Shatter,
    Poison,
    UnBonus,
    UnPower,
    EatGold,
    EatItem,
    EatFood,
    EatLight,
    Acid,
    Elec,
    Fire,
    Cold,
    Blind,
    Confuse,
    Terrify,
    Paralyze,
    LoseStr,
    LoseInt,
    LoseWis,
    LoseDex,
    LoseCon,
    LoseChr,
    LoseAll,
    ExpDrain10,
    ExpDrain20,
    ExpDrain40,
    ExpDrain80,
    Disease,
    Time,
    DrainLife,
    DrainMana,
    Inertia,
    Stun,
}

impl BlowEffect {
    pub fn all() -> &'static [BlowEffect] {
        use BlowEffect::*;
        &[
            None, Hurt, Superhurt, Shatter, Poison, UnBonus, UnPower, EatGold, EatItem, EatFood,
            EatLight, Acid, Elec, Fire, Cold, Blind, Confuse, Terrify, Paralyze, LoseStr, LoseInt,
            LoseWis, LoseDex, LoseCon, LoseChr, LoseAll, ExpDrain10, ExpDrain20, ExpDrain40,
            ExpDrain80, Disease, Time, DrainLife, DrainMana, Inertia, Stun,
        ]
    }

    /// To-hit power before the monster level is added
    pub fn power(self) -> i32 {
        match self {
            BlowEffect::Hurt | BlowEffect::Superhurt | BlowEffect::Shatter => 60,
            BlowEffect::UnBonus => 20,
            BlowEffect::UnPower => 15,
            BlowEffect::Elec
            | BlowEffect::Fire
            | BlowEffect::Cold
            | BlowEffect::Confuse
            | BlowEffect::Terrify => 10,
            BlowEffect::Acid => 0,
            BlowEffect::Blind | BlowEffect::Paralyze | BlowEffect::LoseAll => 2,
            _ => 5,
        }
    }

    /// Armour soaks these before they land
    pub fn is_physical(self) -> bool {
        matches!(self, BlowEffect::Hurt | BlowEffect::Superhurt | BlowEffect::Shatter)
    }

    pub fn is_theft(self) -> bool {
        matches!(self, BlowEffect::EatGold | BlowEffect::EatItem)
    }

    pub fn element(self) -> Option<Element> {
        match self {
            BlowEffect::Acid => Some(Element::Acid),
            BlowEffect::Elec => Some(Element::Elec),
            BlowEffect::Fire => Some(Element::Fire),
            BlowEffect::Cold => Some(Element::Cold),
            _ => None,
        }
    }

    pub fn lost_stat(self) -> Option<Stat> {
        match self {
            BlowEffect::LoseStr => Some(Stat::Str),
            BlowEffect::LoseInt => Some(Stat::Int),
            BlowEffect::LoseWis => Some(Stat::Wis),
            BlowEffect::LoseDex => Some(Stat::Dex),
            BlowEffect::LoseCon => Some(Stat::Con),
            BlowEffect::LoseChr => Some(Stat::Chr),
            _ => None,
        }
    }
}

/// `num`d`sides`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DamageDice {
    pub num: i32,
    pub sides: i32,
}

impl DamageDice {
    pub fn new(num: i32, sides: i32) -> Self {
        DamageDice { num, sides }
    }

    pub fn roll(self, rng: &mut dyn Dice) -> i32 {
        rng.damroll(self.num, self.sides)
    }

    pub fn max(self) -> i32 {
        self.num.max(0) * self.sides.max(0)
    }

    pub fn is_zero(self) -> bool {
        self.num <= 0 || self.sides <= 0
    }
}

/// One entry of a monster's attack list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blow {
    pub method: BlowMethod,
    #[serde(default = "default_effect")]
    pub effect: BlowEffect,
    #[serde(default)]
    pub dice: DamageDice,
}

fn default_effect() -> BlowEffect {
    BlowEffect::Hurt
}

impl Blow {
    pub fn new(method: BlowMethod, effect: BlowEffect, dice: DamageDice) -> Self {
        Blow { method, effect, dice }
    }

    /// Whether the blow can hurt at all
    pub fn is_damaging(&self) -> bool {
        !self.dice.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedDice;

    #[test]
    fn test_powers() {
        assert_eq!(BlowEffect::Hurt.power(), 60);
        assert_eq!(BlowEffect::Acid.power(), 0);
        assert_eq!(BlowEffect::Poison.power(), 5);
        assert_eq!(BlowEffect::Paralyze.power(), 2);
    }

    #[test]
    fn test_method_flags() {
        assert!(BlowMethod::Hit.can_cut() && BlowMethod::Hit.can_stun());
        assert!(BlowMethod::Touch.is_touch());
        assert!(!BlowMethod::Gaze.is_touch());
        assert!(!BlowMethod::Crawl.shows_miss());
        assert_eq!(BlowMethod::all().len(), 23);
    }

    #[test]
    fn test_insult_picks_from_table() {
        let mut rng = ScriptedDice::new([1]);
        assert_eq!(BlowMethod::Insult.verb(&mut rng), "insults your mother!");
    }

    #[test]
    fn test_dice() {
        let mut rng = ScriptedDice::constant(2);
        assert_eq!(DamageDice::new(2, 6).roll(&mut rng), 6);
        assert_eq!(DamageDice::new(3, 8).max(), 24);
        assert!(DamageDice::new(0, 4).is_zero());
    }
}
