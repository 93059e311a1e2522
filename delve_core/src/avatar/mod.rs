//! AvatarVirtueTracker - alignment-like virtue scores moved by combat events

mod kill;
mod virtue;

pub use kill::{kill_virtue_deltas, on_monster_killed, VirtueDelta};
pub use virtue::{AvatarVirtues, Virtue, VirtueSlot, VIRTUE_HARD_CAP, VIRTUE_SLOTS};
