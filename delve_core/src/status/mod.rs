//! Status effects - timed and tiered player conditions
//!
//! `PlayerStatus` holds the durations; the setters on `Player` are the only
//! writers and own the notification protocol.

mod kind;
mod setter;
mod store;
mod tick;
mod tier;

pub use kind::{Decay, StatusKind, StatusSpec};
pub use store::{clamp_duration, PlayerStatus, StatusDelta, MAX_DURATION};
pub use tick::{tick_statuses, DecayPolicy, TickReport};
pub use tier::{cut_bleed, cut_tier, stun_tier};
