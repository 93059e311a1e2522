//! PlayerStatus - the duration map behind the setters

use super::kind::StatusKind;
use super::tier::{cut_tier, stun_tier};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Longest duration (or magnitude) any status can hold
pub const MAX_DURATION: i32 = 10_000;

pub fn clamp_duration(v: i32) -> i32 {
    v.clamp(0, MAX_DURATION)
}

/// Remaining turns (or magnitude, for Stun and Cut) per status.
///
/// Only active statuses are stored. Writes are crate-private so every change
/// goes through the `Player` setters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStatus {
    durations: BTreeMap<StatusKind, i32>,
}

/// Before/after value of one status across an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDelta {
    pub kind: StatusKind,
    pub before: i32,
    pub after: i32,
}

impl PlayerStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remaining(&self, kind: StatusKind) -> i32 {
        self.durations.get(&kind).copied().unwrap_or(0)
    }

    pub fn is_active(&self, kind: StatusKind) -> bool {
        self.remaining(kind) > 0
    }

    pub fn is_empty(&self) -> bool {
        self.durations.is_empty()
    }

    pub fn stun_tier(&self) -> u8 {
        stun_tier(self.remaining(StatusKind::Stunned))
    }

    pub fn cut_tier(&self) -> u8 {
        cut_tier(self.remaining(StatusKind::Cut))
    }

    /// Active statuses in kind order
    pub fn active(&self) -> impl Iterator<Item = (StatusKind, i32)> + '_ {
        self.durations.iter().map(|(k, v)| (*k, *v))
    }

    /// Statuses that differ between `before` and `self`
    pub fn diff(&self, before: &PlayerStatus) -> Vec<StatusDelta> {
        StatusKind::all()
            .iter()
            .filter_map(|&kind| {
                let b = before.remaining(kind);
                let a = self.remaining(kind);
                (a != b).then_some(StatusDelta {
                    kind,
                    before: b,
                    after: a,
                })
            })
            .collect()
    }

    pub(crate) fn put(&mut self, kind: StatusKind, v: i32) {
        let v = clamp_duration(v);
        if v == 0 {
            self.durations.remove(&kind);
        } else {
            self.durations.insert(kind, v);
        }
    }
}
