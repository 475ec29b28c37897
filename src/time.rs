use serde::{Deserialize, Serialize};
use std::ops::Add;

/// An instant on the scheduling clock, in abstract integer units.
#[derive(Debug, Clone, Copy, Default, Ord, Eq, PartialEq, Hash, Serialize, Deserialize, PartialOrd)]
#[serde(transparent)]
pub struct Time(pub u64);

impl Time {
    /// Half-open `[start, end)` intersection test.
    pub fn is_overlapping(occupancy: &(Time, Time), other: &(Time, Time)) -> bool {
        occupancy.0 < other.1 && occupancy.1 > other.0
    }

    pub fn since(self, earlier: Time) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    pub fn checked_add(self, rhs: u64) -> Option<Time> {
        self.0.checked_add(rhs).map(Time)
    }
}

impl std::fmt::Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add<u64> for Time {
    type Output = Self;

    fn add(self, rhs: u64) -> Self::Output {
        Time(self.0 + rhs)
    }
}
