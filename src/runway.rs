use crate::flight::Flight;
use crate::time::Time;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Ord, Eq, PartialEq, Hash, Serialize, Deserialize, PartialOrd)]
#[serde(transparent)]
pub struct RunwayId(pub usize);

impl fmt::Display for RunwayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-runway state: the earliest instant the runway accepts another occupancy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunwayTimeline {
    pub id: RunwayId,
    next_free: Time,
}

impl RunwayTimeline {
    pub fn new(id: RunwayId) -> RunwayTimeline {
        RunwayTimeline {
            id,
            next_free: Time(0),
        }
    }

    pub fn next_free(&self) -> Time {
        self.next_free
    }

    pub fn earliest_start(&self, flight: &Flight) -> Time {
        flight.arrival.max(self.next_free)
    }

    /// Books `flight` at its earliest start and returns the occupancy.
    pub fn occupy(&mut self, flight: &Flight) -> (Time, Time) {
        let (start, end) = flight.occupancy(self.earliest_start(flight));
        debug_assert!(end >= self.next_free, "runway timeline moved backwards");
        self.next_free = end;
        (start, end)
    }
}

/// A fixed set of runway timelines, local to one scheduling call.
#[derive(Debug, Clone)]
pub struct Runways {
    timelines: Vec<RunwayTimeline>,
}

impl Runways {
    pub fn new(count: usize) -> Runways {
        Runways {
            timelines: (0..count).map(|i| RunwayTimeline::new(RunwayId(i))).collect(),
        }
    }

    /// The runway with the smallest `next_free`, lower index on ties.
    pub fn least_loaded(&mut self) -> Option<&mut RunwayTimeline> {
        self.timelines
            .iter_mut()
            .min_by_key(|rw| (rw.next_free, rw.id))
    }
}
