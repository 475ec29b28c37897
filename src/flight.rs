use crate::time::Time;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub type FlightId = Arc<str>;

/// Scheduling inputs for one flight. Read-only to every strategy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flight {
    pub id: FlightId,
    pub arrival: Time,
    pub duration: u64,
    #[serde(default)]
    pub priority: Option<i32>,
}

impl Flight {
    pub fn new(id: &str, arrival: u64, duration: u64, priority: Option<i32>) -> Flight {
        Flight {
            id: Arc::from(id),
            arrival: Time(arrival),
            duration,
            priority,
        }
    }

    /// Occupancy if the flight starts at `start`.
    pub fn occupancy(&self, start: Time) -> (Time, Time) {
        (start, start + self.duration)
    }
}
