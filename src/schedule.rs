use crate::error::{InputError, ScheduleError};
use crate::flight::{Flight, FlightId};
use crate::runway::RunwayId;
use crate::time::Time;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

pub mod completion;
pub mod priority;
pub mod search;

pub const DEFAULT_RUNWAYS: usize = 2;

/// One flight bound to one runway for `[start, end)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub flight_id: FlightId,
    pub runway: RunwayId,
    pub start: Time,
    pub end: Time,
    pub priority: Option<i32>,
    pub completion_time: Option<Time>,
}

impl Assignment {
    pub fn occupancy(&self) -> (Time, Time) {
        (self.start, self.end)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Backtracking search for a conflict-free assignment.
    Search,
    /// Single-queue minimum completion time.
    MinCompletion,
    /// Lowest priority value first, onto the least loaded runway.
    PriorityGreedy,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Search => "search",
            Strategy::MinCompletion => "min-completion",
            Strategy::PriorityGreedy => "priority-greedy",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "search" | "backtracking" | "bt" => Ok(Strategy::Search),
            "min-completion" | "completion" | "dp" => Ok(Strategy::MinCompletion),
            "priority-greedy" | "priority" | "prio" => Ok(Strategy::PriorityGreedy),
            other => Err(format!("unknown strategy: {}", other)),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchObjective {
    /// Stop at the first complete assignment.
    #[default]
    FirstFound,
    /// Explore every complete assignment and keep the smallest makespan.
    Makespan,
}

/// A runway a given flight may not use.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunwayBan {
    pub flight: FlightId,
    pub runway: RunwayId,
}

/// Extra constraints for the search strategy. The defaults impose none.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchLimits {
    /// Longest a flight may wait past its arrival.
    #[serde(default)]
    pub max_wait: Option<u64>,
    #[serde(default)]
    pub forbidden: Vec<RunwayBan>,
    #[serde(default)]
    pub objective: SearchObjective,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    pub runways: usize,
    pub search: SearchLimits,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            runways: DEFAULT_RUNWAYS,
            search: SearchLimits::default(),
        }
    }
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [
        Strategy::Search,
        Strategy::MinCompletion,
        Strategy::PriorityGreedy,
    ];

    /// Runs this strategy on a fresh set of runway timelines.
    pub fn run(
        self,
        flights: &[Flight],
        config: &EngineConfig,
    ) -> Result<ScheduleResult, ScheduleError> {
        let result = match self {
            Strategy::Search => search::schedule(flights, config.runways, &config.search),
            Strategy::MinCompletion => completion::schedule(flights),
            Strategy::PriorityGreedy => priority::schedule(flights, config.runways),
        };
        match &result {
            Ok(res) => info!(
                strategy = %self,
                flights = res.assignments.len(),
                makespan = %res.makespan(),
                aggregate = ?res.aggregate.map(|t| t.0),
                "schedule complete"
            ),
            Err(e) => warn!(strategy = %self, error = %e, "schedule rejected"),
        }
        result
    }
}

/// Ordered assignments in processing order plus an optional aggregate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScheduleResult {
    pub strategy: Strategy,
    pub assignments: Vec<Assignment>,
    pub aggregate: Option<Time>,
}

impl ScheduleResult {
    /// Latest end over all assignments.
    pub fn makespan(&self) -> Time {
        self.assignments
            .iter()
            .map(|a| a.end)
            .max()
            .unwrap_or_default()
    }

    /// Assignments bound to `runway`, in processing order.
    pub fn on_runway(&self, runway: RunwayId) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.runway == runway)
            .collect()
    }

    /// Pairs of assignments that share a runway and overlap in time.
    pub fn conflicts(&self) -> Vec<(FlightId, FlightId)> {
        let mut by_runway: HashMap<RunwayId, Vec<&Assignment>> = HashMap::new();
        self.assignments
            .iter()
            .for_each(|a| by_runway.entry(a.runway).or_default().push(a));

        let mut runways = by_runway.keys().copied().collect::<Vec<_>>();
        runways.sort();
        runways
            .iter()
            .flat_map(|rw| {
                let on_rw = &by_runway[rw];
                on_rw.iter().enumerate().flat_map(move |(i, a)| {
                    on_rw[i + 1..]
                        .iter()
                        .filter(move |b| Time::is_overlapping(&a.occupancy(), &b.occupancy()))
                        .map(move |b| (a.flight_id.clone(), b.flight_id.clone()))
                })
            })
            .collect()
    }

    #[cfg(debug_assertions)]
    fn assert_invariants(&self, flights: &[Flight]) {
        debug_assert_eq!(
            flights.len(),
            self.assignments.len(),
            "One assignment per flight invariant violated"
        );

        let by_id = flights
            .iter()
            .map(|f| (f.id.clone(), f))
            .collect::<HashMap<FlightId, &Flight>>();
        debug_assert!(
            self.assignments.iter().all(|a| {
                by_id
                    .get(&a.flight_id)
                    .is_some_and(|f| a.start >= f.arrival && a.end == a.start + f.duration)
            }),
            "Arrival <-> start causality violated"
        );

        debug_assert!(self.conflicts().is_empty(), "Runway overlap invariant violated");
    }

    #[cfg(not(debug_assertions))]
    fn assert_invariants(&self, _flights: &[Flight]) {}
}

/// Checks shared by every strategy. Returns the horizon: the latest arrival
/// plus every duration, which bounds every end time any strategy produces.
pub(crate) fn validate(flights: &[Flight], runways: usize) -> Result<Time, InputError> {
    if flights.is_empty() {
        return Err(InputError::Empty);
    }
    if runways == 0 {
        return Err(InputError::NoRunways);
    }
    if let Some(f) = flights.iter().find(|f| f.duration == 0) {
        return Err(InputError::ZeroDuration(f.id.clone()));
    }
    let mut seen = HashSet::new();
    if let Some(f) = flights.iter().find(|f| !seen.insert(f.id.clone())) {
        return Err(InputError::DuplicateId(f.id.clone()));
    }
    let latest = flights.iter().map(|f| f.arrival).max().unwrap_or_default();
    flights.iter().try_fold(latest, |horizon, f| {
        horizon
            .checked_add(f.duration)
            .ok_or_else(|| InputError::TimeOverflow(f.id.clone()))
    })
}

#[cfg(test)]
mod tests {
    mod completion;
    mod priority;
    mod proptests;
    mod result;
    mod search;
    mod utils;
}
