//! Runway assignment engine: backtracking search, single-queue minimum
//! completion time and priority-greedy scheduling over a fixed set of runways.

pub mod error;
pub mod flight;
pub mod runway;
pub mod scenario;
pub mod schedule;
pub mod time;

pub use error::{InputError, ScenarioError, ScheduleError};
pub use flight::{Flight, FlightId};
pub use runway::{RunwayId, RunwayTimeline, Runways};
pub use scenario::Scenario;
pub use schedule::{
    Assignment, EngineConfig, RunwayBan, ScheduleResult, SearchLimits, SearchObjective, Strategy,
};
pub use time::Time;
