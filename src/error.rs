use crate::flight::FlightId;
use crate::runway::RunwayId;
use crate::time::Time;
use thiserror::Error;

/// Why a scheduling call rejected its input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("no flights to schedule")]
    Empty,
    #[error("runway count must be at least 1")]
    NoRunways,
    #[error("flight {0} has zero duration")]
    ZeroDuration(FlightId),
    #[error("flight id {0} appears more than once")]
    DuplicateId(FlightId),
    #[error("flight {0} pushes the schedule past the end of the clock")]
    TimeOverflow(FlightId),
    #[error("runway ban names unknown flight {0}")]
    BanUnknownFlight(FlightId),
    #[error("runway ban for flight {flight} names runway {runway}, but only {runways} exist")]
    BanOutOfRange {
        flight: FlightId,
        runway: RunwayId,
        runways: usize,
    },
    #[error("flight {0} has no priority")]
    MissingPriority(FlightId),
    #[error("flight {flight} arrives at {arrival}, before its predecessor at {previous}")]
    NotArrivalSorted {
        flight: FlightId,
        arrival: Time,
        previous: Time,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),
    #[error("search exhausted: placed at most {placed} of {total} flights")]
    SearchExhausted { placed: usize, total: usize },
}

#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("cannot read scenario: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed scenario: {0}")]
    Parse(#[from] serde_json::Error),
}
