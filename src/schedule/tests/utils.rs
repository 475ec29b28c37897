use crate::flight::Flight;
use crate::runway::RunwayId;
use crate::schedule::{EngineConfig, RunwayBan, ScheduleResult, SearchLimits};
use crate::time::Time;
use proptest::prelude::*;
use std::sync::Arc;

pub fn id(s: &str) -> Arc<str> {
    Arc::from(s)
}

pub fn add_flight(flights: &mut Vec<Flight>, flight_id: &str, arrival: u64, duration: u64, priority: Option<i32>) {
    flights.push(Flight::new(flight_id, arrival, duration, priority));
}

/// AI101, UK202, EK303 and QR404, the tower's default board.
pub fn default_board() -> Vec<Flight> {
    let mut flights = Vec::new();
    add_flight(&mut flights, "AI101", 1, 3, Some(2));
    add_flight(&mut flights, "UK202", 2, 2, Some(1));
    add_flight(&mut flights, "EK303", 3, 4, Some(3));
    add_flight(&mut flights, "QR404", 1, 2, Some(2));
    flights
}

pub fn config(runways: usize, search: SearchLimits) -> EngineConfig {
    EngineConfig { runways, search }
}

pub fn ban(flight_id: &str, runway: usize) -> RunwayBan {
    RunwayBan {
        flight: id(flight_id),
        runway: RunwayId(runway),
    }
}

pub fn slot(result: &ScheduleResult, flight_id: &str) -> (RunwayId, Time, Time) {
    let a = result
        .assignments
        .iter()
        .find(|a| *a.flight_id == *flight_id)
        .unwrap();
    (a.runway, a.start, a.end)
}

/// Up to `max` flights with unique ids `FL_<n>`, always carrying a priority.
pub fn arb_flights(max: usize) -> impl Strategy<Value = Vec<Flight>> {
    prop::collection::vec((0..60u64, 1..20u64, 0..4i32), 1..=max).prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(i, (arr, dur, pri))| Flight::new(&format!("FL_{}", i), arr, dur, Some(pri)))
            .collect()
    })
}

/// Small, tightly packed boards for exhaustive search.
pub fn arb_small_flights() -> impl Strategy<Value = Vec<Flight>> {
    prop::collection::vec((0..6u64, 1..4u64), 1..=4).prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(i, (arr, dur))| Flight::new(&format!("FL_{}", i), arr, dur, None))
            .collect()
    })
}
