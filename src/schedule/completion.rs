use crate::error::{InputError, ScheduleError};
use crate::flight::Flight;
use crate::runway::RunwayId;
use crate::schedule::{validate, Assignment, ScheduleResult, Strategy};
use crate::time::Time;
use tracing::debug;

/// Completion table for an arrival-ordered queue on one shared timeline.
///
/// `dp[0] = 0` and `dp[i] = max(dp[i-1] + d_i, a_i + d_i)`: flight `i` either
/// follows the previous flight immediately or, if the queue drained before it
/// arrived, starts at its own arrival. The result has `n + 1` entries and
/// `dp[n]` is the minimum final completion time for the sequence.
///
/// The input is not re-sorted. An arrival earlier than its predecessor's is
/// rejected; equal arrivals are accepted.
pub fn completion_table(flights: &[Flight]) -> Result<Vec<Time>, ScheduleError> {
    validate(flights, 1)?;
    if let Some(pair) = flights.windows(2).find(|fs| fs[1].arrival < fs[0].arrival) {
        return Err(InputError::NotArrivalSorted {
            flight: pair[1].id.clone(),
            arrival: pair[1].arrival,
            previous: pair[0].arrival,
        }
        .into());
    }

    let dp = flights.iter().fold(vec![Time(0)], |mut dp, f| {
        let prev = dp[dp.len() - 1];
        let done = (prev + f.duration).max(f.arrival + f.duration);
        debug!(flight = %f.id, prev = %prev, completion = %done, "dp step");
        dp.push(done);
        dp
    });
    Ok(dp)
}

pub fn schedule(flights: &[Flight]) -> Result<ScheduleResult, ScheduleError> {
    let dp = completion_table(flights)?;

    let result = ScheduleResult {
        strategy: Strategy::MinCompletion,
        assignments: flights
            .iter()
            .zip(&dp[1..])
            .map(|(f, done)| Assignment {
                flight_id: f.id.clone(),
                runway: RunwayId(0),
                start: Time(done.0 - f.duration),
                end: *done,
                priority: None,
                completion_time: Some(*done),
            })
            .collect(),
        aggregate: dp.last().copied(),
    };
    result.assert_invariants(flights);
    Ok(result)
}
