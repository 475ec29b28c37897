use crate::error::{InputError, ScheduleError};
use crate::flight::Flight;
use crate::runway::Runways;
use crate::schedule::{validate, Assignment, ScheduleResult, Strategy};
use tracing::debug;

/// Schedules flights lowest priority value first (input order on ties), each
/// onto the runway that frees up earliest (lower index on ties).
///
/// Output order is the processing order, not start order. Every flight must
/// carry a priority.
pub fn schedule(flights: &[Flight], runways: usize) -> Result<ScheduleResult, ScheduleError> {
    validate(flights, runways)?;
    let mut queue = flights
        .iter()
        .map(|f| {
            f.priority
                .map(|p| (p, f))
                .ok_or_else(|| InputError::MissingPriority(f.id.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    // stable, so equal priorities keep input order
    queue.sort_by_key(|(p, _)| *p);

    let mut timelines = Runways::new(runways);
    let mut assignments = Vec::with_capacity(queue.len());
    for (priority, flight) in queue {
        let Some(runway) = timelines.least_loaded() else {
            return Err(InputError::NoRunways.into());
        };
        let (start, end) = runway.occupy(flight);
        debug!(flight = %flight.id, priority, runway = %runway.id, start = %start, end = %end, "assign");
        assignments.push(Assignment {
            flight_id: flight.id.clone(),
            runway: runway.id,
            start,
            end,
            priority: Some(priority),
            completion_time: None,
        });
    }

    let result = ScheduleResult {
        strategy: Strategy::PriorityGreedy,
        assignments,
        aggregate: None,
    };
    result.assert_invariants(flights);
    Ok(result)
}
