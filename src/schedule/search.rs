use crate::error::{InputError, ScheduleError};
use crate::flight::{Flight, FlightId};
use crate::runway::RunwayId;
use crate::schedule::{validate, Assignment, ScheduleResult, SearchLimits, SearchObjective, Strategy};
use crate::time::Time;
use std::collections::HashSet;
use tracing::debug;

/// Cursor over the untried placements of one flight: runways in index order,
/// start times ascending within each runway.
struct Frame {
    runway: usize,
    from: Time,
}

struct Placement {
    runway: RunwayId,
    start: Time,
    end: Time,
    makespan: Time,
}

struct Search<'a> {
    flights: &'a [Flight],
    limits: &'a SearchLimits,
    forbidden: HashSet<(FlightId, RunwayId)>,
    horizon: Time,
    // latest arrival + duration over flights[i..]
    lower_bound: Vec<Time>,
    occupied: Vec<Vec<(Time, Time)>>,
    path: Vec<Placement>,
    best: Option<(Time, Vec<(RunwayId, Time, Time)>)>,
    deepest: usize,
}

impl<'a> Search<'a> {
    fn new(flights: &'a [Flight], runways: usize, limits: &'a SearchLimits, horizon: Time) -> Search<'a> {
        let mut lower_bound = flights
            .iter()
            .rev()
            .scan(Time(0), |lb, f| {
                *lb = (*lb).max(f.arrival + f.duration);
                Some(*lb)
            })
            .collect::<Vec<Time>>();
        lower_bound.reverse();

        Search {
            flights,
            limits,
            forbidden: limits
                .forbidden
                .iter()
                .map(|ban| (ban.flight.clone(), ban.runway))
                .collect(),
            horizon,
            lower_bound,
            occupied: vec![Vec::new(); runways],
            path: Vec::with_capacity(flights.len()),
            best: None,
            deepest: 0,
        }
    }

    fn frame(&self, depth: usize) -> Frame {
        Frame {
            runway: 0,
            from: self.flights[depth].arrival,
        }
    }

    fn partial_makespan(&self) -> Time {
        self.path.last().map_or(Time(0), |p| p.makespan)
    }

    /// Latest start worth trying for the flight at `depth`. Any feasible
    /// schedule left-shifts into one ending by the horizon, and under the
    /// makespan objective only ends before the best complete one can improve it.
    fn latest_start(&self, depth: usize) -> Option<Time> {
        let flight = &self.flights[depth];
        let mut latest = Time(self.horizon.0 - flight.duration);
        if let Some(wait) = self.limits.max_wait {
            latest = latest.min(Time(flight.arrival.0.saturating_add(wait)));
        }
        if self.limits.objective == SearchObjective::Makespan {
            if let Some((best, _)) = &self.best {
                let floor = self.partial_makespan().max(self.lower_bound[depth]);
                if floor >= *best {
                    return None;
                }
                latest = latest.min(Time(best.0.checked_sub(flight.duration)?.checked_sub(1)?));
            }
        }
        Some(latest)
    }

    /// Smallest free start in `[from, latest]` on `runway`.
    fn first_free(&self, runway: usize, flight: &Flight, from: Time, latest: Time) -> Option<Time> {
        let mut start = from;
        while start <= latest {
            match self.occupied[runway]
                .iter()
                .filter(|o| Time::is_overlapping(&flight.occupancy(start), o))
                .map(|(_, end)| *end)
                .max()
            {
                // every start before the blocking end still overlaps it
                Some(blocked_until) => start = blocked_until,
                None => return Some(start),
            }
        }
        None
    }

    fn advance(&self, depth: usize, frame: &mut Frame) -> Option<(RunwayId, Time)> {
        let flight = &self.flights[depth];
        let latest = self.latest_start(depth)?;
        while frame.runway < self.occupied.len() {
            let runway = RunwayId(frame.runway);
            if !self.forbidden.contains(&(flight.id.clone(), runway)) {
                if let Some(start) = self.first_free(frame.runway, flight, frame.from, latest) {
                    frame.from = start + 1;
                    return Some((runway, start));
                }
            }
            frame.runway += 1;
            frame.from = flight.arrival;
        }
        None
    }

    fn place(&mut self, runway: RunwayId, start: Time) {
        let flight = &self.flights[self.path.len()];
        let (start, end) = flight.occupancy(start);
        let makespan = self.partial_makespan().max(end);
        debug!(flight = %flight.id, runway = %runway, start = %start, end = %end, "place");
        self.occupied[runway.0].push((start, end));
        self.path.push(Placement {
            runway,
            start,
            end,
            makespan,
        });
        self.deepest = self.deepest.max(self.path.len());
    }

    fn unplace(&mut self) {
        if let Some(p) = self.path.pop() {
            self.occupied[p.runway.0].pop();
            debug!(flight = %self.flights[self.path.len()].id, runway = %p.runway, "backtrack");
        }
    }

    fn record(&mut self) {
        let makespan = self.partial_makespan();
        if self.best.as_ref().is_none_or(|(best, _)| makespan < *best) {
            debug!(makespan = %makespan, "complete assignment");
            self.best = Some((
                makespan,
                self.path.iter().map(|p| (p.runway, p.start, p.end)).collect(),
            ));
        }
    }

    /// Placements in flight order, or the deepest partial assignment reached.
    fn run(mut self) -> Result<Vec<(RunwayId, Time, Time)>, usize> {
        let n = self.flights.len();
        let mut frames = vec![self.frame(0)];

        while !frames.is_empty() {
            let depth = frames.len() - 1;
            match self.advance(depth, &mut frames[depth]) {
                Some((runway, start)) => {
                    self.place(runway, start);
                    if depth + 1 == n {
                        self.record();
                        if self.limits.objective == SearchObjective::FirstFound {
                            break;
                        }
                        self.unplace();
                    } else {
                        frames.push(self.frame(depth + 1));
                    }
                }
                None => {
                    frames.pop();
                    if !frames.is_empty() {
                        self.unplace();
                    }
                }
            }
        }

        match self.best {
            Some((_, placements)) => Ok(placements),
            None => {
                debug!(deepest = self.deepest, total = n, "search exhausted");
                Err(self.deepest)
            }
        }
    }
}

fn validate_bans(flights: &[Flight], runways: usize, limits: &SearchLimits) -> Result<(), InputError> {
    let ids = flights.iter().map(|f| &f.id).collect::<HashSet<_>>();
    if let Some(ban) = limits.forbidden.iter().find(|ban| !ids.contains(&ban.flight)) {
        return Err(InputError::BanUnknownFlight(ban.flight.clone()));
    }
    if let Some(ban) = limits.forbidden.iter().find(|ban| ban.runway.0 >= runways) {
        return Err(InputError::BanOutOfRange {
            flight: ban.flight.clone(),
            runway: ban.runway,
            runways,
        });
    }
    Ok(())
}

/// Assigns every flight, in input order, to a runway and start time such that
/// no runway holds two overlapping occupancies.
///
/// Every free start at or after a flight's arrival is a candidate, tried lower
/// runway first, then earlier start. On a dead end the most recent placement
/// is undone and the next alternative tried. With
/// [`SearchObjective::Makespan`] the whole space is explored (pruning branches
/// that cannot beat the best so far) and the first assignment with the
/// smallest makespan wins.
pub fn schedule(
    flights: &[Flight],
    runways: usize,
    limits: &SearchLimits,
) -> Result<ScheduleResult, ScheduleError> {
    let horizon = validate(flights, runways)?;
    validate_bans(flights, runways, limits)?;

    let placements = Search::new(flights, runways, limits, horizon)
        .run()
        .map_err(|placed| ScheduleError::SearchExhausted {
            placed,
            total: flights.len(),
        })?;

    let result = ScheduleResult {
        strategy: Strategy::Search,
        assignments: flights
            .iter()
            .zip(placements)
            .map(|(f, (runway, start, end))| Assignment {
                flight_id: f.id.clone(),
                runway,
                start,
                end,
                priority: None,
                completion_time: None,
            })
            .collect(),
        aggregate: None,
    };
    result.assert_invariants(flights);
    Ok(result)
}
