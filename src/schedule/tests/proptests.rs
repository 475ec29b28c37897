use crate::runway::RunwayId;
use crate::schedule::completion::completion_table;
use crate::schedule::tests::utils::{arb_flights, arb_small_flights, config};
use crate::schedule::{SearchLimits, SearchObjective, Strategy};
use crate::time::Time;
use proptest::prelude::*;
use proptest::proptest;

proptest! {
    #[test]
    fn test_no_overlap_and_causality(
        flights in arb_flights(25),
        runways in 1..=4usize,
    ) {
        let config = config(runways, SearchLimits::default());
        for strategy in [Strategy::Search, Strategy::PriorityGreedy] {
            let result = strategy.run(&flights, &config).unwrap();

            prop_assert_eq!(flights.len(), result.assignments.len());
            prop_assert!(result.conflicts().is_empty(), "{} overlaps: {:?}", strategy, result.conflicts());
            for a in &result.assignments {
                let flight = flights.iter().find(|f| f.id == a.flight_id).unwrap();
                prop_assert!(a.start >= flight.arrival);
                prop_assert_eq!(a.end, a.start + flight.duration);
                prop_assert!(a.runway.0 < runways);
            }
        }
    }

    #[test]
    fn test_priority_follows_least_loaded_rule(
        flights in arb_flights(25),
        runways in 1..=4usize,
    ) {
        let result = Strategy::PriorityGreedy
            .run(&flights, &config(runways, SearchLimits::default()))
            .unwrap();

        prop_assert!(result.assignments.windows(2).all(|w| w[0].priority <= w[1].priority));

        let mut next_free = vec![Time(0); runways];
        for a in &result.assignments {
            let flight = flights.iter().find(|f| f.id == a.flight_id).unwrap();
            let expected = (0..runways).min_by_key(|r| (next_free[*r], *r)).unwrap();
            prop_assert_eq!(RunwayId(expected), a.runway);
            prop_assert_eq!(flight.arrival.max(next_free[expected]), a.start);
            prop_assert!(a.end >= next_free[expected]);
            next_free[expected] = a.end;
        }

        for r in 0..runways {
            let on_rw = result.on_runway(RunwayId(r));
            prop_assert!(on_rw.windows(2).all(|w| w[0].start <= w[1].start && w[0].end <= w[1].start));
        }
    }

    #[test]
    fn test_completion_bounds(mut flights in arb_flights(25)) {
        flights.sort_by_key(|f| f.arrival);
        let dp = completion_table(&flights).unwrap();

        prop_assert_eq!(flights.len() + 1, dp.len());
        prop_assert_eq!(Time(0), dp[0]);
        for (i, f) in flights.iter().enumerate() {
            prop_assert!(dp[i + 1] >= dp[i]);
            prop_assert!(dp[i + 1] >= f.arrival + f.duration);
            prop_assert!(dp[i + 1] >= dp[i] + f.duration);
            prop_assert!(dp[i + 1] == dp[i] + f.duration || dp[i + 1] == f.arrival + f.duration);
        }

        let result = Strategy::MinCompletion
            .run(&flights, &config(2, SearchLimits::default()))
            .unwrap();
        prop_assert_eq!(dp.last().copied(), result.aggregate);
        prop_assert!(result.conflicts().is_empty());
    }

    #[test]
    fn test_idempotent(
        flights in arb_flights(15),
        runways in 1..=3usize,
    ) {
        let config = config(runways, SearchLimits::default());
        for strategy in [Strategy::Search, Strategy::PriorityGreedy] {
            prop_assert_eq!(strategy.run(&flights, &config), strategy.run(&flights, &config));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_makespan_search_never_worse(
        flights in arb_small_flights(),
        runways in 1..=2usize,
    ) {
        let first = Strategy::Search
            .run(&flights, &config(runways, SearchLimits::default()))
            .unwrap();
        let limits = SearchLimits {
            objective: SearchObjective::Makespan,
            ..SearchLimits::default()
        };
        let best = Strategy::Search.run(&flights, &config(runways, limits)).unwrap();

        prop_assert!(best.makespan() <= first.makespan());
        prop_assert!(best.conflicts().is_empty());

        // a single queue in arrival order is one of the schedules explored
        let mut sorted = flights.clone();
        sorted.sort_by_key(|f| f.arrival);
        let queued = completion_table(&sorted).unwrap();
        prop_assert!(best.makespan() <= queued[queued.len() - 1]);
    }

    #[test]
    fn test_wait_cap_respected(
        flights in arb_small_flights(),
        runways in 1..=3usize,
        max_wait in 0..4u64,
    ) {
        let limits = SearchLimits {
            max_wait: Some(max_wait),
            ..SearchLimits::default()
        };
        if let Ok(result) = Strategy::Search.run(&flights, &config(runways, limits)) {
            prop_assert!(result.conflicts().is_empty());
            for a in &result.assignments {
                let flight = flights.iter().find(|f| f.id == a.flight_id).unwrap();
                prop_assert!(a.start.since(flight.arrival) <= max_wait);
            }
        }

        // with a runway per flight nobody needs to wait
        let limits = SearchLimits {
            max_wait: Some(0),
            ..SearchLimits::default()
        };
        prop_assert!(Strategy::Search.run(&flights, &config(flights.len(), limits)).is_ok());
    }
}
