use crate::error::ScenarioError;
use crate::flight::Flight;
use crate::schedule::{EngineConfig, SearchLimits, DEFAULT_RUNWAYS};
use serde::Deserialize;
use std::path::Path;

fn default_runways() -> usize {
    DEFAULT_RUNWAYS
}

/// Flights plus engine settings, as supplied by the caller.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_runways")]
    pub runways: usize,
    #[serde(flatten)]
    pub search: SearchLimits,
    pub flights: Vec<Flight>,
}

impl Scenario {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    pub fn from_json(data: &str) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn config(&self) -> EngineConfig {
        EngineConfig {
            runways: self.runways,
            search: self.search.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runway::RunwayId;
    use crate::schedule::SearchObjective;
    use crate::time::Time;

    #[test]
    fn test_defaults() {
        let scenario = Scenario::from_json(
            r#"{"flights": [{"id": "AI101", "arrival": 1, "duration": 3}]}"#,
        )
        .unwrap();

        assert_eq!(2, scenario.runways);
        assert_eq!(SearchLimits::default(), scenario.search);
        assert_eq!(None, scenario.flights[0].priority);
        assert_eq!(Time(1), scenario.flights[0].arrival);
    }

    #[test]
    fn test_search_limits() {
        let scenario = Scenario::from_json(
            r#"{
                "runways": 3,
                "max_wait": 5,
                "objective": "makespan",
                "forbidden": [{"flight": "AI101", "runway": 0}],
                "flights": [{"id": "AI101", "arrival": 1, "duration": 3, "priority": 2}]
            }"#,
        )
        .unwrap();

        let config = scenario.config();
        assert_eq!(3, config.runways);
        assert_eq!(Some(5), config.search.max_wait);
        assert_eq!(SearchObjective::Makespan, config.search.objective);
        assert_eq!(RunwayId(0), config.search.forbidden[0].runway);
        assert_eq!(Some(2), scenario.flights[0].priority);
    }

    #[test]
    fn test_negative_arrival_rejected() {
        let err = Scenario::from_json(
            r#"{"flights": [{"id": "AI101", "arrival": -1, "duration": 3}]}"#,
        );

        assert!(matches!(err, Err(ScenarioError::Parse(_))));
    }
}
