use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tetrevo_evaluator::HeuristicWeights;

use crate::util;

/// Trained weights together with a record of how they were obtained.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AiModel {
    pub name: String,
    pub trained_at: DateTime<Utc>,
    pub final_fitness: f64,
    pub weights: HeuristicWeights,
}

impl AiModel {
    pub fn open<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        util::read_json_file("AI model", path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_layout() {
        let json = r#"{
            "name": "genetic",
            "trained_at": "2024-05-01T12:00:00Z",
            "final_fitness": 123.5,
            "weights": {"lines": 0.76, "height": -0.51, "holes": -0.36, "bumpiness": -0.18}
        }"#;
        let model: AiModel = serde_json::from_str(json).unwrap();
        assert_eq!(model.name, "genetic");
        assert_eq!(model.weights, HeuristicWeights::new(0.76, -0.51, -0.36, -0.18));

        let round_trip: AiModel =
            serde_json::from_str(&serde_json::to_string(&model).unwrap()).unwrap();
        assert_eq!(round_trip, model);
    }
}
