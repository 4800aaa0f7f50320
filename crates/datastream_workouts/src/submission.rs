//! Raw client submissions.
//!
//! Every field is optional so that a missing value surfaces as a named
//! validation error from the builders instead of a deserialization failure.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::{DistanceUnit, ExerciseType, Timestamp};

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkoutSubmission {
    pub exercises: Option<Vec<ExerciseSubmission>>,
    /// Workout type name, e.g. "Pull Day"
    #[serde(rename = "type")]
    pub workout_type: Option<String>,
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseSubmission {
    pub exercise_definition_id: Option<i64>,
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
    pub details: Option<ExerciseDetails>,
    /// Position within the workout
    pub order: Option<i32>,
}

/// Type-dependent payload; distance fields and `sets` are mutually exclusive in practice.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseDetails {
    pub distance: Option<f64>,
    pub distance_unit: Option<DistanceUnit>,
    pub distance_per_unit: Option<f64>,
    pub sets: Option<Vec<SetSubmission>>,
    pub weight_kg: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetSubmission {
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
    pub is_failure: Option<bool>,
    pub repetitions: Option<i32>,
    /// Kept only when `isFailure` is true
    pub partial_repetitions: Option<i32>,
    pub weight: Option<f64>,
    pub order: Option<i32>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, JsonSchema)]
pub struct CreateWorkoutTypeSubmission {
    pub name: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, JsonSchema)]
pub struct CreateExerciseDefinitionSubmission {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub exercise_type: Option<ExerciseType>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_wire_shape() {
        let payload = json!({
            "type": "Leg Day",
            "startTime": "2025-12-15T10:00:00Z",
            "endTime": "2025-12-15T11:00:00Z",
            "exercises": [{
                "exerciseDefinitionId": 2,
                "startTime": "2025-12-15T10:00:00Z",
                "endTime": "2025-12-15T10:10:00Z",
                "order": 0,
                "details": {
                    "weightKg": 80.0,
                    "sets": [{
                        "startTime": "2025-12-15T10:00:00Z",
                        "endTime": "2025-12-15T10:01:00Z",
                        "isFailure": true,
                        "repetitions": 8,
                        "partialRepetitions": 2,
                        "weight": 80.0,
                        "order": 0
                    }]
                }
            }]
        });
        let sub: CreateWorkoutSubmission = serde_json::from_value(payload).expect("deserialize");
        assert_eq!(sub.workout_type.as_deref(), Some("Leg Day"));
        let exercises = sub.exercises.expect("exercises");
        let details = exercises[0].details.as_ref().expect("details");
        let set = &details.sets.as_ref().expect("sets")[0];
        assert_eq!(set.is_failure, Some(true));
        assert_eq!(set.partial_repetitions, Some(2));
    }

    #[test]
    fn missing_fields_become_none() {
        let sub: CreateWorkoutSubmission =
            serde_json::from_value(json!({"type": "Push"})).expect("deserialize");
        assert!(sub.exercises.is_none());
        assert!(sub.start_time.is_none());
    }
}
