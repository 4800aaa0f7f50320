//! Serializable views of persisted entities, shaped for API consumers.

use serde::Serialize;

use crate::aggregate::Workout;
use crate::model::{
    DistanceUnit, ExerciseDefinition, ExerciseRecord, ExerciseSet, ExerciseType, RecordDetails,
    Timestamp, WorkoutType,
};

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutView {
    pub workout_id: Option<i64>,
    pub duration_ms: i64,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub exercises: Vec<ExerciseRecordView>,
    pub workout_type: String,
}

impl From<&Workout> for WorkoutView {
    fn from(workout: &Workout) -> Self {
        Self {
            workout_id: workout.id(),
            duration_ms: workout.duration_ms(),
            start_time: workout.start_time(),
            end_time: workout.end_time(),
            exercises: workout.exercises().iter().map(Into::into).collect(),
            workout_type: workout.workout_type().name.clone(),
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseRecordView {
    pub exercise_record_id: Option<i64>,
    pub exercise_definition_id: i64,
    pub exercise_name: String,
    #[serde(rename = "type")]
    pub exercise_type: ExerciseType,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub details: ExerciseRecordDetailsView,
    pub order_index: i32,
}

impl From<&ExerciseRecord> for ExerciseRecordView {
    fn from(record: &ExerciseRecord) -> Self {
        Self {
            exercise_record_id: record.id,
            exercise_definition_id: record.definition.id,
            exercise_name: record.definition.name.clone(),
            exercise_type: record.exercise_type(),
            start_time: record.start_time,
            end_time: record.end_time,
            details: (&record.details).into(),
            order_index: record.order_index,
        }
    }
}

/// Flattened details: distance fields for distance records, `sets` otherwise.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseRecordDetailsView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_unit: Option<DistanceUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_per_unit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sets: Option<Vec<ExerciseSetView>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_rest_time_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
}

impl From<&RecordDetails> for ExerciseRecordDetailsView {
    fn from(details: &RecordDetails) -> Self {
        match details {
            RecordDetails::Distance(d) => Self {
                distance: Some(d.distance),
                distance_unit: Some(d.distance_unit),
                distance_per_unit: d.distance_per_unit,
                duration_ms: Some(d.duration_ms),
                weight_kg: d.weight_kg,
                ..Default::default()
            },
            RecordDetails::SetBased(d) => Self {
                sets: Some(d.sets.iter().map(Into::into).collect()),
                average_rest_time_ms: d.average_rest_time_ms,
                weight_kg: d.weight_kg,
                ..Default::default()
            },
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseSetView {
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub failure: bool,
    pub repetitions: i32,
    pub partial_repetitions: Option<i32>,
    pub weight_kg: f64,
    pub rest_before_ms: Option<i64>,
    pub order_index: i32,
}

impl From<&ExerciseSet> for ExerciseSetView {
    fn from(set: &ExerciseSet) -> Self {
        Self {
            start_time: set.start_time,
            end_time: set.end_time,
            failure: set.failure,
            repetitions: set.repetitions,
            partial_repetitions: set.partial_repetitions,
            weight_kg: set.weight_kg,
            rest_before_ms: set.rest_before_ms,
            order_index: set.order_index,
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ExerciseDefinitionView {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub exercise_type: ExerciseType,
}

impl From<&ExerciseDefinition> for ExerciseDefinitionView {
    fn from(d: &ExerciseDefinition) -> Self {
        Self {
            id: d.id,
            name: d.name.clone(),
            exercise_type: d.exercise_type,
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct WorkoutTypeView {
    pub id: i64,
    pub name: String,
}

impl From<&WorkoutType> for WorkoutTypeView {
    fn from(t: &WorkoutType) -> Self {
        Self {
            id: t.id,
            name: t.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DistanceDetails;
    use chrono::DateTime;
    use serde_json::json;

    #[test]
    fn distance_details_view_omits_set_fields() {
        let details = RecordDetails::Distance(DistanceDetails {
            distance: 5.0,
            distance_unit: DistanceUnit::Kilometers,
            duration_ms: 1_500_000,
            distance_per_unit: None,
            weight_kg: None,
        });
        let view = ExerciseRecordDetailsView::from(&details);
        let value = serde_json::to_value(&view).expect("serialize");
        assert_eq!(
            value,
            json!({"distance": 5.0, "distanceUnit": "KILOMETERS", "durationMs": 1_500_000})
        );
    }

    #[test]
    fn set_view_uses_camel_case() {
        let at = DateTime::parse_from_rfc3339("2025-02-02T07:00:00Z").unwrap();
        let set = ExerciseSet {
            start_time: at,
            end_time: at,
            rest_before_ms: None,
            duration_ms: Some(0),
            failure: true,
            weight_kg: 20.0,
            repetitions: 5,
            partial_repetitions: Some(2),
            order_index: 0,
        };
        let value = serde_json::to_value(ExerciseSetView::from(&set)).expect("serialize");
        assert_eq!(value["partialRepetitions"], json!(2));
        assert_eq!(value["weightKg"], json!(20.0));
        assert_eq!(value["orderIndex"], json!(0));
    }
}
