//! Catalog entities and the record/set values a workout is built from.

use chrono::{DateTime, FixedOffset};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Timestamps as submitted by clients, offset preserved.
pub type Timestamp = DateTime<FixedOffset>;

/// Milliseconds between two timestamps; negative when `end` precedes `start`.
pub fn millis_between(start: &Timestamp, end: &Timestamp) -> i64 {
    end.signed_duration_since(*start).num_milliseconds()
}

/// Reference to the user owning a workout.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(transparent)]
pub struct UserId(pub i64);

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExerciseType {
    Distance,
    SetsReps,
    SetsTime,
}

impl ExerciseType {
    pub fn is_set_based(self) -> bool {
        matches!(self, ExerciseType::SetsReps | ExerciseType::SetsTime)
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DistanceUnit {
    #[serde(alias = "M")]
    Meters,
    #[serde(alias = "KM")]
    Kilometers,
    #[serde(alias = "MI")]
    Miles,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExerciseDefinition {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub exercise_type: ExerciseType,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkoutType {
    pub id: i64,
    pub name: String,
}

/// One performed set of a set-based exercise.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ExerciseSet {
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    /// Gap to the previous set's end; `None` for the first set of a record.
    pub rest_before_ms: Option<i64>,
    pub duration_ms: Option<i64>,
    pub failure: bool,
    pub weight_kg: f64,
    pub repetitions: i32,
    /// Only ever `Some` when `failure` is set.
    pub partial_repetitions: Option<i32>,
    pub order_index: i32,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct DistanceDetails {
    pub distance: f64,
    pub distance_unit: DistanceUnit,
    pub duration_ms: i64,
    pub distance_per_unit: Option<f64>,
    pub weight_kg: Option<f64>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct SetBasedDetails {
    /// Sorted ascending by `order_index`, never empty.
    pub sets: Vec<ExerciseSet>,
    pub average_rest_time_ms: Option<f64>,
    pub weight_kg: Option<f64>,
}

/// Type-specific half of an [`ExerciseRecord`].
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordDetails {
    Distance(DistanceDetails),
    SetBased(SetBasedDetails),
}

/// One exercise performed within a workout.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ExerciseRecord {
    /// Assigned by the store on save.
    pub id: Option<i64>,
    /// Back-reference to the owning workout, assigned by the store on save.
    pub workout_id: Option<i64>,
    pub definition: ExerciseDefinition,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub order_index: i32,
    pub details: RecordDetails,
}

impl ExerciseRecord {
    pub fn exercise_type(&self) -> ExerciseType {
        self.definition.exercise_type
    }

    pub fn duration_ms(&self) -> i64 {
        match &self.details {
            RecordDetails::Distance(d) => d.duration_ms,
            RecordDetails::SetBased(_) => millis_between(&self.start_time, &self.end_time),
        }
    }

    pub fn sets(&self) -> &[ExerciseSet] {
        match &self.details {
            RecordDetails::SetBased(d) => &d.sets,
            RecordDetails::Distance(_) => &[],
        }
    }
}
